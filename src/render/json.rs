//! JSON renderer — structured output for tooling integration.
//!
//! Carries the same resolved facts as the markdown page: every type with
//! its display markup, link target, and stub type, plus the stub code.

use crate::anchor;
use crate::error::{Error, Result};
use crate::model::*;
use crate::render::markdown::{render_class, render_method};
use crate::render::Renderer;
use crate::resolve::{resolve, ResolvedType};
use serde::Serialize;
use std::collections::HashSet;

pub struct JsonRenderer;

#[derive(Serialize)]
struct ProtocolView<'a> {
    name: &'a str,
    id: String,
    methods: Vec<MethodView<'a>>,
    types: Vec<ClassView<'a>>,
}

#[derive(Serialize)]
struct MethodView<'a> {
    id: usize,
    name: &'a str,
    anchor: String,
    request: Vec<FieldView<'a>>,
    response: Vec<FieldView<'a>>,
    stub: String,
}

#[derive(Serialize)]
struct ClassView<'a> {
    name: &'a str,
    anchor: String,
    parent: TypeView,
    members: Vec<FieldView<'a>>,
    stub: String,
}

#[derive(Serialize)]
struct FieldView<'a> {
    name: &'a str,
    raw_type: &'a str,
    #[serde(rename = "type")]
    resolved: TypeView,
}

#[derive(Serialize)]
struct TypeView {
    display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    stub: String,
}

impl From<ResolvedType> for TypeView {
    fn from(resolved: ResolvedType) -> Self {
        TypeView {
            display: resolved.markup(),
            link: resolved.doc_link,
            stub: resolved.stub_text,
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, doc: &ProtocolDefinition) -> Result<String> {
        let locals = doc.local_type_names();

        let view = ProtocolView {
            name: &doc.name,
            id: doc.id.to_string(),
            methods: doc
                .methods
                .iter()
                .enumerate()
                .map(|(i, m)| method_view(m, i + 1, &locals))
                .collect(),
            types: doc.classes.iter().map(|c| class_view(c, &locals)).collect(),
        };

        let mut out = serde_json::to_string_pretty(&view).map_err(|source| Error::Json {
            protocol: doc.name.clone(),
            source,
        })?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

fn method_view<'a>(method: &'a Method, id: usize, locals: &HashSet<&str>) -> MethodView<'a> {
    let fields = |params: &'a [Parameter]| -> Vec<FieldView<'a>> {
        params
            .iter()
            .map(|p| FieldView {
                name: &p.name,
                raw_type: &p.raw_type,
                resolved: resolve(&p.raw_type, locals).into(),
            })
            .collect()
    };

    MethodView {
        id,
        name: &method.name,
        anchor: anchor::method_anchor(id, &method.name),
        request: fields(&method.request),
        response: fields(&method.response),
        stub: render_method(method, id, locals).stub,
    }
}

fn class_view<'a>(class: &'a ClassDecl, locals: &HashSet<&str>) -> ClassView<'a> {
    ClassView {
        name: &class.name,
        anchor: anchor::type_anchor(&class.name),
        parent: resolve(class.parent(), locals).into(),
        members: class
            .members
            .iter()
            .map(|m| FieldView {
                name: &m.name,
                raw_type: &m.raw_type,
                resolved: resolve(&m.raw_type, locals).into(),
            })
            .collect(),
        stub: render_class(class, locals).stub,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_view_of_protocol() {
        let doc = ProtocolDefinition {
            name: "ExampleProtocol".to_string(),
            id: ProtocolId::Unknown,
            methods: vec![Method {
                name: "Hello".to_string(),
                request: vec![Parameter {
                    name: "name".to_string(),
                    raw_type: "string".to_string(),
                    is_return_value: false,
                }],
                response: vec![],
            }],
            classes: vec![ClassDecl {
                name: "Foo".to_string(),
                parent_name: String::new(),
                members: vec![Member {
                    name: "bar".to_string(),
                    raw_type: "qvector<byte>".to_string(),
                }],
            }],
        };
        let output = JsonRenderer.render(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["name"], "ExampleProtocol");
        assert_eq!(value["id"], "Unknown ID");
        let method = &value["methods"][0];
        assert_eq!(method["anchor"], "#1-hello");
        assert_eq!(method["request"][0]["type"]["display"], "NexString");
        assert_eq!(method["request"][0]["type"]["stub"], "NexString");
        assert!(method["request"][0]["type"].get("link").is_none());
        assert!(method["stub"].as_str().unwrap().contains("pub struct HelloOutput {\n}"));

        let class = &value["types"][0];
        assert!(class["parent"]["display"].as_str().unwrap().starts_with("[Structure]("));
        assert_eq!(class["members"][0]["raw_type"], "qvector<byte>");
        assert_eq!(class["members"][0]["type"]["display"], "NexBuffer");
    }
}
