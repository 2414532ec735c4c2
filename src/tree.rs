//! Parse-tree boundary: the parser's JSON node shapes, decoded once into
//! the closed [`Element`] variant.
//!
//! Element kinds other than classes and protocols are dropped here so the
//! rest of the crate never sees them.

use crate::error::Result;
use crate::model::*;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTree {
    root_namespace: RawNamespace,
}

#[derive(Deserialize)]
struct RawNamespace {
    #[serde(default)]
    elements: Vec<RawElement>,
}

#[derive(Deserialize)]
struct RawElement {
    body: RawBody,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawBody {
    Class {
        name: String,
        #[serde(rename = "parentClassName", default)]
        parent_class_name: String,
        #[serde(default)]
        members: Vec<RawMember>,
    },
    Protocol {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        methods: Vec<RawMethod>,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct RawMember {
    name: String,
    #[serde(rename = "type")]
    raw_type: String,
}

#[derive(Deserialize)]
struct RawMethod {
    name: String,
    #[serde(default)]
    parameters: Vec<RawParameter>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawParameter {
    Parameter {
        name: String,
        #[serde(rename = "type")]
        raw_type: String,
        direction: i64,
    },
    ReturnValue {
        name: String,
        #[serde(rename = "type")]
        raw_type: String,
    },
}

/// Decode a JSON parse tree.
pub fn decode(json: &str) -> Result<ParseTree> {
    let raw: RawTree = serde_json::from_str(json)?;
    let elements = raw
        .root_namespace
        .elements
        .into_iter()
        .filter_map(|e| decode_body(e.body))
        .collect();
    Ok(ParseTree { elements })
}

fn decode_body(body: RawBody) -> Option<Element> {
    match body {
        RawBody::Class {
            name,
            parent_class_name,
            members,
        } => Some(Element::Class(ClassDecl {
            name,
            parent_name: parent_class_name,
            members: members
                .into_iter()
                .map(|m| Member {
                    name: m.name,
                    raw_type: m.raw_type,
                })
                .collect(),
        })),
        RawBody::Protocol { name, methods } => Some(Element::Protocol(ProtocolDecl {
            name,
            methods: methods.into_iter().map(decode_method).collect(),
        })),
        RawBody::Other => None,
    }
}

fn decode_method(method: RawMethod) -> MethodDecl {
    let parameters = method
        .parameters
        .into_iter()
        .map(|p| match p {
            RawParameter::Parameter {
                name,
                raw_type,
                direction,
            } => ParameterDecl {
                name,
                raw_type,
                kind: ParameterKind::Plain { direction },
            },
            RawParameter::ReturnValue { name, raw_type } => ParameterDecl {
                name,
                raw_type,
                kind: ParameterKind::ReturnValue,
            },
        })
        .collect();
    MethodDecl {
        name: method.name,
        parameters,
    }
}
