//! Markdown renderer: protocol header, method index, per-method sections,
//! and the Types appendix, each section followed by its stub struct.

use crate::anchor;
use crate::error::Result;
use crate::model::*;
use crate::render::Renderer;
use crate::resolve::resolve;
use std::collections::HashSet;

pub struct MarkdownRenderer;

const STUB_DERIVE: &str = "#[derive(Default, EndianRead, EndianWrite)]";

/// Rendered documentation for one method or class, plus its stub code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Markdown section, stub code blocks included.
    pub doc: String,
    /// Unfenced stub struct(s).
    pub stub: String,
}

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &ProtocolDefinition) -> Result<String> {
        let locals = doc.local_type_names();

        let mut output = format!(
            "## {} > {} ({})",
            anchor::protocols_link(),
            doc.name,
            doc.id
        );

        output.push_str("\n\n");
        output.push_str(&render_method_index(&doc.methods));

        for (i, method) in doc.methods.iter().enumerate() {
            output.push_str("\n\n");
            output.push_str(&render_method(method, i + 1, &locals).doc);
        }

        if !doc.classes.is_empty() {
            output.push_str("\n\n# Types");
            for class in &doc.classes {
                output.push_str("\n\n");
                output.push_str(&render_class(class, &locals).doc);
            }
        }

        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_method_index(methods: &[Method]) -> String {
    let mut table = String::from("| Method ID | Method Name |\n| --- | --- |");
    for (i, method) in methods.iter().enumerate() {
        let id = i + 1;
        let link = anchor::link(&method.name, &anchor::method_anchor(id, &method.name));
        table.push_str(&format!("\n| {} | {} |", id, link));
    }
    table
}

/// Render one method. `id` is its 1-based position in the protocol.
pub fn render_method(method: &Method, id: usize, locals: &HashSet<&str>) -> Fragment {
    let mut doc = format!("# ({}) {}", id, method.name);

    let input = render_parameters(
        &mut doc,
        "Request",
        "This method does not take any parameters",
        &method.request,
        &format!("{}Input", method.name),
        locals,
    );
    let output = render_parameters(
        &mut doc,
        "Response",
        "This method does not return anything",
        &method.response,
        &format!("{}Output", method.name),
        locals,
    );

    Fragment {
        doc,
        stub: format!("{}\n\n{}", input, output),
    }
}

/// Append a Request/Response subsection to `doc` and return its stub.
fn render_parameters(
    doc: &mut String,
    title: &str,
    empty_notice: &str,
    params: &[Parameter],
    struct_name: &str,
    locals: &HashSet<&str>,
) -> String {
    doc.push_str(&format!("\n\n## {}", title));

    let mut fields = Vec::with_capacity(params.len());
    if params.is_empty() {
        doc.push('\n');
        doc.push_str(empty_notice);
    } else {
        doc.push_str("\n| Type | Name | Description |");
        doc.push_str("\n| --- | --- | --- |");
        for param in params {
            let resolved = resolve(&param.raw_type, locals);
            doc.push_str(&format!(
                "\n| {} | {} |  |",
                encode_entities(&resolved.markup()),
                param.name
            ));
            fields.push((param.stub_field_name(), resolved.stub_text));
        }
    }

    let stub = render_stub(struct_name, &fields);
    doc.push('\n');
    doc.push_str(&code_block(&stub));
    stub
}

/// Render one class of the Types appendix.
///
/// Members named `dummy*` are padding: documented, but left out of the stub.
pub fn render_class(class: &ClassDecl, locals: &HashSet<&str>) -> Fragment {
    let parent_name = class.parent();
    let parent = resolve(parent_name, locals);

    let mut fields = Vec::with_capacity(class.members.len() + 1);
    if locals.contains(parent_name) {
        fields.push((parent_name.to_lowercase(), parent.stub_text.clone()));
    }

    let mut doc = format!("## {} ({})", class.name, parent.markup());
    doc.push_str("\n| Name | Type |");
    doc.push_str("\n| --- | --- |");

    for member in &class.members {
        let resolved = resolve(&member.raw_type, locals);
        doc.push_str(&format!(
            "\n| {} | {} |",
            member.name,
            encode_entities(&resolved.markup())
        ));
        if !member.name.contains("dummy") {
            fields.push((member.name.clone(), resolved.stub_text));
        }
    }

    let stub = render_stub(&class.name, &fields);
    doc.push('\n');
    doc.push_str(&code_block(&stub));
    Fragment { doc, stub }
}

fn render_stub(name: &str, fields: &[(String, String)]) -> String {
    let mut out = format!("{}\npub struct {} {{\n", STUB_DERIVE, name);
    for (field, ty) in fields {
        out.push_str(&format!("    {}: {},\n", field, ty));
    }
    out.push('}');
    out
}

fn code_block(code: &str) -> String {
    format!("```rust\n{}\n```", code)
}

/// Numeric character references for markup-significant and non-ASCII
/// characters, so type cells survive markdown and HTML rendering.
fn encode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' | '<' | '>' | '"' | '\'' | '`' => out.push_str(&format!("&#x{:X};", c as u32)),
            c if !c.is_ascii() => out.push_str(&format!("&#x{:X};", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_URL: &str = "https://github.com/kinnay/NintendoClients/wiki/NEX-Common-Types#list";

    fn param(name: &str, raw_type: &str) -> Parameter {
        Parameter {
            name: name.to_string(),
            raw_type: raw_type.to_string(),
            is_return_value: false,
        }
    }

    fn retval(raw_type: &str) -> Parameter {
        Parameter {
            name: "%retval%".to_string(),
            raw_type: raw_type.to_string(),
            is_return_value: true,
        }
    }

    fn member(name: &str, raw_type: &str) -> Member {
        Member {
            name: name.to_string(),
            raw_type: raw_type.to_string(),
        }
    }

    #[test]
    fn encode_markup_characters() {
        assert_eq!(encode_entities("List<u32>"), "List&#x3C;u32&#x3E;");
        assert_eq!(encode_entities("a&b \"c\""), "a&#x26;b &#x22;c&#x22;");
        assert_eq!(encode_entities("é"), "&#xE9;");
        assert_eq!(encode_entities("[Foo](#foo)"), "[Foo](#foo)");
    }

    #[test]
    fn method_without_request_parameters() {
        let method = Method {
            name: "Ping".to_string(),
            request: vec![],
            response: vec![],
        };
        let fragment = render_method(&method, 3, &HashSet::new());
        assert!(fragment.doc.starts_with("# (3) Ping\n\n## Request\nThis method does not take any parameters\n```rust\n"));
        assert!(fragment.doc.contains(
            "## Request\nThis method does not take any parameters\n```rust\n#[derive(Default, EndianRead, EndianWrite)]\npub struct PingInput {\n}\n```"
        ));
        assert!(fragment.doc.contains(
            "## Response\nThis method does not return anything\n```rust\n#[derive(Default, EndianRead, EndianWrite)]\npub struct PingOutput {\n}\n```"
        ));
        assert_eq!(
            fragment.stub,
            "#[derive(Default, EndianRead, EndianWrite)]\npub struct PingInput {\n}\n\n#[derive(Default, EndianRead, EndianWrite)]\npub struct PingOutput {\n}"
        );
    }

    #[test]
    fn method_with_parameters() {
        let method = Method {
            name: "GetFriends".to_string(),
            request: vec![param("uiPid", "uint32"), param("lstIds", "std_list<uint64>")],
            response: vec![retval("qresult"), param("friends", "qlist<FriendInfo>")],
        };
        let locals: HashSet<&str> = ["FriendInfo"].into_iter().collect();
        let fragment = render_method(&method, 2, &locals);

        let expected_request = format!(
            "## Request\n| Type | Name | Description |\n| --- | --- | --- |\n| u32 | uiPid |  |\n| [List]({})&#x3C;u64&#x3E; | lstIds |  |\n```rust\n#[derive(Default, EndianRead, EndianWrite)]\npub struct GetFriendsInput {{\n    uipid: u32,\n    lstids: NexList<u64>,\n}}\n```",
            LIST_URL
        );
        assert!(fragment.doc.contains(&expected_request), "{}", fragment.doc);

        let expected_response = format!(
            "## Response\n| Type | Name | Description |\n| --- | --- | --- |\n| ResultCode | %retval% |  |\n| [List]({})&#x3C;[FriendInfo](#friendinfo)&#x3E; | friends |  |\n```rust\n#[derive(Default, EndianRead, EndianWrite)]\npub struct GetFriendsOutput {{\n    val: ResultCode,\n    friends: NexList<FriendInfo>,\n}}\n```",
            LIST_URL
        );
        assert!(fragment.doc.contains(&expected_response), "{}", fragment.doc);
    }

    #[test]
    fn class_dummy_members_not_stubbed() {
        let class = ClassDecl {
            name: "Gathering".to_string(),
            parent_name: String::new(),
            members: vec![
                member("m_idMyself", "uint32"),
                member("m_dummyPadding", "uint8"),
                member("m_strDescription", "string"),
            ],
        };
        let fragment = render_class(&class, &HashSet::new());
        assert!(fragment.doc.contains("| m_dummyPadding | uint8 |"));
        assert!(!fragment.stub.contains("dummy"));
        assert_eq!(
            fragment.stub,
            "#[derive(Default, EndianRead, EndianWrite)]\npub struct Gathering {\n    m_idMyself: u32,\n    m_strDescription: NexString,\n}"
        );
    }

    #[test]
    fn class_parent_defaults_to_structure() {
        let class = ClassDecl {
            name: "Foo".to_string(),
            parent_name: String::new(),
            members: vec![member("bar", "qvector<byte>")],
        };
        let fragment = render_class(&class, &["Foo"].into_iter().collect());
        assert_eq!(
            fragment.doc,
            "## Foo ([Structure](https://github.com/kinnay/NintendoClients/wiki/NEX-Common-Types#structure))\n| Name | Type |\n| --- | --- |\n| bar | NexBuffer |\n```rust\n#[derive(Default, EndianRead, EndianWrite)]\npub struct Foo {\n    bar: NexBuffer,\n}\n```"
        );
    }

    #[test]
    fn class_local_parent_becomes_field() {
        let class = ClassDecl {
            name: "MatchmakeSession".to_string(),
            parent_name: "Gathering".to_string(),
            members: vec![member("m_GameMode", "uint32")],
        };
        let locals: HashSet<&str> = ["Gathering", "MatchmakeSession"].into_iter().collect();
        let fragment = render_class(&class, &locals);
        assert!(fragment
            .doc
            .starts_with("## MatchmakeSession ([Gathering](#gathering))\n"));
        assert!(fragment
            .stub
            .contains("pub struct MatchmakeSession {\n    gathering: Gathering,\n    m_GameMode: u32,\n}"));
    }

    #[test]
    fn class_external_parent_not_stubbed() {
        let class = ClassDecl {
            name: "Holder".to_string(),
            parent_name: "Data".to_string(),
            members: vec![],
        };
        let fragment = render_class(&class, &HashSet::new());
        assert!(fragment.doc.starts_with(
            "## Holder ([Data](https://github.com/kinnay/NintendoClients/wiki/NEX-Common-Types#data))"
        ));
        assert!(fragment.stub.ends_with("pub struct Holder {\n}"));
    }

    #[test]
    fn document_without_classes() {
        let doc = ProtocolDefinition {
            name: "ExampleProtocol".to_string(),
            id: ProtocolId::Unknown,
            methods: vec![Method {
                name: "Hello".to_string(),
                request: vec![param("name", "string")],
                response: vec![retval("uint32")],
            }],
            classes: vec![],
        };
        let output = MarkdownRenderer.render(&doc).unwrap();
        let expected = "\
## [NEX-Protocols](https://github.com/kinnay/NintendoClients/wiki/NEX-Protocols) > ExampleProtocol (Unknown ID)

| Method ID | Method Name |
| --- | --- |
| 1 | [Hello](#1-hello) |

# (1) Hello

## Request
| Type | Name | Description |
| --- | --- | --- |
| NexString | name |  |
```rust
#[derive(Default, EndianRead, EndianWrite)]
pub struct HelloInput {
    name: NexString,
}
```

## Response
| Type | Name | Description |
| --- | --- | --- |
| u32 | %retval% |  |
```rust
#[derive(Default, EndianRead, EndianWrite)]
pub struct HelloOutput {
    val: u32,
}
```";
        assert_eq!(output, expected);
        assert!(!output.contains("# Types"));
    }

    #[test]
    fn document_with_types_appendix() {
        let doc = ProtocolDefinition {
            name: "Matchmaking".to_string(),
            id: ProtocolId::Unknown,
            methods: vec![
                Method {
                    name: "First".to_string(),
                    ..Default::default()
                },
                Method {
                    name: "Second".to_string(),
                    ..Default::default()
                },
            ],
            classes: vec![
                ClassDecl {
                    name: "A".to_string(),
                    ..Default::default()
                },
                ClassDecl {
                    name: "B".to_string(),
                    ..Default::default()
                },
            ],
        };
        let output = MarkdownRenderer.render(&doc).unwrap();
        assert!(output.contains("| 1 | [First](#1-first) |\n| 2 | [Second](#2-second) |"));
        let first = output.find("# (1) First").unwrap();
        let second = output.find("# (2) Second").unwrap();
        let types = output.find("\n\n# Types\n\n## A (").unwrap();
        let b = output.find("\n\n## B (").unwrap();
        assert!(first < second && second < types && types < b);
        assert!(output.ends_with("pub struct B {\n}\n```"));
    }
}
