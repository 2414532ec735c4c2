//! Type resolution: raw DDL type tokens to display text, glossary links,
//! and stub types.
//!
//! A token is parsed once into a [`TypeExpr`], then resolved in this order:
//! local class, rename table, glossary term. Containers resolve their inner
//! type through the same chain. Anything else passes through unchanged.

use crate::anchor;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Raw token → canonical name, matching the naming of the NEX wiki.
pub const RENAMES: &[(&str, &str)] = &[
    ("qvector<byte>", "NexBuffer"),
    ("byte", "u8"),
    ("uint16", "u16"),
    ("uint32", "u32"),
    ("uint64", "u64"),
    ("int8", "i8"),
    ("int16", "i16"),
    ("int32", "i32"),
    ("int64", "i64"),
    ("string", "NexString"),
    ("bool", "bool"),
    ("datetime", "DateTime"),
    ("qresult", "ResultCode"),
    ("stationurl", "StationURL"),
    ("qBuffer", "NexQBuffer"),
    ("buffer", "NexBuffer"),
    ("ResultRange", "ResultRange"),
    ("variant", "Variant"),
    ("any<Data,string>", "DataHolder"),
];

/// Types documented on the common-types glossary page.
pub const GLOSSARY_TERMS: &[&str] = &[
    "String",
    "Buffer",
    "qBuffer",
    "List",
    "Map",
    "PID",
    "Result",
    "DateTime",
    "StationURL",
    "Variant",
    "Structure",
    "Data",
    "AnyDataHolder",
    "RVConnectionData",
    "ResultRange",
];

static RE_CONTAINER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(std_list|qvector|qlist)<(.+)>$").unwrap());

static RE_ANY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^any<\s*([^,>]+)").unwrap());

/// List container spellings. All three resolve identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    StdList,
    QVector,
    QList,
}

impl ContainerKind {
    fn from_head(head: &str) -> Option<Self> {
        match head {
            "std_list" => Some(ContainerKind::StdList),
            "qvector" => Some(ContainerKind::QVector),
            "qlist" => Some(ContainerKind::QList),
            _ => None,
        }
    }
}

/// Parsed shape of a raw type token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr<'a> {
    /// Token found verbatim in the rename table.
    Primitive(&'a str),
    /// `any<Inner, ...>`
    AnyWrapper { token: &'a str, inner: &'a str },
    Container {
        kind: ContainerKind,
        inner: Box<TypeExpr<'a>>,
    },
    Named(&'a str),
}

impl<'a> TypeExpr<'a> {
    pub fn parse(token: &'a str) -> Self {
        let token = token.trim();
        if rename(token).is_some() {
            return TypeExpr::Primitive(token);
        }
        if let Some(caps) = RE_ANY.captures(token) {
            let inner = caps.get(1).map_or("", |m| m.as_str().trim());
            return TypeExpr::AnyWrapper { token, inner };
        }
        if let Some(caps) = RE_CONTAINER.captures(token) {
            if let (Some(head), Some(inner)) = (caps.get(1), caps.get(2)) {
                if let Some(kind) = ContainerKind::from_head(head.as_str()) {
                    return TypeExpr::Container {
                        kind,
                        inner: Box::new(TypeExpr::parse(inner.as_str())),
                    };
                }
            }
        }
        TypeExpr::Named(token)
    }
}

/// Display, link, and stub forms of a raw type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Plain canonical name; `List` for containers.
    pub display_text: String,
    pub doc_link: Option<String>,
    /// Resolved element type of a container.
    pub inner: Option<Box<ResolvedType>>,
    pub stub_text: String,
}

impl ResolvedType {
    fn plain(name: &str) -> Self {
        ResolvedType {
            display_text: name.to_string(),
            doc_link: glossary_url(name),
            inner: None,
            stub_text: name.to_string(),
        }
    }

    /// Markdown form: linked name, followed by `<inner>` for containers.
    pub fn markup(&self) -> String {
        let mut out = match self.doc_link {
            Some(ref target) => anchor::link(&self.display_text, target),
            None => self.display_text.clone(),
        };
        if let Some(ref inner) = self.inner {
            out.push('<');
            out.push_str(&inner.markup());
            out.push('>');
        }
        out
    }
}

/// Canonical name for a raw token in the rename table.
pub fn rename(token: &str) -> Option<&'static str> {
    RENAMES
        .iter()
        .find(|(raw, _)| *raw == token)
        .map(|(_, canonical)| *canonical)
}

/// Glossary link for a common type name.
pub fn glossary_url(name: &str) -> Option<String> {
    GLOSSARY_TERMS
        .contains(&name)
        .then(|| anchor::common_type_url(name))
}

/// Resolve a raw type token against the classes declared in the same document.
pub fn resolve(raw_type: &str, local_types: &HashSet<&str>) -> ResolvedType {
    resolve_expr(&TypeExpr::parse(raw_type), local_types)
}

fn resolve_expr(expr: &TypeExpr<'_>, local_types: &HashSet<&str>) -> ResolvedType {
    match expr {
        TypeExpr::Primitive(token) | TypeExpr::Named(token) if local_types.contains(token) => {
            ResolvedType {
                display_text: token.to_string(),
                doc_link: Some(anchor::type_anchor(token)),
                inner: None,
                stub_text: token.to_string(),
            }
        }
        TypeExpr::Primitive(token) => ResolvedType::plain(rename(token).unwrap_or(*token)),
        // Inner type is kept literal, not resolved
        TypeExpr::AnyWrapper { token, inner } => ResolvedType {
            display_text: token.to_string(),
            doc_link: None,
            inner: None,
            stub_text: format!("DataHolder<{}>", inner),
        },
        TypeExpr::Container { inner, .. } => {
            let inner = resolve_expr(inner, local_types);
            ResolvedType {
                display_text: "List".to_string(),
                doc_link: glossary_url("List"),
                stub_text: format!("NexList<{}>", inner.stub_text),
                inner: Some(Box::new(inner)),
            }
        }
        TypeExpr::Named(name) => ResolvedType::plain(name),
    }
}
