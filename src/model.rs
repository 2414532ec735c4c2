//! Data model for declarations and extracted protocols — format-agnostic.

use std::collections::HashSet;
use std::fmt;

/// Parent assumed for classes that declare none.
pub const ROOT_RECORD_TYPE: &str = "Structure";

/// Parameter name the DDL uses for a method's return value.
pub const RETURN_VALUE_MARKER: &str = "%retval%";

/// Decoded parse tree: top-level elements in source order.
#[derive(Debug, Default)]
pub struct ParseTree {
    pub elements: Vec<Element>,
}

/// The two declaration kinds the documentation cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Class(ClassDecl),
    Protocol(ProtocolDecl),
}

/// A record type with ordered members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    /// Empty when no parent was declared.
    pub parent_name: String,
    pub members: Vec<Member>,
}

impl ClassDecl {
    /// Declared parent, or the root record type.
    pub fn parent(&self) -> &str {
        if self.parent_name.is_empty() {
            ROOT_RECORD_TYPE
        } else {
            &self.parent_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub raw_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolDecl {
    /// `None` or empty when the parser could not determine a name.
    pub name: Option<String>,
    pub methods: Vec<MethodDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    pub parameters: Vec<ParameterDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDecl {
    pub name: String,
    pub raw_type: String,
    pub kind: ParameterKind,
}

/// How a parameter node was tagged by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Plain parameter with the parser's raw direction tag.
    Plain { direction: i64 },
    ReturnValue,
}

// -- Extracted ----------------------------------------------------------------

/// One protocol with its methods and the classes declared before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolDefinition {
    pub name: String,
    pub id: ProtocolId,
    pub methods: Vec<Method>,
    pub classes: Vec<ClassDecl>,
}

impl ProtocolDefinition {
    /// Names of the classes declared in this protocol's scope.
    pub fn local_type_names(&self) -> HashSet<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Numeric protocol identifier. The parse tree carries no source for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProtocolId {
    #[default]
    Unknown,
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolId::Unknown => f.write_str("Unknown ID"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub request: Vec<Parameter>,
    /// Return value first (if any), then output parameters in order.
    pub response: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub raw_type: String,
    pub is_return_value: bool,
}

impl Parameter {
    /// Field name used in the generated stub struct.
    pub fn stub_field_name(&self) -> String {
        let lower = self.name.to_lowercase();
        if self.is_return_value || lower == RETURN_VALUE_MARKER {
            "val".to_string()
        } else {
            lower
        }
    }
}
