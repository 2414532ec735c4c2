//! Tree walk: groups classes with the protocol that follows them and
//! buckets each method's parameters into request and response.

use crate::error::{Error, Result};
use crate::model::*;
use tracing::{debug, info, warn};

const DIRECTION_REQUEST: i64 = 1;
const DIRECTION_RESPONSE: i64 = 2;

/// Source of synthetic names for protocols the parser left unnamed.
///
/// Never resets: keep one alive across runs and the numbering continues.
#[derive(Debug, Default)]
pub struct NameCounter {
    next: u32,
}

impl NameCounter {
    pub fn next_name(&mut self) -> String {
        let name = format!("Unknown Protocol - {}", self.next);
        self.next += 1;
        name
    }
}

/// Walk the tree once, left to right.
///
/// Classes are buffered until the next protocol and handed to it. Classes
/// after the last protocol belong to no document and are dropped.
pub fn extract(tree: &ParseTree, names: &mut NameCounter) -> Result<Vec<ProtocolDefinition>> {
    let mut protocols = Vec::new();
    let mut classes: Vec<ClassDecl> = Vec::new();

    for element in &tree.elements {
        match element {
            Element::Class(class) => {
                debug!(class = %class.name, members = class.members.len(), "found class");
                classes.push(class.clone());
            }
            Element::Protocol(decl) => {
                let name = match decl.name.as_deref() {
                    Some(name) if !name.is_empty() => name.to_string(),
                    _ => {
                        let name = names.next_name();
                        warn!("could not determine real protocol name, defaulting to {}", name);
                        name
                    }
                };
                info!(protocol = %name, "found protocol");

                let methods = decl
                    .methods
                    .iter()
                    .map(|m| extract_method(&name, m))
                    .collect::<Result<Vec<_>>>()?;

                protocols.push(ProtocolDefinition {
                    name,
                    id: ProtocolId::Unknown,
                    methods,
                    classes: std::mem::take(&mut classes),
                });
            }
        }
    }

    if !classes.is_empty() {
        debug!(count = classes.len(), "classes after the last protocol are not documented");
    }

    Ok(protocols)
}

fn extract_method(protocol: &str, decl: &MethodDecl) -> Result<Method> {
    let mut method = Method {
        name: decl.name.clone(),
        ..Default::default()
    };

    for param in &decl.parameters {
        let mut parameter = Parameter {
            name: param.name.clone(),
            raw_type: param.raw_type.clone(),
            is_return_value: false,
        };
        match param.kind {
            ParameterKind::ReturnValue => {
                parameter.is_return_value = true;
                method.response.insert(0, parameter);
            }
            ParameterKind::Plain {
                direction: DIRECTION_REQUEST,
            } => method.request.push(parameter),
            ParameterKind::Plain {
                direction: DIRECTION_RESPONSE,
            } => method.response.push(parameter),
            ParameterKind::Plain { direction } => {
                return Err(Error::UnknownDirection {
                    direction,
                    protocol: protocol.to_string(),
                    method: decl.name.clone(),
                    parameter: param.name.clone(),
                });
            }
        }
    }

    debug!(
        method = %method.name,
        request = method.request.len(),
        response = method.response.len(),
        "extracted method"
    );
    Ok(method)
}
