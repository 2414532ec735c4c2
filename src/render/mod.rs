//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::error::{Error, Result};
use crate::model::ProtocolDefinition;

/// Trait for rendering one protocol into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &ProtocolDefinition) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(Error::UnknownFormat(format.to_string())),
    }
}
