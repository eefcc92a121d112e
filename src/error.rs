//! Structured error types for the Vademecum rendering engine.
//!
//! Layout itself never fails: overflow, oversized clauses and unknown palette
//! keys are all absorbed by the flow engine. Errors come from parsing the
//! input, from the drawing backend, and from exporting the finished file.

use thiserror::Error;

/// The unified error type returned by all public Vademecum API functions.
#[derive(Error, Debug)]
pub enum VademecumError {
    /// JSON input failed to parse as a valid compilation.
    #[error("Failed to parse compilation: {source}{}", hint_suffix(.hint))]
    ParseError {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// A page was selected that the canvas does not have.
    #[error("Page {index} out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    /// A drawing operation was issued before any page was opened.
    #[error("No page selected: open a page before drawing")]
    NoPage,

    /// Writing the finished document failed.
    #[error("Export failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, VademecumError>;

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for VademecumError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the compilation schema. Expected { \"laws\": [...], \"config\": { \"title\": ... } }.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        VademecumError::ParseError { source: e, hint }
    }
}
