//! # Response Renderer
//!
//! Turns a [`RequestOutcome`] into display text. JSON bodies are
//! pretty-printed with 4-space indentation and non-ASCII left unescaped;
//! anything that fails to parse is shown verbatim. Whether the text should
//! be presented as an error travels alongside it; the actual visual channel
//! (color) is the REPL's concern.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use crate::transport::RequestOutcome;

/// Display text plus the error/ok presentation flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub is_error: bool,
}

/// Format an outcome for the operator.
pub fn render(outcome: &RequestOutcome) -> Rendered {
    match outcome {
        RequestOutcome::Response { body, .. } => Rendered {
            text: pretty_or_raw(body),
            is_error: outcome.is_error(),
        },
        RequestOutcome::Failed { error } => Rendered {
            text: error.clone(),
            is_error: true,
        },
    }
}

/// Pretty-print `body` if it parses as JSON, otherwise return it verbatim.
pub fn pretty_or_raw(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => pretty(&value),
        Err(_) => body.to_string(),
    }
}

/// Pretty-print a JSON value with 4-space indentation. serde_json leaves
/// non-ASCII characters unescaped, which is what we want for the terminal.
pub fn pretty(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    // Serializing a Value to an in-memory buffer cannot fail.
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}
