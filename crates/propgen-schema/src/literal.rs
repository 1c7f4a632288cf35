//! Rendering of declared values as Go literals for generated code.

use serde_yaml::Value;

use crate::error::LiteralError;
use crate::property::Property;

/// Render `value` as a Go literal.
///
/// Integers render in decimal, floats with one decimal place, strings
/// double-quoted (unless already quoted), and lists of strings as a
/// `[]string{...}` literal.
///
/// # Errors
///
/// `LiteralError::Unsupported` for null, mappings, tagged values, and
/// lists containing anything other than strings.
pub fn go_literal(value: &Value) -> Result<String, LiteralError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Ok(u.to_string())
            } else if let Some(f) = n.as_f64() {
                Ok(format!("{f:.1}"))
            } else {
                Err(unsupported(value))
            }
        }
        Value::Bool(b) => Ok(b.to_string()),
        Value::String(s) if s.starts_with('"') => Ok(s.clone()),
        Value::String(s) => Ok(format!("\"{s}\"")),
        Value::Sequence(items) => {
            let quoted = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(format!("\"{s}\"")),
                    _ => Err(unsupported(value)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("[]string{{{}}}", quoted.join(",")))
        }
        _ => Err(unsupported(value)),
    }
}

fn unsupported(value: &Value) -> LiteralError {
    let rendered = serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{value:?}"));
    LiteralError::Unsupported(rendered)
}

impl Property {
    /// The declared default value as a Go literal, if one is declared.
    pub fn default_literal(&self) -> Result<Option<String>, LiteralError> {
        self.default_value.as_ref().map(go_literal).transpose()
    }
}
