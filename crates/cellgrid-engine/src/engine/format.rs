use std::fmt;

use super::{ErrorKind, Value};

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            Value::Text(s) => f.write_str(s),
            Value::Error(kind) => write!(f, "{}", kind),
        }
    }
}

/// Format an optional cached value for display. Unset cells render empty.
pub fn format_value(value: Option<&Value>) -> String {
    value.map(Value::to_string).unwrap_or_default()
}
