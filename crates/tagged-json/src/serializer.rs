//! [`Value`] → compact JSON text.
//!
//! Output has no whitespace and object members come out in key order. Two
//! behaviors keep the output from always parsing back to the same value:
//!
//! - **Doubles** are written in fixed notation with six fractional digits
//!   (`3.14` → `3.140000`, `1e-9` → `0.000000`), so precision can be lost.
//! - **Strings and keys** are written verbatim between quotes. Embedded quotes,
//!   backslashes and control characters are not re-escaped.
//! - **Non-finite doubles** are written as `NaN`, `inf` or `-inf`, which is
//!   not valid JSON. The parser yields `inf` for literals beyond `f64` range
//!   such as `1e400`. A `Double(NaN)` also never compares equal to itself, so
//!   equality is reflexive only for trees without NaN.
//!
//! # Example
//! ```
//! use tagged_json::{parse, render};
//! let value = parse(r#"{"b":[1,true,null],"a":"x"}"#).unwrap();
//! assert_eq!(render(&value), r#"{"a":"x","b":[1,true,null]}"#);
//! ```

use std::fmt;

use crate::value::{Map, Value};

/// Render a value as compact JSON text. Never fails.
pub fn render(value: &Value) -> String {
    let mut out = String::new();
    render_into(value, &mut out);
    out
}

/// Append the compact rendering of `value` to `out`.
pub fn render_into(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Double(f) => out.push_str(&format!("{:.6}", f)),
        Value::String(s) => render_quoted(s, out),
        Value::Array(items) => render_array(items, out),
        Value::Object(map) => render_object(map, out),
    }
}

fn render_quoted(s: &str, out: &mut String) {
    out.push('"');
    out.push_str(s);
    out.push('"');
}

fn render_array(items: &[Value], out: &mut String) {
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        render_into(item, out);
    }
    out.push(']');
}

fn render_object(map: &Map, out: &mut String) {
    out.push('{');
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        render_quoted(key, out);
        out.push(':');
        render_into(value, out);
    }
    out.push('}');
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
