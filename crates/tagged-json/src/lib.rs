//! # tagged-json
//!
//! A self-contained JSON value library: an in-memory tagged [`Value`] tree, a
//! recursive-descent parser that builds it from text, and a compact serializer
//! that renders it back.
//!
//! ## Quick start
//!
//! ```rust
//! use tagged_json::{parse, render, Value};
//!
//! let mut doc = parse(r#"{"name":"Alice","scores":[95,87]}"#).unwrap();
//! doc["scores"].push_back(92).unwrap();
//! doc["active"] = Value::from(true);
//! assert_eq!(
//!     render(&doc),
//!     r#"{"active":true,"name":"Alice","scores":[95,87,92]}"#
//! );
//! ```
//!
//! Object members are kept in lexicographic key order, so rendering does not
//! preserve the order of the source text.
//!
//! ## Modules
//!
//! - [`value`]: the `Value` tree and its accessors and mutators
//! - [`parser`]: JSON text → `Value`
//! - [`serializer`]: `Value` → compact JSON text
//! - [`error`]: Error types for access and parse failures
//!
//! `Value` also implements `serde::Serialize` and `serde::Deserialize`.

pub mod error;
pub mod parser;
mod serde_impl;
pub mod serializer;
pub mod value;

pub use error::{ErrorKind, JsonError, Result};
pub use parser::{parse, parse_file, parse_reader, Parser};
pub use serializer::{render, render_into};
pub use value::{Kind, Map, Value};
