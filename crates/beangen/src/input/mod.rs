//! Metadata inputs.
//!
//! Each input reads a type description and produces a
//! [`TypeRegistry`](crate::ir::TypeRegistry).

mod json;

pub use json::{ParseError, parse_type_map};
