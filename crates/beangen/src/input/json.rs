//! JSON metadata document to registry parser.
//!
//! The document registers bean types by hand, in place of runtime
//! reflection. Fields are arrays because JSON object key order does not
//! survive parsing, and declaration order is load-bearing for the
//! generators:
//!
//! ```json
//! {
//!   "enums": ["Status"],
//!   "types": {
//!     "Person": [
//!       {"name": "age", "type": "int"},
//!       {"name": "status", "type": "Status"}
//!     ]
//!   }
//! }
//! ```

use crate::ir::{FieldDescriptor, JavaType, PrimitiveKind, TypeRegistry};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("metadata document must be a JSON object")]
    NotAnObject,
    #[error("malformed entry in `{0}`: {1}")]
    MalformedField(String, String),
}

/// Parse a JSON metadata document into a [`TypeRegistry`].
pub fn parse_type_map(input: &Value) -> Result<TypeRegistry, ParseError> {
    let root = input.as_object().ok_or(ParseError::NotAnObject)?;

    let enums: HashSet<&str> = root
        .get("enums")
        .and_then(|e| e.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default();

    let mut registry = TypeRegistry::new();
    if let Some(types) = root.get("types").and_then(|t| t.as_object()) {
        for (type_name, fields_value) in types {
            let entries = fields_value.as_array().ok_or_else(|| {
                ParseError::MalformedField(type_name.clone(), "fields must be an array".into())
            })?;

            let mut fields = Vec::with_capacity(entries.len());
            for entry in entries {
                let name = entry.get("name").and_then(|n| n.as_str()).ok_or_else(|| {
                    ParseError::MalformedField(type_name.clone(), "field entry missing name".into())
                })?;
                let ty = entry.get("type").and_then(|t| t.as_str()).ok_or_else(|| {
                    ParseError::MalformedField(
                        type_name.clone(),
                        format!("field `{name}` missing type"),
                    )
                })?;
                fields.push(FieldDescriptor::new(name, parse_type(ty, &enums)));
            }
            registry.register(type_name.clone(), fields);
        }
    }
    Ok(registry)
}

/// Resolve a declared-type spelling. Names listed under `enums` become
/// enumerations; unrecognized names are nested record types.
fn parse_type(spelling: &str, enums: &HashSet<&str>) -> JavaType {
    let spelling = spelling.trim();

    if let Some(kind) = primitive_kind(spelling) {
        return JavaType::Primitive(kind);
    }
    if let Some(kind) = boxed_kind(spelling) {
        return JavaType::Boxed(kind);
    }
    match spelling {
        "String" => return JavaType::Text,
        "Date" => return JavaType::Date,
        "LocalDate" => return JavaType::LocalDate,
        "LocalTime" => return JavaType::LocalTime,
        "LocalDateTime" => return JavaType::LocalDateTime,
        _ => {}
    }
    if spelling.ends_with("[]") {
        return JavaType::Array(spelling.to_string());
    }
    let base = spelling.split('<').next().unwrap_or(spelling);
    match base {
        "List" | "Set" | "Collection" => return JavaType::Collection(spelling.to_string()),
        "Map" => return JavaType::Map(spelling.to_string()),
        _ => {}
    }
    if enums.contains(spelling) {
        return JavaType::Enum(spelling.to_string());
    }
    JavaType::Class(spelling.to_string())
}

fn primitive_kind(spelling: &str) -> Option<PrimitiveKind> {
    Some(match spelling {
        "byte" => PrimitiveKind::Byte,
        "short" => PrimitiveKind::Short,
        "int" => PrimitiveKind::Int,
        "long" => PrimitiveKind::Long,
        "float" => PrimitiveKind::Float,
        "double" => PrimitiveKind::Double,
        "boolean" => PrimitiveKind::Boolean,
        "char" => PrimitiveKind::Char,
        _ => return None,
    })
}

fn boxed_kind(spelling: &str) -> Option<PrimitiveKind> {
    Some(match spelling {
        "Byte" => PrimitiveKind::Byte,
        "Short" => PrimitiveKind::Short,
        "Integer" => PrimitiveKind::Int,
        "Long" => PrimitiveKind::Long,
        "Float" => PrimitiveKind::Float,
        "Double" => PrimitiveKind::Double,
        "Boolean" => PrimitiveKind::Boolean,
        "Character" => PrimitiveKind::Char,
        _ => return None,
    })
}
