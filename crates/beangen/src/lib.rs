//! Type-directed Java source generation from bean metadata.
//!
//! `beangen` takes structural metadata about Java-style bean types and
//! emits source text for two transformations: flattening a nested bean
//! graph into a flat `Map<String, Object>`, and field-by-field conversion
//! between two independently declared beans with coercion of mismatched
//! declared types.
//!
//! # Architecture
//!
//! ```text
//! Metadata Inputs            IR                 Output Generators
//! ───────────────        ─────────────        ──────────────────────
//! manual registration ─┐                   ┌─> flatten (bean → Map)
//! JSON document       ─┴─> TypeRegistry ───┴─> convert (bean → bean)
//!                          (ir.rs)
//! ```
//!
//! # Example
//!
//! ```
//! use beangen::{input::parse_type_map, output::FlattenGenerator};
//!
//! let doc = serde_json::json!({
//!     "types": {
//!         "Person": [
//!             {"name": "name", "type": "String"},
//!             {"name": "address", "type": "Address"}
//!         ],
//!         "Address": [
//!             {"name": "street", "type": "String"}
//!         ]
//!     }
//! });
//!
//! let registry = parse_type_map(&doc).unwrap();
//! let method = FlattenGenerator::new().generate(&registry, "Person").unwrap();
//! assert!(method.contains("map.put(\"name\", bean.getName());"));
//! assert!(method.contains("Address address = bean.getAddress();"));
//! ```
//!
//! Generation is a pure function of (metadata snapshot, configuration):
//! single-threaded, no I/O, no global state. The generators never check
//! that emitted text compiles — hard cases degrade silently by design
//! (first-wins key collisions, dropped or passthrough coercions).

pub mod coerce;
pub mod input;
pub mod ir;
pub mod output;
pub mod traits;

// Re-export commonly used items
pub use coerce::{CoercionChain, CoercionRule};
pub use input::{ParseError, parse_type_map};
pub use ir::{FieldDescriptor, JavaType, PrimitiveKind, TypeCategory, TypeRegistry};
pub use output::{ConvertGenerator, FlattenGenerator, ValueMappers};
pub use traits::{IntrospectionError, TypeMetadataProvider};
