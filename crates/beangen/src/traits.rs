//! The metadata seam between the generators and whatever enumerates types.

use crate::ir::{FieldDescriptor, TypeRegistry};

/// Metadata cannot be enumerated for a type. Fatal for the whole
/// generation call; no partial output is returned.
#[derive(Debug, thiserror::Error)]
pub enum IntrospectionError {
    #[error("no metadata registered for type `{0}`")]
    UnknownType(String),
}

/// Enumerates a type's fields in declaration order.
///
/// The stock implementation is [`TypeRegistry`]; anything that can
/// produce ordered [`FieldDescriptor`]s works — derived schemas, struct
/// tags, hand-written tables. The generators never assume runtime
/// reflection exists.
pub trait TypeMetadataProvider {
    /// Fields of `type_name` in declaration order.
    fn fields(&self, type_name: &str) -> Result<Vec<FieldDescriptor>, IntrospectionError>;
}

impl TypeMetadataProvider for TypeRegistry {
    fn fields(&self, type_name: &str) -> Result<Vec<FieldDescriptor>, IntrospectionError> {
        self.lookup(type_name)
            .map(<[FieldDescriptor]>::to_vec)
            .ok_or_else(|| IntrospectionError::UnknownType(type_name.to_string()))
    }
}
