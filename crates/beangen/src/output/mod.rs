//! Output generators.
//!
//! Each generator takes a [`TypeMetadataProvider`](crate::traits::TypeMetadataProvider)
//! plus type names and produces one Java method as text.

pub mod convert;
pub mod flatten;

pub use convert::ConvertGenerator;
pub use flatten::{FlattenGenerator, NameMapper, Step, ValueMapper, ValueMappers};
