//! Intermediate representation for bean type metadata.
//!
//! All metadata inputs (manual registration, the JSON document format)
//! normalize to this IR before being passed to the output generators.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The eight Java primitive kinds, shared by primitive and boxed types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Char,
}

impl PrimitiveKind {
    /// Primitive spelling (`int`, `boolean`, ...).
    pub fn primitive_name(self) -> &'static str {
        match self {
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Char => "char",
        }
    }

    /// Boxed spelling (`Integer`, `Boolean`, ...).
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Int => "Integer",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Char => "Character",
        }
    }

    /// Widening-promotion rank for the numeric kinds; `None` for boolean.
    /// `char` shares short's rank so it widens only to int and beyond,
    /// and the `widens_to` guard keeps anything from widening into it.
    fn widening_rank(self) -> Option<u8> {
        match self {
            PrimitiveKind::Byte => Some(1),
            PrimitiveKind::Short => Some(2),
            PrimitiveKind::Char => Some(2),
            PrimitiveKind::Int => Some(3),
            PrimitiveKind::Long => Some(4),
            PrimitiveKind::Float => Some(5),
            PrimitiveKind::Double => Some(6),
            PrimitiveKind::Boolean => None,
        }
    }

    /// Whether a value of `self` widens into `dest` (strictly; identical
    /// kinds are handled by assignability, not promotion).
    pub fn widens_to(self, dest: PrimitiveKind) -> bool {
        if dest == PrimitiveKind::Char {
            return false;
        }
        match (self.widening_rank(), dest.widening_rank()) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }
}

/// A field's declared type in the generated language.
///
/// Named variants (`Enum`, `Collection`, `Map`, `Array`, `Class`) compare
/// by name; generic parameters are part of the name and are never
/// interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JavaType {
    Primitive(PrimitiveKind),
    Boxed(PrimitiveKind),
    /// `String`.
    Text,
    Date,
    LocalDate,
    LocalTime,
    LocalDateTime,
    /// An enumeration type, by simple name.
    Enum(String),
    Collection(String),
    Map(String),
    Array(String),
    /// A nested record (container) type, by simple name.
    Class(String),
}

/// Classification of a declared type, used to select transform hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeCategory {
    Primitive,
    Number,
    Boolean,
    Character,
    String,
    Date,
    LocalDate,
    LocalTime,
    LocalDateTime,
    Enumeration,
    Collection,
    Map,
    Array,
    Container,
}

impl JavaType {
    /// Source-level spelling of the type.
    pub fn display(&self) -> &str {
        match self {
            JavaType::Primitive(k) => k.primitive_name(),
            JavaType::Boxed(k) => k.boxed_name(),
            JavaType::Text => "String",
            JavaType::Date => "Date",
            JavaType::LocalDate => "LocalDate",
            JavaType::LocalTime => "LocalTime",
            JavaType::LocalDateTime => "LocalDateTime",
            JavaType::Enum(name)
            | JavaType::Collection(name)
            | JavaType::Map(name)
            | JavaType::Array(name)
            | JavaType::Class(name) => name,
        }
    }

    /// Classify the type. Total and pure: every type has exactly one
    /// category.
    pub fn category(&self) -> TypeCategory {
        match self {
            JavaType::Primitive(_) => TypeCategory::Primitive,
            JavaType::Boxed(PrimitiveKind::Boolean) => TypeCategory::Boolean,
            JavaType::Boxed(PrimitiveKind::Char) => TypeCategory::Character,
            JavaType::Boxed(_) => TypeCategory::Number,
            JavaType::Text => TypeCategory::String,
            JavaType::Date => TypeCategory::Date,
            JavaType::LocalDate => TypeCategory::LocalDate,
            JavaType::LocalTime => TypeCategory::LocalTime,
            JavaType::LocalDateTime => TypeCategory::LocalDateTime,
            JavaType::Enum(_) => TypeCategory::Enumeration,
            JavaType::Collection(_) => TypeCategory::Collection,
            JavaType::Map(_) => TypeCategory::Map,
            JavaType::Array(_) => TypeCategory::Array,
            JavaType::Class(_) => TypeCategory::Container,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, JavaType::Primitive(_))
    }

    pub fn is_boxed(&self) -> bool {
        matches!(self, JavaType::Boxed(_))
    }

    /// The primitive kind behind a primitive or boxed type.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            JavaType::Primitive(k) | JavaType::Boxed(k) => Some(*k),
            _ => None,
        }
    }
}

/// A field of a registered type: name, declared type, and the derived
/// accessor names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name as declared.
    pub name: String,
    /// Declared type.
    pub ty: JavaType,
    /// Getter method name (`get` + capitalized field name).
    pub getter: String,
    /// Setter method name (`set` + capitalized field name).
    pub setter: String,
}

impl FieldDescriptor {
    /// Build a descriptor, deriving accessor names from the field name.
    ///
    /// Derivation is `get`/`set` + capitalized name for every category,
    /// including booleans (no `is` prefix).
    pub fn new(name: impl Into<String>, ty: JavaType) -> Self {
        let name = name.into();
        let cap = capitalize(&name);
        Self {
            getter: format!("get{}", cap),
            setter: format!("set{}", cap),
            name,
            ty,
        }
    }

    pub fn category(&self) -> TypeCategory {
        self.ty.category()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Manually registered type metadata; the stock
/// [`TypeMetadataProvider`](crate::traits::TypeMetadataProvider).
///
/// Fields are kept in registration order, which stands in for declaration
/// order. Static and synthetic members are a registration-time concern:
/// whatever is registered is what the generators see.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, Vec<FieldDescriptor>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type's fields in declaration order, replacing any
    /// previous registration under the same name.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        fields: impl IntoIterator<Item = FieldDescriptor>,
    ) -> &mut Self {
        self.types
            .insert(type_name.into(), fields.into_iter().collect());
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub(crate) fn lookup(&self, type_name: &str) -> Option<&[FieldDescriptor]> {
        self.types.get(type_name).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessor_derivation() {
        let f = FieldDescriptor::new("someBool", JavaType::Primitive(PrimitiveKind::Boolean));
        assert_eq!(f.getter, "getSomeBool");
        assert_eq!(f.setter, "setSomeBool");
    }

    #[test]
    fn every_type_has_one_category() {
        assert_eq!(
            JavaType::Primitive(PrimitiveKind::Int).category(),
            TypeCategory::Primitive
        );
        assert_eq!(
            JavaType::Boxed(PrimitiveKind::Long).category(),
            TypeCategory::Number
        );
        assert_eq!(
            JavaType::Boxed(PrimitiveKind::Boolean).category(),
            TypeCategory::Boolean
        );
        assert_eq!(
            JavaType::Boxed(PrimitiveKind::Char).category(),
            TypeCategory::Character
        );
        assert_eq!(JavaType::Text.category(), TypeCategory::String);
        assert_eq!(
            JavaType::Enum("Status".into()).category(),
            TypeCategory::Enumeration
        );
        assert_eq!(
            JavaType::Class("Address".into()).category(),
            TypeCategory::Container
        );
    }

    #[test]
    fn widening_is_strict_and_one_directional() {
        use PrimitiveKind::*;
        assert!(Byte.widens_to(Short));
        assert!(Short.widens_to(Int));
        assert!(Char.widens_to(Int));
        assert!(Int.widens_to(Double));
        assert!(Long.widens_to(Float));
        assert!(!Int.widens_to(Int));
        assert!(!Long.widens_to(Int));
        assert!(!Int.widens_to(Char));
        assert!(!Boolean.widens_to(Int));
        assert!(!Int.widens_to(Boolean));
    }

    #[test]
    fn display_spellings() {
        assert_eq!(JavaType::Primitive(PrimitiveKind::Int).display(), "int");
        assert_eq!(JavaType::Boxed(PrimitiveKind::Int).display(), "Integer");
        assert_eq!(JavaType::Text.display(), "String");
        assert_eq!(JavaType::Collection("List<Long>".into()).display(), "List<Long>");
    }

    #[test]
    fn registry_preserves_field_order() {
        let mut reg = TypeRegistry::new();
        reg.register(
            "A",
            [
                FieldDescriptor::new("z", JavaType::Text),
                FieldDescriptor::new("a", JavaType::Text),
            ],
        );
        let fields = reg.lookup("A").unwrap();
        assert_eq!(fields[0].name, "z");
        assert_eq!(fields[1].name, "a");
    }
}
