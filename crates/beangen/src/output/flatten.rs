//! Bean-to-map flattening generator.
//!
//! Emits one static method that walks a nested bean graph through its
//! getters and collects every leaf value into a flat
//! `Map<String, Object>`. Multi-valued fields (collections, maps, arrays)
//! are never flattened; nested beans are descended into depth-first with
//! a per-branch cycle guard.

use crate::ir::{FieldDescriptor, TypeCategory};
use crate::traits::{IntrospectionError, TypeMetadataProvider};
use beangen_interp::render;
use std::collections::HashSet;

const CONVERT_METHOD: &str = "public static Map<String, Object> flat($class bean) {\n\
                              Map<String, Object> map = new HashMap<>();\n\
                              $assignment\n\
                              return map;\n\
                              }";
const GET_OBJECT: &str = "$object.$getter()";
const GET_OBJECT_ASSIGN: &str = "$type $variable = $object.$getter();\n";
const PUT_VALUE: &str = "map.put(\"$name\", $value);\n";

/// Maps a field to its output key in the generated map.
pub type NameMapper = Box<dyn Fn(&FieldDescriptor) -> String>;

/// Rewrites a leaf value expression (e.g. wraps a getter chain in a
/// formatting call) before it is put into the map.
pub type ValueMapper = Box<dyn Fn(&str, &FieldDescriptor) -> String>;

/// Per-category value transforms for the flattening path.
///
/// The mapper configured for a field's category wins; otherwise the
/// `fallback` applies; otherwise the expression passes through unchanged.
/// Categories can be overridden in isolation without re-specifying the
/// rest.
#[derive(Default)]
pub struct ValueMappers {
    pub fallback: Option<ValueMapper>,
    pub primitive: Option<ValueMapper>,
    pub number: Option<ValueMapper>,
    pub boolean: Option<ValueMapper>,
    pub character: Option<ValueMapper>,
    pub string: Option<ValueMapper>,
    pub date: Option<ValueMapper>,
    pub local_date: Option<ValueMapper>,
    pub local_time: Option<ValueMapper>,
    pub local_date_time: Option<ValueMapper>,
    pub enumeration: Option<ValueMapper>,
}

impl ValueMappers {
    /// Dispatch on the field's category and transform the expression.
    pub fn resolve(&self, expr: String, field: &FieldDescriptor) -> String {
        let specific = match field.category() {
            TypeCategory::Primitive => &self.primitive,
            TypeCategory::Number => &self.number,
            TypeCategory::Boolean => &self.boolean,
            TypeCategory::Character => &self.character,
            TypeCategory::String => &self.string,
            TypeCategory::Date => &self.date,
            TypeCategory::LocalDate => &self.local_date,
            TypeCategory::LocalTime => &self.local_time,
            TypeCategory::LocalDateTime => &self.local_date_time,
            TypeCategory::Enumeration => &self.enumeration,
            // Multi-valued and container fields never carry leaf values.
            _ => &None,
        };
        match specific.as_ref().or(self.fallback.as_ref()) {
            Some(mapper) => mapper(&expr, field),
            None => expr,
        }
    }
}

/// One step of the assignment plan, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Descend into a nested bean: `$type $variable = $object.$getter();`.
    Bind {
        ty: String,
        local: String,
        object: String,
        getter: String,
    },
    /// Record a leaf value: `map.put("$key", $value);`.
    Put { key: String, value: String },
}

/// Generates the flattening method for a registered root type.
#[derive(Default)]
pub struct FlattenGenerator {
    /// Output-key derivation; defaults to the field's own name.
    pub name_mapper: Option<NameMapper>,
    /// Leaf value transforms.
    pub value_mappers: ValueMappers,
}

impl FlattenGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the full method text for `root_type`.
    pub fn generate(
        &self,
        provider: &dyn TypeMetadataProvider,
        root_type: &str,
    ) -> Result<String, IntrospectionError> {
        let plan = self.plan(provider, root_type)?;
        let assignment = render_plan(&plan);
        Ok(render(CONVERT_METHOD, &[
            ("class", root_type),
            ("assignment", &assignment),
        ]))
    }

    /// Build the assignment plan without rendering it.
    pub fn plan(
        &self,
        provider: &dyn TypeMetadataProvider,
        root_type: &str,
    ) -> Result<Vec<Step>, IntrospectionError> {
        let mut plan = Vec::new();
        let visited = HashSet::from([root_type.to_string()]);
        let mut put_keys = HashSet::new();
        self.append_recursively(provider, "bean", root_type, &mut plan, &visited, &mut put_keys)?;
        Ok(plan)
    }

    fn append_recursively(
        &self,
        provider: &dyn TypeMetadataProvider,
        object: &str,
        type_name: &str,
        plan: &mut Vec<Step>,
        visited: &HashSet<String>,
        put_keys: &mut HashSet<String>,
    ) -> Result<(), IntrospectionError> {
        for field in provider.fields(type_name)? {
            let name = match &self.name_mapper {
                Some(mapper) => mapper(&field),
                None => field.name.clone(),
            };
            // First occurrence wins; a field skipped below still claims
            // its key.
            if !put_keys.insert(name.clone()) {
                continue;
            }

            match field.category() {
                TypeCategory::Collection | TypeCategory::Map | TypeCategory::Array => continue,
                TypeCategory::Container => {
                    let nested = field.ty.display().to_string();
                    if visited.contains(&nested) {
                        continue;
                    }
                    // Per-branch copy: siblings never see this descent.
                    let mut branch = visited.clone();
                    branch.insert(nested.clone());
                    plan.push(Step::Bind {
                        ty: nested.clone(),
                        local: name.clone(),
                        object: object.to_string(),
                        getter: field.getter.clone(),
                    });
                    self.append_recursively(provider, &name, &nested, plan, &branch, put_keys)?;
                }
                _ => {
                    let expr = render(GET_OBJECT, &[
                        ("object", object),
                        ("getter", &field.getter),
                    ]);
                    let value = self.value_mappers.resolve(expr, &field);
                    plan.push(Step::Put { key: name, value });
                }
            }
        }
        Ok(())
    }
}

fn render_plan(plan: &[Step]) -> String {
    let mut out = String::new();
    for step in plan {
        match step {
            Step::Put { key, value } => {
                out.push_str(&render(PUT_VALUE, &[("name", key), ("value", value)]));
            }
            Step::Bind {
                ty,
                local,
                object,
                getter,
            } => {
                out.push('\n');
                out.push_str(&render(GET_OBJECT_ASSIGN, &[
                    ("type", ty),
                    ("variable", local),
                    ("object", object),
                    ("getter", getter),
                ]));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{FieldDescriptor, JavaType, PrimitiveKind, TypeRegistry};

    fn field(name: &str, ty: JavaType) -> FieldDescriptor {
        FieldDescriptor::new(name, ty)
    }

    fn nested_registry() -> TypeRegistry {
        let mut reg = TypeRegistry::new();
        reg.register(
            "A",
            [
                field("someInt", JavaType::Primitive(PrimitiveKind::Int)),
                field("someBool", JavaType::Primitive(PrimitiveKind::Boolean)),
                field("b", JavaType::Class("B".into())),
            ],
        );
        reg.register(
            "B",
            [
                field("someString", JavaType::Text),
                field("c", JavaType::Class("C".into())),
                field("tail", JavaType::Text),
            ],
        );
        reg.register("C", [field("deep", JavaType::Date)]);
        reg
    }

    fn keys(plan: &[Step]) -> Vec<&str> {
        plan.iter()
            .filter_map(|s| match s {
                Step::Put { key, .. } => Some(key.as_str()),
                Step::Bind { .. } => None,
            })
            .collect()
    }

    #[test]
    fn assignment_order_is_traversal_order() {
        let plan = FlattenGenerator::new()
            .plan(&nested_registry(), "A")
            .unwrap();
        // Descendant puts of `b` come right after its bind, before any
        // later sibling of A would.
        assert_eq!(keys(&plan), ["someInt", "someBool", "someString", "deep", "tail"]);
        assert!(matches!(&plan[2], Step::Bind { ty, local, object, .. }
            if ty == "B" && local == "b" && object == "bean"));
        assert!(matches!(&plan[4], Step::Bind { ty, object, .. }
            if ty == "C" && object == "b"));
    }

    #[test]
    fn cycle_terminates_without_reentering_the_root() {
        let mut reg = TypeRegistry::new();
        reg.register(
            "A",
            [
                field("x", JavaType::Text),
                field("b", JavaType::Class("B".into())),
            ],
        );
        reg.register(
            "B",
            [
                field("y", JavaType::Text),
                field("a", JavaType::Class("A".into())),
            ],
        );

        let plan = FlattenGenerator::new().plan(&reg, "A").unwrap();
        let binds: Vec<_> = plan
            .iter()
            .filter(|s| matches!(s, Step::Bind { .. }))
            .collect();
        // Descends into B exactly once and never back into A.
        assert_eq!(binds.len(), 1);
        assert_eq!(keys(&plan), ["x", "y"]);
    }

    #[test]
    fn siblings_do_not_share_the_visited_path() {
        // A -> {left: N, right: N2{n: N}}; N is visited on the left branch
        // only, so the right branch may still descend into it.
        let mut reg = TypeRegistry::new();
        reg.register(
            "A",
            [
                field("left", JavaType::Class("N".into())),
                field("right", JavaType::Class("N2".into())),
            ],
        );
        reg.register("N", [field("v", JavaType::Text)]);
        reg.register("N2", [field("n", JavaType::Class("N".into()))]);

        let plan = FlattenGenerator::new().plan(&reg, "A").unwrap();
        let n_binds = plan
            .iter()
            .filter(|s| matches!(s, Step::Bind { ty, .. } if ty == "N"))
            .count();
        assert_eq!(n_binds, 2);
    }

    #[test]
    fn duplicate_keys_resolve_first_wins() {
        let mut reg = TypeRegistry::new();
        reg.register(
            "A",
            [
                field("name", JavaType::Text),
                field("b", JavaType::Class("B".into())),
            ],
        );
        reg.register("B", [field("name", JavaType::Text)]);

        let plan = FlattenGenerator::new().plan(&reg, "A").unwrap();
        assert_eq!(keys(&plan), ["name"]);
        assert!(matches!(&plan[0], Step::Put { value, .. } if value == "bean.getName()"));
    }

    #[test]
    fn multi_valued_fields_are_never_flattened_but_claim_their_key() {
        let mut reg = TypeRegistry::new();
        reg.register(
            "A",
            [
                field("items", JavaType::Collection("List<Long>".into())),
                field("b", JavaType::Class("B".into())),
            ],
        );
        // The nested `items` loses to the collection that already claimed
        // the key, even though the collection emitted nothing.
        reg.register(
            "B",
            [
                field("items", JavaType::Text),
                field("tags", JavaType::Map("Map<String, String>".into())),
                field("raw", JavaType::Array("byte[]".into())),
            ],
        );

        let plan = FlattenGenerator::new().plan(&reg, "A").unwrap();
        assert_eq!(keys(&plan), Vec::<&str>::new());
        assert_eq!(
            plan.iter().filter(|s| matches!(s, Step::Bind { .. })).count(),
            1
        );
    }

    #[test]
    fn name_mapper_controls_output_keys() {
        let generator = FlattenGenerator {
            name_mapper: Some(Box::new(|f: &FieldDescriptor| f.name.to_uppercase())),
            ..Default::default()
        };
        let plan = generator.plan(&nested_registry(), "A").unwrap();
        assert_eq!(keys(&plan)[0], "SOMEINT");
    }

    #[test]
    fn category_mapper_wins_over_fallback() {
        let generator = FlattenGenerator {
            value_mappers: ValueMappers {
                string: Some(Box::new(|expr, _| format!("trim({expr})"))),
                fallback: Some(Box::new(|expr, _| format!("wrap({expr})"))),
                ..Default::default()
            },
            ..Default::default()
        };
        let plan = generator.plan(&nested_registry(), "A").unwrap();
        let values: Vec<_> = plan
            .iter()
            .filter_map(|s| match s {
                Step::Put { value, .. } => Some(value.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(values[0], "wrap(bean.getSomeInt())");
        assert_eq!(values[2], "trim(b.getSomeString())");
    }

    #[test]
    fn unknown_nested_type_fails_the_whole_call() {
        let mut reg = TypeRegistry::new();
        reg.register(
            "A",
            [
                field("x", JavaType::Text),
                field("b", JavaType::Class("Unregistered".into())),
            ],
        );
        let err = FlattenGenerator::new().generate(&reg, "A").unwrap_err();
        assert!(matches!(err, IntrospectionError::UnknownType(name) if name == "Unregistered"));
    }

    #[test]
    fn generation_is_idempotent() {
        let generator = FlattenGenerator::new();
        let reg = nested_registry();
        assert_eq!(generator.generate(&reg, "A").unwrap(), generator.generate(&reg, "A").unwrap());
    }
}
