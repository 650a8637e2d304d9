//! Bean-to-bean conversion generator.
//!
//! Emits one static method that constructs a destination bean and copies
//! every same-named field across, coercing declared-type mismatches
//! through a [`CoercionChain`]. Fields present in only one of the two
//! types are never paired. An unresolved coercion is dropped under
//! `type_constraint`, or emitted as an unchecked passthrough otherwise —
//! whether that passthrough compiles is the caller's problem.

use crate::coerce::{CoercionChain, apply_format};
use crate::ir::FieldDescriptor;
use crate::traits::{IntrospectionError, TypeMetadataProvider};
use beangen_interp::render;
use std::collections::HashMap;

const TEMPLATE_ALL: &str = "public static $target $method($source $sourceName) {\n$body}";
const TEMPLATE_NEW: &str = "    $target $targetName = new $target();\n";
const TEMPLATE_SET_GET: &str = "    $targetName.$setter($wrap);\n";
const TEMPLATE_RETURN: &str = "    return $targetName;\n";

/// Generates the conversion method between two registered types.
pub struct ConvertGenerator {
    /// Parameter name of the source bean.
    pub source_name: String,
    /// Local name of the constructed destination bean.
    pub target_name: String,
    /// Method name; defaults to `to` + destination type.
    pub method: Option<String>,
    /// Strict mode: drop assignments whose coercion is unresolved instead
    /// of emitting an unchecked passthrough.
    pub type_constraint: bool,
    /// Coercion rules; caller rules prepend ahead of the built-in table.
    pub coercions: CoercionChain,
}

impl Default for ConvertGenerator {
    fn default() -> Self {
        Self {
            source_name: "src".to_string(),
            target_name: "res".to_string(),
            method: None,
            type_constraint: false,
            coercions: CoercionChain::new(),
        }
    }
}

impl ConvertGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the full method text converting `source` into `target`.
    pub fn generate(
        &self,
        provider: &dyn TypeMetadataProvider,
        source: &str,
        target: &str,
    ) -> Result<String, IntrospectionError> {
        let source_fields = provider.fields(source)?;
        let target_fields = provider.fields(target)?;
        let by_name: HashMap<&str, &FieldDescriptor> = source_fields
            .iter()
            .map(|f| (f.name.as_str(), f))
            .collect();

        let mut body = render(TEMPLATE_NEW, &[
            ("target", target),
            ("targetName", &self.target_name),
        ]);

        for target_field in &target_fields {
            let Some(source_field) = by_name.get(target_field.name.as_str()) else {
                continue;
            };

            let mut wrap = format!("{}.{}()", self.source_name, source_field.getter);
            match self.coercions.resolve(&source_field.ty, &target_field.ty) {
                Some(format) => wrap = apply_format(&format, &wrap),
                None if self.type_constraint => continue,
                None => {}
            }

            body.push_str(&render(TEMPLATE_SET_GET, &[
                ("targetName", &self.target_name),
                ("setter", &target_field.setter),
                ("wrap", &wrap),
            ]));
        }

        body.push_str(&render(TEMPLATE_RETURN, &[("targetName", &self.target_name)]));

        let method = match &self.method {
            Some(name) => name.clone(),
            None => format!("to{}", target),
        };
        Ok(render(TEMPLATE_ALL, &[
            ("target", target),
            ("method", &method),
            ("source", source),
            ("sourceName", &self.source_name),
            ("body", &body),
        ]))
    }
}
