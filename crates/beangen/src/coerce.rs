//! Coercion resolution for field-by-field conversion.
//!
//! A coercion is a single-placeholder format template (`{}` marks where
//! the source getter expression goes). Rules are tried in priority order;
//! caller rules are prepended ahead of the built-in default so overrides
//! win without losing default coverage.
//!
//! The built-in table, in order:
//!
//! | src                  | dest                 | result                      |
//! |----------------------|----------------------|-----------------------------|
//! | assignable           | —                    | `{}`                        |
//! | numeric (widening)   | primitive            | `{}`                        |
//! | numeric (widening)   | boxed involved       | `(Dest){}`                  |
//! | boxed                | String               | `{}.toString()`             |
//! | primitive            | String               | `String.valueOf({})`        |
//! | String               | enum                 | `Dest.valueOf({})`          |
//! | String               | primitive            | `Dest.parseDest({})`        |
//! | String               | boxed                | `Dest.valueOf({})`          |
//! | enum                 | String               | `{}.name()`                 |
//! | anything else        | —                    | none                        |

use crate::ir::{JavaType, PrimitiveKind};

/// A coercion rule: maps a (source, destination) type pair to an optional
/// format template.
pub type CoercionRule = Box<dyn Fn(&JavaType, &JavaType) -> Option<String>>;

/// Priority-ordered rule list, built-in default last.
pub struct CoercionChain {
    rules: Vec<CoercionRule>,
}

impl CoercionChain {
    /// A chain holding only the built-in default rule.
    pub fn new() -> Self {
        Self {
            rules: vec![Box::new(|src, dest| default_rule(src, dest))],
        }
    }

    /// Prepend a caller rule ahead of everything registered so far.
    pub fn prepend(
        &mut self,
        rule: impl Fn(&JavaType, &JavaType) -> Option<String> + 'static,
    ) -> &mut Self {
        self.rules.insert(0, Box::new(rule));
        self
    }

    /// First non-empty result wins; `None` signals an unresolved coercion.
    pub fn resolve(&self, src: &JavaType, dest: &JavaType) -> Option<String> {
        self.rules.iter().find_map(|rule| rule(src, dest))
    }
}

impl Default for CoercionChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a format template to a source expression.
pub fn apply_format(format: &str, expr: &str) -> String {
    format.replacen("{}", expr, 1)
}

/// The built-in decision table. Each case short-circuits.
pub fn default_rule(src: &JavaType, dest: &JavaType) -> Option<String> {
    // destObj = srcObj;
    if is_assignable(src, dest) {
        return Some("{}".to_string());
    }

    if src.is_primitive() || src.is_boxed() {
        if dest.is_primitive() || dest.is_boxed() {
            let (s, d) = (src.primitive_kind()?, dest.primitive_kind()?);
            if s.widens_to(d) {
                if src.is_primitive() && dest.is_primitive() {
                    return Some("{}".to_string()); // type promotion
                }
                // primitive-box: cast and auto-box
                // box-primitive: auto-unbox and cast
                // box-box: auto-unbox and cast and auto-box
                return Some(format!("({}){{}}", dest.display()));
            }
        } else if *dest == JavaType::Text {
            return Some(if src.is_boxed() {
                "{}.toString()".to_string()
            } else {
                "String.valueOf({})".to_string()
            });
        }
    } else if *src == JavaType::Text {
        return match dest {
            JavaType::Enum(name) => Some(format!("{}.valueOf({{}})", name)),
            JavaType::Primitive(kind) => parse_call(*kind),
            JavaType::Boxed(kind) => valueof_call(*kind),
            _ => None,
        };
    } else if matches!(src, JavaType::Enum(_)) && *dest == JavaType::Text {
        return Some("{}.name()".to_string());
    }
    None
}

/// Identical type or primitive/boxed correspondence. Class hierarchies are
/// not registered, so supertype assignability is left to caller rules.
fn is_assignable(src: &JavaType, dest: &JavaType) -> bool {
    if src == dest {
        return true;
    }
    match (src.primitive_kind(), dest.primitive_kind()) {
        (Some(s), Some(d)) => s == d,
        _ => false,
    }
}

/// `String` to primitive: the canonical parse call. No char parse exists.
fn parse_call(kind: PrimitiveKind) -> Option<String> {
    let call = match kind {
        PrimitiveKind::Int => "Integer.parseInt({})",
        PrimitiveKind::Long => "Long.parseLong({})",
        PrimitiveKind::Double => "Double.parseDouble({})",
        PrimitiveKind::Boolean => "Boolean.parseBoolean({})",
        PrimitiveKind::Short => "Short.parseShort({})",
        PrimitiveKind::Byte => "Byte.parseByte({})",
        PrimitiveKind::Float => "Float.parseFloat({})",
        PrimitiveKind::Char => return None,
    };
    Some(call.to_string())
}

/// `String` to boxed: `Dest.valueOf`. Character is not convertible.
fn valueof_call(kind: PrimitiveKind) -> Option<String> {
    if kind == PrimitiveKind::Char {
        return None;
    }
    Some(format!("{}.valueOf({{}})", kind.boxed_name()))
}
