//! Literal `$name` placeholder substitution.
//!
//! `beangen-interp` is the textual-substitution collaborator used by the
//! beangen generators to stitch code fragments together. Substitution is
//! literal: values are spliced in as-is, with no escaping and no recursion
//! into substituted values.
//!
//! # Example
//!
//! ```
//! let out = beangen_interp::render(
//!     "map.put(\"$name\", $value);",
//!     &[("name", "age"), ("value", "bean.getAge()")],
//! );
//! assert_eq!(out, "map.put(\"age\", bean.getAge());");
//! ```
//!
//! A `$token` with no binding is left untouched; callers are expected to
//! supply every placeholder their template references.

/// Render a template, replacing each `$name` token with its bound value.
///
/// A token is `$` followed by an identifier (`[A-Za-z_][A-Za-z0-9_]*`).
/// A `$` not followed by an identifier, or a token with no binding in
/// `vars`, is copied through verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];

        let end = rest
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(rest.len());
        let name = &rest[..end];

        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            out.push('$');
            continue;
        }

        match vars.iter().find(|(k, _)| *k == name) {
            Some((_, value)) => {
                out.push_str(value);
                rest = &rest[end..];
            }
            None => out.push('$'),
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_bound_tokens() {
        let out = render("$a + $b", &[("a", "1"), ("b", "2")]);
        assert_eq!(out, "1 + 2");
    }

    #[test]
    fn token_at_end_of_template() {
        let out = render("return $name", &[("name", "res")]);
        assert_eq!(out, "return res");
    }

    #[test]
    fn adjacent_text_is_preserved() {
        let out = render("x$getter()", &[("getter", "getX")]);
        assert_eq!(out, "xgetX()");
    }

    #[test]
    fn unbound_tokens_are_left_untouched() {
        let out = render("$known $unknown", &[("known", "v")]);
        assert_eq!(out, "v $unknown");
    }

    #[test]
    fn bare_dollar_is_literal() {
        assert_eq!(render("cost: $5", &[]), "cost: $5");
        assert_eq!(render("end$", &[]), "end$");
    }

    #[test]
    fn values_are_not_rescanned() {
        // A substituted value containing $ must not trigger substitution.
        let out = render("$a", &[("a", "$b"), ("b", "nope")]);
        assert_eq!(out, "$b");
    }

    #[test]
    fn multiline_template() {
        let out = render("$ty $var = $obj.$getter();\n", &[
            ("ty", "B"),
            ("var", "b"),
            ("obj", "bean"),
            ("getter", "getB"),
        ]);
        assert_eq!(out, "B b = bean.getB();\n");
    }
}
