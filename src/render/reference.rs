//! Inline documentation reference resolution.
//!
//! Doc strings embed `@Type`, `@Type.Member` and `@Namespace.Type.Member` tokens. This
//! module scans a doc string, disambiguates each token against the type catalog and the
//! current document's namespace, and substitutes resolved markup. The output markup is a
//! strategy seam: [`MarkdownLinks`] for document bodies, [`XmlLinks`] for the XML summary
//! stream.
//!
//! Disambiguation tries, in this exact order, with the token split on its last dot into
//! `prefix` and `suffix`:
//!
//! 1. `prefix` as a namespace and `suffix` as a type declared in it.
//! 2. `suffix` empty and `prefix` as a type in the current namespace.
//! 3. `prefix` as a type in the current namespace with `suffix` as its member.
//! 4. `prefix` split again on its last dot into namespace and type, `suffix` as member;
//!    a dotless prefix falls back to the current namespace. Targets missing from the
//!    catalog are a hard failure under strict checking, a logged warning otherwise.
//! 5. A token with no dot anywhere is malformed and always fatal.

use crate::{
    catalog::TypeCatalog,
    options::Options,
    render::Formatter,
    Error, Result,
};

/// Renders one resolved reference into link markup.
///
/// `namespace` is empty for same-namespace references, in which case the implementation
/// falls back to the ambient namespace of the current document.
pub trait LinkRenderer {
    /// Render a reference to `namespace.type_name` or, when `member` is nonempty, to
    /// that member of it.
    fn render(&self, namespace: &str, type_name: &str, member: &str) -> String;
}

/// Markdown link style: `` [`Type.Member`](Type#member) ``.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownLinks<'a> {
    formatter: Formatter<'a>,
}

impl<'a> MarkdownLinks<'a> {
    /// Markdown links resolved relative to `formatter`'s namespace.
    #[must_use]
    pub fn new(formatter: Formatter<'a>) -> Self {
        MarkdownLinks { formatter }
    }
}

impl LinkRenderer for MarkdownLinks<'_> {
    fn render(&self, namespace: &str, type_name: &str, member: &str) -> String {
        if !namespace.is_empty() && namespace != self.formatter.current_namespace() {
            let qualified = if member.is_empty() {
                type_name.to_string()
            } else {
                format!("{type_name}.{member}")
            };
            return self.formatter.type_to_markdown(namespace, &qualified, true, "");
        }
        if !member.is_empty() {
            let anchor = if type_name.is_empty() {
                member.to_string()
            } else {
                format!("{type_name}.{member}")
            };
            // A member literally named Properties would collide with the reserved
            // "Properties" section heading; the page anchors it as Properties-1.
            let fragment = if member == "Properties" {
                "Properties-1"
            } else {
                member
            }
            .to_lowercase();
            format!("[`{anchor}`]({type_name}#{fragment})")
        } else {
            if let Some(dot) = type_name.rfind('.') {
                let (namespace, name) = (&type_name[..dot], &type_name[dot + 1..]);
                return self.formatter.type_to_markdown(namespace, name, true, "");
            }
            format!("[`{type_name}`]({type_name})")
        }
    }
}

/// XML link style: `<see cref="Namespace.Type.Member"/>`.
#[derive(Debug, Clone, Copy)]
pub struct XmlLinks<'a> {
    current_namespace: &'a str,
}

impl<'a> XmlLinks<'a> {
    /// XML links resolved relative to `current_namespace`.
    #[must_use]
    pub fn new(current_namespace: &'a str) -> Self {
        XmlLinks { current_namespace }
    }
}

impl LinkRenderer for XmlLinks<'_> {
    fn render(&self, namespace: &str, type_name: &str, member: &str) -> String {
        let namespace = if namespace.is_empty() {
            self.current_namespace
        } else {
            namespace
        };
        let separator = if !type_name.is_empty() && !member.is_empty() {
            "."
        } else {
            ""
        };
        format!(r#"<see cref="{namespace}.{type_name}{separator}{member}"/>"#)
    }
}

fn is_identifier_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'.'
}

/// Substitute every `@` reference token in `text` with markup from `renderer`.
///
/// # Errors
/// Returns [`Error::MalformedReference`] for a token with no structural interpretation,
/// or [`Error::UnresolvedReference`] for a missing target when
/// [`Options::strict_references`] is set.
pub fn resolve_references(
    text: &str,
    renderer: &dyn LinkRenderer,
    catalog: &TypeCatalog,
    current_namespace: &str,
    options: &Options,
) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('@') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let ident_len = after.bytes().take_while(|b| is_identifier_char(*b)).count();
        let mut token = &after[..ident_len];
        // A run ending in a dot is sentence punctuation, not part of the token.
        if token.ends_with('.') {
            token = &token[..token.len() - 1];
        }
        out.push_str(&resolve_token(
            token,
            renderer,
            catalog,
            current_namespace,
            options,
        )?);
        rest = &after[token.len()..];
    }
    out.push_str(rest);
    Ok(out)
}

fn resolve_token(
    token: &str,
    renderer: &dyn LinkRenderer,
    catalog: &TypeCatalog,
    current_namespace: &str,
    options: &Options,
) -> Result<String> {
    let (prefix, suffix) = match token.rfind('.') {
        Some(dot) => (&token[..dot], &token[dot + 1..]),
        None => (token, ""),
    };

    // 1. prefix is a namespace declaring the type suffix.
    if catalog.find(prefix, suffix).is_some() {
        return Ok(renderer.render(prefix, suffix, ""));
    }

    let local_type = catalog.find(current_namespace, prefix).is_some();

    // 2. the whole token is a type in the current namespace.
    if suffix.is_empty() && local_type {
        return Ok(renderer.render(current_namespace, prefix, ""));
    }

    // 3. a member of a type in the current namespace; the empty namespace lets the
    //    renderer use the ambient one.
    if local_type {
        return Ok(renderer.render("", prefix, suffix));
    }

    // 5. nothing structural left to try for a dotless token.
    if !token.contains('.') && !token.is_empty() {
        return Err(Error::MalformedReference {
            token: token.to_string(),
        });
    }

    // 4. namespace-qualified member, with a dotless prefix falling back to the current
    //    namespace.
    let (namespace, type_name) = match prefix.rfind('.') {
        Some(dot) => (&prefix[..dot], &prefix[dot + 1..]),
        None => ("", prefix),
    };
    let lookup_namespace = if namespace.is_empty() {
        current_namespace
    } else {
        namespace
    };
    if catalog.find(lookup_namespace, type_name).is_none() {
        if options.strict_references {
            return Err(Error::UnresolvedReference {
                token: token.to_string(),
            });
        }
        log::warn!("unresolved reference @{token}, rendering literally");
    }
    Ok(renderer.render(namespace, type_name, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{TypeCatalog, TypeDef, TypeKind};

    fn catalog() -> TypeCatalog {
        let mut catalog = TypeCatalog::new();
        catalog.add_type(TypeDef::new("Test", "Class1", TypeKind::Class));
        catalog.add_type(TypeDef::new("Test", "Class2", TypeKind::Class));
        catalog.add_type(TypeDef::new("Other", "Remote", TypeKind::Class));
        catalog
    }

    fn markdown(text: &str) -> crate::Result<String> {
        let options = Options::default();
        let catalog = catalog();
        let fmt = Formatter::new("Test", &options);
        resolve_references(text, &MarkdownLinks::new(fmt), &catalog, "Test", &options)
    }

    fn xml(text: &str) -> crate::Result<String> {
        let options = Options::default();
        let catalog = catalog();
        resolve_references(text, &XmlLinks::new("Test"), &catalog, "Test", &options)
    }

    #[test]
    fn test_local_type_reference() {
        assert_eq!(markdown("see @Class1").unwrap(), "see [`Class1`](Class1)");
    }

    #[test]
    fn test_local_member_reference() {
        assert_eq!(
            markdown("see @Class1.MyProperty for details").unwrap(),
            "see [`Class1.MyProperty`](Class1#myproperty) for details"
        );
    }

    #[test]
    fn test_namespace_qualified_type_reference() {
        assert_eq!(markdown("@Other.Remote").unwrap(), "Other.Remote");
    }

    #[test]
    fn test_properties_member_gets_alternate_anchor() {
        assert_eq!(
            markdown("@Class1.Properties").unwrap(),
            "[`Class1.Properties`](Class1#properties-1)"
        );
    }

    #[test]
    fn test_trailing_dot_is_punctuation() {
        assert_eq!(
            markdown("see @Class1. Next sentence").unwrap(),
            "see [`Class1`](Class1). Next sentence"
        );
    }

    #[test]
    fn test_dotless_unknown_token_is_malformed() {
        assert!(matches!(
            markdown("@Nonexistent"),
            Err(Error::MalformedReference { token }) if token == "Nonexistent"
        ));
    }

    #[test]
    fn test_unknown_member_reference_degrades_without_strict() {
        assert_eq!(
            markdown("@Unknown.Member").unwrap(),
            "[`Unknown.Member`](Unknown#member)"
        );
    }

    #[test]
    fn test_unknown_member_reference_fails_under_strict() {
        let options = Options {
            strict_references: true,
            ..Options::default()
        };
        let catalog = catalog();
        let fmt = Formatter::new("Test", &options);
        let result = resolve_references(
            "@Unknown.Member",
            &MarkdownLinks::new(fmt),
            &catalog,
            "Test",
            &options,
        );
        assert!(matches!(
            result,
            Err(Error::UnresolvedReference { token }) if token == "Unknown.Member"
        ));
    }

    #[test]
    fn test_xml_member_reference() {
        assert_eq!(
            xml("@Class1.MyProperty").unwrap(),
            r#"<see cref="Test.Class1.MyProperty"/>"#
        );
    }

    #[test]
    fn test_xml_qualified_type_reference() {
        assert_eq!(xml("@Other.Remote").unwrap(), r#"<see cref="Other.Remote"/>"#);
    }

    #[test]
    fn test_resolution_is_idempotent_over_inputs() {
        let first = markdown("link to @Class2 and @Class1.MyProperty").unwrap();
        let second = markdown("link to @Class2 and @Class1.MyProperty").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_text_without_references_passes_through() {
        let text = "plain text, emails like a@ stay, no identifiers";
        // The bare @ resolves structurally to an empty reference, matching the
        // historical renderer; everything else is untouched.
        let resolved = markdown(text).unwrap();
        assert!(resolved.starts_with("plain text, emails like a"));
        assert!(resolved.ends_with(" stay, no identifiers"));
    }
}
