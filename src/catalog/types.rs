//! Declared types and their members.
//!
//! These are the catalog-owned handles the render pass borrows: a [`TypeDef`] per declared
//! type, with kind-specific member lists and the custom attributes that carry documentation
//! content. The generator never mutates them.

use bitflags::bitflags;
use strum::{AsRefStr, Display};

use crate::catalog::TypeSignature;

/// A namespace-qualified type name.
///
/// An empty namespace marks a primitive; those render verbatim and never link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TypeName {
    /// The declaring namespace, empty for primitives
    pub namespace: String,
    /// The simple type name
    pub name: String,
}

impl TypeName {
    /// Build a type name from its parts.
    #[must_use]
    pub fn new(namespace: &str, name: &str) -> Self {
        TypeName {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }
}

/// The kind of a declared type.
///
/// Rendered lowercase in `Kind:` lines and section headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TypeKind {
    /// A class
    Class,
    /// An interface
    Interface,
    /// A value type
    Struct,
    /// An enumeration
    Enum,
    /// A delegate
    Delegate,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    /// Member access and naming flags
    pub struct MemberFlags: u32 {
        /// Member is static
        const STATIC = 0x0001;
        /// Member is publicly accessible
        const PUBLIC = 0x0002;
        /// Member name has special meaning to tooling (accessors, `.ctor`, `value__`, ...)
        const SPECIAL_NAME = 0x0004;
    }
}

/// A custom attribute attached to a type or member.
///
/// Only the decoded argument content matters here: documentation text, default values and
/// deprecation messages all travel as attribute strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomAttribute {
    /// Simple attribute type name, e.g. `DocStringAttribute`
    pub name: String,
    /// Positional constructor arguments, decoded to strings
    pub fixed_args: Vec<String>,
    /// Named arguments as (name, value) pairs
    pub named_args: Vec<(String, String)>,
}

impl CustomAttribute {
    /// A marker attribute with no arguments.
    #[must_use]
    pub fn marker(name: &str) -> Self {
        CustomAttribute {
            name: name.to_string(),
            ..CustomAttribute::default()
        }
    }

    /// An attribute carrying a single `Content` named argument, the shape used by
    /// `DocStringAttribute` and `DocDefaultAttribute`.
    #[must_use]
    pub fn content(name: &str, content: &str) -> Self {
        CustomAttribute {
            name: name.to_string(),
            fixed_args: Vec::new(),
            named_args: vec![("Content".to_string(), content.to_string())],
        }
    }
}

/// A property member.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Property {
    /// Property name
    pub name: String,
    /// The property type
    pub signature: TypeSignature,
    /// Custom attributes on the property itself
    pub attributes: Vec<CustomAttribute>,
}

/// A single method parameter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter is passed by reference (rendered as an `out` parameter)
    pub by_ref: bool,
    /// The parameter type
    pub signature: TypeSignature,
}

/// A method signature: return type plus parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MethodSignature {
    /// The return type, `None` for void
    pub return_type: Option<TypeSignature>,
    /// The parameters, in declaration order
    pub params: Vec<Parameter>,
}

/// A method member.
///
/// Property accessors (`get_X`/`put_X`), constructors (`.ctor`) and delegate `Invoke`
/// methods appear here with [`MemberFlags::SPECIAL_NAME`] set, exactly as a metadata
/// reader surfaces them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Method {
    /// Method name
    pub name: String,
    /// Access and naming flags
    pub flags: MemberFlags,
    /// The method signature
    pub signature: MethodSignature,
    /// Custom attributes
    pub attributes: Vec<CustomAttribute>,
}

/// A field member.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Access and naming flags
    pub flags: MemberFlags,
    /// The field type
    pub signature: TypeSignature,
    /// Custom attributes
    pub attributes: Vec<CustomAttribute>,
    /// Constant value, present for enum members
    pub constant: Option<i64>,
}

/// An event member.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Event {
    /// Event name
    pub name: String,
    /// The delegate type raised by this event
    pub event_type: TypeSignature,
    /// Custom attributes
    pub attributes: Vec<CustomAttribute>,
}

/// A declared type: the unit the generator renders one document for.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    /// The declaring namespace
    pub namespace: String,
    /// The simple type name
    pub name: String,
    /// What kind of type this is
    pub kind: TypeKind,
    /// Custom attributes on the type
    pub attributes: Vec<CustomAttribute>,
    /// The base type, if any
    pub extends: Option<TypeName>,
    /// Implemented interfaces
    pub implements: Vec<TypeName>,
    /// Properties
    pub properties: Vec<Property>,
    /// Methods, including special-name accessors and constructors
    pub methods: Vec<Method>,
    /// Events
    pub events: Vec<Event>,
    /// Fields; enum members for enums
    pub fields: Vec<Field>,
}

impl TypeDef {
    /// A bare type of the given kind with no members.
    #[must_use]
    pub fn new(namespace: &str, name: &str, kind: TypeKind) -> Self {
        TypeDef {
            namespace: namespace.to_string(),
            name: name.to_string(),
            kind,
            attributes: Vec::new(),
            extends: None,
            implements: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            events: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// This type's namespace-qualified name.
    #[must_use]
    pub fn type_name(&self) -> TypeName {
        TypeName::new(&self.namespace, &self.name)
    }

    /// Find a method by exact name.
    #[must_use]
    pub fn find_method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Access to documentation-bearing custom attributes.
///
/// Implemented by every type and member that can carry `DocStringAttribute` and friends.
/// The provided methods mirror how the attribute blobs are authored: content strings with
/// escaped line breaks, `//` comment markers written as `/-/` so they survive the source
/// language's own comment syntax.
pub trait Documented {
    /// The custom attributes attached to this item.
    fn attributes(&self) -> &[CustomAttribute];

    /// Whether an attribute with the given simple name is present.
    fn has_attribute(&self, name: &str) -> bool {
        self.attributes().iter().any(|a| a.name == name)
    }

    /// The `Content` named argument of the first attribute with the given name.
    fn attribute_content(&self, name: &str) -> Option<String> {
        self.attributes()
            .iter()
            .find(|a| a.name == name)
            .and_then(|a| {
                a.named_args
                    .iter()
                    .find(|(arg, _)| arg == "Content")
                    .map(|(_, value)| value.clone())
            })
    }

    /// The documentation text from `DocStringAttribute`, unescaped, or `None` when absent
    /// or empty.
    fn doc_string(&self) -> Option<String> {
        self.attribute_content("DocStringAttribute")
            .map(|raw| unescape_doc(&raw))
            .filter(|s| !s.is_empty())
    }

    /// The default-value text from `DocDefaultAttribute`, or `None` when absent or empty.
    fn doc_default(&self) -> Option<String> {
        self.attribute_content("DocDefaultAttribute")
            .filter(|s| !s.is_empty())
    }

    /// The deprecation message from `DeprecatedAttribute`'s first positional argument.
    fn deprecated_message(&self) -> Option<String> {
        self.attributes()
            .iter()
            .find(|a| a.name == "DeprecatedAttribute")
            .and_then(|a| a.fixed_args.first().cloned())
            .filter(|s| !s.is_empty())
    }

    /// Whether this item is marked `ExperimentalAttribute`.
    fn is_experimental(&self) -> bool {
        self.has_attribute("ExperimentalAttribute")
    }
}

impl Documented for TypeDef {
    fn attributes(&self) -> &[CustomAttribute] {
        &self.attributes
    }
}

impl Documented for Property {
    fn attributes(&self) -> &[CustomAttribute] {
        &self.attributes
    }
}

impl Documented for Method {
    fn attributes(&self) -> &[CustomAttribute] {
        &self.attributes
    }
}

impl Documented for Field {
    fn attributes(&self) -> &[CustomAttribute] {
        &self.attributes
    }
}

impl Documented for Event {
    fn attributes(&self) -> &[CustomAttribute] {
        &self.attributes
    }
}

/// Unescape a doc-string attribute value.
///
/// `\n` and `\r` arrive as two-character escape sequences; `\r\n` pairs collapse to `\n`;
/// `/-/` restores `//` which cannot be written inside the source comments the attribute
/// is authored in.
fn unescape_doc(raw: &str) -> String {
    raw.replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\r\n", "\n")
        .replace("/-/", "//")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_string_unescaping() {
        let prop = Property {
            name: "Source".to_string(),
            signature: TypeSignature::String,
            attributes: vec![CustomAttribute::content(
                "DocStringAttribute",
                "The URI, e.g. `https:/-/example.com`.\\nSecond line.",
            )],
        };
        assert_eq!(
            prop.doc_string().unwrap(),
            "The URI, e.g. `https://example.com`.\nSecond line."
        );
    }

    #[test]
    fn test_empty_doc_string_is_none() {
        let field = Field {
            attributes: vec![CustomAttribute::content("DocStringAttribute", "")],
            ..Field::default()
        };
        assert!(field.doc_string().is_none());
        assert!(field.doc_default().is_none());
    }

    #[test]
    fn test_deprecated_and_experimental_markers() {
        let mut ty = TypeDef::new("Test", "Old", TypeKind::Class);
        ty.attributes.push(CustomAttribute {
            name: "DeprecatedAttribute".to_string(),
            fixed_args: vec!["Use @New instead".to_string()],
            named_args: Vec::new(),
        });
        ty.attributes
            .push(CustomAttribute::marker("ExperimentalAttribute"));
        assert_eq!(ty.deprecated_message().unwrap(), "Use @New instead");
        assert!(ty.is_experimental());
        assert!(!ty.has_attribute("StaticAttribute"));
    }

    #[test]
    fn test_type_kind_display() {
        assert_eq!(TypeKind::Class.to_string(), "class");
        assert_eq!(TypeKind::Interface.as_ref(), "interface");
        assert_eq!(TypeKind::Delegate.to_string(), "delegate");
    }
}
