//! Signature rendering: type signatures to display text.
//!
//! [`Formatter`] converts a [`TypeSignature`] into the human-readable, hyperlinked text
//! that appears in property lines, method signatures and tables. Rendering is best-effort:
//! element kinds with no display mapping come out as a diagnostic placeholder instead of
//! failing a whole namespace. The one fatal condition is a generic instantiation that
//! declares arguments but resolved none, which signals corrupted input rather than an
//! exotic type.

use crate::{
    catalog::TypeSignature,
    options::Options,
    Error, Result,
};

/// Renders type signatures and type links relative to one document's namespace.
#[derive(Debug, Clone, Copy)]
pub struct Formatter<'a> {
    current_namespace: &'a str,
    options: &'a Options,
}

impl<'a> Formatter<'a> {
    /// A formatter for documents in `current_namespace`.
    #[must_use]
    pub fn new(current_namespace: &'a str, options: &'a Options) -> Self {
        Formatter {
            current_namespace,
            options,
        }
    }

    /// The namespace the current document belongs to.
    #[must_use]
    pub fn current_namespace(&self) -> &str {
        self.current_namespace
    }

    /// Render a signature to display text, recursing through generic instantiations.
    ///
    /// `to_code` wraps linked type names in backticks.
    ///
    /// # Errors
    /// Returns [`Error::GenericArity`] for an instantiation with declared but unresolved
    /// type arguments.
    pub fn display_type(&self, signature: &TypeSignature, to_code: bool) -> Result<String> {
        match signature {
            TypeSignature::Named(type_name) => Ok(self.type_to_markdown(
                &type_name.namespace,
                &type_name.name,
                to_code,
                "",
            )),
            TypeSignature::GenericInst { outer, arity, args } => {
                if args.is_empty() && *arity != 0 {
                    return Err(Error::GenericArity {
                        type_name: format!("{}.{}", outer.namespace, outer.name),
                    });
                }
                let pretty_outer = strip_arity(&outer.name);
                let mut rendered = self.type_to_markdown(
                    &outer.namespace,
                    pretty_outer,
                    true,
                    &format!("-{arity}"),
                );
                rendered.push('<');
                for (i, arg) in args.iter().enumerate() {
                    if i != 0 {
                        rendered.push_str(", ");
                    }
                    rendered.push_str(&self.display_type(arg, true)?);
                }
                rendered.push('>');
                Ok(rendered)
            }
            other => Ok(self.element_name(other).to_string()),
        }
    }

    /// Display name for a primitive element kind.
    ///
    /// Unmapped kinds render as the `{type}` placeholder; generic parameters have no
    /// name of their own at this point and render as `(generic)`.
    fn element_name(&self, signature: &TypeSignature) -> &str {
        match signature {
            TypeSignature::Void => "void",
            TypeSignature::Boolean => "bool",
            TypeSignature::Char => "char",
            TypeSignature::I1 => "int8_t",
            TypeSignature::U1 => "uint8_t",
            TypeSignature::I2 => "short",
            TypeSignature::U2 => "uint16_t",
            TypeSignature::I4 => "int",
            TypeSignature::U4 => "uint32_t",
            TypeSignature::I8 => "int64_t",
            TypeSignature::U8 => "uint64_t",
            TypeSignature::R4 => "float",
            TypeSignature::R8 => "double",
            TypeSignature::String => "string",
            TypeSignature::Object => &self.options.object_class_name,
            TypeSignature::GenericParam(_) | TypeSignature::GenericParamMethod(_) => "(generic)",
            _ => "{type}",
        }
    }

    /// Render a namespace-qualified type name as markdown.
    ///
    /// An empty namespace is a primitive and returns the name verbatim. Types in the
    /// current namespace link to their own document. Types under a configured external
    /// namespace prefix link into the external documentation site, with `url_suffix`
    /// appended so distinct generic arities resolve to distinct pages. Everything else
    /// renders as a plain `Namespace.Name`.
    #[must_use]
    pub fn type_to_markdown(
        &self,
        namespace: &str,
        name: &str,
        to_code: bool,
        url_suffix: &str,
    ) -> String {
        let tick = if to_code { "`" } else { "" };
        if namespace.is_empty() {
            return name.to_string();
        }
        if namespace == self.current_namespace {
            return format!("[{tick}{name}{tick}]({name})");
        }
        for prefix in &self.options.external_doc_namespaces {
            if namespace.starts_with(prefix.as_str()) {
                let url = &self.options.external_doc_url;
                return format!("[{tick}{name}{tick}]({url}{namespace}.{name}{url_suffix})");
            }
        }
        format!("{namespace}.{name}")
    }
}

/// Strip the `` `N `` arity marker metadata readers keep on open generic type names.
fn strip_arity(name: &str) -> &str {
    match name.find('`') {
        Some(pos) => &name[..pos],
        None => name,
    }
}
