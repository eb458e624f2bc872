//! Structural descriptions of member and parameter types.
//!
//! A [`TypeSignature`] is the tagged union a metadata reader produces for every property,
//! field, parameter and return type: either a primitive element kind, a direct reference to
//! a declared type, a generic-parameter index, or a generic instantiation carrying the outer
//! type plus its ordered argument list. Signatures are transient - they are built for one
//! member's render call and discarded.

use crate::catalog::TypeName;

/// Represents a parsed type in member signatures.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TypeSignature {
    #[default]
    /// Not defined
    Unknown,
    /// void
    Void,
    /// bool
    Boolean,
    /// char
    Char,
    /// signed 8bit integer
    I1,
    /// unsigned 8bit integer
    U1,
    /// signed 16bit integer
    I2,
    /// unsigned 16bit integer
    U2,
    /// signed 32bit integer
    I4,
    /// unsigned 32bit integer
    U4,
    /// signed 64bit integer
    I8,
    /// unsigned 64bit integer
    U8,
    /// 32bit floating-point
    R4,
    /// 64bit floating-point
    R8,
    /// System.String
    String,
    /// System.Object (the generic object root)
    Object,
    /// Direct reference to a declared type (TypeDef or TypeRef)
    Named(TypeName),
    /// Generic type parameter
    // Index into the owning type's generic parameter list
    GenericParam(u32),
    /// Generic method parameter
    // Index into the owning method's generic parameter list
    GenericParamMethod(u32),
    /// Generic type and its arguments
    GenericInst {
        /// The open generic type being instantiated
        outer: TypeName,
        /// Declared generic arity of `outer`
        arity: u32,
        /// The resolved type arguments, in declaration order
        args: Vec<TypeSignature>,
    },
}

impl TypeSignature {
    /// Build a direct reference to the type `namespace.name`.
    #[must_use]
    pub fn named(namespace: &str, name: &str) -> Self {
        TypeSignature::Named(TypeName::new(namespace, name))
    }

    /// Build a generic instantiation of `namespace.name` over `args`.
    ///
    /// The declared arity is taken from the argument count; use the struct form directly
    /// to model an inconsistent instantiation.
    #[must_use]
    pub fn generic(namespace: &str, name: &str, args: Vec<TypeSignature>) -> Self {
        TypeSignature::GenericInst {
            outer: TypeName::new(namespace, name),
            arity: u32::try_from(args.len()).unwrap_or(u32::MAX),
            args,
        }
    }
}
