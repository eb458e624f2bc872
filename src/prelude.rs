//! # dotdoc Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! dotdoc library. Import this module to get quick access to everything needed to build a
//! type catalog and run a generation pass.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotdoc operations
pub use crate::Error;

/// The result type used throughout dotdoc
pub use crate::Result;

/// Options controlling a documentation generation run
pub use crate::Options;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The generation pass over a type catalog
pub use crate::generator::{Generator, Report};

// ================================================================================================
// Type Catalog
// ================================================================================================

/// The catalog and the declared types it holds
pub use crate::catalog::{NamespaceMembers, TypeCatalog, TypeDef, TypeKind, TypeName};

/// Members of declared types
pub use crate::catalog::{Event, Field, Method, MethodSignature, Parameter, Property};

/// Member flags and documentation-bearing attributes
pub use crate::catalog::{CustomAttribute, Documented, MemberFlags};

/// Type signatures as they appear in member declarations
pub use crate::catalog::TypeSignature;

// ================================================================================================
// Rendering
// ================================================================================================

/// Signature display and reference-link strategies
pub use crate::render::{Formatter, LinkRenderer, MarkdownLinks, XmlLinks};
