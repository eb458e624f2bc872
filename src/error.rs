use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Documentation generation is best-effort wherever possible: unknown signature element kinds
/// render as placeholders instead of failing. The variants below cover the conditions that
/// genuinely cannot be recovered mid-document, because a half-substituted reference or a
/// truncated generic instantiation would be ambiguous to a reader.
///
/// # Error Categories
///
/// ## Reference Resolution
/// - [`Error::MalformedReference`] - A doc-string `@` token with no structural interpretation
/// - [`Error::UnresolvedReference`] - A reference target missing from the catalog (strict mode)
///
/// ## Signature Rendering
/// - [`Error::GenericArity`] - A generic instantiation with no resolved arguments
///
/// ## Output
/// - [`Error::UnterminatedCodeBlock`] - A doc string ends inside a fenced code block
/// - [`Error::NoOpenDocument`] - A write was attempted with no type document open
/// - [`Error::FileError`] - Filesystem I/O errors
#[derive(Error, Debug)]
pub enum Error {
    /// A documentation reference token could not be interpreted.
    ///
    /// Raised when an `@` token contains no dot in any structural position, so none of the
    /// five resolution steps apply. This aborts the current namespace's render pass; unknown
    /// references are never silently dropped.
    #[error("Unknown reference: @{token}")]
    MalformedReference {
        /// The offending token, without its leading `@`
        token: String,
    },

    /// A reference target does not exist in the type catalog.
    ///
    /// Only raised when strict reference checking is enabled; otherwise the token degrades
    /// to a best-effort literal rendering and a warning is logged.
    #[error("Unresolved reference: @{token}")]
    UnresolvedReference {
        /// The offending token, without its leading `@`
        token: String,
    },

    /// A generic instantiation declares a nonzero arity but carries no resolved arguments.
    ///
    /// This is an internal-consistency violation in the supplied catalog: it indicates a
    /// transient metadata value was read after its owning expression was dropped. Rendering
    /// it as `Type<>` would silently produce wrong documentation, so it is fatal.
    #[error("Generic instantiation of `{type_name}` declares type arguments but resolved none - the source value was likely read after its owner was dropped")]
    GenericArity {
        /// Display name of the generic type whose arguments are missing
        type_name: String,
    },

    /// A doc string ended while still inside a ``` fenced code block.
    ///
    /// The XML summary stream cannot emit an unterminated `<code>` region, so this is an
    /// authoring error in the source documentation text.
    #[error("Documentation text ends inside an unterminated ``` code block")]
    UnterminatedCodeBlock,

    /// A write was attempted while no type document was open.
    #[error("No document is open for writing")]
    NoOpenDocument,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while creating, appending to, or flushing
    /// output documents.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}

/// Convenience `Result` type used throughout this library.
pub type Result<T> = std::result::Result<T, Error>;
