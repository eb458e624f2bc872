// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # dotdoc
//!
//! Generates cross-linked markdown documentation, plus .NET-style XML documentation
//! summaries, from a catalog of declared API types. Built in pure Rust, `dotdoc` turns the
//! metadata view of an API surface - namespaces, types, members and their documentation
//! attributes - into one markdown document per type, a per-namespace index, and a
//! `<Namespace>.xml` intellisense stream, with `@`-references in doc strings resolved into
//! links between the generated pages.
//!
//! ## Features
//!
//! - **One document per type** - classes, interfaces, structs, enums and delegates each
//!   render to their own front-mattered markdown file
//! - **Reference resolution** - `@Type`, `@Type.Member` and `@Namespace.Type.Member`
//!   tokens in doc strings become markdown links or XML `<see/>` tags
//! - **Back-references** - every type's document ends with the list of types that mention
//!   it, accumulated across the whole namespace
//! - **External links** - types under configured namespace prefixes link into their
//!   published documentation site instead of a local page
//! - **Deterministic output** - namespaces, members and reference lists all render in
//!   sorted order, so regeneration produces byte-identical files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dotdoc::prelude::*;
//!
//! let mut catalog = TypeCatalog::new();
//! let mut class = TypeDef::new("Sample", "Widget", TypeKind::Class);
//! class.properties.push(Property {
//!     name: "Label".to_string(),
//!     signature: TypeSignature::String,
//!     attributes: vec![CustomAttribute::content(
//!         "DocStringAttribute",
//!         "The text shown on the widget.",
//!     )],
//! });
//! catalog.add_type(class);
//!
//! let options = Options::default();
//! let report = Generator::new(&catalog, &options)?.run()?;
//! assert!(report.all_succeeded());
//! # Ok::<(), dotdoc::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `dotdoc` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`catalog`] - The read-only type catalog the render pass runs against
//! - [`render`] - Signature display, reference resolution and the cross-reference graph
//! - [`output`] - Markdown document lifecycle and the XML summary stream
//! - [`generator`] - The full generation pass over a catalog
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! A frontend (a metadata reader, a test harness) builds a [`catalog::TypeCatalog`] and an
//! [`Options`], hands both to a [`Generator`], and gets back a [`generator::Report`]
//! saying which namespaces rendered and which failed. Failures are isolated per namespace:
//! a malformed reference in one doc string never takes down the documentation of an
//! unrelated namespace.

pub(crate) mod error;

pub mod catalog;
pub mod generator;
pub mod options;
pub mod output;
pub mod prelude;
pub mod render;

/// The error type for all documentation generation operations.
pub use error::Error;

/// The result type used throughout this library.
pub use error::Result;

/// The generation pass entry point.
///
/// # Example
///
/// ```rust,no_run
/// use dotdoc::{Generator, Options, catalog::TypeCatalog};
/// let catalog = TypeCatalog::new();
/// let options = Options::default();
/// let report = Generator::new(&catalog, &options)?.run()?;
/// assert!(report.all_succeeded());
/// # Ok::<(), dotdoc::Error>(())
/// ```
pub use generator::Generator;

/// Options controlling a generation run.
pub use options::Options;
