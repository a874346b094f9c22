//! `fnwiki_core` is the core library behind the scripting API wiki. It loads
//! the function entries (one YAML file per function), decides which execution
//! context each function belongs to, and exposes two read-only indexes for the
//! pages that list them.
//!
//! ## Processing Pipeline
//!
//! ```text
//! functions/<Category>/<id>.yaml
//!   → Source loader (walks the functions directory, parses YAML into records)
//!   → Classifier (shared > client > server, decided once per record)
//!   → Indexer (one pass: by category, and by context then category)
//!   → FunctionCatalog (immutable snapshot handed to renderers)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `fnwiki.toml`.
//! - [`source`]: Discovery and parsing of function files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fnwiki_core::FunctionCatalog;
//! use fnwiki_core::FunctionContext;
//! use std::path::Path;
//!
//! let catalog = FunctionCatalog::load(Path::new(".")).unwrap();
//!
//! for (category, functions) in catalog.functions_by_category().iter() {
//! 	println!("{category}: {} function(s)", functions.len());
//! }
//!
//! let client = catalog
//! 	.functions_by_type_by_category()
//! 	.get(FunctionContext::Client);
//! println!("{} client-side function(s)", client.record_count());
//! ```

pub use catalog::*;
pub use category::*;
pub use context::*;
pub use error::*;
pub use index::*;
pub use record::*;

mod catalog;
mod category;
pub mod config;
mod context;
#[allow(unused_assignments)]
mod error;
mod index;
mod record;
pub mod source;

#[cfg(test)]
mod __fixtures;
