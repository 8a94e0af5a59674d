//! # Catalog Crate
//!
//! The read-only movie catalog every other crate scores against.
//!
//! ## Main Components
//!
//! - **types**: `Movie` and the `Catalog` container
//! - **parser**: JSON catalog documents (file or embedded fixture)
//! - **index**: validation and secondary indices built at load time
//! - **search**: case-insensitive genre and free-text lookups
//! - **error**: error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::reference()?);
//!
//! let nolan = catalog.search("nolan");
//! let sci_fi = catalog.find_by_genre("sci-fi");
//! println!("{} Nolan films, {} sci-fi films", nolan.len(), sci_fi.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod search;

pub use error::{CatalogError, Result};
pub use search::MAX_SUGGESTIONS;
pub use types::{Catalog, Movie, MovieId};
