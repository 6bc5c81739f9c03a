//! basicreport fonts - provisioning and registration of TrueType fonts for
//! PDF generation.
//!
//! Fonts listed in a [`Config`] fontset are downloaded as zip archives,
//! extracted into a flat cache directory and mapped by name
//! ([`FontResolver`]), then installed into a PDF backend's font table along
//! with aliases and a fallback chain ([`FontRegistrar`]).
//!
//! ```no_run
//! use basicreport_fonts::{Config, FontBook, FontRegistrar, FontResolver};
//!
//! let config = Config::new("/srv/report").with_fallback_fonts("IPAGothic");
//! let resolver = FontResolver::new(config).unwrap();
//!
//! let mut book = FontBook::new();
//! FontRegistrar::new(&mut book).setup_fonts(&resolver).unwrap();
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod io;
pub mod registrar;
pub mod resolve;

pub use backend::{FontBackend, FontBook, FontFamily, FontSource, FontStyle};
pub use config::{ArchiveSpec, Config, FallbackFonts, FontSpec};
pub use error::{FontError, Result};
pub use extract::extract;
pub use fetch::{Fetch, HttpFetcher};
pub use registrar::FontRegistrar;
pub use resolve::{FontMap, FontResolver, MissingFont, ResolvedFonts};

/// Re-exported so [`Fetch`] implementations can name the URI type.
pub use reqwest::Url;
