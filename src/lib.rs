//! mojoscan - doc-comment driven goal-descriptor extraction
//!
//! This library extracts structured plugin-goal metadata from annotated Java
//! source files. It reads the doc-comment tags attached to classes and fields,
//! resolves declared field types (including generic and array forms) into
//! canonical fully-qualified names, and assembles one typed goal descriptor
//! per eligible class.
//!
//! # Core Concepts
//!
//! - **Goal**: one invocable unit of plugin behavior, described by a
//!   [`GoalDescriptor`]
//! - **Doc-comment tag**: a `@name value` entry inside the documentation block
//!   preceding a declaration - the only metadata convention this extractor
//!   recognizes. Sources that rely solely on annotation-based metadata yield
//!   zero descriptors.
//! - **Eligible class**: a class whose effective tag table (its own tags over
//!   those inherited from in-scope supertypes) carries the `goal` marker
//!
//! # Example Usage
//!
//! ```no_run
//! use mojoscan::{ExtractConfig, Extractor};
//! use std::path::PathBuf;
//!
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractConfig::with_roots(vec![PathBuf::from("src/main/java")])
//!     .with_goal_prefix("touch");
//!
//! let outcome = Extractor::new(config).run()?;
//!
//! for descriptor in &outcome.descriptors {
//!     println!("{}", descriptor);
//! }
//! for diagnostic in &outcome.diagnostics {
//!     eprintln!("{}", diagnostic);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Pipeline
//!
//! [`scanner`] walks the source roots and decodes files, [`parser`] turns each
//! file into classes/fields with ordered tag tables, [`resolver`] canonicalizes
//! declared types without a classpath, and [`extractor`] filters eligible
//! classes and assembles descriptors. Only a failed scan aborts a run; broken
//! files and malformed classes isolate into diagnostics on the outcome.

// Public modules
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod extractor;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod tags;
pub mod util;

// Re-export key types for convenient access
pub use config::{ConfigError, ExtractConfig};
pub use descriptor::{GoalDescriptor, ParameterDescriptor, PluginCoordinates};
pub use error::{Diagnostic, ExtractError};
pub use extractor::{ExtractionOutcome, Extractor};
pub use model::{ClassUnit, FieldUnit, SourceUnit, TagTable};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_mojoscan() {
        assert_eq!(NAME, "mojoscan");
    }
}
