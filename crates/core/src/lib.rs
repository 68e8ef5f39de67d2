//! Content-model definitions to TypeScript interfaces and type guards.
//!
//! The engine consumes already-parsed [`RawModelRecord`]s and returns a
//! [`Manifest`] of output units. Nothing here touches the filesystem.
//!
//! Stages, leaf to root:
//! - `naming`: identifier derivation with override fallback
//! - `graph`: model keys, interface names and unit paths, keyed lookup
//! - `resolver`: reference keys, relative import paths, per-unit imports
//! - `synth`: field declarations to properties and enums
//! - `codegen`: one `TsModule` per model
//! - `generate`: drives the run and renders the index
//!
//! ```
//! use strapi_ts_common::RawModelRecord;
//! use strapi_ts_core::{generate, GeneratorConfig};
//!
//! let record = RawModelRecord::from_json(
//!     r#"{"info": {"name": "Tag"}, "attributes": {"label": {"type": "string"}}}"#,
//!     "api/tag/models/tag.settings.json",
//!     false,
//! )?;
//! let manifest = generate(vec![record], &GeneratorConfig::new())?;
//! assert_eq!(manifest.units[0].path, "tag");
//! assert!(manifest.units[0].content.contains("export interface Tag {"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostics;
mod error;
pub mod generate;
pub mod graph;
pub mod naming;
pub mod resolver;
pub mod synth;
pub mod ts;

pub use config::{ExtraField, GeneratorConfig, Overrides};
pub use diagnostics::Diagnostic;
pub use error::{Error, Result};
pub use generate::{Manifest, OutputUnit, generate, render_index};
pub use graph::{Discriminant, ModelGraph, ResolvedModel};
pub use strapi_ts_common::RawModelRecord;
