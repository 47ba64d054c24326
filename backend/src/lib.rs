//! # Mediatrends - chart-ready views over media catalogs
//!
//! Mediatrends loads three catalogs (anime series, films, video games) from
//! CSV and turns them into small JSON summaries a chart front end renders
//! directly.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV Files  │────▶│   Parser    │────▶│  Transform  │────▶│  View JSON  │
//! │  (ISO/UTF8) │     │  (auto-enc) │     │  (stages)   │     │  (charts)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mediatrends::{Catalog, DataPaths, Engine, View};
//!
//! let engine = Engine::new(Catalog::load(&DataPaths::default())?);
//! let output = engine.render(View::MovieYearDistribution)?;
//! println!("{}", serde_json::to_string(&output)?);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Typed values, schemas and datasets
//! - [`catalog`] - The three source datasets
//! - [`config`] - File locations and server settings
//! - [`parser`] - CSV loading with auto-detection
//! - [`validation`] - Required column checks
//! - [`transform`] - Cleaning, grouping, ranking and shaping stages
//! - [`views`] - The fixed view set and the engine
//! - [`cache`] - Views computed once at startup
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Inputs
pub mod catalog;
pub mod config;
pub mod parser;

// Validation
pub mod validation;

// Transformation
pub mod transform;

// Views
pub mod cache;
pub mod views;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{
    DatasetError, DatasetResult, EngineError, EngineResult, ServerError, ServerResult,
};

pub use models::{Column, ColumnType, Dataset, Key, Row, Schema, Value};

pub use catalog::{Catalog, DatasetKind};

pub use config::{DataPaths, ServerConfig};

pub use parser::{detect_delimiter, detect_encoding, load_file, parse_bytes, parse_str};

pub use views::{compute, Engine, View, ViewOutput};

pub use api::start_server;
