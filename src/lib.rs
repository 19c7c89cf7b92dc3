//! Fighter Harvest Library
//!
//! Discovers a roster of fighter names from a discovery site (one page per
//! letter), then enriches each name with the attributes found on its profile
//! page, producing records ready for storage.
//!
//! # Modules
//!
//! - `data`: Persistence layer.
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `db_storage`: Profile storage operations.
//! - `discovery`: Stage one, candidate names per letter.
//! - `enrichment`: Stage two, profile lookup per candidate.
//! - `errors`: Error handling types.
//! - `extractor`: Positional extraction of profile pages.
//! - `fetcher`: HTTP document fetcher.
//! - `models`: Core data models.
//! - `pipeline`: Runs both stages.
//! - `profile`: Slug derivation and single-profile lookup.
//! - `workers`: Bounded, order-preserving fan-out.

pub mod data;

// Re-export primary modules for shared use in tests and other binaries
pub mod config;
pub mod db;
pub mod db_storage;
pub mod discovery;
pub mod enrichment;
pub mod errors;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod pipeline;
pub mod profile;
pub mod workers;
