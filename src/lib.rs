//! Formula 1 results rendering.
//!
//! Turns the relational results data of one race weekend (a round with its
//! sessions, entrants and per-session results) into display tables. Each
//! result type has its own rules: a race is classified by the finishing
//! order, knockout qualifying by the furthest stage a driver reached,
//! aggregate qualifying by summed lap times, and so on.
//!
//! # Features
//!
//! - **Result types**: race, sprint race, knockout, best lap and aggregate
//!   qualifying, single and combined practice
//! - **Pluggable storage**: anything implementing [`ResultStore`], with an
//!   in-memory [`MemoryStore`] read from YAML snapshots
//! - **Serde payloads**: every output type serializes to the API's JSON shape,
//!   and derives `specta::Type` with the `typescript` feature
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use f1_results::{MemoryStore, ResultsConfig, ResultsService};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     f1_results::logging::init();
//!
//!     let store = MemoryStore::load("test-data/rounds/monza_2024.yaml")?;
//!     let config = ResultsConfig::load("config/results.yaml")?;
//!     let service = ResultsService::new(store, config);
//!
//!     for item in service.available_result_types("round_monza_2024")?.available_results {
//!         let results = service.results("round_monza_2024", &item.result_type)?;
//!         println!("{}: {} lines", results.title, results.results.len());
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod config;
mod error;
pub mod logging;
#[cfg(any(test, feature = "test-utils", feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Data access
pub mod store;
pub mod stores;

// Rendering pipeline
pub mod results;
pub mod schema;
pub mod service;

// Core exports
pub use config::{LinkBuilder, ResultsConfig};
pub use error::*;
pub use types::*;

// Data access exports
pub use store::ResultStore;
pub use stores::MemoryStore;

// Rendering exports
pub use results::{ResultData, ResultDataLoader, ResultsOrchestrator};
pub use schema::{AvailableResultsForRound, ErrorBody, Results};
pub use service::ResultsService;
