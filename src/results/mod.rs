//! Results rendering pipeline.
//!
//! A request for one round and one result type flows through three stages:
//!
//! 1. [`ResultDataLoader`] reads the round's sessions and entrants from a
//!    [`ResultStore`](crate::ResultStore) and flattens them into [`ResultRow`]s
//! 2. [`select_strategy`] picks the [`ResultStrategy`] for the result type
//! 3. [`ResultsOrchestrator`] renders every accepted row and orders the lines

pub mod components;
pub mod constants;
pub mod loader;
pub mod orchestrator;
pub mod rows;
pub mod strategies;

pub use components::{ComponentRenderer, ComponentStrategy, GridComponent, SingleSessionComponent};
pub use constants::{component_display_name, result_type_title};
pub use loader::ResultDataLoader;
pub use orchestrator::{ResultsOrchestrator, select_strategy};
pub use rows::{ResultData, ResultRow, RowKey, SessionEntryRow};
pub use strategies::{
    AggregateQualifyingStrategy, BestLapQualifyingStrategy, KnockoutQualifyingStrategy,
    PracticeResultStrategy, RaceResultStrategy, ResultRenderer, ResultStrategy,
};
