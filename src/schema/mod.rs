//! Payload types returned to API callers.
//!
//! [`shared`] holds the linked summaries embedded in every payload (driver,
//! team, season, round, circuit, session). [`results`] holds the rendered
//! tables and the available result types listing.

pub mod results;
pub mod shared;

pub use results::{
    AvailableResultsForRound, AvailableResultsItem, ErrorBody, ResultComponent, ResultItem, Results,
};
pub use shared::{BasicDriver, BasicSession, BasicTeam, Circuit, Round, Season};
