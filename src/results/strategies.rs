//! Result strategies: one per results format.
//!
//! Each strategy decides whether an entrant gets a result line and which of
//! their session entries is the "primary" one that supplies position, time,
//! status and points. Per-session detail is delegated to the configured
//! [`ComponentStrategy`] list, whose order is also the column order.
//!
//! | Strategy | Sessions | Primary entry | Primary time |
//! |----------|----------|---------------|--------------|
//! | [`RaceResultStrategy`] | `R` or `SR` | the single race entry | finishing time |
//! | [`KnockoutQualifyingStrategy`] | `Q1..Q3`, `SQ1..SQ3` | furthest stage reached | fastest lap |
//! | [`BestLapQualifyingStrategy`] | `QB` | the single session | fastest lap |
//! | [`AggregateQualifyingStrategy`] | `QA` | first session | sum of fastest laps |
//! | [`PracticeResultStrategy`] | `FP*` | only with one session | elapsed time |

use std::time::Duration;

use indexmap::IndexMap;

use super::components::{
    ComponentRenderer, ComponentStrategy, GridComponent, SingleSessionComponent,
};
use super::rows::{ResultRow, SessionEntryRow};
use crate::schema::{BasicSession, ResultComponent, ResultItem};
use crate::types::format_optional;
use crate::{Result, ResultsError};

const BEST_LAP_PREFIX: &str = "QB";
const AGGREGATE_PREFIX: &str = "QA";

/// Renders one result line per entrant
pub trait ResultRenderer {
    /// Component renderers in column order.
    fn components(&self) -> &[ComponentStrategy];

    /// Whether the row gets a result line.
    ///
    /// Fails when the row's data contradicts the format, e.g. two race
    /// entries for one car.
    fn should_render(&self, row: &ResultRow) -> Result<bool>;

    /// Render the row's result line.
    fn render(&self, row: &ResultRow) -> Result<ResultItem>;

    fn component_keys(&self) -> Vec<String> {
        self.components().iter().map(|component| component.key().to_string()).collect()
    }

    /// Render every component that has data for this row.
    fn render_components(&self, row: &ResultRow) -> Result<IndexMap<String, ResultComponent>> {
        let mut components = IndexMap::new();
        for renderer in self.components() {
            if !renderer.should_render(row) {
                continue;
            }
            let component = renderer.render(row)?;
            components.entry(component.key.clone()).or_insert(component);
        }
        Ok(components)
    }

    /// Build a result line from the entrant's primary session entry.
    fn result_item_for_entry(
        &self,
        time: Option<Duration>,
        row: &ResultRow,
        entry: &SessionEntryRow,
    ) -> Result<ResultItem> {
        let position_text = match (entry.is_classified, entry.position) {
            (Some(false), _) => "NC".to_string(),
            (_, Some(position)) => position.to_string(),
            (_, None) => String::new(),
        };

        Ok(ResultItem {
            driver: row.driver.clone(),
            team: row.team.clone(),
            position: entry.position,
            position_text: Some(position_text),
            time: format_optional(time),
            is_classified: entry.is_classified,
            status: entry.status.clone(),
            points: if entry.is_eligible_for_points == Some(true) { entry.points } else { None },
            laps: entry.laps_completed,
            car_number: row.car_number,
            components: self.render_components(row)?,
        })
    }
}

fn missing_primary_entry(context: &str) -> ResultsError {
    ResultsError::data_integrity(
        context,
        "render called for a row without a matching session entry",
    )
}

/// Main race or sprint race
#[derive(Debug, Clone, PartialEq)]
pub struct RaceResultStrategy {
    session_prefix: String,
    components: Vec<ComponentStrategy>,
}

impl RaceResultStrategy {
    /// Build for `"R"` or `"SR"`.
    pub fn new(session_prefix: &str) -> Result<Self> {
        let grid = GridComponent::new(session_prefix)?;
        Ok(Self { session_prefix: session_prefix.to_string(), components: vec![grid.into()] })
    }

    fn race_entry<'a>(&self, row: &'a ResultRow) -> Result<Option<&'a SessionEntryRow>> {
        let mut matches = row.entries_of_type(&self.session_prefix);
        let first = matches.next();
        if let Some(extra) = matches.next() {
            return Err(ResultsError::data_integrity(
                "race result",
                format!(
                    "multiple session entries of type {} for entry {} (sessions {} and {})",
                    self.session_prefix,
                    row.key.entry_id,
                    first.map_or("", |se| se.session_id.as_str()),
                    extra.session_id
                ),
            ));
        }
        Ok(first)
    }
}

impl ResultRenderer for RaceResultStrategy {
    fn components(&self) -> &[ComponentStrategy] {
        &self.components
    }

    fn should_render(&self, row: &ResultRow) -> Result<bool> {
        Ok(self.race_entry(row)?.is_some())
    }

    fn render(&self, row: &ResultRow) -> Result<ResultItem> {
        let entry = self.race_entry(row)?.ok_or_else(|| missing_primary_entry("race result"))?;
        self.result_item_for_entry(entry.time, row, entry)
    }
}

/// Knockout qualifying: Q1, Q2, Q3 (or SQ1, SQ2, SQ3)
///
/// Drivers are classified by the furthest stage they reached, so the primary
/// entry is the one from the highest numbered session.
#[derive(Debug, Clone, PartialEq)]
pub struct KnockoutQualifyingStrategy {
    session_prefix: String,
    components: Vec<ComponentStrategy>,
}

impl KnockoutQualifyingStrategy {
    /// Build from the round's sessions in start time order.
    ///
    /// Stages are numbered by that order: the first matching session becomes
    /// `Q1` (or `SQ1`), the next `Q2`, and so on.
    pub fn new(sessions: &[BasicSession], session_prefix: &str) -> Result<Self> {
        if session_prefix != "Q" && session_prefix != "SQ" {
            return Err(ResultsError::invalid_configuration(format!(
                "knockout qualifying needs session type Q or SQ, not {}",
                session_prefix
            )));
        }

        let components: Vec<ComponentStrategy> = sessions
            .iter()
            .filter(|session| session.session_type.starts_with(session_prefix))
            .enumerate()
            .map(|(i, session)| {
                SingleSessionComponent::new(format!("{}{}", session_prefix, i + 1), &session.id)
                    .into()
            })
            .collect();

        if components.is_empty() {
            return Err(ResultsError::invalid_configuration(format!(
                "no sessions of type {} for knockout qualifying",
                session_prefix
            )));
        }

        Ok(Self { session_prefix: session_prefix.to_string(), components })
    }

    fn best_entry<'a>(&self, row: &'a ResultRow) -> Option<&'a SessionEntryRow> {
        let mut best: Option<(i32, &SessionEntryRow)> = None;
        for se in row.entries_of_type(&self.session_prefix) {
            // No order number: the session did not take place.
            let Some(order) = se.session_order_number else {
                continue;
            };
            if best.is_none_or(|(best_order, _)| order > best_order) {
                best = Some((order, se));
            }
        }
        best.map(|(_, se)| se)
    }
}

impl ResultRenderer for KnockoutQualifyingStrategy {
    fn components(&self) -> &[ComponentStrategy] {
        &self.components
    }

    fn should_render(&self, row: &ResultRow) -> Result<bool> {
        Ok(self.best_entry(row).is_some())
    }

    fn render(&self, row: &ResultRow) -> Result<ResultItem> {
        let entry =
            self.best_entry(row).ok_or_else(|| missing_primary_entry("knockout qualifying"))?;
        self.result_item_for_entry(entry.fastest_lap_time, row, entry)
    }
}

fn numbered_qualifying_components(
    sessions: &[BasicSession],
    session_type: &str,
) -> Vec<ComponentStrategy> {
    sessions
        .iter()
        .filter(|session| session.session_type == session_type)
        .enumerate()
        .map(|(i, session)| SingleSessionComponent::new(format!("Q{}", i + 1), &session.id).into())
        .collect()
}

/// Best single lap qualifying (`QB`)
#[derive(Debug, Clone, PartialEq)]
pub struct BestLapQualifyingStrategy {
    components: Vec<ComponentStrategy>,
}

impl BestLapQualifyingStrategy {
    pub fn new(sessions: &[BasicSession]) -> Self {
        Self { components: numbered_qualifying_components(sessions, BEST_LAP_PREFIX) }
    }
}

impl ResultRenderer for BestLapQualifyingStrategy {
    fn components(&self) -> &[ComponentStrategy] {
        &self.components
    }

    fn should_render(&self, row: &ResultRow) -> Result<bool> {
        Ok(row.entries_of_type(BEST_LAP_PREFIX).next().is_some())
    }

    fn render(&self, row: &ResultRow) -> Result<ResultItem> {
        let entries: Vec<_> = row.entries_of_type(BEST_LAP_PREFIX).collect();
        let entry = match entries.as_slice() {
            [entry] => *entry,
            [] => return Err(missing_primary_entry("best lap qualifying")),
            _ => {
                return Err(ResultsError::data_integrity(
                    "best lap qualifying",
                    format!(
                        "{} best lap entries for entry {}; merging sessions is not supported",
                        entries.len(),
                        row.key.entry_id
                    ),
                ));
            }
        };
        self.result_item_for_entry(entry.fastest_lap_time, row, entry)
    }
}

/// Aggregate qualifying (`QA`): fastest laps from every session are summed
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateQualifyingStrategy {
    components: Vec<ComponentStrategy>,
}

impl AggregateQualifyingStrategy {
    pub fn new(sessions: &[BasicSession]) -> Self {
        Self { components: numbered_qualifying_components(sessions, AGGREGATE_PREFIX) }
    }
}

impl ResultRenderer for AggregateQualifyingStrategy {
    fn components(&self) -> &[ComponentStrategy] {
        &self.components
    }

    fn should_render(&self, row: &ResultRow) -> Result<bool> {
        Ok(row.entries_of_type(AGGREGATE_PREFIX).next().is_some())
    }

    fn render(&self, row: &ResultRow) -> Result<ResultItem> {
        let entries: Vec<_> = row.entries_of_type(AGGREGATE_PREFIX).collect();
        let first =
            entries.first().copied().ok_or_else(|| missing_primary_entry("aggregate qualifying"))?;

        if let Some(mismatch) = entries.iter().find(|se| se.position != first.position) {
            return Err(ResultsError::data_integrity(
                "aggregate qualifying",
                format!(
                    "entry {} has position {:?} in session {} but {:?} in session {}",
                    row.key.entry_id,
                    first.position,
                    first.session_id,
                    mismatch.position,
                    mismatch.session_id
                ),
            ));
        }

        let total = entries
            .iter()
            .filter_map(|se| se.fastest_lap_time)
            .fold(None, |sum: Option<Duration>, lap| Some(sum.unwrap_or_default() + lap));

        self.result_item_for_entry(total, row, first)
    }
}

/// Practice sessions
///
/// A single session is a normal classification. Several sessions (the `FP`
/// result type) have no overall order, so every entrant gets a line with only
/// per-session components.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeResultStrategy {
    session_prefix: String,
    single_session: bool,
    components: Vec<ComponentStrategy>,
}

impl PracticeResultStrategy {
    pub fn new(sessions: &[BasicSession], session_prefix: &str) -> Self {
        let matching: Vec<&BasicSession> = sessions
            .iter()
            .filter(|session| session.session_type.starts_with(session_prefix))
            .collect();
        let single_session = matching.len() == 1;
        let components = if single_session {
            Vec::new()
        } else {
            matching
                .iter()
                .map(|session| {
                    SingleSessionComponent::new(&session.session_type, &session.id).into()
                })
                .collect()
        };
        Self { session_prefix: session_prefix.to_string(), single_session, components }
    }
}

impl ResultRenderer for PracticeResultStrategy {
    fn components(&self) -> &[ComponentStrategy] {
        &self.components
    }

    fn should_render(&self, _row: &ResultRow) -> Result<bool> {
        Ok(true)
    }

    fn render(&self, row: &ResultRow) -> Result<ResultItem> {
        if self.single_session {
            if let Some(entry) = row.entries_of_type(&self.session_prefix).next() {
                return self.result_item_for_entry(entry.time, row, entry);
            }
        }

        Ok(ResultItem {
            driver: row.driver.clone(),
            team: row.team.clone(),
            car_number: row.car_number,
            components: self.render_components(row)?,
            ..Default::default()
        })
    }
}

/// The closed set of result strategies
#[derive(Debug, Clone, PartialEq)]
pub enum ResultStrategy {
    Race(RaceResultStrategy),
    KnockoutQualifying(KnockoutQualifyingStrategy),
    BestLapQualifying(BestLapQualifyingStrategy),
    AggregateQualifying(AggregateQualifyingStrategy),
    Practice(PracticeResultStrategy),
}

impl ResultStrategy {
    fn inner(&self) -> &dyn ResultRenderer {
        match self {
            ResultStrategy::Race(strategy) => strategy,
            ResultStrategy::KnockoutQualifying(strategy) => strategy,
            ResultStrategy::BestLapQualifying(strategy) => strategy,
            ResultStrategy::AggregateQualifying(strategy) => strategy,
            ResultStrategy::Practice(strategy) => strategy,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResultStrategy::Race(_) => "race",
            ResultStrategy::KnockoutQualifying(_) => "knockout_qualifying",
            ResultStrategy::BestLapQualifying(_) => "best_lap_qualifying",
            ResultStrategy::AggregateQualifying(_) => "aggregate_qualifying",
            ResultStrategy::Practice(_) => "practice",
        }
    }
}

impl ResultRenderer for ResultStrategy {
    fn components(&self) -> &[ComponentStrategy] {
        self.inner().components()
    }

    fn should_render(&self, row: &ResultRow) -> Result<bool> {
        self.inner().should_render(row)
    }

    fn render(&self, row: &ResultRow) -> Result<ResultItem> {
        self.inner().render(row)
    }
}
