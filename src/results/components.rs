//! Component renderers: the per-session and grid columns of a result line.

use tracing::error;

use super::constants::component_display_name;
use super::rows::ResultRow;
use crate::schema::ResultComponent;
use crate::types::format_optional;
use crate::{Result, ResultsError};

/// Renders one named column of a result line
pub trait ComponentRenderer {
    /// Column key, unique among the components of one result strategy.
    fn key(&self) -> &str;

    /// Whether the row has data for this component. Must be free of side effects.
    fn should_render(&self, row: &ResultRow) -> bool;

    /// Render the component. Callers check [`should_render`](Self::should_render) first.
    fn render(&self, row: &ResultRow) -> Result<ResultComponent>;

    /// Display name for this component's key.
    fn display_name(&self) -> String {
        let key = self.key();
        match component_display_name(key) {
            Some(name) => name.to_string(),
            None => {
                error!(component_key = key, "missing component display name for key");
                key.to_string()
            }
        }
    }
}

/// Position and time from one specific session
#[derive(Debug, Clone, PartialEq)]
pub struct SingleSessionComponent {
    key: String,
    session_id: String,
}

impl SingleSessionComponent {
    pub fn new(key: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self { key: key.into(), session_id: session_id.into() }
    }
}

impl ComponentRenderer for SingleSessionComponent {
    fn key(&self) -> &str {
        &self.key
    }

    fn should_render(&self, row: &ResultRow) -> bool {
        row.entry_for_session(&self.session_id).is_some()
    }

    fn render(&self, row: &ResultRow) -> Result<ResultComponent> {
        let entry = row
            .entry_for_session(&self.session_id)
            .ok_or_else(|| ResultsError::Lookup { session_id: self.session_id.clone() })?;

        // Races are timed to the flag; every other session by its best lap.
        let time = if entry.is_type("R") { entry.time } else { entry.fastest_lap_time };

        Ok(ResultComponent {
            key: self.key.clone(),
            name: self.display_name(),
            position: entry.position,
            time: format_optional(time),
        })
    }
}

/// Starting grid slot for a race or sprint race
#[derive(Debug, Clone, PartialEq)]
pub struct GridComponent {
    session_prefix: &'static str,
}

impl GridComponent {
    /// Build a grid component for `"R"` or `"SR"`.
    pub fn new(session_prefix: &str) -> Result<Self> {
        let session_prefix = match session_prefix {
            "R" => "R",
            "SR" => "SR",
            other => {
                return Err(ResultsError::invalid_configuration(format!(
                    "grid component needs a race session type, not {}",
                    other
                )));
            }
        };
        Ok(Self { session_prefix })
    }
}

impl ComponentRenderer for GridComponent {
    fn key(&self) -> &str {
        if self.session_prefix == "SR" { "SGRID" } else { "GRID" }
    }

    fn should_render(&self, row: &ResultRow) -> bool {
        row.entries_of_type(self.session_prefix).any(|se| se.grid_position.is_some())
    }

    fn render(&self, row: &ResultRow) -> Result<ResultComponent> {
        let mut entries: Vec<_> = row.entries_of_type(self.session_prefix).collect();

        if entries.len() > 1 {
            let session_ids: Vec<&str> = entries.iter().map(|se| se.session_id.as_str()).collect();
            error!(
                ?session_ids,
                "found multiple session entries matching grid session filter, expected at most one"
            );
            // Latest session first; unnumbered sessions sort last.
            entries.sort_by(|a, b| b.session_order_number.cmp(&a.session_order_number));
        }

        let grid_position = entries.iter().find_map(|se| se.grid_position);

        Ok(ResultComponent {
            key: self.key().to_string(),
            name: self.display_name(),
            position: grid_position,
            time: None,
        })
    }
}

/// The closed set of component renderers
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStrategy {
    SingleSession(SingleSessionComponent),
    Grid(GridComponent),
}

impl ComponentRenderer for ComponentStrategy {
    fn key(&self) -> &str {
        match self {
            ComponentStrategy::SingleSession(component) => component.key(),
            ComponentStrategy::Grid(component) => component.key(),
        }
    }

    fn should_render(&self, row: &ResultRow) -> bool {
        match self {
            ComponentStrategy::SingleSession(component) => component.should_render(row),
            ComponentStrategy::Grid(component) => component.should_render(row),
        }
    }

    fn render(&self, row: &ResultRow) -> Result<ResultComponent> {
        match self {
            ComponentStrategy::SingleSession(component) => component.render(row),
            ComponentStrategy::Grid(component) => component.render(row),
        }
    }
}

impl From<SingleSessionComponent> for ComponentStrategy {
    fn from(component: SingleSessionComponent) -> Self {
        ComponentStrategy::SingleSession(component)
    }
}

impl From<GridComponent> for ComponentStrategy {
    fn from(component: GridComponent) -> Self {
        ComponentStrategy::Grid(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{entry, row};
    use std::time::Duration;

    #[test]
    fn single_session_uses_race_time_for_races() {
        let mut race = entry("R", "race", Some(1));
        race.position = Some(2);
        race.time = Some(Duration::from_millis(4_848_233));
        race.fastest_lap_time = Some(Duration::from_millis(84_319));
        let row = row(1, "Max", vec![race]);

        let component = SingleSessionComponent::new("R", "race").render(&row).unwrap();
        assert_eq!(component.time.as_deref(), Some("1:20:48.233"));
        assert_eq!(component.position, Some(2));
    }

    #[test]
    fn single_session_uses_fastest_lap_elsewhere() {
        let mut q2 = entry("Q2", "q2", Some(2));
        q2.position = Some(13);
        q2.time = Some(Duration::from_secs(1_800));
        q2.fastest_lap_time = Some(Duration::from_millis(89_876));
        let row = row(77, "Valtteri", vec![q2]);

        let component = SingleSessionComponent::new("Q2", "q2");
        assert!(component.should_render(&row));
        let rendered = component.render(&row).unwrap();
        assert_eq!(rendered.name, "Qualifying 2");
        assert_eq!(rendered.time.as_deref(), Some("1:29.876"));
    }

    #[test]
    fn single_session_without_entry_is_a_lookup_error() {
        let row = row(77, "Valtteri", vec![entry("Q1", "q1", Some(1))]);
        let component = SingleSessionComponent::new("Q2", "q2");
        assert!(!component.should_render(&row));
        assert!(matches!(component.render(&row), Err(ResultsError::Lookup { .. })));
    }

    #[test]
    fn unknown_key_falls_back_to_key_as_name() {
        let row = row(1, "Max", vec![entry("QO", "qo", Some(1))]);
        let rendered = SingleSessionComponent::new("QO1", "qo").render(&row).unwrap();
        assert_eq!(rendered.name, "QO1");
    }

    #[test]
    fn grid_rejects_non_race_prefixes() {
        assert!(GridComponent::new("R").is_ok());
        assert!(GridComponent::new("SR").is_ok());
        assert!(matches!(GridComponent::new("Q"), Err(ResultsError::InvalidConfiguration { .. })));
    }

    #[test]
    fn grid_keys_follow_prefix() {
        assert_eq!(GridComponent::new("R").unwrap().key(), "GRID");
        assert_eq!(GridComponent::new("SR").unwrap().key(), "SGRID");
    }

    #[test]
    fn grid_renders_only_with_grid_position() {
        let grid = GridComponent::new("R").unwrap();
        let mut race = entry("R", "race", Some(1));
        assert!(!grid.should_render(&row(1, "Max", vec![race.clone()])));

        race.grid_position = Some(8);
        let row = row(1, "Max", vec![race]);
        assert!(grid.should_render(&row));
        let rendered = grid.render(&row).unwrap();
        assert_eq!(rendered.position, Some(8));
        assert_eq!(rendered.name, "Grid Position");
        assert_eq!(rendered.time, None);
    }

    #[test]
    fn grid_prefers_latest_session_when_duplicated() {
        let mut early = entry("R", "race_a", Some(1));
        early.grid_position = Some(5);
        let mut late = entry("R", "race_b", Some(2));
        late.grid_position = Some(3);
        let row = row(1, "Max", vec![early, late]);

        let rendered = GridComponent::new("R").unwrap().render(&row).unwrap();
        assert_eq!(rendered.position, Some(3));
    }

    #[test]
    fn sprint_grid_ignores_main_race() {
        let mut race = entry("R", "race", Some(2));
        race.grid_position = Some(1);
        let row = row(16, "Charles", vec![race]);
        assert!(!GridComponent::new("SR").unwrap().should_render(&row));
    }
}
