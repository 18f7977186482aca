use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::lookup::{LookupError, NutritionLookup};
use crate::nutrition::dto::NutritionRecord;
use crate::nutrition::error::NutritionError;
use crate::nutrition::exercise::{self, ExerciseDurations};
use crate::nutrition::series::{self, NutrientSeries};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchPhase {
    #[default]
    Idle,
    InFlight,
    Populated(NutritionRecord),
    Empty,
    Errored(String),
}

/// Per-session search state. Holds at most one of record / error.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    phase: SearchPhase,
    results: Vec<NutritionRecord>,
    issued: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == SearchPhase::InFlight
    }

    pub fn error(&self) -> Option<String> {
        match &self.phase {
            SearchPhase::Empty => Some(NutritionError::NoResults.to_string()),
            SearchPhase::Errored(msg) => Some(msg.clone()),
            _ => None,
        }
    }

    /// The first matched item of the last successful search.
    pub fn record(&self) -> Option<&NutritionRecord> {
        match &self.phase {
            SearchPhase::Populated(record) => Some(record),
            _ => None,
        }
    }

    /// Every item of the last successful search, first one included.
    pub fn results(&self) -> &[NutritionRecord] {
        &self.results
    }

    pub fn durations(&self) -> Option<ExerciseDurations> {
        self.record()?.calories.and_then(exercise::compute)
    }

    pub fn series(&self) -> Option<Result<NutrientSeries, NutritionError>> {
        self.record().map(series::to_series)
    }
}

/// Identifies one issued search; only the latest ticket may settle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

#[derive(Clone)]
pub struct SearchController {
    lookup: Arc<dyn NutritionLookup>,
}

impl SearchController {
    pub fn new(lookup: Arc<dyn NutritionLookup>) -> Self {
        Self { lookup }
    }

    /// Moves `state` to in-flight and clears the previous record and error.
    pub fn begin(state: &mut SearchState, query: &str) -> SearchTicket {
        state.issued += 1;
        state.query = query.to_string();
        state.phase = SearchPhase::InFlight;
        state.results.clear();
        SearchTicket {
            seq: state.issued,
            query: state.query.clone(),
        }
    }

    /// Applies a lookup outcome. Returns false and leaves `state` untouched
    /// when a newer search has been issued since `ticket`.
    pub fn settle(
        state: &mut SearchState,
        ticket: SearchTicket,
        outcome: Result<Vec<NutritionRecord>, LookupError>,
    ) -> bool {
        if ticket.seq != state.issued {
            debug!(seq = ticket.seq, latest = state.issued, query = %ticket.query, "discarding stale lookup result");
            return false;
        }

        match outcome {
            Ok(items) => match items.first().cloned() {
                Some(first) => {
                    info!(query = %ticket.query, matches = items.len(), "search populated");
                    state.phase = SearchPhase::Populated(first);
                    state.results = items;
                }
                None => {
                    info!(query = %ticket.query, "search returned no items");
                    state.phase = SearchPhase::Empty;
                    state.results.clear();
                }
            },
            Err(e) => {
                warn!(error = %e, query = %ticket.query, "nutrition lookup failed");
                let err = NutritionError::from(e);
                state.phase = SearchPhase::Errored(err.to_string());
                state.results.clear();
            }
        }
        true
    }

    /// Runs one search against exclusively owned state.
    pub async fn search(&self, state: &mut SearchState, query: &str) {
        let ticket = Self::begin(state, query);
        let outcome = self.lookup.lookup(&ticket.query).await;
        Self::settle(state, ticket, outcome);
    }

    /// Runs one search against shared state without holding the lock while
    /// the lookup is in flight. Returns whether this search's result was kept.
    pub async fn search_shared(&self, state: &Mutex<SearchState>, query: &str) -> bool {
        let ticket = Self::begin(&mut *state.lock().await, query);
        let outcome = self.lookup.lookup(&ticket.query).await;
        let mut guard = state.lock().await;
        Self::settle(&mut guard, ticket, outcome)
    }
}
