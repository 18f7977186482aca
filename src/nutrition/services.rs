use crate::nutrition::controller::SearchState;
use crate::nutrition::dto::{ExerciseLine, SearchView};
use crate::nutrition::series::{nutrient_table, ChartData};
use crate::sessions::Session;
use crate::state::AppState;

/// Runs one search for the session and returns its settled view.
pub async fn search_in_session(st: &AppState, session: &Session, query: &str) -> SearchView {
    st.controller.search_shared(&session.state, query).await;
    let state = session.state.lock().await;
    build_view(session, &state)
}

pub async fn current_view(session: &Session) -> SearchView {
    let state = session.state.lock().await;
    build_view(session, &state)
}

pub fn build_view(session: &Session, state: &SearchState) -> SearchView {
    let record = state.record().cloned();
    let calories = record.as_ref().and_then(|r| r.calories);
    let durations = state.durations();

    let (chart, chart_error) = match state.series() {
        Some(Ok(series)) => (Some(ChartData::from_series(&series)), None),
        Some(Err(e)) => (None, Some(e.to_string())),
        None => (None, None),
    };

    SearchView {
        session_id: session.id,
        query: state.query().to_string(),
        in_flight: state.is_in_flight(),
        error: state.error(),
        results_count: state.results().len(),
        summary: calories.map(|c| format!("{} has a total of {} Calories", state.query(), c)),
        burn_headline: calories
            .map(|c| format!("To Burn {} calories, approximately you will have to:", c)),
        exercises: durations
            .map(|d| {
                d.iter()
                    .map(|(e, minutes)| ExerciseLine {
                        exercise: e.key(),
                        phrase: e.phrase(),
                        minutes,
                    })
                    .collect()
            })
            .unwrap_or_default(),
        durations,
        nutrients: record.as_ref().map(nutrient_table).unwrap_or_default(),
        record,
        chart,
        chart_error,
    }
}
