pub mod catalogue;
pub mod health;
pub mod sessions;

use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use axum::Router;

use aferir_bedrock::generator::NarrativeGenerator;
use aferir_storage::store::SessionStore;

use crate::middleware;
use crate::state::AppState;

pub fn router<S, N>(state: AppState<S, N>) -> Router
where
    S: SessionStore + 'static,
    N: NarrativeGenerator + 'static,
{
    Router::new()
        .route("/health", get(health::health_check))
        // Test catalogue (public question data)
        .route("/tests", get(catalogue::list_tests))
        .route("/tests/{id}", get(catalogue::get_test_detail))
        // Sessions, scoped by company
        .route(
            "/companies/{company_id}/sessions",
            get(sessions::list_sessions::<S, N>).post(sessions::create_session::<S, N>),
        )
        .route(
            "/companies/{company_id}/sessions/{id}",
            get(sessions::get_session::<S, N>),
        )
        .route(
            "/companies/{company_id}/sessions/{id}/answers",
            put(sessions::record_answers::<S, N>),
        )
        .route(
            "/companies/{company_id}/sessions/{id}/answers/{question_id}",
            put(sessions::record_answer::<S, N>),
        )
        .route(
            "/companies/{company_id}/sessions/{id}/progress",
            get(sessions::get_progress::<S, N>),
        )
        .route(
            "/companies/{company_id}/sessions/{id}/complete",
            post(sessions::complete_session::<S, N>),
        )
        .route(
            "/companies/{company_id}/sessions/{id}/result",
            get(sessions::get_result::<S, N>),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .with_state(state)
}
