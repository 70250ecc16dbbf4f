//! Router construction and the route handlers.
//!
//! The page handlers are deliberately trivial: they serve inline HTML and
//! never touch the database or the session themselves. All tracking happens
//! in the [`crate::tracker`] middleware wrapped around them. The one handler
//! with a side effect is [`log_binary`], which records the button click.

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tower_sessions::Session;

use crate::entity::button;
use crate::error::AppError;
use crate::tracker;

/// Application state shared across handlers.
///
/// The `DatabaseConnection` is internally pooled, so cloning it per request
/// hands out scoped handles with guaranteed release rather than sharing one
/// raw connection.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Builds the application router with the tracking middleware attached.
///
/// The caller layers the session middleware on top (see `main.rs`); it must
/// be outermost so the session is loaded before the identity middleware runs
/// and persisted after the tracker has rotated its bookkeeping.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/learn_more", get(learn_more))
        .route("/confirmation", get(confirmation))
        .route("/log_binary", get(log_binary))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            tracker::track_transition,
        ))
        .layer(middleware::from_fn(tracker::assign_visitor_id))
        .with_state(state)
}

/// Home page. Carries the "Learn more" link and the tracked "Contact"
/// button.
pub async fn index() -> impl IntoResponse {
    Html(
        r#"
        <html>
            <head><title>pagetrack</title></head>
            <body>
                <h1>Welcome</h1>
                <p>This demo records how long you spend on each page and
                whether you clicked the contact button.</p>
                <p><a href="/learn_more">Learn more</a></p>
                <p><a href="/log_binary">Contact</a></p>
            </body>
        </html>
        "#,
    )
}

/// Info page.
pub async fn learn_more() -> impl IntoResponse {
    Html(
        r#"
        <html>
            <head><title>Learn more</title></head>
            <body>
                <h1>Learn more</h1>
                <p>Time spent here is attributed to this page when you move
                on to another tracked page.</p>
                <p><a href="/confirmation">Done</a></p>
            </body>
        </html>
        "#,
    )
}

/// Terminal page; after it is served, the tracker deletes the session
/// bookkeeping.
pub async fn confirmation() -> impl IntoResponse {
    Html(
        r#"
        <html>
            <head><title>Thank you</title></head>
            <body>
                <h1>Thank you</h1>
                <p>Your visit is complete.</p>
            </body>
        </html>
        "#,
    )
}

/// Records a click of the tracked button, then sends the visitor home.
///
/// The redirect makes the next response cycle run the tracker's home-page
/// branch. A session without a visitor id yields an empty non-redirect
/// response and writes nothing; behind [`tracker::assign_visitor_id`] that
/// branch is unreachable.
pub async fn log_binary(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let Some(visitor_id) = tracker::visitor_id(&session).await? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    button::ActiveModel {
        session_id: Set(visitor_id),
        button: Set(1),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    tracing::debug!(visitor_id, "recorded button click");

    Ok(Redirect::to("/").into_response())
}
