//! Visitor identity assignment and the page-transition tracker.
//!
//! The tracker is the one stateful piece of the service. It keeps three
//! values in the server-side session:
//!
//! - `id` — a random visitor id, assigned once per session;
//! - `start_time` — when the visitor entered the page they are currently on;
//! - `previous_path` — the label of that page.
//!
//! On every response the tracker looks up the request path in a fixed
//! transition table. Crossing a tracked boundary flushes the pending dwell
//! interval (one `PageView` row labeled with the page the visitor is
//! *leaving*) and then rotates the bookkeeping for the next interval. The
//! terminal page deletes the bookkeeping instead, ending tracking for that
//! session until the home page is visited again.
//!
//! Per session the tracked states form
//! `UNTRACKED → ON_HOME ⇄ ON_LEARN_MORE → ENDED`, where `ENDED` is simply
//! `UNTRACKED` again: a later home-page visit recreates the bookkeeping.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use rand::Rng;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use time::OffsetDateTime;
use tower_sessions::Session;

use crate::app::AppState;
use crate::entity::page_view;
use crate::error::AppError;

const VISITOR_ID_KEY: &str = "id";
const START_TIME_KEY: &str = "start_time";
const PREVIOUS_PAGE_KEY: &str = "previous_path";

/// Visitor ids are 7-digit numbers. No collision check is performed; for the
/// volumes this demo sees, collisions are an accepted limitation.
const VISITOR_ID_RANGE: std::ops::RangeInclusive<i32> = 1_000_000..=9_999_999;

/// A tracked page, identified by the label written into `PageView.page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    LearnMore,
}

impl Page {
    /// The human-readable label stored in the session and in `PageView`
    /// rows. Deliberately not the raw request path.
    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "HomePage",
            Page::LearnMore => "LearnMore",
        }
    }
}

/// What crossing a given path means to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Flush the pending interval, then start timing the named page.
    Enter(Page),
    /// Flush the pending interval, then delete the bookkeeping.
    End,
}

/// The complete transition table. Every path not listed here passes through
/// the tracker untouched, so dwell time across untracked navigation is
/// attributed to whichever tracked page bounds it.
const TRANSITIONS: &[(&str, Boundary)] = &[
    ("/", Boundary::Enter(Page::Home)),
    ("/learn_more", Boundary::Enter(Page::LearnMore)),
    ("/confirmation", Boundary::End),
];

impl Boundary {
    /// Looks up a request path in the transition table.
    pub fn for_path(path: &str) -> Option<Boundary> {
        TRANSITIONS
            .iter()
            .find(|(tracked, _)| *tracked == path)
            .map(|&(_, boundary)| boundary)
    }
}

/// Middleware that assigns a visitor id before any handler runs.
///
/// Draws a random 7-digit id into the session if one is not present yet.
/// Uniqueness is not checked against existing ids.
pub async fn assign_visitor_id(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if session.get::<i32>(VISITOR_ID_KEY).await?.is_none() {
        let id = rand::thread_rng().gen_range(VISITOR_ID_RANGE);
        session.insert(VISITOR_ID_KEY, id).await?;
    }

    Ok(next.run(request).await)
}

/// Middleware that applies the transition table to every response.
///
/// The path is captured before the handler runs; the transition is applied
/// after it produced the response, so the row for the *previous* page is
/// written while the response for the *current* one is already in hand.
pub async fn track_transition(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;

    match Boundary::for_path(&path) {
        Some(Boundary::Enter(page)) => {
            log_page_view(&state.db, &session).await?;
            session
                .insert(START_TIME_KEY, OffsetDateTime::now_utc())
                .await?;
            session.insert(PREVIOUS_PAGE_KEY, page.label()).await?;
        }
        Some(Boundary::End) => {
            log_page_view(&state.db, &session).await?;
            session.remove::<OffsetDateTime>(START_TIME_KEY).await?;
            session.remove::<String>(PREVIOUS_PAGE_KEY).await?;
        }
        None => {}
    }

    Ok(response)
}

/// The visitor id currently held in the session, if any.
pub async fn visitor_id(session: &Session) -> Result<Option<i32>, AppError> {
    Ok(session.get::<i32>(VISITOR_ID_KEY).await?)
}

/// Flushes the pending dwell interval into `PageView`.
///
/// Writes one row only when the session holds `id`, `start_time` and
/// `previous_path` simultaneously; an incomplete session (the first-ever
/// visit, or one that just crossed the terminal page) skips logging without
/// raising. The insert commits immediately, no batching.
async fn log_page_view(db: &DatabaseConnection, session: &Session) -> Result<(), AppError> {
    let (Some(visitor_id), Some(start_time), Some(page)) = (
        session.get::<i32>(VISITOR_ID_KEY).await?,
        session.get::<OffsetDateTime>(START_TIME_KEY).await?,
        session.get::<String>(PREVIOUS_PAGE_KEY).await?,
    ) else {
        return Ok(());
    };

    let time_spent = (OffsetDateTime::now_utc() - start_time).as_seconds_f64();

    let view = page_view::ActiveModel {
        session_id: Set(visitor_id),
        page: Set(page),
        time_spent: Set(time_spent),
        start_time: Set(start_time),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::debug!(visitor_id, page = %view.page, time_spent, "recorded page view");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_paths_map_to_their_boundaries() {
        assert_eq!(Boundary::for_path("/"), Some(Boundary::Enter(Page::Home)));
        assert_eq!(
            Boundary::for_path("/learn_more"),
            Some(Boundary::Enter(Page::LearnMore))
        );
        assert_eq!(Boundary::for_path("/confirmation"), Some(Boundary::End));
    }

    #[test]
    fn untracked_paths_are_ignored() {
        assert_eq!(Boundary::for_path("/log_binary"), None);
        assert_eq!(Boundary::for_path("/static/logo.png"), None);
        assert_eq!(Boundary::for_path("/learn_more/"), None);
        assert_eq!(Boundary::for_path(""), None);
    }

    #[test]
    fn labels_are_page_names_not_paths() {
        assert_eq!(Page::Home.label(), "HomePage");
        assert_eq!(Page::LearnMore.label(), "LearnMore");
    }
}
