//! Per-visitor listing state.
//!
//! Each browser gets a `guia_session` cookie naming its own
//! [`PaginationController`]. Controllers idle past the configured time are
//! evicted, and with them the accumulated collection.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderMap};
use guia_core::PaginationController;
use guia_graphql::GraphqlClient;
use moka::sync::Cache;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "guia_session";

pub type ListingController = PaginationController<Arc<GraphqlClient>>;

#[derive(Clone)]
pub struct SessionStore {
    client: Arc<GraphqlClient>,
    sessions: Cache<Uuid, Arc<ListingController>>,
}

impl SessionStore {
    pub fn new(client: Arc<GraphqlClient>, idle: Duration, max_sessions: u64) -> Self {
        let sessions = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle)
            .build();
        Self { client, sessions }
    }

    /// Returns the controller for `id`, creating a fresh session when the
    /// id is missing or has expired. The flag is `true` for a new session.
    pub fn resolve(&self, id: Option<Uuid>) -> (Uuid, Arc<ListingController>, bool) {
        if let Some(id) = id {
            if let Some(controller) = self.sessions.get(&id) {
                return (id, controller, false);
            }
        }

        let id = Uuid::new_v4();
        let controller = Arc::new(PaginationController::new(Arc::clone(&self.client)));
        self.sessions.insert(id, Arc::clone(&controller));
        tracing::debug!(session = %id, "listing session created");
        (id, controller, true)
    }

    /// Existing session only; never creates one.
    pub fn get(&self, id: Uuid) -> Option<Arc<ListingController>> {
        self.sessions.get(&id)
    }

    pub fn active_sessions(&self) -> u64 {
        self.sessions.run_pending_tasks();
        self.sessions.entry_count()
    }
}

/// Session id from the `Cookie` headers, if present and well-formed.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .find_map(|value| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value for a session. No `Max-Age`: the cookie ends with the
/// browser session, the server side ends with the idle timeout.
pub fn session_cookie(id: Uuid, secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax{secure}")
}
