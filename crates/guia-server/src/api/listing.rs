use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
    Form,
};

use crate::form::{listing_href, parse_filter, FormPairs};
use crate::session::{session_cookie, session_id_from_headers};
use crate::views::listing::ListingView;

use super::AppState;

/// `GET /`: the listing for this visitor's session, narrowed by the query.
pub(super) async fn listing_page(
    State(state): State<AppState>,
    Query(pairs): Query<FormPairs>,
    headers: HeaderMap,
) -> Response {
    let filter = parse_filter(pairs);
    let (id, session, created) = state
        .sessions
        .resolve(session_id_from_headers(&headers));

    session.ensure_loaded().await;
    let snapshot = session.snapshot().await;

    let mut response = ListingView::build(&snapshot, &filter).respond(listing_href(&filter));
    if created {
        match HeaderValue::from_str(&session_cookie(id, state.secure_cookies)) {
            Ok(value) => {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!(error = %e, "invalid session cookie value"),
        }
    }
    response
}

/// `POST /more`: fetch the next page, then send the visitor back to `/`
/// with the filter they had.
pub(super) async fn load_more(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(pairs): Form<FormPairs>,
) -> impl IntoResponse {
    let filter = parse_filter(pairs);
    let target = listing_href(&filter);

    let Some(session) = session_id_from_headers(&headers).and_then(|id| state.sessions.get(id))
    else {
        tracing::debug!("load more without a live session");
        return Redirect::to(&target);
    };

    // Run detached so a navigation away does not cancel a page that is
    // already on its way.
    let task = tokio::spawn(async move { session.load_more().await });
    match task.await {
        Ok(Ok(outcome)) => tracing::debug!(?outcome, "load more finished"),
        Ok(Err(e)) => tracing::debug!(error = %e, "load more failed"),
        Err(e) => tracing::error!(error = %e, "load more task failed"),
    }

    Redirect::to(&target)
}
