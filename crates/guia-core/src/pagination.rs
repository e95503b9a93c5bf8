//! Cursor-driven "load more" over a listing connection.
//!
//! A [`PaginationController`] owns the accumulated collection for one
//! listing view. The first page is requested with [`PAGE_SIZE`] and no
//! cursor; every further page uses the `end_cursor` of the latest page and
//! is appended to the end of the collection.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::listing::{Listing, Page, PageInfo};

/// Listings requested per page.
pub const PAGE_SIZE: u32 = 6;

/// Anything that can fetch one page of the listing connection.
///
/// `Ok(None)` means the response carried no data for the connection; the
/// controller treats it as "nothing to merge".
pub trait PageSource: Send + Sync {
    type Error: std::fmt::Display + Send;

    fn fetch_page(
        &self,
        first: u32,
        after: Option<&str>,
    ) -> impl Future<Output = Result<Option<Page>, Self::Error>> + Send;
}

impl<T: PageSource> PageSource for Arc<T> {
    type Error = T::Error;

    fn fetch_page(
        &self,
        first: u32,
        after: Option<&str>,
    ) -> impl Future<Output = Result<Option<Page>, Self::Error>> + Send {
        (**self).fetch_page(first, after)
    }
}

/// Where the initial load of a listing view stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingPhase {
    /// No page has arrived yet.
    Loading,
    Ready,
    /// The initial request failed; holds the error message.
    Failed(String),
}

/// What a call to [`PaginationController::load_more`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreOutcome {
    /// A page arrived; this many listings were appended.
    Appended(usize),
    /// The response had no data; nothing changed.
    NoData,
    /// The latest page reported `has_next_page = false`.
    Exhausted,
    /// Another next-page request is still in flight.
    AlreadyPending,
    /// The initial page has not been loaded yet.
    NotReady,
}

/// Copy of the controller state taken for rendering.
#[derive(Debug, Clone)]
pub struct PaginationSnapshot {
    pub phase: ListingPhase,
    pub listings: Vec<Listing>,
    pub page_info: PageInfo,
    pub fetching_more: bool,
    /// Message of the most recent failed "load more", cleared by the next
    /// successful one.
    pub load_more_error: Option<String>,
}

impl PaginationSnapshot {
    /// `true` when a "load more" control should be offered.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.phase == ListingPhase::Ready && self.page_info.has_next_page
    }
}

/// Appends `next` to `previous` and adopts its pagination state.
///
/// A missing page leaves `previous` untouched.
#[must_use]
pub fn merge_page(previous: Page, next: Option<Page>) -> Page {
    let Some(next) = next else {
        return previous;
    };

    let mut listings = previous.listings;
    listings.extend(next.listings);
    Page {
        listings,
        page_info: next.page_info,
    }
}

struct ControllerState {
    phase: ListingPhase,
    accumulated: Page,
    load_more_error: Option<String>,
}

/// Releases the in-flight flag when the fetch finishes or its future is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct PaginationController<S> {
    source: S,
    state: Mutex<ControllerState>,
    initial_load: Mutex<()>,
    fetching_more: AtomicBool,
}

impl<S: PageSource> PaginationController<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(ControllerState {
                phase: ListingPhase::Loading,
                accumulated: Page::default(),
                load_more_error: None,
            }),
            initial_load: Mutex::new(()),
            fetching_more: AtomicBool::new(false),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Issues the first-page request unless it already succeeded.
    ///
    /// Only one initial request runs at a time: a caller arriving while
    /// another one is in flight gets [`ListingPhase::Loading`] back right
    /// away. A previous failure is retried, since every call corresponds to
    /// the view being opened again.
    pub async fn ensure_loaded(&self) -> ListingPhase {
        if self.state.lock().await.phase == ListingPhase::Ready {
            return ListingPhase::Ready;
        }

        let Ok(_gate) = self.initial_load.try_lock() else {
            return ListingPhase::Loading;
        };

        {
            let mut state = self.state.lock().await;
            if state.phase == ListingPhase::Ready {
                return ListingPhase::Ready;
            }
            state.phase = ListingPhase::Loading;
        }

        let result = self.source.fetch_page(PAGE_SIZE, None).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(page) => {
                let page = page.unwrap_or_default();
                tracing::debug!(
                    listings = page.listings.len(),
                    has_next_page = page.page_info.has_next_page,
                    "initial listing page loaded"
                );
                state.accumulated = page;
                state.phase = ListingPhase::Ready;
            }
            Err(err) => {
                tracing::warn!(error = %err, "initial listing page failed");
                state.phase = ListingPhase::Failed(err.to_string());
            }
        }
        state.phase.clone()
    }

    /// Requests the page after the current `end_cursor` and appends it.
    ///
    /// # Errors
    ///
    /// Returns the source error when the request fails. The collection and
    /// pagination state are left exactly as they were.
    pub async fn load_more(&self) -> Result<LoadMoreOutcome, S::Error> {
        // Claimed before the cursor is read so two callers can never
        // request the same page.
        if self.fetching_more.swap(true, Ordering::AcqRel) {
            return Ok(LoadMoreOutcome::AlreadyPending);
        }
        let _in_flight = InFlight(&self.fetching_more);

        let cursor = {
            let state = self.state.lock().await;
            if state.phase != ListingPhase::Ready {
                return Ok(LoadMoreOutcome::NotReady);
            }
            if !state.accumulated.page_info.has_next_page {
                return Ok(LoadMoreOutcome::Exhausted);
            }
            state.accumulated.page_info.end_cursor.clone()
        };

        let result = self.source.fetch_page(PAGE_SIZE, cursor.as_deref()).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(Some(page)) => {
                let appended = page.listings.len();
                let previous = std::mem::take(&mut state.accumulated);
                state.accumulated = merge_page(previous, Some(page));
                state.load_more_error = None;
                tracing::debug!(
                    appended,
                    total = state.accumulated.listings.len(),
                    "listing page appended"
                );
                Ok(LoadMoreOutcome::Appended(appended))
            }
            Ok(None) => {
                tracing::debug!("next listing page carried no data");
                Ok(LoadMoreOutcome::NoData)
            }
            Err(err) => {
                tracing::warn!(error = %err, "next listing page failed");
                state.load_more_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn snapshot(&self) -> PaginationSnapshot {
        let state = self.state.lock().await;
        PaginationSnapshot {
            phase: state.phase.clone(),
            listings: state.accumulated.listings.clone(),
            page_info: state.accumulated.page_info.clone(),
            fetching_more: self.fetching_more.load(Ordering::Acquire),
            load_more_error: state.load_more_error.clone(),
        }
    }
}

#[cfg(test)]
#[path = "pagination_test.rs"]
mod tests;
