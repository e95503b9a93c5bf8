use std::collections::VecDeque;
use std::sync::Mutex as StdMutex;

use tokio::sync::Notify;

use super::*;

#[derive(Debug)]
struct FakeError(&'static str);

impl std::fmt::Display for FakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

type Scripted = Result<Option<Page>, FakeError>;

/// Replays scripted responses in order and records the variables it saw.
#[derive(Default)]
struct ScriptedSource {
    responses: StdMutex<VecDeque<Scripted>>,
    calls: StdMutex<Vec<(u32, Option<String>)>>,
}

impl ScriptedSource {
    fn new(responses: Vec<Scripted>) -> Self {
        Self {
            responses: StdMutex::new(responses.into()),
            calls: StdMutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(u32, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PageSource for ScriptedSource {
    type Error = FakeError;

    async fn fetch_page(&self, first: u32, after: Option<&str>) -> Result<Option<Page>, FakeError> {
        self.calls
            .lock()
            .unwrap()
            .push((first, after.map(str::to_owned)));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(FakeError("no scripted response left")))
    }
}

fn listings(prefix: &str, count: usize) -> Vec<Listing> {
    (0..count)
        .map(|i| Listing {
            slug: format!("{prefix}-{i}"),
            title: format!("{prefix} {i}"),
            ..Listing::default()
        })
        .collect()
}

fn page(prefix: &str, count: usize, has_next_page: bool, cursor: Option<&str>) -> Page {
    Page {
        listings: listings(prefix, count),
        page_info: PageInfo {
            has_next_page,
            end_cursor: cursor.map(str::to_owned),
        },
    }
}

#[test]
fn merge_page_appends_and_adopts_page_info() {
    let merged = merge_page(
        page("a", 2, true, Some("c1")),
        Some(page("b", 1, false, Some("c2"))),
    );
    let slugs: Vec<_> = merged.listings.iter().map(|l| l.slug.as_str()).collect();
    assert_eq!(slugs, vec!["a-0", "a-1", "b-0"]);
    assert!(!merged.page_info.has_next_page);
    assert_eq!(merged.page_info.end_cursor.as_deref(), Some("c2"));
}

#[test]
fn merge_page_without_data_keeps_previous() {
    let previous = page("a", 2, true, Some("c1"));
    assert_eq!(merge_page(previous.clone(), None), previous);
}

#[test]
fn merge_page_keeps_duplicate_slugs() {
    let merged = merge_page(page("a", 2, true, Some("c1")), Some(page("a", 1, true, Some("c2"))));
    assert_eq!(merged.listings.len(), 3);
    assert_eq!(merged.listings[0].slug, merged.listings[2].slug);
}

#[tokio::test]
async fn initial_load_requests_first_page_without_cursor() {
    let controller = PaginationController::new(ScriptedSource::new(vec![Ok(Some(page(
        "a",
        6,
        true,
        Some("c1"),
    )))]));

    assert_eq!(controller.ensure_loaded().await, ListingPhase::Ready);
    assert_eq!(controller.source().calls(), vec![(PAGE_SIZE, None)]);

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.listings.len(), 6);
    assert!(snapshot.can_load_more());
}

#[tokio::test]
async fn ensure_loaded_does_not_refetch_once_ready() {
    let controller =
        PaginationController::new(ScriptedSource::new(vec![Ok(Some(page("a", 1, false, None)))]));

    controller.ensure_loaded().await;
    controller.ensure_loaded().await;
    assert_eq!(controller.source().calls().len(), 1);
}

#[tokio::test]
async fn six_then_three_accumulates_nine_and_disables_load_more() {
    let controller = PaginationController::new(ScriptedSource::new(vec![
        Ok(Some(page("a", 6, true, Some("cursor-1")))),
        Ok(Some(page("b", 3, false, Some("cursor-2")))),
        Ok(None),
    ]));

    controller.ensure_loaded().await;
    let outcome = controller.load_more().await.expect("second page");
    assert_eq!(outcome, LoadMoreOutcome::Appended(3));

    let calls = controller.source().calls();
    assert_eq!(calls[1], (PAGE_SIZE, Some("cursor-1".to_owned())));

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.listings.len(), 9);
    assert_eq!(snapshot.listings[6].slug, "b-0");
    assert!(!snapshot.can_load_more());

    let outcome = controller.load_more().await.expect("exhausted is not an error");
    assert_eq!(outcome, LoadMoreOutcome::Exhausted);
    assert_eq!(controller.source().calls().len(), 2);
}

#[tokio::test]
async fn load_more_without_data_leaves_collection_unchanged() {
    let controller = PaginationController::new(ScriptedSource::new(vec![
        Ok(Some(page("a", 6, true, Some("cursor-1")))),
        Ok(Some(page("b", 3, true, Some("cursor-2")))),
        Ok(None),
    ]));

    controller.ensure_loaded().await;
    controller.load_more().await.expect("second page");
    let before = controller.snapshot().await;

    let outcome = controller.load_more().await.expect("empty response");
    assert_eq!(outcome, LoadMoreOutcome::NoData);

    let after = controller.snapshot().await;
    assert_eq!(after.listings, before.listings);
    assert_eq!(after.listings.len(), 9);
    assert_eq!(after.page_info, before.page_info);
}

#[tokio::test]
async fn failed_load_more_keeps_state_and_records_error() {
    let controller = PaginationController::new(ScriptedSource::new(vec![
        Ok(Some(page("a", 6, true, Some("cursor-1")))),
        Err(FakeError("backend down")),
        Ok(Some(page("b", 2, false, None))),
    ]));

    controller.ensure_loaded().await;
    let err = controller.load_more().await.expect_err("should fail");
    assert_eq!(err.to_string(), "backend down");

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.listings.len(), 6);
    assert_eq!(snapshot.page_info.end_cursor.as_deref(), Some("cursor-1"));
    assert_eq!(snapshot.load_more_error.as_deref(), Some("backend down"));
    assert!(!snapshot.fetching_more);

    controller.load_more().await.expect("retry by user");
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.listings.len(), 8);
    assert!(snapshot.load_more_error.is_none());
    assert_eq!(
        controller.source().calls()[2],
        (PAGE_SIZE, Some("cursor-1".to_owned()))
    );
}

#[tokio::test]
async fn initial_failure_is_reported_and_retried_on_next_open() {
    let controller = PaginationController::new(ScriptedSource::new(vec![
        Err(FakeError("connection refused")),
        Ok(Some(page("a", 2, false, None))),
    ]));

    assert_eq!(
        controller.ensure_loaded().await,
        ListingPhase::Failed("connection refused".to_owned())
    );
    assert_eq!(
        controller.snapshot().await.phase,
        ListingPhase::Failed("connection refused".to_owned())
    );
    assert_eq!(
        controller.load_more().await.expect("not ready"),
        LoadMoreOutcome::NotReady
    );

    assert_eq!(controller.ensure_loaded().await, ListingPhase::Ready);
    assert_eq!(controller.snapshot().await.listings.len(), 2);
}

#[tokio::test]
async fn empty_initial_response_is_an_empty_ready_collection() {
    let controller = PaginationController::new(ScriptedSource::new(vec![Ok(None)]));
    assert_eq!(controller.ensure_loaded().await, ListingPhase::Ready);
    let snapshot = controller.snapshot().await;
    assert!(snapshot.listings.is_empty());
    assert!(!snapshot.can_load_more());
}

/// Holds every cursor-bearing request until released.
struct GatedSource {
    release: Notify,
}

impl PageSource for GatedSource {
    type Error = FakeError;

    async fn fetch_page(&self, _first: u32, after: Option<&str>) -> Result<Option<Page>, FakeError> {
        if after.is_none() {
            return Ok(Some(page("a", 6, true, Some("cursor-1"))));
        }
        self.release.notified().await;
        Ok(Some(page("b", 3, false, None)))
    }
}

#[tokio::test]
async fn concurrent_load_more_is_rejected_while_pending() {
    let controller = Arc::new(PaginationController::new(GatedSource {
        release: Notify::new(),
    }));
    controller.ensure_loaded().await;

    let first = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.load_more().await })
    };

    while !controller.snapshot().await.fetching_more {
        tokio::task::yield_now().await;
    }

    let second = controller.load_more().await.expect("no error");
    assert_eq!(second, LoadMoreOutcome::AlreadyPending);

    controller.source().release.notify_one();
    let first = first.await.expect("task").expect("fetch");
    assert_eq!(first, LoadMoreOutcome::Appended(3));

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.listings.len(), 9);
    assert!(!snapshot.fetching_more);
}

#[tokio::test]
async fn dropped_load_more_releases_in_flight_flag() {
    let controller = PaginationController::new(GatedSource {
        release: Notify::new(),
    });
    controller.ensure_loaded().await;

    let pending = tokio::time::timeout(
        std::time::Duration::from_millis(20),
        controller.load_more(),
    )
    .await;
    assert!(pending.is_err(), "fetch should still be gated");

    let snapshot = controller.snapshot().await;
    assert!(!snapshot.fetching_more);
    assert_eq!(snapshot.listings.len(), 6);
}
