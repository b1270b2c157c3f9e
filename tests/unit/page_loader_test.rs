//! Unit tests for PageLoader: page derivation, single-flight loading and
//! failure handling, driven by an in-process image source.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use imagebrowser::managers::page_loader::{LoadOutcome, PageLoader, PageLoaderConfig};
use imagebrowser::services::image_source::RemoteImageSource;
use imagebrowser::types::errors::ImageError;
use imagebrowser::types::image::{ImageSort, RemoteImage};

/// Helper: image source that serves full pages, records every request and
/// can be switched into a failing mode.
#[derive(Default)]
struct MockSource {
    calls: AtomicUsize,
    requested: Mutex<Vec<u32>>,
    failing: AtomicBool,
    short_by: AtomicUsize,
}

impl MockSource {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

impl RemoteImageSource for MockSource {
    async fn fetch_page(
        &self,
        page: u32,
        per_page: usize,
        _order_by: ImageSort,
    ) -> Result<Vec<RemoteImage>, ImageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(page);
        // Suspend once so concurrent callers get a chance to run.
        tokio::task::yield_now().await;

        if self.failing.load(Ordering::SeqCst) {
            return Err(ImageError::Network("offline".to_string()));
        }
        let count = per_page.saturating_sub(self.short_by.load(Ordering::SeqCst));
        Ok((0..count)
            .map(|i| {
                RemoteImage::new(
                    Some(&format!("page {} item {}", page, i)),
                    &format!("https://images.example/{}/{}?ixid=1", page, i),
                )
            })
            .collect())
    }
}

fn loader(max_page: u32) -> PageLoader<MockSource> {
    PageLoader::new(
        MockSource::default(),
        PageLoaderConfig {
            max_page,
            order_by: ImageSort::Latest,
        },
    )
}

#[tokio::test]
async fn test_pages_follow_loaded_count() {
    let loader = loader(10_000);
    assert_eq!(loader.next_page(25), 1);

    let first = loader.load_next_page(25).await.unwrap();
    assert_eq!(
        first,
        LoadOutcome::Loaded {
            page: 1,
            removed: 0..0,
            inserted: 0..25
        }
    );
    assert_eq!(loader.next_page(25), 2);

    let second = loader.load_next_page(25).await.unwrap();
    assert_eq!(second.inserted(), Some(25..50));
    assert_eq!(second.removed(), Some(25..25));
    assert_eq!(loader.image_count(), 50);
    assert_eq!(loader.next_page(25), 3);
    assert_eq!(loader.source().requested(), vec![1, 2]);
}

#[tokio::test]
async fn test_concurrent_requests_fetch_once() {
    let loader = loader(10_000);

    let (a, b) = tokio::join!(loader.load_next_page(25), loader.load_next_page(25));

    let outcomes = [a.unwrap(), b.unwrap()];
    let loaded = outcomes
        .iter()
        .filter(|o| matches!(o, LoadOutcome::Loaded { .. }))
        .count();
    assert_eq!(loaded, 1);
    assert!(outcomes.contains(&LoadOutcome::Skipped));
    assert_eq!(loader.source().calls(), 1);
    assert_eq!(loader.image_count(), 25);
    assert!(!loader.is_loading());
}

#[tokio::test]
async fn test_refresh_while_loading_is_skipped() {
    let loader = loader(10_000);

    let (load, refresh) = tokio::join!(loader.load_next_page(25), loader.refresh(25));

    assert!(matches!(load.unwrap(), LoadOutcome::Loaded { page: 1, .. }));
    assert_eq!(refresh.unwrap(), LoadOutcome::Skipped);
    assert_eq!(loader.source().calls(), 1);
}

#[tokio::test]
async fn test_page_past_limit_is_refused_without_request() {
    let loader = loader(1);
    loader.load_next_page(25).await.unwrap();
    assert_eq!(loader.next_page(25), 2);

    let result = loader.load_next_page(25).await;

    assert!(matches!(
        result,
        Err(ImageError::PageLimitExceeded { page: 2, max: 1 })
    ));
    assert_eq!(loader.source().calls(), 1);
    assert_eq!(loader.image_count(), 25);
    assert!(!loader.is_loading());
}

#[tokio::test]
async fn test_failed_page_leaves_items_unchanged() {
    let loader = loader(10_000);
    loader.load_next_page(25).await.unwrap();
    let before = loader.loaded_items();

    loader.source().failing.store(true, Ordering::SeqCst);
    let result = loader.load_next_page(25).await;

    assert!(matches!(result, Err(ImageError::Network(_))));
    assert_eq!(loader.loaded_items(), before);
    assert!(!loader.is_loading());

    // The same page is requested again once the source recovers.
    loader.source().failing.store(false, Ordering::SeqCst);
    let retry = loader.load_next_page(25).await.unwrap();
    assert!(matches!(retry, LoadOutcome::Loaded { page: 2, .. }));
    assert_eq!(loader.source().requested(), vec![1, 2, 2]);
}

#[tokio::test]
async fn test_refresh_replaces_items() {
    let loader = loader(10_000);
    loader.load_next_page(25).await.unwrap();
    loader.load_next_page(25).await.unwrap();

    let outcome = loader.refresh(25).await.unwrap();

    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            page: 1,
            removed: 0..50,
            inserted: 0..25
        }
    );
    assert_eq!(loader.image_count(), 25);
    assert_eq!(loader.next_page(25), 2);
}

/// Helper: applies an outcome to a list of row labels the way a display
/// surface would, deleting `removed` and then inserting `inserted`.
fn apply_to_rows(rows: &mut Vec<String>, outcome: &LoadOutcome, loader: &PageLoader<MockSource>) {
    let (Some(removed), Some(inserted)) = (outcome.removed(), outcome.inserted()) else {
        return;
    };
    rows.drain(removed);
    for pos in inserted {
        let image = loader.image(pos).expect("inserted position must exist");
        rows.insert(pos, image.title().to_string());
    }
}

fn titles(loader: &PageLoader<MockSource>) -> Vec<String> {
    loader
        .loaded_items()
        .iter()
        .map(|i| i.title().to_string())
        .collect()
}

#[tokio::test]
async fn test_short_page_is_fetched_again_in_place() {
    let loader = loader(10_000);
    let mut rows = Vec::new();

    for short_by in [0, 5, 0] {
        loader.source().short_by.store(short_by, Ordering::SeqCst);
        let outcome = loader.load_next_page(25).await.unwrap();
        apply_to_rows(&mut rows, &outcome, &loader);
        assert_eq!(rows.len(), loader.image_count());
    }

    assert_eq!(loader.source().requested(), vec![1, 2, 2]);
    assert_eq!(loader.image_count(), 50);
    assert_eq!(rows, titles(&loader));
}

#[tokio::test]
async fn test_short_page_reload_reports_replaced_rows() {
    let loader = loader(10_000);
    loader.load_next_page(25).await.unwrap();
    loader.source().short_by.store(5, Ordering::SeqCst);
    loader.load_next_page(25).await.unwrap();
    assert_eq!(loader.image_count(), 45);
    assert_eq!(loader.next_page(25), 2);

    loader.source().short_by.store(0, Ordering::SeqCst);
    let outcome = loader.load_next_page(25).await.unwrap();

    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            page: 2,
            removed: 25..45,
            inserted: 25..50
        }
    );
}

#[tokio::test]
async fn test_load_page_zero_is_rejected_without_request() {
    let loader = loader(10_000);

    let result = loader.load_page(0, 25).await;

    assert!(matches!(result, Err(ImageError::PreconditionViolation(_))));
    assert_eq!(loader.source().calls(), 0);
    assert!(!loader.is_loading());
}

#[tokio::test]
async fn test_load_page_replaces_from_its_start() {
    let loader = loader(10_000);
    let mut rows = Vec::new();
    for _ in 0..3 {
        let outcome = loader.load_next_page(25).await.unwrap();
        apply_to_rows(&mut rows, &outcome, &loader);
    }

    let outcome = loader.load_page(2, 25).await.unwrap();
    apply_to_rows(&mut rows, &outcome, &loader);

    assert_eq!(outcome.removed(), Some(25..75));
    assert_eq!(outcome.inserted(), Some(25..50));
    assert_eq!(loader.image_count(), 50);
    assert_eq!(rows, titles(&loader));
    assert_eq!(loader.image(30).unwrap().title(), "page 2 item 5");
}

#[tokio::test]
async fn test_load_page_past_the_end_appends() {
    let loader = loader(10_000);
    loader.load_next_page(25).await.unwrap();

    let outcome = loader.load_page(4, 25).await.unwrap();

    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            page: 4,
            removed: 25..25,
            inserted: 25..50
        }
    );
}

#[tokio::test]
async fn test_zero_page_size_is_rejected() {
    let loader = loader(10_000);

    let result = loader.load_next_page(0).await;

    assert!(matches!(result, Err(ImageError::PreconditionViolation(_))));
    assert_eq!(loader.source().calls(), 0);
    assert!(!loader.is_loading());
}

#[tokio::test]
async fn test_state_snapshot() {
    let loader = loader(10_000);
    loader.load_next_page(10).await.unwrap();

    let state = loader.state();

    assert_eq!(state.loaded_items.len(), 10);
    assert!(!state.loading);
    assert_eq!(state.next_page(10), 2);
    assert_eq!(loader.image(0).unwrap().title(), "page 1 item 0");
    assert!(loader.image(10).is_none());
}

#[test]
fn test_config_defaults() {
    let config = PageLoaderConfig::default();
    assert_eq!(config.max_page, 10_000);
    assert_eq!(config.order_by, ImageSort::Latest);
}

#[test]
fn test_loader_keeps_its_config() {
    let loader = PageLoader::new(
        MockSource::default(),
        PageLoaderConfig {
            max_page: 7,
            order_by: ImageSort::Oldest,
        },
    );
    assert_eq!(loader.config().max_page, 7);
    assert_eq!(loader.config().order_by, ImageSort::Oldest);
}
