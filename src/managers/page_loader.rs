//! Paginated image loading for infinite scrolling.
//!
//! [`PageLoader`] owns the cumulative list of fetched images. At most one
//! page fetch is in flight at a time: a request made while another is running
//! returns [`LoadOutcome::Skipped`] immediately, without touching the network
//! or the list. The page to fetch next is always derived from the number of
//! loaded items, never stored.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::services::image_source::{check_page, RemoteImageSource};
use crate::types::errors::ImageError;
use crate::types::image::{ImageSort, RemoteImage};
use crate::types::settings::UnsplashSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLoaderConfig {
    pub max_page: u32,
    pub order_by: ImageSort,
}

impl Default for PageLoaderConfig {
    fn default() -> Self {
        Self::from(&UnsplashSettings::default())
    }
}

impl From<&UnsplashSettings> for PageLoaderConfig {
    fn from(settings: &UnsplashSettings) -> Self {
        Self {
            max_page: settings.max_page_number,
            order_by: settings.order_by,
        }
    }
}

/// Snapshot of the loader's state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadState {
    pub loaded_items: Vec<RemoteImage>,
    pub loading: bool,
}

impl LoadState {
    /// 1-based page that follows the loaded items.
    pub fn next_page(&self, page_size: usize) -> u32 {
        next_page_for(self.loaded_items.len(), page_size)
    }
}

/// Result of a load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched.
    ///
    /// `removed` are positions of the previous list that were dropped before
    /// the page went in (empty when the page is appended). `inserted` are the
    /// positions the page occupies afterwards. Deleting `removed` and then
    /// inserting `inserted` turns the old list into the new one.
    Loaded {
        page: u32,
        removed: Range<usize>,
        inserted: Range<usize>,
    },
    /// Another fetch was already running; nothing happened.
    Skipped,
}

impl LoadOutcome {
    pub fn inserted(&self) -> Option<Range<usize>> {
        match self {
            LoadOutcome::Loaded { inserted, .. } => Some(inserted.clone()),
            LoadOutcome::Skipped => None,
        }
    }

    pub fn removed(&self) -> Option<Range<usize>> {
        match self {
            LoadOutcome::Loaded { removed, .. } => Some(removed.clone()),
            LoadOutcome::Skipped => None,
        }
    }
}

fn next_page_for(count: usize, page_size: usize) -> u32 {
    (count / page_size.max(1)) as u32 + 1
}

/// Clears the loading flag when dropped, whatever the outcome.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct PageLoader<S> {
    source: S,
    config: PageLoaderConfig,
    items: Mutex<Vec<RemoteImage>>,
    loading: AtomicBool,
}

impl<S: RemoteImageSource> PageLoader<S> {
    pub fn new(source: S, config: PageLoaderConfig) -> Self {
        Self {
            source,
            config,
            items: Mutex::new(Vec::new()),
            loading: AtomicBool::new(false),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> PageLoaderConfig {
        self.config
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub fn image_count(&self) -> usize {
        self.items().len()
    }

    pub fn image(&self, index: usize) -> Option<RemoteImage> {
        self.items().get(index).cloned()
    }

    pub fn loaded_items(&self) -> Vec<RemoteImage> {
        self.items().clone()
    }

    pub fn next_page(&self, page_size: usize) -> u32 {
        next_page_for(self.image_count(), page_size)
    }

    pub fn state(&self) -> LoadState {
        LoadState {
            loaded_items: self.loaded_items(),
            loading: self.is_loading(),
        }
    }

    /// Fetches the page following the loaded items and appends it.
    pub async fn load_next_page(&self, page_size: usize) -> Result<LoadOutcome, ImageError> {
        check_page_size(page_size)?;
        let Some(_guard) = self.begin_loading() else {
            debug!("page fetch already in flight, ignoring request");
            return Ok(LoadOutcome::Skipped);
        };
        let page = self.next_page(page_size);
        self.fetch_and_apply(page, page_size).await
    }

    /// Fetches page 1 and replaces the loaded items with it.
    ///
    /// Returns [`LoadOutcome::Skipped`] straight away while another fetch is
    /// running, so a pull-to-refresh control can be ended without waiting.
    pub async fn refresh(&self, page_size: usize) -> Result<LoadOutcome, ImageError> {
        self.load_page(1, page_size).await
    }

    /// Fetches a specific page. Page 1 replaces the loaded items; a later page
    /// replaces everything from its first position onward.
    pub async fn load_page(&self, page: u32, page_size: usize) -> Result<LoadOutcome, ImageError> {
        check_page_size(page_size)?;
        let Some(_guard) = self.begin_loading() else {
            debug!(page, "page requested while a fetch is in flight");
            return Ok(LoadOutcome::Skipped);
        };
        self.fetch_and_apply(page, page_size).await
    }

    fn begin_loading(&self) -> Option<LoadingGuard<'_>> {
        self.loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard(&self.loading))
    }

    fn items(&self) -> MutexGuard<'_, Vec<RemoteImage>> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn fetch_and_apply(&self, page: u32, page_size: usize) -> Result<LoadOutcome, ImageError> {
        if let Err(e) = check_page(page, self.config.max_page) {
            warn!(page, error = %e, "page request refused");
            return Err(e);
        }

        debug!(page, page_size, "fetching image page");
        let fetched = match self
            .source
            .fetch_page(page, page_size, self.config.order_by)
            .await
        {
            Ok(images) => images,
            Err(e) => {
                warn!(page, error = %e, "failed to load images");
                return Err(e);
            }
        };

        let mut items = self.items();
        let previous_len = items.len();
        // A page re-fetched over loaded items (refresh, or a short page asked
        // for again) replaces everything from its first position onward.
        let start = ((page as usize - 1) * page_size).min(previous_len);
        items.truncate(start);
        items.extend(fetched);
        debug!(page, total = items.len(), "image page loaded");

        Ok(LoadOutcome::Loaded {
            page,
            removed: start..previous_len,
            inserted: start..items.len(),
        })
    }
}

fn check_page_size(page_size: usize) -> Result<(), ImageError> {
    if page_size == 0 {
        return Err(ImageError::PreconditionViolation(
            "page size must be at least 1".to_string(),
        ));
    }
    Ok(())
}
