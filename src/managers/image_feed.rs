//! Image feed controller for list and grid screens.
//!
//! Ties a [`PageLoader`] to a [`ScrollTrigger`] and drives the busy and
//! refresh indicators the display surface exposes through
//! [`LoadingIndicator`]. The feed never owns any UI itself.

use tracing::debug;

use crate::managers::page_loader::{LoadOutcome, PageLoader, PageLoaderConfig};
use crate::managers::scroll_trigger::ScrollTrigger;
use crate::services::image_source::RemoteImageSource;
use crate::types::errors::ImageError;
use crate::types::image::RemoteImage;
use crate::types::settings::AppSettings;

/// Busy/refresh indicators provided by the display surface.
pub trait LoadingIndicator {
    fn show_busy(&self, message: &str);
    fn hide_busy(&self);
    /// Ends a pull-to-refresh animation.
    fn end_refreshing(&self) {}
}

pub struct ImageFeed<S> {
    loader: PageLoader<S>,
    trigger: ScrollTrigger,
    page_size: usize,
}

impl<S: RemoteImageSource> ImageFeed<S> {
    pub fn new(source: S, settings: &AppSettings) -> Self {
        Self::with_parts(
            PageLoader::new(source, PageLoaderConfig::from(&settings.unsplash)),
            ScrollTrigger::new(settings.feed.trigger_fraction),
            settings.page_size(),
        )
    }

    pub fn with_parts(loader: PageLoader<S>, trigger: ScrollTrigger, page_size: usize) -> Self {
        Self {
            loader,
            trigger,
            page_size,
        }
    }

    pub fn loader(&self) -> &PageLoader<S> {
        &self.loader
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// First fetch when the screen appears.
    pub async fn initial_load(
        &self,
        indicator: &dyn LoadingIndicator,
    ) -> Result<LoadOutcome, ImageError> {
        indicator.show_busy("Loading ...");
        let result = self.loader.refresh(self.page_size).await;
        indicator.hide_busy();
        result
    }

    /// Called as item `index` is about to become visible. Fetches the next
    /// page when the scroll trigger fires; otherwise returns `Skipped`.
    pub async fn item_will_display(
        &self,
        index: usize,
        indicator: &dyn LoadingIndicator,
    ) -> Result<LoadOutcome, ImageError> {
        let count = self.loader.image_count();
        if !self.trigger.should_load(index, count, self.loader.is_loading()) {
            return Ok(LoadOutcome::Skipped);
        }

        debug!(index, count, "scroll trigger fired");
        indicator.show_busy("Fetching ...");
        let result = self.loader.load_next_page(self.page_size).await;
        indicator.hide_busy();
        result
    }

    /// Pull-to-refresh. While a fetch is running only the refresh control is
    /// ended; otherwise page 1 is reloaded.
    pub async fn refresh(
        &self,
        indicator: &dyn LoadingIndicator,
    ) -> Result<LoadOutcome, ImageError> {
        if self.loader.is_loading() {
            indicator.end_refreshing();
            return Ok(LoadOutcome::Skipped);
        }

        indicator.show_busy("Loading ...");
        let result = self.loader.refresh(self.page_size).await;
        indicator.end_refreshing();
        indicator.hide_busy();
        result
    }

    pub fn image_count(&self) -> usize {
        self.loader.image_count()
    }

    pub fn image(&self, index: usize) -> Option<RemoteImage> {
        self.loader.image(index)
    }

    pub fn title(&self, index: usize) -> String {
        self.image(index)
            .map(|i| i.title().to_string())
            .unwrap_or_default()
    }

    pub fn regular_size_url(&self, index: usize) -> String {
        self.image(index).map(|i| i.urls().regular).unwrap_or_default()
    }

    pub fn small_thumb_size_url(&self, index: usize) -> String {
        self.image(index)
            .map(|i| i.urls().small_thumb)
            .unwrap_or_default()
    }

    pub fn large_thumb_size_url(&self, index: usize) -> String {
        self.image(index)
            .map(|i| i.urls().large_thumb)
            .unwrap_or_default()
    }
}
