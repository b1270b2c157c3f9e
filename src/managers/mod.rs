// ImageBrowser state managers
// Managers hold the stateful core: bookmark storage and its change propagation, paged image loading.

pub mod bookmark_presenter;
pub mod bookmark_store;
pub mod change_bus;
pub mod image_feed;
pub mod image_membership;
pub mod page_loader;
pub mod scroll_trigger;
