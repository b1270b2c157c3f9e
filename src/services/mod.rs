// ImageBrowser services
// Services talk to the outside world: the remote photo API, settings on disk, logging.

pub mod image_source;
pub mod logging;
pub mod settings_engine;
pub mod url_templates;

#[cfg(feature = "network")]
pub mod unsplash_client;
