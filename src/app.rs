//! App Core for ImageBrowser.
//!
//! Central struct holding the settings, the bookmark database and the
//! bookmark managers shared by every screen.

use std::rc::Rc;

use tracing::info;

use crate::database::connection::Database;
use crate::managers::bookmark_presenter::BookmarkPresenter;
use crate::managers::bookmark_store::BookmarkStore;
use crate::managers::image_feed::ImageFeed;
use crate::managers::image_membership::ImageMembership;
use crate::services::image_source::RemoteImageSource;
use crate::services::logging;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::settings::AppSettings;

/// Central application struct.
///
/// Image feeds are created per screen with [`App::image_feed`], since each
/// list or grid owns its own loaded pages.
pub struct App {
    pub settings: AppSettings,
    pub db: Rc<Database>,
    pub bookmark_store: Rc<BookmarkStore>,
    pub bookmarks: Rc<BookmarkPresenter>,
}

impl App {
    /// Loads settings (from `settings_path` or the platform default), starts
    /// logging and opens the bookmark database.
    pub fn new(settings_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut engine = SettingsEngine::new(settings_path);
        engine.load()?;
        engine.apply_env_overrides();
        logging::init(&engine.get_settings().logging.level);

        let db = Rc::new(Database::open(engine.database_path())?);
        if let Some(path) = db.path() {
            info!(path = %path.display(), "bookmark database opened");
        }

        Self::with_database(engine.get_settings().clone(), db)
    }

    /// Builds the app around an already opened database.
    pub fn with_database(
        settings: AppSettings,
        db: Rc<Database>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let bookmark_store = Rc::new(BookmarkStore::new(Rc::clone(&db))?);
        let bookmarks = BookmarkPresenter::new(Rc::clone(&bookmark_store));
        Ok(Self {
            settings,
            db,
            bookmark_store,
            bookmarks,
        })
    }

    /// Membership view for the detail screen of one image.
    pub fn image_membership(&self, regular_size_url: &str) -> Rc<ImageMembership> {
        ImageMembership::new(Rc::clone(&self.bookmark_store), regular_size_url)
    }

    pub fn image_feed<S: RemoteImageSource>(&self, source: S) -> ImageFeed<S> {
        ImageFeed::new(source, &self.settings)
    }
}
