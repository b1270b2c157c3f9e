//! ImageBrowser: an infinite-scroll photo browser with local bookmarks.
//!
//! Console demo: shows the stored bookmarks, exercises change propagation on a
//! scratch database and, when an access key is configured, pages through the
//! remote photo feed. An optional first argument overrides the settings path.

use std::error::Error;
use std::rc::Rc;

use imagebrowser::app::App;
use imagebrowser::database::Database;
use imagebrowser::managers::bookmark_store::BookmarkStoreTrait;
use imagebrowser::types::change::ChangeEvent;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let app = App::new(std::env::args().nth(1))?;

    println!();
    println!("ImageBrowser v{} (demo mode)", env!("CARGO_PKG_VERSION"));
    println!();

    demo_stored_bookmarks(&app);
    demo_change_propagation(&app)?;
    demo_feed(&app)?;

    Ok(())
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn demo_stored_bookmarks(app: &App) {
    section("Stored bookmarks");
    let count = app.bookmarks.image_count();
    println!("  {} bookmark(s)", count);
    for index in 0..count {
        println!(
            "  [{}] {} — {}",
            index,
            app.bookmarks.title(index),
            app.bookmarks.regular_size_url(index)
        );
    }
    println!();
}

fn demo_change_propagation(app: &App) -> Result<(), Box<dyn Error>> {
    section("Change propagation (scratch database)");

    let scratch = App::with_database(app.settings.clone(), Rc::new(Database::open_in_memory()?))?;
    let presenter = Rc::clone(&scratch.bookmarks);
    let observer = Rc::downgrade(&presenter);
    presenter.changes().subscribe(move |event| match event {
        ChangeEvent::BeginBatch => println!("  begin updates"),
        ChangeEvent::Insert(pos) => println!("    insert row {}", pos),
        ChangeEvent::Delete(pos) => println!("    delete row {}", pos),
        ChangeEvent::EndBatch => {
            if let Some(p) = observer.upgrade() {
                println!(
                    "  end updates: {} row(s), edit {}",
                    p.image_count(),
                    if p.edit_enabled() { "enabled" } else { "disabled" }
                );
            }
        }
    });

    let membership = scratch.image_membership("https://images.example/b?fm=jpg");
    membership.toggle_add(Some("second"), "https://images.example/b?w=200")?;
    scratch
        .bookmark_store
        .add(Some("first"), "https://images.example/a?fm=jpg", "https://images.example/a?w=200")?;
    println!("  detail screen bookmarked: {}", membership.is_bookmarked());

    presenter.delete_bookmarks(&[0, 1])?;
    println!("  detail screen bookmarked: {}", membership.is_bookmarked());
    println!();
    Ok(())
}

#[cfg(feature = "network")]
fn demo_feed(app: &App) -> Result<(), Box<dyn Error>> {
    use imagebrowser::managers::image_feed::LoadingIndicator;
    use imagebrowser::services::unsplash_client::UnsplashClient;

    struct Console;

    impl LoadingIndicator for Console {
        fn show_busy(&self, message: &str) {
            println!("  {}", message);
        }
        fn hide_busy(&self) {}
    }

    section("Remote feed");
    if app.settings.unsplash.access_key.is_empty() {
        println!("  No access key configured (set UNSPLASH_ACCESS_KEY); skipping.");
        println!();
        return Ok(());
    }

    let feed = app.image_feed(UnsplashClient::new(&app.settings.unsplash)?);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let first = feed.initial_load(&Console).await?;
        println!("  page 1: {:?}", first.inserted());

        // Scrolling to the last loaded item fires the trigger.
        let last = feed.image_count().saturating_sub(1);
        let next = feed.item_will_display(last, &Console).await?;
        println!("  next page: {:?}", next.inserted());
        Ok::<(), imagebrowser::types::errors::ImageError>(())
    })?;

    for index in 0..feed.image_count().min(5) {
        println!("  [{}] {}", index, feed.title(index));
        println!("       {}", feed.small_thumb_size_url(index));
    }
    println!();
    Ok(())
}

#[cfg(not(feature = "network"))]
fn demo_feed(_app: &App) -> Result<(), Box<dyn Error>> {
    section("Remote feed");
    println!("  Built without the `network` feature; skipping.");
    println!();
    Ok(())
}
