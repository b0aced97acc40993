//! Binary entry point: resolve settings, start logging, open the database,
//! and drive the Ratatui event loop until the user exits. The store is closed
//! exactly once on the way out, whether the loop ended cleanly or not.
use anyhow::Context;
use student_registry::{logging, run_app, App, Controller, Settings, SqliteStore};

fn main() -> anyhow::Result<()> {
    let settings = Settings::resolve()?;
    settings.ensure_dirs()?;
    logging::init(&settings)?;

    let store = SqliteStore::open(settings.database_path()).with_context(|| {
        format!(
            "could not open the student database at {}",
            settings.database_path().display()
        )
    })?;

    let mut app = App::new(Controller::new(store));
    let result = run_app(&mut app);

    if let Err(err) = app.shutdown() {
        log::warn!("{err}");
    }
    result
}
