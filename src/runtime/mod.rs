use std::env;

use tracing::{info, warn};

use crate::catalog::{Catalog, HttpCatalog};
use crate::config::SourceSetting;
use crate::engine::RodioEngine;
use crate::fetcher::StreamFetcher;
use crate::input::{CommandPoller, TerminalInput};
use crate::logging;
use crate::session::SessionContext;
use crate::ui::TerminalUi;

mod login;
mod session_loop;
mod settings;
mod sources;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    if let Err(e) = logging::init(&settings.log) {
        eprintln!("gpmctl: logging disabled: {e}");
    }

    let mode = env::args()
        .nth(1)
        .map(|arg| {
            SourceSetting::from_arg(&arg).unwrap_or_else(|| {
                warn!("Unknown mode {:?}, using {:?}", arg, settings.browse.source);
                settings.browse.source
            })
        })
        .unwrap_or(settings.browse.source);
    let source = sources::for_setting(mode);

    let mut catalog = HttpCatalog::new(&settings.catalog);
    let mut engine = RodioEngine::open_default()?;
    let fetcher = StreamFetcher::new();
    let mut poller = CommandPoller::new(TerminalInput::new(), settings.playback.interval());

    let mut ui = TerminalUi::enter()?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let signed_in = login::sign_in(
            &mut catalog,
            settings.catalog.login_attempts,
            login::env_credentials(),
            &mut poller,
            &mut ui,
        )?;
        if !signed_in {
            return Ok(());
        }

        let mut ctx = SessionContext {
            catalog: &catalog,
            fetcher: &fetcher,
            engine: &mut engine,
            poller: &mut poller,
            ui: &mut ui,
        };
        let end = session_loop::run(source.as_ref(), &settings.playback, &mut ctx)?;
        info!("Leaving after {:?}", end);
        Ok(())
    })();

    catalog.logout();
    ui.leave()?;
    println!("\nGood bye");

    run_result
}
