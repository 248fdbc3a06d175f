//! Sign-in before browsing.

use std::env;

use tracing::warn;

use crate::catalog::{self, Catalog, Credentials};
use crate::error::Result;
use crate::input::{CommandPoller, LineSource};
use crate::ui::{LoginField, LoginView, Screen, Ui};

/// Credentials from `GPMCTL_EMAIL` / `GPMCTL_PASSWORD`, when both are set.
pub fn env_credentials() -> Option<Credentials> {
    let email = env::var("GPMCTL_EMAIL").ok()?;
    let secret = env::var("GPMCTL_PASSWORD").ok()?;
    Some(Credentials { email, secret })
}

/// Ask for an email and a password. `None` when the user interrupts.
pub fn prompt_credentials<L: LineSource>(
    poller: &mut CommandPoller<L>,
    ui: &mut dyn Ui,
) -> Result<Option<Credentials>> {
    ui.show(Screen::Login(LoginView {
        field: LoginField::Email,
        email: String::new(),
    }))?;
    let Some(email) = poller.read_text(&mut |p: &str| ui.echo(p))? else {
        return Ok(None);
    };
    let email = email.trim().to_string();

    ui.show(Screen::Login(LoginView {
        field: LoginField::Password,
        email: email.clone(),
    }))?;
    let Some(secret) = poller.read_text(&mut |p: &str| ui.echo(p))? else {
        return Ok(None);
    };

    Ok(Some(Credentials { email, secret }))
}

/// Sign in, prompting again each time the attempt budget runs out.
///
/// `preset` is tried first. Returns `false` when the user gave up at the prompt.
pub fn sign_in<L: LineSource>(
    catalog: &mut dyn Catalog,
    attempts: u32,
    preset: Option<Credentials>,
    poller: &mut CommandPoller<L>,
    ui: &mut dyn Ui,
) -> Result<bool> {
    let mut preset = preset;
    loop {
        let credentials = match preset.take() {
            Some(c) => c,
            None => match prompt_credentials(poller, ui)? {
                Some(c) => c,
                None => return Ok(false),
            },
        };

        match catalog::login(catalog, &credentials, attempts) {
            Ok(()) => return Ok(true),
            Err(e) => {
                warn!("Sign-in as {} failed: {}", credentials.email, e);
                ui.warn(&e.to_string());
            }
        }
    }
}
