//! The settings workflow, the only place [`SessionSettings`] changes

use crypta_core::{CryptaError, CryptaResult, SessionSettings};
use crypta_crypto::{KeyRole, PrimitiveProvider};

use crate::interaction::{Interaction, Notice};
use crate::prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    ChangeOutputDir,
    ChoosePrivateKey,
    ClearPrivateKey,
    Show,
    Back,
}

impl SettingsAction {
    pub const ALL: [SettingsAction; 5] = [
        SettingsAction::ChangeOutputDir,
        SettingsAction::ChoosePrivateKey,
        SettingsAction::ClearPrivateKey,
        SettingsAction::Show,
        SettingsAction::Back,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsAction::ChangeOutputDir => "Change output directory",
            SettingsAction::ChoosePrivateKey => "Choose private key",
            SettingsAction::ClearPrivateKey => "Clear private key",
            SettingsAction::Show => "Show current settings",
            SettingsAction::Back => "Back",
        }
    }
}

pub fn describe(settings: &SessionSettings) -> String {
    let key = settings
        .private_key
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    format!(
        "Output directory: {}\nPrivate key:      {key}",
        settings.output_dir.display()
    )
}

/// Apply one action. Returns `false` once the user goes back.
pub fn apply(
    action: SettingsAction,
    provider: &dyn PrimitiveProvider,
    io: &mut dyn Interaction,
    settings: &mut SessionSettings,
) -> CryptaResult<bool> {
    match action {
        SettingsAction::ChangeOutputDir => {
            let dir = prompt::ask_existing_dir(io, "New output directory")?;
            tracing::info!(dir = %dir.display(), "output directory changed");
            io.tell(Notice::Success, &format!("Output directory: {}", dir.display()));
            settings.output_dir = dir;
        }
        SettingsAction::ChoosePrivateKey => {
            let key = prompt::ask_key_file(io, provider, "Your private key (PEM)", KeyRole::Private)?;
            tracing::info!(key = %key.path.display(), "private key selected");
            io.tell(Notice::Success, &format!("Private key: {}", key.path.display()));
            settings.private_key = Some(key.path);
        }
        SettingsAction::ClearPrivateKey => {
            settings.private_key = None;
            io.tell(Notice::Info, "Private key cleared");
        }
        SettingsAction::Show => io.tell(Notice::Info, &describe(settings)),
        SettingsAction::Back => return Ok(false),
    }
    Ok(true)
}

/// Loop over the settings menu until the user goes back or cancels it.
///
/// Cancelling or failing inside one action returns to the settings menu with
/// the settings unchanged.
pub fn run(
    provider: &dyn PrimitiveProvider,
    io: &mut dyn Interaction,
    settings: &mut SessionSettings,
) -> CryptaResult<()> {
    loop {
        let action = match prompt::choose_from(io, "Settings", &SettingsAction::ALL, |a| {
            a.label().to_string()
        }) {
            Ok(action) => action,
            Err(CryptaError::Cancelled) => return Ok(()),
            Err(e) => return Err(e),
        };

        match apply(action, provider, io, settings) {
            Ok(true) => {}
            Ok(false) => return Ok(()),
            Err(CryptaError::Cancelled) => io.tell(Notice::Info, "Cancelled"),
            Err(CryptaError::Validation(msg)) => io.tell(Notice::Failure, &msg),
            Err(e) => return Err(e),
        }
    }
}
