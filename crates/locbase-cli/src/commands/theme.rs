//! Theme command - read or change the dark-mode preference.

use anyhow::{Context, Result};

use locbase_store::Preferences;

use crate::cli::ThemeAction;

/// Dark-mode value after applying `action` to `current`.
fn resolve(action: ThemeAction, current: bool) -> bool {
    match action {
        ThemeAction::Show => current,
        ThemeAction::Toggle => !current,
        ThemeAction::Dark => true,
        ThemeAction::Light => false,
    }
}

/// Execute the theme command.
pub async fn cmd_theme(prefs: &Preferences, action: ThemeAction) -> Result<()> {
    let current = prefs
        .dark_mode()
        .await
        .context("Failed to read preferences")?;
    let enabled = resolve(action, current);

    if action != ThemeAction::Show {
        prefs
            .set_dark_mode(enabled)
            .await
            .context("Failed to save preferences")?;
    }

    println!("Dark mode: {}", if enabled { "on" } else { "off" });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert!(!resolve(ThemeAction::Show, false));
        assert!(resolve(ThemeAction::Toggle, false));
        assert!(!resolve(ThemeAction::Toggle, true));
        assert!(resolve(ThemeAction::Dark, false));
        assert!(!resolve(ThemeAction::Light, true));
    }

    #[tokio::test]
    async fn test_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::open(dir.path().join("preferences.json"));

        cmd_theme(&prefs, ThemeAction::Toggle).await.unwrap();
        assert!(prefs.dark_mode().await.unwrap());

        cmd_theme(&prefs, ThemeAction::Toggle).await.unwrap();
        assert!(!prefs.dark_mode().await.unwrap());
    }

    #[tokio::test]
    async fn test_show_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let prefs = Preferences::open(&path);

        cmd_theme(&prefs, ThemeAction::Show).await.unwrap();
        assert!(!path.exists());
    }
}
