//! Command-line entry points.
//!
//! ```ignore
//! use campus::cli::{parse_args, run_cli_command};
//! use campus::config::CampusConfig;
//!
//! let command = parse_args(std::env::args());
//! run_cli_command(command, &CampusConfig::from_env()?).await?;
//! ```

pub mod args;
pub mod course;
pub mod dashboard;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use course::handle_course_command;
pub use dashboard::{handle_dashboard_command, handle_toggle_layout_command};
pub use version::{version_string, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::adapters::{FilePreferenceStore, StaticSite};
use crate::config::CampusConfig;

/// Site id used for preferences when no site is configured.
pub const LOCAL_SITE_ID: &str = "local";

/// Run a parsed command.
pub async fn run_cli_command(command: CliCommand, config: &CampusConfig) -> Result<()> {
    match command {
        CliCommand::Version => println!("{}", version_string()),
        CliCommand::Help => println!("{}", USAGE),
        CliCommand::Course(path) => handle_course_command(&path, config).await?,
        CliCommand::Dashboard => handle_dashboard_command(config).await?,
        CliCommand::ToggleLayout => handle_toggle_layout_command(config).await?,
    }
    Ok(())
}

/// Preference store of the configured site.
pub fn preference_store(config: &CampusConfig) -> Result<FilePreferenceStore> {
    let site_id = config
        .site_url
        .as_deref()
        .map(StaticSite::id_from_url)
        .unwrap_or_else(|| LOCAL_SITE_ID.to_string());

    match &config.preferences_dir {
        Some(dir) => Ok(FilePreferenceStore::in_dir(dir, &site_id)),
        None => FilePreferenceStore::for_site(&site_id)
            .ok_or_else(|| eyre!("Could not determine the user data directory")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_preference_store_uses_site_dir() {
        let dir = TempDir::new().unwrap();
        let config = CampusConfig::new()
            .with_site_url("https://school.example")
            .with_preferences_dir(dir.path());
        let store = preference_store(&config).unwrap();
        assert!(store.path().starts_with(dir.path().join("school.example")));

        let local = preference_store(&CampusConfig::new().with_preferences_dir(dir.path())).unwrap();
        assert!(local.path().starts_with(dir.path().join(LOCAL_SITE_ID)));
    }

    #[tokio::test]
    async fn test_toggle_layout_command_persists() {
        let dir = TempDir::new().unwrap();
        let config = CampusConfig::new().with_preferences_dir(dir.path());

        run_cli_command(CliCommand::ToggleLayout, &config).await.unwrap();
        let store = std::sync::Arc::new(preference_store(&config).unwrap());
        let toggle = crate::home::LayoutToggle::load(store).await;
        assert_eq!(toggle.layout(), crate::home::OverviewLayout::List);
    }
}
