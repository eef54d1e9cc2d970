//! Configuration loading.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! command-line overrides. Everything is validated once, here; the rest of the
//! program only ever sees [`Settings`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use github::{GithubConfig, DEFAULT_BASE_URL};
use serde::Deserialize;
use thiserror::Error;
use tracker::{CheckDirection, Login, PageSize, SessionSettings, StaleResponsePolicy, Theme};

/// Configuration problems. The program never starts with an invalid config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("per_page must be between 1 and {max}, got {value}")]
    PerPage { value: u32, max: u8 },

    #[error("api.base_url must not be empty")]
    EmptyBaseUrl,

    #[error("viewer must not be empty")]
    EmptyViewer,
}

// ---------------------------------------------------------------------------
// File format
// ---------------------------------------------------------------------------

/// Root of the TOML configuration file. Every section and field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api: ApiSection,
    pub tracker: TrackerSection,
    pub ui: UiSection,
}

/// `[api]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiSection {
    /// REST endpoint (default: `https://api.github.com`).
    pub base_url: String,
    /// Followees per page (default: 10, GitHub allows up to 100).
    pub per_page: u32,
    /// `User-Agent` header sent with every request.
    pub user_agent: Option<String>,
    /// Name of the environment variable holding an optional API token.
    pub token_env: String,
    /// Per-request timeout in seconds; 0 disables the timeout.
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            per_page: u32::from(PageSize::DEFAULT.get()),
            user_agent: None,
            token_env: "GITHUB_TOKEN".to_owned(),
            timeout_secs: 0,
        }
    }
}

/// `[tracker]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerSection {
    /// Whose relationships are checked; defaults to the queried user.
    pub viewer: Option<String>,
    pub check_direction: CheckDirection,
    pub stale_responses: StaleResponsePolicy,
}

/// `[ui]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiSection {
    pub theme: ThemeChoice,
}

/// Theme as written in configuration or on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ThemeChoice {
    /// Follow the terminal's background colour.
    #[default]
    Auto,
    Dark,
    Light,
}

impl FileConfig {
    /// Reads and parses `path`.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Values given on the command line. `None` keeps the file/default value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub per_page: Option<u32>,
    pub viewer: Option<String>,
    pub theme: Option<ThemeChoice>,
}

/// Fully validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub github: GithubConfig,
    pub per_page: PageSize,
    pub session: SessionSettings,
}

impl Settings {
    /// Applies `overrides` over `file` and validates the result.
    ///
    /// `env` looks up environment variables (the API token and `COLORFGBG`);
    /// it is a parameter so tests do not depend on the process environment.
    pub fn resolve(
        file: FileConfig,
        overrides: Overrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = overrides.base_url.unwrap_or(file.api.base_url);
        if base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let raw_per_page = overrides.per_page.unwrap_or(file.api.per_page);
        let per_page = u8::try_from(raw_per_page)
            .ok()
            .and_then(PageSize::new)
            .ok_or(ConfigError::PerPage {
                value: raw_per_page,
                max: PageSize::MAX,
            })?;

        let viewer = match overrides.viewer.or(file.tracker.viewer) {
            Some(raw) => Some(Login::new(raw.trim()).ok_or(ConfigError::EmptyViewer)?),
            None => None,
        };

        let theme = match overrides.theme.unwrap_or(file.ui.theme) {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Auto => detect_theme(env("COLORFGBG").as_deref()),
        };

        let token = env(file.api.token_env.as_str()).filter(|t| !t.trim().is_empty());
        let timeout =
            (file.api.timeout_secs > 0).then(|| Duration::from_secs(file.api.timeout_secs));

        let mut github = GithubConfig {
            base_url,
            token,
            timeout,
            ..GithubConfig::default()
        };
        if let Some(user_agent) = file.api.user_agent {
            github.user_agent = user_agent;
        }

        Ok(Self {
            github,
            per_page,
            session: SessionSettings {
                viewer,
                direction: file.tracker.check_direction,
                stale_responses: file.tracker.stale_responses,
                theme,
            },
        })
    }
}

/// Guesses the terminal background from `COLORFGBG` (`"fg;bg"`).
///
/// Background colours 7 and 15 are light; anything else, or no hint, is dark.
pub fn detect_theme(colorfgbg: Option<&str>) -> Theme {
    let background = colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        Some(7) | Some(15) => Theme::Light,
        _ => Theme::Dark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_resolve() {
        let settings = Settings::resolve(FileConfig::default(), Overrides::default(), no_env)
            .unwrap();

        assert_eq!(settings.github.base_url, "https://api.github.com");
        assert_eq!(settings.per_page.get(), 10);
        assert!(settings.github.token.is_none());
        assert!(settings.github.timeout.is_none());
        assert_eq!(settings.session.direction, CheckDirection::FollowsBack);
        assert_eq!(settings.session.stale_responses, StaleResponsePolicy::Apply);
        assert!(settings.session.viewer.is_none());
    }

    #[test]
    fn parses_every_section() {
        let file: FileConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://ghe.example.com/api/v3"
            per_page = 25
            token_env = "MY_TOKEN"
            timeout_secs = 15

            [tracker]
            viewer = "me"
            check_direction = "viewer_follows"
            stale_responses = "discard"

            [ui]
            theme = "light"
            "#,
        )
        .unwrap();

        let env = |key: &str| (key == "MY_TOKEN").then(|| "secret".to_owned());
        let settings = Settings::resolve(file, Overrides::default(), env).unwrap();

        assert_eq!(settings.per_page.get(), 25);
        assert_eq!(settings.github.token.as_deref(), Some("secret"));
        assert_eq!(settings.github.timeout, Some(Duration::from_secs(15)));
        assert_eq!(settings.session.viewer.as_ref().map(Login::as_str), Some("me"));
        assert_eq!(settings.session.direction, CheckDirection::ViewerFollows);
        assert_eq!(settings.session.stale_responses, StaleResponsePolicy::Discard);
        assert_eq!(settings.session.theme, Theme::Light);
    }

    #[test]
    fn overrides_win_over_file() {
        let file: FileConfig = toml::from_str("[api]\nper_page = 25\n").unwrap();
        let overrides = Overrides {
            per_page: Some(50),
            theme: Some(ThemeChoice::Dark),
            ..Overrides::default()
        };

        let settings = Settings::resolve(file, overrides, no_env).unwrap();

        assert_eq!(settings.per_page.get(), 50);
        assert_eq!(settings.session.theme, Theme::Dark);
    }

    #[test]
    fn per_page_out_of_range_is_rejected() {
        for value in [0, 101, 1000] {
            let overrides = Overrides {
                per_page: Some(value),
                ..Overrides::default()
            };
            let err = Settings::resolve(FileConfig::default(), overrides, no_env).unwrap_err();
            assert!(matches!(err, ConfigError::PerPage { .. }), "{value}");
        }
    }

    #[test]
    fn blank_viewer_and_base_url_are_rejected() {
        let overrides = Overrides {
            viewer: Some("  ".into()),
            ..Overrides::default()
        };
        assert!(matches!(
            Settings::resolve(FileConfig::default(), overrides, no_env),
            Err(ConfigError::EmptyViewer)
        ));

        let overrides = Overrides {
            base_url: Some(String::new()),
            ..Overrides::default()
        };
        assert!(matches!(
            Settings::resolve(FileConfig::default(), overrides, no_env),
            Err(ConfigError::EmptyBaseUrl)
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<FileConfig, _> = toml::from_str("[api]\nper_pgae = 5\n");
        assert!(result.is_err());
    }

    #[test]
    fn theme_detection_reads_the_background_colour() {
        assert_eq!(detect_theme(Some("0;15")), Theme::Light);
        assert_eq!(detect_theme(Some("12;7")), Theme::Light);
        assert_eq!(detect_theme(Some("15;0")), Theme::Dark);
        assert_eq!(detect_theme(Some("garbage")), Theme::Dark);
        assert_eq!(detect_theme(None), Theme::Dark);
    }

    #[tokio::test]
    async fn load_reads_a_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tracker.toml");
        tokio::fs::write(&path, "[ui]\ntheme = \"dark\"\n").await.unwrap();

        let file = FileConfig::load(&path).await.unwrap();
        assert_eq!(file.ui.theme, ThemeChoice::Dark);
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let dir = tempdir().unwrap();
        let err = FileConfig::load(&dir.path().join("absent.toml")).await.unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
