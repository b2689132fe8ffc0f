//! Layered settings for the `addon-merge` command.
//!
//! Sources are merged lowest to highest: built-in defaults, the TOML settings
//! file, `ADDON_MERGE_*` environment variables, then command-line flags.

use addon_merge::source::{DEFAULT_SEARCH_DEPTH, DEFAULT_WORKSPACE_DIR};
use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::error::CliError;

/// Settings file read from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "addon-merge.toml";

/// Prefix of environment variables that override settings.
pub const ENV_PREFIX: &str = "ADDON_MERGE_";

/// Log filter used when neither settings nor `RUST_LOG` provide one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Resolved settings for one invocation.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Explicit workspace root; discovered from the working directory when unset.
    pub workspace: Option<Utf8PathBuf>,
    /// Directory name searched for during workspace discovery.
    pub workspace_dir_name: String,
    /// Number of parent directories examined during discovery.
    pub max_search_depth: usize,
    /// Destination file for the merged template; stdout when unset.
    pub output: Option<Utf8PathBuf>,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workspace: None,
            workspace_dir_name: DEFAULT_WORKSPACE_DIR.to_owned(),
            max_search_depth: DEFAULT_SEARCH_DEPTH,
            output: None,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

/// Values given on the command line. Absent flags leave lower layers intact.
#[derive(Serialize)]
struct CliOverrides<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    workspace: Option<&'a Utf8Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a Utf8Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_filter: Option<&'a str>,
}

impl<'a> From<&'a Args> for CliOverrides<'a> {
    fn from(args: &'a Args) -> Self {
        Self {
            workspace: args.workspace.as_deref(),
            output: args.output.as_deref(),
            log_filter: args.log_filter.as_deref(),
        }
    }
}

impl Settings {
    /// Load settings for `args` from every layer.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::MissingConfig`] when `--config` names a file that
    /// does not exist, and [`CliError::Settings`] when a layer cannot be
    /// parsed or holds a value of the wrong type.
    pub fn load(args: &Args) -> Result<Self, CliError> {
        Ok(Self::figment(args)?.extract()?)
    }

    /// Build the layered [`Figment`] without extracting it.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::MissingConfig`] when `--config` names a file that
    /// does not exist.
    pub fn figment(args: &Args) -> Result<Figment, CliError> {
        let config_path = match args.config.as_deref() {
            Some(path) if !path.is_file() => {
                return Err(CliError::MissingConfig(path.to_path_buf()));
            }
            Some(path) => path,
            None => Utf8Path::new(DEFAULT_CONFIG_FILE),
        };
        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(CliOverrides::from(args))))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, anyhow, ensure};
    use camino::{Utf8Path, Utf8PathBuf};
    use rstest::rstest;
    use test_helpers::figment::{jail_dir, with_jail};

    use super::{DEFAULT_CONFIG_FILE, Settings};
    use crate::cli::Args;
    use crate::error::CliError;

    fn args() -> Args {
        Args {
            workload: "api".to_owned(),
            ..Args::default()
        }
    }

    fn load(args: &Args) -> figment::error::Result<Settings> {
        Settings::load(args).map_err(|err| figment::Error::from(err.to_string()))
    }

    #[test]
    fn defaults_apply_without_other_layers() -> Result<()> {
        let settings = with_jail(|_| load(&args()))?;
        ensure!(settings == Settings::default());
        ensure!(settings.workspace_dir_name == "copilot");
        ensure!(settings.max_search_depth == 5);
        ensure!(settings.log_filter == "warn");
        Ok(())
    }

    #[test]
    fn settings_file_overrides_defaults() -> Result<()> {
        let settings = with_jail(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                "workspace_dir_name = \"infra\"\nmax_search_depth = 2\n",
            )?;
            load(&args())
        })?;
        ensure!(settings.workspace_dir_name == "infra");
        ensure!(settings.max_search_depth == 2);
        Ok(())
    }

    #[test]
    fn environment_overrides_settings_file() -> Result<()> {
        let settings = with_jail(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, "log_filter = \"info\"\n")?;
            jail.set_env("ADDON_MERGE_LOG_FILTER", "debug");
            jail.set_env("ADDON_MERGE_MAX_SEARCH_DEPTH", "9");
            load(&args())
        })?;
        ensure!(settings.log_filter == "debug");
        ensure!(settings.max_search_depth == 9);
        Ok(())
    }

    #[test]
    fn flags_override_environment() -> Result<()> {
        let settings = with_jail(|jail| {
            jail.set_env("ADDON_MERGE_OUTPUT", "from-env.yml");
            jail.set_env("ADDON_MERGE_LOG_FILTER", "debug");
            let mut cli = args();
            cli.output = Some(Utf8PathBuf::from("from-flag.yml"));
            load(&cli)
        })?;
        ensure!(settings.output.as_deref() == Some(Utf8Path::new("from-flag.yml")));
        ensure!(settings.log_filter == "debug", "absent flag must not reset lower layers");
        Ok(())
    }

    #[test]
    fn explicit_config_path_is_loaded() -> Result<()> {
        let settings = with_jail(|jail| {
            jail.create_file("custom.toml", "workspace = \"deploy/copilot\"\n")?;
            let mut cli = args();
            cli.config = Some(jail_dir(jail)?.join("custom.toml"));
            load(&cli)
        })?;
        ensure!(settings.workspace.as_deref() == Some(Utf8Path::new("deploy/copilot")));
        Ok(())
    }

    #[test]
    fn missing_explicit_config_is_an_error() -> Result<()> {
        let outcome = with_jail(|_| {
            let mut cli = args();
            cli.config = Some(Utf8PathBuf::from("absent.toml"));
            Ok(Settings::load(&cli))
        })?;
        match outcome {
            Err(CliError::MissingConfig(path)) => {
                ensure!(path.as_str() == "absent.toml");
                Ok(())
            }
            other => Err(anyhow!("expected MissingConfig, got {other:?}")),
        }
    }

    #[rstest]
    #[case::bad_toml("max_search_depth = \n")]
    #[case::wrong_type("max_search_depth = \"deep\"\n")]
    fn malformed_settings_file_is_reported(#[case] contents: &str) -> Result<()> {
        let outcome = with_jail(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, contents)?;
            Ok(Settings::load(&args()))
        })?;
        ensure!(
            matches!(outcome, Err(CliError::Settings(_))),
            "expected a settings error, got {outcome:?}"
        );
        Ok(())
    }
}
