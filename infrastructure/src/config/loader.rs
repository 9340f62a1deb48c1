//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["seismic-chat.toml", ".seismic-chat.toml"];

/// Prefix of environment overrides (`SEISMIC_CHAT_OUTPUT__COLOR=false`)
pub const ENV_PREFIX: &str = "SEISMIC_CHAT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `SEISMIC_CHAT_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./seismic-chat.toml` or `./.seismic-chat.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/seismic-chat/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global
            && path.exists()
        {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/seismic-chat/config.toml if set,
    /// otherwise falls back to ~/.config/seismic-chat/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("seismic-chat").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}*", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./seismic-chat.toml or ./.seismic-chat.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.artifacts.dir, "./artifacts");
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("seismic-chat"));
    }

    #[test]
    fn test_later_files_override_earlier() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "global.toml",
                "[artifacts]\ndir = \"/global/figures\"\n\n[output]\ncolor = false\n",
            )?;
            jail.create_file("explicit.toml", "[artifacts]\ndir = \"/explicit/figures\"\n")?;

            let config: FileConfig = ConfigLoader::figment(
                Some(Path::new("global.toml")),
                None,
                Some(Path::new("explicit.toml")),
            )
            .extract()?;

            assert_eq!(config.artifacts.dir, "/explicit/figures");
            // untouched keys keep the lower-priority value
            assert!(!config.output.color);
            assert!(config.repl.show_welcome);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_explicit_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "explicit.toml",
                "[artifacts]\ndir = \"/explicit/figures\"\n\n[output]\ncolor = true\n",
            )?;
            jail.set_env("SEISMIC_CHAT_ARTIFACTS__DIR", "/tmp/figures");
            jail.set_env("SEISMIC_CHAT_OUTPUT__COLOR", "false");

            let config: FileConfig =
                ConfigLoader::figment(None, None, Some(Path::new("explicit.toml"))).extract()?;

            assert_eq!(config.artifacts.dir, "/tmp/figures");
            assert!(!config.output.color);
            assert!(config.repl.show_welcome);
            Ok(())
        });
    }

    #[test]
    fn test_env_reaches_nested_sections_without_files() {
        Jail::expect_with(|jail| {
            jail.set_env("SEISMIC_CHAT_REPL__SHOW_WELCOME", "false");
            jail.set_env("SEISMIC_CHAT_LOGGING__TRANSCRIPT", "chat.jsonl");

            let config: FileConfig = ConfigLoader::figment(None, None, None).extract()?;

            assert!(!config.repl.show_welcome);
            assert_eq!(config.logging.transcript.as_deref(), Some("chat.jsonl"));
            assert_eq!(config.artifacts.dir, "./artifacts");
            Ok(())
        });
    }

    #[test]
    fn test_missing_global_file_is_skipped() {
        Jail::expect_with(|_| {
            let config: FileConfig =
                ConfigLoader::figment(Some(Path::new("absent.toml")), None, None).extract()?;
            assert_eq!(config, FileConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.toml", "[output]\ncolor = \"sometimes\"\n")?;

            let result: Result<FileConfig, _> =
                ConfigLoader::figment(None, None, Some(Path::new("bad.toml"))).extract();
            assert!(result.is_err());
            Ok(())
        });
    }
}
