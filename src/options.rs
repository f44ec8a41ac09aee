//! See [`Options::initialize()`].

use std::{
    env::VarError,
    path::{Path, PathBuf},
};

use color_eyre::Help;
use eyre::Context;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

/// Environment variable containing either RON options or a path to a RON options file.
pub const OPTIONS_VAR: &str = "OPTIONS";
/// Options file used when [`OPTIONS_VAR`] is not set.
pub const DEFAULT_OPTIONS_FILE: &str = "options.ron";

/// Global options for the application. None of these change what is printed, only how the
/// program logs and where its randomness comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Directory where application data is stored (including logs).
    ///
    /// Default is `data`.
    pub data_dir: PathBuf,
    /// If `true` then logs are also written to a daily rotated file in `<data_dir>/log`.
    ///
    /// Default is `false`.
    pub log_file: bool,
    /// Seed for the random number generator. When set, the printed readings are identical
    /// between runs.
    ///
    /// Default is `None`, seeded from system entropy.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            data_dir: "data".into(),
            log_file: false,
            seed: None,
        }
    }
}

/// Error while loading [`Options`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `OPTIONS` was neither valid RON nor a path to an existing file.
    #[error(
        "Error deserializing options from `OPTIONS` environment variable string, or you have \
        specified a file path which does not exist"
    )]
    Environment(#[source] ron::error::SpannedError),
    /// An options file could not be deserialized.
    #[error("Error deserializing options file: {path:?}")]
    File {
        /// Path of the offending options file.
        path: PathBuf,
        /// Underlying RON error.
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug)]
enum InitLog {
    Info(String),
    Debug(String),
}

/// Messages produced while loading options, before logging has been set up.
#[derive(Debug, Default)]
pub struct InitLogs(Vec<InitLog>);

impl InitLogs {
    fn info(&mut self, message: impl Into<String>) {
        self.0.push(InitLog::Info(message.into()));
    }

    fn debug(&mut self, message: impl Into<String>) {
        self.0.push(InitLog::Debug(message.into()));
    }

    /// Print the messages to stderr, for use when logging could not be set up.
    pub fn print(&self) {
        for log in &self.0 {
            match log {
                InitLog::Info(message) | InitLog::Debug(message) => eprintln!("{}", message),
            }
        }
    }

    /// Replay the messages as `tracing` events.
    pub fn present(&self) {
        for log in &self.0 {
            match log {
                InitLog::Info(message) => tracing::info!("{}", message),
                InitLog::Debug(message) => tracing::debug!("{}", message),
            }
        }
    }
}

/// Result of [`Options::initialize()`], along with the messages logged while loading.
pub struct OptionsInit {
    /// The loaded options.
    pub result: eyre::Result<Options>,
    /// Messages to present once logging has been set up.
    pub logs: InitLogs,
}

impl Options {
    /// Initialize the options using the `OPTIONS` environment variable, otherwise load from file
    /// `options.ron` if it exists, otherwise use [`Options::default()`]. If `OPTIONS` contains a
    /// file path, it will load the options from that path, if `OPTIONS` contains a RON definition
    /// then it will load the options from the string contained in the variable.
    pub async fn initialize() -> OptionsInit {
        let mut logs = InitLogs::default();
        let result = load(
            std::env::var(OPTIONS_VAR),
            Path::new(DEFAULT_OPTIONS_FILE),
            &mut logs,
        )
        .await;

        if let Ok(options) = &result {
            match ron::ser::to_string_pretty(options, PrettyConfig::default()) {
                Ok(options_str) => logs.debug(format!("Options{}", options_str)),
                Err(error) => logs.debug(format!("Unable to serialize options: {}", error)),
            }
        }

        OptionsInit { result, logs }
    }
}

async fn read_options_file(path: &Path) -> eyre::Result<Options> {
    let options_str = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Error reading options file: {:?}", path))?;
    let options = ron::from_str(&options_str).map_err(|source| Error::File {
        path: path.to_owned(),
        source,
    })?;
    Ok(options)
}

async fn load(
    options_var: Result<String, VarError>,
    default_path: &Path,
    logs: &mut InitLogs,
) -> eyre::Result<Options> {
    match options_var {
        Ok(options) => match ron::from_str(&options) {
            Ok(options) => {
                logs.info("Options loaded from `OPTIONS` environment variable");
                Ok(options)
            }
            Err(error) => {
                let path = PathBuf::from(options);
                if path.is_file() {
                    let options = read_options_file(&path).await?;
                    logs.info(format!(
                        "Options loaded from file specified in `OPTIONS` environment variable: {:?}",
                        path
                    ));
                    Ok(options)
                } else {
                    Err(Error::Environment(error)).suggestion(
                        "Specify options in RON format like `(seed: Some(42))`, or the path \
                        to an existing options file.",
                    )
                }
            }
        },
        Err(VarError::NotPresent) => {
            if !default_path.is_file() {
                logs.debug(format!(
                    "No `OPTIONS` environment variable specified, and options file {:?} does \
                    not exist, using default options",
                    default_path
                ));
                return Ok(Options::default());
            }
            let options = read_options_file(default_path).await?;
            logs.info(format!("Options loaded from default file: {:?}", default_path));
            Ok(options)
        }
        Err(error) => Err(error).wrap_err("Error reading `OPTIONS` environment variable"),
    }
}

#[cfg(test)]
mod test {
    use std::{env::VarError, path::PathBuf};

    use super::{load, InitLogs, Options};

    fn missing_path() -> PathBuf {
        std::env::temp_dir().join("simple-weather-test-missing-options.ron")
    }

    #[tokio::test]
    async fn test_load_defaults_without_sources() {
        let mut logs = InitLogs::default();
        let options = load(Err(VarError::NotPresent), &missing_path(), &mut logs)
            .await
            .unwrap();
        assert_eq!(Options::default(), options);
        assert_eq!(PathBuf::from("data"), options.data_dir);
        assert!(!options.log_file);
        assert_eq!(None, options.seed);
        assert_eq!(1, logs.0.len());
    }

    #[tokio::test]
    async fn test_load_from_variable_string() {
        let mut logs = InitLogs::default();
        let options = load(
            Ok("(seed: Some(42))".to_owned()),
            &missing_path(),
            &mut logs,
        )
        .await
        .unwrap();
        assert_eq!(Some(42), options.seed);
        assert_eq!(PathBuf::from("data"), options.data_dir);
        assert!(!options.log_file);
    }

    #[tokio::test]
    async fn test_load_from_variable_path() {
        let path = std::env::temp_dir().join(format!(
            "simple-weather-test-options-{}.ron",
            std::process::id()
        ));
        tokio::fs::write(&path, r#"(data_dir: "elsewhere", log_file: true)"#)
            .await
            .unwrap();

        let mut logs = InitLogs::default();
        let options = load(
            Ok(path.to_str().unwrap().to_owned()),
            &missing_path(),
            &mut logs,
        )
        .await
        .unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(PathBuf::from("elsewhere"), options.data_dir);
        assert!(options.log_file);
        assert_eq!(None, options.seed);
    }

    #[tokio::test]
    async fn test_load_invalid_variable() {
        let mut logs = InitLogs::default();
        let error = load(
            Ok("this is neither ron nor a file".to_owned()),
            &missing_path(),
            &mut logs,
        )
        .await
        .unwrap_err();
        assert!(error
            .to_string()
            .starts_with("Error deserializing options from `OPTIONS`"));
        assert!(logs.0.is_empty());
    }
}
