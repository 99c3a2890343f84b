//! Configuration, logging and catalog shared by every command

use eventsite_core::config::{Config, WeightsConfig};
use eventsite_core::{Error, ErrorCode};
use eventsite_search::{Catalog, ScoreWeights, SearchError};
use eventsite_telemetry::{TelemetryConfig, TelemetryError, TelemetryGuard};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub struct Context {
    pub config: Config,
    pub catalog: Cow<'static, Catalog>,
    pub catalog_source: Option<PathBuf>,
    pub json: bool,
    _telemetry: TelemetryGuard,
}

impl Context {
    /// Load configuration, start logging, then load the catalog.
    ///
    /// A `--catalog` argument wins over `search.catalog` in the config file.
    pub fn load(
        config_path: Option<&Path>,
        catalog_path: Option<&Path>,
        verbose: bool,
        json: bool,
    ) -> anyhow::Result<Self> {
        let config = Config::load(config_path)?;

        let logging = &config.schema.logging;
        let telemetry = eventsite_telemetry::init_with_config(&TelemetryConfig {
            log_level: if verbose { "debug".to_string() } else { logging.level.clone() },
            json: logging.json,
            log_file: config.log_file_path(),
            ..TelemetryConfig::default()
        })
        .map_err(telemetry_error)?;

        if let Some(path) = &config.path {
            tracing::debug!(path = %path.display(), "Configuration loaded");
        }

        let source = catalog_path.map(Path::to_path_buf).or_else(|| config.catalog_path());
        let catalog = match &source {
            Some(path) => Cow::Owned(Catalog::load(path).map_err(|err| catalog_error(err, path))?),
            None => Cow::Borrowed(Catalog::builtin()),
        };

        eventsite_telemetry::metrics().gauge("catalog.entries", catalog.len() as u64);

        Ok(Self {
            config,
            catalog,
            catalog_source: source,
            json,
            _telemetry: telemetry,
        })
    }

    /// `--limit` if given, otherwise the configured limit.
    pub fn limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.config.schema.search.limit)
    }

    pub fn weights(&self) -> ScoreWeights {
        to_weights(&self.config.schema.search.weights)
    }
}

fn to_weights(config: &WeightsConfig) -> ScoreWeights {
    ScoreWeights {
        in_order: config.in_order,
        contained: config.contained,
        completion: config.completion,
    }
}

/// Logging setup fails only on bad `[logging]` settings or a second init.
fn telemetry_error(err: TelemetryError) -> Error {
    let coded = match &err {
        TelemetryError::InvalidLevel { .. } => Error::invalid_config_value("logging.level", err.to_string())
            .with_suggestion("Use a level such as \"warn\" or a directive such as \"eventsite_search=debug\""),
        TelemetryError::LogFile { .. } => Error::invalid_config_value("logging.file", err.to_string())
            .with_suggestion("Point `logging.file` at a writable location"),
        TelemetryError::Subscriber(_) => Error::new(ErrorCode::Internal, err.to_string()),
    };
    coded.with_source(err)
}

/// Translate a catalog failure into a coded error.
fn catalog_error(err: SearchError, path: &Path) -> Error {
    let coded = match &err {
        SearchError::DuplicateId(id) => Error::duplicate_entry(id),
        SearchError::PopularityOutOfRange { .. }
        | SearchError::InvalidEntry(_)
        | SearchError::UnknownKind(_) => Error::invalid_entry(err.to_string()),
        SearchError::Parse { .. } => Error::new(ErrorCode::CatalogParseError, err.to_string()),
        SearchError::UnsupportedFormat(file) => Error::unsupported_format(file),
        SearchError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => Error::file_not_found(path),
        SearchError::Io(_) => Error::io(err.to_string()),
    };

    coded
        .with_context(format!("Loading catalog {}", path.display()))
        .with_source(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_match_scorer_defaults() {
        assert_eq!(to_weights(&WeightsConfig::default()), ScoreWeights::DEFAULT);
    }

    #[test]
    fn test_telemetry_errors_are_config_errors() {
        let level = TelemetryError::InvalidLevel {
            level: "=[bad".into(),
            message: "invalid filter directive".into(),
        };
        let err = telemetry_error(level);
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
        assert!(err.message.contains("logging.level"));

        let file = TelemetryError::LogFile {
            path: PathBuf::from("afile/sub/log.txt"),
            message: "Not a directory".into(),
        };
        let err = telemetry_error(file);
        assert_eq!(err.code.exit_code(), eventsite_core::error::exit_codes::CONFIG_ERROR);
        assert!(err.message.contains("logging.file"));
    }

    #[test]
    fn test_catalog_error_codes() {
        let path = Path::new("catalog.json");

        let err = catalog_error(SearchError::DuplicateId("guntur".into()), path);
        assert_eq!(err.code, ErrorCode::DuplicateEntry);
        assert!(err.context.unwrap().contains("catalog.json"));

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(catalog_error(SearchError::Io(missing), path).code, ErrorCode::FileNotFound);

        let parse = SearchError::Parse { format: "json", message: "eof".into() };
        assert_eq!(catalog_error(parse, path).code, ErrorCode::CatalogParseError);
    }
}
