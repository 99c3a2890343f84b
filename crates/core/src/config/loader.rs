//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults.
    ///
    /// An explicit `path` must exist. Without one the standard locations are
    /// searched and defaults are used when none is found.
    ///
    /// # Errors
    /// Fails when an explicit path is missing, or when the file found cannot
    /// be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Fails on malformed TOML or invalid values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let schema: ConfigSchema = toml::from_str(content)?;
        schema.validate()?;
        Ok(Self { schema, path: None })
    }

    /// Catalog path resolved relative to the configuration file
    #[must_use]
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.resolve(self.schema.search.catalog.as_deref()?)
    }

    /// Log file path resolved relative to the configuration file
    #[must_use]
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.resolve(self.schema.logging.file.as_deref()?)
    }

    fn resolve(&self, value: &str) -> Option<PathBuf> {
        let path = Path::new(value);
        if path.is_absolute() {
            return Some(path.to_path_buf());
        }
        let base = self.path.as_deref().and_then(Path::parent);
        Some(base.map_or_else(|| path.to_path_buf(), |dir| dir.join(path)))
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let local = [".event-search.toml", "event-search.toml"]
        .into_iter()
        .map(PathBuf::from);
    let user = dirs::config_dir().map(|dir| dir.join("event-search").join("config.toml"));

    local.chain(user).find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let context = format!("Loading config file {}", path.display());

    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(context.clone())?;

    let schema: ConfigSchema = toml::from_str(&content)
        .map_err(Error::from)
        .context(context.clone())?;

    schema.validate().context(context)?;
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.search.limit, 6);
        assert_eq!(config.schema.logging.level, "warn");
    }

    #[test]
    fn test_config_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event-search.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[search]\nlimit = 3\ncatalog = \"catalog.json\"").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.schema.search.limit, 3);
        assert_eq!(config.catalog_path(), Some(dir.path().join("catalog.json")));
    }

    #[test]
    fn test_log_file_resolves_like_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event-search.toml");
        std::fs::write(
            &path,
            "[search]\ncatalog = \"data/catalog.json\"\n\n[logging]\nfile = \"logs/search.log\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.catalog_path(), Some(dir.path().join("data/catalog.json")));
        assert_eq!(config.log_file_path(), Some(dir.path().join("logs/search.log")));
        assert_eq!(Config::default().log_file_path(), None);
    }

    #[test]
    fn test_config_load_parse_error_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[search\nlimit = ").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.unwrap().contains("broken.toml"));
    }

    #[test]
    fn test_config_from_toml_str_validates() {
        let err = Config::from_toml_str("[search.weights]\nin_order = -2.0").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
    }

    #[test]
    fn test_catalog_path_without_config_file() {
        let config = Config::from_toml_str("[search]\ncatalog = \"data/catalog.toml\"").unwrap();
        assert_eq!(config.catalog_path(), Some(PathBuf::from("data/catalog.toml")));
    }
}
