use std::{env, fs::File, io::BufReader, path::Path};

use serde::Deserialize;

use crate::{error::ImportError, physical_object::processor::DEFAULT_MULTI_VALUE_DELIMITER};

/// Environment variable holding the process wide default culture.
pub const DEFAULT_CULTURE_ENV: &str = "PHYSICAL_OBJECT_DEFAULT_CULTURE";

/// Options of an import run.
///
/// Can be built in code or deserialized, with camelCase keys:
///
/// ```
/// use physical_object_import::config::ImportOptions;
///
/// let options: ImportOptions = serde_json::from_str(
///     r#"{"defaultCulture": "fr", "indexOnLoad": true}"#,
/// ).unwrap();
///
/// assert_eq!(options.default_culture(), Some("fr"));
/// assert_eq!(options.multi_value_delimiter(), '|');
/// assert!(options.index_on_load());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportOptions {
    default_culture: Option<String>,
    process_culture: Option<String>,
    multi_value_delimiter: char,
    column_delimiter: char,
    index_on_load: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            default_culture: None,
            process_culture: None,
            multi_value_delimiter: DEFAULT_MULTI_VALUE_DELIMITER,
            column_delimiter: ',',
            index_on_load: false,
        }
    }
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads options from a JSON file.
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| {
            ImportError::Configuration(format!(
                "can not open options file {}: {}",
                path.display(),
                error
            ))
        })?;

        let options: Self = serde_json::from_reader(BufReader::new(file)).map_err(|error| {
            ImportError::Configuration(format!("invalid options in {}: {}", path.display(), error))
        })?;

        options.validate()?;
        Ok(options)
    }

    /// Fills the process culture from [`DEFAULT_CULTURE_ENV`] when it is not
    /// set yet.
    pub fn with_env_fallback(mut self) -> Self {
        if self.process_culture.is_none() {
            self.process_culture = env::var(DEFAULT_CULTURE_ENV)
                .ok()
                .filter(|culture| !culture.trim().is_empty());
        }
        self
    }

    pub fn default_culture(&self) -> Option<&str> {
        self.default_culture.as_deref()
    }

    pub fn set_default_culture(mut self, culture: Option<String>) -> Self {
        self.default_culture = culture;
        self
    }

    pub fn process_culture(&self) -> Option<&str> {
        self.process_culture.as_deref()
    }

    pub fn set_process_culture(mut self, culture: Option<String>) -> Self {
        self.process_culture = culture;
        self
    }

    pub fn multi_value_delimiter(&self) -> char {
        self.multi_value_delimiter
    }

    pub fn set_multi_value_delimiter(mut self, delimiter: char) -> Self {
        self.multi_value_delimiter = delimiter;
        self
    }

    pub fn column_delimiter(&self) -> char {
        self.column_delimiter
    }

    pub fn set_column_delimiter(mut self, delimiter: char) -> Self {
        self.column_delimiter = delimiter;
        self
    }

    /// Whether the search index should be updated while importing.
    pub fn index_on_load(&self) -> bool {
        self.index_on_load
    }

    pub fn set_index_on_load(mut self, index_on_load: bool) -> Self {
        self.index_on_load = index_on_load;
        self
    }

    /// The column delimiter as the single byte the CSV reader needs.
    pub fn column_delimiter_byte(&self) -> Result<u8, ImportError> {
        u8::try_from(self.column_delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                ImportError::Configuration(format!(
                    "column delimiter {:?} is not an ASCII character",
                    self.column_delimiter
                ))
            })
    }

    pub fn validate(&self) -> Result<(), ImportError> {
        let column_delimiter = self.column_delimiter_byte()?;

        if self.multi_value_delimiter == char::from(column_delimiter) {
            return Err(ImportError::Configuration(format!(
                "multi-value delimiter {:?} is also the column delimiter",
                self.multi_value_delimiter
            )));
        }

        Ok(())
    }
}
