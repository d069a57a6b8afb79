/// Picks the culture of a row.
///
/// In order: the row's own `culture` value, the default culture of the
/// import, the process wide default culture. Whatever wins is trimmed and
/// lowercased; blank values never win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CultureResolver {
    default_culture: Option<String>,
    process_culture: Option<String>,
}

impl CultureResolver {
    pub fn new(default_culture: Option<String>, process_culture: Option<String>) -> Self {
        Self {
            default_culture,
            process_culture,
        }
    }

    pub fn default_culture(&self) -> Option<&str> {
        self.default_culture.as_deref()
    }

    pub fn set_default_culture(&mut self, culture: Option<String>) {
        self.default_culture = culture;
    }

    pub fn process_culture(&self) -> Option<&str> {
        self.process_culture.as_deref()
    }

    pub fn set_process_culture(&mut self, culture: Option<String>) {
        self.process_culture = culture;
    }

    /// Returns `None` when no culture can be determined.
    pub fn resolve(&self, explicit: &str) -> Option<String> {
        [
            Some(explicit),
            self.default_culture.as_deref(),
            self.process_culture.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|culture| !culture.is_empty())
        .map(str::to_lowercase)
    }
}
