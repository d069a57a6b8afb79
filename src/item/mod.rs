/// This module provides the CSV row reader used as import source.
pub mod csv;

#[cfg(feature = "logger")]
/// This module provides a writer that logs every record, for dry runs.
pub mod logger;

#[cfg(feature = "json")]
/// This module provides a writer that exports records as a JSON array.
pub mod json;
