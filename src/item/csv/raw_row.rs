use std::rc::Rc;

/// One data row of a CSV file, before any validation.
///
/// Values are keyed by the column names of the header line. A column the
/// file does not have reads as the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    index: usize,
    headers: Rc<[String]>,
    values: Vec<String>,
}

impl RawRow {
    pub(crate) fn new(index: usize, headers: Rc<[String]>, values: Vec<String>) -> Self {
        Self {
            index,
            headers,
            values,
        }
    }

    /// Builds a row from `(column, value)` pairs, in column order.
    pub fn from_pairs<K, V>(index: usize, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let (headers, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .unzip();

        Self::new(index, headers.into(), values)
    }

    /// 1-based position of the row among the data rows of its file.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|header| header == column)
            .and_then(|position| self.values.get(position))
            .map(String::as_str)
    }

    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or_default()
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}
