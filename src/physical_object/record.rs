use std::fmt;

use serde::Serialize;

/// A validated physical object row, ready to be persisted.
///
/// Records are only built by the row processor and can not be changed
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    name: String,
    location: Option<String>,
    culture: String,
    type_id: Option<i64>,
    information_object_ids: Vec<i64>,
}

impl NormalizedRecord {
    pub(crate) fn new(
        name: String,
        location: Option<String>,
        culture: String,
        type_id: Option<i64>,
        information_object_ids: Vec<i64>,
    ) -> Self {
        Self {
            name,
            location,
            culture,
            type_id,
            information_object_ids,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` when the row had no location.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Lowercase culture the row was resolved to.
    pub fn culture(&self) -> &str {
        &self.culture
    }

    /// Physical object type term, `None` when the row left the type unset.
    pub fn type_id(&self) -> Option<i64> {
        self.type_id
    }

    /// Ids of the descriptions the object holds, in the order of the row.
    pub fn information_object_ids(&self) -> &[i64] {
        &self.information_object_ids
    }
}

impl fmt::Display for NormalizedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name \"{}\"", self.name)
    }
}
