use std::collections::HashMap;

/// Maps an external key (a description slug) to an internal id.
#[cfg_attr(test, mockall::automock)]
pub trait ReferenceResolver {
    fn resolve(&self, key: &str) -> Option<i64>;
}

/// Slugs held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceResolver {
    ids: HashMap<String, i64>,
}

impl InMemoryReferenceResolver {
    pub fn new<K: Into<String>>(pairs: impl IntoIterator<Item = (K, i64)>) -> Self {
        Self {
            ids: pairs.into_iter().map(|(key, id)| (key.into(), id)).collect(),
        }
    }

    pub fn insert(&mut self, key: &str, id: i64) {
        self.ids.insert(key.to_owned(), id);
    }
}

impl ReferenceResolver for InMemoryReferenceResolver {
    fn resolve(&self, key: &str) -> Option<i64> {
        self.ids.get(key).copied()
    }
}
