//! Physical object type vocabulary, indexed for row lookups.

use std::{
    collections::{HashMap, hash_map::Entry},
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Deserializer};

use crate::error::ImportError;

/// One translated label of a controlled vocabulary term.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxonomyTerm {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub culture: String,
    pub name: String,
}

impl TaxonomyTerm {
    pub fn new(id: i64, culture: &str, name: &str) -> Self {
        Self {
            id,
            culture: culture.to_owned(),
            name: name.to_owned(),
        }
    }
}

/// Term ids are exported either as numbers or as numeric strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    match Id::deserialize(deserializer)? {
        Id::Number(id) => Ok(id),
        Id::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Where the physical object type terms come from.
pub trait TermSource {
    fn physical_object_types(&self) -> Result<Vec<TaxonomyTerm>, ImportError>;
}

/// Terms held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTermSource {
    terms: Vec<TaxonomyTerm>,
}

impl InMemoryTermSource {
    pub fn new(terms: Vec<TaxonomyTerm>) -> Self {
        Self { terms }
    }
}

impl TermSource for InMemoryTermSource {
    fn physical_object_types(&self) -> Result<Vec<TaxonomyTerm>, ImportError> {
        Ok(self.terms.clone())
    }
}

/// Terms read from a JSON file holding an array of
/// `{"id": .., "culture": .., "name": ..}` objects.
#[derive(Debug, Clone)]
pub struct JsonTermSource {
    path: PathBuf,
}

impl JsonTermSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TermSource for JsonTermSource {
    fn physical_object_types(&self) -> Result<Vec<TaxonomyTerm>, ImportError> {
        let file = File::open(&self.path).map_err(|error| {
            ImportError::Configuration(format!(
                "Couldn't load physical object type terms from {}: {}",
                self.path.display(),
                error
            ))
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|error| {
            ImportError::Configuration(format!(
                "Invalid physical object type terms in {}: {}",
                self.path.display(),
                error
            ))
        })
    }
}

/// culture -> lowercase type name -> type id
///
/// Built once before the first row is read and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeLookupTable {
    ids: HashMap<String, HashMap<String, i64>>,
}

impl TypeLookupTable {
    /// Indexes `terms` by culture and lowercased name.
    ///
    /// # Errors
    ///
    /// [`ImportError::Configuration`] when there are no terms at all, or when
    /// one name is bound to two different ids within a culture.
    pub fn from_terms<T>(terms: T) -> Result<Self, ImportError>
    where
        T: IntoIterator<Item = TaxonomyTerm>,
    {
        let mut ids: HashMap<String, HashMap<String, i64>> = HashMap::new();

        for term in terms {
            let culture = normalize(&term.culture);
            let name = normalize(&term.name);

            match ids.entry(culture.clone()).or_default().entry(name) {
                Entry::Vacant(entry) => {
                    entry.insert(term.id);
                }
                Entry::Occupied(entry) if *entry.get() != term.id => {
                    return Err(ImportError::Configuration(format!(
                        "physical object type \"{}\" is bound to ids {} and {} for culture \"{}\"",
                        entry.key(),
                        entry.get(),
                        term.id,
                        culture
                    )));
                }
                Entry::Occupied(_) => {}
            }
        }

        if ids.is_empty() {
            return Err(ImportError::Configuration(
                "Couldn't load physical object type terms".to_string(),
            ));
        }

        debug!("Physical object type lookup table built for {} cultures", ids.len());

        Ok(Self { ids })
    }

    pub fn from_source(source: &dyn TermSource) -> Result<Self, ImportError> {
        Self::from_terms(source.physical_object_types()?)
    }

    /// Both keys are trimmed and lowercased before the lookup.
    pub fn lookup(&self, culture: &str, name: &str) -> Option<i64> {
        self.ids
            .get(&normalize(culture))
            .and_then(|names| names.get(&normalize(name)))
            .copied()
    }

    pub fn cultures(&self) -> impl Iterator<Item = &str> {
        self.ids.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
