#![allow(dead_code)]

pub mod mocks;

use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
};

use physical_object_import::{
    core::item::{ItemWriter, ItemWriterResult},
    physical_object::{
        NormalizedRecord,
        type_lookup::{InMemoryTermSource, TaxonomyTerm},
    },
};

pub use mocks::{MockDescriptions, MockRecordWriter};

/// Three rows, the second one without name and location.
pub const PHYSICAL_OBJECTS: &str = "name,type,location,culture,descriptionSlugs
DJ001,Hollinger box,\"Aisle 25, Shelf D\",en,fonds-a
,Folder,,en,
DJ002,Chemise,Vault,fr,fonds-a|missing
";

pub fn physical_object_types() -> InMemoryTermSource {
    InMemoryTermSource::new(vec![
        TaxonomyTerm::new(1, "en", "Hollinger box"),
        TaxonomyTerm::new(1, "fr", "Boîte Hollinger"),
        TaxonomyTerm::new(2, "en", "Folder"),
        TaxonomyTerm::new(2, "fr", "Chemise"),
    ])
}

pub fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Unable to write CSV file");
    path
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Keeps every record it is given.
#[derive(Default)]
pub struct RecordingWriter {
    records: RefCell<Vec<NormalizedRecord>>,
}

impl RecordingWriter {
    pub fn records(&self) -> Vec<NormalizedRecord> {
        self.records.borrow().clone()
    }
}

impl ItemWriter<NormalizedRecord> for RecordingWriter {
    fn write(&self, item: &NormalizedRecord) -> ItemWriterResult {
        self.records.borrow_mut().push(item.clone());
        Ok(())
    }
}
