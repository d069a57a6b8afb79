//! Mock versions of the import collaborators
use mockall::mock;

use physical_object_import::{
    core::item::{ItemWriter, ItemWriterResult},
    physical_object::{NormalizedRecord, resolver::ReferenceResolver},
};

mock! {
    pub RecordWriter {}
    impl ItemWriter<NormalizedRecord> for RecordWriter {
        fn write(&self, item: &NormalizedRecord) -> ItemWriterResult;
        fn flush(&self) -> ItemWriterResult;
        fn open(&self) -> ItemWriterResult;
        fn close(&self) -> ItemWriterResult;
    }
}

mock! {
    pub Descriptions {}
    impl ReferenceResolver for Descriptions {
        fn resolve(&self, key: &str) -> Option<i64>;
    }
}
