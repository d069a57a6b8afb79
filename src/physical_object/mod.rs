//! Physical object rows: validation rules, vocabulary lookups and the
//! pipeline tying them to a CSV file.

pub mod culture;

pub mod pipeline;

pub mod processor;

pub mod record;

pub mod resolver;

pub mod type_lookup;

pub use pipeline::RowImportPipeline;
pub use processor::{PhysicalObjectProcessor, PhysicalObjectProcessorBuilder};
pub use record::NormalizedRecord;
