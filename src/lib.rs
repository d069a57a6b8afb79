#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 # Physical object import

 Imports archival physical objects (boxes, folders, shelves...) from a CSV
 file, one row at a time. Every row is validated and normalized before it
 reaches a sink: its culture is resolved, its type name is matched against a
 controlled vocabulary, and the descriptions it belongs to are resolved from
 their slugs.

 ## Core Concepts

- **Job:** the whole import run. It logs when it starts and completes, and
  aggregates the counters of its steps.
- **Step:** reads, validates and writes rows. A row that fails a fatal rule
  is logged as skipped and the run goes on; warnings are logged and the row
  is still written.
- **ItemReader:** the CSV row reader, which checks the header before the
  first row is read.
- **ItemProcessor:** the physical object rules, turning a raw row into a
  `NormalizedRecord`.
- **ItemWriter:** where the records go: the JSON exporter, the logger, or
  your own persistence layer.

 ## Features

| **Feature**   | **Description**                                               |
|---------------|---------------------------------------------------------------|
| json          | Enables the JSON `ItemWriter`                                 |
| logger        | Enables a logger `ItemWriter`, useful for dry runs            |
| full          | Enables all available features                                |

 ## Getting Started

```toml
[dependencies]
physical-object-import = { version = "<version>", features = ["json"] }
```

Then, on your main.rs:

```rust
# use physical_object_import::{
#     config::ImportOptions,
#     error::ImportError,
#     item::json::JsonItemWriterBuilder,
#     physical_object::{
#         resolver::InMemoryReferenceResolver,
#         type_lookup::{InMemoryTermSource, TaxonomyTerm},
#     },
#     task::PhysicalObjectImportTaskBuilder,
# };
# use std::{env::temp_dir, fs};
fn main() -> Result<(), ImportError> {
    let csv = "name,type,location,culture,descriptionSlugs
DJ001,Hollinger box,Aisle 25,en,fonds-a
,Folder,,en,
DJ002,Chemise,Vault,fr,fonds-a|unknown";

    let path = temp_dir().join("physical_objects.csv");
    fs::write(&path, csv).unwrap();

    let terms = InMemoryTermSource::new(vec![
        TaxonomyTerm::new(1, "en", "Hollinger box"),
        TaxonomyTerm::new(2, "en", "Folder"),
        TaxonomyTerm::new(2, "fr", "Chemise"),
    ]);
    let descriptions = InMemoryReferenceResolver::new([("fonds-a", 10)]);

    let writer = JsonItemWriterBuilder::new()
        .path(temp_dir().join("physical_objects.json"))
        .build()?;

    let task = PhysicalObjectImportTaskBuilder::new()
        .options(ImportOptions::new().set_default_culture(Some("en".to_string())))
        .terms(&terms)
        .references(&descriptions)
        .writer(&writer)
        .build()?;

    let summary = task.execute(&path)?;

    assert_eq!(summary.rows_processed, 2);
    assert_eq!(summary.rows_skipped, 1);
    assert_eq!(summary.rows_with_warnings, 1);
    assert_eq!(summary.skipped_rows, vec![2]);

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Core module for row imports
pub mod core;

/// Error types for imports
pub mod error;

#[doc(inline)]
pub use error::*;

/// Set of item readers / writers (csv reader, json and logger writers)
pub mod item;

/// Physical object rules and pipeline
pub mod physical_object;

/// Import options
pub mod config;

/// Import task, the entry point of an import run
pub mod task;
