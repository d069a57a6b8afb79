/// JSON output of imported records.
///
/// [`json_writer::JsonItemWriter`] serializes every record it is given into
/// one JSON array, which makes it usable as a sink for dry runs or for
/// handing records over to another system.
///
/// # Examples
///
/// ```
/// use physical_object_import::core::item::ItemWriter;
/// use physical_object_import::item::json::JsonItemWriterBuilder;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Shelf {
///     name: String,
/// }
///
/// let path = std::env::temp_dir().join("shelves-doc.json");
/// let writer = JsonItemWriterBuilder::new().path(&path).build().unwrap();
///
/// ItemWriter::<Shelf>::open(&writer).unwrap();
/// writer.write(&Shelf { name: "A".to_string() }).unwrap();
/// writer.write(&Shelf { name: "B".to_string() }).unwrap();
/// ItemWriter::<Shelf>::close(&writer).unwrap();
///
/// let json = std::fs::read_to_string(&path).unwrap();
/// assert_eq!(json, r#"[{"name":"A"},{"name":"B"}]"#);
/// # std::fs::remove_file(&path).ok();
/// ```
pub mod json_writer;

pub use json_writer::{JsonItemWriter, JsonItemWriterBuilder};
