/// CSV input for an import.
///
/// [`csv_reader::CsvRowReader`] reads a delimited file with a mandatory
/// header line and yields one [`RawRow`] per data line. Quoted fields may
/// contain the delimiter or line breaks; `\n` and `\r\n` line endings are
/// both accepted; every field is trimmed.
///
/// # Examples
///
/// ```
/// use physical_object_import::core::item::ItemReader;
/// use physical_object_import::item::csv::csv_reader::CsvRowReaderBuilder;
///
/// let csv_data = "\
/// name,type,location,culture
/// DJ001,Folder,\"Aisle 25, Shelf D\",en
/// DJ002,Boîte Hollinger,\"Voûte, étagère 0074\",fr
/// ";
///
/// let reader = CsvRowReaderBuilder::new()
///     .from_reader(csv_data.as_bytes())
///     .unwrap();
///
/// let mut names = Vec::new();
/// while let Some(row) = reader.read().unwrap() {
///     names.push(row.value("name").to_string());
/// }
///
/// assert_eq!(names, vec!["DJ001", "DJ002"]);
/// ```

/// A module providing facilities for reading CSV data rows.
pub mod csv_reader;

/// The untyped row produced by the CSV reader.
pub mod raw_row;

pub use raw_row::RawRow;
