use std::{fs::File, io::Read, path::Path};

use crate::{
    core::{item::ItemProcessorResult, rows::ImportRows},
    error::ImportError,
    item::csv::{
        RawRow,
        csv_reader::{CsvRowReader, CsvRowReaderBuilder},
    },
};

use super::{
    processor::PhysicalObjectProcessor,
    record::NormalizedRecord,
};

/// Lazy sequence of processed physical object rows, owning its reader.
pub type PhysicalObjectRows<'p, R> = ImportRows<'p, CsvRowReader<R>, RawRow, NormalizedRecord>;

/// Reads physical object CSV files and validates their rows.
///
/// # Examples
///
/// ```
/// use physical_object_import::physical_object::{
///     pipeline::RowImportPipeline,
///     processor::PhysicalObjectProcessorBuilder,
///     type_lookup::{TaxonomyTerm, TypeLookupTable},
/// };
///
/// let type_lookup = TypeLookupTable::from_terms(vec![
///     TaxonomyTerm::new(2, "en", "Folder"),
/// ]).unwrap();
///
/// let processor = PhysicalObjectProcessorBuilder::new()
///     .type_lookup(type_lookup)
///     .default_culture(Some("en".to_string()))
///     .build()
///     .unwrap();
/// let pipeline = RowImportPipeline::new(processor);
///
/// let csv = "name,type,location\nDJ001,Folder,Shelf A\n,,\n";
/// let reader = pipeline.open_reader(csv.as_bytes()).unwrap();
///
/// let rows: Vec<_> = pipeline.import(reader).collect();
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].1.as_ref().unwrap().item.type_id(), Some(2));
/// assert!(rows[1].1.is_err());
/// ```
pub struct RowImportPipeline<'a> {
    processor: PhysicalObjectProcessor<'a>,
    column_delimiter: u8,
}

impl<'a> RowImportPipeline<'a> {
    pub fn new(processor: PhysicalObjectProcessor<'a>) -> Self {
        Self {
            processor,
            column_delimiter: b',',
        }
    }

    pub fn with_column_delimiter(mut self, delimiter: u8) -> Self {
        self.column_delimiter = delimiter;
        self
    }

    pub fn processor(&self) -> &PhysicalObjectProcessor<'a> {
        &self.processor
    }

    /// Opens a physical object CSV file.
    ///
    /// # Errors
    ///
    /// A file error when `path` is missing, not a file or unreadable, and
    /// [`ImportError::Header`] when the header line is missing or has a blank
    /// or duplicate column. A header without `name` and `location` is
    /// accepted: each of its rows then fails on its own.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<CsvRowReader<File>, ImportError> {
        self.reader_builder().from_path(path)
    }

    /// Same as [`open`](Self::open) for data that is not in a file.
    pub fn open_reader<R: Read>(&self, rdr: R) -> Result<CsvRowReader<R>, ImportError> {
        self.reader_builder().from_reader(rdr)
    }

    /// Validates the rows of `reader` lazily, in file order.
    ///
    /// The sequence owns the reader; stopping early and dropping the sequence
    /// closes the file.
    pub fn import<R: Read>(&self, reader: CsvRowReader<R>) -> PhysicalObjectRows<'_, R> {
        ImportRows::new(reader, &self.processor)
    }

    pub fn process_row(&self, row: &RawRow) -> ItemProcessorResult<NormalizedRecord> {
        self.processor.process_row(row)
    }

    fn reader_builder(&self) -> CsvRowReaderBuilder {
        reader_builder(self.column_delimiter)
    }
}

/// CSV reader settings for physical object files.
pub fn reader_builder(column_delimiter: u8) -> CsvRowReaderBuilder {
    CsvRowReaderBuilder::new().delimiter(column_delimiter)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::{
        error::{Severity, ValidationKind},
        physical_object::{
            processor::PhysicalObjectProcessorBuilder,
            type_lookup::{TaxonomyTerm, TypeLookupTable},
        },
    };

    use super::*;

    fn pipeline<'a>() -> RowImportPipeline<'a> {
        let type_lookup = TypeLookupTable::from_terms(vec![
            TaxonomyTerm::new(1, "en", "Hollinger box"),
            TaxonomyTerm::new(2, "en", "Folder"),
            TaxonomyTerm::new(2, "fr", "Chemise"),
        ])
        .unwrap();

        let processor = PhysicalObjectProcessorBuilder::new()
            .type_lookup(type_lookup)
            .default_culture(Some("en".to_string()))
            .build()
            .unwrap();

        RowImportPipeline::new(processor)
    }

    const CSV: &str = "name,type,location,culture
\" DJ001\",Folder,\"Aisle 25, Shelf D\",en
\"\",Chemise,\"\",fr
DJ002,Hollinger box,\"Vault, shelf 0074\",
";

    #[test]
    fn rows_come_out_in_file_order_with_their_index() -> anyhow::Result<()> {
        let pipeline = pipeline();
        let reader = pipeline.open_reader(CSV.as_bytes())?;

        let rows: Vec<_> = pipeline.import(reader).collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows.iter().map(|(index, _)| *index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let first = rows[0].1.as_ref().unwrap();
        assert_eq!(first.item.name(), "DJ001");
        assert_eq!(first.item.location(), Some("Aisle 25, Shelf D"));

        let error = rows[1].1.as_ref().unwrap_err();
        assert_eq!(error.kind(), ValidationKind::MissingRequiredField);
        assert_eq!(error.severity(), Severity::Fatal);
        assert_eq!(error.row_index(), 2);

        let third = rows[2].1.as_ref().unwrap();
        assert_eq!(third.item.type_id(), Some(1));
        assert_eq!(third.item.culture(), "en");
        Ok(())
    }

    #[test]
    fn open_counts_rows_and_reads_the_header() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("windows.csv");
        fs::write(&path, CSV.replace('\n', "\r\n"))?;

        let pipeline = pipeline();
        let reader = pipeline.open(&path)?;

        assert_eq!(reader.headers(), ["name", "type", "location", "culture"]);

        let rows = pipeline.import(reader);
        assert_eq!(rows.total_rows(), Some(3));
        assert_eq!(rows.filter(|(_, result)| result.is_ok()).count(), 2);
        Ok(())
    }

    #[test]
    fn header_without_name_or_location_fails_every_row() -> anyhow::Result<()> {
        let pipeline = pipeline();
        let reader = pipeline.open_reader("type,culture\nFolder,en\nFolder,en\n".as_bytes())?;

        let rows: Vec<_> = pipeline.import(reader).collect();

        assert_eq!(rows.len(), 2);
        for (index, (row_index, result)) in rows.iter().enumerate() {
            assert_eq!(*row_index, index + 1);
            let error = result.as_ref().unwrap_err();
            assert_eq!(error.kind(), ValidationKind::MissingRequiredField);
            assert_eq!(error.row_index(), index + 1);
        }
        Ok(())
    }

    #[test]
    fn blank_header_column_is_rejected() {
        let result = pipeline().open_reader("name,,type\nDJ001,x,Folder\n".as_bytes());
        assert!(matches!(result, Err(ImportError::Header(_))));
    }

    #[test]
    fn missing_file_is_a_file_error() {
        let result = pipeline().open("bad_name.csv");
        assert!(matches!(result, Err(ImportError::FileNotFound { .. })));
    }

    #[test]
    fn early_termination_releases_the_reader() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("unix.csv");
        fs::write(&path, CSV)?;

        let pipeline = pipeline();
        let first = {
            let mut rows = pipeline.import(pipeline.open(&path)?);
            rows.next()
        };

        assert!(matches!(first, Some((1, Ok(_)))));
        // Nothing holds the file any more
        fs::remove_file(&path)?;
        Ok(())
    }

    #[test]
    fn semicolon_separated_files() -> anyhow::Result<()> {
        let pipeline = pipeline().with_column_delimiter(b';');
        let reader = pipeline.open_reader("name;location\nDJ001;Shelf A, top\n".as_bytes())?;

        let rows: Vec<_> = pipeline.import(reader).collect();
        let record = &rows[0].1.as_ref().unwrap().item;
        assert_eq!(record.location(), Some("Shelf A, top"));
        Ok(())
    }
}
