//! The physical object import task: what a command line or scheduled job
//! calls with a file path and [`ImportOptions`].

use std::{cell::RefCell, path::Path};

use log::info;

use crate::{
    config::ImportOptions,
    core::{
        item::ItemWriter,
        job::{Job, JobBuilder},
        step::{ImportSummary, StepBuilder},
    },
    error::ImportError,
    item::csv::{RawRow, csv_reader},
    physical_object::{
        NormalizedRecord, PhysicalObjectProcessorBuilder, RowImportPipeline, pipeline,
        resolver::ReferenceResolver,
        type_lookup::{TermSource, TypeLookupTable},
    },
};

const STEP_NAME: &str = "physical-object-import";

/// Imports a physical object CSV file into a sink.
///
/// Every call to [`execute`](Self::execute) is an independent run: the file
/// is checked, the type lookup table is built from the term source, then the
/// rows are read, validated and written one at a time.
pub struct PhysicalObjectImportTask<'a> {
    options: ImportOptions,
    terms: &'a dyn TermSource,
    references: Option<&'a dyn ReferenceResolver>,
    writer: &'a dyn ItemWriter<NormalizedRecord>,
    header: RefCell<Option<Vec<String>>>,
}

impl PhysicalObjectImportTask<'_> {
    /// Runs an import of the file at `path`.
    ///
    /// # Errors
    ///
    /// In this order, and always before the first row is read:
    /// - [`ImportError::FileNotFound`] or [`ImportError::FileUnreadable`]
    ///   when `path` can not be read
    /// - [`ImportError::Configuration`] when the column delimiter is not a
    ///   single ASCII character
    /// - [`ImportError::Header`] when the header line is missing or invalid
    /// - [`ImportError::Configuration`] when the other options are invalid or
    ///   the type vocabulary can not be loaded
    ///
    /// Afterwards only a failing writer `open` or `close` aborts the run, as
    /// [`ImportError::Step`]. Invalid rows are counted in the summary.
    pub fn execute<P: AsRef<Path>>(&self, path: P) -> Result<ImportSummary, ImportError> {
        let path = path.as_ref();
        csv_reader::check_file(path)?;
        let column_delimiter = self.options.column_delimiter_byte()?;

        let reader = pipeline::reader_builder(column_delimiter).from_path(path)?;
        self.header.replace(Some(reader.headers().to_vec()));

        self.options.validate()?;
        let type_lookup = TypeLookupTable::from_source(self.terms)?;

        let mut processor = PhysicalObjectProcessorBuilder::new()
            .type_lookup(type_lookup)
            .default_culture(self.options.default_culture().map(str::to_owned))
            .process_culture(self.options.process_culture().map(str::to_owned))
            .multi_value_delimiter(self.options.multi_value_delimiter());
        if let Some(references) = self.references {
            processor = processor.references(references);
        }
        let pipeline =
            RowImportPipeline::new(processor.build()?).with_column_delimiter(column_delimiter);

        if self.options.index_on_load() {
            info!("Search index will be updated while importing");
        }

        let step = StepBuilder::new(STEP_NAME)
            .rows::<RawRow, NormalizedRecord>()
            .reader(&reader)
            .processor(pipeline.processor())
            .writer(self.writer)
            .build()?;

        let job = JobBuilder::new()
            .source(path.display().to_string())
            .start(&step)
            .build();

        let summary = job.run()?.summary();

        info!(
            "{} rows read: {} imported, {} skipped, {} with warnings, {} not persisted",
            summary.rows_read,
            summary.rows_processed,
            summary.rows_skipped,
            summary.rows_with_warnings,
            summary.rows_failed
        );

        Ok(summary)
    }

    /// Header of the last file opened by [`execute`](Self::execute), `None`
    /// before any import.
    pub fn header(&self) -> Option<Vec<String>> {
        self.header.borrow().clone()
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    pub fn index_on_load(&self) -> bool {
        self.options.index_on_load()
    }
}

#[derive(Default)]
pub struct PhysicalObjectImportTaskBuilder<'a> {
    options: ImportOptions,
    terms: Option<&'a dyn TermSource>,
    references: Option<&'a dyn ReferenceResolver>,
    writer: Option<&'a dyn ItemWriter<NormalizedRecord>>,
}

impl<'a> PhysicalObjectImportTaskBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options of every run. A missing process culture is read from
    /// [`DEFAULT_CULTURE_ENV`](crate::config::DEFAULT_CULTURE_ENV) when the
    /// task is built.
    pub fn options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn terms(mut self, terms: &'a dyn TermSource) -> Self {
        self.terms = Some(terms);
        self
    }

    pub fn references(mut self, references: &'a dyn ReferenceResolver) -> Self {
        self.references = Some(references);
        self
    }

    pub fn writer(mut self, writer: &'a dyn ItemWriter<NormalizedRecord>) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn build(self) -> Result<PhysicalObjectImportTask<'a>, ImportError> {
        let terms = self.terms.ok_or_else(|| {
            ImportError::Configuration("import task has no physical object type terms".to_string())
        })?;
        let writer = self
            .writer
            .ok_or_else(|| ImportError::Configuration("import task has no writer".to_string()))?;

        Ok(PhysicalObjectImportTask {
            options: self.options.with_env_fallback(),
            terms,
            references: self.references,
            writer,
            header: RefCell::new(None),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::{
        core::item::ItemWriterResult,
        physical_object::type_lookup::{InMemoryTermSource, TaxonomyTerm},
    };

    use super::*;

    struct NullWriter;

    impl ItemWriter<NormalizedRecord> for NullWriter {
        fn write(&self, _item: &NormalizedRecord) -> ItemWriterResult {
            Ok(())
        }
    }

    fn terms() -> InMemoryTermSource {
        InMemoryTermSource::new(vec![TaxonomyTerm::new(2, "en", "Folder")])
    }

    #[test]
    fn header_is_known_only_after_an_import() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("unix.csv");
        fs::write(&path, "name,type,location,culture\nDJ001,Folder,Shelf,en\n")?;

        let terms = terms();
        let task = PhysicalObjectImportTaskBuilder::new()
            .terms(&terms)
            .writer(&NullWriter)
            .build()?;

        assert_eq!(task.header(), None);

        let summary = task.execute(&path)?;

        assert_eq!(summary.rows_processed, 1);
        assert_eq!(
            task.header(),
            Some(vec![
                "name".to_string(),
                "type".to_string(),
                "location".to_string(),
                "culture".to_string()
            ])
        );
        Ok(())
    }

    #[test]
    fn file_errors_come_before_configuration_errors() -> anyhow::Result<()> {
        let empty = InMemoryTermSource::default();
        let task = PhysicalObjectImportTaskBuilder::new()
            .terms(&empty)
            .writer(&NullWriter)
            .build()?;

        let result = task.execute("bad_name.csv");
        assert!(matches!(result, Err(ImportError::FileNotFound { .. })));

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("unix.csv");
        fs::write(&path, "name\nDJ001\n")?;

        let result = task.execute(&path);
        assert!(matches!(result, Err(ImportError::Configuration(_))));
        Ok(())
    }

    #[test]
    fn builder_requires_terms_and_writer() {
        let terms = terms();

        let no_writer = PhysicalObjectImportTaskBuilder::new().terms(&terms).build();
        assert!(matches!(no_writer, Err(ImportError::Configuration(_))));

        let no_terms = PhysicalObjectImportTaskBuilder::new().writer(&NullWriter).build();
        assert!(matches!(no_terms, Err(ImportError::Configuration(_))));
    }

    #[test]
    fn index_on_load_comes_from_the_options() -> anyhow::Result<()> {
        let terms = terms();
        let task = PhysicalObjectImportTaskBuilder::new()
            .options(ImportOptions::new().set_index_on_load(true))
            .terms(&terms)
            .writer(&NullWriter)
            .build()?;

        assert!(task.index_on_load());
        assert!(task.options().index_on_load());
        Ok(())
    }
}
