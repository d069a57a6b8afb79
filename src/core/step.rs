use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use log::{debug, error, info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ImportError;

use super::{
    build_name,
    item::{ItemProcessor, ItemReader, ItemWriter},
    rows::ImportRows,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Starting,
    Started,
    Success,
    Error,
}

/// Counters and timing of one step run.
#[derive(Debug)]
pub struct StepExecution {
    /// Unique identifier for this step execution
    pub id: Uuid,
    pub name: String,
    pub status: StepStatus,
    pub start_time: Option<Instant>,
    pub end_time: Option<Instant>,
    pub duration: Option<Duration>,
    /// Number of data rows read, valid or not
    pub read_count: usize,
    /// Number of records handed to the writer successfully
    pub write_count: usize,
    /// Number of rows skipped because of a fatal validation error
    pub skip_count: usize,
    /// Number of imported rows that carried at least one warning
    pub warning_count: usize,
    /// Number of valid records the writer rejected
    pub write_error_count: usize,
    /// 1-based indexes of the skipped rows
    pub skipped_rows: Vec<usize>,
}

impl StepExecution {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            status: StepStatus::Starting,
            start_time: None,
            end_time: None,
            duration: None,
            read_count: 0,
            write_count: 0,
            skip_count: 0,
            warning_count: 0,
            write_error_count: 0,
            skipped_rows: Vec::new(),
        }
    }

    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            rows_read: self.read_count,
            rows_processed: self.write_count,
            rows_skipped: self.skip_count,
            rows_with_warnings: self.warning_count,
            rows_failed: self.write_error_count,
            skipped_rows: self.skipped_rows.clone(),
        }
    }
}

/// What a caller gets back from an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub rows_read: usize,
    /// Rows turned into records and persisted
    pub rows_processed: usize,
    pub rows_skipped: usize,
    pub rows_with_warnings: usize,
    /// Valid rows the sink failed to persist
    pub rows_failed: usize,
    pub skipped_rows: Vec<usize>,
}

impl ImportSummary {
    /// Adds the counters of another summary, used when a run has several steps.
    pub fn merge(&mut self, other: &ImportSummary) {
        self.rows_read += other.rows_read;
        self.rows_processed += other.rows_processed;
        self.rows_skipped += other.rows_skipped;
        self.rows_with_warnings += other.rows_with_warnings;
        self.rows_failed += other.rows_failed;
        self.skipped_rows.extend_from_slice(&other.skipped_rows);
    }
}

pub trait Step {
    fn get_name(&self) -> &str;

    /// Runs the step, recording its progress in `step_execution`.
    ///
    /// Row level problems are counted, not returned: an `Err` means the step
    /// itself could not run to completion.
    fn execute(&self, step_execution: &mut StepExecution) -> Result<(), ImportError>;
}

/// Drives a reader through a processor into a writer, one row at a time.
pub struct RowImportStep<'a, I, O> {
    name: String,
    reader: &'a dyn ItemReader<I>,
    processor: &'a dyn ItemProcessor<I, O>,
    writer: &'a dyn ItemWriter<O>,
}

impl<I, O: Display> Step for RowImportStep<'_, I, O> {
    fn get_name(&self) -> &str {
        &self.name
    }

    fn execute(&self, step_execution: &mut StepExecution) -> Result<(), ImportError> {
        let start = Instant::now();
        step_execution.start_time = Some(start);
        step_execution.status = StepStatus::Started;

        debug!("Start of step: {}, id: {}", self.name, step_execution.id);

        if let Err(err) = self.writer.open() {
            return self.fail(step_execution, start, err);
        }

        let rows = ImportRows::new(self.reader, self.processor);
        let total = rows.total_rows();

        for (row_index, result) in rows {
            step_execution.read_count += 1;
            let progress = Self::progress(row_index, total);

            let processed = match result {
                Ok(processed) => processed,
                Err(err) => {
                    error!("Skipping row [{}]: {}", progress, err);
                    step_execution.skip_count += 1;
                    step_execution.skipped_rows.push(row_index);
                    continue;
                }
            };

            for warning in &processed.warnings {
                warn!("Warning on row [{}]: {}", progress, warning);
            }

            match self.writer.write(&processed.item) {
                Ok(()) => {
                    step_execution.write_count += 1;
                    if processed.has_warnings() {
                        step_execution.warning_count += 1;
                    }
                    info!("Imported row [{}]: {}", progress, processed.item);
                }
                Err(err) => {
                    step_execution.write_error_count += 1;
                    error!("ItemWriter error on row [{}]: {}", progress, err);
                }
            }
        }

        if let Err(err) = self.writer.flush().and_then(|_| self.writer.close()) {
            return self.fail(step_execution, start, err);
        }

        step_execution.status = StepStatus::Success;
        Self::finish(step_execution, start);

        debug!(
            "End of step: {}, read: {}, written: {}, skipped: {}",
            self.name,
            step_execution.read_count,
            step_execution.write_count,
            step_execution.skip_count
        );

        Ok(())
    }
}

impl<I, O> RowImportStep<'_, I, O> {
    fn progress(row_index: usize, total: Option<usize>) -> String {
        match total {
            Some(total) => format!("{}/{}", row_index, total),
            None => row_index.to_string(),
        }
    }

    fn finish(step_execution: &mut StepExecution, start: Instant) {
        step_execution.end_time = Some(Instant::now());
        step_execution.duration = Some(start.elapsed());
    }

    fn fail(
        &self,
        step_execution: &mut StepExecution,
        start: Instant,
        err: ImportError,
    ) -> Result<(), ImportError> {
        error!("Step {} failed: {}", self.name, err);
        step_execution.status = StepStatus::Error;
        Self::finish(step_execution, start);
        Err(err)
    }
}

pub struct RowImportStepBuilder<'a, I, O> {
    name: String,
    reader: Option<&'a dyn ItemReader<I>>,
    processor: Option<&'a dyn ItemProcessor<I, O>>,
    writer: Option<&'a dyn ItemWriter<O>>,
}

impl<'a, I, O> RowImportStepBuilder<'a, I, O> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            reader: None,
            processor: None,
            writer: None,
        }
    }

    pub fn reader(mut self, reader: &'a dyn ItemReader<I>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn processor(mut self, processor: &'a dyn ItemProcessor<I, O>) -> Self {
        self.processor = Some(processor);
        self
    }

    pub fn writer(mut self, writer: &'a dyn ItemWriter<O>) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn build(self) -> Result<RowImportStep<'a, I, O>, ImportError> {
        let missing = |part: &str| {
            ImportError::Configuration(format!("step {} has no {}", self.name, part))
        };

        Ok(RowImportStep {
            reader: self.reader.ok_or_else(|| missing("reader"))?,
            processor: self.processor.ok_or_else(|| missing("processor"))?,
            writer: self.writer.ok_or_else(|| missing("writer"))?,
            name: self.name,
        })
    }
}

/// Entry point for building steps.
pub struct StepBuilder {
    name: String,
}

impl StepBuilder {
    /// A step named `name`, or a random name when `name` is empty.
    pub fn new(name: &str) -> Self {
        let name = if name.is_empty() {
            build_name()
        } else {
            name.to_owned()
        };
        Self { name }
    }

    pub fn rows<'a, I, O>(self) -> RowImportStepBuilder<'a, I, O> {
        RowImportStepBuilder::new(&self.name)
    }
}
