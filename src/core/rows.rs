use std::marker::PhantomData;

use log::debug;

use crate::error::{ValidationError, ValidationKind};

use super::item::{ItemProcessor, ItemProcessorResult, ItemReader};

/// Lazy, single pass sequence of processed rows.
///
/// Yields `(row_index, result)` for every data row in source order, where
/// `row_index` is 1-based. Read failures become fatal
/// [`ValidationKind::MalformedRow`] errors for the row they occur on and the
/// sequence goes on with the next row.
///
/// The reader is owned by the sequence: dropping the sequence, whether it was
/// consumed or not, drops the reader and whatever handle it holds.
pub struct ImportRows<'p, R, I, O> {
    reader: R,
    processor: &'p dyn ItemProcessor<I, O>,
    row_index: usize,
    exhausted: bool,
    _item: PhantomData<I>,
}

impl<'p, R, I, O> ImportRows<'p, R, I, O>
where
    R: ItemReader<I>,
{
    pub fn new(reader: R, processor: &'p dyn ItemProcessor<I, O>) -> Self {
        Self {
            reader,
            processor,
            row_index: 0,
            exhausted: false,
            _item: PhantomData,
        }
    }

    /// Number of rows yielded so far.
    pub fn rows_read(&self) -> usize {
        self.row_index
    }

    pub fn total_rows(&self) -> Option<usize> {
        self.reader.size_hint()
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }
}

impl<R, I, O> Iterator for ImportRows<'_, R, I, O>
where
    R: ItemReader<I>,
{
    type Item = (usize, ItemProcessorResult<O>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        match self.reader.read() {
            Ok(Some(item)) => {
                self.row_index += 1;
                Some((self.row_index, self.processor.process(&item)))
            }
            Ok(None) => {
                debug!("Reader exhausted after {} rows", self.row_index);
                self.exhausted = true;
                None
            }
            Err(error) => {
                self.row_index += 1;
                let error = ValidationError::fatal(
                    ValidationKind::MalformedRow,
                    self.row_index,
                    error.to_string(),
                );
                Some((self.row_index, Err(error)))
            }
        }
    }
}
