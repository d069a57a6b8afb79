use crate::error::{ImportError, ValidationError};

/// Result of [`ItemReader::read`]: `Ok(None)` once the source is exhausted.
pub type ItemReaderResult<I> = Result<Option<I>, ImportError>;

/// Result of [`ItemProcessor::process`]. A fatal [`ValidationError`] means the
/// item must be skipped.
pub type ItemProcessorResult<O> = Result<Processed<O>, ValidationError>;

pub type ItemWriterResult = Result<(), ImportError>;

/// A successfully processed item together with the warnings raised while
/// processing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Processed<O> {
    pub item: O,
    pub warnings: Vec<ValidationError>,
}

impl<O> Processed<O> {
    pub fn new(item: O) -> Self {
        Self {
            item,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(item: O, warnings: Vec<ValidationError>) -> Self {
        Self { item, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Retrieves the input of a step, one item at a time.
pub trait ItemReader<I> {
    fn read(&self) -> ItemReaderResult<I>;

    /// Total number of items this reader will yield, when known up front.
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

impl<I, T: ItemReader<I> + ?Sized> ItemReader<I> for &T {
    fn read(&self) -> ItemReaderResult<I> {
        (**self).read()
    }

    fn size_hint(&self) -> Option<usize> {
        (**self).size_hint()
    }
}

/// Business logic applied to every item read.
pub trait ItemProcessor<I, O> {
    fn process(&self, item: &I) -> ItemProcessorResult<O>;
}

/// Output of a step. Every call to `write` is independent from the others.
pub trait ItemWriter<O> {
    fn write(&self, item: &O) -> ItemWriterResult;

    fn flush(&self) -> ItemWriterResult {
        Ok(())
    }

    fn open(&self) -> ItemWriterResult {
        Ok(())
    }

    fn close(&self) -> ItemWriterResult {
        Ok(())
    }
}

/// Processor that passes items through untouched.
#[derive(Default)]
pub struct DefaultProcessor {}

impl<I: Clone> ItemProcessor<I, I> for DefaultProcessor {
    fn process(&self, item: &I) -> ItemProcessorResult<I> {
        Ok(Processed::new(item.clone()))
    }
}
