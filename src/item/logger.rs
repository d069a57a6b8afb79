use std::fmt::Debug;

use log::info;

use crate::core::item::{ItemWriter, ItemWriterResult};

/// Sink that persists nothing and logs every record at info level.
#[derive(Default)]
pub struct LoggerWriter {}

impl<O> ItemWriter<O> for LoggerWriter
where
    O: Debug,
{
    fn write(&self, item: &O) -> ItemWriterResult {
        info!("Record:{:?}", item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_never_fails() {
        let writer = LoggerWriter::default();
        assert!(writer.write(&("DJ001", Some(2))).is_ok());
        assert!(ItemWriter::<u8>::close(&writer).is_ok());
    }
}
