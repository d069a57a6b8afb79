use std::{
    cell::{Cell, RefCell},
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    core::item::{ItemWriter, ItemWriterResult},
    error::ImportError,
};

/// Writes records as the elements of a single JSON array.
///
/// `open` writes the opening bracket, `close` the closing one and flushes.
/// The target file is truncated when the writer is built.
pub struct JsonItemWriter {
    stream: RefCell<BufWriter<File>>,
    use_pretty_formatter: bool,
    is_first_item: Cell<bool>,
}

impl JsonItemWriter {
    fn write_bytes(&self, bytes: &[u8]) -> ItemWriterResult {
        self.stream
            .borrow_mut()
            .write_all(bytes)
            .map_err(|error| ImportError::ItemWriter(error.to_string()))
    }
}

impl<O: Serialize> ItemWriter<O> for JsonItemWriter {
    fn write(&self, item: &O) -> ItemWriterResult {
        let json = if self.use_pretty_formatter {
            serde_json::to_string_pretty(item)
        } else {
            serde_json::to_string(item)
        }
        .map_err(|error| ImportError::ItemWriter(error.to_string()))?;

        if !self.is_first_item.get() {
            let separator: &[u8] = if self.use_pretty_formatter { b",\n" } else { b"," };
            self.write_bytes(separator)?;
        }
        self.is_first_item.set(false);

        self.write_bytes(json.as_bytes())
    }

    fn flush(&self) -> ItemWriterResult {
        self.stream
            .borrow_mut()
            .flush()
            .map_err(|error| ImportError::ItemWriter(error.to_string()))
    }

    fn open(&self) -> ItemWriterResult {
        self.is_first_item.set(true);
        let separator: &[u8] = if self.use_pretty_formatter { b"[\n" } else { b"[" };
        self.write_bytes(separator)
    }

    fn close(&self) -> ItemWriterResult {
        let separator: &[u8] = if self.use_pretty_formatter { b"\n]\n" } else { b"]" };
        self.write_bytes(separator)?;
        ItemWriter::<O>::flush(self)
    }
}

#[derive(Default)]
pub struct JsonItemWriterBuilder {
    path: Option<PathBuf>,
    pretty_formatter: bool,
}

impl JsonItemWriterBuilder {
    pub fn new() -> JsonItemWriterBuilder {
        JsonItemWriterBuilder {
            path: None,
            pretty_formatter: false,
        }
    }

    pub fn path<P: AsRef<Path>>(mut self, path: P) -> JsonItemWriterBuilder {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn pretty_formatter(mut self, yes: bool) -> JsonItemWriterBuilder {
        self.pretty_formatter = yes;
        self
    }

    pub fn build(self) -> Result<JsonItemWriter, ImportError> {
        let path = self
            .path
            .ok_or_else(|| ImportError::Configuration("JSON writer has no path".to_string()))?;

        let file = File::create(&path).map_err(|error| {
            ImportError::ItemWriter(format!("can not create {}: {}", path.display(), error))
        })?;

        Ok(JsonItemWriter {
            stream: RefCell::new(BufWriter::new(file)),
            use_pretty_formatter: self.pretty_formatter,
            is_first_item: Cell::new(true),
        })
    }
}
