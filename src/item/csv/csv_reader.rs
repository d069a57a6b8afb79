use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Terminator, Trim};
use log::debug;
use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
    fs::File,
    io::{self, Read},
    path::Path,
    rc::Rc,
};

use crate::{
    core::item::{ItemReader, ItemReaderResult},
    error::ImportError,
};

use super::raw_row::RawRow;

/// A CSV reader yielding one [`RawRow`] per data line.
///
/// The header line is read and validated when the reader is built, so a
/// reader that exists is always positioned on the first data row. Rows are
/// then read lazily, one per call to [`ItemReader::read`]. Once the
/// underlying records are exhausted every further read returns `Ok(None)`.
///
/// # Examples
///
/// ```
/// use physical_object_import::core::item::ItemReader;
/// use physical_object_import::item::csv::csv_reader::CsvRowReaderBuilder;
///
/// let data = "name,location\nDJ001,\"Aisle 25, Shelf D\"\n";
///
/// let reader = CsvRowReaderBuilder::new()
///     .from_reader(data.as_bytes())
///     .unwrap();
///
/// let row = reader.read().unwrap().unwrap();
/// assert_eq!(row.index(), 1);
/// assert_eq!(row.value("location"), "Aisle 25, Shelf D");
/// assert!(reader.read().unwrap().is_none());
/// ```
pub struct CsvRowReader<R> {
    headers: Rc<[String]>,
    /// `RefCell` so rows can be pulled through the `&self` of `ItemReader`
    records: RefCell<StringRecordsIntoIter<R>>,
    row_index: Cell<usize>,
    exhausted: Cell<bool>,
    total: Option<usize>,
}

impl<R> CsvRowReader<R> {
    /// Column names of the header line, in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted.get()
    }
}

impl<R: Read> ItemReader<RawRow> for CsvRowReader<R> {
    fn read(&self) -> ItemReaderResult<RawRow> {
        if self.exhausted.get() {
            return Ok(None);
        }

        let next = self.records.borrow_mut().next();

        match next {
            Some(Ok(record)) => {
                let index = self.next_index();
                let values = record.iter().map(str::to_owned).collect();
                Ok(Some(RawRow::new(index, Rc::clone(&self.headers), values)))
            }
            Some(Err(error)) => {
                self.next_index();
                // An I/O failure will not go away on the next read
                if error.is_io_error() {
                    self.exhausted.set(true);
                }
                Err(ImportError::ItemReader(error.to_string()))
            }
            None => {
                debug!("No more CSV records after row {}", self.row_index.get());
                self.exhausted.set(true);
                Ok(None)
            }
        }
    }

    fn size_hint(&self) -> Option<usize> {
        self.total
    }
}

impl<R> CsvRowReader<R> {
    fn next_index(&self) -> usize {
        let index = self.row_index.get() + 1;
        self.row_index.set(index);
        index
    }
}

/// A builder for [`CsvRowReader`].
///
/// Defaults: `,` delimiter, `\n` or `\r\n` line endings, every field trimmed,
/// strict field count.
pub struct CsvRowReaderBuilder {
    delimiter: u8,
    terminator: Terminator,
}

impl Default for CsvRowReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvRowReaderBuilder {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            terminator: Terminator::CRLF,
        }
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Creates a reader over any `Read` source. The row total is unknown.
    pub fn from_reader<R: Read>(self, rdr: R) -> Result<CsvRowReader<R>, ImportError> {
        self.build(rdr, None)
    }

    /// Opens `path` and creates a reader over it.
    ///
    /// The file is scanned once beforehand to count its data rows, which
    /// feeds the `[row/total]` progress of an import.
    ///
    /// # Errors
    ///
    /// - [`ImportError::FileNotFound`] if nothing exists at `path`
    /// - [`ImportError::FileUnreadable`] if `path` is not a regular file or
    ///   can not be opened
    /// - [`ImportError::Header`] if the header line is missing or invalid
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<CsvRowReader<File>, ImportError> {
        let path = path.as_ref();

        let total = self
            .csv_reader()
            .from_reader(open_file(path)?)
            .into_records()
            .take_while(|record| !matches!(record, Err(error) if error.is_io_error()))
            .count();

        self.build(open_file(path)?, Some(total))
    }

    fn csv_reader(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .trim(Trim::All)
            .delimiter(self.delimiter)
            .terminator(self.terminator)
            .has_headers(true)
            .flexible(false);
        builder
    }

    fn build<R: Read>(self, rdr: R, total: Option<usize>) -> Result<CsvRowReader<R>, ImportError> {
        let mut reader = self.csv_reader().from_reader(rdr);

        let header = reader
            .headers()
            .map_err(|error| ImportError::Header(error.to_string()))?;
        let headers = validate_headers(header)?;

        debug!("CSV header: {:?}", headers);

        Ok(CsvRowReader {
            headers: headers.into(),
            records: RefCell::new(reader.into_records()),
            row_index: Cell::new(0),
            exhausted: Cell::new(false),
            total,
        })
    }
}

/// Checks that `path` names a regular file, without opening it.
///
/// # Errors
///
/// [`ImportError::FileNotFound`] or [`ImportError::FileUnreadable`], as
/// [`CsvRowReaderBuilder::from_path`] reports them.
pub fn check_file(path: &Path) -> Result<(), ImportError> {
    let metadata = path.metadata().map_err(|source| file_error(path, source))?;
    if !metadata.is_file() {
        return Err(ImportError::FileUnreadable {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    Ok(())
}

fn open_file(path: &Path) -> Result<File, ImportError> {
    check_file(path)?;
    File::open(path).map_err(|source| file_error(path, source))
}

fn file_error(path: &Path, source: io::Error) -> ImportError {
    if source.kind() == io::ErrorKind::NotFound {
        ImportError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        ImportError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn validate_headers(header: &StringRecord) -> Result<Vec<String>, ImportError> {
    if header.iter().all(str::is_empty) {
        return Err(ImportError::Header("missing header line".to_string()));
    }

    let mut seen = HashSet::new();
    for (position, column) in header.iter().enumerate() {
        if column.is_empty() {
            return Err(ImportError::Header(format!(
                "column {} has no name",
                position + 1
            )));
        }
        if !seen.insert(column) {
            return Err(ImportError::Header(format!("duplicate column \"{}\"", column)));
        }
    }

    Ok(header.iter().map(str::to_owned).collect())
}
