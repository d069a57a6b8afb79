//! Row outcomes are reported through `log`. Kept in its own test binary
//! because only one logger can be installed per process.
pub mod common;

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use physical_object_import::{
    config::ImportOptions, physical_object::resolver::InMemoryReferenceResolver,
    task::PhysicalObjectImportTaskBuilder,
};

use common::{PHYSICAL_OBJECTS, RecordingWriter, physical_object_types, write_csv};

struct CapturingLogger {
    lines: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push((record.level(), record.args().to_string()));
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    lines: Mutex::new(Vec::new()),
};

#[test]
fn every_row_outcome_is_logged_with_its_progress() -> anyhow::Result<()> {
    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(LevelFilter::Info))
        .map_err(|error| anyhow::anyhow!("{}", error))?;

    let dir = tempfile::tempdir()?;
    let path = write_csv(dir.path(), "unix.csv", PHYSICAL_OBJECTS);

    let writer = RecordingWriter::default();
    let descriptions = InMemoryReferenceResolver::new([("fonds-a", 10)]);
    let terms = physical_object_types();
    let task = PhysicalObjectImportTaskBuilder::new()
        .options(ImportOptions::new().set_default_culture(Some("en".to_string())))
        .terms(&terms)
        .references(&descriptions)
        .writer(&writer)
        .build()?;

    task.execute(&path)?;

    let lines = LOGGER.lines.lock().expect("logger poisoned").clone();
    let position = |level: Level, text: &str| {
        lines
            .iter()
            .position(|(l, line)| *l == level && line == text)
            .unwrap_or_else(|| panic!("{:?} {:?} not logged in {:#?}", level, text, lines))
    };

    let started = position(
        Level::Info,
        &format!("Importing physical object data from {}...", path.display()),
    );
    let first = position(Level::Info, "Imported row [1/3]: name \"DJ001\"");
    let skipped = position(Level::Error, "Skipping row [2/3]: No name or location defined");
    let warning = position(
        Level::Warn,
        "Warning on row [3/3]: Couldn't find a description with slug \"missing\".",
    );
    let third = position(Level::Info, "Imported row [3/3]: name \"DJ002\"");
    let complete = position(Level::Info, "Import complete!");

    assert!(started < first);
    assert!(first < skipped);
    assert!(skipped < warning);
    assert!(warning < third);
    assert!(third < complete);
    Ok(())
}
