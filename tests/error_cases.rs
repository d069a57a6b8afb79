pub mod common;

use physical_object_import::{
    config::ImportOptions,
    error::ImportError,
    physical_object::type_lookup::{InMemoryTermSource, TaxonomyTerm},
    task::{PhysicalObjectImportTask, PhysicalObjectImportTaskBuilder},
};

use common::{MockRecordWriter, init_logger, physical_object_types, write_csv};

/// A writer that must not be touched: every error here happens before the
/// first row is read.
fn untouched_writer() -> MockRecordWriter {
    let mut writer = MockRecordWriter::new();
    writer.expect_open().never();
    writer.expect_write().never();
    writer
}

fn task<'a>(
    terms: &'a InMemoryTermSource,
    writer: &'a MockRecordWriter,
) -> PhysicalObjectImportTask<'a> {
    PhysicalObjectImportTaskBuilder::new()
        .options(ImportOptions::new().set_default_culture(Some("en".to_string())))
        .terms(terms)
        .writer(writer)
        .build()
        .expect("Unable to build import task")
}

#[test]
fn missing_file() {
    init_logger();
    let terms = physical_object_types();
    let writer = untouched_writer();

    let result = task(&terms, &writer).execute("bad_name.csv");

    match result {
        Err(ImportError::FileNotFound { path }) => assert!(path.ends_with("bad_name.csv")),
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn directory_instead_of_file() -> anyhow::Result<()> {
    init_logger();
    let dir = tempfile::tempdir()?;
    let terms = physical_object_types();
    let writer = untouched_writer();

    let result = task(&terms, &writer).execute(dir.path());

    assert!(matches!(result, Err(ImportError::FileUnreadable { .. })));
    Ok(())
}

#[test]
fn empty_file_has_no_header() -> anyhow::Result<()> {
    init_logger();
    let dir = tempfile::tempdir()?;
    let path = write_csv(dir.path(), "empty.csv", "");
    let terms = physical_object_types();
    let writer = untouched_writer();

    let result = task(&terms, &writer).execute(&path);

    assert!(matches!(result, Err(ImportError::Header(_))));
    Ok(())
}

#[test]
fn header_with_duplicate_columns() -> anyhow::Result<()> {
    init_logger();
    let dir = tempfile::tempdir()?;
    let path = write_csv(dir.path(), "unix.csv", "name,location,name\nA,B,C\n");
    let terms = physical_object_types();
    let writer = untouched_writer();

    let result = task(&terms, &writer).execute(&path);

    match result {
        Err(ImportError::Header(message)) => assert!(message.contains("duplicate")),
        other => panic!("expected Header, got {:?}", other),
    }
    Ok(())
}

#[test]
fn empty_vocabulary() -> anyhow::Result<()> {
    init_logger();
    let dir = tempfile::tempdir()?;
    let path = write_csv(dir.path(), "unix.csv", "name\nDJ001\n");
    let terms = InMemoryTermSource::default();
    let writer = untouched_writer();

    let result = task(&terms, &writer).execute(&path);

    assert!(matches!(result, Err(ImportError::Configuration(_))));
    Ok(())
}

#[test]
fn conflicting_vocabulary() -> anyhow::Result<()> {
    init_logger();
    let dir = tempfile::tempdir()?;
    let path = write_csv(dir.path(), "unix.csv", "name\nDJ001\n");
    let terms = InMemoryTermSource::new(vec![
        TaxonomyTerm::new(1, "en", "Folder"),
        TaxonomyTerm::new(2, "EN", "folder"),
    ]);
    let writer = untouched_writer();

    let result = task(&terms, &writer).execute(&path);

    assert!(matches!(result, Err(ImportError::Configuration(_))));
    Ok(())
}

#[test]
fn missing_file_wins_over_configuration() {
    init_logger();
    let terms = InMemoryTermSource::default();
    let writer = untouched_writer();

    let result = task(&terms, &writer).execute("bad_name.csv");

    assert!(matches!(result, Err(ImportError::FileNotFound { .. })));
}

#[test]
fn missing_file_wins_over_invalid_options() {
    init_logger();
    let terms = physical_object_types();
    let writer = untouched_writer();

    let task = PhysicalObjectImportTaskBuilder::new()
        .options(ImportOptions::new().set_column_delimiter('é'))
        .terms(&terms)
        .writer(&writer)
        .build()
        .expect("Unable to build import task");

    let result = task.execute("bad_name.csv");

    assert!(matches!(result, Err(ImportError::FileNotFound { .. })));
}

#[test]
fn clashing_delimiters() -> anyhow::Result<()> {
    init_logger();
    let dir = tempfile::tempdir()?;
    let path = write_csv(dir.path(), "unix.csv", "name\nDJ001\n");
    let terms = physical_object_types();
    let writer = untouched_writer();

    let task = PhysicalObjectImportTaskBuilder::new()
        .options(ImportOptions::new().set_multi_value_delimiter(','))
        .terms(&terms)
        .writer(&writer)
        .build()?;

    let result = task.execute(&path);

    assert!(matches!(result, Err(ImportError::Configuration(_))));
    Ok(())
}
