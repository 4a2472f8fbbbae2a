use std::fs;
use std::sync::Mutex;

use fromtemplate::{
    processor::generate_tree,
    renderer::{FieldRenderer, Fields},
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use tempfile::TempDir;

/// Keeps every `info` record so the test can inspect progress output.
struct RecordingLogger {
    records: Mutex<Vec<String>>,
}

impl Log for RecordingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Info {
            self.records.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static LOGGER: RecordingLogger = RecordingLogger { records: Mutex::new(Vec::new()) };

#[test]
fn test_one_progress_record_per_created_path() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Info);

    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template");
    fs::create_dir_all(template.join("{{name}}").join("empty")).unwrap();
    fs::write(template.join("{{name}}").join("lib.rs"), "//! {{name}}\n").unwrap();
    fs::write(template.join("README.md"), "# {{name}}\n").unwrap();
    let destination = temp_dir.path().join("project");

    let mut fields = Fields::new();
    fields.insert("name".to_string(), "app".to_string());
    let created = generate_tree(&destination, &template, &fields, &FieldRenderer::new()).unwrap();

    let records = LOGGER.records.lock().unwrap().clone();
    let progress: Vec<&String> = records.iter().filter(|r| r.starts_with("Created: ")).collect();

    assert_eq!(created.len(), 5);
    assert_eq!(progress.len(), created.len());
    for (record, path) in progress.iter().zip(&created) {
        assert_eq!(**record, format!("Created: '{}'", path.display()));
    }
}
