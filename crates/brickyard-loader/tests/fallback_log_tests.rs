//! Log output when an interceptor file cannot be used.

use brickyard_core::initialize_with;
use brickyard_loader::{FileResolver, FunctionCatalog, LoaderConfig};
use parking_lot::Mutex;
use std::fs;
use std::io;
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().clone();
    String::from_utf8(bytes).unwrap()
}

fn warn_lines(logs: &str, needle: &str) -> usize {
    logs.lines()
        .filter(|line| line.contains("WARN") && line.contains(needle))
        .count()
}

#[test]
fn test_missing_file_warns_with_path() {
    let logs = capture_logs(|| {
        let resolver: FileResolver = FileResolver::new(FunctionCatalog::new());
        let handle = initialize_with(&resolver, "./no/such/interceptor.json");
        assert!(handle.registry().is_empty());
    });

    assert_eq!(warn_lines(&logs, "./no/such/interceptor.json"), 1, "{logs}");
}

#[test]
fn test_malformed_file_warns_with_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bricks.json"), "{ not json").unwrap();

    let logs = capture_logs(|| {
        let resolver: FileResolver =
            FileResolver::with_config(FunctionCatalog::new(), LoaderConfig::new().with_base_dir(dir.path()));
        let handle = initialize_with(&resolver, "bricks.json");
        assert!(handle.registry().is_empty());
    });

    assert_eq!(warn_lines(&logs, "configuration ignored"), 1, "{logs}");
    assert!(logs.contains("parse error"), "{logs}");
}
