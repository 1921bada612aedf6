mod common;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use common::queue_with;
use post_finalize::platform::open_log_file_secure_append;
use post_finalize::{Job, JobId, JobLog};
use tempfile::tempdir;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as tsfmt, registry};

/// Appends everything written into a shared buffer.
#[derive(Clone)]
struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured(buf: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8_lossy(&buf.lock().unwrap()).into_owned()
}

#[test]
fn job_log_lines_carry_job_fields() {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let make_writer = {
        let buf = buf.clone();
        move || BufferWriter(buf.clone())
    };
    let layer = tsfmt::layer()
        .with_writer(make_writer)
        .with_target(false)
        .with_ansi(false)
        .compact();
    let subscriber = registry().with(EnvFilter::new("info")).with(layer);
    let dispatch = tracing::Dispatch::new(subscriber);

    let q = queue_with(Job::new("Some Show", "/inter"));
    tracing::dispatcher::with_default(&dispatch, || {
        let log = JobLog::new(JobId(1), "Some Show", q.as_ref());
        log.info("Moving file a.mkv to /final");
        log.warn("Could not delete intermediate directory /inter");
    });

    let contents = captured(&buf);
    assert!(contents.contains("Moving file a.mkv to /final"), "contents={contents}");
    assert!(contents.contains("job=Some Show"), "contents={contents}");
    assert!(contents.contains("id=1"), "contents={contents}");
    assert!(contents.contains("WARN"), "contents={contents}");

    // the registry gets the same lines
    assert_eq!(q.snapshot(JobId(1)).unwrap().messages.len(), 2);
}

#[test]
fn json_format_emits_job_field() {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let make_writer = {
        let buf = buf.clone();
        move || BufferWriter(buf.clone())
    };
    let layer = tsfmt::layer().with_writer(make_writer).json();
    let subscriber = registry().with(EnvFilter::new("info")).with(layer);
    let dispatch = tracing::Dispatch::new(subscriber);

    let q = queue_with(Job::new("Album", "/inter"));
    tracing::dispatcher::with_default(&dispatch, || {
        JobLog::new(JobId(1), "Album", q.as_ref()).error("Move for Album failed");
    });

    let contents = captured(&buf);
    assert!(contents.contains("\"job\":\"Album\""), "contents={contents}");
    assert!(contents.contains("Move for Album failed"), "contents={contents}");
}

#[test]
fn file_logging_appends_to_secure_file() {
    let td = tempdir().unwrap();
    let log_path = td.path().join("post_finalize_test.log");

    if post_finalize::path_has_symlink_ancestor(&log_path).unwrap() {
        eprintln!("Skipping: path has symlink ancestor: {}", log_path.display());
        return;
    }

    let file = open_log_file_secure_append(&log_path).unwrap();
    let (writer, guard) = tracing_appender::non_blocking(file);
    let layer = tsfmt::layer()
        .with_writer(move || writer.clone())
        .with_target(false)
        .with_ansi(false)
        .compact();
    let dispatch = tracing::Dispatch::new(registry().with(EnvFilter::new("info")).with(layer));

    tracing::dispatcher::with_default(&dispatch, || {
        tracing::info!("file-logging-test: written");
    });
    drop(guard);

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert!(contents.contains("file-logging-test"), "contents={contents}");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&log_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "log file should not be group/world accessible");
    }
}
