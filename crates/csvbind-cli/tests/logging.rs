//! The subscriber can be installed once per process, so this file holds a single test.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use csvbind_cli::logging::{
    LogConfig, LogFormat, REDACTED_VALUE, init_logging_with_writer, redact_value,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Buffer {
    type Writer = Buffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_json_logging_with_redaction() {
    let buffer = Buffer::default();
    let config = LogConfig::default()
        .with_level_filter(LevelFilter::INFO)
        .with_env_filter(false)
        .with_format(LogFormat::Json)
        .with_ansi(false);
    init_logging_with_writer(&config, buffer.clone()).unwrap();

    assert_eq!(redact_value("alice"), REDACTED_VALUE);

    tracing::info!(target: "csvbind_cli", records = 2, "import finished");
    tracing::debug!(target: "csvbind_cli", "hidden at info");
    tracing::info!(target: "other_crate", "below the external threshold");

    let output = buffer.contents();
    assert!(output.contains("\"message\":\"import finished\""));
    assert!(output.contains("\"records\":2"));
    assert!(!output.contains("hidden at info"));
    assert!(!output.contains("below the external threshold"));

    // A second subscriber is refused rather than panicking, and leaves redaction as it was
    let revealing = config.clone().with_log_data(true);
    assert!(init_logging_with_writer(&revealing, buffer).is_err());
    assert_eq!(redact_value("alice"), REDACTED_VALUE);
}
