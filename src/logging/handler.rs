//! Handler process output classifier
//!
//! The native handler process interleaves free-text diagnostics with
//! structured status lines on the same stream. Each captured chunk is split
//! into lines; structured lines pass through untouched and everything else is
//! triaged by prefix.

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;

use super::config::HandlerLoggerConfig;
use super::severity::{ClassificationTable, Severity};
use super::sink::{LogFields, LogSink, TracingSink};
use super::stats::{ClassifierCounts, ClassifierStats};

/// Classifies output from one handler process
pub struct HandlerLogger {
    fields: LogFields,
    table: ClassificationTable,
    sink: Arc<dyn LogSink>,
    stats: ClassifierStats,
    read_buffer_size: usize,
}

impl HandlerLogger {
    /// Create a logger writing to `sink`
    pub fn new(config: HandlerLoggerConfig, sink: Arc<dyn LogSink>) -> Self {
        Self {
            fields: LogFields::new(config.handler_id, config.session_id),
            table: config.table,
            sink,
            stats: ClassifierStats::new(),
            read_buffer_size: config.read_buffer_size,
        }
    }

    /// Create a logger with the default table, writing to `tracing`
    pub fn with_tracing(handler_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self::new(
            HandlerLoggerConfig::new(handler_id, session_id),
            Arc::new(TracingSink::new()),
        )
    }

    /// Attributes attached to every classified line
    pub fn fields(&self) -> &LogFields {
        &self.fields
    }

    /// Line counters so far
    pub fn stats(&self) -> ClassifierCounts {
        self.stats.snapshot()
    }

    /// Classify one captured chunk of output
    pub fn classify(&self, chunk: &str) {
        // glib terminates warnings with redundant newlines
        let chunk = chunk.trim_end_matches('\n').trim_start_matches('\n');

        for line in chunk.split('\n') {
            if line.ends_with('}') {
                self.stats.record_passthrough();
                self.sink.passthrough(line);
                continue;
            }

            let severity = self.table.classify(line);
            self.stats.record(severity);
            if severity != Severity::Ignore {
                self.sink.log(severity, line, &self.fields);
            }
        }
    }

    /// Classify everything read from `reader` until EOF
    ///
    /// Each read becomes one chunk, so a line split across two reads is
    /// classified as two lines.
    pub fn spawn_reader<R>(self: &Arc<Self>, reader: R) -> JoinHandle<io::Result<()>>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        tokio::spawn(pump(Arc::clone(self), reader))
    }
}

async fn pump<R>(logger: Arc<HandlerLogger>, mut reader: R) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; logger.read_buffer_size];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            tracing::debug!(
                handler_id = %logger.fields.handler_id,
                session_id = %logger.fields.session_id,
                lines = logger.stats.snapshot().total(),
                "Handler output closed"
            );
            return Ok(());
        }
        logger.classify(&String::from_utf8_lossy(&buf[..n]));
    }
}

impl std::fmt::Debug for HandlerLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerLogger")
            .field("fields", &self.fields)
            .field("table", &self.table)
            .field("stats", &self.stats)
            .finish()
    }
}

// Each write is one chunk, mirroring how a child process's pipe is drained.
impl io::Write for &HandlerLogger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.classify(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Write for HandlerLogger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Record {
        Log(Severity, String, LogFields),
        Passthrough(String),
    }

    #[derive(Default)]
    struct MemorySink {
        records: Mutex<Vec<Record>>,
    }

    impl MemorySink {
        fn records(&self) -> Vec<Record> {
            self.records.lock().unwrap().clone()
        }
    }

    impl LogSink for MemorySink {
        fn log(&self, severity: Severity, message: &str, fields: &LogFields) {
            self.records
                .lock()
                .unwrap()
                .push(Record::Log(severity, message.to_string(), fields.clone()));
        }

        fn passthrough(&self, line: &str) {
            self.records
                .lock()
                .unwrap()
                .push(Record::Passthrough(line.to_string()));
        }
    }

    fn logger() -> (HandlerLogger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::default());
        let logger = HandlerLogger::new(HandlerLoggerConfig::new("EH_1", "EG_1"), sink.clone());
        (logger, sink)
    }

    fn log(severity: Severity, message: &str) -> Record {
        Record::Log(severity, message.to_string(), LogFields::new("EH_1", "EG_1"))
    }

    #[test]
    fn test_prefix_routing() {
        let (logger, sink) = logger();

        logger.classify("turnc foo bar");
        logger.classify("0:00: x");
        logger.classify("xxxxx");
        logger.classify(r#"{"a":1}"#);

        assert_eq!(
            sink.records(),
            vec![
                log(Severity::Info, "turnc foo bar"),
                log(Severity::Error, "xxxxx"),
                Record::Passthrough(r#"{"a":1}"#.to_string()),
            ]
        );
    }

    #[test]
    fn test_trims_boundary_newlines() {
        let (logger, sink) = logger();

        logger.classify("\n\n(egre bad\n\n");

        assert_eq!(sink.records(), vec![log(Severity::Warn, "(egre bad")]);
    }

    #[test]
    fn test_short_line_defaults_to_error() {
        let (logger, sink) = logger();

        logger.classify("abc");

        assert_eq!(sink.records(), vec![log(Severity::Error, "abc")]);
    }

    #[test]
    fn test_multi_line_chunk() {
        let (logger, sink) = logger();

        logger.classify(
            "0:00:01.5 GST_STATES\n\
             ice ERROR candidate failed\n\
             {\"level\":\"info\",\"msg\":\"ready\"}\n\
             \n\
             (egress:7): GLib-WARNING **: oops\n",
        );

        assert_eq!(
            sink.records(),
            vec![
                log(Severity::Info, "ice ERROR candidate failed"),
                Record::Passthrough("{\"level\":\"info\",\"msg\":\"ready\"}".to_string()),
                log(Severity::Error, ""),
                log(Severity::Warn, "(egress:7): GLib-WARNING **: oops"),
            ]
        );

        let stats = logger.stats();
        assert_eq!(stats.ignored, 1);
        assert_eq!(stats.info, 1);
        assert_eq!(stats.warn, 1);
        assert_eq!(stats.error, 1);
        assert_eq!(stats.passthrough, 1);
    }

    #[test]
    fn test_structured_check_precedes_prefix() {
        let (logger, sink) = logger();

        // Would be ignored by prefix, but it ends in a brace
        logger.classify("0:00: {}");

        assert_eq!(sink.records(), vec![Record::Passthrough("0:00: {}".to_string())]);
    }

    #[test]
    fn test_custom_table() {
        let sink = Arc::new(MemorySink::default());
        let config = HandlerLoggerConfig::new("EH_1", "EG_1")
            .table(ClassificationTable::empty().with_entry("DEBUG", Severity::Ignore));
        let logger = HandlerLogger::new(config, sink.clone());

        logger.classify("DEBUG noisy\nturnc now unknown");

        assert_eq!(sink.records(), vec![log(Severity::Error, "turnc now unknown")]);
    }

    #[test]
    fn test_io_write_is_one_chunk() {
        let (logger, sink) = logger();

        let mut writer = &logger;
        let n = writer.write(b"SDK 2 connected\n\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(n, 17);
        assert_eq!(sink.records(), vec![log(Severity::Info, "SDK 2 connected")]);
    }

    #[test]
    fn test_io_write_lossy_utf8() {
        let (mut logger, sink) = logger();

        write!(logger, "turnc \u{1F600}").unwrap();
        logger.write_all(&[b't', b'u', b'r', b'n', b'c', b' ', 0xff]).unwrap();

        assert_eq!(
            sink.records(),
            vec![
                log(Severity::Info, "turnc \u{1F600}"),
                log(Severity::Info, "turnc \u{FFFD}"),
            ]
        );
    }

    #[tokio::test]
    async fn test_spawn_reader_until_eof() {
        let (logger, sink) = logger();
        let logger = Arc::new(logger);

        let reader: &'static [u8] = b"turnc relay\n(egre warn\nunknown line\n";
        logger.spawn_reader(reader).await.unwrap().unwrap();

        assert_eq!(
            sink.records(),
            vec![
                log(Severity::Info, "turnc relay"),
                log(Severity::Warn, "(egre warn"),
                log(Severity::Error, "unknown line"),
            ]
        );
    }

    #[tokio::test]
    async fn test_spawn_reader_small_reads() {
        let sink = Arc::new(MemorySink::default());
        let config = HandlerLoggerConfig::new("EH_1", "EG_1").read_buffer_size(6);
        let logger = Arc::new(HandlerLogger::new(config, sink.clone()));

        let reader: &'static [u8] = b"turnc\n0:00:\n";
        logger.spawn_reader(reader).await.unwrap().unwrap();

        assert_eq!(sink.records(), vec![log(Severity::Info, "turnc")]);
        assert_eq!(logger.stats().ignored, 1);
    }

    #[test]
    fn test_with_tracing() {
        let logger = HandlerLogger::with_tracing("EH_9", "EG_9");

        assert_eq!(logger.fields(), &LogFields::new("EH_9", "EG_9"));
        logger.classify("turnc hello");
        assert_eq!(logger.stats().info, 1);
    }
}
