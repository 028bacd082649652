use anyhow::Result;
use chrono::Local;
use std::{
    fmt,
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

// --- Formatter ---

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

fn level_style(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// Writes one space-terminated column, wrapped in `style` when the writer
/// accepts ANSI escapes.
fn column(
    writer: &mut Writer<'_>,
    style: &str,
    text: impl fmt::Display,
) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{style}{text}{RESET} ")
    } else {
        write!(writer, "{text} ")
    }
}

/// `file:line` with everything up to and including `src/` dropped, so
/// workspace paths like `tax-cli/src/config.rs` print as `config.rs`.
fn source_location(meta: &Metadata<'_>) -> Option<String> {
    let path = meta.file()?;
    let line = meta.line()?;
    let file = path
        .rsplit_once("src/")
        .or_else(|| path.rsplit_once("src\\"))
        .map_or(path, |(_, rest)| rest);
    Some(format!("{file}:{line}"))
}

/// One line per event: local timestamp, level, source location, fields.
pub struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        column(
            &mut writer,
            DIM,
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        )?;
        column(
            &mut writer,
            level_style(meta.level()),
            format_args!("{:>5}", meta.level()),
        )?;
        if let Some(location) = source_location(meta) {
            column(&mut writer, CYAN, location)?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Late-bound file writer ---

/// A MakeWriter that can be pointed at a file after initialization.
/// While no file is set, all writes are silently discarded.
#[derive(Clone, Default)]
pub struct FileSlot(Arc<Mutex<Option<File>>>);

impl FileSlot {
    /// Replaces the target file; `None` goes back to discarding.
    pub fn set(
        &self,
        file: Option<File>,
    ) {
        *self.lock() = file;
    }

    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }
    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(self.lock())
    }
}

static FILE_SLOT: OnceLock<FileSlot> = OnceLock::new();

fn make_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(default_directive).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

// --- Public API ---

/// Initializes logging. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, plain when piped. Reports
///   go to stdout, so the two never interleave in a pipe.
/// - File: inactive until [`enable_file_logging`] is called.
/// - Level: `RUST_LOG` when set, otherwise `default_directive`.
pub fn init_logging(default_directive: &str) {
    let slot = FILE_SLOT.get_or_init(FileSlot::default).clone();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(false)
        .with_writer(slot);

    let _ = tracing_subscriber::registry()
        .with(make_filter(default_directive))
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}

/// Starts appending log output to `path`. If a file is already open it is
/// replaced. The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow::anyhow!("cannot open log file '{}': {e}", path.display()))?;

    match FILE_SLOT.get() {
        Some(slot) => {
            slot.set(Some(file));
            Ok(())
        }
        None => anyhow::bail!("logging not yet initialized"),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tracing_subscriber::fmt;

    use super::*;

    fn temp_log(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("tax-cli-{}-{name}.log", std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn file_slot_discards_until_file_is_set() {
        let slot = FileSlot::default();
        let mut writer = slot.make_writer();

        assert_eq!(writer.write(b"dropped").unwrap(), 7);
    }

    #[test]
    fn local_fmt_writes_level_location_and_fields() {
        let path = temp_log("fmt");
        let slot = FileSlot::default();
        slot.set(Some(File::create(&path).unwrap()));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .event_format(LocalFmt)
                .with_ansi(false)
                .with_writer(slot.clone()),
        );
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(regime = "old", "computed");
        });
        slot.set(None);

        let line = fs::read_to_string(&path).unwrap();
        assert!(line.contains(" INFO "), "got: {line}");
        assert!(line.contains(" logging.rs:"), "got: {line}");
        assert!(!line.contains("src/"), "got: {line}");
        assert!(line.contains("computed"), "got: {line}");
        assert!(line.contains("regime=\"old\""), "got: {line}");
        assert!(line.ends_with('\n'));

        let _ = fs::remove_file(&path);
    }
}
