//! Rolling Logger
//!
//! `tracing` subscriber that keeps the most recent formatted lines in a
//! circular buffer and mirrors each line to the browser console (stderr
//! off-wasm).

use std::collections::VecDeque;
use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, OnceLock};

use chrono::Local;
use tracing::subscriber::SetGlobalDefaultError;
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

/// Wall-clock time of day; `SystemTime` is unavailable in the browser
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Shared circular buffer of formatted lines
#[derive(Clone)]
pub struct RingBuffer {
    app_name: Arc<str>,
    capacity: usize,
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl RingBuffer {
    pub fn new(app_name: &str, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            app_name: Arc::from(app_name),
            capacity,
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
        }
    }

    /// Buffered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    fn push(&self, line: String) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }
}

/// Collects one formatted event; the line is stored when the writer drops
pub struct LineWriter {
    buffer: RingBuffer,
    level: Level,
    pending: Vec<u8>,
}

impl io::Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.pending).trim_end().to_string();
        if line.is_empty() {
            return;
        }
        emit(&self.buffer.app_name, self.level, &line);
        self.buffer.push(line);
    }
}

impl<'a> MakeWriter<'a> for RingBuffer {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter { buffer: self.clone(), level: Level::INFO, pending: Vec::new() }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        LineWriter { buffer: self.clone(), level: *meta.level(), pending: Vec::new() }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(app_name: &str, level: Level, line: &str) {
    let text = format!("{} {}", app_name, line).into();
    if level == Level::ERROR {
        web_sys::console::error_1(&text);
    } else if level == Level::WARN {
        web_sys::console::warn_1(&text);
    } else if level == Level::INFO {
        web_sys::console::info_1(&text);
    } else {
        web_sys::console::log_1(&text);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(app_name: &str, _level: Level, line: &str) {
    eprintln!("{} {}", app_name, line);
}

/// Registry with a plain-text fmt layer writing into `buffer`
pub fn subscriber(buffer: RingBuffer, level: LevelFilter) -> impl Subscriber + Send + Sync {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_timer(LocalTime)
        .with_writer(buffer);
    tracing_subscriber::registry().with(level).with(fmt_layer)
}

static BUFFER: OnceLock<RingBuffer> = OnceLock::new();

/// Install the global subscriber. Fails if one is already set.
pub fn init_logger(app_name: &str, capacity: usize) -> Result<(), SetGlobalDefaultError> {
    let buffer = BUFFER.get_or_init(|| RingBuffer::new(app_name, capacity)).clone();
    tracing::subscriber::set_global_default(subscriber(buffer, LevelFilter::DEBUG))
}

/// Recent lines captured by the global subscriber, oldest first
pub fn recent() -> Vec<String> {
    BUFFER.get().map(RingBuffer::lines).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(capacity: usize, level: LevelFilter, f: impl FnOnce()) -> Vec<String> {
        let buffer = RingBuffer::new("App", capacity);
        tracing::subscriber::with_default(subscriber(buffer.clone(), level), f);
        buffer.lines()
    }

    #[test]
    fn test_keeps_only_capacity_lines() {
        let lines = capture(2, LevelFilter::TRACE, || {
            tracing::info!("one");
            tracing::info!("two");
            tracing::info!("three");
        });
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("two"));
        assert!(lines[1].ends_with("three"));
    }

    #[test]
    fn test_filters_below_level() {
        let lines = capture(10, LevelFilter::WARN, || {
            tracing::debug!("noise");
            tracing::error!("boom");
        });
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ERROR"));
        assert!(lines[0].ends_with("boom"));
    }

    #[test]
    fn test_line_carries_target_and_fields() {
        let lines = capture(1, LevelFilter::TRACE, || {
            tracing::warn!(id = 4, "careful");
        });
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(" WARN rolling_logger::tests: careful id=4"));
    }

    #[test]
    fn test_recent_is_empty_before_init() {
        // No test installs the global subscriber
        assert!(recent().is_empty());
    }
}
