use std::time::{Duration, Instant};

use tracing::{debug, error, info, trace, warn};

use crate::level::Level;
use crate::object::BaseObject;
use crate::snapshot::DataSnapshot;

/// Target of every event emitted by a [`Timer`]
pub const TIMER_TARGET: &str = "objrepr::timer";

const DEFAULT_PREFIX: &str = "| - ";
const DEPTH_MARKER: &str = "|   ";

/// Times a section of code and logs the elapsed time
///
/// Timers log through [`tracing`] with one line when they are created and
/// one when they are stopped, all under the [`TIMER_TARGET`] target. Lines
/// are indented according to the timer depth, so nested sections read as a
/// tree. A timer with no depth is disabled and logs nothing.
///
/// A timer that is dropped without being stopped stops itself, logging one
/// level deeper than its own messages.
///
/// # Example
/// ```rust
/// use objrepr::Timer;
///
/// let mut timer = Timer::new("report", Some(0));
/// {
///     let _lap = timer.lap("query", 1);
///     // ... the timed work
/// }
/// let elapsed = timer.stop(0);
/// ```
///
/// With a subscriber installed the example logs
///
/// ```text
/// | - report
/// |   | - query
/// |   |   | - Elapsed Time: 0.012 ms (query)
/// | - Elapsed Time: 0.034 ms (report)
/// ```
pub struct Timer {
    name: String,
    depth: Option<usize>,
    level: tracing::Level,
    start: Instant,
    stopped: bool,
}

impl Timer {
    /// Create a timer logging at the `DEBUG` level
    pub fn new(name: impl Into<String>, depth: Option<usize>) -> Self {
        Timer::at_level(name, depth, tracing::Level::DEBUG)
    }

    /// Create a timer logging at the given level
    pub fn at_level(name: impl Into<String>, depth: Option<usize>, level: tracing::Level) -> Self {
        let timer = Timer {
            name: name.into(),
            depth,
            level,
            start: Instant::now(),
            stopped: false,
        };
        timer.log(&timer.name);
        timer
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    pub fn is_enabled(&self) -> bool {
        self.depth.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Depth for a timer nested `indent` levels within this one
    pub fn sub_depth(&self, indent: usize) -> Option<usize> {
        self.depth.map(|depth| depth + indent)
    }

    /// Start a timer for a section of code within this timer
    pub fn lap(&self, name: impl Into<String>, indent: usize) -> Timer {
        Timer::at_level(name, self.sub_depth(indent), self.level)
    }

    /// Log a message at the timer depth and level
    pub fn log(&self, msg: impl AsRef<str>) {
        self.log_with(msg, self.level, 0, DEFAULT_PREFIX)
    }

    /// Log a message at `level`, `indent` levels deeper than the timer, after `prefix`
    pub fn log_with(
        &self,
        msg: impl AsRef<str>,
        level: tracing::Level,
        indent: usize,
        prefix: &str,
    ) {
        let Some(depth) = self.depth else {
            return;
        };

        let line = format!(
            "{}{prefix}{}",
            DEPTH_MARKER.repeat(depth + indent),
            msg.as_ref()
        );
        let timer = self.name.as_str();
        match level {
            tracing::Level::TRACE => trace!(target: TIMER_TARGET, timer, "{line}"),
            tracing::Level::DEBUG => debug!(target: TIMER_TARGET, timer, "{line}"),
            tracing::Level::INFO => info!(target: TIMER_TARGET, timer, "{line}"),
            tracing::Level::WARN => warn!(target: TIMER_TARGET, timer, "{line}"),
            tracing::Level::ERROR => error!(target: TIMER_TARGET, timer, "{line}"),
        }
    }

    /// Log the time elapsed since the timer was created
    pub fn stop(&mut self, indent: usize) -> Duration {
        let elapsed = self.start.elapsed();
        self.stopped = true;
        self.log_with(
            format!(
                "Elapsed Time: {} ms ({})",
                format_millis(elapsed.as_secs_f64() * 1e3),
                self.name
            ),
            self.level,
            indent,
            DEFAULT_PREFIX,
        );
        elapsed
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.stopped {
            self.stop(1);
        }
    }
}

impl BaseObject for Timer {
    fn get_data(&self, level: Level) -> DataSnapshot {
        let mut data = DataSnapshot::new();
        if level == Level::Short {
            data.insert("name", &self.name);
            data.insert("depth", self.depth);
            return data;
        }

        data.insert("depth", self.depth);
        data.insert("level", self.level.to_string());
        data.insert("name", &self.name);
        data.insert("elapsed_ms", self.elapsed().as_secs_f64() * 1e3);
        if level == Level::Debug {
            data.insert("stopped", self.stopped);
        }
        data
    }
}

/// Run `f` within a timer named `name`, returning its result
///
/// # Example
/// ```rust
/// use objrepr::timed;
///
/// let total = timed("sum", Some(0), || (1..=10).sum::<i32>());
/// assert_eq!(total, 55);
/// ```
pub fn timed<T>(name: &str, depth: Option<usize>, f: impl FnOnce() -> T) -> T {
    let _timer = Timer::new(name, depth);
    f()
}

/// Format milliseconds with three decimals and thousands separators
fn format_millis(ms: f64) -> String {
    let formatted = format!("{ms:.3}");
    let (int, frac) = formatted.split_once('.').unwrap_or((formatted.as_str(), "000"));

    let digits: Vec<char> = int.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }
    format!("{grouped}.{frac}")
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::object::Repr;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap();
            String::from_utf8_lossy(&bytes)
                .lines()
                .map(|line| line.trim_start().to_string())
                .collect()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture<F: FnOnce()>(f: F) -> Vec<String> {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_target(false)
            .with_level(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.lines()
    }

    #[test]
    fn it_logs_nested_laps() {
        let lines = capture(|| {
            let mut timer = Timer::new("Test A", Some(0));
            {
                let _b = timer.lap("Test B", 1);
            }
            timer.stop(0);
        });

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("| - Test A"));
        assert!(lines[1].starts_with("|   | - Test B"));
        assert!(lines[2].starts_with("|   |   | - Elapsed Time: "));
        assert!(lines[2].contains(" ms (Test B)"));
        assert!(lines[3].starts_with("| - Elapsed Time: "));
        assert!(lines[3].contains(" ms (Test A)"));
        assert!(lines.iter().all(|line| line.contains("timer=")));
    }

    #[test]
    fn it_stops_only_once() {
        let lines = capture(|| {
            let mut timer = Timer::new("once", Some(1));
            timer.stop(0);
        });

        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("|   | - Elapsed Time: "));
    }

    #[test]
    fn it_does_not_log_when_disabled() {
        let lines = capture(|| {
            let timer = Timer::new("quiet", None);
            let lap = timer.lap("inner", 2);
            assert_eq!(lap.depth(), None);
            assert!(!lap.is_enabled());
        });

        assert!(lines.is_empty());
    }

    #[test]
    fn it_respects_the_log_level() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let _debug = Timer::new("hidden", Some(0));
            let _info = Timer::at_level("shown", Some(0), tracing::Level::INFO);
        });

        let lines = captured.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.contains("shown")));
    }

    #[test]
    fn it_logs_messages_at_their_own_level() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let timer = Timer::new("batch", Some(0));
            timer.log("row 1");
            timer.log_with("row 2 failed", tracing::Level::WARN, 1, "| ! ");
        });

        let lines = captured.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("WARN objrepr::timer: |   | ! row 2 failed"));
    }

    #[test]
    fn it_computes_sub_depths() {
        let timer = Timer::new("root", Some(2));
        assert_eq!(timer.sub_depth(0), Some(2));
        assert_eq!(timer.sub_depth(3), Some(5));
        assert_eq!(timer.lap("child", 1).depth(), Some(3));
    }

    #[test]
    fn it_times_closures() {
        let lines = capture(|| {
            let value = timed("compute", Some(0), || 6 * 7);
            assert_eq!(value, 42);
        });

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("| - compute"));
        assert!(lines[1].contains("(compute)"));
    }

    #[test]
    fn it_describes_itself() {
        let mut timer = Timer::new("export", None);
        assert_eq!(timer.to_single_line(), r#"Timer name = "export", depth = null"#);

        timer.stop(0);
        let data = timer.get_data(Level::Debug);
        let names: Vec<&str> = data.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["depth", "level", "name", "elapsed_ms", "stopped"]);
        assert!(timer.to_multi_line().contains("level = \"\n      DEBUG\n    \""));
    }

    #[test]
    fn it_formats_milliseconds() {
        assert_eq!(format_millis(0.5), "0.500");
        assert_eq!(format_millis(999.9996), "1,000.000");
        assert_eq!(format_millis(1234567.891), "1,234,567.891");
    }
}
