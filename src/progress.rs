//! Progress tracking and run summaries for the command-line front end.

use std::fmt;
use std::time::Instant;

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// No output
    Quiet,
    /// Normal output (progress bar and summary)
    #[default]
    Normal,
    /// Verbose output (per-file results)
    Verbose,
    /// Very verbose (detection details)
    VeryVerbose,
}

impl OutputMode {
    /// Create OutputMode from verbosity level
    pub fn from_verbosity(level: u8) -> Self {
        match level {
            0 => OutputMode::Normal,
            1 => OutputMode::Verbose,
            _ => OutputMode::VeryVerbose,
        }
    }

    /// Check if output should be shown at this mode
    pub fn should_show(&self, required: OutputMode) -> bool {
        use OutputMode::*;
        match (self, required) {
            (Quiet, _) => false,
            (Normal, Quiet | Normal) => true,
            (Verbose, Quiet | Normal | Verbose) => true,
            (VeryVerbose, _) => true,
            _ => false,
        }
    }

    /// Log level matching this mode
    pub fn log_level(&self) -> tracing::Level {
        match self {
            OutputMode::Quiet => tracing::Level::ERROR,
            OutputMode::Normal => tracing::Level::WARN,
            OutputMode::Verbose => tracing::Level::INFO,
            OutputMode::VeryVerbose => tracing::Level::DEBUG,
        }
    }
}

/// Records the `(done, total)` pairs reported by a batch run
#[derive(Debug)]
pub struct BatchTracker {
    /// Files finished so far
    pub done: usize,
    /// Files discovered
    pub total: usize,
    start_time: Instant,
}

impl Default for BatchTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchTracker {
    pub fn new() -> Self {
        Self {
            done: 0,
            total: 0,
            start_time: Instant::now(),
        }
    }

    /// Record a progress report
    pub fn update(&mut self, done: usize, total: usize) {
        self.done = done;
        self.total = total;
    }

    /// Completion percentage (100 for an empty batch)
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            100
        } else {
            ((self.done as f64 / self.total as f64) * 100.0) as u8
        }
    }

    /// Get elapsed time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Summarise the run given the errors it returned
    pub fn summary(&self, error_count: usize) -> RunSummary {
        RunSummary {
            total: self.total,
            processed: self.done,
            failed: error_count,
            elapsed_secs: self.elapsed_secs(),
        }
    }
}

/// Outcome of one batch run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
    pub elapsed_secs: f64,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.processed.saturating_sub(self.failed)
    }

    /// A cancelled run stops before reaching the total
    pub fn was_cancelled(&self) -> bool {
        self.processed < self.total
    }

    /// Print final summary
    pub fn print(&self) {
        println!();
        println!("{}", "=".repeat(60));
        println!("{}", self);
        println!("{}", "=".repeat(60));
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trim Summary")?;
        writeln!(f, "  Total files:  {}", self.total)?;
        writeln!(f, "  Succeeded:    {}", self.succeeded())?;
        writeln!(f, "  Errors:       {}", self.failed)?;
        if self.was_cancelled() {
            writeln!(f, "  Cancelled:    {} not processed", self.total - self.processed)?;
        }
        write!(f, "  Elapsed:      {:.2}s", self.elapsed_secs)
    }
}
