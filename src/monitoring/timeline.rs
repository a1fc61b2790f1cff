//! Run Timeline
//!
//! Records when each demo step started and how it ended, for the closing
//! summary and a debug-level Gantt chart.

use std::time::{Duration, Instant};

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Failed,
    /// Cut short by an interrupt
    Interrupted,
}

/// Timing record for one step.
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub description: String,
    pub started: Instant,
    pub finished: Option<Instant>,
    pub status: Option<StepStatus>,
}

impl StepRecord {
    /// Time between start and finish, if finished.
    pub fn duration(&self) -> Option<Duration> {
        self.finished.map(|end| end.duration_since(self.started))
    }
}

/// Aggregate counts over a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimelineSummary {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub interrupted: usize,
}

/// Ordered record of every step the runner executed.
#[derive(Debug, Clone)]
pub struct ExecutionTimeline {
    records: Vec<StepRecord>,
    start_time: Instant,
}

impl ExecutionTimeline {
    /// Creates a new timeline starting now.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            start_time: Instant::now(),
        }
    }

    /// Records the start of a step and returns its index.
    pub fn start(&mut self, description: impl Into<String>) -> usize {
        self.records.push(StepRecord {
            description: description.into(),
            started: Instant::now(),
            finished: None,
            status: None,
        });
        self.records.len() - 1
    }

    /// Records how the step at `index` ended. Unknown indices are ignored.
    pub fn finish(&mut self, index: usize, status: StepStatus) {
        if let Some(record) = self.records.get_mut(index) {
            record.finished = Some(Instant::now());
            record.status = Some(status);
        }
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Returns the total elapsed time since timeline creation.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn summary(&self) -> TimelineSummary {
        let mut summary = TimelineSummary {
            total: self.records.len(),
            ..TimelineSummary::default()
        };

        for record in &self.records {
            match record.status {
                Some(StepStatus::Completed) => summary.completed += 1,
                Some(StepStatus::Failed) => summary.failed += 1,
                Some(StepStatus::Interrupted) => summary.interrupted += 1,
                None => {}
            }
        }

        summary
    }

    /// Generates an ASCII Gantt chart, one bar per finished step.
    pub fn gantt_chart(&self) -> String {
        let mut output = String::from("\nExecution Timeline:\n\n");

        let total_time = self.elapsed().as_millis();
        if total_time == 0 {
            return output;
        }

        // Scale to 50 characters width
        let scale = 50.0 / total_time as f64;

        for record in &self.records {
            let Some(duration) = record.duration() else {
                continue;
            };

            let start = record.started.duration_since(self.start_time).as_millis();
            let start_pos = (start as f64 * scale) as usize;
            let width = (duration.as_millis() as f64 * scale).max(1.0) as usize;

            let mark = match record.status {
                Some(StepStatus::Failed) => "x",
                Some(StepStatus::Interrupted) => "!",
                _ => "#",
            };

            output.push_str(&format!(
                "{} |{}{}| ({} ms)\n",
                truncate(&record.description, 24),
                " ".repeat(start_pos),
                mark.repeat(width),
                duration.as_millis()
            ));
        }

        output.push_str(&format!("\nTotal: {} ms\n", total_time));
        output
    }
}

impl Default for ExecutionTimeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Pads or truncates to exactly `max_len` characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
