//! Mission log: timestamped record of flight events for the HUD and the console.

use std::fmt;

use engine_core::{FlightEvent, Severity};

/// One timestamped line.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Mission time in seconds when the entry was recorded.
    pub mission_time: f32,
    pub severity: Severity,
    pub text: String,
    /// Seconds left on the HUD. The entry stays in history after it hides.
    pub time_remaining: f32,
}

impl LogEntry {
    pub fn is_visible(&self) -> bool {
        self.time_remaining > 0.0
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.mission_time.max(0.0);
        let minutes = (t / 60.0).floor();
        let seconds = t - minutes * 60.0;
        write!(f, "[T+{:02}:{:04.1}] {}", minutes as u32, seconds, self.text)
    }
}

/// Rolling history of mission messages.
pub struct MissionLog {
    entries: Vec<LogEntry>,
    pub max_visible: usize,
    capacity: usize,
    default_duration: f32,
}

impl Default for MissionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionLog {
    pub fn new() -> Self {
        Self::with_capacity(50)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_visible: 12,
            capacity: capacity.max(1),
            default_duration: 6.0,
        }
    }

    pub fn push(&mut self, mission_time: f32, severity: Severity, text: impl Into<String>) {
        let entry = LogEntry {
            mission_time,
            severity,
            text: text.into(),
            time_remaining: self.default_duration,
        };
        match severity {
            Severity::Info | Severity::Success => log::info!("{}", entry),
            Severity::Warning => log::warn!("{}", entry),
            Severity::Critical => log::error!("{}", entry),
        }
        self.entries.push(entry);
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
    }

    pub fn info(&mut self, mission_time: f32, text: impl Into<String>) {
        self.push(mission_time, Severity::Info, text);
    }

    /// Record a flight event. Returns false for events that stay out of the log.
    pub fn record(&mut self, mission_time: f32, event: &FlightEvent) -> bool {
        if !event.is_loggable() {
            log::trace!("{} (not logged)", event);
            return false;
        }
        self.push(mission_time, event.severity(), event.to_string());
        true
    }

    /// Age HUD lines. History is kept.
    pub fn update(&mut self, dt: f32) {
        for entry in &mut self.entries {
            entry.time_remaining -= dt;
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Newest entries still on screen, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &LogEntry> {
        let shown: Vec<&LogEntry> =
            self.entries.iter().rev().filter(|e| e.is_visible()).take(self.max_visible).collect();
        shown.into_iter().rev()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
