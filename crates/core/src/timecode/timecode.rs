use std::fmt;

/// Wall-clock rendering of a duration in seconds, rounded to whole seconds.
///
/// Formats as `MM:SS`, or `H:MM:SS` once the duration reaches an hour.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub struct ShowClock {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl ShowClock {
    /// Negative inputs read as zero. Halves round to even (2.5s → 00:02).
    pub fn from_seconds(seconds: f64) -> Self {
        let total = if seconds.is_finite() {
            seconds.round_ties_even().max(0.0) as u64
        } else {
            0
        };
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for ShowClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours > 0 {
            write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
        } else {
            write!(f, "{:02}:{:02}", self.minutes, self.seconds)
        }
    }
}

/// Shorthand for `ShowClock::from_seconds(seconds).to_string()`.
pub fn format_clock(seconds: f64) -> String {
    ShowClock::from_seconds(seconds).to_string()
}
