use crate::{Cue, StartMode};

/// Resolves each cue's start rule into a start time relative to the room start.
///
/// Resolution walks the cues strictly in list order. A cue can only depend on
/// cues above it, so there are no cycles to detect and every edit is picked up
/// on the next resolve.
pub struct ScheduleResolver<'a> {
    cues: &'a [Cue],
}

impl<'a> ScheduleResolver<'a> {
    pub fn new(cues: &'a [Cue]) -> Self {
        Self { cues }
    }

    pub fn resolve(&self) -> ResolvedSchedule {
        let mut starts: Vec<f64> = Vec::with_capacity(self.cues.len());
        let mut cursor = 0.0_f64;

        for (index, cue) in self.cues.iter().enumerate() {
            let start = match cue.start_mode {
                StartMode::AtFixedTime => {
                    let start = cue.start_time_s.max(0.0);
                    cursor = cursor.max(start);
                    start
                }
                StartMode::AfterPrevious => {
                    let start = if index == 0 {
                        0.0
                    } else {
                        starts[index - 1] + self.cues[index - 1].effective_duration()
                    };
                    cursor = start;
                    start
                }
                StartMode::AfterNamedCue => {
                    let start = match self.find_dependency(index, cue) {
                        Some(dep) => starts[dep] + self.cues[dep].effective_duration(),
                        None => {
                            log::warn!(
                                "cue {:?} waits on {:?}, which is not an earlier cue; starting at 0",
                                cue.name,
                                cue.dependency().unwrap_or_default()
                            );
                            0.0
                        }
                    };
                    cursor = cursor.max(start);
                    start
                }
            };
            starts.push(start);
        }

        ResolvedSchedule { starts, cursor }
    }

    /// Nearest cue above `index` whose name matches the dependency. Duplicate
    /// names resolve to the closest preceding cue, not the first one.
    fn find_dependency(&self, index: usize, cue: &Cue) -> Option<usize> {
        let dependency = cue.dependency()?;
        self.cues[..index]
            .iter()
            .rposition(|candidate| candidate.name == dependency)
    }
}

/// Start times for one room, in the same order as its cues.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSchedule {
    pub starts: Vec<f64>,
    /// Running "current time" left after the last cue was placed.
    pub cursor: f64,
}

impl ResolvedSchedule {
    /// Latest end time among `cues`, or 0 for an empty room.
    pub fn room_end(&self, cues: &[Cue]) -> f64 {
        self.starts
            .iter()
            .zip(cues)
            .map(|(start, cue)| start + cue.effective_duration())
            .fold(0.0, f64::max)
    }

    /// `(start, duration)` pairs ready for lane allocation.
    pub fn spans(&self, cues: &[Cue]) -> Vec<(f64, f64)> {
        self.starts
            .iter()
            .zip(cues)
            .map(|(start, cue)| (*start, cue.effective_duration()))
            .collect()
    }
}

/// Resolve one room's cues into start times (seconds from room start).
pub fn resolve_schedule(cues: &[Cue]) -> Vec<f64> {
    ScheduleResolver::new(cues).resolve().starts
}
