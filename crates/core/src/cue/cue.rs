use std::fmt;
use std::str::FromStr;

use crate::PlanError;

/// Implements `Display`/`FromStr` for a closed enum in terms of its `ALL`
/// table and `as_str`, so the persisted form is always the display string.
macro_rules! display_enum {
    ($ty:ident, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = PlanError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str() == s)
                    .ok_or_else(|| PlanError::validation($field, s))
            }
        }
    };
}

/// High-level category for a cue. Covers AV media as well as visitor and
/// staff actions, so a plan can describe the whole experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CueType {
    #[default]
    Audio,
    Projection,
    Tv,
    Lighting,
    Interactive,
    Activity,
    GroupMovement,
    FacilitatorAction,
}

impl CueType {
    pub const ALL: [CueType; 8] = [
        CueType::Audio,
        CueType::Projection,
        CueType::Tv,
        CueType::Lighting,
        CueType::Interactive,
        CueType::Activity,
        CueType::GroupMovement,
        CueType::FacilitatorAction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "Audio",
            Self::Projection => "Projection",
            Self::Tv => "TV",
            Self::Lighting => "Lighting",
            Self::Interactive => "Interactive",
            Self::Activity => "Activity",
            Self::GroupMovement => "Group Movement",
            Self::FacilitatorAction => "Facilitator Action",
        }
    }

    /// Bar colour used by timeline renderers, as RGB.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Audio => (135, 206, 250),
            Self::Projection => (255, 228, 181),
            Self::Tv => (152, 251, 152),
            Self::Lighting => (255, 182, 193),
            Self::Interactive => (221, 160, 221),
            Self::Activity => (255, 215, 0),
            Self::GroupMovement => (64, 224, 208),
            Self::FacilitatorAction => (255, 165, 0),
        }
    }
}

display_enum!(CueType, "cue_type");

/// How a cue is triggered. Descriptive only; scheduling ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriggerType {
    #[default]
    Timeline,
    Sensor,
    Manual,
}

impl TriggerType {
    pub const ALL: [TriggerType; 3] = [
        TriggerType::Timeline,
        TriggerType::Sensor,
        TriggerType::Manual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeline => "Timeline (auto)",
            Self::Sensor => "Sensor",
            Self::Manual => "Manual (operator)",
        }
    }
}

display_enum!(TriggerType, "trigger_type");

/// Playback behaviour for a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayType {
    #[default]
    PlayOnce,
    Loop,
    Ambient,
}

impl PlayType {
    pub const ALL: [PlayType; 3] = [PlayType::PlayOnce, PlayType::Loop, PlayType::Ambient];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlayOnce => "Play once",
            Self::Loop => "Loop",
            Self::Ambient => "Ambient",
        }
    }
}

display_enum!(PlayType, "play_type");

/// The rule that decides when a cue starts within its room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StartMode {
    /// Starts at `start_time_s` seconds from the start of the room.
    #[default]
    AtFixedTime,
    /// Starts when the cue directly above it ends.
    AfterPrevious,
    /// Starts when the nearest earlier cue called `dependency_name` ends.
    AfterNamedCue,
}

impl StartMode {
    pub const ALL: [StartMode; 3] = [
        StartMode::AtFixedTime,
        StartMode::AfterPrevious,
        StartMode::AfterNamedCue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AtFixedTime => "At fixed time (s)",
            Self::AfterPrevious => "After previous cue",
            Self::AfterNamedCue => "After cue",
        }
    }
}

display_enum!(StartMode, "start_mode");

/// One schedulable unit inside a room.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Cue {
    pub name: String,
    pub cue_type: CueType,
    pub trigger_type: TriggerType,
    pub play_type: PlayType,
    pub start_mode: StartMode,
    pub start_time_s: f64,
    pub duration_s: f64,
    pub dependency_name: Option<String>,
    pub notes: String,
}

impl Cue {
    /// A cue that starts at a fixed offset from the room start.
    pub fn at_time(name: impl Into<String>, start_time_s: f64, duration_s: f64) -> Self {
        Self {
            name: name.into(),
            start_mode: StartMode::AtFixedTime,
            start_time_s,
            duration_s,
            ..Default::default()
        }
    }

    /// A cue that starts when the cue directly before it ends.
    pub fn after_previous(name: impl Into<String>, duration_s: f64) -> Self {
        Self {
            name: name.into(),
            start_mode: StartMode::AfterPrevious,
            duration_s,
            ..Default::default()
        }
    }

    /// A cue that starts when the nearest earlier cue named `dependency` ends.
    pub fn after_cue(
        name: impl Into<String>,
        dependency: impl Into<String>,
        duration_s: f64,
    ) -> Self {
        Self {
            name: name.into(),
            start_mode: StartMode::AfterNamedCue,
            dependency_name: Some(dependency.into()),
            duration_s,
            ..Default::default()
        }
    }

    pub fn with_type(mut self, cue_type: CueType) -> Self {
        self.cue_type = cue_type;
        self
    }

    pub fn with_trigger(mut self, trigger_type: TriggerType) -> Self {
        self.trigger_type = trigger_type;
        self
    }

    pub fn with_play(mut self, play_type: PlayType) -> Self {
        self.play_type = play_type;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Duration clamped to zero. Every consumer of `duration_s` goes through this.
    pub fn effective_duration(&self) -> f64 {
        self.duration_s.max(0.0)
    }

    /// Dependency name if this cue actually waits on one.
    pub fn dependency(&self) -> Option<&str> {
        self.dependency_name.as_deref().filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_strings_parse_back() {
        for cue_type in CueType::ALL {
            assert_eq!(cue_type.as_str().parse::<CueType>().unwrap(), cue_type);
        }
        for mode in StartMode::ALL {
            assert_eq!(mode.to_string().parse::<StartMode>().unwrap(), mode);
        }
        assert_eq!(
            "Manual (operator)".parse::<TriggerType>().unwrap(),
            TriggerType::Manual
        );
        assert_eq!("Play once".parse::<PlayType>().unwrap(), PlayType::PlayOnce);
    }

    #[test]
    fn test_unknown_value_is_validation_error() {
        let err = "Smell-o-vision".parse::<CueType>().unwrap_err();
        match err {
            PlanError::Validation { field, value } => {
                assert_eq!(field, "cue_type");
                assert_eq!(value, "Smell-o-vision");
            }
            other => panic!("unexpected error: {other}"),
        }

        // Enum parsing is exact, not case-insensitive.
        assert!("loop".parse::<PlayType>().is_err());
    }

    #[test]
    fn test_each_cue_type_has_its_own_color() {
        let mut colors: Vec<(u8, u8, u8)> = CueType::ALL.iter().map(CueType::color).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), CueType::ALL.len());
    }

    #[test]
    fn test_effective_duration_clamps_negative() {
        let cue = Cue::at_time("negative", 0.0, -12.5);
        assert_eq!(cue.effective_duration(), 0.0);
        assert_eq!(Cue::at_time("ok", 0.0, 4.0).effective_duration(), 4.0);
    }

    #[test]
    fn test_empty_dependency_is_none() {
        let mut cue = Cue::after_cue("b", "", 1.0);
        assert_eq!(cue.dependency(), None);
        cue.dependency_name = Some("a".to_string());
        assert_eq!(cue.dependency(), Some("a"));
    }

    #[test]
    fn test_defaults_match_document_defaults() {
        let cue = Cue::default();
        assert_eq!(cue.cue_type, CueType::Audio);
        assert_eq!(cue.trigger_type, TriggerType::Timeline);
        assert_eq!(cue.play_type, PlayType::PlayOnce);
        assert_eq!(cue.start_mode, StartMode::AtFixedTime);
        assert_eq!(cue.dependency_name, None);
    }
}
