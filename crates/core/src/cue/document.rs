//! The key/value document form of cues, rooms and shows.
//!
//! Records mirror the persisted JSON shape exactly. Enumerations travel as
//! their display strings and are validated when a record is turned back into
//! a [`Cue`], so a bad value surfaces as [`PlanError::Validation`] instead of
//! an opaque parse failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Cue, CueType, PlanError, PlayType, RoomPlan, ShowPlan, StartMode, TriggerType};

/// Room name used when a document room has none.
pub const DEFAULT_ROOM_NAME: &str = "Room";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CueRecord {
    pub name: Option<String>,
    pub cue_type: Option<Value>,
    /// Older documents stored the cue type under this key.
    #[serde(skip_serializing)]
    pub media_type: Option<Value>,
    pub trigger_type: Option<Value>,
    pub play_type: Option<Value>,
    pub start_mode: Option<Value>,
    pub start_time_s: Option<f64>,
    pub duration_s: Option<f64>,
    pub dependency_name: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomRecord {
    pub name: Option<String>,
    pub cues: Vec<CueRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowRecord {
    pub rooms: Vec<RoomRecord>,
}

/// Text of an enumeration field. Missing and `null` read as absent, any other
/// non-string value is rejected.
fn enum_text<'a>(
    field: &'static str,
    value: &'a Option<Value>,
) -> Result<Option<&'a str>, PlanError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(other) => Err(PlanError::validation(field, other.to_string())),
    }
}

fn parse_or_default<T>(field: &'static str, value: &Option<Value>) -> Result<T, PlanError>
where
    T: std::str::FromStr<Err = PlanError> + Default,
{
    enum_text(field, value)?
        .map(|s| s.parse::<T>())
        .transpose()
        .map(Option::unwrap_or_default)
}

/// The cue type, falling back to the legacy key when the current one is
/// missing or empty.
fn cue_type_of(record: &CueRecord) -> Result<CueType, PlanError> {
    let current = enum_text("cue_type", &record.cue_type)?.filter(|s| !s.is_empty());
    let text = match current {
        Some(text) => Some(text),
        None => enum_text("cue_type", &record.media_type)?.filter(|s| !s.is_empty()),
    };
    text.map_or(Ok(CueType::default()), |s| s.parse::<CueType>())
}

impl TryFrom<CueRecord> for Cue {
    type Error = PlanError;

    fn try_from(record: CueRecord) -> Result<Self, Self::Error> {
        let cue_type = cue_type_of(&record)?;
        let trigger_type: TriggerType = parse_or_default("trigger_type", &record.trigger_type)?;
        let play_type: PlayType = parse_or_default("play_type", &record.play_type)?;
        let start_mode: StartMode = parse_or_default("start_mode", &record.start_mode)?;

        Ok(Cue {
            name: record.name.unwrap_or_default(),
            cue_type,
            trigger_type,
            play_type,
            start_mode,
            start_time_s: record.start_time_s.unwrap_or(0.0),
            duration_s: record.duration_s.unwrap_or(0.0),
            dependency_name: record.dependency_name.filter(|name| !name.is_empty()),
            notes: record.notes.unwrap_or_default(),
        })
    }
}

impl From<Cue> for CueRecord {
    fn from(cue: Cue) -> Self {
        Self {
            name: Some(cue.name),
            cue_type: Some(Value::from(cue.cue_type.as_str())),
            media_type: None,
            trigger_type: Some(Value::from(cue.trigger_type.as_str())),
            play_type: Some(Value::from(cue.play_type.as_str())),
            start_mode: Some(Value::from(cue.start_mode.as_str())),
            start_time_s: Some(cue.start_time_s),
            duration_s: Some(cue.duration_s),
            dependency_name: cue.dependency_name,
            notes: Some(cue.notes),
        }
    }
}

impl TryFrom<RoomRecord> for RoomPlan {
    type Error = PlanError;

    fn try_from(record: RoomRecord) -> Result<Self, Self::Error> {
        let cues = record
            .cues
            .into_iter()
            .map(Cue::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RoomPlan {
            name: record.name.unwrap_or_else(|| DEFAULT_ROOM_NAME.to_string()),
            cues,
        })
    }
}

impl From<RoomPlan> for RoomRecord {
    fn from(room: RoomPlan) -> Self {
        Self {
            name: Some(room.name),
            cues: room.cues.into_iter().map(CueRecord::from).collect(),
        }
    }
}

impl TryFrom<ShowRecord> for ShowPlan {
    type Error = PlanError;

    fn try_from(record: ShowRecord) -> Result<Self, Self::Error> {
        let rooms = record
            .rooms
            .into_iter()
            .map(RoomPlan::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ShowPlan { rooms })
    }
}

impl From<ShowPlan> for ShowRecord {
    fn from(show: ShowPlan) -> Self {
        Self {
            rooms: show.rooms.into_iter().map(RoomRecord::from).collect(),
        }
    }
}

impl ShowPlan {
    /// Parse a show document. Unknown enumeration values abort the whole load.
    pub fn from_json_str(json: &str) -> Result<Self, PlanError> {
        let record: ShowRecord = serde_json::from_str(json)?;
        ShowPlan::try_from(record)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, PlanError> {
        let record: ShowRecord = serde_json::from_value(value)?;
        ShowPlan::try_from(record)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, PlanError> {
        Ok(serde_json::to_value(ShowRecord::from(self.clone()))?)
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json_string(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string_pretty(&ShowRecord::from(self.clone()))?)
    }
}
