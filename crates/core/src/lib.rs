//! Scheduling and layout engine for multi-room exhibition cue plans.
//!
//! Rooms hold ordered cues with start rules. The engine resolves those rules
//! into start times, packs overlapping cues into display lanes, stitches
//! rooms into one show-wide timeline and derives statistics and a text
//! report from the result. Everything is recomputed on demand from the
//! current plan; nothing is cached.

pub use config::{ConfigError, ConfigFile, ConfigManager, ConfigOption, ConfigSchema, PlannerSettings};
pub use cue::cue::{Cue, CueType, PlayType, StartMode, TriggerType};
pub use cue::document::{CueRecord, RoomRecord, ShowRecord, DEFAULT_ROOM_NAME};
pub use cue::schedule::{resolve_schedule, ResolvedSchedule, ScheduleResolver};
pub use error::{PlanError, Result};
pub use report::report::{build_report, ReportOptions, DEFAULT_REPORT_WIDTH};
pub use show::show::{RoomPlan, ShowPlan, DEFAULT_ROOM_ORDER};
pub use show::show_manager::ShowManager;
pub use stats::stats::{aggregate_statistics, CueNote, CueTypeStats, RoomStats, ShowStats};
pub use timecode::timecode::{format_clock, ShowClock};
pub use timeline::global::{build_global_timeline, GlobalEntry, GlobalTimeline};
pub use timeline::lanes::{allocate_lanes, LaneLayout};

mod config;
mod cue;
mod error;
mod report;
mod show;
mod stats;
mod timecode;
mod timeline;
