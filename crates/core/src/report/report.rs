use std::fmt::{self, Write as _};

use crate::{format_clock, GlobalTimeline, ShowStats};

/// Default rule width for section separators.
pub const DEFAULT_REPORT_WIDTH: usize = 72;

/// Options for [`build_report`].
#[derive(Clone, Debug)]
pub struct ReportOptions {
    pub title: String,
    pub width: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "CUE PLANNER - FULL SUMMARY".to_string(),
            width: DEFAULT_REPORT_WIDTH,
        }
    }
}

fn seconds_with_clock(seconds: f64) -> String {
    format!("{:.1} s ({})", seconds, format_clock(seconds))
}

/// Render the plain-text show report: overall totals, a breakdown per room
/// and the room-to-room timeline.
pub fn build_report(
    stats: &ShowStats,
    timeline: &GlobalTimeline,
    options: &ReportOptions,
) -> String {
    Report {
        stats,
        timeline,
        options,
    }
    .to_string()
}

struct Report<'a> {
    stats: &'a ShowStats,
    timeline: &'a GlobalTimeline,
    options: &'a ReportOptions,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(f, self.stats, self.timeline, self.options)
    }
}

fn write_report(
    out: &mut impl fmt::Write,
    stats: &ShowStats,
    timeline: &GlobalTimeline,
    options: &ReportOptions,
) -> fmt::Result {
    let heavy = "=".repeat(options.width);
    let light = "-".repeat(options.width);
    let first_room = stats
        .rooms
        .first()
        .map(|room| room.room_name.as_str())
        .unwrap_or("the first room");

    writeln!(out, "{}", options.title)?;
    writeln!(out, "{heavy}")?;
    writeln!(out)?;

    writeln!(out, "OVERALL SHOW")?;
    writeln!(out, "{light}")?;
    writeln!(out, "Total number of rooms: {}", stats.rooms.len())?;
    writeln!(out, "Total number of cues:  {}", stats.total_cues)?;
    writeln!(
        out,
        "Total cue time (all rooms combined): {}",
        seconds_with_clock(stats.total_cue_time)
    )?;
    writeln!(
        out,
        "End of the final room relative to the start of {first_room}: {}",
        seconds_with_clock(stats.total_show_duration)
    )?;
    writeln!(out)?;

    writeln!(out, "Cues by Cue Type (whole show):")?;
    if stats.by_cue_type.is_empty() {
        writeln!(out, "  (no cues defined yet)")?;
    }
    for entry in &stats.by_cue_type {
        writeln!(out, "  * {}: {} cues", entry.cue_type, entry.count)?;
    }
    writeln!(out)?;

    writeln!(out, "Cues by Trigger Type (whole show):")?;
    if stats.by_trigger.is_empty() {
        writeln!(out, "  (no cues defined yet)")?;
    }
    for (trigger, count) in &stats.by_trigger {
        writeln!(out, "  * {trigger}: {count} cues")?;
    }
    writeln!(out)?;

    writeln!(out, "Cues by Play Type (whole show):")?;
    if stats.by_play.is_empty() {
        writeln!(out, "  (no cues defined yet)")?;
    }
    for (play, count) in &stats.by_play {
        writeln!(out, "  * {play}: {count} cues")?;
    }
    writeln!(out)?;
    writeln!(out)?;

    writeln!(out, "PER-ROOM BREAKDOWN")?;
    writeln!(out, "{heavy}")?;
    writeln!(out)?;

    for room in &stats.rooms {
        writeln!(out, "ROOM: {}", room.room_name)?;
        writeln!(out, "{light}")?;
        writeln!(out, "Number of cues in this room: {}", room.cue_count)?;
        writeln!(
            out,
            "Approximate duration of this room: {}",
            seconds_with_clock(room.room_duration)
        )?;
        writeln!(out)?;

        writeln!(out, "  By Cue Type:")?;
        if room.by_cue_type.is_empty() {
            writeln!(out, "    (no cues yet for this room)")?;
        }
        for entry in &room.by_cue_type {
            writeln!(
                out,
                "    * {}: {} cue(s), total {:.1} s, average {:.1} s each",
                entry.cue_type,
                entry.count,
                entry.total_duration,
                entry.average_duration()
            )?;
        }
        writeln!(out)?;

        writeln!(out, "  By Trigger:")?;
        if room.by_trigger.is_empty() {
            writeln!(out, "    (no triggers yet)")?;
        }
        for (trigger, count) in &room.by_trigger {
            writeln!(out, "    * {trigger}: {count} cue(s) in this room")?;
        }
        writeln!(out)?;

        writeln!(out, "  By Play Type:")?;
        if room.by_play.is_empty() {
            writeln!(out, "    (no playback modes defined)")?;
        }
        for (play, count) in &room.by_play {
            writeln!(out, "    * {play}: {count} cue(s) in this room")?;
        }
        writeln!(out)?;

        if room.notes.is_empty() {
            writeln!(out, "  Operator / design notes for this room: (none)")?;
        } else {
            writeln!(out, "  Operator / design notes for this room:")?;
            for note in &room.notes {
                writeln!(
                    out,
                    "    * Around {:.1} s from the start of this room, for cue \"{}\": {}",
                    note.local_start, note.cue_name, note.note
                )?;
            }
        }
        writeln!(out)?;

        writeln!(out, "  Timeline for this room (local times):")?;
        if room.timeline.is_empty() {
            writeln!(out, "    (no cues yet for this room)")?;
        }
        for (start, cue) in &room.timeline {
            writeln!(
                out,
                "    * At {:.1} s (lasting {:.1} s): cue \"{}\" [{}] - Triggered by: {}; \
                 Play mode: {}; Start rule: {}; Dependency: {}.",
                start,
                cue.effective_duration(),
                cue.name,
                cue.cue_type,
                cue.trigger_type,
                cue.play_type,
                cue.start_mode,
                cue.dependency().unwrap_or("No specific dependency")
            )?;
        }
        writeln!(out)?;
        writeln!(out)?;
    }

    writeln!(out, "GLOBAL TIMELINE")?;
    writeln!(out, "{heavy}")?;
    writeln!(
        out,
        "Times are measured from the very beginning of {first_room}, with each room \
         starting when the previous one ends."
    )?;
    writeln!(out)?;

    if timeline.is_empty() {
        writeln!(out, "There are currently no cues defined in any room.")?;
    }
    for entry in timeline.sorted_by_start() {
        let cue = &entry.cue;
        writeln!(
            out,
            "* At {}, in room \"{}\", cue \"{}\" starts. It lasts {} and is of type {}. \
             Triggered by {}, play mode {}, start rule \"{}\". Dependency: {}.",
            seconds_with_clock(entry.absolute_start),
            entry.room_name,
            cue.name,
            seconds_with_clock(entry.duration),
            cue.cue_type,
            cue.trigger_type,
            cue.play_type,
            cue.start_mode,
            cue.dependency().unwrap_or("No specific dependency")
        )?;
    }

    Ok(())
}
