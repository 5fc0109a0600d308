//! Counts and durations derived from resolved schedules.
//!
//! Everything here is recomputed from scratch on each call. Groupings are
//! listed alphabetically by their display string.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::{Cue, CueType, GlobalTimeline, PlayType, RoomPlan, ScheduleResolver, TriggerType};

/// Count and summed duration for one cue type.
#[derive(Clone, Debug, PartialEq)]
pub struct CueTypeStats {
    pub cue_type: CueType,
    pub count: usize,
    pub total_duration: f64,
}

impl CueTypeStats {
    pub fn average_duration(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_duration / self.count as f64
        }
    }
}

/// A note attached to a cue, placed at the cue's local start.
#[derive(Clone, Debug, PartialEq)]
pub struct CueNote {
    pub local_start: f64,
    pub cue_name: String,
    pub note: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoomStats {
    pub room_name: String,
    pub cue_count: usize,
    /// End of the room's last cue, relative to the room start.
    pub room_duration: f64,
    pub by_cue_type: Vec<CueTypeStats>,
    pub by_trigger: Vec<(TriggerType, usize)>,
    pub by_play: Vec<(PlayType, usize)>,
    /// Sorted by start; ties keep list order.
    pub notes: Vec<CueNote>,
    /// `(local_start, cue)` sorted by start; ties keep list order.
    pub timeline: Vec<(f64, Cue)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShowStats {
    pub rooms: Vec<RoomStats>,
    pub total_cues: usize,
    /// Sum of every cue's duration, regardless of overlap.
    pub total_cue_time: f64,
    /// End of the last room, measured from the start of the first.
    pub total_show_duration: f64,
    pub by_cue_type: Vec<CueTypeStats>,
    pub by_trigger: Vec<(TriggerType, usize)>,
    pub by_play: Vec<(PlayType, usize)>,
}

#[derive(Default)]
struct Tally {
    cue_types: HashMap<CueType, (usize, f64)>,
    triggers: HashMap<TriggerType, usize>,
    plays: HashMap<PlayType, usize>,
}

impl Tally {
    fn add(&mut self, cue: &Cue) {
        let entry = self.cue_types.entry(cue.cue_type).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += cue.effective_duration();
        *self.triggers.entry(cue.trigger_type).or_insert(0) += 1;
        *self.plays.entry(cue.play_type).or_insert(0) += 1;
    }

    fn cue_types(&self) -> Vec<CueTypeStats> {
        let mut stats: Vec<CueTypeStats> = self
            .cue_types
            .iter()
            .map(|(cue_type, (count, total))| CueTypeStats {
                cue_type: *cue_type,
                count: *count,
                total_duration: *total,
            })
            .collect();
        stats.sort_by_key(|entry| entry.cue_type.as_str());
        stats
    }

    fn triggers(&self) -> Vec<(TriggerType, usize)> {
        sorted_counts(&self.triggers)
    }

    fn plays(&self) -> Vec<(PlayType, usize)> {
        sorted_counts(&self.plays)
    }
}

fn sorted_counts<K: Copy + Eq + Hash + Display>(counts: &HashMap<K, usize>) -> Vec<(K, usize)> {
    let mut sorted: Vec<(K, usize)> = counts.iter().map(|(k, v)| (*k, *v)).collect();
    sorted.sort_by_cached_key(|(key, _)| key.to_string());
    sorted
}

fn room_stats(room: &RoomPlan) -> RoomStats {
    let resolved = ScheduleResolver::new(&room.cues).resolve();
    let mut tally = Tally::default();
    let mut notes = Vec::new();
    let mut timeline = Vec::with_capacity(room.cues.len());

    for (cue, start) in room.cues.iter().zip(&resolved.starts) {
        tally.add(cue);
        if !cue.notes.is_empty() {
            notes.push(CueNote {
                local_start: *start,
                cue_name: cue.name.clone(),
                note: cue.notes.clone(),
            });
        }
        timeline.push((*start, cue.clone()));
    }

    notes.sort_by(|a, b| a.local_start.total_cmp(&b.local_start));
    timeline.sort_by(|a, b| a.0.total_cmp(&b.0));

    RoomStats {
        room_name: room.name.clone(),
        cue_count: room.cues.len(),
        room_duration: resolved.room_end(&room.cues),
        by_cue_type: tally.cue_types(),
        by_trigger: tally.triggers(),
        by_play: tally.plays(),
        notes,
        timeline,
    }
}

/// Per-room and whole-show statistics for `rooms`, laid out on `timeline`
/// (normally the result of `build_global_timeline` on the same rooms).
pub fn aggregate_statistics(rooms: &[RoomPlan], timeline: &GlobalTimeline) -> ShowStats {
    let rooms: Vec<RoomStats> = rooms.iter().map(room_stats).collect();

    let mut tally = Tally::default();
    let mut total_cue_time = 0.0;
    for entry in &timeline.entries {
        tally.add(&entry.cue);
        total_cue_time += entry.duration;
    }

    ShowStats {
        rooms,
        total_cues: timeline.entries.len(),
        total_cue_time,
        total_show_duration: timeline.total_duration,
        by_cue_type: tally.cue_types(),
        by_trigger: tally.triggers(),
        by_play: tally.plays(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_global_timeline;

    fn sample_rooms() -> Vec<RoomPlan> {
        vec![
            RoomPlan::with_cues(
                "Reception",
                vec![
                    Cue::at_time("welcome", 0.0, 30.0)
                        .with_notes("check volume before doors"),
                    Cue::at_time("lights", 0.0, 10.0).with_type(CueType::Lighting),
                    Cue::after_previous("walk", 20.0)
                        .with_type(CueType::GroupMovement)
                        .with_trigger(TriggerType::Manual),
                ],
            ),
            RoomPlan::new("Aljuhfa Path"),
            RoomPlan::with_cues(
                "Mecca",
                vec![Cue::at_time("finale", 0.0, 60.0)
                    .with_play(PlayType::Loop)
                    .with_notes("fade on exit")],
            ),
        ]
    }

    #[test]
    fn test_room_stats() {
        let rooms = sample_rooms();
        let stats = aggregate_statistics(&rooms, &build_global_timeline(&rooms));
        let reception = &stats.rooms[0];

        assert_eq!(reception.cue_count, 3);
        assert_eq!(reception.room_duration, 30.0);
        let types: Vec<(CueType, usize, f64)> = reception
            .by_cue_type
            .iter()
            .map(|s| (s.cue_type, s.count, s.total_duration))
            .collect();
        assert_eq!(
            types,
            vec![
                (CueType::Audio, 1, 30.0),
                (CueType::GroupMovement, 1, 20.0),
                (CueType::Lighting, 1, 10.0),
            ]
        );
        assert_eq!(
            reception.by_trigger,
            vec![(TriggerType::Manual, 1), (TriggerType::Timeline, 2)]
        );
        assert_eq!(reception.notes.len(), 1);
        assert_eq!(reception.notes[0].cue_name, "welcome");

        let order: Vec<&str> = reception
            .timeline
            .iter()
            .map(|(_, cue)| cue.name.as_str())
            .collect();
        assert_eq!(order, vec!["welcome", "lights", "walk"]);

        let empty = &stats.rooms[1];
        assert_eq!(empty.cue_count, 0);
        assert_eq!(empty.room_duration, 0.0);
        assert!(empty.by_cue_type.is_empty());
    }

    #[test]
    fn test_show_totals() {
        let rooms = sample_rooms();
        let stats = aggregate_statistics(&rooms, &build_global_timeline(&rooms));

        assert_eq!(stats.total_cues, 4);
        assert_eq!(stats.total_cue_time, 120.0);
        assert_eq!(stats.total_show_duration, 90.0);
        assert_eq!(
            stats.by_play,
            vec![(PlayType::Loop, 1), (PlayType::PlayOnce, 3)]
        );
        let audio = &stats.by_cue_type[0];
        assert_eq!(audio.cue_type, CueType::Audio);
        assert_eq!(audio.count, 2);
        assert_eq!(audio.average_duration(), 45.0);
    }

    #[test]
    fn test_trigger_sort_is_by_display_string() {
        let rooms = vec![RoomPlan::with_cues(
            "Reception",
            vec![
                Cue::at_time("a", 0.0, 1.0).with_trigger(TriggerType::Timeline),
                Cue::at_time("b", 0.0, 1.0).with_trigger(TriggerType::Sensor),
                Cue::at_time("c", 0.0, 1.0).with_trigger(TriggerType::Manual),
            ],
        )];
        let stats = aggregate_statistics(&rooms, &build_global_timeline(&rooms));
        let keys: Vec<TriggerType> = stats.by_trigger.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![TriggerType::Manual, TriggerType::Sensor, TriggerType::Timeline]
        );
    }

    #[test]
    fn test_average_of_empty_group_is_zero() {
        let stats = CueTypeStats {
            cue_type: CueType::Tv,
            count: 0,
            total_duration: 0.0,
        };
        assert_eq!(stats.average_duration(), 0.0);
    }
}
