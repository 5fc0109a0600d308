use crate::{Cue, LaneLayout, RoomPlan, ScheduleResolver};

/// One cue placed on the show-wide timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobalEntry {
    pub room_name: String,
    pub cue: Cue,
    /// Seconds from the start of the first room.
    pub absolute_start: f64,
    /// Seconds from the start of this cue's own room.
    pub local_start: f64,
    /// Clamped to zero.
    pub duration: f64,
}

impl GlobalEntry {
    pub fn end(&self) -> f64 {
        self.absolute_start + self.duration
    }
}

/// Every room's schedule stitched end to end in show order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GlobalTimeline {
    /// One entry per cue, in room order and then cue order.
    pub entries: Vec<GlobalEntry>,
    /// Where each room starts, in the same order as the input rooms.
    pub room_offsets: Vec<(String, f64)>,
    pub total_duration: f64,
}

impl GlobalTimeline {
    /// Entries ordered by absolute start; ties keep show order.
    pub fn sorted_by_start(&self) -> Vec<&GlobalEntry> {
        let mut sorted: Vec<&GlobalEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.absolute_start.total_cmp(&b.absolute_start));
        sorted
    }

    /// Lanes for the whole show, indexed like `entries`.
    pub fn lanes(&self) -> LaneLayout {
        let spans: Vec<(f64, f64)> = self
            .entries
            .iter()
            .map(|entry| (entry.absolute_start, entry.duration))
            .collect();
        LaneLayout::from_spans(&spans)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Chain `rooms` back to back: each room starts where the previous room's last
/// cue ends, so cues from different rooms never overlap.
pub fn build_global_timeline(rooms: &[RoomPlan]) -> GlobalTimeline {
    let mut entries = Vec::new();
    let mut room_offsets = Vec::with_capacity(rooms.len());
    let mut global_offset = 0.0;

    for room in rooms {
        let resolved = ScheduleResolver::new(&room.cues).resolve();
        room_offsets.push((room.name.clone(), global_offset));

        for (cue, local_start) in room.cues.iter().zip(&resolved.starts) {
            entries.push(GlobalEntry {
                room_name: room.name.clone(),
                cue: cue.clone(),
                absolute_start: global_offset + local_start,
                local_start: *local_start,
                duration: cue.effective_duration(),
            });
        }

        global_offset += resolved.room_end(&room.cues);
    }

    log::debug!(
        "built global timeline: {} cues across {} rooms, {:.1}s total",
        entries.len(),
        rooms.len(),
        global_offset
    );

    GlobalTimeline {
        entries,
        room_offsets,
        total_duration: global_offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_room_starts_where_first_ends() {
        let rooms = vec![
            RoomPlan::with_cues(
                "Reception",
                vec![Cue::at_time("a", 0.0, 20.0), Cue::at_time("b", 5.0, 5.0)],
            ),
            RoomPlan::with_cues("Aljuhfa Path", vec![Cue::at_time("c", 0.0, 7.0)]),
        ];
        let timeline = build_global_timeline(&rooms);

        assert_eq!(timeline.entries.len(), 3);
        assert_eq!(timeline.entries[2].room_name, "Aljuhfa Path");
        assert_eq!(timeline.entries[2].absolute_start, 20.0);
        assert_eq!(timeline.entries[2].local_start, 0.0);
        assert_eq!(timeline.total_duration, 27.0);
        assert_eq!(
            timeline.room_offsets,
            vec![
                ("Reception".to_string(), 0.0),
                ("Aljuhfa Path".to_string(), 20.0)
            ]
        );
    }

    #[test]
    fn test_empty_rooms_add_nothing() {
        let rooms = vec![
            RoomPlan::new("Reception"),
            RoomPlan::with_cues("Yemen Market", vec![Cue::at_time("a", 3.0, 2.0)]),
            RoomPlan::new("Road to North"),
            RoomPlan::with_cues("Mecca", vec![Cue::after_previous("b", 4.0)]),
        ];
        let timeline = build_global_timeline(&rooms);
        assert_eq!(timeline.entries[0].absolute_start, 3.0);
        assert_eq!(timeline.entries[1].absolute_start, 5.0);
        assert_eq!(timeline.total_duration, 9.0);
        assert_eq!(timeline.room_offsets[2].1, 5.0);
    }

    #[test]
    fn test_no_rooms() {
        let timeline = build_global_timeline(&[]);
        assert!(timeline.is_empty());
        assert_eq!(timeline.total_duration, 0.0);
        assert_eq!(timeline.lanes().lane_count, 0);
    }

    #[test]
    fn test_negative_duration_is_clamped_in_entries() {
        let rooms = vec![RoomPlan::with_cues(
            "Reception",
            vec![Cue::at_time("a", 4.0, -2.0)],
        )];
        let timeline = build_global_timeline(&rooms);
        assert_eq!(timeline.entries[0].duration, 0.0);
        assert_eq!(timeline.total_duration, 4.0);
    }

    #[test]
    fn test_sorted_view_and_lanes() {
        let rooms = vec![
            RoomPlan::with_cues(
                "Reception",
                vec![Cue::at_time("late", 8.0, 2.0), Cue::at_time("early", 0.0, 10.0)],
            ),
            RoomPlan::with_cues("Mecca", vec![Cue::at_time("next", 0.0, 1.0)]),
        ];
        let timeline = build_global_timeline(&rooms);
        let names: Vec<&str> = timeline
            .sorted_by_start()
            .iter()
            .map(|entry| entry.cue.name.as_str())
            .collect();
        assert_eq!(names, vec!["early", "late", "next"]);

        let layout = timeline.lanes();
        assert_eq!(layout.lanes, vec![1, 0, 0]);
        assert_eq!(layout.lane_count, 2);
    }
}
