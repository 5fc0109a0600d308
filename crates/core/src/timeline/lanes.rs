/// Assign each `(start, end)` interval to a display lane so that no two
/// intervals sharing a lane overlap.
///
/// Greedy interval colouring: intervals are visited by ascending start (ties
/// keep input order) and each takes the first lane that is already free at
/// its start, opening a new lane when none is. Touching intervals (one ends
/// exactly where the next starts) share a lane. The number of lanes used is
/// the largest number of intervals in flight at any instant.
pub fn allocate_lanes(intervals: &[(f64, f64)]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    // `sort_by` is stable, which keeps layouts identical between runs.
    order.sort_by(|&a, &b| intervals[a].0.total_cmp(&intervals[b].0));

    let mut lane_ends: Vec<f64> = Vec::new();
    let mut lanes = vec![0; intervals.len()];

    for index in order {
        let (start, end) = intervals[index];
        match lane_ends.iter().position(|&lane_end| lane_end <= start) {
            Some(lane) => {
                lanes[index] = lane;
                lane_ends[lane] = end;
            }
            None => {
                lanes[index] = lane_ends.len();
                lane_ends.push(end);
            }
        }
    }

    lanes
}

/// Lane assignment for a set of `(start, duration)` spans.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct LaneLayout {
    pub lanes: Vec<usize>,
    pub lane_count: usize,
}

impl LaneLayout {
    /// Negative durations are treated as zero.
    pub fn from_spans(spans: &[(f64, f64)]) -> Self {
        let intervals: Vec<(f64, f64)> = spans
            .iter()
            .map(|&(start, duration)| (start, start + duration.max(0.0)))
            .collect();
        let lanes = allocate_lanes(&intervals);
        let lane_count = lanes.iter().max().map_or(0, |max| max + 1);
        Self { lanes, lane_count }
    }
}
