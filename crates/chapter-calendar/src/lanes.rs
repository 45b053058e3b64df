//! Lane packing for all-day bars within one week.
//!
//! Bars are placed greedily: sorted by start column, each bar takes the
//! lowest lane whose last occupied column is left of the bar's first column.
//! This is interval-graph colouring in start order, so the lane count is
//! minimal for the sorted order and the result is deterministic.

use serde::{Deserialize, Serialize};

use crate::grid::DAYS_PER_WEEK;

/// An all-day event's visible span within one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub event_id: i64,
    /// 0 = Sunday.
    pub start_column: usize,
    /// Number of columns covered, 1 through 7.
    pub span: usize,
}

impl Bar {
    /// Last column covered (inclusive).
    pub fn end_column(&self) -> usize {
        (self.start_column + self.span.max(1) - 1).min(DAYS_PER_WEEK - 1)
    }

    pub fn covers(&self, column: usize) -> bool {
        self.start_column <= column && column <= self.end_column()
    }
}

/// A bar with its assigned lane (0 = top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LaneBar {
    #[serde(flatten)]
    pub bar: Bar,
    pub lane: usize,
}

/// Ordering among bars that start in the same column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaneTieBreak {
    /// Longer bars first.
    #[default]
    SpanDescending,
    /// Shorter bars first.
    SpanAscending,
}

/// Assign lanes with the default tie-break (longer bars first).
pub fn assign_lanes(bars: &[Bar]) -> Vec<LaneBar> {
    assign_lanes_with(bars, LaneTieBreak::default())
}

/// Assign each bar the lowest lane it fits in.
///
/// The output is in placement order (start column, then `tie_break`). Equal
/// bars keep their input order, so repeated calls give identical lanes.
pub fn assign_lanes_with(bars: &[Bar], tie_break: LaneTieBreak) -> Vec<LaneBar> {
    let mut ordered: Vec<&Bar> = bars.iter().collect();
    ordered.sort_by(|a, b| {
        let by_span = match tie_break {
            LaneTieBreak::SpanDescending => b.span.cmp(&a.span),
            LaneTieBreak::SpanAscending => a.span.cmp(&b.span),
        };
        a.start_column.cmp(&b.start_column).then(by_span)
    });

    // lane_ends[i] = rightmost occupied column in lane i.
    let mut lane_ends: Vec<usize> = Vec::new();
    let mut placed = Vec::with_capacity(ordered.len());
    for bar in ordered {
        let lane = lane_ends
            .iter()
            .position(|&end| end < bar.start_column)
            .unwrap_or_else(|| {
                lane_ends.push(bar.end_column());
                lane_ends.len() - 1
            });
        lane_ends[lane] = bar.end_column();
        placed.push(LaneBar { bar: *bar, lane });
    }
    placed
}

/// Number of lanes used by a placement.
pub fn lane_count(placed: &[LaneBar]) -> usize {
    placed.iter().map(|b| b.lane + 1).max().unwrap_or(0)
}
