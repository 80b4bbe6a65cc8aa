use super::{start_order, Placement, TimedInterval};

/// Column assignment for one cluster member.
struct Slot {
    position: usize,
    column: usize,
}

/// Splits intervals into overlap clusters and gives each cluster its own set
/// of columns. Intervals widen to the right across columns they do not collide
/// with.
pub(super) fn place(intervals: &[TimedInterval<'_>]) -> Vec<Placement> {
    let mut placements = vec![
        Placement::Column {
            col_index: 0,
            col_count: 1,
            col_span: 1,
        };
        intervals.len()
    ];

    let mut cluster: Vec<Slot> = Vec::new();
    let mut column_ends: Vec<u32> = Vec::new();
    let mut cluster_end = 0u32;

    for position in start_order(intervals) {
        let interval = &intervals[position];
        if !cluster.is_empty() && interval.start_minute >= cluster_end {
            finish_cluster(intervals, &cluster, column_ends.len(), &mut placements);
            cluster.clear();
            column_ends.clear();
            cluster_end = 0;
        }

        let column = match column_ends
            .iter()
            .position(|&end| end <= interval.start_minute)
        {
            Some(column) => {
                column_ends[column] = interval.end_minute;
                column
            }
            None => {
                column_ends.push(interval.end_minute);
                column_ends.len() - 1
            }
        };
        cluster_end = cluster_end.max(interval.end_minute);
        cluster.push(Slot { position, column });
    }

    if !cluster.is_empty() {
        finish_cluster(intervals, &cluster, column_ends.len(), &mut placements);
    }

    placements
}

fn finish_cluster(
    intervals: &[TimedInterval<'_>],
    cluster: &[Slot],
    col_count: usize,
    placements: &mut [Placement],
) {
    for slot in cluster {
        let interval = &intervals[slot.position];
        let mut col_span = 1;
        for column in slot.column + 1..col_count {
            let blocked = cluster
                .iter()
                .filter(|other| other.column == column)
                .any(|other| intervals[other.position].overlaps(interval));
            if blocked {
                break;
            }
            col_span += 1;
        }

        placements[slot.position] = Placement::Column {
            col_index: slot.column,
            col_count,
            col_span,
        };
    }
}
