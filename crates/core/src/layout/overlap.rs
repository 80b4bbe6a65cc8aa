use super::{start_order, Placement, TimedInterval};

/// Greedy stacking: each interval takes the lowest level that has freed up by
/// its start, and shrinks by `step` percent per level down to `min_width`.
pub(super) fn place(intervals: &[TimedInterval<'_>], step: u32, min_width: u32) -> Vec<Placement> {
    let mut placements = vec![
        Placement::Stacked {
            stack_index: 0,
            offset_percent: 0,
            width_percent: 100,
        };
        intervals.len()
    ];
    // Last end minute of each open level.
    let mut level_ends: Vec<u32> = Vec::new();

    for position in start_order(intervals) {
        let interval = &intervals[position];
        let level = match level_ends
            .iter()
            .position(|&end| end <= interval.start_minute)
        {
            Some(level) => {
                level_ends[level] = interval.end_minute;
                level
            }
            None => {
                level_ends.push(interval.end_minute);
                level_ends.len() - 1
            }
        };

        let offset = u32::try_from(level)
            .unwrap_or(u32::MAX)
            .saturating_mul(step);
        placements[position] = Placement::Stacked {
            stack_index: level,
            offset_percent: offset,
            width_percent: 100u32.saturating_sub(offset).max(min_width),
        };
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CivilDate;
    use crate::event::Event;

    fn stacked(placement: Placement) -> (usize, u32, u32) {
        match placement {
            Placement::Stacked {
                stack_index,
                offset_percent,
                width_percent,
            } => (stack_index, offset_percent, width_percent),
            other => panic!("expected stacked placement, got {other:?}"),
        }
    }

    fn place_minutes(minutes: &[(u32, u32)]) -> Vec<(usize, u32, u32)> {
        let event = Event::all_day("x", CivilDate::new(1403, 1, 1));
        let intervals: Vec<TimedInterval<'_>> = minutes
            .iter()
            .map(|&(start, end)| TimedInterval::new(&event, start, end))
            .collect();
        place(&intervals, 14, 42).into_iter().map(stacked).collect()
    }

    #[test]
    fn test_three_overlapping_intervals_stack() {
        let placed = place_minutes(&[(0, 60), (30, 90), (45, 75)]);

        assert_eq!(placed, vec![(0, 0, 100), (1, 14, 86), (2, 28, 72)]);
    }

    #[test]
    fn test_freed_level_is_reused() {
        let placed = place_minutes(&[(0, 60), (30, 90), (60, 120)]);

        assert_eq!(placed[2].0, 0);
    }

    #[test]
    fn test_width_never_below_minimum() {
        let minutes: Vec<(u32, u32)> = (0..8).map(|i| (i, 600)).collect();
        let placed = place_minutes(&minutes);

        assert_eq!(placed[4], (4, 56, 44));
        assert_eq!(placed[5], (5, 70, 42));
        assert_eq!(placed[7], (7, 98, 42));
    }

    #[test]
    fn test_longer_interval_takes_lower_level_on_tie() {
        let placed = place_minutes(&[(60, 90), (60, 240)]);

        assert_eq!(placed[1].0, 0);
        assert_eq!(placed[0].0, 1);
    }

    #[test]
    fn test_unsorted_input() {
        let placed = place_minutes(&[(120, 180), (0, 60)]);

        assert_eq!(placed[0].0, 0);
        assert_eq!(placed[1].0, 0);
    }
}
