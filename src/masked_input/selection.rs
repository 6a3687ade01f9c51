//!
//! Selection relative to the slots.
//!

use crate::masked_input::projection::Positions;
use crate::{upos_type, SelectionDirection};
use std::ops::Range;

/// Selection classified against the slots of a projection.
///
/// Slots ending at or before the selection start are `before`, slots
/// starting at or after the selection end are `after`. Filled slots
/// in between are `selected`. Unfilled slots in between are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    /// Last slot before the selection.
    pub before: Option<usize>,
    /// First slot after the selection.
    pub after: Option<usize>,
    /// Selected filled slots.
    pub selected: Vec<usize>,
    /// Selection start.
    pub start: upos_type,
    /// Selection end.
    pub end: upos_type,
    /// Number of value graphemes before the selection.
    pub value_start: usize,
    /// The grapheme before the selection ends exactly at the
    /// selection start.
    pub glue_left: bool,
}

impl SelectionSnapshot {
    /// Classify the selection.
    pub fn classify(positions: &Positions<'_>, selection: Range<upos_type>) -> Self {
        let mut snap = SelectionSnapshot {
            start: selection.start,
            end: selection.end,
            ..Default::default()
        };

        for (idx, slot) in positions.projection().slots().iter().enumerate() {
            let Some(r) = positions.slot(idx) else {
                continue;
            };
            if r.end <= selection.start {
                snap.before = Some(idx);
                if slot.is_filled() {
                    snap.value_start += 1;
                }
            } else if r.start >= selection.end {
                if snap.after.is_none() {
                    snap.after = Some(idx);
                }
            } else if slot.is_filled() {
                snap.selected.push(idx);
            }
        }

        if let Some(before) = snap.before {
            let filled = positions.projection().slots()[before].is_filled();
            snap.glue_left = filled && positions.slot(before).map(|v| v.end) == Some(snap.start);
        }

        snap
    }

    /// Any value graphemes selected?
    #[inline]
    pub fn has_selected(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Selected range in value space.
    #[inline]
    pub fn value_range(&self) -> Range<usize> {
        self.value_start..self.value_start + self.selected.len()
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Nearest caret position that sits at a value boundary.
///
/// Returns None if the selection covers value graphemes. Those are
/// left alone. On a tie the position before the caret wins.
pub fn nearest_value_edge(positions: &Positions<'_>, snap: &SelectionSnapshot) -> Option<upos_type> {
    if snap.has_selected() {
        return None;
    }

    let k = snap.value_start;
    let count = positions.projection().value_len();
    let slot_range = |k: usize| positions.slot_of_value(k).and_then(|idx| positions.slot(idx));

    let mut candidates = Vec::with_capacity(3);
    if k > 0 {
        if let Some(r) = slot_range(k - 1) {
            candidates.push(r.end);
        }
    }
    if k < count {
        if let Some(r) = slot_range(k) {
            candidates.push(r.start);
        }
    }
    if k >= count {
        candidates.push(positions.end_position());
    }

    let distance = |c: upos_type| {
        if c <= snap.start {
            snap.start - c
        } else if c >= snap.end {
            c - snap.end
        } else {
            0
        }
    };

    let mut best: Option<upos_type> = None;
    for c in candidates {
        best = match best {
            Some(b) if distance(b) <= distance(c) => Some(b),
            _ => Some(c),
        };
    }
    best
}

/// Target of a caret move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretMove {
    pub start: upos_type,
    pub end: upos_type,
    pub direction: SelectionDirection,
}

impl CaretMove {
    fn new(start: upos_type, end: upos_type, direction: SelectionDirection) -> Self {
        Self {
            start,
            end,
            direction,
        }
    }

    /// Anchor and caret, swapped into order.
    pub(crate) fn ordered(anchor: upos_type, caret: upos_type) -> Self {
        if anchor < caret {
            Self::new(anchor, caret, SelectionDirection::Forward)
        } else if anchor > caret {
            Self::new(caret, anchor, SelectionDirection::Backward)
        } else {
            Self::new(caret, caret, SelectionDirection::None)
        }
    }
}

fn filled_range(positions: &Positions<'_>, idx: Option<usize>) -> Option<Range<upos_type>> {
    let idx = idx?;
    if positions.projection().slots().get(idx)?.is_filled() {
        positions.slot(idx)
    } else {
        None
    }
}

/// One grapheme to the right.
pub fn move_right(
    positions: &Positions<'_>,
    snap: &SelectionSnapshot,
    direction: SelectionDirection,
    extend: bool,
) -> CaretMove {
    let next_end = filled_range(positions, snap.after).map(|v| v.end);

    if !snap.is_collapsed() {
        if !extend {
            return CaretMove::new(snap.end, snap.end, SelectionDirection::None);
        }
        if direction == SelectionDirection::Forward {
            CaretMove::new(
                snap.start,
                next_end.unwrap_or(snap.end),
                SelectionDirection::Forward,
            )
        } else {
            // shrink from the left
            let caret = match snap.selected.first() {
                Some(idx) => positions.slot(*idx).map(|v| v.end).unwrap_or(snap.end),
                None => next_end.unwrap_or(snap.end),
            };
            CaretMove::ordered(snap.end, caret)
        }
    } else {
        match next_end {
            Some(next_end) if extend => CaretMove::ordered(snap.start, next_end),
            Some(next_end) => CaretMove::new(next_end, next_end, SelectionDirection::None),
            None => CaretMove::new(snap.start, snap.end, SelectionDirection::None),
        }
    }
}

/// One grapheme to the left.
pub fn move_left(
    positions: &Positions<'_>,
    snap: &SelectionSnapshot,
    direction: SelectionDirection,
    extend: bool,
) -> CaretMove {
    let prev_start = filled_range(positions, snap.before).map(|v| v.start);

    if !snap.is_collapsed() {
        if !extend {
            return CaretMove::new(snap.start, snap.start, SelectionDirection::None);
        }
        if direction == SelectionDirection::Backward {
            CaretMove::new(
                prev_start.unwrap_or(snap.start),
                snap.end,
                SelectionDirection::Backward,
            )
        } else {
            // shrink from the right
            let caret = match snap.selected.last() {
                Some(idx) => positions.slot(*idx).map(|v| v.start).unwrap_or(snap.start),
                None => prev_start.unwrap_or(snap.start),
            };
            CaretMove::ordered(snap.start, caret)
        }
    } else {
        match prev_start {
            Some(prev_start) if extend => CaretMove::ordered(snap.end, prev_start),
            Some(prev_start) => CaretMove::new(prev_start, prev_start, SelectionDirection::None),
            None => CaretMove::new(snap.start, snap.end, SelectionDirection::None),
        }
    }
}

/// Move to `target`, keeping the anchor if extending.
pub fn move_to(
    snap: &SelectionSnapshot,
    direction: SelectionDirection,
    target: upos_type,
    extend: bool,
) -> CaretMove {
    if extend {
        let anchor = if direction == SelectionDirection::Backward {
            snap.end
        } else {
            snap.start
        };
        CaretMove::ordered(anchor, target)
    } else {
        CaretMove::new(target, target, SelectionDirection::None)
    }
}

/// Start of the value.
pub fn move_home(
    positions: &Positions<'_>,
    snap: &SelectionSnapshot,
    direction: SelectionDirection,
    extend: bool,
) -> CaretMove {
    move_to(snap, direction, positions.start_position(), extend)
}

/// End of the value.
pub fn move_end(
    positions: &Positions<'_>,
    snap: &SelectionSnapshot,
    direction: SelectionDirection,
    extend: bool,
) -> CaretMove {
    move_to(snap, direction, positions.end_position(), extend)
}

#[cfg(test)]
mod test_selection {
    use super::*;
    use crate::masked_input::projection::{ProjectOptions, Projection};

    fn project(value: &str, mask: &str) -> Projection {
        Projection::new(value, mask, &ProjectOptions::default())
    }

    #[test]
    fn test_classify() {
        let p = project("5551", "(___) ___");
        let pos = p.positions(true);

        // caret between 5 and 5
        let s = SelectionSnapshot::classify(&pos, 2..2);
        assert_eq!(s.before, Some(0));
        assert_eq!(s.after, Some(1));
        assert!(s.selected.is_empty());
        assert_eq!(s.value_start, 1);
        assert!(s.glue_left);

        // caret after the literals
        let s = SelectionSnapshot::classify(&pos, 6..6);
        assert_eq!(s.before, Some(2));
        assert_eq!(s.after, Some(3));
        assert_eq!(s.value_start, 3);
        assert!(!s.glue_left);

        // selection over the literals
        let s = SelectionSnapshot::classify(&pos, 3..7);
        assert_eq!(s.selected, vec![2, 3]);
        assert_eq!(s.value_range(), 2..4);
    }

    #[test]
    fn test_nearest_edge() {
        let p = project("555", "(___) ___");
        let pos = p.positions(true);

        let s = SelectionSnapshot::classify(&pos, 9..9);
        assert_eq!(nearest_value_edge(&pos, &s), Some(6));
        let s = SelectionSnapshot::classify(&pos, 0..0);
        assert_eq!(nearest_value_edge(&pos, &s), Some(1));
        let s = SelectionSnapshot::classify(&pos, 4..4);
        assert_eq!(nearest_value_edge(&pos, &s), Some(4));
        let s = SelectionSnapshot::classify(&pos, 1..3);
        assert_eq!(nearest_value_edge(&pos, &s), None);
    }

    #[test]
    fn test_arrows() {
        let p = project("5551", "(___) ___");
        let pos = p.positions(true);

        let s = SelectionSnapshot::classify(&pos, 4..4);
        let m = move_right(&pos, &s, SelectionDirection::None, false);
        assert_eq!((m.start, m.end), (7, 7));
        let m = move_right(&pos, &s, SelectionDirection::None, true);
        assert_eq!((m.start, m.end, m.direction), (4, 7, SelectionDirection::Forward));

        let s = SelectionSnapshot::classify(&pos, 6..6);
        let m = move_left(&pos, &s, SelectionDirection::None, false);
        assert_eq!((m.start, m.end), (3, 3));

        // no value before the first slot
        let s = SelectionSnapshot::classify(&pos, 1..1);
        let m = move_left(&pos, &s, SelectionDirection::None, false);
        assert_eq!((m.start, m.end), (1, 1));

        // shrink a forward selection
        let s = SelectionSnapshot::classify(&pos, 1..4);
        let m = move_left(&pos, &s, SelectionDirection::Forward, true);
        assert_eq!((m.start, m.end, m.direction), (1, 3, SelectionDirection::Forward));
    }

    #[test]
    fn test_home_end() {
        let p = project("5551", "(___) ___");
        let pos = p.positions(true);

        let s = SelectionSnapshot::classify(&pos, 3..3);
        let m = move_end(&pos, &s, SelectionDirection::None, false);
        assert_eq!((m.start, m.end), (7, 7));
        let m = move_end(&pos, &s, SelectionDirection::None, true);
        assert_eq!((m.start, m.end, m.direction), (3, 7, SelectionDirection::Forward));
        let m = move_home(&pos, &s, SelectionDirection::None, true);
        assert_eq!((m.start, m.end, m.direction), (1, 3, SelectionDirection::Backward));
    }
}
