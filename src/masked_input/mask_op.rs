//!
//! Edit operations.
//!
//! All operations work the same way: classify the selection against
//! the current projection, build the new value in value space, run it
//! through the value setter and place the caret against the new
//! projection. If the value doesn't change nothing else happens.
//!

use crate::mask_core::MaskedCore;
use crate::masked_input::projection::Positions;
use crate::upos_type;

/// Set the value and place the caret.
fn commit(core: &mut MaskedCore, value: &str, caret: impl FnOnce(&Positions<'_>) -> upos_type) -> bool {
    if !core.set_value_clamped(value) {
        return false;
    }
    let pos = caret(&core.positions());
    core.set_caret(pos);
    true
}

/// Value graphemes as owned strings.
fn graphemes(core: &MaskedCore) -> Vec<String> {
    core.projection()
        .value_graphemes()
        .into_iter()
        .map(|v| v.to_string())
        .collect()
}

/// Insert at the caret or replace the selected graphemes.
pub fn insert_text(core: &mut MaskedCore, data: &str) -> bool {
    let snap = core.snapshot();
    let g = graphemes(core);
    let range = snap.value_range();
    let inserted = core.segmenter().count(data);

    let value = format!("{}{}{}", g[..range.start].concat(), data, g[range.end..].concat());

    let at_tail = snap.after.is_none();
    let k = range.start + inserted;
    let glue_left = snap.glue_left;
    commit(core, &value, |p| {
        if at_tail {
            p.end_position()
        } else {
            p.caret_for_boundary(k, glue_left)
        }
    })
}

/// Delete the selection or the grapheme before the caret.
pub fn delete_backward(core: &mut MaskedCore) -> bool {
    let snap = core.snapshot();
    let mut g = graphemes(core);

    let k = if snap.has_selected() {
        let range = snap.value_range();
        g.drain(range.clone());
        range.start
    } else if snap.value_start == 0 {
        return false;
    } else {
        g.remove(snap.value_start - 1);
        snap.value_start - 1
    };

    commit(core, &g.concat(), |p| p.caret_for_boundary(k, false))
}

/// Delete the selection or the grapheme after the caret.
pub fn delete_forward(core: &mut MaskedCore) -> bool {
    let snap = core.snapshot();
    let mut g = graphemes(core);
    let k = snap.value_start;

    if snap.has_selected() {
        g.drain(snap.value_range());
    } else if k >= g.len() {
        return false;
    } else {
        g.remove(k);
    }

    let glue_left = snap.glue_left;
    commit(core, &g.concat(), |p| p.caret_for_boundary(k, glue_left))
}

/// Delete the word before the caret.
pub fn delete_word_backward(core: &mut MaskedCore) -> bool {
    let snap = core.snapshot();
    if snap.has_selected() {
        return delete_backward(core);
    }
    let k = snap.value_start;
    if k == 0 {
        return false;
    }

    let g = graphemes(core);
    let head = g[..k].concat();
    let tail = g[k..].concat();
    let word = core.word_finder().trailing_word(&head);
    let head = &head[..head.len() - word.len()];

    let b = core.segmenter().count(head);
    let new_count = b + (g.len() - k);
    let glue_left = new_count >= core.projection().replacement_slots();

    let value = format!("{}{}", head, tail);
    commit(core, &value, |p| p.caret_for_boundary(b, glue_left))
}

/// Delete the word after the caret.
pub fn delete_word_forward(core: &mut MaskedCore) -> bool {
    let snap = core.snapshot();
    if snap.has_selected() {
        return delete_forward(core);
    }
    let g = graphemes(core);
    let k = snap.value_start;
    if k >= g.len() {
        return false;
    }

    let head = g[..k].concat();
    let tail = g[k..].concat();
    let word = core.word_finder().leading_word(&tail);

    let value = format!("{}{}", head, &tail[word.len()..]);
    commit(core, &value, |p| p.caret_for_boundary(k, true))
}

/// Delete from the start of the value to the caret.
pub fn delete_to_beginning(core: &mut MaskedCore) -> bool {
    let snap = core.snapshot();
    let k = snap.value_start;
    if k == 0 {
        return false;
    }

    let g = graphemes(core);
    commit(core, &g[k..].concat(), |p| p.caret_for_boundary(0, false))
}

/// Delete from the end of the selection to the end of the value.
pub fn delete_to_end(core: &mut MaskedCore) -> bool {
    let snap = core.snapshot();
    let g = graphemes(core);
    let range = snap.value_range();
    if range.end >= g.len() {
        return false;
    }

    let k = snap.value_start;
    let glue_left = snap.glue_left;
    commit(core, &g[..range.end].concat(), |p| {
        if glue_left {
            p.caret_for_boundary(k, true)
        } else {
            p.end_position()
        }
    })
}

/// Clear the value.
pub fn delete_entire_value(core: &mut MaskedCore) -> bool {
    commit(core, "", |p| p.caret_for_boundary(0, false))
}

/// Swap two value graphemes. The caret goes behind the second one.
fn swap(core: &mut MaskedCore, i: usize, j: usize) -> bool {
    let mut g = graphemes(core);
    g.swap(i, j);

    commit(core, &g.concat(), |p| {
        p.slot_of_value(j)
            .and_then(|idx| p.slot(idx))
            .map(|v| v.end)
            .unwrap_or_else(|| p.end_position())
    })
}

/// Swap the graphemes left and right of value boundary `k`.
///
/// At the end of the value the last two graphemes are swapped.
fn swap_adjacent(core: &mut MaskedCore, k: usize) -> bool {
    let count = core.projection().value_graphemes().len();
    if k == 0 || count < 2 {
        return false;
    }
    if k >= count {
        swap(core, count - 2, count - 1)
    } else {
        swap(core, k - 1, k)
    }
}

/// Swap the graphemes around the caret.
///
/// With two or more selected graphemes the first and the last
/// selected grapheme are swapped. A single selected grapheme is
/// swapped with the one after it.
pub fn transpose(core: &mut MaskedCore) -> bool {
    let snap = core.snapshot();
    let range = snap.value_range();
    if range.len() >= 2 {
        swap(core, range.start, range.end - 1)
    } else if snap.has_selected() {
        swap_adjacent(core, range.start + 1)
    } else {
        swap_adjacent(core, snap.value_start)
    }
}

/// Transpose for a two grapheme insert over a selection.
///
/// The selection counts as collapsed behind its first grapheme.
pub fn transpose_pair(core: &mut MaskedCore) -> bool {
    let snap = core.snapshot();
    if snap.has_selected() {
        swap_adjacent(core, snap.value_start + 1)
    } else {
        swap_adjacent(core, snap.value_start)
    }
}

#[cfg(test)]
mod test_mask_op {
    use super::*;
    use crate::SelectionDirection;

    fn core(mask: &str, value: &str, caret: upos_type) -> MaskedCore {
        let mut core = MaskedCore::default();
        core.set_mask(mask);
        core.set_value(value);
        core.set_caret(caret);
        core
    }

    #[test]
    fn test_insert() {
        let mut c = core("___-__", "", 0);
        assert!(insert_text(&mut c, "1"));
        assert_eq!(c.selection(), 1..1);
        assert!(insert_text(&mut c, "23"));
        assert_eq!(c.value(), "123");
        assert_eq!(c.masked_value(), "123-  ");
        assert_eq!(c.selection(), 3..3);

        // glued to the end of the 3
        assert!(insert_text(&mut c, "4"));
        assert_eq!(c.masked_value(), "123-4 ");
        assert_eq!(c.selection(), 5..5);
    }

    #[test]
    fn test_delete_backward() {
        let mut c = core("___-__", "1234", 5);
        assert!(delete_backward(&mut c));
        assert_eq!(c.value(), "123");
        assert_eq!(c.selection(), 4..4);

        let mut c = core("___-__", "1234", 0);
        assert!(!delete_backward(&mut c));
        assert_eq!(c.value(), "1234");
        assert_eq!(c.selection(), 0..0);
    }

    #[test]
    fn test_delete_forward() {
        let mut c = core("___-__", "12345", 3);
        assert!(delete_forward(&mut c));
        assert_eq!(c.value(), "1235");
        assert_eq!(c.selection(), 3..3);

        let mut c = core("___-__", "12345", 4);
        assert!(delete_forward(&mut c));
        assert_eq!(c.value(), "1235");
        assert_eq!(c.selection(), 4..4);
    }

    #[test]
    fn test_transpose() {
        let mut c = core("___", "ab", 2);
        assert!(transpose(&mut c));
        assert_eq!(c.value(), "ba");
        assert_eq!(c.selection(), 2..2);

        let mut c = core("___", "ab", 0);
        assert!(!transpose(&mut c));
        assert_eq!(c.value(), "ab");
    }

    #[test]
    fn test_transpose_selection_edges() {
        let mut c = core("_____", "abcde", 0);
        c.set_selection(1, 4, SelectionDirection::Forward);
        assert!(transpose(&mut c));
        assert_eq!(c.value(), "adcbe");
        assert_eq!(c.selection(), 4..4);

        // same graphemes on both edges
        let mut c = core("___", "aba", 0);
        c.set_selection(0, 3, SelectionDirection::Forward);
        assert!(!transpose(&mut c));
        assert_eq!(c.selection(), 0..3);
    }

    #[test]
    fn test_transpose_single_keeps_selection() {
        let mut c = core("___", "a", 0);
        c.set_selection(0, 1, SelectionDirection::Forward);
        assert!(!transpose(&mut c));
        assert_eq!(c.value(), "a");
        assert_eq!(c.selection(), 0..1);
    }

    #[test]
    fn test_transpose_pair() {
        let mut c = core("____", "abcd", 0);
        c.set_selection(1, 4, SelectionDirection::Forward);
        assert!(transpose_pair(&mut c));
        assert_eq!(c.value(), "acbd");
        assert_eq!(c.selection(), 3..3);
    }
}
