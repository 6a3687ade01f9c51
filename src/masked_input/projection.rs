//!
//! Projection of the value into the mask.
//!
//! The mask is scanned once, each replacement marker takes the next
//! grapheme of the value. Whatever is left of the value is appended
//! as overflow. The result is a list of [CharSlot]s with their offsets
//! in both the masked and the plain display string.
//!

use crate::config::{is_marker, Direction, InputType, MaskConfig};
use crate::grapheme::{display_len, Segmenter};
use crate::upos_type;
use std::ops::Range;

/// Glyph used for value characters of password fields.
pub const PASSWORD_GLYPH: &str = "•";

/// One replacement slot of the mask, or one overflow character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSlot {
    /// Value grapheme. None for an unfilled slot.
    pub char: Option<String>,
    /// Displayed grapheme. Differs from `char` for password fields.
    pub display_char: Option<String>,
    /// Offsets in the plain display.
    pub position: Range<upos_type>,
    /// Offsets in the masked display.
    pub position_in_mask: Range<upos_type>,
    /// Slot comes from a replacement marker. False for overflow.
    pub replacement: bool,
}

impl CharSlot {
    /// Slot holds a value grapheme.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.char.is_some()
    }

    /// Offsets in the chosen coordinates.
    #[inline]
    pub fn range(&self, masked: bool) -> Range<upos_type> {
        if masked {
            self.position_in_mask.clone()
        } else {
            self.position.clone()
        }
    }
}

/// Options for the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectOptions {
    /// Replacement marker.
    pub marker: char,
    /// Display value characters as [PASSWORD_GLYPH].
    pub password: bool,
    /// Render unfilled slots with the marker instead of a blank.
    pub show_replacement_characters: bool,
    pub segmenter: Segmenter,
    pub direction: Direction,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            marker: '_',
            password: false,
            show_replacement_characters: false,
            segmenter: Default::default(),
            direction: Default::default(),
        }
    }
}

impl ProjectOptions {
    /// Options from the configuration. The direction is resolved by
    /// the caller.
    pub fn from_config(config: &MaskConfig, direction: Direction) -> Self {
        Self {
            marker: config.replacement_char,
            password: config.input_type == InputType::Password,
            show_replacement_characters: config.show_replacement_characters,
            segmenter: config.segmenter,
            direction,
        }
    }
}

#[derive(Debug)]
enum Token<'a> {
    Literal(&'a str),
    Slot(Option<&'a str>, bool),
}

/// Value laid out over the mask.
///
/// This is rebuilt completely for every change of the value
/// or the configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Projection {
    slots: Vec<CharSlot>,
    masked: String,
    plain: String,
    replacement_slots: usize,
    value_len: usize,
    direction: Direction,
}

impl Projection {
    /// Project the value.
    pub fn new(value: &str, mask: &str, options: &ProjectOptions) -> Self {
        let rtl = options.direction == Direction::RightToLeft;

        let mut mask_g = options.segmenter.segment(mask);
        let mut value_g = options.segmenter.segment(value);
        let value_len = value_g.len();
        if rtl {
            mask_g.reverse();
            value_g.reverse();
        }

        let mut queue = value_g.into_iter();
        let mut tokens = Vec::with_capacity(mask_g.len() + value_len);
        for g in mask_g {
            if is_marker(g, options.marker) {
                tokens.push(Token::Slot(queue.next(), true));
            } else {
                tokens.push(Token::Literal(g));
            }
        }
        for g in queue {
            tokens.push(Token::Slot(Some(g), false));
        }
        if rtl {
            tokens.reverse();
        }

        let mut slots = Vec::new();
        let mut masked = String::new();
        let mut plain = String::new();
        let mut replacement_slots = 0;
        let mut pos: upos_type = 0;
        let mut mask_pos: upos_type = 0;

        for token in tokens {
            match token {
                Token::Literal(g) => {
                    masked.push_str(g);
                    mask_pos += display_len(g);
                }
                Token::Slot(c, replacement) => {
                    let display_char = c.map(|c| {
                        if options.password {
                            PASSWORD_GLYPH.to_string()
                        } else {
                            c.to_string()
                        }
                    });
                    let len = display_char.as_deref().map(display_len).unwrap_or(1);

                    match &display_char {
                        Some(d) => {
                            masked.push_str(d);
                            plain.push_str(d);
                        }
                        None if options.show_replacement_characters => {
                            masked.push(options.marker);
                        }
                        None => {
                            masked.push(' ');
                        }
                    }

                    slots.push(CharSlot {
                        char: c.map(|v| v.to_string()),
                        display_char,
                        position: pos..pos + len,
                        position_in_mask: mask_pos..mask_pos + len,
                        replacement,
                    });
                    if replacement {
                        replacement_slots += 1;
                    }

                    pos += len;
                    mask_pos += len;
                }
            }
        }

        Self {
            slots,
            masked,
            plain,
            replacement_slots,
            value_len,
            direction: options.direction,
        }
    }

    pub fn slots(&self) -> &[CharSlot] {
        &self.slots
    }

    /// Value with the mask applied.
    pub fn masked(&self) -> &str {
        self.masked.as_str()
    }

    /// Display characters without the mask.
    pub fn plain(&self) -> &str {
        self.plain.as_str()
    }

    /// Number of replacement markers in the mask.
    pub fn replacement_slots(&self) -> usize {
        self.replacement_slots
    }

    /// Number of value graphemes.
    pub fn value_len(&self) -> usize {
        self.value_len
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The value is longer than the mask.
    pub fn is_overflow(&self) -> bool {
        self.value_len > self.replacement_slots
    }

    /// Value graphemes in order.
    pub fn value_graphemes(&self) -> Vec<&str> {
        self.slots.iter().filter_map(|v| v.char.as_deref()).collect()
    }

    /// Display string for the visibility.
    pub fn display(&self, masked: bool) -> &str {
        if masked {
            self.masked.as_str()
        } else {
            self.plain.as_str()
        }
    }

    /// Position arithmetic in masked or plain coordinates.
    pub fn positions(&self, masked: bool) -> Positions<'_> {
        Positions {
            projection: self,
            masked,
            len: display_len(self.display(masked)),
        }
    }
}

/// Is the mask shown or only the plain display?
///
/// * An empty value shows the mask only with `show_empty_mask`.
/// * An overflowing value shows the mask only with `show_overflowed_mask`.
/// * Everything else shows the mask.
pub fn mask_visible(
    value_count: usize,
    replacement_slots: usize,
    show_empty_mask: bool,
    show_overflowed_mask: bool,
) -> bool {
    if value_count == 0 {
        show_empty_mask
    } else if value_count > replacement_slots {
        show_overflowed_mask
    } else {
        true
    }
}

/// Resolves slots to display offsets.
///
/// All offsets are clamped to the active display string. Unfilled
/// slots have no extent in the plain display.
#[derive(Debug, Clone, Copy)]
pub struct Positions<'a> {
    projection: &'a Projection,
    masked: bool,
    len: upos_type,
}

impl<'a> Positions<'a> {
    pub fn projection(&self) -> &'a Projection {
        self.projection
    }

    /// Masked coordinates?
    pub fn is_masked(&self) -> bool {
        self.masked
    }

    /// Length of the active display.
    pub fn len(&self) -> upos_type {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn clamp(&self, r: Range<upos_type>) -> Range<upos_type> {
        r.start.min(self.len)..r.end.min(self.len)
    }

    /// Offsets of the slot.
    pub fn slot(&self, idx: usize) -> Option<Range<upos_type>> {
        self.projection
            .slots
            .get(idx)
            .map(|v| self.clamp(v.range(self.masked)))
    }

    /// Offsets of the slot. Negative indexes count from the end.
    ///
    /// Without any slots this is `0..0`.
    pub fn offsets_of(&self, index: isize) -> Option<Range<upos_type>> {
        let n = self.projection.slots.len();
        if n == 0 {
            return Some(0..0);
        }
        let idx = if index < 0 {
            n.checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };
        self.slot(idx)
    }

    /// Slot index of the k-th value grapheme.
    pub fn slot_of_value(&self, k: usize) -> Option<usize> {
        self.projection
            .slots
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_filled())
            .nth(k)
            .map(|(idx, _)| idx)
    }

    /// Caret position at the end of the value.
    ///
    /// Left-to-right that's the first unfilled slot, or the end of
    /// the last slot. Right-to-left the value is anchored at the right
    /// edge, and the end is always the end of the last slot.
    pub fn end_position(&self) -> upos_type {
        let Some(last) = self.offsets_of(-1) else {
            return 0;
        };
        if self.projection.direction == Direction::RightToLeft {
            return last.end;
        }
        match self.projection.slots.iter().position(|v| !v.is_filled()) {
            Some(idx) => self.slot(idx).map(|v| v.start).unwrap_or(last.end),
            None => last.end,
        }
    }

    /// Caret position at the start of the value.
    pub fn start_position(&self) -> upos_type {
        match self.slot_of_value(0).and_then(|idx| self.slot(idx)) {
            Some(r) => r.start,
            None => self.end_position(),
        }
    }

    /// Caret position for the boundary before the k-th value grapheme.
    ///
    /// With `glue_left` the caret sticks to the end of the previous
    /// grapheme instead of the start of the next one. Both differ if
    /// there are mask literals in between.
    pub fn caret_for_boundary(&self, k: usize, glue_left: bool) -> upos_type {
        let count = self.projection.value_len;
        let slot_range = |k: usize| self.slot_of_value(k).and_then(|idx| self.slot(idx));

        if count == 0 {
            self.end_position()
        } else if k == 0 {
            slot_range(0)
                .map(|v| v.start)
                .unwrap_or_else(|| self.end_position())
        } else if glue_left {
            slot_range(k - 1)
                .map(|v| v.end)
                .unwrap_or_else(|| self.end_position())
        } else if k >= count {
            self.end_position()
        } else {
            slot_range(k)
                .map(|v| v.start)
                .unwrap_or_else(|| self.end_position())
        }
    }
}
