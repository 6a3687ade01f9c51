//!
//! The host text field.
//!
//! The masked input doesn't render anything itself. It writes the
//! display string to a host field and reads/writes the selection
//! there. [FieldBuffer] is a plain in-memory field for terminal use.
//!

use crate::config::Direction;
use crate::grapheme::display_len;
use crate::{upos_type, SelectionDirection, TextError};
use dyn_clone::{clone_box, DynClone};
use std::fmt::Debug;
use std::ops::Range;

/// Capability of the host text field.
///
/// All offsets count chars of the display value.
pub trait TextField: DynClone + Debug {
    /// Current raw display value.
    fn display_value(&self) -> &str;

    /// Replace the raw display value.
    ///
    /// This may disturb the selection.
    fn set_display_value(&mut self, value: &str);

    /// Selection as start..end, start <= end.
    fn selection(&self) -> Range<upos_type>;

    /// Direction of the selection.
    fn selection_direction(&self) -> SelectionDirection;

    /// Set the selection.
    ///
    /// Fails for offsets beyond the display value.
    fn set_selection_range(
        &mut self,
        start: upos_type,
        end: upos_type,
        direction: SelectionDirection,
    ) -> Result<(), TextError>;

    /// Layout direction inherited from the surroundings of the field.
    fn inherited_direction(&self) -> Direction {
        Direction::LeftToRight
    }
}

impl Clone for Box<dyn TextField> {
    fn clone(&self) -> Self {
        clone_box(self.as_ref())
    }
}

/// Simple text field.
#[derive(Debug, Default, Clone)]
pub struct FieldBuffer {
    value: String,
    anchor: upos_type,
    cursor: upos_type,
    direction: Direction,
}

impl FieldBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field inside a right-to-left context.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Selection anchor.
    pub fn anchor(&self) -> upos_type {
        self.anchor
    }

    /// Caret.
    pub fn cursor(&self) -> upos_type {
        self.cursor
    }

    /// Length of the display value.
    pub fn len(&self) -> upos_type {
        display_len(&self.value)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl TextField for FieldBuffer {
    fn display_value(&self) -> &str {
        self.value.as_str()
    }

    fn set_display_value(&mut self, value: &str) {
        self.value.clear();
        self.value.push_str(value);
        // same as a native field, the caret goes to the end.
        let len = self.len();
        self.anchor = len;
        self.cursor = len;
    }

    fn selection(&self) -> Range<upos_type> {
        if self.anchor <= self.cursor {
            self.anchor..self.cursor
        } else {
            self.cursor..self.anchor
        }
    }

    fn selection_direction(&self) -> SelectionDirection {
        if self.anchor < self.cursor {
            SelectionDirection::Forward
        } else if self.anchor > self.cursor {
            SelectionDirection::Backward
        } else {
            SelectionDirection::None
        }
    }

    fn set_selection_range(
        &mut self,
        start: upos_type,
        end: upos_type,
        direction: SelectionDirection,
    ) -> Result<(), TextError> {
        let len = self.len();
        if start > end || end > len {
            return Err(TextError::SelectionOutOfBounds(start, end, len));
        }
        match direction {
            SelectionDirection::Backward => {
                self.anchor = end;
                self.cursor = start;
            }
            SelectionDirection::Forward | SelectionDirection::None => {
                self.anchor = start;
                self.cursor = end;
            }
        }
        Ok(())
    }

    fn inherited_direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod test_field {
    use super::*;

    #[test]
    fn test_selection() {
        let mut f = FieldBuffer::new();
        f.set_display_value("(555) ___");
        assert_eq!(f.selection(), 9..9);

        f.set_selection_range(1, 4, SelectionDirection::Backward)
            .expect("valid");
        assert_eq!(f.selection(), 1..4);
        assert_eq!(f.cursor(), 1);
        assert_eq!(f.selection_direction(), SelectionDirection::Backward);

        assert_eq!(
            f.set_selection_range(3, 12, SelectionDirection::None),
            Err(TextError::SelectionOutOfBounds(3, 12, 9))
        );
        assert_eq!(f.selection(), 1..4);
    }
}
