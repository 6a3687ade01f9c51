#![doc = include_str!("../readme.md")]
#![allow(clippy::collapsible_else_if)]
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

pub mod clipboard;
pub mod config;
pub mod field;
pub mod masked_input;
pub mod native;
pub mod numeric;

mod grapheme;
mod mask_core;
mod word;

pub use config::{Direction, InputType, MaskConfig};
pub use grapheme::Segmenter;
pub use word::WordFinder;

pub mod event {
    //!
    //! Event-handler traits and Keybindings.
    //!

    pub use rat_event::*;

    /// Runs only the navigation events, not any editing.
    #[derive(Debug)]
    pub struct ReadOnly;

    /// Result of event handling.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub enum TextOutcome {
        /// The given event has not been used at all.
        Continue,
        /// The event has been recognized, but the result was nil.
        /// Further processing for this event may stop.
        Unchanged,
        /// The event has been recognized and there is some change
        /// due to it.
        /// Further processing for this event may stop.
        /// Rendering the ui is advised.
        Changed,
        /// Text content has changed.
        TextChanged,
    }

    impl ConsumedEvent for TextOutcome {
        fn is_consumed(&self) -> bool {
            *self != TextOutcome::Continue
        }
    }

    // Useful for converting most navigation/edit results.
    impl From<bool> for TextOutcome {
        fn from(value: bool) -> Self {
            if value {
                TextOutcome::Changed
            } else {
                TextOutcome::Unchanged
            }
        }
    }

    impl From<TextOutcome> for Outcome {
        fn from(value: TextOutcome) -> Self {
            match value {
                TextOutcome::Continue => Outcome::Continue,
                TextOutcome::Unchanged => Outcome::Unchanged,
                TextOutcome::Changed => Outcome::Changed,
                TextOutcome::TextChanged => Outcome::Changed,
            }
        }
    }
}

pub mod core {
    //!
    //! Core structs for masked editing.
    //! Used to implement the widget state.
    //!

    pub use crate::mask_core::MaskedCore;
    pub use crate::masked_input::projection::{
        mask_visible, CharSlot, Positions, ProjectOptions, Projection,
    };
    pub use crate::masked_input::selection::{CaretMove, SelectionSnapshot};
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextError {
    /// The field type is not one of the maskable types.
    NotSupported(String),
    /// A required argument is missing or invalid.
    InvalidArgument(&'static str),
    /// The replacement marker must be exactly one character.
    InvalidMarker(String),
    /// Clipboard error occurred.
    Clipboard,
    /// The selection range is out of bounds for the current display value.
    ///
    /// Contains start, end and the length of the display value in chars.
    SelectionOutOfBounds(upos_type, upos_type, upos_type),
}

impl Display for TextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for TextError {}

/// Offset type for display positions.
///
/// Offsets count the chars of the display string.
#[allow(non_camel_case_types)]
pub type upos_type = u32;

/// Direction of the host selection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirection {
    /// Caret and anchor coincide, or the direction is unknown.
    #[default]
    None,
    /// The caret is at the end of the selection.
    Forward,
    /// The caret is at the start of the selection.
    Backward,
}

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
