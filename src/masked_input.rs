//! Text input with an input mask.
//!
//! * The mask is a pattern of literals and replacement markers.
//!   Each marker takes one grapheme of the value.
//! * The value is what the user typed. The mask is display only,
//!   [MaskedInputState::value] never contains mask literals.
//! * Edits arrive as [InputEvent]s (or crossterm key events) and are
//!   echoed to a notification queue afterward.
//! * Values longer than the mask overflow, the mask is hidden then
//!   unless `show_overflowed_mask` is set.
//! * Right-to-left layout fills the mask from the right edge.
//!
//! ```rust ignore
//! use rat_mask_input::masked_input::MaskedInputState;
//! use rat_mask_input::event::Regular;
//!
//! let mut phone = MaskedInputState::new().with_mask("(___) ___-____");
//! phone.focus = true;
//!
//! match phone.handle(&event, Regular) {
//!     TextOutcome::TextChanged => {
//!         for echo in phone.drain_notifications() {
//!             // ...
//!         }
//!     }
//!     _ => {}
//! }
//! ```
//!
//! Event handling by calling the freestanding fn [handle_events].
//! There's [handle_mouse_events] if you want to override the default key bindings but keep
//! the mouse behaviour.
//!

use crate::_private::NonExhaustive;
use crate::clipboard::{Clipboard, ClipboardError};
use crate::config::{InputType, MaskConfig};
use crate::event::{ReadOnly, TextOutcome};
use crate::field::TextField;
use crate::mask_core::MaskedCore;
use crate::masked_input::selection::{
    move_end, move_home, move_left, move_right, move_to, nearest_value_edge, CaretMove,
};
use crate::native::{NativeInputFactory, Validity};
use crate::{upos_type, SelectionDirection, TextError};
use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use log::debug;
use rat_event::{ct_event, HandleEvent, MouseOnly, Regular};
use std::fmt::{Display, Formatter};
use std::ops::Range;
use std::str::FromStr;

pub mod mask_op;
pub mod projection;
pub mod selection;

/// Kind of edit intent.
///
/// Names follow the `inputType` of the html `beforeinput` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    InsertText,
    /// Autocomplete, spellcheck and the like.
    InsertReplacementText,
    InsertFromYank,
    InsertFromDrop,
    InsertFromPaste,
    InsertFromPasteAsQuotation,
    InsertCompositionText,
    InsertTranspose,
    DeleteWordBackward,
    DeleteWordForward,
    DeleteEntireSoftLine,
    DeleteSoftLineBackward,
    DeleteHardLineBackward,
    DeleteSoftLineForward,
    DeleteHardLineForward,
    DeleteByDrag,
    DeleteByCut,
    DeleteContent,
    DeleteContentBackward,
    DeleteContentForward,
    /// Formatting and history (undo/redo) intents.
    /// These are ignored.
    FormatOrHistory(String),
}

impl InputKind {
    pub fn as_str(&self) -> &str {
        match self {
            InputKind::InsertText => "insertText",
            InputKind::InsertReplacementText => "insertReplacementText",
            InputKind::InsertFromYank => "insertFromYank",
            InputKind::InsertFromDrop => "insertFromDrop",
            InputKind::InsertFromPaste => "insertFromPaste",
            InputKind::InsertFromPasteAsQuotation => "insertFromPasteAsQuotation",
            InputKind::InsertCompositionText => "insertCompositionText",
            InputKind::InsertTranspose => "insertTranspose",
            InputKind::DeleteWordBackward => "deleteWordBackward",
            InputKind::DeleteWordForward => "deleteWordForward",
            InputKind::DeleteEntireSoftLine => "deleteEntireSoftLine",
            InputKind::DeleteSoftLineBackward => "deleteSoftLineBackward",
            InputKind::DeleteHardLineBackward => "deleteHardLineBackward",
            InputKind::DeleteSoftLineForward => "deleteSoftLineForward",
            InputKind::DeleteHardLineForward => "deleteHardLineForward",
            InputKind::DeleteByDrag => "deleteByDrag",
            InputKind::DeleteByCut => "deleteByCut",
            InputKind::DeleteContent => "deleteContent",
            InputKind::DeleteContentBackward => "deleteContentBackward",
            InputKind::DeleteContentForward => "deleteContentForward",
            InputKind::FormatOrHistory(v) => v.as_str(),
        }
    }

    /// Inserts text and needs data.
    pub fn is_insert(&self) -> bool {
        matches!(
            self,
            InputKind::InsertText
                | InputKind::InsertReplacementText
                | InputKind::InsertFromYank
                | InputKind::InsertFromDrop
                | InputKind::InsertFromPaste
                | InputKind::InsertFromPasteAsQuotation
                | InputKind::InsertCompositionText
        )
    }
}

impl Display for InputKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputKind {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "insertText" => InputKind::InsertText,
            "insertReplacementText" => InputKind::InsertReplacementText,
            "insertFromYank" => InputKind::InsertFromYank,
            "insertFromDrop" => InputKind::InsertFromDrop,
            "insertFromPaste" => InputKind::InsertFromPaste,
            "insertFromPasteAsQuotation" => InputKind::InsertFromPasteAsQuotation,
            "insertCompositionText" => InputKind::InsertCompositionText,
            "insertTranspose" => InputKind::InsertTranspose,
            "deleteWordBackward" => InputKind::DeleteWordBackward,
            "deleteWordForward" => InputKind::DeleteWordForward,
            "deleteEntireSoftLine" => InputKind::DeleteEntireSoftLine,
            "deleteSoftLineBackward" => InputKind::DeleteSoftLineBackward,
            "deleteHardLineBackward" => InputKind::DeleteHardLineBackward,
            "deleteSoftLineForward" => InputKind::DeleteSoftLineForward,
            "deleteHardLineForward" => InputKind::DeleteHardLineForward,
            "deleteByDrag" => InputKind::DeleteByDrag,
            "deleteByCut" => InputKind::DeleteByCut,
            "deleteContent" => InputKind::DeleteContent,
            "deleteContentBackward" => InputKind::DeleteContentBackward,
            "deleteContentForward" => InputKind::DeleteContentForward,
            s if s.starts_with("format") || s.starts_with("history") => {
                InputKind::FormatOrHistory(s.to_string())
            }
            s => {
                return Err(TextError::NotSupported(format!(
                    "Unknown input type {}.",
                    s
                )))
            }
        })
    }
}

/// Edit intent. Also used for the echo notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub data: Option<String>,
    /// Part of an active composition session.
    pub is_composing: bool,
}

impl InputEvent {
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            data: None,
            is_composing: false,
        }
    }

    pub fn with_data(kind: InputKind, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: Some(data.into()),
            is_composing: false,
        }
    }

    pub fn composing(mut self, is_composing: bool) -> Self {
        self.is_composing = is_composing;
        self
    }
}

/// State & event-handling.
#[derive(Debug, Clone)]
pub struct MaskedInputState {
    /// Editing core
    pub value: MaskedCore,
    /// Keyboard events are only processed with focus.
    /// __read+write__
    pub focus: bool,

    /// Pending echo notifications.
    notifications: Vec<InputEvent>,
    /// The last intent queued an echo.
    last_echo: bool,

    /// Construct with `..Default::default()`
    pub non_exhaustive: NonExhaustive,
}

impl Default for MaskedInputState {
    fn default() -> Self {
        Self {
            value: Default::default(),
            focus: Default::default(),
            notifications: Default::default(),
            last_echo: Default::default(),
            non_exhaustive: NonExhaustive,
        }
    }
}

impl MaskedInputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// With input mask.
    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.value.set_mask(mask);
        self
    }

    /// With complete configuration.
    pub fn with_config(mut self, config: MaskConfig) -> Self {
        self.value.set_config(config);
        self
    }

    /// With field type.
    pub fn with_type(mut self, input_type: InputType) -> Self {
        self.value.set_input_type(input_type);
        self
    }

    /// With a different host field.
    pub fn with_field(mut self, field: impl TextField + 'static) -> Self {
        self.value.set_field(Box::new(field));
        self
    }

    /// With a different native input.
    pub fn with_native(mut self, native: impl NativeInputFactory + 'static) -> Self {
        self.value.set_native(Box::new(native));
        self
    }

    /// Set the input mask.
    #[inline]
    pub fn set_mask(&mut self, mask: impl Into<String>) {
        self.value.set_mask(mask);
    }

    #[inline]
    pub fn mask(&self) -> &str {
        self.value.mask()
    }

    #[inline]
    pub fn config(&self) -> &MaskConfig {
        self.value.config()
    }

    #[inline]
    pub fn set_config(&mut self, config: MaskConfig) {
        self.value.set_config(config);
    }

    /// Field type by name.
    #[inline]
    pub fn set_type_str(&mut self, s: &str) -> Result<(), TextError> {
        self.value.set_type_str(s)
    }

    /// Soft keyboard hint for the field type.
    #[inline]
    pub fn input_mode(&self) -> &'static str {
        self.value.input_type().input_mode()
    }
}

impl MaskedInputState {
    /// Clipboard used.
    /// Default is to use the global_clipboard().
    #[inline]
    pub fn set_clipboard(&mut self, clip: Option<impl Clipboard + 'static>) {
        match clip {
            None => self.value.set_clipboard(None),
            Some(v) => self.value.set_clipboard(Some(Box::new(v))),
        }
    }

    /// Clipboard used.
    #[inline]
    pub fn clipboard(&self) -> Option<&dyn Clipboard> {
        self.value.clipboard()
    }

    /// Copy the selected value characters.
    ///
    /// Fails for password fields.
    pub fn try_copy_to_clip(&mut self) -> Result<bool, TextError> {
        if self.value.input_type() == InputType::Password {
            return Err(ClipboardError::Refused.into());
        }
        let Some(clip) = self.value.clipboard() else {
            return Ok(false);
        };
        clip.set_string(&self.value.selected_text())?;
        Ok(true)
    }

    /// Copy the selected value characters.
    pub fn copy_to_clip(&mut self) -> bool {
        match self.try_copy_to_clip() {
            Ok(v) => v,
            Err(e) => {
                debug!("copy failed {:?}", e);
                false
            }
        }
    }

    /// Copy and delete the selected value characters.
    pub fn cut_to_clip(&mut self) -> bool {
        if !self.copy_to_clip() {
            return false;
        }
        self.input(InputKind::DeleteByCut, None)
    }

    /// Paste from the clipboard.
    pub fn paste_from_clip(&mut self) -> bool {
        let Some(clip) = self.value.clipboard() else {
            return false;
        };
        match clip.get_string() {
            Ok(text) if !text.is_empty() => self.input(InputKind::InsertFromPaste, Some(text)),
            Ok(_) => false,
            Err(e) => {
                debug!("paste failed {:?}", e);
                false
            }
        }
    }

    /// Data for dragging the selection.
    ///
    /// Only value characters, no mask literals.
    pub fn drag_data(&self) -> String {
        self.value.selected_text()
    }
}

impl MaskedInputState {
    /// Unmasked value.
    #[inline]
    pub fn value(&self) -> &str {
        self.value.value()
    }

    /// Set the value.
    ///
    /// Not limited by max_length. The value attribute has no
    /// effect after this.
    #[inline]
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value.set_value(value);
    }

    /// Declarative value.
    #[inline]
    pub fn set_value_attribute(&mut self, value: &str) -> bool {
        self.value.set_value_attribute(value)
    }

    /// The host changed the display without an intent. Autofill.
    #[inline]
    pub fn accept_host_value(&mut self) -> bool {
        self.value.accept_host_value()
    }

    /// Value with the mask, if the mask is shown.
    #[inline]
    pub fn masked_value(&self) -> &str {
        self.value.masked_value()
    }

    /// Display chars without the mask.
    #[inline]
    pub fn plain_value(&self) -> &str {
        self.value.plain_value()
    }

    #[inline]
    pub fn is_mask_visible(&self) -> bool {
        self.value.is_mask_visible()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Number of value graphemes.
    #[inline]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    #[inline]
    pub fn value_as_number(&self) -> Option<f64> {
        self.value.value_as_number()
    }

    #[inline]
    pub fn step_up(&mut self, n: i32) -> Result<bool, TextError> {
        self.value.step_up(n)
    }

    #[inline]
    pub fn step_down(&mut self, n: i32) -> Result<bool, TextError> {
        self.value.step_down(n)
    }

    #[inline]
    pub fn check_validity(&self) -> Validity {
        self.value.check_validity()
    }

    /// Replace the value graphemes in the range.
    ///
    /// None uses the current selection.
    pub fn set_range_text(
        &mut self,
        replacement: &str,
        range: Option<Range<usize>>,
    ) -> Result<bool, TextError> {
        let range = match range {
            Some(range) => range,
            None => self.value.snapshot().value_range(),
        };
        self.value.set_range_text(replacement, range)
    }
}

impl MaskedInputState {
    /// Run an edit intent.
    ///
    /// Composing intents are ignored, see
    /// [finish_composition](Self::finish_composition). Formatting and
    /// history intents are ignored. Every other intent is queued as
    /// echo notification.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<bool, TextError> {
        self.last_echo = false;
        if event.is_composing {
            return Ok(false);
        }
        if let InputKind::FormatOrHistory(v) = &event.kind {
            debug!("ignored {}", v);
            return Ok(false);
        }

        let core = &mut self.value;
        if event.kind.is_insert() {
            if event.data.is_none() {
                return Err(TextError::InvalidArgument("insert without data"));
            }
            if let Some(max_length) = core.config().max_length {
                if core.input_type() != InputType::Number
                    && core.len() >= max_length
                    && !core.snapshot().has_selected()
                {
                    return Ok(false);
                }
            }
        }

        core.stop_reflecting();

        let data = event.data.as_deref().unwrap_or_default();
        let changed = match event.kind {
            InputKind::InsertText
                if core.config().pair_insert_transposes
                    && core.has_selection()
                    && core.segmenter().count(data) == 2 =>
            {
                mask_op::transpose_pair(core)
            }
            InputKind::InsertText
            | InputKind::InsertReplacementText
            | InputKind::InsertFromYank
            | InputKind::InsertFromDrop
            | InputKind::InsertFromPaste
            | InputKind::InsertFromPasteAsQuotation
            | InputKind::InsertCompositionText => mask_op::insert_text(core, data),
            InputKind::InsertTranspose => mask_op::transpose(core),
            InputKind::DeleteWordBackward => mask_op::delete_word_backward(core),
            InputKind::DeleteWordForward => mask_op::delete_word_forward(core),
            InputKind::DeleteEntireSoftLine => mask_op::delete_entire_value(core),
            InputKind::DeleteSoftLineBackward | InputKind::DeleteHardLineBackward => {
                mask_op::delete_to_beginning(core)
            }
            InputKind::DeleteSoftLineForward | InputKind::DeleteHardLineForward => {
                mask_op::delete_to_end(core)
            }
            InputKind::DeleteByDrag
            | InputKind::DeleteByCut
            | InputKind::DeleteContent
            | InputKind::DeleteContentBackward => mask_op::delete_backward(core),
            InputKind::DeleteContentForward => mask_op::delete_forward(core),
            InputKind::FormatOrHistory(_) => false,
        };

        self.notifications.push(event);
        self.last_echo = true;
        Ok(changed)
    }

    /// Run an intent, errors are logged.
    pub fn input(&mut self, kind: InputKind, data: Option<String>) -> bool {
        let event = InputEvent {
            kind,
            data,
            is_composing: false,
        };
        match self.handle_input(event) {
            Ok(v) => v,
            Err(e) => {
                debug!("input rejected {:?}", e);
                false
            }
        }
    }

    /// End of a composition session. Inserts the composed text.
    pub fn finish_composition(&mut self, data: &str) -> Result<bool, TextError> {
        self.handle_input(InputEvent::with_data(
            InputKind::InsertCompositionText,
            data,
        ))
    }

    /// Drop the echo of the last intent.
    ///
    /// Echoes of earlier intents stay queued.
    pub fn suppress_notifications(&mut self) {
        if self.last_echo {
            self.notifications.pop();
            self.last_echo = false;
        }
    }

    /// Take the pending echo notifications.
    pub fn drain_notifications(&mut self) -> Vec<InputEvent> {
        self.last_echo = false;
        std::mem::take(&mut self.notifications)
    }

    pub fn has_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }
}

impl MaskedInputState {
    /// Insert at the caret. No echo.
    #[inline]
    pub fn insert_str(&mut self, s: &str) -> bool {
        self.value.stop_reflecting();
        mask_op::insert_text(&mut self.value, s)
    }

    /// Delete the grapheme before the caret. No echo.
    #[inline]
    pub fn delete_prev_char(&mut self) -> bool {
        self.value.stop_reflecting();
        mask_op::delete_backward(&mut self.value)
    }

    /// Delete the grapheme after the caret. No echo.
    #[inline]
    pub fn delete_next_char(&mut self) -> bool {
        self.value.stop_reflecting();
        mask_op::delete_forward(&mut self.value)
    }

    /// Reset to empty. No echo.
    #[inline]
    pub fn clear(&mut self) -> bool {
        self.value.stop_reflecting();
        mask_op::delete_entire_value(&mut self.value)
    }
}

impl MaskedInputState {
    /// Selection in display offsets.
    #[inline]
    pub fn selection(&self) -> Range<upos_type> {
        self.value.selection()
    }

    #[inline]
    pub fn selection_direction(&self) -> SelectionDirection {
        self.value.selection_direction()
    }

    #[inline]
    pub fn has_selection(&self) -> bool {
        self.value.has_selection()
    }

    #[inline]
    pub fn set_selection(
        &mut self,
        start: upos_type,
        end: upos_type,
        direction: SelectionDirection,
    ) -> bool {
        self.value.set_selection(start, end, direction)
    }

    /// Collapse the selection at pos.
    #[inline]
    pub fn set_cursor(&mut self, pos: upos_type) -> bool {
        self.value.set_caret(pos)
    }

    /// Select everything up to the end of the last slot.
    pub fn select_all(&mut self) -> bool {
        let end = self
            .value
            .positions()
            .offsets_of(-1)
            .map(|v| v.end)
            .unwrap_or_default();
        self.value.set_selection(0, end, SelectionDirection::Forward)
    }

    fn apply_move(&mut self, m: CaretMove) -> bool {
        self.value.set_selection(m.start, m.end, m.direction)
    }

    /// Move to the next value char.
    pub fn move_right(&mut self, extend_selection: bool) -> bool {
        let m = move_right(
            &self.value.positions(),
            &self.value.snapshot(),
            self.value.selection_direction(),
            extend_selection,
        );
        self.apply_move(m)
    }

    /// Move to the previous value char.
    pub fn move_left(&mut self, extend_selection: bool) -> bool {
        let m = move_left(
            &self.value.positions(),
            &self.value.snapshot(),
            self.value.selection_direction(),
            extend_selection,
        );
        self.apply_move(m)
    }

    /// Start of the value.
    pub fn move_to_start(&mut self, extend_selection: bool) -> bool {
        let m = move_home(
            &self.value.positions(),
            &self.value.snapshot(),
            self.value.selection_direction(),
            extend_selection,
        );
        self.apply_move(m)
    }

    /// End of the value.
    pub fn move_to_end(&mut self, extend_selection: bool) -> bool {
        let m = move_end(
            &self.value.positions(),
            &self.value.snapshot(),
            self.value.selection_direction(),
            extend_selection,
        );
        self.apply_move(m)
    }

    /// End of the next word.
    pub fn move_to_next_word(&mut self, extend_selection: bool) -> bool {
        let snap = self.value.snapshot();
        let graphemes = self.value.projection().value_graphemes();
        let from = snap.value_range().end;
        let tail = graphemes[from..].concat();
        let n = self
            .value
            .segmenter()
            .count(self.value.word_finder().leading_word(&tail));
        if n == 0 {
            return false;
        }

        let target = self.value.positions().caret_for_boundary(from + n, true);
        let m = move_to(
            &snap,
            self.value.selection_direction(),
            target,
            extend_selection,
        );
        self.apply_move(m)
    }

    /// Start of the previous word.
    pub fn move_to_prev_word(&mut self, extend_selection: bool) -> bool {
        let snap = self.value.snapshot();
        let graphemes = self.value.projection().value_graphemes();
        let from = snap.value_start;
        let head = graphemes[..from].concat();
        let n = self
            .value
            .segmenter()
            .count(self.value.word_finder().trailing_word(&head));
        if n == 0 {
            return false;
        }

        let target = self.value.positions().caret_for_boundary(from - n, false);
        let m = move_to(
            &snap,
            self.value.selection_direction(),
            target,
            extend_selection,
        );
        self.apply_move(m)
    }

    /// Snap the caret to the nearest value boundary.
    ///
    /// Selections that cover value chars are kept.
    pub fn set_cursor_to_nearest_edge(&mut self) -> bool {
        let snap = self.value.snapshot();
        let Some(pos) = nearest_value_edge(&self.value.positions(), &snap) else {
            return false;
        };
        let direction = self.value.selection_direction();
        self.value.set_selection(pos, pos, direction)
    }
}

impl HandleEvent<Event, Regular, TextOutcome> for MaskedInputState {
    fn handle(&mut self, event: &Event, _keymap: Regular) -> TextOutcome {
        // small helper ...
        fn tc(r: bool) -> TextOutcome {
            if r {
                TextOutcome::TextChanged
            } else {
                TextOutcome::Unchanged
            }
        }

        let mut r = if self.focus {
            match event {
                ct_event!(key press c)
                | ct_event!(key press SHIFT-c)
                | ct_event!(key press CONTROL_ALT-c) => {
                    tc(self.input(InputKind::InsertText, Some(c.to_string())))
                }
                ct_event!(keycode press Backspace) => {
                    tc(self.input(InputKind::DeleteContentBackward, None))
                }
                ct_event!(keycode press Delete) => {
                    tc(self.input(InputKind::DeleteContentForward, None))
                }
                ct_event!(keycode press CONTROL-Backspace)
                | ct_event!(keycode press ALT-Backspace) => {
                    tc(self.input(InputKind::DeleteWordBackward, None))
                }
                ct_event!(keycode press CONTROL-Delete) => {
                    tc(self.input(InputKind::DeleteWordForward, None))
                }
                ct_event!(key press CONTROL-'u') => {
                    tc(self.input(InputKind::DeleteSoftLineBackward, None))
                }
                ct_event!(key press CONTROL-'k') => {
                    tc(self.input(InputKind::DeleteSoftLineForward, None))
                }
                ct_event!(key press CONTROL-'t') => {
                    tc(self.input(InputKind::InsertTranspose, None))
                }
                ct_event!(key press CONTROL-'d') => {
                    tc(self.input(InputKind::DeleteEntireSoftLine, None))
                }
                ct_event!(key press CONTROL-'x') => tc(self.cut_to_clip()),
                ct_event!(key press CONTROL-'v') => tc(self.paste_from_clip()),
                Event::Paste(s) => tc(self.input(InputKind::InsertFromPaste, Some(s.clone()))),

                ct_event!(key release _)
                | ct_event!(key release SHIFT-_)
                | ct_event!(key release CONTROL_ALT-_)
                | ct_event!(keycode release Backspace)
                | ct_event!(keycode release Delete)
                | ct_event!(keycode release CONTROL-Backspace)
                | ct_event!(keycode release ALT-Backspace)
                | ct_event!(keycode release CONTROL-Delete)
                | ct_event!(key release CONTROL-'u')
                | ct_event!(key release CONTROL-'k')
                | ct_event!(key release CONTROL-'t')
                | ct_event!(key release CONTROL-'d')
                | ct_event!(key release CONTROL-'x')
                | ct_event!(key release CONTROL-'v') => TextOutcome::Unchanged,

                _ => TextOutcome::Continue,
            }
        } else {
            TextOutcome::Continue
        };

        if r == TextOutcome::Continue {
            r = self.handle(event, ReadOnly);
        }
        r
    }
}

impl HandleEvent<Event, ReadOnly, TextOutcome> for MaskedInputState {
    fn handle(&mut self, event: &Event, _keymap: ReadOnly) -> TextOutcome {
        let mut r = if self.focus {
            match event {
                ct_event!(keycode press Left) => self.move_left(false).into(),
                ct_event!(keycode press Right) => self.move_right(false).into(),
                ct_event!(keycode press CONTROL-Left) => self.move_to_prev_word(false).into(),
                ct_event!(keycode press CONTROL-Right) => self.move_to_next_word(false).into(),
                ct_event!(keycode press Home) | ct_event!(keycode press Up) => {
                    self.move_to_start(false).into()
                }
                ct_event!(keycode press End) | ct_event!(keycode press Down) => {
                    self.move_to_end(false).into()
                }
                ct_event!(keycode press SHIFT-Left) => self.move_left(true).into(),
                ct_event!(keycode press SHIFT-Right) => self.move_right(true).into(),
                ct_event!(keycode press CONTROL_SHIFT-Left) => self.move_to_prev_word(true).into(),
                ct_event!(keycode press CONTROL_SHIFT-Right) => {
                    self.move_to_next_word(true).into()
                }
                ct_event!(keycode press SHIFT-Home) | ct_event!(keycode press SHIFT-Up) => {
                    self.move_to_start(true).into()
                }
                ct_event!(keycode press SHIFT-End) | ct_event!(keycode press SHIFT-Down) => {
                    self.move_to_end(true).into()
                }
                ct_event!(key press CONTROL-'a') => self.select_all().into(),
                ct_event!(key press CONTROL-'c') => self.copy_to_clip().into(),

                ct_event!(keycode release Left)
                | ct_event!(keycode release Right)
                | ct_event!(keycode release CONTROL-Left)
                | ct_event!(keycode release CONTROL-Right)
                | ct_event!(keycode release Home)
                | ct_event!(keycode release End)
                | ct_event!(keycode release Up)
                | ct_event!(keycode release Down)
                | ct_event!(keycode release SHIFT-Left)
                | ct_event!(keycode release SHIFT-Right)
                | ct_event!(keycode release CONTROL_SHIFT-Left)
                | ct_event!(keycode release CONTROL_SHIFT-Right)
                | ct_event!(keycode release SHIFT-Home)
                | ct_event!(keycode release SHIFT-End)
                | ct_event!(keycode release SHIFT-Up)
                | ct_event!(keycode release SHIFT-Down)
                | ct_event!(key release CONTROL-'a')
                | ct_event!(key release CONTROL-'c') => TextOutcome::Unchanged,

                _ => TextOutcome::Continue,
            }
        } else {
            TextOutcome::Continue
        };

        if r == TextOutcome::Continue {
            r = self.handle(event, MouseOnly);
        }
        r
    }
}

impl HandleEvent<Event, MouseOnly, TextOutcome> for MaskedInputState {
    fn handle(&mut self, event: &Event, _keymap: MouseOnly) -> TextOutcome {
        match event {
            Event::FocusGained => self.set_cursor_to_nearest_edge().into(),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Up(MouseButton::Left),
                ..
            }) => self.set_cursor_to_nearest_edge().into(),
            _ => TextOutcome::Continue,
        }
    }
}

/// Handle all events.
/// Text events are only processed if focus is true.
/// Mouse events are processed if they are in range.
pub fn handle_events(state: &mut MaskedInputState, focus: bool, event: &Event) -> TextOutcome {
    state.focus = focus;
    state.handle(event, Regular)
}

/// Handle only navigation events.
/// Text events are only processed if focus is true.
pub fn handle_readonly_events(
    state: &mut MaskedInputState,
    focus: bool,
    event: &Event,
) -> TextOutcome {
    state.focus = focus;
    state.handle(event, ReadOnly)
}

/// Handle only mouse-events.
pub fn handle_mouse_events(state: &mut MaskedInputState, event: &Event) -> TextOutcome {
    state.handle(event, MouseOnly)
}
