use crate::clipboard::{global_clipboard, Clipboard};
use crate::config::{Direction, InputType, MaskConfig};
use crate::field::{FieldBuffer, TextField};
use crate::grapheme::Segmenter;
use crate::masked_input::projection::{mask_visible, Positions, ProjectOptions, Projection};
use crate::masked_input::selection::SelectionSnapshot;
use crate::native::{NativeInput, NativeInputFactory, StdInputFactory, Validity};
use crate::numeric::normalize_number;
use crate::word::WordFinder;
use crate::{upos_type, SelectionDirection, TextError};
use log::debug;
use std::ops::Range;

/// Core for masked editing.
///
/// Owns the value, the configuration and the projection and
/// writes the display through to the host field.
#[derive(Debug, Clone)]
pub struct MaskedCore {
    /// Configuration
    config: MaskConfig,
    /// Unmasked value
    value: String,
    /// Current layout
    projection: Projection,
    /// Host field
    field: Box<dyn TextField>,
    /// Number coercion and validation
    native: Box<dyn NativeInputFactory>,
    /// clipboard
    clip: Option<Box<dyn Clipboard>>,
    /// The value attribute still sets the value.
    reflect_attribute: bool,
}

impl Default for MaskedCore {
    fn default() -> Self {
        Self::new(Box::new(FieldBuffer::new()), Box::new(StdInputFactory))
    }
}

impl MaskedCore {
    pub fn new(field: Box<dyn TextField>, native: Box<dyn NativeInputFactory>) -> Self {
        let mut s = Self {
            config: Default::default(),
            value: Default::default(),
            projection: Default::default(),
            field,
            native,
            clip: Some(global_clipboard()),
            reflect_attribute: true,
        };
        s.apply_mask();
        s
    }

    /// Replace the host field.
    ///
    /// The display is written to the new field immediately.
    pub fn set_field(&mut self, field: Box<dyn TextField>) {
        self.field = field;
        self.apply_mask();
    }

    pub fn field(&self) -> &dyn TextField {
        self.field.as_ref()
    }

    pub fn field_mut(&mut self) -> &mut dyn TextField {
        self.field.as_mut()
    }

    /// Replace the native input capability.
    pub fn set_native(&mut self, native: Box<dyn NativeInputFactory>) {
        self.native = native;
    }

    /// Clipboard
    pub fn set_clipboard(&mut self, clip: Option<Box<dyn Clipboard + 'static>>) {
        self.clip = clip;
    }

    /// Clipboard
    pub fn clipboard(&self) -> Option<&dyn Clipboard> {
        self.clip.as_deref()
    }
}

impl MaskedCore {
    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    /// Replace the complete configuration.
    pub fn set_config(&mut self, config: MaskConfig) {
        self.config = config;
        self.apply_mask();
    }

    /// Mask pattern.
    pub fn set_mask(&mut self, mask: impl Into<String>) {
        self.config.mask = mask.into();
        self.apply_mask();
    }

    pub fn mask(&self) -> &str {
        self.config.mask.as_str()
    }

    /// Marker for the replacement slots.
    pub fn set_replacement_char(&mut self, c: char) {
        self.config.replacement_char = c;
        self.apply_mask();
    }

    /// Marker for the replacement slots.
    ///
    /// Must be exactly one char.
    pub fn set_replacement_str(&mut self, s: &str) -> Result<(), TextError> {
        if let Err(e) = self.config.set_replacement_str(s) {
            debug!("rejected replacement marker {:?}", s);
            return Err(e);
        }
        self.apply_mask();
        Ok(())
    }

    pub fn set_input_type(&mut self, input_type: InputType) {
        self.config.input_type = input_type;
        self.apply_mask();
    }

    /// Field type by name.
    ///
    /// Unknown names leave the type as it is.
    pub fn set_type_str(&mut self, s: &str) -> Result<(), TextError> {
        if let Err(e) = self.config.set_type_str(s) {
            debug!("rejected type {:?}", s);
            return Err(e);
        }
        self.apply_mask();
        Ok(())
    }

    pub fn input_type(&self) -> InputType {
        self.config.input_type
    }

    pub fn set_show_empty_mask(&mut self, show: bool) {
        self.config.show_empty_mask = show;
        self.apply_mask();
    }

    pub fn set_show_overflowed_mask(&mut self, show: bool) {
        self.config.show_overflowed_mask = show;
        self.apply_mask();
    }

    pub fn set_show_replacement_characters(&mut self, show: bool) {
        self.config.show_replacement_characters = show;
        self.apply_mask();
    }

    pub fn set_max_length(&mut self, max_length: Option<usize>) {
        self.config.max_length = max_length;
    }

    pub fn set_min_length(&mut self, min_length: Option<usize>) {
        self.config.min_length = min_length;
    }

    /// Step, min and max for number fields.
    pub fn set_number_range(&mut self, step: Option<f64>, min: Option<f64>, max: Option<f64>) {
        self.config.step = step;
        self.config.min = min;
        self.config.max = max;
    }

    /// Explicit direction. None uses the direction of the host field.
    pub fn set_direction(&mut self, direction: Option<Direction>) {
        self.config.direction = direction;
        self.apply_mask();
    }

    /// Effective direction.
    pub fn direction(&self) -> Direction {
        self.config
            .direction
            .unwrap_or_else(|| self.field.inherited_direction())
    }

    pub fn set_segmenter(&mut self, segmenter: Segmenter) {
        if segmenter == Segmenter::Codepoint {
            debug!("codepoint segmentation, grapheme clusters will be split");
        }
        self.config.segmenter = segmenter;
        self.apply_mask();
    }

    pub fn segmenter(&self) -> Segmenter {
        self.config.segmenter
    }

    pub fn set_word_finder(&mut self, word_finder: WordFinder) {
        if word_finder == WordFinder::Regex {
            debug!("regex word boundaries, non-ascii words are not recognized");
        }
        self.config.word_finder = word_finder;
    }

    pub fn word_finder(&self) -> WordFinder {
        self.config.word_finder
    }

    pub fn set_pair_insert_transposes(&mut self, quirk: bool) {
        self.config.pair_insert_transposes = quirk;
    }
}

impl MaskedCore {
    /// Unmasked value.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Set the value.
    ///
    /// This is not limited by max_length and not coerced.
    /// The value attribute has no effect afterward.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.reflect_attribute = false;
        self.value = value.into();
        self.apply_mask();
    }

    /// Declarative value.
    ///
    /// Sets the value as long as it has not been set by
    /// [set_value](Self::set_value) or by editing.
    pub fn set_value_attribute(&mut self, value: &str) -> bool {
        if self.reflect_attribute && self.value != value {
            self.value = value.to_string();
            self.apply_mask();
            true
        } else {
            false
        }
    }

    /// The value attribute has no effect anymore.
    pub fn stop_reflecting(&mut self) {
        self.reflect_attribute = false;
    }

    /// Value setter used by all edits.
    ///
    /// Number fields are normalized and coerced, everything else
    /// is cut at max_length. Rebuilds only if the value changed.
    pub fn set_value_clamped(&mut self, value: &str) -> bool {
        let value = if self.config.input_type == InputType::Number {
            let native = self.native.create(&self.config, &normalize_number(value));
            native.value().to_string()
        } else if let Some(max_length) = self.config.max_length {
            self.config.segmenter.truncate(value, max_length).to_string()
        } else {
            value.to_string()
        };

        if value == self.value {
            false
        } else {
            self.value = value;
            self.apply_mask();
            true
        }
    }

    /// Takes a display value the host wrote behind our back.
    ///
    /// The masked display is restored in any case.
    pub fn accept_host_value(&mut self) -> bool {
        let raw = self.field.display_value().to_string();
        if self.set_value_clamped(&raw) {
            true
        } else {
            self.apply_mask();
            false
        }
    }

    /// Value with the mask, or without if the mask is hidden.
    pub fn masked_value(&self) -> &str {
        self.projection.display(self.is_mask_visible())
    }

    /// Display chars without the mask.
    pub fn plain_value(&self) -> &str {
        self.projection.plain()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Number of value graphemes.
    pub fn len(&self) -> usize {
        self.projection.value_len()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Is the mask shown?
    pub fn is_mask_visible(&self) -> bool {
        mask_visible(
            self.projection.value_len(),
            self.projection.replacement_slots(),
            self.config.show_empty_mask,
            self.config.show_overflowed_mask,
        )
    }

    /// Offsets in the active display.
    pub fn positions(&self) -> Positions<'_> {
        self.projection.positions(self.is_mask_visible())
    }

    /// Rebuild the projection and write the display to the field.
    ///
    /// Writing may reset the selection of the field, the old
    /// selection is restored if it still fits.
    pub fn apply_mask(&mut self) {
        let options = ProjectOptions::from_config(&self.config, self.direction());
        self.projection = Projection::new(&self.value, &self.config.mask, &options);

        let visible = self.is_mask_visible();
        let display = self.projection.display(visible);
        if self.field.display_value() != display {
            let selection = self.field.selection();
            let direction = self.field.selection_direction();
            self.field.set_display_value(display);
            if let Err(e) =
                self.field
                    .set_selection_range(selection.start, selection.end, direction)
            {
                debug!("selection not restored {:?}", e);
            }
        }
    }
}

impl MaskedCore {
    pub fn selection(&self) -> Range<upos_type> {
        self.field.selection()
    }

    pub fn selection_direction(&self) -> SelectionDirection {
        self.field.selection_direction()
    }

    pub fn has_selection(&self) -> bool {
        !self.field.selection().is_empty()
    }

    /// Set the selection of the field.
    ///
    /// Out of bounds positions are ignored.
    pub fn set_selection(
        &mut self,
        start: upos_type,
        end: upos_type,
        direction: SelectionDirection,
    ) -> bool {
        let old = (self.selection(), self.selection_direction());
        match self.field.set_selection_range(start, end, direction) {
            Ok(()) => old != (self.selection(), self.selection_direction()),
            Err(e) => {
                debug!("selection ignored {:?}", e);
                false
            }
        }
    }

    /// Collapse the selection.
    pub fn set_caret(&mut self, pos: upos_type) -> bool {
        self.set_selection(pos, pos, SelectionDirection::None)
    }

    /// Classify the current selection.
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot::classify(&self.positions(), self.selection())
    }

    /// Display chars of the selected slots.
    pub fn selected_text(&self) -> String {
        let snap = self.snapshot();
        let slots = self.projection.slots();
        snap.selected
            .iter()
            .filter_map(|idx| slots[*idx].display_char.as_deref())
            .collect()
    }
}

impl MaskedCore {
    /// Transient native input with the current value.
    pub fn native_input(&self) -> Box<dyn NativeInput> {
        self.native.create(&self.config, &self.value)
    }

    /// Value as a number.
    pub fn value_as_number(&self) -> Option<f64> {
        self.native_input().value_as_number()
    }

    /// Increment by n steps.
    pub fn step_up(&mut self, n: i32) -> Result<bool, TextError> {
        let mut native = self.native_input();
        native.step_up(n)?;
        Ok(self.apply_stepped(native.value()))
    }

    /// Decrement by n steps.
    pub fn step_down(&mut self, n: i32) -> Result<bool, TextError> {
        let mut native = self.native_input();
        native.step_down(n)?;
        Ok(self.apply_stepped(native.value()))
    }

    fn apply_stepped(&mut self, value: &str) -> bool {
        if self.set_value_clamped(value) {
            let pos = self.positions().end_position();
            self.set_caret(pos);
            true
        } else {
            false
        }
    }

    /// Constraint validation.
    pub fn check_validity(&self) -> Validity {
        self.native_input().check_validity()
    }

    /// Replace the value graphemes in the range.
    pub fn set_range_text(&mut self, replacement: &str, range: Range<usize>) -> Result<bool, TextError> {
        let graphemes = self.projection.value_graphemes();
        if range.start > range.end || range.end > graphemes.len() {
            return Err(TextError::InvalidArgument("range"));
        }
        let char_start = graphemes[..range.start]
            .iter()
            .map(|v| v.chars().count())
            .sum::<usize>();
        let char_end = char_start
            + graphemes[range.clone()]
                .iter()
                .map(|v| v.chars().count())
                .sum::<usize>();

        let mut native = self.native_input();
        native.set_range_text(replacement, char_start..char_end)?;
        let value = native.value().to_string();
        Ok(self.set_value_clamped(&value))
    }
}
