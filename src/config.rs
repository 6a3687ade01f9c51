//!
//! Configuration of the masked input.
//!

use crate::_private::NonExhaustive;
use crate::grapheme::Segmenter;
use crate::word::WordFinder;
use crate::TextError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Field types that can be masked.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    #[default]
    Text,
    Url,
    Search,
    Tel,
    Email,
    /// Value characters are displayed as `•`.
    Password,
    /// Insertion runs through [crate::numeric::normalize_number]
    /// and the native coercion.
    Number,
}

impl InputType {
    /// All maskable types.
    pub const ALL: [InputType; 7] = [
        InputType::Text,
        InputType::Url,
        InputType::Search,
        InputType::Tel,
        InputType::Email,
        InputType::Password,
        InputType::Number,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Url => "url",
            InputType::Search => "search",
            InputType::Tel => "tel",
            InputType::Email => "email",
            InputType::Password => "password",
            InputType::Number => "number",
        }
    }

    /// Soft keyboard hint for the type.
    pub fn input_mode(&self) -> &'static str {
        match self {
            InputType::Password => "text",
            InputType::Number => "decimal",
            v => v.as_str(),
        }
    }
}

impl Display for InputType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for t in InputType::ALL {
            if t.as_str() == s {
                return Ok(t);
            }
        }
        Err(TextError::NotSupported(format!(
            "Cannot set type to {}. Masked-input type can only be one of [{}].",
            s,
            InputType::ALL
                .iter()
                .map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}

/// Layout direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[default]
    LeftToRight,
    /// The mask fills from the right edge.
    RightToLeft,
}

/// Configuration of a masked input.
///
/// Construct with `..Default::default()`.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskConfig {
    /// Mask pattern.
    pub mask: String,
    /// Marker for replacement slots in the mask.
    pub replacement_char: char,
    /// Show the mask for an empty value.
    pub show_empty_mask: bool,
    /// Show the mask if the value is longer than the mask.
    pub show_overflowed_mask: bool,
    /// Render unfilled slots with the replacement char instead of a blank.
    pub show_replacement_characters: bool,
    /// Field type.
    pub input_type: InputType,
    /// Maximum length in graphemes. Applies to edits only.
    pub max_length: Option<usize>,
    /// Minimum length in graphemes. Used for validation.
    pub min_length: Option<usize>,
    /// Step for number fields.
    pub step: Option<f64>,
    /// Minimum for number fields.
    pub min: Option<f64>,
    /// Maximum for number fields.
    pub max: Option<f64>,
    /// Explicit direction. None inherits the direction of the host field.
    pub direction: Option<Direction>,
    /// Grapheme segmentation.
    pub segmenter: Segmenter,
    /// Word boundaries.
    pub word_finder: WordFinder,
    /// The host reports a transposition as a two-grapheme
    /// insert replacing the selection.
    pub pair_insert_transposes: bool,

    pub non_exhaustive: NonExhaustive,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            mask: Default::default(),
            replacement_char: '_',
            show_empty_mask: false,
            show_overflowed_mask: false,
            show_replacement_characters: false,
            input_type: Default::default(),
            max_length: None,
            min_length: None,
            step: None,
            min: None,
            max: None,
            direction: None,
            segmenter: Default::default(),
            word_finder: Default::default(),
            pair_insert_transposes: false,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl MaskConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replacement marker from a string.
    ///
    /// Fails if the string is not exactly one char.
    pub fn set_replacement_str(&mut self, s: &str) -> Result<(), TextError> {
        let mut it = s.chars();
        match (it.next(), it.next()) {
            (Some(c), None) => {
                self.replacement_char = c;
                Ok(())
            }
            _ => Err(TextError::InvalidMarker(s.to_string())),
        }
    }

    /// Set the field type by name.
    ///
    /// The type stays unchanged if the name is not a maskable type.
    pub fn set_type_str(&mut self, s: &str) -> Result<(), TextError> {
        self.input_type = s.parse()?;
        Ok(())
    }
}

#[inline]
pub(crate) fn is_marker(g: &str, marker: char) -> bool {
    let mut it = g.chars();
    it.next() == Some(marker) && it.next().is_none()
}
