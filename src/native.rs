//!
//! Native input capability.
//!
//! Number coercion, stepping and constraint validation are not done
//! by the masked input itself. It creates a transient native input
//! configured like itself and asks it.
//!
//! [StdInputFactory] is the default and follows the html
//! input semantics closely enough for terminal use.
//!

use crate::config::{InputType, MaskConfig};
use crate::grapheme::Segmenter;
use crate::TextError;
use dyn_clone::{clone_box, DynClone};
use regex::Regex;
use std::fmt::Debug;
use std::ops::Range;
use std::sync::OnceLock;

/// Result of the constraint validation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Validity {
    pub valid: bool,
    /// Validation message. Empty if valid.
    pub message: String,
}

impl Validity {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: Default::default(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// A transient native input.
pub trait NativeInput: Debug {
    /// Current value after coercion.
    fn value(&self) -> &str;

    /// Set the value. Coercion happens here.
    fn set_value(&mut self, value: &str);

    /// Value as a number, if the input is numeric and the value parses.
    fn value_as_number(&self) -> Option<f64>;

    /// Increment by n steps.
    fn step_up(&mut self, n: i32) -> Result<(), TextError>;

    /// Decrement by n steps.
    fn step_down(&mut self, n: i32) -> Result<(), TextError>;

    /// Replace the char range of the value.
    fn set_range_text(&mut self, replacement: &str, range: Range<usize>) -> Result<(), TextError>;

    /// Constraint validation.
    fn check_validity(&self) -> Validity;
}

/// Creates native inputs.
pub trait NativeInputFactory: DynClone + Debug {
    /// Create an input with the given configuration and value.
    fn create(&self, config: &MaskConfig, value: &str) -> Box<dyn NativeInput>;
}

impl Clone for Box<dyn NativeInputFactory> {
    fn clone(&self) -> Self {
        clone_box(self.as_ref())
    }
}

/// Default factory.
#[derive(Debug, Default, Clone)]
pub struct StdInputFactory;

impl NativeInputFactory for StdInputFactory {
    fn create(&self, config: &MaskConfig, value: &str) -> Box<dyn NativeInput> {
        let mut input = StdInput {
            input_type: config.input_type,
            segmenter: config.segmenter,
            max_length: config.max_length,
            min_length: config.min_length,
            step: config.step,
            min: config.min,
            max: config.max,
            value: String::new(),
        };
        input.set_value(value);
        Box::new(input)
    }
}

/// Default native input.
#[derive(Debug, Clone)]
pub struct StdInput {
    input_type: InputType,
    segmenter: Segmenter,
    max_length: Option<usize>,
    min_length: Option<usize>,
    step: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
    value: String,
}

static NUMBER: OnceLock<Regex> = OnceLock::new();
static EMAIL: OnceLock<Regex> = OnceLock::new();
static URL: OnceLock<Regex> = OnceLock::new();

// accepts partial numbers too, otherwise typing "1." would
// reset the value.
fn number_re() -> &'static Regex {
    NUMBER.get_or_init(|| {
        Regex::new(r"^-?[0-9]*\.?[0-9]*(?:[eE][-+]?[0-9]*)?$").expect("valid regex")
    })
}

fn email_re() -> &'static Regex {
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid regex"))
}

fn url_re() -> &'static Regex {
    URL.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$").expect("valid regex"))
}

impl StdInput {
    fn sanitize(&self, value: &str) -> String {
        match self.input_type {
            InputType::Number => {
                if number_re().is_match(value) {
                    value.to_string()
                } else {
                    String::new()
                }
            }
            InputType::Url | InputType::Email => value
                .trim()
                .chars()
                .filter(|c| *c != '\n' && *c != '\r')
                .collect(),
            _ => value.chars().filter(|c| *c != '\n' && *c != '\r').collect(),
        }
    }

    fn step_by(&mut self, n: i32) -> Result<(), TextError> {
        if self.input_type != InputType::Number {
            return Err(TextError::InvalidArgument("step on a non-numeric input"));
        }
        let step = self.step.unwrap_or(1.0);
        if step <= 0.0 {
            return Err(TextError::InvalidArgument("step"));
        }

        let current = self.value_as_number().or(self.min).unwrap_or(0.0);
        let mut next = current + step * f64::from(n);
        if let Some(min) = self.min {
            next = next.max(min);
        }
        if let Some(max) = self.max {
            next = next.min(max);
        }

        let step_str = step.to_string();
        let decimals = step_str.split_once('.').map(|(_, v)| v.len()).unwrap_or(0);
        self.value = format!("{:.*}", decimals, next);
        Ok(())
    }
}

impl NativeInput for StdInput {
    fn value(&self) -> &str {
        self.value.as_str()
    }

    fn set_value(&mut self, value: &str) {
        self.value = self.sanitize(value);
    }

    fn value_as_number(&self) -> Option<f64> {
        if self.input_type == InputType::Number {
            self.value.parse::<f64>().ok().filter(|v| v.is_finite())
        } else {
            None
        }
    }

    fn step_up(&mut self, n: i32) -> Result<(), TextError> {
        self.step_by(n)
    }

    fn step_down(&mut self, n: i32) -> Result<(), TextError> {
        self.step_by(-n)
    }

    fn set_range_text(&mut self, replacement: &str, range: Range<usize>) -> Result<(), TextError> {
        let len = self.value.chars().count();
        if range.start > range.end || range.end > len {
            return Err(TextError::InvalidArgument("range"));
        }
        let mut s = String::new();
        s.extend(self.value.chars().take(range.start));
        s.push_str(replacement);
        s.extend(self.value.chars().skip(range.end));
        self.set_value(&s);
        Ok(())
    }

    fn check_validity(&self) -> Validity {
        if self.value.is_empty() {
            return Validity::valid();
        }

        let len = self.segmenter.count(&self.value);
        if let Some(max_length) = self.max_length {
            if len > max_length {
                return Validity::invalid(format!(
                    "Please shorten this text to {} characters or less (you are currently using {} characters).",
                    max_length, len
                ));
            }
        }
        if let Some(min_length) = self.min_length {
            if len < min_length {
                return Validity::invalid(format!(
                    "Please lengthen this text to {} characters or more (you are currently using {} characters).",
                    min_length, len
                ));
            }
        }

        match self.input_type {
            InputType::Number => {
                let Some(v) = self.value_as_number() else {
                    return Validity::invalid("Please enter a number.");
                };
                if let Some(min) = self.min {
                    if v < min {
                        return Validity::invalid(format!(
                            "Value must be greater than or equal to {}.",
                            min
                        ));
                    }
                }
                if let Some(max) = self.max {
                    if v > max {
                        return Validity::invalid(format!(
                            "Value must be less than or equal to {}.",
                            max
                        ));
                    }
                }
                if let Some(step) = self.step {
                    if step > 0.0 {
                        let base = self.min.unwrap_or(0.0);
                        let n = (v - base) / step;
                        if (n - n.round()).abs() > 1e-9 {
                            return Validity::invalid("Please enter a valid value.");
                        }
                    }
                }
                Validity::valid()
            }
            InputType::Email => {
                if email_re().is_match(&self.value) {
                    Validity::valid()
                } else {
                    Validity::invalid("Please enter an email address.")
                }
            }
            InputType::Url => {
                if url_re().is_match(&self.value) {
                    Validity::valid()
                } else {
                    Validity::invalid("Please enter a URL.")
                }
            }
            _ => Validity::valid(),
        }
    }
}
