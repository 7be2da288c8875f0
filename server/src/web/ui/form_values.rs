//! This module provides the `FormValue` helper types that encapsulate string values and validation
//! error messages for rendering HTML form input fields and validating the corresponding user input.

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

const MISSING_VALUE_MESSAGE: &str = "Value missing in form data";

#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct FormValue<T: FormValueRepresentation> {
    value: Option<String>,
    #[serde(skip)]
    errors: Vec<String>,
    #[serde(skip)]
    _phantom: PhantomData<T>,
}

/// Implemented by types that can be used as an HTML form string value
///
/// In general this includes two functionalities:
/// * converting the type into a string for form value representation ([into_form_value_string]),
///   **and**
/// * validating a submitted form input string and converting it to this type.
///
/// Validation can either be implemented via the [ValidateFromFormInput] trait (when no additional
/// data is required for validating/converting a value) or by implementing
/// [ValidationDataForFormValue] for one or more additional data types.
pub trait FormValueRepresentation: Debug {
    fn into_form_value_string(self) -> String;
}

/// Trait for [FormValueRepresentation]-implementing types that can be validated and converted
/// directly from their form string representation, without additional data.
pub trait ValidateFromFormInput: FormValueRepresentation + Sized {
    fn from_form_value(value: &'_ str) -> Result<Self, String>;
}

/// Allow validating/converting the [FormValueRepresentation] type `R` with the help of this type,
/// via [FormValue::validate_with].
pub trait ValidationDataForFormValue<R: FormValueRepresentation> {
    fn validate_form_value(self, value: &'_ str) -> Result<R, String>;
}

impl FormValueRepresentation for String {
    fn into_form_value_string(self) -> String {
        self
    }
}

impl ValidateFromFormInput for String {
    fn from_form_value(value: &'_ str) -> Result<Self, String> {
        Ok(value.to_owned())
    }
}

impl<T: FormValueRepresentation> FormValue<T> {
    /// Create a FormValue without contained value. This will cause an error when trying to validate
    /// it.
    pub fn empty() -> Self {
        Self {
            value: None,
            errors: vec![],
            _phantom: Default::default(),
        }
    }

    pub fn validate_with<D: ValidationDataForFormValue<T>>(&mut self, data: D) -> Option<T> {
        let result = match &self.value {
            Some(value) => data.validate_form_value(value),
            None => Err(MISSING_VALUE_MESSAGE.to_owned()),
        };
        self.keep_error(result)
    }

    pub fn validate(&mut self) -> Option<T>
    where
        T: ValidateFromFormInput,
    {
        let result = match &self.value {
            Some(value) => T::from_form_value(value),
            None => Err(MISSING_VALUE_MESSAGE.to_owned()),
        };
        self.keep_error(result)
    }

    fn keep_error(&mut self, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }

    /// Check if validation errors have occurred, related to this form value.
    ///
    /// This should only be used by form input sub-templates for changing the rendering of a form
    /// input (like a text input) representing this form value.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &Vec<String> {
        &self.errors
    }

    /// Get the current string representation of the form value to be used as the `value` attribute
    /// when rendering the form input.
    pub fn string_value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

impl<T: FormValueRepresentation> Default for FormValue<T> {
    /// An empty string value, as shown by a blank form
    fn default() -> Self {
        FormValue {
            value: Some(String::new()),
            errors: vec![],
            _phantom: Default::default(),
        }
    }
}

impl<T: FormValueRepresentation> From<T> for FormValue<T> {
    fn from(value: T) -> Self {
        FormValue {
            value: Some(value.into_form_value_string()),
            errors: vec![],
            _phantom: Default::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct BoolFormValue {
    value: bool,
}

impl BoolFormValue {
    pub fn get_value(&self) -> bool {
        self.value
    }
}

/// Custom serde Deserialize implementation for BoolFormValue:
/// The value is `true` when the field is present (with any value) and `false` if the field is not
/// present, like an HTML checkbox.
impl<'de> serde::Deserialize<'de> for BoolFormValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(BoolFormValueVisitor {})
    }
}

/// Serde visitor for [BoolFormValue], only reacting to `visit_some()` and `visit_none()`
struct BoolFormValueVisitor;

impl<'de> serde::de::Visitor<'de> for BoolFormValueVisitor {
    type Value = BoolFormValue;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("any value (true) or no such field at all")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(BoolFormValue { value: false })
    }

    fn visit_some<D>(self, _deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(BoolFormValue { value: true })
    }
}

impl From<bool> for BoolFormValue {
    fn from(value: bool) -> Self {
        Self { value }
    }
}
