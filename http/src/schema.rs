//! Form schemas.
//!
//! A [`FormSchema`] turns raw [`FormData`] into a structured JSON value or
//! rejects it. Attach one with [`Wizard::with_schema`](crate::Wizard::with_schema)
//! and call [`WizardStep::parse_form_with_schema`](crate::WizardStep::parse_form_with_schema).
//!
//! ```rust,ignore
//! #[derive(Serialize, Deserialize)]
//! struct Contact { email: String, phone: Option<String> }
//!
//! let wizard = Wizard::new(config, storage)?.with_schema(TypedSchema::<Contact>::new());
//! ```

use crate::error::WizardError;
use crate::form::FormData;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

pub trait FormSchema: Send + Sync + 'static {
    fn parse(&self, form: &FormData) -> Result<Value, WizardError>;
}

impl<F> FormSchema for F
where
    F: Fn(&FormData) -> Result<Value, WizardError> + Send + Sync + 'static,
{
    fn parse(&self, form: &FormData) -> Result<Value, WizardError> {
        self(form)
    }
}

/// Schema backed by a serde type: the form is deserialized into `T` and
/// stored as its JSON form.
pub struct TypedSchema<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for TypedSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn deserialize<T: DeserializeOwned>(form: &FormData) -> Result<T, WizardError> {
    serde_urlencoded::from_str(&form.to_urlencoded()?)
        .map_err(|e| WizardError::Schema(e.to_string()))
}

fn to_value<T: Serialize>(parsed: &T) -> Result<Value, WizardError> {
    serde_json::to_value(parsed).map_err(|e| WizardError::Schema(e.to_string()))
}

impl<T> FormSchema for TypedSchema<T>
where
    T: DeserializeOwned + Serialize + 'static,
{
    fn parse(&self, form: &FormData) -> Result<Value, WizardError> {
        to_value(&deserialize::<T>(form)?)
    }
}

/// Like [`TypedSchema`], then runs `validator::Validate` on the parsed value.
#[cfg(feature = "validation")]
pub struct ValidatedSchema<T> {
    _marker: PhantomData<fn() -> T>,
}

#[cfg(feature = "validation")]
impl<T> ValidatedSchema<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

#[cfg(feature = "validation")]
impl<T> Default for ValidatedSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "validation")]
impl<T> FormSchema for ValidatedSchema<T>
where
    T: DeserializeOwned + Serialize + validator::Validate + 'static,
{
    fn parse(&self, form: &FormData) -> Result<Value, WizardError> {
        let parsed = deserialize::<T>(form)?;
        parsed
            .validate()
            .map_err(|e| WizardError::Schema(e.to_string()))?;
        to_value(&parsed)
    }
}
