//! # Waypoint HTTP
//!
//! Step navigation over `http` types. A [`Wizard`] is built once from a
//! [`WizardConfig`](waypoint_core::WizardConfig) and a session storage; each
//! request is `register`ed into a [`WizardStep`] which saves form data and
//! answers with `302` redirects carrying the committed session cookie.
//!
//! This crate does not serve HTTP. Call it from whatever server hands you an
//! `http::Request`.

pub mod error;
pub mod form;
pub mod response;
pub mod schema;
pub mod step;
pub mod wizard;

pub use error::WizardError;
pub use form::FormData;
pub use response::redirect;
pub use schema::{FormSchema, TypedSchema};
#[cfg(feature = "validation")]
pub use schema::ValidatedSchema;
pub use step::WizardStep;
pub use wizard::Wizard;

pub mod prelude {
    pub use crate::error::WizardError;
    pub use crate::form::FormData;
    pub use crate::schema::{FormSchema, TypedSchema};
    #[cfg(feature = "validation")]
    pub use crate::schema::ValidatedSchema;
    pub use crate::step::WizardStep;
    pub use crate::wizard::Wizard;
}
