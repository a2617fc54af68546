use thiserror::Error;

/// Errors from resolving a step against the route table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error("Wizard has no routes")]
    EmptyRoutes,

    #[error("Wizard routes must not be empty strings")]
    EmptyRoute,

    #[error("Duplicate wizard route: {0}")]
    DuplicateRoute(String),

    #[error("URL does not match any wizard step: {0}")]
    UnmatchedUrl(String),

    #[error("Step index {index} out of range (wizard has {len} steps)")]
    OutOfRange { index: usize, len: usize },

    #[error("Step {current} is the last step; there is no next step")]
    NoNextStep { current: usize },

    #[error("Already on the first step; there is no previous step")]
    NoPreviousStep,
}

/// Errors raised by a session storage backend.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to decode session: {0}")]
    Decode(String),

    #[error("Failed to encode session: {0}")]
    Encode(String),

    #[error("Session cookie is {size} bytes, over the {limit} byte limit")]
    CookieTooLarge { size: usize, limit: usize },

    #[error("Session backend error: {0}")]
    Backend(String),
}

/// Errors loading a [`WizardConfig`](crate::config::WizardConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid wizard config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] StepError),
}
