use bytes::Bytes;
use http::{HeaderValue, Response, StatusCode, header};
use http_body_util::Full;
use thiserror::Error;
use waypoint_core::{SessionError, StepError};

#[derive(Error, Debug)]
pub enum WizardError {
    #[error(transparent)]
    Step(#[from] StepError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("No schema defined for this wizard")]
    NoSchema,

    #[error("Form field missing: {0}")]
    MissingField(String),

    #[error("Invalid form data: {0}")]
    InvalidForm(String),

    #[error("Form failed schema validation: {0}")]
    Schema(String),

    #[error("Failed to read request body: {0}")]
    Body(String),

    #[error("Failed to build response: {0}")]
    Response(#[from] http::Error),
}

impl WizardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WizardError::MissingField(_) | WizardError::InvalidForm(_) | WizardError::Schema(_) => {
                StatusCode::BAD_REQUEST
            }
            WizardError::Body(_) => StatusCode::BAD_REQUEST,
            WizardError::Step(StepError::UnmatchedUrl(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text error response carrying [`status_code`](Self::status_code).
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let mut res = Response::new(Full::new(Bytes::from(self.to_string())));
        *res.status_mut() = self.status_code();
        res.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        res
    }
}
