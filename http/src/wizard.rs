//! # Wizard - Reusable Step Navigator
//!
//! Define a wizard once, then `register` each incoming request from the
//! handlers of its steps.
//!
//! ```rust,ignore
//! let wizard = Wizard::new(
//!     WizardConfig::new("add-patient-wizard", [
//!         "/patients/add/step-1",
//!         "/patients/add/step-2",
//!         "/patients/add/step-3",
//!     ]),
//!     CookieSessionStorage::for_wizard("add-patient-wizard"),
//! )?;
//!
//! // in the POST handler of any step
//! let mut step = wizard.register_form(req).await?;
//! step.parse_form_value("name")?;
//! step.next_step().await
//! ```

use crate::error::WizardError;
use crate::form::{FormData, check_content_type};
use crate::schema::FormSchema;
use crate::step::WizardStep;
use http::{HeaderMap, Request, header};
use http_body::Body;
use http_body_util::BodyExt;
use std::future::Future;
use std::sync::Arc;
use waypoint_core::{RouteTable, SessionStorage, WizardConfig};

pub struct Wizard<S> {
    name: String,
    routes: RouteTable,
    storage: Arc<S>,
    schema: Option<Arc<dyn FormSchema>>,
}

impl<S> Clone for Wizard<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            routes: self.routes.clone(),
            storage: Arc::clone(&self.storage),
            schema: self.schema.clone(),
        }
    }
}

impl<S: SessionStorage> Wizard<S> {
    /// Build a wizard, validating the configured routes.
    pub fn new(config: WizardConfig, storage: S) -> Result<Self, WizardError> {
        Self::with_shared_storage(config, Arc::new(storage))
    }

    /// Build a wizard over a storage shared with other wizards.
    pub fn with_shared_storage(config: WizardConfig, storage: Arc<S>) -> Result<Self, WizardError> {
        let routes = config.route_table()?;
        tracing::debug!(wizard = %config.name, steps = routes.len(), "Wizard created");
        Ok(Self {
            name: config.name,
            routes,
            storage,
            schema: None,
        })
    }

    pub fn with_schema(mut self, schema: impl FormSchema) -> Self {
        self.schema = Some(Arc::new(schema));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub(crate) fn schema(&self) -> Option<&dyn FormSchema> {
        self.schema.as_deref()
    }

    /// Load the session for `request` and hand back a step handle.
    ///
    /// The body is not read; form helpers see an empty form. Use
    /// [`register_form`](Self::register_form) in handlers that receive a form post.
    pub fn register<'a, B>(
        &'a self,
        request: &Request<B>,
    ) -> impl Future<Output = Result<WizardStep<'a, S>, WizardError>> + use<'a, S, B> {
        // The request is only borrowed up to here, so the future does not hold it.
        let url = request.uri().to_string();
        let cookie = cookie_header(request.headers());
        self.load(url, cookie, FormData::new())
    }

    /// Like [`register`](Self::register), also decoding the urlencoded body.
    pub async fn register_form<B>(&self, request: Request<B>) -> Result<WizardStep<'_, S>, WizardError>
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        let (parts, body) = request.into_parts();
        check_content_type(&parts.headers)?;

        let bytes = body
            .collect()
            .await
            .map_err(|e| WizardError::Body(e.to_string()))?
            .to_bytes();
        let form = FormData::parse(&bytes)?;

        self.load(parts.uri.to_string(), cookie_header(&parts.headers), form)
            .await
    }

    async fn load(
        &self,
        url: String,
        cookie: Option<String>,
        form: FormData,
    ) -> Result<WizardStep<'_, S>, WizardError> {
        let session = self.storage.get_session(cookie.as_deref()).await?;
        Ok(WizardStep::new(self, url, session, form))
    }
}

impl<S> std::fmt::Debug for Wizard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wizard")
            .field("name", &self.name)
            .field("routes", &self.routes.routes())
            .field("has_schema", &self.schema.is_some())
            .finish()
    }
}

/// All `Cookie` headers joined; HTTP/2 clients may send several.
fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let joined = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    (!joined.is_empty()).then_some(joined)
}
