use crate::error::WizardError;
use crate::form::FormData;
use crate::response::redirect;
use crate::wizard::Wizard;
use bytes::Bytes;
use http::Response;
use http_body_util::Full;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::Instrument;
use waypoint_core::{Navigation, Session, SessionData, SessionStorage, StepTarget};

/// One request's view of a wizard: its URL, its session and its form.
///
/// Mutations (`save`, `parse_form_value`, ...) only touch the in-memory
/// session. Navigation commits the session and returns a redirect carrying
/// the resulting `Set-Cookie` header.
pub struct WizardStep<'w, S> {
    wizard: &'w Wizard<S>,
    url: String,
    session: Session,
    form: FormData,
}

impl<'w, S: SessionStorage> WizardStep<'w, S> {
    pub(crate) fn new(wizard: &'w Wizard<S>, url: String, session: Session, form: FormData) -> Self {
        Self {
            wizard,
            url,
            session,
            form,
        }
    }

    /// URL of the request this step was registered from.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Everything saved in the wizard so far.
    pub fn data(&self) -> &SessionData {
        self.session.data()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.session.get(key)
    }

    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, WizardError> {
        Ok(self.session.get_as(key)?)
    }

    pub fn save<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> Result<(), WizardError> {
        Ok(self.session.set(key, value)?)
    }

    /// Form submitted with this request; empty unless registered with `register_form`.
    pub fn form(&self) -> &FormData {
        &self.form
    }

    /// Store the submitted value(s) of `name` in the session.
    ///
    /// A single value is stored as a string, repeated values as an array.
    pub fn parse_form_value(&mut self, name: &str) -> Result<&Value, WizardError> {
        let value = match self.form.get_all(name).as_slice() {
            [] => return Err(WizardError::MissingField(name.to_string())),
            [single] => Value::from(*single),
            many => Value::from(many.to_vec()),
        };
        self.session.set(name, value)?;
        self.session
            .get(name)
            .ok_or_else(|| WizardError::MissingField(name.to_string()))
    }

    /// Stored value of a form field, as text.
    pub fn form_value(&self, name: &str) -> Option<String> {
        self.session.get(name).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// All stored form data.
    pub fn form_data(&self) -> &SessionData {
        self.session.data()
    }

    /// Run the wizard's schema over the form and store each parsed field.
    pub fn parse_form_with_schema(&mut self) -> Result<Value, WizardError> {
        let schema = self.wizard.schema().ok_or(WizardError::NoSchema)?;
        let parsed = schema.parse(&self.form)?;

        if let Value::Object(fields) = &parsed {
            for (key, value) in fields {
                self.session.set(key.clone(), value)?;
            }
        }
        tracing::debug!(wizard = %self.wizard.name(), ?parsed, "Form parsed with schema");
        Ok(parsed)
    }

    /// Index of the step this request belongs to.
    pub fn current_step(&self) -> Result<usize, WizardError> {
        Ok(self.wizard.routes().step_for_url(&self.url)?)
    }

    pub fn is_last_step(&self) -> Result<bool, WizardError> {
        Ok(self.wizard.routes().is_last(self.current_step()?))
    }

    pub async fn next_step(&self) -> Result<Response<Full<Bytes>>, WizardError> {
        self.navigate(Navigation::Next).await
    }

    pub async fn prev_step(&self) -> Result<Response<Full<Bytes>>, WizardError> {
        self.navigate(Navigation::Prev).await
    }

    /// Jump to a step by index, or by a URL resolved like the request URL.
    pub async fn jump_to_step(
        &self,
        target: impl Into<StepTarget>,
    ) -> Result<Response<Full<Bytes>>, WizardError> {
        self.navigate(Navigation::Jump(target.into())).await
    }

    /// Resolve `navigation`, commit the session and redirect.
    pub async fn navigate(&self, navigation: Navigation) -> Result<Response<Full<Bytes>>, WizardError> {
        let span = tracing::info_span!(
            "WizardStep",
            waypoint.wizard = %self.wizard.name(),
            waypoint.step_url = %self.url,
            waypoint.navigation = navigation.label(),
        );

        async {
            let target = navigation
                .resolve(self.wizard.routes(), &self.url)
                .inspect_err(|e| tracing::warn!(error = %e, "Navigation failed"))?;

            let set_cookie = self
                .wizard
                .storage()
                .commit_session(&self.session)
                .await
                .inspect_err(|e| tracing::warn!(error = %e, "Session commit failed"))?;
            tracing::debug!(to = target.route, index = target.index, "Redirecting");

            Ok::<_, WizardError>(redirect(target.route, &set_cookie)?)
        }
        .instrument(span)
        .await
    }

    /// End the wizard: destroy the session and redirect to `location`.
    pub async fn finish(&self, location: &str) -> Result<Response<Full<Bytes>>, WizardError> {
        let set_cookie = self
            .wizard
            .storage()
            .destroy_session(&self.session)
            .await
            .inspect_err(|e| {
                tracing::warn!(wizard = %self.wizard.name(), error = %e, "Session destroy failed")
            })?;
        tracing::info!(wizard = %self.wizard.name(), to = location, "Wizard finished");
        Ok(redirect(location, &set_cookie)?)
    }
}
