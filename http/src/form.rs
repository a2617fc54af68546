use crate::error::WizardError;
use http::HeaderMap;
use http::header::CONTENT_TYPE;

const URLENCODED: &str = "application/x-www-form-urlencoded";

/// Decoded `application/x-www-form-urlencoded` body.
///
/// Field order is preserved and a name may repeat (checkbox groups,
/// multi-selects).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(body: &[u8]) -> Result<Self, WizardError> {
        let fields = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
            .map_err(|e| WizardError::InvalidForm(e.to_string()))?;
        Ok(Self { fields })
    }

    /// First value submitted for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted for `name`, in order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Re-encode as a urlencoded string.
    pub fn to_urlencoded(&self) -> Result<String, WizardError> {
        serde_urlencoded::to_string(&self.fields).map_err(|e| WizardError::InvalidForm(e.to_string()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Reject bodies we cannot decode. A missing content type is given the benefit of the doubt.
pub(crate) fn check_content_type(headers: &HeaderMap) -> Result<(), WizardError> {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        return Ok(());
    };
    let content_type = value
        .to_str()
        .map_err(|e| WizardError::InvalidForm(e.to_string()))?;
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    if mime.eq_ignore_ascii_case(URLENCODED) {
        Ok(())
    } else {
        Err(WizardError::InvalidForm(format!(
            "unsupported content type: {content_type}"
        )))
    }
}
