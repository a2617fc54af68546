//! Wizard configuration.
//!
//! ```toml
//! name = "add-patient-wizard"
//! routes = [
//!     "/patients/add/step-1",
//!     "/patients/add/step-2",
//!     "/patients/add/step-3",
//! ]
//!
//! [cookie]
//! same_site = "strict"
//! max_age_secs = 3600
//! ```

use crate::error::ConfigError;
use crate::route::RouteTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Wizard identifier; also the default session cookie name.
    pub name: String,
    /// Step routes in order.
    pub routes: Vec<String>,
    /// Overrides for the default session cookie.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<CookieConfig>,
}

impl WizardConfig {
    pub fn new<I, S>(name: impl Into<String>, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            routes: routes.into_iter().map(Into::into).collect(),
            cookie: None,
        }
    }

    pub fn with_cookie(mut self, cookie: CookieConfig) -> Self {
        self.cookie = Some(cookie);
        self
    }

    /// Parse a config from TOML and validate its routes.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: WizardConfig = toml::from_str(raw)?;
        config.route_table()?;
        Ok(config)
    }

    /// Validated route table for this config.
    pub fn route_table(&self) -> Result<RouteTable, crate::error::StepError> {
        RouteTable::new(self.routes.iter().cloned())
    }
}

/// `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    Strict,
    #[default]
    Lax,
    None,
}

/// Optional cookie attribute overrides. Unset fields keep the storage defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieConfig {
    pub name: Option<String>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub same_site: Option<SameSitePolicy>,
    pub http_only: Option<bool>,
    pub secure: Option<bool>,
    pub max_age_secs: Option<i64>,
}
