//! Waypoint facade crate.
//!
//! This crate re-exports core, http, and session crates with a single entry point.
//! `create_wizard` builds a wizard over the default cookie session storage.
//!
//! ```rust,ignore
//! use waypoint::prelude::*;
//!
//! let wizard = waypoint::create_wizard(WizardConfig::new(
//!     "add-patient-wizard",
//!     ["/patients/add/step-1", "/patients/add/step-2", "/patients/add/step-3"],
//! ))?;
//! ```

pub use waypoint_core as core;
pub use waypoint_http as http;
#[cfg(feature = "session")]
pub use waypoint_session as session;

pub use waypoint_core::{Navigation, RouteTable, Session, SessionStorage, StepTarget, WizardConfig};
pub use waypoint_http::{Wizard, WizardError, WizardStep};

/// Wizard over a [`CookieSessionStorage`](waypoint_session::CookieSessionStorage)
/// whose cookie is named after the wizard, with any `config.cookie` overrides applied.
#[cfg(feature = "session")]
pub fn create_wizard(
    config: WizardConfig,
) -> Result<Wizard<waypoint_session::CookieSessionStorage>, WizardError> {
    let mut options = waypoint_session::CookieOptions::for_wizard(config.name.clone());
    if let Some(cookie) = &config.cookie {
        options = options.with_overrides(cookie);
    }
    Wizard::new(config, waypoint_session::CookieSessionStorage::new(options))
}

pub mod prelude {
    pub use waypoint_core::prelude::*;
    pub use waypoint_http::prelude::*;
    #[cfg(feature = "session")]
    pub use waypoint_session::prelude::*;

    #[cfg(feature = "session")]
    pub use crate::create_wizard;
}

#[cfg(all(test, feature = "session"))]
mod tests {
    use super::*;
    use waypoint_core::{CookieConfig, SameSitePolicy};

    #[tokio::test]
    async fn test_create_wizard_uses_named_cookie() {
        let wizard = create_wizard(WizardConfig::new(
            "add-patient-wizard",
            ["/patients/add/step-1", "/patients/add/step-2"],
        ))
        .unwrap();
        assert_eq!(wizard.storage().options().name, "add-patient-wizard");

        let req = ::http::Request::get("/patients/add/step-1").body(()).unwrap();
        let res = wizard.register(&req).await.unwrap().next_step().await.unwrap();
        let set_cookie = res.headers()[::http::header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("add-patient-wizard="));
        assert!(set_cookie.contains("SameSite=Lax"));
    }

    #[test]
    fn test_create_wizard_applies_cookie_overrides() {
        let config = WizardConfig::new("intake", ["/intake/1"]).with_cookie(CookieConfig {
            name: Some("intake_sid".to_string()),
            same_site: Some(SameSitePolicy::Strict),
            ..Default::default()
        });
        let wizard = create_wizard(config).unwrap();
        let options = wizard.storage().options();
        assert_eq!(options.name, "intake_sid");
        assert_eq!(options.same_site, SameSitePolicy::Strict);
    }
}
