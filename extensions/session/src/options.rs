use cookie::time::Duration;
use cookie::{Cookie, SameSite};
use waypoint_core::{CookieConfig, SameSitePolicy};

const DEFAULT_PATH: &str = "/";

/// Deployment mode, read from `WAYPOINT_MODE`.
///
/// Only production marks cookies `Secure` by default.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Dev,
    Prod,
}

impl Mode {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("WAYPOINT_MODE").unwrap_or_else(|_| "dev".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            _ => Self::Dev,
        }
    }
}

/// Attributes of the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub name: String,
    pub path: String,
    pub domain: Option<String>,
    pub same_site: SameSitePolicy,
    pub http_only: bool,
    pub secure: bool,
    /// Lifetime in seconds; `None` makes a browser-session cookie.
    pub max_age: Option<i64>,
}

impl CookieOptions {
    /// Wizard defaults: `SameSite=Lax; Path=/; HttpOnly`, `Secure` in production.
    pub fn for_wizard(name: impl Into<String>) -> Self {
        Self::for_mode(name, Mode::from_env())
    }

    pub fn for_mode(name: impl Into<String>, mode: Mode) -> Self {
        Self {
            name: name.into(),
            path: DEFAULT_PATH.to_string(),
            domain: None,
            same_site: SameSitePolicy::Lax,
            http_only: true,
            secure: mode == Mode::Prod,
            max_age: None,
        }
    }

    /// Apply the overrides set in `config`.
    pub fn with_overrides(mut self, config: &CookieConfig) -> Self {
        if let Some(name) = &config.name {
            self.name = name.clone();
        }
        if let Some(path) = &config.path {
            self.path = path.clone();
        }
        if config.domain.is_some() {
            self.domain = config.domain.clone();
        }
        if let Some(same_site) = config.same_site {
            self.same_site = same_site;
        }
        if let Some(http_only) = config.http_only {
            self.http_only = http_only;
        }
        if let Some(secure) = config.secure {
            self.secure = secure;
        }
        if config.max_age_secs.is_some() {
            self.max_age = config.max_age_secs;
        }
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn with_same_site(mut self, same_site: SameSitePolicy) -> Self {
        self.same_site = same_site;
        self
    }

    /// Render a cookie carrying `value` with these attributes.
    pub(crate) fn build(&self, value: String) -> Cookie<'static> {
        let mut builder = Cookie::build((self.name.clone(), value))
            .path(self.path.clone())
            .same_site(same_site(self.same_site))
            .http_only(self.http_only)
            .secure(self.secure);
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        if let Some(seconds) = self.max_age {
            builder = builder.max_age(Duration::seconds(seconds));
        }
        builder.build()
    }

    /// A cookie that tells the browser to drop the session cookie.
    pub(crate) fn removal(&self) -> Cookie<'static> {
        let mut cookie = self.build(String::new());
        cookie.make_removal();
        cookie
    }

    /// Value of this cookie in a request `Cookie` header.
    pub(crate) fn find_value(&self, header: Option<&str>) -> Option<String> {
        Cookie::split_parse(header?)
            .filter_map(Result::ok)
            .find(|c| c.name() == self.name)
            .map(|c| c.value().to_string())
    }
}

fn same_site(policy: SameSitePolicy) -> SameSite {
    match policy {
        SameSitePolicy::Strict => SameSite::Strict,
        SameSitePolicy::Lax => SameSite::Lax,
        SameSitePolicy::None => SameSite::None,
    }
}
