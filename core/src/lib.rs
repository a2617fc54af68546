//! # Waypoint Core
//!
//! Protocol-agnostic building blocks for multi-step form wizards: the ordered
//! [`RouteTable`], step resolution through [`Navigation`], the [`Session`]
//! value and the [`SessionStorage`] contract a host supplies.

pub mod config;
pub mod error;
pub mod navigation;
pub mod route;
pub mod session;
pub mod storage;

pub use config::{CookieConfig, SameSitePolicy, WizardConfig};
pub use error::{ConfigError, SessionError, StepError};
pub use navigation::{Navigation, Resolved, StepTarget};
pub use route::RouteTable;
pub use session::{Session, SessionData};
pub use storage::SessionStorage;

pub mod prelude {
    pub use crate::config::{CookieConfig, SameSitePolicy, WizardConfig};
    pub use crate::error::{ConfigError, SessionError, StepError};
    pub use crate::navigation::{Navigation, StepTarget};
    pub use crate::route::RouteTable;
    pub use crate::session::{Session, SessionData};
    pub use crate::storage::SessionStorage;
}
