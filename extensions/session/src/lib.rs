//! # Waypoint Session Storages
//!
//! Ready-made [`SessionStorage`](waypoint_core::SessionStorage) implementations
//! for wizards whose host does not supply one.
//!
//! - [`CookieSessionStorage`]: the session lives in the cookie itself (default).
//! - [`MemorySessionStorage`]: the cookie holds an id; data stays in process.
//!
//! Both honour [`CookieOptions`], whose wizard defaults are
//! `SameSite=Lax; Path=/; HttpOnly`, plus `Secure` when `WAYPOINT_MODE=production`.

mod codec;
pub mod cookie_store;
pub mod memory;
pub mod options;

pub use cookie_store::{CookieSessionStorage, MAX_COOKIE_SIZE};
pub use memory::{DEFAULT_TTL_SECS, MemorySessionStorage};
pub use options::{CookieOptions, Mode};

pub mod prelude {
    pub use crate::cookie_store::CookieSessionStorage;
    pub use crate::memory::MemorySessionStorage;
    pub use crate::options::{CookieOptions, Mode};
}
