pub use auth::{LoginForm, SignupForm, logout};
pub use controller::{Page, Phase, Ticket};
pub use error::{ClientError, Result, StoreError};
pub use guard::{Navigation, Route, resolve};
pub use remote::{Backend, HttpBackend};
pub use session::{SESSION_KEY, SessionStore};
pub use storage::{FileStorage, MemoryStorage, Storage};

pub mod auth;
pub mod controller;
mod error;
pub mod guard;
pub mod remote;
pub mod session;
pub mod storage;

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
