//! Authentication for the CodeCamp API
//!
//! Provides JWT validation and issuance, identity resolution through the
//! [`UserDirectory`] capability, and axum extractors that work with any
//! domain state implementing `FromRef<S>` for [`AuthBackend`].

mod backend;
mod claims;
mod config;
mod context;
mod directory;
mod error;
mod extractors;
pub mod handlers;
mod jwt;
mod memory;
mod routes;
mod types;

pub use backend::AuthBackend;
pub use claims::CampClaims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use directory::{PgUserDirectory, UserDirectory};
pub use error::AuthError;
pub use extractors::AuthUser;
pub use memory::MemoryUserDirectory;
pub use routes::routes;
pub use types::{CampUser, StoredCredentials};
