//! API layer for the Speakers domain
//!
//! Contains HTTP handlers, wire models, version negotiation, routes, and the
//! domain state definition.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod version;

pub use middleware::SpeakersState;
pub use routes::routes;
