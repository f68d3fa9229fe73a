//! Catalog backend: item browsing and creation, credential and Google
//! sign-in, and the HTTP adapter that exposes them.
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - [`domain`]: entities, listing rules, services and port traits
//! - [`inbound`]: Actix handlers, extractors and session configuration
//! - [`outbound`]: PostgreSQL, in-memory, security and OAuth adapters
//! - [`seed`]: startup item import and demo account provisioning
//! - [`settings`]: layered application settings

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod seed;
pub mod settings;

#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
