//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel
//! - **memory**: in-process repositories for tests and database-less runs
//! - **security**: Argon2id password hashing and JWT session tokens
//! - **oauth**: Google sign-in over reqwest
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no business rules.

pub mod memory;
pub mod oauth;
pub mod persistence;
pub mod security;
