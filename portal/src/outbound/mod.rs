//! Outbound adapters implementing domain ports for local infrastructure.
//!
//! - **storage**: the file-backed local store and an in-memory stand-in.
//! - **notifications**: log-only notification delivery.
//!
//! Adapters are thin translators between domain port types and their
//! backing crates. They contain no business logic.

pub mod notifications;
pub mod storage;
