//! ГородОк municipal complaint portal.
//!
//! Residents register, sign in and file tickets about neighbourhood upkeep;
//! the administrator reviews every ticket and resolves or rejects it. State
//! lives in memory and is mirrored to a local key-value store.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use settings::PortalSettings;
