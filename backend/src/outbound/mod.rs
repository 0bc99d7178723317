//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: user storage behind the `UserRepository` port.
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.

pub mod persistence;
