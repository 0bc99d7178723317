//! Persistence adapters for the user repository port.
//!
//! The in-memory adapter keeps the service self-contained; a database-backed
//! adapter only needs to implement [`crate::domain::ports::UserRepository`].

mod memory_user_repository;

pub use memory_user_repository::InMemoryUserRepository;
