//! Domain primitives and aggregates.
//!
//! Purpose: define the declarative error taxonomy and the user entity, free of
//! any transport concern. Inbound adapters map these types onto HTTP; outbound
//! adapters implement the ports.
//!
//! Public surface:
//! - `ErrorKind` / `DeclaredError`: closed error taxonomy and raised instances.
//! - `User`, `NewUser` and their validated value types.
//! - `ports`: persistence traits implemented by outbound adapters.

pub mod error;
pub mod ports;
pub mod user;

pub use self::error::{DeclaredError, ErrorKind};
pub use self::user::{
    FIRST_NAME_MAX, FirstName, NewUser, USERNAME_MAX, User, UserId, UserValidationError, Username,
};
