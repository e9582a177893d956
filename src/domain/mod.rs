//! Domain layer - Core business entities and logic
//!
//! Contains the core domain models that represent business concepts
//! independent of infrastructure concerns.

pub mod note;
pub mod password;
pub mod user;

pub use note::{Note, NoteResponse, NoteWithOwner};
pub use password::Password;
pub use user::{User, UserResponse};
