//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic, integrity guards and repositories to
//! fulfill the CRUD operations for each resource. They depend on repository
//! traits for dependency inversion.

pub mod guards;
mod note_service;
mod user_service;

pub use guards::{can_delete_user, check_title_unique, check_username_unique, UniquenessCheck};
pub use note_service::{NoteManager, NoteService};
pub use user_service::{UserManager, UserService};
