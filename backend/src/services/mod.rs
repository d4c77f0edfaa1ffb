//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! handlers and the store.

pub mod blog;
pub mod user;

pub use blog::BlogService;
pub use user::UserService;
