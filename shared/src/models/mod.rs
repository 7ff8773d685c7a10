//! Data models
//!
//! Wire shapes of the Order and Catalog services, shared by the client and
//! any tooling that needs to read the same payloads.

pub mod branch;
pub mod cart;
pub mod menu;
pub mod order;
pub mod role;
pub mod user;

// Re-exports
pub use branch::*;
pub use cart::*;
pub use menu::*;
pub use order::*;
pub use role::*;
pub use user::*;
