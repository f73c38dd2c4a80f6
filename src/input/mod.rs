//! Thin adapters that turn device input into [`GameCommand`](crate::events::GameCommand)s.

#[cfg(feature = "desktop")]
pub mod bindings;
pub mod swipe;

pub use self::swipe::*;
