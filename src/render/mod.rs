//! Immediate-mode rendering: a pure frame builder and an SDL2 painter.

#[cfg(feature = "desktop")]
pub mod canvas;
pub mod frame;

pub use self::frame::*;
