//! Command implementations

mod down;
mod up;
mod validate;

pub use down::down;
pub use up::up;
pub use validate::validate;
