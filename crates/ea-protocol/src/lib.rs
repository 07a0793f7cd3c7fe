pub mod action;
pub mod intent;
pub mod plan;
pub mod window;

pub use action::*;
pub use intent::*;
pub use plan::*;
pub use window::*;
