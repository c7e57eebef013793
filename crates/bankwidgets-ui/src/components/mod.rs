//! Reusable UI components.

mod button;
mod feedback;
mod input;
mod modal;

pub use button::*;
pub use feedback::*;
pub use input::*;
pub use modal::*;
