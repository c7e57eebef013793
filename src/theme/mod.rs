//! Theme for the desktop widgets.

mod styles;

pub use styles::GLOBAL_STYLES;
