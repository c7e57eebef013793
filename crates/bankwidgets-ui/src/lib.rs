//! Bank Widgets UI Components
//!
//! Dioxus primitives the account and transfer widgets are built from.
//!
//! ## Design Notes
//!
//! - **Primary buttons** carry the main action of a form (link, verify)
//! - **Text buttons** are secondary (cancel, remove)
//! - Errors render as a danger banner above the form they belong to
//! - Money inputs keep the raw text the user typed; parsing happens in core

pub mod components;

pub use components::*;
