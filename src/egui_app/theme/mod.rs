//! Theme Module
//!
//! Color scheme and frame builders for the widget panel.

pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
