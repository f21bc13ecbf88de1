//! Color Constants
//!
//! Warm brown/tan palette for the widget panel.

use eframe::egui::Color32;

/// Top bar background - Dark brown
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x3E, 0x2A, 0x24);

/// Record list background - Dark brown
pub const RECORD_LIST_BG: Color32 = Color32::from_rgb(0x3A, 0x27, 0x21);

/// Selected record - Lighter brown
pub const SELECTED_ITEM: Color32 = Color32::from_rgb(0x5C, 0x3A, 0x2C);

/// Main panel background - Off-white
pub const MAIN_BG: Color32 = Color32::from_rgb(0xF7, 0xF2, 0xEC);

/// Preview area background - Light tan
pub const PREVIEW_BG: Color32 = Color32::from_rgb(0xEA, 0xDB, 0xC8);

/// Preview border - Muted brown
pub const PREVIEW_BORDER: Color32 = Color32::from_rgb(0xC7, 0xB2, 0x9A);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF0, 0xE0, 0xD6);

/// Text on light backgrounds
pub const TEXT_DARK: Color32 = Color32::from_rgb(0x2F, 0x1E, 0x1A);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x8B, 0x7B, 0x6B);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x73, 0x73);

/// Error banner background
pub const ERROR_BG: Color32 = Color32::from_rgb(0xC6, 0x28, 0x28);

/// Warning color - Orange
pub const WARNING: Color32 = Color32::from_rgb(0xFF, 0xA7, 0x26);

/// Button primary background
pub const BUTTON_PRIMARY: Color32 = Color32::from_rgb(0x5C, 0x3A, 0x2C);
