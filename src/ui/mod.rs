//! Terminal User Interface module.
//!
//! This module provides the TUI for the essay browser, including:
//! - Main event loop (`run`)
//! - Key and mouse input handling for the list, essay overlay and search box
//! - Rendering of the toolbar, card list, overlay, status bar and help
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard and mouse input handling
//! - `render` - Frame layout and overlay stacking
//! - `toolbar` - Header, category filter bar and search box
//! - `cards` - Essay card list widget
//! - `detail` - Essay overlay widget
//! - `status` - Status bar widget
//! - `help` - Keybinding help overlay

mod cards;
mod detail;
mod help;
mod input;
mod loop_runner;
mod render;
mod status;
mod toolbar;

// Re-export the public API
pub use loop_runner::{run, Action};
