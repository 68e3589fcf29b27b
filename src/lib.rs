//! quire: a terminal browser for a static collection of essays.
//!
//! The [`controller::ViewController`] owns all browse state and pushes view
//! models to a [`surface::RenderSurface`]. The terminal front end in [`ui`]
//! and the `--print` renderer in [`print`] are two surfaces over the same
//! controller.

pub mod app;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod keybindings;
pub mod preferences;
pub mod print;
pub mod surface;
pub mod theme;
pub mod ui;
pub mod util;
