//! # UI Module
//!
//! Layout and panels of the HarmonicViz window.

pub mod main_display;
