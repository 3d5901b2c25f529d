//! # Widgets Module
//!
//! Canvas widgets drawn by hand: the vibrating string and the cents gauge.

pub mod cent_meter;
pub mod string_view;
