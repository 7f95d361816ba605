//! Freehand annotation capture: normalizes mouse and touch input into one
//! coordinate space, rasterizes strokes into a density-aware backing store,
//! and exports the result as an encoded image for the host to persist.
//!
//! One [`controller::CaptureController`] per mounted surface; the host feeds
//! it pointer events and binds `clear`/`save` to its own affordances.

pub mod model;
pub mod pointer;

pub mod render;
pub mod surface;
pub mod stroke;

pub mod export;
pub mod controller;

pub mod settings;
pub mod logging;
