//! Stable utilities.
//!
//! Everything in here keeps its shape across toolkit releases: logging
//! setup, geometry and region helpers, and the edges bitmask. None of it
//! touches the toolkit's volatile object layout.

pub mod edges;
pub mod geometry;
pub mod logging;
pub mod region;
