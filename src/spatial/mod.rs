//! Spatial layer: cell storage, neighbourhoods and row partitioning.

pub mod grid;
pub mod neighbors;
pub mod partition;
