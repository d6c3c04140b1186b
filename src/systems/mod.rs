//! Systems: the machinery that advances a grid.

pub mod scheduler;
