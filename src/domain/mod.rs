//! Domain: what a generation step means, independent of how it is scheduled.

pub mod draws;
pub mod patterns;
pub mod rule;
pub mod seeding;
