//! Utility modules for moodmix

pub mod dates;
pub mod json;
