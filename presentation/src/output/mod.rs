//! Live event rendering

pub mod console;
pub mod formatter;
pub mod json;
pub mod observer;
