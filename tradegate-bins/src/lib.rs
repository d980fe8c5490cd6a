//! Command-line tools around `tradegate-core`

pub mod common;
pub mod replay;
