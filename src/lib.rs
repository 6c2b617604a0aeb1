pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod review;
pub mod scanner;

pub use fridge_buddy_common as common;
