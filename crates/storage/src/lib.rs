#![warn(clippy::pedantic)]

mod anchors;
mod dto;
mod json_file;

pub use anchors::JsonAnchors;
pub use dto::DataError;
pub use json_file::{Files, JsonStorage};

#[cfg(test)]
mod tests;
