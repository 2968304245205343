//! Shared configuration types for revtc.
//!
//! Kept free of parsing logic so report tools can deserialize parser
//! settings and format results without pulling in the decoder.

pub mod boon;
pub mod config;
pub mod formatting;

pub use boon::{BoonDefinition, BoonType, Stacking};
pub use config::ParserConfig;
