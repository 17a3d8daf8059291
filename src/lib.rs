//! City layout generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod city;
pub mod config;
pub mod error;
pub mod export;
pub mod survey;
pub mod tilemap;

pub use city::{generate, generate_with, GeneratedCity};
pub use config::{CityConfig, MapSizePreset};
pub use error::CityError;
