pub mod config;

pub use config::{Settings, parse_properties};
