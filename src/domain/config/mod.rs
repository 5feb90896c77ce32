//! Configuration value objects

pub mod forge_config;

pub use forge_config::{BuildProfile, ForgeConfig, MacosConfig};
