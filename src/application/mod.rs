//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod build_ext;
pub mod ports;

// Re-export use cases
pub use build_ext::{
    BuildCallbacks, BuildExtError, BuildExtensionUseCase, BuildInput, BuildOutput, MacosSettings,
};
