//! Pyforge - CMake build driver for Python native extensions
//!
//! This crate provides the core functionality for locating the Python
//! runtime library a native extension should link against and driving the
//! CMake configure/build that produces the extension module.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, the library locator, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (CPython probe, CMake, config store)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
