//! Native build runner adapters

pub mod cmake;

pub use cmake::CmakeRunner;
