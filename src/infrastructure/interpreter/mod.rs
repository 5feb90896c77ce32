//! Interpreter probe adapters

pub mod cpython;

pub use cpython::CPythonProbe;
