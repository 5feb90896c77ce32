//! Python runtime library location
//!
//! Resolves the library a native extension build should link against. The
//! snapshot is taken once at the call site; this module performs nothing but
//! read-only existence probes against it, so results are reproducible for a
//! given snapshot and filesystem state.

pub mod candidates;

use std::path::{Path, PathBuf};

use crate::domain::python::{PythonVersion, SysconfigSnapshot};

pub use candidates::CandidatePaths;

/// Locate the Python runtime library for the interpreter described by
/// `snapshot`.
///
/// Fast path: when the interpreter's primary `LIBRARY` value is already a
/// usable dynamic reference it is returned unchanged. Otherwise candidate
/// names are probed in priority order under the resolved library directory.
///
/// Returns `None` when nothing suitable exists. A miss is not an error
/// here: the downstream link step is the authority on whether absence is
/// fatal.
pub fn locate(snapshot: &SysconfigSnapshot, version: Option<&PythonVersion>) -> Option<PathBuf> {
    if let Some(library) = snapshot.library.as_deref() {
        if !is_static_archive(library) {
            return Some(PathBuf::from(library));
        }
    }

    let lib_dir = resolve_lib_dir(snapshot)?;
    CandidatePaths::new(lib_dir, snapshot.with_dyld, version, &snapshot.abiflags)
        .find(|candidate| candidate.is_file())
}

/// Whether a library reference names a static archive
fn is_static_archive(library: &str) -> bool {
    Path::new(library)
        .extension()
        .is_some_and(|ext| ext == "a")
}

/// Resolve the directory to search for candidate libraries.
///
/// `LIBDIR` wins, extended by the multiarch subdirectory when the platform
/// declares one. Without `LIBDIR`, falls back to the `libs` directory next
/// to `LIBDEST` (the Windows/virtualenv layout). With neither configured
/// the search has no root and resolution fails.
fn resolve_lib_dir(snapshot: &SysconfigSnapshot) -> Option<PathBuf> {
    if let Some(libdir) = &snapshot.libdir {
        let mut dir = libdir.clone();
        if snapshot.multiarch.as_deref().is_some_and(|m| !m.is_empty()) {
            if let Some(masd) = snapshot
                .multiarch_subdir
                .as_deref()
                .filter(|m| !m.is_empty())
            {
                let stripped = masd
                    .strip_prefix(std::path::MAIN_SEPARATOR)
                    .unwrap_or(masd);
                dir.push(stripped);
            }
        }
        return Some(dir);
    }

    snapshot
        .libdest
        .as_ref()
        .and_then(|dest| dest.parent())
        .map(|parent| parent.join("libs"))
}
