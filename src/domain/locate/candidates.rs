//! Candidate library path generation
//!
//! Candidate file names vary along four axes: name prefix, file extension,
//! version suffix, and ABI-flags suffix. The iterator walks the Cartesian
//! product lazily with the prefix as the outermost axis and the ABI suffix
//! as the innermost, so the priority order stays auditable in one place.

use std::path::PathBuf;

use crate::domain::python::PythonVersion;

/// Lazy iterator over candidate Python library paths, in priority order.
///
/// Restartable: cloning yields a fresh iterator over the same sequence.
#[derive(Debug, Clone)]
pub struct CandidatePaths {
    lib_dir: PathBuf,
    prefixes: Vec<&'static str>,
    extensions: Vec<&'static str>,
    versions: Vec<String>,
    abiflags: Vec<String>,
    index: usize,
}

impl CandidatePaths {
    /// Build the axis sets for a search rooted at `lib_dir`.
    ///
    /// `with_dyld` prepends the platform dynamic-library extension.
    /// A `None` version skips version-based filtering: only the bare,
    /// unversioned names are generated.
    pub fn new(
        lib_dir: PathBuf,
        with_dyld: bool,
        version: Option<&PythonVersion>,
        abiflags: &str,
    ) -> Self {
        let mut extensions = vec![".lib", ".so", ".a"];
        if with_dyld {
            extensions.insert(0, ".dylib");
        }

        // Full dotted version first, then the concatenated two-digit form,
        // then unversioned.
        let versions = match version {
            Some(v) => vec![v.dotted(), v.compact(), String::new()],
            None => vec![String::new()],
        };

        let abiflags = if abiflags.is_empty() {
            vec![String::new()]
        } else {
            vec![abiflags.to_string(), String::new()]
        };

        Self {
            lib_dir,
            prefixes: vec!["", "lib"],
            extensions,
            versions,
            abiflags,
            index: 0,
        }
    }

    /// Total number of candidates in the sequence
    pub fn len(&self) -> usize {
        self.prefixes.len() * self.extensions.len() * self.versions.len() * self.abiflags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Iterator for CandidatePaths {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        // Decompose the running index with the ABI axis varying fastest,
        // giving prefix-major, extension-next, version-next, ABI-minor order.
        let mut i = self.index;
        let abi = i % self.abiflags.len();
        i /= self.abiflags.len();
        let ver = i % self.versions.len();
        i /= self.versions.len();
        let ext = i % self.extensions.len();
        i /= self.extensions.len();

        let pre = i;
        if pre >= self.prefixes.len() {
            return None;
        }
        self.index += 1;

        let name = format!(
            "{}python{}{}{}",
            self.prefixes[pre], self.versions[ver], self.abiflags[abi], self.extensions[ext]
        );
        Some(self.lib_dir.join(name))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(candidates: CandidatePaths) -> Vec<String> {
        candidates
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    fn version() -> PythonVersion {
        "3.10".parse().unwrap()
    }

    #[test]
    fn count_is_axis_product() {
        let candidates = CandidatePaths::new(PathBuf::from("/lib"), true, Some(&version()), "m");
        // 2 prefixes x 4 extensions x 3 versions x 2 abiflags
        assert_eq!(candidates.len(), 48);
        assert_eq!(candidates.count(), 48);
    }

    #[test]
    fn prefix_is_the_outermost_axis() {
        let all = names(CandidatePaths::new(
            PathBuf::from("/lib"),
            false,
            Some(&version()),
            "",
        ));
        // All no-prefix candidates come before any "lib"-prefixed one.
        let first_lib = all.iter().position(|n| n.starts_with("lib")).unwrap();
        assert!(all[..first_lib].iter().all(|n| !n.starts_with("lib")));
        assert_eq!(first_lib, all.len() / 2);
    }

    #[test]
    fn full_version_precedes_compact_precedes_empty() {
        let all = names(CandidatePaths::new(
            PathBuf::from("/lib"),
            false,
            Some(&version()),
            "",
        ));
        let full = all.iter().position(|n| n == "python3.10.lib").unwrap();
        let compact = all.iter().position(|n| n == "python310.lib").unwrap();
        let bare = all.iter().position(|n| n == "python.lib").unwrap();
        assert!(full < compact);
        assert!(compact < bare);
    }

    #[test]
    fn dylib_extension_leads_when_dyld_enabled() {
        let all = names(CandidatePaths::new(
            PathBuf::from("/lib"),
            true,
            Some(&version()),
            "",
        ));
        assert_eq!(all[0], "python3.10.dylib");

        let without = names(CandidatePaths::new(
            PathBuf::from("/lib"),
            false,
            Some(&version()),
            "",
        ));
        assert_eq!(without[0], "python3.10.lib");
        assert!(!without.iter().any(|n| n.ends_with(".dylib")));
    }

    #[test]
    fn abiflags_candidate_precedes_bare_candidate() {
        let all = names(CandidatePaths::new(
            PathBuf::from("/lib"),
            false,
            Some(&version()),
            "m",
        ));
        let flagged = all.iter().position(|n| n == "python3.10m.lib").unwrap();
        let bare = all.iter().position(|n| n == "python3.10.lib").unwrap();
        assert_eq!(flagged + 1, bare);
    }

    #[test]
    fn no_version_generates_only_unversioned_names() {
        let all = names(CandidatePaths::new(PathBuf::from("/lib"), false, None, ""));
        assert_eq!(all, vec!["python.lib", "python.so", "python.a",
            "libpython.lib", "libpython.so", "libpython.a"]);
    }

    #[test]
    fn clone_restarts_the_sequence() {
        let mut candidates =
            CandidatePaths::new(PathBuf::from("/lib"), false, Some(&version()), "");
        let fresh = candidates.clone();
        let first = candidates.next().unwrap();
        candidates.for_each(drop);
        assert_eq!(fresh.clone().next().unwrap(), first);
        assert_eq!(names(fresh).len(), 18);
    }

    #[test]
    fn candidates_live_under_the_library_dir() {
        let mut candidates =
            CandidatePaths::new(PathBuf::from("/opt/py/lib"), false, Some(&version()), "");
        let first = candidates.next().unwrap();
        assert_eq!(first, PathBuf::from("/opt/py/lib/python3.10.lib"));
    }
}
