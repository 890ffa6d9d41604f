//! Per-file eligibility check.

use usage_common::Alert;

/// Decides whether a submitted file should be processed at all.
///
/// Pure predicate, no side effects. A skipped file is reported as an
/// informational alert, never an error.
#[derive(Debug, Clone)]
pub struct FileGate {
    allowed_extensions: Vec<String>,
}

impl FileGate {
    /// Create a gate accepting the given extensions (lowercase, no dot).
    pub fn new(allowed_extensions: Vec<String>) -> Self {
        Self { allowed_extensions }
    }

    /// Return the skip reason for a file, or `None` to process it.
    ///
    /// Empty content wins over extension checks, matching the order the
    /// reasons are reported in.
    pub fn should_skip(&self, filename: &str, content: &[u8]) -> Option<Alert> {
        if content.is_empty() {
            return Some(Alert::EmptyFile {
                filename: filename.to_string(),
            });
        }

        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        let accepted = extension
            .as_deref()
            .is_some_and(|ext| self.allowed_extensions.iter().any(|a| a == ext));

        if !accepted {
            return Some(Alert::UnsupportedExtension {
                filename: filename.to_string(),
            });
        }

        None
    }
}
