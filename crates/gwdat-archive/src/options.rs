//! Load options.

use crate::deframe::ChecksumPolicy;

/// Options controlling how an archive is validated and read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Require the `.dat` extension when opening by path.
    pub check_extension: bool,
    /// Require the known header and manifest identifier bytes.
    pub check_identity: bool,
    /// Checksum handling when deframing payloads.
    pub checksums: ChecksumPolicy,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            check_extension: true,
            check_identity: true,
            checksums: ChecksumPolicy::Skip,
        }
    }
}

impl ArchiveOptions {
    /// Set whether the file extension is checked.
    pub fn with_extension_check(mut self, check: bool) -> Self {
        self.check_extension = check;
        self
    }

    /// Set whether identifier bytes are checked.
    pub fn with_identity_check(mut self, check: bool) -> Self {
        self.check_identity = check;
        self
    }

    /// Set the checksum policy used by deframing.
    pub fn with_checksums(mut self, policy: ChecksumPolicy) -> Self {
        self.checksums = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_strict_but_skip_checksums() {
        let options = ArchiveOptions::default();
        assert!(options.check_extension);
        assert!(options.check_identity);
        assert_eq!(options.checksums, ChecksumPolicy::Skip);
    }

    #[test]
    fn test_setters_chain() {
        let options = ArchiveOptions::default()
            .with_extension_check(false)
            .with_identity_check(false)
            .with_checksums(ChecksumPolicy::Verify);

        assert!(!options.check_extension);
        assert!(!options.check_identity);
        assert_eq!(options.checksums, ChecksumPolicy::Verify);
    }
}
