//! Identity names derived from archived crop filenames.

/// Recover the identity name from an archived crop's file stem.
///
/// Enrollment writes crops as `{name}_{8 hex digits}`; that suffix is
/// stripped when present so a rebuild does not enroll "alice_3fa4b2c1"
/// as a distinct identity. Stems without the suffix are used whole,
/// which keeps hand-labeled images (`bob.jpg`) working.
pub fn entry_name_from_stem(stem: &str) -> &str {
    if let Some((prefix, suffix)) = stem.rsplit_once('_') {
        if !prefix.is_empty()
            && suffix.len() == 8
            && suffix.chars().all(|c| c.is_ascii_hexdigit())
        {
            return prefix;
        }
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_enrollment_suffix() {
        assert_eq!(entry_name_from_stem("alice_3fa4b2c1"), "alice");
    }

    #[test]
    fn test_plain_stem_kept() {
        assert_eq!(entry_name_from_stem("bob"), "bob");
    }

    #[test]
    fn test_non_hex_suffix_kept() {
        assert_eq!(entry_name_from_stem("alice_glasses1"), "alice_glasses1");
    }

    #[test]
    fn test_wrong_length_suffix_kept() {
        assert_eq!(entry_name_from_stem("alice_3fa4"), "alice_3fa4");
    }

    #[test]
    fn test_underscored_name_only_last_suffix_stripped() {
        assert_eq!(entry_name_from_stem("mary_jane_0a1b2c3d"), "mary_jane");
    }

    #[test]
    fn test_bare_suffix_like_stem_kept() {
        // No name before the underscore: nothing to strip to.
        assert_eq!(entry_name_from_stem("_deadbeef"), "_deadbeef");
    }
}
