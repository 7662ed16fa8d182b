//! Short code generation and validation utilities.
//!
//! Short codes key the mapping store and form the path of synthesized redirect
//! links, so they are kept to a fixed length and a URL-safe alphabet.

use rand::Rng;

/// Length of a generated short code.
pub const CODE_LENGTH: usize = 8;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a random short code.
///
/// # Format
///
/// - Length: 8 characters
/// - Character set: A-Z, a-z, 0-9
///
/// Uniqueness is not guaranteed here; callers check the code against the
/// store before using it.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Returns true if `code` has the shape of a generated short code.
///
/// Used when loading a mapping file to drop keys that could never have been
/// produced by [`generate_code`].
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_alphanumeric_only() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generate_code_is_random() {
        let codes: HashSet<_> = (0..1000).map(|_| generate_code()).collect();
        // 62^8 possibilities; a handful of duplicates would already be suspicious.
        assert!(codes.len() > 990);
    }

    #[test]
    fn test_generated_codes_are_valid() {
        assert!(is_valid_code(&generate_code()));
    }

    #[test]
    fn test_validate_accepts_mixed_case() {
        assert!(is_valid_code("Ab12Cd34"));
        assert!(is_valid_code("ZZZZZZZZ"));
        assert!(is_valid_code("00000000"));
    }

    #[test]
    fn test_validate_rejects_wrong_length() {
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("abc123"));
        assert!(!is_valid_code("abcdefghi"));
    }

    #[test]
    fn test_validate_rejects_symbols() {
        assert!(!is_valid_code("abc-1234"));
        assert!(!is_valid_code("abc_1234"));
        assert!(!is_valid_code("abc 1234"));
        assert!(!is_valid_code("ab\u{e9}12345"));
    }
}
