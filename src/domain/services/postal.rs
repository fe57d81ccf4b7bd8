pub const ZIP_LENGTH: usize = 5;

/// Replacement for codes that are too short to be salvaged.
pub const INVALID_ZIP: &str = "0";

/// Normalizes a postal code to five characters.
///
/// Shorter values are replaced by `"0"` (not padded), longer values are cut
/// to their first five bytes. The cut never splits a UTF-8 character.
pub fn validate_zip(zip: &str) -> String {
    if zip.len() < ZIP_LENGTH {
        return INVALID_ZIP.to_string();
    }

    let mut end = ZIP_LENGTH;
    while !zip.is_char_boundary(end) {
        end -= 1;
    }
    zip[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_zip_is_replaced() {
        assert_eq!(validate_zip("123"), "0");
        assert_eq!(validate_zip("1234"), "0");
        assert_eq!(validate_zip(""), "0");
    }

    #[test]
    fn test_long_zip_is_truncated() {
        assert_eq!(validate_zip("123456"), "12345");
        assert_eq!(validate_zip("94107-1234"), "94107");
    }

    #[test]
    fn test_exact_zip_is_unchanged_and_idempotent() {
        assert_eq!(validate_zip("12345"), "12345");
        assert_eq!(validate_zip(&validate_zip("12345")), "12345");
        assert_eq!(validate_zip(&validate_zip("123456789")), "12345");
    }

    #[test]
    fn test_digits_are_not_checked() {
        assert_eq!(validate_zip("ABCDE"), "ABCDE");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // "1234é" 為 6 bytes，第 5 個 byte 落在 é 的中間
        assert_eq!(validate_zip("1234é"), "1234");
    }
}
