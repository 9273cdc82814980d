pub type Validator = fn(&str) -> bool;

/// Passwords must be longer than this after trimming.
pub const PASSWORD_MIN_EXCLUSIVE: usize = 6;

pub fn validate_email(value: &str) -> bool {
    value.contains('@')
}

pub fn validate_password(value: &str) -> bool {
    value.trim().chars().count() > PASSWORD_MIN_EXCLUSIVE
}

#[cfg(test)]
mod tests {
    use super::{validate_email, validate_password};

    #[test]
    fn email_requires_at_sign_anywhere() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("@"));
        assert!(validate_email("trailing@"));
        assert!(!validate_email("noatsign"));
        assert!(!validate_email(""));
    }

    #[test]
    fn password_counts_trimmed_chars() {
        assert!(!validate_password("short"));
        assert!(!validate_password("123456"));
        assert!(validate_password("1234567"));
        assert!(!validate_password("   123456   "));
        assert!(validate_password("  longenough1  "));
        assert!(!validate_password(""));
    }

    #[test]
    fn password_length_is_measured_in_chars_not_bytes() {
        // Three two-byte chars: six bytes, three chars.
        assert!(!validate_password("ééé"));
        assert!(validate_password("ééééééé"));
    }

    #[test]
    fn rules_agree_with_their_definitions_over_samples() {
        let samples = [
            "", " ", "@", "a@", " @ ", "abcdefg", "abcdef", "\tabcdefg\n", "x@y", "日本語のパスワード",
        ];
        for s in samples {
            assert_eq!(validate_email(s), s.contains('@'), "email rule for {s:?}");
            assert_eq!(
                validate_password(s),
                s.trim().chars().count() > 6,
                "password rule for {s:?}"
            );
        }
    }
}
