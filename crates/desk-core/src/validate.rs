//! Field validators for the registration form.
//!
//! Pure predicates. Empty strings are invalid usernames/passwords; whether an
//! error is *shown* for an untouched field is a form display concern.

use std::sync::LazyLock;

use regex::Regex;

/// Special characters a password may use to satisfy the symbol rule.
pub const PASSWORD_SPECIALS: &[char] = &['!', '@', '#', '$', '%'];

pub const USERNAME_HINT: &str =
    "4 to 24 characters. Must begin with a letter. Letters, numbers, underscores, hyphens allowed.";
pub const PASSWORD_HINT: &str =
    "8 to 24 characters. Must include uppercase and lowercase letters, a number and a special character. Allowed special characters: ! @ # $ %";
pub const CONFIRM_HINT: &str = "Must match the first password input field.";

static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]{3,23}$").unwrap_or_else(|_| unreachable!())
});

/// Any 8-24 characters except line terminators.
static PASSWORD_LEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\n\r\x{2028}\x{2029}]{8,24}$").unwrap_or_else(|_| unreachable!())
});

/// Starts with a letter, 4-24 characters total, rest letters/digits/`_`/`-`.
pub fn is_valid_username(s: &str) -> bool {
    USERNAME_RE.is_match(s)
}

/// 8-24 characters with a lowercase letter, an uppercase letter, a digit and
/// one of `PASSWORD_SPECIALS`.
pub fn is_valid_password(s: &str) -> bool {
    PASSWORD_LEN_RE.is_match(s)
        && s.chars().any(|c| c.is_ascii_lowercase())
        && s.chars().any(|c| c.is_ascii_uppercase())
        && s.chars().any(|c| c.is_ascii_digit())
        && s.chars().any(|c| PASSWORD_SPECIALS.contains(&c))
}

/// Two empty strings match; callers combine this with `is_valid_password`.
pub fn passwords_match(a: &str, b: &str) -> bool {
    a == b
}

/// Validity of the current draft, derived on every edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityFlags {
    pub username_valid: bool,
    pub password_valid: bool,
    pub passwords_match: bool,
}

impl ValidityFlags {
    pub fn derive(username: &str, password: &str, confirm: &str) -> Self {
        Self {
            username_valid: is_valid_username(username),
            password_valid: is_valid_password(password),
            passwords_match: passwords_match(password, confirm),
        }
    }

    pub fn all_valid(&self) -> bool {
        self.username_valid && self.password_valid && self.passwords_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_usernames_are_invalid() {
        for s in ["", "a", "ab", "abc", "Ab1"] {
            assert!(!is_valid_username(s), "{s:?} should be too short");
        }
    }

    #[test]
    fn usernames_must_start_with_a_letter() {
        for s in ["1abcd", "_abcd", "-abcd", " abcd", "éabcd"] {
            assert!(!is_valid_username(s), "{s:?} should be rejected");
        }
    }

    #[test]
    fn every_allowed_length_is_accepted() {
        for len in 4..=24 {
            let s = format!("a{}", "b_-9".repeat(6)).chars().take(len).collect::<String>();
            assert_eq!(s.chars().count(), len);
            assert!(is_valid_username(&s), "{s:?} should be valid");
        }
        assert!(!is_valid_username(&format!("a{}", "b".repeat(24))));
    }

    #[test]
    fn usernames_reject_other_characters() {
        for s in ["abc d", "abcd!", "abc.d", "abcd\n", "ab[cd", "ab^cd"] {
            assert!(!is_valid_username(s), "{s:?} should be rejected");
        }
        assert!(is_valid_username("Zed-42_x"));
    }

    #[test]
    fn password_with_every_class_is_valid() {
        for s in ["Aa1!aaaa", "Aa1@Aa1#", "xY9$xY9$xY9$xY9$xY9$xY9%", "Aa1%    "] {
            assert!(is_valid_password(s), "{s:?} should be valid");
        }
    }

    #[test]
    fn removing_any_class_invalidates() {
        // Each replacement drops exactly one required class from "Aa1!aaaa".
        for s in ["aa1!aaaa", "AA1!AAAA", "Aab!aaaa", "Aa1aaaaa"] {
            assert!(!is_valid_password(s), "{s:?} should be invalid");
        }
    }

    #[test]
    fn password_length_bounds() {
        assert!(!is_valid_password("Aa1!aaa"));
        assert!(is_valid_password(&format!("Aa1!{}", "a".repeat(20))));
        assert!(!is_valid_password(&format!("Aa1!{}", "a".repeat(21))));
        assert!(!is_valid_password(""));
    }

    #[test]
    fn password_rejects_line_breaks() {
        assert!(!is_valid_password("Aa1!aaaa\naa"));
        assert!(!is_valid_password("Aa1!\raaaa"));
    }

    #[test]
    fn other_symbols_do_not_count_as_special() {
        assert!(!is_valid_password("Aa1^aaaa"));
        assert!(!is_valid_password("Aa1&aaaa"));
    }

    #[test]
    fn match_is_plain_equality() {
        assert!(passwords_match("", ""));
        assert!(passwords_match("Aa1!aaaa", "Aa1!aaaa"));
        assert!(!passwords_match("Aa1!aaaa", "Aa1!aaab"));
        assert!(!passwords_match("a", ""));
    }

    #[test]
    fn derive_reports_each_field() {
        let flags = ValidityFlags::derive("abcd", "Aa1!aaaa", "Aa1!aaaa");
        assert!(flags.all_valid());

        let flags = ValidityFlags::derive("abc", "Aa1!aaaa", "nope");
        assert_eq!(
            flags,
            ValidityFlags {
                username_valid: false,
                password_valid: true,
                passwords_match: false,
            }
        );
        assert!(!flags.all_valid());

        // Empty password and confirm "match" but the password itself fails.
        assert!(!ValidityFlags::derive("abcd", "", "").all_valid());
    }
}
