//! Password strength policy for new accounts.

/// Minimum accepted password length, in bytes.
const MIN_LENGTH: usize = 12;

/// Known-weak fragments. This is a case-sensitive substring check against
/// two literals, not a dictionary lookup; "Password123" or "qwerty124" pass
/// it untouched.
const WEAK_FRAGMENTS: [&str; 2] = ["password123", "qwerty123"];

/// Special characters, at least one of which must be present.
const SPECIAL_CHARS: &str = "!@#$%";

/// Check a password against the fixed strength policy.
///
/// Accepts only passwords of at least 12 bytes containing an ASCII
/// uppercase letter, a lowercase letter, a digit and one of `!@#$%`, with
/// neither weak fragment as a substring. Pure and deterministic.
pub fn is_strong_password(password: &str) -> bool {
    if password.len() < MIN_LENGTH {
        return false;
    }
    if WEAK_FRAGMENTS.iter().any(|weak| password.contains(weak)) {
        return false;
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return false;
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return false;
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_passwords_rejected() {
        assert!(!is_strong_password(""));
        assert!(!is_strong_password("Ab1!"));
        assert!(!is_strong_password("Abcdef1!234")); // 11 bytes
    }

    #[test]
    fn weak_fragments_rejected_regardless_of_strength() {
        assert!(!is_strong_password("Xpassword123!Y9z"));
        assert!(!is_strong_password("Aqwerty123#Bc9"));
    }

    #[test]
    fn weak_fragment_check_is_case_sensitive() {
        // The policy only bans the exact lowercase literals.
        assert!(is_strong_password("XPassword123!Yz"));
        assert!(is_strong_password("Qwerty124!abcd"));
    }

    #[test]
    fn all_character_classes_required() {
        assert!(is_strong_password("Abcdef1!2345"));
        assert!(!is_strong_password("abcdef12345!")); // no uppercase
        assert!(!is_strong_password("ABCDEF12345!")); // no lowercase
        assert!(!is_strong_password("Abcdefgh!jkl")); // no digit
        assert!(!is_strong_password("Abcdef123456")); // no special
    }

    #[test]
    fn each_listed_special_char_counts() {
        for c in SPECIAL_CHARS.chars() {
            let password = format!("Abcdef12345{}", c);
            assert!(is_strong_password(&password), "rejected special {:?}", c);
        }
        // A special character outside the fixed set does not count.
        assert!(!is_strong_password("Abcdef12345^"));
    }
}
