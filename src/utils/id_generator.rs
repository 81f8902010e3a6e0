//! Short token generation and validation.
//!
//! Tokens are drawn from a seeded generator so that two processes started with
//! the same seed mint the same sequence. This is for reproducible test runs and
//! offers no unpredictability guarantees.

use base64::Engine as _;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use regex::Regex;
use std::sync::{LazyLock, Mutex, PoisonError};

/// Length of random bytes before base64 encoding.
const TOKEN_LENGTH_BYTES: usize = 9;

/// Character class accepted for short tokens.
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Seeded generator of URL-safe short tokens.
///
/// Constructed once at startup and shared by reference. The generator makes no
/// uniqueness promise; [`crate::application::services::LinkService`] checks
/// every candidate against the store.
#[derive(Debug)]
pub struct IdGenerator {
    rng: Mutex<StdRng>,
}

impl IdGenerator {
    /// Creates a generator whose token sequence is fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Produces the next token in the sequence.
    ///
    /// Encodes 9 random bytes as URL-safe base64 without padding, yielding a
    /// 12-character token matching `[A-Za-z0-9_-]+`.
    pub fn generate(&self) -> String {
        let mut buffer = [0u8; TOKEN_LENGTH_BYTES];

        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fill_bytes(&mut buffer);

        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
    }

    /// Advances the sequence past `count` tokens without producing them.
    ///
    /// A restarted process resumes where the previous one stopped by skipping
    /// the tokens already issued to the store.
    pub fn skip(&self, count: u64) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let mut buffer = [0u8; TOKEN_LENGTH_BYTES];

        for _ in 0..count {
            rng.fill_bytes(&mut buffer);
        }
    }
}

/// Returns true if `token` only contains shortcode characters.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_token("aZ09_-"));
/// assert!(!is_valid_token("abc.def"));
/// assert!(!is_valid_token(""));
/// ```
pub fn is_valid_token(token: &str) -> bool {
    TOKEN_REGEX.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_has_correct_length() {
        let generator = IdGenerator::new(1);
        assert_eq!(generator.generate().len(), 12);
    }

    #[test]
    fn test_generate_url_safe_characters() {
        let generator = IdGenerator::new(1);

        for _ in 0..100 {
            let token = generator.generate();
            assert!(is_valid_token(&token), "token '{}' is not url-safe", token);
            assert!(!token.contains('='));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = IdGenerator::new(42);
        let b = IdGenerator::new(42);

        let seq_a: Vec<String> = (0..20).map(|_| a.generate()).collect();
        let seq_b: Vec<String> = (0..20).map(|_| b.generate()).collect();

        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = IdGenerator::new(1);
        let b = IdGenerator::new(2);

        assert_ne!(a.generate(), b.generate());
    }

    #[test]
    fn test_generate_produces_unique_tokens() {
        let generator = IdGenerator::new(7);
        let tokens: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();

        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_skip_resumes_sequence() {
        let fresh = IdGenerator::new(42);
        let issued: Vec<String> = (0..5).map(|_| fresh.generate()).collect();
        let next = fresh.generate();

        let resumed = IdGenerator::new(42);
        resumed.skip(issued.len() as u64);

        assert_eq!(resumed.generate(), next);
    }

    #[test]
    fn test_valid_tokens() {
        assert!(is_valid_token("abc123"));
        assert!(is_valid_token("A-B_c"));
        assert!(is_valid_token("-"));
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(!is_valid_token(""));
        assert!(!is_valid_token("abc.def"));
        assert!(!is_valid_token("abc def"));
        assert!(!is_valid_token("abc$"));
        assert!(!is_valid_token("über"));
    }
}
