use rand::rngs::OsRng;
use rand::Rng;

use crate::AppError;

/// Letters (upper and lower case) followed by digits.
pub const DEFAULT_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
pub const DEFAULT_LENGTH: usize = 6;

/// Generates random fixed-length slugs.
///
/// Slugs double as access tokens, so candidates are drawn from the operating
/// system's CSPRNG rather than a seeded generator.
#[derive(Debug, Clone)]
pub struct SlugGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl SlugGenerator {
    pub fn new(alphabet: &str, length: usize) -> crate::AppResult<Self> {
        let chars: Vec<char> = alphabet.chars().collect();

        if chars.is_empty() {
            return Err(AppError::InvalidSlugConfig("alphabet is empty"));
        }
        if length == 0 {
            return Err(AppError::InvalidSlugConfig("length must be positive"));
        }
        if chars.iter().any(|c| c.is_whitespace() || *c == '/') {
            return Err(AppError::InvalidSlugConfig(
                "alphabet may not contain whitespace or '/'",
            ));
        }

        let mut sorted = chars.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != chars.len() {
            return Err(AppError::InvalidSlugConfig(
                "alphabet contains duplicate characters",
            ));
        }

        Ok(SlugGenerator {
            alphabet: chars,
            length,
        })
    }

    /// Produce one candidate slug.
    pub fn generate(&self) -> String {
        let mut rng = OsRng;
        (0..self.length)
            .map(|_| self.alphabet[rng.gen_range(0..self.alphabet.len())])
            .collect()
    }

    /// Number of distinct slugs, saturating at `u128::MAX`.
    pub fn space_size(&self) -> u128 {
        (0..self.length).fold(1u128, |acc, _| {
            acc.saturating_mul(self.alphabet.len() as u128)
        })
    }
}

impl Default for SlugGenerator {
    fn default() -> Self {
        SlugGenerator {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            length: DEFAULT_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid(generator: &SlugGenerator, slug: &str) -> bool {
        slug.chars().count() == generator.length
            && slug.chars().all(|c| generator.alphabet.contains(&c))
    }

    #[test]
    fn default_slugs_have_expected_shape() {
        let generator = SlugGenerator::default();
        for _ in 0..1000 {
            let slug = generator.generate();
            assert_eq!(slug.len(), DEFAULT_LENGTH);
            assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
            assert!(is_valid(&generator, &slug));
        }
    }

    #[test]
    fn default_space_is_62_to_the_6th() {
        assert_eq!(SlugGenerator::default().space_size(), 56_800_235_584);
    }

    #[test]
    fn single_char_space() {
        let generator = SlugGenerator::new("x", 1).unwrap();
        assert_eq!(generator.space_size(), 1);
        assert_eq!(generator.generate(), "x");
    }

    #[test]
    fn custom_alphabet_is_respected() {
        let generator = SlugGenerator::new("ab", 12).unwrap();
        let slug = generator.generate();
        assert_eq!(slug.len(), 12);
        assert!(slug.chars().all(|c| c == 'a' || c == 'b'));
        assert!(!is_valid(&generator, "abc"));
    }

    #[test]
    fn rejects_bad_config() {
        assert!(SlugGenerator::new("", 6).is_err());
        assert!(SlugGenerator::new("abc", 0).is_err());
        assert!(SlugGenerator::new("aab", 6).is_err());
        assert!(SlugGenerator::new("a/b", 6).is_err());
    }

    #[test]
    fn huge_space_saturates() {
        let generator = SlugGenerator::new(DEFAULT_ALPHABET, 64).unwrap();
        assert_eq!(generator.space_size(), u128::MAX);
    }
}
