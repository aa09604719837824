//! Local token estimates.
//!
//! A rough four-bytes-per-token heuristic, good enough to compare a raw
//! payload against its compressed form without a tokenizer.

use serde::Serialize;

const BYTES_PER_TOKEN: usize = 4;

/// Estimated token count of `text`.
pub fn estimate_tokens(text: &str) -> usize {
    text.len().div_ceil(BYTES_PER_TOKEN)
}

/// Estimated token count of a value's compact JSON form.
pub fn estimate_json_tokens<T: Serialize + ?Sized>(value: &T) -> crate::Result<usize> {
    let json = serde_json::to_string(value)?;
    Ok(estimate_tokens(&json))
}

/// Raw versus optimized token counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TokenComparison {
    pub raw: usize,
    pub optimized: usize,
}

impl TokenComparison {
    pub fn new(raw: usize, optimized: usize) -> Self {
        Self { raw, optimized }
    }

    /// Compare two texts.
    pub fn of_texts(raw: &str, optimized: &str) -> Self {
        Self::new(estimate_tokens(raw), estimate_tokens(optimized))
    }

    /// Tokens saved; zero when the optimized form is larger.
    pub fn saved(&self) -> usize {
        self.raw.saturating_sub(self.optimized)
    }

    /// Fraction of raw tokens saved, in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.raw == 0 {
            return 0.0;
        }
        self.saved() as f64 / self.raw as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_estimate_tokens_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abc"), 1);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }

    #[test]
    fn test_estimate_json_tokens() {
        // {"a":1} is 7 bytes
        assert_eq!(estimate_json_tokens(&json!({"a": 1})).unwrap(), 2);
    }

    #[test]
    fn test_comparison() {
        let cmp = TokenComparison::new(200, 50);
        assert_eq!(cmp.saved(), 150);
        assert!((cmp.ratio() - 0.75).abs() < f64::EPSILON);

        let grew = TokenComparison::new(10, 12);
        assert_eq!(grew.saved(), 0);
        assert_eq!(grew.ratio(), 0.0);

        assert_eq!(TokenComparison::default().ratio(), 0.0);
    }
}
