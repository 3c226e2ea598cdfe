//! Bag-of-words feature encoding against the frozen vocabulary.

use banter_core::Vocabulary;

/// Encode normalized tokens as a fixed-length binary vector, one entry per
/// vocabulary position: 1.0 if that vocabulary token appears anywhere in the
/// input (order- and multiplicity-insensitive), else 0.0.
///
/// Out-of-vocabulary tokens are silently ignored. That is a deliberate
/// information-loss boundary: words the trainer never saw are invisible to
/// the classifier, and the escalation policy compensates with confidence
/// thresholds and rule overrides.
pub fn encode(tokens: &[String], vocabulary: &Vocabulary) -> Vec<f32> {
    vocabulary
        .tokens()
        .iter()
        .map(|word| if tokens.iter().any(|token| token == word) { 1.0 } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use banter_core::Vocabulary;

    use super::encode;

    fn vocab(words: &[&str]) -> Vocabulary {
        Vocabulary::new(words.iter().map(|w| w.to_string()).collect())
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn marks_present_vocabulary_positions() {
        let vocabulary = vocab(&["weather", "joke", "time"]);
        let bag = encode(&tokens(&["joke", "weather"]), &vocabulary);
        assert_eq!(bag, vec![1.0, 1.0, 0.0]);
    }

    #[test]
    fn vector_length_always_matches_the_vocabulary() {
        let vocabulary = vocab(&["weather", "joke", "time"]);
        assert_eq!(encode(&[], &vocabulary).len(), 3);
        assert_eq!(encode(&tokens(&["unrelated"]), &vocabulary).len(), 3);
    }

    #[test]
    fn out_of_vocabulary_tokens_are_invisible() {
        let vocabulary = vocab(&["weather"]);
        let bag = encode(&tokens(&["quantum", "chromodynamics"]), &vocabulary);
        assert_eq!(bag, vec![0.0]);
    }

    #[test]
    fn repeated_tokens_do_not_change_the_encoding() {
        let vocabulary = vocab(&["joke", "funny"]);
        let once = encode(&tokens(&["joke"]), &vocabulary);
        let thrice = encode(&tokens(&["joke", "joke", "joke"]), &vocabulary);
        assert_eq!(once, thrice);
    }

    #[test]
    fn encoding_is_deterministic() {
        let vocabulary = vocab(&["weather", "london", "rain"]);
        let input = tokens(&["rain", "london"]);
        assert_eq!(encode(&input, &vocabulary), encode(&input, &vocabulary));
    }
}
