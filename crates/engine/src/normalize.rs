//! Text normalization: lowercase, strip non-alphabetic characters, tokenize,
//! drop stopwords, stem. Pure, allocation-only transforms with no runtime
//! resource loading; the stopword list is compiled in.

/// English stopwords removed before feature encoding. Matches the trainer's
/// preprocessing, so normalized serve-time tokens line up with the frozen
/// vocabulary.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "below", "between", "both", "but", "by", "can",
    "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
    "i", "if", "in", "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "nor",
    "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "out", "over", "own",
    "s", "same", "she", "should", "so", "some", "such", "t", "than", "that", "the", "their",
    "them", "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "would", "you", "your", "yours",
];

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Full normalization pipeline. Empty input yields an empty sequence.
/// Idempotent: feeding the output tokens back through changes nothing.
pub fn normalize(text: &str) -> Vec<String> {
    let mut sanitized = String::with_capacity(text.len());
    for character in text.chars() {
        let lowered = character.to_ascii_lowercase();
        if lowered.is_ascii_alphabetic() {
            sanitized.push(lowered);
        } else {
            sanitized.push(' ');
        }
    }

    sanitized
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(stem)
        .filter(|stemmed| !is_stopword(stemmed))
        .collect()
}

/// Suffix-stripping stemmer. One rule's output can land in another rule's
/// domain ("raising" -> "rais" -> plural strip), so the pass is repeated to a
/// fixed point; every pass shortens the word, so this terminates, and a fixed
/// point makes `stem` (and therefore `normalize`) idempotent.
pub fn stem(token: &str) -> String {
    let mut word = token.to_string();
    loop {
        let before = word.len();
        strip_suffix_once(&mut word);
        if word.len() == before {
            return word;
        }
    }
}

fn strip_suffix_once(word: &mut String) {
    if let Some(prefix_len) = word.strip_suffix("sses").map(str::len) {
        word.truncate(prefix_len + 2);
    } else if let Some(prefix_len) = word.strip_suffix("ies").map(str::len) {
        word.truncate(prefix_len + 1);
    } else if word.len() > 3 && word.ends_with('s') && !word.ends_with("ss") {
        word.truncate(word.len() - 1);
    } else if word.len() > 5 && word.ends_with("ing") {
        word.truncate(word.len() - 3);
        collapse_double_consonant(word);
    } else if word.len() > 4 && word.ends_with("ed") {
        word.truncate(word.len() - 2);
        collapse_double_consonant(word);
    } else if word.len() > 4 && word.ends_with("ly") {
        word.truncate(word.len() - 2);
    }
}

// Porter-style cleanup after ing/ed removal ("runn" -> "run"), skipping
// l/s/z whose doubles are legitimate word endings.
fn collapse_double_consonant(word: &mut String) {
    let bytes = word.as_bytes();
    if bytes.len() < 2 {
        return;
    }
    let last = bytes[bytes.len() - 1];
    let prev = bytes[bytes.len() - 2];
    if last == prev && !matches!(last, b'a' | b'e' | b'i' | b'o' | b'u' | b'l' | b's' | b'z') {
        word.truncate(word.len() - 1);
    }
}
