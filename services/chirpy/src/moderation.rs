//! Profanity filter applied to chirp bodies before they are stored

/// Words that are redacted from chirps
const BAD_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Replacement written in place of a redacted word
const REDACTION: &str = "****";

/// Replace every space-separated word whose lowercase form is a bad word.
///
/// Words are split on a single ASCII space, so punctuation glued to a word
/// (`Sharbert!`) keeps it from matching and runs of spaces survive untouched.
pub fn clean_bad_words(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if BAD_WORDS.contains(&word.to_lowercase().as_str()) {
                REDACTION
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_bad_words() {
        assert_eq!(clean_bad_words("I love coding in go"), "I love coding in go");
    }

    #[test]
    fn test_single_bad_word() {
        assert_eq!(clean_bad_words("this is a kerfuffle"), "this is a ****");
    }

    #[test]
    fn test_multiple_bad_words_and_casing() {
        assert_eq!(
            clean_bad_words("Fornax and Sharbert are banned"),
            "**** and **** are banned"
        );
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(clean_bad_words(""), "");
    }

    #[test]
    fn test_punctuation_prevents_match() {
        let body = "Sharbert! that was an awesome Fornax@";
        assert_eq!(clean_bad_words(body), body);
    }

    #[test]
    fn test_whitespace_is_preserved() {
        assert_eq!(clean_bad_words("  kerfuffle  x "), "  ****  x ");
        // tabs are not separators
        assert_eq!(clean_bad_words("a\tfornax"), "a\tfornax");
    }

    #[test]
    fn test_idempotent() {
        for body in [
            "hi kerfuffle",
            "KERFUFFLE sharbert fornax",
            "nothing to see here",
            " ",
            "",
        ] {
            let once = clean_bad_words(body);
            assert_eq!(clean_bad_words(&once), once);
        }
    }
}
