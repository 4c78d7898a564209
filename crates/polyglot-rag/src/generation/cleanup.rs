//! Post-processing of raw model output

use regex::Regex;
use std::sync::OnceLock;

/// Prefix some models echo before the answer
const ANSWER_PREFIX: &str = "Helpful Answer:";

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"http\S+|www\S+").expect("Invalid regex"))
}

/// Strip links and echoed prefixes, then keep at most `max_sentences` sentences
pub fn clean_answer(raw: &str, max_sentences: usize) -> String {
    let without_urls = url_pattern().replace_all(raw, "");
    let answer = without_urls.replace(ANSWER_PREFIX, "");
    let answer = answer.trim();

    split_sentences(answer)
        .into_iter()
        .take(max_sentences)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Split at runs of spaces that follow `.`, `!` or `?`
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if c == ' ' && matches!(prev, Some('.' | '!' | '?')) {
            sentences.push(&text[start..idx]);
            let mut end = idx + 1;
            while let Some(&(next_idx, ' ')) = chars.peek() {
                end = next_idx + 1;
                chars.next();
            }
            start = end;
            prev = Some(' ');
            continue;
        }
        prev = Some(c);
    }
    sentences.push(&text[start..]);

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_urls() {
        let raw = "Visit https://www.guvi.in/courses for details. Or www.guvi.in today.";
        assert_eq!(clean_answer(raw, 4), "Visit  for details. Or  today.");
    }

    #[test]
    fn test_removes_prefix_and_trims() {
        let raw = "  Helpful Answer: GUVI offers placement support.  ";
        assert_eq!(clean_answer(raw, 4), "GUVI offers placement support.");
    }

    #[test]
    fn test_keeps_four_sentences() {
        let raw = "One. Two! Three? Four.   Five. Six.";
        assert_eq!(clean_answer(raw, 4), "One. Two! Three? Four.");
    }

    #[test]
    fn test_only_breaks_after_terminal_punctuation() {
        assert_eq!(
            split_sentences("Dr.Smith said hi. Then left"),
            vec!["Dr.Smith said hi.", "Then left"]
        );
        assert_eq!(split_sentences("no punctuation here"), vec!["no punctuation here"]);
    }

    #[test]
    fn test_empty_output_stays_empty() {
        assert_eq!(clean_answer("", 4), "");
        assert_eq!(clean_answer("   Helpful Answer:  ", 4), "");
    }
}
