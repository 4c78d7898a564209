//! Static FAQ table consulted when retrieval produces nothing

use std::collections::BTreeMap;

/// Reply when neither the pipeline nor the FAQ table has an answer
pub const FALLBACK_RESPONSE: &str = "I'm sorry, I don’t have an exact answer for that. \
But I can help you with GUVI courses, certifications, and placement support. \
You may explore GUVI’s official site for more options.";

const DEFAULT_ENTRIES: [(&str, &str); 4] = [
    (
        "does guvi provide certificates?",
        "Yes, GUVI provides verifiable certificates for completed courses.",
    ),
    (
        "does guvi provide placement support?",
        "Yes, GUVI offers placement support through Zen Class and career services.",
    ),
    (
        "where can i find the courses?",
        "You can explore courses directly on GUVI’s official website.",
    ),
    (
        "tell me about guvi?",
        "GUVI is an online learning platform offering courses in Data Science, AI, Full Stack, and more.",
    ),
];

/// Question to answer table; keys are matched against the lowercased query
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: BTreeMap<String, String>,
}

impl KnowledgeBase {
    /// Build from question/answer pairs. Questions are stored lowercased.
    pub fn from_entries<I, Q, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: AsRef<str>,
        A: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(q, a)| (q.as_ref().to_lowercase(), a.into()))
                .collect(),
        }
    }

    /// Table from configuration, or the built-in one
    pub fn from_config(faq: Option<&BTreeMap<String, String>>) -> Self {
        match faq {
            Some(entries) => Self::from_entries(entries.iter().map(|(q, a)| (q, a.clone()))),
            None => Self::default(),
        }
    }

    /// Exact match on the lowercased query
    pub fn lookup(&self, query: &str) -> Option<&str> {
        self.entries.get(&query.to_lowercase()).map(String::as_str)
    }

    /// FAQ answer or the fallback text
    pub fn respond(&self, query: &str) -> &str {
        self.lookup(query).unwrap_or(FALLBACK_RESPONSE)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::from_entries(DEFAULT_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let kb = KnowledgeBase::default();
        assert_eq!(
            kb.lookup("Does GUVI provide certificates?"),
            Some("Yes, GUVI provides verifiable certificates for completed courses.")
        );
        assert_eq!(kb.len(), 4);
    }

    #[test]
    fn test_lookup_requires_exact_text() {
        let kb = KnowledgeBase::default();
        assert!(kb.lookup("does guvi provide certificates").is_none());
        assert!(kb.lookup(" tell me about guvi?").is_none());
    }

    #[test]
    fn test_respond_falls_back() {
        let kb = KnowledgeBase::default();
        assert_eq!(kb.respond("What is the weather?"), FALLBACK_RESPONSE);
        assert!(FALLBACK_RESPONSE.starts_with("I'm sorry, I don’t have an exact answer for that. But"));
    }

    #[test]
    fn test_config_table_replaces_defaults() {
        let mut faq = BTreeMap::new();
        faq.insert("What is Zen Class?".to_string(), "A placement program.".to_string());

        let kb = KnowledgeBase::from_config(Some(&faq));
        assert_eq!(kb.respond("what is zen class?"), "A placement program.");
        assert!(kb.lookup("tell me about guvi?").is_none());
    }
}
