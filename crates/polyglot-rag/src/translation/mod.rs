//! Machine translation to and from English
//!
//! The wrappers never fail: a translation error becomes bracketed error text
//! that is shown to the user in place of the translation.

mod google;

pub use google::GoogleTranslator;

use async_trait::async_trait;

use crate::error::Result;
use crate::language::FALLBACK_LANGUAGE;

/// Source code that asks the service to detect the input language
pub const AUTO_SOURCE: &str = "auto";

/// Text translation backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` (ISO code or "auto") to `target`
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}

/// Translate any language to English
pub async fn translate_to_english(translator: &dyn Translator, text: &str) -> String {
    match translator.translate(text, AUTO_SOURCE, FALLBACK_LANGUAGE).await {
        Ok(translated) => translated,
        Err(e) => {
            tracing::warn!("Translation to English failed: {}", e);
            format!("[Translation Error to English: {}]", e)
        }
    }
}

/// Translate English text to the given target language
pub async fn translate_from_english(translator: &dyn Translator, text: &str, target: &str) -> String {
    if target == FALLBACK_LANGUAGE {
        return text.to_string();
    }

    match translator.translate(text, FALLBACK_LANGUAGE, target).await {
        Ok(translated) => translated,
        Err(e) => {
            tracing::warn!("Translation to '{}' failed: {}", target, e);
            format!("[Translation Error to {}: {}]", target, e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_to_english_uses_auto_source() {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .withf(|text: &str, source: &str, target: &str| {
                text == "வணக்கம்" && source == "auto" && target == "en"
            })
            .times(1)
            .returning(|_, _, _| Ok("Hello".to_string()));

        assert_eq!(translate_to_english(&translator, "வணக்கம்").await, "Hello");
    }

    #[tokio::test]
    async fn test_to_english_error_text() {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .returning(|_, _, _| Err(Error::translation("service unavailable")));

        assert_eq!(
            translate_to_english(&translator, "नमस्ते").await,
            "[Translation Error to English: Translation failed: service unavailable]"
        );
    }

    #[tokio::test]
    async fn test_from_english_passthrough_for_english() {
        let mut translator = MockTranslator::new();
        translator.expect_translate().times(0);

        assert_eq!(translate_from_english(&translator, "Hi there", "en").await, "Hi there");
    }

    #[tokio::test]
    async fn test_from_english_error_names_target() {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .withf(|_: &str, source: &str, target: &str| source == "en" && target == "ta")
            .returning(|_, _, _| Err(Error::translation("timeout")));

        let result = translate_from_english(&translator, "Hello", "ta").await;
        assert_eq!(result, "[Translation Error to ta: Translation failed: timeout]");
    }
}
