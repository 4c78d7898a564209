//! Google Translate client using the mobile web page

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;

use crate::config::TranslationConfig;
use crate::error::{Error, Result};

use super::Translator;

/// Elements that hold the translated text, in lookup order
const RESULT_SELECTORS: [&str; 2] = ["div.result-container", "div.t0"];

/// Translator scraping `translate.google.com/m`
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    max_chars: usize,
}

impl GoogleTranslator {
    /// Create a new translator
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Mozilla/5.0 (Linux; Android 10) AppleWebKit/537.36 (KHTML, like Gecko)")
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            max_chars: config.max_chars,
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        if text.trim().is_empty() || source == target {
            return Ok(text.to_string());
        }

        let len = text.chars().count();
        if len > self.max_chars {
            return Err(Error::translation(format!(
                "text has {} characters, the limit is {}",
                len, self.max_chars
            )));
        }

        tracing::debug!("Translating {} chars {} -> {}", len, source, target);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("sl", source), ("tl", target), ("q", text)])
            .send()
            .await
            .map_err(|e| Error::translation(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::translation(format!(
                "HTTP {} from translation service",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::translation(format!("failed to read response: {}", e)))?;

        extract_translation(&body)?
            .ok_or_else(|| Error::translation("no translation found in response"))
    }
}

/// Pull the translated text out of the result page
fn extract_translation(html: &str) -> Result<Option<String>> {
    let document = Html::parse_document(html);

    for raw in RESULT_SELECTORS {
        let selector = Selector::parse(raw)
            .map_err(|e| Error::internal(format!("Invalid selector '{}': {}", raw, e)))?;

        if let Some(element) = document.select(&selector).next() {
            let text = element.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return Ok(Some(text));
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_result_container() {
        let html = r#"<html><body>
            <div class="header">Google Translate</div>
            <div class="result-container">  Does GUVI provide certificates? </div>
        </body></html>"#;

        assert_eq!(
            extract_translation(html).unwrap().as_deref(),
            Some("Does GUVI provide certificates?")
        );
    }

    #[test]
    fn test_extract_legacy_class() {
        let html = r#"<div class="t0">வணக்கம்</div>"#;
        assert_eq!(extract_translation(html).unwrap().as_deref(), Some("வணக்கம்"));
    }

    #[test]
    fn test_extract_missing_result() {
        let html = "<html><body><p>Error 429</p></body></html>";
        assert!(extract_translation(html).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_and_same_language_skip_request() {
        let config = TranslationConfig {
            endpoint: "http://127.0.0.1:9/unreachable".to_string(),
            ..TranslationConfig::default()
        };
        let translator = GoogleTranslator::new(&config).unwrap();

        assert_eq!(translator.translate("   ", "auto", "en").await.unwrap(), "   ");
        assert_eq!(translator.translate("Hello", "en", "en").await.unwrap(), "Hello");
    }

    #[tokio::test]
    async fn test_rejects_text_over_limit() {
        let config = TranslationConfig {
            endpoint: "http://127.0.0.1:9/unreachable".to_string(),
            max_chars: 10,
            ..TranslationConfig::default()
        };
        let translator = GoogleTranslator::new(&config).unwrap();

        let err = translator
            .translate("this sentence is too long", "en", "ta")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Translation(_)));
    }
}
