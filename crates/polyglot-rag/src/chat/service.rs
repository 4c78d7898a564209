//! Message handling: language resolution, translation, retrieval and fallback

use std::sync::Arc;

use crate::cache::AnswerCache;
use crate::config::AppConfig;
use crate::language::{resolve_language, LanguageSelection, FALLBACK_LANGUAGE};
use crate::retrieval::RagPipeline;
use crate::translation::{translate_from_english, translate_to_english, Translator};
use crate::types::{AnsweredBy, RagAnswer, SourceSnippet, Speaker};

use super::history::ChatHistory;
use super::knowledge_base::KnowledgeBase;

/// Result of answering one message
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// ISO 639-1 code the message was processed as
    pub language: String,
    /// English text sent to the pipeline (shown as the translation preview)
    pub english_query: String,
    /// Reply in the user's language
    pub answer: String,
    pub answered_by: AnsweredBy,
    pub sources: Vec<SourceSnippet>,
}

/// Answers chat messages over the RAG pipeline with FAQ fallback
pub struct ChatService {
    pipeline: Arc<RagPipeline>,
    translator: Arc<dyn Translator>,
    knowledge_base: KnowledgeBase,
    cache: Option<Arc<AnswerCache>>,
}

impl ChatService {
    pub fn new(
        pipeline: Arc<RagPipeline>,
        translator: Arc<dyn Translator>,
        knowledge_base: KnowledgeBase,
        cache: Option<Arc<AnswerCache>>,
    ) -> Self {
        Self {
            pipeline,
            translator,
            knowledge_base,
            cache,
        }
    }

    /// Wire the FAQ table and answer cache from configuration
    pub fn from_config(
        config: &AppConfig,
        pipeline: Arc<RagPipeline>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self::new(
            pipeline,
            translator,
            KnowledgeBase::from_config(config.faq.as_ref()),
            AnswerCache::from_config(&config.cache).map(Arc::new),
        )
    }

    pub fn pipeline(&self) -> &RagPipeline {
        &self.pipeline
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    pub fn cache(&self) -> Option<&AnswerCache> {
        self.cache.as_deref()
    }

    /// Answer a message and append the exchange to `history`.
    ///
    /// Blank input returns `None` and leaves the history untouched.
    pub async fn handle_message(
        &self,
        history: &mut ChatHistory,
        input: &str,
        selection: LanguageSelection,
    ) -> Option<ChatOutcome> {
        let outcome = self.respond(input, selection).await?;

        history.push(Speaker::You, input);
        history.push(Speaker::Bot, outcome.answer.clone());

        Some(outcome)
    }

    /// Answer a message without touching any history
    pub async fn respond(&self, input: &str, selection: LanguageSelection) -> Option<ChatOutcome> {
        if input.trim().is_empty() {
            return None;
        }

        let language = resolve_language(selection, input);

        let english_query = if language != FALLBACK_LANGUAGE {
            translate_to_english(self.translator.as_ref(), input).await
        } else {
            input.to_string()
        };

        let (rag, from_cache) = self.retrieve(&english_query).await;

        let (bot_response, answered_by, sources) = if !rag.is_empty() {
            let answered_by = if from_cache {
                AnsweredBy::Cache
            } else {
                AnsweredBy::Rag
            };
            (rag.answer, answered_by, rag.sources)
        } else {
            // English input falls back to the FAQ table too; the reply is never empty
            tracing::debug!("Pipeline returned nothing, using FAQ table");
            (
                self.knowledge_base.respond(&english_query).to_string(),
                AnsweredBy::Faq,
                Vec::new(),
            )
        };

        let answer = translate_from_english(self.translator.as_ref(), &bot_response, &language).await;

        tracing::info!(
            "Answered message in '{}' via {:?} ({} sources)",
            language,
            answered_by,
            sources.len()
        );

        Some(ChatOutcome {
            language,
            english_query,
            answer,
            answered_by,
            sources,
        })
    }

    async fn retrieve(&self, query: &str) -> (RagAnswer, bool) {
        if let Some(hit) = self.cache.as_ref().and_then(|cache| cache.get(query)) {
            return (hit, true);
        }

        let answer = self.pipeline.generate_answer(query).await;
        if let Some(cache) = &self.cache {
            cache.put(query, &answer);
        }
        (answer, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::FALLBACK_RESPONSE;
    use crate::error::Error;
    use crate::generation::MockLlmProvider;
    use crate::language::Language;
    use crate::retrieval::{corpus_chunks, KeywordEmbedder, PipelineSettings};
    use crate::translation::MockTranslator;

    const ENGLISH: LanguageSelection = LanguageSelection::Manual(Language::English);

    async fn service(llm: MockLlmProvider, translator: MockTranslator, cached: bool) -> ChatService {
        let pipeline = RagPipeline::from_chunks(
            corpus_chunks(),
            Arc::new(KeywordEmbedder),
            Arc::new(llm),
            PipelineSettings::default(),
        )
        .await
        .unwrap();

        ChatService::new(
            Arc::new(pipeline),
            Arc::new(translator),
            KnowledgeBase::default(),
            cached.then(|| Arc::new(AnswerCache::default())),
        )
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate().times(0);
        let mut translator = MockTranslator::new();
        translator.expect_translate().times(0);

        let service = service(llm, translator, true).await;
        let mut history = ChatHistory::new();

        assert!(service
            .handle_message(&mut history, "   \n", LanguageSelection::Auto)
            .await
            .is_none());
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_english_answer_skips_translation() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate()
            .returning(|_| Ok("GUVI provides certificates for every course.".to_string()));
        let mut translator = MockTranslator::new();
        translator.expect_translate().times(0);

        let service = service(llm, translator, false).await;
        let mut history = ChatHistory::new();
        let question = "Does GUVI give a certificate after the course is completed?";

        let outcome = service
            .handle_message(&mut history, question, LanguageSelection::Auto)
            .await
            .unwrap();

        assert_eq!(outcome.language, "en");
        assert_eq!(outcome.english_query, question);
        assert_eq!(outcome.answer, "GUVI provides certificates for every course.");
        assert_eq!(outcome.answered_by, AnsweredBy::Rag);
        assert!(!outcome.sources.is_empty());

        let turns = history.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker, Speaker::You);
        assert_eq!(turns[0].message, question);
        assert_eq!(turns[1].speaker, Speaker::Bot);
        assert_eq!(turns[1].message, "GUVI provides certificates for every course.");
    }

    #[tokio::test]
    async fn test_empty_rag_answer_uses_faq() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate().returning(|_| Ok("   ".to_string()));
        let translator = MockTranslator::new();

        let service = service(llm, translator, true).await;
        let mut history = ChatHistory::new();

        let outcome = service
            .handle_message(&mut history, "Does GUVI provide certificates?", ENGLISH)
            .await
            .unwrap();

        assert_eq!(outcome.answered_by, AnsweredBy::Faq);
        assert_eq!(
            outcome.answer,
            "Yes, GUVI provides verifiable certificates for completed courses."
        );
        assert!(outcome.sources.is_empty());
        assert!(service.cache().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_question_gets_fallback_text() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate()
            .returning(|_| Err(Error::llm("model not loaded")));
        let translator = MockTranslator::new();

        let service = service(llm, translator, false).await;
        let mut history = ChatHistory::new();

        let outcome = service
            .handle_message(&mut history, "What is the weather today?", ENGLISH)
            .await
            .unwrap();

        assert_eq!(outcome.answer, FALLBACK_RESPONSE);
        assert_eq!(history.turns()[1].message, FALLBACK_RESPONSE);
    }

    #[tokio::test]
    async fn test_tamil_round_trip() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate().returning(|_| Ok(String::new()));

        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .withf(|_: &str, source: &str, target: &str| source == "auto" && target == "en")
            .times(1)
            .returning(|_, _, _| Ok("Does GUVI provide placement support?".to_string()));
        translator
            .expect_translate()
            .withf(|text: &str, source: &str, target: &str| {
                text.starts_with("Yes, GUVI offers placement support") && source == "en" && target == "ta"
            })
            .times(1)
            .returning(|_, _, _| Ok("ஆம், GUVI வேலைவாய்ப்பு ஆதரவை வழங்குகிறது.".to_string()));

        let service = service(llm, translator, false).await;
        let mut history = ChatHistory::new();

        let input = "GUVI வேலைவாய்ப்பு ஆதரவு தருகிறதா?";
        let outcome = service
            .handle_message(&mut history, input, LanguageSelection::Auto)
            .await
            .unwrap();

        assert_eq!(outcome.language, "ta");
        assert_eq!(outcome.english_query, "Does GUVI provide placement support?");
        assert_eq!(outcome.answered_by, AnsweredBy::Faq);
        assert_eq!(outcome.answer, "ஆம், GUVI வேலைவாய்ப்பு ஆதரவை வழங்குகிறது.");
        assert_eq!(history.turns()[0].message, input);
        assert_eq!(history.turns()[1].message, outcome.answer);
    }

    #[tokio::test]
    async fn test_manual_english_overrides_detection() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate().returning(|_| Ok("Placement help is available.".to_string()));
        let mut translator = MockTranslator::new();
        translator.expect_translate().times(0);

        let service = service(llm, translator, false).await;
        let mut history = ChatHistory::new();

        let outcome = service
            .handle_message(&mut history, "வேலைவாய்ப்பு placement?", ENGLISH)
            .await
            .unwrap();

        assert_eq!(outcome.language, "en");
        assert_eq!(outcome.english_query, "வேலைவாய்ப்பு placement?");
        assert_eq!(outcome.answer, "Placement help is available.");
    }

    #[tokio::test]
    async fn test_repeated_question_served_from_cache() {
        let mut llm = MockLlmProvider::new();
        llm.expect_generate()
            .times(1)
            .returning(|_| Ok("The Python course covers basics to advanced topics.".to_string()));
        let translator = MockTranslator::new();

        let service = service(llm, translator, true).await;
        let mut history = ChatHistory::new();

        let first = service
            .handle_message(&mut history, "What does the python course cover?", ENGLISH)
            .await
            .unwrap();
        let second = service
            .handle_message(&mut history, "what does the Python course cover? ", ENGLISH)
            .await
            .unwrap();

        assert_eq!(first.answered_by, AnsweredBy::Rag);
        assert_eq!(second.answered_by, AnsweredBy::Cache);
        assert_eq!(second.answer, first.answer);
        assert_eq!(history.len(), 4);
    }
}
