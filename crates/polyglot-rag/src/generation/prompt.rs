//! Prompt template for grounded question answering

use crate::types::SearchHit;

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Stuff the retrieved chunks into one context block
    pub fn build_context(hits: &[SearchHit]) -> String {
        hits.iter()
            .map(|hit| hit.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Build the strict, concise QA prompt
    pub fn build_qa_prompt(organization: &str, context: &str, question: &str) -> String {
        format!(
            r#"You are a helpful assistant for {organization}.
Use only the following context to answer the user's question.
Do NOT add unrelated text, links, or jokes.

Context:
{context}

Question: {question}
Answer in 2-4 sentences only:
"#,
            organization = organization,
            context = context,
            question = question
        )
    }
}
