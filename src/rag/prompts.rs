//! Prompt templates for grounded FAQ answering
//!
//! The prompt constrains the model to copy sentences verbatim from the
//! supplied context and to reply with a fixed refusal string when the context
//! does not answer the question. Few-shot examples anchor both behaviors.

/// Exact refusal the model is instructed to produce when the context
/// contains no answer
pub const REFUSAL_ANSWER: &str = "I'm not sure based on our docs.";

/// Returned by the answering service when retrieval or generation fails;
/// callers never see a raw error
pub const FALLBACK_ANSWER: &str =
    "I'm sorry, I'm having trouble processing your question right now.";

/// Build the strict-verbatim FAQ prompt for the given context and question
pub fn build_faq_prompt(context: &str, question: &str) -> String {
    format!(
        r#"You are a factual FAQ assistant.
Answer **only** with sentences copied verbatim from the provided CONTEXT.
If none of the context sentences answer the question, reply exactly:
   "{REFUSAL_ANSWER}"

--------

### EXAMPLE 1
CONTEXT:
"Q: What is your refund policy?
A: Annual plans may be cancelled within 30 days for a prorated refund."

Q: What is your refund policy?
A: Annual plans may be cancelled within 30 days for a prorated refund.

--------

### EXAMPLE 2
CONTEXT:
"Q: How do I reset my password?
A: Click 'Forgot password?' on the login page and follow the link."

Q: Can I deploy on Kubernetes?
A: {REFUSAL_ANSWER}

--------

### EXAMPLE 3
CONTEXT:
"Q: How do I reset my password?
A: Click 'Forgot password?' on the login page and follow the link."

Q: Can I reset my memory card?
A: {REFUSAL_ANSWER}

--------

### NOW
CONTEXT:
{context}

Q: {question}
A:"#
    )
}
