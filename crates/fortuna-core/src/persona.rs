//! Fixed assistant copy: greeting, persona preamble, and fallback replies

pub const COMPANY_NAME: &str = "Fortuna Major";

/// First message of every conversation
pub const GREETING: &str =
    "Hi! I can help you understand our low-code solutions. Ask me anything about Fortuna Major!";

/// Instruction prepended to every visitor question
pub const SALES_PERSONA: &str = "You are a helpful sales assistant for Fortuna Major, a company \
specializing in custom low-code software solutions, AI integration, and SaaS product building.\n\
Your goal is to explain the benefits of low-code (speed, cost-efficiency, flexibility) and how \
Fortuna Major delivers high-quality results.\n\
Keep answers concise and professional yet friendly.";

/// Shown when the provider answers without any usable text
pub const EMPTY_RESPONSE_FALLBACK: &str =
    "I'm sorry, I couldn't generate a response at the moment.";

/// Shown when the completion call fails for any reason
pub const CALL_FAILURE_FALLBACK: &str =
    "I'm having trouble connecting to the server. Please check your API key.";

/// Single-turn prompt: persona preamble followed by the literal visitor text
pub fn build_prompt(visitor_text: &str) -> String {
    let mut prompt = String::with_capacity(SALES_PERSONA.len() + visitor_text.len() + 16);
    prompt.push_str(SALES_PERSONA);
    prompt.push_str("\n\nUser asks: ");
    prompt.push_str(visitor_text);
    prompt
}
