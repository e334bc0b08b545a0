//! Persona prompt construction. The preamble pins the assistant to
//! cybersecurity education; it is a string convention, not a protocol, and
//! is kept as a pure function so it can be tested without network access.

const PREAMBLE: &str = "\
You are a cybersecurity training assistant. Your purpose is to help users learn about cybersecurity topics.
Only answer questions related to cybersecurity, ethical hacking, encryption, phishing prevention, and incident response.
If the question is not related to cybersecurity, politely decline to answer and remind the user that you're focused on cybersecurity topics.";

/// Wrap raw user text in the fixed instructional template sent to the model.
pub fn build_prompt(user_text: &str) -> String {
    format!("{}\n\nUser question: {}", PREAMBLE, user_text)
}
