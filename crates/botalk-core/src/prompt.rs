//! Grounding prompt for remote generation

use crate::error::Result;
use crate::knowledge::FactBase;

const CLOSING_INSTRUCTIONS: &str =
    "Keep your answers helpful, concise and conversational. The user's question is: ";

/// Build the single-turn prompt sent to the generator: persona preamble,
/// the whole fact base as pretty JSON, then the user's message verbatim.
pub fn grounding_prompt(facts: &FactBase, message: &str) -> Result<String> {
    let name = &facts.company.name;
    let assistant = facts
        .products
        .first()
        .map_or_else(|| format!("{name} Assistant"), |p| p.name.clone());

    Ok(format!(
        "You are {assistant}, an AI chatbot for a company called {name} that provides AI-powered chatbot solutions. \
         Here's information about the company:\n\n{}\n\n{CLOSING_INSTRUCTIONS}{message}",
        facts.to_grounding_json()?
    ))
}
