use tera::{Context, Tera};

use super::AgentResult;

/// Fixed identity an agent presents to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persona {
    /// Display name used in logs and report headers
    pub name: &'static str,
    /// Sent as the system message of every call
    pub system_prompt: &'static str,
}

/// Render a Tera template with autoescaping off; prompts are plain text
pub fn render(template: &str, context: &Context) -> AgentResult<String> {
    Ok(Tera::one_off(template, context, false)?)
}
