// src/persona/mod.rs
// Persona prompt templates. A closed set: the UI only offers these three.

mod templates;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub use templates::{CREATIVE_TEMPLATE, DEFAULT_TEMPLATE, EXPERT_TEMPLATE};

const HISTORY_PLACEHOLDER: &str = "{history}";
const INPUT_PLACEHOLDER: &str = "{input}";

/// Conversation style selected in the sidebar
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Persona {
    #[default]
    Default,
    Expert,
    Creative,
}

impl Persona {
    /// Returns the prompt template for this persona.
    pub fn template(&self) -> PromptTemplate {
        let text = match self {
            Persona::Default => DEFAULT_TEMPLATE,
            Persona::Expert => EXPERT_TEMPLATE,
            Persona::Creative => CREATIVE_TEMPLATE,
        };
        PromptTemplate { text }
    }

    /// Name shown in the page
    pub fn label(&self) -> &'static str {
        match self {
            Persona::Default => "Default",
            Persona::Expert => "Expert",
            Persona::Creative => "Creative",
        }
    }
}

/// A static template with `{history}` and `{input}` placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    text: &'static str,
}

impl PromptTemplate {
    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Substitute both placeholders in one pass over the template.
    /// Substituted values are never scanned again.
    pub fn render(&self, history: &str, input: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + history.len() + input.len());
        let mut rest = self.text;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix(HISTORY_PLACEHOLDER) {
                out.push_str(history);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(INPUT_PLACEHOLDER) {
                out.push_str(input);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_template_has_both_placeholders() {
        for persona in Persona::iter() {
            let text = persona.template().text();
            assert_eq!(text.matches(HISTORY_PLACEHOLDER).count(), 1, "{persona}");
            assert_eq!(text.matches(INPUT_PLACEHOLDER).count(), 1, "{persona}");
        }
    }

    #[test]
    fn test_render_default() {
        let prompt = Persona::Default
            .template()
            .render("Human: hi\nAI: hello", "how are you?");
        assert_eq!(
            prompt,
            "You are a helpful AI assistant.\nCurrent conversation:\nHuman: hi\nAI: hello\nHuman: how are you?\nAI:"
        );
    }

    #[test]
    fn test_render_expert_suffix() {
        let prompt = Persona::Expert.template().render("", "explain TCP");
        assert!(prompt.starts_with("You are an expert consultant"));
        assert!(prompt.ends_with("Human: explain TCP\nExpert:"));
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let prompt = Persona::Creative.template().render("{input}", "{history}");
        assert!(prompt.contains("Current conversation:\n{input}\nHuman: {history}\nAI:"));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("expert".parse::<Persona>().unwrap(), Persona::Expert);
        assert_eq!("Creative".parse::<Persona>().unwrap(), Persona::Creative);
        assert!("pirate".parse::<Persona>().is_err());
        assert_eq!(Persona::Default.to_string(), "default");
        assert_eq!(Persona::Default.label(), "Default");
    }
}
