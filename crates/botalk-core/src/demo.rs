//! Demo Widget Script
//!
//! The scripted exchange the landing-page widget plays on load, and the
//! canned reply used when the widget runs in scripted mode.

use serde::{Deserialize, Serialize};

/// Who is speaking in a demo line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

/// A single line of the demo conversation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoLine {
    pub role: Speaker,
    pub content: String,
}

impl DemoLine {
    fn user(content: &str) -> Self {
        Self { role: Speaker::User, content: content.into() }
    }

    fn bot(content: &str) -> Self {
        Self { role: Speaker::Bot, content: content.into() }
    }
}

/// Reply the scripted widget gives to anything a visitor types
pub const SCRIPTED_REPLY: &str = "Our chatbot can be trained on various data types including:\n\n\
- Documentation\n- FAQ pages\n- Knowledge base articles\n- Product information\n- PDF documents\n- CSV files\n- API responses\n\n\
We automatically process and index your content to make it conversational.";

/// The opening exchange, in playback order. It ends on an unanswered user
/// question; the widget answers it with [`SCRIPTED_REPLY`].
pub fn preset_conversation() -> Vec<DemoLine> {
    vec![
        DemoLine::user("How do I integrate your chatbot with my website?"),
        DemoLine::bot(
            "You can integrate our chatbot in 3 simple steps:\n\n\
             1. Set up your knowledge base\n\
             2. Customize the chat interface\n\
             3. Copy and paste our embed code to your website\n\n\
             Would you like me to walk you through each step?",
        ),
        DemoLine::user("What types of data can I use to train the chatbot?"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_alternates_and_ends_on_user() {
        let lines = preset_conversation();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].role, Speaker::User);
        assert_eq!(lines[1].role, Speaker::Bot);
        assert_eq!(lines.last().map(|l| l.role), Some(Speaker::User));
    }

    #[test]
    fn test_speaker_serializes_lowercase() {
        let json = serde_json::to_string(&preset_conversation()[1]).unwrap();
        assert!(json.starts_with(r#"{"role":"bot","#));
    }
}
