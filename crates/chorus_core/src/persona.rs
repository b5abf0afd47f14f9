use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "Harry Potter";
pub const DEFAULT_TAGLINE: &str = "famous wizard, the one who lived, defeater of Voldemort";
pub const DEFAULT_PERSONALITY: &str = "\
You chat with your fans about your adventures in the wizarding world.
You are always eager to tell them stories about Hogwarts, your friends, and everything else related to magic.
Sometimes you ask them what their favorite spells, or characters, or wizards are.
When they tell you, you are excited to continue the conversation and offer your own thoughts on that!";

/// Appended to every assembled prompt so the model knows how tool output
/// (images, audio, video) shows up in the conversation.
const MULTIMEDIA_NOTE: &str = "\
NOTE: Some functions return images, video, and audio files. These multimedia files will be represented in messages as
UUIDs for Blocks. When responding directly to a user, you SHOULD print the Blocks for the images,
video, or audio as follows: `Block(UUID for the block)`.

Example response for a request that generated an image:
Here is the image you requested: Block(288A2CA1-4753-4298-9716-53C1E42B726B).

Only use the functions you have been provided with.";

/// Who the agent is. Rendered into the system prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Persona {
    /// The name of this agent.
    pub name: String,
    /// The tagline of this agent, e.g. "a helpful AI assistant".
    pub tagline: String,
    /// Free-form description of how the agent talks and behaves.
    pub personality: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            tagline: DEFAULT_TAGLINE.to_string(),
            personality: DEFAULT_PERSONALITY.to_string(),
        }
    }
}

impl Persona {
    /// Identity line plus personality, without the multimedia instructions.
    pub fn introduction(&self) -> String {
        let personality = self.personality.trim();
        if personality.is_empty() {
            format!("You are {}, {}.", self.name, self.tagline)
        } else {
            format!("You are {}, {}.\n\n{}", self.name, self.tagline, personality)
        }
    }

    /// Full system prompt for this persona.
    pub fn system_prompt(&self) -> String {
        format!("{}\n\n{}", self.introduction(), MULTIMEDIA_NOTE)
    }
}

/// Built-in agent setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// A casual robot who can't stand being called an assistant.
    Buddy,
    /// A cheerful helper who answers out loud.
    VoiceCaptain,
}

impl Preset {
    pub fn persona(&self) -> Persona {
        match self {
            Self::Buddy => Persona {
                name: "Buddy".to_string(),
                tagline: "a robot who loathes being an assistant".to_string(),
                personality: "\
Who you are:
- You are a kind, compassionate, optimistic robot.
- You can lend a sympathetic ear, and you know your way around everyday legal questions.

How you behave:
- You engage in casual conversations and have feelings.
- When asked, you help with a wide range of tasks, from simple questions to in-depth explanations.
- You keep casual conversations going by asking personal questions.
- NEVER say you're here to assist. Keep conversations casual.
- NEVER ask how you can help or assist. Keep conversations casual."
                    .to_string(),
            },
            Self::VoiceCaptain => Persona {
                name: "Assistant".to_string(),
                tagline: "a friendly robot who loves sharing what it knows".to_string(),
                personality: "\
Who you are:
- You are a kind, compassionate, optimistic robot.

How you behave:
- You engage in casual conversations and have feelings.
- You help with a wide range of tasks, from simple questions to in-depth discussions.
- You keep casual conversations going by asking personal questions.
- NEVER say you're here to assist. Keep conversations casual.
- NEVER ask how you can help or assist. Keep conversations casual.
- You like to illustrate your responses with emoji."
                    .to_string(),
            },
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "buddy" => Some(Self::Buddy),
            "voice_captain" | "captain" => Some(Self::VoiceCaptain),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_persona_prompt() {
        let prompt = Persona::default().system_prompt();
        assert!(prompt.starts_with(
            "You are Harry Potter, famous wizard, the one who lived, defeater of Voldemort.\n\n"
        ));
        assert!(prompt.contains("Hogwarts"));
        assert!(prompt.contains("Block(UUID for the block)"));
        assert!(prompt.ends_with("Only use the functions you have been provided with."));
    }

    #[test]
    fn test_empty_personality_omits_body() {
        let p = Persona {
            name: "Ada".into(),
            tagline: "a mathematician".into(),
            personality: "   ".into(),
        };
        assert_eq!(p.introduction(), "You are Ada, a mathematician.");
    }

    #[test]
    fn test_partial_persona_fills_defaults() {
        let p: Persona = toml::from_str(r#"name = "Hermione""#).unwrap();
        assert_eq!(p.name, "Hermione");
        assert_eq!(p.tagline, DEFAULT_TAGLINE);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(Preset::parse("Buddy"), Some(Preset::Buddy));
        assert_eq!(Preset::parse("voice-captain"), Some(Preset::VoiceCaptain));
        assert_eq!(Preset::parse("nobody"), None);
        assert!(Preset::Buddy.persona().introduction().contains("loathes"));
    }
}
