use crate::persona::{Persona, Preset};
use crate::tools::ToolKind;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Default speech voice ("Adam").
pub const DEFAULT_VOICE_ID: &str = "pNInz6obpgDQGcFmaJgB";

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChorusConfig {
    pub agent: AgentSection,
    pub persona: Option<Persona>,
    pub tools: ToolsConfig,
    pub voice: VoiceConfig,
    /// Sections the file set itself; a preset never overwrites these.
    #[serde(skip)]
    explicit: ExplicitSections,
}

#[derive(Debug, Clone, Copy, Default)]
struct ExplicitSections {
    tools: bool,
    voice_enabled: bool,
}

impl ChorusConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::read(path)?;
        config.apply_env_overrides(None);
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_or_default_with_preset(path, None)
    }

    /// Like [`load_or_default`](Self::load_or_default), with `preset` layered
    /// over the file. It takes precedence over `CHORUS_PRESET`; the other
    /// env overrides still apply last.
    pub fn load_or_default_with_preset<P: AsRef<Path>>(path: P, preset: Option<Preset>) -> Self {
        let mut cfg = match Self::read(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                Self::default()
            }
        };
        cfg.apply_env_overrides(preset);
        cfg
    }

    fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let table: toml::Table =
            toml::from_str(content).with_context(|| "Failed to parse TOML config")?;
        let explicit = ExplicitSections {
            tools: table.contains_key("tools"),
            voice_enabled: table
                .get("voice")
                .and_then(|v| v.get("enabled"))
                .is_some(),
        };
        let mut config: Self = table
            .try_into()
            .with_context(|| "Failed to parse TOML config")?;
        config.explicit = explicit;
        if let Some(preset) = config.agent.preset {
            config.apply_preset(preset);
        }
        Ok(config)
    }

    /// Built-in configuration for a preset: its persona, tools and voice setting.
    pub fn preset(preset: Preset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Switch to `preset`, taking its tools and voice setting unless the
    /// config file set those itself.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.agent.preset = Some(preset);
        if !self.explicit.tools {
            self.tools.enabled = match preset {
                Preset::Buddy => vec![ToolKind::Search, ToolKind::ImageGeneration],
                Preset::VoiceCaptain => vec![ToolKind::ImageGeneration],
            };
        }
        if !self.explicit.voice_enabled {
            self.voice.enabled = preset == Preset::VoiceCaptain;
        }
    }

    /// Persona in effect: explicit `[persona]`, else the preset's, else the default.
    pub fn effective_persona(&self) -> Persona {
        if let Some(p) = &self.persona {
            return p.clone();
        }
        self.agent
            .preset
            .map(|p| p.persona())
            .unwrap_or_default()
    }

    /// The system prompt handed to the model. An explicit `agent.system_prompt`
    /// wins over anything rendered from the persona.
    pub fn system_prompt(&self) -> String {
        match &self.agent.system_prompt {
            Some(prompt) if !prompt.trim().is_empty() => prompt.clone(),
            _ => self.effective_persona().system_prompt(),
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    ///
    /// The preset (`preset` argument, else `CHORUS_PRESET`) goes first so the
    /// voice and model variables can still override what it sets.
    fn apply_env_overrides(&mut self, preset: Option<Preset>) {
        let preset = preset.or_else(|| {
            let v = std::env::var("CHORUS_PRESET").ok()?;
            let parsed = Preset::parse(&v);
            if parsed.is_none() {
                tracing::warn!("Ignoring unknown CHORUS_PRESET={}", v);
            }
            parsed
        });
        if let Some(p) = preset {
            self.apply_preset(p);
        }
        if let Ok(v) = std::env::var("CHORUS_MODEL") {
            self.agent.model_name = v;
        }
        if let Ok(v) = std::env::var("CHORUS_VOICE_ID") {
            self.voice.voice_id = v;
        }
        if let Ok(v) = std::env::var("CHORUS_VOICE_ENABLED") {
            if let Ok(b) = v.parse() {
                self.voice.enabled = b;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentSection {
    pub model_name: String,
    pub preset: Option<Preset>,
    /// Replaces the persona-rendered prompt entirely when set.
    pub system_prompt: Option<String>,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            model_name: "gpt-4".to_string(),
            preset: None,
            system_prompt: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub enabled: Vec<ToolKind>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enabled: vec![ToolKind::Search, ToolKind::ImageGeneration],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Convert text output to speech before it reaches the transport.
    pub enabled: bool,
    pub voice_id: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            voice_id: DEFAULT_VOICE_ID.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ChorusConfig::default();
        assert_eq!(cfg.agent.model_name, "gpt-4");
        assert!(cfg.agent.preset.is_none());
        assert!(!cfg.voice.enabled);
        assert_eq!(cfg.voice.voice_id, DEFAULT_VOICE_ID);
        assert_eq!(
            cfg.tools.enabled,
            vec![ToolKind::Search, ToolKind::ImageGeneration]
        );
        assert!(cfg.system_prompt().starts_with("You are Harry Potter"));
    }

    #[test]
    fn test_parse_minimal_toml() {
        let cfg = ChorusConfig::from_toml(
            r#"
[agent]
model_name = "gpt-4o"
"#,
        )
        .unwrap();
        assert_eq!(cfg.agent.model_name, "gpt-4o");
        // Defaults for unspecified fields
        assert!(cfg.persona.is_none());
        assert_eq!(cfg.tools.enabled.len(), 2);
    }

    #[test]
    fn test_parse_full_toml() {
        let cfg = ChorusConfig::from_toml(
            r#"
[agent]
model_name = "gpt-4"
preset = "buddy"

[persona]
name = "Luna"
tagline = "a dreamy Ravenclaw"
personality = "You notice things nobody else does."

[tools]
enabled = ["speech_generation"]

[voice]
enabled = true
voice_id = "custom-voice"
"#,
        )
        .unwrap();
        assert_eq!(cfg.agent.preset, Some(Preset::Buddy));
        assert_eq!(cfg.tools.enabled, vec![ToolKind::SpeechGeneration]);
        assert!(cfg.voice.enabled);
        assert_eq!(cfg.voice.voice_id, "custom-voice");
        // Explicit persona beats the preset's.
        assert!(cfg.system_prompt().starts_with("You are Luna, a dreamy Ravenclaw."));
    }

    #[test]
    fn test_system_prompt_override() {
        let cfg = ChorusConfig::from_toml(
            r#"
[agent]
system_prompt = "Be brief."
"#,
        )
        .unwrap();
        assert_eq!(cfg.system_prompt(), "Be brief.");
    }

    #[test]
    fn test_presets() {
        let captain = ChorusConfig::preset(Preset::VoiceCaptain);
        assert!(captain.voice.enabled);
        assert_eq!(captain.tools.enabled, vec![ToolKind::ImageGeneration]);

        let buddy = ChorusConfig::preset(Preset::Buddy);
        assert!(!buddy.voice.enabled);
        assert!(buddy.system_prompt().starts_with("You are Buddy"));
    }

    #[test]
    fn test_preset_in_toml_brings_tools_and_voice() {
        let cfg = ChorusConfig::from_toml(
            r#"
[agent]
preset = "voice_captain"
"#,
        )
        .unwrap();
        assert!(cfg.voice.enabled);
        assert_eq!(cfg.tools.enabled, vec![ToolKind::ImageGeneration]);
        assert!(cfg.system_prompt().starts_with("You are Assistant"));
    }

    #[test]
    fn test_preset_keeps_explicit_sections() {
        let cfg = ChorusConfig::from_toml(
            r#"
[agent]
preset = "voice_captain"

[tools]
enabled = ["search"]

[voice]
enabled = false
voice_id = "mine"
"#,
        )
        .unwrap();
        assert!(!cfg.voice.enabled);
        assert_eq!(cfg.voice.voice_id, "mine");
        assert_eq!(cfg.tools.enabled, vec![ToolKind::Search]);
    }

    #[test]
    fn test_apply_preset_keeps_other_fields() {
        let mut cfg = ChorusConfig::from_toml(
            r#"
[agent]
model_name = "gpt-4o"
system_prompt = "Be brief."

[voice]
voice_id = "mine"
"#,
        )
        .unwrap();
        cfg.apply_preset(Preset::VoiceCaptain);
        assert_eq!(cfg.agent.model_name, "gpt-4o");
        assert_eq!(cfg.system_prompt(), "Be brief.");
        assert_eq!(cfg.voice.voice_id, "mine");
        assert!(cfg.voice.enabled);
        assert_eq!(cfg.tools.enabled, vec![ToolKind::ImageGeneration]);
    }

    #[test]
    fn test_bad_toml_is_error() {
        assert!(ChorusConfig::from_toml("[agent\nmodel_name =").is_err());
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        // Part 1: env overrides
        std::env::set_var("CHORUS_MODEL", "gpt-4o-mini");
        std::env::set_var("CHORUS_VOICE_ENABLED", "true");

        let mut cfg = ChorusConfig::default();
        cfg.apply_env_overrides(None);

        assert_eq!(cfg.agent.model_name, "gpt-4o-mini");
        assert!(cfg.voice.enabled);

        // A preset is applied before the env vars, so they still win
        std::env::set_var("CHORUS_VOICE_ENABLED", "false");
        std::env::set_var("CHORUS_PRESET", "buddy");
        let cfg = ChorusConfig::load_or_default_with_preset(
            "/nonexistent/chorus.toml",
            Some(Preset::VoiceCaptain),
        );
        assert_eq!(cfg.agent.preset, Some(Preset::VoiceCaptain));
        assert_eq!(cfg.agent.model_name, "gpt-4o-mini");
        assert!(!cfg.voice.enabled);
        assert_eq!(cfg.tools.enabled, vec![ToolKind::ImageGeneration]);

        // Without an explicit preset, CHORUS_PRESET applies in full
        std::env::remove_var("CHORUS_VOICE_ENABLED");
        let cfg = ChorusConfig::load_or_default("/nonexistent/chorus.toml");
        assert_eq!(cfg.agent.preset, Some(Preset::Buddy));
        assert!(!cfg.voice.enabled);

        // Clean up env vars before testing defaults
        std::env::remove_var("CHORUS_MODEL");
        std::env::remove_var("CHORUS_PRESET");

        // Part 2: nonexistent path returns defaults (no env interference)
        let cfg = ChorusConfig::load_or_default("/nonexistent/chorus.toml");
        assert_eq!(cfg.agent.model_name, "gpt-4");
    }
}
