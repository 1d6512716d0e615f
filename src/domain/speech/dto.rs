use serde::{Deserialize, Serialize};

use super::language::LanguageTag;
use super::voice::VoiceOverrides;

fn default_pace() -> f64 {
    0.95
}

fn default_semitones() -> f64 {
    0.5
}

fn default_style() -> String {
    "empathetic".to_string()
}

fn default_role() -> String {
    "YoungAdultFemale".to_string()
}

/// Request for POST /speak
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakRequest {
    #[serde(default)]
    pub text: String,
    /// English voice override; also reported back as X-Voice on the
    /// primary path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hindi_voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urdu_voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punjabi_voice: Option<String>,
    /// Base speaking rate as a multiplier; 0.95 is slightly slower than
    /// the provider baseline.
    #[serde(default = "default_pace")]
    pub pace: f64,
    /// Base pitch offset in semitones.
    #[serde(default = "default_semitones")]
    pub semitones: f64,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_degree: Option<f64>,
}

impl Default for SpeakRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            voice: None,
            hindi_voice: None,
            urdu_voice: None,
            punjabi_voice: None,
            pace: default_pace(),
            semitones: default_semitones(),
            style: default_style(),
            role: default_role(),
            style_degree: None,
        }
    }
}

impl SpeakRequest {
    pub fn voice_overrides(&self) -> VoiceOverrides {
        VoiceOverrides {
            english: self.voice.clone(),
            hindi: self.hindi_voice.clone(),
            urdu: self.urdu_voice.clone(),
            punjabi: self.punjabi_voice.clone(),
        }
    }
}

/// One sentence with every decision the pipeline made for it. Segments are
/// kept in original sentence order.
#[derive(Debug, Clone)]
pub struct TextSegment {
    pub text: String,
    pub language: LanguageTag,
    pub voice_id: String,
    pub locale: String,
    pub rate_percent: i32,
    pub pitch_semitones: f64,
    pub style: String,
    pub style_degree: f64,
}
