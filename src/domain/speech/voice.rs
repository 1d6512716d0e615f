use serde::{Deserialize, Serialize};

use super::language::{detect_language, LanguageTag};

/// One entry of the secondary provider's voice catalog.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Voice {
    pub name: String,
    pub short_name: String,
    pub gender: String,
    pub locale: String,
    pub friendly_name: String,
}

/// A concrete voice id plus the locale it speaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceProfile {
    pub voice_id: String,
    pub locale: String,
}

impl VoiceProfile {
    fn new(voice_id: &str, locale: &str) -> Self {
        Self {
            voice_id: voice_id.to_string(),
            locale: locale.to_string(),
        }
    }
}

/// Immutable default voice per supported language, constructed once at
/// startup and passed into every resolver.
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    pub english: VoiceProfile,
    pub hindi: VoiceProfile,
    pub urdu: VoiceProfile,
    pub punjabi: VoiceProfile,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            english: VoiceProfile::new("en-IN-NeerjaNeural", "en-IN"),
            hindi: VoiceProfile::new("hi-IN-SwaraNeural", "hi-IN"),
            urdu: VoiceProfile::new("ur-PK-UzmaNeural", "ur-PK"),
            punjabi: VoiceProfile::new("pa-IN-GaganNeural", "pa-IN"),
        }
    }
}

impl VoiceConfig {
    fn profile(&self, language: LanguageTag) -> &VoiceProfile {
        match language {
            LanguageTag::English => &self.english,
            LanguageTag::Hindi => &self.hindi,
            LanguageTag::Urdu => &self.urdu,
            LanguageTag::Punjabi => &self.punjabi,
        }
    }
}

/// Per-request voice overrides, one per supported language.
#[derive(Debug, Clone, Default)]
pub struct VoiceOverrides {
    pub english: Option<String>,
    pub hindi: Option<String>,
    pub urdu: Option<String>,
    pub punjabi: Option<String>,
}

impl VoiceOverrides {
    fn for_language(&self, language: LanguageTag) -> Option<&String> {
        match language {
            LanguageTag::English => self.english.as_ref(),
            LanguageTag::Hindi => self.hindi.as_ref(),
            LanguageTag::Urdu => self.urdu.as_ref(),
            LanguageTag::Punjabi => self.punjabi.as_ref(),
        }
    }
}

/// Maps detected languages, request overrides, and provider availability to
/// concrete voices.
#[derive(Debug, Clone)]
pub struct VoiceResolver {
    config: VoiceConfig,
}

impl VoiceResolver {
    pub fn new(config: VoiceConfig) -> Self {
        Self { config }
    }

    /// Resolve the voice and locale for one sentence: the explicit override
    /// for that language if supplied, else the built-in default. An
    /// override replaces the voice id but keeps the language's locale.
    pub fn resolve_for_sentence(
        &self,
        language: LanguageTag,
        overrides: &VoiceOverrides,
    ) -> (String, String) {
        let profile = self.config.profile(language);
        let voice_id = overrides
            .for_language(language)
            .cloned()
            .unwrap_or_else(|| profile.voice_id.clone());
        (voice_id, profile.locale.clone())
    }

    /// Resolve the single voice for the fallback provider.
    ///
    /// The language of the entire input is detected once, not per sentence:
    /// the fallback provider speaks the whole utterance with one voice, so
    /// the dominant-language decision has to cover all of it. When a
    /// catalog is available the resolved voice is verified against it and
    /// substituted by locale when missing; Punjabi availability is
    /// unreliable there, so a Hindi-locale voice stands in before giving
    /// up. Without any match the unverified id is kept as a last resort.
    pub fn resolve_fallback(
        &self,
        full_text: &str,
        overrides: &VoiceOverrides,
        catalog: Option<&[Voice]>,
    ) -> String {
        let language = detect_language(full_text);
        let (voice_id, locale) = self.resolve_for_sentence(language, overrides);

        let Some(catalog) = catalog else {
            return voice_id;
        };

        if catalog.iter().any(|v| v.short_name == voice_id) {
            return voice_id;
        }

        if let Some(candidate) = catalog.iter().find(|v| v.locale == locale) {
            tracing::info!(
                requested = %voice_id,
                substitute = %candidate.short_name,
                "Requested voice missing from catalog, substituting by locale"
            );
            return candidate.short_name.clone();
        }

        if locale == "pa-IN" {
            if let Some(candidate) = catalog.iter().find(|v| v.locale == "hi-IN") {
                tracing::info!(
                    requested = %voice_id,
                    substitute = %candidate.short_name,
                    "No Punjabi voice available, substituting a Hindi voice"
                );
                return candidate.short_name.clone();
            }
        }

        tracing::warn!(
            requested = %voice_id,
            "No catalog match for requested voice or locale, keeping it unverified"
        );
        voice_id
    }
}
