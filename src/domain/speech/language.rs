use serde::{Deserialize, Serialize};

/// Language tags the synthesis pipeline can produce.
///
/// Kashmiri and Dogri input is mapped onto Urdu and Hindi respectively
/// because no dedicated neural voice exists for either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageTag {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "ur")]
    Urdu,
    #[serde(rename = "pa")]
    Punjabi,
}

impl LanguageTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::English => "en",
            LanguageTag::Hindi => "hi",
            LanguageTag::Urdu => "ur",
            LanguageTag::Punjabi => "pa",
        }
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Romanized Urdu markers. Checked before every other keyword set.
const URDU_MARKERS: &[&str] = &[
    "aap", "janab", "shukriya", "meherbani", "bohat", "nahin", "kyunke", "lekin", "magar",
    "zaroorat", "pareshani", "sukoon", "udaas", "khayal",
];

/// Romanized Punjabi markers.
const PUNJABI_MARKERS: &[&str] = &[
    "tusi", "tussi", "kiddan", "kive", "vadiya", "changa", "paji", "veere", "mainu", "tenu",
    "haanji", "tuhada", "assi",
];

/// Romanized Kashmiri markers. No Kashmiri voice exists, so a hit maps to Urdu.
const KASHMIRI_MARKERS: &[&str] = &[
    "chu", "chhu", "myon", "tohi", "kasheer", "walo", "zanh", "poshe",
];

/// Romanized Dogri markers. No Dogri voice exists, so a hit maps to Hindi.
const DOGRI_MARKERS: &[&str] = &[
    "tus", "asaan", "kanne", "needa", "mhara", "kish", "dogre",
];

/// Romanized Hindi markers, checked last since Hindi shares the most
/// vocabulary with the other sets.
const HINDI_MARKERS: &[&str] = &[
    "nahi", "ha", "haan", "achha", "theek", "vaise", "kuch", "zyada", "kam", "kaise", "kyun",
    "bahut", "thoda", "sach", "galat", "dost", "parivaar", "padhai", "exam", "tension",
];

/// Map a character to a language via its script block, if it falls in one
/// of the recognized ranges.
fn script_language(ch: char) -> Option<LanguageTag> {
    match ch {
        // Devanagari
        '\u{0900}'..='\u{097F}' => Some(LanguageTag::Hindi),
        // Gurmukhi
        '\u{0A00}'..='\u{0A7F}' => Some(LanguageTag::Punjabi),
        // Arabic, Arabic Supplement, and the presentation-form blocks
        '\u{0600}'..='\u{06FF}'
        | '\u{0750}'..='\u{077F}'
        | '\u{FB50}'..='\u{FDFF}'
        | '\u{FE70}'..='\u{FEFF}' => Some(LanguageTag::Urdu),
        _ => None,
    }
}

/// Detect the language of a text fragment.
///
/// The first character belonging to a recognized script range decides the
/// result outright. Only when no script character is present are the
/// romanized keyword sets consulted, in a fixed precedence order. Falls
/// back to English.
pub fn detect_language(text: &str) -> LanguageTag {
    for ch in text.chars() {
        if let Some(tag) = script_language(ch) {
            return tag;
        }
    }

    let tokens: Vec<String> = text
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect();

    let keyword_sets: [(&[&str], LanguageTag); 5] = [
        (URDU_MARKERS, LanguageTag::Urdu),
        (PUNJABI_MARKERS, LanguageTag::Punjabi),
        (KASHMIRI_MARKERS, LanguageTag::Urdu),
        (DOGRI_MARKERS, LanguageTag::Hindi),
        (HINDI_MARKERS, LanguageTag::Hindi),
    ];

    for (markers, tag) in keyword_sets {
        if tokens.iter().any(|t| markers.contains(&t.as_str())) {
            return tag;
        }
    }

    LanguageTag::English
}
