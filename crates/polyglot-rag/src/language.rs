//! Language selection and detection
//!
//! Detection is statistical (trigram profiles per script) and covers far more
//! languages than the selector offers, so a Spanish question is translated
//! even though Spanish cannot be picked manually. Text with no letters at all
//! falls back to English.

use serde::{Deserialize, Serialize};
use whatlang::{Lang, Script};

/// Code returned when nothing can be detected
pub const FALLBACK_LANGUAGE: &str = "en";

/// Languages offered in the language selector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Tamil,
    Hindi,
    Telugu,
    Kannada,
}

impl Language {
    /// All selectable languages in display order
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Tamil,
        Language::Hindi,
        Language::Telugu,
        Language::Kannada,
    ];

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Tamil => "ta",
            Self::Hindi => "hi",
            Self::Telugu => "te",
            Self::Kannada => "kn",
        }
    }

    /// Name shown in the selector
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Tamil => "Tamil",
            Self::Hindi => "Hindi",
            Self::Telugu => "Telugu",
            Self::Kannada => "Kannada",
        }
    }

    /// Look up by ISO 639-1 code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Look up by selector name
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.display_name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Language selector state: detect automatically or force a language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LanguageSelection {
    #[default]
    Auto,
    Manual(Language),
}

impl LanguageSelection {
    /// Label of the automatic option
    pub const AUTO_LABEL: &'static str = "Auto Detect";

    /// Selector labels in display order
    pub fn labels() -> Vec<&'static str> {
        std::iter::once(Self::AUTO_LABEL)
            .chain(Language::ALL.iter().map(|lang| lang.display_name()))
            .collect()
    }

    /// Parse a selector label (or an ISO code). Unknown labels select English.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty()
            || label.eq_ignore_ascii_case(Self::AUTO_LABEL)
            || label.eq_ignore_ascii_case("auto")
        {
            return Self::Auto;
        }

        let lang = Language::from_display_name(label)
            .or_else(|| Language::from_code(label))
            .unwrap_or_else(|| {
                tracing::debug!("Unknown language selection '{}', using English", label);
                Language::English
            });
        Self::Manual(lang)
    }

    /// Label shown in the selector
    pub fn label(&self) -> &'static str {
        match self {
            Self::Auto => Self::AUTO_LABEL,
            Self::Manual(lang) => lang.display_name(),
        }
    }
}

/// Result of detecting the language of a text
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageDetection {
    /// ISO 639-1 code where one exists, ISO 639-3 otherwise
    pub code: &'static str,
    /// Dominant script
    pub script: Script,
    /// Detector confidence between 0 and 1
    pub confidence: f64,
    /// Whether the statistical guess was trusted over the script default
    pub reliable: bool,
}

/// Map a detected language to the code the translation service expects
fn translation_code(lang: Lang) -> &'static str {
    match lang.code() {
        "eng" => "en",
        "spa" => "es",
        "fra" => "fr",
        "deu" => "de",
        "por" => "pt",
        "ita" => "it",
        "nld" => "nl",
        "pol" => "pl",
        "tur" => "tr",
        "ind" => "id",
        "vie" => "vi",
        "rus" => "ru",
        "ukr" => "uk",
        "ara" => "ar",
        "urd" => "ur",
        "hin" => "hi",
        "mar" => "mr",
        "ben" => "bn",
        "pan" => "pa",
        "guj" => "gu",
        "tam" => "ta",
        "tel" => "te",
        "kan" => "kn",
        "mal" => "ml",
        "tha" => "th",
        "cmn" => "zh-CN",
        "jpn" => "ja",
        "kor" => "ko",
        other => other,
    }
}

/// Language assumed when the detector is unsure about a script shared by many languages
fn script_default(script: Script) -> Option<&'static str> {
    match script {
        Script::Latin => Some(FALLBACK_LANGUAGE),
        Script::Devanagari => Some("hi"),
        _ => None,
    }
}

/// Detect the language of a text. `None` when it has no letters.
///
/// Short Latin or Devanagari messages rarely carry enough trigrams for a
/// trustworthy guess; those resolve to English and Hindi respectively.
pub fn detect(text: &str) -> Option<LanguageDetection> {
    let info = whatlang::detect(text)?;
    let script = info.script();
    let reliable = info.is_reliable();

    let code = match script_default(script) {
        Some(default) if !reliable => default,
        _ => translation_code(info.lang()),
    };

    Some(LanguageDetection {
        code,
        script,
        confidence: info.confidence(),
        reliable,
    })
}

/// Detect the language of a text as an ISO 639-1 code, falling back to English
pub fn detect_language(text: &str) -> String {
    match detect(text) {
        Some(detection) => {
            tracing::debug!(
                "Detected language '{}' ({:?}, confidence {:.2}, reliable: {})",
                detection.code,
                detection.script,
                detection.confidence,
                detection.reliable
            );
            detection.code.to_string()
        }
        None => {
            tracing::debug!("No letters to detect, falling back to '{}'", FALLBACK_LANGUAGE);
            FALLBACK_LANGUAGE.to_string()
        }
    }
}

/// Resolve the processing language from the selector and the message
pub fn resolve_language(selection: LanguageSelection, text: &str) -> String {
    match selection {
        LanguageSelection::Auto => detect_language(text),
        LanguageSelection::Manual(lang) => lang.code().to_string(),
    }
}
