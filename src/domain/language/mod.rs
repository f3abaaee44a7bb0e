// Language table and release-level language marker

use std::fmt;

use crate::domain::model::AudioFacts;

/// Display data for one language code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageEntry {
    pub code: &'static str,
    /// Short display name (`FR`, `EN`, ...)
    pub display: &'static str,
    /// Country code used for the flag picture
    pub country: &'static str,
}

const fn entry(code: &'static str, display: &'static str, country: &'static str) -> LanguageEntry {
    LanguageEntry { code, display, country }
}

const LANGUAGES: &[LanguageEntry] = &[
    entry("fre", "FR", "fr"),
    entry("fra", "FR", "fr"),
    entry("fr", "FR", "fr"),
    entry("eng", "EN", "gb"),
    entry("en", "EN", "gb"),
    entry("jpn", "JP", "jp"),
    entry("ja", "JP", "jp"),
    entry("ger", "DE", "de"),
    entry("deu", "DE", "de"),
    entry("de", "DE", "de"),
    entry("spa", "ES", "es"),
    entry("es", "ES", "es"),
    entry("ita", "IT", "it"),
    entry("it", "IT", "it"),
    entry("por", "PT", "pt"),
    entry("pt", "PT", "pt"),
    entry("rus", "RU", "ru"),
    entry("ru", "RU", "ru"),
    entry("chi", "ZH", "cn"),
    entry("zho", "ZH", "cn"),
    entry("zh", "ZH", "cn"),
    entry("kor", "KO", "kr"),
    entry("ko", "KO", "kr"),
    entry("ara", "AR", "sa"),
    entry("ar", "AR", "sa"),
];

const UNKNOWN_COUNTRY: &str = "un";

/// Look up a language code: first three characters, then first two
pub fn lookup(code: &str) -> Option<&'static LanguageEntry> {
    let normalized: String = code.to_lowercase().chars().take(3).collect();
    let find = |key: &str| LANGUAGES.iter().find(|entry| entry.code == key);

    find(&normalized).or_else(|| {
        if normalized.chars().count() >= 2 {
            let short: String = normalized.chars().take(2).collect();
            find(&short)
        } else {
            None
        }
    })
}

/// Short display name, the uppercased raw code when unknown
pub fn display_name(code: &str) -> String {
    lookup(code)
        .map(|entry| entry.display.to_string())
        .unwrap_or_else(|| code.to_uppercase())
}

/// BBCode flag picture for a language code
pub fn flag(code: &str) -> String {
    let country = lookup(code).map_or(UNKNOWN_COUNTRY, |entry| entry.country);
    format!("[img]https://flagcdn.com/20x15/{}.png[/img]", country)
}

/// Contribution of one audio language to the release name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseLanguage {
    /// English: the default, contributes no token
    Implicit,
    Named(&'static str),
}

const RELEASE_LANGUAGES: &[(&str, ReleaseLanguage)] = &[
    ("fr", ReleaseLanguage::Named("FRENCH")),
    ("fre", ReleaseLanguage::Named("FRENCH")),
    ("fra", ReleaseLanguage::Named("FRENCH")),
    ("french", ReleaseLanguage::Named("FRENCH")),
    ("eng", ReleaseLanguage::Implicit),
    ("english", ReleaseLanguage::Implicit),
    ("ger", ReleaseLanguage::Named("GERMAN")),
    ("deu", ReleaseLanguage::Named("GERMAN")),
    ("german", ReleaseLanguage::Named("GERMAN")),
    ("spa", ReleaseLanguage::Named("SPANISH")),
    ("ita", ReleaseLanguage::Named("ITALIAN")),
    ("jpn", ReleaseLanguage::Named("JAPANESE")),
    ("kor", ReleaseLanguage::Named("KOREAN")),
    ("chi", ReleaseLanguage::Named("CHINESE")),
    ("zho", ReleaseLanguage::Named("CHINESE")),
    ("rus", ReleaseLanguage::Named("RUSSIAN")),
    ("por", ReleaseLanguage::Named("PORTUGUESE")),
    ("ara", ReleaseLanguage::Named("ARABIC")),
];

const FRENCH: &str = "FRENCH";

/// Release language of a raw code, exact match on the lowercased code
pub fn release_language(code: &str) -> Option<ReleaseLanguage> {
    let lower = code.to_lowercase();
    RELEASE_LANGUAGES
        .iter()
        .find(|(key, _)| *key == lower)
        .map(|(_, language)| *language)
}

/// Release-level language marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageMarker {
    /// French and English audio
    Multi,
    /// French audio without English
    Vf,
    /// Other named languages in first-seen order
    Languages(Vec<&'static str>),
    None,
}

impl LanguageMarker {
    /// Resolve the marker for audio tracks in probe order
    ///
    /// Precedence is MULTI, then VF, then the joined language list.
    pub fn resolve(tracks: &[AudioFacts]) -> Self {
        let mut names: Vec<&'static str> = Vec::new();
        let mut has_french = false;
        let mut has_english = false;

        for track in tracks {
            let lower = track.language.to_lowercase();
            let Some(language) = release_language(&lower) else {
                continue;
            };

            if lower == "eng" || lower == "english" {
                has_english = true;
            }
            if let ReleaseLanguage::Named(name) = language {
                if name == FRENCH {
                    has_french = true;
                }
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }

        if has_french && has_english {
            Self::Multi
        } else if has_french {
            Self::Vf
        } else if !names.is_empty() {
            Self::Languages(names)
        } else {
            Self::None
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for LanguageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Multi => write!(f, "MULTI"),
            Self::Vf => write!(f, "VF"),
            Self::Languages(names) => write!(f, "{}", names.join(".")),
            Self::None => Ok(()),
        }
    }
}

/// Release-name language token for a set of audio tracks, possibly empty
pub fn resolve_marker(tracks: &[AudioFacts]) -> String {
    LanguageMarker::resolve(tracks).to_string()
}
