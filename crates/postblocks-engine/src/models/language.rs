use serde::{Deserialize, Serialize};

use crate::models::Section;

/// One translation of the post: locale metadata plus its own section tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageVersion {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub native_name: String,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub is_default: bool,
}

impl LanguageVersion {
    /// A language with no content yet
    pub fn empty(
        code: impl Into<String>,
        name: impl Into<String>,
        native_name: impl Into<String>,
        flag: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            native_name: native_name.into(),
            flag: flag.into(),
            sections: Vec::new(),
            is_default: false,
        }
    }

    /// The language a new document starts with
    pub fn english() -> Self {
        Self {
            is_default: true,
            ..Self::empty("en", "English", "English", "🇺🇸")
        }
    }
}

/// Entry of the built-in language catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonLanguage {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub flag: &'static str,
}

impl CommonLanguage {
    pub fn to_version(self) -> LanguageVersion {
        LanguageVersion::empty(self.code, self.name, self.native_name, self.flag)
    }
}

pub const COMMON_LANGUAGES: &[CommonLanguage] = &[
    CommonLanguage { code: "vi", name: "Vietnamese", native_name: "Tiếng Việt", flag: "🇻🇳" },
    CommonLanguage { code: "zh", name: "Chinese", native_name: "中文", flag: "🇨🇳" },
    CommonLanguage { code: "ja", name: "Japanese", native_name: "日本語", flag: "🇯🇵" },
    CommonLanguage { code: "ko", name: "Korean", native_name: "한국어", flag: "🇰🇷" },
    CommonLanguage { code: "es", name: "Spanish", native_name: "Español", flag: "🇪🇸" },
    CommonLanguage { code: "fr", name: "French", native_name: "Français", flag: "🇫🇷" },
    CommonLanguage { code: "de", name: "German", native_name: "Deutsch", flag: "🇩🇪" },
    CommonLanguage { code: "it", name: "Italian", native_name: "Italiano", flag: "🇮🇹" },
    CommonLanguage { code: "pt", name: "Portuguese", native_name: "Português", flag: "🇵🇹" },
    CommonLanguage { code: "ru", name: "Russian", native_name: "Русский", flag: "🇷🇺" },
    CommonLanguage { code: "ar", name: "Arabic", native_name: "العربية", flag: "🇸🇦" },
    CommonLanguage { code: "hi", name: "Hindi", native_name: "हिन्दी", flag: "🇮🇳" },
    CommonLanguage { code: "th", name: "Thai", native_name: "ไทย", flag: "🇹🇭" },
    CommonLanguage { code: "id", name: "Indonesian", native_name: "Bahasa Indonesia", flag: "🇮🇩" },
    CommonLanguage { code: "ms", name: "Malay", native_name: "Bahasa Melayu", flag: "🇲🇾" },
];

pub fn find_common_language(code: &str) -> Option<CommonLanguage> {
    COMMON_LANGUAGES.iter().copied().find(|lang| lang.code == code)
}

/// Catalog entries not yet present in `languages`
pub fn available_languages(languages: &[LanguageVersion]) -> Vec<CommonLanguage> {
    COMMON_LANGUAGES
        .iter()
        .copied()
        .filter(|common| !languages.iter().any(|lang| lang.code == common.code))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_language_json_uses_camel_case() {
        let value = serde_json::to_value(LanguageVersion::english()).unwrap();
        assert_eq!(
            value,
            json!({
                "code": "en",
                "name": "English",
                "nativeName": "English",
                "flag": "🇺🇸",
                "sections": [],
                "isDefault": true
            })
        );
    }

    #[test]
    fn test_missing_is_default_means_false() {
        let lang: LanguageVersion = serde_json::from_value(json!({
            "code": "vi",
            "name": "Vietnamese",
            "nativeName": "Tiếng Việt",
            "flag": "🇻🇳",
            "sections": []
        }))
        .unwrap();
        assert!(!lang.is_default);
    }

    #[test]
    fn test_available_languages_excludes_present_codes() {
        let present = vec![LanguageVersion::english(), find_common_language("vi").unwrap().to_version()];
        let available = available_languages(&present);

        assert_eq!(available.len(), COMMON_LANGUAGES.len() - 1);
        assert!(available.iter().all(|lang| lang.code != "vi"));
    }
}
