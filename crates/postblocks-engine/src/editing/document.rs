use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::editing::{Cmd, EditError, Patch, commands};
use crate::models::{Column, ColumnId, LanguageVersion, Section, SectionId};

/// All language versions of one post plus the editing and preview
/// selections. Always holds at least one language, and both selections
/// always name a language that exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDocument")]
pub struct DocumentStore {
    pub(crate) languages: Vec<LanguageVersion>,
    pub(crate) current_language: String,
    pub(crate) preview_language: String,
    #[serde(skip)]
    version: u64,
}

impl DocumentStore {
    /// Start a document from existing language versions
    pub fn new(languages: Vec<LanguageVersion>) -> Result<Self, EditError> {
        let mut seen = HashSet::new();
        for language in &languages {
            if !seen.insert(language.code.as_str()) {
                return Err(EditError::LanguageCodeTaken(language.code.clone()));
            }
            commands::check_sections(language)?;
        }
        let first = languages
            .first()
            .map(|language| language.code.clone())
            .ok_or(EditError::NoLanguages)?;
        Ok(Self {
            languages,
            current_language: first.clone(),
            preview_language: first,
            version: 0,
        })
    }

    pub fn languages(&self) -> &[LanguageVersion] {
        &self.languages
    }

    pub fn language(&self, code: &str) -> Option<&LanguageVersion> {
        self.languages.iter().find(|language| language.code == code)
    }

    pub fn current_language(&self) -> &str {
        &self.current_language
    }

    pub fn preview_language(&self) -> &str {
        &self.preview_language
    }

    /// The language version being edited
    pub fn current(&self) -> &LanguageVersion {
        &self.languages[self.index_of(&self.current_language)]
    }

    /// The language version shown in preview
    pub fn preview(&self) -> &LanguageVersion {
        &self.languages[self.index_of(&self.preview_language)]
    }

    pub fn current_sections(&self) -> &[Section] {
        &self.current().sections
    }

    /// The language marked as default, falling back to the first one
    pub fn default_language(&self) -> &LanguageVersion {
        self.languages
            .iter()
            .find(|language| language.is_default)
            .unwrap_or(&self.languages[0])
    }

    /// Monotonic counter bumped by every command that changed something
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a command, bumping the version when it changed the document
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let changed = commands::execute(self, cmd)?;
        if changed {
            self.version += 1;
        }
        Ok(Patch {
            changed,
            version: self.version,
        })
    }

    fn index_of(&self, code: &str) -> usize {
        self.languages
            .iter()
            .position(|language| language.code == code)
            .unwrap_or(0)
    }

    pub(crate) fn current_mut(&mut self) -> &mut LanguageVersion {
        let index = self.index_of(&self.current_language);
        &mut self.languages[index]
    }

    pub(crate) fn language_mut(&mut self, code: &str) -> Option<&mut LanguageVersion> {
        self.languages
            .iter_mut()
            .find(|language| language.code == code)
    }

    pub(crate) fn section_mut(&mut self, id: &SectionId) -> Option<&mut Section> {
        self.current_mut()
            .sections
            .iter_mut()
            .find(|section| &section.id == id)
    }

    pub(crate) fn column_mut(
        &mut self,
        section_id: &SectionId,
        column_id: &ColumnId,
    ) -> Option<&mut Column> {
        self.section_mut(section_id)?.column_mut(column_id)
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        let english = LanguageVersion::english();
        Self {
            current_language: english.code.clone(),
            preview_language: english.code.clone(),
            languages: vec![english],
            version: 0,
        }
    }
}

/// Serialized document before its selections have been checked
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    languages: Vec<LanguageVersion>,
    #[serde(default)]
    current_language: Option<String>,
    #[serde(default)]
    preview_language: Option<String>,
}

impl TryFrom<RawDocument> for DocumentStore {
    type Error = EditError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        let mut store = DocumentStore::new(raw.languages)?;
        if let Some(code) = raw.current_language.filter(|code| store.language(code).is_some()) {
            store.current_language = code;
        }
        if let Some(code) = raw.preview_language.filter(|code| store.language(code).is_some()) {
            store.preview_language = code;
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Block, BlockKind, find_common_language};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn vietnamese() -> LanguageVersion {
        find_common_language("vi").unwrap().to_version()
    }

    fn store_with_section() -> (DocumentStore, SectionId, ColumnId) {
        let mut store = DocumentStore::default();
        store.apply(Cmd::AddSection).unwrap();
        let section = &store.current_sections()[0];
        let ids = (section.id.clone(), section.columns[0].id.clone());
        (store, ids.0, ids.1)
    }

    #[test]
    fn test_default_store_is_english() {
        let store = DocumentStore::default();
        assert_eq!(store.languages().len(), 1);
        assert_eq!(store.current_language(), "en");
        assert_eq!(store.preview_language(), "en");
        assert!(store.current().is_default);
        assert!(store.current_sections().is_empty());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_version_only_bumps_on_change() {
        let (mut store, section_id, column_id) = store_with_section();
        assert_eq!(store.version(), 1);

        let patch = store
            .apply(Cmd::RemoveColumn {
                section_id,
                column_id,
            })
            .unwrap();

        assert_eq!(
            patch,
            Patch {
                changed: false,
                version: 1
            }
        );
    }

    #[test]
    fn test_new_rejects_empty_and_duplicate_languages() {
        assert_eq!(DocumentStore::new(vec![]), Err(EditError::NoLanguages));
        assert_eq!(
            DocumentStore::new(vec![LanguageVersion::english(), LanguageVersion::english()]),
            Err(EditError::LanguageCodeTaken("en".to_string()))
        );
    }

    #[test]
    fn test_deserialize_falls_back_to_first_language() {
        let store: DocumentStore = serde_json::from_value(json!({
            "languages": [
                {"code": "en", "name": "English"},
                {"code": "vi", "name": "Vietnamese"}
            ],
            "currentLanguage": "fr",
            "previewLanguage": "vi"
        }))
        .unwrap();

        assert_eq!(store.current_language(), "en");
        assert_eq!(store.preview_language(), "vi");
    }

    #[test]
    fn test_deserialize_rejects_empty_languages() {
        let result: Result<DocumentStore, _> = serde_json::from_value(json!({"languages": []}));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let store = DocumentStore::default();
        let value = serde_json::to_value(&store).unwrap();
        assert_eq!(value["currentLanguage"], "en");
        assert_eq!(value["previewLanguage"], "en");
        assert_eq!(value["languages"][0]["code"], "en");
        assert!(value.get("version").is_none());
    }

    #[test]
    fn test_edits_target_current_language_only() {
        let mut store = DocumentStore::default();
        store
            .apply(Cmd::AddLanguage {
                language: vietnamese(),
            })
            .unwrap();
        store
            .apply(Cmd::SwitchLanguage {
                code: "vi".to_string(),
            })
            .unwrap();
        store.apply(Cmd::AddSection).unwrap();

        assert_eq!(store.language("vi").unwrap().sections.len(), 1);
        assert!(store.language("en").unwrap().sections.is_empty());
    }

    #[test]
    fn test_column_mut_finds_nested_column() {
        let (mut store, section_id, column_id) = store_with_section();
        store
            .column_mut(&section_id, &column_id)
            .unwrap()
            .blocks
            .push(Block::new(BlockKind::Embed));

        assert_eq!(store.current_sections()[0].columns[0].blocks.len(), 1);
        assert!(
            store
                .column_mut(&section_id, &ColumnId::from("missing"))
                .is_none()
        );
    }

    #[test]
    fn test_default_language_falls_back_to_first() {
        let mut vi = vietnamese();
        vi.is_default = false;
        let store = DocumentStore::new(vec![vi]).unwrap();
        assert_eq!(store.default_language().code, "vi");
    }
}
