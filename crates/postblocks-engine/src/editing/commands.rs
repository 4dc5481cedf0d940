use serde::{Deserialize, Serialize};

use crate::editing::{DocumentStore, EditError};
use crate::models::{
    Block, BlockContent, BlockId, BlockKind, Column, ColumnId, LanguageVersion, Section,
    SectionId, find_common_language,
};

/// Commands that can be applied to the document store.
///
/// Section, column and block commands act on the current language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Cmd {
    AddSection,
    UpdateSection {
        id: SectionId,
        section: Section,
    },
    DeleteSection {
        id: SectionId,
    },
    MoveSection {
        id: SectionId,
        to: usize,
    },
    AddColumn {
        section_id: SectionId,
    },
    RemoveColumn {
        section_id: SectionId,
        column_id: ColumnId,
    },
    UpdateColumn {
        section_id: SectionId,
        column: Column,
    },
    AddBlock {
        section_id: SectionId,
        column_id: ColumnId,
        kind: BlockKind,
    },
    UpdateBlock {
        section_id: SectionId,
        column_id: ColumnId,
        block_id: BlockId,
        content: BlockContent,
    },
    DeleteBlock {
        section_id: SectionId,
        column_id: ColumnId,
        block_id: BlockId,
    },
    /// Move a block between columns of one section. Without an index the
    /// block is appended to the target column.
    MoveBlock {
        section_id: SectionId,
        block_id: BlockId,
        from: ColumnId,
        to: ColumnId,
        #[serde(default)]
        index: Option<usize>,
    },
    AddLanguage {
        language: LanguageVersion,
    },
    AddCommonLanguage {
        code: String,
    },
    UpdateLanguage {
        code: String,
        language: LanguageVersion,
    },
    DeleteLanguage {
        code: String,
    },
    /// Overwrite the target language's sections with a deep copy of the
    /// current language's sections
    DuplicateToLanguage {
        target: String,
    },
    SwitchLanguage {
        code: String,
    },
    SetPreviewLanguage {
        code: String,
    },
    SetDefaultLanguage {
        code: String,
    },
}

/// Execute a command against the store, reporting whether anything changed
pub(crate) fn execute(store: &mut DocumentStore, cmd: Cmd) -> Result<bool, EditError> {
    match cmd {
        Cmd::AddSection => {
            store.current_mut().sections.push(Section::new());
            Ok(true)
        }
        Cmd::UpdateSection { id, section } => {
            check_columns(&section)?;
            Ok(match store.section_mut(&id) {
                Some(existing) => replace(existing, section),
                None => ignored("update of missing section", &id),
            })
        }
        Cmd::DeleteSection { id } => {
            let sections = &mut store.current_mut().sections;
            let before = sections.len();
            sections.retain(|section| section.id != id);
            Ok(sections.len() != before || ignored("delete of missing section", &id))
        }
        Cmd::MoveSection { id, to } => {
            let sections = &mut store.current_mut().sections;
            let Some(from) = sections.iter().position(|section| section.id == id) else {
                return Ok(ignored("move of missing section", &id));
            };
            let to = to.min(sections.len() - 1);
            if from == to {
                return Ok(false);
            }
            let section = sections.remove(from);
            sections.insert(to, section);
            Ok(true)
        }
        Cmd::AddColumn { section_id } => {
            let Some(section) = store.section_mut(&section_id) else {
                return Ok(ignored("add column to missing section", &section_id));
            };
            if !section.can_add_column() {
                return Ok(ignored("add column beyond limit", &section_id));
            }
            section.columns.push(Column::new());
            Ok(true)
        }
        Cmd::RemoveColumn {
            section_id,
            column_id,
        } => {
            let Some(section) = store.section_mut(&section_id) else {
                return Ok(ignored("remove column from missing section", &section_id));
            };
            if !section.can_remove_column() {
                return Ok(ignored("remove last column", &section_id));
            }
            let before = section.columns.len();
            section.columns.retain(|column| column.id != column_id);
            Ok(section.columns.len() != before || ignored("remove missing column", &column_id))
        }
        Cmd::UpdateColumn { section_id, column } => {
            let Some(existing) = store
                .section_mut(&section_id)
                .and_then(|section| section.column_mut(&column.id))
            else {
                return Ok(ignored("update of missing column", &column.id));
            };
            Ok(replace(existing, column))
        }
        Cmd::AddBlock {
            section_id,
            column_id,
            kind,
        } => {
            let Some(column) = store.column_mut(&section_id, &column_id) else {
                return Ok(ignored("add block to missing column", &column_id));
            };
            column.blocks.push(Block::new(kind));
            Ok(true)
        }
        Cmd::UpdateBlock {
            section_id,
            column_id,
            block_id,
            content,
        } => {
            let Some(block) = store
                .column_mut(&section_id, &column_id)
                .and_then(|column| column.block_mut(&block_id))
            else {
                return Ok(ignored("update of missing block", &block_id));
            };
            Ok(replace(&mut block.content, content))
        }
        Cmd::DeleteBlock {
            section_id,
            column_id,
            block_id,
        } => {
            let removed = store
                .column_mut(&section_id, &column_id)
                .and_then(|column| column.take_block(&block_id));
            Ok(removed.is_some() || ignored("delete of missing block", &block_id))
        }
        Cmd::MoveBlock {
            section_id,
            block_id,
            from,
            to,
            index,
        } => move_block(store, &section_id, &block_id, &from, &to, index),
        Cmd::AddLanguage { language } => add_language(store, language),
        Cmd::AddCommonLanguage { code } => {
            let common =
                find_common_language(&code).ok_or_else(|| EditError::UnknownLanguage(code))?;
            add_language(store, common.to_version())
        }
        Cmd::UpdateLanguage { code, language } => update_language(store, &code, language),
        Cmd::DeleteLanguage { code } => Ok(delete_language(store, &code)),
        Cmd::DuplicateToLanguage { target } => {
            if target == store.current_language {
                return Ok(ignored("duplicate onto itself", &target));
            }
            let sections = store.current().sections.clone();
            let Some(language) = store.language_mut(&target) else {
                return Ok(ignored("duplicate to missing language", &target));
            };
            Ok(replace(&mut language.sections, sections))
        }
        Cmd::SwitchLanguage { code } => Ok(select(store, &code, Selector::Current)),
        Cmd::SetPreviewLanguage { code } => Ok(select(store, &code, Selector::Preview)),
        Cmd::SetDefaultLanguage { code } => {
            if store.language(&code).is_none() {
                return Ok(ignored("default for missing language", &code));
            }
            let mut changed = false;
            for language in &mut store.languages {
                let is_default = language.code == code;
                changed |= language.is_default != is_default;
                language.is_default = is_default;
            }
            Ok(changed)
        }
    }
}

/// Overwrite `slot` with `value`, reporting whether it differed
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn ignored(what: &str, id: &dyn std::fmt::Display) -> bool {
    log::debug!("Ignoring {what}: {id}");
    false
}

fn move_block(
    store: &mut DocumentStore,
    section_id: &SectionId,
    block_id: &BlockId,
    from: &ColumnId,
    to: &ColumnId,
    index: Option<usize>,
) -> Result<bool, EditError> {
    if from == to {
        return Ok(ignored("drop onto source column", to));
    }
    let Some(section) = store.section_mut(section_id) else {
        return Ok(ignored("move within missing section", section_id));
    };
    if section.column(to).is_none() {
        return Ok(ignored("move to missing column", to));
    }
    let Some(block) = section
        .column_mut(from)
        .and_then(|column| column.take_block(block_id))
    else {
        return Ok(ignored("move of missing block", block_id));
    };

    let Some(target) = section.column_mut(to) else {
        return Ok(false);
    };
    let at = index.unwrap_or(target.blocks.len()).min(target.blocks.len());
    target.blocks.insert(at, block);
    Ok(true)
}

fn check_columns(section: &Section) -> Result<(), EditError> {
    if !section.has_valid_column_count() {
        return Err(EditError::ColumnCount(section.columns.len()));
    }
    Ok(())
}

/// Every section of a language version must hold 1 to 3 columns
pub(crate) fn check_sections(language: &LanguageVersion) -> Result<(), EditError> {
    language.sections.iter().try_for_each(check_columns)
}

fn validate_language(language: &LanguageVersion) -> Result<(), EditError> {
    if language.code.trim().is_empty() || language.name.trim().is_empty() {
        return Err(EditError::InvalidLanguage);
    }
    check_sections(language)
}

fn add_language(store: &mut DocumentStore, language: LanguageVersion) -> Result<bool, EditError> {
    validate_language(&language)?;
    if store.language(&language.code).is_some() {
        return Ok(ignored("add of existing language", &language.code));
    }
    store.languages.push(language);
    Ok(true)
}

fn update_language(
    store: &mut DocumentStore,
    code: &str,
    language: LanguageVersion,
) -> Result<bool, EditError> {
    validate_language(&language)?;
    if language.code != code && store.language(&language.code).is_some() {
        return Err(EditError::LanguageCodeTaken(language.code));
    }

    let new_code = language.code.clone();
    let Some(existing) = store.language_mut(code) else {
        return Ok(ignored("update of missing language", &code));
    };
    let changed = replace(existing, language);

    if store.current_language == code {
        store.current_language = new_code.clone();
    }
    if store.preview_language == code {
        store.preview_language = new_code;
    }
    Ok(changed)
}

fn delete_language(store: &mut DocumentStore, code: &str) -> bool {
    if store.languages.len() <= 1 {
        return ignored("delete of last language", &code);
    }
    let before = store.languages.len();
    store.languages.retain(|language| language.code != code);
    if store.languages.len() == before {
        return ignored("delete of missing language", &code);
    }

    let first = store.languages[0].code.clone();
    if store.current_language == code {
        store.current_language = first.clone();
    }
    if store.preview_language == code {
        store.preview_language = first;
    }
    true
}

enum Selector {
    Current,
    Preview,
}

fn select(store: &mut DocumentStore, code: &str, selector: Selector) -> bool {
    if store.language(code).is_none() {
        return ignored("switch to missing language", &code);
    }
    let slot = match selector {
        Selector::Current => &mut store.current_language,
        Selector::Preview => &mut store.preview_language,
    };
    replace(slot, code.to_string())
}
