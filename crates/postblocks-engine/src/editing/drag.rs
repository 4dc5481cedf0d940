use crate::editing::Cmd;
use crate::models::{BlockId, ColumnId, SectionId};

/// A block being dragged between the columns of one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    section_id: SectionId,
    block_id: BlockId,
    source_column: ColumnId,
}

impl DragSession {
    pub fn start(section_id: SectionId, block_id: BlockId, source_column: ColumnId) -> Self {
        Self {
            section_id,
            block_id,
            source_column,
        }
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    pub fn source_column(&self) -> &ColumnId {
        &self.source_column
    }

    /// Finish the drag over `target`, appending the block to that column.
    ///
    /// Returns `None` when dropped on its own column or on another section.
    pub fn drop_on(self, section_id: &SectionId, target: &ColumnId) -> Option<Cmd> {
        self.drop_at(section_id, target, None)
    }

    /// Like [`DragSession::drop_on`] with an explicit insertion index
    pub fn drop_at(
        self,
        section_id: &SectionId,
        target: &ColumnId,
        index: Option<usize>,
    ) -> Option<Cmd> {
        if &self.section_id != section_id || &self.source_column == target {
            log::debug!("Drop of {} ignored", self.block_id);
            return None;
        }
        Some(Cmd::MoveBlock {
            section_id: self.section_id,
            block_id: self.block_id,
            from: self.source_column,
            to: target.clone(),
            index,
        })
    }
}
