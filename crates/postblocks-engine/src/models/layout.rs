use serde::{Deserialize, Serialize};

use crate::models::{Block, BlockId, ColumnId, SectionId};

/// Upper bound on columns in one section row
pub const MAX_COLUMNS: usize = 3;
/// Lower bound on columns in one section row
pub const MIN_COLUMNS: usize = 1;

/// Ordered list of blocks rendered as one grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Column {
    /// An empty column with a fresh id
    pub fn new() -> Self {
        Self {
            id: ColumnId::generate(),
            blocks: Vec::new(),
        }
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| &block.id == id)
    }

    pub(crate) fn block_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|block| &block.id == id)
    }

    /// Remove a block, returning it if it was present
    pub(crate) fn take_block(&mut self, id: &BlockId) -> Option<Block> {
        let index = self.blocks.iter().position(|block| &block.id == id)?;
        Some(self.blocks.remove(index))
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

/// A row of one to three columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub columns: Vec<Column>,
}

impl Section {
    /// A section with a fresh id and a single empty column
    pub fn new() -> Self {
        Self {
            id: SectionId::generate(),
            columns: vec![Column::new()],
        }
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| &column.id == id)
    }

    pub(crate) fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| &column.id == id)
    }

    pub fn has_valid_column_count(&self) -> bool {
        (MIN_COLUMNS..=MAX_COLUMNS).contains(&self.columns.len())
    }

    pub fn can_add_column(&self) -> bool {
        self.columns.len() < MAX_COLUMNS
    }

    pub fn can_remove_column(&self) -> bool {
        self.columns.len() > MIN_COLUMNS
    }

    /// Every block in reading order: column by column, top to bottom
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.columns.iter().flat_map(|column| column.blocks.iter())
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}
