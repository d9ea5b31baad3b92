use crate::model::{Block, BlockType, RelationshipType};
use std::collections::HashMap;

/// Identifier-indexed view over one document's recognition blocks.
///
/// Edges are resolved by lookup, so dangling identifiers and cycles in noisy
/// service output are harmless: an unknown identifier resolves to nothing.
#[derive(Debug)]
pub struct BlockGraph<'a> {
    blocks: &'a [Block],
    by_id: HashMap<&'a str, &'a Block>,
}

impl<'a> BlockGraph<'a> {
    /// Index a flat block sequence. Duplicate identifiers keep the last block.
    pub fn new(blocks: &'a [Block]) -> Self {
        let mut by_id = HashMap::with_capacity(blocks.len());
        for block in blocks {
            if by_id.insert(block.id.as_str(), block).is_some() {
                log::warn!("duplicate block id '{}', keeping the later block", block.id);
            }
        }
        Self { blocks, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Block> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Resolve a block's edges of the given type, dropping unknown identifiers.
    pub fn related(&self, block: &Block, kind: RelationshipType) -> Vec<&'a Block> {
        block
            .related_ids(kind)
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// Resolve a block's CHILD edges.
    pub fn children_of(&self, block: &Block) -> Vec<&'a Block> {
        self.related(block, RelationshipType::Child)
    }

    /// All blocks of one type, in document order.
    pub fn blocks_of_type(&self, block_type: BlockType) -> Vec<&'a Block> {
        self.blocks
            .iter()
            .filter(|b| b.block_type == block_type)
            .collect()
    }
}
