//! Program (day → blocks) model.
//!
//! Each day's blocks are kept ordered by their persisted time text. The text
//! is zero-padded 24h, so lexicographic order is chronological order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Block;

/// The whole event program: block lists keyed by day id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    days: BTreeMap<String, Vec<Block>>,
}

/// Replaces the block with the same id (or appends it) and re-sorts by time.
pub fn upsert_sorted(blocks: &[Block], block: Block) -> Vec<Block> {
    let mut updated = blocks.to_vec();
    match updated.iter_mut().find(|b| b.id == block.id) {
        Some(slot) => *slot = block,
        None => updated.push(block),
    }
    sort_by_time(&mut updated);
    updated
}

/// Returns the blocks without the one whose id is `block_id`.
pub fn without_block(blocks: &[Block], block_id: &str) -> Vec<Block> {
    blocks.iter().filter(|b| b.id != block_id).cloned().collect()
}

/// Stable sort by persisted time text.
pub fn sort_by_time(blocks: &mut [Block]) {
    blocks.sort_by_key(Block::time_label);
}

impl Program {
    /// Creates an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks of a day (empty if the day has no collection).
    pub fn blocks(&self, day_id: &str) -> &[Block] {
        self.days.get(day_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the day has a block collection.
    pub fn has_day(&self, day_id: &str) -> bool {
        self.days.contains_key(day_id)
    }

    /// Ensures an (empty) block collection exists for the day.
    pub fn ensure_day(&mut self, day_id: impl Into<String>) {
        self.days.entry(day_id.into()).or_default();
    }

    /// Drops a day's block collection, returning it.
    pub fn remove_day(&mut self, day_id: &str) -> Option<Vec<Block>> {
        self.days.remove(day_id)
    }

    /// Replaces a day's blocks, keeping them sorted.
    pub fn set_blocks(&mut self, day_id: impl Into<String>, mut blocks: Vec<Block>) {
        sort_by_time(&mut blocks);
        self.days.insert(day_id.into(), blocks);
    }

    /// Finds a block on a day.
    pub fn find_block(&self, day_id: &str, block_id: &str) -> Option<&Block> {
        self.blocks(day_id).iter().find(|b| b.id == block_id)
    }

    /// Day ids that have a block collection.
    pub fn day_ids(&self) -> impl Iterator<Item = &str> {
        self.days.keys().map(String::as_str)
    }

    /// Iterates `(day_id, blocks)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Block])> {
        self.days.iter().map(|(id, b)| (id.as_str(), b.as_slice()))
    }

    /// Total number of blocks across all days.
    pub fn block_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// `(day_id, block_id)` pairs of blocks that reference a hall,
    /// including untitled split sessions.
    pub fn blocks_referencing_hall(&self, hall_id: &str) -> Vec<(String, String)> {
        self.iter()
            .flat_map(move |(day_id, blocks)| {
                blocks
                    .iter()
                    .filter(move |b| b.referenced_halls().contains(&hall_id))
                    .map(move |b| (day_id.to_string(), b.id.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_interval, Session};

    fn full(id: &str, time: &str, hall: &str) -> Block {
        Block::full(id, parse_interval(time).unwrap(), hall, id)
    }

    #[test]
    fn test_upsert_appends_and_sorts() {
        let blocks = vec![full("a", "10:00 - 11:00", "h1")];
        let updated = upsert_sorted(&blocks, full("b", "08:00 - 09:00", "h1"));
        let ids: Vec<_> = updated.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let blocks = vec![full("a", "10:00 - 11:00", "h1"), full("b", "12:00 - 13:00", "h1")];
        let updated = upsert_sorted(&blocks, full("b", "09:00 - 09:30", "h2"));
        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0].id, "b");
        assert_eq!(updated[0].time_label(), "09:00 - 09:30");
    }

    #[test]
    fn test_without_block() {
        let blocks = vec![full("a", "10:00 - 11:00", "h1"), full("b", "12:00 - 13:00", "h1")];
        let rest = without_block(&blocks, "a");
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id, "b");
    }

    #[test]
    fn test_program_days() {
        let mut p = Program::new();
        p.ensure_day("d1");
        assert!(p.has_day("d1"));
        assert!(p.blocks("d1").is_empty());
        assert!(p.blocks("missing").is_empty());

        p.set_blocks("d1", vec![full("a", "11:00 - 12:00", "h1"), full("b", "09:00 - 10:00", "h1")]);
        assert_eq!(p.blocks("d1")[0].id, "b");
        assert_eq!(p.block_count(), 2);
        assert!(p.find_block("d1", "a").is_some());

        assert_eq!(p.remove_day("d1").map(|b| b.len()), Some(2));
        assert!(!p.has_day("d1"));
    }

    #[test]
    fn test_blocks_referencing_hall() {
        let mut p = Program::new();
        let split = Block::split("s", parse_interval("09:00 - 10:00").unwrap())
            .with_session("h2", Session::default());
        p.set_blocks("d1", vec![full("a", "11:00 - 12:00", "h1"), split]);
        assert_eq!(p.blocks_referencing_hall("h2"), vec![("d1".to_string(), "s".to_string())]);
        assert_eq!(p.blocks_referencing_hall("h1").len(), 1);
        assert!(p.blocks_referencing_hall("h3").is_empty());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut p = Program::new();
        p.ensure_day("d1");
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"d1":[]}"#);
    }
}
