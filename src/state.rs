//! Read-only chain state seen by incentive generation
//!
//! The engine owns the locked positions and the global properties. The
//! generator receives them through [`ChainState`], which must present one
//! consistent snapshot for the whole scan.

use crate::error::{ConsensusError, Result};
use crate::types::*;
use std::collections::{BTreeMap, BTreeSet};

/// Accessors the generator needs from the engine
pub trait ChainState {
    fn global_parameters(&self) -> &ChainParameters;

    fn dynamic_properties(&self) -> &DynamicProperties;

    /// Positions ordered by ascending next maturity time, ties by creation order
    fn positions_by_next_slot(&self) -> impl Iterator<Item = &LockedPosition> + '_;

    /// Positions ordered by descending pending count, ties by reverse creation order
    fn positions_by_pending(&self) -> impl Iterator<Item = &LockedPosition> + '_;

    #[inline]
    fn head_block_time(&self) -> Timestamp {
        self.dynamic_properties().time
    }
}

/// In-memory locked-position index with the two orderings incentives use
///
/// Secondary keys carry the position id so that equal maturity times and
/// equal pending counts still order deterministically.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    positions: BTreeMap<PositionId, LockedPosition>,
    by_next_slot: BTreeSet<(Timestamp, PositionId)>,
    by_pending: BTreeSet<(u16, PositionId)>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, id: PositionId) -> Option<&LockedPosition> {
        self.positions.get(&id)
    }

    /// Positions by id
    pub fn iter(&self) -> impl Iterator<Item = &LockedPosition> + '_ {
        self.positions.values()
    }

    pub fn insert(&mut self, position: LockedPosition) -> Result<()> {
        if self.positions.contains_key(&position.id) {
            return Err(ConsensusError::IndexConsistency(
                format!("duplicate locked position {}", position.id).into(),
            ));
        }
        self.by_next_slot.insert((position.next_slot, position.id));
        self.by_pending.insert((position.pending, position.id));
        self.positions.insert(position.id, position);
        Ok(())
    }

    pub fn remove(&mut self, id: PositionId) -> Result<LockedPosition> {
        let position = self.positions.remove(&id).ok_or_else(|| {
            ConsensusError::IndexConsistency(format!("unknown locked position {id}").into())
        })?;
        self.by_next_slot.remove(&(position.next_slot, id));
        self.by_pending.remove(&(position.pending, id));
        Ok(position)
    }

    /// Mutate a position, re-keying the secondary orderings
    ///
    /// The closure works on a copy; nothing is committed if it changes the id.
    pub fn modify<F>(&mut self, id: PositionId, f: F) -> Result<()>
    where
        F: FnOnce(&mut LockedPosition),
    {
        let position = self.positions.get_mut(&id).ok_or_else(|| {
            ConsensusError::IndexConsistency(format!("unknown locked position {id}").into())
        })?;

        let mut updated = position.clone();
        f(&mut updated);

        // The primary key is immutable
        if updated.id != id {
            return Err(ConsensusError::IndexConsistency(
                format!("locked position {id} id must not change").into(),
            ));
        }

        if updated.next_slot != position.next_slot {
            self.by_next_slot.remove(&(position.next_slot, id));
            self.by_next_slot.insert((updated.next_slot, id));
        }
        if updated.pending != position.pending {
            self.by_pending.remove(&(position.pending, id));
            self.by_pending.insert((updated.pending, id));
        }
        *position = updated;
        Ok(())
    }

    pub fn by_next_slot(&self) -> impl Iterator<Item = &LockedPosition> + '_ {
        self.by_next_slot
            .iter()
            .filter_map(move |(_, id)| self.positions.get(id))
    }

    pub fn by_pending(&self) -> impl Iterator<Item = &LockedPosition> + '_ {
        self.by_pending
            .iter()
            .rev()
            .filter_map(move |(_, id)| self.positions.get(id))
    }
}

impl FromIterator<LockedPosition> for PositionIndex {
    /// Later duplicates of an id replace earlier ones
    fn from_iter<I: IntoIterator<Item = LockedPosition>>(iter: I) -> Self {
        let mut index = PositionIndex::new();
        for position in iter {
            let _ = index.remove(position.id);
            // Cannot fail: any previous entry with this id was just removed
            let _ = index.insert(position);
        }
        index
    }
}

/// Explicit snapshot of everything incentive generation reads
#[derive(Debug, Clone, Default)]
pub struct ChainSnapshot {
    pub parameters: ChainParameters,
    pub dynamic_properties: DynamicProperties,
    pub positions: PositionIndex,
}

impl ChainSnapshot {
    pub fn new(
        parameters: ChainParameters,
        dynamic_properties: DynamicProperties,
        positions: PositionIndex,
    ) -> Self {
        Self {
            parameters,
            dynamic_properties,
            positions,
        }
    }
}

impl ChainState for ChainSnapshot {
    fn global_parameters(&self) -> &ChainParameters {
        &self.parameters
    }

    fn dynamic_properties(&self) -> &DynamicProperties {
        &self.dynamic_properties
    }

    fn positions_by_next_slot(&self) -> impl Iterator<Item = &LockedPosition> + '_ {
        self.positions.by_next_slot()
    }

    fn positions_by_pending(&self) -> impl Iterator<Item = &LockedPosition> + '_ {
        self.positions.by_pending()
    }
}
