use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::engine::errors::MergeError;

/// Which input supplies a plan slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Existing,
    New,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSlot {
    pub position: u64,
    pub origin: Origin,
}

/// Output order of a merge: one slot per record, positions `0..len`.
#[derive(Debug, Clone)]
pub struct Plan {
    slots: Vec<PlanSlot>,
    existing_count: u64,
    new_count: u64,
}

impl Plan {
    pub fn slots(&self) -> &[PlanSlot] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanSlot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn existing_count(&self) -> u64 {
        self.existing_count
    }

    pub fn new_count(&self) -> u64 {
        self.new_count
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SequencePlanner {
    shuffle: bool,
    seed: Option<u64>,
}

impl SequencePlanner {
    pub fn new(shuffle: bool) -> Self {
        Self { shuffle, seed: None }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(&self, existing_count: u64, new_count: u64) -> Result<Plan, MergeError> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.build_with_rng(existing_count, new_count, &mut rng)
    }

    /// Builds the plan drawing the permutation from `rng`. Unshuffled plans
    /// place every existing slot before every new one and never touch `rng`.
    pub fn build_with_rng<R: Rng + ?Sized>(
        &self,
        existing_count: u64,
        new_count: u64,
        rng: &mut R,
    ) -> Result<Plan, MergeError> {
        if existing_count == 0 {
            return Err(MergeError::InvalidInput(
                "the existing store must hold at least one record".into(),
            ));
        }
        if new_count == 0 {
            return Err(MergeError::InvalidInput(
                "at least one new record is required".into(),
            ));
        }
        let total = existing_count
            .checked_add(new_count)
            .and_then(|t| usize::try_from(t).ok())
            .ok_or_else(|| MergeError::InvalidInput("plan length overflows".into()))?;

        let mut origins = Vec::with_capacity(total);
        origins.extend((0..existing_count).map(|_| Origin::Existing));
        origins.extend((0..new_count).map(|_| Origin::New));

        if self.shuffle {
            info!(target: "sequence_planner::build", total, "Shuffling data");
            origins.shuffle(rng);
        }

        let slots = origins
            .into_iter()
            .enumerate()
            .map(|(position, origin)| PlanSlot {
                position: position as u64,
                origin,
            })
            .collect();

        Ok(Plan {
            slots,
            existing_count,
            new_count,
        })
    }
}
