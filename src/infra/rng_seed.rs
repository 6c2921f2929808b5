//! RngSeed: базовый seed стола и выведение seed'а каждой раздачи.
//!
//! ```text
//! seed(hand) = H(domain || base || table_id || hand_id)
//! ```
//!
//! Один и тот же base seed даёт одну и ту же последовательность колод за столом.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{HandId, TableId};
use crate::engine::RandomSource;
use crate::infra::rng::DeterministicRng;

const DOMAIN: &[u8] = b"HOLDEM_TABLE_RNG_V1";

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Seed из u64 (для тестов).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Seed конкретной раздачи.
    pub fn derive(&self, table_id: TableId, hand_id: HandId) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN);
        hasher.update(self.bytes);
        hasher.update(table_id.to_le_bytes());
        hasher.update(hand_id.to_le_bytes());

        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        Self { bytes: out }
    }

    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed_bytes(self.bytes)
    }
}

/// RandomSource, который пересевается на каждую раздачу по `(table_id, hand_id)`.
#[derive(Clone, Debug)]
pub struct SeededTableRng {
    base: RngSeed,
    table_id: TableId,
    /// Номер перетасовки: одна на раздачу.
    hand_index: HandId,
}

impl SeededTableRng {
    pub fn new(base: RngSeed, table_id: TableId) -> Self {
        Self {
            base,
            table_id,
            hand_index: 0,
        }
    }
}

impl RandomSource for SeededTableRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        self.hand_index += 1;
        self.base
            .derive(self.table_id, self.hand_index)
            .to_rng()
            .shuffle(slice);
    }
}
