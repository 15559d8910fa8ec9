use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const SIM_BITS: u32 = 10;
const SIM_MASK: u32 = (1 << SIM_BITS) - 1;

/// Largest article id that fits in the 22 high bits.
pub const MAX_PAIR_ID: u32 = (1 << (32 - SIM_BITS)) - 1;
/// Largest raw similarity that fits in the 10 low bits.
pub const MAX_PAIR_SIM: u32 = SIM_MASK;
/// Raw similarities are fixed point with three decimals.
pub const SIM_SCALE: f64 = 1000.0;

/// A neighbor id and similarity score packed into 32 bits.
///
/// Layout: bits 10..31 hold the id, bits 0..9 the similarity (0..=999 in
/// practice). This is the on-disk format of comparison lists, so the
/// representation is kept exactly and serializes as the raw `u32`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimPair(u32);

impl SimPair {
    pub fn new(id: u32, sim: u32) -> Result<Self> {
        if id > MAX_PAIR_ID {
            return Err(Error::DegenerateInput(format!(
                "pair id {id} exceeds {MAX_PAIR_ID}"
            )));
        }
        if sim > MAX_PAIR_SIM {
            return Err(Error::DegenerateInput(format!(
                "pair similarity {sim} exceeds {MAX_PAIR_SIM}"
            )));
        }
        Ok(Self(encode(id, sim)))
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn id(self) -> u32 {
        self.0 >> SIM_BITS
    }

    pub const fn sim(self) -> u32 {
        self.0 & SIM_MASK
    }

    /// Similarity as a ratio. Raw values of 1000 and above saturate at 1.0.
    pub fn similarity(self) -> f64 {
        (f64::from(self.sim()) / SIM_SCALE).min(1.0)
    }

    pub fn set_id(&mut self, id: u32) -> Result<()> {
        if id > MAX_PAIR_ID {
            return Err(Error::DegenerateInput(format!(
                "pair id {id} exceeds {MAX_PAIR_ID}"
            )));
        }
        self.0 = (self.0 & SIM_MASK) | (id << SIM_BITS);
        Ok(())
    }

    pub fn set_sim(&mut self, sim: u32) -> Result<()> {
        if sim > MAX_PAIR_SIM {
            return Err(Error::DegenerateInput(format!(
                "pair similarity {sim} exceeds {MAX_PAIR_SIM}"
            )));
        }
        self.0 = (self.0 & !SIM_MASK) | sim;
        Ok(())
    }
}

/// Packs without range checks; out-of-range inputs lose their high bits.
pub const fn encode(id: u32, sim: u32) -> u32 {
    (id << SIM_BITS) | (sim & SIM_MASK)
}

pub const fn decode(value: u32) -> (u32, u32) {
    (value >> SIM_BITS, value & SIM_MASK)
}
