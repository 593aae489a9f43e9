//! Host-facing block generation on top of the cell processor.
//!
//! These are the only operations external collaborators drive: produce a
//! fresh fingerprint, advance deterministically from fingerprint text, or
//! derive 16 raw bytes from 16 bytes of hash material.

use thiserror::Error;

use crate::fault::Fault;
use crate::format::{format_vector, parse_psi, PsiParseError, VectorFormat};
use crate::processor::Processor;
use crate::state::Register;
use crate::vector::Vector;

/// Failure surface of the block-generation entry points: either the seed
/// text was malformed (recoverable, processor untouched) or the machine
/// faulted (latched, unrecoverable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum BlockError {
    /// Seed text did not match the PSI grammar.
    #[error(transparent)]
    Parse(#[from] PsiParseError),
    /// The processor latched a fault.
    #[error(transparent)]
    Fault(#[from] Fault),
}

impl Processor {
    /// Generates a fresh, non-deterministic block: seeds the continuation
    /// register from a just-sampled [`TimeSeed`](crate::TimeSeed), runs
    /// one tick, and renders the result as canonical PSI text.
    ///
    /// # Errors
    ///
    /// Propagates processor faults.
    pub fn fresh_block(&mut self) -> Result<String, Fault> {
        let seed = self.sample_seed().to_vector();
        self.load(Register::SdR30, &seed)?;
        self.time_quantum()?;
        Ok(format_vector(self.register(Register::R), VectorFormat::Psi))
    }

    /// Advances deterministically from caller-supplied PSI text: parses
    /// the 38-character fingerprint, loads it as the continuation seed,
    /// runs one tick, and returns the next fingerprint.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::Parse`] on malformed text, in which case no
    /// processor state was mutated; propagates faults otherwise.
    pub fn next_block(&mut self, seed_text: &str) -> Result<String, BlockError> {
        let seed = parse_psi(seed_text)?;
        self.load(Register::SdR30, &seed)?;
        self.time_quantum()?;
        Ok(format_vector(self.register(Register::R), VectorFormat::Psi))
    }

    /// Derives 16 bytes from 16 bytes of hash material (address
    /// generation): the input maps to a seed vector under the byte-packing
    /// law, one tick runs, and the packed output register comes back raw.
    ///
    /// # Errors
    ///
    /// Propagates processor faults.
    pub fn derive_bytes(&mut self, hash: &[u8; 16]) -> Result<[u8; 16], Fault> {
        let seed = Vector::from_bytes(hash);
        self.load(Register::SdR30, &seed)?;
        self.time_quantum()?;
        Ok(self.register(Register::R).to_bytes())
    }
}
