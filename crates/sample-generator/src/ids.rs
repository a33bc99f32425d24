//! Identifier providers for fixed-mode UUIDs.
//!
//! Fixed mode renders every UUID as `Uuid::from_u128(n)` with `n` drawn from
//! an [`IdProvider`], so two samples never share an identifier.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique, increasing identifier numbers.
pub trait IdProvider {
    fn next_id(&mut self) -> u128;
}

/// Owned counter starting at zero (or a chosen value).
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(next: u128) -> Self {
        Self { next }
    }

    /// The number the next call will hand out.
    pub fn peek(&self) -> u128 {
        self.next
    }
}

impl IdProvider for SequentialIds {
    fn next_id(&mut self) -> u128 {
        let id = self.next;
        self.next += 1;
        id
    }
}

static NEXT_PROCESS_ID: AtomicU64 = AtomicU64::new(0);

/// Process-wide counter shared by every generation run in this process.
///
/// Starts at zero and is never reset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessIds;

impl IdProvider for ProcessIds {
    fn next_id(&mut self) -> u128 {
        u128::from(NEXT_PROCESS_ID.fetch_add(1, Ordering::Relaxed))
    }
}
