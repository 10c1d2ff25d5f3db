//! Transaction identifiers for outbound sends.
//!
//! Every `send` on the transport is correlated with its eventual
//! acknowledgment by a fresh transaction id. Uniqueness is the contract; the
//! 36-character hyphenated UUID rendering is the external representation.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one outbound send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Generates a fresh pseudo-random identifier.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Hyphenated form: 8-4-4-4-12 hex groups.
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A pending outbound send: the id plus its creation timestamp (milliseconds
/// since the Unix epoch). Discarded once the ack has been delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub created_at_ms: u64,
}

impl Transaction {
    /// Opens a transaction stamped with the given wall-clock time.
    pub fn open(created_at_ms: u64) -> Self {
        Self {
            id: TransactionId::fresh(),
            created_at_ms,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fresh_ids_are_pairwise_distinct_at_scale() {
        // The uniqueness contract: ten thousand consecutive ids, no repeats.
        let ids: HashSet<TransactionId> = (0..10_000).map(|_| TransactionId::fresh()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_display_is_36_char_hyphenated_form() {
        let rendered = TransactionId::fresh().to_string();
        assert_eq!(rendered.len(), 36);
        let hyphens: Vec<usize> = rendered
            .char_indices()
            .filter(|(_, c)| *c == '-')
            .map(|(i, _)| i)
            .collect();
        assert_eq!(hyphens, vec![8, 13, 18, 23]);
    }

    #[test]
    fn test_open_stamps_creation_time() {
        let tx = Transaction::open(1_700_000_000_000);
        assert_eq!(tx.created_at_ms, 1_700_000_000_000);
    }
}
