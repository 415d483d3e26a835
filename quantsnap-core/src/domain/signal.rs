//! Trade signals emitted by strategies.

use serde::{Deserialize, Serialize};

/// Per-bar decision from a strategy, aligned by index with the input bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSignal {
    Buy,
    Sell,
    Hold,
}
