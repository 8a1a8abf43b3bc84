//! Account usage types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Usage of a single product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductUsage {
    /// Product name, e.g. `translate` or `write`.
    pub product_type: String,
    /// Characters used with this API key.
    #[serde(default)]
    pub api_key_character_count: u64,
    /// Characters used by the whole account.
    #[serde(default)]
    pub character_count: u64,
}

/// Usage in the current billing period.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Usage {
    /// Characters translated so far.
    pub character_count: u64,
    /// Character limit of the plan.
    pub character_limit: u64,
    /// Per-product breakdown.
    #[serde(default)]
    pub products: Vec<ProductUsage>,
    /// Characters used with this API key.
    #[serde(default)]
    pub api_key_character_count: Option<u64>,
    /// Character limit of this API key.
    #[serde(default)]
    pub api_key_character_limit: Option<u64>,
    /// Start of the billing period.
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// End of the billing period.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl Usage {
    /// Returns true once the account limit is used up.
    pub fn limit_reached(&self) -> bool {
        self.character_limit > 0 && self.character_count >= self.character_limit
    }

    /// Characters left before the account limit is hit.
    pub fn remaining(&self) -> u64 {
        self.character_limit.saturating_sub(self.character_count)
    }
}
