//! Configuration enum types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What happens when a recognition result arrives while newer requests exist.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Every result is shown as it arrives; the last one to resolve wins
    #[default]
    LastResolved,
    /// Only the most recent request may update the display; results of
    /// requests superseded by a newer recognize or a clear are dropped
    LatestRequest,
}
