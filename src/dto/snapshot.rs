//! Payloads for saving and loading named scoreboard snapshots.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Optional snapshot name, accepted both as query string and JSON body.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SnapshotName {
    /// File name; characters outside `[A-Za-z0-9._-]` are stripped and `.json` appended.
    #[serde(default)]
    pub filename: Option<String>,
}

/// Response returned after a snapshot was written.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaveResponse {
    /// Final file name inside the saves directory.
    pub saved: String,
}
