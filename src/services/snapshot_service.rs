//! Best-effort named snapshots of the scoreboard on local disk.

use std::io::ErrorKind;

use time::{OffsetDateTime, macros::format_description};
use tokio::fs;
use tracing::{info, warn};

use crate::{
    dto::snapshot::SaveResponse,
    error::ServiceError,
    services::match_service,
    state::{MatchState, SharedState},
};

const SNAPSHOT_EXTENSION: &str = ".json";

/// Write the current record as pretty JSON under the saves directory.
///
/// Without a usable name the file is named after the current UTC time.
pub async fn save(
    state: &SharedState,
    filename: Option<String>,
) -> Result<SaveResponse, ServiceError> {
    let name = filename
        .as_deref()
        .map(sanitize_filename)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(timestamp_name);
    let name = with_extension(name);

    let snapshot = state.store().read().await;
    let data = serde_json::to_vec_pretty(&snapshot)
        .map_err(|err| ServiceError::storage("failed to encode snapshot", err.into()))?;

    let dir = state.config().saves_dir();
    fs::create_dir_all(dir)
        .await
        .map_err(|err| ServiceError::storage("failed to create saves directory", err))?;
    let path = dir.join(&name);
    fs::write(&path, data).await.map_err(|err| {
        warn!(path = %path.display(), error = %err, "failed to write snapshot");
        ServiceError::storage("failed to write snapshot", err)
    })?;

    info!(file = %name, "snapshot saved");
    Ok(SaveResponse { saved: name })
}

/// Names of the saved snapshots, sorted.
pub async fn list(state: &SharedState) -> Result<Vec<String>, ServiceError> {
    let dir = state.config().saves_dir();
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(ServiceError::storage("cannot read saves directory", err)),
    };

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|err| ServiceError::storage("cannot read saves directory", err))?
    {
        let is_file = entry
            .file_type()
            .await
            .map(|kind| kind.is_file())
            .unwrap_or(false);
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if is_file && name.to_lowercase().ends_with(SNAPSHOT_EXTENSION) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Read a saved snapshot and make it the live record.
pub async fn load(
    state: &SharedState,
    filename: Option<String>,
) -> Result<MatchState, ServiceError> {
    let name = filename
        .as_deref()
        .map(sanitize_filename)
        .unwrap_or_default();
    if name.is_empty() {
        return Err(ServiceError::InvalidInput("missing filename".into()));
    }
    let name = with_extension(name);
    let path = state.config().saves_dir().join(&name);

    let data = match fs::read(&path).await {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ServiceError::NotFound(format!("snapshot `{name}` not found")));
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read snapshot");
            return Err(ServiceError::storage("failed to read snapshot", err));
        }
    };

    let replaced = match_service::import_state(state, &data).await?;
    info!(file = %name, "snapshot loaded");
    Ok(replaced)
}

/// Keep only `[A-Za-z0-9._-]`, which also strips any path separators.
pub fn sanitize_filename(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(*c, '-' | '_' | '.'))
        .collect()
}

fn with_extension(mut name: String) -> String {
    if !name.to_lowercase().ends_with(SNAPSHOT_EXTENSION) {
        name.push_str(SNAPSHOT_EXTENSION);
    }
    name
}

fn timestamp_name() -> String {
    let format = format_description!("[year][month][day]-[hour][minute][second]");
    OffsetDateTime::now_utc()
        .format(&format)
        .unwrap_or_else(|_| "snapshot".into())
}
