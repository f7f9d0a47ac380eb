//! Loading seed documents for the memory provider.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde_json::Value;
use tracing::info;

use schoolhub_core::error::{AppError, ErrorKind};
use schoolhub_core::result::AppResult;
use schoolhub_core::types::Fields;

/// Seed file shape: `{ "<collection>": { "<id>": { ...fields } } }`.
pub type SeedDocuments = HashMap<String, BTreeMap<String, Fields>>;

/// Read and parse a seed file.
pub async fn load_seed_file(path: impl AsRef<Path>) -> AppResult<SeedDocuments> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Failed to read seed file '{}'", path.display()),
            e,
        )
    })?;
    let documents = parse_seed(&raw)?;
    info!(path = %path.display(), collections = documents.len(), "Loaded seed file");
    Ok(documents)
}

/// Parse seed JSON. Collection keys are normalized to carry no leading or
/// trailing separators.
pub fn parse_seed(raw: &str) -> AppResult<SeedDocuments> {
    let parsed: HashMap<String, BTreeMap<String, Value>> = serde_json::from_str(raw)?;

    let mut documents = SeedDocuments::with_capacity(parsed.len());
    for (collection, docs) in parsed {
        let collection = collection.trim_matches('/').to_string();
        let mut entries = BTreeMap::new();
        for (id, value) in docs {
            let Value::Object(fields) = value else {
                return Err(AppError::configuration(format!(
                    "Seed document '/{collection}/{id}' must be a JSON object"
                )));
            };
            entries.insert(id, fields);
        }
        documents.insert(collection, entries);
    }
    Ok(documents)
}
