use super::types::SchemaSnapshot;
use crate::error::{GeneratorError, GeneratorResult};
use std::path::Path;

/// Load a schema snapshot from a `.yaml`/`.yml` or `.json` file.
///
/// ```yaml
/// tables:
///   - name: products
///     columns:
///       - { name: id, type: bigint }
///       - { name: name, type: varchar(255) }
/// ```
pub fn load_schema(path: &Path) -> GeneratorResult<SchemaSnapshot> {
    let content = std::fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
    let snapshot = parse_schema(&content, is_yaml(path)).map_err(|message| {
        GeneratorError::SchemaFile {
            path: path.to_path_buf(),
            message,
        }
    })?;
    tracing::debug!(
        path = %path.display(),
        tables = snapshot.tables.len(),
        "loaded schema snapshot"
    );
    Ok(snapshot)
}

/// Parse snapshot text as YAML or JSON.
pub fn parse_schema(content: &str, yaml: bool) -> Result<SchemaSnapshot, String> {
    if yaml {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
