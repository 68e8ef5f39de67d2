//! Definition file discovery and loading.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use strapi_ts_common::RawModelRecord;
use tracing::{debug, warn};
use walkdir::WalkDir;

const SETTINGS_SUFFIX: &str = ".settings.json";
const SCHEMA_FILE: &str = "schema.json";

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

fn is_model_definition(path: &Path) -> bool {
    let name = file_name(path);
    name.ends_with(SETTINGS_SUFFIX) || name == SCHEMA_FILE
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Files under `dir` accepted by `filter`, in file-name order.
fn walk(dir: &Path, filter: fn(&Path) -> bool) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry =
            entry.map_err(|err| format!("Failed to read directory {}: {err}", dir.display()))?;
        if entry.file_type().is_file() && filter(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Content-type definitions from input folders and files. Repeated paths are skipped.
pub fn discover_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for input in inputs {
        let found = if input.is_file() {
            vec![input.clone()]
        } else if input.is_dir() {
            walk(input, is_model_definition)?
        } else {
            return Err(format!("Input path not found: {}", input.display()));
        };
        debug!("Found {} definitions in {}", found.len(), input.display());
        files.extend(found.into_iter().filter(|f| seen.insert(f.clone())));
    }
    Ok(files)
}

/// Component definitions: every `*.json` below `dir`.
pub fn discover_components(dir: &Path) -> Result<Vec<PathBuf>, String> {
    if !dir.is_dir() {
        return Err(format!("Components folder not found: {}", dir.display()));
    }
    let files = walk(dir, is_json)?;
    debug!("Found {} components in {}", files.len(), dir.display());
    Ok(files)
}

/// Read and parse every file. The first failure aborts.
pub fn load_records(files: &[PathBuf], is_component: bool) -> Result<Vec<RawModelRecord>, String> {
    files
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path)
                .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
            let source_path = path.to_string_lossy().replace('\\', "/");
            RawModelRecord::from_json(&text, source_path, is_component).map_err(|e| e.to_string())
        })
        .collect()
}

/// What makes two records the same model for deduplication: the legacy
/// `info.name`, the classification and, for components, the folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DedupeKey {
    name: String,
    is_component: bool,
    folder: Option<String>,
}

impl DedupeKey {
    fn of(record: &RawModelRecord) -> Option<Self> {
        let name = record.info.name.as_deref().filter(|n| !n.is_empty())?;
        let folder = record
            .is_component
            .then(|| record.source_path.rsplit('/').nth(1).unwrap_or_default().to_string());
        Some(Self {
            name: name.to_string(),
            is_component: record.is_component,
            folder,
        })
    }
}

/// Keep one record per name; the later one wins in the earlier one's place.
///
/// A component and a content type may share a name, and so may components in
/// different folders. Records without `info.name` are always kept.
pub fn dedupe_by_name(records: Vec<RawModelRecord>) -> Vec<RawModelRecord> {
    let mut result: Vec<RawModelRecord> = Vec::with_capacity(records.len());
    let mut positions: HashMap<DedupeKey, usize> = HashMap::new();

    for record in records {
        let Some(key) = DedupeKey::of(&record) else {
            result.push(record);
            continue;
        };
        match positions.get(&key) {
            Some(&index) => {
                warn!(
                    "Already have model '{}': skip {} use {}",
                    key.name, result[index].source_path, record.source_path
                );
                result[index] = record;
            }
            None => {
                positions.insert(key, result.len());
                result.push(record);
            }
        }
    }
    result
}
