//! Stored objects read from the project tree.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use ignore::WalkBuilder;
use serde_json::Value;
use vigil_config::CONFIG_DIR;
use vigil_core::{AssetKind, MemoryStore, ObjectId};

use crate::host::{is_composite, object_from_json};
use crate::schema::SchemaCache;

/// Extra ignore file honoured alongside `.gitignore`.
pub const IGNORE_FILE: &str = ".vigilignore";

/// Load every `*.json` document under `root` into a store.
///
/// Files that cannot be parsed are registered but do not load.
///
/// # Errors
///
/// Returns an error if the directory walk fails.
pub fn load_store(root: &Path, schemas: &mut SchemaCache) -> anyhow::Result<MemoryStore> {
    let mut store = MemoryStore::new();
    for file in json_files(root)? {
        let Some(path) = storage_path(root, &file) else {
            continue;
        };
        match read_document(&file) {
            Ok(Value::Object(fields)) => {
                let kind = if is_composite(&fields) {
                    AssetKind::Composite
                } else {
                    AssetKind::Leaf
                };
                let object = object_from_json(&path, &fields, schemas);
                store.insert(path, kind, object);
            }
            Ok(_) => {
                tracing::warn!(path = %file.display(), "document is not a JSON object; it will not load");
                store.insert_missing(path.clone(), AssetKind::Leaf, ObjectId::new(path));
            }
            Err(reason) => {
                tracing::warn!(path = %file.display(), %reason, "document will not load");
                store.insert_missing(path.clone(), AssetKind::Leaf, ObjectId::new(path));
            }
        }
    }
    tracing::debug!(count = store.len(), "loaded project documents");
    Ok(store)
}

fn json_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(root);
    builder.add_custom_ignore_filename(IGNORE_FILE);
    builder.filter_entry(|entry| {
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        !(is_dir && entry.file_name() == CONFIG_DIR)
    });

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.context("failed to walk project directory")?;
        let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
        if is_json && entry.file_type().is_some_and(|ft| ft.is_file()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn read_document(file: &Path) -> Result<Value, String> {
    let text = fs::read_to_string(file).map_err(|error| error.to_string())?;
    serde_json::from_str(&text).map_err(|error| error.to_string())
}

/// Relative path without extension, `/`-separated.
pub fn storage_path(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?.with_extension("");
    let segments = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("/"))
}
