//! Manifest template directories
//!
//! A component's manifests live in one directory of YAML templates. Files are
//! rendered in file-name order with minijinja, and each rendered file may hold
//! several `---`-separated documents. Documents that render to nothing (for
//! example a whole file wrapped in a false `{% if %}`) are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{Environment, UndefinedBehavior};
use sdn_apply::ManifestObject;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RenderError;

const TEMPLATE_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Renders every template in `dir` against `data`
pub fn render_dir<T: Serialize>(dir: &Path, data: &T) -> Result<Vec<ManifestObject>, RenderError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    let mut objects = Vec::new();
    for path in template_files(dir)? {
        let source = fs::read_to_string(&path).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;
        let rendered = env
            .render_str(&source, data)
            .map_err(|source| RenderError::Template {
                path: path.clone(),
                source,
            })?;

        let before = objects.len();
        parse_documents(&path, &rendered, &mut objects)?;
        debug!("Rendered {} objects from {}", objects.len() - before, path.display());
    }
    Ok(objects)
}

/// Template files directly under `dir`, sorted by file name
fn template_files(dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
    let io_err = |source| RenderError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_template = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| TEMPLATE_EXTENSIONS.contains(&ext));
        if is_template && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn parse_documents(
    path: &Path,
    rendered: &str,
    objects: &mut Vec<ManifestObject>,
) -> Result<(), RenderError> {
    if rendered.trim().is_empty() {
        return Ok(());
    }
    for document in serde_yaml::Deserializer::from_str(rendered) {
        let value = serde_json::Value::deserialize(document).map_err(|source| RenderError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        if value.is_null() {
            continue;
        }
        let object = ManifestObject::from_value(value).map_err(|source| RenderError::Object {
            path: path.to_path_buf(),
            source,
        })?;
        objects.push(object);
    }
    Ok(())
}
