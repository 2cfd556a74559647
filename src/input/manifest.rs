use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::input::InputError;

/// Partition name (`dev_black_box`, `eval_black_box`, ...) to the ordered model
/// ids whose files are concatenated for that partition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ModelIdManifest {
    partitions: BTreeMap<String, Vec<String>>,
}

impl ModelIdManifest {
    pub fn model_ids(&self, key: &str) -> Option<&[String]> {
        self.partitions.get(key).map(Vec::as_slice)
    }

    pub fn partition_names(&self) -> impl Iterator<Item = &str> {
        self.partitions.keys().map(String::as_str)
    }
}

pub fn load_manifest(path: &Path) -> Result<ModelIdManifest, InputError> {
    let file = File::open(path).map_err(|e| InputError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Model ids from the sub-directories of `dir`, sorted by name.
pub fn list_model_dirs(dir: &Path) -> Result<Vec<String>, InputError> {
    let mut ids = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| InputError::io(dir, e))? {
        let entry = entry.map_err(|e| InputError::io(dir, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        ids.push(entry.file_name().to_string_lossy().into_owned());
    }
    ids.sort();
    Ok(ids)
}
