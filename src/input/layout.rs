use std::path::{Path, PathBuf};

use crate::model::profile::model_name;

/// Fixed directory layout of a scoring run: ground truth under `ref/`, the
/// extracted submission under `res/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLayout {
    pub solutions_root: PathBuf,
    pub predictions_root: PathBuf,
}

impl InputLayout {
    pub fn from_base(base: &Path) -> Self {
        Self {
            solutions_root: base.join("ref"),
            predictions_root: base.join("res"),
        }
    }

    pub fn solutions_dir(&self, model_type: &str, partition: &str) -> PathBuf {
        self.solutions_root.join(model_type).join(partition)
    }

    pub fn predictions_dir(&self, model_type: &str, partition: &str) -> PathBuf {
        self.predictions_root.join(model_type).join(partition)
    }

    pub fn manifest_path(&self, model_type: &str) -> PathBuf {
        self.solutions_root
            .join(format!("{}_mapping_final.json", model_name(model_type)))
    }

    /// A model type is only scored when the submission carries a folder for it.
    pub fn has_submission(&self, model_type: &str) -> bool {
        self.predictions_root.join(model_type).is_dir()
    }
}

pub fn find_data_file(dir: &Path, name: &str) -> Option<PathBuf> {
    let plain = dir.join(name);
    if plain.is_file() {
        return Some(plain);
    }
    let gz = dir.join(format!("{}.gz", name));
    if gz.is_file() {
        return Some(gz);
    }
    None
}
