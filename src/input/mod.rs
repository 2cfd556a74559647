use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub mod columns;
pub mod layout;
pub mod manifest;

use columns::{read_labels, read_predictions};
use layout::{InputLayout, find_data_file};
use manifest::{list_model_dirs, load_manifest};

use crate::model::profile::{ModelOrder, TrackProfile, is_plain_component};

pub const LABEL_FILE: &str = "challenge_label.csv";
pub const PREDICTION_FILE: &str = "prediction.csv";

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(
        "mapping file {} does not exist; please contact the competition organizers",
        .0.display()
    )]
    MissingManifest(PathBuf),
    #[error(
        "mapping file {} has no entry for partition {key} (available: {available})",
        .path.display()
    )]
    ManifestPartitionMissing {
        path: PathBuf,
        key: String,
        available: String,
    },
    #[error("directory {} does not exist", .0.display())]
    MissingModelDirectory(PathBuf),
    #[error(
        "label file {} does not exist; please contact the competition organizers",
        .0.display()
    )]
    MissingLabelFile(PathBuf),
    #[error(
        "prediction file {} does not exist; every model folder needs a prediction.csv, e.g. <model_type>/<partition>/<model_id>/prediction.csv",
        .0.display()
    )]
    MissingPredictionFile(PathBuf),
    #[error("{context}: {labels} labels but {predictions} predictions")]
    LengthMismatch {
        context: String,
        labels: usize,
        predictions: usize,
    },
    #[error("{context}: prediction {value} at line {line} is outside [0, 1]")]
    RangeViolation {
        context: String,
        line: usize,
        value: f64,
    },
    #[error("{}: label {value} at line {line} is not 0 or 1", .path.display())]
    InvalidLabel {
        path: PathBuf,
        line: usize,
        value: f64,
    },
    #[error("{}: {msg}", .path.display())]
    Parse { path: PathBuf, msg: String },
    #[error("{}: invalid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid track profile {}: {msg}", .path.display())]
    InvalidProfile { path: PathBuf, msg: String },
}

impl InputError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        InputError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Label and prediction files of one model instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFiles {
    pub model_id: String,
    pub label_path: PathBuf,
    pub prediction_path: PathBuf,
}

/// Concatenated, validated challenge points of one model type.
#[derive(Debug, Clone)]
pub struct ChallengeSet {
    pub model_type: String,
    pub model_ids: Vec<String>,
    pub labels: Vec<u8>,
    pub predictions: Vec<f64>,
}

impl ChallengeSet {
    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

/// Resolves every file needed for one model type before anything is read.
pub fn plan_model_type(
    layout: &InputLayout,
    profile: &TrackProfile,
    model_type: &str,
    partition: &str,
) -> Result<Vec<ModelFiles>, InputError> {
    let solutions_dir = layout.solutions_dir(model_type, partition);
    if !solutions_dir.is_dir() {
        return Err(InputError::MissingModelDirectory(solutions_dir));
    }
    let predictions_dir = layout.predictions_dir(model_type, partition);
    if !predictions_dir.is_dir() {
        return Err(InputError::MissingModelDirectory(predictions_dir));
    }

    let model_ids = match profile.model_order {
        ModelOrder::Manifest => {
            let manifest_path = layout.manifest_path(model_type);
            if !manifest_path.is_file() {
                return Err(InputError::MissingManifest(manifest_path));
            }
            let manifest = load_manifest(&manifest_path)?;
            let key = profile.manifest_key(partition);
            let ids = manifest.model_ids(&key).ok_or_else(|| {
                InputError::ManifestPartitionMissing {
                    path: manifest_path.clone(),
                    key: key.clone(),
                    available: manifest.partition_names().collect::<Vec<_>>().join(", "),
                }
            })?;
            if let Some(bad) = ids.iter().find(|id| !is_plain_component(id)) {
                return Err(InputError::Parse {
                    path: manifest_path,
                    msg: format!("model id {:?} is not a plain directory name", bad),
                });
            }
            ids.to_vec()
        }
        ModelOrder::Directory => list_model_dirs(&solutions_dir)?,
    };

    let mut plan = Vec::with_capacity(model_ids.len());
    for model_id in model_ids {
        let label_dir = solutions_dir.join(&model_id);
        if !label_dir.is_dir() {
            return Err(InputError::MissingModelDirectory(label_dir));
        }
        let prediction_dir = predictions_dir.join(&model_id);
        if !prediction_dir.is_dir() {
            return Err(InputError::MissingModelDirectory(prediction_dir));
        }
        let label_path = find_data_file(&label_dir, LABEL_FILE)
            .ok_or_else(|| InputError::MissingLabelFile(label_dir.join(LABEL_FILE)))?;
        let prediction_path = find_data_file(&prediction_dir, PREDICTION_FILE).ok_or_else(|| {
            InputError::MissingPredictionFile(prediction_dir.join(PREDICTION_FILE))
        })?;
        plan.push(ModelFiles {
            model_id,
            label_path,
            prediction_path,
        });
    }
    Ok(plan)
}

pub fn load_challenge_set(model_type: &str, plan: &[ModelFiles]) -> Result<ChallengeSet, InputError> {
    let mut labels = Vec::new();
    let mut predictions = Vec::new();
    let mut model_ids = Vec::with_capacity(plan.len());

    for files in plan {
        let model_labels = read_labels(&files.label_path)?;
        let model_predictions = read_predictions(&files.prediction_path)?;
        validate_vectors(
            &files.prediction_path.display().to_string(),
            &model_labels,
            &model_predictions,
        )?;
        tracing::debug!(
            model_id = %files.model_id,
            points = model_labels.len(),
            "loaded challenge points"
        );
        labels.extend_from_slice(&model_labels);
        predictions.extend_from_slice(&model_predictions);
        model_ids.push(files.model_id.clone());
    }

    validate_vectors(model_type, &labels, &predictions)?;

    Ok(ChallengeSet {
        model_type: model_type.to_string(),
        model_ids,
        labels,
        predictions,
    })
}

/// Length and range invariants of an aligned label/prediction pair. Out of
/// range values fail hard; nothing is clamped. Lines are 1-based positions in
/// `predictions`.
pub fn validate_vectors(context: &str, labels: &[u8], predictions: &[f64]) -> Result<(), InputError> {
    if labels.len() != predictions.len() {
        return Err(InputError::LengthMismatch {
            context: context.to_string(),
            labels: labels.len(),
            predictions: predictions.len(),
        });
    }
    if let Some(index) = predictions.iter().position(|p| !(0.0..=1.0).contains(p)) {
        return Err(InputError::RangeViolation {
            context: context.to_string(),
            line: index + 1,
            value: predictions[index],
        });
    }
    Ok(())
}

pub fn load_track_profile(path: &Path) -> Result<TrackProfile, InputError> {
    let file = File::open(path).map_err(|e| InputError::io(path, e))?;
    let profile: TrackProfile =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    profile.validate().map_err(|msg| InputError::InvalidProfile {
        path: path.to_path_buf(),
        msg,
    })?;
    Ok(profile)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
