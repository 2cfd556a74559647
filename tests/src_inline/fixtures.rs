use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(tag: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("mia_scoring_{}_{}_{}", tag, std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

pub fn label_csv(labels: &[u8]) -> String {
    let mut out = String::from("is_train\n");
    for l in labels {
        out.push_str(&format!("{}\n", l));
    }
    out
}

pub fn prediction_csv(predictions: &[f64]) -> String {
    predictions.iter().map(|p| format!("{}\n", p)).collect()
}

/// Writes `ref/` and `res/` files for each `(model_id, labels, predictions)`.
pub fn write_model_type(
    base: &Path,
    model_type: &str,
    partition: &str,
    models: &[(&str, &[u8], &[f64])],
) {
    for (id, labels, predictions) in models {
        let ref_dir = base.join("ref").join(model_type).join(partition).join(id);
        let res_dir = base.join("res").join(model_type).join(partition).join(id);
        write_file(&ref_dir.join("challenge_label.csv"), &label_csv(labels));
        write_file(&res_dir.join("prediction.csv"), &prediction_csv(predictions));
    }
}

pub fn write_manifest(base: &Path, model_name: &str, partitions: &[(&str, &[&str])]) {
    let mut map = serde_json::Map::new();
    for (key, ids) in partitions {
        map.insert(key.to_string(), serde_json::json!(ids));
    }
    write_file(
        &base.join("ref").join(format!("{}_mapping_final.json", model_name)),
        &serde_json::Value::Object(map).to_string(),
    );
}
