use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelOrder {
    Manifest,
    Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TrackKind {
    SingleTable,
    MultiTable,
}

impl TrackKind {
    pub fn profile(self) -> TrackProfile {
        match self {
            TrackKind::SingleTable => TrackProfile::single_table_v1(),
            TrackKind::MultiTable => TrackProfile::multi_table_v1(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackProfile {
    pub name: String,
    #[serde(default = "default_title")]
    pub title: String,
    pub model_types: Vec<String>,
    #[serde(default = "default_access")]
    pub access: String,
    #[serde(default = "default_model_order")]
    pub model_order: ModelOrder,
    #[serde(default = "default_max_fpr")]
    pub max_fpr: f64,
    #[serde(default = "default_drop_intermediate")]
    pub drop_intermediate: bool,
    #[serde(default)]
    pub detailed: bool,
}

impl TrackProfile {
    pub fn single_table_v1() -> Self {
        Self {
            name: "single-table".to_string(),
            title: default_title(),
            model_types: vec![
                "tabddpm_black_box".to_string(),
                "tabsyn_black_box".to_string(),
            ],
            access: default_access(),
            model_order: ModelOrder::Manifest,
            max_fpr: default_max_fpr(),
            drop_intermediate: true,
            detailed: false,
        }
    }

    pub fn multi_table_v1() -> Self {
        Self {
            name: "multi-table".to_string(),
            model_types: vec!["clavaddpm_black_box".to_string()],
            detailed: true,
            ..Self::single_table_v1()
        }
    }

    /// Manifest key for a partition flag, e.g. `dev` -> `dev_black_box`.
    pub fn manifest_key(&self, partition: &str) -> String {
        format!("{}_{}", partition, self.access)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.model_types.is_empty() {
            return Err(format!("track {} lists no model types", self.name));
        }
        if let Some(bad) = self.model_types.iter().find(|m| !is_plain_component(m)) {
            return Err(format!("model type {:?} is not a plain directory name", bad));
        }
        if !self.max_fpr.is_finite() || self.max_fpr <= 0.0 || self.max_fpr > 1.0 {
            return Err(format!("max_fpr {} is outside (0, 1]", self.max_fpr));
        }
        Ok(())
    }
}

/// Model name is the model type up to its first underscore (`tabddpm_black_box` -> `tabddpm`).
pub fn model_name(model_type: &str) -> &str {
    model_type.split('_').next().unwrap_or(model_type)
}

pub fn is_plain_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

fn default_title() -> String {
    "MIDST".to_string()
}

fn default_access() -> String {
    "black_box".to_string()
}

fn default_model_order() -> ModelOrder {
    ModelOrder::Manifest
}

fn default_max_fpr() -> f64 {
    0.1
}

fn default_drop_intermediate() -> bool {
    true
}
