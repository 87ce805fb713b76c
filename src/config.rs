use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::{Display, EnumString};

pub const DEFAULT_DATASET_PATH: &str = "italy_cities.json";

/// How the municipality dataset file is read.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DatasetFormat {
    /// Lenient scan for `"cod_fisco"` / `"comune"` pairs anywhere in the text.
    #[default]
    Scan,
    /// A JSON array of records, each with `cod_fisco` and `comune` fields.
    Json,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DatasetConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub format: DatasetFormat,
}

impl DatasetConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: DatasetFormat::default(),
        }
    }

    pub fn path(&self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.mutate_clone(|x| x.path = path)
    }

    pub fn format(&self, format: DatasetFormat) -> Self {
        self.mutate_clone(|x| x.format = format)
    }

    fn mutate_clone(&self, modify: impl FnOnce(&mut Self)) -> Self {
        let mut clone = self.clone();
        modify(&mut clone);
        clone
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig::new(DEFAULT_DATASET_PATH)
    }
}
