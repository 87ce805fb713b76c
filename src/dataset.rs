use crate::config::{DatasetConfig, DatasetFormat};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

lazy_static! {
    static ref RECORD_PATTERN: Regex =
        Regex::new(r#"(?is)"cod_fisco"\s*:\s*"((?-i:[A-Za-z0-9]){4})".*?"comune"\s*:\s*"([^"]+)""#)
            .unwrap();
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read municipality dataset {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid municipality dataset: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read access to the catastral code -> place name table.
pub trait MunicipalityLookup {
    fn place_name(&self, code: &str) -> Option<&str>;

    fn contains(&self, code: &str) -> bool {
        self.place_name(code).is_some()
    }
}

impl<T: MunicipalityLookup + ?Sized> MunicipalityLookup for &T {
    fn place_name(&self, code: &str) -> Option<&str> {
        (**self).place_name(code)
    }
}

impl<T: MunicipalityLookup + ?Sized> MunicipalityLookup for Arc<T> {
    fn place_name(&self, code: &str) -> Option<&str> {
        (**self).place_name(code)
    }
}

impl MunicipalityLookup for HashMap<String, String> {
    fn place_name(&self, code: &str) -> Option<&str> {
        self.get(code).map(String::as_str)
    }
}

#[derive(Deserialize)]
struct MunicipalityRecord {
    cod_fisco: String,
    comune: String,
}

/// Italian municipalities keyed by their 4 character catastral code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MunicipalityDataset {
    places: HashMap<String, String>,
}

impl MunicipalityDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codes are uppercased. A later entry for the same code replaces the earlier one.
    pub fn from_entries<C, N>(entries: impl IntoIterator<Item = (C, N)>) -> Self
    where
        C: AsRef<str>,
        N: Into<String>,
    {
        Self {
            places: entries
                .into_iter()
                .map(|(code, name)| (code.as_ref().to_uppercase(), name.into()))
                .collect(),
        }
    }

    /// Extracts every `"cod_fisco": "XXXX"` ... `"comune": "..."` pair from
    /// semi-structured text, whatever structure surrounds them.
    ///
    /// Matching is case insensitive and a record may span several lines.
    pub fn scan_str(content: &str) -> Self {
        Self::from_entries(
            RECORD_PATTERN
                .captures_iter(content)
                .map(|captures| (captures[1].to_string(), captures[2].to_string())),
        )
    }

    /// Parses a JSON array of records carrying `cod_fisco` and `comune`.
    pub fn from_json_str(content: &str) -> Result<Self, DatasetError> {
        let records: Vec<MunicipalityRecord> = serde_json::from_str(content)?;
        Ok(Self::from_entries(
            records
                .into_iter()
                .map(|record| (record.cod_fisco, record.comune)),
        ))
    }

    pub fn load(config: &DatasetConfig) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(&config.path).map_err(|source| DatasetError::Io {
            path: config.path.clone(),
            source,
        })?;

        let dataset = match config.format {
            DatasetFormat::Scan => Self::scan_str(&content),
            DatasetFormat::Json => Self::from_json_str(&content)?,
        };

        if dataset.is_empty() {
            tracing::warn!(path = %config.path.display(), "municipality dataset is empty");
        } else {
            tracing::debug!(
                path = %config.path.display(),
                format = %config.format,
                records = dataset.len(),
                "loaded municipality dataset"
            );
        }
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.places
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
    }
}

impl MunicipalityLookup for MunicipalityDataset {
    fn place_name(&self, code: &str) -> Option<&str> {
        self.places.get(code).map(String::as_str)
    }
}
