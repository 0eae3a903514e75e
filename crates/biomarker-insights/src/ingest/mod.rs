//! Loading of the biomarker catalogue and lab result collections from JSON.

mod parser;
mod reconcile;

pub use reconcile::{status_mismatches, StatusMismatch};

use crate::dashboard::Dataset;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Which source collection a load failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Biomarkers,
    Results,
}

impl Collection {
    pub const fn label(self) -> &'static str {
        match self {
            Collection::Biomarkers => "biomarkers",
            Collection::Results => "results",
        }
    }
}

#[derive(Debug)]
pub enum LoadError {
    Io {
        collection: Collection,
        source: std::io::Error,
    },
    Json {
        collection: Collection,
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn collection(&self) -> Collection {
        match self {
            LoadError::Io { collection, .. } | LoadError::Json { collection, .. } => *collection,
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { collection, source } => {
                write!(f, "failed to read {} file: {}", collection.label(), source)
            }
            LoadError::Json { collection, source } => {
                write!(f, "invalid {} data: {}", collection.label(), source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Json { source, .. } => Some(source),
        }
    }
}

/// Joined dataset plus whatever reconciliation found while loading it.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub mismatches: Vec<StatusMismatch>,
}

pub struct DatasetLoader;

impl DatasetLoader {
    pub fn from_paths<B, R>(biomarkers: B, results: R) -> Result<LoadedDataset, LoadError>
    where
        B: AsRef<Path>,
        R: AsRef<Path>,
    {
        let biomarkers_file = open(biomarkers.as_ref(), Collection::Biomarkers)?;
        let results_file = open(results.as_ref(), Collection::Results)?;
        Self::from_readers(biomarkers_file, results_file)
    }

    pub fn from_readers<B, R>(biomarkers: B, results: R) -> Result<LoadedDataset, LoadError>
    where
        B: Read,
        R: Read,
    {
        let biomarkers = parser::parse_biomarkers(biomarkers).map_err(|source| LoadError::Json {
            collection: Collection::Biomarkers,
            source,
        })?;
        let results = parser::parse_results(results).map_err(|source| LoadError::Json {
            collection: Collection::Results,
            source,
        })?;

        let dataset = Dataset::new(biomarkers, &results);
        let mismatches = reconcile::audit(&dataset);
        info!(
            biomarkers = dataset.biomarkers().len(),
            results = dataset.results().len(),
            categories = dataset.categories().len(),
            mismatches = mismatches.len(),
            "dataset loaded"
        );

        Ok(LoadedDataset {
            dataset,
            mismatches,
        })
    }
}

fn open(path: &Path, collection: Collection) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|source| LoadError::Io { collection, source })
}
