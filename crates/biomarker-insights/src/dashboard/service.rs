use std::sync::Arc;

use super::dataset::Dataset;
use super::dedupe::dedupe_by_latest;
use super::engine::InsightsEngine;
use super::filters::ResultQuery;
use super::insights::{coaching_tip, interpretation};
use super::notes::{normalize_note, NoteKey, NoteStore, NoteStoreError};
use super::report::{DashboardReport, ResultDetail, ResultView};
use super::scoring::ScoringConfig;

/// Service composing the loaded dataset, the scoring engine, and the note store.
pub struct DashboardService<N> {
    dataset: Arc<Dataset>,
    engine: Arc<InsightsEngine>,
    notes: Arc<N>,
}

impl<N> DashboardService<N>
where
    N: NoteStore + 'static,
{
    pub fn new(dataset: Arc<Dataset>, notes: Arc<N>, config: ScoringConfig) -> Self {
        Self {
            dataset,
            engine: Arc::new(InsightsEngine::new(config)),
            notes,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn engine(&self) -> &InsightsEngine {
        &self.engine
    }

    /// Hero, priority panel, sidebar counts, and the default list in one payload.
    pub fn report(&self) -> DashboardReport {
        self.engine.report(self.dataset.results(), self.dataset.categories())
    }

    /// Latest result per biomarker, filtered and sorted for a list view.
    pub fn results(&self, query: &ResultQuery) -> Vec<ResultView> {
        let latest = dedupe_by_latest(self.dataset.results());
        query
            .apply(&latest)
            .iter()
            .map(|result| self.engine.view(result))
            .collect()
    }

    pub fn categories(&self) -> &[String] {
        self.dataset.categories()
    }

    /// Drill-down for any loaded sample, superseded ones included.
    pub fn detail(&self, result_id: &str) -> Result<ResultDetail, DashboardServiceError> {
        let result = self
            .dataset
            .find_result(result_id)
            .ok_or_else(|| DashboardServiceError::ResultNotFound(result_id.to_string()))?;

        let note = self
            .notes
            .get(&NoteKey::for_result(result))?
            .unwrap_or_default();
        let tip = result.is_out_of_range().then(|| coaching_tip(result));

        Ok(ResultDetail {
            interpretation: interpretation(result),
            coaching_tip: tip,
            note,
            view: self.engine.view(result),
        })
    }

    pub fn note(&self, result_id: &str) -> Result<String, DashboardServiceError> {
        let key = self.known_key(result_id)?;
        Ok(self.notes.get(&key)?.unwrap_or_default())
    }

    /// Stores the note for a result and returns the text now on record.
    pub fn save_note(&self, result_id: &str, text: &str) -> Result<String, DashboardServiceError> {
        let key = self.known_key(result_id)?;
        let stored = normalize_note(text).unwrap_or_default().to_string();
        self.notes.set(key, stored.clone())?;
        Ok(stored)
    }

    fn known_key(&self, result_id: &str) -> Result<NoteKey, DashboardServiceError> {
        self.dataset
            .find_result(result_id)
            .map(NoteKey::for_result)
            .ok_or_else(|| DashboardServiceError::ResultNotFound(result_id.to_string()))
    }
}

/// Error raised by the dashboard service.
#[derive(Debug, thiserror::Error)]
pub enum DashboardServiceError {
    #[error("result {0} not found")]
    ResultNotFound(String),
    #[error(transparent)]
    Notes(#[from] NoteStoreError),
}
