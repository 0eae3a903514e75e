use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::dashboard::domain::{Biomarker, LabResult, ReferenceRange, ResultStatus};
use crate::dashboard::notes::{NoteKey, NoteStore, NoteStoreError};
use crate::dashboard::{dashboard_router, Dataset, DashboardService, ScoringConfig};

pub(super) fn biomarker(
    id: &str,
    name: &str,
    category: &str,
    range: (f64, f64),
    importance: f64,
) -> Biomarker {
    Biomarker {
        id: id.to_string(),
        name: name.to_string(),
        standard_unit: "mg/dL".to_string(),
        reference_range: ReferenceRange {
            low: range.0,
            high: range.1,
        },
        category: category.to_string(),
        importance,
    }
}

pub(super) fn lab_result(
    id: &str,
    biomarker_id: &str,
    value: f64,
    sampled_at: &str,
    status: ResultStatus,
) -> LabResult {
    LabResult {
        id: id.to_string(),
        biomarker_id: biomarker_id.to_string(),
        value,
        sampled_at: sampled_at.to_string(),
        status,
    }
}

/// Four biomarkers across three categories; glucose has a superseded draw.
pub(super) fn sample_dataset() -> Dataset {
    let biomarkers = vec![
        biomarker("glu", "Glucose", "Metabolic", (70.0, 99.0), 9.0),
        biomarker("ldl", "LDL Cholesterol", "Lipids", (0.0, 100.0), 8.0),
        biomarker("vitd", "Vitamin D", "Vitamins", (30.0, 100.0), 6.0),
        biomarker("hdl", "HDL Cholesterol", "Lipids", (40.0, 60.0), 7.0),
    ];
    let results = vec![
        lab_result("glu-old", "glu", 140.0, "2024-01-10", ResultStatus::High),
        lab_result("glu-new", "glu", 112.0, "2024-03-01", ResultStatus::High),
        lab_result("ldl-1", "ldl", 90.0, "2024-03-01", ResultStatus::Normal),
        lab_result("vitd-1", "vitd", 18.0, "2024-02-15", ResultStatus::Low),
        lab_result("hdl-1", "hdl", 50.0, "2024-03-01", ResultStatus::Normal),
    ];
    Dataset::new(biomarkers, &results)
}

pub(super) fn build_service() -> (DashboardService<MemoryNotes>, Arc<MemoryNotes>) {
    let notes = Arc::new(MemoryNotes::default());
    let service = DashboardService::new(
        Arc::new(sample_dataset()),
        notes.clone(),
        ScoringConfig::default(),
    );
    (service, notes)
}

pub(super) fn dashboard_router_with_service(
    service: DashboardService<MemoryNotes>,
) -> axum::Router {
    dashboard_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotes {
    entries: Arc<Mutex<HashMap<NoteKey, String>>>,
}

impl MemoryNotes {
    pub(super) fn len(&self) -> usize {
        self.entries.lock().expect("notes mutex poisoned").len()
    }
}

impl NoteStore for MemoryNotes {
    fn get(&self, key: &NoteKey) -> Result<Option<String>, NoteStoreError> {
        let guard = self.entries.lock().expect("notes mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: NoteKey, text: String) -> Result<(), NoteStoreError> {
        let mut guard = self.entries.lock().expect("notes mutex poisoned");
        if text.is_empty() {
            guard.remove(&key);
        } else {
            guard.insert(key, text);
        }
        Ok(())
    }
}

pub(super) struct UnavailableNotes;

impl NoteStore for UnavailableNotes {
    fn get(&self, _key: &NoteKey) -> Result<Option<String>, NoteStoreError> {
        Err(NoteStoreError::Unavailable("storage offline".to_string()))
    }

    fn set(&self, _key: NoteKey, _text: String) -> Result<(), NoteStoreError> {
        Err(NoteStoreError::Unavailable("storage offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn ids(values: &[Value]) -> Vec<&str> {
    values
        .iter()
        .filter_map(|value| value.get("id").and_then(Value::as_str))
        .collect()
}
