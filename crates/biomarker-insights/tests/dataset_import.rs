use biomarker_insights::dashboard::ResultStatus;
use biomarker_insights::ingest::{Collection, DatasetLoader, LoadError};

const BIOMARKERS: &[u8] = include_bytes!("../data/biomarkers.json");
const RESULTS: &[u8] = include_bytes!("../data/results.json");

#[test]
fn loader_joins_bundled_sample_data() {
    let loaded = DatasetLoader::from_readers(BIOMARKERS, RESULTS).expect("sample data loads");

    assert_eq!(loaded.dataset.biomarkers().len(), 14);
    // r-017 references a biomarker missing from the catalogue
    assert_eq!(loaded.dataset.results().len(), 16);
    assert!(loaded.dataset.find_result("r-017").is_none());
    assert_eq!(
        loaded.dataset.categories(),
        [
            "Blood",
            "Electrolytes",
            "Inflammation",
            "Iron",
            "Kidney",
            "Lipids",
            "Liver",
            "Metabolic",
            "Thyroid",
            "Vitamins"
        ]
    );
}

#[test]
fn loader_flags_status_that_contradicts_range() {
    let loaded = DatasetLoader::from_readers(BIOMARKERS, RESULTS).expect("sample data loads");

    assert_eq!(loaded.mismatches.len(), 1);
    let mismatch = &loaded.mismatches[0];
    assert_eq!(mismatch.result_id, "r-009");
    assert_eq!(mismatch.reported, ResultStatus::High);
    assert_eq!(mismatch.implied, ResultStatus::Normal);

    let alt = loaded.dataset.find_result("r-009").expect("alt result present");
    assert_eq!(alt.status(), ResultStatus::High);
}

#[test]
fn loader_reads_from_paths() {
    let root = env!("CARGO_MANIFEST_DIR");
    let loaded = DatasetLoader::from_paths(
        format!("{root}/data/biomarkers.json"),
        format!("{root}/data/results.json"),
    )
    .expect("sample data loads from disk");

    assert_eq!(loaded.dataset.results().len(), 16);
}

#[test]
fn loader_rejects_malformed_biomarkers() {
    let error = DatasetLoader::from_readers(&b"[{\"id\": 1}]"[..], RESULTS)
        .expect_err("malformed biomarkers rejected");

    match error {
        LoadError::Json { collection, .. } => assert_eq!(collection, Collection::Biomarkers),
        other => panic!("expected json error, got {other:?}"),
    }
}

#[test]
fn loader_accepts_empty_collections() {
    let loaded = DatasetLoader::from_readers(&b"[]"[..], &b"[]"[..]).expect("empty data loads");

    assert!(loaded.dataset.is_empty());
    assert!(loaded.dataset.categories().is_empty());
    assert!(loaded.mismatches.is_empty());
}
