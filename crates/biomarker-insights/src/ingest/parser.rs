use crate::dashboard::domain::{Biomarker, LabResult};
use serde::de::DeserializeOwned;
use std::io::Read;

pub(crate) fn parse_collection<T, R>(reader: R) -> Result<Vec<T>, serde_json::Error>
where
    T: DeserializeOwned,
    R: Read,
{
    serde_json::from_reader(reader)
}

pub(crate) fn parse_biomarkers<R: Read>(reader: R) -> Result<Vec<Biomarker>, serde_json::Error> {
    parse_collection(reader)
}

pub(crate) fn parse_results<R: Read>(reader: R) -> Result<Vec<LabResult>, serde_json::Error> {
    parse_collection(reader)
}
