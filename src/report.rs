use anyhow::{Context, Result};
use num_bigint::BigUint;
use tracing::info;
use uuid::Uuid;

use crate::analysis::{Analysis, ClassificationRow, WordFrequency};
use crate::store::ObjectStore;

pub const REPORT_HEADER: [&str; 3] = [
    "previous Fibonacci number",
    "observed number",
    "next Fibonacci number",
];

/// Keys of the two objects written for one analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub id: String,
    pub report_key: String,
    pub words_key: String,
}

impl Artifacts {
    pub fn new(key_prefix: &str) -> Self {
        let id = Uuid::new_v4().to_string();
        Artifacts {
            report_key: format!("{}{}.csv", key_prefix, id),
            words_key: format!("{}{}.json", key_prefix, id),
            id,
        }
    }
}

fn cell(v: Option<&BigUint>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

pub fn render_csv(rows: &[ClassificationRow]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(REPORT_HEADER)?;
    for row in rows {
        wtr.write_record([
            cell(row.previous.as_ref()),
            row.observed.to_string(),
            cell(row.next.as_ref()),
        ])?;
    }
    wtr.into_inner().context("Failed to flush CSV report")
}

pub fn render_json(words: &WordFrequency) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(words)?)
}

/// Upload the report, then the word counts, under a fresh id.
pub fn persist(store: &dyn ObjectStore, analysis: &Analysis, key_prefix: &str) -> Result<Artifacts> {
    let artifacts = Artifacts::new(key_prefix);

    let csv = render_csv(&analysis.rows)?;
    store
        .put_object(&artifacts.report_key, &csv, "text/csv")
        .with_context(|| format!("Failed to upload {}", artifacts.report_key))?;

    let json = render_json(&analysis.words)?;
    store
        .put_object(&artifacts.words_key, &json, "application/json")
        .with_context(|| format!("Failed to upload {}", artifacts.words_key))?;

    info!(
        bucket = store.bucket(),
        report = %artifacts.report_key,
        words = %artifacts.words_key,
        rows = analysis.rows.len(),
        "saved analysis"
    );
    Ok(artifacts)
}
