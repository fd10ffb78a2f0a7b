pub mod extract;
pub mod fibonacci;

use num_bigint::BigUint;
use tracing::debug;

use crate::error::AnalysisError;
pub use extract::{extract_numbers, extract_words, WordFrequency};
pub use fibonacci::{bound_for, classify, fibonacci_prefix, ClassificationRow};

/// Everything derived from one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub numbers: Vec<BigUint>,
    pub prefix: Vec<BigUint>,
    pub rows: Vec<ClassificationRow>,
    pub words: WordFrequency,
}

/// Two independent passes: numbers → prefix → rows, and words → counts.
///
/// A text without numbers yields an empty report rather than an error.
pub fn analyze(text: &str) -> Result<Analysis, AnalysisError> {
    let numbers = extract_numbers(text);
    let words = extract_words(text);

    let (prefix, rows) = match bound_for(&numbers) {
        Ok(bound) => {
            let prefix = fibonacci_prefix(&bound);
            let rows = classify(&numbers, &prefix)?;
            (prefix, rows)
        }
        Err(AnalysisError::EmptyInput) => {
            debug!("no integers in text, skipping classification");
            (Vec::new(), Vec::new())
        }
        Err(e) => return Err(e),
    };

    debug!(
        numbers = numbers.len(),
        fibonacci = rows.iter().filter(|r| r.is_fibonacci()).count(),
        words = words.len(),
        "analyzed text"
    );

    Ok(Analysis {
        numbers,
        prefix,
        rows,
        words,
    })
}
