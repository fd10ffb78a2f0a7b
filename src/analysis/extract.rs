use itertools::Itertools;
use num_bigint::BigUint;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub type WordFrequency = BTreeMap<String, usize>;

fn digit_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // ASCII only: `\d` would also match other Unicode digits
    RE.get_or_init(|| Regex::new(r"[0-9]+").unwrap())
}

fn alpha_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-zA-Z]+").unwrap())
}

/// Distinct integers from every maximal digit run, ascending.
pub fn extract_numbers(text: &str) -> Vec<BigUint> {
    digit_runs()
        .find_iter(text)
        // a non-empty ASCII digit run always parses
        .filter_map(|m| BigUint::parse_bytes(m.as_str().as_bytes(), 10))
        .sorted_unstable()
        .dedup()
        .collect()
}

/// Case-folded counts of every maximal ASCII letter run.
pub fn extract_words(text: &str) -> WordFrequency {
    alpha_runs()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .counts()
        .into_iter()
        .collect()
}
