use num_bigint::BigUint;

use crate::error::AnalysisError;

/// A number and its Fibonacci neighbors, both `None` when it is not a
/// Fibonacci number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRow {
    pub previous: Option<BigUint>,
    pub observed: BigUint,
    pub next: Option<BigUint>,
}

impl ClassificationRow {
    pub fn unmatched(observed: BigUint) -> Self {
        ClassificationRow {
            previous: None,
            observed,
            next: None,
        }
    }

    pub fn is_fibonacci(&self) -> bool {
        self.previous.is_some()
    }
}

/// Largest number in the set, used as the sequence bound.
pub fn bound_for(numbers: &[BigUint]) -> Result<BigUint, AnalysisError> {
    numbers
        .iter()
        .max()
        .cloned()
        .ok_or(AnalysisError::EmptyInput)
}

/// Fibonacci numbers from 0 up to and including the first one above `bound`.
pub fn fibonacci_prefix(bound: &BigUint) -> Vec<BigUint> {
    let zero = BigUint::default();
    if *bound == zero {
        return vec![zero];
    }
    let mut seq = vec![zero, BigUint::from(1u32)];
    // non-decreasing, so the last term is the running max
    while seq[seq.len() - 1] <= *bound {
        let next = &seq[seq.len() - 1] + &seq[seq.len() - 2];
        seq.push(next);
    }
    seq
}

/// One row per number, in the order given.
///
/// Lookup uses the first index of a value, so `1` resolves to position 1.
/// `0` is treated as if found at position 1, yielding `(prefix[0], 0, prefix[2])`.
pub fn classify(
    numbers: &[BigUint],
    prefix: &[BigUint],
) -> Result<Vec<ClassificationRow>, AnalysisError> {
    numbers
        .iter()
        .map(|n| {
            let Some(found) = prefix.iter().position(|f| f == n) else {
                return Ok(ClassificationRow::unmatched(n.clone()));
            };
            let idx = if *n == BigUint::default() { 1 } else { found };
            let previous = idx.checked_sub(1).and_then(|i| prefix.get(i));
            match (previous, prefix.get(idx + 1)) {
                (Some(previous), Some(next)) => Ok(ClassificationRow {
                    previous: Some(previous.clone()),
                    observed: n.clone(),
                    next: Some(next.clone()),
                }),
                _ => Err(AnalysisError::PrefixTooShort {
                    number: n.clone(),
                    len: prefix.len(),
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    fn bigs(vs: &[u64]) -> Vec<BigUint> {
        vs.iter().copied().map(big).collect()
    }

    fn row(previous: Option<u64>, observed: u64, next: Option<u64>) -> ClassificationRow {
        ClassificationRow {
            previous: previous.map(big),
            observed: big(observed),
            next: next.map(big),
        }
    }

    #[test]
    fn prefix_for_zero_bound() {
        assert_eq!(fibonacci_prefix(&big(0)), bigs(&[0]));
    }

    #[test]
    fn prefix_small_bounds() {
        assert_eq!(fibonacci_prefix(&big(1)), bigs(&[0, 1, 1, 2]));
        assert_eq!(fibonacci_prefix(&big(7)), bigs(&[0, 1, 1, 2, 3, 5, 8]));
        assert_eq!(fibonacci_prefix(&big(8)), bigs(&[0, 1, 1, 2, 3, 5, 8, 13]));
    }

    #[test]
    fn prefix_ends_at_first_term_above_bound() {
        for b in 1..500u64 {
            let bound = big(b);
            let seq = fibonacci_prefix(&bound);
            assert_eq!(&seq[..2], &bigs(&[0, 1])[..]);
            assert!(seq.windows(2).all(|w| w[0] <= w[1]));
            assert!(seq[seq.len() - 1] > bound, "bound {}", b);
            assert!(seq[seq.len() - 2] <= bound, "bound {}", b);
            assert!(seq.windows(3).all(|w| &w[0] + &w[1] == w[2]));
        }
    }

    #[test]
    fn prefix_past_u64() {
        // F(93) is the largest Fibonacci number that fits in u64
        let f93 = big(12_200_160_415_121_876_738);
        let seq = fibonacci_prefix(&f93);
        assert_eq!(seq.len(), 95);
        let f94: BigUint = "19740274219868223167".parse().unwrap();
        assert_eq!(seq[seq.len() - 1], f94);
    }

    #[test]
    fn bound_requires_numbers() {
        assert_eq!(bound_for(&[]).unwrap_err(), AnalysisError::EmptyInput);
        assert_eq!(bound_for(&bigs(&[3, 21, 5])).unwrap(), big(21));
    }

    #[test]
    fn classify_fibonacci_members() {
        let prefix = fibonacci_prefix(&big(8));
        let rows = classify(&bigs(&[3, 5, 8]), &prefix).unwrap();
        assert_eq!(
            rows,
            vec![
                row(Some(2), 3, Some(5)),
                row(Some(3), 5, Some(8)),
                row(Some(5), 8, Some(13)),
            ]
        );
    }

    #[test]
    fn classify_non_member() {
        let prefix = fibonacci_prefix(&big(7));
        assert_eq!(classify(&bigs(&[7]), &prefix).unwrap(), vec![row(None, 7, None)]);
    }

    #[test]
    fn classify_25_digit_numbers() {
        // F(120) and its neighbors F(119), F(121)
        let f119: BigUint = "3311648143516982017180081".parse().unwrap();
        let f120: BigUint = "5358359254990966640871840".parse().unwrap();
        let f121: BigUint = "8670007398507948658051921".parse().unwrap();
        let other: BigUint = "5358359254990966640871841".parse().unwrap();
        let numbers = vec![f120.clone(), other.clone()];
        let prefix = fibonacci_prefix(&other);
        let rows = classify(&numbers, &prefix).unwrap();
        assert_eq!(
            rows,
            vec![
                ClassificationRow {
                    previous: Some(f119),
                    observed: f120,
                    next: Some(f121),
                },
                ClassificationRow::unmatched(other),
            ]
        );
    }

    #[test]
    fn classify_zero_uses_position_one() {
        let prefix = fibonacci_prefix(&big(13));
        let rows = classify(&bigs(&[0]), &prefix).unwrap();
        assert_eq!(
            rows,
            vec![ClassificationRow {
                previous: Some(prefix[0].clone()),
                observed: big(0),
                next: Some(prefix[2].clone()),
            }]
        );
        assert_eq!(rows[0], row(Some(0), 0, Some(1)));
    }

    #[test]
    fn classify_one_takes_first_occurrence() {
        let prefix = fibonacci_prefix(&big(1));
        assert_eq!(classify(&bigs(&[1]), &prefix).unwrap(), vec![row(Some(0), 1, Some(1))]);
    }

    #[test]
    fn classify_zero_alone_has_no_neighbors() {
        let prefix = fibonacci_prefix(&big(0));
        assert_eq!(
            classify(&bigs(&[0]), &prefix).unwrap_err(),
            AnalysisError::PrefixTooShort { number: big(0), len: 1 }
        );
    }

    #[test]
    fn classify_match_at_front_of_foreign_prefix() {
        assert_eq!(
            classify(&bigs(&[5]), &bigs(&[5, 8])).unwrap_err(),
            AnalysisError::PrefixTooShort { number: big(5), len: 2 }
        );
    }

    #[test]
    fn members_satisfy_recurrence() {
        let numbers = bigs(&(1..=1000).collect::<Vec<_>>());
        let prefix = fibonacci_prefix(&big(1000));
        for r in classify(&numbers, &prefix).unwrap() {
            match (&r.previous, &r.next) {
                (Some(p), Some(n)) => {
                    assert!(prefix.contains(&r.observed));
                    assert_eq!(p + &r.observed, *n);
                }
                (None, None) => assert!(!prefix.contains(&r.observed)),
                _ => panic!("half-populated row {:?}", r),
            }
        }
    }

    #[test]
    fn classify_is_repeatable() {
        let prefix = fibonacci_prefix(&big(100));
        let numbers = bigs(&[0, 1, 4, 55, 89, 100]);
        assert_eq!(classify(&numbers, &prefix), classify(&numbers, &prefix));
    }
}
