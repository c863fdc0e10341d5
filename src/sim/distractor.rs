//! Wrong-answer generation for numeric questions
//!
//! Candidates are the correct value nudged by a small random delta; any
//! candidate equal to the answer or to an earlier distractor is rejected and
//! resampled. The spread doubles after every batch of failed attempts, which
//! bounds the loop even when the answer doesn't parse as a number.

use rand::Rng;

/// Initial delta spread around the correct value
pub const BASE_SPREAD: i64 = 8;
/// Failed draws tolerated before the spread widens
const ATTEMPTS_PER_SPREAD: u32 = 64;

/// Generate `count` distinct wrong answers for `correct`
pub fn numeric_distractors<R: Rng + ?Sized>(correct: &str, count: usize, rng: &mut R) -> Vec<String> {
    let base: i64 = correct.trim().parse().unwrap_or(0);
    let mut out: Vec<String> = Vec::with_capacity(count);
    let mut spread = BASE_SPREAD;
    let mut misses = 0u32;

    while out.len() < count {
        let mut delta = rng.random_range(-spread..=spread);
        if delta == 0 {
            delta = 2;
        }
        let candidate = base.saturating_add(delta).to_string();

        if candidate != correct && !out.contains(&candidate) {
            out.push(candidate);
            continue;
        }

        misses += 1;
        if misses >= ATTEMPTS_PER_SPREAD {
            misses = 0;
            spread = spread.saturating_mul(2);
            log::debug!("Widening distractor spread to {} for answer '{}'", spread, correct);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = numeric_distractors("19", 3, &mut Pcg32::seed_from_u64(7));
        let b = numeric_distractors("19", 3, &mut Pcg32::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_values_stay_near_answer() {
        let mut rng = Pcg32::seed_from_u64(42);
        for d in numeric_distractors("48", 3, &mut rng) {
            let v: i64 = d.parse().unwrap();
            assert!((v - 48).abs() <= BASE_SPREAD);
            assert_ne!(v, 48);
        }
    }

    #[test]
    fn test_non_numeric_answer_still_terminates() {
        let mut rng = Pcg32::seed_from_u64(1);
        let out = numeric_distractors("seven", 3, &mut rng);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_more_values_than_base_spread_allows() {
        // 16 non-zero deltas exist at the base spread; asking for more forces widening
        let mut rng = Pcg32::seed_from_u64(3);
        let out = numeric_distractors("0", 20, &mut rng);
        assert_eq!(out.len(), 20);
        assert!(!out.contains(&"0".to_string()));
    }

    proptest! {
        #[test]
        fn distractors_are_distinct_and_wrong(
            answer in -500i64..500,
            count in 1usize..6,
            seed in any::<u64>(),
        ) {
            let correct = answer.to_string();
            let mut rng = Pcg32::seed_from_u64(seed);
            let out = numeric_distractors(&correct, count, &mut rng);
            prop_assert_eq!(out.len(), count);
            for (i, d) in out.iter().enumerate() {
                prop_assert_ne!(d, &correct);
                prop_assert!(!out[i + 1..].contains(d));
            }
        }
    }
}
