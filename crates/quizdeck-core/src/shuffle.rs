//! Optional random ordering of the problem sequence.

use rand::rng;
use rand::seq::SliceRandom;

use crate::model::Problem;

/// Shuffle the problems in place when `enabled`; identity order otherwise.
///
/// The permutation is uniform and freshly seeded per process. There is no
/// determinism guarantee across runs when shuffling is on.
pub fn maybe_shuffle(problems: &mut [Problem], enabled: bool) {
    if !enabled {
        return;
    }
    problems.shuffle(&mut rng());
    tracing::debug!(count = problems.len(), "shuffled problems");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<Problem> {
        (0..n)
            .map(|i| Problem::new(format!("q{i}"), format!("a{i}")))
            .collect()
    }

    #[test]
    fn disabled_preserves_order() {
        let original = numbered(8);
        let mut problems = original.clone();
        maybe_shuffle(&mut problems, false);
        assert_eq!(problems, original);
    }

    #[test]
    fn enabled_keeps_the_same_multiset() {
        let original = numbered(50);
        let mut problems = original.clone();
        maybe_shuffle(&mut problems, true);

        let mut sorted = problems.clone();
        sorted.sort_by(|a, b| a.question.cmp(&b.question).then(a.answer.cmp(&b.answer)));
        let mut expected = original.clone();
        expected.sort_by(|a, b| a.question.cmp(&b.question).then(a.answer.cmp(&b.answer)));
        assert_eq!(sorted, expected);
    }

    #[test]
    fn enabled_eventually_produces_a_different_order() {
        // 50 elements over 10 attempts: the odds of every shuffle landing on
        // the identity permutation are negligible.
        let original = numbered(50);
        let moved = (0..10).any(|_| {
            let mut problems = original.clone();
            maybe_shuffle(&mut problems, true);
            problems != original
        });
        assert!(moved);
    }
}
