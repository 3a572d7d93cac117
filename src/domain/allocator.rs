use std::collections::BTreeMap;

use crate::models::{QuestionType, QuestionTypeCount};

/// Configured range for the requested question total. The range is a
/// deployment knob, not a domain invariant: `QuestionAllocator::set_total`
/// clamps into it instead of rejecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalBounds {
    pub min: u32,
    pub max: u32,
}

impl TotalBounds {
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    pub fn clamp(&self, total: u32) -> u32 {
        total.clamp(self.min, self.max)
    }
}

impl Default for TotalBounds {
    fn default() -> Self {
        Self { min: 5, max: 50 }
    }
}

/// Per-type question counts, always carrying every type in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    counts: Vec<QuestionTypeCount>,
}

impl Distribution {
    /// All counts zero.
    pub fn empty() -> Self {
        Self {
            counts: QuestionType::ALL
                .iter()
                .map(|&question_type| QuestionTypeCount {
                    question_type,
                    count: 0,
                })
                .collect(),
        }
    }

    /// The dashboard's seed distribution: 5 multiple choice, 3 true/false,
    /// 2 select-all-that-apply.
    pub fn seed() -> Self {
        let mut distribution = Self::empty();
        distribution.set(QuestionType::MultipleChoice, 5);
        distribution.set(QuestionType::TrueFalse, 3);
        distribution.set(QuestionType::SelectAllThatApply, 2);
        distribution
    }

    pub fn from_counts(counts: &BTreeMap<QuestionType, u32>) -> Self {
        let mut distribution = Self::empty();
        for (&question_type, &count) in counts {
            distribution.set(question_type, count);
        }
        distribution
    }

    pub fn get(&self, question_type: QuestionType) -> u32 {
        self.counts
            .iter()
            .find(|entry| entry.question_type == question_type)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    fn set(&mut self, question_type: QuestionType, count: u32) {
        if let Some(entry) = self
            .counts
            .iter_mut()
            .find(|entry| entry.question_type == question_type)
        {
            entry.count = count;
        }
    }

    pub fn sum(&self) -> u32 {
        self.counts.iter().map(|entry| entry.count).sum()
    }

    pub fn entries(&self) -> &[QuestionTypeCount] {
        &self.counts
    }

    /// Wire shape for the relay: `{ "multiple-choice": 5, ... }`, zero
    /// counts omitted.
    pub fn to_wire_counts(&self) -> BTreeMap<QuestionType, u32> {
        self.counts
            .iter()
            .filter(|entry| entry.count > 0)
            .map(|entry| (entry.question_type, entry.count))
            .collect()
    }
}

/// Keeps the question-type distribution consistent with the requested total.
///
/// Rebalancing is deterministic and order-biased: a surplus lands entirely on
/// the first type, a deficit is absorbed walking the canonical order. Ties
/// always favor earlier types; this is the documented behavior, not a
/// proportional split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionAllocator {
    distribution: Distribution,
    total: u32,
    bounds: TotalBounds,
}

impl QuestionAllocator {
    pub fn new(bounds: TotalBounds, total: u32, distribution: Distribution) -> Self {
        let mut allocator = Self {
            distribution,
            total: 0,
            bounds,
        };
        allocator.set_total(total);
        allocator
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn bounds(&self) -> TotalBounds {
        self.bounds
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn total_allocated(&self) -> u32 {
        self.distribution.sum()
    }

    /// Changes the requested total (clamped into bounds) and rebalances so
    /// the distribution sums to it again. No count ever goes negative.
    pub fn set_total(&mut self, new_total: u32) {
        self.total = self.bounds.clamp(new_total);

        let current = self.distribution.sum();
        if current < self.total {
            let surplus = self.total - current;
            let first = QuestionType::ALL[0];
            let count = self.distribution.get(first);
            self.distribution.set(first, count + surplus);
        } else if current > self.total {
            let mut remaining = current - self.total;
            for &question_type in QuestionType::ALL.iter() {
                if remaining == 0 {
                    break;
                }
                let count = self.distribution.get(question_type);
                let removed = count.min(remaining);
                self.distribution.set(question_type, count - removed);
                remaining -= removed;
            }
        }
    }

    /// Steps one type's count by `delta`, clamping at zero. The change is
    /// accepted only if the new sum stays within the requested total;
    /// otherwise the distribution is left untouched. Returns whether the
    /// change was applied.
    pub fn adjust(&mut self, question_type: QuestionType, delta: i32) -> bool {
        let current = self.distribution.get(question_type);
        let candidate = (current as i64 + delta as i64).max(0) as u32;
        let others = self.distribution.sum() - current;

        if others + candidate <= self.total {
            self.distribution.set(question_type, candidate);
            candidate != current
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocator_with(counts: [u32; 5], total: u32) -> QuestionAllocator {
        let mut distribution = Distribution::empty();
        for (&question_type, &count) in QuestionType::ALL.iter().zip(counts.iter()) {
            distribution.set(question_type, count);
        }
        QuestionAllocator {
            distribution,
            total,
            bounds: TotalBounds::default(),
        }
    }

    fn counts_of(allocator: &QuestionAllocator) -> Vec<u32> {
        allocator
            .distribution()
            .entries()
            .iter()
            .map(|entry| entry.count)
            .collect()
    }

    #[test]
    fn shrinking_the_total_removes_in_canonical_order() {
        let mut allocator = allocator_with([5, 2, 2, 1, 0], 10);
        allocator.set_total(7);
        assert_eq!(counts_of(&allocator), vec![2, 2, 2, 1, 0]);
        assert_eq!(allocator.total_allocated(), 7);
    }

    #[test]
    fn growing_the_total_adds_the_whole_surplus_to_the_first_type() {
        let mut allocator = allocator_with([5, 2, 2, 1, 0], 10);
        allocator.set_total(15);
        assert_eq!(counts_of(&allocator), vec![10, 2, 2, 1, 0]);
        assert_eq!(allocator.total_allocated(), 15);
    }

    #[test]
    fn set_total_always_settles_to_the_new_total() {
        let totals = [5, 7, 12, 50, 23, 8];
        let mut allocator = allocator_with([3, 3, 2, 1, 1], 10);
        for &total in &totals {
            allocator.set_total(total);
            assert_eq!(allocator.total_allocated(), total);
            assert!(counts_of(&allocator).iter().all(|&c| c <= total));
        }
    }

    #[test]
    fn set_total_clamps_into_bounds() {
        let mut allocator = allocator_with([5, 3, 0, 0, 2], 10);
        allocator.set_total(500);
        assert_eq!(allocator.total(), 50);
        assert_eq!(allocator.total_allocated(), 50);

        allocator.set_total(1);
        assert_eq!(allocator.total(), 5);
        assert_eq!(allocator.total_allocated(), 5);
    }

    #[test]
    fn adjust_is_rejected_when_it_would_exceed_the_total() {
        let mut allocator = allocator_with([5, 3, 0, 0, 2], 10);
        assert!(!allocator.adjust(QuestionType::TrueFalse, 1));
        assert_eq!(counts_of(&allocator), vec![5, 3, 0, 0, 2]);
    }

    #[test]
    fn adjust_clamps_at_zero_without_underflow() {
        let mut allocator = allocator_with([5, 0, 0, 0, 2], 10);
        // Count is already zero; the clamped candidate equals the current
        // value, so nothing changes.
        assert!(!allocator.adjust(QuestionType::TrueFalse, -1));
        assert_eq!(allocator.distribution().get(QuestionType::TrueFalse), 0);
    }

    #[test]
    fn decrement_leaves_the_sum_below_the_total() {
        let mut allocator = allocator_with([5, 3, 0, 0, 2], 10);
        assert!(allocator.adjust(QuestionType::MultipleChoice, -1));
        assert_eq!(allocator.total_allocated(), 9);
        // Room freed by the decrement can be taken by another type.
        assert!(allocator.adjust(QuestionType::FreeResponse, 1));
        assert_eq!(allocator.total_allocated(), 10);
    }

    #[test]
    fn adjust_sequences_never_exceed_the_total_or_go_negative() {
        let mut allocator = allocator_with([5, 3, 0, 0, 2], 10);
        let moves = [
            (QuestionType::MultipleChoice, -1),
            (QuestionType::MultipleChoice, -1),
            (QuestionType::FillInBlanks, 1),
            (QuestionType::FillInBlanks, 1),
            (QuestionType::SelectAllThatApply, 1),
            (QuestionType::TrueFalse, -1),
            (QuestionType::FreeResponse, 1),
            (QuestionType::FreeResponse, 1),
        ];
        for (question_type, delta) in moves {
            allocator.adjust(question_type, delta);
            assert!(allocator.total_allocated() <= allocator.total());
        }
    }

    #[test]
    fn new_settles_the_seed_distribution_against_the_requested_total() {
        let allocator =
            QuestionAllocator::new(TotalBounds::default(), 12, Distribution::seed());
        assert_eq!(allocator.total_allocated(), 12);
        // Surplus of 2 over the seed's 10 lands on multiple choice.
        assert_eq!(allocator.distribution().get(QuestionType::MultipleChoice), 7);
    }

    #[test]
    fn wire_counts_omit_zero_entries() {
        let allocator =
            QuestionAllocator::new(TotalBounds::default(), 10, Distribution::seed());
        let counts = allocator.distribution().to_wire_counts();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.get(&QuestionType::MultipleChoice), Some(&5));
        assert!(!counts.contains_key(&QuestionType::FreeResponse));
    }
}
