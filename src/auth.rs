//! Auth-string candidate space for the parallel undock search (spec §4.5).
//!
//! Passwords are drawn from the fixed six-symbol alphabet `{5,6,7,8,9,.}`.
//! The first and last position of a candidate may never be `.`, so the two
//! end positions range over the other five symbols while any middle
//! positions range over all six. Candidates are enumerated in mixed-radix
//! order with the last position as least significant, which is what lets a
//! contiguous `[start, end)` index range be handed to a solver thread
//! without it ever materializing the other solvers' candidates.

/// The full symbol set, end positions restricted to `ALPHABET[..END_RADIX]`.
pub const ALPHABET: [u8; 6] = [b'5', b'6', b'7', b'8', b'9', b'.'];
const END_RADIX: u64 = 5;
const MIDDLE_RADIX: u64 = 6;

/// Number of distinct candidates of `length` (spec §4.5: 5, 25, `5*6^(L-2)*5`
/// for `L >= 2`).
pub fn cardinality(length: usize) -> u64 {
    match length {
        0 => 0,
        1 => END_RADIX,
        l => END_RADIX * MIDDLE_RADIX.pow(l as u32 - 2) * END_RADIX,
    }
}

fn radix_at(length: usize, position: usize) -> u64 {
    if position == 0 || position == length - 1 {
        END_RADIX
    } else {
        MIDDLE_RADIX
    }
}

/// Decode a 0-based index in `[0, cardinality(length))` into its candidate
/// string. Odometer decoding: the last position is the fastest-changing
/// (least significant) digit, matching the original generator's nested loop
/// order.
pub fn candidate_at(length: usize, index: u64) -> String {
    debug_assert!(index < cardinality(length));
    let mut digits = vec![0u64; length];
    let mut remaining = index;
    for position in (0..length).rev() {
        let radix = radix_at(length, position);
        digits[position] = remaining % radix;
        remaining /= radix;
    }
    digits
        .into_iter()
        .map(|d| ALPHABET[d as usize] as char)
        .collect()
}

/// A half-open `[start, end)` range of candidate indices assigned to one
/// solver thread.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GuessRange {
    pub start: u64,
    pub end: u64,
}

impl GuessRange {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

/// Partition `cardinality(length)` candidates evenly across `num_solvers`
/// threads (spec §4.5, §9 open question (a)). When the space is smaller
/// than the solver count (as it always is for `length == 1`, cardinality 5),
/// every solver but the last gets an empty range and the last solver
/// searches the whole space: the original generator's hard-coded
/// length-1 special case, generalized to any case where the per-solver
/// share would floor to zero.
pub fn guessing_ranges(length: usize, num_solvers: usize) -> Vec<GuessRange> {
    assert!(num_solvers > 0, "at least one solver is required");
    let total = cardinality(length);
    let share = total / num_solvers as u64;

    if share == 0 {
        let mut ranges = vec![GuessRange { start: total, end: total }; num_solvers.saturating_sub(1)];
        ranges.push(GuessRange { start: 0, end: total });
        return ranges;
    }

    let mut ranges = Vec::with_capacity(num_solvers);
    for s in 0..num_solvers - 1 {
        let start = s as u64 * share;
        ranges.push(GuessRange { start, end: start + share });
    }
    let start = (num_solvers as u64 - 1) * share;
    ranges.push(GuessRange { start, end: total });
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinality_matches_formula() {
        assert_eq!(cardinality(1), 5);
        assert_eq!(cardinality(2), 25);
        assert_eq!(cardinality(3), 5 * 6 * 5);
        assert_eq!(cardinality(4), 5 * 6 * 6 * 5);
    }

    #[test]
    fn candidate_at_end_positions_never_dot() {
        let total = cardinality(3);
        for index in 0..total {
            let candidate = candidate_at(3, index);
            let bytes = candidate.as_bytes();
            assert_ne!(bytes[0], b'.');
            assert_ne!(bytes[2], b'.');
        }
    }

    #[test]
    fn candidate_at_covers_every_index_uniquely() {
        let total = cardinality(2);
        let mut seen = std::collections::HashSet::new();
        for index in 0..total {
            seen.insert(candidate_at(2, index));
        }
        assert_eq!(seen.len(), total as usize);
    }

    #[test]
    fn length_one_assigns_whole_space_to_last_solver_only() {
        let ranges = guessing_ranges(1, 4);
        assert_eq!(ranges.len(), 4);
        assert!(ranges[0].is_empty());
        assert!(ranges[1].is_empty());
        assert!(ranges[2].is_empty());
        assert_eq!(ranges[3], GuessRange { start: 0, end: 5 });
    }

    #[test]
    fn ranges_partition_the_space_exactly_when_it_divides_evenly() {
        let ranges = guessing_ranges(2, 5);
        let total: u64 = ranges.iter().map(|r| r.len()).sum();
        assert_eq!(total, cardinality(2));
        for window in ranges.windows(2) {
            assert_eq!(window[0].end, window[1].start);
        }
    }
}
