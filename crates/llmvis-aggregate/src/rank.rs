//! Deterministic dense ranking of brands within a scope.

/// Direction a metric ranks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Higher values rank first (visibility, share of voice, depth,
    /// citation share, sentiment).
    Descending,
    /// Lower values rank first (average position).
    Ascending,
}

/// One brand's value for a single metric.
#[derive(Debug, Clone)]
pub struct RankEntry {
    pub slug: String,
    pub value: f64,
    /// Brands without data always rank after brands with data,
    /// regardless of direction; otherwise a 0 average position would win
    /// an ascending sort.
    pub has_data: bool,
    /// Primary tie-break, higher first.
    pub mention_count: usize,
}

/// Assign ranks `1..=N` aligned with the input order of `entries`.
///
/// Ties break by mention count (descending) then slug (ascending), so
/// the assignment is a deterministic permutation: no gaps, no
/// duplicates.
#[must_use]
pub fn assign_ranks(entries: &[RankEntry], direction: Direction) -> Vec<usize> {
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| {
        let (ea, eb) = (&entries[a], &entries[b]);
        eb.has_data
            .cmp(&ea.has_data)
            .then_with(|| match direction {
                Direction::Descending => eb.value.total_cmp(&ea.value),
                Direction::Ascending => ea.value.total_cmp(&eb.value),
            })
            .then_with(|| eb.mention_count.cmp(&ea.mention_count))
            .then_with(|| ea.slug.cmp(&eb.slug))
    });

    let mut ranks = vec![0; entries.len()];
    for (position, index) in order.into_iter().enumerate() {
        ranks[index] = position + 1;
    }
    ranks
}
