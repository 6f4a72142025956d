/// Rank values of a hand grouped by multiplicity, sorted by (count desc, rank desc).
///
/// Example: 3-3-K-K-3 groups as [(3, 3), (13, 2)].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(u8, u8)>,
}

impl RankGroups {
    /// Group raw rank values (2..=14, or 1 for a low Ace).
    pub fn from_values(values: &[u8]) -> Self {
        let mut counts = [0u8; 15];
        for &v in values {
            counts[usize::from(v)] += 1;
        }
        let mut groups: Vec<(u8, u8)> = (1u8..=14)
            .filter(|&v| counts[usize::from(v)] > 0)
            .map(|v| (v, counts[usize::from(v)]))
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        Self { groups }
    }

    /// Multiplicities, largest first, e.g. `[3, 2]` for a full house.
    pub fn counts(&self) -> Vec<u8> {
        self.groups.iter().map(|&(_, c)| c).collect()
    }

    /// Distinct rank values in tie-break order.
    pub fn ranks(&self) -> Vec<u8> {
        self.groups.iter().map(|&(v, _)| v).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quads_then_kicker() {
        let g = RankGroups::from_values(&[14, 14, 13, 14, 14]);
        assert_eq!(g.counts(), vec![4, 1]);
        assert_eq!(g.ranks(), vec![14, 13]);
    }

    #[test]
    fn lower_trips_outrank_higher_pair_in_order() {
        let g = RankGroups::from_values(&[3, 13, 3, 13, 3]);
        assert_eq!(g.counts(), vec![3, 2]);
        assert_eq!(g.ranks(), vec![3, 13]);
    }

    #[test]
    fn two_pair_orders_pairs_then_kicker() {
        let g = RankGroups::from_values(&[5, 11, 11, 9, 5]);
        assert_eq!(g.counts(), vec![2, 2, 1]);
        assert_eq!(g.ranks(), vec![11, 5, 9]);
    }

    #[test]
    fn singletons_sort_descending() {
        let g = RankGroups::from_values(&[1, 2, 3, 4, 5]);
        assert_eq!(g.counts(), vec![1, 1, 1, 1, 1]);
        assert_eq!(g.ranks(), vec![5, 4, 3, 2, 1]);
    }
}
