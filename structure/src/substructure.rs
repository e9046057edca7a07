//! Substructure roles and the physical ordering table

use crate::layout::{ENCRYPTED_LEN, SUBSTRUCTURE_LEN};

/// The four 12-byte sections of the encrypted payload, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Substructure {
    Growth = 0,
    Attacks = 1,
    Effort = 2,
    Misc = 3,
}

impl Substructure {
    pub const ALL: [Substructure; 4] = [
        Substructure::Growth,
        Substructure::Attacks,
        Substructure::Effort,
        Substructure::Misc,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-letter tag used in order strings ("GAEM")
    pub fn tag(self) -> char {
        match self {
            Substructure::Growth => 'G',
            Substructure::Attacks => 'A',
            Substructure::Effort => 'E',
            Substructure::Misc => 'M',
        }
    }
}

use Substructure::{Attacks as A, Effort as E, Growth as G, Misc as M};

/// Physical storage order, indexed by `identity % 24`.
///
/// `ORDER_TABLE[n][p]` is the substructure stored at physical position `p`.
pub const ORDER_TABLE: [[Substructure; 4]; 24] = [
    [G, A, E, M],
    [G, A, M, E],
    [G, E, A, M],
    [G, E, M, A],
    [G, M, A, E],
    [G, M, E, A],
    [A, G, E, M],
    [A, G, M, E],
    [A, E, G, M],
    [A, E, M, G],
    [A, M, G, E],
    [A, M, E, G],
    [E, G, A, M],
    [E, G, M, A],
    [E, A, G, M],
    [E, A, M, G],
    [E, M, G, A],
    [E, M, A, G],
    [M, G, A, E],
    [M, G, E, A],
    [M, A, G, E],
    [M, A, E, G],
    [M, E, G, A],
    [M, E, A, G],
];

/// Storage order used for a given identity value
pub fn order_for(identity: u32) -> &'static [Substructure; 4] {
    &ORDER_TABLE[(identity % 24) as usize]
}

/// Check that an order entry is a permutation of the four roles
pub fn is_bijection(order: &[Substructure; 4]) -> bool {
    let mut seen = [false; 4];
    for role in order {
        if seen[role.index()] {
            return false;
        }
        seen[role.index()] = true;
    }
    seen.iter().all(|&s| s)
}

/// Rearrange physically ordered substructures into canonical order
pub fn unshuffle(physical: &[u8; ENCRYPTED_LEN], order: &[Substructure; 4]) -> [u8; ENCRYPTED_LEN] {
    let mut canonical = [0u8; ENCRYPTED_LEN];
    for (position, role) in order.iter().enumerate() {
        let src = position * SUBSTRUCTURE_LEN;
        let dst = role.index() * SUBSTRUCTURE_LEN;
        canonical[dst..dst + SUBSTRUCTURE_LEN]
            .copy_from_slice(&physical[src..src + SUBSTRUCTURE_LEN]);
    }
    canonical
}

/// Rearrange canonical substructures into physical storage order
pub fn shuffle(canonical: &[u8; ENCRYPTED_LEN], order: &[Substructure; 4]) -> [u8; ENCRYPTED_LEN] {
    let mut physical = [0u8; ENCRYPTED_LEN];
    for (position, role) in order.iter().enumerate() {
        let src = role.index() * SUBSTRUCTURE_LEN;
        let dst = position * SUBSTRUCTURE_LEN;
        physical[dst..dst + SUBSTRUCTURE_LEN]
            .copy_from_slice(&canonical[src..src + SUBSTRUCTURE_LEN]);
    }
    physical
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn order_string(order: &[Substructure; 4]) -> String {
        order.iter().map(|s| s.tag()).collect()
    }

    #[test]
    fn test_every_entry_is_a_bijection() {
        for (n, order) in ORDER_TABLE.iter().enumerate() {
            assert!(is_bijection(order), "entry {} is not a permutation", n);
        }
    }

    #[test]
    fn test_table_covers_all_permutations() {
        let distinct: HashSet<String> = ORDER_TABLE.iter().map(order_string).collect();
        assert_eq!(distinct.len(), 24);
    }

    #[test]
    fn test_known_entries() {
        assert_eq!(order_string(&ORDER_TABLE[0]), "GAEM");
        assert_eq!(order_string(&ORDER_TABLE[8]), "AEGM");
        assert_eq!(order_string(&ORDER_TABLE[23]), "MEAG");
        assert_eq!(order_for(0x1234_5678), &ORDER_TABLE[0]);
        assert_eq!(order_for(8), &ORDER_TABLE[8]);
        assert_eq!(order_for(24 + 13), &ORDER_TABLE[13]);
    }

    #[test]
    fn test_is_bijection_rejects_repeats() {
        assert!(!is_bijection(&[
            Substructure::Growth,
            Substructure::Growth,
            Substructure::Effort,
            Substructure::Misc,
        ]));
    }

    #[test]
    fn test_unshuffle_moves_growth_first() {
        // Order AEGM: Growth is stored third
        let mut physical = [0u8; ENCRYPTED_LEN];
        physical[2 * SUBSTRUCTURE_LEN] = 0xAB;
        let canonical = unshuffle(&physical, &ORDER_TABLE[8]);
        assert_eq!(canonical[0], 0xAB);
    }

    proptest! {
        #[test]
        fn prop_unshuffle_inverts_shuffle(
            bytes in prop::collection::vec(any::<u8>(), ENCRYPTED_LEN),
            n in 0usize..24,
        ) {
            let mut canonical = [0u8; ENCRYPTED_LEN];
            canonical.copy_from_slice(&bytes);
            let order = &ORDER_TABLE[n];
            prop_assert_eq!(unshuffle(&shuffle(&canonical, order), order), canonical);
        }
    }
}
