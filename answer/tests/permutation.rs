use std::collections::HashSet;

use answer::permutations;
use proptest::prelude::*;

fn factorial(n: usize) -> usize {
    (1..=n).product()
}

#[test]
fn empty_input_has_one_ordering() {
    let perms = permutations::<u8>(&[]);
    assert_eq!(perms, vec![Vec::<u8>::new()]);
}

#[test]
fn single_item_has_one_ordering() {
    assert_eq!(permutations(&["a"]), vec![vec!["a"]]);
}

#[test]
fn three_items_in_positional_order() {
    let perms = permutations(&[1, 2, 3]);
    assert_eq!(
        perms,
        vec![
            vec![1, 2, 3],
            vec![1, 3, 2],
            vec![2, 1, 3],
            vec![2, 3, 1],
            vec![3, 1, 2],
            vec![3, 2, 1],
        ]
    );
}

#[test]
fn equal_values_are_positionally_distinct() {
    let perms = permutations(&["x", "x", "y"]);
    assert_eq!(perms.len(), 6);
    assert_eq!(perms.iter().filter(|p| **p == ["x", "x", "y"]).count(), 2);
}

proptest! {
    #[test]
    fn yields_n_factorial_distinct_orderings(n in 0usize..7) {
        let items: Vec<usize> = (0..n).collect();
        let perms = permutations(&items);
        prop_assert_eq!(perms.len(), factorial(n));

        let unique: HashSet<&Vec<usize>> = perms.iter().collect();
        prop_assert_eq!(unique.len(), perms.len());

        for perm in &perms {
            let mut sorted = perm.clone();
            sorted.sort();
            prop_assert_eq!(&sorted, &items);
        }
    }
}
