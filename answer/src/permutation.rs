/// Every ordering of `items`, treating equal values at different positions
/// as distinct. Yields `n!` orderings; empty and single-item input both
/// produce exactly one ordering (a copy of the input).
///
/// Orderings come out lexicographic by position: all orderings starting with
/// `items[0]` first, then those starting with `items[1]`, and so on.
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }

    let mut perms = Vec::new();
    for (i, head) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for tail in permutations(&rest) {
            let mut perm = Vec::with_capacity(items.len());
            perm.push(head.clone());
            perm.extend(tail);
            perms.push(perm);
        }
    }
    perms
}
