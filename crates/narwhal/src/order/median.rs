/// Sentinel for "no neighbors in the fixed rank".
pub const UNCONSTRAINED: f64 = -1.0;

/// Median of sorted neighbor positions.
///
/// An odd count yields the middle element and two elements their average. Larger even
/// counts blend the two central elements, weighting each by the spread on the opposite side
/// so the median leans towards the denser half.
pub fn median_value(positions: &[usize]) -> f64 {
    let len = positions.len();
    if len == 0 {
        return UNCONSTRAINED;
    }
    let m = len / 2;
    if len % 2 == 1 {
        return positions[m] as f64;
    }
    let (lo, hi) = (positions[m - 1] as f64, positions[m] as f64);
    if len == 2 {
        return (lo + hi) / 2.0;
    }
    let left = lo - positions[0] as f64;
    let right = positions[len - 1] as f64 - hi;
    if left + right == 0.0 {
        return (lo + hi) / 2.0;
    }
    (lo * right + hi * left) / (left + right)
}

/// Stable reorder of `rank` by `measure`. Entries measured [`UNCONSTRAINED`] keep their slot
/// and everything else flows around them.
pub fn sort_by_measure<T: Copy>(rank: &mut [T], measure: impl Fn(T) -> f64) {
    let fixed: Vec<bool> = rank.iter().map(|v| measure(*v) < 0.0).collect();
    let mut movable: Vec<T> = rank
        .iter()
        .zip(&fixed)
        .filter(|(_, f)| !**f)
        .map(|(v, _)| *v)
        .collect();
    movable.sort_by(|a, b| measure(*a).total_cmp(&measure(*b)));

    let mut it = movable.into_iter();
    for (slot, f) in rank.iter_mut().zip(&fixed) {
        if !*f {
            if let Some(v) = it.next() {
                *slot = v;
            }
        }
    }
}
