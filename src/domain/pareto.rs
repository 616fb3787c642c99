//! Non-dominated filtering. Every objective is "lower is better".

/// Returns true if `a` dominates `b`: no worse anywhere, strictly better somewhere.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b) {
        if x > y {
            return false;
        }
        if x < y {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Indices of the items that no other item dominates, in input order.
pub fn pareto_front_indices<T, F>(items: &[T], objectives: &[F]) -> Vec<usize>
where
    F: Fn(&T) -> f64,
{
    let values: Vec<Vec<f64>> = items
        .iter()
        .map(|item| objectives.iter().map(|objective| objective(item)).collect())
        .collect();

    (0..values.len())
        .filter(|&i| {
            !values
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && dominates(other, &values[i]))
        })
        .collect()
}
