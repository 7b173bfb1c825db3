//! Typo matcher for unknown command and flag names.

/// Find the candidate closest to `target`, if any is close enough.
///
/// The allowed edit distance grows with the length of `target`: one edit per
/// three characters, but at least one.
pub(crate) fn closest<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    target: &str,
) -> Option<&'a str> {
    let max_dist = (target.chars().count() / 3).max(1);
    candidates
        .into_iter()
        .map(|cand| (distance(cand, target), cand))
        .filter(|&(dist, _)| dist <= max_dist)
        // `min_by_key` keeps the first one on ties, which follows table order.
        .min_by_key(|&(dist, _)| dist)
        .map(|(_, cand)| cand)
}

/// Levenshtein distance in chars, with a single rolling row.
fn distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let subst = diag + usize::from(ca != cb);
            diag = row[j + 1];
            row[j + 1] = subst.min(row[j] + 1).min(diag + 1);
        }
    }
    row[b.len()]
}
