use crate::data::{parse_number, Row};
use log::debug;
use std::num::NonZeroUsize;

/// Keep the rows whose X value is at most `max_x`.
///
/// Without a threshold every row passes, even one whose X does not parse;
/// such rows are only dropped later, per series. A threshold that is not
/// positive counts as no threshold.
pub fn filter_rows<'a>(rows: &'a [Row], x_index: usize, max_x: Option<f64>) -> Vec<&'a Row> {
    let Some(max_x) = max_x.filter(|max| *max > 0.0) else {
        return rows.iter().collect();
    };

    let kept: Vec<&Row> = rows
        .iter()
        .filter(|row| {
            row.get(x_index)
                .and_then(|field| parse_number(field))
                .is_some_and(|x| x <= max_x)
        })
        .collect();

    debug!(
        "range filter <= {}: kept {} of {} rows",
        max_x,
        kept.len(),
        rows.len()
    );
    kept
}

/// Keep every `stride`-th item, starting with the first.
pub fn thin<T: Clone>(items: &[T], stride: NonZeroUsize) -> Vec<T> {
    items.iter().step_by(stride.get()).cloned().collect()
}
