use tracing::{instrument, trace};

/// 1-based line containing byte `index` of `raw_file_contents`.
/// Indices past the end resolve to the last line.
#[instrument(skip(raw_file_contents))]
pub(crate) fn from_index(raw_file_contents: &str, index: usize) -> usize {
    let safe_index = index.min(raw_file_contents.len());

    let line_number = raw_file_contents.as_bytes()[..safe_index]
        .iter()
        .filter(|b| **b == b'\n')
        .count()
        + 1;

    trace!(
        index = safe_index,
        line_number = line_number,
        "Calculated line number from index"
    );

    line_number
}
