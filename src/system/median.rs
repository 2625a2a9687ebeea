//! Median filter over echo round-trip times

/// Sorts `values` in place and returns the lower median.
///
/// For an even number of values the smaller of the two middle values is
/// returned. `None` for an empty slice.
pub fn lower_median(values: &mut [u32]) -> Option<u32> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    Some(values[(values.len() - 1) / 2])
}
