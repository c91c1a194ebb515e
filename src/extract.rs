use crate::error::PeekError;
use crate::host::BlockHost;
use crate::view::MemoryView;
/// Pull `sample_count` values out of a channel view, starting `start_sample`
/// elements in. Returns exactly `sample_count` values or the first read
/// error; a short sequence is never produced.
pub fn samples<H: BlockHost + ?Sized>(
    view: &MemoryView<'_, H>,
    start_sample: u64,
    sample_count: u64,
) -> Result<Vec<f64>, PeekError> {
    let window = view.slice(start_sample * view.element_type().byte_size(), sample_count);
    let mut out = Vec::with_capacity(sample_count as usize);
    for index in 0..sample_count {
        out.push(window.read(index)?);
    }
    Ok(out)
}
/// Render samples as text with fixed decimal precision. With `as_array` the
/// values are comma separated so they paste directly into another tool.
pub fn format_samples(samples: &[f64], precision: usize, as_array: bool) -> String {
    let separator = if as_array { ", " } else { " " };
    samples
        .iter()
        .map(|value| format!("{value:.precision$}"))
        .collect::<Vec<_>>()
        .join(separator)
}
