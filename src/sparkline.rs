//! Compresses a sample sequence into a one-line glyph string that keeps a
//! waveform's shape readable at a glance: amplitude buckets, zero runs and
//! sign changes survive, everything else is dropped.
use std::num::FpCategory;
/// Amplitude alphabet, most negative to most positive.
pub const LEVELS: [char; 7] = ['_', '⎽', '⎼', '—', '⎻', '⎺', '‾'];
/// Tolerance for the out-of-bounds test. Host numeric read paths round
/// values on the way out of the target, so machine epsilon is far too tight.
pub const CLIP_TOLERANCE: f64 = 1.5e-7;
/// Encode a sample sequence.
///
/// A healthy waveform looks like `[0—⎻‾⎺‾⎻—x—⎼⎽_⎽⎼—]`:
/// `0` marks a true zero (runs of two or more collapse to `0(count)`),
/// `x` a zero crossing, `E` a sample outside `[-1.0, 1.0]`, and `N`, `I`,
/// `S` a NaN, infinite or subnormal value.
///
/// Samples are normalized by the sequence maximum when it is positive so low
/// level detail stays visible. The maximum, not the absolute maximum: a
/// sequence that only dips negative is left unscaled. Consecutive samples
/// that land in the same amplitude bucket emit a single glyph.
///
/// # Panics
///
/// Panics when `samples` is empty; callers gate on sample count first.
pub fn encode(samples: &[f64]) -> String {
    assert!(!samples.is_empty(), "cannot encode an empty sample sequence");
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let scale = if max > 0.0 { max } else { 1.0 };
    let mut out = String::from("[");
    let mut zero_run: usize = 0;
    for (i, &sample) in samples.iter().enumerate() {
        if sample == 0.0 {
            if zero_run == 0 {
                out.push('0');
            }
            zero_run += 1;
            continue;
        }
        if zero_run > 1 {
            out.push_str(&format!("({zero_run})"));
        }
        zero_run = 0;
        match sample.classify() {
            FpCategory::Nan => {
                out.push('N');
                continue;
            }
            FpCategory::Infinite => {
                out.push('I');
                continue;
            }
            _ => {}
        }
        if sample.abs() - CLIP_TOLERANCE > 1.0 {
            out.push('E');
            continue;
        }
        if i > 0 && (sample < 0.0) != (samples[i - 1] < 0.0) {
            out.push('x');
            continue;
        }
        if sample.classify() == FpCategory::Subnormal {
            out.push('S');
            continue;
        }
        let level = ((sample / scale + 1.0) / 2.0 * 6.99).clamp(0.0, 6.0) as usize;
        let glyph = LEVELS[level];
        if !out.ends_with(glyph) {
            out.push(glyph);
        }
    }
    if zero_run > 1 {
        out.push_str(&format!("({zero_run})"));
    }
    out.push(']');
    out
}
/// Across all channels, the number of zero samples that extend a run of
/// silence. The sample before the first is treated as silent, so a leading
/// zero counts; a lone zero, like one starting a sine wave, is not reported.
pub fn consecutive_zero_samples(channels: &[Vec<f64>]) -> usize {
    let mut count = 0;
    for channel in channels {
        for (i, &sample) in channel.iter().enumerate() {
            let last = if i > 0 { channel[i - 1] } else { 0.0 };
            if sample == 0.0 && last == 0.0 {
                count += 1;
            }
        }
    }
    if count > 1 {
        count
    } else {
        0
    }
}
/// Share of the block that is not collapsed silence, as a percentage.
pub fn percent_filled(channels: &[Vec<f64>]) -> f64 {
    let total: usize = channels.iter().map(|c| c.len()).sum();
    if total == 0 {
        return 100.0;
    }
    (total - consecutive_zero_samples(channels)) as f64 / total as f64 * 100.0
}
#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    #[test]
    fn zero_run_flushes_before_the_next_glyph() {
        assert_eq!(encode(&[0.0, 0.0, 0.0, 1.0]), "[0(3)‾]");
    }
    #[test]
    fn trailing_zero_run_is_flushed() {
        assert_eq!(encode(&[1.0, 0.0, 0.0, 0.0]), "[‾0(3)]");
    }
    #[test]
    fn single_zero_has_no_count() {
        assert_eq!(encode(&[0.0]), "[0]");
        assert_eq!(encode(&[1.0, 0.0, 1.0]), "[‾0‾]");
    }
    #[test]
    fn out_of_bounds_sample_marks_e() {
        assert_eq!(encode(&[1.2]), "[E]");
        assert_eq!(encode(&[-1.2]), "[E]");
    }
    #[test]
    fn clip_tolerance_absorbs_read_rounding() {
        assert_eq!(encode(&[1.0000001]), "[‾]");
    }
    #[test]
    fn sign_change_marks_a_crossing() {
        assert_eq!(encode(&[0.5, -0.5]), "[‾x]");
    }
    #[test]
    fn crossing_compares_against_the_raw_predecessor() {
        assert_eq!(encode(&[0.5, 0.0, -0.5]), "[‾0x]");
    }
    #[test]
    fn repeated_bucket_collapses_to_one_glyph() {
        assert_eq!(encode(&[0.9, 0.91]), "[‾]");
    }
    #[test]
    fn negative_only_sequence_is_left_unscaled() {
        assert_eq!(encode(&[-0.5]), "[⎽]");
    }
    #[test]
    fn non_finite_samples_get_markers() {
        assert_eq!(encode(&[f64::NAN]), "[N]");
        assert_eq!(encode(&[f64::INFINITY]), "[I]");
        assert_eq!(encode(&[0.5, f64::NAN, 0.5]), "[‾N‾]");
    }
    #[test]
    fn subnormal_marks_s() {
        assert_eq!(encode(&[f64::MIN_POSITIVE / 2.0]), "[S]");
    }
    #[test]
    fn full_wave_reads_like_the_legend() {
        let samples = [0.0, 0.5, 1.0, 0.5, 0.0, -0.5, -1.0, -0.5];
        assert_eq!(encode(&samples), "[0⎺‾⎺0x_⎽]");
    }
    #[test]
    fn encode_is_idempotent_and_bracketed() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let len = rng.gen_range(1..64);
            let samples: Vec<f64> = (0..len).map(|_| rng.gen_range(-1.5..1.5)).collect();
            let first = encode(&samples);
            assert_eq!(first, encode(&samples));
            assert!(first.len() >= 2);
            assert!(first.starts_with('[') && first.ends_with(']'));
        }
    }
    #[test]
    #[should_panic(expected = "empty sample sequence")]
    fn empty_input_is_a_contract_violation() {
        encode(&[]);
    }
    #[test]
    fn statistics_match_the_worked_example() {
        let channels = vec![vec![0.0, 0.0, 1.0, -1.0], vec![0.0, 1.0, 0.0, 0.0]];
        assert_eq!(consecutive_zero_samples(&channels), 4);
        assert_eq!(percent_filled(&channels), 50.0);
    }
    #[test]
    fn lone_zero_is_not_reported_as_silence() {
        assert_eq!(consecutive_zero_samples(&[vec![0.0, 1.0, -1.0]]), 0);
        assert_eq!(percent_filled(&[vec![0.0, 1.0, -1.0]]), 100.0);
    }
    #[test]
    fn empty_block_counts_as_filled() {
        assert_eq!(percent_filled(&[]), 100.0);
    }
}
