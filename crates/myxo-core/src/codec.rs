//! Byte-pair fixed-point codec for texel-encoded agent state.
//!
//! Agent positions and headings live in [0,1) but are stored in 8-bit
//! normalized texel channels, which alone would quantize motion to 1/255 of
//! the field and make it visibly blocky. Splitting each value across two
//! channels (`value = hi + lo/255`) recovers ~16 bits of effective precision.
//! Both halves are re-quantized to the 1/255 grid on every encode so that
//! quantization error cannot compound across ticks.

/// Quantize to the nearest-below multiple of 1/255 (one texel channel step).
pub fn byte(a: f32) -> f32 {
    (a * 255.0).floor() / 255.0
}

/// Fractional part with GLSL semantics: `a - floor(a)`, always in [0,1).
///
/// Used for wrap-around of positions and headings; correct for negative
/// inputs (`fract(-0.25) == 0.75`).
pub fn fract(a: f32) -> f32 {
    a - a.floor()
}

/// Split a value in [0,1) into a (hi, lo) channel pair.
///
/// Both halves are multiples of 1/255. `decode(encode(v))` is exact when `v`
/// lies on the 1/255 grid and within 1/65025 otherwise.
pub fn encode(value: f32) -> (f32, f32) {
    (byte(value), byte(fract(value * 255.0)))
}

/// Reassemble a value from its (hi, lo) channel pair.
pub fn decode(hi: f32, lo: f32) -> f32 {
    hi + lo / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn round_trip_exact_on_channel_grid() {
        for k in 0u32..=255 {
            let v = k as f32 / 255.0;
            let (hi, lo) = encode(v);
            assert_eq!(decode(hi, lo), v, "k = {k}");
            assert_eq!(lo, 0.0, "grid points need no low half, k = {k}");
        }
    }

    #[test]
    fn round_trip_tight_on_fine_grid() {
        // Sample the full two-channel grid sparsely: every 97th step.
        for k in (0u32..65025).step_by(97) {
            let v = k as f32 / 65025.0;
            let (hi, lo) = encode(v);
            assert!(
                (decode(hi, lo) - v).abs() <= 1.0 / 65025.0 + 1e-7,
                "k = {k}"
            );
        }
    }

    #[test]
    fn encode_stable_on_channel_grid() {
        // Values that sit exactly on a channel step survive a
        // decode/re-encode cycle bit-for-bit; this is what keeps an
        // unchanged heading from drifting across ticks.
        for k in 0u32..=255 {
            let v = k as f32 / 255.0;
            let pair = encode(v);
            assert_eq!(encode(decode(pair.0, pair.1)), pair, "k = {k}");
        }
    }

    #[test]
    fn fract_wraps_negatives() {
        assert_eq!(fract(-0.25), 0.75);
        assert_eq!(fract(1.5), 0.5);
        assert_eq!(fract(0.0), 0.0);
    }

    proptest! {
        #[test]
        fn round_trip_error_bounded(v in 0.0f32..1.0) {
            let (hi, lo) = encode(v);
            let err = (decode(hi, lo) - v).abs();
            prop_assert!(err <= 1.0 / 65025.0 + 1e-6, "v = {v}, err = {err}");
        }

        #[test]
        fn halves_are_channel_multiples(v in 0.0f32..1.0) {
            let (hi, lo) = encode(v);
            for half in [hi, lo] {
                let steps = half * 255.0;
                prop_assert!((steps - steps.round()).abs() < 1e-3, "half = {half}");
                prop_assert!((0.0..=1.0).contains(&half));
            }
        }

    }
}
