use rust_decimal::Decimal;

/// Round `value` to `precision` significant digits. The float is first converted to
/// the decimal number it represents, so the rounding follows the decimal digits and not
/// the binary representation. `None` is returned for values that have no decimal
/// representation (NaN, infinities, magnitudes outside of the decimal range).
pub fn significant(value: f64, precision: u32) -> Option<Decimal> {
    Decimal::from_f64_retain(value)?.round_sf(precision)
}

// Values without a decimal representation are only equal to themselves.
fn same_value(a: f64, key_a: &Option<Decimal>, b: f64, key_b: &Option<Decimal>) -> bool {
    match (key_a, key_b) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Check if any value of `lof` agrees with any value of `reflof` when both are rounded
/// to `precision` significant digits.
pub fn floats_share_value(lof: &[f64], reflof: &[f64], precision: u32) -> bool {
    let ref_keys: Vec<Option<Decimal>> = reflof.iter().map(|x| significant(*x, precision)).collect();
    lof.iter().any(|a| {
        let key_a: Option<Decimal> = significant(*a, precision);
        reflof
            .iter()
            .zip(ref_keys.iter())
            .any(|(b, key_b)| same_value(*a, &key_a, *b, key_b))
    })
}

/// Merge the floats `lof2add` into the reference list `lof`, omitting values that are
/// already present up to `precision` significant digits.
///
/// New values are appended unrounded, so the positions of the values that were in
/// `lof` before the call never change. The returned vector runs parallel to `lof2add`
/// and holds the position in `lof` of every added value.
pub fn merge_floats(lof: &mut Vec<f64>, lof2add: &[f64], precision: u32) -> Vec<usize> {
    let mut keys: Vec<Option<Decimal>> = lof.iter().map(|x| significant(*x, precision)).collect();
    let mut new_idx: Vec<usize> = Vec::with_capacity(lof2add.len());

    for value in lof2add.iter() {
        let key: Option<Decimal> = significant(*value, precision);
        let position: Option<usize> = lof
            .iter()
            .zip(keys.iter())
            .position(|(reference, ref_key)| same_value(*reference, ref_key, *value, &key));
        match position {
            Some(idx) => new_idx.push(idx),
            None => {
                lof.push(*value);
                keys.push(key);
                new_idx.push(lof.len() - 1);
            }
        }
    }
    new_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::PRECISION;
    use rand::prelude::*;

    #[test]
    fn significant_digit_rounding() {
        assert_eq!(significant(1.2345678, 6), significant(1.23457, 6));
        assert_ne!(significant(1.2345678, 6), significant(1.23456, 6));
        assert_eq!(significant(1234567.0, 3), significant(1230000.0, 3));
        assert_eq!(significant(f64::NAN, 6), None);
    }

    #[test]
    fn share_value() {
        assert!(floats_share_value(&[1.0, 2.0], &[3.0, 2.0000001], PRECISION));
        assert!(!floats_share_value(&[1.0, 2.0], &[3.0, 2.001], PRECISION));
        assert!(floats_share_value(&[1.0, 2.0], &[3.0, 2.001], 3));
        assert!(!floats_share_value(&[], &[1.0], PRECISION));
    }

    #[test]
    fn merge_without_overlap_appends() {
        let mut base: Vec<f64> = vec![0.5, 1.0, 2.0];
        let idx: Vec<usize> = merge_floats(&mut base, &[4.0, 8.0], PRECISION);
        assert_eq!(base, vec![0.5, 1.0, 2.0, 4.0, 8.0]);
        assert_eq!(idx, vec![3, 4]);
    }

    #[test]
    fn merge_with_overlap() {
        let mut base: Vec<f64> = vec![0.5, 1.0, 2.0];
        let idx: Vec<usize> = merge_floats(&mut base, &[2.0000001, 3.0, 0.5], PRECISION);
        assert_eq!(base, vec![0.5, 1.0, 2.0, 3.0]);
        assert_eq!(idx, vec![2, 3, 0]);
    }

    #[test]
    fn merge_appends_raw_values() {
        let mut base: Vec<f64> = vec![1.0];
        let idx: Vec<usize> = merge_floats(&mut base, &[3.14159265358979], PRECISION);
        assert_eq!(idx, vec![1]);
        assert_eq!(base[1], 3.14159265358979);
    }

    #[test]
    fn merge_deduplicates_within_added_values() {
        let mut base: Vec<f64> = Vec::new();
        let idx: Vec<usize> = merge_floats(&mut base, &[7.0, 7.0000001, 9.0, 7.0], PRECISION);
        assert_eq!(base, vec![7.0, 9.0]);
        assert_eq!(idx, vec![0, 0, 1, 0]);
    }

    #[test]
    fn merge_is_append_only() {
        let mut rng: StdRng = StdRng::seed_from_u64(20);
        for _ in 0..50 {
            let base_len: usize = rng.gen_range(0..12);
            let base: Vec<f64> = (0..base_len).map(|_| rng.gen_range(0.01..1000.0)).collect();
            // mix of perturbed copies and fresh values
            let to_add: Vec<f64> = (0..rng.gen_range(0..12))
                .map(|_| {
                    if !base.is_empty() && rng.gen_bool(0.5) {
                        base[rng.gen_range(0..base.len())] * (1.0 + 1.0e-9)
                    } else {
                        rng.gen_range(0.01..1000.0)
                    }
                })
                .collect();

            let mut merged: Vec<f64> = base.clone();
            let idx: Vec<usize> = merge_floats(&mut merged, &to_add, PRECISION);

            assert_eq!(&merged[..base.len()], &base[..]);
            assert_eq!(idx.len(), to_add.len());
            for (value, i) in to_add.iter().zip(idx.iter()) {
                assert!(*i < merged.len());
                assert_eq!(significant(*value, PRECISION), significant(merged[*i], PRECISION));
            }
        }
    }
}
