use cobgauge::measure::{
    calibrate, classify_regions, Bounds, ClassifyOptions, MeasureFailure, Region,
};
use proptest::prelude::*;

mod proptest_helpers;

const TOTAL_AREA: u64 = 200_000;

fn opts(min_pixel_area: u32) -> ClassifyOptions {
    ClassifyOptions {
        min_pixel_area,
        reference_max_area_fraction: 0.30,
    }
}

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn classification_is_deterministic(
        regions in proptest::collection::vec(proptest_helpers::arb_region(), 0..12),
        min_pixel_area in 1u32..500,
    ) {
        let first = classify_regions(&regions, TOTAL_AREA, &opts(min_pixel_area));
        let second = classify_regions(&regions.clone(), TOTAL_AREA, &opts(min_pixel_area));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn noise_never_takes_a_role(
        regions in proptest::collection::vec(proptest_helpers::arb_region(), 0..12),
        min_pixel_area in 1u32..2000,
    ) {
        let survivors = regions.iter().filter(|r| r.pixel_count >= min_pixel_area).count();

        match classify_regions(&regions, TOTAL_AREA, &opts(min_pixel_area)) {
            Ok(c) => {
                prop_assert!(survivors >= 2);
                prop_assert!(c.reference.pixel_count >= min_pixel_area);
                prop_assert!(c.measured.pixel_count >= min_pixel_area);
            }
            Err(MeasureFailure::InsufficientObjects { found }) => {
                prop_assert!(survivors < 2);
                prop_assert_eq!(found, survivors);
            }
            Err(other) => prop_assert!(survivors >= 2, "{:?} with {} survivors", other, survivors),
        }
    }

    #[test]
    fn reference_is_the_squarest_eligible_region(
        regions in proptest::collection::vec(proptest_helpers::arb_region(), 2..12),
    ) {
        let limit = TOTAL_AREA as f64 * 0.30;
        if let Ok(c) = classify_regions(&regions, TOTAL_AREA, &opts(1)) {
            prop_assert!((c.reference.pixel_count as f64) < limit);
            let best = regions
                .iter()
                .filter(|r| (r.pixel_count as f64) < limit)
                .map(|r| r.squareness_error())
                .fold(f64::INFINITY, f64::min);
            prop_assert_eq!(c.reference.squareness_error(), best);

            // No other region may beat the measured one on size.
            let ref_idx = regions.iter().position(|r| *r == c.reference).unwrap();
            let largest_other = regions
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != ref_idx)
                .map(|(_, r)| r.pixel_count)
                .max()
                .unwrap();
            prop_assert_eq!(c.measured.pixel_count, largest_other);
        }
    }

    #[test]
    fn calibration_is_finite_and_non_negative(
        ref_w in 0u32..500,
        ref_h in 0u32..500,
        meas_w in 0u32..4000,
        meas_h in 0u32..4000,
        diameter in 0.1f64..100.0,
    ) {
        let reference = Region::new(Bounds::new(0, 0, ref_w, ref_h), 10);
        let measured = Region::new(Bounds::new(0, 0, meas_w, meas_h), 10);

        match calibrate(&reference, &measured, diameter) {
            Ok(c) => {
                prop_assert!(ref_w + ref_h > 0);
                prop_assert!(c.pixels_per_unit.is_finite() && c.pixels_per_unit > 0.0);
                prop_assert!(c.measured_length_units.is_finite());
                prop_assert!(c.measured_length_units >= 0.0);
                let expected = meas_w.max(meas_h) as f64 * diameter
                    / ((ref_w as f64 + ref_h as f64) / 2.0);
                prop_assert!((c.measured_length_units - expected).abs() <= 1e-9 * expected.max(1.0));
            }
            Err(e) => {
                prop_assert_eq!(e, MeasureFailure::DegenerateCalibration);
                prop_assert_eq!(ref_w + ref_h, 0);
            }
        }
    }
}
