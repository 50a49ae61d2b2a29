//! Property tests for the enclosure and containment-monotonicity
//! invariants: random points inside random intervals stay inside the
//! operation images.

use proptest::prelude::*;
use ven_interval::Interval;

fn interval_and_point() -> impl Strategy<Value = (Interval, f64)> {
    (-1.0e6f64..1.0e6, 0.0f64..100.0, 0.0f64..1.0).prop_map(|(lo, width, t)| {
        let hi = lo + width;
        let x = (lo + t * width).clamp(lo, hi);
        (Interval::from_bounds(lo, hi).unwrap(), x)
    })
}

proptest! {
    #[test]
    fn binary_arithmetic_encloses_contained_points(
        (a, x) in interval_and_point(),
        (b, y) in interval_and_point(),
    ) {
        prop_assert!((a + b).contains(x + y));
        prop_assert!((a - b).contains(x - y));
        prop_assert!((a * b).contains(x * y));
        if !b.contains(0.0) {
            prop_assert!((a / b).contains(x / y));
        }
    }

    #[test]
    fn unary_functions_enclose_contained_points((a, x) in interval_and_point()) {
        prop_assert!(a.exp().contains(x.exp()) || !x.exp().is_finite());
        prop_assert!(a.sin().contains(x.sin()));
        prop_assert!(a.cos().contains(x.cos()));
        prop_assert!(a.atan().contains(x.atan()));
        prop_assert!(a.tanh().contains(x.tanh()));
        prop_assert!(a.pown(3).contains(x * x * x) || !(x * x * x).is_finite());
        if x > 0.0 {
            prop_assert!(a.log().contains(x.ln()));
            prop_assert!(a.sqrt().contains(x.sqrt()));
        }
    }

    #[test]
    fn tan_encloses_contained_points((a, x) in interval_and_point()) {
        let t = a.tan();
        prop_assert!(t.contains(x.tan()) || t.is_entire());
    }

    #[test]
    fn power_encloses_contained_points(
        (a, x) in interval_and_point(),
        e in 0.0f64..4.0,
    ) {
        let exponent = Interval::from_bounds(e, e + 0.5).unwrap();
        if x > 0.0 {
            let p = a.pow(&exponent);
            prop_assert!(p.contains(x.powf(e)) || !x.powf(e).is_finite() || p.is_entire());
        }
    }

    #[test]
    fn containment_is_monotone((a, _x) in interval_and_point(), pad in 0.0f64..10.0) {
        let wider = Interval::from_bounds(a.inf() - pad, a.sup() + pad).unwrap();
        prop_assert!(a.exp().subset_of(&wider.exp()));
        prop_assert!(a.sin().subset_of(&wider.sin()));
        prop_assert!(a.pown(2).subset_of(&wider.pown(2)));
        prop_assert!(a.sqrt().subset_of(&wider.sqrt()));
        prop_assert!(a.atan().subset_of(&wider.atan()));
    }

    #[test]
    fn hull_contains_both_and_intersection_is_contained(
        (a, _x) in interval_and_point(),
        (b, _y) in interval_and_point(),
    ) {
        let h = a.hull(&b);
        prop_assert!(a.subset_of(&h) && b.subset_of(&h));
        let i = a.intersection(&b);
        prop_assert!(i.subset_of(&a) && i.subset_of(&b));
    }

    #[test]
    fn midpoint_and_radius_cover_the_interval((a, _x) in interval_and_point()) {
        let (m, r) = a.rump_mid_rad();
        prop_assert!(m - r <= a.inf());
        prop_assert!(m + r >= a.sup() || m + r == f64::INFINITY);
        let rebuilt = Interval::from_mid_rad(m, r).unwrap();
        prop_assert!(a.subset_of(&rebuilt));
    }
}
