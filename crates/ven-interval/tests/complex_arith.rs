use ven_interval::{ComplexInterval, Decoration, Interval};

fn iv(lo: f64, hi: f64) -> Interval {
    Interval::from_bounds(lo, hi).unwrap()
}

fn ci(re: (f64, f64), im: (f64, f64)) -> ComplexInterval {
    ComplexInterval::new(iv(re.0, re.1), iv(im.0, im.1))
}

#[test]
fn multiplicative_identity_and_imaginary_unit() {
    let z = ci((1.0, 2.0), (-1.0, 1.0));
    let w = z * ComplexInterval::one();
    assert_eq!(w.re().inf(), 1.0);
    assert_eq!(w.re().sup(), 2.0);
    let i = ComplexInterval::new(Interval::<f64>::zero(), Interval::one());
    let sq = i * i;
    assert_eq!(sq.re().inf(), -1.0);
    assert_eq!(sq.re().sup(), -1.0);
    assert_eq!(sq.im().inf(), 0.0);
}

#[test]
fn gauss_product_encloses_sampled_points() {
    let a = ci((1.0, 2.0), (0.5, 1.5));
    let b = ci((-1.0, 1.0), (2.0, 3.0));
    let p = a * b;
    for (ar, ai, br, bi) in [
        (1.0, 0.5, -1.0, 2.0),
        (2.0, 1.5, 1.0, 3.0),
        (1.5, 1.0, 0.0, 2.5),
    ] {
        let re = ar * br - ai * bi;
        let im = ar * bi + ai * br;
        assert!(p.contains(re, im), "({ar}+{ai}i)*({br}+{bi}i)");
    }
}

#[test]
fn components_share_decoration_and_ng() {
    let tainted = ComplexInterval::new(iv(0.0, 1.0).mark_not_guaranteed(), iv(0.0, 1.0));
    assert!(tainted.re().is_ng() && tainted.im().is_ng());
    let degraded = ComplexInterval::new(iv(-1.0, 4.0).sqrt(), iv(0.0, 1.0));
    assert_eq!(degraded.re().decoration(), Decoration::Trv);
    assert_eq!(degraded.im().decoration(), Decoration::Trv);
    assert_eq!(degraded.decoration(), Decoration::Trv);
}

#[test]
fn division_by_a_box_containing_zero_degrades() {
    let num = ComplexInterval::one();
    let den = ci((-1.0, 1.0), (-1.0, 1.0));
    let q = num / den;
    assert_eq!(q.decoration(), Decoration::Trv);
    assert!(!q.re().is_bounded() || q.re().is_empty());
}

#[test]
fn division_matches_multiplication_by_the_reciprocal_point() {
    let z = ci((4.0, 4.0), (2.0, 2.0));
    let w = ci((1.0, 1.0), (1.0, 1.0));
    let q = z / w;
    // (4 + 2i) / (1 + i) = 3 - i
    assert!(q.contains(3.0, -1.0));
}

#[test]
fn conjugation_mirrors_the_imaginary_part() {
    let z = ci((1.0, 2.0), (3.0, 4.0));
    let c = z.conj();
    assert_eq!(c.im().inf(), -4.0);
    assert_eq!(c.im().sup(), -3.0);
    assert_eq!(c.re().inf(), 1.0);
}

#[test]
fn magnitude_bound_dominates_every_point() {
    let z = ci((3.0, 3.0), (4.0, 4.0));
    assert!(z.mag_upper() >= 5.0);
    let w = ci((-2.0, 1.0), (-1.0, 3.0));
    let bound = w.mag_upper();
    for (re, im) in [(-2.0f64, 3.0f64), (1.0, -1.0), (0.0, 0.0)] {
        assert!((re * re + im * im).sqrt() <= bound);
    }
}

#[test]
fn nai_component_poisons_the_whole_value() {
    let z = ComplexInterval::new(Interval::nai(), iv(0.0, 1.0));
    assert!(z.is_nai());
    let w = z + ComplexInterval::one();
    assert!(w.is_nai());
}

#[test]
fn disjointness_and_intersection_are_componentwise() {
    let a = ci((0.0, 1.0), (0.0, 1.0));
    let b = ci((0.5, 2.0), (0.5, 2.0));
    let c = ci((5.0, 6.0), (0.0, 1.0));
    assert!(!a.disjoint_from(&b));
    assert!(a.disjoint_from(&c));
    let i = a.intersection(&b);
    assert_eq!(i.re().inf(), 0.5);
    assert_eq!(i.im().sup(), 1.0);
}
