// crates/ae_sectional/tests/sectional_properties.rs

//! 分段网格、查找与插值的性质测试

use ae_config::AerosolConfig;
use ae_foundation::Tolerance;
use ae_sectional::prelude::*;

const CASES: &[(usize, f64, f64)] = &[
    (1, 1e-7, 1e-5),
    (5, 1e-8, 1e-4),
    (12, 3e-9, 2e-5),
    (40, 1e-9, 1e-3),
    (100, 5e-8, 5e-7),
];

fn distributions() -> Vec<Box<dyn SectionalDistribution>> {
    let mut out: Vec<Box<dyn SectionalDistribution>> = Vec::new();
    for &(n, min, max) in CASES {
        out.push(Box::new(LogarithmicDistribution::new(n, min, max).unwrap()));
        out.push(Box::new(LinearDistribution::new(n, min, max).unwrap()));
    }
    out
}

#[test]
fn partition_is_contiguous_and_exact() {
    for dist in distributions() {
        let n = dist.n_sections();
        let b = dist.boundaries();
        assert_eq!(b.len(), n + 1);
        assert_eq!(b[0], dist.size_min());
        assert_eq!(b[n], dist.size_max());
        for (i, s) in dist.sections().iter().enumerate() {
            assert_eq!(s.index, i);
            assert!(s.lower < s.upper);
            assert_eq!(s.lower, b[i]);
            assert_eq!(s.upper, b[i + 1]);
            assert!(s.size >= s.lower && s.size < s.upper);
        }
    }
}

#[test]
fn search_finds_representative_sections() {
    for dist in distributions() {
        for i in 0..dist.n_sections() {
            assert_eq!(dist.search(dist.section(i).size), i, "{}", dist.name());
            assert_eq!(dist.search_lower(dist.section(i).size), i, "{}", dist.name());
        }
    }
}

#[test]
fn search_on_boundaries_follows_half_open_intervals() {
    for dist in distributions() {
        let b = dist.boundaries().to_vec();
        for (i, &bi) in b.iter().enumerate().take(dist.n_sections()).skip(1) {
            let found = dist.search(bi);
            assert!(found == i || found == i - 1);
            assert_eq!(found, i, "{} boundary {i}", dist.name());
        }
    }
}

#[test]
fn search_clamps_out_of_range() {
    for dist in distributions() {
        let last = dist.n_sections() - 1;
        for s in [0.0, -1.0, f64::NAN, f64::NEG_INFINITY, 0.5 * dist.size_min()] {
            assert_eq!(dist.search(s), 0);
            assert_eq!(dist.search_lower(s), 0);
        }
        for s in [dist.size_max(), 2.0 * dist.size_max(), f64::INFINITY] {
            assert_eq!(dist.search(s), last);
            assert_eq!(dist.search_lower(s), last);
        }
    }
}

#[test]
fn search_matches_linear_scan() {
    for dist in distributions() {
        let min = dist.size_min();
        let max = dist.size_max();
        for k in 0..=500 {
            let s = min + (max - min) * (k as f64 / 500.0);
            let expected = dist
                .sections()
                .iter()
                .position(|sec| sec.contains(s))
                .unwrap_or(dist.n_sections() - 1);
            assert_eq!(dist.search(s), expected);

            let expected_lower = dist
                .sections()
                .iter()
                .rposition(|sec| sec.size <= s)
                .unwrap_or(0);
            assert_eq!(dist.search_lower(s), expected_lower);
        }
    }
}

#[test]
fn interpolation_conserves_moment() {
    for order in [0.0, 1.0, 2.0, 3.0, 4.5] {
        let interp = MomentInterpolator::new(order).unwrap();
        for dist in distributions() {
            let first = dist.section(0).size;
            let last = dist.section(dist.n_sections() - 1).size;
            for k in 0..=200 {
                let s = first * (last / first).powf(k as f64 / 200.0);
                let data = interp.interpolate(dist.as_ref(), s);
                let sum: f64 = data.weights().iter().sum();
                assert!((sum - 1.0).abs() < 1e-12);
                assert!(data.weights().iter().all(|&w| (0.0..=1.0).contains(&w)));
                assert!(data.indices().iter().all(|&i| i < dist.n_sections()));
                assert!(data.is_conservative(&Tolerance::default()));
                if order > 0.0 {
                    let m = data.moment_of(order);
                    assert!((m / s.powf(order) - 1.0).abs() < 1e-10, "order {order}, s {s}");
                }
            }
        }
    }
}

#[test]
fn interpolation_boundaries() {
    let interp = MomentInterpolator::mass();
    for dist in distributions() {
        let last = dist.n_sections() - 1;
        for s in [dist.size_min(), 0.0, -3.0, 0.1 * dist.size_min()] {
            let data = interp.interpolate(dist.as_ref(), s);
            assert_eq!(data.indices(), &[0]);
            assert_eq!(data.weights(), &[1.0]);
        }
        for s in [dist.size_max(), 10.0 * dist.size_max()] {
            let data = interp.interpolate(dist.as_ref(), s);
            assert_eq!(data.indices(), &[last]);
            assert_eq!(data.weights(), &[1.0]);
        }
    }
}

#[test]
fn scenario_five_logarithmic_sections() {
    let dist = LogarithmicDistribution::new(5, 1e-8, 1e-4).unwrap();
    let b = dist.boundaries();
    assert_eq!(b[0], 1e-8);
    assert_eq!(b[5], 1e-4);
    let ratio = b[1] / b[0];
    for i in 0..5 {
        assert!(((b[i + 1] / b[i]) / ratio - 1.0).abs() < 1e-12);
    }
}

#[test]
fn scenario_geometric_mean_of_neighbours() {
    let dist = LogarithmicDistribution::new(5, 1e-8, 1e-4).unwrap();
    let lo = dist.section(2).size;
    let hi = dist.section(3).size;
    let s = (lo * hi).sqrt();

    let data = MomentInterpolator::mass().interpolate(&dist, s);
    assert_eq!(data.indices(), &[2, 3]);

    let expected = (s.powi(3) - lo.powi(3)) / (hi.powi(3) - lo.powi(3));
    assert!((data.weights()[1] - expected).abs() < 1e-12);
    assert!((data.weights()[0] - (1.0 - expected)).abs() < 1e-12);
    // 质量矩下几何平均点偏向下邻分段
    assert!(data.weights()[0] > 0.5);
}

#[test]
fn scenario_zero_size_matches_minimum() {
    let dist = LogarithmicDistribution::new(5, 1e-8, 1e-4).unwrap();
    let interp = MomentInterpolator::mass();
    for s in [0.0, -1e-6] {
        assert_eq!(dist.search(s), dist.search(1e-8));
        assert_eq!(dist.search_lower(s), dist.search_lower(1e-8));
        let a = interp.interpolate(&dist, s);
        let b = interp.interpolate(&dist, 1e-8);
        assert_eq!(a.indices(), b.indices());
        assert_eq!(a.weights(), b.weights());
    }
}

#[test]
fn scatter_redistributes_mass() {
    let model = AerosolModel::new(&AerosolConfig::default()).unwrap();
    let n = model.distribution().n_sections();
    let mut number = vec![0.0; n];
    let mut mass = 0.0;
    for &d in &[2.3e-8, 4.1e-7, 8.8e-6, 6.0e-5] {
        let data = model.interpolate(d);
        data.scatter(1.0, &mut number).unwrap();
        mass += d.powi(3);
    }
    let redistributed: f64 = number
        .iter()
        .zip(model.section_diameters())
        .map(|(w, d)| w * d.powi(3))
        .sum();
    assert!((redistributed / mass - 1.0).abs() < 1e-10);
    assert!((number.iter().sum::<f64>() - 4.0).abs() < 1e-12);
}
