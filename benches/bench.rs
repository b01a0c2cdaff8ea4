#![allow(clippy::all)] // Clippy will attempt to remove black_box() internals

use criterion::*;
use curvegen::*;
use paramcurve::{
    Bezier, Bezier2, Bezier3, ClosestPoint, PSpline3, Parameterization, Parametric, Point, Spline3,
};

fn bench_bezier(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bezier_Eval");
    for size in [1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));
        let ts = gen_params(size);

        group.bench_with_input(BenchmarkId::new("Quadratic", size), &size, |b, _| {
            let cage = gen_points(3);
            let mut curve = Bezier2::from_points(cage[0], cage[1], cage[2]).unwrap();
            b.iter(|| {
                black_box(
                    ts.iter()
                        .map(|&t| curve.point(t).unwrap())
                        .fold(0.0, |acc, p| acc + p.x),
                )
            });
        });

        for param in [Parameterization::Uniform, Parameterization::ArcLength] {
            group.bench_with_input(
                BenchmarkId::new(format!("Cubic {param:?}"), size),
                &size,
                |b, _| {
                    let cage = gen_points(4);
                    let mut curve =
                        Bezier3::from_points([cage[0], cage[1], cage[2], cage[3]]).unwrap();
                    curve.set_parameterization(param);
                    b.iter(|| {
                        black_box(
                            ts.iter()
                                .map(|&t| curve.point(t).unwrap())
                                .fold(0.0, |acc, p| acc + p.x),
                        )
                    });
                },
            );
        }

        for use_coef in [false, true] {
            group.bench_with_input(
                BenchmarkId::new(format!("Degree 7, use_coef={use_coef}"), size),
                &size,
                |b, _| {
                    let mut curve = Bezier::from_points(&gen_points(8)).unwrap();
                    curve.set_use_coef(use_coef);
                    b.iter(|| {
                        black_box(
                            ts.iter()
                                .map(|&t| curve.point(t).unwrap())
                                .fold(0.0, |acc, p| acc + p.x),
                        )
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_spline(c: &mut Criterion) {
    for nknots in [8, 64] {
        let mut group = c.benchmark_group(format!("Spline_Eval_{nknots}-knots"));
        let size = 10_000;
        group.throughput(Throughput::Elements(size as u64));
        let ts = gen_params(size);

        group.bench_function("Spline3", |b| {
            let mut spline = Spline3::new();
            let ys = gen_points(nknots);
            for (i, p) in ys.iter().enumerate() {
                spline.add_knot(i as f64, p.y).unwrap();
            }
            let span = (nknots - 1) as f64;
            b.iter(|| {
                black_box(
                    ts.iter()
                        .map(|&t| spline.eval(t * span).unwrap())
                        .sum::<f64>(),
                )
            });
        });

        group.bench_function("PSpline3", |b| {
            let mut spline = PSpline3::new();
            for p in gen_points(nknots) {
                spline.add_knot(p.x, p.y).unwrap();
            }
            b.iter(|| {
                black_box(
                    ts.iter()
                        .map(|&t| spline.point(t).unwrap())
                        .fold(0.0, |acc, p| acc + p.x),
                )
            });
        });

        group.bench_function("PSpline3 move knot", |b| {
            let mut spline = PSpline3::new();
            for p in gen_points(nknots) {
                spline.add_knot(p.x, p.y).unwrap();
            }
            let mut k = 0.0;
            b.iter(|| {
                k += 1e-6;
                spline.move_knot(nknots / 2, k, -k).unwrap();
                black_box(spline.x(0.5).unwrap())
            });
        });
        group.finish();
    }
}

fn bench_arc_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("Arc_Length");

    group.bench_function("Cubic", |b| {
        let cage = gen_points(4);
        let mut curve = Bezier3::from_points([cage[0], cage[1], cage[2], cage[3]]).unwrap();
        let mut k = 0.0;
        b.iter(|| {
            // Move a point so the cached length is not reused
            k += 1e-6;
            curve.move_control_point(1, cage[1].x + k, cage[1].y).unwrap();
            black_box(curve.arc_length().unwrap())
        });
    });

    group.bench_function("Cubic table rebuild", |b| {
        let cage = gen_points(4);
        let mut curve = Bezier3::from_points([cage[0], cage[1], cage[2], cage[3]]).unwrap();
        curve.set_parameterization(Parameterization::ArcLength);
        let mut k = 0.0;
        b.iter(|| {
            k += 1e-6;
            curve.move_control_point(1, cage[1].x + k, cage[1].y).unwrap();
            black_box(curve.x(0.5).unwrap())
        });
    });
    group.finish();
}

fn bench_closest(c: &mut Criterion) {
    let mut group = c.benchmark_group("Closest_Point");
    let targets = gen_points(100);
    group.throughput(Throughput::Elements(targets.len() as u64));

    group.bench_function("Quadratic", |b| {
        let cage = gen_points(3);
        let mut curve = Bezier2::from_points(cage[0], cage[1], cage[2]).unwrap();
        let mut solver = ClosestPoint::new();
        b.iter(|| {
            black_box(
                targets
                    .iter()
                    .map(|&p| solver.closest_point(&mut curve, p).unwrap())
                    .sum::<f64>(),
            )
        });
    });

    group.bench_function("Cubic", |b| {
        let cage = gen_points(4);
        let mut curve = Bezier3::from_points([cage[0], cage[1], cage[2], cage[3]]).unwrap();
        let mut solver = ClosestPoint::new();
        b.iter(|| {
            black_box(
                targets
                    .iter()
                    .map(|&p| solver.closest_point(&mut curve, p).unwrap())
                    .sum::<f64>(),
            )
        });
    });

    group.bench_function("Cubic flatten", |b| {
        let cage: Vec<Point<f64>> = gen_points(4).iter().map(|p| *p * 100.0).collect();
        b.iter(|| {
            // A fresh curve each time, so the flattening cache is cold
            let mut curve = Bezier3::from_points([cage[0], cage[1], cage[2], cage[3]]).unwrap();
            black_box(curve.flatten(1).unwrap().len())
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_bezier,
    bench_spline,
    bench_arc_length,
    bench_closest
);
criterion_main!(benches);

mod curvegen {
    use paramcurve::utils::linspace;
    use paramcurve::Point;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    // Same seed every run so each group sees the same curves
    fn rng_fixed_seed() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    // Control points or knots in the unit square, always the same for a given count
    pub fn gen_points(n: usize) -> Vec<Point<f64>> {
        let mut rng = rng_fixed_seed();
        (0..n)
            .map(|_| Point::new(rng.random::<f64>(), rng.random::<f64>()))
            .collect()
    }

    // Evenly spaced parameters in [0, 1], visited in shuffled order
    pub fn gen_params(n: usize) -> Vec<f64> {
        let mut rng = rng_fixed_seed();
        let mut ts = linspace(0.0, 1.0, n);
        ts.shuffle(&mut rng);
        ts
    }
}
