criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        building_distance_matrix,
        solving_entropic_transport,
        measuring_gromov_alignment,
}

use gromov::geometry::Cloud;
use gromov::geometry::Marginal;
use gromov::geometry::Metric;
use gromov::solver::measure;
use gromov::solver::Gromov;
use gromov::solver::SolverConfig;
use gromov::transport::Coupling;
use gromov::Arbitrary;

fn building_distance_matrix(c: &mut criterion::Criterion) {
    let ref cloud = Cloud::random();
    c.bench_function("build a pairwise Euclidean Metric", |b| {
        b.iter(|| Metric::from(cloud))
    });
}

fn solving_entropic_transport(c: &mut criterion::Criterion) {
    let ref x = Metric::from(&Cloud::random());
    let ref y = Metric::from(&Cloud::random());
    let ref p = Marginal::uniform(x.n());
    let ref q = Marginal::uniform(y.n());
    c.bench_function("solve one entropic Gromov coupling", |b| {
        b.iter(|| Gromov::from((x, y, p, q, SolverConfig::default())).minimize().cost())
    });
}

fn measuring_gromov_alignment(c: &mut criterion::Criterion) {
    let ref a = Cloud::random();
    let ref b = Cloud::random();
    c.bench_function("measure end-to-end alignment", |bench| {
        bench.iter(|| measure(a, b, None).unwrap())
    });
}
