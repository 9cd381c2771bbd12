use std::hint::black_box;

use aerodrop_dispatch::{
    generator::random_case::RandomCaseGenerator,
    graph::{drone_graph::DroneGraph, node_id::NodeId, package_graph::PackageGraph},
    problem::{drone::DroneIdx, package::PackageIdx},
    routing::{
        a_star::AStar,
        weighting::{DEFAULT_NO_FLY_ZONE_PENALTY, NoFlyZoneWeighting},
    },
    solver::solver::Solver,
};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use jiff::Timestamp;

fn start_time() -> Timestamp {
    "2025-01-01T08:00:00Z".parse().unwrap()
}

fn package_graph_bench(c: &mut Criterion) {
    let case = RandomCaseGenerator::seeded(42)
        .generate(start_time(), 5, 500, 0)
        .build_case()
        .unwrap();

    c.bench_function("package graph (500 packages)", |b| {
        b.iter(|| PackageGraph::new(black_box(case.packages()), 4))
    });
}

fn a_star_bench(c: &mut Criterion) {
    let case = RandomCaseGenerator::seeded(42)
        .generate(start_time(), 1, 500, 8)
        .build_case()
        .unwrap();
    let package_graph = PackageGraph::new(case.packages(), 4);
    let drone = case.drone(DroneIdx::new(0));
    let graph = DroneGraph::new(&package_graph, DroneIdx::new(0), *drone.start_location());
    let weighting = NoFlyZoneWeighting::new(case.no_fly_zones(), DEFAULT_NO_FLY_ZONE_PENALTY);
    let mut a_star = AStar::default();

    c.bench_function("a* depot to package", |b| {
        b.iter(|| {
            a_star.find_path(
                &graph,
                &weighting,
                graph.depot(),
                NodeId::Package(black_box(PackageIdx::new(250))),
                drone.speed(),
                case.clock(),
            )
        })
    });
}

fn solve_bench(c: &mut Criterion) {
    let json = RandomCaseGenerator::seeded(42).generate(start_time(), 10, 200, 10);

    c.bench_function("solve (10 drones, 200 packages)", |b| {
        b.iter_batched(
            || json.build_case().unwrap(),
            |mut case| Solver::default().solve(&mut case),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, package_graph_bench, a_star_bench, solve_bench);
criterion_main!(benches);
