use aerodrop_dispatch::{
    json::solution::JsonSolution,
    problem::package::{PackageIdx, PackageStatus, UndeliverableReason},
    solver::{solution_summary::SolutionSummary, solver::Solver, solver_params::SolverParams},
};

mod test_utils;

#[test]
fn test_solve_fixture() {
    let json = test_utils::load_fixture("small_case.json");
    let mut case = json.build_case().unwrap();

    let solution = Solver::new(SolverParams::default()).solve(&mut case);
    let summary = SolutionSummary::new(&case, &solution);

    assert_eq!(summary.packages, 6);
    assert_eq!(summary.delivered + summary.undeliverable, 6);
    // Heavier than any drone can lift
    assert!(matches!(
        case.package(PackageIdx::new(5)).status(),
        PackageStatus::Undeliverable(_)
    ));
    assert!(summary.delivered >= 1);

    let export = JsonSolution::from_solution(json.start_time, &case, &solution);
    let legs: usize = export.drones.iter().map(|drone| drone.legs.len()).sum();
    assert_eq!(legs, summary.delivered * 2);
    assert!(serde_json::to_string(&export).is_ok());
}

#[test]
fn test_drone_too_slow_to_ever_arrive() {
    let mut json = test_utils::load_fixture("small_case.json");
    for drone in &mut json.drones {
        drone.speed = 1e-12;
    }
    let mut case = json.build_case().unwrap();

    let solution = Solver::default().solve(&mut case);

    assert!(solution.deliveries().is_empty());
    assert!(case.packages_iter().all(|(_, package)| matches!(
        package.status(),
        PackageStatus::Undeliverable(UndeliverableReason::NoDroneAvailable)
            | PackageStatus::Undeliverable(UndeliverableReason::WindowExpired)
    )));
}
