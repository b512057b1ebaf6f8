use std::fs::File;
use std::io::BufReader;

use cm_app::*;
use cm_core::{Quantity, SeriesGroup};
use cm_monitor::UpdateLog;

const SIMPLE_FOAM_LOG: &str = "\
Starting time loop

Time = 1

smoothSolver:  Solving for Ux, Initial residual = 1, Final residual = 0.0538101, No Iterations 1
smoothSolver:  Solving for Uy, Initial residual = 1, Final residual = 0.030925, No Iterations 2
GAMG:  Solving for p, Initial residual = 1, Final residual = 0.068427, No Iterations 17
time step continuity errors : sum local = 1.19733, global = 0.179883, cumulative = 0.179883
smoothSolver:  Solving for omega, Initial residual = 0.0075, Final residual = 0.0004, No Iterations 3
smoothSolver:  Solving for k, Initial residual = 1, Final residual = 0.0439206, No Iterations 3
ExecutionTime = 0.08 s  ClockTime = 0 s

forces forces1 write:
    Sum of forces
        Total    : (1.5 0.2 0)
        Pressure : (1.2 0.1 0)
        Viscous  : (0.3 0.1 0)

Time = 2

smoothSolver:  Solving for Ux, Initial residual = 0.4, Final residual = 0.02, No Iterations 1
smoothSolver:  Solving for Uy, Initial residual = 0.3, Final residual = 0.01, No Iterations 2
GAMG:  Solving for p, Initial residual = 0.2, Final residual = 0.009, No Iterations 12
smoothSolver:  Solving for omega, Initial residual = 0.005, Final residual = 0.0002, No Iterations 3
smoothSolver:  Solving for k, Initial residual = 0.6, Final residual = 0.03, No Iterations 3
ExecutionTime = 0.12 s  ClockTime = 0 s

forces forces1 write:
    Sum of forces
        Total    : (1.4 0.2 0)
        Pressure : (1.1 0.15 0)
        Viscous  : (0.3 0.05 0)
    Sum of moments
        Total    : (0 0 0.5)
        Pressure : (0 0 0.4)
        Viscous  : (0 0 0.1)

forceCoeffs forceCoeffs1 write:
    Cm       : 0.01
    Cd       : 0.81
    Cl       : 0.12

Time = 3

smoothSolver:  Solving for Ux, Initial residual = 0.2, Final residual = 0.01, No Iterations 1
smoothSolver:  Solving for Uy, Initial residual = 0.15, Final residual = 0.007, No Iterations 2
GAMG:  Solving for p, Initial residual = 0.1, Final residual = 0.005, No Iterations 11
smoothSolver:  Solving for omega, Initial residual = 0.004, Final residual = 0.0001, No Iterations 3
smoothSolver:  Solving for k, Initial residual = 0.5, Final residual = 0.02, No Iterations 3
ExecutionTime = 0.16 s  ClockTime = 1 s

forces forces1 write:
    Sum of forces
        Total    : (1.3 0.2 0)
        Pressure : (1 0.125 0)
        Viscous  : (0.3 0.075 0)

forceCoeffs forceCoeffs1 write:
    Cm       : 0.02
    Cd       : 0.79
    Cl       : 0.11

End
";

const CASE_YAML: &str = "\
name: airfoil
case_dir: airfoil
function_objects:
  - name: forces1
    type: Force
  - name: forceCoeffs1
    type: ForceCoefficients
  - name: probes
    type: Probes
";

fn write_fixture(dir_name: &str) -> std::path::PathBuf {
    let temp_dir = std::env::temp_dir().join(dir_name);
    let _ = std::fs::remove_dir_all(&temp_dir);
    std::fs::create_dir_all(&temp_dir).unwrap();
    std::fs::write(temp_dir.join("case.yaml"), CASE_YAML).unwrap();
    std::fs::write(temp_dir.join("log.simpleFoam"), SIMPLE_FOAM_LOG).unwrap();
    temp_dir
}

#[test]
fn replay_simple_foam_log_from_case() {
    let temp_dir = write_fixture("cm_app_replay_simple_foam");

    let host = CaseHost::load(&temp_dir.join("case.yaml")).unwrap();
    assert_eq!(host.case_dir(), temp_dir.join("airfoil"));

    let mut session = MonitorSession::new();
    let prepared = session.prepare(&host, &host.case_dir()).unwrap();
    assert!(prepared.config.forces_enabled);
    assert!(prepared.config.force_coefficients_enabled);
    assert_eq!(prepared.command.workdir, temp_dir.join("airfoil"));

    let file = File::open(temp_dir.join("log.simpleFoam")).unwrap();
    let mut sink = UpdateLog::new();
    let stats = replay_reader(&mut session, BufReader::new(file), 8, &mut sink).unwrap();
    assert_eq!(stats.lines, SIMPLE_FOAM_LOG.lines().count());

    let series = session.parser().series();
    assert_eq!(session.parser().iteration(), 3);
    assert_eq!(series.get(Quantity::Ux).values(), &[0.4, 0.2]);
    assert_eq!(series.get(Quantity::Uy).values(), &[0.3, 0.15]);
    assert_eq!(series.get(Quantity::Pressure).values(), &[0.2, 0.1]);
    assert_eq!(series.get(Quantity::Omega).values(), &[0.005, 0.004]);
    assert_eq!(series.get(Quantity::TurbulentKineticEnergy).values(), &[0.6, 0.5]);
    assert!(series.get(Quantity::Uz).is_empty());

    // Moment lines reuse the Pressure/Viscous tokens; only the force entry counts.
    assert_eq!(series.get(Quantity::PressureForceX).values(), &[1.1, 1.0]);
    assert_eq!(series.get(Quantity::ViscousForceY).values(), &[0.05, 0.075]);
    assert_eq!(series.get(Quantity::DragCoefficient).values(), &[0.81, 0.79]);
    assert_eq!(series.get(Quantity::LiftCoefficient).values(), &[0.12, 0.11]);

    let residuals = sink.latest(SeriesGroup::Residuals).unwrap();
    assert_eq!(residuals.get("p"), Some(&[0.2, 0.1][..]));
    assert!(sink.latest(SeriesGroup::Forces).is_some());
    assert!(sink.latest(SeriesGroup::ForceCoefficients).is_some());

    let summary = session.summary();
    assert_eq!(summary.get(Quantity::Ux).unwrap().last, Some(0.2));
}

#[test]
fn chunk_size_does_not_change_result() {
    let temp_dir = write_fixture("cm_app_replay_chunking");
    let host = CaseHost::load(&temp_dir.join("case.yaml")).unwrap();

    let mut results = Vec::new();
    for chunk_lines in [1, 3, 1000] {
        let mut session = MonitorSession::new();
        session.prepare(&host, &host.case_dir()).unwrap();
        let file = File::open(temp_dir.join("log.simpleFoam")).unwrap();
        replay_reader(
            &mut session,
            BufReader::new(file),
            chunk_lines,
            &mut UpdateLog::new(),
        )
        .unwrap();
        results.push(session.parser().series().clone());
    }
    assert_eq!(results[0], results[1]);
    assert_eq!(results[1], results[2]);
}

#[test]
fn coupled_solver_log() {
    let log = "\
Time = 0.001

GMRES iteration: 0   Residual: 1 (1 1 1) 1
GMRES iteration: 1   Residual: 0.5 (0.5 0.5 0.5) 0.5

Time = 0.002

GMRES iteration: 0   Residual: 0.01 (0.02 0.03 0.04) 0.05
GMRES iteration: 1   Residual: 0.001 (0.002 0.003 0.004) 0.005
";
    let mut session = MonitorSession::new();
    session.start(Default::default());
    let mut sink = UpdateLog::new();
    replay_reader(&mut session, log.as_bytes(), 4, &mut sink).unwrap();

    let residuals = sink.latest(SeriesGroup::Residuals).unwrap();
    assert_eq!(residuals.get("density"), Some(&[0.01][..]));
    assert_eq!(residuals.get("Ux"), Some(&[0.02][..]));
    assert_eq!(residuals.get("Uy"), Some(&[0.03][..]));
    assert_eq!(residuals.get("Uz"), Some(&[0.04][..]));
    assert_eq!(residuals.get("E"), Some(&[0.05][..]));
    assert_eq!(sink.count(SeriesGroup::Forces), 0);
}

#[test]
fn malformed_value_surfaces_with_line() {
    let log = "Time = 1\nTime = 2\nsmoothSolver:  Solving for Ux, Initial residual = 1.#QNAN, Final residual = 0, No Iterations 1\n";
    let mut session = MonitorSession::new();
    session.start(Default::default());
    let err = replay_reader(&mut session, log.as_bytes(), 10, &mut UpdateLog::new()).unwrap_err();
    match err {
        AppError::Parse(parse) => {
            assert_eq!(parse.quantity(), Quantity::Ux);
            assert!(parse.line().contains("1.#QNAN"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn case_round_trips_through_json_and_yaml() {
    let temp_dir = std::env::temp_dir().join("cm_app_case_roundtrip");
    let _ = std::fs::remove_dir_all(&temp_dir);
    std::fs::create_dir_all(&temp_dir).unwrap();

    let case: CaseConfig = serde_yaml::from_str(CASE_YAML).unwrap();
    for file in ["case.json", "case.yaml"] {
        let path = temp_dir.join(file);
        save_case(&path, &case).unwrap();
        assert_eq!(load_case(&path).unwrap(), case);
    }
}
