use dotmatrix::{
    DotImage, ImageError, MotionClient, MotionLog, PrintOrchestrator, PrintOutcome, PrinterEvent,
    PrinterSettings, ScriptedInput, SimulatedMotionService, Waypoint,
};
use dotmatrix_core::ThreadSafeVec;
use tokio::sync::mpsc;

const CALIBRATION: [&str; 3] = ["-190", "y", "y"];
/// Start point, center probe, corner probes, return to start
const CALIBRATION_MOVES: usize = 1 + 3 + 12 + 1;

struct Harness {
    printer: PrintOrchestrator,
    log: MotionLog,
    prompts: ThreadSafeVec<String>,
}

fn harness(settings: PrinterSettings, service: SimulatedMotionService, responses: &[&str]) -> Harness {
    let log = service.log();
    let input = ScriptedInput::new(responses.iter().copied());
    let prompts = input.prompts();
    let client =
        MotionClient::with_location(Box::new(service), settings.acceleration, settings.start_point);

    Harness {
        printer: PrintOrchestrator::new(client, settings, Box::new(input)),
        log,
        prompts,
    }
}

fn calibrated(responses: &[&str]) -> Harness {
    calibrated_with(PrinterSettings::default(), responses)
}

fn calibrated_with(settings: PrinterSettings, responses: &[&str]) -> Harness {
    let script: Vec<&str> = CALIBRATION.iter().chain(responses).copied().collect();
    let mut h = harness(settings, SimulatedMotionService::new(), &script);
    assert_eq!(h.printer.calibrate().unwrap(), -190.0);
    assert_eq!(h.log.points().len(), CALIBRATION_MOVES);
    h
}

fn all_dots(width: usize, height: usize) -> DotImage {
    DotImage::new(width, height, vec![0; width * height]).unwrap()
}

#[test]
fn test_print_before_calibration_is_refused() {
    let mut h = harness(PrinterSettings::default(), SimulatedMotionService::new(), &["y"]);

    assert_eq!(h.printer.handle_image(&all_dots(2, 2)), PrintOutcome::NotCalibrated);
    assert!(h.prompts.lock().is_empty());
    assert!(h.log.points().is_empty());
    assert!(h.log.paths().is_empty());
}

#[test]
fn test_calibration_publishes_event() {
    let mut h = harness(
        PrinterSettings::default(),
        SimulatedMotionService::new(),
        &CALIBRATION,
    );
    let mut events = h.printer.events().subscribe();

    h.printer.calibrate().unwrap();

    assert_eq!(h.printer.drawing_surface_z(), Some(-190.0));
    assert_eq!(
        events.try_recv().unwrap(),
        PrinterEvent::Calibrated {
            drawing_surface_z: -190.0
        }
    );
    assert_eq!(
        h.printer.client().effector_location(),
        PrinterSettings::default().start_point
    );
}

#[test]
fn test_two_by_two_print() {
    let mut h = calibrated(&["Y"]);
    let mut events = h.printer.events().subscribe();
    let start = PrinterSettings::default().start_point;

    let outcome = h.printer.handle_image(&all_dots(2, 2));

    match outcome {
        PrintOutcome::Printed { summary, path } => {
            assert_eq!(summary.dots, 4);
            assert_eq!(path.waypoints, 12);
            assert!(path.is_success());
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    let paths = h.log.paths();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].len(), 12);
    // The first lift starts where the pen was parked
    assert_eq!(paths[0][0], Waypoint::new(start.x, start.y, -188.5, 50.0));
    assert_eq!(paths[0][11], Waypoint::new(-1.0, 0.0, -190.0, 50.0));

    // Moves to the start point before and after the path
    let points = h.log.points();
    assert_eq!(points.len(), CALIBRATION_MOVES + 2);
    assert_eq!(points[CALIBRATION_MOVES].position(), start);
    assert_eq!(points[CALIBRATION_MOVES + 1].position(), start);

    assert_eq!(
        events.try_recv().unwrap(),
        PrinterEvent::PrintStarted {
            dots: 4,
            waypoints: 12
        }
    );
    assert!(matches!(
        events.try_recv().unwrap(),
        PrinterEvent::PrintFinished {
            dots: 4,
            succeeded: true,
            ..
        }
    ));
}

#[test]
fn test_declined_print_has_no_motion() {
    let mut h = calibrated(&["n"]);
    let mut events = h.printer.events().subscribe();

    assert_eq!(h.printer.handle_image(&all_dots(3, 3)), PrintOutcome::Declined);
    assert_eq!(h.log.points().len(), CALIBRATION_MOVES);
    assert!(h.log.paths().is_empty());
    assert_eq!(events.try_recv().unwrap(), PrinterEvent::PrintDeclined);
}

#[test]
fn test_unrecognized_confirmation_prompts_again() {
    let mut h = calibrated(&["maybe", "", "yes"]);

    let outcome = h.printer.handle_image(&all_dots(1, 1));

    assert!(matches!(outcome, PrintOutcome::Printed { .. }));
    let prompts = h.prompts.lock();
    let confirmations = prompts
        .iter()
        .filter(|p| p.as_str() == "Receiving image. Start? Y/N")
        .count();
    assert_eq!(confirmations, 3);
}

#[test]
fn test_exhausted_input_declines() {
    let mut h = calibrated(&[]);

    assert_eq!(h.printer.handle_image(&all_dots(1, 1)), PrintOutcome::Declined);
    assert!(h.log.paths().is_empty());
}

#[test]
fn test_out_of_bounds_image_has_no_motion() {
    let settings = PrinterSettings {
        field_width_dots: 4,
        field_height_dots: 4,
        ..Default::default()
    };
    let mut h = calibrated_with(settings, &["y"]);

    let outcome = h.printer.handle_image(&all_dots(4, 5));

    assert_eq!(
        outcome,
        PrintOutcome::Rejected(ImageError::OutOfBounds {
            width: 4,
            height: 5,
            max_width: 4,
            max_height: 4,
        })
    );
    assert_eq!(h.log.points().len(), CALIBRATION_MOVES);
    assert!(h.log.paths().is_empty());
}

#[test]
fn test_unreachable_start_point_aborts_print() {
    let settings = PrinterSettings::default();
    // The start point sits below the reachable floor
    let service = SimulatedMotionService::new().with_z_floor(-195.0);
    let script: Vec<&str> = CALIBRATION.iter().copied().chain(["y"]).collect();
    let mut h = harness(settings, service, &script);
    h.printer.calibrate().unwrap();

    let outcome = h.printer.handle_image(&all_dots(2, 2));

    assert!(matches!(outcome, PrintOutcome::Aborted(_)));
    assert!(h.log.paths().is_empty());
}

#[test]
fn test_run_prints_each_image_in_order() {
    let mut h = calibrated(&["y", "n", "y"]);
    let (tx, rx) = mpsc::channel(4);

    tx.try_send(all_dots(1, 1)).unwrap();
    tx.try_send(all_dots(2, 1)).unwrap();
    tx.try_send(all_dots(3, 1)).unwrap();
    drop(tx);

    assert_eq!(h.printer.run(rx), 2);

    let sizes: Vec<usize> = h.log.paths().iter().map(|p| p.len()).collect();
    assert_eq!(sizes, vec![3, 9]);
}

#[test]
fn test_run_survives_rejected_images() {
    let settings = PrinterSettings {
        field_width_dots: 2,
        field_height_dots: 2,
        ..Default::default()
    };
    let mut h = calibrated_with(settings, &["y", "y"]);
    let (tx, rx) = mpsc::channel(4);

    tx.try_send(all_dots(3, 3)).unwrap();
    tx.try_send(all_dots(2, 2)).unwrap();
    drop(tx);

    assert_eq!(h.printer.run(rx), 1);
    assert_eq!(h.log.paths().len(), 1);
}

#[test]
fn test_field_size_comes_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[printer]\nfield_width_dots = 3\nfield_height_dots = 3\nmm_per_dot = 2.0\n",
    )
    .unwrap();
    let settings = dotmatrix::Config::load_from_file(&path).unwrap().printer;
    let mut h = calibrated_with(settings, &["y", "y"]);

    assert!(matches!(
        h.printer.handle_image(&all_dots(4, 1)),
        PrintOutcome::Rejected(ImageError::OutOfBounds { .. })
    ));

    // 3 dots at 2 mm spacing, centered on the origin
    let outcome = h.printer.handle_image(&all_dots(3, 1));
    assert!(matches!(outcome, PrintOutcome::Printed { .. }));
    let presses: Vec<f64> = h.log.paths()[0]
        .iter()
        .filter(|w| w.z == -190.0)
        .map(|w| w.x)
        .collect();
    assert_eq!(presses, vec![-3.0, -1.0, 1.0]);
}
