// SPDX-License-Identifier: MPL-2.0

//! Integration tests for capture orchestration

use shutter::filter::sepia_matrix;
use shutter::{
    BackendError, CameraDevice, CameraFacing, CameraSession, CameraState, CaptureCall,
    CaptureOrchestrator, CaptureOutcome, CaptureRequest, CaptureState, FailureReason, FlashMode,
    SessionPolicy, VirtualCamera,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Device command as seen by the mock
#[derive(Debug, Clone, PartialEq)]
enum Command {
    UnbindAll,
    Bind(CameraFacing),
    SetTorch(bool),
    SetLinearZoom(f32),
    /// Facing bound at the moment of capture
    Capture(Option<CameraFacing>),
}

type CommandLog = Arc<Mutex<Vec<Command>>>;

#[derive(Default)]
struct RecordingDevice {
    log: CommandLog,
    state: CameraState,
    fail_bind: bool,
    panic_on_bind: bool,
    fail_capture: bool,
}

impl RecordingDevice {
    fn new() -> (Self, CommandLog) {
        let device = Self::default();
        let log = Arc::clone(&device.log);
        (device, log)
    }

    fn record(&self, command: Command) {
        self.log.lock().unwrap().push(command);
    }
}

impl CameraDevice for RecordingDevice {
    fn bind(&mut self, facing: CameraFacing) -> Result<(), BackendError> {
        self.record(Command::Bind(facing));
        if self.panic_on_bind {
            panic!("camera driver crashed");
        }
        if self.fail_bind {
            return Err(BackendError::BindFailed("camera in use".to_string()));
        }
        self.state.facing = Some(facing);
        Ok(())
    }

    fn unbind_all(&mut self) {
        self.record(Command::UnbindAll);
        self.state = CameraState::default();
    }

    fn set_torch(&mut self, on: bool) -> Result<(), BackendError> {
        self.record(Command::SetTorch(on));
        self.state.torch_on = on;
        Ok(())
    }

    fn set_linear_zoom(&mut self, zoom: f32) -> Result<(), BackendError> {
        self.record(Command::SetLinearZoom(zoom));
        self.state.linear_zoom = zoom;
        Ok(())
    }

    fn capture_to_file(&mut self, path: &Path) -> Result<(), BackendError> {
        self.record(Command::Capture(self.state.facing));
        if self.fail_capture {
            return Err(BackendError::CaptureFailed("sensor timeout".to_string()));
        }
        std::fs::write(path, b"\xFF\xD8fake")?;
        Ok(())
    }

    fn state(&self) -> CameraState {
        self.state
    }
}

fn commands(log: &CommandLog) -> Vec<Command> {
    log.lock().unwrap().clone()
}

fn capture_count(log: &CommandLog) -> usize {
    commands(log)
        .iter()
        .filter(|c| matches!(c, Command::Capture(_)))
        .count()
}

fn orchestrator(device: RecordingDevice, dir: &Path) -> CaptureOrchestrator {
    CaptureOrchestrator::new(CameraSession::new(device), dir)
}

#[tokio::test]
async fn test_front_sepia_capture_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let (device, log) = RecordingDevice::new();
    let orchestrator = orchestrator(device, dir.path());

    let call: CaptureCall = serde_json::from_str(
        r#"{"filterXml":"<filter name='sepia' value='true'/>","flashMode":"on","cameraFacing":"front","timer":0,"zoom":2.5}"#,
    )
    .unwrap();
    let report = orchestrator.run(CaptureRequest::from(call)).await;

    assert_eq!(
        commands(&log),
        vec![
            Command::UnbindAll,
            Command::Bind(CameraFacing::Front),
            Command::SetTorch(true),
            Command::SetLinearZoom(0.5),
            Command::Capture(Some(CameraFacing::Front)),
        ]
    );

    let filter = report.filter.expect("filter should be compiled");
    assert!(filter.approx_eq(&sepia_matrix(), 1e-4));

    assert_eq!(
        report.states,
        vec![
            CaptureState::Idle,
            CaptureState::BindingDevice,
            CaptureState::ApplyingParameters,
            CaptureState::Capturing,
            CaptureState::Succeeded,
        ]
    );

    let path = report.outcome.into_path().expect("capture should succeed");
    assert!(path.is_absolute());
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("IMG_"), "unexpected name {name}");
    assert!(name.ends_with(".jpg"), "unexpected name {name}");
    assert!(path.exists());
}

#[tokio::test]
async fn test_bind_failure_skips_capture() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("pictures");
    let (mut device, log) = RecordingDevice::new();
    device.fail_bind = true;
    let orchestrator = orchestrator(device, &out);

    let report = orchestrator.run(CaptureRequest::default()).await;

    assert!(matches!(
        report.outcome,
        CaptureOutcome::Failed {
            reason: FailureReason::Bind(_)
        }
    ));
    assert!(report.filter.is_none());
    assert_eq!(
        report.states,
        vec![
            CaptureState::Idle,
            CaptureState::BindingDevice,
            CaptureState::Failed
        ]
    );
    assert_eq!(capture_count(&log), 0, "no capture after a failed bind");
    assert!(
        !commands(&log).iter().any(|c| matches!(c, Command::SetTorch(_))),
        "no parameters applied after a failed bind"
    );
    assert!(!out.exists(), "no output produced");
}

#[tokio::test]
async fn test_capture_failure_has_no_path() {
    let dir = tempfile::tempdir().unwrap();
    let (mut device, log) = RecordingDevice::new();
    device.fail_capture = true;
    let orchestrator = orchestrator(device, dir.path());

    let report = orchestrator.run(CaptureRequest::default()).await;

    assert_eq!(capture_count(&log), 1);
    assert_eq!(report.states.last(), Some(&CaptureState::Failed));
    let reason = report.outcome.into_result().unwrap_err();
    assert_eq!(reason.kind(), "capture");
}

#[tokio::test]
async fn test_same_facing_is_not_rebound() {
    let dir = tempfile::tempdir().unwrap();
    let (device, log) = RecordingDevice::new();
    let orchestrator = orchestrator(device, dir.path());

    for _ in 0..2 {
        let outcome = orchestrator.capture(CaptureRequest::default()).await;
        assert!(outcome.is_success());
    }

    let binds = commands(&log)
        .iter()
        .filter(|c| matches!(c, Command::Bind(_)))
        .count();
    assert_eq!(binds, 1);
    assert_eq!(capture_count(&log), 2);
}

#[tokio::test]
async fn test_auto_flash_turns_torch_off() {
    let dir = tempfile::tempdir().unwrap();
    let (device, log) = RecordingDevice::new();
    let orchestrator = orchestrator(device, dir.path());

    let request = CaptureRequest::builder()
        .flash_mode(FlashMode::from_name("AUTO"))
        .zoom(10.0)
        .build();
    orchestrator.capture(request).await;

    let log = commands(&log);
    assert!(log.contains(&Command::SetTorch(false)));
    assert!(log.contains(&Command::SetLinearZoom(1.0)));
}

#[tokio::test(start_paused = true)]
async fn test_timer_delays_capture() {
    let dir = tempfile::tempdir().unwrap();
    let (device, log) = RecordingDevice::new();
    let orchestrator = orchestrator(device, dir.path());

    let start = tokio::time::Instant::now();
    let receiver = orchestrator.submit(CaptureRequest::builder().timer_sec(2).build());

    tokio::time::sleep(Duration::from_millis(1900)).await;
    assert_eq!(capture_count(&log), 0, "capture issued before the timer");
    assert!(commands(&log).contains(&Command::Bind(CameraFacing::Back)));

    let outcome = receiver.await.expect("outcome delivered");
    assert!(outcome.is_success());
    assert!(start.elapsed() >= Duration::from_secs(2));
    assert_eq!(capture_count(&log), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timer_state_is_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let (device, _log) = RecordingDevice::new();
    let orchestrator = orchestrator(device, dir.path());

    let report = orchestrator
        .run(CaptureRequest::builder().timer_sec(1).build())
        .await;
    assert!(report.states.contains(&CaptureState::AwaitingTimer));
    assert_eq!(report.states.last(), Some(&CaptureState::Succeeded));
}

#[tokio::test]
async fn test_take_photo_calls_back_once() {
    let dir = tempfile::tempdir().unwrap();
    let (mut device, _log) = RecordingDevice::new();
    device.fail_capture = true;
    let orchestrator = orchestrator(device, dir.path());

    let results: Arc<Mutex<Vec<Option<PathBuf>>>> = Arc::default();
    let sink = Arc::clone(&results);
    orchestrator
        .take_photo(CaptureRequest::default(), move |outcome| {
            sink.lock().unwrap().push(outcome.into_path());
        })
        .await
        .unwrap();

    assert_eq!(*results.lock().unwrap(), vec![None]);
}

#[tokio::test]
async fn test_take_photo_calls_back_once_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let (device, log) = RecordingDevice::new();
    let orchestrator = orchestrator(device, dir.path());

    let results: Arc<Mutex<Vec<Option<PathBuf>>>> = Arc::default();
    let sink = Arc::clone(&results);
    orchestrator
        .take_photo(CaptureRequest::default(), move |outcome| {
            sink.lock().unwrap().push(outcome.into_path());
        })
        .await
        .unwrap();

    let results = results.lock().unwrap().clone();
    assert_eq!(results.len(), 1);
    let path = results[0].clone().expect("successful capture reports a path");
    assert!(path.is_absolute());
    assert!(path.exists());
    assert_eq!(capture_count(&log), 1);
}

#[tokio::test]
async fn test_device_panic_still_completes_request() {
    let dir = tempfile::tempdir().unwrap();
    let (mut device, _log) = RecordingDevice::new();
    device.panic_on_bind = true;
    let orchestrator = orchestrator(device, dir.path());

    let results: Arc<Mutex<Vec<CaptureOutcome>>> = Arc::default();
    let sink = Arc::clone(&results);
    orchestrator
        .take_photo(CaptureRequest::default(), move |outcome| {
            sink.lock().unwrap().push(outcome);
        })
        .await
        .unwrap();

    let results = results.lock().unwrap().clone();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].failure().map(|r| r.kind()), Some("worker"));

    let outcome = orchestrator.submit(CaptureRequest::default()).await.unwrap();
    assert!(matches!(
        outcome,
        CaptureOutcome::Failed {
            reason: FailureReason::Worker(_)
        }
    ));

    // The session was released by the unwinding run and never marked bound
    assert_eq!(orchestrator.session().bound_facing().await, None);
}

// Exclusive sessions are a deliberate strengthening over the legacy
// unsynchronized behavior: a second request waits for the first to finish.
#[tokio::test(start_paused = true)]
async fn test_exclusive_session_queues_overlapping_requests() {
    let dir = tempfile::tempdir().unwrap();
    let (device, log) = RecordingDevice::new();
    let orchestrator = orchestrator(device, dir.path()).with_policy(SessionPolicy::Exclusive);

    let first = orchestrator.submit(
        CaptureRequest::builder()
            .facing(CameraFacing::Front)
            .timer_sec(2)
            .build(),
    );
    let second = orchestrator.submit(CaptureRequest::builder().facing(CameraFacing::Back).build());

    assert!(first.await.unwrap().is_success());
    assert!(second.await.unwrap().is_success());

    let log = commands(&log);
    let first_capture = log
        .iter()
        .position(|c| *c == Command::Capture(Some(CameraFacing::Front)))
        .expect("first request captured from the front camera");
    let back_bind = log
        .iter()
        .position(|c| *c == Command::Bind(CameraFacing::Back))
        .expect("second request bound the back camera");
    assert!(first_capture < back_bind, "log: {log:?}");
}

#[tokio::test(start_paused = true)]
async fn test_exclusive_session_serves_requests_in_arrival_order() {
    let dir = tempfile::tempdir().unwrap();
    let (device, log) = RecordingDevice::new();
    let orchestrator = orchestrator(device, dir.path()).with_policy(SessionPolicy::Exclusive);

    let a = orchestrator.submit(
        CaptureRequest::builder()
            .facing(CameraFacing::Front)
            .timer_sec(2)
            .build(),
    );
    let b = orchestrator.submit(CaptureRequest::builder().facing(CameraFacing::Back).build());
    let c = orchestrator.submit(
        CaptureRequest::builder()
            .facing(CameraFacing::Front)
            .zoom(4.0)
            .build(),
    );

    assert!(c.await.unwrap().is_success());
    assert!(b.await.unwrap().is_success());
    assert!(a.await.unwrap().is_success());

    let log = commands(&log);
    let binds: Vec<&Command> = log
        .iter()
        .filter(|cmd| matches!(cmd, Command::Bind(_)))
        .collect();
    assert_eq!(
        binds,
        vec![
            &Command::Bind(CameraFacing::Front),
            &Command::Bind(CameraFacing::Back),
            &Command::Bind(CameraFacing::Front),
        ]
    );

    let captures: Vec<&Command> = log
        .iter()
        .filter(|cmd| matches!(cmd, Command::Capture(_)))
        .collect();
    assert_eq!(
        captures,
        vec![
            &Command::Capture(Some(CameraFacing::Front)),
            &Command::Capture(Some(CameraFacing::Back)),
            &Command::Capture(Some(CameraFacing::Front)),
        ]
    );

    // C's zoom lands after B's capture
    let b_capture = log
        .iter()
        .position(|cmd| *cmd == Command::Capture(Some(CameraFacing::Back)))
        .unwrap();
    let c_zoom = log
        .iter()
        .position(|cmd| *cmd == Command::SetLinearZoom(1.0))
        .unwrap();
    assert!(b_capture < c_zoom, "log: {log:?}");
}

// Legacy behavior: the second request rebinds the camera while the first
// one is waiting on its timer, so the first captures from the wrong facing.
#[tokio::test(start_paused = true)]
async fn test_unsynchronized_session_allows_rebind_during_timer() {
    let dir = tempfile::tempdir().unwrap();
    let (device, log) = RecordingDevice::new();
    let orchestrator =
        orchestrator(device, dir.path()).with_policy(SessionPolicy::Unsynchronized);

    let first = orchestrator.submit(
        CaptureRequest::builder()
            .facing(CameraFacing::Front)
            .timer_sec(2)
            .build(),
    );
    let second = orchestrator.submit(CaptureRequest::builder().facing(CameraFacing::Back).build());

    assert!(second.await.unwrap().is_success());
    assert!(first.await.unwrap().is_success());

    let captures: Vec<Command> = commands(&log)
        .into_iter()
        .filter(|c| matches!(c, Command::Capture(_)))
        .collect();
    assert_eq!(
        captures,
        vec![
            Command::Capture(Some(CameraFacing::Back)),
            Command::Capture(Some(CameraFacing::Back)),
        ]
    );
}

#[tokio::test]
async fn test_virtual_camera_writes_jpeg() {
    let dir = tempfile::tempdir().unwrap();
    let session = CameraSession::new(VirtualCamera::default());
    let orchestrator = CaptureOrchestrator::new(session.clone(), dir.path());

    let request = CaptureRequest::builder()
        .facing(CameraFacing::Front)
        .flash_mode(FlashMode::On)
        .zoom(2.5)
        .filter_xml("<filter name='contrast' value='1.3'/>")
        .build();
    let path = orchestrator.capture(request).await.into_path().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

    let state = session.device_state().await;
    assert_eq!(state.facing, Some(CameraFacing::Front));
    assert!(state.torch_on);
    assert_eq!(state.linear_zoom, 0.5);
}

#[tokio::test]
async fn test_unwritable_output_dir_fails_request() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();

    let (device, log) = RecordingDevice::new();
    let orchestrator = orchestrator(device, &blocker.join("pictures"));

    let outcome = orchestrator.capture(CaptureRequest::default()).await;
    assert_eq!(outcome.failure().map(|r| r.kind()), Some("storage"));
    assert_eq!(capture_count(&log), 0);
}
