//! Tests for the full state refresh

mod helpers;

use avr_sync::{refresh_state, DeviceState, InputStatus, PowerState, Refresh, SourceState, VolumeState};
use helpers::FakeConnection;
use proptest::prelude::*;
use rstest::rstest;
use serde_json::json;
use tokio_test::{assert_pending, assert_ready_eq};

const ALL_READS: [&str; 4] = ["GetPower", "GetVolume", "GetMute", "GetInput"];

#[tokio::test]
async fn test_no_connection_is_reported_without_touching_the_avr() {
    let avr = FakeConnection::healthy();
    let unused: Option<&FakeConnection> = None;

    assert_eq!(refresh_state(unused).await, Refresh::NoConnection);
    assert!(avr.issued().is_empty());
}

#[tokio::test]
async fn test_full_success_builds_snapshot() {
    let avr = FakeConnection::healthy();

    let refresh = refresh_state(Some(&avr)).await;

    let expected = DeviceState {
        volume_state: VolumeState {
            volume_value: 45.0,
            is_muted: false,
        },
        source_state: SourceState {
            power: PowerState::On,
            input: "CD".to_string(),
        },
    };
    assert_eq!(refresh, Refresh::Snapshot(expected));
    assert_eq!(avr.issued(), ALL_READS);

    let state = refresh.into_snapshot().unwrap();
    assert_eq!(
        serde_json::to_value(&state).unwrap(),
        json!({
            "volume_state": { "volume_value": 45.0, "is_muted": false },
            "source_state": { "power": "ON", "input": "CD" }
        })
    );
}

#[tokio::test]
async fn test_standby_is_reported_in_snapshot() {
    let avr = FakeConnection::healthy().with_power(Ok(false));

    let refresh = refresh_state(Some(&avr)).await;

    assert_eq!(
        refresh.snapshot().map(|s| s.source_state.power),
        Some(PowerState::Standby)
    );
}

#[rstest]
#[case::power(FakeConnection::healthy().with_power(Err("timeout")))]
#[case::volume(FakeConnection::healthy().with_volume(Err("timeout")))]
#[case::mute(FakeConnection::healthy().with_mute(Err("timeout")))]
#[case::input(FakeConnection::healthy().with_input(Err("timeout")))]
#[case::input_without_source(FakeConnection::healthy().with_input(Ok(InputStatus::new())))]
#[tokio::test]
async fn test_any_failed_read_fails_the_refresh(#[case] avr: FakeConnection) {
    let refresh = refresh_state(Some(&avr)).await;

    assert_eq!(refresh, Refresh::Failed);
    assert!(!refresh.is_snapshot());
    assert_eq!(avr.issued(), ALL_READS, "all reads are issued up front");
}

#[rstest]
#[case(Ok(45.0), Ok(false))]
#[case(Err("bad volume"), Ok(true))]
#[case(Ok(10.0), Err("bad mute"))]
#[case(Err("bad volume"), Err("bad mute"))]
#[tokio::test]
async fn test_power_failure_wins_regardless_of_other_reads(
    #[case] volume: Result<f64, &str>,
    #[case] mute: Result<bool, &str>,
) {
    let avr = FakeConnection::healthy()
        .with_power(Err("connection refused"))
        .with_volume(volume)
        .with_mute(mute);

    assert_eq!(refresh_state(Some(&avr)).await, Refresh::Failed);
}

#[test]
fn test_all_reads_are_issued_before_any_resolves() {
    let avr = FakeConnection::healthy().parked();
    let mut refresh = tokio_test::task::spawn(refresh_state(Some(&avr)));

    assert_pending!(refresh.poll());
    assert_eq!(avr.issued(), ALL_READS);
    assert_eq!(avr.parked_count(), 4);

    // Complete in reverse; nothing can be consumed until power arrives
    assert!(avr.release("GetInput"));
    assert!(avr.release("GetMute"));
    assert!(avr.release("GetVolume"));
    assert_pending!(refresh.poll());

    assert!(avr.release("GetPower"));
    assert_ready_eq!(
        refresh.poll(),
        Refresh::Snapshot(DeviceState {
            volume_state: VolumeState {
                volume_value: 45.0,
                is_muted: false,
            },
            source_state: SourceState {
                power: PowerState::On,
                input: "CD".to_string(),
            },
        })
    );
}

#[test]
fn test_power_failure_abandons_reads_still_in_flight() {
    let avr = FakeConnection::healthy()
        .with_power(Err("connection reset"))
        .parked();
    let mut refresh = tokio_test::task::spawn(refresh_state(Some(&avr)));

    assert_pending!(refresh.poll());
    assert!(avr.release("GetPower"));
    assert_ready_eq!(refresh.poll(), Refresh::Failed);
    drop(refresh);

    // Late answers for abandoned reads go nowhere
    assert!(avr.release("GetVolume"));
    assert!(avr.release("GetMute"));
    assert!(avr.release("GetInput"));
    assert_eq!(avr.parked_count(), 0);
}

#[test]
fn test_results_are_consumed_in_fixed_order() {
    let avr = FakeConnection::healthy()
        .with_volume(Err("garbled"))
        .parked();
    let mut refresh = tokio_test::task::spawn(refresh_state(Some(&avr)));

    assert_pending!(refresh.poll());

    // The volume failure is known, but power has not been consumed yet
    assert!(avr.release("GetVolume"));
    assert_pending!(refresh.poll());

    assert!(avr.release("GetPower"));
    assert_ready_eq!(refresh.poll(), Refresh::Failed);
}

#[test]
fn test_refresh_helpers() {
    assert!(Refresh::NoConnection.snapshot().is_none());
    assert!(Refresh::Failed.into_snapshot().is_none());
    assert_ne!(Refresh::NoConnection, Refresh::Failed);
}

proptest! {
    #[test]
    fn prop_snapshot_mirrors_device_readings(
        on in any::<bool>(),
        steps in 0u32..=196,
        muted in any::<bool>(),
        input in "[A-Z][A-Z0-9/]{0,7}",
    ) {
        let volume = f64::from(steps) / 2.0;
        let avr = FakeConnection::healthy()
            .with_power(Ok(on))
            .with_volume(Ok(volume))
            .with_mute(Ok(muted))
            .with_input(Ok(InputStatus::new().with_field("SI", input.clone())));

        let refresh = tokio_test::block_on(refresh_state(Some(&avr)));

        let state = refresh.into_snapshot().expect("all reads succeeded");
        prop_assert_eq!(state.source_state.power, PowerState::from(on));
        prop_assert_eq!(state.source_state.input, input);
        prop_assert_eq!(state.volume_state.volume_value, volume);
        prop_assert_eq!(state.volume_state.is_muted, muted);
    }
}
