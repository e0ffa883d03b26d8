//! Property-based tests for the update engine.
//!
//! Every tick, whatever the inputs and whatever in-bounds values the random
//! source returns, must leave each channel inside its range, stamp the
//! selected fault code and keep floats at two decimals.

use obdsim_core::prelude::*;
use obdsim_test_helpers::prelude::*;
use proptest::prelude::*;

fn fault_strategy() -> impl Strategy<Value = FaultCode> {
    proptest::sample::select(FaultCode::ALL.to_vec())
}

fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    proptest::sample::select(Scenario::ALL.to_vec())
}

fn control_strategy() -> impl Strategy<Value = ControlState> {
    (any::<bool>(), any::<bool>(), any::<bool>(), 0u16..=MAX_TARGET_SPEED_KMH).prop_map(
        |(ignition, climate, brake, speed)| {
            ControlState::new(ignition, climate, brake, speed).unwrap_or_default()
        },
    )
}

fn step_strategy() -> impl Strategy<Value = (ControlState, FaultCode, Scenario)> {
    (control_strategy(), fault_strategy(), scenario_strategy())
}

proptest! {
    #[test]
    fn ranges_hold_for_arbitrary_sequences(
        steps in proptest::collection::vec(step_strategy(), 1..40),
        fractions in proptest::collection::vec(0.0f64..=1.0, 1..64),
    ) {
        let mut rng = ScriptedSource::new(fractions);
        let mut snapshot = SensorSnapshot::baseline();
        for (control, fault, scenario) in steps {
            snapshot = tick(&snapshot, control, fault, scenario, &mut rng);
            prop_assert!(snapshot.out_of_range().is_empty(), "{:?}", snapshot.out_of_range());
            prop_assert_eq!(snapshot.fault_code, fault);
        }
    }

    #[test]
    fn floats_keep_two_decimals(
        steps in proptest::collection::vec(step_strategy(), 1..20),
        seed in any::<u64>(),
    ) {
        let mut rng = RngSource::seeded(seed);
        let mut snapshot = SensorSnapshot::baseline();
        for (control, fault, scenario) in steps {
            snapshot = tick(&snapshot, control, fault, scenario, &mut rng);
            for channel in Channel::ALL {
                if channel.kind() == ChannelKind::Float {
                    prop_assert!(has_two_decimals(snapshot.value(channel)), "{channel}");
                }
            }
        }
    }

    #[test]
    fn ignition_off_zeroes_gated_channels(
        fault in fault_strategy(),
        scenario in scenario_strategy(),
        climate in any::<bool>(),
        brake in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let control = ControlState::new(false, climate, brake, 0).unwrap_or_default();
        let next = tick(&SensorSnapshot::baseline(), control, fault, scenario, &mut RngSource::seeded(seed));
        prop_assert_eq!(next.engine_rpm, 0);
        prop_assert_eq!(next.wheel_speed_kmh, 0);
        prop_assert_eq!(next.fuel_pressure_kpa, 0);
    }

    #[test]
    fn wheel_speed_follows_target_with_ignition_on(
        speed in 0u16..=MAX_TARGET_SPEED_KMH,
        scenario in scenario_strategy(),
        seed in any::<u64>(),
    ) {
        let control = ControlState::new(true, false, false, speed).unwrap_or_default();
        let next = tick(&SensorSnapshot::baseline(), control, FaultCode::NoFault, scenario, &mut RngSource::seeded(seed));
        prop_assert_eq!(next.wheel_speed_kmh, i32::from(speed));
    }

    #[test]
    fn brake_is_binary(brake in any::<bool>(), seed in any::<u64>()) {
        let control = ControlState::new(true, false, brake, 30).unwrap_or_default();
        let next = tick(&SensorSnapshot::baseline(), control, FaultCode::NoFault, Scenario::CityRoad, &mut RngSource::seeded(seed));
        let expected = if brake { 100.0 } else { 0.0 };
        prop_assert!((next.brake_pedal_pct - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn clamp_is_idempotent(seed in any::<u64>(), fault in fault_strategy()) {
        let mut snapshot = tick(
            &SensorSnapshot::baseline(),
            ControlState::default(),
            fault,
            Scenario::OffRoad,
            &mut RngSource::seeded(seed),
        );
        let once = snapshot.clone();
        obdsim_core::engine::clamp_stage(&mut snapshot);
        prop_assert_eq!(snapshot, once);
    }

    #[test]
    fn same_seed_same_sequence(seed in any::<u64>(), ticks in 1usize..30) {
        let mut a = Simulator::seeded(seed);
        let mut b = Simulator::seeded(seed);
        for sim in [&mut a, &mut b] {
            prop_assert!(sim.apply(ControlEvent::SetIgnition(true)).is_ok());
            prop_assert!(sim.apply(ControlEvent::SelectFault(FaultCode::RandomMisfire)).is_ok());
        }
        prop_assert_eq!(a.run(ticks), b.run(ticks));
    }
}

#[test]
fn ranges_hold_under_extreme_sources() {
    let sources: [fn() -> ExtremeSource; 3] = [
        ExtremeSource::min,
        ExtremeSource::max,
        ExtremeSource::alternating,
    ];
    for make in sources {
        for fault in FaultCode::ALL {
            for scenario in Scenario::ALL {
                for (ignition, climate) in [(false, false), (false, true), (true, false), (true, true)] {
                    let control = must(ControlState::new(ignition, climate, ignition, 150));
                    let mut rng = make();
                    let mut snapshot = SensorSnapshot::baseline();
                    for _ in 0..60 {
                        snapshot = tick(&snapshot, control, fault, scenario, &mut rng);
                        assert_in_range(&snapshot);
                        assert_rounded(&snapshot);
                        assert_eq!(snapshot.fault_code, fault);
                    }
                }
            }
        }
    }
}
