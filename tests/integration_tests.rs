//! Integration tests for positioner-actuator.
//!
//! These tests exercise the complete path from TOML configuration through
//! pin bindings, encoders, home latches and motor drivers to the positioner
//! facade.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, PinState};
use embedded_hal::pwm::{self, SetDutyCycle};
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

use positioner_actuator::config::parse_config;
use positioner_actuator::edge::{HomeInput, LevelListener, PhaseInputs, PhaseListener};
use positioner_actuator::error::{ConfigError, DriverError, Error};
use positioner_actuator::{
    Axis, AxisId, Drive, HomeLatch, LatchedEncoder, MotorDriver, PolledEncoder, PositionMode,
    PositionSource, Positioner, ReportGate, Speed, SystemConfig, WiringMode,
};

// =============================================================================
// Test configuration data and hardware doubles
// =============================================================================

const SINGLE_AXIS_CONFIG: &str = r#"
[azimuth]
name = "Yaw"
wiring = "single_direction"
wrap_modulus = 1000000
"#;

const DUAL_AXIS_CONFIG: &str = r#"
report_interval_ms = 500

[azimuth]
name = "Azimuth"
wiring = "single_direction"

[elevation]
name = "Elevation"
wiring = "dual_direction"
"#;

/// Output pin whose level is observable after the driver takes ownership.
struct CellPin<'a>(&'a Cell<bool>);

impl ErrorType for CellPin<'_> {
    type Error = Infallible;
}

impl OutputPin for CellPin<'_> {
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.set(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.set(false);
        Ok(())
    }
}

/// PWM channel with a 0-1020 range to check duty scaling.
struct CellPwm<'a>(&'a Cell<u16>);

impl pwm::ErrorType for CellPwm<'_> {
    type Error = Infallible;
}

impl SetDutyCycle for CellPwm<'_> {
    fn max_duty_cycle(&self) -> u16 {
        1020
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.0.set(duty);
        Ok(())
    }
}

/// Observable outputs of one bridge.
#[derive(Default)]
struct Outputs {
    dir1: Cell<bool>,
    dir2: Cell<bool>,
    duty: Cell<u16>,
}

impl Outputs {
    /// Duty on the 0-255 scale (PWM range is 0-1020).
    fn duty_255(&self) -> u16 {
        self.duty.get() / 4
    }
}

/// Output pin that starts failing once `fail` is set.
struct FlakyPin<'a> {
    level: &'a Cell<bool>,
    fail: &'a Cell<bool>,
}

impl FlakyPin<'_> {
    fn write(&mut self, high: bool) -> Result<(), embedded_hal::digital::ErrorKind> {
        if self.fail.get() {
            return Err(embedded_hal::digital::ErrorKind::Other);
        }
        self.level.set(high);
        Ok(())
    }
}

impl ErrorType for FlakyPin<'_> {
    type Error = embedded_hal::digital::ErrorKind;
}

impl OutputPin for FlakyPin<'_> {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }
}

type Driver<'a> = MotorDriver<CellPin<'a>, CellPwm<'a>>;

fn single_driver<'a>(out: &'a Outputs) -> Driver<'a> {
    MotorDriver::single_direction(CellPin(&out.dir1), CellPwm(&out.duty)).unwrap()
}

fn dual_driver<'a>(out: &'a Outputs) -> Driver<'a> {
    MotorDriver::dual_direction(CellPin(&out.dir1), CellPin(&out.dir2), CellPwm(&out.duty))
        .unwrap()
}

fn driver_from_config<'a>(config: &SystemConfig, axis: AxisId, out: &'a Outputs) -> Driver<'a> {
    let builder = MotorDriver::builder().from_config(config, axis).unwrap();
    let builder = match config.axis(axis).unwrap().wiring {
        WiringMode::SingleDirection => builder.direction_pin(CellPin(&out.dir1)),
        WiringMode::DualDirection => builder
            .forward_pin(CellPin(&out.dir1))
            .reverse_pin(CellPin(&out.dir2)),
    };
    builder.pwm(CellPwm(&out.duty)).build().unwrap()
}

// =============================================================================
// Motor driver: stop state and deadzone
// =============================================================================

#[test]
fn driver_starts_in_stop_state() {
    let single = Outputs::default();
    let _driver = single_driver(&single);
    assert!(single.dir1.get());
    assert_eq!(single.duty.get(), 1020);

    let dual = Outputs::default();
    let _driver = dual_driver(&dual);
    assert!(dual.dir1.get());
    assert!(dual.dir2.get());
    assert_eq!(dual.duty.get(), 0);
}

#[test]
fn deadzone_forces_stop_in_single_direction_mode() {
    let out = Outputs::default();
    let mut driver = single_driver(&out);

    for speed in -10..=10 {
        driver.drive(Speed(50)).unwrap();
        let signals = driver.drive(Speed(speed)).unwrap();
        assert!(signals.is_stop(), "speed {} should stop", speed);
        assert!(out.dir1.get());
        assert_eq!(out.duty_255(), 255);
    }
}

#[test]
fn deadzone_forces_stop_in_dual_direction_mode() {
    let out = Outputs::default();
    let mut driver = dual_driver(&out);

    for speed in -10..=10 {
        driver.drive(Speed(-50)).unwrap();
        let signals = driver.drive(Speed(speed)).unwrap();
        assert!(signals.is_stop(), "speed {} should stop", speed);
        assert!(out.dir1.get());
        assert!(out.dir2.get());
        assert_eq!(out.duty.get(), 0);
    }
}

// =============================================================================
// Motor driver: direction and magnitude
// =============================================================================

#[test]
fn single_direction_forward_and_reverse() {
    let out = Outputs::default();
    let mut driver = single_driver(&out);

    driver.drive(Speed(100)).unwrap();
    assert!(out.dir1.get());
    assert_eq!(out.duty_255(), 155);

    driver.drive(Speed(-100)).unwrap();
    assert!(!out.dir1.get());
    assert_eq!(out.duty_255(), 100);
}

#[test]
fn dual_direction_forward_and_reverse() {
    let out = Outputs::default();
    let mut driver = dual_driver(&out);

    driver.drive(Speed(100)).unwrap();
    assert!(out.dir1.get());
    assert!(!out.dir2.get());
    assert_eq!(out.duty_255(), 100);

    driver.drive(Speed(-100)).unwrap();
    assert!(!out.dir1.get());
    assert!(out.dir2.get());
    assert_eq!(out.duty_255(), 100);
}

#[test]
fn duty_scaled_to_pwm_range() {
    let out = Outputs::default();
    let mut driver = dual_driver(&out);

    driver.drive(Speed(255)).unwrap();
    assert_eq!(out.duty.get(), 1020);

    driver.drive(Speed(12)).unwrap();
    assert_eq!(out.duty.get(), 48);

    driver.drive(Speed(-2000)).unwrap();
    assert_eq!(out.duty.get(), 1020);
}

#[test]
fn same_command_twice_gives_same_outputs() {
    let out = Outputs::default();
    let mut driver = single_driver(&out);

    let first = driver.drive(Speed(77)).unwrap();
    let levels = (out.dir1.get(), out.duty.get());
    let second = driver.drive(Speed(77)).unwrap();

    assert_eq!(first, second);
    assert_eq!(levels, (out.dir1.get(), out.duty.get()));
}

// =============================================================================
// Quadrature tracking
// =============================================================================

#[test]
fn latched_encoder_fed_through_pin_binding() {
    let encoder = LatchedEncoder::new(PositionMode::Unbounded);

    // A↑ B=1, A↓, A↑ B=1, A↓, A↑ B=0
    let phase_a = PinMock::new(&[
        Transaction::get(State::High),
        Transaction::get(State::Low),
        Transaction::get(State::High),
        Transaction::get(State::Low),
        Transaction::get(State::High),
    ]);
    let phase_b = PinMock::new(&[
        Transaction::get(State::High),
        Transaction::get(State::High),
        Transaction::get(State::High),
        Transaction::get(State::Low),
        Transaction::get(State::Low),
    ]);

    let mut inputs = PhaseInputs::new(phase_a, phase_b, &encoder);
    let mut positions = Vec::new();
    for _ in 0..5 {
        inputs.on_interrupt().unwrap();
        positions.push(encoder.position());
    }

    assert_eq!(positions, [1, 1, 2, 2, 1]);

    let (mut phase_a, mut phase_b) = inputs.free();
    phase_a.done();
    phase_b.done();
}

#[test]
fn polled_encoder_counts_qualifying_edges_only() {
    // Samples: A↑ B=1, A↓, B changes alone, A↑ B=1, A↓, A↑ B=0
    let phase_a = PinMock::new(&[
        Transaction::get(State::High),
        Transaction::get(State::Low),
        Transaction::get(State::Low),
        Transaction::get(State::High),
        Transaction::get(State::Low),
        Transaction::get(State::High),
    ]);
    let phase_b = PinMock::new(&[
        Transaction::get(State::High),
        Transaction::get(State::High),
        Transaction::get(State::Low),
    ]);

    let mut encoder = PolledEncoder::new(phase_a, phase_b, PositionMode::Unbounded);
    let mut positions = Vec::new();
    for _ in 0..6 {
        positions.push(encoder.read_position().unwrap());
    }

    assert_eq!(positions, [1, 1, 1, 2, 2, 1]);

    let (mut phase_a, mut phase_b) = encoder.free();
    phase_a.done();
    phase_b.done();
}

#[test]
fn single_axis_position_wraps_for_display() {
    let config = parse_config(SINGLE_AXIS_CONFIG).unwrap();
    let mode = config.azimuth.position_mode().unwrap();
    let encoder = LatchedEncoder::new(mode);

    encoder.on_phase_edge(PinState::High, PinState::Low);
    assert_eq!(encoder.position(), 999_999);

    encoder.on_phase_edge(PinState::Low, PinState::Low);
    encoder.on_phase_edge(PinState::High, PinState::High);
    assert_eq!(encoder.position(), 0);
}

#[test]
fn dual_axis_position_is_unbounded() {
    let config = parse_config(DUAL_AXIS_CONFIG).unwrap();
    let mode = config.elevation.as_ref().unwrap().position_mode().unwrap();
    let encoder = LatchedEncoder::new(mode);

    encoder.on_phase_edge(PinState::High, PinState::Low);
    assert_eq!(encoder.position(), -1);
}

// =============================================================================
// Home latch
// =============================================================================

#[test]
fn home_latch_fed_through_pin_binding() {
    let latch = HomeLatch::active_low();
    let pin = PinMock::new(&[
        Transaction::get(State::Low),
        Transaction::get(State::High),
        Transaction::get(State::Low),
    ]);

    let mut input = HomeInput::new(pin, &latch);
    let mut seen = Vec::new();
    for _ in 0..3 {
        input.on_interrupt().unwrap();
        seen.push(latch.is_home());
    }

    assert_eq!(seen, [true, false, true]);

    let mut pin = input.free();
    pin.done();
}

#[test]
fn home_latch_polarity_from_config() {
    let toml = r#"
[azimuth]
name = "Azimuth"
wiring = "dual_direction"
home_active_low = false
"#;
    let config = parse_config(toml).unwrap();
    let latch = config.azimuth.home_latch();

    latch.on_level_change(PinState::High);
    assert!(latch.is_home());
}

// =============================================================================
// Configuration workflow
// =============================================================================

#[test]
fn drivers_built_from_config() {
    let config = parse_config(DUAL_AXIS_CONFIG).unwrap();

    let az_out = Outputs::default();
    let el_out = Outputs::default();
    let az = driver_from_config(&config, AxisId::Azimuth, &az_out);
    let el = driver_from_config(&config, AxisId::Elevation, &el_out);

    assert_eq!(az.wiring(), WiringMode::SingleDirection);
    assert_eq!(el.wiring(), WiringMode::DualDirection);
    assert_eq!(az.deadzone().value(), 10);
}

#[test]
fn invalid_deadzone_rejected() {
    let toml = r#"
[azimuth]
name = "Azimuth"
wiring = "dual_direction"
deadzone = 300
"#;
    assert!(matches!(
        parse_config(toml),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

#[test]
fn report_gate_from_config() {
    let config = parse_config(DUAL_AXIS_CONFIG).unwrap();
    let mut gate = ReportGate::from_config(&config);

    assert!(!gate.poll(500));
    assert!(gate.poll(501));
}

// =============================================================================
// Positioner facade
// =============================================================================

#[test]
fn dual_axis_positioner_workflow() {
    let config = parse_config(DUAL_AXIS_CONFIG).unwrap();

    let az_encoder = LatchedEncoder::new(config.azimuth.position_mode().unwrap());
    let el_encoder = LatchedEncoder::new(PositionMode::Unbounded);
    let az_home = config.azimuth.home_latch();
    let el_home = HomeLatch::active_low();
    let az_out = Outputs::default();
    let el_out = Outputs::default();

    let azimuth = Axis::from_config(
        &config,
        AxisId::Azimuth,
        &az_encoder,
        &az_home,
        driver_from_config(&config, AxisId::Azimuth, &az_out),
    )
    .unwrap();
    let elevation = Axis::from_config(
        &config,
        AxisId::Elevation,
        &el_encoder,
        &el_home,
        driver_from_config(&config, AxisId::Elevation, &el_out),
    )
    .unwrap();
    assert_eq!(azimuth.name(), "Azimuth");

    let mut positioner = Positioner::dual_axis(azimuth, elevation);

    // Sensors change from "interrupt context"
    az_encoder.on_phase_edge(PinState::High, PinState::High);
    el_home.on_level_change(PinState::Low);

    assert_eq!(positioner.read_position(AxisId::Azimuth).unwrap(), 1);
    assert_eq!(positioner.read_position(AxisId::Elevation).unwrap(), 0);
    assert!(!positioner.is_home(AxisId::Azimuth).unwrap());
    assert!(positioner.is_home(AxisId::Elevation).unwrap());

    positioner.set_speed(AxisId::Elevation, Speed(-100)).unwrap();
    assert!(!el_out.dir1.get());
    assert!(el_out.dir2.get());
    assert_eq!(el_out.duty_255(), 100);

    positioner.set_speed(AxisId::Azimuth, Speed(100)).unwrap();
    assert_eq!(az_out.duty_255(), 155);

    let snapshot = positioner.snapshot().unwrap();
    assert_eq!(snapshot.azimuth.position, 1);
    assert!(snapshot.elevation.unwrap().home);

    positioner.stop_all().unwrap();
    assert_eq!(az_out.duty_255(), 255);
    assert_eq!(el_out.duty.get(), 0);
    assert!(el_out.dir1.get() && el_out.dir2.get());
}

#[test]
fn single_axis_positioner_rejects_elevation() {
    let encoder = LatchedEncoder::new(PositionMode::display());
    let home = HomeLatch::active_low();
    let out = Outputs::default();
    let azimuth = Axis::new(AxisId::Azimuth, &encoder, &home, single_driver(&out));
    let mut positioner = Positioner::single_axis(azimuth);

    assert!(!positioner.has_axis(AxisId::Elevation));
    assert_eq!(
        positioner.set_speed(AxisId::Elevation, Speed(50)),
        Err(Error::Config(ConfigError::AxisNotConfigured("elevation")))
    );
    assert!(positioner.is_home(AxisId::Elevation).is_err());
    assert!(positioner.snapshot().unwrap().elevation.is_none());
}

#[test]
fn stop_all_stops_elevation_when_azimuth_fails() {
    let az_out = Outputs::default();
    let az_fail = Cell::new(false);
    let az_driver = MotorDriver::single_direction(
        FlakyPin {
            level: &az_out.dir1,
            fail: &az_fail,
        },
        CellPwm(&az_out.duty),
    )
    .unwrap();
    let el_out = Outputs::default();

    let encoder = LatchedEncoder::new(PositionMode::Unbounded);
    let az_home = HomeLatch::active_low();
    let el_home = HomeLatch::active_low();

    // Azimuth and elevation drivers are different types
    let mut positioner = Positioner::dual_axis(
        Axis::new(AxisId::Azimuth, &encoder, &az_home, az_driver),
        Axis::new(AxisId::Elevation, &encoder, &el_home, dual_driver(&el_out)),
    );

    positioner.set_speed(AxisId::Azimuth, Speed(-100)).unwrap();
    positioner.set_speed(AxisId::Elevation, Speed(100)).unwrap();
    assert_eq!(el_out.duty_255(), 100);

    az_fail.set(true);
    assert_eq!(
        positioner.set_speed(AxisId::Azimuth, Speed(50)),
        Err(Error::Driver(DriverError::PinError))
    );
    assert_eq!(
        positioner.stop_all(),
        Err(Error::Driver(DriverError::PinError))
    );

    // Elevation still reached its stop state
    assert!(el_out.dir1.get() && el_out.dir2.get());
    assert_eq!(el_out.duty.get(), 0);
}

#[test]
fn positioner_mixes_encoder_kinds() {
    let az_encoder = LatchedEncoder::new(PositionMode::Unbounded);
    let phase_a = PinMock::new(&[Transaction::get(State::High)]);
    let phase_b = PinMock::new(&[Transaction::get(State::Low)]);
    let el_encoder = PolledEncoder::new(phase_a, phase_b, PositionMode::Unbounded);

    let home = HomeLatch::active_low();
    let az_out = Outputs::default();
    let el_out = Outputs::default();

    let mut positioner = Positioner::dual_axis(
        Axis::new(AxisId::Azimuth, &az_encoder, &home, single_driver(&az_out)),
        Axis::new(AxisId::Elevation, el_encoder, &home, dual_driver(&el_out)),
    );

    az_encoder.on_phase_edge(PinState::High, PinState::High);
    assert_eq!(positioner.read_position(AxisId::Azimuth).unwrap(), 1);
    assert_eq!(positioner.read_position(AxisId::Elevation).unwrap(), -1);

    assert_eq!(positioner.elevation().unwrap().name(), "elevation");

    let (_azimuth, elevation) = positioner.free();
    let (el_encoder, _driver) = elevation.unwrap().free();
    let (mut phase_a, mut phase_b) = el_encoder.free();
    phase_a.done();
    phase_b.done();
}
