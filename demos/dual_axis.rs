//! Dual-axis control loop example.
//!
//! Builds both axes from a TOML configuration, feeds synthetic encoder and
//! home-switch edges the way interrupt handlers would, and runs a short
//! polling loop with a fixed test command.
//!
//! This example uses in-memory pins instead of real hardware.

use std::cell::Cell;
use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, PinState};
use embedded_hal::pwm::{self, SetDutyCycle};

use positioner_actuator::{
    load_config, parse_config, Axis, AxisId, LatchedEncoder, LevelListener, MotorDriver,
    PhaseListener, Positioner, ReportGate, Speed, SystemConfig, WiringMode,
};

const CONFIG: &str = r#"
report_interval_ms = 500

[azimuth]
name = "Azimuth"
wiring = "single_direction"
wrap_modulus = 1000000

[elevation]
name = "Elevation"
wiring = "dual_direction"
deadzone = 12
"#;

/// In-memory output pin.
struct MemPin<'a>(&'a Cell<bool>);

impl ErrorType for MemPin<'_> {
    type Error = Infallible;
}

impl OutputPin for MemPin<'_> {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }
}

/// In-memory 8-bit PWM channel.
struct MemPwm<'a>(&'a Cell<u16>);

impl pwm::ErrorType for MemPwm<'_> {
    type Error = Infallible;
}

impl SetDutyCycle for MemPwm<'_> {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.0.set(duty);
        Ok(())
    }
}

#[derive(Default)]
struct Bridge {
    dir1: Cell<bool>,
    dir2: Cell<bool>,
    duty: Cell<u16>,
}

fn build_driver<'a>(
    config: &SystemConfig,
    axis: AxisId,
    bridge: &'a Bridge,
) -> positioner_actuator::Result<MotorDriver<MemPin<'a>, MemPwm<'a>>> {
    let builder = MotorDriver::builder().from_config(config, axis)?;
    let wiring = config.axis(axis).map(|a| a.wiring);
    let builder = match wiring {
        Some(WiringMode::DualDirection) => builder
            .forward_pin(MemPin(&bridge.dir1))
            .reverse_pin(MemPin(&bridge.dir2)),
        _ => builder.direction_pin(MemPin(&bridge.dir1)),
    };
    builder.pwm(MemPwm(&bridge.duty)).build()
}

fn main() -> positioner_actuator::Result<()> {
    println!("=== Dual Axis Positioner Example ===\n");

    // A file path on the command line overrides the built-in configuration
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(path)?,
        None => parse_config(CONFIG)?,
    };

    let az_encoder = LatchedEncoder::new(config.azimuth.position_mode()?);
    let el_encoder = LatchedEncoder::new(
        config
            .elevation
            .as_ref()
            .map(|el| el.position_mode())
            .transpose()?
            .unwrap_or_default(),
    );
    let az_home = config.azimuth.home_latch();
    let el_home = config
        .elevation
        .as_ref()
        .map(|el| el.home_latch())
        .unwrap_or_default();

    let az_bridge = Bridge::default();
    let el_bridge = Bridge::default();

    let azimuth = Axis::from_config(
        &config,
        AxisId::Azimuth,
        &az_encoder,
        &az_home,
        build_driver(&config, AxisId::Azimuth, &az_bridge)?,
    )?;
    let elevation = Axis::from_config(
        &config,
        AxisId::Elevation,
        &el_encoder,
        &el_home,
        build_driver(&config, AxisId::Elevation, &el_bridge)?,
    )?;
    let mut positioner = Positioner::dual_axis(azimuth, elevation);

    // Fixed test command, issued once
    let az_signals = positioner.set_speed(AxisId::Azimuth, Speed(100))?;
    let el_signals = positioner.set_speed(AxisId::Elevation, Speed(-60))?;
    println!("Azimuth command:   {:?}", az_signals);
    println!("Elevation command: {:?}\n", el_signals);

    let mut gate = ReportGate::from_config(&config);

    for now_ms in (0..=3000u32).step_by(50) {
        // What the phase interrupts would deliver: azimuth turning forward,
        // elevation turning in reverse
        let a = PinState::from(now_ms % 100 == 0);
        az_encoder.on_phase_edge(a, PinState::High);
        el_encoder.on_phase_edge(a, PinState::Low);

        // Elevation reaches its home switch part way through
        if now_ms == 1500 {
            el_home.on_level_change(PinState::Low);
            positioner.set_speed(AxisId::Elevation, Speed::ZERO)?;
        }

        if gate.poll(now_ms) {
            let snapshot = positioner.snapshot()?;
            let elevation = snapshot.elevation.unwrap_or_default();
            println!(
                "t={:>5} ms  az={:06} home={:<5} leds={:03b}  el={:>6} home={:<5}",
                now_ms,
                snapshot.azimuth.position,
                snapshot.azimuth.home,
                snapshot.azimuth.indicator_bits(),
                elevation.position,
                elevation.home,
            );
        }
    }

    positioner.stop_all()?;
    println!(
        "\nStopped: az dir={} duty={}  el dir1={} dir2={} duty={}",
        az_bridge.dir1.get(),
        az_bridge.duty.get(),
        el_bridge.dir1.get(),
        el_bridge.dir2.get(),
        el_bridge.duty.get(),
    );

    Ok(())
}
