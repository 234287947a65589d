//! # Pilot heater simulator
//!
//! Runs the regulator against a first-order model of a room on the host,
//! faster than real time, and prints the telemetry as JSON lines.
//!
//! ```text
//! pilot-heater [HOURS] [SETPOINT] [SETTINGS.json]
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::process::ExitCode;

use fugit::ExtU32;
use log::{error, info};

use pilot_heater::pilot_wire::{PilotOrder, PilotWire};
use pilot_heater::scheduler::{Instant, Scheduler};
use pilot_heater::{HeatingRegulator, Mode, Settings};

/// Outside temperature in °C.
const OUTSIDE: f32 = 5.0;
/// Thermal time constant of the room in seconds.
const ROOM_TAU: f32 = 3.0 * 3600.0;
/// Warming rate of the room with the heater on, in K/s.
const HEAT_RATE: f32 = 0.002;
/// Simulation step in milliseconds.
const STEP_MS: u32 = 100;

/// Pilot wire recording whether the heater runs.
#[derive(Default)]
struct SimulatedWire {
    order: Option<PilotOrder>,
}

impl PilotWire for SimulatedWire {
    fn set_order(&mut self, order: PilotOrder) {
        if self.order != Some(order) {
            let pins = order.pins();
            log::trace!(
                "Pilot wire: {} (antifreeze {}, stop {})",
                order.as_ref(),
                pins.antifreeze.as_ref(),
                pins.stop.as_ref()
            );
        }
        self.order = Some(order);
    }
}

impl SimulatedWire {
    fn heating(&self) -> bool {
        self.order.is_some_and(PilotOrder::is_heating)
    }
}

/// Room with a heater and a noisy sensor.
struct Room {
    temperature: f32,
    noise: u32,
}

impl Room {
    fn new(temperature: f32) -> Self {
        Self {
            temperature,
            noise: 0x2545_f491,
        }
    }

    fn step(&mut self, heating: bool, dt: f32) {
        let mut rate = (OUTSIDE - self.temperature) / ROOM_TAU;
        if heating {
            rate += HEAT_RATE;
        }
        self.temperature += rate * dt;
    }

    /// Sensor reading with ±0.1 K of noise.
    fn measure(&mut self) -> f32 {
        // xorshift32
        self.noise ^= self.noise << 13;
        self.noise ^= self.noise >> 17;
        self.noise ^= self.noise << 5;
        let unit = self.noise as f32 / u32::MAX as f32;
        self.temperature + (unit - 0.5) * 0.2
    }
}

struct Args {
    hours: u32,
    setpoint: f32,
    settings: Settings,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let hours = match args.next() {
        Some(arg) => arg.parse().map_err(|e| format!("hours {arg:?}: {e}"))?,
        None => 6,
    };
    let setpoint = match args.next() {
        Some(arg) => arg
            .parse()
            .map_err(|e| format!("setpoint {arg:?}: {e}"))?,
        None => 20.0,
    };
    let settings = match args.next() {
        Some(path) => {
            let json = std::fs::read(&path)
                .map_err(|e| format!("settings {path:?}: {e}"))?;
            let (settings, _) = serde_json_core::from_slice::<Settings>(&json)
                .map_err(|e| format!("settings {path:?}: {e:?}"))?;
            settings
        }
        None => Settings {
            mode: Mode::Auto,
            ..Default::default()
        },
    };
    if hours == 0 || hours > 1000 {
        return Err(format!("hours must be in 1..=1000, got {hours}"));
    }
    Ok(Args {
        hours,
        setpoint,
        settings,
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let settings = args.settings;
    let config = match settings.config() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut regulator = match HeatingRegulator::new(&settings, SimulatedWire::default()) {
        Ok(regulator) => regulator,
        Err(e) => {
            error!("Invalid settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut scheduler = Scheduler::<3>::new();
    let tasks = [
        scheduler.register(0.millis(), config.slot_duration()),
        scheduler.register(0.millis(), config.measurement_period()),
        scheduler.register(
            settings.telemetry_period_ms.millis(),
            settings.telemetry_period_ms.millis(),
        ),
    ];
    let [Ok(slot), Ok(measure), Ok(report)] = tasks else {
        error!("Scheduler capacity exceeded");
        return ExitCode::FAILURE;
    };

    info!(
        "Simulating {} h, setpoint {:.1} °C, cycle {} s",
        args.hours,
        args.setpoint,
        config.cycle_duration().to_secs()
    );

    let mut room = Room::new(settings.default_temperature);
    regulator.set_setpoint(args.setpoint);
    regulator.set_mode(settings.mode);

    let end = args.hours * 3_600_000;
    let mut now: u32 = 0;
    scheduler.start(Instant::from_ticks(now));
    while now < end {
        scheduler.poll(Instant::from_ticks(now), |task| {
            if task == slot {
                regulator.tick();
            } else if task == measure {
                let reading = settings.calibrate(room.measure());
                regulator.observe_temperature(reading);
            } else if task == report {
                match regulator.telemetry().to_json::<512>() {
                    Ok(json) => {
                        println!(
                            "{{\"t\":{},\"room\":{:.2},\"status\":{}}}",
                            now / 1000,
                            room.temperature,
                            String::from_utf8_lossy(&json)
                        );
                    }
                    Err(e) => error!("Telemetry encoding failed: {e:?}"),
                }
            }
        });
        room.step(regulator.pilot_wire().heating(), STEP_MS as f32 / 1000.0);
        now += STEP_MS;
    }

    info!(
        "Done: room {:.2} °C, load {:.1} % / {:.1} % / {:.1} %",
        room.temperature,
        regulator.short_term_energy(),
        regulator.medium_term_energy(),
        regulator.long_term_energy()
    );
    ExitCode::SUCCESS
}
