use pilot_heater::pilot_wire::{PilotOrder, PilotWire};
use pilot_heater::scheduler::{Instant, Scheduler};
use pilot_heater::{HeatingRegulator, Mode, Settings};

use fugit::ExtU32;

/// Wire counting the slots spent in comfort.
#[derive(Default)]
struct Recorder {
    order: Option<PilotOrder>,
    comfort: usize,
}

impl PilotWire for Recorder {
    fn set_order(&mut self, order: PilotOrder) {
        if order.is_heating() {
            self.comfort += 1;
        }
        self.order = Some(order);
    }
}

fn regulator(settings: &Settings) -> HeatingRegulator<Recorder> {
    HeatingRegulator::new(settings, Recorder::default()).unwrap()
}

#[test]
fn cold_room_runs_the_full_cycle() {
    for default_temperature in [18.0, 19.0] {
        let settings = Settings {
            default_temperature,
            ..Default::default()
        };
        let mut regulator = regulator(&settings);
        regulator.set_setpoint(20.0);
        regulator.observe_temperature(18.0);
        regulator.set_mode(Mode::Auto);

        assert!(regulator.tick());
        assert_eq!(regulator.integral_component(), 2.0);
        assert_eq!(regulator.derivative(), 18.0 - default_temperature);
        assert_eq!(regulator.actual_pwm(), 30);
        for _ in 1..30 {
            assert!(regulator.tick());
        }
        assert_eq!(regulator.pilot_wire().comfort, 30);
        assert_eq!(regulator.slot_counter(), 0);
    }
}

#[test]
fn steady_cold_room_duty() {
    // error 2, integral 2, derivative 0: 48 + 1 + 15.5 = 64.5
    let settings = Settings {
        default_temperature: 18.0,
        ..Default::default()
    };
    let mut regulator = regulator(&settings);
    regulator.set_setpoint(20.0);
    for _ in 0..5 {
        regulator.observe_temperature(18.0);
    }
    regulator.set_mode(Mode::Auto);
    regulator.tick();
    assert_eq!(regulator.integral_component(), 2.0);
    assert_eq!(regulator.derivative(), 0.0);
    assert_eq!(regulator.mean_room_temperature(), 18.0);
    assert_eq!(regulator.telemetry().pwm, 30);
}

#[test]
fn temperature_mean_follows_the_window() {
    let mut regulator = regulator(&Settings::default());
    for temperature in [18.0, 19.0, 20.0, 21.0, 22.0] {
        regulator.observe_temperature(temperature);
    }
    assert_eq!(regulator.mean_room_temperature(), 20.0);
    regulator.observe_temperature(23.0);
    assert_eq!(regulator.mean_room_temperature(), 21.0);
}

#[test]
fn full_load_reaches_every_level() {
    let mut regulator = regulator(&Settings::default());
    regulator.observe_temperature(10.0);
    regulator.set_setpoint(25.0);
    regulator.set_mode(Mode::Auto);

    // Two hours of 1 s slots fill the medium window.
    for _ in 0..600 * 12 {
        assert!(regulator.tick());
    }
    assert_eq!(regulator.short_term_energy(), 100.0);
    assert_eq!(regulator.medium_term_energy(), 100.0);
    assert_eq!(regulator.long_term_energy(), 100.0);
    assert_eq!(regulator.history().depth(), (12, 1));
}

#[test]
fn eco_slots_are_accounted_as_off() {
    let mut regulator = regulator(&Settings::default());
    regulator.observe_temperature(10.0);
    regulator.set_setpoint(25.0);
    regulator.set_mode(Mode::Auto);
    for _ in 0..300 {
        regulator.tick();
    }
    regulator.set_mode(Mode::Eco);
    regulator.set_mode(Mode::Eco);
    for _ in 0..300 {
        assert!(!regulator.tick());
    }
    assert_eq!(regulator.pilot_wire().order, Some(PilotOrder::Eco));
    assert_eq!(regulator.short_term_energy(), 50.0);
    assert_eq!(regulator.medium_term_energy(), 50.0);
}

#[test]
fn integral_never_exceeds_half_a_cycle() {
    let mut regulator = regulator(&Settings::default());
    regulator.observe_temperature(5.0);
    regulator.set_setpoint(22.0);
    regulator.set_mode(Mode::Auto);
    for _ in 0..30 * 100 {
        regulator.tick();
        assert!((regulator.integral_component() * 0.5).abs() <= 15.0);
    }

    // Once warm the heater is stopped from the next cycle on.
    for _ in 0..5 {
        regulator.observe_temperature(24.0);
    }
    for _ in 0..30 {
        regulator.tick();
    }
    assert_eq!(regulator.actual_pwm(), 0);
}

#[test]
fn scheduled_slots_and_measurements() {
    let settings = Settings::default();
    let config = settings.config().unwrap();
    let mut regulator = regulator(&settings);
    regulator.set_setpoint(20.0);
    regulator.set_mode(Mode::Auto);

    let mut scheduler = Scheduler::<2>::new();
    let slot = scheduler.register(0.millis(), config.slot_duration()).unwrap();
    let measure = scheduler
        .register(0.millis(), config.measurement_period())
        .unwrap();
    scheduler.start(Instant::from_ticks(0));

    let mut measurements = 0;
    for now in (0..60_000).step_by(100) {
        scheduler.poll(Instant::from_ticks(now), |task| {
            if task == slot {
                regulator.tick();
            } else if task == measure {
                measurements += 1;
                regulator.observe_temperature(17.0);
            }
        });
    }
    assert_eq!(measurements, 10);
    assert_eq!(regulator.history().slots().size(), 60);
    assert_eq!(regulator.slot_counter(), 0);
    assert_eq!(regulator.actual_pwm(), 30);
}
