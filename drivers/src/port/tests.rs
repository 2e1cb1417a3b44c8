use super::*;
use crate::hal::port::{PinLevel, PullMode};
use crate::hw::tm4c123::gpio::{GPIO_UNLOCK_KEY, Register};
use crate::hw::tm4c123::model::{Access, RegisterModel};
use crate::platform::tm4c123::Tm4c123Port;
use common::det::{DetLog, LogSink};

type TestPort = Port<Tm4c123Port<RegisterModel>, DetLog<16>>;

fn port() -> TestPort {
    Port::new(Tm4c123Port::new(RegisterModel::new()), DetLog::new())
}

fn initialized(table: &ConfigTable) -> TestPort {
    let mut port = port();
    assert_eq!(port.init(table), Ok(()));
    port.pins_mut().bus_mut().clear_trace();
    port
}

fn model(port: &TestPort) -> &RegisterModel {
    port.pins().bus()
}

/// Check that exactly one report was made and that it carries `error` for
/// `service`.
#[track_caller]
fn assert_reported_once(port: &TestPort, service: ServiceId, error: PortError) {
    let det = port.det();
    if cfg!(feature = "dev-error-detect") {
        assert_eq!(det.total(), 1, "reports: {:?}", det.reports());
        let report = det.last().copied();
        assert_eq!(report.map(|r| r.module_id), Some(PORT_MODULE_ID));
        assert_eq!(report.map(|r| r.instance_id), Some(PORT_INSTANCE_ID));
        assert_eq!(report.map(|r| r.service_id), Some(service as u8));
        assert_eq!(report.map(|r| r.error_id), Some(error.error_id()));
    } else {
        assert!(det.is_empty());
    }
}

const FIXED_OUT: PinConfig = PinConfig::output(PortId::F, 0, PinLevel::High);
const FREE_OUT: PinConfig = PinConfig::output(PortId::A, 6, PinLevel::Low).with_changeable(true, true);
const FIXED_IN: PinConfig = PinConfig::input(PortId::B, 2, PullMode::Up);

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_applies_board_configuration() {
    let mut port = port();
    assert_eq!(port.init(&board::PORT_CONFIGURATION), Ok(()));
    assert!(port.is_initialized());
    assert!(port.det().is_empty());

    let m = model(&port);
    for cfg in &board::PORT_CONFIGURATION {
        let (p, n) = (cfg.port, cfg.pin);
        assert!(m.clock_enabled(p));
        assert_eq!(
            m.bit(p, Register::Dir, n),
            cfg.direction == PinDirection::Out,
            "{cfg:?}"
        );
        assert_eq!(m.bit(p, Register::Pur, n), cfg.resistor == PullMode::Up, "{cfg:?}");
        assert_eq!(m.bit(p, Register::Pdr, n), cfg.resistor == PullMode::Down, "{cfg:?}");
        if cfg.direction == PinDirection::Out {
            assert_eq!(
                m.bit(p, Register::Data, n),
                cfg.initial_level == PinLevel::High,
                "{cfg:?}"
            );
        }
        assert_eq!(m.bit(p, Register::Amsel, n), cfg.mode.is_analog(), "{cfg:?}");
        assert_eq!(m.bit(p, Register::Den, n), !cfg.mode.is_analog(), "{cfg:?}");
        assert_eq!(m.bit(p, Register::Afsel, n), cfg.mode.is_alternate(), "{cfg:?}");
        assert_eq!(m.pctl_field(p, n), cfg.mode.pctl(), "{cfg:?}");
        assert_eq!(port.current_mode(cfg.id()), Some(cfg.mode));
    }
    assert_eq!(port.index().len(), board::PORT_CONFIGURATION.len());
}

#[test]
fn init_unlocks_protected_pin_before_configuring_it() {
    let table = [FIXED_OUT];
    let mut port = port();
    assert_eq!(port.init(&table), Ok(()));

    let m = model(&port);
    let trace = m.trace();
    let lock = m.first_write(PortId::F, Register::Lock).unwrap();
    let commit = m.first_write(PortId::F, Register::Cr).unwrap();
    assert_eq!(
        trace[lock],
        Access::Write {
            port: PortId::F,
            reg: Register::Lock,
            value: GPIO_UNLOCK_KEY
        }
    );
    assert!(lock < commit);
    for reg in [
        Register::Pur,
        Register::Pdr,
        Register::Dir,
        Register::Den,
        Register::Amsel,
        Register::Afsel,
        Register::Pctl,
        Register::Data,
    ] {
        let first = m.first_write(PortId::F, reg).unwrap();
        assert!(commit < first, "{reg:?} written before commit");
    }

    assert!(m.bit(PortId::F, Register::Cr, 0));
    assert!(m.bit(PortId::F, Register::Dir, 0));
    assert!(m.bit(PortId::F, Register::Data, 0));
    assert!(m.bit(PortId::F, Register::Den, 0));
    assert!(!m.bit(PortId::F, Register::Amsel, 0));
}

#[test]
fn protected_pin_rejects_direction_change() {
    let mut port = initialized(&[FIXED_OUT]);

    assert_eq!(
        port.set_pin_direction(PinId::PF0, PinDirection::In),
        Err(PortError::DirectionUnchangeable)
    );
    assert!(model(&port).bit(PortId::F, Register::Dir, 0));
    assert!(model(&port).trace().is_empty());
    assert_reported_once(&port, ServiceId::SetPinDirection, PortError::DirectionUnchangeable);
}

#[test]
fn init_with_empty_table_is_rejected() {
    let mut port = port();
    assert_eq!(port.init(&[]), Err(PortError::ParamConfig));
    assert_eq!(port.state(), InitState::NotInitialized);
    assert!(model(&port).trace().is_empty());
    assert_reported_once(&port, ServiceId::Init, PortError::ParamConfig);
}

#[test]
fn init_with_empty_table_keeps_previous_configuration() {
    let mut port = initialized(&[FREE_OUT]);
    assert_eq!(port.init(&[]), Err(PortError::ParamConfig));
    assert!(port.is_initialized());
    assert!(port.index().get(FREE_OUT.id()).is_some());
}

#[test]
fn init_skips_invalid_entries() {
    let bad_pin = PinConfig { pin: 8, ..FIXED_IN };
    let table = [bad_pin, FIXED_IN, FREE_OUT];

    let mut port = port();
    assert_eq!(port.init(&table), Ok(()));
    assert!(port.is_initialized());
    assert_eq!(port.index().len(), 2);

    let m = model(&port);
    assert!(m.bit(PortId::B, Register::Pur, 2));
    assert!(m.bit(PortId::A, Register::Dir, 6));
    assert_reported_once(&port, ServiceId::Init, PortError::ParamConfig);
}

#[test]
fn init_skips_entry_with_invalid_mode() {
    let bad_mode = PinConfig::output(PortId::A, 2, PinLevel::Low).with_mode(PinMode(17));

    let mut port = port();
    assert_eq!(port.init(&[bad_mode, FIXED_IN]), Ok(()));
    assert!(port.index().get(PinId::PA2).is_none());
    assert_eq!(port.current_mode(PinId::PA2), None);

    let m = model(&port);
    for reg in [
        Register::Dir,
        Register::Afsel,
        Register::Den,
        Register::Pctl,
        Register::Data,
    ] {
        assert_eq!(m.writes_to(PortId::A, reg), 0, "{reg:?} written");
    }
    assert!(m.bit(PortId::B, Register::Pur, 2));
    assert_reported_once(&port, ServiceId::Init, PortError::ParamConfig);
}

#[test]
fn init_configures_debug_pins_through_unlock() {
    let pc0 = PinConfig::output(PortId::C, 0, PinLevel::High);

    let mut port = port();
    assert_eq!(port.init(&[pc0]), Ok(()));
    assert!(port.det().is_empty());
    assert_eq!(port.current_mode(PinId::PC0), Some(PinMode::DIO));

    let m = model(&port);
    let lock = m.first_write(PortId::C, Register::Lock).unwrap();
    let commit = m.first_write(PortId::C, Register::Cr).unwrap();
    let afsel = m.first_write(PortId::C, Register::Afsel).unwrap();
    assert!(lock < commit && commit < afsel);

    assert!(m.bit(PortId::C, Register::Dir, 0));
    assert!(m.bit(PortId::C, Register::Data, 0));
    assert!(m.bit(PortId::C, Register::Den, 0));
    assert!(!m.bit(PortId::C, Register::Pur, 0));
    assert!(!m.bit(PortId::C, Register::Afsel, 0));
    assert_eq!(m.pctl_field(PortId::C, 0), 0);
    // The other debug pins keep their reset function.
    assert!(m.bit(PortId::C, Register::Afsel, 1));
    assert_eq!(m.pctl_field(PortId::C, 1), 1);
}

#[test]
fn reinit_reapplies_everything() {
    let mut port = initialized(&[FIXED_OUT, FREE_OUT]);
    assert_eq!(port.set_pin_direction(FREE_OUT.id(), PinDirection::In), Ok(()));
    assert_eq!(port.set_pin_mode(FREE_OUT.id(), PinMode::UART), Ok(()));

    assert_eq!(port.init(&[FIXED_OUT, FREE_OUT]), Ok(()));

    let m = model(&port);
    assert_eq!(m.writes_to(PortId::F, Register::Lock), 1);
    assert!(m.bit(PortId::A, Register::Dir, 6));
    assert!(!m.bit(PortId::A, Register::Afsel, 6));
    assert_eq!(port.current_mode(FREE_OUT.id()), Some(PinMode::DIO));
}

#[test]
fn reinit_forgets_pins_missing_from_new_table() {
    let mut port = initialized(&[FIXED_OUT, FREE_OUT]);
    assert_eq!(port.init(&[FIXED_OUT]), Ok(()));
    assert_eq!(
        port.set_pin_direction(FREE_OUT.id(), PinDirection::In),
        Err(PortError::ParamPin)
    );
}

// ---------------------------------------------------------------------------
// Uninitialized driver
// ---------------------------------------------------------------------------

#[test]
fn set_pin_direction_before_init() {
    let mut port = port();
    assert_eq!(
        port.set_pin_direction(PinId::PA6, PinDirection::Out),
        Err(PortError::Uninit)
    );
    assert!(model(&port).trace().is_empty());
    assert_reported_once(&port, ServiceId::SetPinDirection, PortError::Uninit);
}

#[test]
fn refresh_before_init() {
    let mut port = port();
    assert_eq!(port.refresh_port_direction(), Err(PortError::Uninit));
    assert!(model(&port).trace().is_empty());
    assert_reported_once(&port, ServiceId::RefreshPortDirection, PortError::Uninit);
}

#[test]
fn set_pin_mode_before_init() {
    let mut port = port();
    // Uninit wins over every parameter check.
    assert_eq!(port.set_pin_mode(PinId(99), PinMode(200)), Err(PortError::Uninit));
    assert!(model(&port).trace().is_empty());
    assert_reported_once(&port, ServiceId::SetPinMode, PortError::Uninit);
}

// ---------------------------------------------------------------------------
// set_pin_direction
// ---------------------------------------------------------------------------

#[test]
fn set_pin_direction_unknown_pin() {
    let mut port = initialized(&[FREE_OUT]);
    assert_eq!(
        port.set_pin_direction(PinId::PA7, PinDirection::In),
        Err(PortError::ParamPin)
    );
    assert_eq!(
        port.det().last().map(|r| r.error_id),
        cfg!(feature = "dev-error-detect").then_some(PortError::ParamPin.error_id())
    );
    assert!(model(&port).trace().is_empty());
}

#[test]
fn set_pin_direction_out_of_range_id() {
    let mut port = initialized(&[FREE_OUT]);
    assert_eq!(
        port.set_pin_direction(PinId(48), PinDirection::In),
        Err(PortError::ParamPin)
    );
    assert_reported_once(&port, ServiceId::SetPinDirection, PortError::ParamPin);
}

#[test]
fn set_pin_direction_changeable_pin() {
    let mut port = initialized(&[FIXED_IN, FREE_OUT]);

    assert_eq!(port.set_pin_direction(FREE_OUT.id(), PinDirection::In), Ok(()));
    assert!(!model(&port).bit(PortId::A, Register::Dir, 6));

    assert_eq!(port.set_pin_direction(FREE_OUT.id(), PinDirection::Out), Ok(()));
    assert!(model(&port).bit(PortId::A, Register::Dir, 6));
    assert!(port.det().is_empty());
}

#[test]
fn set_pin_direction_unchangeable_pin() {
    let mut port = initialized(&[FIXED_IN]);
    assert_eq!(
        port.set_pin_direction(FIXED_IN.id(), PinDirection::Out),
        Err(PortError::DirectionUnchangeable)
    );
    assert!(!model(&port).bit(PortId::B, Register::Dir, 2));
    assert_reported_once(&port, ServiceId::SetPinDirection, PortError::DirectionUnchangeable);
}

// ---------------------------------------------------------------------------
// refresh_port_direction
// ---------------------------------------------------------------------------

#[test]
fn refresh_restores_fixed_pins_only() {
    let mut port = initialized(&[FIXED_OUT, FIXED_IN, FREE_OUT]);

    assert_eq!(port.set_pin_direction(FREE_OUT.id(), PinDirection::In), Ok(()));
    // Tamper with the fixed pins behind the driver's back.
    let bus = port.pins_mut().bus_mut();
    bus.poke(PortId::F, Register::Dir, 0x00);
    bus.poke(PortId::B, Register::Dir, 0xFF);

    assert_eq!(port.refresh_port_direction(), Ok(()));

    let m = model(&port);
    assert!(m.bit(PortId::F, Register::Dir, 0));
    assert!(!m.bit(PortId::B, Register::Dir, 2));
    // Neighbours of the refreshed pin are left as found.
    assert_eq!(m.reg(PortId::B, Register::Dir), 0xFB);
    // The changeable pin keeps its runtime direction.
    assert!(!m.bit(PortId::A, Register::Dir, 6));
    assert_eq!(m.writes_to(PortId::A, Register::Dir), 1);
    assert!(port.det().is_empty());
}

#[test]
fn refresh_does_not_touch_mode() {
    let changeable_mode = PinConfig::output(PortId::F, 1, PinLevel::Low).with_changeable(false, true);
    let mut port = initialized(&[changeable_mode]);

    assert_eq!(port.set_pin_mode(PinId::PF1, PinMode::M1PWM), Ok(()));
    assert_eq!(port.refresh_port_direction(), Ok(()));

    let m = model(&port);
    assert_eq!(m.pctl_field(PortId::F, 1), 5);
    assert!(m.bit(PortId::F, Register::Afsel, 1));
    assert_eq!(port.current_mode(PinId::PF1), Some(PinMode::M1PWM));
}

// ---------------------------------------------------------------------------
// set_pin_mode
// ---------------------------------------------------------------------------

#[test]
fn set_pin_mode_changes_function() {
    let mut port = initialized(&[FREE_OUT]);

    assert_eq!(port.set_pin_mode(FREE_OUT.id(), PinMode::I2C), Ok(()));
    let m = model(&port);
    assert_eq!(m.pctl_field(PortId::A, 6), 3);
    assert!(m.bit(PortId::A, Register::Afsel, 6));
    assert!(m.bit(PortId::A, Register::Den, 6));
    assert_eq!(port.current_mode(FREE_OUT.id()), Some(PinMode::I2C));

    assert_eq!(port.set_pin_mode(FREE_OUT.id(), PinMode::ANALOG), Ok(()));
    let m = model(&port);
    assert!(m.bit(PortId::A, Register::Amsel, 6));
    assert!(!m.bit(PortId::A, Register::Den, 6));
    assert_eq!(m.pctl_field(PortId::A, 6), 0);
    assert!(port.det().is_empty());
}

#[test]
fn set_pin_mode_unknown_pin() {
    let mut port = initialized(&[FREE_OUT]);
    // Pin is checked before the mode.
    assert_eq!(port.set_pin_mode(PinId::PE0, PinMode(42)), Err(PortError::ParamPin));
    assert_reported_once(&port, ServiceId::SetPinMode, PortError::ParamPin);
}

#[test]
fn set_pin_mode_invalid_mode() {
    let mut port = initialized(&[FREE_OUT]);
    assert_eq!(
        port.set_pin_mode(FREE_OUT.id(), PinMode(17)),
        Err(PortError::ParamInvalidMode)
    );
    assert!(model(&port).trace().is_empty());
    assert_eq!(port.current_mode(FREE_OUT.id()), Some(PinMode::DIO));
    assert_reported_once(&port, ServiceId::SetPinMode, PortError::ParamInvalidMode);
}

#[test]
fn set_pin_mode_unchangeable_pin() {
    let mut port = initialized(&[FIXED_IN]);
    assert_eq!(
        port.set_pin_mode(FIXED_IN.id(), PinMode::UART),
        Err(PortError::ModeUnchangeable)
    );
    assert!(model(&port).trace().is_empty());
    assert_eq!(port.current_mode(FIXED_IN.id()), Some(PinMode::DIO));
    assert_reported_once(&port, ServiceId::SetPinMode, PortError::ModeUnchangeable);
}

#[test]
fn set_pin_mode_on_locked_pin_unlocks_first() {
    let nmi = PinConfig::input(PortId::D, 7, PullMode::None).with_changeable(false, true);
    let mut port = initialized(&[nmi]);

    assert_eq!(port.set_pin_mode(PinId::PD7, PinMode::CAN), Ok(()));
    let m = model(&port);
    assert_eq!(m.first_write(PortId::D, Register::Lock), Some(0));
    assert_eq!(m.pctl_field(PortId::D, 7), 8);
    assert!(m.bit(PortId::D, Register::Afsel, 7));
}

// ---------------------------------------------------------------------------
// get_version_info
// ---------------------------------------------------------------------------

#[test]
fn version_info_without_destination() {
    let mut port = port();
    assert_eq!(port.get_version_info(None), Err(PortError::ParamPointer));
    assert_reported_once(&port, ServiceId::GetVersionInfo, PortError::ParamPointer);
}

#[test]
fn version_info_is_stable_and_needs_no_init() {
    let mut port = port();
    let mut first = VersionInfo::default();
    assert_eq!(port.get_version_info(Some(&mut first)), Ok(()));
    assert_eq!(first.vendor_id, 1000);
    assert_eq!(first.module_id, 120);
    assert_eq!(first.instance_id, 0);
    assert_eq!(
        (first.sw_major_version, first.sw_minor_version, first.sw_patch_version),
        (1, 0, 0)
    );

    assert_eq!(port.init(&board::PORT_CONFIGURATION), Ok(()));
    let mut second = VersionInfo::default();
    assert_eq!(port.get_version_info(Some(&mut second)), Ok(()));
    assert_eq!(first, second);
    assert_eq!(TestPort::version_info(), first);
    assert!(port.det().is_empty());
}

// ---------------------------------------------------------------------------
// Borrowed collaborators
// ---------------------------------------------------------------------------

#[test]
fn works_with_borrowed_bus_and_sink() {
    let mut model = RegisterModel::new();
    let mut det = DetLog::<4>::new();
    {
        let mut port = Port::new(Tm4c123Port::new(&mut model), &mut det);
        assert_eq!(port.init(&[FREE_OUT]), Ok(()));
        assert_eq!(
            port.set_pin_direction(PinId::PB0, PinDirection::In),
            Err(PortError::ParamPin)
        );
    }
    assert!(model.bit(PortId::A, Register::Dir, 6));
    assert_eq!(det.total(), usize::from(cfg!(feature = "dev-error-detect")));
}

#[test]
fn log_sink_still_returns_errors() {
    let mut port = Port::new(Tm4c123Port::new(RegisterModel::new()), LogSink);
    assert_eq!(
        port.set_pin_mode(PinId::PF1, PinMode::DIO),
        Err(PortError::Uninit)
    );
    assert_eq!(port.init(&board::PORT_CONFIGURATION), Ok(()));
    assert_eq!(
        port.set_pin_direction(PinId::PF2, PinDirection::In),
        Err(PortError::DirectionUnchangeable)
    );
    assert!(port.pins().bus().bit(PortId::F, Register::Dir, 2));
}
