//! Pin id to configuration lookup, built once per initialization.

use crate::hal::config::{PIN_ID_COUNT, PinConfig, PinId, PinMode, PortId};
use crate::hal::port::PinDirection;

/// What the driver keeps about a configured pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PinRecord {
    pub port: PortId,
    pub pin: u8,
    /// Direction from the configuration table, restored by a refresh.
    pub direction: PinDirection,
    pub direction_changeable: bool,
    pub mode_changeable: bool,
    /// Currently active function; updated by successful mode changes.
    pub mode: PinMode,
}

impl From<&PinConfig> for PinRecord {
    fn from(config: &PinConfig) -> Self {
        Self {
            port: config.port,
            pin: config.pin,
            direction: config.direction,
            direction_changeable: config.direction_changeable,
            mode_changeable: config.mode_changeable,
            mode: config.mode,
        }
    }
}

/// Direct-mapped table of [`PinRecord`]s keyed by [`PinId`].
#[derive(Debug, Clone)]
pub struct PinIndex {
    records: [Option<PinRecord>; PIN_ID_COUNT],
}

impl PinIndex {
    pub const fn new() -> Self {
        Self {
            records: [None; PIN_ID_COUNT],
        }
    }

    /// Record `config`, replacing any previous record for the same pin.
    pub fn insert(&mut self, config: &PinConfig) {
        if let Some(slot) = self.records.get_mut(config.id().index()) {
            *slot = Some(PinRecord::from(config));
        }
    }

    pub fn get(&self, pin: PinId) -> Option<&PinRecord> {
        self.records.get(pin.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, pin: PinId) -> Option<&mut PinRecord> {
        self.records.get_mut(pin.index()).and_then(Option::as_mut)
    }

    /// Configured pins in id order.
    pub fn iter(&self) -> impl Iterator<Item = &PinRecord> {
        self.records.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.records.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.records = [None; PIN_ID_COUNT];
    }
}

impl Default for PinIndex {
    fn default() -> Self {
        Self::new()
    }
}
