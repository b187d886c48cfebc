//! Printer status and attribute bitmask decoding
//!
//! The spooler reports printer state as a `PRINTER_STATUS_*` bitmask and
//! capabilities as a `PRINTER_ATTRIBUTE_*` bitmask. The constants are mirrored
//! here so decoding works (and is tested) on every platform.

use serde::Serialize;

pub const PRINTER_STATUS_PAUSED: u32 = 0x0000_0001;
pub const PRINTER_STATUS_ERROR: u32 = 0x0000_0002;
pub const PRINTER_STATUS_PENDING_DELETION: u32 = 0x0000_0004;
pub const PRINTER_STATUS_PAPER_JAM: u32 = 0x0000_0008;
pub const PRINTER_STATUS_PAPER_OUT: u32 = 0x0000_0010;
pub const PRINTER_STATUS_MANUAL_FEED: u32 = 0x0000_0020;
pub const PRINTER_STATUS_PAPER_PROBLEM: u32 = 0x0000_0040;
pub const PRINTER_STATUS_OFFLINE: u32 = 0x0000_0080;
pub const PRINTER_STATUS_IO_ACTIVE: u32 = 0x0000_0100;
pub const PRINTER_STATUS_BUSY: u32 = 0x0000_0200;
pub const PRINTER_STATUS_PRINTING: u32 = 0x0000_0400;
pub const PRINTER_STATUS_OUTPUT_BIN_FULL: u32 = 0x0000_0800;
pub const PRINTER_STATUS_NOT_AVAILABLE: u32 = 0x0000_1000;
pub const PRINTER_STATUS_WAITING: u32 = 0x0000_2000;
pub const PRINTER_STATUS_PROCESSING: u32 = 0x0000_4000;
pub const PRINTER_STATUS_INITIALIZING: u32 = 0x0000_8000;
pub const PRINTER_STATUS_WARMING_UP: u32 = 0x0001_0000;
pub const PRINTER_STATUS_TONER_LOW: u32 = 0x0002_0000;
pub const PRINTER_STATUS_NO_TONER: u32 = 0x0004_0000;
pub const PRINTER_STATUS_PAGE_PUNT: u32 = 0x0008_0000;
pub const PRINTER_STATUS_USER_INTERVENTION: u32 = 0x0010_0000;
pub const PRINTER_STATUS_OUT_OF_MEMORY: u32 = 0x0020_0000;
pub const PRINTER_STATUS_DOOR_OPEN: u32 = 0x0040_0000;
pub const PRINTER_STATUS_SERVER_UNKNOWN: u32 = 0x0080_0000;
pub const PRINTER_STATUS_POWER_SAVE: u32 = 0x0100_0000;
pub const PRINTER_STATUS_SERVER_OFFLINE: u32 = 0x0200_0000;
pub const PRINTER_STATUS_DRIVER_UPDATE_NEEDED: u32 = 0x0400_0000;

pub const PRINTER_ATTRIBUTE_SHARED: u32 = 0x0000_0008;
pub const PRINTER_ATTRIBUTE_NETWORK: u32 = 0x0000_0010;
pub const PRINTER_ATTRIBUTE_LOCAL: u32 = 0x0000_0040;

/// Bits that describe a transient low-power state rather than a fault
const TRANSIENT_READY_BITS: u32 = PRINTER_STATUS_POWER_SAVE | PRINTER_STATUS_WARMING_UP;

/// Named status condition decoded from a status bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFlag {
    Paused,
    Error,
    PendingDeletion,
    PaperJam,
    PaperOut,
    ManualFeed,
    PaperProblem,
    Offline,
    IoActive,
    Busy,
    Printing,
    OutputBinFull,
    NotAvailable,
    Waiting,
    Processing,
    Initializing,
    WarmingUp,
    TonerLow,
    NoToner,
    PagePunt,
    UserIntervention,
    OutOfMemory,
    DoorOpen,
    ServerUnknown,
    PowerSave,
    ServerOffline,
    DriverUpdateNeeded,
}

/// Status flags in bit order
const STATUS_FLAGS: [(u32, StatusFlag); 27] = [
    (PRINTER_STATUS_PAUSED, StatusFlag::Paused),
    (PRINTER_STATUS_ERROR, StatusFlag::Error),
    (PRINTER_STATUS_PENDING_DELETION, StatusFlag::PendingDeletion),
    (PRINTER_STATUS_PAPER_JAM, StatusFlag::PaperJam),
    (PRINTER_STATUS_PAPER_OUT, StatusFlag::PaperOut),
    (PRINTER_STATUS_MANUAL_FEED, StatusFlag::ManualFeed),
    (PRINTER_STATUS_PAPER_PROBLEM, StatusFlag::PaperProblem),
    (PRINTER_STATUS_OFFLINE, StatusFlag::Offline),
    (PRINTER_STATUS_IO_ACTIVE, StatusFlag::IoActive),
    (PRINTER_STATUS_BUSY, StatusFlag::Busy),
    (PRINTER_STATUS_PRINTING, StatusFlag::Printing),
    (PRINTER_STATUS_OUTPUT_BIN_FULL, StatusFlag::OutputBinFull),
    (PRINTER_STATUS_NOT_AVAILABLE, StatusFlag::NotAvailable),
    (PRINTER_STATUS_WAITING, StatusFlag::Waiting),
    (PRINTER_STATUS_PROCESSING, StatusFlag::Processing),
    (PRINTER_STATUS_INITIALIZING, StatusFlag::Initializing),
    (PRINTER_STATUS_WARMING_UP, StatusFlag::WarmingUp),
    (PRINTER_STATUS_TONER_LOW, StatusFlag::TonerLow),
    (PRINTER_STATUS_NO_TONER, StatusFlag::NoToner),
    (PRINTER_STATUS_PAGE_PUNT, StatusFlag::PagePunt),
    (PRINTER_STATUS_USER_INTERVENTION, StatusFlag::UserIntervention),
    (PRINTER_STATUS_OUT_OF_MEMORY, StatusFlag::OutOfMemory),
    (PRINTER_STATUS_DOOR_OPEN, StatusFlag::DoorOpen),
    (PRINTER_STATUS_SERVER_UNKNOWN, StatusFlag::ServerUnknown),
    (PRINTER_STATUS_POWER_SAVE, StatusFlag::PowerSave),
    (PRINTER_STATUS_SERVER_OFFLINE, StatusFlag::ServerOffline),
    (PRINTER_STATUS_DRIVER_UPDATE_NEEDED, StatusFlag::DriverUpdateNeeded),
];

/// Raw printer status bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrinterStatus(pub u32);

impl PrinterStatus {
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Ready when no bits are set, or only power-save / warming-up bits
    pub fn is_ready(self) -> bool {
        self.0 & !TRANSIENT_READY_BITS == 0
    }

    pub fn contains(self, bit: u32) -> bool {
        self.0 & bit == bit
    }

    /// Decode the known bits into named flags; unknown bits are ignored
    pub fn flags(self) -> Vec<StatusFlag> {
        STATUS_FLAGS
            .iter()
            .filter(|(bit, _)| self.0 & bit != 0)
            .map(|(_, flag)| *flag)
            .collect()
    }
}

/// Raw printer attribute bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrinterAttributes(pub u32);

impl PrinterAttributes {
    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_network(self) -> bool {
        self.0 & PRINTER_ATTRIBUTE_NETWORK != 0
    }
}
