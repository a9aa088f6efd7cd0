//! Provides a driver for a Texas Instruments ADS1120 16-bit ADC via the `embedded-hal` ecosystem.
//!
//! The chip is driven through an [`SpiDevice`], which owns the chip-select line and gives each
//! protocol operation exclusive use of the bus. Configure the bus with [`SPI_FREQUENCY_HZ`] and
//! [`SPI_MODE`] (MSB first) before handing it over.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

use core::fmt;

use embedded_hal::spi::{Mode, Operation, SpiDevice, MODE_1};

mod ads1120;
mod registers;

pub use ads1120::Ads1120;
pub use registers::{
    Config, Register, CONFIG0_DEFAULT, CONFIG1_DEFAULT, CONFIG2_DEFAULT, CONFIG3_DEFAULT,
};

/// SPI clock rate the chip is driven at.
pub const SPI_FREQUENCY_HZ: u32 = 4_096_000;

/// SPI mode 1, aka (0, 1): clock idles low, data is sampled on the trailing edge.
pub const SPI_MODE: Mode = MODE_1;

/// Minimum time from chip select going low to the first clock edge, td(CSSC).
pub(crate) const CS_SETUP_NS: u32 = 1_000;

/// Minimum time from the last clock edge to chip select going high, td(SCCS).
pub(crate) const CS_HOLD_NS: u32 = 1_000;

/// Settling time after a reset and after a new configuration has been written.
pub(crate) const SETTLE_MS: u32 = 100;

pub(crate) const RREG: u8 = 0x20;
pub(crate) const WREG: u8 = 0x40;

/// Clocked out whenever only the response matters.
pub(crate) const DUMMY: u8 = 0xFF;

/// Single-byte commands. The chip sends nothing back for these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Return every register to its power-on value.
    Reset = 0x06,
    /// Start a conversion, or restart the running one in continuous mode.
    StartSync = 0x08,
    /// Enter power-down mode.
    PowerDown = 0x02,
}

/// Errors raised by [`Ads1120::init_verified`].
#[derive(Debug, PartialEq)]
pub enum Error<E> {
    /// An error occurred on the underlying SPI device.
    Spi(E),
    /// The registers read back after initialization differ from the ones written.
    ConfigMismatch {
        written: Config,
        read: Config,
    },
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::Spi(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Spi(error) => write!(f, "SPI error: {error:?}"),
            Error::ConfigMismatch { written, read } => {
                write!(f, "config readback mismatch: wrote {written}, read {read}")
            }
        }
    }
}

/// Opcode byte for a write to a single register.
pub const fn write_opcode(reg: Register) -> u8 {
    WREG | ((reg as u8 & 0b11) << 2)
}

/// Opcode byte for a read of a single register.
pub const fn read_opcode(reg: Register) -> u8 {
    RREG | ((reg as u8 & 0b11) << 2)
}

/// Assembles a conversion result, which the chip shifts out MSB first.
pub fn sample_from_be_bytes(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes)
}

/// Wraps the given operations in the chip-select setup and hold delays.
macro_rules! framed {
    ($($op:expr),+ $(,)?) => {
        [
            Operation::DelayNs($crate::CS_SETUP_NS),
            $($op,)+
            Operation::DelayNs($crate::CS_HOLD_NS),
        ]
    };
}

pub(crate) fn send_command<SPI: SpiDevice>(spi: &mut SPI, command: Command) -> Result<(), SPI::Error> {
    spi.transaction(&mut framed![Operation::Write(&[command as u8])])
}

pub(crate) fn write_register<SPI: SpiDevice>(
    spi: &mut SPI,
    reg: Register,
    value: u8,
) -> Result<(), SPI::Error> {
    spi.transaction(&mut framed![Operation::Write(&[write_opcode(reg), value])])
}

pub(crate) fn read_register<SPI: SpiDevice>(spi: &mut SPI, reg: Register) -> Result<u8, SPI::Error> {
    let mut value = [0];

    spi.transaction(&mut framed![
        Operation::Write(&[read_opcode(reg)]),
        // The register arrives while the dummy byte goes out
        Operation::Transfer(&mut value, &[DUMMY]),
    ])?;

    Ok(value[0])
}

pub(crate) fn read_sample<SPI: SpiDevice>(spi: &mut SPI) -> Result<i16, SPI::Error> {
    let mut buffer = [DUMMY; 2];

    spi.transaction(&mut framed![Operation::TransferInPlace(&mut buffer)])?;

    Ok(sample_from_be_bytes(buffer))
}
