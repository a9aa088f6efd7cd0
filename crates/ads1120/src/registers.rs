use core::fmt;

/// AINP = AIN0, AINN = AIN1, gain 4, PGA enabled.
pub const CONFIG0_DEFAULT: u8 = 0x04;

/// 2000 SPS, turbo mode, single-shot conversions, temperature sensor and burn-out current sources off.
pub const CONFIG1_DEFAULT: u8 = 0xD0;

/// External reference on REFP0/REFN0, no 50/60 Hz rejection, power switch open, IDACs off.
pub const CONFIG2_DEFAULT: u8 = 0x40;

/// IDAC1 and IDAC2 disconnected, conversion ready signalled on the DRDY pin only.
pub const CONFIG3_DEFAULT: u8 = 0x00;

/// Configuration register list for the ADS1120
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    Config0 = 0,
    Config1 = 1,
    Config2 = 2,
    Config3 = 3,
}

impl Register {
    /// Iterate over all registers, in address order.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::Config0, Self::Config1, Self::Config2, Self::Config3].into_iter()
    }
}

/// Contents of the four configuration registers.
///
/// The bytes are passed through untouched; their bit fields are described in the ADS1120
/// datasheet. Displays as `04 D0 40 00`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    registers: [u8; 4],
}

impl Config {
    /// The configuration written by [`Ads1120::init`](crate::Ads1120::init) unless told otherwise.
    pub const DEFAULT: Self = Self::from_bytes([
        CONFIG0_DEFAULT,
        CONFIG1_DEFAULT,
        CONFIG2_DEFAULT,
        CONFIG3_DEFAULT,
    ]);

    pub const fn from_bytes(registers: [u8; 4]) -> Self {
        Self { registers }
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.registers
    }

    pub fn get(&self, reg: Register) -> u8 {
        self.registers[reg as usize]
    }

    pub fn set(&mut self, reg: Register, value: u8) {
        self.registers[reg as usize] = value;
    }

    /// Returns a copy with one register replaced.
    pub fn with(mut self, reg: Register, value: u8) -> Self {
        self.set(reg, value);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [reg0, reg1, reg2, reg3] = self.registers;
        write!(f, "{reg0:02X} {reg1:02X} {reg2:02X} {reg3:02X}")
    }
}
