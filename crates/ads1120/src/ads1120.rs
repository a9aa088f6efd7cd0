use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use embedded_hal::spi::SpiDevice;

use crate::{Command, Config, Error, Register, SETTLE_MS};

/// ADS1120 driver
pub struct Ads1120<SPI, DRDY> {
    spi: SPI,
    drdy: DRDY,
    requested: Config,
    config: Config,
    sample: i16,
}

impl<SPI: SpiDevice, DRDY: InputPin> Ads1120<SPI, DRDY> {
    /// Creates a new driver which will apply [`Config::DEFAULT`] on [`init`](Self::init).
    /// The SPI device must run at [`SPI_FREQUENCY_HZ`](crate::SPI_FREQUENCY_HZ) in
    /// [`SPI_MODE`](crate::SPI_MODE), MSB first, and keep chip select high while idle.
    pub fn new(spi: SPI, drdy: DRDY) -> Self {
        Self::with_config(spi, drdy, Config::DEFAULT)
    }

    /// Creates a new driver which will apply `config` on [`init`](Self::init).
    pub fn with_config(spi: SPI, drdy: DRDY, config: Config) -> Self {
        Self {
            spi,
            drdy,
            requested: config,
            config,
            sample: 0,
        }
    }

    /// Resets the chip, writes the configuration and reads it back.
    ///
    /// Whatever the chip returns becomes [`config`](Self::config), even if it differs from what
    /// was written. A difference is only logged; use [`init_verified`](Self::init_verified) to
    /// turn it into an error. Blocks for a little over 200 ms.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), SPI::Error> {
        self.reset()?;

        delay.delay_ms(SETTLE_MS);

        let requested = self.requested;
        for reg in Register::all() {
            self.write_register(reg, requested.get(reg))?;
        }

        let config = self.read_config()?;

        log::info!("Config reg : {config}");

        if config != requested {
            log::warn!("ADS1120 kept {config} after being written {requested}");
        }

        delay.delay_ms(SETTLE_MS);

        Ok(())
    }

    /// Like [`init`](Self::init), but fails if the registers read back differ from the ones written.
    pub fn init_verified<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<SPI::Error>> {
        self.init(delay)?;

        if self.config != self.requested {
            return Err(Error::ConfigMismatch {
                written: self.requested,
                read: self.config,
            });
        }

        Ok(())
    }

    pub fn send_command(&mut self, command: Command) -> Result<(), SPI::Error> {
        log::trace!("ADS1120 command {command:?}");

        crate::send_command(&mut self.spi, command)
    }

    /// Returns every register to its power-on value. Give the chip time to settle afterwards.
    pub fn reset(&mut self) -> Result<(), SPI::Error> {
        self.send_command(Command::Reset)
    }

    /// Starts a conversion. In continuous mode this restarts the running one.
    pub fn start(&mut self) -> Result<(), SPI::Error> {
        self.send_command(Command::StartSync)
    }

    pub fn power_down(&mut self) -> Result<(), SPI::Error> {
        self.send_command(Command::PowerDown)
    }

    /// Writes a single register. Nothing is acknowledged and [`config`](Self::config) is left
    /// alone; read the register back to see what the chip made of it.
    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<(), SPI::Error> {
        crate::write_register(&mut self.spi, reg, value)
    }

    pub fn read_register(&mut self, reg: Register) -> Result<u8, SPI::Error> {
        crate::read_register(&mut self.spi, reg)
    }

    /// Reads all four registers, one transaction each, and stores them as [`config`](Self::config).
    pub fn read_config(&mut self) -> Result<Config, SPI::Error> {
        let mut config = Config::from_bytes([0; 4]);

        for reg in Register::all() {
            config.set(reg, self.read_register(reg)?);
        }

        self.config = config;

        Ok(config)
    }

    /// Fetch the latest conversion result as a raw [`i16`].
    /// Only meaningful once [`data_ready`](Self::data_ready) reports a finished conversion;
    /// otherwise the chip shifts out whatever it holds.
    pub fn read_sample(&mut self) -> Result<i16, SPI::Error> {
        self.sample = crate::read_sample(&mut self.spi)?;

        Ok(self.sample)
    }

    /// The last value returned by [`read_sample`](Self::read_sample).
    pub fn sample(&self) -> i16 {
        self.sample
    }

    /// Registers as last read back from the chip.
    pub fn config(&self) -> Config {
        self.config
    }

    /// `true` while a finished conversion is waiting (DRDY is active low). Never blocks.
    pub fn data_ready(&mut self) -> Result<bool, DRDY::Error> {
        self.drdy.is_low()
    }

    /// Gives back the SPI device and the data ready pin.
    pub fn release(self) -> (SPI, DRDY) {
        (self.spi, self.drdy)
    }
}
