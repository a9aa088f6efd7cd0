#[cfg(feature = "raspberry_pi")]
mod imports {
    pub use std::cell::RefCell;
    pub use std::fmt::Debug;
    pub use std::time::{Duration, Instant};
    pub use ads1120::{Ads1120, SPI_FREQUENCY_HZ};
    pub use embedded_hal::delay::DelayNs;
    pub use embedded_hal_bus::spi::RefCellDevice;
    pub use log::LevelFilter;
    pub use rppal::gpio::Gpio;
    pub use rppal::hal::Delay;
    pub use rppal::spi::{Bus, Mode, SlaveSelect, Spi};
}

#[cfg(feature = "raspberry_pi")]
use imports::*;

/// BCM number of the GPIO wired to the ADS1120 chip select.
#[cfg(feature = "raspberry_pi")]
const CS_PIN: u8 = 24;

/// BCM number of the GPIO wired to the ADS1120 DRDY output.
#[cfg(feature = "raspberry_pi")]
const DRDY_PIN: u8 = 25;

/// Longest a single-shot conversion may take before it is started again.
#[cfg(feature = "raspberry_pi")]
const CONVERSION_TIMEOUT: Duration = Duration::from_millis(10);

#[cfg(feature = "raspberry_pi")]
fn bus_error<E: Debug>(error: E) -> anyhow::Error {
    anyhow::anyhow!("ADS1120 transaction failed: {error:?}")
}

#[cfg(feature = "raspberry_pi")]
fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let gpio = Gpio::new()?;

    // Mode 1 to match the ADS1120, MSB first is the rppal default
    let spi = Spi::new(Bus::Spi0, SlaveSelect::Ss0, SPI_FREQUENCY_HZ, Mode::Mode1)?;

    let spi = RefCell::new(spi);

    let device = RefCellDevice::new(&spi, gpio.get(CS_PIN)?.into_output(), Delay::new())?;

    let mut adc = Ads1120::new(device, gpio.get(DRDY_PIN)?.into_input());

    let mut delay = Delay::new();

    adc.init(&mut delay).map_err(bus_error)?;

    loop {
        adc.start().map_err(bus_error)?;

        let started = Instant::now();
        let mut ready = adc.data_ready()?;

        while !ready && started.elapsed() < CONVERSION_TIMEOUT {
            delay.delay_us(50);
            ready = adc.data_ready()?;
        }

        if !ready {
            log::warn!("No conversion after {CONVERSION_TIMEOUT:?}, starting again");
            continue;
        }

        let sample = adc.read_sample().map_err(bus_error)?;

        println!("{sample}");
    }
}

#[cfg(not(feature = "raspberry_pi"))]
fn main() {
    eprintln!("Built without the `raspberry_pi` feature, there is no ADC to talk to");
    std::process::exit(1);
}
