//! Timeswitch - Battery-backed clock and daily timeswitch
//!
//! Main firmware binary for STM32F103 "Blue Pill" boards. Keeps wall-clock
//! time in the backup-domain RTC, shows it on a 16x2 LCD, takes edits from
//! four buttons and a serial console, and switches one output on a daily
//! schedule.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::peripherals::USART1;
use embassy_stm32::rcc::LsConfig;
use embassy_stm32::time::Hertz;
use embassy_stm32::usart::{self, BufferedUart};
use embassy_stm32::{bind_interrupts, Config};
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use timeswitch_core::config::parse_config;
use timeswitch_core::{ClockConfig, Controller};
use timeswitch_hal::ActiveLowButtons;
use timeswitch_hal_stm32f1::lcd::DEFAULT_ADDRESS;
use timeswitch_hal_stm32f1::{ConsoleTx, DigitalIn, DigitalOut, Lcd1602, RtcBackup};

use crate::channels::SharedTx;

mod board;
mod channels;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit timeswitch.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../timeswitch.toml");

bind_interrupts!(struct Irqs {
    USART1 => usart::BufferedInterruptHandler<USART1>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static CONSOLE_TX: StaticCell<SharedTx> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Timeswitch firmware starting...");

    let config = load_config();

    // The backup domain is brought up by RtcBackup with a bounded wait;
    // keep the RCC init from touching it.
    let mut chip_config = Config::default();
    chip_config.rcc.ls = LsConfig::off();
    let p = embassy_stm32::init(chip_config);
    info!("Peripherals initialized");

    // Console on USART1, remapped to PB6 (TX) / PB7 (RX)
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = board::CONSOLE_BAUD;

    let tx_buf = TX_BUF.init([0u8; 512]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = unwrap!(BufferedUart::new(
        p.USART1,
        p.PB7, // RX
        p.PB6, // TX
        tx_buf,
        rx_buf,
        Irqs,
        uart_config,
    ));
    let (tx, rx) = uart.split();
    let console_tx: &'static SharedTx = CONSOLE_TX.init(Mutex::new(ConsoleTx::new(tx)));
    info!("Console UART initialized at {} baud", board::CONSOLE_BAUD);

    // LCD on I2C1, remapped to PB8 (SCL) / PB9 (SDA)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = Hertz::khz(board::LCD_I2C_KHZ);
    let i2c = I2c::new_blocking(p.I2C1, p.PB8, p.PB9, i2c_config);

    let mut display = Lcd1602::new(i2c, Delay, DEFAULT_ADDRESS);
    match display.init() {
        Ok(()) => info!("LCD initialized"),
        Err(e) => warn!("LCD init failed: {:?}", e),
    }

    let device = DigitalOut::new(Output::new(p.PB1, Level::Low, Speed::Low));
    let indicator = DigitalOut::new(Output::new(p.PB2, Level::Low, Speed::Low));

    let buttons = ActiveLowButtons::new(
        DigitalIn::new(Input::new(p.PA0, Pull::Up)),
        DigitalIn::new(Input::new(p.PA1, Pull::Up)),
        DigitalIn::new(Input::new(p.PA2, Pull::Up)),
        DigitalIn::new(Input::new(p.PA3, Pull::Up)),
    );

    let clock = Controller::new(RtcBackup::new(), device, indicator, config);

    // Spawn tasks
    spawner
        .spawn(tasks::controller_task(clock, display, console_tx))
        .unwrap();
    spawner
        .spawn(tasks::console_rx_task(rx, console_tx, config.console.echo))
        .unwrap();
    spawner
        .spawn(tasks::heartbeat_task(buttons, config.tick, config.input))
        .unwrap();

    info!("All tasks spawned");
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> ClockConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Configuration loaded");
            config
        }
        Err(e) => {
            warn!("Invalid embedded configuration ({:?}), using defaults", e);
            ClockConfig::default()
        }
    }
}
