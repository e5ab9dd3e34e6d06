#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Ticker, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::uart::{self, Uart};
use firmware::console::Console;
use sequencer::serial::DfPlayer;
use sequencer::{Sequencer, Tick};
use {esp_backtrace as _, esp_println as _};

extern crate alloc;

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(_spawner: Spawner) {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Only the config parser allocates.
    esp_alloc::heap_allocator!(size: 16 * 1024);

    let timer0 = TimerGroup::new(peripherals.TIMG1);
    esp_hal_embassy::init(timer0.timer0);

    info!("Embassy initialized!");

    let config = firmware::load_config();
    let trigger = firmware::trigger::trigger(peripherals.GPIO12.into());

    // The module ignores the serial line until it has booted.
    Timer::after(Duration::from_millis(config.settle_delay_ms)).await;

    let uart = Uart::new(
        peripherals.UART1,
        uart::Config::default().with_baudrate(config.baud_rate),
    )
    .unwrap()
    .with_rx(peripherals.GPIO16)
    .with_tx(peripherals.GPIO17);

    let player = DfPlayer::new(uart, Delay);
    let mut sequencer = Sequencer::start(&config, player, trigger, Console);

    let mut ticker = Ticker::every(Duration::from_millis(config.poll_interval_ms));
    while let Tick::Running { .. } = sequencer.poll() {
        ticker.next().await;
    }

    info!("Sequencer halted, power cycle to retry");
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
