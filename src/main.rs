#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Level, Output, OutputDrive, Pin},
    peripherals::SPI2,
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Duration, Ticker};

bind_interrupts!(struct Irqs {
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{backlight::Backlight, display::Display};
use pinetime_analog::{app::App, config::PINETIME, strip::StripBuffer, time::ClockTime};
use system::{
    config::SystemConfig,
    time::{TimeManager, TimeReference},
};

// Others
use chrono::NaiveDateTime;

// Include build time as UTC epoch
include!(concat!(env!("OUT_DIR"), "/utc.rs"));
const TIMEZONE: i64 = 1 * 3_600;

/// Backlight level at boot (0–7)
const BRIGHTNESS: u8 = 3;

/// Rows composed off-screen per panel write (240 × 16 × 2 bytes of RAM)
const STRIP_ROWS: usize = 16;

// Communication channels
static TIME: Signal<ThreadModeRawMutex, NaiveDateTime> = Signal::new();

/// Publish the current time every 100ms, so no second change is missed.
#[embassy_executor::task(pool_size = 1)]
async fn update_time(clock: TimeManager) {
    let mut tick = Ticker::every(Duration::from_millis(100));
    loop {
        TIME.signal(clock.get_time());

        // Re-schedule the timer interrupt
        tick.next().await;
    }
}

/// Run the watchface: deliver ticks and repaint the panel when it is dirty.
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(mut display: Display) {
    let mut app = App::new(PINETIME);
    let mut strip = StripBuffer::<240, STRIP_ROWS>::new();
    unwrap!(app.launch());
    defmt::info!("Watchface shown");

    loop {
        let now = TIME.wait().await;
        app.advance(now);

        let time = ClockTime::from_time(&now);
        if app.render_strips(display.lcd(), time, &mut strip).is_err() {
            defmt::warn!("Display update failed");
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Initialize Backlight
    let backlight = unwrap!(Backlight::init(
        Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
        BRIGHTNESS,
    ));

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26.degrade(), Level::Low, OutputDrive::Standard),
        backlight,
    ));

    // Initialize wall clock
    let clock = TimeManager::init(unwrap!(TimeReference::from_epoch(UTC_EPOCH + TIMEZONE)));

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(update_time(clock)));
    unwrap!(spawner.spawn(update_lcd(display)));
}
