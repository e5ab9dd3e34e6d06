use defmt::info;
use esp_hal::gpio::{AnyPin, Input, InputConfig, Pull};
use sequencer::ActiveLow;

pub type Trigger = ActiveLow<Input<'static>>;

/// Siren input, pulled up and active while grounded. No debounce.
pub fn trigger(pin: AnyPin<'static>) -> Trigger {
    let input = Input::new(pin, InputConfig::default().with_pull(Pull::Up));

    info!(
        "Initial trigger state: {}",
        if input.is_low() { "active" } else { "inactive" }
    );

    ActiveLow::new(input)
}
