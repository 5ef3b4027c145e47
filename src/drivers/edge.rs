//! GPIO falling-edge dispatch.
//!
//! Buttons are active-low with internal pull-up. Each one gets its own
//! task that waits for a falling edge and runs the handler immediately,
//! outside the main tick.

use crate::ui::buttons::EdgeHandler;
use embassy_nrf::gpio::{AnyPin, Input, Pull};

/// Run a handler on every falling edge of `pin`. Never returns.
pub async fn edge_task(pin: AnyPin, handler: &mut impl EdgeHandler) -> ! {
    let mut input = Input::new(pin, Pull::Up);

    loop {
        input.wait_for_falling_edge().await;
        handler.on_falling_edge();
    }
}
