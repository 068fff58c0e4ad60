/*!
Remote control for the OXI ONE sequencer: drive its pad grid, indicator lights and OLED from a
DAW, and turn its buttons and encoders into DAW actions.

# Low-level access

[`Output`] wraps the MIDI output port. Every method sends one sysex frame, so what you call is
what goes over the wire:

```no_run
use oxi_one::{Cell, Light, LightState, OutputDevice as _, RgbColor};

let mut output = oxi_one::Output::guess()?;
output.enter_remote_mode()?;
output.update_screen("Hello\nOXI ONE")?;
output.set_light(Light::Play, LightState::Blink)?;
if let Some(cell) = Cell::new(0, 0) {
    output.set_led(cell, RgbColor::GREEN)?;
}
# Ok::<(), oxi_one::MidiError>(())
```

Input arrives decoded as [`Message`]s:

```no_run
use oxi_one::{InputDevice as _, Message};

let _input = oxi_one::Input::guess(|msg| match msg {
    Message::GridPress { cell } => println!("pad {}/{} down", cell.col(), cell.row()),
    Message::Encoder { knob, steps } => println!("knob {} turned by {}", knob, steps),
    _ => {}
})?;
# Ok::<(), oxi_one::MidiError>(())
```

# Control surface

[`Controller`] binds the device to a DAW session described by the traits in [`host`]. It
performs the remote mode handshake, routes input through the [handlers](handlers) in priority
order, keeps queued clips blinking and pages the four encoders over the device parameters.
*/

pub mod util;

mod protocols;
pub use protocols::*;

mod midi_io;
pub use midi_io::*;

mod errors;
pub use errors::*;

mod color;
pub use color::RgbColor;

pub mod oxi_one;
pub use oxi_one::{Cell, FunctionButton, Input, Light, LightState, Message, Output, Raster, SharedOutput};

pub mod blink;
pub use blink::{BlinkScheduler, BlinkTiming, LedState};

pub mod engine;
pub mod handlers;
pub mod host;
pub use host::Host;

mod controller;
pub use controller::Controller;

pub mod settings;
pub use settings::Settings;

pub mod surface;

pub mod prelude {
    pub use crate::engine::Handler;
    pub use crate::midi_io::{InputDevice, MidiSink, OutputDevice};
    pub use crate::oxi_one::{Cell, FunctionButton, Light, LightState, Message};
    pub use crate::RgbColor;
}

/// Client name the MIDI backend shows for our ports
const APPLICATION_NAME: &str = "OXI ONE Remote";
