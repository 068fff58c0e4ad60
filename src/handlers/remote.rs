use super::ShiftState;
use crate::engine::{Handler, ParameterPager};
use crate::host::{HostEvent, RemoteControls};
use crate::oxi_one::{FunctionButton, Light, Message, SharedOutput};

/// Encoder resolution: this many detents sweep a parameter's full range
pub const ENCODER_SENSITIVITY: f32 = 127.0;

/// Binds the encoders to the selected device's parameters and shows them on the OLED.
///
/// Also owns the shift button, since shift switches the knobs between the first and second
/// half of the page.
pub struct RemoteHandler {
    controls: Box<dyn RemoteControls>,
    output: SharedOutput,
    shift: ShiftState,
    pager: ParameterPager,
}

impl RemoteHandler {
    pub fn new(controls: Box<dyn RemoteControls>, output: SharedOutput, shift: ShiftState) -> Self {
        Self { controls, output, shift, pager: ParameterPager::new() }
    }

    pub fn pager(&self) -> &ParameterPager {
        &self.pager
    }

    /// Rebind the knobs for the current shift layer, then update the host and the display
    pub fn rebind(&mut self) {
        self.pager.rebind(self.shift.is_held());
        for (index, indicated) in self.pager.indications() {
            self.controls.set_indication(index, indicated);
        }
        self.redraw();
    }

    fn redraw(&self) {
        let lines = self.pager.display_lines();
        if let Err(e) = self.output.lock().display_lines(&lines) {
            log::warn!("Drawing parameters failed: {}", e);
        }
    }

    fn set_shift(&mut self, held: bool) {
        self.shift.set(held);
        if let Err(e) = self.output.lock().set_light(Light::Shift, held.into()) {
            log::warn!("Setting shift light failed: {}", e);
        }
        self.rebind();
    }
}

impl Handler for RemoteHandler {
    fn try_handle(&mut self, msg: &Message) -> bool {
        match *msg {
            Message::ButtonPress { button: FunctionButton::Shift } => self.set_shift(true),
            Message::ButtonRelease { button: FunctionButton::Shift } => self.set_shift(false),
            Message::Encoder { knob, steps } => match self.pager.binding(knob as usize) {
                Some(index) => self.controls.adjust(index, steps as f32 / ENCODER_SENSITIVITY),
                None => log::debug!("Knob {} is not bound", knob),
            },
            _ => return false,
        }
        true
    }

    fn observe(&mut self, event: &HostEvent) {
        match event {
            HostEvent::ParametersChanged(parameters) => {
                self.pager.set_parameters(parameters.clone());
                self.rebind();
            }
            HostEvent::ParameterChanged { index, parameter } => {
                if self.pager.set_parameter(*index, parameter.clone()) && self.pager.is_bound(*index) {
                    self.redraw();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::FakeHost;
    use crate::host::Parameter;
    use crate::oxi_one::{LightState, Output, Raster};
    use crate::protocols::{encode_bitmap, encode_light};
    use crate::MockSink;

    fn handler() -> (RemoteHandler, FakeHost, ShiftState, MockSink) {
        let fake = FakeHost::default();
        let sink = MockSink::new();
        let shift = ShiftState::default();
        let handler = RemoteHandler::new(Box::new(fake.clone()), Output::new(sink.clone()).shared(), shift.clone());
        (handler, fake, shift, sink)
    }

    fn eight_parameters() -> HostEvent {
        HostEvent::ParametersChanged(
            (0..8).map(|i| Parameter::new(format!("P{}", i + 1), i as f32 * 0.125)).collect(),
        )
    }

    fn bitmap(lines: &[String]) -> Vec<u8> {
        encode_bitmap(&Raster::from_lines(lines)).as_bytes().to_vec()
    }

    #[test]
    fn test_new_page_rebinds_and_draws() {
        let (mut handler, fake, _, sink) = handler();
        handler.observe(&eight_parameters());

        let calls = fake.take();
        assert_eq!(calls.len(), 8);
        assert_eq!(calls[0], "indicate 0 true");
        assert_eq!(calls[3], "indicate 3 true");
        assert_eq!(calls[4], "indicate 4 false");

        let sent = sink.take();
        assert_eq!(sent, vec![bitmap(&handler.pager().display_lines())]);
        assert_eq!(handler.pager().display_lines()[4], "(1)   (2)   (3)   (4)");
    }

    #[test]
    fn test_shift_switches_layer() {
        let (mut handler, fake, shift, sink) = handler();
        handler.observe(&eight_parameters());
        fake.take();
        sink.take();

        assert!(handler.try_handle(&Message::ButtonPress { button: FunctionButton::Shift }));
        assert!(shift.is_held());
        assert_eq!(handler.pager().binding(0), Some(4));
        let calls = fake.take();
        assert!(calls.contains(&"indicate 0 false".to_string()));
        assert!(calls.contains(&"indicate 7 true".to_string()));

        let sent = sink.take();
        assert_eq!(sent[0], encode_light(Light::Shift, LightState::On).as_bytes().to_vec());
        assert_eq!(sent[1], bitmap(&handler.pager().display_lines()));

        assert!(handler.try_handle(&Message::ButtonRelease { button: FunctionButton::Shift }));
        assert!(!shift.is_held());
        assert_eq!(handler.pager().binding(0), Some(0));
    }

    #[test]
    fn test_encoders_adjust_bound_parameters() {
        let (mut handler, fake, shift, _) = handler();
        handler.observe(&eight_parameters());
        fake.take();

        assert!(handler.try_handle(&Message::Encoder { knob: 1, steps: 127 }));
        assert!(handler.try_handle(&Message::Encoder { knob: 3, steps: -1 }));
        shift.set(true);
        handler.rebind();
        fake.take();
        handler.try_handle(&Message::Encoder { knob: 0, steps: 2 });
        assert_eq!(fake.take(), vec!["adjust 4 0.016"]);

        handler.observe(&HostEvent::ParametersChanged(vec![Parameter::new("Solo", 0.0)]));
        fake.take();
        // knob 2 has nothing bound now
        assert!(handler.try_handle(&Message::Encoder { knob: 2, steps: 5 }));
        assert!(fake.take().is_empty());
    }

    #[test]
    fn test_encoder_deltas() {
        let (mut handler, fake, _, _) = handler();
        handler.observe(&eight_parameters());
        fake.take();
        handler.try_handle(&Message::Encoder { knob: 1, steps: 127 });
        handler.try_handle(&Message::Encoder { knob: 3, steps: -1 });
        assert_eq!(fake.take(), vec!["adjust 1 1.000", "adjust 3 -0.008"]);
    }

    #[test]
    fn test_value_change_redraws_only_visible_parameters() {
        let (mut handler, _, _, sink) = handler();
        handler.observe(&eight_parameters());
        sink.take();

        handler.observe(&HostEvent::ParameterChanged { index: 6, parameter: Parameter::new("P7", 1.0) });
        assert!(sink.take().is_empty());

        handler.observe(&HostEvent::ParameterChanged { index: 2, parameter: Parameter::new("P3", 1.0) });
        assert_eq!(handler.pager().display_lines()[2], "3) P3        : 100%");
        assert_eq!(sink.take().len(), 1);
    }

    #[test]
    fn test_ignores_other_input() {
        let (mut handler, _, _, _) = handler();
        assert!(!handler.try_handle(&Message::ButtonPress { button: FunctionButton::Play }));
    }
}
