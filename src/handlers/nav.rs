use crate::engine::{Arrow, Handler, Navigation, NavigationMode};
use crate::host::Navigator;
use crate::oxi_one::{FunctionButton, Message};

/// Moves through the session with the arrow buttons. LOAD cycles what the arrows move through.
pub struct NavHandler {
    navigator: Box<dyn Navigator>,
    navigation: Navigation,
}

impl NavHandler {
    pub fn new(navigator: Box<dyn Navigator>, initial: NavigationMode) -> Self {
        Self { navigator, navigation: Navigation::new(initial) }
    }

    pub fn mode(&self) -> NavigationMode {
        self.navigation.mode()
    }

    fn owns(button: FunctionButton) -> bool {
        matches!(button, FunctionButton::Load | FunctionButton::Arranger | FunctionButton::PasteClear)
            || Arrow::from_button(button).is_some()
    }

    fn press(&mut self, button: FunctionButton) {
        match button {
            FunctionButton::Load => {
                self.navigation.cycle();
            }
            FunctionButton::Arranger if self.navigation.allows_device_commands() => {
                self.navigator.toggle_device_window()
            }
            FunctionButton::PasteClear if self.navigation.allows_device_commands() => {
                self.navigator.toggle_device_enabled()
            }
            button => match Arrow::from_button(button) {
                Some(arrow) => self.navigation.resolve(arrow).perform(self.navigator.as_mut()),
                None => log::debug!("{:?} does nothing in {} mode", button, self.navigation.mode()),
            },
        }
    }
}

impl Handler for NavHandler {
    fn try_handle(&mut self, msg: &Message) -> bool {
        match *msg {
            Message::ButtonPress { button } if Self::owns(button) => {
                self.press(button);
                true
            }
            Message::ButtonRelease { button } => Self::owns(button),
            _ => false,
        }
    }
}
