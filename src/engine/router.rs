use crate::host::HostEvent;
use crate::oxi_one::Message;

/// One component of the control surface
pub trait Handler: Send {
    /// Claim the event if it belongs to this handler. Returning true stops the dispatch.
    fn try_handle(&mut self, msg: &Message) -> bool;

    /// React to a change in the host session
    fn observe(&mut self, _event: &HostEvent) {}
}

/// Offers each input event to its handlers in registration order until one claims it
#[derive(Default)]
pub struct InputRouter {
    handlers: Vec<Box<dyn Handler>>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler with lower priority than all registered ones
    pub fn register(&mut self, handler: Box<dyn Handler>) {
        self.handlers.push(handler);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns whether any handler claimed the event
    pub fn dispatch(&mut self, msg: &Message) -> bool {
        let claimed = self.handlers.iter_mut().any(|handler| handler.try_handle(msg));
        if !claimed {
            log::debug!("Unhandled input {:?}", msg);
        }
        claimed
    }

    /// Every handler sees every host event
    pub fn broadcast(&mut self, event: &HostEvent) {
        for handler in &mut self.handlers {
            handler.observe(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::TransportState;
    use crate::oxi_one::FunctionButton;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Recorder {
        name: &'static str,
        claims: fn(&Message) -> bool,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Handler for Recorder {
        fn try_handle(&mut self, msg: &Message) -> bool {
            self.log.lock().push(self.name);
            (self.claims)(msg)
        }

        fn observe(&mut self, _event: &HostEvent) {
            self.log.lock().push(self.name);
        }
    }

    fn router(log: &Arc<Mutex<Vec<&'static str>>>) -> InputRouter {
        let mut router = InputRouter::new();
        router.register(Box::new(Recorder {
            name: "grid",
            claims: |msg| matches!(msg, Message::GridPress { .. }),
            log: log.clone(),
        }));
        router.register(Box::new(Recorder {
            name: "buttons",
            claims: |msg| matches!(msg, Message::ButtonPress { .. }),
            log: log.clone(),
        }));
        router.register(Box::new(Recorder { name: "all", claims: |_| true, log: log.clone() }));
        router
    }

    #[test]
    fn test_first_claim_wins() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut router = router(&log);

        assert!(router.dispatch(&Message::ButtonPress { button: FunctionButton::Play }));
        assert_eq!(*log.lock(), vec!["grid", "buttons"]);
    }

    #[test]
    fn test_unclaimed_event() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut router = InputRouter::new();
        router.register(Box::new(Recorder { name: "none", claims: |_| false, log: log.clone() }));
        assert!(!router.dispatch(&Message::Unknown(vec![0xf8])));
        assert_eq!(*log.lock(), vec!["none"]);
    }

    #[test]
    fn test_broadcast_reaches_everyone() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut router = router(&log);
        router.broadcast(&HostEvent::TransportChanged(TransportState::default()));
        assert_eq!(*log.lock(), vec!["grid", "buttons", "all"]);
        assert_eq!(router.len(), 3);
    }
}
