use super::codec::{encode_remote_mode, SysexFrame};

/// Where the device is in entering remote mode
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum HandshakeState {
    NotEntered,
    AwaitingAck,
    Active,
}

/// Tracks the enter/acknowledge/exit exchange of remote mode.
///
/// There is no retry and no timeout: a device that never acknowledges leaves the gate in
/// [`HandshakeState::AwaitingAck`], and nothing else is held back because of it.
#[derive(Debug, Clone)]
pub struct HandshakeGate {
    state: HandshakeState,
    ack: SysexFrame,
    lenient_exit: bool,
}

impl HandshakeGate {
    /// `ack` is the exact frame the device answers with. With `lenient_exit`, leaving remote mode
    /// is requested on shutdown even if the acknowledgement never arrived.
    pub fn new(ack: SysexFrame, lenient_exit: bool) -> Self {
        Self { state: HandshakeState::NotEntered, ack, lenient_exit }
    }

    pub fn state(&self) -> HandshakeState {
        self.state
    }

    /// Returns the frame to send and waits for the acknowledgement
    pub fn begin(&mut self) -> SysexFrame {
        self.state = HandshakeState::AwaitingAck;
        log::info!("Requesting remote mode");
        encode_remote_mode()
    }

    /// Offer an incoming sysex message. Returns whether it was the acknowledgement.
    pub fn acknowledge(&mut self, data: &[u8]) -> bool {
        if !self.ack.matches(data) {
            return false;
        }

        match self.state {
            HandshakeState::AwaitingAck => {
                self.state = HandshakeState::Active;
                log::info!("Remote mode active");
            }
            HandshakeState::Active => log::debug!("Duplicate remote mode acknowledgement"),
            HandshakeState::NotEntered => log::warn!("Remote mode acknowledged before it was requested"),
        }
        true
    }

    /// Returns the frame that leaves remote mode, if one should be sent, and resets the gate
    pub fn finish(&mut self) -> Option<SysexFrame> {
        let send = match self.state {
            HandshakeState::Active => true,
            HandshakeState::AwaitingAck => self.lenient_exit,
            HandshakeState::NotEntered => false,
        };
        self.state = HandshakeState::NotEntered;

        if send {
            log::info!("Leaving remote mode");
            Some(encode_remote_mode())
        } else {
            None
        }
    }
}
