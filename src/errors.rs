use thiserror::Error;

#[derive(Debug, Error)]
pub enum MidiError {
    // midir's connect errors carry the unconnected port object, keep only the message
    #[error("connecting to MIDI input port failed: {0}")]
    InputConnectError(String),
    #[error("connecting to MIDI output port failed: {0}")]
    OutputConnectError(String),
    #[error("MIDI context initialization failed")]
    InitError(#[from] midir::InitError),
    #[error("MIDI Port retrieval failed")]
    PortInfoError(#[from] midir::PortInfoError),
    #[error("sending MIDI message failed")]
    SendError(#[from] midir::SendError),
    #[error("couldn't find a port for {keyword:?}")]
    NoPortFound {
        // The keyword that was searched for
        keyword: String,
    },
}

impl From<midir::ConnectError<midir::MidiInput>> for MidiError {
    fn from(e: midir::ConnectError<midir::MidiInput>) -> Self {
        Self::InputConnectError(e.to_string())
    }
}

impl From<midir::ConnectError<midir::MidiOutput>> for MidiError {
    fn from(e: midir::ConnectError<midir::MidiOutput>) -> Self {
        Self::OutputConnectError(e.to_string())
    }
}

/// Failure to read the textual `f0 .. f7` form of a sysex frame
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseHexError {
    #[error("invalid hex token {token:?} at position {position}")]
    InvalidToken { position: usize, token: String },
    #[error("sysex frame must start with f0 and end with f7")]
    MissingDelimiters,
}
