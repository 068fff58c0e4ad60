pub(crate) mod codec;
pub(crate) mod handshake;

pub use codec::{
    encode_bitmap, encode_led, encode_light, encode_remote_mode, split_nibbles, SysexFrame,
    REMOTE_MODE,
};
pub use handshake::{HandshakeGate, HandshakeState};
