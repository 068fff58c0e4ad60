use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::blink::BlinkTiming;
use crate::engine::NavigationMode;
use crate::protocols::{encode_remote_mode, SysexFrame};

/// Runtime settings, read from an optional TOML file and `OXI_*` environment variables
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Settings {
    /// Substring identifying the device's MIDI ports
    pub port_keyword: String,
    /// What the arrow buttons move through after startup
    pub default_navigation_mode: NavigationMode,
    /// The exact sysex the device answers "enter remote mode" with, as `f0 .. f7` hex text
    pub handshake_ack: String,
    /// Leave remote mode on shutdown even if the acknowledgement never arrived
    pub lenient_exit: bool,
    pub blink_first_ms: u64,
    pub blink_second_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port_keyword: "OXI ONE".to_string(),
            default_navigation_mode: NavigationMode::Device,
            // The device echoes the request
            handshake_ack: encode_remote_mode().to_string(),
            lenient_exit: true,
            blink_first_ms: 150,
            blink_second_ms: 500,
        }
    }
}

impl Settings {
    /// Layer an optional config file and the environment over the defaults
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut cfg = config::Config::builder();

        if let Some(path) = path {
            cfg = cfg.add_source(config::File::from(path));
        }
        cfg = cfg.add_source(config::Environment::with_prefix("OXI"));

        cfg.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.port_keyword.trim().is_empty() {
            return Err("port_keyword must not be empty".to_string());
        }

        if let Err(e) = self.ack_frame() {
            return Err(format!("handshake_ack is not a sysex frame: {e}"));
        }

        if self.blink_first_ms == 0 || self.blink_second_ms == 0 {
            return Err("blink durations must be at least 1 ms".to_string());
        }

        Ok(())
    }

    pub fn ack_frame(&self) -> Result<SysexFrame, crate::ParseHexError> {
        SysexFrame::from_hex(&self.handshake_ack)
    }

    pub fn blink_timing(&self) -> BlinkTiming {
        BlinkTiming {
            first: Duration::from_millis(self.blink_first_ms),
            second: Duration::from_millis(self.blink_second_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.ack_frame(), Ok(encode_remote_mode()));
        assert_eq!(settings.blink_timing(), BlinkTiming::default());
    }

    #[test]
    fn test_validate() {
        let settings = Settings { handshake_ack: "f0 00".to_string(), ..Settings::default() };
        assert!(settings.validate().is_err());

        let settings = Settings { port_keyword: " ".to_string(), ..Settings::default() };
        assert!(settings.validate().is_err());

        let settings = Settings { blink_second_ms: 0, ..Settings::default() };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("oxi-one-settings-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "default_navigation_mode = \"scene\"").unwrap();
        writeln!(file, "handshake_ack = \"f0 00 21 5b 00 01 06 56 f7\"").unwrap();
        writeln!(file, "blink_first_ms = 100").unwrap();
        drop(file);

        let settings = Settings::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.default_navigation_mode, NavigationMode::Scene);
        assert_eq!(settings.ack_frame().unwrap().payload()[6], 0x56);
        assert_eq!(settings.blink_timing().first, Duration::from_millis(100));
        // untouched keys keep their defaults
        assert_eq!(settings.port_keyword, "OXI ONE");
        assert!(settings.lenient_exit);
    }
}
