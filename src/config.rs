use std::time::Duration;

use log::warn;

pub const OTP_CODE: &str = "123456";
pub const OTP_COUNTDOWN_SECS: u32 = 30;
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

const OTP_CODE_VAR: &str = "SOUNDGATE_OTP_CODE";
const OTP_COUNTDOWN_VAR: &str = "SOUNDGATE_OTP_COUNTDOWN";
const TICK_MS_VAR: &str = "SOUNDGATE_TICK_MS";

/// Runtime knobs for the sign-up flow.
///
/// The defaults are the values the screens were designed around; the
/// environment can only shorten the countdown, never lengthen it past
/// [`OTP_COUNTDOWN_SECS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub otp_code: String,
    pub otp_countdown_secs: u32,
    pub tick_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            otp_code: OTP_CODE.to_string(),
            otp_countdown_secs: OTP_COUNTDOWN_SECS,
            tick_interval: TICK_INTERVAL,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let otp_code = lookup(OTP_CODE_VAR)
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .unwrap_or(defaults.otp_code);
        let otp_countdown_secs = parse(&lookup, OTP_COUNTDOWN_VAR)
            .map(|secs: u32| secs.clamp(1, OTP_COUNTDOWN_SECS))
            .unwrap_or(defaults.otp_countdown_secs);
        let tick_interval = parse(&lookup, TICK_MS_VAR)
            .filter(|ms: &u64| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.tick_interval);
        Self {
            otp_code,
            otp_countdown_secs,
            tick_interval,
        }
    }
}

fn parse<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {key}={raw:?}: not a valid number");
            None
        }
    }
}
