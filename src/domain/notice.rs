use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A blocking message shown to the user until dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    OtpSent,
    OtpVerified,
    Rejected(Error),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Rejected(_))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Notice::OtpSent => "OTP",
            Notice::OtpVerified => "Welcome",
            Notice::Rejected(error) => error.title(),
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::OtpSent => f.write_str("OTP Sent Successfully"),
            Notice::OtpVerified => f.write_str("OTP Verified! Account created."),
            Notice::Rejected(error) => Display::fmt(error, f),
        }
    }
}

impl From<Error> for Notice {
    fn from(error: Error) -> Self {
        Notice::Rejected(error)
    }
}
