use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Error {
    #[error("All Fields are Mandatory !!")]
    MissingRequiredField,
    #[error("Invalid OTP. Try again.")]
    InvalidOtp,
}

impl Error {
    pub fn title(&self) -> &'static str {
        match self {
            Error::MissingRequiredField => "Missing field",
            Error::InvalidOtp => "Verification failed",
        }
    }
}
