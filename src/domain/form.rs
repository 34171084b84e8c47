use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;

/// Every input a form on either screen can bind to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    Otp,
}

/// Field name to current value for one mounted form.
///
/// The set of fields is fixed when the form is created; writes to a field
/// the form does not own are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields(BTreeMap<Field, String>);

impl FormFields {
    pub fn with_fields(fields: &[Field]) -> Self {
        Self(fields.iter().map(|f| (*f, String::new())).collect())
    }

    /// Returns `false` when `field` is not part of this form.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        match self.0.get_mut(&field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn all_filled(&self) -> bool {
        self.0.values().all(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordVisibility(bool);

impl PasswordVisibility {
    pub fn toggle(&mut self) {
        self.0 = !self.0;
    }

    pub fn is_visible(&self) -> bool {
        self.0
    }
}
