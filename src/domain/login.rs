use serde::{Deserialize, Serialize};

use crate::domain::form::{Field, FormFields, PasswordVisibility};
use crate::domain::Effect;
use crate::error::Error;

pub const LOGIN_FIELDS: [Field; 2] = [Field::Email, Field::Password];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    FieldChanged { field: Field, value: String },
    TogglePasswordVisibility,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    fields: FormFields,
    password_visibility: PasswordVisibility,
    submitted: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            fields: FormFields::with_fields(&LOGIN_FIELDS),
            password_visibility: PasswordVisibility::default(),
            submitted: false,
        }
    }
}

impl LoginForm {
    pub fn apply(&mut self, event: LoginEvent) -> Vec<Effect> {
        match event {
            LoginEvent::FieldChanged { field, value } => {
                self.fields.set(field, value);
                vec![]
            }
            LoginEvent::TogglePasswordVisibility => {
                self.password_visibility.toggle();
                vec![]
            }
            LoginEvent::Submit => match self.submit() {
                Ok(()) => vec![],
                Err(e) => vec![Effect::Notify(e.into())],
            },
        }
    }

    fn submit(&mut self) -> Result<(), Error> {
        if !self.fields.all_filled() {
            return Err(Error::MissingRequiredField);
        }
        self.submitted = true;
        Ok(())
    }

    pub fn field(&self, field: Field) -> &str {
        self.fields.get(field)
    }

    pub fn password_visible(&self) -> bool {
        self.password_visibility.is_visible()
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }
}
