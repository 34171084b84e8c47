use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::domain::form::{Field, FormFields, PasswordVisibility};
use crate::domain::notice::Notice;
use crate::domain::{Effect, TimerId};
use crate::error::Error;

pub const DETAIL_FIELDS: [Field; 4] = [
    Field::FirstName,
    Field::LastName,
    Field::Email,
    Field::Password,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignUpFlowState {
    #[default]
    CollectingDetails,
    AwaitingOtp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpEvent {
    FieldChanged { field: Field, value: String },
    TogglePasswordVisibility,
    SubmitDetails,
    Tick(TimerId),
    Resend,
    VerifyOtp,
}

/// Seconds left before the OTP can be resent, and the countdown driving it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpTimer {
    remaining: u32,
    armed: Option<TimerId>,
}

impl OtpTimer {
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn armed(&self) -> Option<TimerId> {
        self.armed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpFlow {
    state: SignUpFlowState,
    details: FormFields,
    otp: String,
    timer: OtpTimer,
    password_visibility: PasswordVisibility,
    next_timer_id: u64,
    otp_code: String,
    countdown_secs: u32,
}

impl SignUpFlow {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: SignUpFlowState::CollectingDetails,
            details: FormFields::with_fields(&DETAIL_FIELDS),
            otp: String::new(),
            timer: OtpTimer::default(),
            password_visibility: PasswordVisibility::default(),
            next_timer_id: 0,
            otp_code: settings.otp_code.clone(),
            countdown_secs: settings.otp_countdown_secs,
        }
    }

    pub fn apply(&mut self, event: SignUpEvent) -> Vec<Effect> {
        match event {
            SignUpEvent::FieldChanged { field, value } => {
                self.change_field(field, value);
                vec![]
            }
            SignUpEvent::TogglePasswordVisibility => {
                self.password_visibility.toggle();
                vec![]
            }
            SignUpEvent::SubmitDetails => self.submit_details(),
            SignUpEvent::Tick(id) => self.tick(id),
            SignUpEvent::Resend => self.resend(),
            SignUpEvent::VerifyOtp => self.verify_otp(),
        }
    }

    fn change_field(&mut self, field: Field, value: String) {
        match (self.state, field) {
            (SignUpFlowState::AwaitingOtp, Field::Otp) => self.otp = value,
            (SignUpFlowState::CollectingDetails, _) => {
                self.details.set(field, value);
            }
            _ => {}
        }
    }

    fn submit_details(&mut self) -> Vec<Effect> {
        if self.state != SignUpFlowState::CollectingDetails {
            return vec![];
        }
        debug!("sign-up details submitted, awaiting otp");
        self.state = SignUpFlowState::AwaitingOtp;
        self.otp.clear();
        let mut effects = vec![Effect::Notify(Notice::OtpSent)];
        effects.extend(self.rearm());
        effects
    }

    fn tick(&mut self, id: TimerId) -> Vec<Effect> {
        if self.state != SignUpFlowState::AwaitingOtp || self.timer.armed != Some(id) {
            return vec![];
        }
        self.timer.remaining = self.timer.remaining.saturating_sub(1);
        if self.timer.remaining > 0 {
            return vec![];
        }
        debug!("otp countdown {id:?} expired");
        self.timer.armed = None;
        vec![Effect::CancelCountdown(id)]
    }

    fn resend(&mut self) -> Vec<Effect> {
        if !self.can_resend() {
            return vec![];
        }
        debug!("resending otp");
        self.otp.clear();
        self.rearm()
    }

    fn verify_otp(&mut self) -> Vec<Effect> {
        if self.state != SignUpFlowState::AwaitingOtp {
            return vec![];
        }
        let notice = match self.check_otp() {
            Ok(()) => Notice::OtpVerified,
            Err(e) => e.into(),
        };
        vec![Effect::Notify(notice)]
    }

    fn check_otp(&self) -> Result<(), Error> {
        if self.otp != self.otp_code {
            return Err(Error::InvalidOtp);
        }
        Ok(())
    }

    /// Retires any armed countdown and arms a fresh one at full length.
    fn rearm(&mut self) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        if let Some(previous) = self.timer.armed.take() {
            effects.push(Effect::CancelCountdown(previous));
        }
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        self.timer = OtpTimer {
            remaining: self.countdown_secs,
            armed: Some(id),
        };
        effects.push(Effect::ArmCountdown(id));
        effects
    }

    pub fn state(&self) -> SignUpFlowState {
        self.state
    }

    pub fn timer(&self) -> OtpTimer {
        self.timer
    }

    pub fn can_resend(&self) -> bool {
        self.state == SignUpFlowState::AwaitingOtp && self.timer.remaining == 0
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Otp => &self.otp,
            _ => self.details.get(field),
        }
    }

    pub fn otp(&self) -> &str {
        &self.otp
    }

    pub fn password_visible(&self) -> bool {
        self.password_visibility.is_visible()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn changed(field: Field, value: &str) -> SignUpEvent {
        SignUpEvent::FieldChanged {
            field,
            value: value.to_string(),
        }
    }

    fn awaiting_otp() -> SignUpFlow {
        let mut flow = SignUpFlow::new(&Settings::default());
        flow.apply(SignUpEvent::SubmitDetails);
        flow
    }

    fn run_down(flow: &mut SignUpFlow) -> Vec<Effect> {
        let id = flow.timer().armed().expect("countdown armed");
        let mut effects = vec![];
        while flow.timer().remaining() > 0 {
            effects.extend(flow.apply(SignUpEvent::Tick(id)));
        }
        effects
    }

    #[test]
    fn test_detail_fields_change_independently() {
        let mut flow = SignUpFlow::new(&Settings::default());
        flow.apply(changed(Field::FirstName, "Ja"));
        flow.apply(changed(Field::FirstName, "Jan"));
        flow.apply(changed(Field::Email, "jan@example.com"));
        assert_eq!(flow.field(Field::FirstName), "Jan");
        assert_eq!(flow.field(Field::LastName), "");
        assert_eq!(flow.field(Field::Email), "jan@example.com");
        assert_eq!(flow.field(Field::Password), "");
    }

    #[test]
    fn test_otp_field_ignored_while_collecting_details() {
        let mut flow = SignUpFlow::new(&Settings::default());
        flow.apply(changed(Field::Otp, "123456"));
        assert_eq!(flow.otp(), "");
    }

    #[test]
    fn test_submit_details_without_any_input() {
        let mut flow = SignUpFlow::new(&Settings::default());
        let effects = flow.apply(SignUpEvent::SubmitDetails);

        assert_eq!(flow.state(), SignUpFlowState::AwaitingOtp);
        assert_eq!(flow.timer().remaining(), 30);
        assert_eq!(
            effects,
            vec![
                Effect::Notify(Notice::OtpSent),
                Effect::ArmCountdown(TimerId(0))
            ]
        );
    }

    #[test]
    fn test_details_frozen_after_submit() {
        let mut flow = SignUpFlow::new(&Settings::default());
        flow.apply(changed(Field::Email, "jan@example.com"));
        flow.apply(SignUpEvent::SubmitDetails);
        flow.apply(changed(Field::Email, "other@example.com"));
        assert_eq!(flow.field(Field::Email), "jan@example.com");
    }

    #[test]
    fn test_second_submit_is_ignored() {
        let mut flow = awaiting_otp();
        flow.apply(SignUpEvent::Tick(TimerId(0)));
        assert!(flow.apply(SignUpEvent::SubmitDetails).is_empty());
        assert_eq!(flow.timer().remaining(), 29);
    }

    #[test]
    fn test_tick_counts_down_and_stops_at_zero() {
        let mut flow = awaiting_otp();
        let id = TimerId(0);
        for expected in (1..30).rev() {
            assert!(flow.apply(SignUpEvent::Tick(id)).is_empty());
            assert_eq!(flow.timer().remaining(), expected);
            assert!(!flow.can_resend());
        }

        assert_eq!(
            flow.apply(SignUpEvent::Tick(id)),
            vec![Effect::CancelCountdown(id)]
        );
        assert_eq!(flow.timer().remaining(), 0);
        assert_eq!(flow.timer().armed(), None);
        assert!(flow.can_resend());

        assert!(flow.apply(SignUpEvent::Tick(id)).is_empty());
        assert_eq!(flow.timer().remaining(), 0);
    }

    #[test]
    fn test_tick_before_submit_is_ignored() {
        let mut flow = SignUpFlow::new(&Settings::default());
        assert!(flow.apply(SignUpEvent::Tick(TimerId(0))).is_empty());
        assert_eq!(flow.timer(), OtpTimer::default());
    }

    #[test]
    fn test_resend_unavailable_while_counting() {
        let mut flow = awaiting_otp();
        flow.apply(changed(Field::Otp, "12"));
        assert!(flow.apply(SignUpEvent::Resend).is_empty());
        assert_eq!(flow.otp(), "12");
        assert_eq!(flow.timer().armed(), Some(TimerId(0)));
    }

    #[test]
    fn test_resend_resets_timer_and_clears_otp() {
        let mut flow = awaiting_otp();
        run_down(&mut flow);
        flow.apply(changed(Field::Otp, "999"));

        let effects = flow.apply(SignUpEvent::Resend);

        assert_eq!(effects, vec![Effect::ArmCountdown(TimerId(1))]);
        assert_eq!(flow.state(), SignUpFlowState::AwaitingOtp);
        assert_eq!(flow.timer().remaining(), 30);
        assert_eq!(flow.otp(), "");
        assert!(!flow.can_resend());
    }

    #[test]
    fn test_stale_ticks_are_ignored() {
        let mut flow = awaiting_otp();
        run_down(&mut flow);
        flow.apply(SignUpEvent::Resend);

        assert!(flow.apply(SignUpEvent::Tick(TimerId(0))).is_empty());
        assert_eq!(flow.timer().remaining(), 30);
        flow.apply(SignUpEvent::Tick(TimerId(1)));
        assert_eq!(flow.timer().remaining(), 29);
    }

    #[rstest]
    #[case("123456", Notice::OtpVerified)]
    #[case("654321", Notice::Rejected(Error::InvalidOtp))]
    #[case("", Notice::Rejected(Error::InvalidOtp))]
    #[case("1234567", Notice::Rejected(Error::InvalidOtp))]
    fn test_verify_otp(#[case] otp: &str, #[case] expected: Notice) {
        let mut flow = awaiting_otp();
        flow.apply(changed(Field::Otp, otp));

        assert_eq!(
            flow.apply(SignUpEvent::VerifyOtp),
            vec![Effect::Notify(expected)]
        );
        assert_eq!(flow.state(), SignUpFlowState::AwaitingOtp);
        assert_eq!(flow.otp(), otp);
    }

    #[test]
    fn test_failed_attempts_never_lock_out() {
        let mut flow = awaiting_otp();
        flow.apply(changed(Field::Otp, "000000"));
        for _ in 0..10 {
            flow.apply(SignUpEvent::VerifyOtp);
        }
        flow.apply(changed(Field::Otp, "123456"));
        assert_eq!(
            flow.apply(SignUpEvent::VerifyOtp),
            vec![Effect::Notify(Notice::OtpVerified)]
        );
    }

    #[test]
    fn test_verify_before_submit_is_ignored() {
        let mut flow = SignUpFlow::new(&Settings::default());
        assert!(flow.apply(SignUpEvent::VerifyOtp).is_empty());
    }

    #[test]
    fn test_custom_code_and_countdown() {
        let settings = Settings {
            otp_code: "000111".to_string(),
            otp_countdown_secs: 3,
            ..Settings::default()
        };
        let mut flow = SignUpFlow::new(&settings);
        flow.apply(SignUpEvent::SubmitDetails);
        assert_eq!(flow.timer().remaining(), 3);
        assert_eq!(run_down(&mut flow).len(), 1);

        flow.apply(changed(Field::Otp, "000111"));
        assert_eq!(
            flow.apply(SignUpEvent::VerifyOtp),
            vec![Effect::Notify(Notice::OtpVerified)]
        );
    }

    #[test]
    fn test_serialization() -> serde_json::Result<()> {
        let mut flow = awaiting_otp();
        flow.apply(changed(Field::Otp, "12"));
        let json = serde_json::to_value(&flow)?;
        assert_eq!(json["state"], "AwaitingOtp");
        assert_eq!(json["timer"]["remaining"], 30);
        assert_eq!(serde_json::from_value::<SignUpFlow>(json)?, flow);
        Ok(())
    }
}
