use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::prelude::{Line, Modifier, StatefulWidget, Style, Stylize, Widget};
use ratatui::widgets::{Block, Paragraph};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::config::Settings;
use crate::domain::form::Field;
use crate::domain::signup::{SignUpEvent, SignUpFlow, SignUpFlowState};
use crate::domain::Effect;
use crate::extension::{FocusCycle, Splittable};
use crate::router::{Destination, ScreenChange};
use crate::screen::banner::BannerWidget;
use crate::screen::{button, highlight, visibility_label, OnKeyEvent, OnTick, TextField};
use crate::service::countdown::Countdown;

const DETAILS_FOCUS_ORDER: [SignUpScreenFocus; 7] = [
    SignUpScreenFocus::FirstName,
    SignUpScreenFocus::LastName,
    SignUpScreenFocus::Email,
    SignUpScreenFocus::Password,
    SignUpScreenFocus::ShowPassword,
    SignUpScreenFocus::Signup,
    SignUpScreenFocus::Login,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignUpScreenFocus {
    #[default]
    FirstName,
    LastName,
    Email,
    Password,
    ShowPassword,
    Signup,
    Login,
    Otp,
    Resend,
    Verify,
}

impl SignUpScreenFocus {
    fn field(self) -> Option<Field> {
        match self {
            SignUpScreenFocus::FirstName => Some(Field::FirstName),
            SignUpScreenFocus::LastName => Some(Field::LastName),
            SignUpScreenFocus::Email => Some(Field::Email),
            SignUpScreenFocus::Password => Some(Field::Password),
            SignUpScreenFocus::Otp => Some(Field::Otp),
            _ => None,
        }
    }
}

/// Sign-up screen state. Owns the countdown service, so unmounting the
/// screen stops any running OTP countdown.
#[derive(Debug)]
pub struct SignUpScreenData {
    flow: SignUpFlow,
    first_name_input: Input,
    last_name_input: Input,
    email_input: Input,
    password_input: Input,
    otp_input: Input,
    focus: SignUpScreenFocus,
    countdown: Countdown,
    pub(crate) cursor_position: Option<Position>,
}

impl SignUpScreenData {
    pub fn new(settings: &Settings) -> Self {
        Self {
            flow: SignUpFlow::new(settings),
            first_name_input: Input::default(),
            last_name_input: Input::default(),
            email_input: Input::default(),
            password_input: Input::default(),
            otp_input: Input::default(),
            focus: SignUpScreenFocus::default(),
            countdown: Countdown::new(settings.tick_interval),
            cursor_position: None,
        }
    }

    pub fn flow(&self) -> &SignUpFlow {
        &self.flow
    }

    pub fn focus(&self) -> SignUpScreenFocus {
        self.focus
    }

    #[cfg(test)]
    pub(crate) fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    fn focus_order(&self) -> Vec<SignUpScreenFocus> {
        match self.flow.state() {
            SignUpFlowState::CollectingDetails => DETAILS_FOCUS_ORDER.to_vec(),
            SignUpFlowState::AwaitingOtp if self.flow.can_resend() => vec![
                SignUpScreenFocus::Otp,
                SignUpScreenFocus::Resend,
                SignUpScreenFocus::Verify,
            ],
            SignUpFlowState::AwaitingOtp => {
                vec![SignUpScreenFocus::Otp, SignUpScreenFocus::Verify]
            }
        }
    }

    fn switch_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        self.focus = if forward {
            order.after(self.focus)
        } else {
            order.before(self.focus)
        };
    }

    fn input_mut(&mut self, focus: SignUpScreenFocus) -> Option<&mut Input> {
        match focus {
            SignUpScreenFocus::FirstName => Some(&mut self.first_name_input),
            SignUpScreenFocus::LastName => Some(&mut self.last_name_input),
            SignUpScreenFocus::Email => Some(&mut self.email_input),
            SignUpScreenFocus::Password => Some(&mut self.password_input),
            SignUpScreenFocus::Otp => Some(&mut self.otp_input),
            _ => None,
        }
    }

    pub(crate) fn handle_input_event(&mut self, key: KeyEvent) {
        let Some(field) = self.focus.field() else {
            return;
        };
        let Some(input) = self.input_mut(self.focus) else {
            return;
        };
        let changed = input
            .handle_event(&Event::Key(key))
            .is_some_and(|change| change.value);
        if changed {
            let value = input.value().to_string();
            self.dispatch(SignUpEvent::FieldChanged { field, value });
        }
    }

    fn handle_enter(&mut self) -> ScreenChange {
        match self.focus {
            SignUpScreenFocus::FirstName
            | SignUpScreenFocus::LastName
            | SignUpScreenFocus::Email
            | SignUpScreenFocus::Password
            | SignUpScreenFocus::Signup => self.dispatch(SignUpEvent::SubmitDetails),
            SignUpScreenFocus::ShowPassword => {
                self.dispatch(SignUpEvent::TogglePasswordVisibility)
            }
            SignUpScreenFocus::Login => ScreenChange::Navigate(Destination::Login),
            SignUpScreenFocus::Otp | SignUpScreenFocus::Verify => {
                self.dispatch(SignUpEvent::VerifyOtp)
            }
            SignUpScreenFocus::Resend => self.dispatch(SignUpEvent::Resend),
        }
    }

    fn dispatch(&mut self, event: SignUpEvent) -> ScreenChange {
        let effects = self.flow.apply(event);
        self.run(effects)
    }

    fn run(&mut self, effects: Vec<Effect>) -> ScreenChange {
        let mut change = ScreenChange::None;
        for effect in effects {
            match effect {
                Effect::Notify(notice) => change = ScreenChange::Notify(notice),
                Effect::ArmCountdown(id) => self.countdown.arm(id),
                Effect::CancelCountdown(id) => {
                    self.countdown.cancel_if(id);
                }
            }
        }
        self.sync_with_flow();
        change
    }

    /// Mirrors flow-driven resets into the widgets and keeps focus on a
    /// target that exists in the current step.
    fn sync_with_flow(&mut self) {
        if self.otp_input.value() != self.flow.otp() {
            self.otp_input = Input::new(self.flow.otp().to_string());
        }
        if !self.focus_order().contains(&self.focus) {
            self.focus = SignUpScreenFocus::Otp;
        }
    }
}

pub struct SignUpScreenWidget;

impl StatefulWidget for SignUpScreenWidget {
    type State = SignUpScreenData;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [banner, right] = Layout::split_equal(area, Direction::Horizontal);
        BannerWidget.render(banner, buf);

        let column = Layout::center_column(right, 50);
        state.cursor_position = match state.flow.state() {
            SignUpFlowState::CollectingDetails => render_details(column, buf, state),
            SignUpFlowState::AwaitingOtp => render_otp(column, buf, state),
        };
    }
}

fn render_details(area: Rect, buf: &mut Buffer, state: &SignUpScreenData) -> Option<Position> {
    let [_, title, _, names, email, password, actions, link, instructions, _] =
        Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
    let [first_name, last_name] = Layout::split_equal(names, Direction::Horizontal);

    title_paragraph().render(title, buf);

    let fields = [
        (SignUpScreenFocus::FirstName, "First Name", &state.first_name_input, first_name),
        (SignUpScreenFocus::LastName, "Last Name", &state.last_name_input, last_name),
        (SignUpScreenFocus::Email, "Email", &state.email_input, email),
        (SignUpScreenFocus::Password, "Password", &state.password_input, password),
    ];
    let mut cursor = None;
    for (focus, label, input, field_area) in fields {
        let placeholder = match focus {
            SignUpScreenFocus::Email => "Enter your email",
            SignUpScreenFocus::Password => "Enter your password",
            _ => label,
        };
        let field = TextField {
            label,
            placeholder,
            input,
            masked: focus == SignUpScreenFocus::Password && !state.flow.password_visible(),
            focused: state.focus == focus,
        };
        if state.focus == focus {
            cursor = Some(field.cursor(field_area));
        }
        field.render(field_area, buf);
    }

    let [toggle, signup] = Layout::split_equal(actions, Direction::Horizontal);
    button(
        visibility_label(state.flow.password_visible()),
        state.focus == SignUpScreenFocus::ShowPassword,
    )
    .render(toggle, buf);
    button("Sign Up", state.focus == SignUpScreenFocus::Signup).render(signup, buf);

    Paragraph::new(Line::from(vec![
        "Already have an Account ".into(),
        highlight("Login", state.focus == SignUpScreenFocus::Login).bold(),
    ]))
    .centered()
    .render(link, buf);
    instructions_paragraph().render(instructions, buf);
    cursor
}

fn render_otp(area: Rect, buf: &mut Buffer, state: &SignUpScreenData) -> Option<Position> {
    let [_, title, _, otp, timer, verify, instructions, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    title_paragraph().render(title, buf);

    let otp_field = TextField {
        label: "Enter OTP",
        placeholder: "6-digit OTP",
        input: &state.otp_input,
        masked: false,
        focused: state.focus == SignUpScreenFocus::Otp,
    };
    let cursor = (state.focus == SignUpScreenFocus::Otp).then(|| otp_field.cursor(otp));
    otp_field.render(otp, buf);

    let remaining = state.flow.timer().remaining();
    if remaining > 0 {
        Paragraph::new(Line::from(vec![
            "Resend OTP in ".into(),
            remaining.to_string().bold(),
        ]))
        .centered()
        .block(Block::bordered().dark_gray())
        .render(timer, buf);
    } else {
        button("Resend", state.focus == SignUpScreenFocus::Resend).render(timer, buf);
    }
    button("Verify OTP", state.focus == SignUpScreenFocus::Verify).render(verify, buf);
    instructions_paragraph().render(instructions, buf);
    cursor
}

fn title_paragraph() -> Paragraph<'static> {
    Paragraph::new(Line::from("Sign Up").bold()).centered()
}

fn instructions_paragraph() -> Paragraph<'static> {
    Paragraph::new("Tab to switch focus, Enter to select, Esc to quit")
        .style(Style::default().add_modifier(Modifier::ITALIC))
        .centered()
}

impl OnTick for SignUpScreenData {
    fn on_tick(&mut self) {
        for id in self.countdown.drain() {
            let effects = self.flow.apply(SignUpEvent::Tick(id));
            self.run(effects);
        }
    }

    fn skip_ticks(&mut self) {
        let skipped = self.countdown.drain();
        if !skipped.is_empty() {
            debug!("countdown paused, dropped {} ticks", skipped.len());
        }
    }
}

impl OnKeyEvent for SignUpScreenData {
    fn on_key_event(&mut self, key: KeyEvent) -> ScreenChange {
        match (key.kind, key.modifiers, key.code) {
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Esc)
            | (KeyEventKind::Press, KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                ScreenChange::Quit
            }
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Tab) => {
                self.switch_focus(true);
                ScreenChange::None
            }
            (KeyEventKind::Press, _, KeyCode::BackTab) => {
                self.switch_focus(false);
                ScreenChange::None
            }
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Enter) => self.handle_enter(),
            _ => {
                self.handle_input_event(key);
                ScreenChange::None
            }
        }
    }
}
