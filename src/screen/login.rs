use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::prelude::{Line, Modifier, StatefulWidget, Style, Stylize, Widget};
use ratatui::widgets::Paragraph;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::domain::form::Field;
use crate::domain::login::{LoginEvent, LoginForm};
use crate::extension::{FocusCycle, Splittable};
use crate::router::{Destination, ScreenChange};
use crate::screen::banner::BannerWidget;
use crate::screen::{button, highlight, visibility_label, OnKeyEvent, OnTick, TextField};

const FOCUS_ORDER: [LoginScreenFocus; 5] = [
    LoginScreenFocus::Email,
    LoginScreenFocus::Password,
    LoginScreenFocus::ShowPassword,
    LoginScreenFocus::Login,
    LoginScreenFocus::Signup,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginScreenFocus {
    #[default]
    Email,
    Password,
    ShowPassword,
    Login,
    Signup,
}

#[derive(Debug, Default)]
pub struct LoginScreenData {
    email_input: Input,
    password_input: Input,
    form: LoginForm,
    focus: LoginScreenFocus,
    pub(crate) cursor_position: Option<Position>,
}

impl LoginScreenData {
    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn focus(&self) -> LoginScreenFocus {
        self.focus
    }

    fn switch_focus(&mut self, forward: bool) {
        self.focus = if forward {
            FOCUS_ORDER.after(self.focus)
        } else {
            FOCUS_ORDER.before(self.focus)
        };
    }

    pub(crate) fn handle_input_event(&mut self, key: KeyEvent) {
        let (field, input) = match self.focus {
            LoginScreenFocus::Email => (Field::Email, &mut self.email_input),
            LoginScreenFocus::Password => (Field::Password, &mut self.password_input),
            _ => return,
        };
        let changed = input
            .handle_event(&Event::Key(key))
            .is_some_and(|change| change.value);
        if changed {
            let value = input.value().to_string();
            self.form.apply(LoginEvent::FieldChanged { field, value });
        }
    }

    fn handle_enter(&mut self) -> ScreenChange {
        match self.focus {
            LoginScreenFocus::Email | LoginScreenFocus::Password | LoginScreenFocus::Login => {
                ScreenChange::from_effects(self.form.apply(LoginEvent::Submit))
            }
            LoginScreenFocus::ShowPassword => {
                self.form.apply(LoginEvent::TogglePasswordVisibility);
                ScreenChange::None
            }
            LoginScreenFocus::Signup => ScreenChange::Navigate(Destination::SignUp),
        }
    }
}

pub struct LoginScreenWidget;

impl StatefulWidget for LoginScreenWidget {
    type State = LoginScreenData;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [banner, right] = Layout::split_equal(area, Direction::Horizontal);
        BannerWidget.render(banner, buf);

        let column = Layout::center_column(right, 50);
        let [_, title, _, email, password, actions, link, status, instructions, _] =
            Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(column);

        Paragraph::new(Line::from("Login").bold())
            .centered()
            .render(title, buf);

        let email_field = TextField {
            label: "Email",
            placeholder: "Enter your email",
            input: &state.email_input,
            masked: false,
            focused: state.focus == LoginScreenFocus::Email,
        };
        let password_field = TextField {
            label: "Password",
            placeholder: "Enter your password",
            input: &state.password_input,
            masked: !state.form.password_visible(),
            focused: state.focus == LoginScreenFocus::Password,
        };
        let cursor_position = match state.focus {
            LoginScreenFocus::Email => Some(email_field.cursor(email)),
            LoginScreenFocus::Password => Some(password_field.cursor(password)),
            _ => None,
        };
        email_field.render(email, buf);
        password_field.render(password, buf);

        let [toggle, login] = Layout::split_equal(actions, Direction::Horizontal);
        button(
            visibility_label(state.form.password_visible()),
            state.focus == LoginScreenFocus::ShowPassword,
        )
        .render(toggle, buf);
        button("Login", state.focus == LoginScreenFocus::Login).render(login, buf);

        Paragraph::new(Line::from(vec![
            "Don't Have an Account ? ".into(),
            highlight("SignUp", state.focus == LoginScreenFocus::Signup).bold(),
        ]))
        .centered()
        .render(link, buf);

        if state.form.submitted() {
            Paragraph::new(format!("Signed in as {}", state.form.field(Field::Email)))
                .light_green()
                .centered()
                .render(status, buf);
        }

        Paragraph::new("Tab to switch focus, Enter to select, Esc to quit")
            .style(Style::default().add_modifier(Modifier::ITALIC))
            .centered()
            .render(instructions, buf);
        state.cursor_position = cursor_position;
    }
}

impl OnTick for LoginScreenData {
    fn on_tick(&mut self) {}
}

impl OnKeyEvent for LoginScreenData {
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
