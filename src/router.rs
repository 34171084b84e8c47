use crossterm::event::KeyEvent;
use log::info;
use ratatui::layout::Position;

use crate::config::Settings;
use crate::domain::notice::Notice;
use crate::domain::Effect;
use crate::screen::login::LoginScreenData;
use crate::screen::signup::SignUpScreenData;
use crate::screen::{OnKeyEvent, OnTick};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Login,
    SignUp,
}

#[derive(Debug, PartialEq)]
pub enum ScreenChange {
    Quit,
    Navigate(Destination),
    Notify(Notice),
    None,
}

impl ScreenChange {
    /// Surfaces the last notice among `effects`, if any.
    pub fn from_effects(effects: impl IntoIterator<Item = Effect>) -> Self {
        effects
            .into_iter()
            .filter_map(|effect| match effect {
                Effect::Notify(notice) => Some(ScreenChange::Notify(notice)),
                _ => None,
            })
            .last()
            .unwrap_or(ScreenChange::None)
    }
}

#[derive(Debug)]
pub enum Screen {
    Login(LoginScreenData),
    SignUp(SignUpScreenData),
}

impl Screen {
    pub fn destination(&self) -> Destination {
        match self {
            Screen::Login(_) => Destination::Login,
            Screen::SignUp(_) => Destination::SignUp,
        }
    }

    pub fn cursor_position(&self) -> Option<Position> {
        match self {
            Screen::Login(data) => data.cursor_position,
            Screen::SignUp(data) => data.cursor_position,
        }
    }
}

impl OnTick for Screen {
    fn on_tick(&mut self) {
        match self {
            Screen::Login(data) => data.on_tick(),
            Screen::SignUp(data) => data.on_tick(),
        }
    }

    fn skip_ticks(&mut self) {
        match self {
            Screen::Login(data) => data.skip_ticks(),
            Screen::SignUp(data) => data.skip_ticks(),
        }
    }
}

impl OnKeyEvent for Screen {
    fn on_key_event(&mut self, key: KeyEvent) -> ScreenChange {
        match self {
            Screen::Login(data) => data.on_key_event(key),
            Screen::SignUp(data) => data.on_key_event(key),
        }
    }
}

/// Owns the single mounted screen. Navigating always mounts a fresh screen;
/// the previous one is dropped together with any countdown it was running.
#[derive(Debug)]
pub struct Router {
    screen: Screen,
    settings: Settings,
}

impl Router {
    pub fn new(settings: Settings) -> Self {
        Self {
            screen: Screen::Login(LoginScreenData::default()),
            settings,
        }
    }

    pub fn navigate_to(&mut self, destination: Destination) {
        info!("navigating {:?} -> {:?}", self.current(), destination);
        self.screen = match destination {
            Destination::Login => Screen::Login(LoginScreenData::default()),
            Destination::SignUp => Screen::SignUp(SignUpScreenData::new(&self.settings)),
        };
    }

    pub fn current(&self) -> Destination {
        self.screen.destination()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }
}
