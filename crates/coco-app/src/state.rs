// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ViewKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuVisibility {
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoachVisibility {
    Hidden,
    Visible,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub view: ViewKind,
    pub menu: MenuVisibility,
    pub coach: CoachVisibility,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: ViewKind::Dashboard,
            menu: MenuVisibility::Hidden,
            coach: CoachVisibility::Hidden,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SelectView(ViewKind),
    NextView,
    PrevView,
    OpenMenu,
    CloseMenu,
    OpenCoach,
    CloseCoach,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ViewChanged(ViewKind),
    MenuVisibilityChanged(MenuVisibility),
    CoachVisibilityChanged(CoachVisibility),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SelectView(view) => self.select_view(view),
            AppCommand::NextView => self.rotate_view(1),
            AppCommand::PrevView => self.rotate_view(-1),
            AppCommand::OpenMenu => {
                self.menu = MenuVisibility::Visible;
                vec![AppEvent::MenuVisibilityChanged(self.menu)]
            }
            AppCommand::CloseMenu => {
                self.menu = MenuVisibility::Hidden;
                vec![AppEvent::MenuVisibilityChanged(self.menu)]
            }
            AppCommand::OpenCoach => {
                self.coach = CoachVisibility::Visible;
                vec![
                    AppEvent::CoachVisibilityChanged(self.coach),
                    self.set_status("coach open"),
                ]
            }
            AppCommand::CloseCoach => {
                self.coach = CoachVisibility::Hidden;
                vec![
                    AppEvent::CoachVisibilityChanged(self.coach),
                    self.set_status("coach hidden"),
                ]
            }
            AppCommand::SetStatus(message) => {
                vec![self.set_status(&message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    // Navigating anywhere dismisses the slide-over menu.
    fn select_view(&mut self, view: ViewKind) -> Vec<AppEvent> {
        self.view = view;
        let mut events = vec![AppEvent::ViewChanged(self.view)];
        if self.menu == MenuVisibility::Visible {
            self.menu = MenuVisibility::Hidden;
            events.push(AppEvent::MenuVisibilityChanged(self.menu));
        }
        events
    }

    fn rotate_view(&mut self, delta: isize) -> Vec<AppEvent> {
        let views = ViewKind::ALL;
        let current = views
            .iter()
            .position(|view| *view == self.view)
            .unwrap_or(0) as isize;
        let len = views.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.select_view(views[next])
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
