#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::time::Duration;

use ratatui::prelude::Rect;
use ratatui::text::Line;
use tui_textarea::Input;
use tui_textarea::Key;

use super::Report;
use super::Scroll;
use super::Session;
use super::SubmitOutcome;
use crate::domain::models::Action;
use crate::domain::models::AnalysisError;
use crate::domain::models::AnalysisResult;
use crate::domain::models::Loading;
use crate::domain::models::SessionPhase;

pub struct AppState {
    pub session: Session,
    pub scroll: Scroll,
    pub loading: Loading,
    pub backend_warning: Option<String>,
    pub notice: Option<String>,
    pub show_visual_description: bool,
    pub last_known_height: u16,
    pub last_known_width: u16,
    report: Vec<Line<'static>>,
    transition_delay: Duration,
}

impl AppState {
    pub fn new(session: Session, transition_delay: Duration) -> AppState {
        return AppState {
            session,
            scroll: Scroll::default(),
            loading: Loading::default(),
            backend_warning: None,
            notice: None,
            show_visual_description: false,
            last_known_height: 0,
            last_known_width: 0,
            report: vec![],
            transition_delay,
        };
    }

    pub fn report(&self) -> &[Line<'static>] {
        return &self.report;
    }

    /// True when typed characters belong in the answer box.
    pub fn accepts_text(&self) -> bool {
        return self.session.phase() == SessionPhase::Collecting && !self.session.is_busy();
    }

    /// Returns whether the input box should be cleared, and the actions to hand
    /// to the worker.
    pub fn handle_enter(&mut self, text: &str) -> (bool, Vec<Action>) {
        match self.session.phase() {
            SessionPhase::Welcome => {
                self.session.begin();
                return (true, vec![]);
            }
            SessionPhase::Collecting => {
                return self.submit(text);
            }
            SessionPhase::Error => {
                self.restart();
                return (true, vec![]);
            }
            SessionPhase::Analyzing | SessionPhase::Results => {
                return (false, vec![]);
            }
        }
    }

    fn submit(&mut self, text: &str) -> (bool, Vec<Action>) {
        let hold_transition = !self.transition_delay.is_zero();

        match self.session.submit(text, hold_transition) {
            SubmitOutcome::Rejected => {
                return (false, vec![]);
            }
            SubmitOutcome::Advanced => {
                self.loading = Loading::new("Next question");
                if self.session.is_transitioning() {
                    return (
                        true,
                        vec![Action::QuestionTransition(
                            self.session.generation(),
                            self.transition_delay,
                        )],
                    );
                }
                return (true, vec![]);
            }
            SubmitOutcome::Completed => {
                self.loading = Loading::new("Connecting the dots");
                let actions = self
                    .session
                    .take_ticket()
                    .map(Action::AnalysisRequest)
                    .into_iter()
                    .collect();

                return (true, actions);
            }
        }
    }

    /// Single key shortcuts on the report and error screens. Returns whether
    /// the key was consumed.
    pub fn handle_key(&mut self, input: &Input) -> (bool, Option<Action>) {
        if input.ctrl || input.alt {
            return (false, None);
        }

        match (self.session.phase(), &input.key) {
            (SessionPhase::Results, Key::Char('v')) => {
                self.show_visual_description = !self.show_visual_description;
                self.sync_dependants();
                return (true, None);
            }
            (SessionPhase::Results, Key::Char('s')) => {
                if let Some(result) = self.session.result() {
                    self.notice = Some("Saving image...".to_string());
                    return (
                        true,
                        Some(Action::SaveImage(
                            result.image_url.to_string(),
                            result.theme.to_string(),
                        )),
                    );
                }
                return (true, None);
            }
            (SessionPhase::Results | SessionPhase::Error, Key::Char('r')) => {
                self.restart();
                return (true, None);
            }
            _ => {
                return (false, None);
            }
        }
    }

    /// Up and Down move the cursor inside the answer box, and scroll the
    /// report everywhere else.
    pub fn handle_vertical(&mut self, key: Key) -> Option<Input> {
        if self.accepts_text() {
            return Some(Input {
                key,
                ctrl: false,
                alt: false,
            });
        }

        match key {
            Key::Up => self.scroll.up(),
            Key::Down => self.scroll.down(),
            _ => (),
        }

        return None;
    }

    pub fn handle_question_ready(&mut self, generation: u64) {
        self.session.finish_transition(generation);
    }

    pub fn handle_analysis_response(
        &mut self,
        generation: u64,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) {
        if !self.session.complete_analysis(generation, outcome) {
            return;
        }

        self.show_visual_description = false;
        self.scroll.reset();
        self.sync_dependants();
    }

    pub fn restart(&mut self) {
        if !self.session.restart() {
            return;
        }

        self.show_visual_description = false;
        self.notice = None;
        self.report = vec![];
        self.scroll.reset();
        self.sync_dependants();
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        if let Some(result) = self.session.result() {
            self.report = Report::lines(
                result,
                self.last_known_width,
                self.show_visual_description,
            );
        }

        let report_length = u16::try_from(self.report.len()).unwrap_or(u16::MAX);
        self.scroll
            .set_state(report_length, self.last_known_height);
    }
}
