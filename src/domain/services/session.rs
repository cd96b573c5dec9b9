#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use crate::domain::models::AnalysisError;
use crate::domain::models::AnalysisResult;
use crate::domain::models::AnalysisTicket;
use crate::domain::models::SessionPhase;
use crate::domain::models::QUESTIONS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected,
    Advanced,
    Completed,
}

/// State machine for one run through the questionnaire.
///
/// Welcome -> Collecting -> Analyzing -> Results | Error, and back to Welcome
/// only through `restart`. While collecting, `answers.len() == current_index`
/// holds after every operation.
pub struct Session {
    questions: &'static [&'static str],
    phase: SessionPhase,
    answers: Vec<String>,
    current_index: usize,
    result: Option<AnalysisResult>,
    generation: u64,
    transitioning: bool,
    ticket_armed: bool,
    analysis_in_flight: bool,
}

impl Default for Session {
    fn default() -> Session {
        return Session::new(&QUESTIONS);
    }
}

impl Session {
    pub fn new(questions: &'static [&'static str]) -> Session {
        return Session {
            questions,
            phase: SessionPhase::Welcome,
            answers: vec![],
            current_index: 0,
            result: None,
            generation: 0,
            transitioning: false,
            ticket_armed: false,
            analysis_in_flight: false,
        };
    }

    pub fn phase(&self) -> SessionPhase {
        return self.phase;
    }

    pub fn answers(&self) -> &[String] {
        return &self.answers;
    }

    pub fn current_index(&self) -> usize {
        return self.current_index;
    }

    pub fn question_count(&self) -> usize {
        return self.questions.len();
    }

    pub fn current_question(&self) -> Option<&'static str> {
        if self.phase != SessionPhase::Collecting {
            return None;
        }

        return self.questions.get(self.current_index).copied();
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        return self.result.as_ref();
    }

    pub fn generation(&self) -> u64 {
        return self.generation;
    }

    pub fn is_transitioning(&self) -> bool {
        return self.transitioning;
    }

    /// True while input must not be accepted: a question transition is
    /// pending or a remote call is outstanding.
    pub fn is_busy(&self) -> bool {
        return self.transitioning || self.analysis_in_flight || self.ticket_armed;
    }

    pub fn begin(&mut self) -> bool {
        if self.phase != SessionPhase::Welcome {
            return false;
        }

        self.phase = SessionPhase::Collecting;
        tracing::debug!(generation = self.generation, "session started");
        return true;
    }

    /// Records an answer for the current question. `hold_transition` raises
    /// the cosmetic transition flag, which blocks input until
    /// `finish_transition` is called for this generation.
    pub fn submit(&mut self, text: &str, hold_transition: bool) -> SubmitOutcome {
        if self.phase != SessionPhase::Collecting || self.is_busy() {
            return SubmitOutcome::Rejected;
        }

        let answer = text.trim();
        if answer.is_empty() {
            return SubmitOutcome::Rejected;
        }

        self.answers.push(answer.to_string());

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.transitioning = hold_transition;
            return SubmitOutcome::Advanced;
        }

        self.phase = SessionPhase::Analyzing;
        self.ticket_armed = true;
        tracing::debug!(
            generation = self.generation,
            answers = self.answers.len(),
            "session entered analyzing"
        );

        return SubmitOutcome::Completed;
    }

    pub fn finish_transition(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.transitioning {
            return false;
        }

        self.transitioning = false;
        return true;
    }

    /// Hands out the analysis request for the current entry into Analyzing.
    /// Returns `Some` exactly once per entry, `None` afterwards.
    pub fn take_ticket(&mut self) -> Option<AnalysisTicket> {
        if self.phase != SessionPhase::Analyzing || !self.ticket_armed {
            return None;
        }

        self.ticket_armed = false;
        self.analysis_in_flight = true;

        return Some(AnalysisTicket {
            generation: self.generation,
            answers: self.answers.clone(),
        });
    }

    /// Applies the outcome of the analysis operation. Outcomes for a previous
    /// generation, or arriving outside of Analyzing, are ignored.
    pub fn complete_analysis(
        &mut self,
        generation: u64,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> bool {
        if generation != self.generation
            || self.phase != SessionPhase::Analyzing
            || !self.analysis_in_flight
        {
            tracing::warn!(
                generation,
                current_generation = self.generation,
                phase = %self.phase,
                "dropping stale analysis outcome"
            );
            return false;
        }

        self.analysis_in_flight = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.phase = SessionPhase::Results;
            }
            Err(err) => {
                tracing::error!(error = %err, generation, "analysis failed");
                self.result = None;
                self.phase = SessionPhase::Error;
            }
        }

        return true;
    }

    pub fn restart(&mut self) -> bool {
        if !self.phase.is_terminal() {
            return false;
        }

        self.phase = SessionPhase::Welcome;
        self.answers.clear();
        self.current_index = 0;
        self.result = None;
        self.transitioning = false;
        self.ticket_armed = false;
        self.analysis_in_flight = false;
        self.generation += 1;

        return true;
    }
}
