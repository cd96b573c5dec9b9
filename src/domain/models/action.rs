use std::time::Duration;

use super::AnalysisTicket;

pub enum Action {
    AnalysisRequest(AnalysisTicket),
    QuestionTransition(u64, Duration),
    SaveImage(String, String),
}
