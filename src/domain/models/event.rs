use tui_textarea::Input;

use super::AnalysisError;
use super::AnalysisResult;

pub enum Event {
    AnalysisResponse(u64, Result<AnalysisResult, AnalysisError>),
    BackendUnavailable(String),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    Notice(String),
    QuestionReady(u64),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
