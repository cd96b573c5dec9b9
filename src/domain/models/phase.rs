#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
pub enum SessionPhase {
    #[default]
    Welcome,
    Collecting,
    Analyzing,
    Results,
    Error,
}

impl SessionPhase {
    /// Results and Error can only be left through a restart.
    pub fn is_terminal(&self) -> bool {
        return matches!(self, SessionPhase::Results | SessionPhase::Error);
    }
}
