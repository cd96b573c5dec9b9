mod action;
mod analysis;
mod backend;
mod event;
mod loading;
mod phase;
mod prompt;
mod questions;
mod textarea;

pub use action::*;
pub use analysis::*;
pub use backend::*;
pub use event::*;
pub use loading::*;
pub use phase::*;
pub use prompt::*;
pub use questions::*;
pub use textarea::*;
