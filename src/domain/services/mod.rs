pub mod actions;
mod analysis;
mod app_state;
pub mod events;
mod extractor;
mod report;
mod scroll;
mod session;

pub use analysis::*;
pub use app_state::*;
pub use extractor::*;
pub use report::*;
pub use scroll::*;
pub use session::*;
