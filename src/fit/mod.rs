//! Nearest-point search orchestration.
//!
//! Responsibilities:
//!
//! - plan a search window per point (`window`)
//! - search every point in parallel (`search`)
//! - own inputs and results for a run (`session`)

pub mod search;
pub mod session;
pub mod window;

pub use search::*;
pub use session::*;
pub use window::*;
