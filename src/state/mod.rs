pub mod app_state;
pub mod diff_state;
pub mod stats;

pub use app_state::AppState;
pub use diff_state::DiffState;
