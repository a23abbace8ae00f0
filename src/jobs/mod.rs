pub mod envelope;
pub mod runner;

pub use envelope::{Envelope, JobTag};
pub use runner::JobRunner;
