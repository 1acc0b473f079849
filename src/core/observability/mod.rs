mod provider;

pub use provider::{LogGuards, init};
