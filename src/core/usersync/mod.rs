pub mod utils;

pub use utils::user_syncs;
