pub mod record;
mod util;

pub use record::EventRecord;
pub use util::*;
