use env_logger::Builder;
use log::LevelFilter;
pub use log::{debug, info, warn};

pub fn init() {
    // Init the logger, tolerating repeated calls from tests
    let mut builder = Builder::from_default_env();
    let _ = builder.filter(None, LevelFilter::Info).try_init();
}
