pub mod constants;
pub mod logging;
pub mod progress;
pub mod text;

pub use logging::init_logging;
pub use progress::ProgressReporter;
pub use text::{normalize_label, title_case};
