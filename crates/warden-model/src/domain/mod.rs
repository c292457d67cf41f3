mod constants;
pub use constants::{COMPOSE_FILE_NAME, DATA_DIR_NAME, SECONDS_PER_DAY, SKIP_MARKER_FILE, TIMEFILE_NAME};

mod days;
pub use days::ExtendDays;

mod instance;
pub use instance::InstanceName;
