mod domain;
pub use domain::{COMPOSE_FILE_NAME, DATA_DIR_NAME, SECONDS_PER_DAY, SKIP_MARKER_FILE, TIMEFILE_NAME};
pub use domain::{ExtendDays, InstanceName};

mod error;
pub use error::{ModelError, ModelResult};

mod api;
pub use api::{ExtendOutcome, ExtendRequest, LaunchRequest};
