use serde::{Deserialize, Serialize};

/// Wire body of `POST /start` and `POST /stop`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LaunchRequest {
    /// Name of the instance whose deployment descriptor is targeted.
    pub server: String,
}
