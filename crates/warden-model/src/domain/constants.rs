//! Well-known filesystem names shared across the controller.
//!
//! This module contains the fixed file and directory names the controller
//! agrees on with the external autostop and deployment tooling. Keeping them
//! here avoids scattering magic strings throughout the codebase.

/// Name of the per-instance expiry file under the state directory.
///
/// The file holds a single decimal Unix timestamp (seconds) and lives at
/// `<state_dir>/<instance>/timefile`.
pub const TIMEFILE_NAME: &str = "timefile";

/// Directory under an instance that contains its sub-units.
///
/// Each direct subdirectory of `<catalog_root>/<instance>/data/` is an
/// independently-autostoppable process group.
pub const DATA_DIR_NAME: &str = "data";

/// Presence-only marker file the autostop tooling checks inside a sub-unit.
///
/// A sub-unit carrying this file is exempt from autostop. Only presence
/// matters; the file is always zero bytes.
pub const SKIP_MARKER_FILE: &str = ".skipfile";

/// Deployment descriptor expected inside each instance directory.
pub const COMPOSE_FILE_NAME: &str = "docker-compose.yml";

/// Whole seconds in one day, used to turn an extension in days into an
/// expiry timestamp offset.
pub const SECONDS_PER_DAY: i64 = 86_400;
