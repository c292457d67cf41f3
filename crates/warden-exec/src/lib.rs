mod error;
pub use error::ExecError;

mod launcher;
pub use launcher::{ComposeLauncher, LaunchAction};
