mod extend;
pub use extend::{ExtendOutcome, ExtendRequest};

mod launch;
pub use launch::LaunchRequest;
