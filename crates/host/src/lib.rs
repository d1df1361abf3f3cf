pub mod config;
pub mod context;
pub mod diff;
pub mod dispatcher;
pub mod host;
pub mod host_interface;
pub mod outcome;
pub mod scratch;

pub use config::{Config, HostConfig};
pub use context::{CallStack, HostContext};
pub use diff::{AccountDiff, BalanceDiff, DestroyedSet, FrameDiff};
pub use dispatcher::ChildOutcome;
pub use host::Host;
pub use outcome::Execution;
pub use scratch::ScratchBuffers;
