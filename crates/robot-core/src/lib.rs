//! Command dispatch and shared state for the robot bridge.
//!
//! Three input adapters (HTTP control, the message bus, and the voice loop)
//! all funnel into one [`Dispatcher`]:
//!
//! ```text
//! payload ──decode──▶ Command ──interpret──▶ RobotState (under lock)
//!                                   │
//!                                   └──▶ OutputSink: pin writes + speech queue
//! ```
//!
//! [`RobotStore`] guards the state with a single mutex, and the
//! [`OutputSink`] serializes speech through one worker task, so concurrent
//! adapters can neither interleave half-applied commands nor talk over each
//! other.

pub mod dispatcher;
pub mod interpreter;
pub mod lexicon;
pub mod sink;
pub mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use dispatcher::Dispatcher;
pub use interpreter::{interpret, Effects};
pub use lexicon::Lexicon;
pub use sink::OutputSink;
pub use store::{RobotState, RobotStore};
