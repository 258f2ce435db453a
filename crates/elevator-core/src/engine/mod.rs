//! The elevator engine: animate a viewport's scroll offset from wherever it
//! is to a destination, with muzak on the way and a ding on arrival.
//!
//! # Layers
//!
//! ## Atoms
//! - `easing` - quadratic ease-in-out over absolute positions
//! - `timing` - ride duration and elapsed time
//! - `surface` - document/viewport capabilities and the offset walk
//! - `frame` - frame scheduling capability and the host-side queue
//! - `destination` - where a ride ends
//!
//! ## Controller
//! - `elevator` - the run state machine tying the atoms together
//!
//! # Usage
//!
//! ```ignore
//! use elevator_core::engine::{Elevator, FrameQueue};
//! use elevator_core::sound::{Silent, TerminalBell};
//!
//! let mut elevator = Elevator::new(config, page, FrameQueue::new(),
//!     Box::new(Silent), Box::new(TerminalBell::stdout()));
//! elevator.start();
//!
//! // Once per display refresh:
//! if elevator.scheduler_mut().pop_due().is_some() {
//!     elevator.step(now_ms);
//! }
//! ```

pub mod destination;
pub mod easing;
pub mod frame;
pub mod surface;
pub mod timing;

mod elevator;

pub use elevator::{Elevator, Hook};
pub use frame::{FrameHandle, FrameQueue, FrameScheduler};
pub use surface::{cumulative_offset, Document, NodeId, Viewport};
