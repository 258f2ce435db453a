//! Frame scheduling.
//!
//! The engine asks for "one more frame" and the host answers by calling
//! [`Elevator::step`](super::Elevator::step) on its next display refresh.
//! [`FrameQueue`] is the host side of that contract for event-loop driven
//! hosts and tests alike.

use std::collections::VecDeque;

/// Identifies a requested frame so it can be cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Something that can call the engine back on the next display refresh
pub trait FrameScheduler {
    /// Request one callback on the next refresh
    fn request_frame(&mut self) -> FrameHandle;

    /// Drop a previously requested callback. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Pending frame requests, drained by the host once per refresh
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when some frame is waiting to be delivered
    #[inline]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of frames waiting
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take the oldest pending frame.
    ///
    /// Call at most once per refresh; the step it triggers may enqueue the
    /// next frame, which belongs to the following refresh.
    pub fn pop_due(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = FrameHandle(self.next_id);
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }
}
