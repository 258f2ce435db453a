//! Makes the travel muzak visible.
//!
//! Terminals cannot play a tune on their own, so the travel channel is
//! wrapped in an indicator that the status bar reads to show a ticker while
//! the muzak is "playing".

use std::cell::Cell;
use std::rc::Rc;

use elevator_core::sound::Sound;
use elevator_core::SoundError;

const TICKER: &str = "~ ♪ the girl from ipanema goes walking ♫ ~ ";

/// A sound channel that mirrors its playing state into a [`MuzakHandle`]
pub struct MuzakIndicator {
    inner: Box<dyn Sound>,
    playing: Rc<Cell<bool>>,
}

impl MuzakIndicator {
    pub fn wrap(inner: Box<dyn Sound>) -> (Self, MuzakHandle) {
        let playing = Rc::new(Cell::new(false));
        let handle = MuzakHandle { playing: playing.clone() };
        (Self { inner, playing }, handle)
    }
}

impl Sound for MuzakIndicator {
    fn play_from_start(&mut self) -> Result<(), SoundError> {
        // The ticker runs even when the real player fails
        self.playing.set(true);
        self.inner.play_from_start()
    }

    fn stop(&mut self) -> Result<(), SoundError> {
        self.playing.set(false);
        self.inner.stop()
    }

    fn is_playing(&self) -> bool {
        self.playing.get()
    }
}

/// Read side of a [`MuzakIndicator`]
#[derive(Debug, Clone)]
pub struct MuzakHandle {
    playing: Rc<Cell<bool>>,
}

impl MuzakHandle {
    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }

    /// `width` columns of the scrolling ticker at animation tick `tick`
    pub fn ticker(&self, tick: u64, width: usize) -> String {
        let chars: Vec<char> = TICKER.chars().collect();
        let start = (tick as usize) % chars.len();
        chars.iter().cycle().skip(start).take(width).collect()
    }
}
