//! Sound cues for the ride.
//!
//! A ride uses two independent channels, travel and arrival. Every channel
//! is best effort: failures are reported to the caller as [`SoundError`] and
//! the engine only logs them.

use std::io::{self, Write};
use std::process::{Child, Command, Stdio};

use tracing::debug;

use crate::config::SoundSource;
use crate::error::SoundError;

/// One playable sound channel
pub trait Sound {
    /// Start playback from the beginning, restarting if already playing
    fn play_from_start(&mut self) -> Result<(), SoundError>;

    /// Stop playback. Stopping a silent channel is not an error.
    fn stop(&mut self) -> Result<(), SoundError>;

    /// Whether the channel is currently producing sound
    fn is_playing(&self) -> bool {
        false
    }
}

/// A channel that never makes a sound
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Sound for Silent {
    fn play_from_start(&mut self) -> Result<(), SoundError> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SoundError> {
        Ok(())
    }
}

/// The terminal bell (BEL). A one-shot "ding" with nothing to stop.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sound for TerminalBell<W> {
    fn play_from_start(&mut self) -> Result<(), SoundError> {
        self.out.write_all(b"\x07").map_err(SoundError::Terminal)?;
        self.out.flush().map_err(SoundError::Terminal)
    }

    fn stop(&mut self) -> Result<(), SoundError> {
        Ok(())
    }
}

/// Plays a sound by running an external player, e.g. `["paplay", "ding.wav"]`.
///
/// Stopping kills the player process.
#[derive(Debug)]
pub struct CommandSound {
    argv: Vec<String>,
    child: Option<Child>,
}

impl CommandSound {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv, child: None }
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    fn kill_child(&mut self) -> Result<(), SoundError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        // Already exited players report InvalidInput; that is fine
        match child.kill() {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => {}
            Err(e) => return Err(SoundError::Stop(e)),
        }
        child.wait().map_err(SoundError::Stop)?;
        Ok(())
    }
}

impl Sound for CommandSound {
    fn play_from_start(&mut self) -> Result<(), SoundError> {
        self.kill_child()?;

        let (program, args) = self.argv.split_first().ok_or(SoundError::EmptyCommand)?;
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SoundError::Spawn {
                program: program.clone(),
                source,
            })?;

        debug!(program = %program, pid = child.id(), "Sound player started");
        self.child = Some(child);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SoundError> {
        self.kill_child()
    }

    fn is_playing(&self) -> bool {
        self.child.is_some()
    }
}

impl Drop for CommandSound {
    fn drop(&mut self) {
        let _ = self.kill_child();
    }
}

/// Build the channel for a configured source.
///
/// `builtin` is the channel's own default asset and is used for
/// [`SoundSource::Builtin`].
pub fn from_source(source: &SoundSource, builtin: Box<dyn Sound>) -> Box<dyn Sound> {
    match source {
        SoundSource::Builtin => builtin,
        SoundSource::Bell => Box::new(TerminalBell::stdout()),
        SoundSource::Silent => Box::new(Silent),
        SoundSource::Command(argv) => Box::new(CommandSound::new(argv.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_writes_bel() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play_from_start().unwrap();
        bell.play_from_start().unwrap();
        bell.stop().unwrap();
        assert_eq!(bell.into_inner(), b"\x07\x07");
    }

    #[test]
    fn test_empty_command_is_an_error() {
        let mut sound = CommandSound::new(Vec::new());
        assert!(matches!(sound.play_from_start(), Err(SoundError::EmptyCommand)));
        assert!(!sound.is_playing());
    }

    #[test]
    fn test_missing_player_is_a_spawn_error() {
        let mut sound = CommandSound::new(vec!["elevator-no-such-player-binary".into()]);
        assert!(matches!(sound.play_from_start(), Err(SoundError::Spawn { .. })));
        assert!(!sound.is_playing());
        // Stopping a channel that never started is fine
        sound.stop().unwrap();
    }

    #[test]
    fn test_from_source_picks_builtin() {
        let mut sound = from_source(&SoundSource::Builtin, Box::new(TerminalBell::new(Vec::new())));
        assert!(sound.play_from_start().is_ok());

        let mut silent = from_source(&SoundSource::Silent, Box::new(TerminalBell::new(Vec::new())));
        assert!(silent.play_from_start().is_ok());
        assert!(!silent.is_playing());

        let command = from_source(
            &SoundSource::Command(vec!["true".into()]),
            Box::new(Silent),
        );
        assert!(!command.is_playing());
    }
}
