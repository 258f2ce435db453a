use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Failure of a single sound channel.
///
/// The engine never propagates these; they are logged and the ride goes on.
#[derive(Error, Debug)]
pub enum SoundError {
    #[error("Failed to spawn sound player '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to stop sound player: {0}")]
    Stop(#[source] std::io::Error),

    #[error("Failed to write to terminal: {0}")]
    Terminal(#[source] std::io::Error),

    #[error("Sound command is empty")]
    EmptyCommand,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn read_missing() -> Result<String> {
        Ok(std::fs::read_to_string("/nonexistent/elevator/config.toml")?)
    }

    fn parse_broken() -> Result<toml::Value> {
        Ok(toml::from_str("[elevator\nduration = ")?)
    }

    #[test]
    fn test_io_and_toml_errors_convert() {
        assert!(matches!(read_missing(), Err(Error::Io(_))));
        assert!(matches!(parse_broken(), Err(Error::Toml(_))));
    }

    #[test]
    fn test_error_display() {
        let err = Error::Config("no home directory".to_string());
        assert_eq!(err.to_string(), "Configuration error: no home directory");

        let err = SoundError::EmptyCommand;
        assert_eq!(err.to_string(), "Sound command is empty");
    }
}
