pub mod config;
pub mod run;
pub mod simulate;

use clap::Args;
use elevator_core::ElevatorConfig;

/// Ride settings that override the `[elevator]` config section for one run
#[derive(Args, Debug, Clone, Default)]
pub struct RideArgs {
    /// Anchor id to ride to instead of the top (e.g. "5", "elevator")
    #[arg(short, long)]
    pub target: Option<String>,
    /// Stop this far short of the destination
    #[arg(short, long, allow_negative_numbers = true)]
    pub padding: Option<f64>,
    /// Fixed ride duration in milliseconds (0 = derive from distance)
    #[arg(short, long)]
    pub duration: Option<f64>,
}

impl RideArgs {
    pub fn apply(&self, config: &mut ElevatorConfig) {
        if let Some(target) = &self.target {
            config.target = Some(target.clone());
        }
        if let Some(padding) = self.padding {
            config.vertical_padding = padding;
        }
        if let Some(duration) = self.duration {
            config.duration_ms = Some(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ride_args_override_only_what_is_given() {
        let mut config = ElevatorConfig {
            target: Some("3".to_string()),
            vertical_padding: 10.0,
            ..Default::default()
        };

        RideArgs { duration: Some(500.0), ..Default::default() }.apply(&mut config);
        assert_eq!(config.target.as_deref(), Some("3"));
        assert_eq!(config.vertical_padding, 10.0);
        assert_eq!(config.duration_ms, Some(500.0));

        RideArgs {
            target: Some("elevator".to_string()),
            padding: Some(-4.0),
            duration: None,
        }
        .apply(&mut config);
        assert_eq!(config.target.as_deref(), Some("elevator"));
        assert_eq!(config.vertical_padding, -4.0);
        assert_eq!(config.duration_ms, Some(500.0));
    }
}
