//! Where a ride ends.

use tracing::warn;

use super::surface::{cumulative_offset, Document};
use crate::config::ElevatorConfig;

/// Destination scroll offset for `config` on `doc`.
///
/// * No target (or an empty one): the top of the page, pushed down by
///   `vertical_padding`.
/// * A target: the anchor's document offset minus `vertical_padding`, so the
///   ride stops short of it. An id that does not resolve counts as offset
///   `0`, which yields `-vertical_padding`.
pub fn resolve<D: Document + ?Sized>(config: &ElevatorConfig, doc: &D) -> f64 {
    match config.target.as_deref() {
        None | Some("") => config.vertical_padding,
        Some(id) => {
            if doc.element_by_id(id).is_none() {
                warn!(target_id = id, "Elevator target not found, riding to offset 0");
            }
            cumulative_offset(doc, id) - config.vertical_padding
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::surface::NodeId;

    /// One anchor "lobby" 1200 units down, nested one level
    struct Building;

    impl Document for Building {
        fn element_by_id(&self, id: &str) -> Option<NodeId> {
            (id == "lobby").then_some(1)
        }

        fn offset_top(&self, node: NodeId) -> f64 {
            if node == 1 { 1000.0 } else { 200.0 }
        }

        fn offset_parent(&self, node: NodeId) -> Option<NodeId> {
            (node == 1).then_some(0)
        }
    }

    fn config(target: Option<&str>, padding: f64) -> ElevatorConfig {
        ElevatorConfig {
            target: target.map(str::to_string),
            vertical_padding: padding,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_target_is_padding() {
        for padding in [0.0, 1.0, 12.5, 400.0] {
            assert_eq!(resolve(&config(None, padding), &Building), padding);
        }
    }

    #[test]
    fn test_empty_target_means_top() {
        assert_eq!(resolve(&config(Some(""), 5.0), &Building), 5.0);
    }

    #[test]
    fn test_target_subtracts_padding() {
        assert_eq!(resolve(&config(Some("lobby"), 50.0), &Building), 1150.0);
        assert_eq!(resolve(&config(Some("lobby"), 0.0), &Building), 1200.0);
    }

    #[test]
    fn test_unresolved_target_is_negative_padding() {
        assert_eq!(resolve(&config(Some("penthouse"), 50.0), &Building), -50.0);
    }
}
