//! What the engine needs from the page it scrolls.
//!
//! The page is split into two capabilities so the destination math can be
//! exercised against a bare layout while rides need a scrollable viewport.

/// Index of an element in a [`Document`]
pub type NodeId = usize;

/// Read-only element geometry, modelled after offset-parent layout:
/// every element knows its top offset relative to its offset parent.
pub trait Document {
    /// Look up an element by its anchor id
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Top offset of `node` relative to its offset parent
    fn offset_top(&self, node: NodeId) -> f64;

    /// The element `node` is positioned against, `None` at the root
    fn offset_parent(&self, node: NodeId) -> Option<NodeId>;
}

/// A scrollable view onto a [`Document`].
///
/// The scroll offset is shared state: anything may move it, and a running
/// ride overwrites it on its next frame.
pub trait Viewport: Document {
    /// Current vertical scroll offset
    fn scroll_offset(&self) -> f64;

    /// Jump to a vertical scroll offset
    fn scroll_to(&mut self, offset: f64);
}

/// Offset of element `id` from the top of the document.
///
/// Sums `offset_top` over the whole offset-parent chain. An id that does not
/// resolve contributes nothing, so the result is `0.0`.
pub fn cumulative_offset<D: Document + ?Sized>(doc: &D, id: &str) -> f64 {
    let mut offset = 0.0;
    let mut node = doc.element_by_id(id);
    while let Some(current) = node {
        offset += doc.offset_top(current);
        node = doc.offset_parent(current);
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    /// body(0) > main(120) > section "a" (300) > figure "b" (40)
    struct Nested;

    impl Document for Nested {
        fn element_by_id(&self, id: &str) -> Option<NodeId> {
            match id {
                "a" => Some(2),
                "b" => Some(3),
                _ => None,
            }
        }

        fn offset_top(&self, node: NodeId) -> f64 {
            [0.0, 120.0, 300.0, 40.0][node]
        }

        fn offset_parent(&self, node: NodeId) -> Option<NodeId> {
            [None, Some(0), Some(1), Some(2)][node]
        }
    }

    #[test]
    fn test_walks_whole_parent_chain() {
        assert_eq!(cumulative_offset(&Nested, "a"), 420.0);
        assert_eq!(cumulative_offset(&Nested, "b"), 460.0);
    }

    #[test]
    fn test_unknown_id_is_zero() {
        assert_eq!(cumulative_offset(&Nested, "missing"), 0.0);
    }
}
