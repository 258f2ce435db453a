//! The page you ride the elevator through.
//!
//! A header, twelve illustrated sections and the elevator button, laid out
//! as rows for a given terminal width. The layout doubles as the engine's
//! [`Document`]: every block is an element positioned inside `main`, which
//! is positioned inside the page body. Offsets are reported in pixels
//! ([`PX_PER_ROW`] per terminal row) so ride timings feel like Elevator.js
//! in a browser.

use std::collections::HashMap;
use std::ops::Range;

use elevator_core::engine::{Document, NodeId};
use unicode_width::UnicodeWidthStr;

/// Pixels per terminal row
pub const PX_PER_ROW: f64 = 16.0;

/// Where the real thing lives
pub const PROJECT_URL: &str = "https://tholman.com/elevator.js/";

/// Rows between the top of the body and `main`
const MAIN_TOP: u16 = 1;
/// Blank rows above and below each section
const SECTION_PADDING: usize = 2;
/// Text never wraps wider than this, even on huge terminals
const MAX_TEXT_WIDTH: usize = 72;

pub fn rows_to_px(rows: u16) -> f64 {
    rows as f64 * PX_PER_ROW
}

pub fn px_to_row(px: f64) -> u16 {
    (px / PX_PER_ROW).round().clamp(0.0, u16::MAX as f64) as u16
}

/// One illustrated section of the page
pub struct Section {
    pub text: &'static str,
    pub art: &'static [&'static str],
}

const BEAR_WAVING: &[&str] = &[
    r"  _     _      ",
    r" ( \---/ )   / ",
    r"  ) ^ ^ (   /  ",
    r" (   w   )_/   ",
    r"  \_____/      ",
];

const BEAR: &[&str] = &[
    r"  _     _  ",
    r" ( \---/ ) ",
    r"  ) . . (  ",
    r" (   Y   ) ",
    r"  \ '-' /  ",
    r"   '---'   ",
];

const CAMERA: &[&str] = &[
    r"    ____     ",
    r" __|____|___ ",
    r"|  .-----.  |",
    r"| |  (o)  | |",
    r"|  '-----'  |",
    r"|___________|",
];

const CHICK: &[&str] = &[
    r"    __    ",
    r"  <(o )___",
    r"   ( ._> /",
    r"    `---' ",
];

const DOWN: &[&str] = &[
    r"   | |   ",
    r"   | |   ",
    r" __| |__ ",
    r" \     / ",
    r"  \   /  ",
    r"   \ /   ",
];

const ELEVATOR: &[&str] = &[
    r" _________ ",
    r"|  _____  |",
    r"| |  |  | |",
    r"| |  |  | |",
    r"| |__|__| |",
    r"|_________|",
    r"   [ ^ ]   ",
];

const HEDGEHOG: &[&str] = &[
    r"    ,/|/|/|,   ",
    r"  ,/|/|/|/|/,  ",
    r" <o  ) ) ) ) ) ",
    r"  `--'-'-'-'-' ",
];

const KITTY: &[&str] = &[
    r" /\_/\  ",
    r"( o.o ) ",
    r" > ^ <  ",
];

const ROSE: &[&str] = &[
    r"  _ @ _  ",
    r" (_\|/_) ",
    r"   \|/   ",
    r"  --|--  ",
    r"    |    ",
];

const SUN: &[&str] = &[
    r"  \  |  /  ",
    r"   .---.   ",
    r"--(     )--",
    r"   '---'   ",
    r"  /  |  \  ",
];

const UP_ARROW: &[&str] = &[
    r"   /\   ",
    r"  /  \  ",
    r" /_  _\ ",
    r"   ||   ",
];

pub const SECTIONS: &[Section] = &[
    Section { text: "Let's make our way to the page's end.", art: BEAR_WAVING },
    Section { text: "Remember, we're starting from the very top.", art: BEAR },
    Section { text: "Thus, a \"back to top\" feature isn't immediately necessary.", art: CAMERA },
    Section { text: "Heading deeper and deeper.", art: CHICK },
    Section { text: "Quite the journey with all this scrolling, isn't it?", art: DOWN },
    Section { text: "The payoff for this scroll had better be significant.", art: ELEVATOR },
    Section { text: "Returning to the top seems like it'll be a lengthy endeavor.", art: HEDGEHOG },
    Section { text: "Wishing for a simpler method to ascend...", art: KITTY },
    Section { text: "...one that's not only efficient but also entertaining.", art: ROSE },
    Section { text: "I prefer to think of \"back to top\" options as elevators...", art: SUN },
    Section { text: "...and they ought to mimic the real experience more closely.", art: DOWN },
    Section {
        text: "Finally, we've reached our destination... go ahead and activate that elevator!",
        art: ELEVATOR,
    },
];

/// Label under the elevator button
pub const BUTTON_LABEL: &str = "Lessgoooo";

/// What a row is, so the renderer can style it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRole {
    Blank,
    Title,
    Subtitle,
    Tagline,
    Credit,
    Link,
    Art,
    Text,
    Button,
    ButtonLabel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRow {
    pub role: RowRole,
    pub text: String,
}

impl PageRow {
    fn new(role: RowRole, text: impl Into<String>) -> Self {
        Self { role, text: text.into() }
    }

    fn blank() -> Self {
        Self::new(RowRole::Blank, "")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Header,
    Section(usize),
    Elevator,
}

impl BlockKind {
    /// Anchor id of the block
    pub fn anchor(&self) -> String {
        match self {
            BlockKind::Header => "top".to_string(),
            BlockKind::Section(index) => index.to_string(),
            BlockKind::Elevator => "elevator".to_string(),
        }
    }
}

/// A laid-out block: its kind, first absolute row and content rows
#[derive(Debug, Clone)]
pub struct Block {
    pub kind: BlockKind,
    pub top: u16,
    pub rows: Vec<PageRow>,
}

impl Block {
    pub fn height(&self) -> u16 {
        self.rows.len() as u16
    }
}

#[derive(Debug, Clone)]
struct Node {
    offset_top: f64,
    parent: Option<NodeId>,
}

/// The page laid out for one terminal width
#[derive(Debug, Clone)]
pub struct PageLayout {
    width: u16,
    blocks: Vec<Block>,
    nodes: Vec<Node>,
    anchors: HashMap<String, NodeId>,
    total_rows: u16,
}

impl PageLayout {
    const BODY: NodeId = 0;
    const MAIN: NodeId = 1;

    pub fn build(width: u16) -> Self {
        let text_width = (width as usize).clamp(1, MAX_TEXT_WIDTH);

        let kinds = std::iter::once(BlockKind::Header)
            .chain((0..SECTIONS.len()).map(BlockKind::Section))
            .chain(std::iter::once(BlockKind::Elevator));

        let mut blocks = Vec::new();
        let mut nodes = vec![
            Node { offset_top: 0.0, parent: None },
            Node { offset_top: rows_to_px(MAIN_TOP), parent: Some(Self::BODY) },
        ];
        let mut anchors = HashMap::new();
        let mut in_main: u16 = 0;

        for kind in kinds {
            let rows = block_rows(kind, text_width);
            let block = Block { kind, top: MAIN_TOP + in_main, rows };

            anchors.insert(kind.anchor(), nodes.len());
            nodes.push(Node { offset_top: rows_to_px(in_main), parent: Some(Self::MAIN) });

            in_main = in_main.saturating_add(block.height());
            blocks.push(block);
        }

        Self {
            width,
            blocks,
            nodes,
            anchors,
            total_rows: MAIN_TOP.saturating_add(in_main).saturating_add(1),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Page height in rows
    pub fn total_rows(&self) -> u16 {
        self.total_rows
    }

    /// All rows of the page in order, `MAIN_TOP` blank rows included
    pub fn rows(&self) -> impl Iterator<Item = &PageRow> + '_ {
        static BLANK: PageRow = PageRow { role: RowRole::Blank, text: String::new() };
        std::iter::repeat_n(&BLANK, MAIN_TOP as usize)
            .chain(self.blocks.iter().flat_map(|b| b.rows.iter()))
            .chain(std::iter::once(&BLANK))
    }

    /// Absolute rows occupied by the clickable elevator button
    pub fn button_rows(&self) -> Range<u16> {
        let Some(block) = self.blocks.iter().find(|b| b.kind == BlockKind::Elevator) else {
            return 0..0;
        };
        let first = block
            .rows
            .iter()
            .position(|r| matches!(r.role, RowRole::Button | RowRole::ButtonLabel))
            .unwrap_or(0) as u16;
        let last = block
            .rows
            .iter()
            .rposition(|r| matches!(r.role, RowRole::Button | RowRole::ButtonLabel))
            .map(|i| i + 1)
            .unwrap_or(0) as u16;
        (block.top + first)..(block.top + last)
    }
}

impl Document for PageLayout {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.anchors.get(id).copied()
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.nodes.get(node).map(|n| n.offset_top).unwrap_or(0.0)
    }

    fn offset_parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }
}

fn block_rows(kind: BlockKind, width: usize) -> Vec<PageRow> {
    let mut rows = Vec::new();
    match kind {
        BlockKind::Header => {
            rows.extend((0..3).map(|_| PageRow::blank()));
            rows.push(PageRow::new(RowRole::Title, "E L E V A T O R . J S"));
            rows.push(PageRow::new(RowRole::Subtitle, "(as a terminal toy)"));
            rows.push(PageRow::blank());
            for line in wrap_text(
                "Elevator.js fixes those awkward \"scroll to top\" moments the old fashioned way.",
                width,
            ) {
                rows.push(PageRow::new(RowRole::Tagline, line));
            }
            rows.push(PageRow::blank());
            rows.push(PageRow::new(RowRole::Credit, "By Bilal Mansuri"));
            rows.push(PageRow::new(RowRole::Link, PROJECT_URL));
            rows.extend((0..3).map(|_| PageRow::blank()));
        }
        BlockKind::Section(index) => {
            let Some(section) = SECTIONS.get(index) else {
                return rows;
            };
            rows.extend((0..SECTION_PADDING).map(|_| PageRow::blank()));
            rows.extend(section.art.iter().map(|line| PageRow::new(RowRole::Art, *line)));
            rows.push(PageRow::blank());
            for line in wrap_text(section.text, width) {
                rows.push(PageRow::new(RowRole::Text, line));
            }
            rows.extend((0..SECTION_PADDING).map(|_| PageRow::blank()));
        }
        BlockKind::Elevator => {
            rows.extend((0..4).map(|_| PageRow::blank()));
            rows.extend(UP_ARROW.iter().map(|line| PageRow::new(RowRole::Button, *line)));
            rows.push(PageRow::new(RowRole::ButtonLabel, BUTTON_LABEL));
            rows.extend((0..4).map(|_| PageRow::blank()));
        }
    }
    rows
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.width() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split = split_at_width(&word, width);
            let rest = word.split_off(split);
            lines.push(word);
            word = rest;
        }

        if current.is_empty() {
            current = word;
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut current, word));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Byte index where `s` reaches `width` columns (at least one char)
fn split_at_width(s: &str, width: usize) -> usize {
    let mut used = 0;
    for (idx, ch) in s.char_indices() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width && idx > 0 {
            return idx;
        }
        used += w;
    }
    s.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use elevator_core::engine::cumulative_offset;

    #[test]
    fn test_wrap_text_respects_width() {
        let lines = wrap_text("Heading deeper and deeper.", 10);
        assert_eq!(lines, vec!["Heading", "deeper and", "deeper."]);
        assert!(lines.iter().all(|l| l.width() <= 10));
    }

    #[test]
    fn test_wrap_text_splits_long_words() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_text("", 5), vec![String::new()]);
    }

    #[test]
    fn test_layout_has_every_block() {
        let layout = PageLayout::build(80);
        assert_eq!(layout.blocks().len(), SECTIONS.len() + 2);
        assert_eq!(layout.blocks()[0].kind, BlockKind::Header);
        assert_eq!(layout.blocks().last().map(|b| b.kind), Some(BlockKind::Elevator));
        assert_eq!(layout.rows().count(), layout.total_rows() as usize);
    }

    #[test]
    fn test_rows_start_with_top_margin() {
        let layout = PageLayout::build(80);
        let mut rows = layout.rows();
        for _ in 0..MAIN_TOP {
            assert_eq!(rows.next().map(|r| r.role), Some(RowRole::Blank));
        }
        assert_eq!(layout.rows().last().map(|r| r.role), Some(RowRole::Blank));
    }

    #[test]
    fn test_anchor_offsets_follow_block_rows() {
        let layout = PageLayout::build(80);
        for block in layout.blocks() {
            let offset = cumulative_offset(&layout, &block.kind.anchor());
            assert_eq!(offset, rows_to_px(block.top), "anchor {}", block.kind.anchor());
        }
        assert_eq!(cumulative_offset(&layout, "top"), rows_to_px(MAIN_TOP));
        assert_eq!(cumulative_offset(&layout, "nope"), 0.0);
    }

    #[test]
    fn test_blocks_are_contiguous() {
        let layout = PageLayout::build(60);
        for pair in layout.blocks().windows(2) {
            assert_eq!(pair[0].top + pair[0].height(), pair[1].top);
        }
    }

    #[test]
    fn test_narrow_terminal_makes_a_taller_page() {
        assert!(PageLayout::build(20).total_rows() > PageLayout::build(100).total_rows());
    }

    #[test]
    fn test_button_rows_point_at_the_button() {
        let layout = PageLayout::build(80);
        let rows: Vec<&PageRow> = layout.rows().collect();
        let range = layout.button_rows();
        assert_eq!(range.len(), UP_ARROW.len() + 1);
        assert_eq!(rows[range.start as usize].role, RowRole::Button);
        assert_eq!(rows[range.end as usize - 1].role, RowRole::ButtonLabel);
    }

    #[test]
    fn test_px_row_conversion() {
        assert_eq!(px_to_row(rows_to_px(37)), 37);
        assert_eq!(px_to_row(-40.0), 0);
        assert_eq!(px_to_row(23.0), 1);
    }
}
