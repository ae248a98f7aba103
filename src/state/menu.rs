//! Floating context menu session
//!
//! Each list surface owns one `MenuSession`. The session is created once,
//! reused on every open, and only ever reset to hidden. Entries are
//! recomputed from the bound record at open time through the resolver the
//! session was built with.

use ratatui::layout::Rect;

use super::actions::{ActionEntry, ItemResolver};
use super::ItemRecord;

/// Minimum distance kept between the menu rectangle and the area edges.
pub const MENU_MARGIN: u16 = 8;

/// Menu visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Hidden,
    Open,
}

/// Anchor point supplied by the triggering interaction (column, row).
pub type Anchor = (u16, u16);

/// State machine for one floating action menu.
pub struct MenuSession {
    state: MenuState,
    anchor: Option<Anchor>,
    record: Option<ItemRecord>,
    entries: Vec<ActionEntry>,
    /// Keyboard cursor over the visible entries
    selected: usize,
    resolver: ItemResolver,
}

impl MenuSession {
    pub fn new(resolver: ItemResolver) -> Self {
        Self {
            state: MenuState::Hidden,
            anchor: None,
            record: None,
            entries: Vec::new(),
            selected: 0,
            resolver,
        }
    }

    /// Open (or re-open) the menu for a record.
    ///
    /// Re-entrant: opening while already open atomically replaces the
    /// anchor, record, and entries. A record with no visible entries still
    /// opens the menu.
    pub fn open(&mut self, anchor: Anchor, record: ItemRecord) {
        self.entries = (self.resolver)(&record);
        self.anchor = Some(anchor);
        self.record = Some(record);
        self.selected = 0;
        self.state = MenuState::Open;
    }

    /// Hide the menu. The session is kept for the next open.
    pub fn close(&mut self) {
        self.state = MenuState::Hidden;
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    #[allow(dead_code)]
    pub fn record(&self) -> Option<&ItemRecord> {
        self.record.as_ref()
    }

    /// Entries that are actually rendered, in resolver order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &ActionEntry> {
        self.entries.iter().filter(|e| e.visible)
    }

    pub fn visible_len(&self) -> usize {
        self.visible_entries().count()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The visible entry at a given index, cloned for dispatch.
    pub fn entry_at(&self, index: usize) -> Option<ActionEntry> {
        self.visible_entries().nth(index).cloned()
    }

    pub fn select_next(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Menu dimensions derived from the visible entries (borders included).
    pub fn size(&self) -> (u16, u16) {
        let label_width = self
            .visible_entries()
            .map(|e| e.label.len() as u16)
            .max()
            .unwrap_or(0);
        let width = label_width + 4; // 1 cell padding + borders per side
        let height = self.visible_len() as u16 + 2;
        (width.max(12), height)
    }

    /// Where the menu goes for a given area.
    ///
    /// Both axes clamp so the rectangle stays `MENU_MARGIN` inside the
    /// area; when the area is too small the origin margin wins, matching
    /// `min`-then-`max` evaluation order.
    pub fn position(&self, area: Rect) -> Anchor {
        let (width, height) = self.size();
        let (anchor_x, anchor_y) = self.anchor.unwrap_or((0, 0));
        (
            clamp_axis(anchor_x, width, area.width),
            clamp_axis(anchor_y, height, area.height),
        )
    }

    /// The menu rectangle for a given area, not yet intersected with it.
    pub fn rect(&self, area: Rect) -> Rect {
        let (width, height) = self.size();
        let (x, y) = self.position(area);
        Rect {
            x: area.x + x,
            y: area.y + y,
            width,
            height,
        }
    }

    /// Whether a screen position falls inside the open menu.
    pub fn contains(&self, column: u16, row: u16, area: Rect) -> bool {
        if !self.is_open() {
            return false;
        }
        let rect = self.rect(area);
        column >= rect.x
            && column < rect.x + rect.width
            && row >= rect.y
            && row < rect.y + rect.height
    }

    /// Which visible entry a screen position lands on, if any.
    pub fn hit_entry(&self, column: u16, row: u16, area: Rect) -> Option<usize> {
        if !self.contains(column, row, area) {
            return None;
        }
        let rect = self.rect(area);
        // Inner rows start below the top border.
        if row <= rect.y || column <= rect.x || column >= rect.x + rect.width - 1 {
            return None;
        }
        let index = (row - rect.y - 1) as usize;
        (index < self.visible_len()).then_some(index)
    }
}

fn clamp_axis(anchor: u16, size: u16, bound: u16) -> u16 {
    let max = bound.saturating_sub(size + MENU_MARGIN);
    anchor.min(max).max(MENU_MARGIN)
}
