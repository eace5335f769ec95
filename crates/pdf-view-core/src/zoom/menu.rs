//! Zoom menu state: entries, selection highlight, open/closed state and
//! screen placement relative to its toggle control.

use crate::types::{MenuState, Point, Rect, Size, ZoomSpec};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomMenuEntry {
    pub spec: ZoomSpec,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoomMenu {
    entries: Vec<ZoomMenuEntry>,
    state: MenuState,
    anchor: Rect,
    size: Size,
    position: Point,
}

impl ZoomMenu {
    pub fn new(specs: &[ZoomSpec]) -> Self {
        Self {
            entries: specs
                .iter()
                .map(|spec| ZoomMenuEntry {
                    spec: *spec,
                    selected: false,
                })
                .collect(),
            state: MenuState::Closed,
            anchor: Rect::default(),
            size: Size::default(),
            position: Point::default(),
        }
    }

    pub fn entries(&self) -> &[ZoomMenuEntry] {
        &self.entries
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    /// Flip between open and closed; opening re-anchors the menu
    pub fn toggle(&mut self) -> MenuState {
        match self.state {
            MenuState::Open => self.close(),
            MenuState::Closed => self.open(),
        }
        self.state
    }

    pub fn open(&mut self) {
        self.state = MenuState::Open;
        self.reposition();
    }

    pub fn close(&mut self) {
        self.state = MenuState::Closed;
    }

    /// Record the toggle control's current bounding box
    pub fn set_anchor(&mut self, anchor: Rect) {
        self.anchor = anchor;
        if self.is_open() {
            self.reposition();
        }
    }

    pub fn anchor(&self) -> Rect {
        self.anchor
    }

    /// Rendered size of the menu, used for outside-click detection
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Top-left corner of the menu, pinned under the anchor's bottom-left corner
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.size.width,
            self.size.height,
        )
    }

    /// Close the menu if `point` lies outside it. Points on the anchor are
    /// left alone so the toggle control stays in charge of them.
    pub fn dismiss_if_outside(&mut self, point: Point) -> bool {
        if !self.is_open() || self.bounds().contains(point) || self.anchor.contains(point) {
            return false;
        }
        self.close();
        true
    }

    /// Highlight the entry for `spec`; returns whether a matching entry exists
    pub fn select(&mut self, spec: ZoomSpec) -> bool {
        let mut found = false;
        for entry in &mut self.entries {
            entry.selected = entry.spec == spec;
            found |= entry.selected;
        }
        found
    }

    pub fn clear_selection(&mut self) {
        for entry in &mut self.entries {
            entry.selected = false;
        }
    }

    pub fn selected(&self) -> Option<ZoomSpec> {
        self.entries
            .iter()
            .find(|entry| entry.selected)
            .map(|entry| entry.spec)
    }

    fn reposition(&mut self) {
        self.position = Point::new(self.anchor.left, self.anchor.bottom());
    }
}
