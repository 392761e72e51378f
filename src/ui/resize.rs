//! Resizable panels: sidebar and the contacts list pane.
//!
//! A drag is guarded by one `dragging` flag. Every move/end handler checks it
//! first; `end` clears it unconditionally.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelBounds {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl PanelBounds {
    pub fn clamp(&self, width: i64) -> u32 {
        width.clamp(i64::from(self.min), i64::from(self.max)) as u32
    }
}

pub const SIDEBAR: PanelBounds = PanelBounds {
    min: 56,
    max: 480,
    default: 260,
};

pub const SIDEBAR_COLLAPSED_WIDTH: u32 = 72;

pub const CONTACTS_PANEL: PanelBounds = PanelBounds {
    min: 280,
    max: 900,
    default: 420,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResizeDrag {
    bounds: PanelBounds,
    width: u32,
    dragging: bool,
    start_x: i32,
    start_width: u32,
}

impl ResizeDrag {
    pub fn new(bounds: PanelBounds, width: u32) -> Self {
        let width = bounds.clamp(i64::from(width));
        Self {
            bounds,
            width,
            dragging: false,
            start_x: 0,
            start_width: width,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = self.bounds.clamp(i64::from(width));
    }

    pub fn begin(&mut self, x: i32) {
        self.dragging = true;
        self.start_x = x;
        self.start_width = self.width;
    }

    /// New width, or `None` when no drag is active.
    pub fn move_to(&mut self, x: i32) -> Option<u32> {
        if !self.dragging {
            return None;
        }
        let dx = i64::from(x) - i64::from(self.start_x);
        self.width = self.bounds.clamp(i64::from(self.start_width) + dx);
        Some(self.width)
    }

    /// Finish the gesture. Returns the final width if a drag was active.
    pub fn end(&mut self) -> Option<u32> {
        let was_dragging = std::mem::replace(&mut self.dragging, false);
        was_dragging.then_some(self.width)
    }
}

/// Sidebar width with collapse/restore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sidebar {
    drag: ResizeDrag,
    collapsed: bool,
    last_expanded: u32,
}

impl Sidebar {
    pub fn new(width: u32) -> Self {
        let drag = ResizeDrag::new(SIDEBAR, width);
        let last_expanded = drag.width();
        Self {
            drag,
            collapsed: false,
            last_expanded,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn width(&self) -> u32 {
        self.drag.width()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Width worth persisting; the collapsed width never is.
    pub fn persistable_width(&self) -> Option<u32> {
        (!self.collapsed).then(|| self.drag.width())
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        if collapsed == self.collapsed {
            return;
        }
        self.collapsed = collapsed;
        if collapsed {
            self.drag.end();
            self.last_expanded = self.drag.width();
            self.drag.width = SIDEBAR_COLLAPSED_WIDTH;
        } else {
            self.drag.set_width(self.last_expanded);
        }
    }

    pub fn toggle(&mut self) {
        self.set_collapsed(!self.collapsed);
    }

    pub fn drag(&mut self) -> &mut ResizeDrag {
        &mut self.drag
    }
}
