//! Input events and tap/click hit testing for the terminal grid.
//!
//! Keyboard and pointer input both end up as an [`InputEvent`]. Pointer input
//! goes through [`ClickState`]: the renderer registers a target rectangle per
//! clickable row or tab each frame, and the pointer handler converts pixel
//! coordinates to a cell and asks which action lives there.

use ratzilla::ratatui::layout::Rect;

/// Normalized input from keyboard or pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable key.
    Key(char),
    /// A tap or click on a registered target, by action id.
    Click(u16),
    Enter,
    Backspace,
    /// Escape: back out of a prompt.
    Cancel,
    NextTab,
    PrevTab,
}

/// A tappable rectangle in terminal cells.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets registered by the last frame, plus the grid size needed to
/// map pixels to cells.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register one full-width row of `area`. Rows outside the area are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Register a row of tab labels laid out left to right.
    ///
    /// `tabs` holds `(label_width, action_id)` per tab, with `separator_width`
    /// columns between labels. Each target reaches halfway into the
    /// neighbouring separators; the first starts at `x` and the last runs to
    /// `x + total_width`, so the whole bar is tappable.
    pub fn register_tab_targets(
        &mut self,
        tabs: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        if tabs.is_empty() || total_width == 0 {
            return;
        }

        let mut spans: Vec<(u16, u16)> = Vec::with_capacity(tabs.len());
        let mut col = 0u16;
        for &(width, _) in tabs {
            spans.push((col, col + width));
            col += width + separator_width;
        }

        let last = tabs.len() - 1;
        for (i, &(_, action_id)) in tabs.iter().enumerate() {
            let left = if i == 0 {
                0
            } else {
                let gap_start = spans[i - 1].1;
                gap_start + (spans[i].0 - gap_start) / 2
            };
            let right = if i == last {
                total_width
            } else {
                let gap_start = spans[i].1;
                gap_start + (spans[i + 1].0 - gap_start) / 2
            };
            let width = right.saturating_sub(left);
            if width > 0 {
                self.add_click_target(Rect::new(x + left, y, width, height), action_id);
            }
        }
    }

    /// Action at a cell. When targets overlap the one registered last wins.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Phone-sized screens get the compact layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Map a pixel offset from the grid's top edge to a row index.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Map a pixel offset from the grid's left edge to a column index.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}
