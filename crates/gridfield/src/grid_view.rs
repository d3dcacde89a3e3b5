//! Maps the placement table onto the terminal and draws it.

use std::collections::BTreeMap;

use gridfield_animator::{PlacementId, PlacementTable, ShuffleEvent};
use gridfield_config::Profile;
use gridfield_core::{AnimationSpeed, ColorTheme, Geometry, GridCell, WidgetKind};
use gridfield_widgets::{Tint, WidgetState};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect, Size},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use tracing::debug;

const CROSS: &str = "+";
const CROSS_OPACITY: f32 = 0.07;

/// Terminal rectangles for every grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    area: Rect,
    columns: Vec<Rect>,
    rows: Vec<Rect>,
    reserved_column: usize,
}

impl GridLayout {
    /// Split `area` into the configured columns and rows.
    ///
    /// The reserved column is `content_width` wide and the rest share what is
    /// left. Rows keep their configured height; rows past the bottom of the
    /// terminal are clipped to nothing.
    pub fn new(area: Rect, geometry: &Geometry, content_width: u16) -> Self {
        let constraints = (0..geometry.columns).map(|col| {
            if col == geometry.reserved_column {
                Constraint::Length(content_width)
            } else {
                Constraint::Fill(1)
            }
        });
        let columns = Layout::horizontal(constraints).split(area).to_vec();

        let mut y = area.y;
        let rows = geometry
            .row_heights
            .iter()
            .map(|&height| {
                let top = y.min(area.bottom());
                let clipped = height.min(area.bottom() - top);
                y = y.saturating_add(height);
                Rect::new(area.x, top, area.width, clipped)
            })
            .collect();

        Self {
            area,
            columns,
            rows,
            reserved_column: geometry.reserved_column as usize,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Rectangle of a cell; empty when the cell is off screen.
    pub fn cell(&self, cell: GridCell) -> Rect {
        match (
            self.columns.get(cell.col as usize),
            self.rows.get(cell.row as usize),
        ) {
            (Some(col), Some(row)) => Rect::new(col.x, row.y, col.width, row.height),
            _ => Rect::default(),
        }
    }

    /// The reserved column, full height.
    pub fn content(&self) -> Rect {
        self.columns
            .get(self.reserved_column)
            .copied()
            .unwrap_or_default()
    }

    /// Points where column and row boundaries meet, outside the reserved
    /// column.
    pub fn intersections(&self) -> Vec<(u16, u16)> {
        let content = self.content();
        let xs = self
            .columns
            .iter()
            .skip(1)
            .map(|c| c.x)
            .filter(|&x| x <= content.left() || x >= content.right());
        let ys: Vec<u16> = self
            .rows
            .iter()
            .skip(1)
            .filter(|r| r.height > 0)
            .map(|r| r.y)
            .collect();
        xs.flat_map(|x| ys.iter().map(move |&y| (x, y)))
            .filter(|&(x, y)| x < self.area.right() && y < self.area.bottom())
            .collect()
    }
}

/// Move `fade` toward `target` by the share of `fade_ms` that `elapsed_ms`
/// covers.
pub fn step_fade(fade: f32, target: f32, elapsed_ms: u64, fade_ms: u64) -> f32 {
    if fade_ms == 0 {
        return target;
    }
    let delta = elapsed_ms as f32 / fade_ms as f32;
    if fade < target {
        (fade + delta).min(target)
    } else {
        (fade - delta).max(target)
    }
}

/// A mounted widget at its current cell.
#[derive(Debug)]
struct Slot {
    cell: GridCell,
    widget: WidgetState,
    visible: bool,
    fade: f32,
}

/// Widgets mounted for each placement, plus their fade levels.
#[derive(Debug)]
pub struct GridView {
    geometry: Geometry,
    content_width: u16,
    fade_ms: u64,
    layout: GridLayout,
    slots: BTreeMap<PlacementId, Slot>,
    last_update_ms: u64,
}

impl GridView {
    pub fn new(geometry: Geometry, content_width: u16, fade_ms: u64) -> Self {
        let layout = GridLayout::new(Rect::default(), &geometry, content_width);
        Self {
            geometry,
            content_width,
            fade_ms,
            layout,
            slots: BTreeMap::new(),
            last_update_ms: 0,
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn fade(&self, id: PlacementId) -> Option<f32> {
        self.slots.get(&id).map(|slot| slot.fade)
    }

    /// Recompute the layout for `area`, remounting every widget when the
    /// size changed, and mount any placement that has no widget yet.
    pub fn sync<R: Rng + ?Sized>(
        &mut self,
        area: Rect,
        table: &PlacementTable,
        speed: AnimationSpeed,
        now_ms: u64,
        rng: &mut R,
    ) {
        if area != self.layout.area() {
            debug!(width = area.width, height = area.height, "terminal resized, remounting");
            self.layout = GridLayout::new(area, &self.geometry, self.content_width);
            let mut slots = std::mem::take(&mut self.slots);
            for (id, slot) in &mut slots {
                let kind = slot.widget.kind();
                let size = self.cell_size(slot.cell);
                slot.widget = WidgetState::mount(kind, size, speed, now_ms, rng);
                debug!(%id, kind = kind.name(), "remounted");
            }
            self.slots = slots;
        }

        for (id, placement) in table.iter() {
            if !self.slots.contains_key(&id) {
                let widget = self.mount(placement.kind, placement.cell, speed, now_ms, rng);
                self.slots.insert(
                    id,
                    Slot {
                        cell: placement.cell,
                        widget,
                        visible: placement.visible,
                        fade: if placement.visible { 1.0 } else { 0.0 },
                    },
                );
            }
        }
    }

    fn cell_size(&self, cell: GridCell) -> Size {
        let rect = self.layout.cell(cell);
        Size::new(rect.width, rect.height)
    }

    fn mount<R: Rng + ?Sized>(
        &self,
        kind: WidgetKind,
        cell: GridCell,
        speed: AnimationSpeed,
        now_ms: u64,
        rng: &mut R,
    ) -> WidgetState {
        WidgetState::mount(kind, self.cell_size(cell), speed, now_ms, rng)
    }

    /// Reflect animator events: hide, move and remount, reveal.
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        events: &[ShuffleEvent],
        speed: AnimationSpeed,
        now_ms: u64,
        rng: &mut R,
    ) {
        for event in events {
            match *event {
                ShuffleEvent::Hidden { id } => {
                    if let Some(slot) = self.slots.get_mut(&id) {
                        slot.visible = false;
                    }
                }
                ShuffleEvent::Relocated { id, to, kind, .. } => {
                    // The old widget is dropped here, releasing its ticker.
                    let widget = self.mount(kind, to, speed, now_ms, rng);
                    self.slots.insert(
                        id,
                        Slot {
                            cell: to,
                            widget,
                            visible: false,
                            fade: 0.0,
                        },
                    );
                }
                ShuffleEvent::Revealed { id } => {
                    if let Some(slot) = self.slots.get_mut(&id) {
                        slot.visible = true;
                    }
                }
            }
        }
    }

    /// Advance fades and widget tickers to `now_ms`.
    pub fn update<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) {
        let elapsed = now_ms.saturating_sub(self.last_update_ms);
        self.last_update_ms = now_ms;
        for slot in self.slots.values_mut() {
            let target = if slot.visible { 1.0 } else { 0.0 };
            slot.fade = step_fade(slot.fade, target, elapsed, self.fade_ms);
            if slot.fade > 0.0 {
                slot.widget.update(now_ms, rng);
            }
        }
    }

    /// Restart every widget ticker at a new speed.
    pub fn set_speed(&mut self, speed: AnimationSpeed, now_ms: u64) {
        for slot in self.slots.values_mut() {
            slot.widget.set_speed(speed, now_ms);
        }
    }

    pub fn render(&self, buf: &mut Buffer, theme: ColorTheme) {
        let tint = Tint::new(theme.rgb());
        let cross = tint.style(CROSS_OPACITY);
        for (x, y) in self.layout.intersections() {
            buf.set_string(x, y, CROSS, cross);
        }

        for slot in self.slots.values() {
            if slot.fade <= 0.0 {
                continue;
            }
            let rect = self.layout.cell(slot.cell).intersection(buf.area);
            if rect.is_empty() {
                continue;
            }
            slot.widget.render(rect, buf, tint.with_fade(slot.fade));
        }
    }
}

/// What the status line shows besides the key help.
#[derive(Debug, Clone, Copy)]
pub struct Status {
    pub speed: AnimationSpeed,
    pub paused: bool,
}

/// Profile header at the top of the reserved column, key help at the bottom.
pub fn render_content(area: Rect, buf: &mut Buffer, profile: &Profile, theme: ColorTheme, status: Status) {
    if area.is_empty() {
        return;
    }
    let tint = Tint::new(theme.rgb());
    let [header, _, help] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .areas(area);

    let mut lines = vec![Line::from(Span::styled(
        profile.name.clone(),
        tint.style(0.45).add_modifier(Modifier::BOLD),
    ))];
    if !profile.tagline.is_empty() {
        lines.push(Line::from(Span::styled(profile.tagline.clone(), tint.style(0.3))));
    }
    if !profile.location.is_empty() {
        lines.push(Line::from(Span::styled(profile.location.clone(), tint.style(0.2))));
    }
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(header.inner(Margin::new(1, 1)), buf);

    let key = tint.style(0.45).add_modifier(Modifier::BOLD);
    let label = Style::new().fg(tint.color(0.2));
    let state = if status.paused { "paused" } else { status.speed.label() };
    let help_line = Line::from(vec![
        Span::styled("q", key),
        Span::styled(" quit  ", label),
        Span::styled("c", key),
        Span::styled(" color  ", label),
        Span::styled("s", key),
        Span::styled(" speed  ", label),
        Span::styled("r", key),
        Span::styled(" shuffle  ", label),
        Span::styled("p", key),
        Span::styled(" pause", label),
    ]);
    Paragraph::new(vec![help_line, Line::from(Span::styled(state, label))])
        .alignment(Alignment::Center)
        .render(help, buf);
}
