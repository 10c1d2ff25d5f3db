//! Display domain: the navigation stack and the objects it shows.
//!
//! The device shows exactly one top-level object at a time – a Card, a Menu,
//! or a Stage. The "stack" holds 0 or 1 entries and replacing the top entry
//! discards the previous one; `hide` checks the id only as a consistency
//! assertion against the host's view of the stack, not as a multi-window
//! pop.
//!
//! Everything here is pure state and math. Timers, task handles, and
//! renderer notifications belong to the emulator layer, which mutates this
//! model through a single writer.

/// Identifier of a top-level window or a stage element.
pub type ObjectId = i64;

/// The window the host application treats as the bottom of its stack; the
/// back button never dismisses it.
pub const ROOT_WINDOW_ID: ObjectId = 1;

/// Height of one rendered menu row in pixels, used by scroll recentering.
pub const DEFAULT_MENU_ITEM_HEIGHT: u32 = 28;

/// Discriminant of a top-level object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Card,
    Menu,
    Stage,
}

/// Attributes shared by every top-level window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowAttrs {
    pub fullscreen: bool,
    pub scrollable: bool,
    pub background_color: Option<i64>,
    pub action_bar: Option<ActionBar>,
}

/// The fixed up/select/down affordance attached to a Stage (or any window
/// requesting it).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionBar {
    pub up_icon: Option<i64>,
    pub select_icon: Option<i64>,
    pub down_icon: Option<i64>,
    pub background_color: Option<i64>,
}

/// Static text window with optional icons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    pub icon: Option<i64>,
    pub subicon: Option<i64>,
    pub banner: Option<i64>,
    pub style: Option<String>,
}

// ── Menu ──────────────────────────────────────────────────────────────────────

/// One declared menu section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection {
    pub section: i64,
    pub title: Option<String>,
    /// Item count announced by the host; items arrive lazily afterwards.
    pub declared_items: usize,
}

/// One selectable menu row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub section: i64,
    pub item: i64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub icon: Option<i64>,
}

/// Selection movement result: which flattened row lost the active marker,
/// which gained it, and where the viewport should scroll to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Option<usize>,
    pub current: usize,
    /// Content offset in pixels, ≤ 0 (0 = top-aligned).
    pub scroll_top: i64,
}

/// Scrollable list of sections and items.
///
/// `selected` indexes the flattened item list; −1 means no selection yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub sections: Vec<MenuSection>,
    pub items: Vec<MenuItem>,
    pub selected: isize,
    item_height: u32,
    viewport_height: u32,
}

impl Menu {
    pub fn new(viewport_height: u32, item_height: u32) -> Self {
        Self {
            sections: Vec::new(),
            items: Vec::new(),
            selected: -1,
            item_height,
            viewport_height,
        }
    }

    pub fn add_section(&mut self, section: MenuSection) {
        self.sections.push(section);
    }

    /// Appends an item. The very first item auto-selects row 0 and reports
    /// the resulting selection change.
    pub fn add_item(&mut self, item: MenuItem) -> Option<SelectionChange> {
        self.items.push(item);
        if self.selected == -1 {
            return self.select(1);
        }
        None
    }

    /// Moves the selection up one row.
    pub fn select_up(&mut self) -> Option<SelectionChange> {
        self.select(-1)
    }

    /// Moves the selection down one row.
    pub fn select_down(&mut self) -> Option<SelectionChange> {
        self.select(1)
    }

    /// Moves the selection by `offset` rows. A move that would leave
    /// `[0, item_count)` is a no-op and returns `None`.
    pub fn select(&mut self, offset: isize) -> Option<SelectionChange> {
        let target = self.selected + offset;
        if target < 0 || target >= self.items.len() as isize {
            return None;
        }
        let previous = usize::try_from(self.selected).ok();
        self.selected = target;
        let current = target as usize;
        Some(SelectionChange {
            previous,
            current,
            scroll_top: scroll_offset(
                self.viewport_height,
                self.item_height,
                current,
                self.items.len(),
            ),
        })
    }

    /// The currently selected row, if any.
    pub fn selected_item(&self) -> Option<&MenuItem> {
        usize::try_from(self.selected)
            .ok()
            .and_then(|i| self.items.get(i))
    }
}

/// Computes the content offset that keeps the selected row visible.
///
/// Rows in the upper half of the viewport keep the content top-aligned; a
/// row below the viewport's vertical midpoint is recentered on it, clamped
/// so the content never scrolls past its last row.
pub fn scroll_offset(
    viewport_height: u32,
    item_height: u32,
    item_index: usize,
    item_count: usize,
) -> i64 {
    let viewport = i64::from(viewport_height);
    let row = i64::from(item_height);
    let row_top = item_index as i64 * row;

    if row_top <= viewport / 2 {
        return 0;
    }

    let content_height = item_count as i64 * row;
    // Most negative allowed offset: last row flush with the viewport bottom.
    let max_scroll = (viewport - content_height).min(0);
    let centered = (viewport - row) / 2 - row_top;
    centered.max(max_scroll)
}

// ── Stage ─────────────────────────────────────────────────────────────────────

/// Discriminant of a stage child element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Text,
    /// A text element that re-renders a time pattern on a fixed cadence.
    TimeText,
}

/// Position and size of a stage element, all fields optional because update
/// commands may carry any subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// The updatable fields of a stage element; also the payload handed to the
/// renderer on element updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementFields {
    pub frame: Frame,
    pub text: Option<String>,
    pub font: Option<i64>,
    pub color: Option<i64>,
    pub background_color: Option<i64>,
    pub border_color: Option<i64>,
    pub radius: Option<i64>,
    pub text_overflow: Option<i64>,
    pub text_align: Option<i64>,
    /// Time-unit bitmask; > 0 marks the element as a time text.
    pub time_units: Option<i64>,
}

/// A freeform element placed on a Stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageElement {
    pub id: ObjectId,
    pub kind: ElementKind,
    pub fields: ElementFields,
}

impl StageElement {
    /// Merges an update into the element, leaving unmentioned fields alone.
    pub fn apply(&mut self, update: &ElementFields) {
        let f = &mut self.fields;
        let u = update;
        if u.frame.x.is_some() {
            f.frame.x = u.frame.x;
        }
        if u.frame.y.is_some() {
            f.frame.y = u.frame.y;
        }
        if u.frame.width.is_some() {
            f.frame.width = u.frame.width;
        }
        if u.frame.height.is_some() {
            f.frame.height = u.frame.height;
        }
        if u.text.is_some() {
            f.text = u.text.clone();
        }
        if u.font.is_some() {
            f.font = u.font;
        }
        if u.color.is_some() {
            f.color = u.color;
        }
        if u.background_color.is_some() {
            f.background_color = u.background_color;
        }
        if u.border_color.is_some() {
            f.border_color = u.border_color;
        }
        if u.radius.is_some() {
            f.radius = u.radius;
        }
        if u.text_overflow.is_some() {
            f.text_overflow = u.text_overflow;
        }
        if u.text_align.is_some() {
            f.text_align = u.text_align;
        }
        if u.time_units.is_some() {
            f.time_units = u.time_units;
        }
    }
}

/// Freeform element container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stage {
    pub elements: Vec<StageElement>,
}

impl Stage {
    /// Element lookup scoped to this stage only.
    pub fn find(&self, id: ObjectId) -> Option<&StageElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn find_mut(&mut self, id: ObjectId) -> Option<&mut StageElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn push(&mut self, element: StageElement) {
        self.elements.push(element);
    }
}

// ── Top-level objects and the stack ───────────────────────────────────────────

/// Per-variant content of a top-level window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowBody {
    Card(Card),
    Menu(Menu),
    Stage(Stage),
}

/// A top-level object: common id + attributes, variant-specific body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayObject {
    pub id: ObjectId,
    pub attrs: WindowAttrs,
    pub body: WindowBody,
}

impl DisplayObject {
    pub fn kind(&self) -> WindowKind {
        match self.body {
            WindowBody::Card(_) => WindowKind::Card,
            WindowBody::Menu(_) => WindowKind::Menu,
            WindowBody::Stage(_) => WindowKind::Stage,
        }
    }

    pub fn as_menu_mut(&mut self) -> Option<&mut Menu> {
        match &mut self.body {
            WindowBody::Menu(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_menu(&self) -> Option<&Menu> {
        match &self.body {
            WindowBody::Menu(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_stage_mut(&mut self) -> Option<&mut Stage> {
        match &mut self.body {
            WindowBody::Stage(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_stage(&self) -> Option<&Stage> {
        match &self.body {
            WindowBody::Stage(s) => Some(s),
            _ => None,
        }
    }
}

/// The navigation stack: at most one live top-level object.
#[derive(Debug, Clone, Default)]
pub struct DisplayStack {
    top: Option<DisplayObject>,
}

impl DisplayStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current object, returning the detached one so the caller
    /// can release whatever it owns (its animations must already have been
    /// stopped).
    pub fn show(&mut self, object: DisplayObject) -> Option<DisplayObject> {
        self.top.replace(object)
    }

    /// Removes the current object only when its id matches. A mismatch is a
    /// no-op, not an error – the host asked to hide something that is no
    /// longer on screen.
    pub fn hide(&mut self, id: ObjectId) -> Option<DisplayObject> {
        if self.top.as_ref().is_some_and(|o| o.id == id) {
            self.top.take()
        } else {
            None
        }
    }

    pub fn current(&self) -> Option<&DisplayObject> {
        self.top.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut DisplayObject> {
        self.top.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
