use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::element::{ancestors, find_element, walk, Element, NO_AUTOFOCUS};
use crate::error::FocusError;
use crate::event::Event;
use crate::layout::{Geometry, Rect};
use crate::types::Direction;

/// Platform side of a focus transfer.
pub trait FocusDriver {
    /// Move platform focus to the element with `id`.
    fn focus(&mut self, id: &str) -> Result<(), FocusError>;
}

/// Driver for hosts without a platform focus primitive. Accepts every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl FocusDriver for Headless {
    fn focus(&mut self, _id: &str) -> Result<(), FocusError> {
        Ok(())
    }
}

/// Something that can bring a newly focused element into view.
pub trait Reveal {
    /// Returns true if the element belongs to this target and was revealed.
    fn reveal(&mut self, id: &str) -> bool;
}

impl<T: Reveal> Reveal for Rc<RefCell<T>> {
    fn reveal(&mut self, id: &str) -> bool {
        match self.try_borrow_mut() {
            Ok(mut target) => target.reveal(id),
            Err(_) => {
                log::warn!("[reveal] target busy, skipping reveal of {id}");
                false
            }
        }
    }
}

/// What `Navigator::auto_focus` is allowed to pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoFocus {
    /// Prefer the first element marked `autofocus`.
    pub prefer_explicit: bool,
    /// Fall back to the first focusable element not tagged `noautofocus`.
    pub allow_default: bool,
}

impl Default for AutoFocus {
    fn default() -> Self {
        Self {
            prefer_explicit: true,
            allow_default: true,
        }
    }
}

/// Tracks which element is focused, the stack of focus scopes, and moves
/// focus in response to directional requests.
pub struct Navigator {
    focused: Option<String>,
    scopes: Vec<String>,
    driver: Box<dyn FocusDriver>,
    revealers: Vec<Box<dyn Reveal>>,
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("focused", &self.focused)
            .field("scopes", &self.scopes)
            .field("revealers", &self.revealers.len())
            .finish_non_exhaustive()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::with_driver(Headless)
    }

    pub fn with_driver(driver: impl FocusDriver + 'static) -> Self {
        Self {
            focused: None,
            scopes: Vec::new(),
            driver: Box::new(driver),
            revealers: Vec::new(),
        }
    }

    /// Register a target asked to reveal every newly focused element.
    pub fn add_revealer(&mut self, revealer: impl Reveal + 'static) {
        self.revealers.push(Box::new(revealer));
    }

    /// Get the currently focused element ID.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    // Eligibility

    /// Whether the element can take focus right now: enabled, in the tab order,
    /// not a range/file input, and rendered.
    pub fn is_currently_focusable(element: &Element, geometry: &dyn Geometry) -> bool {
        !element.disabled
            && element.tab_stop
            && !element.role.rejects_focus()
            && geometry.is_visible(&element.id)
    }

    /// Nearest focusable element at or above `id`.
    ///
    /// Falls back to the element itself when no ancestor below the root is
    /// focusable; the root is never returned for a different element.
    /// Returns None if `id` is not in the tree.
    pub fn focusable_ancestor<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
        let chain = ancestors(root, id)?;
        let original = chain[0];
        let found = chain
            .iter()
            .copied()
            .find(|el| el.is_focusable())
            .filter(|el| !std::ptr::eq(*el, root) || std::ptr::eq(original, root));
        Some(found.unwrap_or(original))
    }

    // Scopes

    pub fn push_scope(&mut self, id: impl Into<String>) {
        let id = id.into();
        log::debug!("[scope] push {id} (depth {})", self.scopes.len() + 1);
        self.scopes.push(id);
    }

    /// Pop the innermost scope. Popping an empty stack does nothing.
    pub fn pop_scope(&mut self) {
        match self.scopes.pop() {
            Some(id) => log::debug!("[scope] pop {id}"),
            None => log::debug!("[scope] pop on empty stack ignored"),
        }
    }

    /// Innermost scope ID, if any scope is pushed.
    pub fn scope(&self) -> Option<&str> {
        self.scopes.last().map(String::as_str)
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// The subtree default focus resolution works in: the innermost pushed
    /// scope, or `root` when no scope is pushed or the scope left the tree.
    pub fn default_scope<'a>(&self, root: &'a Element) -> &'a Element {
        let Some(id) = self.scope() else {
            return root;
        };
        find_element(root, id).unwrap_or_else(|| {
            log::debug!("[scope] {id} not in tree, using root");
            root
        })
    }

    fn resolve_within<'a>(&self, root: &'a Element, within: Option<&str>) -> Option<&'a Element> {
        match within {
            Some(id) => find_element(root, id),
            None => Some(self.default_scope(root)),
        }
    }

    // Queries

    /// Currently focusable elements under `within` (default scope when None),
    /// in tree order. `within` itself is not included. Elements tagged
    /// `exclude_tag` are skipped. Use `.take(n)` to cap the result.
    pub fn focusable_elements<'a>(
        &self,
        root: &'a Element,
        within: Option<&str>,
        geometry: &'a dyn Geometry,
        exclude_tag: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.resolve_within(root, within)
            .into_iter()
            .flat_map(|scope| walk(scope).skip(1))
            .filter(move |el| el.is_focusable() && Self::is_currently_focusable(el, geometry))
            .filter(move |el| exclude_tag.map_or(true, |tag| !el.has_tag(tag)))
    }

    // Focus transfer

    /// Programmatically focus an element by ID.
    ///
    /// Returns true if the element holds focus afterwards. Platform failures
    /// are logged and leave the current focus unchanged.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused.as_deref() == Some(id) {
            return true;
        }

        if let Err(err) = self.driver.focus(id) {
            log::error!("[focus] failed to focus {id}: {err}");
            return false;
        }

        log::debug!("[focus] {:?} -> {id}", self.focused);
        self.focused = Some(id.to_string());
        for revealer in &mut self.revealers {
            revealer.reveal(id);
        }
        true
    }

    /// Focus the preferred element under `within` (default scope when None).
    /// Returns the focused element ID.
    pub fn auto_focus(
        &mut self,
        root: &Element,
        within: Option<&str>,
        geometry: &dyn Geometry,
        options: AutoFocus,
    ) -> Option<String> {
        let scope = self.resolve_within(root, within)?;

        if options.prefer_explicit {
            if let Some(el) = walk(scope).skip(1).find(|el| el.autofocus) {
                let id = el.id.clone();
                if self.focus(&id) {
                    return Some(id);
                }
                log::debug!("[focus] autofocus target {id} refused, trying default");
            }
        }

        if options.allow_default {
            let first = self
                .focusable_elements(root, Some(scope.id.as_str()), geometry, Some(NO_AUTOFOCUS))
                .next()
                .map(|el| el.id.clone());
            if let Some(id) = first {
                return self.focus(&id).then_some(id);
            }
        }

        None
    }

    /// Focus the first focusable element under `within`.
    pub fn focus_first(
        &mut self,
        root: &Element,
        within: Option<&str>,
        geometry: &dyn Geometry,
    ) -> Option<String> {
        let id = self
            .focusable_elements(root, within, geometry, None)
            .next()?
            .id
            .clone();
        self.focus(&id).then_some(id)
    }

    /// Focus the last focusable element under `within`.
    pub fn focus_last(
        &mut self,
        root: &Element,
        within: Option<&str>,
        geometry: &dyn Geometry,
    ) -> Option<String> {
        let id = self
            .focusable_elements(root, within, geometry, None)
            .last()?
            .id
            .clone();
        self.focus(&id).then_some(id)
    }

    /// Move focus `offset` positions through the focusable elements under
    /// `within`, stopping at the first and last element.
    /// Returns the newly focused element ID if focus changed.
    pub fn move_by(
        &mut self,
        offset: isize,
        root: &Element,
        within: Option<&str>,
        geometry: &dyn Geometry,
    ) -> Option<String> {
        let current = self.focused.clone()?;
        let list: Vec<&Element> = self.focusable_elements(root, within, geometry, None).collect();

        let index = list
            .iter()
            .position(|el| el.id == current || find_element(el, &current).is_some())?;
        let target = (index as isize + offset).clamp(0, list.len() as isize - 1) as usize;
        let id = list[target].id.clone();

        if id == current {
            return None;
        }
        self.focus(&id).then_some(id)
    }

    /// Focus the nearest focusable element in the given direction.
    /// Returns the newly focused element ID if focus changed.
    pub fn move_focus(
        &mut self,
        direction: Direction,
        root: &Element,
        geometry: &dyn Geometry,
    ) -> Option<String> {
        self.move_focus_from(None, direction, None, root, geometry)
    }

    /// Directional navigation with an explicit source element and/or an
    /// explicit search container. `None` uses the focused element and the
    /// nearest focus container respectively.
    pub fn move_focus_from(
        &mut self,
        source: Option<&str>,
        direction: Direction,
        container: Option<&str>,
        root: &Element,
        geometry: &dyn Geometry,
    ) -> Option<String> {
        let Some(source) = source.map(str::to_string).or_else(|| self.focused.clone()) else {
            log::debug!("[move_focus] nothing focused, focusing first element");
            let options = AutoFocus {
                prefer_explicit: false,
                allow_default: true,
            };
            return self.auto_focus(root, container, geometry, options);
        };

        let active = Self::focusable_ancestor(root, &source)?;
        let search_root = match container {
            Some(id) => find_element(root, id)?,
            None => focus_container(root, &active.id, direction)
                .unwrap_or_else(|| self.default_scope(root)),
        };

        let Some(active_rect) = geometry.bounds(&active.id) else {
            log::debug!("[move_focus] {} has no layout", active.id);
            return None;
        };

        // Don't refocus into the compound widget we are leaving
        let active_wrapper = focusable_wrapper(root, &active.id).map(|el| el.id.as_str());

        log::debug!(
            "[move_focus] active={} direction={:?} container={} rect={:?}",
            active.id,
            direction,
            search_root.id,
            active_rect
        );

        let mut nearest: Option<(&Element, f32)> = None;
        for candidate in walk(search_root).skip(1) {
            if candidate.id == active.id || Some(candidate.id.as_str()) == active_wrapper {
                continue;
            }
            if !candidate.is_focusable() || !Self::is_currently_focusable(candidate, geometry) {
                continue;
            }
            let Some(rect) = geometry.bounds(&candidate.id) else {
                continue;
            };
            if rect.is_empty() {
                continue;
            }
            let Some(score) = direction_score(&active_rect, &rect, direction) else {
                continue;
            };

            log::trace!("[move_focus]   candidate={} score={score:.2} rect={rect:?}", candidate.id);

            if nearest.map_or(true, |(_, best)| score < best) {
                nearest = Some((candidate, score));
            }
        }

        let (best, score) = nearest?;
        let mut target = best.id.as_str();

        // Land on the enclosing compound widget rather than one of its parts
        if let Some(wrapper) = focusable_wrapper(root, &best.id) {
            if wrapper.id != best.id && Some(wrapper.id.as_str()) != active_wrapper {
                target = wrapper.id.as_str();
            }
        }

        log::debug!("[move_focus] best={} score={score:.2} target={target}", best.id);

        let target = target.to_string();
        if self.focused.as_deref() == Some(target.as_str()) {
            return None;
        }
        self.focus(&target).then_some(target)
    }

    /// Focus the focusable element enclosing a clicked element.
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_from_click(&mut self, root: &Element, target: &str) -> Option<String> {
        let element = Self::focusable_ancestor(root, target)?;
        if !element.is_focusable() || self.focused.as_deref() == Some(element.id.as_str()) {
            return None;
        }
        let id = element.id.clone();
        self.focus(&id).then_some(id)
    }

    /// Run navigation requests and report the resulting focus changes as
    /// `Blur`/`Focus` event pairs.
    pub fn process_events(
        &mut self,
        events: &[Event],
        root: &Element,
        geometry: &dyn Geometry,
    ) -> Vec<Event> {
        let mut changes = Vec::new();

        for event in events {
            let Event::Navigate(direction) = event else {
                continue;
            };
            let old = self.focused.clone();
            if let Some(new) = self.move_focus(*direction, root, geometry) {
                if let Some(old) = old {
                    changes.push(Event::Blur {
                        target: old,
                        new_target: Some(new.clone()),
                    });
                }
                changes.push(Event::Focus { target: new });
            }
        }

        changes
    }
}

/// Nearest element at or above `id` carrying the compound-widget
/// `focusable` flag.
fn focusable_wrapper<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    ancestors(root, id)?.into_iter().find(|el| el.focusable)
}

/// Nearest element at or above `id` that bounds navigation in `direction`.
fn focus_container<'a>(root: &'a Element, id: &str, direction: Direction) -> Option<&'a Element> {
    ancestors(root, id)?
        .into_iter()
        .find(|el| el.is_focus_container(direction))
}

/// Score how good a candidate is for the given direction.
/// Lower is better. Returns None if candidate is not in the direction.
fn direction_score(from: &Rect, to: &Rect, direction: Direction) -> Option<f32> {
    let in_direction = match direction {
        Direction::Left => to.left() < from.left() && to.right() != from.right(),
        Direction::Right => to.right() > from.right() && to.left() != from.left(),
        Direction::Up => to.top() < from.top() && to.bottom() < from.bottom(),
        Direction::Down => to.bottom() > from.bottom() && to.top() > from.top(),
    };
    if !in_direction {
        return None;
    }

    // Inclusive pixel spans
    let (x1, x2) = span(from.left(), from.width);
    let (y1, y2) = span(from.top(), from.height);
    let (cx1, cx2) = span(to.left(), to.width);
    let (cy1, cy2) = span(to.top(), to.height);

    let (from_mid_x, from_mid_y) = from.center();
    let (to_mid_x, to_mid_y) = to.center();

    let overlap_x = intersects(x1, x2, cx1, cx2);
    let overlap_y = intersects(y1, y2, cy1, cy2);

    let (dist_x, dist_y) = match direction {
        Direction::Left => (
            (x1 - x1.min(cx2)).abs(),
            if overlap_y { 0.0 } else { (from_mid_y - to_mid_y).abs() },
        ),
        Direction::Right => (
            (x2 - x2.max(cx1)).abs(),
            if overlap_y { 0.0 } else { (from_mid_y - to_mid_y).abs() },
        ),
        Direction::Up => (
            if overlap_x { 0.0 } else { (from_mid_x - to_mid_x).abs() },
            (y1 - y1.min(cy2)).abs(),
        ),
        Direction::Down => (
            if overlap_x { 0.0 } else { (from_mid_x - to_mid_x).abs() },
            (y2 - y2.max(cy1)).abs(),
        ),
    };

    Some(dist_x.hypot(dist_y))
}

fn span(start: f32, extent: f32) -> (f32, f32) {
    if extent > 0.0 {
        (start, start + extent - 1.0)
    } else {
        (start, start)
    }
}

fn intersects(a1: f32, a2: f32, b1: f32, b2: f32) -> bool {
    let inside = |a1: f32, a2: f32, b1: f32, b2: f32| (b1 >= a1 && b1 <= a2) || (b2 >= a1 && b2 <= a2);
    inside(a1, a2, b1, b2) || inside(b1, b2, a1, a2)
}
