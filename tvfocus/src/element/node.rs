use std::sync::atomic::{AtomicU64, Ordering};

use super::{Content, InputKind, Role};
use crate::types::{Direction, FocusContainer};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Tag that keeps an element out of default auto-focus.
pub const NO_AUTOFOCUS: &str = "noautofocus";

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    pub role: Role,

    // Content
    pub content: Content,

    // Interaction
    /// Compound-widget marker. Makes any element focusable and makes it the
    /// focus target for navigation landing on one of its descendants.
    pub focusable: bool,
    /// Whether this element is disabled. Disabled elements don't receive focus.
    pub disabled: bool,
    /// When false the element is explicitly removed from focus order.
    pub tab_stop: bool,
    /// Preferred target of `Navigator::auto_focus`.
    pub autofocus: bool,

    // Navigation grouping
    pub containers: Vec<FocusContainer>,
    pub tags: Vec<String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            role: Role::Generic,
            content: Content::None,
            focusable: false,
            disabled: false,
            tab_stop: true,
            autofocus: false,
            containers: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl Element {
    pub fn box_() -> Self {
        Self {
            id: generate_id("box"),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self {
            id: generate_id("button"),
            role: Role::Button,
            content: Content::Text(label.into()),
            ..Default::default()
        }
    }

    pub fn link(label: impl Into<String>) -> Self {
        Self {
            id: generate_id("link"),
            role: Role::Link,
            content: Content::Text(label.into()),
            ..Default::default()
        }
    }

    pub fn input(kind: InputKind) -> Self {
        Self {
            id: generate_id("input"),
            role: Role::Input(kind),
            ..Default::default()
        }
    }

    pub fn text_area() -> Self {
        Self {
            id: generate_id("textarea"),
            role: Role::TextArea,
            ..Default::default()
        }
    }

    pub fn select() -> Self {
        Self {
            id: generate_id("select"),
            role: Role::Select,
            ..Default::default()
        }
    }

    /// Modal surface; bounds navigation in every direction.
    pub fn dialog() -> Self {
        Self {
            id: generate_id("dialog"),
            role: Role::Dialog,
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    // Interaction
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn tab_stop(mut self, tab_stop: bool) -> Self {
        self.tab_stop = tab_stop;
        self
    }

    pub fn autofocus(mut self, autofocus: bool) -> Self {
        self.autofocus = autofocus;
        self
    }

    // Navigation grouping
    pub fn container(mut self, container: FocusContainer) -> Self {
        if !self.containers.contains(&container) {
            self.containers.push(container);
        }
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    /// Direct children, empty for leaf content.
    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    // Queries

    /// Role-or-flag focusability, ignoring current state and layout.
    pub fn is_focusable(&self) -> bool {
        self.focusable || self.role.is_natively_focusable()
    }

    /// Whether this element bounds a directional search moving in `direction`.
    pub fn is_focus_container(&self, direction: Direction) -> bool {
        self.role == Role::Dialog || self.containers.iter().any(|c| c.bounds(direction))
    }
}
