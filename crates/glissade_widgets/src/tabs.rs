//! Accessible tabs
//!
//! Follows the WAI-ARIA tabs pattern. Each child of the host is a tab whose
//! `href="#panel-id"` names its panel:
//!
//! ```html
//! <nav>
//!   <a href="#overview">Overview</a>
//!   <a href="#details">Details</a>
//! </nav>
//! <section id="overview">...</section>
//! <section id="details">...</section>
//! ```

use glissade_core::{Document, Element, Key, KeyboardEvent};

use crate::error::{Result, WidgetError};
use crate::widget::Widget;

pub struct Tabs<E: Element> {
    host: E,
    tabs: Vec<E>,
    panels: Vec<E>,
    active: usize,
}

impl<E: Element> Tabs<E> {
    /// Wire the ARIA roles and select the initial tab.
    ///
    /// The initial tab is the one whose panel matches `location_hash`.
    /// Without a hash, a tab already marked `aria-selected="true"` wins.
    /// Otherwise the first tab is selected.
    pub fn connect<D>(host: E, document: &D, location_hash: Option<&str>) -> Result<Self>
    where
        D: Document<Element = E>,
    {
        let tabs = host.children();
        if tabs.is_empty() {
            return Err(WidgetError::NoTabs);
        }

        let mut panels = Vec::with_capacity(tabs.len());
        for (index, tab) in tabs.iter().enumerate() {
            let href = tab
                .attribute("href")
                .ok_or(WidgetError::MissingHref { index })?;
            let id = href.trim_start_matches('#');
            if id.is_empty() {
                return Err(WidgetError::MissingHref { index });
            }
            let panel = document
                .element_by_id(id)
                .ok_or_else(|| WidgetError::MissingPanel { id: id.to_string() })?;
            panels.push(panel);
        }

        let hash = location_hash
            .map(|hash| hash.trim_start_matches('#'))
            .filter(|hash| !hash.is_empty());
        let preselected = tabs
            .iter()
            .position(|tab| tab.attribute("aria-selected").as_deref() == Some("true"));
        let initial = match hash {
            Some(hash) => panels.iter().position(|panel| panel.key().as_deref() == Some(hash)),
            None => preselected,
        }
        .unwrap_or(0);

        host.set_attribute("role", "tablist");
        for (tab, panel) in tabs.iter().zip(&panels) {
            let panel_id = panel.key().unwrap_or_default();
            let tab_id = format!("tab-{panel_id}");
            tab.set_attribute("role", "tab");
            tab.set_attribute("aria-selected", "false");
            tab.set_attribute("tabindex", "-1");
            tab.set_attribute("aria-controls", &panel_id);
            tab.set_attribute("id", &tab_id);

            panel.set_attribute("role", "tabpanel");
            panel.set_attribute("aria-labelledby", &tab_id);
            panel.set_attribute("hidden", "hidden");
            panel.set_attribute("tabindex", "0");
        }

        let mut this = Self {
            host,
            tabs,
            panels,
            active: initial,
        };
        this.select(initial);
        Ok(this)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn tab(&self, index: usize) -> Option<&E> {
        self.tabs.get(index)
    }

    pub fn panel(&self, index: usize) -> Option<&E> {
        self.panels.get(index)
    }

    /// Select tab `index`. Returns the new location hash when `change_hash`
    /// is set.
    pub fn activate(&mut self, index: usize, change_hash: bool) -> Result<Option<String>> {
        if index >= self.tabs.len() {
            return Err(WidgetError::TabOutOfRange {
                index,
                len: self.tabs.len(),
            });
        }
        self.deselect(self.active);
        self.select(index);
        tracing::debug!("tab {} selected", index);

        if !change_hash {
            return Ok(None);
        }
        Ok(self.panels[index].key().map(|id| format!("#{id}")))
    }

    /// Follow a location hash change. Unknown hashes are ignored.
    pub fn follow_hash(&mut self, hash: &str) -> Result<bool> {
        let id = hash.trim_start_matches('#');
        let index = self
            .panels
            .iter()
            .position(|panel| panel.key().as_deref() == Some(id));
        match index {
            Some(index) if index != self.active => {
                self.activate(index, false)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn select(&mut self, index: usize) {
        let (Some(tab), Some(panel)) = (self.tabs.get(index), self.panels.get(index)) else {
            return;
        };
        tab.set_attribute("aria-selected", "true");
        tab.set_attribute("tabindex", "0");
        panel.remove_attribute("hidden");
        self.active = index;
    }

    fn deselect(&self, index: usize) {
        let (Some(tab), Some(panel)) = (self.tabs.get(index), self.panels.get(index)) else {
            return;
        };
        tab.set_attribute("aria-selected", "false");
        tab.set_attribute("tabindex", "-1");
        panel.set_attribute("hidden", "hidden");
    }
}

/// Tab reached from `current` by `key`, wrapping at both ends.
pub fn navigate(current: usize, len: usize, key: &Key) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match key {
        Key::ArrowRight => Some((current + 1) % len),
        Key::ArrowLeft => Some((current + len - 1) % len),
        Key::Home => Some(0),
        Key::End => Some(len - 1),
        _ => None,
    }
}

impl<E: Element> Widget for Tabs<E> {
    type Element = E;

    fn host(&self) -> &E {
        &self.host
    }

    fn handle_key(&mut self, event: &mut KeyboardEvent) -> Result<bool> {
        let Some(index) = navigate(self.active, self.tabs.len(), &event.key) else {
            return Ok(false);
        };
        event.prevent_default();
        self.activate(index, false)?;
        Ok(true)
    }
}
