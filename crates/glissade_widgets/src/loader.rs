//! Loading indicator

use glissade_core::Element;
use serde::{Deserialize, Serialize};

use crate::widget::Widget;

/// Loader appearance, from the host's `type` attribute
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoaderKind {
    #[default]
    Default,
    Double,
    Circles,
    CirclesDouble,
    Bars,
}

impl LoaderKind {
    /// Unknown or missing names fall back to [`LoaderKind::Default`].
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("double") => LoaderKind::Double,
            Some("circles") => LoaderKind::Circles,
            Some("circles-double") => LoaderKind::CirclesDouble,
            Some("bars") => LoaderKind::Bars,
            _ => LoaderKind::Default,
        }
    }

    /// CSS class of the spinner
    pub fn class(&self) -> &'static str {
        match self {
            LoaderKind::Default => "loader-default",
            LoaderKind::Double => "loader-double",
            LoaderKind::Circles => "loader-circles",
            LoaderKind::CirclesDouble => "loader-circles-double",
            LoaderKind::Bars => "loader-bars",
        }
    }

    /// Inner markup the kind needs
    pub fn bars(&self) -> &'static str {
        match self {
            LoaderKind::Bars => "<span></span>",
            _ => "",
        }
    }
}

/// Spinner followed by a message
pub struct Loader<E: Element> {
    host: E,
    kind: LoaderKind,
    message: String,
}

impl<E: Element> Loader<E> {
    /// Kind from the `type` attribute, message from the current content
    pub fn new(host: E) -> Self {
        let kind = LoaderKind::from_name(host.attribute("type").as_deref());
        let message = host.inner_html();
        Self {
            host,
            kind,
            message,
        }
    }

    /// An empty message falls back to the host's current content.
    pub fn with(host: E, kind: LoaderKind, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = host.inner_html();
        }
        Self {
            host,
            kind,
            message,
        }
    }

    pub fn kind(&self) -> LoaderKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn markup(&self) -> String {
        format!(
            r#"<span class="loader {}">{}</span>{}"#,
            self.kind.class(),
            self.kind.bars(),
            self.message
        )
    }
}

impl<E: Element> Widget for Loader<E> {
    type Element = E;

    fn host(&self) -> &E {
        &self.host
    }

    fn connect(&mut self) -> crate::Result<()> {
        self.host.set_inner_html(&self.markup());
        Ok(())
    }
}
