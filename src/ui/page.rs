//! The element contract the controller writes to, and an in-memory page.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::ui::element::ElementId;

/// Operations the controller performs on the page.
pub trait Page {
    fn set_text(&mut self, id: ElementId, text: &str);

    fn set_visible(&mut self, id: ElementId, visible: bool);

    fn set_disabled(&mut self, id: ElementId, disabled: bool);

    /// Current value of an input element.
    fn input_value(&self, id: ElementId) -> String;

    /// Show a blocking message to the user.
    fn alert(&mut self, message: &str);
}

/// State of a single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementState {
    pub text: String,
    pub visible: bool,
    pub disabled: bool,
}

/// A page held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    elements: BTreeMap<ElementId, ElementState>,
    alerts: Vec<String>,
}

impl MemoryPage {
    /// A page in its freshly loaded state.
    pub fn new() -> Self {
        let elements = ElementId::ALL
            .into_iter()
            .map(|id| {
                let state = ElementState {
                    text: String::new(),
                    visible: !id.hidden_on_load(),
                    disabled: false,
                };
                (id, state)
            })
            .collect();

        Self {
            elements,
            alerts: Vec::new(),
        }
    }

    pub fn element(&self, id: ElementId) -> &ElementState {
        // Every id is inserted by `new`.
        &self.elements[&id]
    }

    fn element_mut(&mut self, id: ElementId) -> &mut ElementState {
        self.elements.entry(id).or_insert_with(|| ElementState {
            text: String::new(),
            visible: true,
            disabled: false,
        })
    }

    pub fn text(&self, id: ElementId) -> &str {
        &self.element(id).text
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.element(id).visible
    }

    pub fn is_disabled(&self, id: ElementId) -> bool {
        self.element(id).disabled
    }

    /// Type into an input element.
    pub fn set_input(&mut self, id: ElementId, value: &str) {
        self.element_mut(id).text = value.to_string();
    }

    /// Alerts shown so far, oldest first.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Remove and return the alerts shown so far.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Plain-text rendering of the visible state.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.is_visible(ElementId::Prepare) {
            let connect = if self.is_disabled(ElementId::BtnConnect) {
                "[connect: loading]"
            } else {
                "[connect]"
            };
            let _ = writeln!(out, "{connect}");
        }

        if self.is_visible(ElementId::Connected) {
            let _ = writeln!(out, "network:  {}", self.text(ElementId::NetworkName));
            let _ = writeln!(out, "account:  {}", self.text(ElementId::SelectedAccount));
            let _ = writeln!(out, "balance:  {} ETH", self.text(ElementId::AccountBalance));
            if self.is_visible(ElementId::CreateToken) {
                let submit = if self.is_disabled(ElementId::BtnCreateToken) {
                    "[create token: pending]"
                } else {
                    "[create token]"
                };
                let _ = writeln!(out, "{submit}");
            }
            let _ = writeln!(out, "[disconnect]");
        }

        for id in [ElementId::TxHash, ElementId::Status] {
            let text = self.text(id);
            if !text.is_empty() {
                let _ = writeln!(out, "{}: {}", id.id(), text);
            }
        }

        out
    }
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for MemoryPage {
    fn set_text(&mut self, id: ElementId, text: &str) {
        self.element_mut(id).text = text.to_string();
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        self.element_mut(id).visible = visible;
    }

    fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        self.element_mut(id).disabled = disabled;
    }

    fn input_value(&self, id: ElementId) -> String {
        self.text(id).to_string()
    }

    fn alert(&mut self, message: &str) {
        tracing::debug!(message, "Alert shown");
        self.alerts.push(message.to_string());
    }
}
