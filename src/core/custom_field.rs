//! Headless state machine behind the custom field control
//!
//! All edits funnel through [`CustomFieldControl::update`], which returns the
//! value to hand to the change callback, if any. Every user action produces
//! at most one such value.

use chrono::NaiveDate;

use super::field::{
    filter_options, format_date, parse_date, FieldDescriptor, FieldKind, FieldOption, FieldValue,
    DISPLAY_LIMIT,
};
use super::pointer::{PointerHub, PointerSubscription};

/// Inputs to a custom field control
#[derive(Debug, Clone, PartialEq)]
pub struct FieldProps {
    /// Field identifier; only used to detect a change of field
    pub field: String,
    /// Field descriptor (`"<options>|<type-tag>"`)
    pub value: String,
    /// Externally supplied current value
    pub default_value: FieldValue,
}

impl FieldProps {
    pub fn new(
        field: impl Into<String>,
        value: impl Into<String>,
        default_value: FieldValue,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            default_value,
        }
    }
}

/// User interactions understood by the control
#[derive(Debug, Clone, PartialEq)]
pub enum ControlMsg {
    /// Text edited in a single- or multi-line input
    TextChanged(String),
    /// Switch flipped
    Toggled(bool),
    /// Date picked
    DateChanged(NaiveDate),
    /// Searchable input focused or clicked
    Opened,
    /// Text typed into the searchable input
    Typed(String),
    /// Option picked from the list
    OptionClicked(String),
    /// Clear button pressed
    Cleared,
    /// Pointer pressed outside the control
    PointerDownOutside,
}

/// Observable state of a control
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub kind: FieldKind,
    pub all_options: Vec<FieldOption>,
    pub displayed_options: Vec<FieldOption>,
    pub selected_value: Option<String>,
    pub dropdown_open: bool,
}

impl ControlState {
    fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            all_options: Vec::new(),
            displayed_options: Vec::new(),
            selected_value: None,
            dropdown_open: false,
        }
    }

    fn refilter(&mut self) {
        self.displayed_options =
            filter_options(&self.all_options, self.selected_value.as_deref());
    }
}

/// A custom field control instance
#[derive(Debug)]
pub struct CustomFieldControl {
    props: FieldProps,
    descriptor: FieldDescriptor,
    state: ControlState,
    /// Local echo for text and date inputs
    draft: String,
    checked: bool,
    hub: PointerHub,
    subscription: Option<PointerSubscription>,
}

impl CustomFieldControl {
    /// Mount a control for `props`
    pub fn new(props: FieldProps, hub: &PointerHub) -> Self {
        let descriptor = FieldDescriptor::parse(&props.value);
        let mut control = Self {
            state: ControlState::new(descriptor.kind.clone()),
            descriptor,
            props,
            draft: String::new(),
            checked: false,
            hub: hub.clone(),
            subscription: None,
        };
        control.reset();
        control.sync_subscription();
        control
    }

    /// Feed new inputs, resetting derived state when they changed
    pub fn set_props(&mut self, props: FieldProps) {
        let descriptor_changed = props.field != self.props.field || props.value != self.props.value;
        let default_changed = props.default_value != self.props.default_value;
        self.props = props;

        if descriptor_changed {
            self.descriptor = FieldDescriptor::parse(&self.props.value);
            if self.descriptor.kind != self.state.kind {
                tracing::debug!(
                    "Field {} changed kind: {} -> {}",
                    self.props.field,
                    self.state.kind,
                    self.descriptor.kind
                );
                self.state.kind = self.descriptor.kind.clone();
                self.state.dropdown_open = false;
            }
        }

        if descriptor_changed || default_changed {
            self.reset();
            self.sync_subscription();
        }
    }

    /// Apply a user interaction; `Some(value)` must be propagated exactly once
    pub fn update(&mut self, msg: ControlMsg) -> Option<FieldValue> {
        let kind = self.state.kind.clone();
        match (kind, msg) {
            (FieldKind::SingleLineText | FieldKind::MultiLineText, ControlMsg::TextChanged(text)) => {
                self.draft = text.clone();
                Some(FieldValue::Text(text))
            }
            (FieldKind::Switch, ControlMsg::Toggled(on)) => {
                self.checked = on;
                Some(FieldValue::Bool(on))
            }
            (FieldKind::Date, ControlMsg::DateChanged(date)) => {
                self.draft = format_date(date);
                Some(FieldValue::Text(self.draft.clone()))
            }
            (FieldKind::Unknown(_), ControlMsg::Opened) => {
                self.state.dropdown_open = true;
                None
            }
            (FieldKind::Unknown(_), ControlMsg::Typed(text)) => {
                self.select(Some(text.clone()));
                self.state.dropdown_open = true;
                Some(FieldValue::Text(text))
            }
            (FieldKind::Unknown(_), ControlMsg::OptionClicked(value)) => {
                self.select(Some(value.clone()));
                self.state.dropdown_open = false;
                Some(FieldValue::Text(value))
            }
            (FieldKind::Unknown(_), ControlMsg::Cleared) => {
                self.select(None);
                self.state.dropdown_open = false;
                Some(FieldValue::Empty)
            }
            (FieldKind::Unknown(_), ControlMsg::PointerDownOutside) => {
                self.state.dropdown_open = false;
                None
            }
            (kind, msg) => {
                tracing::debug!("Ignoring {:?} for {} field {}", msg, kind, self.props.field);
                None
            }
        }
    }

    /// Drain a pending outside press and close the list if it was open
    pub fn poll_pointer(&mut self) {
        let pressed = self
            .subscription
            .as_ref()
            .is_some_and(|subscription| subscription.take_outside_press());
        if pressed && self.state.dropdown_open {
            self.update(ControlMsg::PointerDownOutside);
        }
    }

    /// Report the control's on-screen region for click-outside detection
    pub fn set_bounds(&self, bounds: eframe::egui::Rect) {
        if let Some(subscription) = &self.subscription {
            subscription.set_bounds(bounds);
        }
    }

    pub fn field(&self) -> &str {
        &self.props.field
    }

    pub fn kind(&self) -> &FieldKind {
        &self.state.kind
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.dropdown_open
    }

    /// Whether any option matches the current text
    pub fn has_matches(&self) -> bool {
        !self.state.displayed_options.is_empty()
    }

    /// Text shown in the searchable input
    pub fn display_text(&self) -> &str {
        self.state.selected_value.as_deref().unwrap_or_default()
    }

    /// Text shown in plain text inputs
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn date(&self) -> Option<NaiveDate> {
        parse_date(&self.draft)
    }

    /// Whether this control currently holds a pointer subscription
    #[allow(dead_code)]
    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    fn select(&mut self, value: Option<String>) {
        self.state.selected_value = value;
        self.state.refilter();
    }

    fn reset(&mut self) {
        let default = &self.props.default_value;
        self.draft = default.as_text();
        self.checked = default.as_checked();

        self.state.all_options = self.descriptor.derive_options();
        self.state.displayed_options = self
            .state
            .all_options
            .iter()
            .take(DISPLAY_LIMIT)
            .cloned()
            .collect();
        self.select(default.as_selection());
    }

    fn sync_subscription(&mut self) {
        let wanted = self.state.kind.is_searchable();
        if wanted && self.subscription.is_none() {
            self.subscription = Some(self.hub.subscribe());
        } else if !wanted {
            self.subscription = None;
        }
    }
}
