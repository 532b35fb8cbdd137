//! Custom field widget

use eframe::egui::{self, RichText};

use super::colors::ColorScheme;
use super::toggle::toggle;
use crate::core::custom_field::{ControlMsg, CustomFieldControl};
use crate::core::field::{FieldKind, FieldValue};
use crate::core::i18n::Translator;

const SEARCH_INPUT_WIDTH: f32 = 200.0;
const OPTION_LIST_WIDTH: f32 = 250.0;
const OPTION_LIST_HEIGHT: f32 = 170.0;

/// Renders a [`CustomFieldControl`] according to its field kind
pub struct CustomFieldWidget;

impl CustomFieldWidget {
    /// Show the control; every committed edit is passed to `on_value_change`
    pub fn show(
        ui: &mut egui::Ui,
        control: &mut CustomFieldControl,
        colors: &ColorScheme,
        t: &Translator,
        mut on_value_change: impl FnMut(FieldValue),
    ) {
        control.poll_pointer();

        let mut msgs = Vec::new();
        match control.kind().clone() {
            FieldKind::SingleLineText => Self::show_text(ui, control, colors, false, &mut msgs),
            FieldKind::MultiLineText => Self::show_text(ui, control, colors, true, &mut msgs),
            FieldKind::Switch => {
                let mut on = control.checked();
                if toggle(ui, &mut on).changed() {
                    msgs.push(ControlMsg::Toggled(on));
                }
            }
            FieldKind::Date => Self::show_date(ui, control, t, &mut msgs),
            FieldKind::Unknown(_) => Self::show_searchable(ui, control, colors, t, &mut msgs),
        }

        for msg in msgs {
            if let Some(value) = control.update(msg) {
                on_value_change(value);
            }
        }
    }

    fn show_text(
        ui: &mut egui::Ui,
        control: &CustomFieldControl,
        colors: &ColorScheme,
        multiline: bool,
        msgs: &mut Vec<ControlMsg>,
    ) {
        let mut text = control.draft().to_string();
        let edit = if multiline {
            egui::TextEdit::multiline(&mut text).desired_rows(3)
        } else {
            egui::TextEdit::singleline(&mut text)
        };
        let response = ui.add(
            edit.id_salt(("custom_field", control.field()))
                .text_color(colors.c3)
                .background_color(colors.c0),
        );

        if response.changed() {
            msgs.push(ControlMsg::TextChanged(text));
        }
    }

    fn show_date(
        ui: &mut egui::Ui,
        control: &CustomFieldControl,
        t: &Translator,
        msgs: &mut Vec<ControlMsg>,
    ) {
        ui.horizontal(|ui| {
            let current = control.date();
            let shown = current.unwrap_or_else(|| chrono::Local::now().date_naive());
            let mut date = shown;
            ui.add(egui_extras::DatePickerButton::new(&mut date).id_salt(control.field()));

            if date != shown {
                msgs.push(ControlMsg::DateChanged(date));
            }
            if current.is_none() {
                ui.weak(t.t("no_date"));
            }
        });
    }

    fn show_searchable(
        ui: &mut egui::Ui,
        control: &CustomFieldControl,
        colors: &ColorScheme,
        t: &Translator,
        msgs: &mut Vec<ControlMsg>,
    ) {
        let inner = ui.vertical(|ui| {
            ui.horizontal(|ui| {
                let mut text = control.display_text().to_string();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut text)
                        .id_salt(("custom_field", control.field()))
                        .desired_width(SEARCH_INPUT_WIDTH)
                        .text_color(colors.c3)
                        .background_color(colors.c0),
                );

                if response.changed() {
                    msgs.push(ControlMsg::Typed(text));
                } else if response.gained_focus() || response.clicked() {
                    msgs.push(ControlMsg::Opened);
                }

                if ui.small_button("\u{2715}").on_hover_text(t.t("clear")).clicked() {
                    msgs.push(ControlMsg::Cleared);
                }
            });

            if control.is_open() {
                Self::show_options(ui, control, colors, t, msgs);
            }
        });

        control.set_bounds(inner.response.rect);
    }

    fn show_options(
        ui: &mut egui::Ui,
        control: &CustomFieldControl,
        colors: &ColorScheme,
        t: &Translator,
        msgs: &mut Vec<ControlMsg>,
    ) {
        egui::Frame::group(ui.style())
            .fill(colors.c1)
            .stroke(egui::Stroke::new(1.0, colors.c2))
            .show(ui, |ui| {
                ui.set_width(OPTION_LIST_WIDTH);
                egui::ScrollArea::both()
                    .id_salt(("custom_field_options", control.field()))
                    .max_height(OPTION_LIST_HEIGHT)
                    .show(ui, |ui| {
                        if !control.has_matches() {
                            ui.vertical_centered(|ui| {
                                ui.add_enabled(
                                    false,
                                    egui::Label::new(RichText::new(t.t("no_data_found")).weak()),
                                );
                            });
                            return;
                        }

                        for option in &control.state().displayed_options {
                            let label = RichText::new(option.label.as_str()).color(colors.c3);
                            if ui.selectable_label(false, label).clicked() {
                                msgs.push(ControlMsg::OptionClicked(option.value.clone()));
                            }
                            ui.separator();
                        }
                    });
            });
    }
}
