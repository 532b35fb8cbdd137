//! Company settings form: details, custom fields and pending-change actions

use std::collections::BTreeMap;

use eframe::egui;

use super::colors::ColorScheme;
use super::custom_field::CustomFieldWidget;
use crate::core::company::CompanyStore;
use crate::core::custom_field::CustomFieldControl;
use crate::core::i18n::Translator;
use crate::core::pointer::PointerHub;

/// Custom field controls kept alive across frames, keyed by field key
pub type ControlMap = BTreeMap<String, CustomFieldControl>;

/// Company settings panel
pub struct CompanyPanel;

impl CompanyPanel {
    /// Show the panel
    pub fn show(
        ui: &mut egui::Ui,
        store: &mut CompanyStore,
        controls: &mut ControlMap,
        hub: &PointerHub,
        t: &Translator,
        colors: &ColorScheme,
    ) {
        egui::ScrollArea::vertical()
            .id_salt("company_scroll")
            .show(ui, |ui| {
                Self::show_details(ui, store, t, colors);
                ui.add_space(12.0);
                Self::show_custom_fields(ui, store, controls, hub, t, colors);
                ui.add_space(12.0);
                ui.separator();
                Self::show_actions(ui, store, t);
            });
    }

    fn show_details(ui: &mut egui::Ui, store: &mut CompanyStore, t: &Translator, colors: &ColorScheme) {
        ui.heading(t.t("company_details"));
        if let Some(source) = &store.source {
            ui.weak(source.display().to_string());
        }
        ui.add_space(4.0);

        let settings = store.effective().map(|c| c.settings.clone()).unwrap_or_default();
        let mut name = settings.name.unwrap_or_default();
        let mut logo = settings.company_logo.unwrap_or_default();

        egui::Grid::new("company_details_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label(t.t("name"));
                if ui
                    .add(egui::TextEdit::singleline(&mut name).text_color(colors.c3))
                    .changed()
                {
                    store.stage().settings.name = Some(name);
                }
                ui.end_row();

                ui.label(t.t("logo"));
                if ui
                    .add(
                        egui::TextEdit::singleline(&mut logo)
                            .desired_width(400.0)
                            .text_color(colors.c3),
                    )
                    .changed()
                {
                    store.stage().settings.company_logo = Some(logo);
                }
                ui.end_row();
            });
    }

    fn show_custom_fields(
        ui: &mut egui::Ui,
        store: &mut CompanyStore,
        controls: &mut ControlMap,
        hub: &PointerHub,
        t: &Translator,
        colors: &ColorScheme,
    ) {
        ui.heading(t.t("custom_fields"));
        ui.add_space(4.0);

        let keys = store.custom_field_keys();
        controls.retain(|key, _| keys.contains(key));

        if keys.is_empty() {
            ui.label(
                egui::RichText::new(t.t("no_custom_fields"))
                    .italics()
                    .color(egui::Color32::from_gray(120)),
            );
            return;
        }

        egui::Grid::new("custom_fields_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                for key in &keys {
                    let Some(props) = store.custom_field_props(key) else {
                        continue;
                    };

                    let control = controls
                        .entry(key.clone())
                        .or_insert_with(|| CustomFieldControl::new(props.clone(), hub));
                    control.set_props(props);

                    ui.label(key.as_str());
                    CustomFieldWidget::show(ui, control, colors, t, |value| {
                        tracing::debug!("Custom field {} changed to {:?}", key, value);
                        store.set_custom_value(key, value);
                    });
                    ui.end_row();
                }
            });
    }

    fn show_actions(ui: &mut egui::Ui, store: &mut CompanyStore, t: &Translator) {
        ui.horizontal(|ui| {
            let dirty = store.is_dirty();
            if ui.add_enabled(dirty, egui::Button::new(t.t("apply"))).clicked() {
                store.apply_changes();
            }
            if ui
                .add_enabled(store.changes.is_some(), egui::Button::new(t.t("discard")))
                .clicked()
            {
                store.discard_changes();
            }
        });
    }
}
