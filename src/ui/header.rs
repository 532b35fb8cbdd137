//! Header showing the company logo and name

use eframe::egui;

use crate::core::branding;
use crate::core::company::CompanyStore;
use crate::core::i18n::Translator;

const LOGO_HEIGHT: f32 = 48.0;

/// Company header bar
pub struct HeaderPanel;

impl HeaderPanel {
    /// Show the header
    pub fn show(ui: &mut egui::Ui, store: &CompanyStore, t: &Translator) {
        let logo = branding::logo_url(store);
        let name = branding::company_name(store, t);
        let linkable = logo.starts_with("http://") || logo.starts_with("https://");

        ui.horizontal(|ui| {
            let image = egui::Image::from_uri(logo.clone())
                .max_height(LOGO_HEIGHT)
                .sense(egui::Sense::click());
            let response = ui.add(image);
            let response = if linkable {
                response.on_hover_text(logo.as_str())
            } else {
                response
            };

            if response.clicked() && linkable {
                if let Err(e) = open::that(&logo) {
                    tracing::error!("Failed to open logo URL {}: {}", logo, e);
                }
            }

            ui.add_space(8.0);
            ui.heading(name);

            if store.is_dirty() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(t.t("unsaved_changes"))
                            .italics()
                            .color(egui::Color32::from_rgb(224, 108, 117)),
                    );
                });
            }
        });
    }
}
