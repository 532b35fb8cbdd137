//! Main application state and UI coordination

use std::path::PathBuf;

use eframe::egui;

use crate::core::branding::DEFAULT_LOGO;
use crate::core::company::CompanyStore;
use crate::core::config::AppConfig;
use crate::core::i18n::{self, Translator};
use crate::core::pointer::PointerHub;
use crate::ui::colors::ColorScheme;
use crate::ui::company_panel::{CompanyPanel, ControlMap};
use crate::ui::header::HeaderPanel;

const DEFAULT_LOGO_SVG: &[u8] = include_bytes!("../assets/default_logo.svg");

/// Main application state
pub struct LedgerdeskApp {
    /// Application configuration
    pub config: AppConfig,
    /// Current company and pending changes
    pub store: CompanyStore,
    /// Translation lookup
    pub translator: Translator,
    /// Input palette
    pub colors: ColorScheme,
    /// Pointer presses fanned out to custom field controls
    pub pointer_hub: PointerHub,
    /// Custom field controls by field key
    pub controls: ControlMap,
}

impl LedgerdeskApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        cc.egui_ctx.include_bytes(DEFAULT_LOGO, DEFAULT_LOGO_SVG);

        let colors = ColorScheme::for_theme(&config.ui.theme);
        cc.egui_ctx.set_visuals(colors.visuals());

        let translator = Translator::new_or_default(&config.locale);

        let store = match config.last_company_file {
            Some(ref path) => CompanyStore::load(path).unwrap_or_else(|e| {
                tracing::error!("Failed to load company: {}", e);
                CompanyStore::sample()
            }),
            None => CompanyStore::sample(),
        };

        Self {
            config,
            store,
            translator,
            colors,
            pointer_hub: PointerHub::new(),
            controls: ControlMap::new(),
        }
    }

    /// Open a company file, replacing the current company
    pub fn open_company(&mut self, path: PathBuf) {
        match CompanyStore::load(&path) {
            Ok(store) => {
                self.store = store;
                // Dropping the controls releases their pointer listeners
                self.controls.clear();
                self.config.add_recent_file(path);
                self.save_config();
            }
            Err(e) => {
                tracing::error!("Failed to open company: {}", e);
            }
        }
    }

    /// Pick a company file with the native dialog
    fn pick_company(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Company", &["json"])
            .pick_file()
        {
            self.open_company(path);
        }
    }

    fn set_theme(&mut self, ctx: &egui::Context, theme: &str) {
        self.config.ui.theme = theme.to_string();
        self.colors = ColorScheme::for_theme(theme);
        ctx.set_visuals(self.colors.visuals());
        self.save_config();
    }

    fn set_locale(&mut self, locale: &str) {
        self.translator = Translator::new_or_default(locale);
        self.config.locale = self.translator.locale().to_string();
        self.save_config();
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }

    /// Forward this frame's primary pointer press to the listeners
    fn dispatch_pointer(&self, ctx: &egui::Context) {
        let press = ctx.input(|i| {
            if i.pointer.primary_pressed() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });
        if let Some(pos) = press {
            self.pointer_hub.pointer_down(pos);
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        let t = self.translator.clone();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button(t.t("file"), |ui| {
                    if ui.button(t.t("open_company")).clicked() {
                        self.pick_company();
                        ui.close();
                    }
                    ui.menu_button(t.t("recent"), |ui| {
                        for path in self.config.recent_files.clone() {
                            if ui.button(path.display().to_string()).clicked() {
                                self.open_company(path);
                                ui.close();
                            }
                        }
                    });
                    ui.separator();
                    if ui.button(t.t("exit")).clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button(t.t("view"), |ui| {
                    let dark = self.config.is_dark();
                    if ui.selectable_label(dark, t.t("dark_theme")).clicked() {
                        self.set_theme(ctx, "dark");
                        ui.close();
                    }
                    if ui.selectable_label(!dark, t.t("light_theme")).clicked() {
                        self.set_theme(ctx, "light");
                        ui.close();
                    }
                    ui.separator();
                    ui.menu_button(t.t("language"), |ui| {
                        for locale in i18n::locales() {
                            if ui
                                .selectable_label(self.translator.locale() == locale, locale)
                                .clicked()
                            {
                                self.set_locale(locale);
                                ui.close();
                            }
                        }
                    });
                });
            });
        });
    }
}

impl eframe::App for LedgerdeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::O)) {
            self.pick_company();
        }

        self.dispatch_pointer(ctx);

        self.render_menu_bar(ctx);

        egui::TopBottomPanel::top("company_header")
            .min_height(64.0)
            .show(ctx, |ui| {
                HeaderPanel::show(ui, &self.store, &self.translator);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            CompanyPanel::show(
                ui,
                &mut self.store,
                &mut self.controls,
                &self.pointer_hub,
                &self.translator,
                &self.colors,
            );
        });
    }
}
