//! Casino Desktop: egui app state and UI.
//!
//! The lobby fills the central panel; the loading dialog, the betting dialog and any
//! message box are fixed-size windows anchored at the center. Message boxes are tracked
//! by the core state machines, so the bet button stays disabled while one is open.

use casino::config::Config;
use casino::dialog::{DialogSize, Notice, NoticeKind};
use casino::lobby::{Entry, Lobby, Stage};
use casino::messages;
use casino::outcome::RandomOutcomes;
use casino::wallet::{SharedUser, User};
use eframe::egui;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Load config and build the lobby for the local player.
pub fn setup(config_path: Option<PathBuf>) -> anyhow::Result<(Config, Lobby<RandomOutcomes>)> {
    let (config, path) = casino::config::load_config(config_path)?;
    log::debug!("config loaded from {}", path.display());
    let seed = casino::config::resolve_seed(&config);
    let user = SharedUser::new(User::new("player", config.game.starting_credits));
    let lobby = Lobby::from_config(&config, user, RandomOutcomes::from_seed(seed))?;
    Ok((config, lobby))
}

/// Register a font file as the first choice for both families. egui's bundled fonts have
/// no CJK glyphs.
fn install_font(ctx: &egui::Context, path: &Path) -> anyhow::Result<()> {
    use anyhow::Context as _;

    let bytes = std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk".to_owned(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, "cjk".to_owned());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push("cjk".to_owned());
    ctx.set_fonts(fonts);
    Ok(())
}

fn dialog_window<'a>(title: &str, size: DialogSize) -> egui::Window<'a> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([size.width, size.height])
}

/// Show a message box. Returns true when the user pressed OK.
fn show_notice(ctx: &egui::Context, id: &str, notice: &Notice) -> bool {
    let mut acknowledged = false;
    egui::Window::new(notice.title.as_str())
        .id(egui::Id::new(id))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let (icon, color) = match notice.kind {
                    NoticeKind::Information => ("ℹ", egui::Color32::LIGHT_BLUE),
                    NoticeKind::Warning => ("⚠", egui::Color32::YELLOW),
                };
                ui.label(egui::RichText::new(icon).size(22.0).color(color));
                ui.label(notice.body.as_str());
            });
            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(messages::OK_BUTTON).clicked() {
                    acknowledged = true;
                }
            });
        });
    acknowledged
}

pub struct CasinoApp {
    lobby: Lobby<RandomOutcomes>,
    /// Time of the previous frame; drives the loading timer.
    last_frame: Option<Instant>,
}

impl CasinoApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &Config,
        lobby: Lobby<RandomOutcomes>,
    ) -> Self {
        if let Some(path) = &config.desktop.font_path {
            match install_font(&cc.egui_ctx, path) {
                Ok(()) => log::info!("using font {}", path.display()),
                Err(e) => log::warn!("font not installed: {:#}", e),
            }
        }
        log::info!("desktop started");
        Self {
            lobby,
            last_frame: None,
        }
    }

    fn ui_lobby(&mut self, ctx: &egui::Context) {
        let idle = matches!(self.lobby.stage(), Stage::Lobby) && self.lobby.notice().is_none();
        let mut enter = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none()
                .inner_margin(egui::Margin::symmetric(24.0, 0.0))
                .show(ui, |ui| {
                    ui.add_space(24.0);
                    ui.heading(messages::LOBBY_TITLE);
                    ui.add_space(18.0);
                    ui.label(self.lobby.label());
                    ui.add_space(12.0);
                    if ui
                        .add_enabled(idle, egui::Button::new(messages::ENTER_CASINO_BUTTON))
                        .clicked()
                    {
                        enter = true;
                    }
                });
        });
        if enter {
            match self.lobby.enter_casino() {
                Ok(Entry::Loading) => log::debug!("loading casino"),
                Ok(Entry::Refused { credits }) => log::debug!("entry refused at {}", credits),
                Err(e) => log::debug!("enter ignored: {}", e),
            }
        }
        if let Some(notice) = self.lobby.notice().cloned() {
            if show_notice(ctx, "lobby_notice", &notice) {
                self.lobby.dismiss_notice();
            }
        }
    }

    fn ui_loading(&self, ctx: &egui::Context) {
        let Some(dialog) = self.lobby.loading() else {
            return;
        };
        dialog_window(dialog.title(), dialog.size()).show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.label(dialog.label());
                ui.add_space(12.0);
                ui.add(egui::ProgressBar::new(dialog.fraction()).show_percentage());
            });
        });
    }

    fn ui_casino(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.lobby.casino() else {
            return;
        };
        let mut open = true;
        let mut bet_clicked = false;
        dialog_window(dialog.title(), dialog.size())
            .open(&mut open)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(140.0);
                    ui.label(egui::RichText::new(dialog.label()).size(20.0));
                    ui.add_space(24.0);
                    if ui
                        .add_enabled(dialog.can_bet(), egui::Button::new(dialog.button_text()))
                        .clicked()
                    {
                        bet_clicked = true;
                    }
                });
            });
        let dismissed = dialog
            .notice()
            .map(|notice| show_notice(ctx, "casino_notice", notice))
            .unwrap_or(false);

        if !open {
            if let Some(result) = self.lobby.close_casino() {
                log::info!("casino closed ({:?}), {}", result, self.lobby.label());
            }
            return;
        }
        let Some(dialog) = self.lobby.casino_mut() else {
            return;
        };
        if bet_clicked {
            match dialog.place_bet() {
                Ok(result) => log::debug!("bet: {:?}", result),
                Err(e) => log::debug!("bet ignored: {}", e),
            }
        }
        if dismissed {
            dialog.dismiss_notice();
        }
    }
}

impl eframe::App for CasinoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let elapsed = self.last_frame.map(|t| now - t).unwrap_or_default();
        self.last_frame = Some(now);

        if self.lobby.advance(elapsed) {
            log::debug!("loading finished, casino open");
        }
        if let Some(next) = self.lobby.loading().and_then(|d| d.until_next_tick()) {
            ctx.request_repaint_after(next);
        }

        self.ui_lobby(ctx);
        if self.lobby.loading().is_some() {
            self.ui_loading(ctx);
        } else if self.lobby.casino().is_some() {
            self.ui_casino(ctx);
        }
    }
}
