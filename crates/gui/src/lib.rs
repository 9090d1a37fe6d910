#![allow(clippy::new_without_default, clippy::single_match, clippy::identity_op)]

mod app;
mod host;

pub use app::SessionApp;
pub use host::{session_key, EguiHost};

use eframe::egui::{self, Vec2};
use nemu_session::{core::EmulatorCore, Session};

/// Opens a window and runs `session` in it until the player leaves.
pub fn run<C: EmulatorCore + 'static>(session: Session<C>) -> eframe::Result<()> {
    let title = session.title().to_string();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_min_inner_size(Vec2::new(512., 480.)),
        ..Default::default()
    };

    eframe::run_native(
        "Nemu",
        native_options,
        Box::new(move |cc| Box::new(SessionApp::new(cc, session))),
    )
}
