use std::time::Instant;

use eframe::egui;
use nemu_session::{core::EmulatorCore, Session, SessionError, Transition};

use crate::host::{session_key, EguiHost};

/// What the app has to do after a frame.
#[derive(Debug)]
pub(crate) enum FrameOutcome {
    Continue,
    Leave,
    Fatal(SessionError),
}

pub struct SessionApp<C: EmulatorCore> {
    session: Option<Session<C>>,
    host: EguiHost,

    start: Instant,
    prev_time: Option<Instant>,
}

impl<C: EmulatorCore> SessionApp<C> {
    pub fn new(cc: &eframe::CreationContext<'_>, session: Session<C>) -> Self {
        Self::with_context(cc.egui_ctx.clone(), session)
    }

    pub fn with_context(ctx: egui::Context, mut session: Session<C>) -> Self {
        let mut host = EguiHost::new(ctx);
        session.enter(&mut host);

        Self {
            session: Some(session),
            host,
            start: Instant::now(),
            prev_time: None,
        }
    }

    pub fn session(&self) -> Option<&Session<C>> {
        self.session.as_ref()
    }

    pub(crate) fn forward_keys(&mut self, events: &[egui::Event]) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        for ev in events {
            match ev {
                egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = session_key(*key) {
                        session.key_pressed(key);
                    }
                }
                _ => {}
            }
        }
    }

    pub(crate) fn run_frame(&mut self, ctx: &egui::Context) -> FrameOutcome {
        let Some(session) = self.session.as_mut() else {
            return FrameOutcome::Leave;
        };

        if ctx.input(|i| i.viewport().close_requested()) {
            return FrameOutcome::Leave;
        }

        let now = Instant::now();
        let dt = match self.prev_time {
            Some(prev_time) => now.duration_since(prev_time).as_secs_f64(),
            None => 0.,
        };
        self.prev_time = Some(now);
        let t = now.duration_since(self.start).as_secs_f64();

        match session.update(t, dt, &mut self.host) {
            Ok(Transition::Continue) => FrameOutcome::Continue,
            Ok(Transition::ShowMenu) => FrameOutcome::Leave,
            Err(e) => FrameOutcome::Fatal(e),
        }
    }

    /// Persists the session and ends the process.
    fn leave(&mut self) {
        if let Some(session) = self.session.take() {
            session.exit();
        }
    }
}

impl<C: EmulatorCore> eframe::App for SessionApp<C> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.run_frame(ctx) {
            FrameOutcome::Continue => {}
            FrameOutcome::Leave => self.leave(),
            FrameOutcome::Fatal(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        }

        // Always repaint
        ctx.request_repaint();
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        self.host.clear_color()
    }

    fn raw_input_hook(&mut self, _ctx: &egui::Context, raw_input: &mut egui::RawInput) {
        self.forward_keys(&raw_input.events);
    }
}
