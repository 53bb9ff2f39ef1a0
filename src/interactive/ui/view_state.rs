//! View-local state and the presenter adapter that carries the controller's
//! screen effects onto the event loop.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::controller::{Banner, BannerKind, Presenter};
use crate::interactive::constants::SUCCESS_BANNER_TTL_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Results,
}

#[derive(Debug)]
pub struct TimedBanner {
    pub banner: Banner,
    shown: Instant,
}

impl TimedBanner {
    fn new(banner: Banner) -> Self {
        Self {
            banner,
            shown: Instant::now(),
        }
    }

    pub fn expired(&self) -> bool {
        match self.banner.auto_dismiss_ms {
            Some(ms) => self.shown.elapsed() >= Duration::from_millis(ms),
            None => false,
        }
    }
}

/// State that belongs to the screen, not the controller: focus, selection,
/// the transaction-check input, and which overlays are up.
pub struct ViewState {
    pub focus: Focus,
    pub selected_relay: usize,
    pub check_input: String,
    pub dialog_open: bool,
    pub help_open: bool,
    pub banner: Option<TimedBanner>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Form,
            selected_relay: 0,
            check_input: String::new(),
            dialog_open: false,
            help_open: false,
            banner: None,
        }
    }

    pub fn apply_effect(&mut self, effect: ViewEffect) {
        match effect {
            ViewEffect::ScrollToResults => {
                self.focus = Focus::Results;
                self.selected_relay = 0;
            }
            ViewEffect::OpenPaymentDialog => {
                self.dialog_open = true;
            }
            ViewEffect::ClearBanners => {
                self.banner = None;
            }
            ViewEffect::ShowBanner(banner) => {
                // Success notices clear themselves; warnings wait for the
                // user.
                let banner = if banner.kind == BannerKind::Success
                    && banner.auto_dismiss_ms.is_none()
                {
                    banner.with_auto_dismiss(SUCCESS_BANNER_TTL_MS)
                } else {
                    banner
                };
                self.banner = Some(TimedBanner::new(banner));
            }
        }
    }

    pub fn expire_banner(&mut self) {
        if self.banner.as_ref().is_some_and(TimedBanner::expired) {
            self.banner = None;
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Screen effects requested by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEffect {
    ScrollToResults,
    OpenPaymentDialog,
    ClearBanners,
    ShowBanner(Banner),
}

/// [`Presenter`] implementation that forwards effects over a channel; the
/// event loop drains them each tick.
pub struct TuiPresenter {
    tx: Sender<ViewEffect>,
}

impl TuiPresenter {
    pub fn channel() -> (Self, Receiver<ViewEffect>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl Presenter for TuiPresenter {
    fn present_results(&mut self) {
        let _ = self.tx.send(ViewEffect::ScrollToResults);
    }

    fn present_payment_dialog(&mut self) {
        let _ = self.tx.send(ViewEffect::OpenPaymentDialog);
    }

    fn clear_payment_banners(&mut self) {
        let _ = self.tx.send(ViewEffect::ClearBanners);
    }

    fn show_banner(&mut self, banner: Banner) {
        let _ = self.tx.send(ViewEffect::ShowBanner(banner));
    }
}
