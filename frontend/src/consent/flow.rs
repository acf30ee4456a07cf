use std::cell::Cell;
use std::rc::Rc;

use log::info;

use super::store::{ConsentDecision, ConsentStore};
use super::tracking::{track_visitor, TrackOutcome, VisitContext, VisitorEntry};

/// What to do when the page starts up, decided from the stored consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootAction {
    /// Consent was given on an earlier visit.
    Track,
    /// Declined, or already asked once.
    Idle,
    /// Show the banner once the page has loaded.
    PromptOnLoad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerState {
    NotShown,
    Shown,
    Dismissed,
}

/// Consent banner lifecycle plus the tracking it gates.
pub struct ConsentFlow {
    store: ConsentStore,
    context: Rc<dyn VisitContext>,
    state: Cell<BannerState>,
    on_entry: Option<Box<dyn Fn(&VisitorEntry)>>,
}

impl ConsentFlow {
    pub fn new(store: ConsentStore, context: Rc<dyn VisitContext>) -> Self {
        ConsentFlow {
            store,
            context,
            state: Cell::new(BannerState::NotShown),
            on_entry: None,
        }
    }

    /// Called with every entry tracking produces, fresh or previously stored.
    pub fn on_entry(mut self, observer: impl Fn(&VisitorEntry) + 'static) -> Self {
        self.on_entry = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> BannerState {
        self.state.get()
    }

    pub fn store(&self) -> &ConsentStore {
        &self.store
    }

    pub fn boot(&self) -> BootAction {
        let action = match self.store.consent() {
            Some(ConsentDecision::Accepted) => BootAction::Track,
            Some(ConsentDecision::Declined) => BootAction::Idle,
            None if self.store.prompt_shown() => BootAction::Idle,
            None => BootAction::PromptOnLoad,
        };
        info!("Consent boot action: {:?}", action);
        if action == BootAction::Track {
            self.track_visitor();
        }
        action
    }

    pub fn track_visitor(&self) -> TrackOutcome {
        let outcome = track_visitor(&self.store, self.context.as_ref());
        if let (Some(observer), Some(entry)) = (&self.on_entry, outcome.entry()) {
            observer(entry);
        }
        outcome
    }

    /// Returns true when the caller should draw the banner. The prompt-shown
    /// flag is stored here, before any answer, so a browser is asked once.
    pub fn open_prompt(&self) -> bool {
        if self.state.get() != BannerState::NotShown {
            return false;
        }
        self.store.mark_prompt_shown();
        self.state.set(BannerState::Shown);
        true
    }

    pub fn accept(&self) -> Option<TrackOutcome> {
        if self.state.get() != BannerState::Shown {
            return None;
        }
        info!("Cookie consent accepted");
        self.store.set_consent(ConsentDecision::Accepted);
        self.state.set(BannerState::Dismissed);
        Some(self.track_visitor())
    }

    pub fn decline(&self) -> bool {
        if self.state.get() != BannerState::Shown {
            return false;
        }
        info!("Cookie consent declined");
        self.store.set_consent(ConsentDecision::Declined);
        self.state.set(BannerState::Dismissed);
        true
    }
}
