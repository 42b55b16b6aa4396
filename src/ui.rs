// src/ui.rs
use std::cell::RefCell;

use gloo::console::error;
use gloo::timers::callback::Timeout;
use yew::UseReducerDispatcher;

use crate::board::{BoardAction, BoardState, BoardUi};

/// `BoardUi` for the mounted Yew app: reducer dispatch, gloo timers,
/// console diagnostics.
pub struct YewUi {
    dispatcher: UseReducerDispatcher<BoardState>,
    pending_hide: RefCell<Option<Timeout>>,
    cancel_pending_hide: bool,
}

impl YewUi {
    pub fn new(dispatcher: UseReducerDispatcher<BoardState>, cancel_pending_hide: bool) -> Self {
        Self {
            dispatcher,
            pending_hide: RefCell::new(None),
            cancel_pending_hide,
        }
    }
}

impl BoardUi for YewUi {
    fn dispatch(&self, action: BoardAction) {
        self.dispatcher.dispatch(action);
    }

    fn schedule_hide(&self, delay_ms: u32) {
        let dispatcher = self.dispatcher.clone();
        let timeout = Timeout::new(delay_ms, move || {
            dispatcher.dispatch(BoardAction::HideNotice);
        });

        if self.cancel_pending_hide {
            // Replacing drops the previous Timeout, which clears it.
            self.pending_hide.borrow_mut().replace(timeout);
        } else {
            let _ = timeout.forget();
        }
    }

    fn report(&self, context: &str, detail: &str) {
        error!(context.to_string(), detail.to_string());
    }
}
