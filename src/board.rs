// src/board.rs
//! Board state, the actions that change it, and the three user-facing
//! operations (load, unregister, signup).
//!
//! Every mutation is followed by a full reload; nothing here edits the
//! activity list in place.

use std::rc::Rc;

use yew::Reducible;

use crate::api::{ActivityApi, ApiError};
use crate::model::Activity;

pub const LOADING_TEXT: &str = "Loading activities...";
pub const LIST_FAILURE_TEXT: &str = "Failed to load activities. Please try again later.";
pub const SIGNUP_FALLBACK_TEXT: &str = "An error occurred";
pub const SIGNUP_FAILURE_TEXT: &str = "Failed to sign up. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityList {
    Loading,
    Ready(Vec<Activity>),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub visible: bool,
}

/// Current values of the signup form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupDraft {
    pub email: String,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub list: ActivityList,
    /// Activity names offered in the selection control. Append-only.
    pub options: Vec<String>,
    pub notice: Option<Notice>,
    pub draft: SignupDraft,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            list: ActivityList::Loading,
            options: Vec::new(),
            notice: None,
            draft: SignupDraft::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    Loaded(Vec<Activity>),
    LoadFailed,
    ShowNotice { text: String, kind: NoticeKind },
    HideNotice,
    ResetForm,
    EditEmail(String),
    SelectActivity(String),
}

impl BoardState {
    pub fn apply(&mut self, action: BoardAction) {
        match action {
            BoardAction::Loaded(activities) => {
                for a in &activities {
                    if !self.options.iter().any(|o| o == &a.name) {
                        self.options.push(a.name.clone());
                    }
                }
                self.list = ActivityList::Ready(activities);
            }
            // Options are left alone on failure.
            BoardAction::LoadFailed => self.list = ActivityList::Failed,
            BoardAction::ShowNotice { text, kind } => {
                self.notice = Some(Notice {
                    text,
                    kind,
                    visible: true,
                });
            }
            BoardAction::HideNotice => {
                if let Some(n) = self.notice.as_mut() {
                    n.visible = false;
                }
            }
            BoardAction::ResetForm => self.draft = SignupDraft::default(),
            BoardAction::EditEmail(email) => self.draft.email = email,
            BoardAction::SelectActivity(name) => self.draft.activity = name,
        }
    }
}

impl Reducible for BoardState {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}

/// What the board needs from its host page.
pub trait BoardUi {
    fn dispatch(&self, action: BoardAction);
    /// Hide the message area after `delay_ms`.
    fn schedule_hide(&self, delay_ms: u32);
    /// Diagnostics only; never shown to the user.
    fn report(&self, context: &str, detail: &str);
}

pub struct ActivityBoard<A, U> {
    api: A,
    ui: U,
    hide_after_ms: u32,
}

impl<A: ActivityApi, U: BoardUi> ActivityBoard<A, U> {
    pub fn new(api: A, ui: U, hide_after_ms: u32) -> Self {
        Self {
            api,
            ui,
            hide_after_ms,
        }
    }

    pub async fn load_activities(&self) {
        match self.api.list_activities().await {
            Ok(activities) => self.ui.dispatch(BoardAction::Loaded(activities)),
            Err(err) => {
                self.ui.dispatch(BoardAction::LoadFailed);
                self.ui.report("Error fetching activities:", &err.to_string());
            }
        }
    }

    /// Remove a participant, then reload whatever the outcome was.
    pub async fn unregister_participant(&self, activity: &str, participant: &str) {
        match self.api.unregister(activity, participant).await {
            Ok(()) => {}
            Err(ApiError::Status { body, .. }) => self.ui.report("Failed to unregister:", &body),
            Err(err) => self
                .ui
                .report("Error unregistering participant:", &err.to_string()),
        }
        self.load_activities().await;
    }

    pub async fn submit_signup(&self, email: &str, activity: &str) {
        let reply = match self.api.signup(activity, email).await {
            Ok(reply) => reply,
            Err(err) => {
                // No reload on this path.
                self.ui.dispatch(BoardAction::ShowNotice {
                    text: SIGNUP_FAILURE_TEXT.to_string(),
                    kind: NoticeKind::Error,
                });
                self.ui.report("Error signing up:", &err.to_string());
                return;
            }
        };

        if reply.ok {
            self.ui.dispatch(BoardAction::ShowNotice {
                text: reply.message.unwrap_or_default(),
                kind: NoticeKind::Success,
            });
            self.ui.dispatch(BoardAction::ResetForm);
        } else {
            self.ui.dispatch(BoardAction::ShowNotice {
                text: reply
                    .detail
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| SIGNUP_FALLBACK_TEXT.to_string()),
                kind: NoticeKind::Error,
            });
        }

        self.ui.schedule_hide(self.hide_after_ms);
        self.load_activities().await;
    }
}
