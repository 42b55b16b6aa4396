// src/view.rs
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::HttpActivityApi;
use crate::board::{
    ActivityBoard, ActivityList, BoardAction, BoardState, Notice, SignupDraft, LIST_FAILURE_TEXT,
    LOADING_TEXT,
};
use crate::config::load_config;
use crate::model::{Activity, Roster, RosterEntry, NO_PARTICIPANTS_TEXT};
use crate::ui::YewUi;

/// (activity name, participant identifier)
type UnregisterRequest = (String, String);

#[function_component(App)]
pub fn app() -> Html {
    let state = use_reducer(BoardState::default);

    // Built once per mount; holds the API client and the UI bindings.
    let board = {
        let dispatcher = state.dispatcher();
        use_memo((), move |_| {
            let cfg = load_config();
            ActivityBoard::new(
                HttpActivityApi::new(&cfg.api_base),
                YewUi::new(dispatcher, cfg.cancel_pending_hide),
                cfg.message_hide_ms,
            )
        })
    };

    {
        let board = board.clone();
        use_effect_with((), move |_| {
            spawn_local(async move { board.load_activities().await });
            || ()
        });
    }

    let on_unregister = {
        let board = board.clone();
        Callback::from(move |(activity, participant): UnregisterRequest| {
            let board = board.clone();
            spawn_local(async move {
                board.unregister_participant(&activity, &participant).await;
            });
        })
    };

    let on_submit = {
        let board = board.clone();
        let draft = state.draft.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let board = board.clone();
            let SignupDraft { email, activity } = draft.clone();
            spawn_local(async move {
                board.submit_signup(&email, &activity).await;
            });
        })
    };

    let on_email = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(BoardAction::EditEmail(input.value()));
        })
    };

    let on_activity = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: Event| {
            let Some(sel) = e.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            dispatcher.dispatch(BoardAction::SelectActivity(sel.value()));
        })
    };

    html! {
        <main>
            <section id="activities-container">
                <h3>{ "Available Activities" }</h3>
                <div id="activities-list">
                    { activity_list(&state.list, &on_unregister) }
                </div>
            </section>

            <section id="signup-container">
                <h3>{ "Sign Up for an Activity" }</h3>
                <SignupForm
                    draft={state.draft.clone()}
                    options={state.options.clone()}
                    {on_submit}
                    {on_email}
                    {on_activity}
                />
                <MessageArea notice={state.notice.clone()} />
            </section>
        </main>
    }
}

fn activity_list(list: &ActivityList, on_unregister: &Callback<UnregisterRequest>) -> Html {
    match list {
        ActivityList::Loading => html! { <p>{ LOADING_TEXT }</p> },
        ActivityList::Failed => html! { <p>{ LIST_FAILURE_TEXT }</p> },
        ActivityList::Ready(activities) => html! {
            { for activities.iter().map(|a| html! {
                <ActivityCard
                    key={a.name.clone()}
                    activity={a.clone()}
                    on_unregister={on_unregister.clone()}
                />
            }) }
        },
    }
}

#[derive(Properties, PartialEq)]
struct ActivityCardProps {
    activity: Activity,
    on_unregister: Callback<UnregisterRequest>,
}

#[function_component(ActivityCard)]
fn activity_card(props: &ActivityCardProps) -> Html {
    let a = &props.activity;

    let items = match a.roster() {
        Roster::Empty => html! {
            <li class="participant-item empty">{ NO_PARTICIPANTS_TEXT }</li>
        },
        Roster::Members(entries) => html! {
            { for entries.into_iter().map(|entry| html! {
                <ParticipantItem
                    activity={a.name.clone()}
                    {entry}
                    on_unregister={props.on_unregister.clone()}
                />
            }) }
        },
    };

    html! {
        <div class="activity-card">
            <h4>{ a.name.clone() }</h4>
            <p>{ a.description.clone() }</p>
            <p><strong>{ "Schedule:" }</strong>{ format!(" {}", a.schedule) }</p>
            <p><strong>{ "Availability:" }</strong>{ format!(" {} spots left", a.spots_left()) }</p>
            <div class="participants">
                <h5>{ "Participants" }</h5>
                <ul class="participant-list">
                    { items }
                </ul>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ParticipantItemProps {
    activity: String,
    entry: RosterEntry,
    on_unregister: Callback<UnregisterRequest>,
}

#[function_component(ParticipantItem)]
fn participant_item(props: &ParticipantItemProps) -> Html {
    let onclick = {
        let request = (props.activity.clone(), props.entry.identifier.clone());
        let on_unregister = props.on_unregister.clone();
        Callback::from(move |_: MouseEvent| on_unregister.emit(request.clone()))
    };

    html! {
        <li class="participant-item">
            <button
                type="button"
                class="delete-icon"
                title={format!("Unregister {}", props.entry.identifier)}
                {onclick}
            >
                { "🗑️" }
            </button>
            <span class="participant-badge">{ props.entry.initials.clone() }</span>
            <span class="participant-name">{ props.entry.identifier.clone() }</span>
        </li>
    }
}

#[derive(Properties, PartialEq)]
struct SignupFormProps {
    draft: SignupDraft,
    options: Vec<String>,
    on_submit: Callback<SubmitEvent>,
    on_email: Callback<InputEvent>,
    on_activity: Callback<Event>,
}

#[function_component(SignupForm)]
fn signup_form(props: &SignupFormProps) -> Html {
    let select_ref = use_node_ref();

    // The control's value follows the draft. Browsers ignore option
    // `selected` attributes once the user has picked by hand.
    {
        let select_ref = select_ref.clone();
        let deps = (props.draft.activity.clone(), props.options.len());
        use_effect_with(deps, move |(activity, _)| {
            if let Some(sel) = select_ref.cast::<HtmlSelectElement>() {
                sel.set_value(activity);
            }
            || ()
        });
    }

    html! {
        <form id="signup-form" onsubmit={props.on_submit.clone()}>
            <div class="form-group">
                <label for="email">{ "Student Email:" }</label>
                <input
                    type="email"
                    id="email"
                    required=true
                    placeholder="your-email@mergington.edu"
                    value={props.draft.email.clone()}
                    oninput={props.on_email.clone()}
                />
            </div>
            <div class="form-group">
                <label for="activity">{ "Select Activity:" }</label>
                <select
                    id="activity"
                    required=true
                    ref={select_ref}
                    onchange={props.on_activity.clone()}
                >
                    <option value="">{ "-- Select an activity --" }</option>
                    { for props.options.iter().map(|name| html! {
                        <option value={name.clone()}>{ name.clone() }</option>
                    }) }
                </select>
            </div>
            <button type="submit">{ "Sign Up" }</button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct MessageAreaProps {
    notice: Option<Notice>,
}

#[function_component(MessageArea)]
fn message_area(props: &MessageAreaProps) -> Html {
    match &props.notice {
        None => html! { <div id="message" class="hidden"></div> },
        Some(n) => html! {
            <div id="message" class={classes!(n.kind.class(), (!n.visible).then_some("hidden"))}>
                { n.text.clone() }
            </div>
        },
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use yew::ServerRenderer;

    use super::*;

    fn render_card(activity: Activity) -> String {
        block_on(
            ServerRenderer::<ActivityCard>::with_props(move || ActivityCardProps {
                activity,
                on_unregister: Callback::from(|_: UnregisterRequest| ()),
            })
            .hydratable(false)
            .render(),
        )
    }

    fn render_form(options: Vec<String>) -> String {
        block_on(
            ServerRenderer::<SignupForm>::with_props(move || SignupFormProps {
                draft: SignupDraft::default(),
                options,
                on_submit: Callback::from(|_: SubmitEvent| ()),
                on_email: Callback::from(|_: InputEvent| ()),
                on_activity: Callback::from(|_: Event| ()),
            })
            .hydratable(false)
            .render(),
        )
    }

    fn activity(max: u32, participants: &[&str]) -> Activity {
        Activity {
            name: "Chess Club".into(),
            description: "Learn strategies".into(),
            schedule: "Fridays, 3:30 PM".into(),
            max_participants: max,
            participants: participants.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn card_renders_one_item_per_participant() {
        let html = render_card(activity(12, &["jane.doe@example.com", "x@example.com"]));

        assert_eq!(html.matches(r#"class="participant-item""#).count(), 2);
        assert_eq!(html.matches(r#"class="delete-icon""#).count(), 2);
        assert!(!html.contains(NO_PARTICIPANTS_TEXT));
        assert!(html.contains(" 10 spots left"));
        assert!(html.contains(">JD<"));
        assert!(html.contains(r#"title="Unregister x@example.com""#));
    }

    #[test]
    fn participant_item_is_button_then_badge_then_name() {
        let html = render_card(activity(5, &["jane.doe@example.com"]));

        let button = html.find(r#"class="delete-icon""#).unwrap();
        let badge = html.find(r#"class="participant-badge""#).unwrap();
        let name = html.find(r#"class="participant-name""#).unwrap();
        assert!(button < badge && badge < name);
    }

    #[test]
    fn empty_roster_shows_placeholder_without_controls() {
        let html = render_card(activity(3, &[]));

        assert_eq!(html.matches(NO_PARTICIPANTS_TEXT).count(), 1);
        assert_eq!(html.matches(r#"class="participant-item empty""#).count(), 1);
        assert!(!html.contains("delete-icon"));
        assert!(html.contains(" 3 spots left"));
    }

    #[test]
    fn full_activity_shows_zero_spots() {
        let html = render_card(activity(2, &["a@x.edu", "b@x.edu"]));
        assert!(html.contains("Availability:"));
        assert!(html.contains(" 0 spots left"));
    }

    #[test]
    fn form_lists_placeholder_then_each_option_once() {
        let html = render_form(vec!["Chess Club".into(), "Gym Class".into()]);

        let placeholder = html.find("-- Select an activity --").unwrap();
        let chess = html.find(r#"value="Chess Club""#).unwrap();
        assert!(placeholder < chess);
        assert_eq!(html.matches(r#"value="Chess Club""#).count(), 1);
        assert_eq!(html.matches(r#"value="Gym Class""#).count(), 1);
        // The control's value comes from the draft, not option attributes.
        assert!(!html.contains("selected"));
    }
}
