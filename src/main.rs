// src/main.rs — Activity Board (Rust + Yew + WASM)
// Lists club activities, signs students up by email and unregisters them.
// Every change goes to the server first and the list is then re-fetched.

mod api;
mod board;
mod config;
mod model;
mod ui;
mod view;

fn main() {
    yew::Renderer::<view::App>::new().render();
}
