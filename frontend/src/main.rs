use crate::app::App;

mod api;
mod app;
mod components;
mod identity;

fn main() {
    yew::Renderer::<App>::new().render();
}
