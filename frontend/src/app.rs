use crate::components::check_in::CheckInComponent;
use yew::{html, Component, Context, Html};

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="app-shell">
                <header class="page-header">
                    <h2>{"Check-in"}</h2>
                    <p>{"Scan a QR code or enter a pass code to check in"}</p>
                </header>
                <CheckInComponent />
            </div>
        }
    }
}
