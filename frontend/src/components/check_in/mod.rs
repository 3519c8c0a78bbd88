//! Check-in page: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering, the scanner
//! capability, and QR generation.
//!
//! Responsibilities
//! - Re-export the component surface (`Msg`, `CheckInProps`,
//!   `CheckInComponent`).
//! - Delegate to `update::update` and `view::view`.
//! - Start the scanner from `rendered`, once its viewport element exists.
//! - Guarantee camera release on unmount via `destroy`.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod qr;
mod scanner;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::CheckInProps;
pub use state::CheckInComponent;

impl Component for CheckInComponent {
    type Message = Msg;
    type Properties = CheckInProps;

    fn create(ctx: &Context<Self>) -> Self {
        CheckInComponent::new(ctx.props())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        // Scan mode acquires the camera here rather than in `update`: the
        // scanner attaches to its viewport element by id, so the element
        // must be in the DOM first.
        update::maybe_start_scanner(self, ctx);
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.release_scanner();
    }
}
