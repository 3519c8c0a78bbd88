use yew::prelude::*;

/// Properties for the `CheckInComponent`.
#[derive(Properties, PartialEq, Clone)]
pub struct CheckInProps {
    /// Base URL of the admin API. `None` uses the production host; a parent
    /// may point the component at a staging deployment instead.
    #[prop_or_default]
    pub api_base: Option<String>,
}
