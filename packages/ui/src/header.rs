use dioxus::prelude::*;
use showcase::Session;

use crate::AuthButton;

#[component]
pub fn Header(session: Option<Session>, on_sign_out: EventHandler<()>) -> Element {
    rsx! {
        header {
            class: "header",
            h1 { class: "header-title", "Showcase Space" }
            AuthButton { session, on_sign_out }
        }
    }
}
