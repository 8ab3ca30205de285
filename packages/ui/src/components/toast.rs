//! Transient notices shown in the corner of the page.
//!
//! [`ToastProvider`] owns the queue and renders it; anything below it calls
//! [`use_toasts`] and [`Toasts::show`] with a [`Notice`] from the domain crate.

use std::time::Duration;

use dioxus::prelude::*;
use showcase::{Notice, NoticeVariant};

const DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
struct Toast {
    id: u64,
    notice: Notice,
}

/// Handle to the toast queue. Cheap to copy into event handlers.
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    entries: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toasts {
    /// Queue `notice` and dismiss it automatically after a few seconds.
    pub fn show(&mut self, notice: Notice) {
        let id = *self.next_id.peek();
        self.next_id.set(id + 1);
        self.entries.write().push(Toast { id, notice });

        let mut toasts = *self;
        spawn(async move {
            #[cfg(target_arch = "wasm32")]
            gloo_timers::future::sleep(DISMISS_AFTER).await;
            #[cfg(not(target_arch = "wasm32"))]
            tokio::time::sleep(DISMISS_AFTER).await;

            toasts.dismiss(id);
        });
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.write().retain(|toast| toast.id != id);
    }
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}

#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_context_provider(|| Toasts {
        entries: Signal::new(Vec::new()),
        next_id: Signal::new(0),
    });

    rsx! {
        {children}
        ToastViewport { toasts }
    }
}

#[component]
fn ToastViewport(toasts: Toasts) -> Element {
    let entries = toasts.entries.read().clone();

    rsx! {
        div {
            class: "toast-viewport",
            for toast in entries {
                div {
                    key: "{toast.id}",
                    class: "toast {variant_class(toast.notice.variant)}",
                    role: "status",
                    onclick: move |_| {
                        let mut toasts = toasts;
                        toasts.dismiss(toast.id);
                    },
                    p { class: "toast-title", "{toast.notice.title}" }
                    if !toast.notice.description.is_empty() {
                        p { class: "toast-description", "{toast.notice.description}" }
                    }
                }
            }
        }
    }
}

fn variant_class(variant: NoticeVariant) -> &'static str {
    match variant {
        NoticeVariant::Default => "toast-default",
        NoticeVariant::Success => "toast-success",
        NoticeVariant::Destructive => "toast-destructive",
    }
}
