//! The "Add Project" dialog.
//!
//! All draft state lives in a [`DraftForm`] signal. Preview resolution runs
//! whenever the URL, the type or the chosen file changes; the running preview
//! task is cancelled when a newer one starts or the dialog closes, and the
//! form's generation check drops anything that still slips through.

use dioxus::core::Task;
use dioxus::prelude::*;
use showcase::{
    DraftForm, ImagePayload, NewProject, Notice, PreviewResolver, ProjectSubmitter, ProjectType,
    Session, SubmitError,
};

use crate::components::{use_toasts, Button, ButtonVariant, Dialog, Input, Label, Textarea};
use crate::icons::FaPlus;
use crate::services::use_services;
use crate::Icon;

#[component]
pub fn AddProjectDialog(session: Option<Session>, on_project_add: EventHandler<NewProject>) -> Element {
    let services = use_services();
    let mut toasts = use_toasts();
    let mut form = use_signal(DraftForm::default);
    let mut preview_task = use_signal(|| Option::<Task>::None);
    let signed_in = session.is_some();

    let preview_services = services.clone();
    let refresh_preview = use_callback(move |()| {
        if let Some(task) = preview_task.write().take() {
            task.cancel();
        }
        let (request, generation) = {
            let draft = form.read();
            (draft.preview_request(signed_in), draft.generation())
        };
        let resolver = PreviewResolver::new(
            preview_services.fetcher.clone(),
            preview_services.config.preview_settings(),
        );
        let task = spawn(async move {
            let outcome = resolver.resolve(&request).await;
            let notice = form.write().apply_preview(generation, outcome);
            if let Some(notice) = notice {
                toasts.show(notice);
            }
        });
        preview_task.set(Some(task));
    });

    let close = move |_| {
        if let Some(task) = preview_task.write().take() {
            task.cancel();
        }
        form.write().close();
    };

    let choose_file = move |evt: FormEvent| async move {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        match file.read_bytes().await {
            Ok(bytes) => {
                let content_type = file
                    .content_type()
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                form.write()
                    .select_image(ImagePayload::new(file.name(), content_type, bytes.to_vec()));
                refresh_preview.call(());
            }
            Err(e) => tracing::warn!("Failed to read selected file: {}", e),
        }
    };

    let submit_session = session.clone();
    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let (generation, snapshot) = match form.write().begin_submit() {
            Ok(started) => started,
            Err(SubmitError::AlreadySubmitting) => return,
            Err(e) => {
                toasts.show(e.notice());
                return;
            }
        };

        let session = submit_session.clone();
        let client = match &session {
            Some(session) => services.client.authorized(session),
            None => services.client.clone(),
        };
        let submitter = ProjectSubmitter::new(client.clone(), client, &services.config);

        spawn(async move {
            let result = submitter.submit(session.as_ref(), &snapshot).await;
            let same_dialog = form.read().generation() == generation;
            let result = form.write().finish_submit(generation, result);
            match result {
                Ok(project) => {
                    if same_dialog {
                        if let Some(task) = preview_task.write().take() {
                            task.cancel();
                        }
                    }
                    on_project_add.call(project);
                    toasts.show(Notice::project_added());
                }
                Err(e) => {
                    tracing::error!("Error adding project: {}", e);
                    toasts.show(e.notice());
                }
            }
        });
    };

    let draft = form.read().clone();

    rsx! {
        Button {
            variant: ButtonVariant::Primary,
            onclick: move |_| form.write().open(),
            Icon { icon: FaPlus, width: 14, height: 14 }
            "Add Project"
        }

        Dialog {
            open: draft.is_open,
            title: "Add New Project",
            on_close: close,
            form {
                class: "project-form",
                onsubmit: submit,

                div {
                    class: "field",
                    Label { html_for: "project-title", "Title" }
                    Input {
                        id: "project-title",
                        value: draft.title.clone(),
                        required: true,
                        oninput: move |evt: FormEvent| form.write().title = evt.value(),
                    }
                }

                div {
                    class: "field",
                    Label { html_for: "project-description", "Description" }
                    Textarea {
                        id: "project-description",
                        value: draft.description.clone(),
                        required: true,
                        oninput: move |evt: FormEvent| form.write().description = evt.value(),
                    }
                }

                div {
                    class: "field",
                    Label { html_for: "project-type", "Type" }
                    select {
                        id: "project-type",
                        class: "input",
                        value: draft.kind.as_str(),
                        onchange: move |evt| {
                            if let Err(e) = form.write().set_kind(&evt.value()) {
                                tracing::warn!("{}", e);
                            }
                            refresh_preview.call(());
                        },
                        for kind in ProjectType::ALL {
                            option {
                                key: "{kind}",
                                value: kind.as_str(),
                                "{kind.label()}"
                            }
                        }
                    }
                }

                div {
                    class: "field",
                    Label { html_for: "project-url", "URL" }
                    Input {
                        id: "project-url",
                        r#type: "url",
                        value: draft.url.clone(),
                        placeholder: "https://",
                        required: true,
                        oninput: move |evt: FormEvent| {
                            form.write().url = evt.value();
                            refresh_preview.call(());
                        },
                    }
                }

                div {
                    class: "field",
                    Label { html_for: "project-tags", "Tags (comma-separated)" }
                    Input {
                        id: "project-tags",
                        value: draft.tags.clone(),
                        placeholder: "React, TypeScript, Tailwind",
                        oninput: move |evt: FormEvent| form.write().tags = evt.value(),
                    }
                }

                div {
                    class: "field",
                    Label { html_for: "project-image", "Image" }
                    input {
                        id: "project-image",
                        class: "input",
                        r#type: "file",
                        accept: "image/*",
                        onchange: choose_file,
                    }
                    if let Some(preview) = &draft.preview {
                        img {
                            class: "image-preview",
                            src: "{preview}",
                            alt: "Preview",
                        }
                    }
                }

                Button {
                    r#type: "submit",
                    class: "submit",
                    disabled: draft.loading,
                    if draft.loading {
                        "Adding..."
                    } else {
                        "Add Project"
                    }
                }
            }
        }
    }
}
