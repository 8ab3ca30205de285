use dioxus::prelude::*;

use showcase::{NewProject, Project, ProjectTable};
use ui::{use_services, use_session_state, AddProjectDialog, Header, ProjectGrid, SessionState};

#[component]
pub fn Home() -> Element {
    let services = use_services();
    let mut session_state = use_session_state();
    let mut projects = use_signal(Vec::<Project>::new);
    let mut highlighted = use_signal(Vec::<String>::new);

    // Load projects on mount
    let _loader = use_resource(move || {
        let client = services.client.clone();
        async move {
            match client.list().await {
                Ok(rows) => projects.set(rows.into_iter().map(Project::from).collect()),
                Err(e) => tracing::error!("Failed to load projects: {}", e),
            }
        }
    });

    let on_project_add = move |added: NewProject| {
        if added.is_new_project {
            highlighted.write().push(added.project.id.clone());
        }
        projects.write().insert(0, added.project);
    };

    let state = session_state();

    rsx! {
        Header {
            session: state.session.clone(),
            on_sign_out: move |_| session_state.set(SessionState::signed_out()),
        }
        main {
            class: "page",
            div {
                class: "toolbar",
                if !state.loading {
                    AddProjectDialog {
                        session: state.session.clone(),
                        on_project_add,
                    }
                }
            }
            ProjectGrid {
                projects: projects(),
                highlighted: highlighted(),
            }
        }
    }
}
