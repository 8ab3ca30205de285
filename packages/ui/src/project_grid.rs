use dioxus::prelude::*;
use showcase::{Project, ProjectType};

use crate::icons::FaArrowUpRightFromSquare;
use crate::Icon;

/// Projects grouped by category, newest first within each group.
/// Ids in `highlighted` get a "New" badge.
#[component]
pub fn ProjectGrid(projects: Vec<Project>, #[props(default)] highlighted: Vec<String>) -> Element {
    if projects.is_empty() {
        return rsx! {
            p { class: "empty-state", "No projects yet. Add the first one!" }
        };
    }

    rsx! {
        for kind in ProjectType::ALL {
            ProjectSection {
                key: "{kind}",
                kind,
                projects: projects.iter().filter(|p| p.category == kind).cloned().collect::<Vec<_>>(),
                highlighted: highlighted.clone(),
            }
        }
    }
}

#[component]
fn ProjectSection(kind: ProjectType, projects: Vec<Project>, highlighted: Vec<String>) -> Element {
    if projects.is_empty() {
        return rsx! {};
    }

    rsx! {
        section {
            class: "project-section",
            h2 { class: "section-title", "{kind.label()}" }
            div {
                class: "project-grid",
                for project in projects {
                    ProjectCard {
                        key: "{project.id}",
                        is_new: highlighted.contains(&project.id),
                        project: project.clone(),
                    }
                }
            }
        }
    }
}

#[component]
fn ProjectCard(project: Project, is_new: bool) -> Element {
    rsx! {
        article {
            class: "project-card",
            if let Some(image_url) = &project.image_url {
                img {
                    class: "project-image",
                    src: "{image_url}",
                    alt: "{project.title}",
                }
            }
            div {
                class: "project-body",
                div {
                    class: "project-heading",
                    h3 { class: "project-title", "{project.title}" }
                    if is_new {
                        span { class: "badge badge-new", "New" }
                    }
                }
                p { class: "project-description", "{project.description}" }
                if !project.tags.is_empty() {
                    ul {
                        class: "tag-list",
                        for (key, tag) in keyed_tags(&project.tags) {
                            li { key: "{key}", class: "tag", "{tag}" }
                        }
                    }
                }
                a {
                    class: "project-link",
                    href: "{project.url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "Visit"
                    Icon { icon: FaArrowUpRightFromSquare, width: 12, height: 12 }
                }
            }
        }
    }
}

/// Tags paired with sibling keys. Duplicate tags are kept, so the position is
/// part of the key.
fn keyed_tags(tags: &[String]) -> Vec<(String, &str)> {
    tags.iter()
        .enumerate()
        .map(|(i, tag)| (format!("{i}-{tag}"), tag.as_str()))
        .collect()
}
