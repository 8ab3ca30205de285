//! PostgREST adapter for the `projects` table.

use reqwest::Method;
use showcase::{BackendError, ProjectRecord, ProjectRow, ProjectTable};

use crate::client::{check, transport, SupabaseClient};

const PROJECTS_PATH: &str = "/rest/v1/projects";

impl ProjectTable for SupabaseClient {
    async fn insert(&self, record: &ProjectRecord) -> Result<ProjectRow, BackendError> {
        let response = self
            .request(Method::POST, &self.endpoint(PROJECTS_PATH))
            .header("Prefer", "return=representation")
            .header("Accept", "application/vnd.pgrst.object+json")
            .json(record)
            .send()
            .await
            .map_err(transport)?;
        let body = check(response).await?.text().await.map_err(transport)?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn list(&self) -> Result<Vec<ProjectRow>, BackendError> {
        let url = self.endpoint(&format!("{PROJECTS_PATH}?select=*&order=created_at.desc"));
        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(transport)?;
        let body = check(response).await?.text().await.map_err(transport)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use showcase::{Project, ProjectRow, ProjectType};

    #[test]
    fn test_list_body_decodes() {
        let body = r#"[
            {"id": 3, "title": "Kit", "description": "UI kit", "type": "figma",
             "url": "https://www.figma.com/file/abc", "image_url": null,
             "tags": ["Design"], "created_at": "2024-05-02T08:00:00+00:00", "user_id": "u1"},
            {"id": "b1f0", "title": "Blog", "description": "Posts", "type": "website",
             "url": "https://blog.example", "image_url": "https://cdn/x.png",
             "tags": [], "created_at": "2024-05-01T08:00:00+00:00"}
        ]"#;

        let rows: Vec<ProjectRow> = serde_json::from_str(body).unwrap();
        let projects: Vec<Project> = rows.into_iter().map(Project::from).collect();

        assert_eq!(projects[0].id, "3");
        assert_eq!(projects[0].r#type, ProjectType::Figma);
        assert_eq!(projects[1].id, "b1f0");
        assert_eq!(projects[1].image_url.as_deref(), Some("https://cdn/x.png"));
    }
}
