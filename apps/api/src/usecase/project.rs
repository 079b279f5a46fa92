//! # プロジェクト一覧ユースケース

use std::{collections::HashMap, sync::Arc};

use manabi_domain::{
    pagination::Page,
    project::{DEFAULT_PAGE_SIZE, Project, ProjectSortKey},
};
use manabi_infra::repository::{ProjectFilter, ProjectRepository};

use super::helpers::{into_page, prepare_fetch};
use crate::error::ApiError;

pub struct ProjectUseCaseImpl {
    repo:      Arc<dyn ProjectRepository>,
    max_limit: u32,
}

impl ProjectUseCaseImpl {
    pub fn new(repo: Arc<dyn ProjectRepository>, max_limit: u32) -> Self {
        Self { repo, max_limit }
    }

    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn list_projects(
        &self,
        query: &HashMap<String, String>,
        filter: &ProjectFilter,
    ) -> Result<Page<Project>, ApiError> {
        let spec = prepare_fetch::<ProjectSortKey>(query, DEFAULT_PAGE_SIZE, self.max_limit)?;
        let rows = self.repo.find_page(filter, &spec).await?;
        Ok(into_page(rows, &spec))
    }
}
