//! # コース一覧ユースケース

use std::{collections::HashMap, sync::Arc};

use manabi_domain::{
    course::{Course, CourseSortKey, DEFAULT_PAGE_SIZE},
    pagination::Page,
};
use manabi_infra::repository::{CourseFilter, CourseRepository};

use super::helpers::{into_page, prepare_fetch};
use crate::error::ApiError;

pub struct CourseUseCaseImpl {
    repo:      Arc<dyn CourseRepository>,
    max_limit: u32,
}

impl CourseUseCaseImpl {
    pub fn new(repo: Arc<dyn CourseRepository>, max_limit: u32) -> Self {
        Self { repo, max_limit }
    }

    /// コース一覧を 1 ページ取得する
    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn list_courses(
        &self,
        query: &HashMap<String, String>,
        filter: &CourseFilter,
    ) -> Result<Page<Course>, ApiError> {
        let spec = prepare_fetch::<CourseSortKey>(query, DEFAULT_PAGE_SIZE, self.max_limit)?;
        let rows = self.repo.find_page(filter, &spec).await?;
        Ok(into_page(rows, &spec))
    }
}
