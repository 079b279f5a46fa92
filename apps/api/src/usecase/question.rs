//! # 質問一覧ユースケース

use std::{collections::HashMap, sync::Arc};

use manabi_domain::{
    pagination::Page,
    question::{DEFAULT_PAGE_SIZE, Question, QuestionSortKey},
};
use manabi_infra::repository::{QuestionFilter, QuestionRepository};

use super::helpers::{into_page, prepare_fetch};
use crate::error::ApiError;

pub struct QuestionUseCaseImpl {
    repo:      Arc<dyn QuestionRepository>,
    max_limit: u32,
}

impl QuestionUseCaseImpl {
    pub fn new(repo: Arc<dyn QuestionRepository>, max_limit: u32) -> Self {
        Self { repo, max_limit }
    }

    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn list_questions(
        &self,
        query: &HashMap<String, String>,
        filter: &QuestionFilter,
    ) -> Result<Page<Question>, ApiError> {
        let spec = prepare_fetch::<QuestionSortKey>(query, DEFAULT_PAGE_SIZE, self.max_limit)?;
        let rows = self.repo.find_page(filter, &spec).await?;
        Ok(into_page(rows, &spec))
    }
}
