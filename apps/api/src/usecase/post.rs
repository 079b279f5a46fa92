//! # 投稿一覧ユースケース

use std::{collections::HashMap, sync::Arc};

use manabi_domain::{
    pagination::Page,
    post::{DEFAULT_PAGE_SIZE, Post, PostSortKey},
};
use manabi_infra::repository::{PostFilter, PostRepository};

use super::helpers::{into_page, prepare_fetch};
use crate::error::ApiError;

pub struct PostUseCaseImpl {
    repo:      Arc<dyn PostRepository>,
    max_limit: u32,
}

impl PostUseCaseImpl {
    pub fn new(repo: Arc<dyn PostRepository>, max_limit: u32) -> Self {
        Self { repo, max_limit }
    }

    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn list_posts(
        &self,
        query: &HashMap<String, String>,
        filter: &PostFilter,
    ) -> Result<Page<Post>, ApiError> {
        let spec = prepare_fetch::<PostSortKey>(query, DEFAULT_PAGE_SIZE, self.max_limit)?;
        let rows = self.repo.find_page(filter, &spec).await?;
        Ok(into_page(rows, &spec))
    }
}

#[cfg(test)]
mod tests {
    use manabi_domain::value_objects::TagList;
    use manabi_infra::mock::InMemoryPostRepository;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_utils;

    #[tokio::test]
    async fn test_閲覧数の昇順で並べられる() {
        // Given: 作成が新しいほど閲覧数が多い
        let repo = InMemoryPostRepository::with_records(
            (1..=3).map(|i| test_utils::post(i, &format!("p{i}"), &[])),
        );
        let sut = PostUseCaseImpl::new(Arc::new(repo), 100);
        let query = HashMap::from([
            ("orderBy".to_string(), "viewCount".to_string()),
            ("orderDir".to_string(), "asc".to_string()),
        ]);

        // When
        let page = sut.list_posts(&query, &PostFilter::default()).await.unwrap();

        // Then
        let titles: Vec<&str> = page.data.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn test_タグのいずれかを含む投稿に絞り込める() {
        // Given
        let repo = InMemoryPostRepository::with_records([
            test_utils::post(1, "rust", &["rust"]),
            test_utils::post(2, "go", &["go"]),
            test_utils::post(3, "both", &["rust", "go"]),
        ]);
        let sut = PostUseCaseImpl::new(Arc::new(repo), 100);
        let filter = PostFilter {
            tags: Some(TagList::parse("rust")),
            ..Default::default()
        };

        // When
        let page = sut.list_posts(&HashMap::new(), &filter).await.unwrap();

        // Then
        let titles: Vec<&str> = page.data.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["both", "rust"]);
    }
}
