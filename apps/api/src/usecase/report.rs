//! # レポート一覧ユースケース

use std::{collections::HashMap, sync::Arc};

use manabi_domain::{
    pagination::Page,
    report::{DEFAULT_PAGE_SIZE, Report, ReportSortKey},
};
use manabi_infra::repository::{ReportFilter, ReportRepository};

use super::helpers::{into_page, prepare_fetch};
use crate::error::ApiError;

pub struct ReportUseCaseImpl {
    repo:      Arc<dyn ReportRepository>,
    max_limit: u32,
}

impl ReportUseCaseImpl {
    pub fn new(repo: Arc<dyn ReportRepository>, max_limit: u32) -> Self {
        Self { repo, max_limit }
    }

    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn list_reports(
        &self,
        query: &HashMap<String, String>,
        filter: &ReportFilter,
    ) -> Result<Page<Report>, ApiError> {
        let spec = prepare_fetch::<ReportSortKey>(query, DEFAULT_PAGE_SIZE, self.max_limit)?;
        let rows = self.repo.find_page(filter, &spec).await?;
        Ok(into_page(rows, &spec))
    }
}

#[cfg(test)]
mod tests {
    use manabi_domain::report::ReportStatus;
    use manabi_infra::mock::InMemoryReportRepository;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_utils;

    #[tokio::test]
    async fn test_空のコレクションは空ページ() {
        // Given
        let sut = ReportUseCaseImpl::new(Arc::new(InMemoryReportRepository::new()), 100);

        // When
        let page = sut
            .list_reports(&HashMap::new(), &ReportFilter::default())
            .await
            .unwrap();

        // Then
        assert_eq!(page, Page::empty());
    }

    #[tokio::test]
    async fn test_タイトル順にページを辿れる() {
        // Given
        let repo = InMemoryReportRepository::with_records([
            test_utils::report(1, "b", ReportStatus::Draft),
            test_utils::report(2, "a", ReportStatus::Published),
            test_utils::report(3, "c", ReportStatus::Draft),
        ]);
        let sut = ReportUseCaseImpl::new(Arc::new(repo), 100);
        let mut query = HashMap::from([
            ("orderBy".to_string(), "title".to_string()),
            ("orderDir".to_string(), "asc".to_string()),
            ("limit".to_string(), "2".to_string()),
        ]);

        // When
        let first = sut
            .list_reports(&query, &ReportFilter::default())
            .await
            .unwrap();
        query.insert("cursor".to_string(), first.next_cursor.clone().unwrap());
        let second = sut
            .list_reports(&query, &ReportFilter::default())
            .await
            .unwrap();

        // Then
        let titles = |page: &Page<Report>| -> Vec<String> {
            page.data.iter().map(|r| r.title.clone()).collect()
        };
        assert_eq!(titles(&first), vec!["a", "b"]);
        assert_eq!(titles(&second), vec!["c"]);
        assert_eq!(second.next_cursor, None);
    }
}
