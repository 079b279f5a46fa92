//! # テスト用インメモリリポジトリ
//!
//! ハンドラ・ユースケースのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! manabi-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! PostgreSQL 実装と同じく「起点行にシークし、`skip` 行飛ばして `take` 行返す」
//! セマンティクスで動作する。並び順は (ソートキー, id) で、カーソル行が
//! 存在しなければ `CursorNotFound` を返す。

use std::{
    cmp::Ordering,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use manabi_domain::{
    course::{Course, CourseSortKey},
    pagination::{FetchSpec, SortDirection},
    post::{Post, PostSortKey},
    project::{Project, ProjectSortKey},
    question::{Question, QuestionSortKey},
    report::{Report, ReportSortKey},
};
use uuid::Uuid;

use crate::{
    error::InfraError,
    repository::{
        CourseFilter,
        CourseRepository,
        PostFilter,
        PostRepository,
        ProjectFilter,
        ProjectRepository,
        QuestionFilter,
        QuestionRepository,
        ReportFilter,
        ReportRepository,
        seek,
    },
};

/// インメモリリポジトリに格納できる行
pub trait InMemoryRecord: Clone + Send + Sync + 'static {
    type SortKey: Copy + Send + Sync;

    /// エラーメッセージに使うテーブル名
    const TABLE: &'static str;

    fn record_id(&self) -> Uuid;

    /// ソートキーの値で比較する（id によるタイブレークは呼び出し側で行う）
    fn compare_by(&self, other: &Self, key: Self::SortKey) -> Ordering;
}

/// インメモリリポジトリ
#[derive(Clone)]
pub struct InMemoryRepository<T> {
    records: Arc<Mutex<Vec<T>>>,
}

impl<T: InMemoryRecord> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: InMemoryRecord> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records.into_iter().collect())),
        }
    }

    pub fn insert(&self, record: T) {
        self.lock().push(record);
    }

    /// ページ走査中の削除を再現するために使う
    pub fn remove(&self, id: Uuid) {
        self.lock().retain(|r| r.record_id() != id);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn seek(
        &self,
        spec: &FetchSpec<T::SortKey>,
        matches: impl Fn(&T) -> bool,
    ) -> Result<Vec<T>, InfraError> {
        let anchor = seek::parse_anchor(spec)?;

        let mut sorted = self.lock().clone();
        sorted.sort_by(|a, b| {
            let ordering = a
                .compare_by(b, spec.order.field)
                .then_with(|| a.record_id().cmp(&b.record_id()));
            match spec.order.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let skip = spec.skip as usize;
        let take = spec.take as usize;

        let (start, offset) = match anchor {
            None => (0, skip),
            Some(id) => {
                let position = sorted
                    .iter()
                    .position(|r| r.record_id() == id)
                    .ok_or_else(|| InfraError::cursor_not_found(T::TABLE, id.to_string()))?;
                // 起点行自体が skip の 1 行目
                if skip == 0 {
                    (position, 0)
                } else {
                    (position + 1, skip - 1)
                }
            }
        };

        Ok(sorted
            .into_iter()
            .skip(start)
            .filter(&matches)
            .skip(offset)
            .take(take)
            .collect())
    }
}

pub type InMemoryCourseRepository = InMemoryRepository<Course>;
pub type InMemoryPostRepository = InMemoryRepository<Post>;
pub type InMemoryQuestionRepository = InMemoryRepository<Question>;
pub type InMemoryReportRepository = InMemoryRepository<Report>;
pub type InMemoryProjectRepository = InMemoryRepository<Project>;

// ===== InMemoryRecord 実装 =====

impl InMemoryRecord for Course {
    type SortKey = CourseSortKey;

    const TABLE: &'static str = "courses";

    fn record_id(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn compare_by(&self, other: &Self, key: CourseSortKey) -> Ordering {
        match key {
            CourseSortKey::CreatedAt => self.created_at.cmp(&other.created_at),
            CourseSortKey::UpdatedAt => self.updated_at.cmp(&other.updated_at),
            CourseSortKey::Title => self.title.cmp(&other.title),
        }
    }
}

impl InMemoryRecord for Post {
    type SortKey = PostSortKey;

    const TABLE: &'static str = "posts";

    fn record_id(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn compare_by(&self, other: &Self, key: PostSortKey) -> Ordering {
        match key {
            PostSortKey::CreatedAt => self.created_at.cmp(&other.created_at),
            PostSortKey::UpdatedAt => self.updated_at.cmp(&other.updated_at),
            PostSortKey::Title => self.title.cmp(&other.title),
            PostSortKey::ViewCount => self.view_count.cmp(&other.view_count),
        }
    }
}

impl InMemoryRecord for Question {
    type SortKey = QuestionSortKey;

    const TABLE: &'static str = "questions";

    fn record_id(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn compare_by(&self, other: &Self, key: QuestionSortKey) -> Ordering {
        match key {
            QuestionSortKey::CreatedAt => self.created_at.cmp(&other.created_at),
            QuestionSortKey::UpdatedAt => self.updated_at.cmp(&other.updated_at),
            QuestionSortKey::Title => self.title.cmp(&other.title),
            QuestionSortKey::ViewCount => self.view_count.cmp(&other.view_count),
            QuestionSortKey::VoteCount => self.vote_count.cmp(&other.vote_count),
            QuestionSortKey::AnswerCount => self.answer_count.cmp(&other.answer_count),
        }
    }
}

impl InMemoryRecord for Report {
    type SortKey = ReportSortKey;

    const TABLE: &'static str = "reports";

    fn record_id(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn compare_by(&self, other: &Self, key: ReportSortKey) -> Ordering {
        match key {
            ReportSortKey::CreatedAt => self.created_at.cmp(&other.created_at),
            ReportSortKey::UpdatedAt => self.updated_at.cmp(&other.updated_at),
            ReportSortKey::Title => self.title.cmp(&other.title),
        }
    }
}

impl InMemoryRecord for Project {
    type SortKey = ProjectSortKey;

    const TABLE: &'static str = "projects";

    fn record_id(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn compare_by(&self, other: &Self, key: ProjectSortKey) -> Ordering {
        match key {
            ProjectSortKey::CreatedAt => self.created_at.cmp(&other.created_at),
            ProjectSortKey::UpdatedAt => self.updated_at.cmp(&other.updated_at),
            ProjectSortKey::Title => self.title.cmp(&other.title),
        }
    }
}

// ===== リポジトリトレイト実装 =====

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn find_page(
        &self,
        filter: &CourseFilter,
        spec: &FetchSpec<CourseSortKey>,
    ) -> Result<Vec<Course>, InfraError> {
        self.seek(spec, |c| filter.matches(c))
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_page(
        &self,
        filter: &PostFilter,
        spec: &FetchSpec<PostSortKey>,
    ) -> Result<Vec<Post>, InfraError> {
        self.seek(spec, |p| filter.matches(p))
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find_page(
        &self,
        filter: &QuestionFilter,
        spec: &FetchSpec<QuestionSortKey>,
    ) -> Result<Vec<Question>, InfraError> {
        self.seek(spec, |q| filter.matches(q))
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn find_page(
        &self,
        filter: &ReportFilter,
        spec: &FetchSpec<ReportSortKey>,
    ) -> Result<Vec<Report>, InfraError> {
        self.seek(spec, |r| filter.matches(r))
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_page(
        &self,
        filter: &ProjectFilter,
        spec: &FetchSpec<ProjectSortKey>,
    ) -> Result<Vec<Project>, InfraError> {
        self.seek(spec, |p| filter.matches(p))
    }
}
