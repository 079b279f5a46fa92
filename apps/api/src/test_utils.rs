//! # テスト用フィクスチャ
//!
//! ハンドラ・ユースケース・結合テストで使う一覧エンティティを生成する。
//! `i` は作成日時のオフセット（分）で、大きいほど新しい。

use chrono::{DateTime, Duration, TimeZone, Utc};
use manabi_domain::{
    course::{Course, CourseId},
    post::{Post, PostId},
    project::{Project, ProjectId, ProjectStatus},
    question::{Question, QuestionId, QuestionStatus},
    report::{Report, ReportId, ReportStatus},
    value_objects::{SkillLevel, UserId},
};

fn at(i: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
        + Duration::minutes(i)
}

pub fn course(i: i64, title: &str) -> Course {
    Course {
        id:               CourseId::new(),
        title:            title.to_string(),
        slug:             title.to_lowercase().replace(' ', "-"),
        description:      None,
        level:            SkillLevel::Junior,
        category:         None,
        tags:             vec![],
        published:        true,
        featured:         false,
        enrollment_count: 0,
        created_at:       at(i),
        updated_at:       at(i),
    }
}

pub fn post(i: i64, title: &str, tags: &[&str]) -> Post {
    Post {
        id:            PostId::new(),
        title:         title.to_string(),
        slug:          title.to_lowercase().replace(' ', "-"),
        excerpt:       None,
        tags:          tags.iter().map(|t| (*t).to_string()).collect(),
        author_id:     UserId::new(),
        view_count:    i,
        comment_count: 0,
        created_at:    at(i),
        updated_at:    at(i),
    }
}

pub fn question(i: i64, title: &str, status: QuestionStatus) -> Question {
    Question {
        id: QuestionId::new(),
        title: title.to_string(),
        tags: vec![],
        status,
        author_id: UserId::new(),
        view_count: 0,
        vote_count: i,
        answer_count: 0,
        bounty: None,
        created_at: at(i),
        updated_at: at(i),
    }
}

pub fn report(i: i64, title: &str, status: ReportStatus) -> Report {
    Report {
        id: ReportId::new(),
        title: title.to_string(),
        summary: None,
        status,
        author_id: UserId::new(),
        created_at: at(i),
        updated_at: at(i),
    }
}

pub fn project(i: i64, title: &str, level: SkillLevel) -> Project {
    Project {
        id: ProjectId::new(),
        title: title.to_string(),
        description: None,
        level,
        status: ProjectStatus::InProgress,
        owner_id: UserId::new(),
        member_count: 1,
        created_at: at(i),
        updated_at: at(i),
    }
}
