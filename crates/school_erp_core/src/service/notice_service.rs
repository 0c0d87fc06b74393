//! Notice board use-case service.

use crate::model::notice::{NewNotice, Notice};
use crate::model::validation::ValidationError;
use crate::model::{today, NoticeId};
use crate::repo::notice_repo::NoticeRepository;
use crate::repo::RecordResult;
use chrono::NaiveDate;
use log::info;

/// Notices shown on dashboards.
pub const DEFAULT_RECENT_NOTICES: u32 = 5;

pub struct NoticeService<N: NoticeRepository> {
    repo: N,
}

impl<N: NoticeRepository> NoticeService<N> {
    pub fn new(repo: N) -> Self {
        Self { repo }
    }

    pub fn post(&self, title: &str, content: &str, date: NaiveDate) -> RecordResult<NoticeId> {
        let notice = NewNotice {
            title: title.to_string(),
            content: content.to_string(),
            date,
        }
        .normalized()?;
        let id = self.repo.insert_notice(&notice)?;
        info!("event=notice_post module=notice status=ok notice_id={id} date={date}");
        Ok(id)
    }

    /// Posts a notice dated today (local time).
    pub fn post_today(&self, title: &str, content: &str) -> RecordResult<NoticeId> {
        self.post(title, content, today())
    }

    /// The `count` most recent notices by date.
    pub fn recent(&self, count: u32) -> RecordResult<Vec<Notice>> {
        if count == 0 {
            return Err(ValidationError::InvalidLimit(count).into());
        }
        self.repo.recent(count)
    }

    pub fn list_all(&self) -> RecordResult<Vec<Notice>> {
        self.repo.list_all()
    }
}
