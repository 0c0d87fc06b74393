//! Notice board repository. Append-only.

use super::{date_to_db, parse_date, RecordResult};
use crate::model::notice::{NewNotice, Notice};
use crate::model::NoticeId;
use rusqlite::{params, Connection};

/// Repository interface for notices.
pub trait NoticeRepository {
    fn insert_notice(&self, notice: &NewNotice) -> RecordResult<NoticeId>;
    /// Newest `limit` notices by date, ties broken by id.
    fn recent(&self, limit: u32) -> RecordResult<Vec<Notice>>;
    fn list_all(&self) -> RecordResult<Vec<Notice>>;
}

/// SQLite-backed notice repository.
pub struct SqliteNoticeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoticeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_notices(&self, limit: Option<u32>) -> RecordResult<Vec<Notice>> {
        let mut stmt = self.conn.prepare(
            "SELECT notice_id, title, content, date
             FROM notices
             ORDER BY date DESC, notice_id DESC
             LIMIT ?1;",
        )?;
        let bound = limit.map_or(-1, i64::from);
        let mut rows = stmt.query([bound])?;
        let mut notices = Vec::new();
        while let Some(row) = rows.next()? {
            let date: String = row.get("date")?;
            notices.push(Notice {
                id: row.get("notice_id")?,
                title: row.get("title")?,
                content: row.get("content")?,
                date: parse_date(&date, "notices.date")?,
            });
        }
        Ok(notices)
    }
}

impl NoticeRepository for SqliteNoticeRepository<'_> {
    fn insert_notice(&self, notice: &NewNotice) -> RecordResult<NoticeId> {
        self.conn.execute(
            "INSERT INTO notices (title, content, date) VALUES (?1, ?2, ?3);",
            params![notice.title, notice.content, date_to_db(notice.date)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn recent(&self, limit: u32) -> RecordResult<Vec<Notice>> {
        self.query_notices(Some(limit))
    }

    fn list_all(&self) -> RecordResult<Vec<Notice>> {
        self.query_notices(None)
    }
}
