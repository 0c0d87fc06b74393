//! Notice board model.

use super::validation::{require_text, ValidationError};
use super::NoticeId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: NoticeId,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotice {
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
}

impl NewNotice {
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: require_text("title", &self.title)?,
            content: require_text("content", &self.content)?,
            date: self.date,
        })
    }
}
