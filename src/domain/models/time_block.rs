use crate::domain::models::time::{TimeOfDay, TimeWindow};
use crate::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    CorporateContract,
    PersonalDeal,
    Internal,
    Maintenance,
    Other,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CorporateContract => "corporate-contract",
            Self::PersonalDeal => "personal-deal",
            Self::Internal => "internal",
            Self::Maintenance => "maintenance",
            Self::Other => "other",
        }
    }
}

impl TryFrom<String> for BlockType {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "corporate-contract" => Ok(Self::CorporateContract),
            "personal-deal" => Ok(Self::PersonalDeal),
            "internal" => Ok(Self::Internal),
            "maintenance" => Ok(Self::Maintenance),
            "other" => Ok(Self::Other),
            _ => Err(AppError::Validation(format!("unknown block type '{}'", s))),
        }
    }
}

/// Administrative calendar hold. A time block has no cancelled state: while
/// it exists it obstructs every overlapping window.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TimeBlock {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub start_time: TimeOfDay,
    #[sqlx(try_from = "String")]
    pub end_time: TimeOfDay,
    #[sqlx(try_from = "String")]
    pub block_type: BlockType,
    pub created_by: String,
    pub notes: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewTimeBlockParams {
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub block_type: BlockType,
    pub created_by: String,
    pub notes: Option<String>,
    pub color: Option<String>,
}

impl TimeBlock {
    pub fn new(params: NewTimeBlockParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            scheduled_date: params.scheduled_date,
            start_time: params.start_time,
            end_time: params.end_time,
            block_type: params.block_type,
            created_by: params.created_by,
            notes: params.notes,
            color: params.color,
            created_at: Utc::now(),
        }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }
}
