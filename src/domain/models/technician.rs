use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Field-service technician directory entry. Appointments may reference one;
/// conflict detection stays company-wide, so no per-technician calendar here.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Technician {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Comma-separated service-type keys in storage; exposed as a list.
    #[sqlx(try_from = "String")]
    pub specialties: Specialties,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct Specialties(pub Vec<String>);

impl Specialties {
    pub fn to_storage(&self) -> String {
        self.0.join(",")
    }
}

impl TryFrom<String> for Specialties {
    type Error = std::convert::Infallible;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Ok(Self(
            s.split(',')
                .filter(|p| !p.is_empty())
                .map(|p| p.trim().to_string())
                .collect(),
        ))
    }
}

impl Technician {
    pub fn new(name: String, email: String, phone: String, specialties: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            phone,
            specialties: Specialties(specialties),
            active: true,
            created_at: Utc::now(),
        }
    }
}
