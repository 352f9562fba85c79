use crate::domain::models::appointment::Appointment;
use crate::domain::models::time::TimeWindow;
use crate::domain::models::time_block::TimeBlock;
use serde::Serialize;

/// Anything occupying a window on the shared calendar. The conflict resolver
/// operates over this union only, so a third reservation class is one
/// variant away.
#[derive(Debug, Clone)]
pub enum Reservation {
    Appointment(Appointment),
    TimeBlock(TimeBlock),
}

impl Reservation {
    pub fn id(&self) -> &str {
        match self {
            Self::Appointment(a) => &a.id,
            Self::TimeBlock(b) => &b.id,
        }
    }

    pub fn window(&self) -> TimeWindow {
        match self {
            Self::Appointment(a) => a.window(),
            Self::TimeBlock(b) => b.window(),
        }
    }

    /// Time blocks always obstruct; appointments stop obstructing once
    /// cancelled or marked no-show.
    pub fn is_obstructing(&self) -> bool {
        match self {
            Self::Appointment(a) => a.status.obstructs(),
            Self::TimeBlock(_) => true,
        }
    }

    pub fn kind(&self) -> ConflictKind {
        match self {
            Self::Appointment(_) => ConflictKind::Appointment,
            Self::TimeBlock(_) => ConflictKind::TimeBlock,
        }
    }

    /// One-line description used in conflict errors, enough for a caller to
    /// explain why a slot disappeared between listing and booking.
    pub fn describe(&self) -> String {
        match self {
            Self::Appointment(a) => format!("{} ({})", a.customer_name, a.window()),
            Self::TimeBlock(b) => format!("{} ({})", b.title, b.window()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    Appointment,
    TimeBlock,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Appointment => "appointment",
            Self::TimeBlock => "time-block",
        }
    }
}

/// A detected collision between a proposed window and an existing reservation.
#[derive(Debug, Clone, Serialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub reservation_id: String,
    pub window: TimeWindow,
    pub description: String,
}

impl Conflict {
    pub fn from_reservation(r: &Reservation) -> Self {
        Self {
            kind: r.kind(),
            reservation_id: r.id().to_string(),
            window: r.window(),
            description: r.describe(),
        }
    }
}
