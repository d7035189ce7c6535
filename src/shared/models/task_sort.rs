use std::str::FromStr;

/// Sort selection for task listing: sort column plus direction.
///
/// An explicitly invalid sort string is a caller error and never falls back
/// to the default; the default applies only when no sort was supplied at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    CreatedAtAsc,
    #[default]
    CreatedAtDesc,
    DueAtAsc,
    DueAtDesc,
}

impl TaskSort {
    pub fn column_name(self) -> &'static str {
        match self {
            Self::CreatedAtAsc | Self::CreatedAtDesc => "created_at",
            Self::DueAtAsc | Self::DueAtDesc => "due_at",
        }
    }

    pub fn ascending(self) -> bool {
        matches!(self, Self::CreatedAtAsc | Self::DueAtAsc)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAtAsc => "created_at:asc",
            Self::CreatedAtDesc => "created_at:desc",
            Self::DueAtAsc => "due_at:asc",
            Self::DueAtDesc => "due_at:desc",
        }
    }
}

impl FromStr for TaskSort {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "created_at:asc" => Ok(Self::CreatedAtAsc),
            "created_at:desc" => Ok(Self::CreatedAtDesc),
            "due_at:asc" => Ok(Self::DueAtAsc),
            "due_at:desc" => Ok(Self::DueAtDesc),
            other => Err(format!("unknown sort value: {other}")),
        }
    }
}
