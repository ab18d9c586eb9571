use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Which side of the relationship an uploaded list describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListRole {
    /// Accounts that follow the user
    Followers,
    /// Accounts the user follows
    Following,
}

impl ListRole {
    pub const ALL: [ListRole; 2] = [ListRole::Followers, ListRole::Following];

    /// Multipart field name carrying this list
    pub fn field_name(self) -> &'static str {
        match self {
            ListRole::Followers => "followers_file",
            ListRole::Following => "following_file",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.field_name() == name)
    }

    /// Server-chosen file stem used inside a scratch session
    pub fn file_stem(self) -> &'static str {
        match self {
            ListRole::Followers => "followers",
            ListRole::Following => "following",
        }
    }
}

impl fmt::Display for ListRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Result of comparing a followers list against a following list.
///
/// Both lists are sorted ascending and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Comparison {
    /// Accounts the user follows that do not follow back
    pub not_following_back: Vec<String>,
    /// Accounts that follow the user but are not followed back
    pub not_followed_by: Vec<String>,
}
