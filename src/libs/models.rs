use crate::libs::core::models::{Group, Presence, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserSeed {
    pub name: String,
    #[serde(default = "offline")]
    pub status: Presence,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

fn offline() -> Presence {
    Presence::Offline
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupSeed {
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

/// Extra directory entries supplied through configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectorySeed {
    #[serde(default)]
    pub users: Vec<UserSeed>,
    #[serde(default)]
    pub groups: Vec<GroupSeed>,
}

impl From<&UserSeed> for User {
    fn from(seed: &UserSeed) -> Self {
        let mut user = User::new(seed.name.clone(), seed.status);
        user.email = seed.email.clone();
        user.avatar = seed.avatar.clone();
        user.bio = seed.bio.clone();
        user
    }
}

impl From<&GroupSeed> for Group {
    fn from(seed: &GroupSeed) -> Self {
        Group::with_members(
            seed.name.trim(),
            seed.members
                .iter()
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
        )
    }
}
