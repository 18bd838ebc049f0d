use crate::libs::core::models::{ConversationKey, Group, Presence, User};
use crate::ValidationError;
use once_cell::sync::Lazy;

pub const NO_USERS_FOUND: &str = "No users found.";
pub const NO_GROUPS_AVAILABLE: &str = "No groups available.";

static SAMPLE_DIRECTORY: Lazy<Directory> = Lazy::new(|| {
    let users = vec![
        User::new("John Doe", Presence::Online)
            .with_email("john@example.com")
            .with_avatar("https://i.pravatar.cc/150?img=3")
            .with_bio("Full-stack developer, tech enthusiast."),
        User::new("Jane Smith", Presence::Offline),
        User::new("Mark Evans", Presence::Online),
        User::new("Emily White", Presence::Offline),
    ];
    let groups = vec![
        Group::with_members("Family", ["John Doe", "Jane Smith", "Emily White"]),
        Group::with_members("Work", ["Mark Evans", "John Doe"]),
    ];
    Directory { users, groups }
});

/// Either side of the directory, as picked from the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry {
    User(ConversationKey),
    Group(ConversationKey),
}

impl Entry {
    pub fn key(&self) -> ConversationKey {
        match self {
            Entry::User(key) | Entry::Group(key) => *key,
        }
    }
}

#[derive(Debug)]
pub struct SearchResults<'a> {
    pub users: Vec<&'a User>,
    pub groups: Vec<&'a Group>,
}

impl SearchResults<'_> {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.groups.is_empty()
    }
}

/// Owns every user and group. Display names are unique across both lists.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    users: Vec<User>,
    groups: Vec<Group>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four sample users and two sample groups. Keys are fixed per process.
    pub fn sample() -> Self {
        SAMPLE_DIRECTORY.clone()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn name_taken(&self, name: &str) -> bool {
        self.users.iter().any(|u| u.name == name) || self.groups.iter().any(|g| g.name == name)
    }

    pub fn add_user(&mut self, mut user: User) -> Result<ConversationKey, ValidationError> {
        user.name = user.name.trim().to_string();
        if user.name.is_empty() {
            return Err(ValidationError::EmptyUserName);
        }
        if self.name_taken(&user.name) {
            return Err(ValidationError::NameTaken(user.name));
        }
        let key = user.key;
        self.users.push(user);
        Ok(key)
    }

    pub fn add_group(&mut self, mut group: Group) -> Result<ConversationKey, ValidationError> {
        group.name = group.name.trim().to_string();
        if group.name.is_empty() {
            return Err(ValidationError::EmptyGroupName);
        }
        if self.name_taken(&group.name) {
            return Err(ValidationError::NameTaken(group.name));
        }
        let key = group.key;
        self.groups.push(group);
        Ok(key)
    }

    /// New groups start without members.
    pub fn create_group(&mut self, name: &str) -> Result<ConversationKey, ValidationError> {
        self.add_group(Group::new(name))
    }

    pub fn user(&self, key: &ConversationKey) -> Option<&User> {
        self.users.iter().find(|u| &u.key == key)
    }

    pub(crate) fn user_mut(&mut self, key: &ConversationKey) -> Option<&mut User> {
        self.users.iter_mut().find(|u| &u.key == key)
    }

    pub fn group(&self, key: &ConversationKey) -> Option<&Group> {
        self.groups.iter().find(|g| &g.key == key)
    }

    pub(crate) fn group_mut(&mut self, key: &ConversationKey) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| &g.key == key)
    }

    pub fn entry(&self, key: &ConversationKey) -> Option<Entry> {
        if self.user(key).is_some() {
            Some(Entry::User(*key))
        } else if self.group(key).is_some() {
            Some(Entry::Group(*key))
        } else {
            None
        }
    }

    pub fn find_by_name(&self, name: &str) -> Option<Entry> {
        self.users
            .iter()
            .find(|u| u.name == name)
            .map(|u| Entry::User(u.key))
            .or_else(|| {
                self.groups
                    .iter()
                    .find(|g| g.name == name)
                    .map(|g| Entry::Group(g.key))
            })
    }

    pub fn display_name(&self, key: &ConversationKey) -> Option<&str> {
        self.user(key)
            .map(|u| u.name.as_str())
            .or_else(|| self.group(key).map(|g| g.name.as_str()))
    }

    /// Case-insensitive substring match over names. The empty query matches everything.
    pub fn search(&self, query: &str) -> SearchResults<'_> {
        let needle = query.to_lowercase();
        SearchResults {
            users: self
                .users
                .iter()
                .filter(|u| u.name.to_lowercase().contains(&needle))
                .collect(),
            groups: self
                .groups
                .iter()
                .filter(|g| g.name.to_lowercase().contains(&needle))
                .collect(),
        }
    }

    pub fn mutual_groups(&self, user_name: &str) -> Vec<&Group> {
        self.groups.iter().filter(|g| g.is_member(user_name)).collect()
    }
}
