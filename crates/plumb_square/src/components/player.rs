//! Player компоненты: Player, GameMode, GroupMemberships

use bevy::prelude::*;

/// Игрок (identity, которой приписываются укрепления)
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Stable UID
    pub uid: String,
    pub name: String,
}

impl Player {
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
        }
    }
}

/// Game mode игрока. Creative: привилегированный режим (admin tool)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
}

impl GameMode {
    pub fn is_privileged(self) -> bool {
        matches!(self, GameMode::Creative)
    }
}

/// Членство в группе
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMembership {
    pub group_uid: i32,
    pub group_name: String,
}

impl GroupMembership {
    pub fn new(group_uid: i32, group_name: impl Into<String>) -> Self {
        Self {
            group_uid,
            group_name: group_name.into(),
        }
    }
}

/// Группы игрока (порядок = индекс tool mode - 1)
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMemberships(pub Vec<GroupMembership>);

impl GroupMemberships {
    pub fn groups(&self) -> &[GroupMembership] {
        &self.0
    }

    pub fn get(&self, group_uid: i32) -> Option<&GroupMembership> {
        self.0.iter().find(|g| g.group_uid == group_uid)
    }

    pub fn is_member(&self, group_uid: i32) -> bool {
        self.get(group_uid).is_some()
    }

    pub fn leave(&mut self, group_uid: i32) {
        self.0.retain(|g| g.group_uid != group_uid);
    }
}

/// Borrowed view игрока для registry и applier
#[derive(Debug, Clone, Copy)]
pub struct ActingPlayer<'a> {
    pub uid: &'a str,
    pub name: &'a str,
    pub groups: &'a [GroupMembership],
}

impl<'a> ActingPlayer<'a> {
    pub fn new(player: &'a Player, groups: &'a GroupMemberships) -> Self {
        Self {
            uid: &player.uid,
            name: &player.name,
            groups: groups.groups(),
        }
    }

    pub fn is_member(&self, group_uid: i32) -> bool {
        self.groups.iter().any(|g| g.group_uid == group_uid)
    }
}
