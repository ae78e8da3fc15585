//! Block reinforcement registry
//!
//! `ReinforcementRegistry`: граница с хостом, хранение и персистентность
//! укреплений принадлежат серверу игры. `BlockReinforcements`: in-memory
//! реализация для headless app и тестов.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::components::{ActingPlayer, BlockPos};
use crate::item_system::ItemId;
use crate::reinforcement::error::RemovalError;

// ============================================================================
// BlockReinforcement
// ============================================================================

/// Запись об укреплении блока
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReinforcement {
    pub strength: i32,
    pub player_uid: String,
    pub last_player_name: String,
    /// 0 = укреплено на игрока, не на группу
    pub group_uid: i32,
    pub last_group_name: Option<String>,
    pub locked: bool,
    pub locked_by_item: Option<ItemId>,
}

// ============================================================================
// ReinforcementRegistry
// ============================================================================

pub trait ReinforcementRegistry {
    /// Безусловно удаляет укрепление
    fn clear(&mut self, pos: BlockPos);

    /// Укрепить на игрока. `false` если блок уже укреплён.
    fn strengthen(&mut self, pos: BlockPos, player: ActingPlayer<'_>, strength: i32) -> bool;

    /// Укрепить на группу игрока. `false` если блок уже укреплён.
    fn strengthen_for_group(
        &mut self,
        pos: BlockPos,
        player: ActingPlayer<'_>,
        strength: i32,
        group_uid: i32,
    ) -> bool;

    fn get(&self, pos: BlockPos) -> Option<&BlockReinforcement>;

    /// Снять укрепление от имени игрока
    fn try_remove(&mut self, pos: BlockPos, player: ActingPlayer<'_>) -> Result<(), RemovalError>;
}

// ============================================================================
// BlockReinforcements (Resource)
// ============================================================================

#[derive(Resource, Debug, Clone, Default)]
pub struct BlockReinforcements {
    reinforcements: HashMap<BlockPos, BlockReinforcement>,
}

impl BlockReinforcements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reinforcements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reinforcements.is_empty()
    }

    /// Навесить замок предметом (padlock). `false` если блок не укреплён.
    pub fn lock(&mut self, pos: BlockPos, item: ItemId) -> bool {
        let Some(bre) = self.reinforcements.get_mut(&pos) else {
            return false;
        };
        bre.locked = true;
        bre.locked_by_item = Some(item);
        true
    }

    fn insert_new(&mut self, pos: BlockPos, record: BlockReinforcement) -> bool {
        if self.reinforcements.contains_key(&pos) {
            return false;
        }
        self.reinforcements.insert(pos, record);
        true
    }
}

impl ReinforcementRegistry for BlockReinforcements {
    fn clear(&mut self, pos: BlockPos) {
        self.reinforcements.remove(&pos);
    }

    fn strengthen(&mut self, pos: BlockPos, player: ActingPlayer<'_>, strength: i32) -> bool {
        self.insert_new(
            pos,
            BlockReinforcement {
                strength,
                player_uid: player.uid.to_string(),
                last_player_name: player.name.to_string(),
                group_uid: 0,
                last_group_name: None,
                locked: false,
                locked_by_item: None,
            },
        )
    }

    fn strengthen_for_group(
        &mut self,
        pos: BlockPos,
        player: ActingPlayer<'_>,
        strength: i32,
        group_uid: i32,
    ) -> bool {
        let group_name = player
            .groups
            .iter()
            .find(|g| g.group_uid == group_uid)
            .map(|g| g.group_name.clone());

        self.insert_new(
            pos,
            BlockReinforcement {
                strength,
                player_uid: player.uid.to_string(),
                last_player_name: player.name.to_string(),
                group_uid,
                last_group_name: group_name,
                locked: false,
                locked_by_item: None,
            },
        )
    }

    fn get(&self, pos: BlockPos) -> Option<&BlockReinforcement> {
        self.reinforcements.get(&pos)
    }

    fn try_remove(&mut self, pos: BlockPos, player: ActingPlayer<'_>) -> Result<(), RemovalError> {
        let Some(bre) = self.reinforcements.get(&pos) else {
            return Err(RemovalError::NotReinforced);
        };

        let owns = bre.player_uid == player.uid;
        let in_group = bre.group_uid != 0 && player.is_member(bre.group_uid);
        if !owns && !in_group {
            return Err(RemovalError::NotOwnBlock);
        }

        self.reinforcements.remove(&pos);
        Ok(())
    }
}
