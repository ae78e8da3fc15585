//! Tests for reinforcement applier.

#[cfg(test)]
mod tests {
    use crate::components::*;
    use crate::item_system::{ItemDefinitions, ItemStack};
    use crate::reinforcement::applier::*;
    use crate::reinforcement::area::AREA_SIZE;
    use crate::reinforcement::error::ReinforceError;
    use crate::reinforcement::registry::{BlockReinforcements, ReinforcementRegistry};
    use crate::tool_mode::set_tool_mode;

    struct Fixture {
        defs: ItemDefinitions,
        blocks: WorldBlocks,
        registry: BlockReinforcements,
        player: Player,
        groups: GroupMemberships,
        inventory: Inventory,
        tool: HeldTool,
    }

    /// Стена 9x9 в плоскости z = 0 вокруг (0, 10, 0), ресурс в слоте 0
    fn fixture(tool_item: &str) -> Fixture {
        let mut blocks = WorldBlocks::new();
        blocks.fill(BlockPos::new(-4, 6, 0), BlockPos::new(4, 14, 0), "cobblestone", true);

        let mut inventory = Inventory::with_capacity(4);
        inventory.set_slot(0, Some(ItemStack::new("metalplate-iron", 3)));

        Fixture {
            defs: ItemDefinitions::default(),
            blocks,
            registry: BlockReinforcements::new(),
            player: Player::new("uid-alice", "Alice"),
            groups: GroupMemberships(vec![GroupMembership::new(7, "Masons")]),
            inventory,
            tool: HeldTool::new(ItemStack::new(tool_item, 1)),
        }
    }

    fn target() -> BlockSelection {
        BlockSelection::new(BlockPos::new(0, 10, 0), BlockFacing::North)
    }

    impl Fixture {
        fn apply_area(&mut self) -> Result<ReinforcementReport, ReinforceError> {
            let user = ToolUser {
                player: ActingPlayer::new(&self.player, &self.groups),
                game_mode: GameMode::Survival,
                inventory: &mut self.inventory,
            };
            apply_area(&mut self.registry, &self.blocks, &self.defs, user, &mut self.tool, target())
        }

        fn apply_admin(&mut self, game_mode: GameMode) -> Result<ReinforcementReport, ReinforceError> {
            let user = ToolUser {
                player: ActingPlayer::new(&self.player, &self.groups),
                game_mode,
                inventory: &mut self.inventory,
            };
            apply_admin(&mut self.registry, &self.blocks, user, &self.tool, target().position)
        }

        fn remove_area(&mut self) -> Result<ReinforcementReport, ReinforceError> {
            let user = ToolUser {
                player: ActingPlayer::new(&self.player, &self.groups),
                game_mode: GameMode::Survival,
                inventory: &mut self.inventory,
            };
            remove_area(&mut self.registry, &self.defs, user, target())
        }

        fn remove_admin(&mut self, game_mode: GameMode) -> Result<ReinforcementReport, ReinforceError> {
            let user = ToolUser {
                player: ActingPlayer::new(&self.player, &self.groups),
                game_mode,
                inventory: &mut self.inventory,
            };
            remove_admin(&mut self.registry, &self.defs, user, target().position)
        }

        fn plates(&self) -> u32 {
            self.inventory.count(&"metalplate-iron".into())
        }
    }

    fn reinforce_as_bob(registry: &mut BlockReinforcements, pos: BlockPos) {
        let bob = Player::new("uid-bob", "Bob");
        let none = GroupMemberships::default();
        assert!(registry.strengthen(pos, ActingPlayer::new(&bob, &none), 100));
    }

    // ------------------------------------------------------------------------
    // Area apply
    // ------------------------------------------------------------------------

    #[test]
    fn test_area_apply_consumes_one_unit_for_25_blocks() {
        let mut f = fixture("plumbandsquare-area");

        let report = f.apply_area().unwrap();

        assert_eq!(report.succeeded.len(), AREA_SIZE);
        assert!(report.failures.is_empty());
        assert_eq!(report.resource_units_used, 1);
        assert_eq!(f.plates(), 2);
        assert_eq!(f.tool.counter.remaining_uses, 0);
        assert_eq!(f.registry.len(), AREA_SIZE);
        // Прочность из атрибута ресурса (iron plate = 150)
        assert_eq!(f.registry.get(target().position).map(|r| r.strength), Some(150));
        assert_eq!(report.sound_at, Some(target().position));
    }

    #[test]
    fn test_area_apply_skips_foreign_reinforcements_without_cost() {
        let mut f = fixture("plumbandsquare-area");
        let foreign = [BlockPos::new(-2, 8, 0), BlockPos::new(2, 12, 0), BlockPos::new(1, 10, 0)];
        for pos in foreign {
            reinforce_as_bob(&mut f.registry, pos);
        }

        let report = f.apply_area().unwrap();

        assert_eq!(report.failures.len(), 3);
        assert!(report
            .failures
            .iter()
            .all(|(pos, err)| foreign.contains(pos) && *err == ReinforceError::AlreadyReinforced));
        assert_eq!(report.succeeded.len(), 22);
        assert_eq!(report.resource_units_used, 1);
        assert_eq!(f.tool.counter.remaining_uses, 25 - 22);

        // Чужие укрепления не тронуты
        assert_eq!(
            f.registry.get(BlockPos::new(1, 10, 0)).map(|r| r.player_uid.as_str()),
            Some("uid-bob")
        );
    }

    #[test]
    fn test_area_apply_withdraws_even_if_first_coordinate_fails() {
        let mut f = fixture("plumbandsquare-area");
        // Первая координата в порядке обхода для оси Z: (-2, 8, 0)
        reinforce_as_bob(&mut f.registry, BlockPos::new(-2, 8, 0));

        let report = f.apply_area().unwrap();

        assert_eq!(report.failures[0].0, BlockPos::new(-2, 8, 0));
        assert_eq!(report.resource_units_used, 1);
        assert_eq!(f.tool.counter.remaining_uses, 1);
    }

    #[test]
    fn test_area_apply_counter_carries_between_batches() {
        let mut f = fixture("plumbandsquare-area");
        f.tool.counter = crate::reinforcement::counter::ResourceCounter::new(10);

        let report = f.apply_area().unwrap();

        // 10 оплаченных + 1 новая единица на оставшиеся 15
        assert_eq!(report.resource_units_used, 1);
        assert_eq!(f.tool.counter.remaining_uses, 25 - 15);
        assert_eq!(f.plates(), 2);
    }

    #[test]
    fn test_area_apply_skips_air_for_free() {
        let mut f = fixture("plumbandsquare-area");
        f.blocks.remove(BlockPos::new(0, 12, 0));
        f.blocks.set(BlockPos::new(1, 12, 0), "glass", false);

        let report = f.apply_area().unwrap();

        assert_eq!(report.skipped, 2);
        assert_eq!(report.succeeded.len(), 23);
        assert!(report.failures.is_empty());
        assert_eq!(f.tool.counter.remaining_uses, 2);
    }

    #[test]
    fn test_area_apply_no_resource() {
        let mut f = fixture("plumbandsquare-area");
        f.inventory.set_slot(0, Some(ItemStack::new("stick", 5)));

        assert_eq!(f.apply_area(), Err(ReinforceError::NoResource));
        assert!(f.registry.is_empty());
    }

    #[test]
    fn test_area_apply_target_not_reinforceable() {
        let mut f = fixture("plumbandsquare-area");
        f.blocks.set(target().position, "glass", false);

        assert_eq!(f.apply_area(), Err(ReinforceError::NotReinforceable));
        assert!(f.registry.is_empty());
        assert_eq!(f.plates(), 3);
    }

    #[test]
    fn test_area_apply_for_group() {
        let mut f = fixture("plumbandsquare-area");
        set_tool_mode(&mut f.tool.stack, 1);

        f.apply_area().unwrap();

        let bre = f.registry.get(target().position).unwrap();
        assert_eq!(bre.group_uid, 7);
        assert_eq!(bre.last_group_name.as_deref(), Some("Masons"));
    }

    #[test]
    fn test_area_apply_group_mode_clamped_after_leaving() {
        let mut f = fixture("plumbandsquare-area");
        set_tool_mode(&mut f.tool.stack, 4);

        f.apply_area().unwrap();

        // Одна группа → mode 4 clamp до 1
        assert_eq!(f.registry.get(target().position).unwrap().group_uid, 7);
    }

    // ------------------------------------------------------------------------
    // Admin apply
    // ------------------------------------------------------------------------

    #[test]
    fn test_admin_apply_overrides_existing_strength() {
        let mut f = fixture("plumbandsquare-admin");
        reinforce_as_bob(&mut f.registry, target().position);

        let report = f.apply_admin(GameMode::Creative).unwrap();

        assert_eq!(report.succeeded, vec![target().position]);
        let bre = f.registry.get(target().position).unwrap();
        assert_eq!(bre.strength, ADMIN_REINFORCE_STRENGTH);
        assert_eq!(bre.player_uid, "uid-alice");
        // Ресурс не тратится, только один блок
        assert_eq!(f.plates(), 3);
        assert_eq!(f.registry.len(), 1);
    }

    #[test]
    fn test_admin_apply_requires_creative() {
        let mut f = fixture("plumbandsquare-admin");

        assert_eq!(f.apply_admin(GameMode::Survival), Err(ReinforceError::NotAuthorized));
        assert!(f.registry.is_empty());
    }

    #[test]
    fn test_admin_apply_not_reinforceable() {
        let mut f = fixture("plumbandsquare-admin");
        f.blocks.remove(target().position);

        assert_eq!(f.apply_admin(GameMode::Creative), Err(ReinforceError::NotReinforceable));
    }

    // ------------------------------------------------------------------------
    // Remove
    // ------------------------------------------------------------------------

    #[test]
    fn test_area_remove_reports_per_coordinate_errors() {
        let mut f = fixture("plumbandsquare-area");
        f.apply_area().unwrap();
        f.registry.clear(BlockPos::new(0, 8, 0));
        f.registry.clear(BlockPos::new(-1, 11, 0));
        reinforce_as_bob(&mut f.registry, BlockPos::new(0, 8, 0));

        let report = f.remove_area().unwrap();

        assert_eq!(report.succeeded.len(), 23);
        assert!(report
            .failures
            .contains(&(BlockPos::new(0, 8, 0), ReinforceError::CannotRemoveNotOwner)));
        assert!(report
            .failures
            .contains(&(BlockPos::new(-1, 11, 0), ReinforceError::CannotRemoveNotReinforced)));
        assert_eq!(f.registry.len(), 1);
        assert!(report.lock_refund.is_none());
    }

    #[test]
    fn test_area_remove_returns_lock_to_inventory() {
        let mut f = fixture("plumbandsquare-area");
        f.apply_area().unwrap();
        f.registry.lock(target().position, "padlock-iron".into());

        let report = f.remove_area().unwrap();

        assert_eq!(
            report.lock_refund,
            Some(LockRefund::Given(ItemStack::new("padlock-iron", 1)))
        );
        assert_eq!(f.inventory.count(&"padlock-iron".into()), 1);
    }

    #[test]
    fn test_area_remove_drops_lock_when_inventory_full() {
        let mut f = fixture("plumbandsquare-area");
        f.apply_area().unwrap();
        f.registry.lock(target().position, "padlock-iron".into());
        for slot in 0..f.inventory.capacity() {
            f.inventory.set_slot(slot, Some(ItemStack::new("stick", 64)));
        }

        let report = f.remove_area().unwrap();

        assert_eq!(
            report.lock_refund,
            Some(LockRefund::Dropped(ItemStack::new("padlock-iron", 1)))
        );
        assert_eq!(f.inventory.count(&"padlock-iron".into()), 0);
    }

    #[test]
    fn test_area_remove_returns_lock_even_if_target_removal_fails() {
        let mut f = fixture("plumbandsquare-area");
        reinforce_as_bob(&mut f.registry, target().position);
        f.registry.lock(target().position, "padlock-iron".into());

        let report = f.remove_area().unwrap();

        assert_eq!(report.succeeded.len() + report.failures.len(), 25);
        assert!(report
            .failures
            .contains(&(target().position, ReinforceError::CannotRemoveNotOwner)));
        assert_eq!(
            report.lock_refund,
            Some(LockRefund::Given(ItemStack::new("padlock-iron", 1)))
        );
        assert_eq!(f.inventory.count(&"padlock-iron".into()), 1);
        // Чужое укрепление остаётся на месте
        assert_eq!(
            f.registry.get(target().position).map(|r| r.player_uid.as_str()),
            Some("uid-bob")
        );
    }

    #[test]
    fn test_area_remove_unlocked_target_returns_nothing() {
        let mut f = fixture("plumbandsquare-area");
        f.apply_area().unwrap();
        f.registry.lock(BlockPos::new(1, 10, 0), "padlock-iron".into());

        let report = f.remove_area().unwrap();

        assert_eq!(report.succeeded.len(), 25);
        assert!(report.lock_refund.is_none());
    }

    #[test]
    fn test_area_apply_refills_only_on_real_withdrawal() {
        // Последняя единица ресурса: списана, слот очищен, счётчик полный → 0
        let mut f = fixture("plumbandsquare-area");
        f.inventory.set_slot(0, Some(ItemStack::new("metalplate-iron", 1)));
        let report = f.apply_area().unwrap();
        assert_eq!(report.resource_units_used, 1);
        assert_eq!(f.tool.counter.remaining_uses, 0);
        assert!(f.inventory.slot(0).is_none());

        // Следующий batch без ресурса: счётчик не трогается
        assert_eq!(f.apply_area(), Err(ReinforceError::NoResource));
        assert_eq!(f.tool.counter.remaining_uses, 0);
    }

    #[test]
    fn test_admin_remove_clears_foreign_and_returns_lock() {
        let mut f = fixture("plumbandsquare-admin");
        reinforce_as_bob(&mut f.registry, target().position);
        f.registry.lock(target().position, "padlock-iron".into());

        let report = f.remove_admin(GameMode::Creative).unwrap();

        assert!(f.registry.get(target().position).is_none());
        assert!(matches!(report.lock_refund, Some(LockRefund::Given(_))));
        assert_eq!(report.sound_at, Some(target().position));
    }

    #[test]
    fn test_admin_remove_nothing_to_remove() {
        let mut f = fixture("plumbandsquare-admin");

        let report = f.remove_admin(GameMode::Creative).unwrap();

        assert!(report.succeeded.is_empty());
        assert!(report.sound_at.is_none());
    }

    #[test]
    fn test_admin_remove_requires_creative() {
        let mut f = fixture("plumbandsquare-admin");
        reinforce_as_bob(&mut f.registry, target().position);

        assert_eq!(f.remove_admin(GameMode::Survival), Err(ReinforceError::NotAuthorized));
        assert!(f.registry.get(target().position).is_some());
    }
}
