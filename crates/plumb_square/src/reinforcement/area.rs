//! Area iterator — плоскость 5x5 через target блок
//!
//! Ось грани фиксирована на координате target, две свободные оси идут
//! от target-2 до target+2. Порядок row-major: внешняя свободная ось
//! по возрастанию, внутренняя по возрастанию (X < Y < Z).

use crate::components::{Axis, BlockPos};

/// Радиус плоскости по каждой свободной оси
pub const AREA_RADIUS: i32 = 2;

/// Длина стороны плоскости
pub const AREA_SIDE: i32 = AREA_RADIUS * 2 + 1;

/// Количество блоков в плоскости
pub const AREA_SIZE: usize = (AREA_SIDE * AREA_SIDE) as usize;

/// Ленивая последовательность из 25 координат
#[derive(Debug, Clone)]
pub struct ReinforceArea {
    target: BlockPos,
    face_axis: Axis,
    next: usize,
}

impl ReinforceArea {
    pub fn new(target: BlockPos, face_axis: Axis) -> Self {
        Self {
            target,
            face_axis,
            next: 0,
        }
    }

    fn offset_at(&self, index: usize) -> BlockPos {
        let outer = (index as i32) / AREA_SIDE - AREA_RADIUS;
        let inner = (index as i32) % AREA_SIDE - AREA_RADIUS;
        match self.face_axis {
            Axis::X => self.target.add(0, outer, inner),
            Axis::Y => self.target.add(outer, 0, inner),
            Axis::Z => self.target.add(outer, inner, 0),
        }
    }
}

impl Iterator for ReinforceArea {
    type Item = BlockPos;

    fn next(&mut self) -> Option<BlockPos> {
        if self.next >= AREA_SIZE {
            return None;
        }
        let pos = self.offset_at(self.next);
        self.next += 1;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = AREA_SIZE - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ReinforceArea {}

impl std::iter::FusedIterator for ReinforceArea {}

/// Плоскость вокруг target, перпендикулярная `face_axis`
pub fn reinforce_area(target: BlockPos, face_axis: Axis) -> ReinforceArea {
    ReinforceArea::new(target, face_axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_area_row_major_order_y_axis() {
        let area: Vec<_> = reinforce_area(BlockPos::new(10, 64, -3), Axis::Y).collect();

        assert_eq!(area.len(), 25);
        assert_eq!(area[0], BlockPos::new(8, 64, -5));
        assert_eq!(area[1], BlockPos::new(8, 64, -4));
        assert_eq!(area[5], BlockPos::new(9, 64, -5));
        assert_eq!(area[12], BlockPos::new(10, 64, -3));
        assert_eq!(area[24], BlockPos::new(12, 64, -1));
    }

    #[test]
    fn test_area_x_axis_fixes_x() {
        let target = BlockPos::new(0, 0, 0);
        let area = reinforce_area(target, Axis::X);
        assert_eq!(area.len(), 25);

        let coords: Vec<_> = area.collect();
        assert!(coords.iter().all(|p| p.x == 0));
        assert_eq!(coords.first(), Some(&BlockPos::new(0, -2, -2)));
        assert_eq!(coords.last(), Some(&BlockPos::new(0, 2, 2)));
    }

    #[test]
    fn test_area_at_world_edge_wraps_without_panic() {
        let target = BlockPos::new(0, i32::MAX - 1, 0);
        let area: Vec<_> = reinforce_area(target, Axis::X).collect();

        assert_eq!(area.len(), 25);
        assert!(area.contains(&target));
        assert!(area.contains(&BlockPos::new(0, i32::MAX, 2)));
        assert!(area.contains(&BlockPos::new(0, i32::MIN, -2)));
    }

    #[test]
    fn test_area_is_repeatable() {
        let target = BlockPos::new(3, 4, 5);
        let a: Vec<_> = reinforce_area(target, Axis::Z).collect();
        let b: Vec<_> = reinforce_area(target, Axis::Z).collect();
        assert_eq!(a, b);
    }

    fn any_axis() -> impl Strategy<Value = Axis> {
        prop_oneof![Just(Axis::X), Just(Axis::Y), Just(Axis::Z)]
    }

    proptest! {
        #[test]
        fn prop_area_has_25_distinct_including_target(
            x in -1_000_000i32..1_000_000,
            y in -1_000i32..1_000,
            z in -1_000_000i32..1_000_000,
            axis in any_axis(),
        ) {
            let target = BlockPos::new(x, y, z);
            let area: Vec<_> = reinforce_area(target, axis).collect();
            let distinct: HashSet<_> = area.iter().copied().collect();

            prop_assert_eq!(area.len(), AREA_SIZE);
            prop_assert_eq!(distinct.len(), AREA_SIZE);
            prop_assert!(distinct.contains(&target));
        }

        #[test]
        fn prop_area_symmetric_on_free_axes(
            x in -1_000i32..1_000,
            y in -1_000i32..1_000,
            z in -1_000i32..1_000,
            axis in any_axis(),
        ) {
            let target = BlockPos::new(x, y, z);
            for pos in reinforce_area(target, axis) {
                for free in Axis::ALL {
                    let delta = pos.get(free) - target.get(free);
                    if free == axis {
                        prop_assert_eq!(delta, 0);
                    } else {
                        prop_assert!((-AREA_RADIUS..=AREA_RADIUS).contains(&delta));
                        // Зеркальная точка тоже в плоскости
                        let mirrored = match free {
                            Axis::X => pos.add(-2 * delta, 0, 0),
                            Axis::Y => pos.add(0, -2 * delta, 0),
                            Axis::Z => pos.add(0, 0, -2 * delta),
                        };
                        prop_assert!(reinforce_area(target, axis).any(|p| p == mirrored));
                    }
                }
            }
        }
    }
}
