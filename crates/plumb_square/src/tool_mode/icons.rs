//! Tool mode icons
//!
//! **IconRenderer** — граница с рендером хоста (генерация/освобождение текстур).
//!
//! **IconCache** — иконки одного tool item, по seed (1-based):
//! - Создаются лениво, никогда не перегенерируются
//! - Освобождаются все разом при unload предмета
//!
//! **SymbolIcons** — reference renderer: монохромный символ NxN,
//! штрихи детерминированно выбираются `ChaCha8Rng` из seed.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

use crate::item_system::ItemId;

/// Opaque handle на сгенерированную иконку
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IconHandle(pub u32);

pub trait IconRenderer {
    /// Символ по seed; `add_lines`: дополнительные штрихи
    fn gen_symbol(&mut self, seed: u32, add_lines: u32) -> IconHandle;

    fn release(&mut self, handle: IconHandle);
}

// ============================================================================
// IconCache
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconCache {
    symbols: Vec<IconHandle>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Иконка для seed (seed 0 трактуется как 1).
    ///
    /// Пропущенные seed'ы ниже запрошенного генерируются по порядку,
    /// так что `symbols[seed - 1]` всегда соответствует своему seed.
    pub fn fetch_or_create(&mut self, seed: u32, renderer: &mut impl IconRenderer) -> IconHandle {
        let seed = seed.max(1);
        while (self.symbols.len() as u32) < seed {
            let next = self.symbols.len() as u32 + 1;
            self.symbols.push(renderer.gen_symbol(next, next));
        }
        self.symbols[seed as usize - 1]
    }

    pub fn release_all(&mut self, renderer: &mut impl IconRenderer) {
        for handle in self.symbols.drain(..) {
            renderer.release(handle);
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

// ============================================================================
// ToolModeIcons (Resource)
// ============================================================================

/// Icon cache для каждого tool item
#[derive(Resource, Debug, Default)]
pub struct ToolModeIcons {
    caches: HashMap<ItemId, IconCache>,
}

impl ToolModeIcons {
    pub fn cache_mut(&mut self, item: &ItemId) -> &mut IconCache {
        self.caches.entry(item.clone()).or_default()
    }

    pub fn cache(&self, item: &ItemId) -> Option<&IconCache> {
        self.caches.get(item)
    }

    /// Unload одного предмета
    pub fn release(&mut self, item: &ItemId, renderer: &mut impl IconRenderer) {
        if let Some(mut cache) = self.caches.remove(item) {
            cache.release_all(renderer);
        }
    }

    pub fn release_all(&mut self, renderer: &mut impl IconRenderer) {
        for (_, mut cache) in self.caches.drain() {
            cache.release_all(renderer);
        }
    }
}

// ============================================================================
// SymbolIcons (Resource, reference renderer)
// ============================================================================

/// Сгенерированный символ (alpha mask, row-major)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolIcon {
    pub seed: u32,
    pub size: u32,
    pub pixels: Vec<u8>,
}

impl SymbolIcon {
    pub fn filled_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p > 0).count()
    }
}

#[derive(Resource, Debug)]
pub struct SymbolIcons {
    size: u32,
    next_handle: u32,
    generated: u32,
    icons: HashMap<IconHandle, SymbolIcon>,
}

impl Default for SymbolIcons {
    fn default() -> Self {
        Self::new(48)
    }
}

impl SymbolIcons {
    /// Базовое количество штрихов символа
    const BASE_STROKES: u32 = 2;
    const GRID: i32 = 4;

    pub fn new(size: u32) -> Self {
        Self {
            size: size.max(8),
            next_handle: 1,
            generated: 0,
            icons: HashMap::new(),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn get(&self, handle: IconHandle) -> Option<&SymbolIcon> {
        self.icons.get(&handle)
    }

    /// Сколько иконок живо прямо сейчас
    pub fn live_count(&self) -> usize {
        self.icons.len()
    }

    /// Сколько раз вызывалась генерация за всё время
    pub fn generated_count(&self) -> u32 {
        self.generated
    }

    fn draw(&self, seed: u32, add_lines: u32) -> Vec<u8> {
        let size = self.size as i32;
        let mut pixels = vec![0u8; (size * size) as usize];
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);

        let margin = size / 8;
        let cell = (size - 2 * margin) / (Self::GRID - 1);
        let to_px = |g: i32| margin + g * cell;

        for _ in 0..Self::BASE_STROKES + add_lines {
            let (x0, y0) = (rng.gen_range(0..Self::GRID), rng.gen_range(0..Self::GRID));
            let (x1, y1) = (rng.gen_range(0..Self::GRID), rng.gen_range(0..Self::GRID));
            stroke(&mut pixels, size, (to_px(x0), to_px(y0)), (to_px(x1), to_px(y1)));
        }

        pixels
    }
}

/// Линия толщиной 2px (DDA)
fn stroke(pixels: &mut [u8], size: i32, from: (i32, i32), to: (i32, i32)) {
    let steps = (to.0 - from.0).abs().max((to.1 - from.1).abs()).max(1);
    for i in 0..=steps {
        let x = from.0 + (to.0 - from.0) * i / steps;
        let y = from.1 + (to.1 - from.1) * i / steps;
        for (bx, by) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let (px, py) = (x + bx, y + by);
            if px >= 0 && py >= 0 && px < size && py < size {
                pixels[(py * size + px) as usize] = 255;
            }
        }
    }
}

impl IconRenderer for SymbolIcons {
    fn gen_symbol(&mut self, seed: u32, add_lines: u32) -> IconHandle {
        let handle = IconHandle(self.next_handle);
        self.next_handle += 1;
        self.generated += 1;

        let pixels = self.draw(seed, add_lines);
        self.icons.insert(
            handle,
            SymbolIcon {
                seed,
                size: self.size,
                pixels,
            },
        );
        handle
    }

    fn release(&mut self, handle: IconHandle) {
        self.icons.remove(&handle);
    }
}
