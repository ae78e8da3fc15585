//! Resource counter — оплаченные использования инструмента
//!
//! Одна единица ресурса покупает `USES_PER_RESOURCE_UNIT` укреплений.
//! Счётчик уменьшается только на успешном укреплении.

/// Сколько укреплений покупает одна единица ресурса
pub const USES_PER_RESOURCE_UNIT: i32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceCounter {
    pub remaining_uses: i32,
}

impl ResourceCounter {
    pub fn new(remaining_uses: i32) -> Self {
        Self { remaining_uses }
    }

    /// Нужно списать новую единицу ресурса перед следующим укреплением
    pub fn needs_refill(&self) -> bool {
        self.remaining_uses <= 0
    }

    /// Вызывается после успешного списания единицы ресурса
    pub fn refill(&mut self) {
        self.remaining_uses = USES_PER_RESOURCE_UNIT;
    }

    /// Вызывается после успешного укрепления
    pub fn consume(&mut self) {
        self.remaining_uses -= 1;
    }
}
