//! Ошибки укрепления
//!
//! `ReinforceError` — то, что видит игрок (code + сообщение).
//! `RemovalError` — отказ registry при снятии укрепления.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReinforceError {
    /// Admin tool без Creative
    #[error("You are not allowed to use this tool!")]
    NotAuthorized,

    #[error("You need a reinforcement resource in your inventory!")]
    NoResource,

    #[error("This block can not be reinforced!")]
    NotReinforceable,

    #[error("Cannot reinforce block, it's already reinforced!")]
    AlreadyReinforced,

    #[error("Cannot remove reinforcement. This block does not belong to you")]
    CannotRemoveNotOwner,

    #[error("Cannot remove reinforcement. It's not reinforced")]
    CannotRemoveNotReinforced,
}

impl ReinforceError {
    /// Stable код ошибки для клиента
    pub fn code(&self) -> &'static str {
        match self {
            ReinforceError::NotAuthorized => "admin_nocreative",
            ReinforceError::NoResource => "noresource",
            ReinforceError::NotReinforceable => "notreinforcable",
            ReinforceError::AlreadyReinforced => "alreadyreinforced",
            ReinforceError::CannotRemoveNotOwner | ReinforceError::CannotRemoveNotReinforced => "cantremove",
        }
    }

    /// Прерывает ли ошибка весь batch (до обработки координат)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ReinforceError::NotAuthorized | ReinforceError::NoResource | ReinforceError::NotReinforceable
        )
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalError {
    #[error("block is not reinforced")]
    NotReinforced,

    #[error("block is reinforced by someone else")]
    NotOwnBlock,
}

impl RemovalError {
    pub fn code(&self) -> &'static str {
        match self {
            RemovalError::NotReinforced => "notreinforced",
            RemovalError::NotOwnBlock => "notownblock",
        }
    }
}

impl From<RemovalError> for ReinforceError {
    fn from(err: RemovalError) -> Self {
        match err.code() {
            "notownblock" => ReinforceError::CannotRemoveNotOwner,
            _ => ReinforceError::CannotRemoveNotReinforced,
        }
    }
}
