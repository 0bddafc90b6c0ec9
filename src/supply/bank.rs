//! The coin bank.
//!
//! Coins are a zero-sum resource: the box holds 20 coins, split between the
//! shared pool and the players' balances. Every coin movement goes through
//! this type, so `pool + Σ balances == 20` holds before and after every
//! operation. Operations that would break a bound fail without mutation.
//!
//! ```
//! use eriantys_core::core::PlayerId;
//! use eriantys_core::supply::Bank;
//!
//! let mut bank = Bank::new();
//! let p1 = PlayerId::new(0);
//! bank.register(p1).unwrap();
//!
//! assert_eq!(bank.pool(), 19);
//! assert_eq!(bank.balance(p1), 1);
//! assert!(bank.pay(p1, 2).is_err());
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::{INITIAL_COINS_PER_PLAYER, MAX_COINS};
use crate::core::{GameError, GameResult, PlayerId};

/// Shared coin pool plus per-player balances.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pool: u8,
    balances: FxHashMap<PlayerId, u8>,
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}

impl Bank {
    /// Create a bank holding every coin in its pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pool: MAX_COINS,
            balances: FxHashMap::default(),
        }
    }

    /// Coins in the shared pool.
    #[must_use]
    pub fn pool(&self) -> u8 {
        self.pool
    }

    /// A player's balance (0 for unregistered players).
    #[must_use]
    pub fn balance(&self, player: PlayerId) -> u8 {
        self.balances.get(&player).copied().unwrap_or(0)
    }

    /// Sum of every player balance plus the pool.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.pool as u32 + self.balances.values().map(|&b| b as u32).sum::<u32>()
    }

    /// Open an account for a player with the starting endowment.
    pub fn register(&mut self, player: PlayerId) -> GameResult<()> {
        if self.balances.contains_key(&player) {
            return Err(GameError::DuplicateSelection("player already has an account"));
        }
        if self.pool < INITIAL_COINS_PER_PLAYER {
            return Err(GameError::ResourceExhausted("bank pool is empty"));
        }
        self.pool -= INITIAL_COINS_PER_PLAYER;
        self.balances.insert(player, INITIAL_COINS_PER_PLAYER);
        Ok(())
    }

    /// Close a player's account, returning its coins to the pool.
    ///
    /// Returns the number of coins returned.
    pub fn unregister(&mut self, player: PlayerId) -> u8 {
        let coins = self.balances.remove(&player).unwrap_or(0);
        self.pool += coins;
        coins
    }

    fn account(&self, player: PlayerId) -> GameResult<u8> {
        self.balances
            .get(&player)
            .copied()
            .ok_or(GameError::UnknownPlayer(player))
    }

    /// Move coins from the pool to a player.
    pub fn add_coin(&mut self, player: PlayerId, amount: u8) -> GameResult<u8> {
        let balance = self.account(player)?;
        if amount > self.pool {
            return Err(GameError::ResourceExhausted("bank pool cannot cover the amount"));
        }
        let new_balance = balance
            .checked_add(amount)
            .filter(|&b| b <= MAX_COINS)
            .ok_or(GameError::CapacityExceeded("player balance would exceed 20"))?;

        self.pool -= amount;
        self.balances.insert(player, new_balance);
        Ok(new_balance)
    }

    /// Move coins from a player back to the pool.
    pub fn remove_coin(&mut self, player: PlayerId, amount: u8) -> GameResult<u8> {
        let balance = self.account(player)?;
        if balance < amount {
            return Err(GameError::InsufficientFunds {
                needed: amount,
                available: balance,
            });
        }
        if self.pool as u16 + amount as u16 > MAX_COINS as u16 {
            return Err(GameError::CapacityExceeded("bank pool would exceed 20"));
        }

        self.pool += amount;
        self.balances.insert(player, balance - amount);
        Ok(balance - amount)
    }

    /// Debit a player for a purchase; the coins go back to the pool.
    pub fn pay(&mut self, player: PlayerId, amount: u8) -> GameResult<u8> {
        self.remove_coin(player, amount)
    }
}
