//! Wallet - account-level currencies

use serde::{Deserialize, Serialize};

/// Receiver of encounter rewards
pub trait CurrencySink {
    fn add_coins(&mut self, amount: u64);
    fn add_crystals(&mut self, amount: u64);
    /// Account experience, separate from character experience
    fn add_experience(&mut self, amount: u64);
}

/// The player's currencies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub coins: u64,
    pub crystals: u64,
    pub account_exp: u64,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CurrencySink for Wallet {
    fn add_coins(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    fn add_crystals(&mut self, amount: u64) {
        self.crystals = self.crystals.saturating_add(amount);
    }

    fn add_experience(&mut self, amount: u64) {
        self.account_exp = self.account_exp.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_accumulates() {
        let mut wallet = Wallet::new();
        wallet.add_coins(100);
        wallet.add_coins(50);
        wallet.add_crystals(10);
        wallet.add_experience(5);
        assert_eq!(
            wallet,
            Wallet {
                coins: 150,
                crystals: 10,
                account_exp: 5
            }
        );
    }

    #[test]
    fn test_wallet_saturates() {
        let mut wallet = Wallet {
            coins: u64::MAX - 1,
            ..Wallet::default()
        };
        wallet.add_coins(10);
        assert_eq!(wallet.coins, u64::MAX);
    }
}
