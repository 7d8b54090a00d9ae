//! The eligibility collaborator consulted before a session starts.
//!
//! The distributed key generation itself never talks to a [`StakeMonitor`];
//! only [`Roster::admit`](crate::member::Roster::admit) does.

use crate::error::{Error, GjkrResult};
use crate::utils::{BTreeMap, String, ToString};

/// The minimum stake of [`LocalStakeMonitor`], in the smallest token unit.
pub const LOCAL_MINIMUM_STAKE: u128 = 20_000_000;

/// A staking operator as seen by a [`StakeMonitor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Staker {
    /// The operator identity.
    pub id: String,
    /// The amount currently staked.
    pub stake: u128,
}

/// Capability interface over an on-chain or in-memory staking registry.
pub trait StakeMonitor {
    /// Whether `address` staked enough to become a group member.
    fn has_minimum_stake(&self, address: &str) -> GjkrResult<bool>;

    /// The staking record of `address`.
    fn staker_for(&self, address: &str) -> GjkrResult<Staker>;
}

/// An in-memory [`StakeMonitor`] for tests and local deployments.
#[derive(Clone, Debug)]
pub struct LocalStakeMonitor {
    minimum_stake: u128,
    stakes: BTreeMap<String, u128>,
}

impl Default for LocalStakeMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStakeMonitor {
    /// A monitor requiring [`LOCAL_MINIMUM_STAKE`].
    pub fn new() -> Self {
        Self::with_minimum_stake(LOCAL_MINIMUM_STAKE)
    }

    /// A monitor requiring `minimum_stake`.
    pub fn with_minimum_stake(minimum_stake: u128) -> Self {
        Self {
            minimum_stake,
            stakes: BTreeMap::new(),
        }
    }

    /// Stake enough tokens for `address` to be eligible.
    pub fn stake_tokens(&mut self, address: &str) -> GjkrResult<()> {
        check_address(address)?;

        let stake = self.minimum_stake.saturating_mul(5);
        self.stakes.insert(address.to_string(), stake);

        Ok(())
    }

    /// Remove every token staked by `address`.
    pub fn unstake_tokens(&mut self, address: &str) -> GjkrResult<()> {
        check_address(address)?;

        self.stakes.remove(address);

        Ok(())
    }
}

impl StakeMonitor for LocalStakeMonitor {
    fn has_minimum_stake(&self, address: &str) -> GjkrResult<bool> {
        check_address(address)?;

        Ok(self
            .stakes
            .get(address)
            .is_some_and(|stake| *stake >= self.minimum_stake))
    }

    fn staker_for(&self, address: &str) -> GjkrResult<Staker> {
        check_address(address)?;

        Ok(Staker {
            id: address.to_string(),
            stake: self.stakes.get(address).copied().unwrap_or_default(),
        })
    }
}

/// Accept `0x`-prefixed, 20-byte hex addresses.
fn check_address(address: &str) -> GjkrResult<()> {
    let valid = address
        .strip_prefix("0x")
        .and_then(|digits| hex::decode(digits).ok())
        .is_some_and(|bytes| bytes.len() == 20);

    if !valid {
        return Err(Error::InvalidAddress(address.to_string()));
    }

    Ok(())
}
