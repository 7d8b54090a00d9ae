//!
// -*- mode: rust; -*-
//
// This file is part of gjkr-dkg.
// Copyright (c) 2017-2019 isis lovecruft
// Copyright (c) 2021-2023 Toposware Inc.
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Toposware developers <dev@toposware.com>

//! This library provides a Rust implementation of the **GJKR** distributed key
//! generation protocol (Gennaro, Jarecki, Krawczyk and Rabin), as used to form
//! threshold signing groups out of a fixed set of staking operators.
//!
//! A fixed set of `n` members jointly derive a group public key together with
//! one secret key share per member, such that any `t` qualified members can
//! later act on behalf of the group, while no member ever learns the group
//! secret. Shares are dealt with Pedersen verifiable secret sharing, every
//! member can accuse the dealers of invalid shares, and accusations are
//! settled publicly from the session transcript: absent members end up
//! *inactive*, cheating ones *disqualified*, and the session succeeds when at
//! least `quorum` members remain qualified.
//!
//! # Usage
//!
//! Alice, Bob, and Carol would like to set up a threshold group in which any
//! two of them can act together.
//!
//! For this, they need to define a [`CipherSuite`] to be used in the session.
//! This CipherSuite is used to parameterize the protocol over an arbitrary
//! curve backend, with an arbitrary authenticated cipher for the peer-to-peer
//! shares and an arbitrary hasher for deriving the second Pedersen generator.
//! The following example creates a CipherSuite over the Secp256k1 curve, with
//! SHA-256 and AES-128-GCM.
//!
//! ```rust
//! use gjkr_dkg::CipherSuite;
//! use sha2::Sha256;
//! use zeroize::Zeroize;
//! use ark_secp256k1::Projective as G;
//!
//! #[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Zeroize)]
//! pub struct Secp256k1Sha256;
//!
//! impl CipherSuite for Secp256k1Sha256 {
//!     type G = G;
//!
//!     type InnerHasher = Sha256;
//!
//!     type Cipher = aes_gcm::Aes128Gcm;
//!
//!     fn context_string() -> String {
//!         "GJKR_SECP256K1_SHA256".to_owned()
//!     }
//! }
//! ```
//!
//! We will use the `Secp256k1Sha256` as CipherSuite for all the following examples.
//!
//! ## Admission
//!
//! Before the session starts, the candidates holding enough stake are admitted
//! into a [`Roster`](member::Roster), which assigns them the member
//! identifiers `1..=n`. The session parameters must match the roster size.
//!
//! ```rust
//! # use gjkr_dkg::testing::Secp256k1Sha256;
//! use gjkr_dkg::eligibility::LocalStakeMonitor;
//! use gjkr_dkg::member::Roster;
//! use gjkr_dkg::parameters::ThresholdParameters;
//! # use gjkr_dkg::GjkrResult;
//! #
//! # fn do_test() -> GjkrResult<()> {
//! let alice = "0x1111111111111111111111111111111111111111";
//! let bob = "0x2222222222222222222222222222222222222222";
//! let carol = "0x3333333333333333333333333333333333333333";
//! let dave = "0x4444444444444444444444444444444444444444";
//!
//! let mut monitor = LocalStakeMonitor::new();
//! monitor.stake_tokens(alice)?;
//! monitor.stake_tokens(bob)?;
//! monitor.stake_tokens(carol)?;
//!
//! // Dave did not stake and is left out.
//! let roster = Roster::admit([alice, bob, carol, dave], &monitor)?;
//! let params = ThresholdParameters::<Secp256k1Sha256>::new(3, 2, 3)?;
//! roster.check_parameters(&params)?;
//! # Ok(()) } fn main() { assert!(do_test().is_ok()); }
//! ```
//!
//! ## Distributed Key Generation
//!
//! Each member runs a [`Member`](dkg::Member) state machine. Every
//! transition reads the session [`Transcript`](dkg::Transcript), which holds
//! every message broadcast so far, and returns the messages the member must
//! broadcast next. In a deployment, each member keeps its own transcript fed
//! by a [`BroadcastChannel`](dkg::BroadcastChannel), and a
//! [`DkgSession`](dkg::DkgSession) takes care of the barriers and deadlines
//! between phases. Here, the three members share a single transcript and move
//! in lockstep.
//!
//! ```rust
//! # use gjkr_dkg::testing::Secp256k1Sha256;
//! use gjkr_dkg::dkg::{Message, Member, Phase, ResultAggregator, Transcript};
//! # use gjkr_dkg::member::Roster;
//! # use gjkr_dkg::parameters::ThresholdParameters;
//! # use gjkr_dkg::GjkrResult;
//! use rand::rngs::OsRng;
//!
//! # fn do_test() -> GjkrResult<()> {
//! # let roster = Roster::new([
//! #     "0x1111111111111111111111111111111111111111",
//! #     "0x2222222222222222222222222222222222222222",
//! #     "0x3333333333333333333333333333333333333333",
//! # ])?;
//! # let params = ThresholdParameters::<Secp256k1Sha256>::new(3, 2, 3)?;
//! let mut rng = OsRng;
//! let mut transcript = Transcript::new(&params, &roster)?;
//!
//! fn publish(
//!     transcript: &mut Transcript<Secp256k1Sha256>,
//!     messages: Vec<Message<Secp256k1Sha256>>,
//! ) -> GjkrResult<()> {
//!     for message in messages {
//!         transcript.record(message)?;
//!     }
//!     Ok(())
//! }
//!
//! // Every member publishes one ephemeral public key per peer.
//! let mut members = Vec::new();
//! let mut outbox = Vec::new();
//! for index in roster.ids() {
//!     let (member, messages) = Member::new(&params, &roster, index, &mut rng)?;
//!     members.push(member);
//!     outbox.extend(messages);
//! }
//! publish(&mut transcript, outbox)?;
//!
//! // Commitments and encrypted shares.
//! transcript.advance_to(Phase::Sharing);
//! let mut sharing = Vec::new();
//! let mut outbox = Vec::new();
//! for member in members {
//!     let (member, messages) = member.to_sharing(&transcript, &mut rng)?;
//!     sharing.push(member);
//!     outbox.extend(messages);
//! }
//! publish(&mut transcript, outbox)?;
//!
//! // Share verification and accusations, then key disclosure for disputes.
//! transcript.advance_to(Phase::SharesAccusation);
//! let mut justifying = Vec::new();
//! let mut outbox = Vec::new();
//! for member in sharing {
//!     let (member, message) = member.to_shares_justification(&transcript)?;
//!     justifying.push(member);
//!     outbox.push(message);
//! }
//! publish(&mut transcript, outbox)?;
//!
//! transcript.advance_to(Phase::SharesResolution);
//! let outbox = justifying
//!     .iter_mut()
//!     .flat_map(|member| member.reveal_disputed_keys(&transcript))
//!     .collect();
//! publish(&mut transcript, outbox)?;
//!
//! // Public key share points.
//! transcript.advance_to(Phase::PointsSharing);
//! let mut points = Vec::new();
//! let mut outbox = Vec::new();
//! for member in justifying {
//!     let (member, message) = member.to_points_sharing(&transcript)?;
//!     points.push(member);
//!     outbox.push(message);
//! }
//! publish(&mut transcript, outbox)?;
//!
//! // Points verification and accusations, then key disclosure for disputes.
//! transcript.advance_to(Phase::PointsAccusation);
//! let mut justifying = Vec::new();
//! let mut outbox = Vec::new();
//! for member in points {
//!     let (member, message) = member.to_points_justification(&transcript)?;
//!     justifying.push(member);
//!     outbox.push(message);
//! }
//! publish(&mut transcript, outbox)?;
//!
//! transcript.advance_to(Phase::PointsResolution);
//! let outbox = justifying
//!     .iter_mut()
//!     .flat_map(|member| member.reveal_disputed_keys(&transcript))
//!     .collect();
//! publish(&mut transcript, outbox)?;
//!
//! let mut results = Vec::new();
//! for member in justifying {
//!     let (result, signing_key) = member.finish(&transcript)?;
//!     assert!(signing_key.is_some());
//!     results.push(result);
//! }
//!
//! assert!(results[0].success);
//! assert!(results[0].group_public_key.is_some());
//! assert!(results.iter().all(|result| result == &results[0]));
//!
//! // Anyone holding the transcript reaches the same verdict.
//! assert_eq!(ResultAggregator::audit(&params, &roster, &transcript)?, results[0]);
//! # Ok(()) } fn main() { assert!(do_test().is_ok()); }
//! ```
//!
//! ## Disputes
//!
//! A member that cannot decrypt or verify the shares a peer sent it accuses
//! that peer. Both parties of a dispute then disclose their ephemeral private
//! key for that one channel, which lets every member decrypt the disputed
//! shares from the transcript and check them again: a valid share gets the
//! accuser disqualified, an invalid or missing one the accused. A member that
//! stays silent when it is expected to publish something becomes inactive.
//!
//! Inactive and disqualified members are left out of the qualified set, whose
//! public key share points add up to the group public key.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(future_incompatible)]
#![allow(clippy::type_complexity)]

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

mod error;
pub use error::{Error, GjkrResult};

mod serialization;
pub use serialization::{FromBytes, ToBytes};

/// A module defining the different key types used by a GJKR session.
pub mod keys;
pub use keys::{GroupKey, IndividualSigningKey, IndividualVerifyingKey};

/// A module defining the [`ThresholdParameters`](crate::parameters::ThresholdParameters) type used by a GJKR session.
pub mod parameters;

mod ciphersuite;
pub use ciphersuite::CipherSuite;

pub(crate) mod utils;

/// A module defining member identifiers and the session roster.
pub mod member;

/// A module defining the stake oracle consulted when admitting members.
pub mod eligibility;

/// A module defining the logic of a GJKR distributed key generation session.
pub mod dkg;

/// This module provides a concrete implementation of a GJKR CipherSuite over Secp256k1,
/// with SHA-256 as underlying base hash function and AES-128-GCM as share cipher.
/// It is made available for testing and benchmarking purposes.
pub mod testing {
    use super::*;

    use ark_secp256k1::Projective as G;

    use sha2::Sha256;
    use utils::{String, ToString};

    use zeroize::Zeroize;

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Zeroize)]
    /// An example instance of GJKR over Secp256k1 with SHA-256 as underlying hasher.
    pub struct Secp256k1Sha256;

    impl CipherSuite for Secp256k1Sha256 {
        type G = G;

        type InnerHasher = Sha256;

        type Cipher = aes_gcm::Aes128Gcm;

        fn context_string() -> String {
            "GJKR_SECP256K1_SHA256".to_string()
        }
    }
}
