//! Resolution of the accusations published after each verification round.
//!
//! Both dispute rounds are settled the same way. For every accusation between
//! two members still in play, either party may reveal its ephemeral private
//! key for their pairwise channel. Any member can then check the revealed key
//! against the published ephemeral public key, recompute the channel key,
//! decrypt the disputed shares from the transcript and run the share check
//! again. The outcome only depends on the transcript.

use core::fmt;

use tracing::{debug, warn};

use crate::ciphersuite::CipherSuite;
use crate::dkg::message::EphemeralKeyRevealMessage;
use crate::dkg::secret_share::SecretShare;
use crate::dkg::transcript::Transcript;
use crate::error::{Error, GjkrResult};
use crate::keys::SymmetricKey;
use crate::member::MemberId;
use crate::utils::BTreeSet;

/// The two verification rounds whose accusations are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DisputeRound {
    /// Shares checked against the Pedersen commitments.
    SecretShares,
    /// Shares checked against the public key share points.
    PublicKeySharePoints,
}

impl fmt::Display for DisputeRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisputeRound::SecretShares => f.write_str("secret shares"),
            DisputeRound::PublicKeySharePoints => f.write_str("public key share points"),
        }
    }
}

/// The members a dispute round removed from play. The two sets are disjoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundVerdict {
    /// Members proven to have cheated.
    pub disqualified: BTreeSet<MemberId>,
    /// Members that failed to take part in the round.
    pub inactive: BTreeSet<MemberId>,
}

/// Settles the disputes of one round from a transcript.
#[derive(Debug)]
pub struct AccusationResolver<'a, C: CipherSuite> {
    transcript: &'a Transcript<C>,
    pedersen_generator: C::G,
}

impl<'a, C: CipherSuite> AccusationResolver<'a, C> {
    /// A resolver reading from `transcript`.
    pub fn new(transcript: &'a Transcript<C>) -> Self {
        Self {
            transcript,
            pedersen_generator: C::pedersen_generator(),
        }
    }

    /// Resolve the accusations of `round` among the members of `in_play`.
    ///
    /// Members of `in_play` that published no accusations message are
    /// inactive. For each dispute:
    ///  * a revealed key not matching its published public key disqualifies
    ///    whoever revealed it;
    ///  * with a matching key, the accused is disqualified if its shares to
    ///    the accuser are missing, do not decrypt or do not verify, and the
    ///    accuser is disqualified otherwise;
    ///  * without any reveal, the accuser is inactive.
    ///
    /// Disqualification takes precedence over inactivity.
    pub fn resolve(&self, round: DisputeRound, in_play: &BTreeSet<MemberId>) -> RoundVerdict {
        let mut verdict = RoundVerdict::default();

        for id in in_play {
            if self.transcript.accusations(round, *id).is_none() {
                debug!(member = %id, %round, "no accusations message");
                verdict.inactive.insert(*id);
            }
        }

        for (accuser, accused) in self.transcript.disputes(round, in_play) {
            debug!(%accuser, %accused, %round, "resolving accusation");
            self.settle(round, accuser, accused, &mut verdict);
        }

        verdict
            .inactive
            .retain(|id| !verdict.disqualified.contains(id));

        verdict
    }

    fn settle(
        &self,
        round: DisputeRound,
        accuser: MemberId,
        accused: MemberId,
        verdict: &mut RoundVerdict,
    ) {
        let mut channel_key = None;
        let mut revealed = false;

        for (sender, counterpart) in [(accuser, accused), (accused, accuser)] {
            let Some(reveal) = self.transcript.reveal(round, sender, counterpart) else {
                continue;
            };
            revealed = true;

            match self.recover_key(reveal) {
                Ok(key) => {
                    channel_key.get_or_insert(key);
                }
                Err(_) => {
                    warn!(member = %sender, %round, "revealed key does not match, disqualifying");
                    verdict.disqualified.insert(sender);
                }
            }
        }

        match channel_key {
            Some(key) => match check_peer_share(
                self.transcript,
                round,
                accused,
                accuser,
                &key,
                &self.pedersen_generator,
            ) {
                Ok(_) => {
                    warn!(%accuser, %accused, %round, "false accusation, disqualifying accuser");
                    verdict.disqualified.insert(accuser);
                }
                Err(e) => {
                    warn!(%accuser, %accused, %round, error = %e, "accusation upheld, disqualifying accused");
                    verdict.disqualified.insert(accused);
                }
            },
            None if !revealed => {
                debug!(%accuser, %accused, %round, "no key revealed for the dispute");
                verdict.inactive.insert(accuser);
            }
            None => {}
        }
    }

    fn recover_key(&self, reveal: &EphemeralKeyRevealMessage<C>) -> GjkrResult<SymmetricKey<C>> {
        // Members in play published every ephemeral key.
        let published = self
            .transcript
            .ephemeral_key(reveal.sender, reveal.counterpart)
            .ok_or(Error::InvalidRevealedKey(reveal.sender))?;
        let counterpart_key = self
            .transcript
            .ephemeral_key(reveal.counterpart, reveal.sender)
            .ok_or(Error::InvalidRevealedKey(reveal.sender))?;

        reveal.symmetric_key(published, counterpart_key)
    }
}

/// Decrypt the shares `sender` published for `receiver` and check them for
/// the given round. Every error is a fault of `sender`.
pub(crate) fn check_peer_share<C: CipherSuite>(
    transcript: &Transcript<C>,
    round: DisputeRound,
    sender: MemberId,
    receiver: MemberId,
    key: &SymmetricKey<C>,
    pedersen_generator: &C::G,
) -> GjkrResult<SecretShare<C>> {
    let share = transcript
        .peer_shares(sender, receiver)
        .ok_or(Error::MissingShares)?
        .decrypt(key)?;

    match round {
        DisputeRound::SecretShares => share.verify(
            transcript
                .commitments(sender)
                .ok_or(Error::ShareVerificationError)?,
            pedersen_generator,
        )?,
        DisputeRound::PublicKeySharePoints => share.verify_points(
            transcript
                .points(sender)
                .ok_or(Error::PointsVerificationError)?,
        )?,
    }

    Ok(share)
}
