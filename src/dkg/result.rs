//! Aggregation of the per-phase verdicts into the outcome of a session.

use ark_ff::Zero;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use tracing::{debug, info, warn};

use crate::ciphersuite::CipherSuite;
use crate::dkg::accusation::{AccusationResolver, DisputeRound, RoundVerdict};
use crate::dkg::transcript::Transcript;
use crate::error::GjkrResult;
use crate::keys::{GroupKey, IndividualVerifyingKey};
use crate::member::{MemberId, Roster};
use crate::parameters::ThresholdParameters;
use crate::serialization::impl_serialization_traits;
use crate::utils::{BTreeSet, Vec};

/// The outcome of a distributed key generation session.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct DkgResult<C: CipherSuite> {
    /// Whether enough members remained qualified.
    pub success: bool,
    /// The group public key, set if and only if the session succeeded.
    pub group_public_key: Option<GroupKey<C>>,
    /// The members that completed every phase honestly.
    pub qualified: BTreeSet<MemberId>,
    /// Members proven to have cheated.
    pub disqualified: BTreeSet<MemberId>,
    /// Members that failed to publish an expected message in time.
    pub inactive: BTreeSet<MemberId>,
}

impl_serialization_traits!(DkgResult<CipherSuite>);

impl<C: CipherSuite> DkgResult<C> {
    /// The public verification share of a qualified member, computed from the
    /// public key share points of the qualified set.
    pub fn verifying_key(
        &self,
        transcript: &Transcript<C>,
        index: MemberId,
    ) -> Option<IndividualVerifyingKey<C>> {
        if !self.success || !self.qualified.contains(&index) {
            return None;
        }

        let points = self
            .qualified
            .iter()
            .map(|id| transcript.points(*id))
            .collect::<Option<Vec<_>>>()?;

        Some(IndividualVerifyingKey::generate_from_points(index, points))
    }
}

/// Tracks which members are still in play as the phases close.
///
/// A member leaves play either as inactive or as disqualified and never comes
/// back; disqualification overrides a previous inactivity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultAggregator {
    members: BTreeSet<MemberId>,
    disqualified: BTreeSet<MemberId>,
    inactive: BTreeSet<MemberId>,
}

impl ResultAggregator {
    /// An aggregator with every member of `roster` in play.
    pub fn new(roster: &Roster) -> Self {
        Self {
            members: roster.id_set(),
            disqualified: BTreeSet::new(),
            inactive: BTreeSet::new(),
        }
    }

    /// Recompute the whole outcome of a session from its transcript, as an
    /// observer that did not take part in it.
    pub fn audit<C: CipherSuite>(
        parameters: &ThresholdParameters<C>,
        roster: &Roster,
        transcript: &Transcript<C>,
    ) -> GjkrResult<DkgResult<C>> {
        roster.check_parameters(parameters)?;

        let mut aggregator = Self::new(roster);
        aggregator.close_key_exchange(transcript);
        aggregator.close_sharing(transcript);
        aggregator.close_shares_resolution(transcript);
        aggregator.close_points_sharing(transcript);
        aggregator.close_points_resolution(transcript);

        Ok(aggregator.finish(parameters, transcript))
    }

    /// The members neither inactive nor disqualified.
    pub fn in_play(&self) -> BTreeSet<MemberId> {
        self.members
            .iter()
            .filter(|id| !self.disqualified.contains(*id) && !self.inactive.contains(*id))
            .copied()
            .collect()
    }

    /// Members proven to have cheated so far.
    pub fn disqualified(&self) -> &BTreeSet<MemberId> {
        &self.disqualified
    }

    /// Members found inactive so far.
    pub fn inactive(&self) -> &BTreeSet<MemberId> {
        &self.inactive
    }

    /// Members in play that did not publish an ephemeral key for every other
    /// member become inactive.
    pub fn close_key_exchange<C: CipherSuite>(&mut self, transcript: &Transcript<C>) {
        let missing = self
            .in_play()
            .into_iter()
            .filter(|id| !transcript.has_all_ephemeral_keys(*id));

        self.mark_inactive("key exchange", missing.collect());
    }

    /// Members in play that did not publish their commitments become
    /// inactive. Missing shares are left to the accusations.
    pub fn close_sharing<C: CipherSuite>(&mut self, transcript: &Transcript<C>) {
        let missing = self
            .in_play()
            .into_iter()
            .filter(|id| transcript.commitments(*id).is_none());

        self.mark_inactive("sharing", missing.collect());
    }

    /// Resolve the accusations against the commitments.
    pub fn close_shares_resolution<C: CipherSuite>(&mut self, transcript: &Transcript<C>) {
        self.close_resolution(DisputeRound::SecretShares, transcript);
    }

    /// Members in play that did not publish their public key share points
    /// become inactive.
    pub fn close_points_sharing<C: CipherSuite>(&mut self, transcript: &Transcript<C>) {
        let missing = self
            .in_play()
            .into_iter()
            .filter(|id| transcript.points(*id).is_none());

        self.mark_inactive("points sharing", missing.collect());
    }

    /// Resolve the accusations against the public key share points.
    pub fn close_points_resolution<C: CipherSuite>(&mut self, transcript: &Transcript<C>) {
        self.close_resolution(DisputeRound::PublicKeySharePoints, transcript);
    }

    /// Produce the outcome of the session from the members left in play.
    ///
    /// The group public key is \\( \sum_{i \in QUAL} A_{i0} \\).
    pub fn finish<C: CipherSuite>(
        &self,
        parameters: &ThresholdParameters<C>,
        transcript: &Transcript<C>,
    ) -> DkgResult<C> {
        let qualified = self.in_play();
        let success = qualified.len() >= parameters.quorum as usize;

        let group_public_key = if success {
            qualified
                .iter()
                .map(|id| transcript.points(*id).and_then(|points| points.first()))
                .try_fold(C::G::zero(), |acc, point| point.map(|p| acc + p))
                .map(GroupKey::new)
        } else {
            None
        };

        // Qualified members always published their points.
        let success = success && group_public_key.is_some();

        info!(
            success,
            qualified = qualified.len(),
            disqualified = self.disqualified.len(),
            inactive = self.inactive.len(),
            quorum = parameters.quorum,
            "distributed key generation finished"
        );

        DkgResult {
            success,
            group_public_key,
            qualified,
            disqualified: self.disqualified.clone(),
            inactive: self.inactive.clone(),
        }
    }

    fn close_resolution<C: CipherSuite>(&mut self, round: DisputeRound, transcript: &Transcript<C>) {
        let RoundVerdict {
            disqualified,
            inactive,
        } = AccusationResolver::new(transcript).resolve(round, &self.in_play());

        self.mark_inactive("resolution", inactive);
        self.mark_disqualified(disqualified);
    }

    fn mark_inactive(&mut self, phase: &str, members: BTreeSet<MemberId>) {
        for id in members {
            if self.disqualified.contains(&id) {
                continue;
            }

            debug!(member = %id, phase, "member inactive");
            self.inactive.insert(id);
        }
    }

    fn mark_disqualified(&mut self, members: BTreeSet<MemberId>) {
        for id in members {
            warn!(member = %id, "member disqualified");
            self.inactive.remove(&id);
            self.disqualified.insert(id);
        }
    }
}
