//! The state machine of a single member of a GJKR distributed key generation
//! session.
//!
//! Every transition takes the session [`Transcript`] as input, closes the
//! phase that just ended for this member and returns the messages to
//! broadcast for the next one. Transitions never fail because of other
//! members: their faults are recorded as inactivity or disqualification and
//! eventually show up in the [`DkgResult`].

use rand::{CryptoRng, RngCore};
use tracing::{debug, info, warn};

use crate::ciphersuite::CipherSuite;
use crate::dkg::accusation::{check_peer_share, DisputeRound};
use crate::dkg::message::{
    EphemeralKeyRevealMessage, EphemeralPublicKeyMessage, MemberCommitmentsMessage,
    MemberPublicKeySharePointsMessage, PointsAccusationsMessage, SecretSharesAccusationsMessage,
};
use crate::dkg::result::{DkgResult, ResultAggregator};
use crate::dkg::round_types::{
    DkgState, KeyExchange, PointsJustification, PointsSharing, Sharing, SharesJustification,
};
use crate::dkg::secret_share::{SecretPolynomials, SecretShare};
use crate::dkg::transcript::{Message, Transcript};
use crate::error::{Error, GjkrResult};
use crate::keys::{EphemeralKeyPair, IndividualSigningKey, SymmetricKey};
use crate::member::{MemberId, Roster};
use crate::parameters::ThresholdParameters;
use crate::utils::{BTreeMap, BTreeSet, Box, Scalar, Vec};

use ark_ff::Zero;

/// State machine structures for holding intermediate values during a
/// distributed key generation protocol run, to prevent misuse.
#[derive(Clone, Debug)]
pub struct Member<S: DkgState, C: CipherSuite> {
    state: Box<ActualState<C>>,
    data: S,
}

/// Shared state which occurs across all phases of a session.
#[derive(Clone, Debug)]
struct ActualState<C: CipherSuite> {
    /// The parameters for this session.
    parameters: ThresholdParameters<C>,
    /// The identifier of this member.
    index: MemberId,
    /// One ephemeral key pair per peer.
    ephemeral_keys: BTreeMap<MemberId, EphemeralKeyPair<C>>,
    /// The secret polynomials of this member.
    polynomials: SecretPolynomials<C>,
    /// The secondary Pedersen generator.
    pedersen_generator: C::G,
    /// Inactivity and disqualification as seen so far.
    aggregator: ResultAggregator,
    /// The verified shares received from members still in play, including
    /// the one this member computed for itself.
    received_shares: BTreeMap<MemberId, SecretShare<C>>,
    /// The channels whose ephemeral key was already disclosed.
    revealed: BTreeSet<(DisputeRound, MemberId)>,
}

impl<S: DkgState, C: CipherSuite> Member<S, C> {
    /// The identifier of this member.
    pub fn index(&self) -> MemberId {
        self.state.index
    }

    /// The parameters of the session.
    pub fn parameters(&self) -> &ThresholdParameters<C> {
        &self.state.parameters
    }

    /// The members this member still considers neither inactive nor
    /// disqualified.
    pub fn in_play(&self) -> BTreeSet<MemberId> {
        self.state.aggregator.in_play()
    }

    fn peers_in_play(&self) -> Vec<MemberId> {
        self.in_play()
            .into_iter()
            .filter(|id| *id != self.state.index)
            .collect()
    }

    fn channel_key(&self, peer: MemberId, transcript: &Transcript<C>) -> GjkrResult<SymmetricKey<C>> {
        let pair = self
            .state
            .ephemeral_keys
            .get(&peer)
            .ok_or(Error::UnknownMember(peer))?;
        let their_key = transcript
            .ephemeral_key(peer, self.state.index)
            .ok_or(Error::UnknownMember(peer))?;

        pair.private_key.derive_symmetric_key(their_key)
    }

    fn transition<T: DkgState>(self, data: T) -> Member<T, C> {
        Member {
            state: self.state,
            data,
        }
    }
}

impl<C: CipherSuite> Member<KeyExchange, C> {
    /// Join a session as member `index` of `roster`.
    ///
    /// This samples the member's secret polynomials and one ephemeral key pair
    /// per peer.
    ///
    /// # Returns
    ///
    /// The member state machine, along with one [`Message::EphemeralPublicKey`]
    /// per peer, to be broadcast.
    pub fn new(
        parameters: &ThresholdParameters<C>,
        roster: &Roster,
        index: MemberId,
        mut rng: impl RngCore + CryptoRng,
    ) -> GjkrResult<(Self, Vec<Message<C>>)> {
        roster.check_parameters(parameters)?;

        if !roster.contains(index) {
            return Err(Error::UnknownMember(index));
        }

        let mut ephemeral_keys = BTreeMap::new();
        let mut messages = Vec::with_capacity(roster.len() - 1);

        for peer in roster.ids().filter(|id| *id != index) {
            let pair = EphemeralKeyPair::generate(&mut rng);
            messages.push(Message::EphemeralPublicKey(EphemeralPublicKeyMessage {
                sender: index,
                receiver: peer,
                ephemeral_public_key: pair.public_key,
            }));
            ephemeral_keys.insert(peer, pair);
        }

        info!(
            member = %index,
            n = parameters.n,
            t = parameters.t,
            quorum = parameters.quorum,
            "joining distributed key generation"
        );

        let state = ActualState {
            parameters: *parameters,
            index,
            ephemeral_keys,
            polynomials: SecretPolynomials::generate(parameters, &mut rng),
            pedersen_generator: C::pedersen_generator(),
            aggregator: ResultAggregator::new(roster),
            received_shares: BTreeMap::new(),
            revealed: BTreeSet::new(),
        };

        Ok((
            Member {
                state: Box::new(state),
                data: KeyExchange {},
            },
            messages,
        ))
    }

    /// Close the key exchange and publish the commitments together with one
    /// encrypted pair of shares per peer still in play.
    #[allow(clippy::wrong_self_convention)]
    pub fn to_sharing(
        mut self,
        transcript: &Transcript<C>,
        mut rng: impl RngCore + CryptoRng,
    ) -> GjkrResult<(Member<Sharing, C>, Vec<Message<C>>)> {
        self.state.aggregator.close_key_exchange(transcript);

        let index = self.state.index;
        let commitments = self
            .state
            .polynomials
            .commitments(&self.state.pedersen_generator);
        let mut messages = vec![Message::Commitments(MemberCommitmentsMessage {
            sender: index,
            commitments,
        })];

        for peer in self.peers_in_play() {
            let key = self.channel_key(peer, transcript)?;
            let share = self.state.polynomials.share_for(index, peer);
            messages.push(Message::PeerShares(share.encrypt(&key, &mut rng)?));
        }

        let own_share = self.state.polynomials.share_for(index, index);
        self.state.received_shares.insert(index, own_share);

        info!(member = %index, in_play = self.in_play().len(), "key exchange closed");

        Ok((self.transition(Sharing {}), messages))
    }
}

impl<C: CipherSuite> Member<Sharing, C> {
    /// Close the sharing phase: decrypt and verify the shares received from
    /// every peer still in play against its commitments, and accuse the
    /// senders of missing, undecryptable or invalid shares.
    #[allow(clippy::wrong_self_convention)]
    pub fn to_shares_justification(
        mut self,
        transcript: &Transcript<C>,
    ) -> GjkrResult<(Member<SharesJustification, C>, Message<C>)> {
        self.state.aggregator.close_sharing(transcript);

        let index = self.state.index;
        let mut accused = BTreeSet::new();

        for peer in self.peers_in_play() {
            let checked = self.channel_key(peer, transcript).and_then(|key| {
                check_peer_share(
                    transcript,
                    DisputeRound::SecretShares,
                    peer,
                    index,
                    &key,
                    &self.state.pedersen_generator,
                )
            });

            match checked {
                Ok(share) => {
                    self.state.received_shares.insert(peer, share);
                }
                Err(e) => {
                    debug!(member = %index, accused = %peer, error = %e, "accusing share sender");
                    accused.insert(peer);
                }
            }
        }

        info!(member = %index, accused = accused.len(), "shares verified");

        let message =
            Message::SecretSharesAccusations(SecretSharesAccusationsMessage { sender: index, accused });

        Ok((self.transition(SharesJustification {}), message))
    }
}

impl<C: CipherSuite> Member<SharesJustification, C> {
    /// Disclose the ephemeral private key of every disputed channel this
    /// member is part of, either as accuser or as accused.
    ///
    /// Each key is disclosed at most once, so calling this again only returns
    /// the keys of disputes recorded since.
    pub fn reveal_disputed_keys(&mut self, transcript: &Transcript<C>) -> Vec<Message<C>> {
        self.reveal(DisputeRound::SecretShares, transcript)
    }

    /// Settle the share disputes and publish the public key share points.
    #[allow(clippy::wrong_self_convention)]
    pub fn to_points_sharing(
        mut self,
        transcript: &Transcript<C>,
    ) -> GjkrResult<(Member<PointsSharing, C>, Message<C>)> {
        self.state.aggregator.close_shares_resolution(transcript);

        let in_play = self.in_play();
        self.state
            .received_shares
            .retain(|id, _| in_play.contains(id));

        info!(member = %self.state.index, in_play = in_play.len(), "share disputes resolved");

        let message = Message::PublicKeySharePoints(MemberPublicKeySharePointsMessage {
            sender: self.state.index,
            points: self.state.polynomials.public_key_share_points(),
        });

        Ok((self.transition(PointsSharing {}), message))
    }
}

impl<C: CipherSuite> Member<PointsSharing, C> {
    /// Close the points sharing phase: check the share received from every
    /// peer still in play against its public key share points and accuse on
    /// mismatch.
    #[allow(clippy::wrong_self_convention)]
    pub fn to_points_justification(
        mut self,
        transcript: &Transcript<C>,
    ) -> GjkrResult<(Member<PointsJustification, C>, Message<C>)> {
        self.state.aggregator.close_points_sharing(transcript);

        let index = self.state.index;
        let mut accused = BTreeSet::new();

        for peer in self.peers_in_play() {
            let checked = match (self.state.received_shares.get(&peer), transcript.points(peer)) {
                (Some(share), Some(points)) => share.verify_points(points),
                (None, _) => Err(Error::MissingShares),
                (_, None) => Err(Error::PointsVerificationError),
            };

            if let Err(e) = checked {
                debug!(member = %index, accused = %peer, error = %e, "accusing points sender");
                accused.insert(peer);
            }
        }

        info!(member = %index, accused = accused.len(), "public key share points verified");

        let message = Message::PointsAccusations(PointsAccusationsMessage { sender: index, accused });

        Ok((self.transition(PointsJustification {}), message))
    }
}

impl<C: CipherSuite> Member<PointsJustification, C> {
    /// Disclose the ephemeral private key of every disputed channel this
    /// member is part of, either as accuser or as accused.
    pub fn reveal_disputed_keys(&mut self, transcript: &Transcript<C>) -> Vec<Message<C>> {
        self.reveal(DisputeRound::PublicKeySharePoints, transcript)
    }

    /// Settle the points disputes and compute the outcome of the session.
    ///
    /// # Returns
    ///
    /// The [`DkgResult`], along with this member's long-lived signing key
    /// \\( x_j = \sum_{i \in QUAL} s_{ij} \\) when the session succeeded and
    /// the member is qualified.
    pub fn finish(
        mut self,
        transcript: &Transcript<C>,
    ) -> GjkrResult<(DkgResult<C>, Option<IndividualSigningKey<C>>)> {
        self.state.aggregator.close_points_resolution(transcript);

        let result = self
            .state
            .aggregator
            .finish(&self.state.parameters, transcript);

        let signing_key = if result.success && result.qualified.contains(&self.state.index) {
            self.calculate_signing_key(&result.qualified)
        } else {
            None
        };

        self.state.received_shares.clear();

        Ok((result, signing_key))
    }

    fn calculate_signing_key(
        &self,
        qualified: &BTreeSet<MemberId>,
    ) -> Option<IndividualSigningKey<C>> {
        let mut key = Scalar::<C>::zero();

        for id in qualified {
            let Some(share) = self.state.received_shares.get(id) else {
                warn!(member = %self.state.index, missing = %id, "missing share of a qualified member");
                return None;
            };
            key += share.s;
        }

        Some(IndividualSigningKey {
            index: self.state.index,
            key,
        })
    }
}

impl<S: DkgState, C: CipherSuite> Member<S, C> {
    fn reveal(&mut self, round: DisputeRound, transcript: &Transcript<C>) -> Vec<Message<C>> {
        let index = self.state.index;
        let mut messages = Vec::new();

        for (accuser, accused) in transcript.disputes(round, &self.in_play()) {
            let counterpart = match (accuser == index, accused == index) {
                (true, _) => accused,
                (_, true) => accuser,
                _ => continue,
            };

            if !self.state.revealed.insert((round, counterpart)) {
                continue;
            }

            let Some(pair) = self.state.ephemeral_keys.get(&counterpart) else {
                continue;
            };

            warn!(member = %index, %counterpart, %round, "disclosing ephemeral key");

            let reveal = EphemeralKeyRevealMessage {
                sender: index,
                counterpart,
                private_key: pair.private_key.clone(),
            };

            messages.push(match round {
                DisputeRound::SecretShares => Message::SharesKeyReveal(reveal),
                DisputeRound::PublicKeySharePoints => Message::PointsKeyReveal(reveal),
            });
        }

        messages
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dkg::transcript::Phase;
    use crate::testing::Secp256k1Sha256;

    use ark_ec::{CurveGroup, Group};
    use ark_ff::Field;
    use ark_secp256k1::Fr;
    use rand::rngs::OsRng;

    type Suite = Secp256k1Sha256;
    type Outcome = (DkgResult<Suite>, Option<IndividualSigningKey<Suite>>);

    fn id(i: u32) -> MemberId {
        MemberId::new(i).unwrap()
    }

    fn roster(n: u32) -> Roster {
        Roster::new((1..=n).map(|i| format!("0x{:040x}", i))).unwrap()
    }

    /// Run every member except `absent` in lockstep over one shared
    /// transcript, passing each broadcast message through `intercept` first.
    fn simulate(
        params: &ThresholdParameters<Suite>,
        absent: &[u32],
        mut intercept: impl FnMut(Message<Suite>) -> Option<Message<Suite>>,
    ) -> (Transcript<Suite>, Vec<Outcome>) {
        let mut rng = OsRng;
        let roster = roster(params.n);
        let mut transcript = Transcript::new(params, &roster).unwrap();

        let mut publish = |transcript: &mut Transcript<Suite>, messages: Vec<Message<Suite>>| {
            for message in messages.into_iter().filter_map(&mut intercept) {
                let _ = transcript.record(message);
            }
        };

        let mut messages = Vec::new();
        let mut members = Vec::new();
        for i in roster.ids().filter(|id| !absent.contains(&id.get())) {
            let (member, sent) = Member::new(params, &roster, i, &mut rng).unwrap();
            members.push(member);
            messages.extend(sent);
        }
        publish(&mut transcript, messages);

        transcript.advance_to(Phase::Sharing);
        let mut messages = Vec::new();
        let mut sharing = Vec::new();
        for member in members {
            let (member, sent) = member.to_sharing(&transcript, &mut rng).unwrap();
            sharing.push(member);
            messages.extend(sent);
        }
        publish(&mut transcript, messages);

        transcript.advance_to(Phase::SharesAccusation);
        let mut messages = Vec::new();
        let mut justifying = Vec::new();
        for member in sharing {
            let (member, sent) = member.to_shares_justification(&transcript).unwrap();
            justifying.push(member);
            messages.push(sent);
        }
        publish(&mut transcript, messages);

        transcript.advance_to(Phase::SharesResolution);
        let messages = justifying
            .iter_mut()
            .flat_map(|member| member.reveal_disputed_keys(&transcript))
            .collect();
        publish(&mut transcript, messages);

        transcript.advance_to(Phase::PointsSharing);
        let mut messages = Vec::new();
        let mut points = Vec::new();
        for member in justifying {
            let (member, sent) = member.to_points_sharing(&transcript).unwrap();
            points.push(member);
            messages.push(sent);
        }
        publish(&mut transcript, messages);

        transcript.advance_to(Phase::PointsAccusation);
        let mut messages = Vec::new();
        let mut justifying = Vec::new();
        for member in points {
            let (member, sent) = member.to_points_justification(&transcript).unwrap();
            justifying.push(member);
            messages.push(sent);
        }
        publish(&mut transcript, messages);

        transcript.advance_to(Phase::PointsResolution);
        let messages = justifying
            .iter_mut()
            .flat_map(|member| member.reveal_disputed_keys(&transcript))
            .collect();
        publish(&mut transcript, messages);

        let outcomes = justifying
            .into_iter()
            .map(|member| member.finish(&transcript).unwrap())
            .collect();

        (transcript, outcomes)
    }

    fn set(members: &[u32]) -> BTreeSet<MemberId> {
        members.iter().copied().map(id).collect()
    }

    /// Interpolate the group secret from the signing keys of `signers`.
    fn reconstruct(signers: &[&IndividualSigningKey<Suite>]) -> Fr {
        signers
            .iter()
            .map(|signer| {
                let i = signer.index.to_scalar::<Suite>();
                let lambda = signers
                    .iter()
                    .filter(|other| other.index != signer.index)
                    .map(|other| {
                        let j = other.index.to_scalar::<Suite>();
                        j * (j - i).inverse().unwrap()
                    })
                    .product::<Fr>();
                lambda * signer.key
            })
            .sum()
    }

    fn check_keys(transcript: &Transcript<Suite>, outcomes: &[Outcome]) {
        let result = &outcomes[0].0;
        let group_key = result.group_public_key.unwrap();
        let keys: Vec<&IndividualSigningKey<Suite>> = outcomes
            .iter()
            .filter_map(|(_, key)| key.as_ref())
            .collect();

        assert_eq!(keys.len(), result.qualified.len());

        for key in &keys {
            assert_eq!(
                result.verifying_key(transcript, key.index()),
                Some(key.to_public())
            );
        }

        let t = transcript.parameters().t as usize;
        let secret = reconstruct(&keys[..t]);
        assert_eq!(
            (<Suite as CipherSuite>::G::generator() * secret).into_affine(),
            group_key.to_point().into_affine()
        );
    }

    #[test]
    fn member_rejects_unknown_index() {
        let params = ThresholdParameters::<Suite>::new(3, 2, 2).unwrap();

        assert!(matches!(
            Member::new(&params, &roster(3), id(4), OsRng),
            Err(Error::UnknownMember(_))
        ));
        assert!(matches!(
            Member::new(&params, &roster(4), id(1), OsRng),
            Err(Error::InvalidNumberOfMembers(4, 3))
        ));
    }

    #[test]
    fn single_member_keygen() {
        let params = ThresholdParameters::<Suite>::new(1, 1, 1).unwrap();
        let (transcript, outcomes) = simulate(&params, &[], Some);

        let (result, key) = &outcomes[0];
        assert!(result.success);
        assert_eq!(
            result.group_public_key.unwrap().to_point().into_affine(),
            (<Suite as CipherSuite>::G::generator() * key.as_ref().unwrap().key).into_affine()
        );
        check_keys(&transcript, &outcomes);
    }

    #[test]
    fn honest_session() {
        let params = ThresholdParameters::<Suite>::new(5, 3, 4).unwrap();
        let (transcript, outcomes) = simulate(&params, &[], Some);

        assert_eq!(outcomes.len(), 5);
        for (result, _) in &outcomes {
            assert_eq!(result, &outcomes[0].0);
        }

        let result = &outcomes[0].0;
        assert!(result.success);
        assert!(result.disqualified.is_empty());
        assert!(result.inactive.is_empty());
        assert_eq!(result.qualified, set(&[1, 2, 3, 4, 5]));

        let expected = (1..=5)
            .map(|i| transcript.points(id(i)).unwrap()[0])
            .sum::<<Suite as CipherSuite>::G>();
        assert_eq!(result.group_public_key, Some(crate::GroupKey::new(expected)));

        assert_eq!(
            &ResultAggregator::audit(&params, transcript.roster(), &transcript).unwrap(),
            result
        );

        check_keys(&transcript, &outcomes);
    }

    #[test]
    fn undecryptable_share_disqualifies_sender() {
        let params = ThresholdParameters::<Suite>::new(5, 3, 4).unwrap();
        let (transcript, outcomes) = simulate(&params, &[], |message| match message {
            Message::PeerShares(mut m) if m.sender == id(3) && m.receiver == id(1) => {
                let last = m.encrypted_share_s.len() - 1;
                m.encrypted_share_s[last] ^= 1;
                Some(Message::PeerShares(m))
            }
            other => Some(other),
        });

        let result = &outcomes[0].0;
        assert!(result.success);
        assert_eq!(result.disqualified, set(&[3]));
        assert!(result.inactive.is_empty());
        assert_eq!(result.qualified, set(&[1, 2, 4, 5]));

        // The disqualified member still computes the same verdict.
        assert_eq!(&outcomes[2].0, result);
        assert!(outcomes[2].1.is_none());

        check_keys(&transcript, &outcomes);
    }

    #[test]
    fn withheld_share_disqualifies_sender() {
        let params = ThresholdParameters::<Suite>::new(5, 3, 4).unwrap();
        let (transcript, outcomes) = simulate(&params, &[], |message| match message {
            Message::PeerShares(m) if m.sender == id(2) && m.receiver == id(5) => None,
            other => Some(other),
        });

        let result = &outcomes[0].0;
        assert!(result.success);
        assert_eq!(result.disqualified, set(&[2]));
        check_keys(&transcript, &outcomes);
    }

    #[test]
    fn false_accusation_disqualifies_accuser() {
        let params = ThresholdParameters::<Suite>::new(5, 3, 4).unwrap();
        let (transcript, outcomes) = simulate(&params, &[], |message| match message {
            Message::SecretSharesAccusations(mut m) if m.sender == id(2) => {
                m.accused.insert(id(4));
                Some(Message::SecretSharesAccusations(m))
            }
            other => Some(other),
        });

        let result = &outcomes[0].0;
        assert!(result.success);
        assert_eq!(result.disqualified, set(&[2]));
        assert!(result.inactive.is_empty());
        check_keys(&transcript, &outcomes);
    }

    #[test]
    fn inconsistent_points_disqualify_sender() {
        let params = ThresholdParameters::<Suite>::new(5, 3, 4).unwrap();
        let (transcript, outcomes) = simulate(&params, &[], |message| match message {
            Message::PublicKeySharePoints(mut m) if m.sender == id(5) => {
                m.points[1] += <Suite as CipherSuite>::G::generator();
                Some(Message::PublicKeySharePoints(m))
            }
            other => Some(other),
        });

        let result = &outcomes[0].0;
        assert!(result.success);
        assert_eq!(result.disqualified, set(&[5]));
        assert_eq!(result.qualified, set(&[1, 2, 3, 4]));
        check_keys(&transcript, &outcomes);
    }

    #[test]
    fn absent_members_fail_the_session() {
        let params = ThresholdParameters::<Suite>::new(5, 3, 4).unwrap();
        let (transcript, outcomes) = simulate(&params, &[4, 5], Some);

        assert_eq!(outcomes.len(), 3);
        for (result, key) in &outcomes {
            assert!(!result.success);
            assert!(result.group_public_key.is_none());
            assert_eq!(result.inactive, set(&[4, 5]));
            assert!(result.disqualified.is_empty());
            assert!(key.is_none());
        }

        assert_eq!(
            ResultAggregator::audit(&params, transcript.roster(), &transcript).unwrap(),
            outcomes[0].0
        );
    }

    #[test]
    fn keys_are_revealed_once() {
        let params = ThresholdParameters::<Suite>::new(3, 2, 2).unwrap();
        let roster = roster(3);
        let mut transcript = Transcript::new(&params, &roster).unwrap();
        let mut rng = OsRng;

        let mut members = Vec::new();
        for i in roster.ids() {
            let (member, sent) = Member::new(&params, &roster, i, &mut rng).unwrap();
            for message in sent {
                transcript.record(message).unwrap();
            }
            members.push(member);
        }

        transcript.advance_to(Phase::Sharing);
        let mut sharing = Vec::new();
        for member in members {
            let (member, sent) = member.to_sharing(&transcript, &mut rng).unwrap();
            for message in sent {
                transcript.record(message).unwrap();
            }
            sharing.push(member);
        }

        transcript.advance_to(Phase::SharesAccusation);
        let mut justifying = Vec::new();
        for member in sharing {
            let (member, sent) = member.to_shares_justification(&transcript).unwrap();
            let sent = match sent {
                Message::SecretSharesAccusations(mut m) if m.sender == id(1) => {
                    m.accused.insert(id(2));
                    Message::SecretSharesAccusations(m)
                }
                other => other,
            };
            transcript.record(sent).unwrap();
            justifying.push(member);
        }

        let first = justifying[0].reveal_disputed_keys(&transcript);
        assert_eq!(first.len(), 1);
        assert!(justifying[0].reveal_disputed_keys(&transcript).is_empty());
        assert_eq!(justifying[1].reveal_disputed_keys(&transcript).len(), 1);
        assert!(justifying[2].reveal_disputed_keys(&transcript).is_empty());
    }
}
