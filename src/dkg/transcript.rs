//! The phases of a session, the tagged union of every protocol message and the
//! append-only transcript of what each member published.
//!
//! The transcript is the only input of share dispute resolution and of the
//! final verdict, which makes both reproducible by any observer holding the
//! same messages.

use core::fmt;

use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use tracing::debug;

use crate::ciphersuite::CipherSuite;
use crate::dkg::accusation::DisputeRound;
use crate::dkg::message::{
    EphemeralKeyRevealMessage, EphemeralPublicKeyMessage, MemberCommitmentsMessage,
    MemberPublicKeySharePointsMessage, PeerSharesMessage, PointsAccusationsMessage,
    SecretSharesAccusationsMessage,
};
use crate::error::{Error, GjkrResult};
use crate::keys::EphemeralPublicKey;
use crate::member::{MemberId, Roster};
use crate::parameters::ThresholdParameters;
use crate::serialization::impl_serialization_traits;
use crate::utils::{BTreeMap, BTreeSet, Vec};

/// The phases of a session, in protocol order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Ephemeral public keys are exchanged for every ordered pair of members.
    KeyExchange,
    /// Commitments and encrypted peer shares are published.
    Sharing,
    /// Members publish who sent them shares that do not verify.
    SharesAccusation,
    /// Ephemeral keys of the disputed channels are revealed.
    SharesResolution,
    /// Public key share points are published.
    PointsSharing,
    /// Members publish who sent them points inconsistent with their share.
    PointsAccusation,
    /// Ephemeral keys of the disputed channels are revealed.
    PointsResolution,
}

impl Phase {
    /// Every phase, in protocol order.
    pub const ALL: [Phase; 7] = [
        Phase::KeyExchange,
        Phase::Sharing,
        Phase::SharesAccusation,
        Phase::SharesResolution,
        Phase::PointsSharing,
        Phase::PointsAccusation,
        Phase::PointsResolution,
    ];

    /// The phase following this one, if any.
    pub fn next(self) -> Option<Phase> {
        Self::ALL.get(self as usize + 1).copied()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::KeyExchange => "key exchange",
            Phase::Sharing => "sharing",
            Phase::SharesAccusation => "shares accusation",
            Phase::SharesResolution => "shares resolution",
            Phase::PointsSharing => "points sharing",
            Phase::PointsAccusation => "points accusation",
            Phase::PointsResolution => "points resolution",
        };

        f.write_str(name)
    }
}

/// Any message of a session, as carried by a
/// [`BroadcastChannel`](crate::dkg::BroadcastChannel).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message<C: CipherSuite> {
    /// An ephemeral public key for one peer.
    EphemeralPublicKey(EphemeralPublicKeyMessage<C>),
    /// The Pedersen commitments of a member.
    Commitments(MemberCommitmentsMessage<C>),
    /// An encrypted pair of shares for one peer.
    PeerShares(PeerSharesMessage),
    /// The accusations of a member after share verification.
    SecretSharesAccusations(SecretSharesAccusationsMessage),
    /// A key revealed to settle a share dispute.
    SharesKeyReveal(EphemeralKeyRevealMessage<C>),
    /// The public key share points of a member.
    PublicKeySharePoints(MemberPublicKeySharePointsMessage<C>),
    /// The accusations of a member after points verification.
    PointsAccusations(PointsAccusationsMessage),
    /// A key revealed to settle a points dispute.
    PointsKeyReveal(EphemeralKeyRevealMessage<C>),
}

impl_serialization_traits!(Message<CipherSuite>);

impl<C: CipherSuite> Message<C> {
    /// The phase during which this message is expected.
    pub fn phase(&self) -> Phase {
        match self {
            Message::EphemeralPublicKey(_) => Phase::KeyExchange,
            Message::Commitments(_) | Message::PeerShares(_) => Phase::Sharing,
            Message::SecretSharesAccusations(_) => Phase::SharesAccusation,
            Message::SharesKeyReveal(_) => Phase::SharesResolution,
            Message::PublicKeySharePoints(_) => Phase::PointsSharing,
            Message::PointsAccusations(_) => Phase::PointsAccusation,
            Message::PointsKeyReveal(_) => Phase::PointsResolution,
        }
    }

    /// The member that published this message.
    pub fn sender(&self) -> MemberId {
        match self {
            Message::EphemeralPublicKey(m) => m.sender,
            Message::Commitments(m) => m.sender,
            Message::PeerShares(m) => m.sender,
            Message::SecretSharesAccusations(m) => m.sender,
            Message::SharesKeyReveal(m) => m.sender,
            Message::PublicKeySharePoints(m) => m.sender,
            Message::PointsAccusations(m) => m.sender,
            Message::PointsKeyReveal(m) => m.sender,
        }
    }

    fn tag(&self) -> u8 {
        match self {
            Message::EphemeralPublicKey(_) => 0,
            Message::Commitments(_) => 1,
            Message::PeerShares(_) => 2,
            Message::SecretSharesAccusations(_) => 3,
            Message::SharesKeyReveal(_) => 4,
            Message::PublicKeySharePoints(_) => 5,
            Message::PointsAccusations(_) => 6,
            Message::PointsKeyReveal(_) => 7,
        }
    }
}

impl<C: CipherSuite> Valid for Message<C> {
    fn check(&self) -> Result<(), SerializationError> {
        match self {
            Message::EphemeralPublicKey(m) => m.check(),
            Message::Commitments(m) => m.check(),
            Message::PeerShares(m) => m.check(),
            Message::SecretSharesAccusations(m) => m.check(),
            Message::SharesKeyReveal(m) => m.check(),
            Message::PublicKeySharePoints(m) => m.check(),
            Message::PointsAccusations(m) => m.check(),
            Message::PointsKeyReveal(m) => m.check(),
        }
    }
}

impl<C: CipherSuite> CanonicalSerialize for Message<C> {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        self.tag().serialize_with_mode(&mut writer, compress)?;

        match self {
            Message::EphemeralPublicKey(m) => m.serialize_with_mode(writer, compress),
            Message::Commitments(m) => m.serialize_with_mode(writer, compress),
            Message::PeerShares(m) => m.serialize_with_mode(writer, compress),
            Message::SecretSharesAccusations(m) => m.serialize_with_mode(writer, compress),
            Message::SharesKeyReveal(m) => m.serialize_with_mode(writer, compress),
            Message::PublicKeySharePoints(m) => m.serialize_with_mode(writer, compress),
            Message::PointsAccusations(m) => m.serialize_with_mode(writer, compress),
            Message::PointsKeyReveal(m) => m.serialize_with_mode(writer, compress),
        }
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        let inner = match self {
            Message::EphemeralPublicKey(m) => m.serialized_size(compress),
            Message::Commitments(m) => m.serialized_size(compress),
            Message::PeerShares(m) => m.serialized_size(compress),
            Message::SecretSharesAccusations(m) => m.serialized_size(compress),
            Message::SharesKeyReveal(m) => m.serialized_size(compress),
            Message::PublicKeySharePoints(m) => m.serialized_size(compress),
            Message::PointsAccusations(m) => m.serialized_size(compress),
            Message::PointsKeyReveal(m) => m.serialized_size(compress),
        };

        1 + inner
    }
}

impl<C: CipherSuite> CanonicalDeserialize for Message<C> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let tag = u8::deserialize_with_mode(&mut reader, compress, validate)?;

        let message = match tag {
            0 => Message::EphemeralPublicKey(CanonicalDeserialize::deserialize_with_mode(
                reader, compress, validate,
            )?),
            1 => Message::Commitments(CanonicalDeserialize::deserialize_with_mode(
                reader, compress, validate,
            )?),
            2 => Message::PeerShares(CanonicalDeserialize::deserialize_with_mode(
                reader, compress, validate,
            )?),
            3 => Message::SecretSharesAccusations(CanonicalDeserialize::deserialize_with_mode(
                reader, compress, validate,
            )?),
            4 => Message::SharesKeyReveal(CanonicalDeserialize::deserialize_with_mode(
                reader, compress, validate,
            )?),
            5 => Message::PublicKeySharePoints(CanonicalDeserialize::deserialize_with_mode(
                reader, compress, validate,
            )?),
            6 => Message::PointsAccusations(CanonicalDeserialize::deserialize_with_mode(
                reader, compress, validate,
            )?),
            7 => Message::PointsKeyReveal(CanonicalDeserialize::deserialize_with_mode(
                reader, compress, validate,
            )?),
            _ => return Err(SerializationError::InvalidData),
        };

        Ok(message)
    }
}

/// The append-only record of the messages published during one session.
///
/// Every slot is write-once: the first message recorded for a given sender
/// (and receiver, for pairwise messages) wins, and later duplicates are
/// ignored. Messages for phases already closed with
/// [`Transcript::advance_to`] are rejected, messages for later phases are
/// kept until they are needed.
#[derive(Clone, Debug)]
pub struct Transcript<C: CipherSuite> {
    parameters: ThresholdParameters<C>,
    roster: Roster,
    phase: Phase,
    ephemeral_keys: BTreeMap<(MemberId, MemberId), EphemeralPublicKey<C>>,
    commitments: BTreeMap<MemberId, Vec<C::G>>,
    peer_shares: BTreeMap<(MemberId, MemberId), PeerSharesMessage>,
    shares_accusations: BTreeMap<MemberId, BTreeSet<MemberId>>,
    shares_reveals: BTreeMap<(MemberId, MemberId), EphemeralKeyRevealMessage<C>>,
    points: BTreeMap<MemberId, Vec<C::G>>,
    points_accusations: BTreeMap<MemberId, BTreeSet<MemberId>>,
    points_reveals: BTreeMap<(MemberId, MemberId), EphemeralKeyRevealMessage<C>>,
}

impl<C: CipherSuite> Transcript<C> {
    /// An empty transcript, opened at [`Phase::KeyExchange`].
    pub fn new(parameters: &ThresholdParameters<C>, roster: &Roster) -> GjkrResult<Self> {
        roster.check_parameters(parameters)?;

        Ok(Self {
            parameters: *parameters,
            roster: roster.clone(),
            phase: Phase::KeyExchange,
            ephemeral_keys: BTreeMap::new(),
            commitments: BTreeMap::new(),
            peer_shares: BTreeMap::new(),
            shares_accusations: BTreeMap::new(),
            shares_reveals: BTreeMap::new(),
            points: BTreeMap::new(),
            points_accusations: BTreeMap::new(),
            points_reveals: BTreeMap::new(),
        })
    }

    /// Record a published message.
    ///
    /// Returns `Ok(true)` when the message filled an empty slot and
    /// `Ok(false)` for a duplicate. Only messages of the current phase are
    /// accepted: messages from unknown members, for another phase or of an invalid
    /// shape are rejected with an error and leave the transcript
    /// untouched. Early messages have to be held back by the caller until
    /// their phase is entered.
    pub fn record(&mut self, message: Message<C>) -> GjkrResult<bool> {
        let sender = message.sender();

        if !self.roster.contains(sender) {
            return Err(Error::UnknownMember(sender));
        }

        if message.phase() < self.phase {
            debug!(%sender, phase = %message.phase(), current = %self.phase, "message for closed phase");
            return Err(Error::PhaseClosed);
        }
        if message.phase() > self.phase {
            debug!(%sender, phase = %message.phase(), current = %self.phase, "message for future phase");
            return Err(Error::PhaseNotOpen);
        }

        let fresh = match message {
            Message::EphemeralPublicKey(m) => {
                m.check_shape(&self.roster)?;
                insert_once(
                    &mut self.ephemeral_keys,
                    (m.sender, m.receiver),
                    m.ephemeral_public_key,
                )
            }
            Message::Commitments(m) => {
                m.check_shape(&self.parameters, &self.roster)?;
                insert_once(&mut self.commitments, m.sender, m.commitments)
            }
            Message::PeerShares(m) => {
                m.check_shape(&self.roster)?;
                insert_once(&mut self.peer_shares, (m.sender, m.receiver), m)
            }
            Message::SecretSharesAccusations(m) => {
                m.check_shape(&self.roster)?;
                insert_once(&mut self.shares_accusations, m.sender, m.accused)
            }
            Message::SharesKeyReveal(m) => {
                m.check_shape(&self.roster)?;
                insert_once(&mut self.shares_reveals, (m.sender, m.counterpart), m)
            }
            Message::PublicKeySharePoints(m) => {
                m.check_shape(&self.parameters, &self.roster)?;
                insert_once(&mut self.points, m.sender, m.points)
            }
            Message::PointsAccusations(m) => {
                m.check_shape(&self.roster)?;
                insert_once(&mut self.points_accusations, m.sender, m.accused)
            }
            Message::PointsKeyReveal(m) => {
                m.check_shape(&self.roster)?;
                insert_once(&mut self.points_reveals, (m.sender, m.counterpart), m)
            }
        };

        if !fresh {
            debug!(%sender, "duplicate message ignored");
        }

        Ok(fresh)
    }

    /// Close every phase before `phase`. Moving backwards is a no-op.
    pub fn advance_to(&mut self, phase: Phase) {
        if phase > self.phase {
            self.phase = phase;
        }
    }

    /// The phase currently accepting messages.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The parameters of the session.
    pub fn parameters(&self) -> &ThresholdParameters<C> {
        &self.parameters
    }

    /// The roster of the session.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Whether every member of `participants` published everything expected
    /// from it in `phase`, so that waiting longer cannot change the outcome.
    pub fn is_phase_complete(&self, phase: Phase, participants: &BTreeSet<MemberId>) -> bool {
        match phase {
            Phase::KeyExchange => participants
                .iter()
                .all(|sender| self.has_all_ephemeral_keys(*sender)),
            Phase::Sharing => participants.iter().all(|sender| {
                self.commitments.contains_key(sender)
                    && participants
                        .iter()
                        .filter(|receiver| *receiver != sender)
                        .all(|receiver| self.peer_shares.contains_key(&(*sender, *receiver)))
            }),
            Phase::SharesAccusation => participants
                .iter()
                .all(|sender| self.shares_accusations.contains_key(sender)),
            Phase::SharesResolution => {
                self.disputes_settled(DisputeRound::SecretShares, participants)
            }
            Phase::PointsSharing => participants
                .iter()
                .all(|sender| self.points.contains_key(sender)),
            Phase::PointsAccusation => participants
                .iter()
                .all(|sender| self.points_accusations.contains_key(sender)),
            Phase::PointsResolution => {
                self.disputes_settled(DisputeRound::PublicKeySharePoints, participants)
            }
        }
    }

    /// Whether `sender` published an ephemeral public key for every other
    /// member of the roster.
    pub fn has_all_ephemeral_keys(&self, sender: MemberId) -> bool {
        self.roster
            .ids()
            .filter(|receiver| *receiver != sender)
            .all(|receiver| self.ephemeral_keys.contains_key(&(sender, receiver)))
    }

    /// The ephemeral public key `sender` published for `receiver`.
    pub fn ephemeral_key(
        &self,
        sender: MemberId,
        receiver: MemberId,
    ) -> Option<&EphemeralPublicKey<C>> {
        self.ephemeral_keys.get(&(sender, receiver))
    }

    /// The Pedersen commitments of `sender`.
    pub fn commitments(&self, sender: MemberId) -> Option<&[C::G]> {
        self.commitments.get(&sender).map(Vec::as_slice)
    }

    /// The encrypted shares `sender` published for `receiver`.
    pub fn peer_shares(&self, sender: MemberId, receiver: MemberId) -> Option<&PeerSharesMessage> {
        self.peer_shares.get(&(sender, receiver))
    }

    /// The public key share points of `sender`.
    pub fn points(&self, sender: MemberId) -> Option<&[C::G]> {
        self.points.get(&sender).map(Vec::as_slice)
    }

    /// The members accused by `sender` in the given dispute round, or `None`
    /// if `sender` published no accusations message.
    pub fn accusations(&self, round: DisputeRound, sender: MemberId) -> Option<&BTreeSet<MemberId>> {
        match round {
            DisputeRound::SecretShares => self.shares_accusations.get(&sender),
            DisputeRound::PublicKeySharePoints => self.points_accusations.get(&sender),
        }
    }

    /// The key `sender` revealed for its channel with `counterpart` in the
    /// given dispute round.
    pub fn reveal(
        &self,
        round: DisputeRound,
        sender: MemberId,
        counterpart: MemberId,
    ) -> Option<&EphemeralKeyRevealMessage<C>> {
        match round {
            DisputeRound::SecretShares => self.shares_reveals.get(&(sender, counterpart)),
            DisputeRound::PublicKeySharePoints => self.points_reveals.get(&(sender, counterpart)),
        }
    }

    /// Every `(accuser, accused)` pair of the round where both are in
    /// `participants`.
    pub fn disputes(
        &self,
        round: DisputeRound,
        participants: &BTreeSet<MemberId>,
    ) -> Vec<(MemberId, MemberId)> {
        participants
            .iter()
            .filter_map(|accuser| {
                self.accusations(round, *accuser)
                    .map(|accused| (accuser, accused))
            })
            .flat_map(|(accuser, accused)| {
                accused
                    .iter()
                    .filter(move |id| participants.contains(*id))
                    .map(move |id| (*accuser, *id))
            })
            .collect()
    }

    fn disputes_settled(&self, round: DisputeRound, participants: &BTreeSet<MemberId>) -> bool {
        self.disputes(round, participants)
            .into_iter()
            .all(|(accuser, accused)| {
                self.reveal(round, accuser, accused).is_some()
                    && self.reveal(round, accused, accuser).is_some()
            })
    }
}

fn insert_once<K: Ord, V>(map: &mut BTreeMap<K, V>, key: K, value: V) -> bool {
    if map.contains_key(&key) {
        return false;
    }

    map.insert(key, value);
    true
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::keys::EphemeralKeyPair;
    use crate::testing::Secp256k1Sha256;
    use crate::{FromBytes, ToBytes};

    use ark_ec::Group;
    use rand::rngs::OsRng;

    type Suite = Secp256k1Sha256;

    fn id(i: u32) -> MemberId {
        MemberId::new(i).unwrap()
    }

    fn setup() -> Transcript<Suite> {
        let params = ThresholdParameters::new(3, 2, 2).unwrap();
        let roster = Roster::new([
            "0x1111111111111111111111111111111111111111",
            "0x2222222222222222222222222222222222222222",
            "0x3333333333333333333333333333333333333333",
        ])
        .unwrap();

        Transcript::new(&params, &roster).unwrap()
    }

    fn key_message(sender: u32, receiver: u32) -> Message<Suite> {
        let pair = EphemeralKeyPair::<Suite>::generate(OsRng);

        Message::EphemeralPublicKey(EphemeralPublicKeyMessage {
            sender: id(sender),
            receiver: id(receiver),
            ephemeral_public_key: pair.public_key,
        })
    }

    #[test]
    fn phases_are_ordered() {
        assert_eq!(Phase::KeyExchange.next(), Some(Phase::Sharing));
        assert_eq!(Phase::PointsAccusation.next(), Some(Phase::PointsResolution));
        assert_eq!(Phase::PointsResolution.next(), None);
        assert!(Phase::SharesResolution < Phase::PointsSharing);
    }

    #[test]
    fn first_message_wins() {
        let mut transcript = setup();
        let first = key_message(1, 2);
        let second = key_message(1, 2);

        assert!(transcript.record(first.clone()).unwrap());
        assert!(!transcript.record(first.clone()).unwrap());
        assert!(!transcript.record(second).unwrap());

        let Message::EphemeralPublicKey(first) = first else {
            unreachable!()
        };
        assert_eq!(
            transcript.ephemeral_key(id(1), id(2)),
            Some(&first.ephemeral_public_key)
        );
    }

    #[test]
    fn rejects_messages_for_other_phases() {
        let mut transcript = setup();
        let accusations = Message::SecretSharesAccusations(SecretSharesAccusationsMessage {
            sender: id(2),
            accused: BTreeSet::new(),
        });

        assert_eq!(
            transcript.record(accusations.clone()),
            Err(Error::PhaseNotOpen)
        );
        assert!(transcript.accusations(DisputeRound::SecretShares, id(2)).is_none());

        transcript.advance_to(Phase::Sharing);
        assert_eq!(transcript.record(key_message(1, 3)), Err(Error::PhaseClosed));
        assert_eq!(
            transcript.record(accusations.clone()),
            Err(Error::PhaseNotOpen)
        );

        transcript.advance_to(Phase::KeyExchange);
        assert_eq!(transcript.phase(), Phase::Sharing);

        transcript.advance_to(Phase::SharesAccusation);
        assert!(transcript.record(accusations).unwrap());
        assert!(transcript.accusations(DisputeRound::SecretShares, id(2)).is_some());
    }

    #[test]
    fn rejects_unknown_and_malformed_messages() {
        let mut transcript = setup();
        let g = <Suite as CipherSuite>::G::generator();

        assert_eq!(
            transcript.record(key_message(4, 1)),
            Err(Error::UnknownMember(id(4)))
        );
        assert_eq!(
            transcript.record(key_message(1, 1)),
            Err(Error::MalformedMessage(id(1)))
        );

        transcript.advance_to(Phase::Sharing);
        let short = Message::Commitments(MemberCommitmentsMessage {
            sender: id(1),
            commitments: vec![g],
        });
        assert_eq!(transcript.record(short), Err(Error::MalformedMessage(id(1))));
        assert!(transcript.commitments(id(1)).is_none());
    }

    #[test]
    fn key_exchange_completeness() {
        let mut transcript = setup();
        let everyone = transcript.roster().id_set();

        for (sender, receiver) in [(1, 2), (1, 3), (2, 1), (2, 3), (3, 1)] {
            transcript.record(key_message(sender, receiver)).unwrap();
        }

        assert!(!transcript.is_phase_complete(Phase::KeyExchange, &everyone));
        assert!(!transcript.has_all_ephemeral_keys(id(3)));

        let without_three: BTreeSet<MemberId> = [id(1), id(2)].into_iter().collect();
        assert!(transcript.is_phase_complete(Phase::KeyExchange, &without_three));

        transcript.record(key_message(3, 2)).unwrap();
        assert!(transcript.is_phase_complete(Phase::KeyExchange, &everyone));
    }

    #[test]
    fn disputes_need_both_reveals() {
        let mut transcript = setup();
        let everyone = transcript.roster().id_set();

        transcript.advance_to(Phase::SharesAccusation);
        for (sender, accused) in [(1, vec![3]), (2, vec![]), (3, vec![])] {
            transcript
                .record(Message::SecretSharesAccusations(
                    SecretSharesAccusationsMessage {
                        sender: id(sender),
                        accused: accused.into_iter().map(id).collect(),
                    },
                ))
                .unwrap();
        }

        assert_eq!(
            transcript.disputes(DisputeRound::SecretShares, &everyone),
            vec![(id(1), id(3))]
        );
        assert!(!transcript.is_phase_complete(Phase::SharesResolution, &everyone));

        transcript.advance_to(Phase::SharesResolution);
        for (sender, counterpart) in [(1, 3), (3, 1)] {
            let pair = EphemeralKeyPair::<Suite>::generate(OsRng);
            transcript
                .record(Message::SharesKeyReveal(EphemeralKeyRevealMessage {
                    sender: id(sender),
                    counterpart: id(counterpart),
                    private_key: pair.private_key,
                }))
                .unwrap();
        }

        assert!(transcript.is_phase_complete(Phase::SharesResolution, &everyone));
        // Nothing is disputed in the points round yet.
        assert!(transcript.is_phase_complete(Phase::PointsResolution, &everyone));
    }

    #[test]
    fn message_serialization() {
        let message = key_message(2, 3);
        let bytes = message.to_bytes().unwrap();

        assert_eq!(bytes[0], 0);
        assert_eq!(Message::<Suite>::from_bytes(&bytes).unwrap(), message);

        let mut unknown = bytes.clone();
        unknown[0] = 42;
        assert_eq!(
            Message::<Suite>::from_bytes(&unknown),
            Err(Error::DeserializationError)
        );
    }
}
