//! The messages exchanged during a GJKR distributed key generation session.
//!
//! Every message carries its sender. Checking a message's *shape* (known
//! members, vector lengths, non-empty ciphertexts) is done here and by the
//! [`Transcript`](crate::dkg::Transcript) on receipt; checking that its
//! content is *honest* is the job of the share verification and of the
//! [`AccusationResolver`](crate::dkg::AccusationResolver). A well-formed
//! message can still carry a bad share.

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::ciphersuite::CipherSuite;
use crate::dkg::secret_share::{decode_scalar, SecretShare};
use crate::error::{Error, GjkrResult};
use crate::keys::{EphemeralPrivateKey, EphemeralPublicKey, SymmetricKey};
use crate::member::{MemberId, Roster};
use crate::parameters::ThresholdParameters;
use crate::serialization::impl_serialization_traits;
use crate::utils::{BTreeSet, Vec};

/// Carries the sender's ephemeral public key \\( Y_{ij} \\) generated for the
/// given receiver.
///
/// The receiver performs ECDH on it with its own ephemeral private key for the
/// sender, creating the symmetric key of their channel. It is broadcast so that
/// every member knows it before any share is exchanged: in case of a dispute,
/// a private key revealed later can then be checked against it.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct EphemeralPublicKeyMessage<C: CipherSuite> {
    /// i
    pub sender: MemberId,
    /// j
    pub receiver: MemberId,
    /// Y_ij
    pub ephemeral_public_key: EphemeralPublicKey<C>,
}

impl_serialization_traits!(EphemeralPublicKeyMessage<CipherSuite>);

impl<C: CipherSuite> EphemeralPublicKeyMessage<C> {
    /// Message-shape validation.
    pub fn check_shape(&self, roster: &Roster) -> GjkrResult<()> {
        check_pair(self.sender, self.receiver, roster)?;

        if self.ephemeral_public_key.is_identity() {
            return Err(Error::MalformedMessage(self.sender));
        }

        Ok(())
    }
}

/// Carries the sender's Pedersen commitments \\( C_{ik} \\) to its polynomial
/// coefficients. Broadcast once.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct MemberCommitmentsMessage<C: CipherSuite> {
    /// i
    pub sender: MemberId,
    /// C_i0, ..., C_i(t-1)
    pub commitments: Vec<C::G>,
}

impl_serialization_traits!(MemberCommitmentsMessage<CipherSuite>);

impl<C: CipherSuite> MemberCommitmentsMessage<C> {
    /// Message-shape validation.
    pub fn check_shape(
        &self,
        parameters: &ThresholdParameters<C>,
        roster: &Roster,
    ) -> GjkrResult<()> {
        check_member(self.sender, roster)?;
        check_degree(self.sender, &self.commitments, parameters)
    }
}

/// Carries the shares \\( s_{ij} \\) and \\( t_{ij} \\) computed by the sender
/// `i` for the receiver `j`, encrypted under the symmetric key of their channel.
///
/// It is broadcast in its encrypted form so that every member can decrypt it
/// once a key of the channel has been revealed in a dispute.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PeerSharesMessage {
    /// i
    pub sender: MemberId,
    /// j
    pub receiver: MemberId,
    /// Encrypted s_ij
    pub encrypted_share_s: Vec<u8>,
    /// Encrypted t_ij
    pub encrypted_share_t: Vec<u8>,
}

impl_serialization_traits!(PeerSharesMessage);

impl PeerSharesMessage {
    /// Message-shape validation. This does not say anything about whether the
    /// shares are correct, which is only known after decryption.
    pub fn check_shape(&self, roster: &Roster) -> GjkrResult<()> {
        check_pair(self.sender, self.receiver, roster)?;

        if self.encrypted_share_s.is_empty() || self.encrypted_share_t.is_empty() {
            return Err(Error::MalformedMessage(self.sender));
        }

        Ok(())
    }

    /// Decrypt both shares with the channel key.
    ///
    /// Any failure, be it authentication or a plaintext that is not exactly one
    /// canonical scalar, is attributable to the sender.
    pub fn decrypt<C: CipherSuite>(&self, key: &SymmetricKey<C>) -> GjkrResult<SecretShare<C>> {
        let s = decode_scalar::<C>(&key.decrypt(&self.encrypted_share_s)?)?;
        let t = decode_scalar::<C>(&key.decrypt(&self.encrypted_share_t)?)?;

        Ok(SecretShare {
            sender: self.sender,
            receiver: self.receiver,
            s,
            t,
        })
    }
}

/// Carries all of the sender's accusations against members whose shares it
/// could not verify against their commitments. If all other members behaved
/// honestly from the sender's point of view, this message is still broadcast
/// with an empty set.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct SecretSharesAccusationsMessage {
    /// The accuser.
    pub sender: MemberId,
    /// The accused members.
    pub accused: BTreeSet<MemberId>,
}

impl_serialization_traits!(SecretSharesAccusationsMessage);

impl SecretSharesAccusationsMessage {
    /// Message-shape validation.
    pub fn check_shape(&self, roster: &Roster) -> GjkrResult<()> {
        check_accusations(self.sender, &self.accused, roster)
    }
}

/// Carries the sender's public key share points \\( A_{ik} = a_{ik} \cdot G \\).
/// Broadcast once the share disputes are resolved.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct MemberPublicKeySharePointsMessage<C: CipherSuite> {
    /// i
    pub sender: MemberId,
    /// A_i0, ..., A_i(t-1)
    pub points: Vec<C::G>,
}

impl_serialization_traits!(MemberPublicKeySharePointsMessage<CipherSuite>);

impl<C: CipherSuite> MemberPublicKeySharePointsMessage<C> {
    /// Message-shape validation.
    pub fn check_shape(
        &self,
        parameters: &ThresholdParameters<C>,
        roster: &Roster,
    ) -> GjkrResult<()> {
        check_member(self.sender, roster)?;
        check_degree(self.sender, &self.points, parameters)
    }
}

/// Carries all of the sender's accusations against members whose public key
/// share points are inconsistent with the share it received. Broadcast, with an
/// empty set when there is no complaint.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PointsAccusationsMessage {
    /// The accuser.
    pub sender: MemberId,
    /// The accused members.
    pub accused: BTreeSet<MemberId>,
}

impl_serialization_traits!(PointsAccusationsMessage);

impl PointsAccusationsMessage {
    /// Message-shape validation.
    pub fn check_shape(&self, roster: &Roster) -> GjkrResult<()> {
        check_accusations(self.sender, &self.accused, roster)
    }
}

/// The disclosure of the sender's ephemeral private key for its channel with
/// `counterpart`, published to settle a dispute between the two.
///
/// It opens exactly one pairwise channel: the key was generated for that
/// counterpart only and is useless for any other channel.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct EphemeralKeyRevealMessage<C: CipherSuite> {
    /// The owner of the revealed key.
    pub sender: MemberId,
    /// The other end of the disputed channel.
    pub counterpart: MemberId,
    /// x_ij
    pub private_key: EphemeralPrivateKey<C>,
}

impl_serialization_traits!(EphemeralKeyRevealMessage<CipherSuite>);

impl<C: CipherSuite> EphemeralKeyRevealMessage<C> {
    /// Message-shape validation.
    pub fn check_shape(&self, roster: &Roster) -> GjkrResult<()> {
        check_pair(self.sender, self.counterpart, roster)
    }

    /// Recover the channel key from the revealed private key.
    ///
    /// `published` is the ephemeral public key the sender broadcast for the
    /// counterpart, `counterpart_key` the one the counterpart broadcast for
    /// the sender. A revealed key that does not match `published` is a fault
    /// of the sender.
    pub fn symmetric_key(
        &self,
        published: &EphemeralPublicKey<C>,
        counterpart_key: &EphemeralPublicKey<C>,
    ) -> GjkrResult<SymmetricKey<C>> {
        if &self.private_key.to_public() != published {
            return Err(Error::InvalidRevealedKey(self.sender));
        }

        self.private_key.derive_symmetric_key(counterpart_key)
    }
}

fn check_member(id: MemberId, roster: &Roster) -> GjkrResult<()> {
    if !roster.contains(id) {
        return Err(Error::UnknownMember(id));
    }

    Ok(())
}

fn check_pair(sender: MemberId, receiver: MemberId, roster: &Roster) -> GjkrResult<()> {
    check_member(sender, roster)?;
    check_member(receiver, roster)?;

    if sender == receiver {
        return Err(Error::MalformedMessage(sender));
    }

    Ok(())
}

fn check_degree<C: CipherSuite>(
    sender: MemberId,
    points: &[C::G],
    parameters: &ThresholdParameters<C>,
) -> GjkrResult<()> {
    if points.len() != parameters.t as usize {
        tracing::debug!(
            %sender,
            expected = parameters.t,
            actual = points.len(),
            "wrong number of commitment points"
        );
        return Err(Error::InvalidCommitmentLength {
            expected: parameters.t as usize,
            actual: points.len(),
        });
    }

    Ok(())
}

fn check_accusations(
    sender: MemberId,
    accused: &BTreeSet<MemberId>,
    roster: &Roster,
) -> GjkrResult<()> {
    check_member(sender, roster)?;

    for id in accused {
        check_member(*id, roster)?;
    }

    if accused.contains(&sender) {
        return Err(Error::MalformedMessage(sender));
    }

    Ok(())
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

    fn roster() -> Roster {
        Roster::new([
            "0x1111111111111111111111111111111111111111",
            "0x2222222222222222222222222222222222222222",
            "0x3333333333333333333333333333333333333333",
        ])
        .unwrap()
    }

    #[test]
    fn peer_shares_shape() {
        let roster = roster();
        let message = PeerSharesMessage {
            sender: id(1),
            receiver: id(2),
            encrypted_share_s: vec![1, 2, 3],
            encrypted_share_t: vec![4, 5, 6],
        };
        assert!(message.check_shape(&roster).is_ok());

        let to_self = PeerSharesMessage {
            receiver: id(1),
            ..message.clone()
        };
        assert_eq!(
            to_self.check_shape(&roster),
            Err(Error::MalformedMessage(id(1)))
        );

        let to_stranger = PeerSharesMessage {
            receiver: id(9),
            ..message.clone()
        };
        assert_eq!(
            to_stranger.check_shape(&roster),
            Err(Error::UnknownMember(id(9)))
        );

        let empty = PeerSharesMessage {
            encrypted_share_t: Vec::new(),
            ..message
        };
        assert!(empty.check_shape(&roster).is_err());
    }

    #[test]
    fn well_formed_garbage_fails_decryption() {
        let mut rng = OsRng;
        let roster = roster();
        let pair = EphemeralKeyPair::<Suite>::generate(&mut rng);
        let other = EphemeralKeyPair::<Suite>::generate(&mut rng);
        let key = pair
            .private_key
            .derive_symmetric_key(&other.public_key)
            .unwrap();

        let message = PeerSharesMessage {
            sender: id(1),
            receiver: id(2),
            encrypted_share_s: vec![0u8; 60],
            encrypted_share_t: vec![0u8; 60],
        };

        assert!(message.check_shape(&roster).is_ok());
        assert_eq!(message.decrypt(&key), Err(Error::DecryptionError));
    }

    #[test]
    fn commitments_shape() {
        let roster = roster();
        let params = ThresholdParameters::<Suite>::new(3, 2, 2).unwrap();
        let g = <Suite as CipherSuite>::G::generator();

        let message = MemberCommitmentsMessage::<Suite> {
            sender: id(3),
            commitments: vec![g, g],
        };
        assert!(message.check_shape(&params, &roster).is_ok());

        let short = MemberCommitmentsMessage::<Suite> {
            sender: id(3),
            commitments: vec![g],
        };
        assert_eq!(
            short.check_shape(&params, &roster),
            Err(Error::InvalidCommitmentLength {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn accusations_shape() {
        let roster = roster();

        let message = SecretSharesAccusationsMessage {
            sender: id(1),
            accused: [id(2), id(3)].into_iter().collect(),
        };
        assert!(message.check_shape(&roster).is_ok());

        let self_accusation = PointsAccusationsMessage {
            sender: id(1),
            accused: [id(1)].into_iter().collect(),
        };
        assert_eq!(
            self_accusation.check_shape(&roster),
            Err(Error::MalformedMessage(id(1)))
        );

        let bytes = message.to_bytes().unwrap();
        assert_eq!(
            SecretSharesAccusationsMessage::from_bytes(&bytes).unwrap(),
            message
        );
    }

    #[test]
    fn revealed_key_must_match_published_key() {
        let mut rng = OsRng;
        let mine = EphemeralKeyPair::<Suite>::generate(&mut rng);
        let theirs = EphemeralKeyPair::<Suite>::generate(&mut rng);
        let unrelated = EphemeralKeyPair::<Suite>::generate(&mut rng);

        let reveal = EphemeralKeyRevealMessage {
            sender: id(1),
            counterpart: id(2),
            private_key: mine.private_key.clone(),
        };

        let key = reveal
            .symmetric_key(&mine.public_key, &theirs.public_key)
            .unwrap();
        let expected = theirs
            .private_key
            .derive_symmetric_key(&mine.public_key)
            .unwrap();
        let ciphertext = expected.encrypt(b"share", &mut rng).unwrap();
        assert_eq!(key.decrypt(&ciphertext).unwrap(), b"share");

        assert_eq!(
            reveal
                .symmetric_key(&unrelated.public_key, &theirs.public_key)
                .map(|_| ()),
            Err(Error::InvalidRevealedKey(id(1)))
        );
    }
}
