//! Key types: the per-pair ephemeral keys and the symmetric channel keys
//! derived from them, and the group and individual keys produced by a session.

use core::fmt::{self, Debug};
use core::marker::PhantomData;
use core::ops::Deref;

use aead::generic_array::typenum::Unsigned;
use aead::{Aead, AeadCore, Key, KeyInit, KeySizeUser, Nonce};
use ark_ec::{CurveGroup, Group};
use ark_ff::{UniformRand, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use hkdf::Hkdf;
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::ciphersuite::CipherSuite;
use crate::error::{Error, GjkrResult};
use crate::member::MemberId;
use crate::serialization::impl_serialization_traits;
use crate::utils::{evaluate_hiding, Scalar, ToString, Vec};

/// An ephemeral private key, generated by a member for exactly one peer.
#[derive(Clone, Debug, Eq, PartialEq, CanonicalSerialize, CanonicalDeserialize, Zeroize)]
pub struct EphemeralPrivateKey<C: CipherSuite>(pub(crate) Scalar<C>);

impl_serialization_traits!(EphemeralPrivateKey<CipherSuite>);

impl<C: CipherSuite> Drop for EphemeralPrivateKey<C> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<C: CipherSuite> EphemeralPrivateKey<C> {
    /// Derive the public half of this key.
    pub fn to_public(&self) -> EphemeralPublicKey<C> {
        EphemeralPublicKey(C::G::generator() * self.0)
    }

    /// Perform ECDH with the peer's ephemeral public key and derive the
    /// symmetric key of the pairwise channel.
    ///
    /// Both ends of the channel obtain the same key, which is what allows a
    /// revealed private key to be checked by every other member.
    pub fn derive_symmetric_key(
        &self,
        their_public_key: &EphemeralPublicKey<C>,
    ) -> GjkrResult<SymmetricKey<C>> {
        SymmetricKey::from_shared_point(&(their_public_key.0 * self.0))
    }
}

/// An ephemeral public key, broadcast so that a private key revealed during
/// dispute resolution can be checked against it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, CanonicalSerialize, CanonicalDeserialize)]
pub struct EphemeralPublicKey<C: CipherSuite>(pub(crate) C::G);

impl_serialization_traits!(EphemeralPublicKey<CipherSuite>);

impl<C: CipherSuite> EphemeralPublicKey<C> {
    /// Whether this is the identity element, which would yield a channel key
    /// known to everybody.
    pub fn is_identity(&self) -> bool {
        self.0.is_zero()
    }
}

impl<C: CipherSuite> Deref for EphemeralPublicKey<C> {
    type Target = C::G;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// An ephemeral key pair dedicated to one pairwise channel.
#[derive(Clone, Debug)]
pub struct EphemeralKeyPair<C: CipherSuite> {
    pub(crate) private_key: EphemeralPrivateKey<C>,
    /// The public half, to be broadcast.
    pub public_key: EphemeralPublicKey<C>,
}

impl<C: CipherSuite> EphemeralKeyPair<C> {
    /// Sample a fresh key pair.
    pub fn generate(mut rng: impl RngCore + CryptoRng) -> Self {
        let private_key = EphemeralPrivateKey(Scalar::<C>::rand(&mut rng));
        let public_key = private_key.to_public();

        Self {
            private_key,
            public_key,
        }
    }
}

/// The symmetric key of a pairwise channel.
///
/// This will perform an HMAC-based Extract-and-Expand Key Derivation Function (HKDF)
/// over the ECDH shared point, and key the [`CipherSuite`]'s authenticated cipher
/// with the output.
#[derive(Clone, Zeroize)]
pub struct SymmetricKey<C: CipherSuite> {
    key: Vec<u8>,
    #[zeroize(skip)]
    _phantom: PhantomData<C>,
}

impl<C: CipherSuite> Drop for SymmetricKey<C> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<C: CipherSuite> Debug for SymmetricKey<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey { .. }")
    }
}

impl<C: CipherSuite> SymmetricKey<C> {
    pub(crate) fn from_shared_point(shared_point: &C::G) -> GjkrResult<Self> {
        let mut initial_key_bytes = Vec::new();
        shared_point
            .serialize_compressed(&mut initial_key_bytes)
            .map_err(|_| Error::CompressionError)?;

        let hkdf = Hkdf::<Sha256>::new(None, &initial_key_bytes);
        let mut key = vec![0u8; <C::Cipher as KeySizeUser>::key_size()];
        hkdf.expand((C::context_string() + "ECDH").as_bytes(), &mut key)
            .map_err(|_| Error::Custom("KDF expansion failed unexpectedly".to_string()))?;
        initial_key_bytes.zeroize();

        Ok(Self {
            key,
            _phantom: PhantomData,
        })
    }

    fn cipher(&self) -> C::Cipher {
        let key = Key::<C::Cipher>::from_slice(&self.key); // This cannot panic.
        C::Cipher::new(key)
    }

    /// Encrypt `plaintext` under a fresh random nonce. The nonce is prepended
    /// to the returned ciphertext.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        rng: impl RngCore + CryptoRng,
    ) -> GjkrResult<Vec<u8>> {
        let nonce = C::Cipher::generate_nonce(rng);

        let ciphertext = self
            .cipher()
            .encrypt(&nonce, plaintext)
            .map_err(|_| Error::EncryptionError)?;

        let mut bytes = Vec::with_capacity(nonce.len() + ciphertext.len());
        bytes.extend_from_slice(nonce.as_slice());
        bytes.extend_from_slice(&ciphertext);

        Ok(bytes)
    }

    /// Decrypt the output of [`SymmetricKey::encrypt`]. Fails with
    /// [`Error::DecryptionError`] when the ciphertext was not produced under
    /// this key or has been altered.
    pub fn decrypt(&self, ciphertext: &[u8]) -> GjkrResult<Vec<u8>> {
        let nonce_size = <C::Cipher as AeadCore>::NonceSize::USIZE;
        if ciphertext.len() < nonce_size {
            return Err(Error::DecryptionError);
        }

        let (nonce, ciphertext) = ciphertext.split_at(nonce_size);

        self.cipher()
            .decrypt(Nonce::<C::Cipher>::from_slice(nonce), ciphertext)
            .map_err(|_| Error::DecryptionError)
    }
}

/// A public verification share for a member.
///
/// Any member can recalculate the public verification share, which is the
/// public half of an [`IndividualSigningKey`], of any other qualified member.
#[derive(Clone, Debug, Eq, PartialEq, CanonicalSerialize, CanonicalDeserialize)]
pub struct IndividualVerifyingKey<C: CipherSuite> {
    /// The member to which this key belongs.
    pub index: MemberId,
    /// The public verification share.
    pub share: C::G,
}

impl_serialization_traits!(IndividualVerifyingKey<CipherSuite>);

impl<C: CipherSuite> IndividualVerifyingKey<C> {
    /// Compute the verification share \\(Y\_j\\) of member `index` s.t.:
    ///
    /// \\[
    /// Y\_j = \sum\_{i \in QUAL} \sum\_{k=0}^{t-1} A\_{ik} \cdot j^{k}
    /// \\]
    ///
    /// from the public key share points of every qualified member.
    pub fn generate_from_points<'a>(
        index: MemberId,
        qualified_points: impl IntoIterator<Item = &'a [C::G]>,
    ) -> Self {
        let term = index.to_scalar::<C>();
        let share = qualified_points
            .into_iter()
            .map(|points| evaluate_hiding::<C>(points, &term))
            .fold(C::G::zero(), |acc, point| acc + point);

        Self { index, share }
    }

    /// Check this verification share against the qualified public key share points.
    pub fn verify<'a>(
        &self,
        qualified_points: impl IntoIterator<Item = &'a [C::G]>,
    ) -> GjkrResult<()> {
        let expected = Self::generate_from_points(self.index, qualified_points);

        match self.share.into_affine() == expected.share.into_affine() {
            true => Ok(()),
            false => Err(Error::PointsVerificationError),
        }
    }
}

/// The long-lived secret share of the group key held by one qualified member.
#[derive(Clone, Debug, Eq, PartialEq, CanonicalSerialize, CanonicalDeserialize, Zeroize)]
pub struct IndividualSigningKey<C: CipherSuite> {
    /// The member to which this key belongs.
    #[zeroize(skip)]
    pub(crate) index: MemberId,
    /// The member's secret share of the group signing key.
    pub(crate) key: Scalar<C>,
}

impl_serialization_traits!(IndividualSigningKey<CipherSuite>);

impl<C: CipherSuite> Drop for IndividualSigningKey<C> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<C: CipherSuite> IndividualSigningKey<C> {
    /// The member to which this key belongs.
    pub fn index(&self) -> MemberId {
        self.index
    }

    /// Derive the corresponding public key for this secret key.
    pub fn to_public(&self) -> IndividualVerifyingKey<C> {
        IndividualVerifyingKey {
            index: self.index,
            share: C::G::generator() * self.key,
        }
    }
}

impl<C: CipherSuite> From<&IndividualSigningKey<C>> for IndividualVerifyingKey<C> {
    fn from(source: &IndividualSigningKey<C>) -> IndividualVerifyingKey<C> {
        source.to_public()
    }
}

/// The group public key, to be handed to the signing service.
#[derive(Clone, Copy, Debug, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct GroupKey<C: CipherSuite>(pub(crate) C::G);

impl_serialization_traits!(GroupKey<CipherSuite>);

impl<C: CipherSuite> PartialEq for GroupKey<C> {
    fn eq(&self, other: &Self) -> bool {
        self.0.into_affine() == other.0.into_affine()
    }
}

impl<C: CipherSuite> GroupKey<C> {
    /// Wrap a group element.
    pub fn new(point: C::G) -> Self {
        Self(point)
    }

    /// The underlying group element.
    pub fn to_point(&self) -> C::G {
        self.0
    }
}
