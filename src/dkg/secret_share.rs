//! The secret sharing module for defining the two secret polynomials of a
//! member, the shares derived from them and their public commitments.
//!
//! Each member samples \\( f_i \\) and \\( f'_i \\) of degree \\( t - 1 \\) and
//! publishes Pedersen commitments \\( C_{ik} = a_{ik} \cdot G + b_{ik} \cdot H \\)
//! to their coefficients. Once the share disputes are settled, it also
//! publishes the public key share points \\( A_{ik} = a_{ik} \cdot G \\).

use ark_ec::{CurveGroup, Group};
use ark_ff::{Field, UniformRand};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::ciphersuite::CipherSuite;
use crate::dkg::message::PeerSharesMessage;
use crate::error::{Error, GjkrResult};
use crate::keys::SymmetricKey;
use crate::member::MemberId;
use crate::parameters::ThresholdParameters;
use crate::utils::{evaluate_hiding, Scalar, Vec};

/// A struct for holding the coefficients of a secret polynomial, in order to
/// ensure that they are overwritten with zeroes when they fall out of scope.
#[derive(Debug, Clone, Zeroize)]
pub struct Coefficients<C: CipherSuite>(pub(crate) Vec<Scalar<C>>);

impl<C: CipherSuite> Drop for Coefficients<C> {
    fn drop(&mut self) {
        self.0.iter_mut().zeroize();
    }
}

impl<C: CipherSuite> Coefficients<C> {
    fn random(degree_bound: usize, mut rng: impl RngCore + CryptoRng) -> Self {
        Self(
            (0..degree_bound)
                .map(|_| Scalar::<C>::rand(&mut rng))
                .collect(),
        )
    }

    /// Evaluate the polynomial, `f(x)` for the secret coefficients at the value of `x` .
    pub(crate) fn evaluate(&self, term: &Scalar<C>) -> Scalar<C> {
        let mut sum = Scalar::<C>::ZERO;

        // Evaluate using Horner's method.
        for (k, coefficient) in self.0.iter().rev().enumerate() {
            // The secret is the constant term in the polynomial
            sum += coefficient;

            if k != (self.0.len() - 1) {
                sum *= term;
            }
        }

        sum
    }
}

/// The pair of secret polynomials \\( (f_i, f'_i) \\) of one member.
///
/// A fresh pair must be sampled for every session.
#[derive(Debug, Clone)]
pub struct SecretPolynomials<C: CipherSuite> {
    pub(crate) f: Coefficients<C>,
    pub(crate) f_prime: Coefficients<C>,
}

impl<C: CipherSuite> SecretPolynomials<C> {
    /// Sample two independent polynomials of degree `t - 1`.
    pub fn generate(
        parameters: &ThresholdParameters<C>,
        mut rng: impl RngCore + CryptoRng,
    ) -> Self {
        let t = parameters.t as usize;

        Self {
            f: Coefficients::random(t, &mut rng),
            f_prime: Coefficients::random(t, &mut rng),
        }
    }

    /// Compute \\( (s_{ij}, t_{ij}) = (f_i(j), f'_i(j)) \\) for `receiver`.
    pub fn share_for(&self, sender: MemberId, receiver: MemberId) -> SecretShare<C> {
        let term = receiver.to_scalar::<C>();

        SecretShare {
            sender,
            receiver,
            s: self.f.evaluate(&term),
            t: self.f_prime.evaluate(&term),
        }
    }

    /// The Pedersen commitments \\( C_{ik} = a_{ik} \cdot G + b_{ik} \cdot H \\).
    pub fn commitments(&self, pedersen_generator: &C::G) -> Vec<C::G> {
        self.f
            .0
            .iter()
            .zip(self.f_prime.0.iter())
            .map(|(a, b)| C::G::generator() * *a + *pedersen_generator * *b)
            .collect()
    }

    /// The public key share points \\( A_{ik} = a_{ik} \cdot G \\).
    pub fn public_key_share_points(&self) -> Vec<C::G> {
        self.f.0.iter().map(|a| C::G::generator() * *a).collect()
    }
}

/// A pair of secret shares \\( (s_{ij}, t_{ij}) \\) computed by `sender` for `receiver`.
#[derive(Clone, Debug, Eq, PartialEq, CanonicalSerialize, CanonicalDeserialize, Zeroize)]
pub struct SecretShare<C: CipherSuite> {
    /// The index of the share maker.
    #[zeroize(skip)]
    pub sender: MemberId,
    /// The member this secret share was calculated for.
    #[zeroize(skip)]
    pub receiver: MemberId,
    /// The evaluation of the sender's first polynomial.
    pub(crate) s: Scalar<C>,
    /// The evaluation of the sender's blinding polynomial.
    pub(crate) t: Scalar<C>,
}

impl<C: CipherSuite> Drop for SecretShare<C> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<C: CipherSuite> SecretShare<C> {
    /// Verify the share against the sender's Pedersen commitments:
    ///
    /// \\[
    /// s_{ij} \cdot G + t_{ij} \cdot H \stackrel{?}{=} \sum_{k=0}^{t-1} C_{ik} \cdot j^k
    /// \\]
    pub fn verify(&self, commitments: &[C::G], pedersen_generator: &C::G) -> GjkrResult<()> {
        let lhs = C::G::generator() * self.s + *pedersen_generator * self.t;
        let rhs = evaluate_hiding::<C>(commitments, &self.receiver.to_scalar::<C>());

        if lhs.into_affine() == rhs.into_affine() {
            Ok(())
        } else {
            Err(Error::ShareVerificationError)
        }
    }

    /// Verify the share against the sender's public key share points:
    ///
    /// \\[
    /// s_{ij} \cdot G \stackrel{?}{=} \sum_{k=0}^{t-1} A_{ik} \cdot j^k
    /// \\]
    pub fn verify_points(&self, points: &[C::G]) -> GjkrResult<()> {
        let lhs = C::G::generator() * self.s;
        let rhs = evaluate_hiding::<C>(points, &self.receiver.to_scalar::<C>());

        if lhs.into_affine() == rhs.into_affine() {
            Ok(())
        } else {
            Err(Error::PointsVerificationError)
        }
    }

    /// Encrypt both halves of the share under the pairwise channel key.
    pub fn encrypt(
        &self,
        key: &SymmetricKey<C>,
        mut rng: impl RngCore + CryptoRng,
    ) -> GjkrResult<PeerSharesMessage> {
        let encrypted_share_s = key.encrypt(&encode_scalar::<C>(&self.s)?, &mut rng)?;
        let encrypted_share_t = key.encrypt(&encode_scalar::<C>(&self.t)?, &mut rng)?;

        Ok(PeerSharesMessage {
            sender: self.sender,
            receiver: self.receiver,
            encrypted_share_s,
            encrypted_share_t,
        })
    }
}

fn encode_scalar<C: CipherSuite>(scalar: &Scalar<C>) -> GjkrResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(scalar.compressed_size());
    scalar
        .serialize_compressed(&mut bytes)
        .map_err(|_| Error::SerializationError)?;

    Ok(bytes)
}

/// Decode a decrypted scalar, rejecting trailing bytes so that a plaintext
/// is either exactly one canonical field element or a fault of its sender.
pub(crate) fn decode_scalar<C: CipherSuite>(bytes: &[u8]) -> GjkrResult<Scalar<C>> {
    let mut reader = bytes;
    let scalar =
        Scalar::<C>::deserialize_compressed(&mut reader).map_err(|_| Error::DeserializationError)?;

    if !reader.is_empty() {
        return Err(Error::DeserializationError);
    }

    Ok(scalar)
}
