use core::fmt::Debug;
use core::marker::{Send, Sync};

use zeroize::Zeroize;

use aead::{Aead, AeadCore, KeyInit};
use ark_ec::{AffineRepr, CurveGroup};
use digest::Digest;

use crate::utils::String;

/// A trait defining the prime-order group of operation, the symmetric cipher
/// and the hash function of a GJKR distributed key generation instantiation.
pub trait CipherSuite:
    Copy + Clone + PartialEq + Eq + Debug + Send + Sync + Zeroize + 'static
{
    /// The prime-order group on which this [`CipherSuite`] operates.
    type G: CurveGroup;

    /// The underlying hasher used to derive the secondary Pedersen generator.
    type InnerHasher: Default + Clone + Digest;

    /// The authenticated cipher used to encrypt peer-to-peer secret shares.
    type Cipher: Aead + KeyInit + AeadCore;

    //////////////////////////////////////////////////////////////////////////////////////////////

    // Required methods

    /// A method returning this [`CipherSuite`]'s custom context string, used for
    /// domain separation of every key derivation and hash in the protocol.
    fn context_string() -> String;

    ///////////////////////////////////////////////////////////////////////////////////////////////

    // Provided methods

    /// The secondary generator \\( H \\) of the Pedersen commitments
    /// \\( C_{ik} = a_{ik} \cdot G + b_{ik} \cdot H \\).
    ///
    /// It is obtained by hashing the context string together with an
    /// incrementing counter until the digest decodes to a curve point, so that
    /// nobody knows its discrete logarithm with respect to \\( G \\).
    fn pedersen_generator() -> Self::G {
        let mut counter = 0u32;

        loop {
            let mut hasher = Self::InnerHasher::new();
            hasher.update(Self::context_string().as_bytes());
            hasher.update(b"pedersen generator");
            hasher.update(counter.to_le_bytes());
            let digest = hasher.finalize();

            if let Some(point) =
                <Self::G as CurveGroup>::Affine::from_random_bytes(digest.as_slice())
            {
                let point = point.clear_cofactor();
                if !point.is_zero() {
                    return point.into_group();
                }
            }

            counter += 1;
        }
    }
}
