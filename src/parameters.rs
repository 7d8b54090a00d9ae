//! Configurable parameters for an instance of the GJKR distributed key generation.

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::ciphersuite::CipherSuite;
use crate::error::{Error, GjkrResult};
use crate::serialization::impl_serialization_traits;
use crate::utils::Vec;
use core::marker::PhantomData;

/// The configuration parameters of a distributed key generation session.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, CanonicalSerialize, CanonicalDeserialize)]
pub struct ThresholdParameters<C: CipherSuite> {
    /// The number of members in the session.
    pub n: u32,
    /// The number of shares needed to reconstruct the group secret. The
    /// secret sharing polynomials have degree `t - 1`.
    pub t: u32,
    /// The minimum size of the qualified set for the session to succeed.
    pub quorum: u32,
    _phantom: PhantomData<C>,
}

impl_serialization_traits!(ThresholdParameters<CipherSuite>);

impl<C: CipherSuite> ThresholdParameters<C> {
    /// Initialize a new set of threshold parameters.
    ///
    /// Fails unless `0 < t <= quorum <= n`: a qualified set smaller than the
    /// threshold could never use the resulting group key.
    pub fn new(n: u32, t: u32, quorum: u32) -> GjkrResult<Self> {
        if t == 0 || t > quorum || quorum > n {
            return Err(Error::InvalidParameters { n, t, quorum });
        }

        Ok(Self {
            n,
            t,
            quorum,
            _phantom: PhantomData,
        })
    }

    /// Initialize parameters with the default quorum policy, requiring the
    /// threshold plus half of the remaining members (rounded up) to remain
    /// qualified. For 5 members and a threshold of 3 this is 4.
    pub fn with_default_quorum(n: u32, t: u32) -> GjkrResult<Self> {
        let quorum = n
            .checked_sub(t)
            .map(|slack| t + slack.div_ceil(2))
            .ok_or(Error::InvalidParameters { n, t, quorum: 0 })?;

        Self::new(n, t, quorum)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::Secp256k1Sha256;
    use crate::{FromBytes, ToBytes};
    use rand::{rngs::OsRng, RngCore};

    type Params = ThresholdParameters<Secp256k1Sha256>;

    #[test]
    fn test_serialization() {
        let mut rng = OsRng;

        for _ in 0..100 {
            let n = rng.next_u32().max(1);
            let quorum = (rng.next_u32() % n).max(1);
            let t = (rng.next_u32() % quorum).max(1);
            let params = Params::new(n, t, quorum).unwrap();
            let bytes = params.to_bytes().unwrap();
            assert_eq!(params, Params::from_bytes(&bytes).unwrap());
        }
    }

    #[test]
    fn rejects_inconsistent_parameters() {
        assert!(Params::new(5, 0, 4).is_err());
        assert!(Params::new(5, 4, 3).is_err());
        assert!(Params::new(5, 3, 6).is_err());
        assert!(Params::new(5, 3, 3).is_ok());
    }

    #[test]
    fn default_quorum() {
        assert_eq!(Params::with_default_quorum(5, 3).unwrap().quorum, 4);
        assert_eq!(Params::with_default_quorum(3, 2).unwrap().quorum, 3);
        assert_eq!(Params::with_default_quorum(1, 1).unwrap().quorum, 1);
        assert!(Params::with_default_quorum(2, 3).is_err());
    }
}
