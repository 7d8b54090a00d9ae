#[cfg(not(feature = "std"))]
pub use alloc::{
    boxed::Box,
    collections::{btree_map::BTreeMap, btree_set::BTreeSet},
    string::{String, ToString},
    vec::Vec,
};

#[cfg(feature = "std")]
pub use std::{
    boxed::Box,
    collections::{btree_map::BTreeMap, btree_set::BTreeSet},
    string::{String, ToString},
    vec::Vec,
};

use ark_ec::Group;
use ark_ff::Zero;

use crate::ciphersuite::CipherSuite;

/// The scalar field of the group a [`CipherSuite`] operates on.
pub type Scalar<C> = <<C as CipherSuite>::G as Group>::ScalarField;

/// Evaluate \\( \sum_k P_k \cdot x^k \\) for public points \\( P_k \\) using Horner's method.
///
/// This evaluates a polynomial "in the exponent", without knowledge of its
/// secret coefficients.
pub(crate) fn evaluate_hiding<C: CipherSuite>(points: &[C::G], term: &Scalar<C>) -> C::G {
    let mut sum = C::G::zero();

    for (k, point) in points.iter().rev().enumerate() {
        sum += point;

        if k != (points.len() - 1) {
            sum *= term;
        }
    }

    sum
}
