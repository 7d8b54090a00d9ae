//! The round module for defining the phases a member walks through during a
//! GJKR distributed key generation session, using the
//! [typestate](http://cliffle.com/blog/rust-typestate/) pattern internally.

/// The member generated and published one ephemeral public key per peer, and
/// waits for the peers' keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyExchange {}

/// The member published its commitments and encrypted shares, and waits for
/// the peers' ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sharing {}

/// The member published its accusations against the commitments and may have
/// to reveal ephemeral keys of disputed channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharesJustification {}

/// The member published its public key share points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointsSharing {}

/// The member published its accusations against the public key share points
/// and may have to reveal ephemeral keys of disputed channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointsJustification {}

/// Module to implement trait sealing so that [`DkgState`] cannot be
/// implemented for externally declared types.
mod private {
    pub trait Sealed {}

    impl Sealed for super::KeyExchange {}
    impl Sealed for super::Sharing {}
    impl Sealed for super::SharesJustification {}
    impl Sealed for super::PointsSharing {}
    impl Sealed for super::PointsJustification {}
}

/// Marker trait to designate valid phases in the distributed key generation
/// protocol's state machine.  It is implemented using the [sealed trait design
/// pattern][sealed] pattern to prevent external types from implementing further
/// valid states.
///
/// [sealed]: https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
pub trait DkgState: private::Sealed {}

impl DkgState for KeyExchange {}
impl DkgState for Sharing {}
impl DkgState for SharesJustification {}
impl DkgState for PointsSharing {}
impl DkgState for PointsJustification {}
