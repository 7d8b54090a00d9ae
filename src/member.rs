//! Member identifiers and the session roster.
//!
//! A [`Roster`] is an ordered, fixed-size arena of [`MemberRecord`]s in which
//! the record of member `i` lives at position `i - 1`. It is built once,
//! before the distributed key generation starts, and never changes during the
//! session.

use core::fmt;

use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use tracing::debug;

use crate::ciphersuite::CipherSuite;
use crate::eligibility::StakeMonitor;
use crate::error::{Error, GjkrResult};
use crate::parameters::ThresholdParameters;
use crate::serialization::impl_serialization_traits;
use crate::utils::{BTreeSet, Scalar, String, ToString, Vec};

/// The identifier of a member within a session. Always strictly positive,
/// since shares are polynomial evaluations at the member identifier and the
/// evaluation at zero is the member's secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(u32);

impl_serialization_traits!(MemberId);

impl MemberId {
    /// Construct a member identifier, rejecting zero.
    pub const fn new(id: u32) -> Option<Self> {
        if id == 0 {
            None
        } else {
            Some(Self(id))
        }
    }

    /// The raw identifier.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The identifier as an element of the scalar field, i.e. the point at
    /// which shares for this member are evaluated.
    pub fn to_scalar<C: CipherSuite>(self) -> Scalar<C> {
        Scalar::<C>::from(self.0)
    }

    fn position(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Valid for MemberId {
    fn check(&self) -> Result<(), SerializationError> {
        if self.0 == 0 {
            return Err(SerializationError::InvalidData);
        }

        Ok(())
    }
}

impl CanonicalSerialize for MemberId {
    fn serialize_with_mode<W: Write>(
        &self,
        writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        self.0.serialize_with_mode(writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.0.serialized_size(compress)
    }
}

impl CanonicalDeserialize for MemberId {
    fn deserialize_with_mode<R: Read>(
        reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let id = MemberId(u32::deserialize_with_mode(reader, compress, validate)?);
        // A zero identifier is rejected regardless of the validation mode.
        id.check()?;

        Ok(id)
    }
}

/// The identifier following `count` admitted members.
fn next_id(count: usize) -> GjkrResult<MemberId> {
    count
        .checked_add(1)
        .and_then(|id| u32::try_from(id).ok())
        .and_then(MemberId::new)
        .ok_or(Error::TooManyMembers)
}

/// The record of a single admitted member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberRecord {
    /// The member identifier for this session.
    pub id: MemberId,
    /// The operator identity (e.g. a staking address) behind this member.
    pub operator: String,
}

/// The fixed, ordered set of members of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    members: Vec<MemberRecord>,
}

impl Roster {
    /// Build a roster from operator identities, assigning member identifiers
    /// `1..=n` in the given order.
    pub fn new<I, S>(operators: I) -> GjkrResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut members: Vec<MemberRecord> = Vec::new();

        for operator in operators {
            let operator = operator.into();
            if members.iter().any(|m| m.operator == operator) {
                return Err(Error::DuplicateOperator(operator));
            }

            let id = next_id(members.len())?;

            members.push(MemberRecord { id, operator });
        }

        Ok(Self { members })
    }

    /// Build a roster from the candidates that hold the minimum stake
    /// according to `monitor`. Candidates without enough stake are skipped;
    /// an error from the monitor aborts admission.
    pub fn admit<M, I, S>(candidates: I, monitor: &M) -> GjkrResult<Self>
    where
        M: StakeMonitor + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut admitted: Vec<String> = Vec::new();

        for candidate in candidates {
            let candidate = candidate.as_ref();
            if monitor.has_minimum_stake(candidate)? {
                admitted.push(candidate.to_string());
            } else {
                debug!(operator = candidate, "candidate below minimum stake, not admitted");
            }
        }

        Self::new(admitted)
    }

    /// The number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the roster has no member.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over the member records in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &MemberRecord> {
        self.members.iter()
    }

    /// Iterate over the member identifiers in order.
    pub fn ids(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.members.iter().map(|m| m.id)
    }

    /// All member identifiers as a set.
    pub fn id_set(&self) -> BTreeSet<MemberId> {
        self.ids().collect()
    }

    /// Whether `id` belongs to this roster.
    pub fn contains(&self, id: MemberId) -> bool {
        id.position() < self.members.len()
    }

    /// The record of member `id`, if present.
    pub fn get(&self, id: MemberId) -> Option<&MemberRecord> {
        self.members.get(id.position())
    }

    /// The identifier assigned to `operator`, if admitted.
    pub fn find(&self, operator: &str) -> Option<MemberId> {
        self.members
            .iter()
            .find(|m| m.operator == operator)
            .map(|m| m.id)
    }

    /// Ensure this roster can run a session with the given parameters.
    pub fn check_parameters<C: CipherSuite>(
        &self,
        parameters: &ThresholdParameters<C>,
    ) -> GjkrResult<()> {
        if self.members.len() != parameters.n as usize {
            return Err(Error::InvalidNumberOfMembers(
                self.members.len(),
                parameters.n,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::eligibility::LocalStakeMonitor;
    use crate::{FromBytes, ToBytes};

    const ALICE: &str = "0x1111111111111111111111111111111111111111";
    const BOB: &str = "0x2222222222222222222222222222222222222222";
    const CAROL: &str = "0x3333333333333333333333333333333333333333";

    #[test]
    fn member_id_rejects_zero() {
        assert!(MemberId::new(0).is_none());
        assert_eq!(MemberId::new(7).unwrap().get(), 7);

        let bytes = 0u32.to_le_bytes();
        assert_eq!(
            MemberId::from_bytes(&bytes),
            Err(Error::DeserializationError)
        );

        let id = MemberId::new(42).unwrap();
        assert_eq!(MemberId::from_bytes(&id.to_bytes().unwrap()).unwrap(), id);
    }

    #[test]
    fn roster_assigns_ordered_ids() {
        let roster = Roster::new([ALICE, BOB, CAROL]).unwrap();

        assert_eq!(roster.len(), 3);
        assert_eq!(
            roster.ids().map(MemberId::get).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(roster.find(BOB), MemberId::new(2));
        assert_eq!(roster.get(MemberId::new(3).unwrap()).unwrap().operator, CAROL);
        assert!(!roster.contains(MemberId::new(4).unwrap()));
    }

    #[test]
    fn identifiers_are_bounded() {
        assert_eq!(next_id(0), Ok(MemberId::new(1).unwrap()));
        assert_eq!(
            next_id(u32::MAX as usize - 1),
            Ok(MemberId::new(u32::MAX).unwrap())
        );
        assert_eq!(next_id(u32::MAX as usize), Err(Error::TooManyMembers));
        assert_eq!(next_id(usize::MAX), Err(Error::TooManyMembers));
    }

    #[test]
    fn roster_rejects_duplicates() {
        assert_eq!(
            Roster::new([ALICE, BOB, ALICE]),
            Err(Error::DuplicateOperator(ALICE.to_string()))
        );
    }

    #[test]
    fn admission_filters_on_stake() {
        let mut monitor = LocalStakeMonitor::new();
        monitor.stake_tokens(ALICE).unwrap();
        monitor.stake_tokens(CAROL).unwrap();

        let roster = Roster::admit([ALICE, BOB, CAROL], &monitor).unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.find(ALICE), MemberId::new(1));
        assert_eq!(roster.find(CAROL), MemberId::new(2));
        assert_eq!(roster.find(BOB), None);
    }

    #[test]
    fn admission_propagates_invalid_addresses() {
        let monitor = LocalStakeMonitor::new();

        assert!(matches!(
            Roster::admit(["not an address"], &monitor),
            Err(Error::InvalidAddress(_))
        ));
    }
}
