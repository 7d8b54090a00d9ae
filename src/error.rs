use crate::member::MemberId;
use crate::utils::String;

/// Errors that may happen during a GJKR distributed key generation session.
///
/// Cryptographic misbehavior of other members is never surfaced through this
/// type: it is turned into accusations and, eventually, disqualifications in
/// the session [`DkgResult`](crate::dkg::DkgResult).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Serialization error
    #[error("An error happened while serializing.")]
    SerializationError,
    /// Deserialization error
    #[error("An error happened while deserializing.")]
    DeserializationError,
    /// Point compression error
    #[error("An error happened while compressing a point.")]
    CompressionError,
    /// Symmetric encryption failure
    #[error("Could not encrypt the secret share.")]
    EncryptionError,
    /// Encrypted secret share decryption failure
    #[error("Could not decrypt encrypted share.")]
    DecryptionError,
    /// Secret share verification failure against the sender's commitments
    #[error("The secret share is not correct.")]
    ShareVerificationError,
    /// Secret share verification failure against the sender's public key share points
    #[error("The secret share does not match the public key share points.")]
    PointsVerificationError,
    /// A revealed ephemeral private key does not match its published public key
    #[error("The revealed ephemeral key of member {0} does not match its published public key.")]
    InvalidRevealedKey(MemberId),
    /// A commitment or public key share point vector of the wrong length
    #[error("Expected {expected} commitment points but got {actual}.")]
    InvalidCommitmentLength {
        /// The threshold of the session.
        expected: usize,
        /// The received length.
        actual: usize,
    },
    /// Invalid session parameters
    #[error("Invalid threshold parameters: n = {n}, t = {t}, quorum = {quorum}.")]
    InvalidParameters {
        /// Number of members.
        n: u32,
        /// Polynomial threshold.
        t: u32,
        /// Minimum size of the qualified set.
        quorum: u32,
    },
    /// The roster size does not match the session parameters
    #[error("The number of members {0} does not match DKG instance parameters {1}.")]
    InvalidNumberOfMembers(usize, u32),
    /// The roster cannot assign an identifier to one more member
    #[error("A roster holds at most {} members.", u32::MAX)]
    TooManyMembers,
    /// A member identifier is not part of the roster
    #[error("Member {0} is not part of the roster.")]
    UnknownMember(MemberId),
    /// The same operator was admitted twice
    #[error("Operator {0} appears more than once in the roster.")]
    DuplicateOperator(String),
    /// An operator address is not a valid hex address
    #[error("Not a valid operator address: {0}.")]
    InvalidAddress(String),
    /// A message arrived for a phase that is already closed
    #[error("Message for a closed phase was rejected.")]
    PhaseClosed,
    /// A message arrived for a phase that is not open yet
    #[error("Message for a phase that is not open yet was rejected.")]
    PhaseNotOpen,
    /// A message is well-typed but violates the expected shape
    #[error("Malformed message from member {0}.")]
    MalformedMessage(MemberId),
    /// The member is missing some others' secret shares
    #[error("Some shares are missing.")]
    MissingShares,
    /// The messaging collaborator failed
    #[error("Channel error: {0}")]
    Channel(String),
    /// Custom error
    #[error("{0}")]
    Custom(String),
}

/// Result type alias used throughout this crate.
pub type GjkrResult<T> = Result<T, Error>;
