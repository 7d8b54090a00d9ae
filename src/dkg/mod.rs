pub(crate) mod accusation;
pub(crate) mod key_generation;
pub(crate) mod message;
pub(crate) mod result;
pub(crate) mod round_types;
pub(crate) mod secret_share;
#[cfg(feature = "std")]
pub(crate) mod session;
pub(crate) mod transcript;

pub use accusation::{AccusationResolver, DisputeRound, RoundVerdict};
pub use key_generation::Member;
pub use message::{
    EphemeralKeyRevealMessage, EphemeralPublicKeyMessage, MemberCommitmentsMessage,
    MemberPublicKeySharePointsMessage, PeerSharesMessage, PointsAccusationsMessage,
    SecretSharesAccusationsMessage,
};
pub use result::{DkgResult, ResultAggregator};
pub use round_types::{
    DkgState, KeyExchange, PointsJustification, PointsSharing, Sharing, SharesJustification,
};
pub use secret_share::{Coefficients, SecretPolynomials, SecretShare};
#[cfg(feature = "std")]
pub use session::{BroadcastChannel, DkgSession, PhaseTimeouts, SessionOutput};
pub use transcript::{Message, Phase, Transcript};
