//! Drives one [`Member`] through a whole session over a [`BroadcastChannel`].
//!
//! Each phase is a broadcast-and-wait barrier: the member publishes its
//! messages, then polls the channel until every member in play has published
//! what the phase expects or the phase deadline passes. Whoever is late is
//! dealt with by the next transition, so a session always ends with a
//! [`DkgResult`].
//!
//! The driver is synchronous: [`DkgSession::run`] blocks the calling thread
//! for the whole session, sleeping with [`std::thread::sleep`] between two
//! polls of the channel. Async callers should run it on a blocking task.
//!
//! Members do not cross a barrier at the same instant, so messages for a
//! phase the local member has not entered yet are held back and recorded
//! once it enters that phase.

use std::thread;
use std::time::{Duration, Instant};

use rand::{CryptoRng, RngCore};
use tracing::{debug, info};

use crate::ciphersuite::CipherSuite;
use crate::dkg::key_generation::Member;
use crate::dkg::result::DkgResult;
use crate::dkg::transcript::{Message, Phase, Transcript};
use crate::error::GjkrResult;
use crate::keys::IndividualSigningKey;
use crate::member::{MemberId, Roster};
use crate::parameters::ThresholdParameters;
use crate::utils::{BTreeMap, BTreeSet, Vec};

/// The messaging collaborator of a session.
///
/// Every message broadcast by any member, including the local one, is
/// eventually returned by [`BroadcastChannel::receive`] to every member, with
/// its sender authenticated by the channel.
pub trait BroadcastChannel<C: CipherSuite> {
    /// Publish a message to every member.
    fn broadcast(&self, message: Message<C>) -> GjkrResult<()>;

    /// The messages delivered since the previous call.
    fn receive(&self) -> GjkrResult<Vec<Message<C>>>;
}

/// The timing configuration of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseTimeouts {
    /// How long a phase stays open for late members.
    pub phase_duration: Duration,
    /// How long to sleep between two polls of the channel.
    pub poll_interval: Duration,
}

impl Default for PhaseTimeouts {
    fn default() -> Self {
        Self {
            phase_duration: Duration::from_secs(30),
            poll_interval: Duration::from_millis(50),
        }
    }
}

/// What a member takes away from a session.
#[derive(Clone, Debug)]
pub struct SessionOutput<C: CipherSuite> {
    /// The outcome of the session.
    pub result: DkgResult<C>,
    /// The member's signing key, if the session succeeded and the member is
    /// qualified.
    pub signing_key: Option<IndividualSigningKey<C>>,
    /// Everything the member recorded, for auditing.
    pub transcript: Transcript<C>,
}

/// A session run by one member.
///
/// Running it blocks the calling thread until the last phase is over, which
/// takes up to seven times [`PhaseTimeouts::phase_duration`].
#[derive(Debug)]
pub struct DkgSession<'a, C: CipherSuite, B: BroadcastChannel<C> + ?Sized> {
    index: MemberId,
    channel: &'a B,
    timeouts: PhaseTimeouts,
    transcript: Transcript<C>,
    /// Messages received before their phase was entered.
    pending: BTreeMap<Phase, Vec<Message<C>>>,
}

impl<'a, C, B> DkgSession<'a, C, B>
where
    C: CipherSuite,
    B: BroadcastChannel<C> + ?Sized,
{
    /// Prepare a session for member `index` of `roster`.
    pub fn new(
        parameters: &ThresholdParameters<C>,
        roster: &Roster,
        index: MemberId,
        channel: &'a B,
        timeouts: PhaseTimeouts,
    ) -> GjkrResult<Self> {
        Ok(Self {
            index,
            channel,
            timeouts,
            transcript: Transcript::new(parameters, roster)?,
            pending: BTreeMap::new(),
        })
    }

    /// Run every phase of the session.
    ///
    /// This blocks the calling thread, polling the channel every
    /// [`PhaseTimeouts::poll_interval`] until each phase completes or times
    /// out.
    ///
    /// Only local misconfiguration and channel failures are returned as
    /// errors; faults of other members end up in the returned [`DkgResult`].
    pub fn run(mut self, mut rng: impl RngCore + CryptoRng) -> GjkrResult<SessionOutput<C>> {
        let parameters = *self.transcript.parameters();
        let roster = self.transcript.roster().clone();

        let (member, messages) = Member::new(&parameters, &roster, self.index, &mut rng)?;
        self.publish(messages)?;
        self.wait(Phase::KeyExchange, &member.in_play())?;

        self.enter(Phase::Sharing);
        let (member, messages) = member.to_sharing(&self.transcript, &mut rng)?;
        self.publish(messages)?;
        self.wait(Phase::Sharing, &member.in_play())?;

        self.enter(Phase::SharesAccusation);
        let (mut member, message) = member.to_shares_justification(&self.transcript)?;
        self.publish(vec![message])?;
        self.wait(Phase::SharesAccusation, &member.in_play())?;

        self.enter(Phase::SharesResolution);
        let reveals = member.reveal_disputed_keys(&self.transcript);
        self.publish(reveals)?;
        self.wait(Phase::SharesResolution, &member.in_play())?;

        self.enter(Phase::PointsSharing);
        let (member, message) = member.to_points_sharing(&self.transcript)?;
        self.publish(vec![message])?;
        self.wait(Phase::PointsSharing, &member.in_play())?;

        self.enter(Phase::PointsAccusation);
        let (mut member, message) = member.to_points_justification(&self.transcript)?;
        self.publish(vec![message])?;
        self.wait(Phase::PointsAccusation, &member.in_play())?;

        self.enter(Phase::PointsResolution);
        let reveals = member.reveal_disputed_keys(&self.transcript);
        self.publish(reveals)?;
        self.wait(Phase::PointsResolution, &member.in_play())?;

        let (result, signing_key) = member.finish(&self.transcript)?;

        Ok(SessionOutput {
            result,
            signing_key,
            transcript: self.transcript,
        })
    }

    fn enter(&mut self, phase: Phase) {
        self.transcript.advance_to(phase);
        info!(member = %self.index, %phase, "entering phase");

        // Anything held back for a phase we skipped past is stale.
        let mut later = self.pending.split_off(&phase);
        let held = later.remove(&phase).unwrap_or_default();
        self.pending = later;

        for message in held {
            self.record(message);
        }
    }

    fn publish(&mut self, messages: Vec<Message<C>>) -> GjkrResult<()> {
        for message in messages {
            // Our own messages are recorded right away; the copy coming back
            // from the channel is a duplicate.
            if let Err(e) = self.transcript.record(message.clone()) {
                debug!(member = %self.index, error = %e, "own message rejected");
            }
            self.channel.broadcast(message)?;
        }

        Ok(())
    }

    fn wait(&mut self, phase: Phase, participants: &BTreeSet<MemberId>) -> GjkrResult<()> {
        let deadline = Instant::now() + self.timeouts.phase_duration;

        loop {
            self.drain()?;

            if self.transcript.is_phase_complete(phase, participants) {
                debug!(member = %self.index, %phase, "phase complete");
                return Ok(());
            }

            if Instant::now() >= deadline {
                info!(member = %self.index, %phase, "phase deadline passed");
                return Ok(());
            }

            thread::sleep(self.timeouts.poll_interval);
        }
    }

    fn drain(&mut self) -> GjkrResult<()> {
        for message in self.channel.receive()? {
            let phase = message.phase();
            if phase > self.transcript.phase() {
                debug!(member = %self.index, sender = %message.sender(), %phase, "holding early message");
                self.pending.entry(phase).or_default().push(message);
            } else {
                self.record(message);
            }
        }

        Ok(())
    }

    fn record(&mut self, message: Message<C>) {
        let sender = message.sender();
        if let Err(e) = self.transcript.record(message) {
            debug!(member = %self.index, %sender, error = %e, "dropping message");
        }
    }
}
