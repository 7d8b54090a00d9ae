//! Benchmarks for GJKR distributed key generation.

#[macro_use]
extern crate criterion;

use criterion::Criterion;

use rand::rngs::OsRng;

use gjkr_dkg::dkg::{Member, Message, Phase, SecretPolynomials, Transcript};
use gjkr_dkg::member::{MemberId, Roster};
use gjkr_dkg::parameters::ThresholdParameters;
use gjkr_dkg::testing::Secp256k1Sha256;
use gjkr_dkg::CipherSuite;

type Suite = Secp256k1Sha256;

const NUMBER_OF_MEMBERS: u32 = 5;
const THRESHOLD_OF_MEMBERS: u32 = 3;
const QUORUM_OF_MEMBERS: u32 = 4;

fn roster() -> Roster {
    Roster::new((1..=NUMBER_OF_MEMBERS).map(|i| format!("0x{:040x}", i))).unwrap()
}

fn publish(transcript: &mut Transcript<Suite>, messages: Vec<Message<Suite>>) {
    for message in messages {
        transcript.record(message).unwrap();
    }
}

/// Run a whole honest session with every member in lockstep over one
/// transcript.
fn run_session(params: &ThresholdParameters<Suite>, roster: &Roster) {
    let mut rng = OsRng;
    let mut transcript = Transcript::new(params, roster).unwrap();

    let mut members = Vec::new();
    let mut outbox = Vec::new();
    for index in roster.ids() {
        let (member, messages) = Member::new(params, roster, index, &mut rng).unwrap();
        members.push(member);
        outbox.extend(messages);
    }
    publish(&mut transcript, outbox);

    transcript.advance_to(Phase::Sharing);
    let mut sharing = Vec::new();
    let mut outbox = Vec::new();
    for member in members {
        let (member, messages) = member.to_sharing(&transcript, &mut rng).unwrap();
        sharing.push(member);
        outbox.extend(messages);
    }
    publish(&mut transcript, outbox);

    transcript.advance_to(Phase::SharesAccusation);
    let mut justifying = Vec::new();
    let mut outbox = Vec::new();
    for member in sharing {
        let (member, message) = member.to_shares_justification(&transcript).unwrap();
        justifying.push(member);
        outbox.push(message);
    }
    publish(&mut transcript, outbox);

    transcript.advance_to(Phase::PointsSharing);
    let mut points = Vec::new();
    let mut outbox = Vec::new();
    for member in justifying {
        let (member, message) = member.to_points_sharing(&transcript).unwrap();
        points.push(member);
        outbox.push(message);
    }
    publish(&mut transcript, outbox);

    transcript.advance_to(Phase::PointsAccusation);
    let mut justifying = Vec::new();
    let mut outbox = Vec::new();
    for member in points {
        let (member, message) = member.to_points_justification(&transcript).unwrap();
        justifying.push(member);
        outbox.push(message);
    }
    publish(&mut transcript, outbox);

    transcript.advance_to(Phase::PointsResolution);
    for member in justifying {
        let (result, _) = member.finish(&transcript).unwrap();
        assert!(result.success);
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let params =
        ThresholdParameters::<Suite>::new(NUMBER_OF_MEMBERS, THRESHOLD_OF_MEMBERS, QUORUM_OF_MEMBERS)
            .unwrap();
    let roster = roster();
    let first = MemberId::new(1).unwrap();
    let second = MemberId::new(2).unwrap();
    let mut rng = OsRng;

    c.bench_function("Pedersen generator derivation", |b| {
        b.iter(Suite::pedersen_generator)
    });

    c.bench_function("Member creation", |b| {
        b.iter(|| Member::new(&params, &roster, first, &mut rng).unwrap())
    });

    let polynomials = SecretPolynomials::<Suite>::generate(&params, &mut rng);
    let pedersen_generator = Suite::pedersen_generator();
    let commitments = polynomials.commitments(&pedersen_generator);
    let points = polynomials.public_key_share_points();
    let share = polynomials.share_for(first, second);

    c.bench_function("Share verification against commitments", |b| {
        b.iter(|| share.verify(&commitments, &pedersen_generator).unwrap())
    });

    c.bench_function("Share verification against points", |b| {
        b.iter(|| share.verify_points(&points).unwrap())
    });

    let mut transcript = Transcript::new(&params, &roster).unwrap();
    let mut members = Vec::new();
    for index in roster.ids() {
        let (member, messages) = Member::new(&params, &roster, index, &mut rng).unwrap();
        members.push(member);
        publish(&mut transcript, messages);
    }
    transcript.advance_to(Phase::Sharing);
    let member = members[0].clone();

    c.bench_function("Sharing", |b| {
        b.iter(|| member.clone().to_sharing(&transcript, &mut rng).unwrap())
    });

    let mut group = c.benchmark_group("Full session");
    group.sample_size(10);
    group.bench_function("5 members, threshold 3", |b| {
        b.iter(|| run_session(&params, &roster))
    });
    group.finish();
}

criterion_group!(dkg_benches, criterion_benchmark);
criterion_main!(dkg_benches);
