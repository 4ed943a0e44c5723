use relaywire_core::{
    ClientMessage, Event, EventBuilder, Filter, KeyPair, Kind, RelayMessage, Subscription, Tag,
    Timestamp, identity, nip19, nip19::EventPointer,
};
use std::time::Instant;

fn create_signed_event(key_pair: &KeyPair, tag_count: usize) -> anyhow::Result<Event> {
    let mut builder = EventBuilder::new()
        .created_at(Timestamp::new(1711384422))
        .kind(Kind::TEXT_NOTE)
        .content("Test event content for codec benchmarking");
    for i in 0..tag_count {
        builder = builder.add_tag(Tag::event(format!("{:064x}", i), Some("wss://relay.example.com")));
    }
    Ok(builder.sign(key_pair)?)
}

fn report(label: &str, iterations: usize, duration: std::time::Duration) {
    let per_sec = iterations as f64 / duration.as_secs_f64();

    println!("  {}: {}", label, iterations);
    println!("  Time taken: {:.2}s", duration.as_secs_f64());
    println!("  Operations/sec: {:.0}", per_sec);
    println!(
        "  Avg time per operation: {:.2}µs",
        duration.as_micros() as f64 / iterations as f64
    );
}

fn benchmark_canonical_id(event: &Event) -> anyhow::Result<()> {
    println!("\n=== Benchmark: Canonical Serialization + Event ID ===");

    let iterations = 100_000;
    let start = Instant::now();
    for _ in 0..iterations {
        identity::compute_id(event)?;
    }
    report("Ids computed", iterations, start.elapsed());
    Ok(())
}

fn benchmark_validation(event: &Event) {
    println!("\n=== Benchmark: Full Event Validation (with crypto) ===");

    let iterations = 10_000;
    let start = Instant::now();
    let mut valid = 0;
    for _ in 0..iterations {
        if event.is_valid() {
            valid += 1;
        }
    }
    report("Validations", iterations, start.elapsed());
    println!("  Valid results: {}", valid);
}

fn benchmark_identifiers(event: &Event) -> anyhow::Result<()> {
    println!("\n=== Benchmark: nevent Encode + Decode ===");

    let pointer = EventPointer {
        id: event.id.clone().unwrap_or_default(),
        relays: vec![
            "wss://relay.example.com".to_string(),
            "wss://nostr.wine/".to_string(),
        ],
        author: Some(event.pubkey.clone()),
        kind: Some(1),
    };

    let iterations = 100_000;
    let start = Instant::now();
    for _ in 0..iterations {
        let text = nip19::encode_nevent(&pointer)?;
        nip19::decode_nevent(&text)?;
    }
    report("Round trips", iterations, start.elapsed());
    Ok(())
}

fn benchmark_messages(event: &Event) -> anyhow::Result<()> {
    println!("\n=== Benchmark: Relay Message Decoding ===");

    let relay_event = RelayMessage::Event {
        subscription_id: "bench".to_string(),
        event: event.clone(),
    }
    .to_json()?;
    let req = ClientMessage::Subscribe(Subscription::with_id(
        "bench",
        vec![
            Filter::builder()
                .kind(Kind::TEXT_NOTE)
                .tag("e", ["a", "b", "c"])
                .limit(100)
                .build(),
        ],
    ))
    .to_json()?;

    let iterations = 100_000;
    let start = Instant::now();
    for _ in 0..iterations {
        RelayMessage::from_json(&relay_event)?;
        ClientMessage::from_json(&req)?;
    }
    report("Message pairs", iterations, start.elapsed());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    println!("╔════════════════════════════════════════════════╗");
    println!("║     Relaywire Codec Performance Tests          ║");
    println!("╚════════════════════════════════════════════════╝");

    let key_pair = KeyPair::generate()?;
    let small = create_signed_event(&key_pair, 0)?;
    let tagged = create_signed_event(&key_pair, 20)?;

    benchmark_canonical_id(&small)?;
    benchmark_canonical_id(&tagged)?;
    benchmark_validation(&tagged);
    benchmark_identifiers(&small)?;
    benchmark_messages(&tagged)?;

    println!("\n✅ Codec benchmarks complete!");
    Ok(())
}
