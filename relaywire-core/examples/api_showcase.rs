//! Walkthrough of the Relaywire Core API
//!
//! Run with: cargo run --example api_showcase

use relaywire_core::{
    ClientMessage, EventBuilder, Filter, KeyPair, Kind, Nip19, RelayMessage, Result,
    SearchConfig, SearchTarget, Subscription, Tag, search,
};

#[tokio::main]
async fn main() -> Result<()> {
    println!("🚀 Relaywire Core API Showcase\n");

    // Keys
    println!("1️⃣  Keys");
    let keys = KeyPair::generate()?;
    println!("   npub: {}", keys.npub()?);
    println!("   {:?}\n", keys);

    // Signing
    println!("2️⃣  Signed Events");
    let event = EventBuilder::new()
        .kind(Kind::TEXT_NOTE)
        .content("Hello from the builder!")
        .tag("t", ["showcase"])
        .add_tag(Tag::public_key(keys.public_key(), None))
        .sign(&keys)?;
    println!("{}", event);
    println!("   ✅ valid: {}\n", event.is_valid());

    // Identifiers
    println!("3️⃣  Shareable Identifiers");
    let nevent = event.encode_nevent(&["wss://relay.example.com".to_string()])?;
    println!("   {}", nevent);
    if let Nip19::Event(pointer) = Nip19::decode(&nevent)? {
        println!("   ✅ points at {} via {:?}\n", pointer.id, pointer.relays);
    }

    // Messages
    println!("4️⃣  Client/Relay Messages");
    let filter = Filter::builder()
        .author(keys.public_key())
        .tag("t", ["showcase"])
        .build();
    let req = ClientMessage::Subscribe(Subscription::new(vec![filter.clone()]));
    println!("   → {}", req.to_json()?);
    println!("   matches our event: {}", filter.matches(&event));

    for line in [
        r#"["EOSE","feed"]"#,
        r#"["OK","abc",false,"blocked: spam"]"#,
        r#"["COUNT","feed",{"count":3}]"#,
    ] {
        println!("   ← {:?}", RelayMessage::from_json(line)?);
    }

    // Vanity search
    println!("\n5️⃣  Vanity Key Search");
    let target = SearchTarget::HexPrefix("ace".to_string());
    let found = search(&target, &SearchConfig::default()).await?;
    println!("   ✅ {} → {}", target, found.public_key());

    Ok(())
}
