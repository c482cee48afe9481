// Preset report
//
// Purpose: Print the snapshot of every simulator preset, as text or JSON
// Usage: cargo run --features report --bin preset_report [-- --json]

use labverse_engine::{SimulatorKind, SimulatorSession, Snapshot};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labverse_engine=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let as_json = std::env::args().any(|arg| arg == "--json");

    for kind in SimulatorKind::all() {
        let mut session = SimulatorSession::new(*kind);
        tracing::info!("Simulator {} ({} presets)", kind.id(), kind.presets().len());

        print_snapshot("baseline", &session.snapshot(), as_json)?;
        for preset in kind.presets() {
            let snapshot = session.apply_preset(preset.id)?;
            print_snapshot(preset.name, &snapshot, as_json)?;
        }
    }

    Ok(())
}

fn print_snapshot(name: &str, snapshot: &Snapshot, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    println!("== {} / {}", snapshot.simulator.id(), name);
    for reading in &snapshot.inputs {
        let flag = if reading.is_abnormal() { " *" } else { "" };
        println!("  {:<24} {}{}", reading.label, reading.display, flag);
    }
    for derived in &snapshot.derived {
        println!("  {:<24} {}", derived.label, derived.display());
    }
    for classification in &snapshot.classifications {
        println!("  {:<24} {}", classification.id, classification.label);
    }
    for note in &snapshot.notes {
        println!("  note: {}", note);
    }
    println!();
    Ok(())
}
