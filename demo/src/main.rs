//! casefile: command-line front end
//!
//! Works on JSON snapshots of complaint records: checks audit trails,
//! produces redacted copies, and masks ad-hoc text. `walkthrough` runs a
//! self-contained in-memory example.
//!
//! Usage:
//!   casefile walkthrough
//!   casefile verify records.json [--backfill]
//!   casefile redact records.json --id <uuid> [--rules rules.toml]
//!   casefile mask "call +44 20 7946 0958" [--stats]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use casefile_audit::Sha256AuditTrail;
use casefile_contracts::{
    error::{CasefileError, CasefileResult},
    history::{AuditStatus, MigrationMode},
    record::{Attachment, Complaint, ComplaintField, ComplaintId, Concern, Note, RecordKind},
    redaction::RedactionOverrides,
};
use casefile_core::{clock::SystemClock, traits::CaseStore, CaseKeeper};
use casefile_redact::{PatternRedactor, RuleSet};
use casefile_store::{CaseSnapshot, InMemoryCaseStore};

// ── CLI definition ────────────────────────────────────────────────────────────

/// casefile: tamper-evident complaint records with redacted exports.
#[derive(Parser)]
#[command(
    name = "casefile",
    about = "Verify audit trails and produce redacted copies of complaint records",
    long_about = "Works on JSON snapshots of complaint, SAR, and escalation records.\n\
                  Each record's history is a SHA-256 hash chain; redaction masks\n\
                  PII-shaped text and drops attachments not marked safe."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an in-memory example: open, update, verify, redact, tamper.
    Walkthrough,
    /// Report the audit status of every record in a snapshot.
    Verify {
        /// Snapshot file to read.
        snapshot: PathBuf,
        /// Regenerate missing or wrong hashes before verifying. This hides
        /// any tampering that happened before the backfill.
        #[arg(long)]
        backfill: bool,
    },
    /// Print the redacted copy of one record as JSON.
    Redact {
        snapshot: PathBuf,
        /// Record id (UUID).
        #[arg(long)]
        id: String,
        /// TOML rule table to use instead of the built-in one.
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Mask a piece of text and print the result.
    Mask {
        text: String,
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Also print how many substitutions each rule made.
        #[arg(long)]
        stats: bool,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Walkthrough => run_walkthrough(),
        Command::Verify { snapshot, backfill } => run_verify(&snapshot, backfill),
        Command::Redact { snapshot, id, rules } => run_redact(&snapshot, &id, rules.as_deref()),
        Command::Mask { text, rules, stats } => run_mask(&text, rules.as_deref(), stats),
    };

    if let Err(e) = result {
        eprintln!("casefile error: {}", e);
        std::process::exit(1);
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

fn load_rules(path: Option<&Path>) -> CasefileResult<RuleSet> {
    match path {
        Some(path) => RuleSet::from_file(path),
        None => Ok(RuleSet::builtin().clone()),
    }
}

fn build_keeper(store: InMemoryCaseStore, rules: RuleSet) -> CaseKeeper {
    CaseKeeper::new(
        Box::new(store),
        Box::new(Sha256AuditTrail::new()),
        Box::new(PatternRedactor::new(rules)),
        Box::new(SystemClock),
    )
}

fn load_keeper(path: &Path, rules: RuleSet, mode: MigrationMode) -> CasefileResult<CaseKeeper> {
    let snapshot = CaseSnapshot::load_from(path)?;
    let keeper = build_keeper(InMemoryCaseStore::new(), rules);
    keeper.import(snapshot.complaints, mode)?;
    Ok(keeper)
}

fn to_json<T: serde::Serialize>(value: &T) -> CasefileResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CasefileError::Serialization {
        reason: e.to_string(),
    })
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_verify(path: &Path, backfill: bool) -> CasefileResult<()> {
    let mode = if backfill { MigrationMode::Backfill } else { MigrationMode::Strict };
    let keeper = load_keeper(path, RuleSet::builtin().clone(), mode)?;

    let mut failures = 0;
    for complaint in keeper.store().all()? {
        let status = keeper.audit_status(&complaint.id)?;
        if status != AuditStatus::Valid {
            failures += 1;
        }
        println!(
            "{}  {:<12}  {:>3} entries  {}",
            complaint.id,
            status.label(),
            complaint.history.len(),
            complaint.title
        );
    }

    if failures > 0 {
        println!();
        println!("{} record(s) did not verify.", failures);
    }
    Ok(())
}

fn run_redact(path: &Path, id: &str, rules: Option<&Path>) -> CasefileResult<()> {
    let id: ComplaintId = id.parse().map_err(|e| CasefileError::ConfigError {
        reason: format!("invalid record id '{}': {}", id, e),
    })?;
    let keeper = load_keeper(path, load_rules(rules)?, MigrationMode::Strict)?;

    let export = keeper.export_redacted(&id)?;
    println!("{}", to_json(&export)?);
    Ok(())
}

fn run_mask(text: &str, rules: Option<&Path>, stats: bool) -> CasefileResult<()> {
    let rules = load_rules(rules)?;
    let (masked, counts) = rules.mask_with_stats(text);

    println!("{}", masked);
    if stats {
        for (rule_id, count) in &counts.by_rule {
            println!("  {:<12} {}", rule_id, count);
        }
        println!("  {:<12} {}", "total", counts.total());
    }
    Ok(())
}

fn run_walkthrough() -> CasefileResult<()> {
    let store = InMemoryCaseStore::new();
    let keeper = build_keeper(store.clone(), RuleSet::builtin().clone());

    println!();
    println!("casefile walkthrough");
    println!("====================");
    println!();

    let mut draft = Complaint::draft(RecordKind::Complaint, "Noise complaint ref NC40021");
    draft.institution = Some("City Council".to_string());
    draft.contact_person = Some("Officer, badge 7731".to_string());
    draft.email = Some("resident@example.org".to_string());
    draft.content = Some("Reported by phone on +44 161 496 0000, no reply.".to_string());
    let id = keeper.open(draft)?;

    keeper.update_status(&id, "Filed")?;
    keeper.add_concern(
        &id,
        Concern {
            id: "c1".to_string(),
            summary: "No acknowledgement within 10 working days".to_string(),
            evidence_urls: vec!["https://council.example/track/NC40021".to_string()],
            ..Concern::default()
        },
    )?;
    keeper.add_note(
        &id,
        "c1",
        Note {
            id: "n1".to_string(),
            text: "Chased environmental.health@council.example".to_string(),
            urls: vec![],
        },
    )?;
    keeper.add_attachment(
        &id,
        Attachment { key: "recording".to_string(), name: "night-1.mp3".to_string(), mime: None },
    )?;

    let mut overrides = RedactionOverrides::default();
    overrides.set(ComplaintField::Institution, false);
    keeper.set_overrides(&id, overrides)?;

    let view = keeper.view(&id, false)?;
    println!("[1] Audit trail ({} entries): {}", view.complaint.history.len(), view.audit_status.label());
    for entry in &view.complaint.history {
        println!("      {}  {:<36} {}", entry.date, entry.event, &entry.hash[..12]);
    }
    println!();

    let export = keeper.export_redacted(&id)?;
    println!("[2] Redacted export (rules v{}):", export.rules_version);
    println!("{}", to_json(&export.complaint)?);
    println!();

    store.update(&id, &mut |c: &mut Complaint| {
        c.history[1].event = "Status updated: Withdrawn".to_string();
        Ok(())
    })?;
    println!(
        "[3] After editing entry 1 in storage: {}",
        keeper.audit_status(&id)?.label()
    );
    println!();
    Ok(())
}
