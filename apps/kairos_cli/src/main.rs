use anyhow::{anyhow, bail, Context};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use kairos::aspects::{AspectCalculator, AspectKind};
use kairos::bodies::Body;
use kairos::engine::TransitEngine;
use kairos::ephemeris::MeanMotionOracle;
use kairos::ingress::{sort_chronologically, Refinement, ScanSettings};
use kairos::tables::{EngineTables, UnknownAspectDefault, UnknownIdentifierPolicy};
use kairos::timing::FrequencyBand;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kairos", author, version, about = "Transit and aspect timing")]
struct Cli {
    /// TOML or JSON file overriding the built-in body and aspect tables
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aspect formed by two bodies at the given longitudes
    Aspect {
        body_a: String,
        /// Ecliptic longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon_a: f64,
        body_b: String,
        #[arg(allow_hyphen_values = true)]
        lon_b: f64,
    },
    /// How often an aspect recurs and how long it stays in orb
    Timing {
        body_a: String,
        body_b: String,
        aspect: String,
        /// Current distance from exact, in degrees
        #[arg(long, default_value_t = 0.0)]
        orb: f64,
        /// Substitute default traits for unknown identifiers instead of failing
        #[arg(long)]
        lenient: bool,
    },
    /// Sign ingresses of bodies moving at their mean speed
    Ingress {
        /// Starting position as NAME=LONGITUDE, e.g. moon=12.5 (repeatable)
        #[arg(long = "body", required = true)]
        bodies: Vec<String>,
        /// Scan start (RFC 3339); defaults to now
        #[arg(long)]
        start: Option<String>,
        #[arg(long, default_value_t = 30)]
        days: i64,
        #[arg(long, default_value_t = 24)]
        step_hours: i64,
        /// Bisect each crossing to within a minute
        #[arg(long)]
        refine: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let tables = match &cli.tables {
        Some(path) => EngineTables::from_file(path)?,
        None => {
            log::debug!("Using the built-in engine tables");
            EngineTables::standard().clone()
        }
    };

    match cli.command {
        Command::Aspect {
            body_a,
            lon_a,
            body_b,
            lon_b,
        } => aspect(&tables, cli.json, &body_a, lon_a, &body_b, lon_b),
        Command::Timing {
            body_a,
            body_b,
            aspect,
            orb,
            lenient,
        } => timing(&tables, cli.json, &body_a, &body_b, &aspect, orb, lenient),
        Command::Ingress {
            bodies,
            start,
            days,
            step_hours,
            refine,
        } => ingress(&tables, cli.json, &bodies, start.as_deref(), days, step_hours, refine),
    }
}

fn aspect(tables: &EngineTables, json: bool, body_a: &str, lon_a: f64, body_b: &str, lon_b: f64) -> anyhow::Result<()> {
    let a: Body = body_a.parse()?;
    let b: Body = body_b.parse()?;
    let speeds = (signed_mean_speed(tables, a), signed_mean_speed(tables, b));

    let observation = AspectCalculator::new(tables).observe(a, lon_a, b, lon_b, Some(speeds));
    if json {
        println!("{}", serde_json::to_string_pretty(&observation)?);
        return Ok(());
    }

    match observation {
        Some(observation) => {
            let motion = match observation.is_applying {
                Some(true) => "applying",
                Some(false) => "separating",
                None => "stationary",
            };
            println!(
                "{} {} {}: separation {:.2}°, orb {:.2}° ({}{})",
                a,
                observation.aspect.kind,
                b,
                observation.separation,
                observation.current_orb,
                motion,
                if observation.is_exact { ", exact" } else { "" }
            );
        }
        None => println!("{} and {} form no major aspect", a, b),
    }
    Ok(())
}

fn timing(
    tables: &EngineTables,
    json: bool,
    body_a: &str,
    body_b: &str,
    aspect: &str,
    orb: f64,
    lenient: bool,
) -> anyhow::Result<()> {
    let policy = if lenient {
        UnknownIdentifierPolicy::UseDefaults
    } else {
        UnknownIdentifierPolicy::Reject
    };
    let max_orb = match aspect.parse::<AspectKind>().ok().and_then(|kind| tables.aspect(kind)) {
        Some(definition) => definition.max_orb,
        None => UnknownAspectDefault::MAX_ORB,
    };
    if !(0.0..=max_orb).contains(&orb) {
        bail!("orb {} is outside 0..={} for {}", orb, max_orb, aspect);
    }

    log::debug!("Timing {} {} {} at orb {} ({:?})", body_a, aspect, body_b, orb, policy);
    let engine = TransitEngine::with_tables(tables, MeanMotionOracle::new(Utc::now())).with_policy(policy);
    let timing = engine.aspect_timing_by_name(body_a, body_b, aspect, orb)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&timing)?);
        return Ok(());
    }
    println!(
        "{} {} {}: recurs {}",
        body_a,
        aspect,
        body_b,
        FrequencyBand::describe(timing.frequency_years)
    );
    println!(
        "in orb for {:.1} days, {:.1} days remaining",
        timing.duration.total_duration_days, timing.duration.remaining_days
    );
    Ok(())
}

fn ingress(
    tables: &EngineTables,
    json: bool,
    bodies: &[String],
    start: Option<&str>,
    days: i64,
    step_hours: i64,
    refine: bool,
) -> anyhow::Result<()> {
    let start = match start {
        Some(text) => DateTime::parse_from_rfc3339(text)
            .with_context(|| format!("Invalid start time '{}'", text))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };
    let positions = bodies
        .iter()
        .map(|entry| parse_position(entry))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let scanned: Vec<Body> = positions.iter().map(|(body, _)| *body).collect();

    let (step, end) = scan_window(start, days, step_hours)?;
    let mut settings = ScanSettings::with_step(step);
    if refine {
        settings = settings.refined(Refinement::bisection());
    }
    log::info!(
        "Scanning {} bodies from {} to {} every {} hours{}",
        scanned.len(),
        start,
        end,
        step_hours,
        if refine { " with bisection" } else { "" }
    );
    let oracle = MeanMotionOracle::from_tables(start, tables, &positions);
    let engine = TransitEngine::with_tables(tables, oracle).with_scan_settings(settings);

    let mut events = engine.scan_ingresses(&scanned, start, end)?;
    sort_chronologically(&mut events);

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }
    if events.is_empty() {
        println!("No ingresses in the next {} days", days);
    }
    for event in &events {
        println!(
            "{}  {:<10} {} -> {}{}",
            event.timestamp.format("%Y-%m-%d %H:%M"),
            event.body.name(),
            event.from_sign,
            event.to_sign,
            if event.retrograde { " (retrograde)" } else { "" }
        );
    }
    Ok(())
}

/// Sampling step and end instant for a scan of `days` from `start`.
fn scan_window(start: DateTime<Utc>, days: i64, step_hours: i64) -> anyhow::Result<(Duration, DateTime<Utc>)> {
    if step_hours <= 0 {
        bail!("--step-hours must be positive, got {}", step_hours);
    }
    if days < 0 {
        bail!("--days must not be negative, got {}", days);
    }
    let step = Duration::try_hours(step_hours).ok_or_else(|| anyhow!("--step-hours {} is too large", step_hours))?;
    let end = Duration::try_days(days)
        .and_then(|span| start.checked_add_signed(span))
        .ok_or_else(|| anyhow!("--days {} reaches past the supported date range", days))?;
    Ok((step, end))
}

/// `moon=12.5` -> (Moon, 12.5)
fn parse_position(entry: &str) -> anyhow::Result<(Body, f64)> {
    let (name, longitude) = entry
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected NAME=LONGITUDE, got '{}'", entry))?;
    let body: Body = name.parse()?;
    let longitude: f64 = longitude
        .trim()
        .parse()
        .with_context(|| format!("Invalid longitude for {}", body))?;
    Ok((body, longitude))
}

fn signed_mean_speed(tables: &EngineTables, body: Body) -> f64 {
    let speed = tables.body(body).mean_daily_speed;
    if body.is_node() {
        -speed
    } else {
        speed
    }
}
