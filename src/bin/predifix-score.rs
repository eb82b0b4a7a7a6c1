//! Score a single sensor reading from the command line.

use std::path::PathBuf;

use predifix::config::{self, LoggingSettings};
use predifix::dashboard::view_model;
use predifix::logging;
use predifix::pipeline::Artifacts;
use predifix::sensor::{ProductGrade, SensorReading};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    reading: SensorReading,
    model_path: Option<PathBuf>,
    encoder_path: Option<PathBuf>,
    json: bool,
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    let quiet = LoggingSettings {
        level: "warn".to_string(),
        write_file: false,
        ..LoggingSettings::default()
    };
    if let Err(err) = logging::init(&quiet) {
        eprintln!("Logging disabled: {err}");
    }

    let mut artifact_settings = match config::load_or_default() {
        Ok(settings) => settings.artifacts,
        Err(err) => {
            tracing::warn!("Ignoring unreadable config: {err}");
            Default::default()
        }
    };
    if options.model_path.is_some() {
        artifact_settings.model_path = options.model_path.clone();
    }
    if options.encoder_path.is_some() {
        artifact_settings.encoder_path = options.encoder_path.clone();
    }

    let artifacts =
        Artifacts::from_settings(&artifact_settings).map_err(|err| err.to_string())?;
    let assessment = artifacts
        .evaluate(&options.reading)
        .map_err(|err| err.to_string())?;

    if options.json {
        let text = serde_json::to_string_pretty(&assessment).map_err(|err| err.to_string())?;
        println!("{text}");
        return Ok(());
    }

    for card in view_model::metric_cards(&assessment) {
        println!("{:<14} {}", format!("{}:", card.title), card.value);
    }
    println!("{:<14} {}", "Status color:", assessment.prediction.status.hex());
    println!("features:");
    for (feature, value) in assessment.features.iter() {
        println!("  {:<8} {value}", feature.display_name());
    }
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut reading = SensorReading::default();
    let mut model_path: Option<PathBuf> = None;
    let mut encoder_path: Option<PathBuf> = None;
    let mut json = false;

    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        match flag {
            "-h" | "--help" => return Err(help_text()),
            "--json" => json = true,
            "--grade" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--grade requires a value".to_string())?;
                reading.grade = value
                    .parse::<ProductGrade>()
                    .map_err(|err| err.to_string())?;
            }
            "--model" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--model requires a value".to_string())?;
                model_path = Some(PathBuf::from(value));
            }
            "--encoder" => {
                idx += 1;
                let value =
                    args.get(idx).ok_or_else(|| "--encoder requires a value".to_string())?;
                encoder_path = Some(PathBuf::from(value));
            }
            "--air" | "--process" | "--rpm" | "--torque" | "--wear" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| format!("{flag} requires a value"))?;
                let parsed = value
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid {flag} value: {value}"))?;
                let slot = match flag {
                    "--air" => &mut reading.air_temp_k,
                    "--process" => &mut reading.process_temp_k,
                    "--rpm" => &mut reading.rotational_speed_rpm,
                    "--torque" => &mut reading.torque_nm,
                    _ => &mut reading.tool_wear_min,
                };
                *slot = parsed;
            }
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }

    // Out-of-range values are rejected here rather than clamped.
    reading.validate().map_err(|err| err.to_string())?;
    Ok(CliOptions {
        reading,
        model_path,
        encoder_path,
        json,
    })
}

fn help_text() -> String {
    [
        "predifix-score",
        "",
        "Usage:",
        "  predifix-score [options]",
        "",
        "Options:",
        "  --grade <L|M|H>        Product grade (default: L).",
        "  --air <K>              Air temperature, 295..=305 (default: 300).",
        "  --process <K>          Process temperature, 305..=315 (default: 310).",
        "  --rpm <n>              Rotational speed, 1100..=2900 (default: 1500).",
        "  --torque <Nm>          Torque, 3..=80 (default: 40).",
        "  --wear <min>           Tool wear, 0..=260 (default: 100).",
        "  --model <model.json>   Classifier artifact (default: config or bundled).",
        "  --encoder <enc.json>   Label encoder artifact (default: config or bundled).",
        "  --json                 Print the full assessment as JSON.",
    ]
    .join("\n")
}
