//! Senwell CLI - Command-line interface for the senwell scoring engine
//!
//! Commands:
//! - assess: Score raw profile records into assessment reports (batch mode)
//! - validate: Validate raw profile schema
//! - reference: Print the reference ranges and weights active for an age
//! - schema: Print schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use senwell_score::pipeline::calculate_fitness_score;
use senwell_score::reference::{
    weights_for, BLOOD_PRESSURE_BANDS, BMI_BANDS, EXERCISE_TARGET_MINUTES, HBA1C_BANDS,
    HEART_RATE_BANDS,
};
use senwell_score::report::{AssessmentReport, ReportEncoder};
use senwell_score::schema::{ProfileAdapter, SCHEMA_VERSION};
use senwell_score::types::{AgeBracket, Gender};
use senwell_score::{ENGINE_VERSION, REPORT_VERSION};

/// Senwell - deterministic wellness scoring for senior health profiles
#[derive(Parser)]
#[command(name = "senwell")]
#[command(author = "Senwell Labs")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Score health profiles into wellness assessments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score raw profile records into assessment reports (batch mode)
    Assess {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,
    },

    /// Validate raw profile schema
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the reference ranges and weights active for an age
    Reference {
        /// Age to resolve the bracket for
        #[arg(long)]
        age: u32,

        /// Gender selecting the weight vector
        #[arg(long, default_value = "other")]
        gender: GenderArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,

        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one profile per line)
    Ndjson,
    /// JSON array of profiles
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one report per line)
    Ndjson,
    /// JSON array of reports
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
    Other,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
            GenderArg::Other => Gender::Other,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (wellness.profile.v1)
    Input,
    /// Output schema (wellness.assessment.v1)
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), SenwellCliError> {
    match cli.command {
        Commands::Assess {
            input,
            output,
            input_format,
            output_format,
        } => cmd_assess(&input, &output, input_format, output_format),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Reference { age, gender, json } => cmd_reference(age, gender.into(), json),

        Commands::Schema {
            schema_type,
            json_schema,
        } => cmd_schema(schema_type, json_schema),
    }
}

fn read_input(input: &PathBuf) -> Result<String, SenwellCliError> {
    if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("reading profiles from terminal; pipe input or pass -i <file>");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn cmd_assess(
    input: &PathBuf,
    output: &PathBuf,
    input_format: InputFormat,
    output_format: OutputFormat,
) -> Result<(), SenwellCliError> {
    let input_data = read_input(input)?;

    let raw_profiles = match input_format {
        InputFormat::Ndjson => ProfileAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json => ProfileAdapter::parse_array(&input_data)?,
    };

    if raw_profiles.is_empty() {
        return Err(SenwellCliError::NoProfiles);
    }

    let encoder = ReportEncoder::new();
    let mut reports: Vec<AssessmentReport> = Vec::new();

    for raw in &raw_profiles {
        let profile = ProfileAdapter::to_canonical(raw)?;
        let assessment = calculate_fitness_score(&profile)?;
        reports.push(encoder.encode_now(&profile, raw.profile_id.as_deref(), &assessment));
    }

    let output_data = format_output(&reports, &output_format)?;

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_validate(
    input: &PathBuf,
    input_format: InputFormat,
    json: bool,
) -> Result<(), SenwellCliError> {
    let input_data = read_input(input)?;

    let raw_profiles = match input_format {
        InputFormat::Ndjson => ProfileAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json => ProfileAdapter::parse_array(&input_data)?,
    };

    let failures = ProfileAdapter::validate_profiles(&raw_profiles);

    let report = ValidationReport {
        total_profiles: raw_profiles.len(),
        valid_profiles: raw_profiles.len() - failures.len(),
        invalid_profiles: failures.len(),
        errors: failures
            .iter()
            .map(|f| ValidationErrorDetail {
                index: f.index,
                profile_id: f.profile_id.clone(),
                error: f.error.to_string(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total profiles:   {}", report.total_profiles);
        println!("Valid profiles:   {}", report.valid_profiles);
        println!("Invalid profiles: {}", report.invalid_profiles);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!(
                    "  - Profile {} (index {}): {}",
                    err.profile_id.as_deref().unwrap_or("unknown"),
                    err.index,
                    err.error
                );
            }
        }
    }

    if report.invalid_profiles > 0 {
        Err(SenwellCliError::ValidationFailed(report.invalid_profiles))
    } else {
        Ok(())
    }
}

fn cmd_reference(age: u32, gender: Gender, json: bool) -> Result<(), SenwellCliError> {
    let bracket = AgeBracket::of(age);
    let idx = bracket.index();
    let bmi = BMI_BANDS[idx];
    let heart_rate = HEART_RATE_BANDS[idx];
    let blood_pressure = BLOOD_PRESSURE_BANDS[idx];
    let hba1c = HBA1C_BANDS[idx];
    let exercise_target = EXERCISE_TARGET_MINUTES[idx];
    let weights = weights_for(gender);

    if json {
        let value = serde_json::json!({
            "age": age,
            "bracket": bracket.as_str(),
            "reference_bands": {
                "bmi": { "optimal": bmi.optimal, "range": bmi.range },
                "heart_rate": { "optimal": heart_rate.optimal, "range": heart_rate.range },
                "systolic_bp": {
                    "optimal": blood_pressure.systolic.optimal,
                    "range": blood_pressure.systolic.range
                },
                "diastolic_bp": {
                    "optimal": blood_pressure.diastolic.optimal,
                    "range": blood_pressure.diastolic.range
                },
                "hba1c": { "optimal": hba1c.optimal, "range": hba1c.range },
            },
            "exercise_target_minutes": exercise_target,
            "weights": {
                "gender": gender.as_str(),
                "bmi": weights.bmi,
                "heart_rate": weights.heart_rate,
                "sleep": weights.sleep,
                "exercise": weights.exercise,
                "smoking": weights.smoking,
                "alcohol": weights.alcohol,
                "chronic_conditions": weights.chronic_conditions,
                "stress": weights.stress,
                "blood_pressure": weights.blood_pressure,
            },
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Reference for age {} (bracket {})", age, bracket.as_str());
        println!("==========================================");
        println!("BMI:            optimal {:.1}, range {:.1}", bmi.optimal, bmi.range);
        println!(
            "Heart rate:     optimal {:.0} bpm, range {:.0}",
            heart_rate.optimal, heart_rate.range
        );
        println!(
            "Systolic BP:    optimal {:.0} mmHg, range {:.0}",
            blood_pressure.systolic.optimal, blood_pressure.systolic.range
        );
        println!(
            "Diastolic BP:   optimal {:.0} mmHg, range {:.0}",
            blood_pressure.diastolic.optimal, blood_pressure.diastolic.range
        );
        println!("HbA1c:          optimal {:.1}%, range {:.1}", hba1c.optimal, hba1c.range);
        println!("Exercise:       {} minutes/week", exercise_target);
        println!("\nWeight vector ({}):", gender.as_str());
        println!("  bmi {:.2}  heart_rate {:.2}  sleep {:.2}", weights.bmi, weights.heart_rate, weights.sleep);
        println!("  exercise {:.2}  smoking {:.2}  alcohol {:.2}", weights.exercise, weights.smoking, weights.alcohol);
        println!(
            "  chronic {:.2}  stress {:.2}  blood_pressure {:.2}",
            weights.chronic_conditions, weights.stress, weights.blood_pressure
        );
    }

    Ok(())
}

fn cmd_schema(schema_type: SchemaType, json_schema: bool) -> Result<(), SenwellCliError> {
    match schema_type {
        SchemaType::Input => {
            if json_schema {
                println!("{}", get_input_json_schema());
            } else {
                println!("Input Schema: {}", SCHEMA_VERSION);
                println!();
                println!("A wellness.profile.v1 record carries:");
                println!();
                println!("- age (defaults to 65) and gender (male, female, other)");
                println!("- height {{value, unit: cm|in}} and weight {{value, unit: kg|lb}},");
                println!("  or a precomputed bmi fallback");
                println!("- heart_rate (resting bpm), systolic_bp, diastolic_bp (mmHg)");
                println!("- good_sleep_quality, exercise_minutes (weekly),");
                println!("  smoking_status (never, former, current), alcohol_units (weekly)");
                println!("- chronic_conditions severities 0-100:");
                println!("  diabetes, hypertension, heart_related, cancer, others");
                println!("- stress_level (none, mild, high) and hba1c (percent)");
                println!();
                println!("All fields beyond schema_version are optional; absent clinical");
                println!("metrics score neutral rather than zero.");
            }
        }
        SchemaType::Output => {
            if json_schema {
                println!("{}", get_output_json_schema());
            } else {
                println!("Output Schema: {}", REPORT_VERSION);
                println!();
                println!("An assessment report contains:");
                println!();
                println!("- report_version: Schema version ({})", REPORT_VERSION);
                println!("- producer: {{ name, version, instance_id }}");
                println!("- provenance: {{ profile_id, computed_at_utc }}");
                println!("- quality: {{ coverage, missing }}");
                println!("- summary: {{ score 0-100, band, bmi, age_bracket }}");
                println!("- breakdown: per-metric fractions in [0, 1]");
                println!("- recommendations: up to 5 {{ text, impact, priority }}");
            }
        }
    }

    Ok(())
}

// Helper functions

fn format_output(
    reports: &[AssessmentReport],
    format: &OutputFormat,
) -> Result<String, SenwellCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for report in reports {
                lines.push(serde_json::to_string(report)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(reports)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(reports)?),
    }
}

fn get_input_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://senwell.app/schemas/wellness.profile.v1.json",
        "title": "wellness.profile.v1",
        "description": "Senwell raw health profile schema",
        "type": "object",
        "required": ["schema_version"],
        "properties": {
            "schema_version": {
                "type": "string",
                "const": "wellness.profile.v1"
            },
            "profile_id": { "type": "string" },
            "age": { "type": "integer", "minimum": 0 },
            "gender": { "type": "string", "enum": ["male", "female", "other"] },
            "height": {
                "type": "object",
                "required": ["value", "unit"],
                "properties": {
                    "value": { "type": "number", "exclusiveMinimum": 0 },
                    "unit": { "type": "string", "enum": ["cm", "in"] }
                }
            },
            "weight": {
                "type": "object",
                "required": ["value", "unit"],
                "properties": {
                    "value": { "type": "number", "exclusiveMinimum": 0 },
                    "unit": { "type": "string", "enum": ["kg", "lb"] }
                }
            },
            "bmi": { "type": "number", "exclusiveMinimum": 0 },
            "heart_rate": { "type": "integer", "exclusiveMinimum": 0 },
            "good_sleep_quality": { "type": "boolean" },
            "exercise_minutes": { "type": "integer", "minimum": 0 },
            "smoking_status": { "type": "string", "enum": ["never", "former", "current"] },
            "alcohol_units": { "type": "integer", "minimum": 0 },
            "chronic_conditions": {
                "type": "object",
                "properties": {
                    "diabetes": { "type": "integer", "minimum": 0, "maximum": 100 },
                    "hypertension": { "type": "integer", "minimum": 0, "maximum": 100 },
                    "heart_related": { "type": "integer", "minimum": 0, "maximum": 100 },
                    "cancer": { "type": "integer", "minimum": 0, "maximum": 100 },
                    "others": { "type": "integer", "minimum": 0, "maximum": 100 }
                }
            },
            "stress_level": { "type": "string", "enum": ["none", "mild", "high"] },
            "hba1c": { "type": "number", "exclusiveMinimum": 0 },
            "systolic_bp": { "type": "integer", "exclusiveMinimum": 0 },
            "diastolic_bp": { "type": "integer", "exclusiveMinimum": 0 }
        }
    })
    .to_string()
}

fn get_output_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://senwell.app/schemas/wellness.assessment.v1.json",
        "title": "wellness.assessment.v1",
        "description": "Senwell assessment report schema",
        "type": "object",
        "required": ["report_version", "producer", "provenance", "quality", "summary", "breakdown", "recommendations"],
        "properties": {
            "report_version": { "type": "string" },
            "producer": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "version": { "type": "string" },
                    "instance_id": { "type": "string" }
                }
            },
            "provenance": {
                "type": "object",
                "properties": {
                    "profile_id": { "type": "string" },
                    "computed_at_utc": { "type": "string" }
                }
            },
            "quality": {
                "type": "object",
                "properties": {
                    "coverage": { "type": "number" },
                    "missing": { "type": "array", "items": { "type": "string" } }
                }
            },
            "summary": {
                "type": "object",
                "properties": {
                    "score": { "type": "integer", "minimum": 0, "maximum": 100 },
                    "band": { "type": "string", "enum": ["excellent", "good", "fair", "poor"] },
                    "bmi": { "type": "number" },
                    "age_bracket": { "type": "string" }
                }
            },
            "breakdown": { "type": "object" },
            "recommendations": {
                "type": "array",
                "maxItems": 5,
                "items": {
                    "type": "object",
                    "properties": {
                        "text": { "type": "string" },
                        "impact": { "type": "string" },
                        "priority": { "type": "string", "enum": ["high", "medium", "low"] }
                    }
                }
            }
        }
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum SenwellCliError {
    Io(io::Error),
    Score(senwell_score::ScoreError),
    Json(serde_json::Error),
    NoProfiles,
    ValidationFailed(usize),
}

impl From<io::Error> for SenwellCliError {
    fn from(e: io::Error) -> Self {
        SenwellCliError::Io(e)
    }
}

impl From<senwell_score::ScoreError> for SenwellCliError {
    fn from(e: senwell_score::ScoreError) -> Self {
        SenwellCliError::Score(e)
    }
}

impl From<serde_json::Error> for SenwellCliError {
    fn from(e: serde_json::Error) -> Self {
        SenwellCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<SenwellCliError> for CliError {
    fn from(e: SenwellCliError) -> Self {
        match e {
            SenwellCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            SenwellCliError::Score(e) => CliError {
                code: "SCORE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Ensure input matches the wellness.profile.v1 schema".to_string()),
            },
            SenwellCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            SenwellCliError::NoProfiles => CliError {
                code: "NO_PROFILES".to_string(),
                message: "No profiles found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            SenwellCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} profiles failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_profiles: usize,
    valid_profiles: usize,
    invalid_profiles: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    profile_id: Option<String>,
    error: String,
}
