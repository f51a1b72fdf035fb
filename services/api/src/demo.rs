use clap::Args;
use difficult_ai_core::config::AppConfig;
use difficult_ai_core::error::AppError;
use difficult_ai_core::workflows::conversation::{
    evaluate, render_summary, ConversationSession, Evaluation, ScoreSchema, ScorecardDocument,
    SessionId, SessionMetricsRecord, UtteranceOutcome,
};
use difficult_ai_core::workflows::scenario::{DifficultyScale, PersonaType, Scenario};
use difficult_ai_core::workflows::transcript::TranscriptImporter;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default)]
pub(crate) struct EvaluateArgs {
    /// Number of vague responses
    #[arg(long, default_value_t = 0)]
    pub(crate) vague: u32,
    /// Number of deflections
    #[arg(long, default_value_t = 0)]
    pub(crate) deflections: u32,
    /// Number of commitments made
    #[arg(long, default_value_t = 0)]
    pub(crate) commitments: u32,
    /// Number of user exchanges
    #[arg(long, default_value_t = 0)]
    pub(crate) exchanges: u32,
    /// Difficulty reached by the end of the session
    #[arg(long, default_value_t = 0.0)]
    pub(crate) current_difficulty: f64,
    /// Difficulty the scenario started at
    #[arg(long, default_value_t = 0.0)]
    pub(crate) scenario_difficulty: f64,
    /// Scale both difficulties are given on; defaults to DIFFICULTY_SCALE
    #[arg(long, value_parser = crate::infra::parse_scale)]
    pub(crate) scale: Option<DifficultyScale>,
    /// Scorecard schema (v1 or v2); defaults to SCORECARD_SCHEMA
    #[arg(long, value_parser = crate::infra::parse_schema)]
    pub(crate) schema: Option<ScoreSchema>,
    /// Print the evaluation as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReplayArgs {
    /// CSV transcript with `role,content` columns
    pub(crate) transcript: PathBuf,
    /// Optional JSON scenario mapping used to seed the session
    #[arg(long)]
    pub(crate) scenario: Option<PathBuf>,
    /// Scale of the scenario difficulty (legacy or normalized); defaults to DIFFICULTY_SCALE
    #[arg(long, value_parser = crate::infra::parse_scale)]
    pub(crate) scale: Option<DifficultyScale>,
    /// Scorecard schema (v1 or v2); defaults to SCORECARD_SCHEMA
    #[arg(long, value_parser = crate::infra::parse_schema)]
    pub(crate) schema: Option<ScoreSchema>,
    /// Write the full scorecard document (scenario, evaluation, transcript) as JSON
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Print the evaluation as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Persona the counterpart plays
    #[arg(long, default_value = "ELITE_INTERVIEWER")]
    pub(crate) persona: String,
    /// Starting difficulty on the normalized 0-1 scale
    #[arg(long, default_value_t = 0.5)]
    pub(crate) difficulty: f64,
    /// Scorecard schema (v1 or v2)
    #[arg(long, value_parser = crate::infra::parse_schema)]
    pub(crate) schema: Option<ScoreSchema>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let schema = resolve_schema(args.schema)?;
    let metrics = SessionMetricsRecord {
        vague_response_count: args.vague,
        deflection_count: args.deflections,
        commitments_made: args.commitments,
        total_exchanges: args.exchanges,
        current_difficulty: args.current_difficulty,
        scenario_difficulty: args.scenario_difficulty,
    }
    .normalized_from(resolve_scale(args.scale)?);

    print_evaluation(&evaluate(schema, metrics, None), args.json)
}

pub(crate) fn run_replay(args: ReplayArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let schema = args.schema.unwrap_or(config.scoring.schema);
    let scale = args.scale.unwrap_or(config.scoring.difficulty_scale);

    let transcript = TranscriptImporter::from_path(&args.transcript)?;
    let mut session = match &args.scenario {
        Some(path) => {
            let scenario = load_scenario(path, scale)?;
            ConversationSession::with_scenario(replay_session_id(&args.transcript), scenario)
        }
        None => ConversationSession::new(replay_session_id(&args.transcript)),
    };

    let outcomes = transcript.replay(&mut session);
    if !args.json {
        println!(
            "Replayed {} turns ({} scored) from {}\n",
            transcript.turns().len(),
            outcomes.len(),
            args.transcript.display()
        );
    }

    let evaluation = evaluate(schema, session.metrics(), session.scenario().cloned());
    if let Some(output) = &args.output {
        let document = ScorecardDocument::new(evaluation.clone(), session.transcript().to_vec());
        std::fs::write(output, document.to_json_pretty()?)?;
        if !args.json {
            println!("Scorecard written to {}\n", output.display());
        }
    }

    print_evaluation(&evaluation, args.json)
}

const DEMO_SCRIPT: [&str; 6] = [
    "I think the project went kind of well overall.",
    "Honestly, I'm not sure about the exact numbers.",
    "Before we get to that, can we discuss the team structure?",
    "Wait, hold on",
    "I will send the revised budget by Friday.",
    "We will cut onboarding time by 30 percent before March 15.",
];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let schema = args.schema.unwrap_or_default();
    let persona = PersonaType::parse(&args.persona).unwrap_or(PersonaType::EliteInterviewer);
    let scenario = Scenario::from_value(
        &json!({
            "persona_type": persona.code(),
            "company": "Northwind Analytics",
            "role": "Engineering Manager",
            "stakes": "Final interview loop",
            "user_goal": "Leave with a clear next step",
            "difficulty": args.difficulty,
        }),
        DifficultyScale::Normalized,
    )?;

    println!("Difficult conversation rehearsal demo");
    println!(
        "Persona: {} | Starting difficulty: {:.2}\n",
        persona.label(),
        scenario.difficulty.value()
    );

    let mut session = ConversationSession::with_scenario(SessionId("demo".to_string()), scenario);
    for (turn, utterance) in DEMO_SCRIPT.iter().enumerate() {
        let outcome = session.process_utterance(utterance);
        print_turn(turn + 1, utterance, &outcome);
    }

    let stats = session.stats();
    println!(
        "\nSession stats: level {}/5, {} commitments, quality {:.0}/100\n",
        stats.difficulty_level, stats.commitments_made, stats.conversation_quality_score
    );

    let evaluation = evaluate(schema, session.metrics(), session.scenario().cloned());
    print_evaluation(&evaluation, false)
}

fn print_turn(turn: usize, utterance: &str, outcome: &UtteranceOutcome) {
    let classification = outcome.analysis.classification;
    let mut flags = Vec::new();
    if classification.is_vague {
        flags.push("vague");
    }
    if classification.is_deflecting {
        flags.push("deflecting");
    }
    if classification.is_concrete {
        flags.push("concrete");
    }
    if outcome.analysis.interruption {
        flags.push("interruption");
    }
    let flags = if flags.is_empty() {
        "neutral".to_string()
    } else {
        flags.join(", ")
    };

    println!("{turn}. \"{utterance}\"");
    println!("   -> {flags} | level {}/5", outcome.difficulty.level);
    for commitment in &outcome.analysis.commitments {
        println!("   commitment: {commitment}");
    }
    if let Some(summary) = outcome.cue_summary() {
        println!("   cue: {summary}");
    }
}

fn print_evaluation(evaluation: &Evaluation, as_json: bool) -> Result<(), AppError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(evaluation)?);
    } else {
        println!("{}", render_summary(evaluation));
    }
    Ok(())
}

fn resolve_schema(requested: Option<ScoreSchema>) -> Result<ScoreSchema, AppError> {
    match requested {
        Some(schema) => Ok(schema),
        None => Ok(AppConfig::load()?.scoring.schema),
    }
}

fn resolve_scale(requested: Option<DifficultyScale>) -> Result<DifficultyScale, AppError> {
    match requested {
        Some(scale) => Ok(scale),
        None => Ok(AppConfig::load()?.scoring.difficulty_scale),
    }
}

fn load_scenario(path: &Path, scale: DifficultyScale) -> Result<Scenario, AppError> {
    let raw: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    Ok(Scenario::from_value(&raw, scale)?)
}

fn replay_session_id(path: &Path) -> SessionId {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transcript".to_string());
    SessionId(format!("replay-{stem}"))
}
