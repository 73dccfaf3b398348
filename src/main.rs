//! Peshkat main entry point
//!
//! Each invocation runs one feature: speak, translate, write, learn or
//! image. Configuration comes from ~/.peshkat.cfg and the environment.

use anyhow::{bail, Context};
use log::{debug, error, info, LevelFilter};
use peshkat::api::{Dispatcher, Feature, GeminiClient};
use peshkat::audio::{create_output, Player};
use peshkat::language::{is_rtl_text, Direction, LANGUAGES};
use peshkat::speech::{Outcome, SpeechService};
use peshkat::state::config::Config;
use peshkat::state::theme::Theme;
use peshkat::state::{reduce, Action, AppState, Tab};
use peshkat::tasks::{self, Translation, Writer};
use std::path::PathBuf;
use std::process;

/// Options taking a value: `--name VALUE`
const OPTIONS: &[&str] = &["lang", "from", "to", "ref", "out"];

const USAGE: &str = "\
Usage: peshkat [--debug] <command> [options] <text>

Commands:
  speak [--lang CODE] TEXT              Read text aloud
  translate [--from CODE] [--to CODE] TEXT
                                        Translate text
  write TEXT                            Ask the Kurdish writing assistant
  learn QUERY                           Explain an English topic or phrase
  image [--ref FILE] [--out FILE] PROMPT
                                        Generate or edit an image
  languages                             List supported languages
  about                                 About this app";

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to peshkat.log file
        use std::fs::OpenOptions;
        let log_path = format!("{}.log", peshkat::APP_NAME);
        match OpenOptions::new().create(true).append(true).open(&log_path) {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to open {} for debug logging: {}",
                    log_path, e
                );
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "Peshkat version {} starting (debug mode, logging to {})",
            peshkat::VERSION,
            log_path
        );
    } else {
        // Normal mode: errors only, unless RUST_LOG says otherwise
        env_logger::Builder::new()
            .filter_level(LevelFilter::Error)
            .parse_default_env()
            .init();
    }

    let args: Vec<String> = args
        .into_iter()
        .filter(|arg| arg != "--debug" && arg != "-d")
        .collect();

    if let Err(e) = run(args) {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Parsed command line: command, `--flag value` options, free text
struct Invocation {
    command: String,
    options: Vec<(String, String)>,
    text: String,
}

impl Invocation {
    fn parse(args: Vec<String>) -> anyhow::Result<Self> {
        let mut iter = args.into_iter();
        let command = iter.next().unwrap_or_else(|| "help".to_string());
        let mut options = Vec::new();
        let mut words = Vec::new();

        while let Some(arg) = iter.next() {
            if let Some(name) = arg.strip_prefix("--") {
                if !OPTIONS.contains(&name) {
                    bail!("Unknown option --{}\n\n{}", name, USAGE);
                }
                let Some(value) = iter.next() else {
                    bail!("--{} needs a value", name);
                };
                options.push((name.to_string(), value));
            } else {
                words.push(arg);
            }
        }

        Ok(Self {
            command,
            options,
            text: words.join(" "),
        })
    }

    fn option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn run(args: Vec<String>) -> anyhow::Result<()> {
    let invocation = Invocation::parse(args)?;
    debug!("Command: {}", invocation.command);

    if matches!(invocation.command.as_str(), "help" | "-h" | "--help") {
        println!("{}", USAGE);
        return Ok(());
    }

    // Load configuration and derive the initial UI state
    let config = Config::load().context("loading configuration")?;
    info!("Configuration loaded from {:?}", config.path());
    let state = initial_state(&config);

    match invocation.command.as_str() {
        "languages" => {
            list_languages();
            Ok(())
        }
        "about" => {
            show_about(&reduce(&state, Action::SelectTab(Tab::About)));
            Ok(())
        }
        "speak" => {
            let state = reduce(&state, Action::SelectTab(Tab::Tts));
            speak(&config, &state, &invocation)
        }
        "translate" => {
            let dispatcher = build_dispatcher(&config)?;
            let mut translation = Translation::new(
                invocation.option("from").unwrap_or("en"),
                invocation.option("to").unwrap_or("ku-sorani"),
            );
            translation.input = invocation.text.clone();
            tasks::translate::run(&dispatcher, &mut translation)?;
            print_text(&translation.output);
            Ok(())
        }
        "write" => {
            let dispatcher = build_dispatcher(&config)?;
            let mut writer = Writer::new();
            match writer.send(&dispatcher, &invocation.text) {
                Some(reply) => print_text(&reply.text),
                None => bail!("Nothing to send"),
            }
            Ok(())
        }
        "learn" => {
            let dispatcher = build_dispatcher(&config)?;
            let lesson = tasks::learn(&dispatcher, &invocation.text)?;
            print_text(&lesson.answer);
            if !lesson.resources.is_empty() {
                println!();
                for resource in &lesson.resources {
                    println!("- {} <{}>", resource.title, resource.uri);
                }
            }
            Ok(())
        }
        "image" => {
            let dispatcher = build_dispatcher(&config)?;
            let reference = match invocation.option("ref") {
                Some(path) => Some(
                    std::fs::read(path)
                        .with_context(|| format!("reading reference image {}", path))?,
                ),
                None => None,
            };
            let image =
                tasks::generate_image(&dispatcher, &invocation.text, reference.as_deref())?;
            let out = PathBuf::from(invocation.option("out").unwrap_or("peshkat-image.png"));
            std::fs::write(&out, &image.bytes)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("Saved {} ({} bytes)", out.display(), image.bytes.len());
            Ok(())
        }
        other => bail!("Unknown command {:?}\n\n{}", other, USAGE),
    }
}

/// UI state seeded from the `[ui]` section
fn initial_state(config: &Config) -> AppState {
    let mut state = reduce(
        &AppState::default(),
        Action::SetUiLanguage(config.ui_language()),
    );
    if let Some(theme) = Theme::by_name(&config.theme_name()) {
        state = reduce(&state, Action::SelectTheme(theme));
    }
    state
}

/// Client plus dispatcher with the configured overrides applied
fn build_dispatcher(config: &Config) -> anyhow::Result<Dispatcher> {
    let api_key = config.api_key().unwrap_or_default();
    let client = GeminiClient::new(&config.base_url(), &api_key, config.timeout())?;

    let mut dispatcher = Dispatcher::new(Box::new(client)).with_voice(config.voice());
    for feature in Feature::ALL {
        if let Some(model) = config.model_override(feature) {
            info!("Using model {} for {}", model, feature);
            dispatcher = dispatcher.with_model(feature, model);
        }
    }
    Ok(dispatcher)
}

fn speak(config: &Config, state: &AppState, invocation: &Invocation) -> anyhow::Result<()> {
    let dispatcher = build_dispatcher(config)?;
    let output = create_output(&config.output_kind())?;
    let player = Player::new(output);
    info!("Audio output: {}", player.output_name());
    if let Some(reason) = player.fallback_reason() {
        eprintln!("Warning: no audio will be heard ({})", reason);
        eprintln!(
            "Set [speech] output = wav in {} to save speech to files",
            config.path().display()
        );
    }

    let mut service = SpeechService::with_format(player, config.speech_format());
    let selected = invocation.option("lang").unwrap_or(state.ui_language());

    match service.speak(&dispatcher, &invocation.text, selected)? {
        Outcome::Played { decision, frames } => {
            if decision.is_english {
                println!("Detected: English pronunciation ({} frames)", frames);
            } else {
                println!("{} accent ({} frames)", decision.effective_language_code, frames);
            }
        }
        Outcome::Skipped => bail!("Nothing to speak"),
        Outcome::Stale => debug!("Response superseded"),
    }
    Ok(())
}

/// Print model output, marking Arabic-script text right-to-left so
/// bidi-aware terminals align it
fn print_text(text: &str) {
    if is_rtl_text(text) {
        println!("\u{200F}{}", text);
    } else {
        println!("{}", text);
    }
}

fn direction_marker(direction: Direction) -> &'static str {
    match direction {
        Direction::Rtl => "rtl",
        Direction::Ltr => "ltr",
    }
}

fn list_languages() {
    for lang in LANGUAGES {
        let marker = direction_marker(lang.direction);
        println!("{:<10} {:<18} {} ({})", lang.code, lang.name, lang.native, marker);
    }
}

fn show_about(state: &AppState) {
    let labels = state.labels();
    println!("Peshkat Translation {} - {}", peshkat::VERSION, labels.hub);
    println!();
    println!("A personal assistant for translating, writing, listening to and");
    println!("learning languages, with Kurdish (Sorani and Badini) at its heart.");
    println!();
    for tab in Tab::ALL {
        println!("  {:<12} {}", tab.id(), tab.label(labels));
    }
    println!();
    println!("© 2024 Peshkat Translation Hub");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_options_and_text() {
        let invocation =
            Invocation::parse(args("translate --from en --to ar good morning")).unwrap();
        assert_eq!(invocation.command, "translate");
        assert_eq!(invocation.option("from"), Some("en"));
        assert_eq!(invocation.option("to"), Some("ar"));
        assert_eq!(invocation.text, "good morning");
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = Invocation::parse(args("speak --lnag ar hola")).err().unwrap();
        assert!(err.to_string().contains("--lnag"));
    }

    #[test]
    fn test_option_needs_value() {
        assert!(Invocation::parse(args("image --out")).is_err());
    }

    #[test]
    fn test_direction_marker_from_table() {
        let sorani = LANGUAGES.iter().find(|l| l.code == "ku-sorani").unwrap();
        let german = LANGUAGES.iter().find(|l| l.code == "de").unwrap();
        assert_eq!(direction_marker(sorani.direction), "rtl");
        assert_eq!(direction_marker(german.direction), "ltr");
    }

    #[test]
    fn test_no_arguments_means_help() {
        let invocation = Invocation::parse(Vec::new()).unwrap();
        assert_eq!(invocation.command, "help");
        assert!(invocation.text.is_empty());
    }
}
