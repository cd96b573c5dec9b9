use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendName;
use crate::domain::models::QUESTIONS;

pub fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Enter - Begin the check-in, submit an answer, or try again after an error.
- Up arrow / Down arrow - Scroll the report
- CTRL+U / CTRL+D - Page up / Page down
- v - Show or hide the visual interpretation on the report.
- s - Save the generated image as a PNG to the image directory.
- r - Start a new journey from the report or error screen.
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn print_questions() {
    let res = QUESTIONS
        .iter()
        .enumerate()
        .map(|(idx, question)| {
            return format!("{:>2}. {question}", idx + 1);
        })
        .collect::<Vec<String>>()
        .join("\n");

    println!("{res}");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Shadow Work")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running with environment variable RUST_LOG=shadow_work")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn arg_string(key: ConfigKey, env: &'static str, help: String) -> Arg {
    return Arg::new(key.to_string())
        .long(key.to_string())
        .env(env)
        .num_args(1)
        .help(help)
        .global(true);
}

pub fn build() -> Command {
    let hotkeys_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") {
                return Paint::new(line).underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("shadow-work")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(hotkeys_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(Command::new("questions").about("Prints the questionnaire and exits."))
        .arg(
            Arg::new(ConfigKey::Backend.to_string())
                .short('b')
                .long(ConfigKey::Backend.to_string())
                .env("SHADOW_WORK_BACKEND")
                .num_args(1)
                .help(format!(
                    "The backend hosting the models. [default: {}]",
                    Config::default(ConfigKey::Backend)
                ))
                .value_parser(PossibleValuesParser::new(BackendName::VARIANTS))
                .global(true),
        )
        .arg(arg_string(
            ConfigKey::BackendHealthCheckTimeout,
            "SHADOW_WORK_BACKEND_HEALTH_CHECK_TIMEOUT",
            format!("Time to wait in milliseconds before timing out when doing a healthcheck for a backend. [default: {}]", Config::default(ConfigKey::BackendHealthCheckTimeout)),
        ))
        .arg(arg_string(
            ConfigKey::AnalysisModel,
            "SHADOW_WORK_ANALYSIS_MODEL",
            format!(
                "Model used to analyze the answers. [default: {}]",
                Config::default(ConfigKey::AnalysisModel)
            ),
        ))
        .arg(arg_string(
            ConfigKey::ImageModel,
            "SHADOW_WORK_IMAGE_MODEL",
            format!(
                "Model used to generate the visual anchor image. [default: {}]",
                Config::default(ConfigKey::ImageModel)
            ),
        ))
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("SHADOW_WORK_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(arg_string(
            ConfigKey::GeminiURL,
            "SHADOW_WORK_GEMINI_URL",
            format!(
                "Gemini API URL when using the Gemini backend. [default: {}]",
                Config::default(ConfigKey::GeminiURL)
            ),
        ))
        .arg(arg_string(
            ConfigKey::GeminiToken,
            "SHADOW_WORK_GEMINI_TOKEN",
            "Google Gemini API token when using the Gemini backend.".to_string(),
        ))
        .arg(arg_string(
            ConfigKey::ProxyURL,
            "SHADOW_WORK_PROXY_URL",
            format!(
                "URL of a pass-through endpoint accepting POST {{prompt, options}} when using the proxy backend. [default: {}]",
                Config::default(ConfigKey::ProxyURL)
            ),
        ))
        .arg(arg_string(
            ConfigKey::TransitionDelay,
            "SHADOW_WORK_TRANSITION_DELAY",
            format!(
                "Milliseconds to pause between questions. 0 disables the pause. [default: {}]",
                Config::default(ConfigKey::TransitionDelay)
            ),
        ))
        .arg(arg_string(
            ConfigKey::ImageDir,
            "SHADOW_WORK_IMAGE_DIR",
            format!(
                "Directory generated images are saved to. [default: {}]",
                Config::default(ConfigKey::ImageDir)
            ),
        ));
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir()
                        .unwrap_or_else(|| return path::PathBuf::from("."))
                        .join("shadow-work/debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        Some(("questions", _)) => {
            print_questions();
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
