//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to appropriate
//! command handlers.

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use crate::commands;
use crate::logging;

/// A terminal-based sales pitch analyzer with AI coaching feedback
#[derive(Parser)]
#[command(name = "pitchgrade")]
#[command(version)]
#[command(about = "Transcribe a recorded sales pitch and get structured coaching feedback")]
#[command(
    long_about = "Transcribe a recorded sales pitch and get structured coaching feedback.\n\nThe recording is transcribed with Deepgram, then a coaching model scores the\npitch across six categories (clarity, structure, value, personalization,\nobjection handling, call to action), assigns a letter grade, and closes with\nthree concrete recommendations.\n\nDEFAULT COMMAND:\n    If no command is specified, 'analyze' is used by default.\n\nEXAMPLES:\n    # Analyze a recorded pitch\n    $ pitchgrade pitch.wav\n\n    # Pipe a recording in and write the report to a file\n    $ cat pitch.mp3 | pitchgrade - --format mp3 -o report.txt\n\n    # Transcript only, piped to other commands\n    $ pitchgrade transcribe pitch.wav | wc -w\n\n    # Edit configuration file\n    $ pitchgrade config"
)]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/pitchgrade/pitchgrade.toml\n    Logs:               ~/.local/state/pitchgrade/pitchgrade.log.*\n    Credentials:        DEEPGRAM_API_KEY and OPENAI_API_KEY environment variables"
)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Path to the recorded pitch, or '-' to read audio from stdin
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Audio format of stdin input: wav, mp3, or m4a
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<String>,

    /// Copy the report to clipboard instead of rendering it
    #[arg(short, long)]
    clipboard: bool,

    /// Write the report to a file instead of rendering it
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a recorded sales pitch (default)
    ///
    /// Transcribes the recording and renders the transcript followed by
    /// the coaching feedback.
    #[command(visible_alias = "a")]
    Analyze {
        /// Path to the recorded pitch, or '-' to read audio from stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Audio format of stdin input: wav, mp3, or m4a
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<String>,

        /// Copy the report to clipboard instead of rendering it
        #[arg(short, long)]
        clipboard: bool,

        /// Write the report to a file instead of rendering it
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,
    },

    /// Transcribe a recorded pitch without analyzing it
    ///
    /// Prints the transcript to stdout for piping to other commands.
    #[command(visible_alias = "t")]
    Transcribe {
        /// Path to the audio file, or '-' to read audio from stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Audio format of stdin input: wav, mp3, or m4a
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<String>,

        /// Copy the transcript to clipboard instead of stdout
        #[arg(short, long)]
        clipboard: bool,

        /// Write the transcript to a file instead of stdout
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<String>,
    },

    /// Open configuration file in your preferred editor
    ///
    /// Edit transcription and analysis settings. Uses $EDITOR, falling
    /// back to nano/vi.
    #[command(visible_alias = "c")]
    Config,

    /// Show recent log entries from the application
    ///
    /// Useful for troubleshooting failed transcription or analysis calls.
    Logs {
        /// Number of lines to show (default 50)
        #[arg(short = 'n', long, value_name = "LINES")]
        lines: Option<usize>,
    },

    /// Generate shell completion script
    ///
    /// Save the output to your shell's completion directory or source it
    /// directly.
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the main application based on command-line arguments.
///
/// # Errors
/// - If logging initialization fails
/// - If command execution fails (configuration, transcription, analysis)
pub async fn run() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Handle commands that don't need logging setup
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            generate(*shell, &mut Cli::command(), "pitchgrade", &mut io::stdout());
            return Ok(());
        }
        Some(Commands::Logs { lines }) => {
            return commands::handle_logs(*lines);
        }
        _ => {}
    }

    logging::init_logging()?;

    match cli.command {
        None => {
            let Some(file) = cli.file else {
                Cli::command().print_help()?;
                return Err(anyhow::anyhow!(
                    "No recording given. Provide an audio file, e.g. 'pitchgrade pitch.wav'"
                ));
            };
            commands::handle_analyze(file, cli.format, cli.clipboard, cli.output).await?;
        }
        Some(Commands::Analyze {
            file,
            format,
            clipboard,
            output,
        }) => {
            commands::handle_analyze(file, format, clipboard, output).await?;
        }
        Some(Commands::Transcribe {
            file,
            format,
            clipboard,
            output,
        }) => {
            commands::handle_transcribe(file, format, clipboard, output).await?;
        }
        Some(Commands::Config) => {
            commands::handle_config()?;
        }
        Some(Commands::Completions { .. }) | Some(Commands::Logs { .. }) => {
            unreachable!("These commands are handled earlier")
        }
    }

    Ok(())
}
