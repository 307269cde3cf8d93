use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use std::process::ExitCode;

use wca_cli::{
    display_banner, handle_input_with_history, print_help, render_report, render_transcript,
    WcagAssistant,
};
use wca_core::analysis::{DEFAULT_BACKGROUND, DEFAULT_FONT_SIZE_PX, DEFAULT_FOREGROUND};
use wca_core::{analyze, AnalysisRequest, ChatProvider, ChatSession, TextType};
use wca_openai::OpenAIClient;

#[derive(Parser)]
#[command(name = "wca")]
#[command(about = "Web content accessibility checker and WCAG assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check contrast, font size and readability of a piece of text
    Analyze(AnalyzeArgs),
    /// Ask the WCAG assistant (interactive when no question is given)
    Chat {
        /// Single question to answer
        #[arg(short, long)]
        question: Option<String>,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Text to analyze
    #[arg(short, long)]
    text: String,

    /// Text color (#RRGGBB, #RGB or a color name)
    #[arg(long, default_value = DEFAULT_FOREGROUND)]
    fg: String,

    /// Background color (#RRGGBB, #RGB or a color name)
    #[arg(long, default_value = DEFAULT_BACKGROUND)]
    bg: String,

    /// Font size in pixels
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE_PX, value_parser = clap::value_parser!(u32).range(10..=30))]
    font_size: u32,

    /// Role of the text on the page
    #[arg(long, value_enum, default_value_t = TextTypeArg::Body)]
    text_type: TextTypeArg,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum TextTypeArg {
    Body,
    Heading,
    Link,
    Button,
}

impl From<TextTypeArg> for TextType {
    fn from(arg: TextTypeArg) -> Self {
        match arg {
            TextTypeArg::Body => TextType::Body,
            TextTypeArg::Heading => TextType::Heading,
            TextTypeArg::Link => TextType::Link,
            TextTypeArg::Button => TextType::Button,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze(args)) => run_analyze(args),
        Some(Commands::Chat { question: Some(question) }) => run_question(&question).await,
        Some(Commands::Chat { question: None }) | None => run_interactive().await,
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<ExitCode> {
    let request = AnalysisRequest::new(args.text)
        .with_colors(args.fg, args.bg)
        .with_font_size(args.font_size)
        .with_text_type(args.text_type.into());

    match analyze(&request) {
        Ok(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_report(&report));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_validation() => {
            eprintln!("{} {}", "❌".red(), e);
            Ok(ExitCode::from(2))
        }
        Err(e) => Err(e.into()),
    }
}

fn build_assistant() -> Result<WcagAssistant<OpenAIClient>> {
    let client = OpenAIClient::from_env()?;
    let config = client.generation_config();
    Ok(WcagAssistant::new(client).with_config(config))
}

async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

async fn run_question(question: &str) -> Result<ExitCode> {
    let assistant = build_assistant()?;
    let mut session = assistant.new_session();

    match assistant.ask_until(&mut session, question, ctrl_c()).await {
        Ok(reply) => {
            println!("{}", reply);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_validation() => {
            eprintln!("{} {}", "❌".red(), e);
            Ok(ExitCode::from(2))
        }
        Err(e) => Err(e.into()),
    }
}

async fn run_interactive() -> Result<ExitCode> {
    let assistant = build_assistant()?;
    display_banner(assistant.provider().model_id());

    let mut session = assistant.new_session();
    let mut history = Vec::new();

    loop {
        let input = handle_input_with_history(&mut history).await?;

        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("{}", "👋 Goodbye!".green());
                break;
            }
            "help" => {
                print_help();
                continue;
            }
            "history" => {
                println!("{}", render_transcript(&session));
                continue;
            }
            "reset" => {
                session.reset();
                println!("{} Started a new conversation", "🧹".cyan());
                continue;
            }
            _ => {}
        }

        ask_and_print(&assistant, &mut session, &input).await;
    }

    Ok(ExitCode::SUCCESS)
}

async fn ask_and_print<P: ChatProvider>(
    assistant: &WcagAssistant<P>,
    session: &mut ChatSession,
    question: &str,
) {
    println!("{} Thinking... {}", "🤖".blue(), "(Ctrl-C to cancel)".dimmed());

    match assistant.ask_until(session, question, ctrl_c()).await {
        Ok(reply) => {
            println!("{} {}", "→".green(), reply);
            println!();
        }
        Err(wca_core::Error::Cancelled) => {
            println!("{} Request cancelled", "⏹".yellow());
        }
        Err(e) => {
            println!("{} {}", "❌".red(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("wca").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_defaults() {
        let cli = parse(&["analyze", "--text", "Hi."]).unwrap();
        let Some(Commands::Analyze(args)) = cli.command else {
            panic!("expected analyze subcommand");
        };
        assert_eq!(args.fg, "#000000");
        assert_eq!(args.bg, "#FFFFFF");
        assert_eq!(args.font_size, 16);
        assert_eq!(TextType::from(args.text_type), TextType::Body);
        assert!(!args.json);
    }

    #[test]
    fn test_font_size_range() {
        assert!(parse(&["analyze", "--text", "Hi.", "--font-size", "9"]).is_err());
        assert!(parse(&["analyze", "--text", "Hi.", "--font-size", "31"]).is_err());
        assert!(parse(&["analyze", "--text", "Hi.", "--font-size", "10"]).is_ok());
        assert!(parse(&["analyze", "--text", "Hi.", "--font-size", "30"]).is_ok());
    }

    #[test]
    fn test_text_type_values() {
        let cli = parse(&["analyze", "--text", "Go", "--text-type", "button"]).unwrap();
        let Some(Commands::Analyze(args)) = cli.command else {
            panic!("expected analyze subcommand");
        };
        assert_eq!(TextType::from(args.text_type), TextType::Button);
    }

    #[test]
    fn test_default_is_interactive_chat() {
        assert!(parse(&[]).unwrap().command.is_none());
        let cli = parse(&["chat", "-q", "What is WCAG?"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Chat { question: Some(_) })));
    }
}
