use anyhow::Result;
use clap::Parser;
use platsniff::commands::{self, EventSpec, SignalSource};
use platsniff::config::Config;
use platsniff::page::TargetPicker;
use platsniff::platform::SignalDetector;
use std::io;
use std::path::PathBuf;

/// platsniff - download page platform detection
///
/// Guess a visitor's platform from browser signals and drive the installer
/// tabs of a download page.
///
/// Examples:
///   platsniff detect --platform "Linux x86_64" --user-agent "... Ubuntu ..."
///   platsniff page page.json --event arch:aarch64 --event tab:aarch64-apple-darwin/brew
#[derive(Parser, Debug)]
#[command(author, version = env!("PLATSNIFF_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Markup configuration file (JSON)
    #[arg(
        long = "config",
        short = 'c',
        env = "PLATSNIFF_CONFIG",
        value_name = "PATH",
        global = true
    )]
    pub config: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the platform label for a set of browser signals
    Detect(SignalArgs),

    /// Replay user interactions against a download page
    Page(PageArgs),

    /// Pick the download a page would offer for a set of browser signals
    Pick(PickArgs),
}

#[derive(clap::Args, Debug)]
pub struct SignalArgs {
    /// JSON file with captured signals (userAgent, platform, appVersion, ...)
    #[arg(long = "signals", value_name = "PATH")]
    pub signals: Option<PathBuf>,

    /// navigator.userAgent
    #[arg(long, env = "PLATSNIFF_USER_AGENT")]
    pub user_agent: Option<String>,

    /// navigator.platform
    #[arg(long, env = "PLATSNIFF_PLATFORM")]
    pub platform: Option<String>,

    /// navigator.appVersion
    #[arg(long, env = "PLATSNIFF_APP_VERSION")]
    pub app_version: Option<String>,

    /// Unmasked WebGL renderer string
    #[arg(long)]
    pub webgl_renderer: Option<String>,

    /// Host environment "os-architecture" value
    #[arg(long)]
    pub host_arch: Option<String>,
}

impl From<SignalArgs> for SignalSource {
    fn from(args: SignalArgs) -> Self {
        SignalSource {
            signals_file: args.signals,
            user_agent: args.user_agent,
            platform: args.platform,
            app_version: args.app_version,
            webgl_renderer: args.webgl_renderer,
            host_arch: args.host_arch,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct PageArgs {
    /// Page description (JSON element tree)
    #[arg(value_name = "PAGE")]
    pub page: PathBuf,

    /// Event to replay, in order: "arch:KEY", "tab:TRIPLE/ID", "prereleases" or "copy:N"
    #[arg(long = "event", short = 'e', value_name = "EVENT")]
    pub events: Vec<EventSpec>,

    /// Print the resulting page as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct PickArgs {
    /// Page description (JSON element tree)
    #[arg(value_name = "PAGE")]
    pub page: PathBuf,

    #[command(flatten)]
    pub signals: SignalArgs,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Detect(args) => {
            let source: SignalSource = args.into();
            commands::detect(&source, &mut stdout)?;
        }
        Commands::Page(args) => {
            commands::page(&args.page, &args.events, args.json, config.markup, &mut stdout)?
        }
        Commands::Pick(args) => {
            let source: SignalSource = args.signals.into();
            let detector = SignalDetector::new(source.resolve()?);
            let picker = TargetPicker::new(config.markup.clone());
            commands::pick(&args.page, &detector, &picker, &config.markup, &mut stdout)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_detect_parsing() {
        let cli = Cli::try_parse_from([
            "platsniff",
            "detect",
            "--platform",
            "MacIntel",
            "--webgl-renderer",
            "Apple M1",
        ])
        .unwrap();
        match cli.command {
            Commands::Detect(args) => {
                assert_eq!(args.platform.as_deref(), Some("MacIntel"));
                assert_eq!(args.webgl_renderer.as_deref(), Some("Apple M1"));
                assert_eq!(args.signals, None);
            }
            _ => panic!("Expected Detect command"),
        }
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_cli_page_events_keep_order() {
        let cli = Cli::try_parse_from([
            "platsniff",
            "page",
            "page.json",
            "-e",
            "tab:x86_64-pc-windows-msvc/msi",
            "--event",
            "arch:aarch64",
        ])
        .unwrap();
        match cli.command {
            Commands::Page(args) => {
                assert_eq!(args.page, PathBuf::from("page.json"));
                assert_eq!(
                    args.events,
                    vec![
                        EventSpec::Tab {
                            triple: "x86_64-pc-windows-msvc".into(),
                            id: "msi".into()
                        },
                        EventSpec::Arch("aarch64".into()),
                    ]
                );
                assert!(!args.json);
            }
            _ => panic!("Expected Page command"),
        }
    }

    #[test]
    fn test_cli_page_copy_event() {
        let cli = Cli::try_parse_from(["platsniff", "page", "page.json", "-e", "copy:1"]).unwrap();
        match cli.command {
            Commands::Page(args) => assert_eq!(args.events, vec![EventSpec::Copy(1)]),
            _ => panic!("Expected Page command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_event() {
        let result = Cli::try_parse_from(["platsniff", "page", "page.json", "-e", "tab:nope"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_global_config_parsing() {
        let cli =
            Cli::try_parse_from(["platsniff", "--config", "/tmp/markup.json", "pick", "page.json"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/markup.json")));
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["platsniff"]).is_err());
    }
}
