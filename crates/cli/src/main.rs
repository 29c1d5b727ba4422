use casino::config::Config;
use casino::dialog::{Notice, NoticeKind};
use casino::lobby::{Entry, Lobby};
use casino::loading::LoadingDialog;
use casino::outcome::{OutcomeSource, RandomOutcomes, ScriptedOutcomes};
use casino::wallet::{SharedUser, User};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "casino")]
#[command(about = "Casino CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Create the configuration directory and a default config.json.
    Init {
        /// Config file path (default: CASINO_CONFIG_PATH or ~/.casino/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Enter the casino: loading bar, then the betting dialog in the terminal.
    Play {
        /// Config file path (default: CASINO_CONFIG_PATH or ~/.casino/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Starting balance (default from config or 1000)
        #[arg(long)]
        credits: Option<u64>,

        /// RNG seed (default: CASINO_SEED, then config)
        #[arg(long)]
        seed: Option<u64>,

        /// Fixed outcomes instead of random draws, e.g. "wlw" or "win,lose"
        #[arg(long, value_name = "OUTCOMES")]
        script: Option<String>,
    },

    /// Run the loading animation alone.
    Load {
        /// Config file path (default: CASINO_CONFIG_PATH or ~/.casino/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("casino {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Init { config }) => {
            if let Err(e) = run_init(config) {
                log::error!("init failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Play {
            config,
            credits,
            seed,
            script,
        }) => {
            if let Err(e) = run_play(config, credits, seed, script).await {
                log::error!("play failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Load { config }) => {
            if let Err(e) = run_load(config).await {
                log::error!("load failed: {:#}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("Run with --help for usage");
        }
    }
}

fn run_init(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(casino::config::default_config_path);
    let dir = casino::init::init_config_dir(&path)?;
    println!("initialized configuration at {}", dir.display());
    Ok(())
}

fn outcome_source(
    config: &Config,
    seed: Option<u64>,
    script: Option<String>,
) -> anyhow::Result<Box<dyn OutcomeSource>> {
    if let Some(script) = script {
        let scripted = ScriptedOutcomes::parse(&script)
            .ok_or_else(|| anyhow::anyhow!("invalid outcome script {:?}", script))?;
        return Ok(Box::new(scripted));
    }
    let seed = seed.or_else(|| casino::config::resolve_seed(config));
    if let Some(s) = seed {
        log::info!("using fixed seed {}", s);
    }
    Ok(Box::new(RandomOutcomes::from_seed(seed)))
}

async fn run_play(
    config_path: Option<PathBuf>,
    credits: Option<u64>,
    seed: Option<u64>,
    script: Option<String>,
) -> anyhow::Result<()> {
    let (config, _) = casino::config::load_config(config_path)?;
    let outcomes = outcome_source(&config, seed, script)?;
    let user = SharedUser::new(User::new(
        "player",
        credits.unwrap_or(config.game.starting_credits),
    ));
    let mut lobby = Lobby::from_config(&config, user, outcomes)?;

    let mut stdout = io::stdout();

    writeln!(stdout, "{}", lobby.label())?;
    if let Entry::Refused { .. } = lobby.enter_casino()? {
        if let Some(notice) = lobby.dismiss_notice() {
            print_notice(&mut stdout, &notice)?;
        }
        return Ok(());
    }

    drive_loading(&mut stdout, |elapsed| {
        lobby.advance(elapsed);
        lobby.loading().cloned()
    })
    .await?;

    let Some(dialog) = lobby.casino() else {
        anyhow::bail!("loading did not open the casino");
    };
    writeln!(stdout, "== {} ==", dialog.title())?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        let Some(dialog) = lobby.casino_mut() else {
            break;
        };
        writeln!(stdout, "{}", dialog.label())?;
        write!(stdout, "[b] {}  [q] quit > ", dialog.button_text())?;
        stdout.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "b" | "bet" | "下注" => {
                dialog.place_bet()?;
                if let Some(notice) = dialog.notice().cloned() {
                    print_notice(&mut stdout, &notice)?;
                    write!(stdout, "(press Enter) ")?;
                    stdout.flush()?;
                    let mut ack = String::new();
                    input.read_line(&mut ack)?;
                }
                dialog.dismiss_notice();
            }
            "q" | "quit" => break,
            "" => {}
            other => writeln!(stdout, "unknown input {:?}", other)?,
        }
    }

    lobby.close_casino();
    writeln!(stdout, "{}", lobby.label())?;
    Ok(())
}

async fn run_load(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let (config, _) = casino::config::load_config(config_path)?;
    let mut dialog = LoadingDialog::with_timing(config.loading.tick(), config.loading.max_progress);
    let mut stdout = io::stdout();
    drive_loading(&mut stdout, |elapsed| {
        dialog.advance(elapsed);
        (dialog.result().is_none()).then(|| dialog.clone())
    })
    .await?;
    writeln!(stdout, "{:?}", dialog.result())?;
    Ok(())
}

/// Tick on a tokio interval, feeding real elapsed time to `step` until it reports the
/// dialog is gone. `step` returns the dialog while it is still loading.
async fn drive_loading<F>(out: &mut impl Write, mut step: F) -> anyhow::Result<()>
where
    F: FnMut(std::time::Duration) -> Option<LoadingDialog>,
{
    let Some(first) = step(std::time::Duration::ZERO) else {
        return Ok(());
    };
    writeln!(out, "== {} ==", first.title())?;
    writeln!(out, "{}", first.label())?;

    let mut interval = tokio::time::interval(first.tick_period());
    let mut last = Instant::now();
    loop {
        interval.tick().await;
        let now = Instant::now();
        let current = step(now - last);
        last = now;
        match current {
            Some(dialog) => {
                write!(out, "\r{}", progress_bar(dialog.progress(), dialog.max_progress()))?;
                out.flush()?;
            }
            None => {
                writeln!(out, "\r{}", progress_bar(1, 1))?;
                return Ok(());
            }
        }
    }
}

fn progress_bar(progress: u32, max: u32) -> String {
    const WIDTH: u32 = 40;
    let max = max.max(1);
    let filled = (progress.min(max) * WIDTH / max) as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        " ".repeat(WIDTH as usize - filled),
        progress.min(max) * 100 / max
    )
}

fn print_notice(out: &mut impl Write, notice: &Notice) -> io::Result<()> {
    let marker = match notice.kind {
        NoticeKind::Information => "i",
        NoticeKind::Warning => "!",
    };
    writeln!(out, "[{}] {}: {}", marker, notice.title, notice.body)
}
