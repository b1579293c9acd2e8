use chat_dice::{Caller, Config, Engine};
use clap::Parser;
use rand::thread_rng;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Type roll commands, get chat replies back.
#[derive(Parser)]
#[command(name = "repl", version)]
struct Args {
    /// Name replies are addressed to
    #[arg(short, long, default_value = "you")]
    user: String,
    /// Server name recorded in the log
    #[arg(long, default_value = "local")]
    server: String,
    /// Shard id recorded in the log
    #[arg(long, default_value_t = 0)]
    shard: u32,
    /// Command keyword; added to lines that don't start with it
    #[arg(short, long, default_value = "!roll")]
    prefix: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_dice=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let config = Config::default().with_prefix(args.prefix.as_str());
    let bag = chat_dice::roll::DiceBag::with_limits(thread_rng(), &config.limits);
    let mut engine = Engine::new(config, bag);
    let caller = Caller {
        shard: args.shard,
        server: args.server,
        user: args.user,
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(line) = lines.next() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            let command = if starts_with_prefix(line, &args.prefix) {
                line.to_string()
            } else {
                format!("{} {}", args.prefix, line)
            };
            for reply in engine.handle(&command, &caller) {
                println!("{}", reply);
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}

fn starts_with_prefix(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}
