use actix_web::{web, App, HttpServer};
use chrono::{SecondsFormat, Utc};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{info, warn};
use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use mlpl::handlers::{config, random, validation};
use mlpl::models::{AppState, DEFAULT_TILES, DEFAULT_VOWELS};
use mlpl::services::round::{play_round, write_solution, Countdown};
use mlpl::{build_index, generate_draw, load_flat, save_flat, DictionaryIndex, LetterPools, LineRange, MAX_DRAW_LEN};

const DEFAULT_DICTIONARY: &str = "./share/fr-mlpl-flat-strict.txt";
const COUNTDOWN_TICKS: usize = 30;

// Function to initialize logging
fn init_logging(log_file: Option<&String>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        writeln!(buf, "[{}] {} {}: {}", timestamp, record.level(), record.target(), record.args())
    });

    if let Some(file) = log_file {
        let log_output = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .expect("Failed to open log file");
        builder.target(env_logger::Target::Pipe(Box::new(log_output)));
    }

    builder.init();
}

/// Settings shared by the game loop and the service
struct GameSettings {
    dictionary: String,
    tiles: usize,
    vowels: usize,
    think_time: u64,
    bag_from_dictionary: bool,
}

impl GameSettings {
    fn from_matches(matches: &ArgMatches) -> Self {
        let mut tiles = matches.get_one::<usize>("tiles").copied().unwrap_or(DEFAULT_TILES);
        if tiles > MAX_DRAW_LEN {
            warn!("{} tiles requested, capping at {}", tiles, MAX_DRAW_LEN);
            tiles = MAX_DRAW_LEN;
        }

        Self {
            dictionary: matches
                .get_one::<String>("dictionary")
                .cloned()
                .unwrap_or_else(|| DEFAULT_DICTIONARY.to_string()),
            tiles,
            vowels: matches.get_one::<usize>("vowels").copied().unwrap_or(DEFAULT_VOWELS),
            think_time: matches.get_one::<u64>("think-time").copied().unwrap_or(30),
            bag_from_dictionary: matches.get_flag("bag-from-dictionary"),
        }
    }

    fn load(&self) -> io::Result<(Arc<DictionaryIndex>, LetterPools)> {
        info!("Loading dictionary from {}", self.dictionary);
        let index = load_flat(&self.dictionary)?;

        let pools = if self.bag_from_dictionary {
            let pools = LetterPools::from_index(&index, 100);
            if pools.is_usable() {
                info!("Letter pools derived from dictionary frequencies");
                pools
            } else {
                warn!("Dictionary too small to derive letter pools, using French tiles");
                LetterPools::french()
            }
        } else {
            LetterPools::french()
        };

        Ok((Arc::new(index), pools))
    }
}

fn cli() -> Command {
    Command::new("mlpl")
        .version("1.1")
        .author("Ron Straight <straightre@gmail.com>")
        .about("Le Mot le plus Long: find the longest word in a draw of letters")
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .num_args(1)
                .global(true)
                .help("Specify a log file path (if omitted, logs to stderr)"),
        )
        .arg(
            Arg::new("dictionary")
                .long("dictionary")
                .num_args(1)
                .global(true)
                .default_value(DEFAULT_DICTIONARY)
                .help("Flat strict dictionary, one word per line"),
        )
        .arg(
            Arg::new("tiles")
                .long("tiles")
                .num_args(1)
                .global(true)
                .value_parser(value_parser!(usize))
                .default_value("10")
                .help("Number of tiles per draw"),
        )
        .arg(
            Arg::new("vowels")
                .long("vowels")
                .num_args(1)
                .global(true)
                .value_parser(value_parser!(usize))
                .default_value("4")
                .help("Default number of vowels per draw"),
        )
        .arg(
            Arg::new("think-time")
                .long("think-time")
                .num_args(1)
                .global(true)
                .value_parser(value_parser!(u64))
                .default_value("30")
                .help("Seconds the player gets before the solution is revealed"),
        )
        .arg(
            Arg::new("bag-from-dictionary")
                .long("bag-from-dictionary")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Weight letters by their frequency in the dictionary"),
        )
        .subcommand(Command::new("play").about("Play rounds in the terminal (default)"))
        .subcommand(
            Command::new("serve").about("Serve draws and solutions over HTTP").arg(
                Arg::new("listen-host")
                    .long("listen-host")
                    .num_args(1)
                    .default_value("0.0.0.0:2345")
                    .help("Specify the listen address (e.g., 0.0.0.0:2345)"),
            ),
        )
        .subcommand(
            Command::new("dico")
                .about("Generate the flat dictionary from an 'unmunch' seed")
                .arg(Arg::new("seed").required(true).help("Path to the 'unmunch' dictionary file"))
                .arg(
                    Arg::new("start")
                        .long("start")
                        .num_args(1)
                        .value_parser(value_parser!(usize))
                        .default_value("0")
                        .help("Line of parsing start, preceding are skipped"),
                )
                .arg(
                    Arg::new("end")
                        .long("end")
                        .num_args(1)
                        .value_parser(value_parser!(usize))
                        .default_value("0")
                        .help("Line of parsing end, following are skipped"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .num_args(1)
                        .default_value(DEFAULT_DICTIONARY)
                        .help("Where to write the flat dictionary"),
                ),
        )
}

fn build_dictionary(matches: &ArgMatches) -> io::Result<()> {
    let seed = matches.get_one::<String>("seed").expect("seed is required");
    let range = LineRange::new(
        matches.get_one::<usize>("start").copied().unwrap_or(0),
        matches.get_one::<usize>("end").copied().unwrap_or(0),
    );
    let output = matches.get_one::<String>("output").expect("output has a default value");

    let index = build_index(seed, range)?;
    save_flat(&index, output)
}

async fn serve(settings: GameSettings, listen_host: String) -> io::Result<()> {
    let (index, pools) = settings.load()?;
    let mut state = AppState::new(index, pools);
    state.tile_count = settings.tiles;
    state.default_vowels = settings.vowels;
    let shared_state = web::Data::new(state);

    info!("Listening on {}", listen_host);
    HttpServer::new(move || {
        App::new()
            .app_data(shared_state.clone())
            .service(config::get_config)
            .service(random::rand_draw)
            .service(validation::check_word)
            .service(validation::validate_word)
            .service(validation::solve_draw)
    })
    .bind(&listen_host)?
    .run()
    .await
}

/// Read one line; `None` at end of input
fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, msg: &str) -> io::Result<bool> {
    writeln!(out, "{} (press Enter)", msg)?;
    out.flush()?;
    Ok(read_answer(input)?.is_some())
}

fn prompt_vowels<R: BufRead, W: Write>(input: &mut R, out: &mut W, previous: usize) -> io::Result<Option<usize>> {
    writeln!(out, "How many vowels ? [{}] (press Enter)", previous)?;
    out.flush()?;
    let Some(answer) = read_answer(input)? else {
        return Ok(None);
    };
    if answer.is_empty() {
        return Ok(Some(previous));
    }
    match answer.parse() {
        Ok(n) => Ok(Some(n)),
        Err(_) => {
            writeln!(out, "Not a number, keeping {}", previous)?;
            Ok(Some(previous))
        }
    }
}

async fn play(settings: GameSettings) -> io::Result<()> {
    let (index, pools) = settings.load()?;
    let countdown = Countdown::new(COUNTDOWN_TICKS, Duration::from_secs(settings.think_time));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let mut vowels = settings.vowels;

    loop {
        writeln!(out, "  +---------------------------+")?;
        writeln!(out, "  |  Le Mot le plus Long !    |")?;
        writeln!(out, "  +---------------------------+")?;

        vowels = match prompt_vowels(&mut input, &mut out, vowels)? {
            Some(n) => n,
            None => break,
        };

        let draw = generate_draw(&pools, vowels, settings.tiles, &mut rand::thread_rng());
        writeln!(out, " +----------------------------+")?;
        writeln!(out, "  {}", draw)?;
        writeln!(out, " +----------------------------+")?;

        let solution = play_round(index.clone(), &draw, &countdown, &mut out).await?;

        if !prompt(&mut input, &mut out, "Want a solution ?")? {
            break;
        }
        write_solution(&mut out, &solution)?;

        if !prompt(&mut input, &mut out, "Want another game ?")? {
            break;
        }
    }

    Ok(())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_one::<String>("log-file"));

    match matches.subcommand() {
        Some(("dico", sub)) => build_dictionary(sub),
        Some(("serve", sub)) => {
            let listen_host = sub
                .get_one::<String>("listen-host")
                .expect("listen-host argument must always have a default value")
                .clone();
            serve(GameSettings::from_matches(sub), listen_host).await
        }
        Some(("play", sub)) => play(GameSettings::from_matches(sub)).await,
        _ => play(GameSettings::from_matches(&matches)).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dico_writes_where_play_reads() {
        let matches = cli().get_matches_from(["mlpl", "dico", "seed.txt"]);
        let (name, dico) = matches.subcommand().unwrap();
        assert_eq!(name, "dico");
        assert_eq!(dico.get_one::<String>("output").unwrap(), DEFAULT_DICTIONARY);
        assert_eq!(matches.get_one::<String>("dictionary").unwrap(), DEFAULT_DICTIONARY);
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let matches = cli().get_matches_from(["mlpl"]);
        assert!(matches.subcommand().is_none());
    }
}
