//! Word Levels CLI
//!
//! Drives a [`Session`] tick by tick the way a frame loop would, showing
//! load progress and printing the finished level.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use rand::rngs::StdRng;
use rand::SeedableRng;
use word_levels::{
    init_logger, load_dictionary, read_word_list, DictionaryIndex, GameMode, LevelConfig,
    LevelError, LevelRequest, LevelSink, Session, WordLengthBounds, WordLevel,
};

const USAGE_TEXT: &str = include_str!("text/usage.txt");

#[derive(Debug, Default)]
struct Options {
    min: Option<usize>,
    max: Option<usize>,
    batch: Option<usize>,
    level: Option<usize>,
    seed: Option<u64>,
    debug: bool,
    path: Option<PathBuf>,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut opts = Options::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--min" => opts.min = Some(parse_value(arg, iter.next())?),
                "--max" => opts.max = Some(parse_value(arg, iter.next())?),
                "--batch" => opts.batch = Some(parse_value(arg, iter.next())?),
                "--level" => opts.level = Some(parse_value(arg, iter.next())?),
                "--seed" => opts.seed = Some(parse_value(arg, iter.next())?),
                "--debug" => opts.debug = true,
                other if other.starts_with('-') => return Err(format!("Unknown option: {other}")),
                other => opts.path = Some(PathBuf::from(other)),
            }
        }
        Ok(opts)
    }

    fn config(&self) -> Result<LevelConfig, LevelError> {
        let defaults = LevelConfig::default();
        let bounds = WordLengthBounds::new(
            self.min.unwrap_or(defaults.bounds.min()),
            self.max.unwrap_or(defaults.bounds.max()),
        )?;
        LevelConfig::new(bounds, self.batch.unwrap_or(defaults.num_to_parse_before_yield()))
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    value
        .ok_or_else(|| format!("Missing value for {flag}"))?
        .parse()
        .map_err(|_| format!("Invalid value for {flag}"))
}

/// Prints the finished level, one column per word length.
struct ConsolePresenter {
    request: LevelRequest,
}

impl LevelSink for ConsolePresenter {
    fn on_parse_complete(&mut self, index: &DictionaryIndex) -> LevelRequest {
        print!("\r{}\r", " ".repeat(60));
        println!(
            "Loaded {} words ({} long words).",
            index.word_count(),
            index.long_word_count()
        );
        self.request
    }

    fn on_level_ready(&mut self, level: &WordLevel) {
        println!();
        println!("Target: {}", level.target_word().to_uppercase());
        println!("{} words to find:", level.sub_words().len());

        let mut current_len = 0;
        for word in level.sub_words() {
            let len = word.chars().count();
            if len != current_len {
                current_len = len;
                println!();
                print!("{len:>2}:");
            }
            print!(" {word}");
        }
        println!();
    }
}

fn run(opts: &Options) -> Result<(), LevelError> {
    let config = opts.config()?;
    let text = match &opts.path {
        Some(path) => read_word_list(path)?,
        None => load_dictionary().to_string(),
    };

    let presenter = ConsolePresenter {
        request: opts.level.map_or(LevelRequest::Random, LevelRequest::Index),
    };
    let rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::with_rng(config, presenter, rng);
    session.start(&text);

    let mut stdout = io::stdout();
    loop {
        let mode = session.tick()?;
        match mode {
            GameMode::Loading => {
                if let Some(loader) = session.loader() {
                    print!(
                        "\rLoading... {}/{} lines, {} long words, {} words",
                        loader.curr_line(),
                        loader.total_lines(),
                        loader.long_word_count(),
                        loader.word_count()
                    );
                    let _ = stdout.flush();
                }
            }
            GameMode::Ready => break,
            GameMode::PreGame | GameMode::MakeLevel => {}
        }
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE_TEXT);
        return;
    }

    let opts = match Options::parse(&args) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("Use --help for usage information.");
            process::exit(1);
        }
    };
    init_logger(opts.debug);

    if let Err(e) = run(&opts) {
        eprintln!();
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
