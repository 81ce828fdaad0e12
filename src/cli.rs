// src/cli.rs
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use console::style;

use crate::config::consts::DEFAULT_MODEL;
use crate::config::options::{default_data_dir, Action, AppOptions, LlmOptions};
use crate::core::net::HttpFetcher;
use crate::lookup::{Dictionary, Target};
use crate::matcher::Resolution;
use crate::model::Mood;
use crate::progress::Progress;
use crate::sentences::OpenAiGenerator;
use crate::store::Store;
use crate::{render, Error, Result};

/// Look up a German word: definition, conjugation, declension or example sentences.
/// Words are scraped once and answered from the local store afterwards.
#[derive(Parser, Debug)]
#[command(name = "gdict", version, about, long_about = None)]
#[command(group(ArgGroup::new("category").args(["declension", "conjugation", "sentence"])))]
pub struct Args {
    /// Word to look up
    pub word: Option<String>,

    /// Print a pronunciation link
    #[arg(short, long)]
    pub pronunciation: bool,

    /// Show the declension table (nouns)
    #[arg(short, long)]
    pub declension: bool,

    /// Show the conjugation tables (verbs)
    #[arg(short, long)]
    pub conjugation: bool,

    /// Show example sentences, generating them when none are stored
    #[arg(short, long)]
    pub sentence: bool,

    /// Regenerate and replace the stored sentences (implies -s)
    #[arg(short, long, conflicts_with_all = ["declension", "conjugation"])]
    pub replace: bool,

    /// Generate example sentences right after a new word is scraped
    #[arg(short = 'a', long)]
    pub openai: bool,

    /// Only show this mood of the conjugation (implies -c)
    #[arg(short, long, conflicts_with_all = ["declension", "sentence"])]
    pub mood: Option<String>,

    /// Print pipeline steps to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Data directory for the database and the debug log
    #[arg(long, env = "GERMAN_DICT_DIR")]
    pub dir: Option<PathBuf>,

    /// Chat model used for sentences
    #[arg(long, env = "GERMAN_DICT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// API key for sentence generation
    #[arg(long = "api-key", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl Args {
    pub fn into_options(self) -> Result<AppOptions> {
        let word = self.word.as_deref().map(str::trim).unwrap_or_default();
        if word.is_empty() {
            return Err(Error::NoAction);
        }

        let action = if self.declension {
            Action::Declension
        } else if self.conjugation || self.mood.is_some() {
            let mood = match self.mood.as_deref() {
                Some(m) => Some(Mood::from_user(m).ok_or_else(|| Error::UnknownMood(s!(m)))?),
                None => None,
            };
            Action::Conjugation { mood }
        } else if self.sentence || self.replace {
            Action::Sentences { replace: self.replace }
        } else {
            Action::Definition
        };

        Ok(AppOptions {
            word: s!(word),
            action,
            pronunciation: self.pronunciation,
            generate_on_scrape: self.openai,
            verbose: self.verbose,
            data_dir: self.dir.unwrap_or_else(default_data_dir),
            llm: LlmOptions { api_key: self.api_key, model: self.model, ..LlmOptions::default() },
        })
    }
}

pub fn run() -> ExitCode {
    let args = Args::parse();
    match args.into_options().and_then(|opts| execute(&opts)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            loge!("{e}");
            eprintln!("{} {e}", style("error:").red().bold());
            ExitCode::from(e.exit_code())
        }
    }
}

pub fn execute(opts: &AppOptions) -> Result<()> {
    fs::create_dir_all(&opts.data_dir)?;
    crate::log::init(&opts.data_dir);
    logf!("lookup '{}' ({:?})", opts.word, opts.action);

    let store = Store::open(&opts.db_path())?;
    let mut dict = Dictionary::new(store, Box::new(HttpFetcher::new()));
    if opts.wants_generator() {
        match OpenAiGenerator::new(&opts.llm) {
            Ok(generator) => dict = dict.with_generator(Box::new(generator)),
            Err(e) => logw!("sentence generation unavailable: {e}"),
        }
    }

    let target = match dict.resolve(&opts.word)? {
        Resolution::Stored(headword) => Target::Stored(headword),
        Resolution::Online(word) => Target::Online(word),
        Resolution::Ambiguous { candidates, offer_online } => choose(
            &opts.word,
            &candidates,
            offer_online,
            &mut io::stdin().lock(),
            &mut io::stderr(),
        )?,
    };

    let mut console_progress = ConsoleProgress::default();
    let progress: Option<&mut dyn Progress> =
        if opts.verbose { Some(&mut console_progress) } else { None };
    let stored = dict.load(target, &opts.action, opts.generate_on_scrape, progress)?;

    let mut out = io::stdout().lock();
    match &opts.action {
        Action::Definition => render::definition(&mut out, &stored.entry)?,
        Action::Declension => render::declension(&mut out, &dict.declension(&stored)?)?,
        Action::Conjugation { mood } => {
            render::conjugation(&mut out, &dict.conjugation(&stored, *mood)?, *mood)?
        }
        Action::Sentences { replace } => {
            render::sentences(&mut out, &dict.sentences(&stored, *replace)?)?
        }
    }
    if opts.pronunciation {
        render::pronunciation(&mut out, &stored.entry.headword)?;
    }
    Ok(())
}

/// Numbered pick among stored candidates, plus "search online" when offered.
/// Re-asks on bad input; end of input is treated as no choice.
pub fn choose(
    query: &str,
    candidates: &[String],
    offer_online: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Target> {
    writeln!(out, "Several stored words match '{query}':")?;
    for (i, c) in candidates.iter().enumerate() {
        writeln!(out, "  {}. {c}", i + 1)?;
    }
    let online = candidates.len() + 1;
    if offer_online {
        writeln!(out, "  {online}. {}", style(format!("search '{query}' online")).dim())?;
    }

    let mut line = String::new();
    loop {
        write!(out, "choice: ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(Error::NoAction);
        }
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=candidates.len()).contains(&n) => {
                return Ok(Target::Stored(candidates[n - 1].clone()));
            }
            Ok(n) if offer_online && n == online => return Ok(Target::Online(s!(query))),
            _ => writeln!(out, "enter a number from the list")?,
        }
    }
}

/// Step lines on stderr, shown with `-v`.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, steps: usize) {
        self.total = steps;
        self.done = 0;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{}", style(msg).dim());
    }
    fn step_done(&mut self, step: &str) {
        self.done += 1;
        eprintln!("{} {step}", style(format!("[{}/{}]", self.done, self.total)).cyan());
    }
    fn finish(&mut self) {
        eprintln!("{}", style("done").dim());
    }
}
