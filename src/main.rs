//! AstroLab entry point
//!
//! The browser build is driven from JavaScript through `astrolab::platform::WebGame`.
//! Natively there is no window: the binary flies headless autopilot runs at a
//! synthetic 60 Hz and reports the results.
//!
//! Usage:
//!   astrolab [--seed N] [--runs N] [--max-ticks N] [--config PATH]
//!            [--best-file PATH] [--compact]

#[cfg(not(target_arch = "wasm32"))]
use astrolab::{
    FormFactor, GameError, MemoryStore, ScoreStore, Session, Tuning,
    consts::TICK_MS,
    persistence::FileStore,
    sim::{GameEvent, RunState, Viewport, autopilot},
};

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
struct Options {
    seed: u64,
    runs: u32,
    max_ticks: u64,
    config: Option<std::path::PathBuf>,
    best_file: Option<std::path::PathBuf>,
    compact: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for Options {
    fn default() -> Self {
        Self {
            seed: 42,
            runs: 3,
            max_ticks: 60 * 60 * 5,
            config: None,
            best_file: None,
            compact: false,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_args(args: &[String]) -> Options {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--seed", Some(v)) => {
                options.seed = v.parse().unwrap_or(options.seed);
                i += 1;
            }
            ("--runs", Some(v)) => {
                options.runs = v.parse().unwrap_or(options.runs);
                i += 1;
            }
            ("--max-ticks", Some(v)) => {
                options.max_ticks = v.parse().unwrap_or(options.max_ticks);
                i += 1;
            }
            ("--config", Some(v)) => {
                options.config = Some(v.into());
                i += 1;
            }
            ("--best-file", Some(v)) => {
                options.best_file = Some(v.into());
                i += 1;
            }
            ("--compact", _) => options.compact = true,
            (other, _) => log::warn!("Ignoring unknown argument '{}'", other),
        }
        i += 1;
    }
    options
}

#[cfg(not(target_arch = "wasm32"))]
fn run(options: &Options) -> Result<(), GameError> {
    let form_factor = if options.compact {
        FormFactor::Compact
    } else {
        FormFactor::Large
    };
    let tuning = match &options.config {
        Some(path) => Tuning::load(path)?,
        None => Tuning::for_form_factor(form_factor),
    };
    let viewport = match tuning.form_factor {
        FormFactor::Compact => Viewport::new(390.0, 844.0)?,
        FormFactor::Large => Viewport::new(800.0, 600.0)?,
    };
    let store: Box<dyn ScoreStore> = match &options.best_file {
        Some(path) => Box::new(FileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };

    let mut session = Session::new(store, tuning, viewport, options.seed)?;
    let mut now = 0.0;

    for run in 1..=options.runs {
        if run == 1 {
            session.start(now);
        } else {
            session.restart(now);
        }

        let mut ticks = 0;
        while session.run_state() == RunState::Running && ticks < options.max_ticks {
            let input = autopilot(session.state());
            now += TICK_MS;
            for event in session.tick(&input, now) {
                if let GameEvent::BestSaveFailed { best } = event {
                    eprintln!("warning: best distance {best} m could not be saved");
                }
            }
            ticks += 1;
        }
        // Let the explosion play out before the next run
        while session.is_animating() && session.run_state() == RunState::Over {
            now += TICK_MS;
            session.tick(&Default::default(), now);
        }

        let outcome = if session.run_state() == RunState::Over {
            "crashed"
        } else {
            "tick limit"
        };
        println!(
            "Run {run}: {} after {ticks} ticks ({outcome}) | best {} m | grade {}",
            session.share_text(),
            session.best_distance(),
            session.grade()
        );
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("AstroLab (native, headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);
    log::debug!("{:?}", options);

    if let Err(e) = run(&options) {
        log::error!("{e}");
        eprintln!("astrolab: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is astrolab::platform::web::wasm_start
}
