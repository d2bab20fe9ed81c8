// algostep: step-by-step algorithm visualizer

use std::error::Error;
use std::fs;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde_json::Value;

use algostep::battle::arena::{Arena, BattleSetup, DataShape, DEFAULT_SIZE};
use algostep::battle::{Side, Winner};
use algostep::config::{Limits, Speed, DEFAULT_MAX_STEPS};
use algostep::decision::{DecisionNode, DecisionTree};
use algostep::registry::Registry;
use algostep::runners::DynRunner;
use algostep::ui::{App, BattleApp};

/// Step-by-step algorithm visualizer.
#[derive(Parser)]
#[command(name = "algostep", version, about = "Step-by-step algorithm visualizer")]
struct Cli {
    /// Maximum number of steps a single trace may hold.
    #[arg(long, global = true, env = "ALGOSTEP_MAX_STEPS", default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Log more (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every runner id, grouped by category.
    List,

    /// Print a runner's trace as JSON, one step per line.
    Trace {
        /// Runner id, e.g. `quick-sort`.
        id: String,

        /// JSON input file (default: the runner's built-in input).
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Replay a runner's trace in the terminal.
    Play {
        id: String,

        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Speed::Normal)]
        speed: Speed,
    },

    /// Race two runners on the same generated data.
    Battle {
        #[arg(short = 'a', long, default_value = "bubble-sort")]
        algo_a: String,

        #[arg(short = 'b', long, default_value = "quick-sort")]
        algo_b: String,

        /// Number of array elements (5..=50).
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,

        #[arg(long, value_enum, default_value_t = DataShape::Random)]
        shape: DataShape,

        /// Seed for the generated data.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[arg(short, long, value_enum, default_value_t = Speed::Normal)]
        speed: Speed,

        /// Run to completion without the UI and print the result.
        #[arg(long)]
        headless: bool,
    },

    /// Walk the recommendation tree with 1-based answers.
    Decide {
        answers: Vec<usize>,
    },
}

impl Commands {
    fn is_interactive(&self) -> bool {
        matches!(
            self,
            Commands::Play { .. } | Commands::Battle { headless: false, .. }
        )
    }
}

fn init_logging(verbose: u8, interactive: bool) {
    let level = match verbose {
        0 if interactive => tracing::Level::WARN,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.command.is_interactive());

    let limits = Limits::new(cli.max_steps);
    let registry = Registry::standard();

    match cli.command {
        Commands::List => list(&registry),
        Commands::Trace { id, input } => {
            let runner = registry.get(&id)?;
            let input = load_input(runner, input.as_deref())?;
            let trace = runner.generate(&input, &limits)?;

            let mut out = io::stdout().lock();
            for step in &trace {
                serde_json::to_writer(&mut out, step)?;
                writeln!(out)?;
            }
            Ok(())
        }
        Commands::Play { id, input, speed } => {
            let runner = registry.get(&id)?;
            let input = load_input(runner, input.as_deref())?;
            let trace = runner.generate(&input, &limits)?;

            let mut app = App::new(runner.name(), runner.pseudocode(), trace, speed);
            with_terminal(|terminal| app.run(terminal))
        }
        Commands::Battle {
            algo_a,
            algo_b,
            size,
            shape,
            seed,
            speed,
            headless,
        } => {
            let setup = BattleSetup {
                algo_a,
                algo_b,
                size,
                shape,
                seed,
            };
            let mut arena = Arena::new(registry, limits, setup)?;

            if headless {
                print_battle_result(&mut arena);
                Ok(())
            } else {
                let mut app = BattleApp::new(arena, speed);
                with_terminal(|terminal| app.run(terminal))
            }
        }
        Commands::Decide { answers } => decide(&answers),
    }
}

fn list(registry: &Registry) -> Result<(), Box<dyn Error>> {
    let mut current = None;
    for runner in registry.iter() {
        if current != Some(runner.category()) {
            current = Some(runner.category());
            println!("{}:", runner.category().label());
        }
        println!("  {:<22}{}", runner.id(), runner.name());
    }
    Ok(())
}

fn load_input(runner: &dyn DynRunner, path: Option<&Path>) -> Result<Value, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(runner.default_input()),
    }
}

fn print_battle_result(arena: &mut Arena) {
    let winner = arena.engine_mut().run_to_end();
    let setup = arena.setup();
    let engine = arena.engine();

    println!(
        "{} ({} steps) vs {} ({} steps)",
        setup.algo_a,
        engine.trace(Side::A).len(),
        setup.algo_b,
        engine.trace(Side::B).len()
    );
    match winner {
        Some(Winner::A) => println!("winner: {}", setup.algo_a),
        Some(Winner::B) => println!("winner: {}", setup.algo_b),
        Some(Winner::Tie) => println!("tie"),
        None => println!("no winner"),
    }
    println!("ticks: {}", engine.ticks());
}

fn decide(answers: &[usize]) -> Result<(), Box<dyn Error>> {
    let tree = DecisionTree::standard();
    let zero_based = answers
        .iter()
        .map(|a| a.checked_sub(1))
        .collect::<Option<Vec<usize>>>()
        .ok_or("answers are numbered from 1")?;

    match tree.walk(&zero_based)? {
        DecisionNode::Question(question) => {
            println!("{}", question.question);
            for (i, option) in question.options.iter().enumerate() {
                println!("  {}. {}", i + 1, option.label);
            }
        }
        DecisionNode::Result(result) => {
            println!("{}", result.algorithm);
            println!("  {}", result.description);
            println!("  why: {}", result.why);
            for why_not in &result.why_not {
                println!("  why not: {}", why_not);
            }
            if let Some(runner) = result.runner {
                println!("  try it: algostep play {}", runner);
            }
        }
    }
    Ok(())
}

/// Run `f` inside raw mode on the alternate screen, restoring the terminal after
fn with_terminal<F>(f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()>,
{
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = f(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
