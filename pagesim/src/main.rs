use std::fs::File;
use std::io::BufReader;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use pagelib::config::{Algorithm, SimulationConfig, DEFAULT_FRAMES};
use pagelib::io::{parse_frame_count, parse_references, read_references};
use pagelib::playback::{autoplay, drive, Command, IntervalTicker, PlaybackSession, DEFAULT_INTERVAL};
use pagelib::render::{render_comparison, render_summary, render_timeline};
use pagelib::simulator::{SimulationResult, Simulator};

#[derive(Parser, Debug)]
#[command(about = String::from("Page replacement simulator for FIFO, LRU, and Optimal policies"))]
struct Args {
    /// Reference string, pages separated by whitespace or commas
    references: Option<String>,

    /// Read the reference string from a file instead
    #[arg(short, long, conflicts_with = "references")]
    trace: Option<PathBuf>,

    /// JSON run configuration. Other options take precedence over its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames, unparsable values fall back to 1
    #[arg(short, long)]
    frames: Option<String>,

    /// FIFO, LRU, or Optimal
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Run every algorithm and compare the totals
    #[arg(long, conflicts_with_all = ["play", "step"])]
    compare: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Reveal the timeline one step at a time
    #[arg(long, conflicts_with = "json")]
    play: bool,

    /// Step through the timeline from the keyboard: Enter steps, p plays or pauses, r resets, q quits
    #[arg(long, conflicts_with_all = ["json", "play"])]
    step: bool,

    /// Milliseconds between steps when playing
    #[arg(long, default_value_t = DEFAULT_INTERVAL.as_millis() as u64)]
    interval_ms: u64,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Serialize)]
struct Comparison<'a> {
    algorithm: Algorithm,
    result: &'a SimulationResult,
}

fn main() -> Result<(), String> {
    let start = Instant::now();
    let args = Args::parse();
    init_logging(args.debug);

    let config = match &args.config {
        Some(path) => Some(load_config(path)?),
        None => None,
    };
    let references = if let Some(text) = &args.references {
        parse_references(text)
    } else if let Some(path) = &args.trace {
        read_references(path).map_err(|e| format!("Couldn't read the trace file at path {}: {e}", path.display()))?
    } else if let Some(config) = &config {
        config.reference_sequence()
    } else {
        Vec::new()
    };
    if references.is_empty() {
        return Err("Please enter a reference string, for example \"7 0 1 2 0 3 0 4\"".to_string());
    }
    let frames = match (&args.frames, &config) {
        (Some(frames), _) => parse_frame_count(frames),
        (None, Some(config)) => config.frame_count(),
        (None, None) => DEFAULT_FRAMES,
    };
    let algorithm = match (&args.algorithm, &config) {
        (Some(name), _) => name.parse::<Algorithm>().map_err(|e| e.to_string())?,
        (None, Some(config)) => config.algorithm,
        (None, None) => Algorithm::default(),
    };
    debug!(references = references.len(), frames, %algorithm, "Parsed input");

    let simulation_time = if args.compare {
        let mut results = Vec::with_capacity(Algorithm::ALL.len());
        let mut simulation_time = Duration::new(0, 0);
        for algorithm in Algorithm::ALL {
            let mut simulator = Simulator::new(frames, algorithm).map_err(|e| e.to_string())?;
            results.push((algorithm, simulator.simulate(&references)));
            simulation_time += *simulator.get_execution_time();
        }
        if args.json {
            let comparisons: Vec<_> = results
                .iter()
                .map(|(algorithm, result)| Comparison { algorithm: *algorithm, result })
                .collect();
            println!("{}", serde_json::to_string_pretty(&comparisons).map_err(|e| format!("Couldn't serialise the output {e}"))?);
        } else {
            println!("{}", render_comparison(&results));
        }
        simulation_time
    } else {
        let mut simulator = Simulator::new(frames, algorithm).map_err(|e| e.to_string())?;
        let result = simulator.simulate(&references);
        let title = format!("{algorithm}, {frames} frames");
        let interval = Duration::from_millis(args.interval_ms);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&result).map_err(|e| format!("Couldn't serialise the output {e}"))?);
        } else if args.step {
            step_through(&result, &title, interval);
        } else if args.play {
            println!("{title}");
            play(&result, interval);
        } else {
            println!("{title}");
            println!("{}", render_timeline(&result, result.len()));
            println!("{}", render_summary(&result, result.len()));
        }
        *simulator.get_execution_time()
    };
    if args.performance {
        let end = Instant::now();
        let total_time = end - start;
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!("Total execution time (includes initial parsing, configuration, and output): {}s", total_time.as_nanos() as f64 / 1e9)
    }
    Ok(())
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<SimulationConfig, String> {
    let config_file = File::open(path).map_err(|e| format!("Couldn't open the config file at path {}: {e}", path.display()))?;
    serde_json::from_reader(BufReader::new(config_file)).map_err(|e| format!("Couldn't parse the config file: {e}"))
}

fn play(result: &SimulationResult, interval: Duration) {
    let height = result.frame_count() + 3;
    println!("{}", render_timeline(result, 0));
    println!("{}", render_summary(result, 0));
    let mut session = PlaybackSession::start(result);
    let mut ticker = IntervalTicker::new(interval);
    autoplay(&mut session, &mut ticker, |view| {
        // Move back up over the previous frame and redraw in place
        print!("\x1B[{height}A\x1B[J");
        println!("{}", render_timeline(result, view.index + 1));
        println!("{}", render_summary(result, view.index + 1));
        ControlFlow::Continue(())
    });
}

fn step_through(result: &SimulationResult, title: &str, interval: Duration) {
    let (sender, receiver) = mpsc::channel();
    // Detached, the process exits without waiting for a final line
    thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else {
                break;
            };
            match Command::parse(&line) {
                Some(command) => {
                    if sender.send(command).is_err() {
                        break;
                    }
                }
                None => warn!(input = line.trim(), "Unknown command, expected Enter, p, r, or q"),
            }
        }
    });
    let draw = |revealed: usize| {
        // Clear the screen, typed commands echo so redrawing in place would drift
        print!("\x1B[2J\x1B[H");
        println!("{title}");
        println!("{}", render_timeline(result, revealed));
        println!("{}", render_summary(result, revealed));
        println!("Enter: step   p: play/pause   r: reset   q: quit");
    };
    draw(0);
    let mut session = PlaybackSession::start(result);
    drive(&mut session, &mut IntervalTicker::new(interval), &receiver, draw);
}
