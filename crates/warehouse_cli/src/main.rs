use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use warehouse_control::{interact, AutoPlayer, InteractLatch, PlayerDriver};
use warehouse_core::{commands, time_bonus, Content, Event, EventEnvelope, Mode, WarehouseState};
use warehouse_world::{build_initial_state, load_content};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "warehouse_cli", about = "Warehouse Sim CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run auto-played rounds frame by frame.
    Run {
        /// World seed; random when omitted.
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "./content")]
        content_dir: String,
        /// Number of consecutive rounds to play.
        #[arg(long, default_value_t = 1)]
        rounds: u32,
        /// Print a status row every N frames.
        #[arg(long, default_value_t = 60)]
        print_every: u64,
        /// Simulated frames per countdown second.
        #[arg(long, default_value_t = 10)]
        frames_per_sec: u64,
        /// Safety cap on frames per round.
        #[arg(long, default_value_t = 20_000)]
        max_frames: u64,
        /// Dump the final state as JSON to this path.
        #[arg(long)]
        snapshot: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Round loop
// ---------------------------------------------------------------------------

struct RoundOutcome {
    seconds_left: u32,
}

fn play_round(
    state: &mut WarehouseState,
    content: &Content,
    rng: &mut ChaCha8Rng,
    print_every: u64,
    frames_per_sec: u64,
    max_frames: u64,
) -> RoundOutcome {
    let mut events = Vec::new();
    commands::start_round(state, content, rng, &mut events);
    drain_events(&mut events);

    // Installing the round resets the countdown; there is exactly one timer
    // variable, so no stale countdown from a previous round can fire.
    let mut seconds_left = state
        .round
        .as_ref()
        .map_or(0, |round| round.config.time_limit_secs);

    let mut driver = AutoPlayer::new();
    let mut latch = InteractLatch::default();
    let mut pos = (12, 9);

    for frame in 1..=max_frames {
        state.meta.frame += 1;

        let finished = state.round.as_ref().is_some_and(|round| round.is_finished);
        if finished || seconds_left == 0 {
            break;
        }
        if let Some(phase) = state.round.as_ref().and_then(|round| round.current_phase()) {
            if phase != state.mode {
                commands::switch_mode(state, content, phase, rng, &mut events);
            }
        }

        let input = driver.next_input(state, content, pos);
        pos = (pos.0 + input.step.0, pos.1 + input.step.1);
        if latch.update(input.interact_held) {
            interact(state, content, pos, &mut events);
        }
        drain_events(&mut events);

        // Fixed-cadence countdown: one second per frames_per_sec frames.
        if frames_per_sec > 0 && frame % frames_per_sec == 0 {
            seconds_left = seconds_left.saturating_sub(1);
        }

        if print_every > 0 && frame % print_every == 0 {
            print_status(state, seconds_left);
        }
    }

    RoundOutcome { seconds_left }
}

fn run(
    seed: Option<u64>,
    content_dir: &str,
    rounds: u32,
    print_every: u64,
    frames_per_sec: u64,
    max_frames: u64,
    snapshot: Option<String>,
) -> Result<()> {
    let content = load_content(content_dir)?;
    let resolved_seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(resolved_seed);
    let mut state = build_initial_state(&content, resolved_seed, &mut rng);

    println!(
        "Starting warehouse: seed={resolved_seed} slots={} rounds={rounds} content_version={}",
        state.slots.all().len(),
        content.content_version,
    );
    println!("{}", "-".repeat(80));

    for _ in 0..rounds {
        let outcome = play_round(
            &mut state,
            &content,
            &mut rng,
            print_every,
            frames_per_sec,
            max_frames,
        );
        print_summary(&state, &content, outcome.seconds_left);
        println!("{}", "-".repeat(80));
    }

    if let Some(path) = snapshot {
        let file = std::fs::File::create(&path).with_context(|| format!("creating {path}"))?;
        serde_json::to_writer_pretty(file, &state).with_context(|| format!("writing {path}"))?;
        println!("Snapshot written to {path}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn drain_events(events: &mut Vec<EventEnvelope>) {
    for envelope in events.drain(..) {
        println!("[frame {:05}] {}", envelope.frame, describe(&envelope.event));
    }
}

fn describe(event: &Event) -> String {
    match event {
        Event::OrderGenerated { order_id, lines } => {
            format!("order {order_id} generated ({lines} lines)")
        }
        Event::ItemPicked { slot_id, item_type } => {
            format!("picked {item_type} from {slot_id}")
        }
        Event::OrderPacked { order_id } => {
            format!("order {order_id} fully picked, take it to shipping")
        }
        Event::OrderShipped {
            order_id,
            items_shipped,
        } => format!("order {order_id} shipped ({items_shipped} items)"),
        Event::InboundGenerated { tasks } => format!("{tasks} inbound tasks at the dock"),
        Event::ItemReceived {
            item_type,
            target_slot_id,
        } => format!("received {item_type}, destined for {target_slot_id}"),
        Event::ItemPutAway { slot_id, item_type } => {
            format!("put {item_type} away in {slot_id}")
        }
        Event::InboundCompleted { tasks } => format!("all {tasks} inbound tasks complete"),
        Event::ModeSwitched { mode } => format!("mode -> {mode}"),
        Event::RoundStarted {
            round_id,
            phases,
            time_limit_secs,
        } => format!("round {round_id} started ({phases} phases, {time_limit_secs}s)"),
        Event::PhaseAdvanced { phase_index, mode } => {
            format!("phase {phase_index} -> {mode}")
        }
        Event::RoundFinished { round_id, score } => {
            format!("round {round_id} objective complete (score {score})")
        }
    }
}

fn print_status(state: &WarehouseState, seconds_left: u32) {
    let score = state.round.as_ref().map_or(0, |round| round.score);
    let progress = match state.mode {
        Mode::Picking => state.current_order.as_ref().map_or_else(
            || "no order".to_string(),
            |order| {
                let picked: u32 = order.items.iter().map(|line| line.picked).sum();
                let total: u32 = order.items.iter().map(|line| line.quantity).sum();
                format!("order {}/{total} picked", picked)
            },
        ),
        Mode::Inbound => {
            let done = state
                .inbound_tasks
                .iter()
                .filter(|task| task.is_completed)
                .count();
            format!("inbound {done}/{} put away", state.inbound_tasks.len())
        }
    };
    println!(
        "[t-{seconds_left:03}s] mode={} {progress} carried={} score={score}",
        state.mode,
        state.carried.len(),
    );
}

fn print_summary(state: &WarehouseState, content: &Content, seconds_left: u32) {
    let Some(round) = state.round.as_ref() else {
        println!("No round was played.");
        return;
    };
    if round.is_finished {
        let bonus = time_bonus(round, &content.constants, seconds_left);
        println!(
            "Round complete! base={} time_bonus={bonus} total={}",
            round.score,
            round.score + bonus,
        );
    } else {
        println!("Time up! final score={}", round.score);
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            seed,
            content_dir,
            rounds,
            print_every,
            frames_per_sec,
            max_frames,
            snapshot,
        } => run(
            seed,
            &content_dir,
            rounds,
            print_every,
            frames_per_sec,
            max_frames,
            snapshot,
        ),
    }
}
