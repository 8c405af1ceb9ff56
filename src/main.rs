use clap::{Parser, Subcommand};
use fretmodes::fretboard::{generate_positions_with_tolerance, Position, STRING_LABELS};
use fretmodes::notation::{format_chord_symbol, ChordNotation};
use fretmodes::progression::{
    chord_roman_numeral, is_diatonic, parse_chord_symbol, rank_positions_by_proximity,
    Progression, SongKey,
};
use fretmodes::store::{
    load_notation, load_progressions, save_notation, save_progressions, FileStore, KeyValueStore,
    NOTATION_KEY,
};
use fretmodes::{
    build_fret_map, mode_index, resolve_mode, ChordQuality, Config, FretError, Mode, Root,
    MODE_TEMPLATES,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fretmodes", about = "Mode positions on the guitar neck")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Spell a mode: notes, degrees and its seventh chord
    Scale { root: String, mode: String },

    /// Show the seven position fingerings of a mode
    Positions {
        root: String,
        mode: String,

        /// Only show this position (1-7)
        #[arg(long)]
        position: Option<u8>,
    },

    /// Parse a chord symbol
    Parse { symbol: String },

    /// List saved progressions with their resolved modes and positions
    Progressions,

    /// Append a chord to a saved progression
    Add { progression: usize, symbol: String },

    /// Set or clear a progression's song key
    Key {
        progression: usize,
        /// Key root, or `none` to clear
        root: String,

        #[arg(long)]
        minor: bool,
    },

    /// Choose how a chord quality is written (e.g. `maj7 △7`)
    Notation { quality: String, variant: String },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), FretError> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Command::Scale { root, mode } => {
            let mode = lookup_mode(&root, &mode)?;
            print_mode(&mode);
        }
        Command::Positions {
            root,
            mode,
            position,
        } => {
            let mode = lookup_mode(&root, &mode)?;
            let positions = positions_with(&config, &mode);
            for p in &positions {
                if position.map_or(true, |id| id == p.id) {
                    print_position(p);
                }
            }
        }
        Command::Parse { symbol } => match parse_chord_symbol(&symbol) {
            Some(parsed) => println!(
                "{} {} ({})",
                parsed.root,
                parsed.quality.suffix(),
                parsed.quality.key()
            ),
            None => return Err(FretError::UnsupportedChord(symbol)),
        },
        Command::Progressions => {
            let store = FileStore::new(config.resolved_store_dir());
            let notation = display_notation(&config, &store);
            for (idx, progression) in load_progressions(&store).iter().enumerate() {
                print_progression(idx, progression, &config, &notation);
            }
        }
        Command::Add {
            progression,
            symbol,
        } => {
            let mut store = FileStore::new(config.resolved_store_dir());
            let mut progressions = load_progressions(&store);
            let len = progressions.len();
            let target = progressions
                .get_mut(progression)
                .ok_or(FretError::OutOfRange {
                    index: progression,
                    len,
                })?;
            let slot = target.add_chord(&symbol)?;
            println!(
                "Added {} as {} position {}",
                slot.symbol, MODE_TEMPLATES[slot.mode_index].name, slot.position_id
            );
            save_progressions(&mut store, &progressions)?;
        }
        Command::Key {
            progression,
            root,
            minor,
        } => {
            let song_key = if root.eq_ignore_ascii_case("none") {
                None
            } else {
                let root = Root::from_name(&root)?;
                Some(SongKey { root, minor })
            };
            let mut store = FileStore::new(config.resolved_store_dir());
            let mut progressions = load_progressions(&store);
            let len = progressions.len();
            let target = progressions
                .get_mut(progression)
                .ok_or(FretError::OutOfRange {
                    index: progression,
                    len,
                })?;
            target.set_song_key(song_key);
            save_progressions(&mut store, &progressions)?;
        }
        Command::Notation { quality, variant } => {
            let quality = ChordQuality::from_key(&quality)
                .ok_or_else(|| FretError::UnsupportedChord(quality.clone()))?;
            let mut store = FileStore::new(config.resolved_store_dir());
            let mut notation = display_notation(&config, &store);
            notation.set(quality, &variant)?;
            save_notation(&mut store, &notation)?;
        }
    }
    Ok(())
}

fn lookup_mode(root: &str, mode: &str) -> Result<Mode, FretError> {
    let root = Root::from_name(root)?;
    let template = &MODE_TEMPLATES[mode_index(mode)?];
    Ok(resolve_mode(root, template))
}

fn positions_with(config: &Config, mode: &Mode) -> Vec<Position> {
    let fret_map = build_fret_map(&mode.semitones, &mode.notes);
    generate_positions_with_tolerance(&fret_map, &mode.notes, config.overlap_tolerance)
}

/// Saved notation wins over the config file's.
fn display_notation(config: &Config, store: &FileStore) -> ChordNotation {
    match store.get(NOTATION_KEY) {
        Ok(Some(_)) => load_notation(store),
        _ => config.notation.clone(),
    }
}

fn print_mode(mode: &Mode) {
    let notes: Vec<String> = mode.notes.iter().map(|n| n.to_string()).collect();
    let degrees: Vec<&str> = mode.degrees.iter().map(|(_, label)| label).collect();
    println!("{} {}", mode.notes[0], mode.name);
    println!("  Notes:   {}", notes.join(" "));
    println!("  Degrees: {}", degrees.join(" "));
    println!("  Chord:   {} ({})", mode.chord, mode.chord_degrees);
}

fn print_position(position: &Position) {
    println!(
        "Position {} (B string {}) frets {}",
        position.id, position.b_pair, position.range
    );
    for instance in &position.instances {
        println!("  {}", instance.span_label());
        for (label, string) in STRING_LABELS.iter().zip(instance.strings.iter()) {
            let frets: Vec<String> = string
                .iter()
                .map(|o| format!("{}:{}", o.fret, o.note))
                .collect();
            println!("    {:>2}  {}", label, frets.join("  "));
        }
    }
}

fn print_progression(
    idx: usize,
    progression: &Progression,
    config: &Config,
    notation: &ChordNotation,
) {
    let key = progression
        .song_key
        .map(|k| k.to_string())
        .unwrap_or_else(|| "no key".to_string());
    println!("[{}] {} ({})", idx, progression.name, key);

    let song_key = progression.song_key.as_ref();
    let mut previous: Option<Position> = None;
    for (slot, selection) in progression
        .chords
        .iter()
        .zip(progression.effective_selections())
    {
        let symbol = format_chord_symbol(slot.root, slot.quality, notation);
        let template = MODE_TEMPLATES
            .get(selection.mode_index)
            .filter(|_| slot.quality != ChordQuality::Unsupported);
        let Some(template) = template else {
            println!("  {:<8} unsupported", symbol);
            continue;
        };
        let numeral = chord_roman_numeral(slot.root, slot.quality, song_key).unwrap_or_default();
        let marker = if is_diatonic(slot.root, slot.quality, song_key) {
            ""
        } else {
            " *"
        };

        let mode = resolve_mode(slot.root, template);
        let positions = positions_with(config, &mode);
        let ranked = rank_positions_by_proximity(&positions, previous.as_ref(), config.rank_count);
        let ranked: Vec<String> = ranked.iter().map(u8::to_string).collect();
        println!(
            "  {:<8} {:<5} {:<10} pos {}{}  nearest [{}]",
            symbol,
            numeral,
            template.name,
            selection.position_id,
            marker,
            ranked.join(" ")
        );
        previous = positions
            .into_iter()
            .find(|p| p.id == selection.position_id);
    }
}
