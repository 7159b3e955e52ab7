/// Talat Player - interactive terminal shell
///
/// Drives the playback engine against the wall-clock simulated backend:
/// tracks "play" in real time, finish and auto-advance like the real
/// thing, and favorites/playlists persist as JSON under the data
/// directory.
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use talat_core::Track;
use talat_playback::{ClockLoader, MiniPlayer, PlaybackConfig, PlaybackEngine, PlayerView};
use talat_storage::{CollectionStore, JsonFileStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "talat")]
#[command(about = "Terminal player for the Talat catalog", long_about = None)]
struct Cli {
    /// Data directory for persisted favorites and playlists
    #[arg(long, env = "TALAT_DATA_DIR", default_value = ".talat")]
    data_dir: PathBuf,

    /// Fallback duration (seconds) for tracks without a duration hint
    #[arg(long, default_value_t = 180)]
    default_duration: u64,

    /// Poll interval in milliseconds
    #[arg(long, default_value_t = 250)]
    poll_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let backend = JsonFileStore::new(&cli.data_dir)
        .with_context(|| format!("opening data directory {}", cli.data_dir.display()))?;
    let engine = Arc::new(PlaybackEngine::new(
        Box::new(ClockLoader::new(Duration::from_secs(cli.default_duration))),
        CollectionStore::load(Box::new(backend)),
        PlaybackConfig::default(),
    ));
    let player = Arc::new(MiniPlayer::new(Arc::clone(&engine)));
    tracing::info!(data_dir = %cli.data_dir.display(), "collections opened");

    // Background poll: keeps position fresh and drives auto-advance when a
    // track finishes, the same job the UI's status callback does.
    let poller = {
        let player = Arc::clone(&player);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(cli.poll_ms));
            loop {
                ticker.tick().await;
                let _ = player.refresh().await;
            }
        })
    };

    let catalog = demo_catalog();
    println!("Talat Player - type `help` for commands");
    repl(&engine, &player, &catalog).await?;

    poller.abort();
    engine.dispose().await;
    Ok(())
}

async fn repl(
    engine: &Arc<PlaybackEngine>,
    player: &Arc<MiniPlayer>,
    catalog: &[Track],
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let arg = parts.next();
        let rest = parts.collect::<Vec<_>>().join(" ");

        match command {
            "help" => print_help(),
            "list" => {
                for (i, track) in catalog.iter().enumerate() {
                    let heart = if engine.is_favorite(&track.id) { "*" } else { " " };
                    let clock = track.duration_hint.as_deref().unwrap_or("--:--");
                    println!("{heart} {i:2}  {} - {} ({clock})", track.title, track.artist);
                }
            }
            "play" => match arg.and_then(|a| a.parse::<usize>().ok()) {
                Some(index) if index < catalog.len() => {
                    player
                        .play(catalog[index].clone(), catalog.to_vec())
                        .await;
                }
                _ => println!("usage: play <index> (see `list`)"),
            },
            "pause" | "resume" => player.tap_play_pause().await,
            "next" => player.tap_next().await,
            "prev" => player.tap_previous().await,
            "seek" => match arg.and_then(|a| a.parse::<u64>().ok()) {
                Some(seconds) => engine.seek_to(seconds * 1000).await,
                None => println!("usage: seek <seconds>"),
            },
            "fwd" => player.tap_skip_forward().await,
            "back" => player.tap_skip_backward().await,
            "shuffle" => {
                let on = player.tap_shuffle();
                println!("shuffle {}", if on { "on" } else { "off" });
            }
            "repeat" => {
                let on = player.tap_repeat();
                println!("repeat {}", if on { "on" } else { "off" });
            }
            "fav" => player.tap_favorite(),
            "favs" => {
                for track in engine.favorites() {
                    println!("* {} - {}", track.title, track.artist);
                }
            }
            "playlists" => {
                for playlist in engine.playlists() {
                    println!("{} ({} tracks)  [{}]", playlist.name, playlist.tracks.len(), playlist.id);
                }
            }
            "newpl" => {
                let name = match arg {
                    Some(first) if rest.is_empty() => first.to_string(),
                    Some(first) => format!("{first} {rest}"),
                    None => {
                        println!("usage: newpl <name>");
                        continue;
                    }
                };
                let playlist = engine.create_playlist(&name);
                println!("created playlist [{}]", playlist.id);
            }
            "addpl" => match (arg, rest.parse::<usize>().ok()) {
                (Some(playlist_id), Some(index)) if index < catalog.len() => {
                    if !engine.add_to_playlist(playlist_id, catalog[index].clone()) {
                        println!("no such playlist: {playlist_id}");
                    }
                }
                _ => println!("usage: addpl <playlist-id> <track-index>"),
            },
            "now" => print_now(player.refresh().await),
            "close" => player.tap_close().await,
            "quit" | "exit" => break,
            other => println!("unknown command `{other}`; type `help`"),
        }

        if let Some(notice) = player.notice() {
            println!("! {notice}");
        }
    }

    Ok(())
}

fn print_now(view: Option<PlayerView>) {
    let Some(view) = view else {
        println!("nothing playing");
        return;
    };

    let state = if view.is_loading {
        "loading"
    } else if view.is_playing {
        "playing"
    } else {
        "paused"
    };
    let heart = if view.is_favorite { " *" } else { "" };
    println!(
        "[{state}] {} - {}{heart}  {}/{}  shuffle={} repeat={}",
        view.title,
        view.artist,
        view.position_label,
        view.duration_label,
        view.is_shuffle,
        view.is_repeat,
    );
}

fn print_help() {
    println!("  list                     show the demo catalog");
    println!("  play <index>             play a catalog track");
    println!("  pause | resume           toggle play/pause");
    println!("  next | prev              queue navigation");
    println!("  seek <seconds>           jump within the track");
    println!("  fwd | back               skip 15 seconds");
    println!("  shuffle | repeat         toggle modes");
    println!("  fav | favs               favorite current / list favorites");
    println!("  playlists                list playlists");
    println!("  newpl <name>             create a playlist");
    println!("  addpl <id> <index>       add a catalog track to a playlist");
    println!("  now                      show the player state");
    println!("  close                    stop playback");
    println!("  quit                     exit");
}

/// Built-in catalog so the shell is usable without a backend
fn demo_catalog() -> Vec<Track> {
    let entries = [
        ("qasida-01", "Ya Imam al-Rusli", "Talat Ensemble", "1:02"),
        ("qasida-02", "Qad Kafani", "Talat Ensemble", "0:45"),
        ("nasheed-01", "Tala'a al-Badru", "Layali Group", "0:58"),
        ("nasheed-02", "Salawat Medley", "Layali Group", "1:30"),
        ("poem-01", "Burda, Chapter One", "Dar al-Inshad", "2:10"),
    ];

    entries
        .into_iter()
        .map(|(id, title, artist, clock)| {
            let mut track = Track::new(id, title, artist, format!("https://cdn.talat.app/{id}.mp3"));
            track.duration_hint = Some(clock.to_string());
            track.image_url = Some(format!("https://cdn.talat.app/{id}.jpg"));
            track
        })
        .collect()
}
