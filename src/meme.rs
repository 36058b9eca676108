use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow, bail};
use rand::seq::SliceRandom;

use crate::cli::MemeArgs;

/// Players probed in preference order; the first one on PATH wins.
const PLAYERS: [&str; 4] = ["vlc", "mpv", "smplayer", "mplayer"];
const VIDEO_EXTENSIONS: [&str; 2] = ["mp4", "mov"];
const CACHE_FILENAME: &str = "meme";

/// Play one video: discover a player, enumerate candidates, select
/// (randomly or from the replay cache), launch detached, record, print.
pub fn run(args: MemeArgs) -> Result<()> {
    let player = resolve_player(args.player.as_deref())?;

    let directory = match args.directory {
        Some(dir) => dir,
        None => default_directory()?,
    };
    if !directory.exists() {
        bail!("{} folder does not exist.", directory.display());
    }

    let candidates = collect_videos(&directory)?;

    let cache = cache_path();
    let selected = if args.replay {
        last_played(&cache)?
    } else {
        pick_random(&candidates, &directory)?.clone()
    };

    play_video(&player, &selected)?;

    if !args.replay {
        cache_video(&cache, &selected);
    }

    let resolved = fs::canonicalize(&selected).unwrap_or_else(|_| selected.clone());
    println!("Video Played: {}", resolved.display());
    Ok(())
}

fn resolve_player(requested: Option<&str>) -> Result<String> {
    if let Some(name) = requested {
        if which::which(name).is_ok() {
            return Ok(name.to_owned());
        }
        bail!("requested player `{name}` was not found on PATH");
    }

    for player in PLAYERS {
        if which::which(player).is_ok() {
            tracing::debug!(player, "video player selected");
            return Ok(player.to_owned());
        }
    }

    println!("No suitable video player was found...");
    println!("{}", PLAYERS.join(", "));
    bail!("install one of the supported players and retry")
}

fn default_directory() -> Result<PathBuf> {
    let home = dirs::home_dir().context("unable to determine home directory")?;
    Ok(home.join("Videos").join("memes"))
}

/// Immediate children of `directory` with a recognized video extension.
fn collect_videos(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut videos = Vec::new();
    for entry in
        fs::read_dir(directory).with_context(|| format!("listing {}", directory.display()))?
    {
        let path = entry
            .with_context(|| format!("listing {}", directory.display()))?
            .path();
        if path.is_file() && has_video_extension(&path) {
            videos.push(path);
        }
    }
    videos.sort();
    Ok(videos)
}

fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext))
}

fn pick_random<'a>(candidates: &'a [PathBuf], directory: &Path) -> Result<&'a PathBuf> {
    candidates
        .choose(&mut rand::thread_rng())
        .ok_or_else(|| anyhow!("no videos found in {}", directory.display()))
}

fn cache_path() -> PathBuf {
    std::env::temp_dir().join(CACHE_FILENAME)
}

/// Read the replay cache; a missing or empty cache means there is
/// nothing to replay.
fn last_played(cache: &Path) -> Result<PathBuf> {
    let recorded = match fs::read_to_string(cache) {
        Ok(contents) => contents.lines().next().unwrap_or("").to_owned(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", cache.display()));
        }
    };

    if recorded.is_empty() {
        bail!("nothing to replay yet; play a video first");
    }
    Ok(PathBuf::from(recorded))
}

fn cache_video(cache: &Path, video: &Path) {
    if let Err(err) = fs::write(cache, video.to_string_lossy().as_bytes()) {
        println!("Error [cache_video]: {err}");
    }
}

/// Launch the player detached with output suppressed; the child is
/// never waited on.
fn play_video(player: &str, video: &Path) -> Result<()> {
    Command::new(player)
        .arg(video)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("launching {player}"))?;
    Ok(())
}
