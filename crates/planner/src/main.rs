use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use cueplan_core::{
    aggregate_statistics, build_global_timeline, build_report, format_clock, ConfigManager,
    LaneLayout, PlannerSettings, ReportOptions, RoomPlan, ScheduleResolver, ShowManager,
};

/// Plan timed cues across the rooms of an exhibition and report on the schedule.
#[derive(Parser, Debug)]
#[command(name = "cueplan")]
#[command(about = "Exhibition cue planner")]
struct Args {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write an empty show with every configured room
    New { path: PathBuf },
    /// Print each room's resolved schedule and display lanes
    Schedule {
        path: PathBuf,
        /// Only show this room
        #[arg(long)]
        room: Option<String>,
    },
    /// Print the show-wide timeline, rooms stitched end to end
    Timeline { path: PathBuf },
    /// Print cue counts and durations per room and for the whole show
    Stats { path: PathBuf },
    /// Write the full text report
    Report {
        path: PathBuf,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the configured room order and the show files next to it
    Rooms,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut config = ConfigManager::new(args.config);
    let settings = config
        .load()
        .with_context(|| format!("loading settings from {}", config.config_path().display()))?;
    log::debug!("using settings from {}", config.config_path().display());

    let mut shows = ShowManager::new(&settings)?;

    match args.command {
        Command::New { path } => {
            shows.new_show();
            let saved = shows
                .save_show_as(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Created {} with {} rooms", saved.display(), settings.room_order.len());
        }
        Command::Schedule { path, room } => {
            load(&mut shows, &path)?;
            let rooms = &shows.current_show().rooms;
            match room {
                Some(name) => match rooms.iter().find(|r| r.name == name) {
                    Some(room) => print_room_schedule(room),
                    None => bail!("no room named {:?} in the show order", name),
                },
                None => rooms.iter().for_each(print_room_schedule),
            }
        }
        Command::Timeline { path } => {
            load(&mut shows, &path)?;
            print_timeline(&shows.current_show().rooms);
        }
        Command::Stats { path } => {
            load(&mut shows, &path)?;
            print_stats(&shows.current_show().rooms);
        }
        Command::Report { path, output } => {
            load(&mut shows, &path)?;
            let report = render_report(&shows.current_show().rooms, &settings);
            match output {
                Some(out) => {
                    fs::write(&out, report).with_context(|| format!("writing {}", out.display()))?;
                    println!("Report written to {}", out.display());
                }
                None => print!("{report}"),
            }
        }
        Command::Rooms => {
            for (index, name) in settings.room_order.iter().enumerate() {
                println!("{:>2}. {}", index + 1, name);
            }
            let files = shows.list_shows()?;
            if !files.is_empty() {
                println!();
                println!("Show files:");
                for file in files {
                    println!("  {}", file.display());
                }
            }
        }
    }

    Ok(())
}

fn load(shows: &mut ShowManager, path: &Path) -> anyhow::Result<()> {
    shows
        .load_show(path)
        .with_context(|| format!("failed to open show file {}", path.display()))?;
    Ok(())
}

fn print_room_schedule(room: &RoomPlan) {
    println!("{}", room.name);
    if room.cues.is_empty() {
        println!("  (no cues)");
        println!();
        return;
    }

    let resolved = ScheduleResolver::new(&room.cues).resolve();
    let layout = LaneLayout::from_spans(&resolved.spans(&room.cues));

    println!(
        "  {:<28} {:<20} {:>9} {:>9} {:>5}",
        "cue", "type", "start", "end", "lane"
    );
    for (index, cue) in room.cues.iter().enumerate() {
        let start = resolved.starts[index];
        println!(
            "  {:<28} {:<20} {:>9} {:>9} {:>5}",
            cue.name,
            cue.cue_type.as_str(),
            format_clock(start),
            format_clock(start + cue.effective_duration()),
            layout.lanes[index]
        );
    }
    println!(
        "  room length {} across {} lane(s)",
        format_clock(resolved.room_end(&room.cues)),
        layout.lane_count
    );
    println!();
}

fn print_timeline(rooms: &[RoomPlan]) {
    let timeline = build_global_timeline(rooms);
    let layout = timeline.lanes();

    let mut order: Vec<usize> = (0..timeline.entries.len()).collect();
    order.sort_by(|&a, &b| {
        timeline.entries[a]
            .absolute_start
            .total_cmp(&timeline.entries[b].absolute_start)
    });

    for index in order {
        let entry = &timeline.entries[index];
        println!(
            "{:>9} {:>9}  lane {:<2} {:<16} {}",
            format_clock(entry.absolute_start),
            format_clock(entry.end()),
            layout.lanes[index],
            entry.room_name,
            entry.cue.name
        );
    }
    println!(
        "total show duration {} ({:.1} s)",
        format_clock(timeline.total_duration),
        timeline.total_duration
    );
}

fn print_stats(rooms: &[RoomPlan]) {
    let timeline = build_global_timeline(rooms);
    let stats = aggregate_statistics(rooms, &timeline);

    println!(
        "{} cues, {} of cue time, show runs {}",
        stats.total_cues,
        format_clock(stats.total_cue_time),
        format_clock(stats.total_show_duration)
    );
    for entry in &stats.by_cue_type {
        println!(
            "  {:<20} {:>3} cues  avg {:.1} s",
            entry.cue_type.as_str(),
            entry.count,
            entry.average_duration()
        );
    }
    for (trigger, count) in &stats.by_trigger {
        println!("  {:<20} {:>3} cues", trigger.as_str(), count);
    }
    for (play, count) in &stats.by_play {
        println!("  {:<20} {:>3} cues", play.as_str(), count);
    }
    println!();
    for room in &stats.rooms {
        println!(
            "{:<16} {:>3} cues  {}",
            room.room_name,
            room.cue_count,
            format_clock(room.room_duration)
        );
    }
}

fn render_report(rooms: &[RoomPlan], settings: &PlannerSettings) -> String {
    let timeline = build_global_timeline(rooms);
    let stats = aggregate_statistics(rooms, &timeline);
    let options = ReportOptions {
        width: settings.report_width,
        ..ReportOptions::default()
    };
    build_report(&stats, &timeline, &options)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use cueplan_core::{Cue, DEFAULT_ROOM_ORDER};

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_report_with_output() {
        let args = Args::parse_from(["cueplan", "report", "show.json", "-o", "out.txt"]);
        match args.command {
            Command::Report { path, output } => {
                assert_eq!(path, PathBuf::from("show.json"));
                assert_eq!(output, Some(PathBuf::from("out.txt")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_render_report_uses_configured_width() {
        let rooms = vec![RoomPlan::with_cues(
            DEFAULT_ROOM_ORDER[0],
            vec![Cue::at_time("welcome", 0.0, 10.0)],
        )];
        let settings = PlannerSettings {
            report_width: 50,
            ..PlannerSettings::default()
        };
        let report = render_report(&rooms, &settings);
        assert!(report.contains(&format!("\n{}\n", "=".repeat(50))));
        assert!(!report.contains(&"=".repeat(51)));
    }
}
