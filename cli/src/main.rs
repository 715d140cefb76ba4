use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};
use clap::Parser;
use serde::Serialize;
use sweeper_core::{CellCount, Coord, GameConfig, PlayOutcome, PlayerCell, SessionSnapshot};
use sweeper_protocol::{ErrorResponse, GameState, RevealRequest};
use sweeper_service::{GameService, MemoryStore};

#[derive(Parser, Debug)]
#[command(version, about = "Play a game of Minesweeper from the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width
    #[arg(short = 'W', long, default_value_t = 10)]
    width: Coord,

    /// Board height
    #[arg(short = 'H', long, default_value_t = 10)]
    height: Coord,

    /// Number of mines
    #[arg(short, long, default_value_t = 10)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print protocol JSON instead of drawing the board
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
    log::debug!("seed: {:?}", args.seed);

    let config = GameConfig::new(args.width, args.height, args.mines)
        .context("Invalid game configuration")?;
    let service = GameService::new(MemoryStore::new());
    let snapshot = match args.seed {
        Some(seed) => service.create_session_seeded(config, seed)?,
        None => service.create_session(config)?,
    };

    let mut out = io::stdout().lock();
    if args.json {
        print_json(&mut out, &GameState::from(&snapshot))?;
    } else {
        writeln!(out, "{}", render_board(&snapshot))?;
        writeln!(out, "Enter `row col` to reveal a cell, `q` to quit.")?;
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "q" | "quit") {
            break;
        }

        let request = match parse_request(line) {
            Ok(request) => request,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };

        let finished = if args.json {
            play_json(&service, snapshot.id, &request, &mut out)?
        } else {
            play_text(&service, snapshot.id, &request, &mut out)?
        };
        if finished {
            break;
        }
    }

    log::debug!("{} session(s) left in store", service.store().len());
    Ok(())
}

/// Returns whether the game reached a terminal state.
fn play_text(
    service: &GameService<MemoryStore>,
    id: sweeper_core::SessionId,
    request: &RevealRequest,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let report = match service.reveal_request(id, request) {
        Ok(report) => report,
        Err(err) if err.is_rejection() => {
            writeln!(out, "{err}")?;
            return Ok(false);
        }
        Err(err) => return Err(err.into()),
    };

    writeln!(out, "{}", render_board(&report.snapshot))?;
    match report.outcome {
        PlayOutcome::AlreadyRevealed => writeln!(out, "Cell already revealed")?,
        PlayOutcome::HitMine => writeln!(out, "Game Over! You hit a mine!")?,
        PlayOutcome::Revealed { won: true, .. } => writeln!(out, "You won!")?,
        PlayOutcome::Revealed { cells, .. } => writeln!(out, "Revealed {cells} cells")?,
    }
    Ok(report.snapshot.game_over || report.snapshot.game_won)
}

fn play_json(
    service: &GameService<MemoryStore>,
    id: sweeper_core::SessionId,
    request: &RevealRequest,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    match service.reveal_cell(id, request) {
        Ok(response) => {
            print_json(out, &response)?;
            Ok(response.game_over || response.game_won)
        }
        Err(err) if err.is_rejection() => {
            print_json(out, &err.to_response())?;
            Ok(false)
        }
        Err(err) => {
            print_json(out, &ErrorResponse::new(&err))?;
            Err(err.into())
        }
    }
}

fn print_json(out: &mut impl Write, value: &impl Serialize) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Accepts `row col` or `row,col`.
fn parse_request(line: &str) -> anyhow::Result<RevealRequest> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("Expected `row col`, got {line:?}");
    };

    Ok(RevealRequest {
        row: row.parse().with_context(|| format!("Invalid row {row:?}"))?,
        col: col.parse().with_context(|| format!("Invalid column {col:?}"))?,
    })
}

fn render_cell(cell: PlayerCell) -> char {
    match cell {
        PlayerCell::Hidden => '#',
        PlayerCell::Mine => '*',
        PlayerCell::Revealed(0) => '.',
        PlayerCell::Revealed(count) => char::from(b'0' + count),
    }
}

fn render_board(snapshot: &SessionSnapshot) -> String {
    let mut board = String::from("    ");
    for col in 0..snapshot.width {
        board.push(char::from(b'0' + (col % 10) as u8));
    }
    for (row, cells) in snapshot.view.rows().enumerate() {
        let _ = write!(board, "\n{row:>3} ");
        board.extend(cells.iter().copied().map(render_cell));
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{GameSession, MineLayout, SessionId};
    use sweeper_service::SessionStore;

    fn snapshot_after(mines: &[(Coord, Coord)], reveal: (Coord, Coord)) -> SessionSnapshot {
        let layout = MineLayout::from_mine_coords((3, 4), mines).unwrap();
        let mut session =
            GameSession::with_layout(SessionId::from_uuid(Default::default()), layout).unwrap();
        session.reveal_at(reveal).unwrap();
        session.snapshot()
    }

    #[test]
    fn args_defaults() {
        let args = Args::try_parse_from(["sweeper"]).unwrap();

        assert_eq!((args.width, args.height, args.mines), (10, 10, 10));
        assert_eq!(args.seed, None);
        assert!(!args.json);
    }

    #[test]
    fn args_short_flags() {
        let args =
            Args::try_parse_from(["sweeper", "-W", "30", "-H", "16", "-m", "99", "-s", "7"])
                .unwrap();

        assert_eq!((args.width, args.height, args.mines), (30, 16, 99));
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn parses_requests() {
        assert_eq!(parse_request("2 3").unwrap(), RevealRequest { row: 2, col: 3 });
        assert_eq!(parse_request(" 4,5 ").unwrap(), RevealRequest { row: 4, col: 5 });
        assert_eq!(parse_request("-1 0").unwrap(), RevealRequest { row: -1, col: 0 });
        assert!(parse_request("2").is_err());
        assert!(parse_request("2 3 4").is_err());
        assert!(parse_request("a b").is_err());
    }

    #[test]
    fn finished_text_game_reports_already_finished() {
        let service = GameService::new(MemoryStore::new());
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let session =
            GameSession::with_layout(SessionId::from_uuid(Default::default()), layout).unwrap();
        service.store().insert(&session).unwrap();
        let mut out = Vec::new();

        let lost = parse_request("0 0").unwrap();
        assert!(play_text(&service, session.id(), &lost, &mut out).unwrap());
        out.clear();
        let off_board = parse_request("-1 0").unwrap();
        let finished = play_text(&service, session.id(), &off_board, &mut out);

        assert!(!finished.unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "Game already finished.\n");
    }

    #[test]
    fn renders_board() {
        let snapshot = snapshot_after(&[(2, 3)], (0, 0));

        assert_eq!(render_board(&snapshot), "    0123\n  0 ....\n  1 ..11\n  2 ..1#");
    }

    #[test]
    fn renders_hit_mine() {
        let snapshot = snapshot_after(&[(1, 1)], (1, 1));

        assert_eq!(render_board(&snapshot), "    0123\n  0 ####\n  1 #*##\n  2 ####");
    }
}
