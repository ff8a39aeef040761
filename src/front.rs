//! Interactive command-line front-end.
//!
//! An external collaborator of the core: it drives the game exclusively
//! through the public [`GameHandle`], renders snapshots between moves, and
//! turns rule rejections into retryable messages. Fatal actor failures
//! propagate out and end the session with a diagnostic.

use anyhow::Result;
use renju::actor::GameHandle;
use renju::game::{EngineStatus, GameSnapshot, MoveOutcome, Side, Square};
use renju::sanitize_filename;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Commands:
  <row> <col>              place a stone
  undo                     take back the last move (two plies against the engine)
  new [<rows> <cols>]      start a fresh game
  save <name>              save the game to a file
  load <name>              load a game from a file
  reverse                  swap sides with your opponent
  engine <Sente|Gote|Disabled>   seat the automated opponent
  name <sente|gote> <text> rename a player
  board                    redraw the board
  help                     show this text
  quit                     leave the game";

/// Runs the interactive loop until the player quits or the actor fails.
pub async fn run(handle: GameHandle) -> Result<()> {
    println!("Welcome to Renju. Sente (@) moves first; type `help` for commands.");
    render(&handle).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !dispatch(&handle, line.trim()).await? {
            break;
        }
    }
    handle.quit();
    Ok(())
}

/// Executes one console command. Returns false when the session should end.
async fn dispatch(handle: &GameHandle, line: &str) -> Result<bool> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [] => {}
        ["help"] => println!("{HELP}"),
        ["quit"] | ["q"] => return Ok(false),
        ["board"] => render(handle).await?,
        ["undo"] => {
            let undone = handle.undo().wait().await?;
            if undone == 0 {
                println!("Nothing to undo.");
            } else {
                println!("Took back {undone} {}.", plural(undone, "move"));
                render(handle).await?;
            }
        }
        ["new"] => {
            let snapshot = handle.snapshot().wait().await?;
            let rows = snapshot.board.rows()?;
            let cols = snapshot.board.cols()?;
            new_game(handle, rows, cols).await?;
        }
        ["new", rows, cols] => match (usize::from_str(rows), usize::from_str(cols)) {
            (Ok(rows), Ok(cols)) if rows > 0 && cols > 0 => new_game(handle, rows, cols).await?,
            _ => println!("Usage: new <rows> <cols>"),
        },
        ["save", name] => {
            let file = sanitize_filename(name);
            match handle.save(&file).wait().await? {
                Ok(()) => println!("Saved to {file}."),
                Err(failure) => println!("Save failed: {failure}"),
            }
        }
        ["load", name] => {
            let file = sanitize_filename(name);
            match handle.load(&file).wait().await? {
                Ok(()) => {
                    println!("Loaded {file}.");
                    render(handle).await?;
                }
                Err(failure) => println!("Load failed: {failure}"),
            }
        }
        ["reverse"] => {
            let status = handle.reverse_sides().wait().await?;
            println!("Sides reversed; automated opponent: {status}.");
            // The swap may leave the automated side on move.
            let snapshot = handle.snapshot().wait().await?;
            if status.side() == Some(side_to_move(&snapshot)) {
                engine_reply(handle).await?;
            }
            render(handle).await?;
        }
        ["engine", seat] => match EngineStatus::from_str(seat) {
            Ok(status) => {
                handle.set_engine_status(status).wait().await?;
                println!("Automated opponent: {status}.");
            }
            Err(_) => println!("Expected one of: Sente, Gote, Disabled."),
        },
        ["name", side, rest @ ..] if !rest.is_empty() => {
            let side = match *side {
                "sente" => Side::Sente,
                "gote" => Side::Gote,
                _ => {
                    println!("Expected `name sente <text>` or `name gote <text>`.");
                    return Ok(true);
                }
            };
            handle.set_name(side, rest.join(" ")).wait().await?;
            println!("{side} is now named {}.", rest.join(" "));
        }
        [row, col] => match (usize::from_str(row), usize::from_str(col)) {
            (Ok(row), Ok(col)) => place(handle, row, col).await?,
            _ => println!("Type `help` for the command list."),
        },
        _ => println!("Type `help` for the command list."),
    }
    Ok(true)
}

async fn new_game(handle: &GameHandle, rows: usize, cols: usize) -> Result<()> {
    handle.new_game(rows, cols).wait().await?;
    println!("New {rows}x{cols} game; Sente to move.");
    render(handle).await
}

/// Submits a human move and, when the game continues against an automated
/// opponent on move, requests its reply.
async fn place(handle: &GameHandle, row: usize, col: usize) -> Result<()> {
    match handle.submit_move(row, col).wait().await? {
        Err(rejection) => {
            println!("{rejection}. Try another move.");
            return Ok(());
        }
        Ok(MoveOutcome::Win) => {
            render(handle).await?;
            announce_winner(handle).await?;
            return Ok(());
        }
        Ok(MoveOutcome::Success) => {}
    }

    let snapshot = handle.snapshot().wait().await?;
    if snapshot.engine_status.side() == Some(side_to_move(&snapshot)) {
        engine_reply(handle).await?;
    }
    render(handle).await
}

/// Requests one automated move and reports its outcome.
async fn engine_reply(handle: &GameHandle) -> Result<()> {
    match handle.request_engine_move().wait().await? {
        Err(rejection) => println!("The engine could not move: {rejection}"),
        Ok(MoveOutcome::Win) => {
            render(handle).await?;
            announce_winner(handle).await?;
        }
        Ok(MoveOutcome::Success) => {}
    }
    Ok(())
}

async fn announce_winner(handle: &GameHandle) -> Result<()> {
    let snapshot = handle.snapshot().wait().await?;
    if let Some(last) = snapshot.log.last() {
        let name = match last.side {
            Side::Sente => &snapshot.sente_name,
            Side::Gote => &snapshot.gote_name,
        };
        println!("{name} ({}) wins!", last.side);
        println!("Start again with `new`, or `quit` to leave.");
    }
    Ok(())
}

fn side_to_move(snapshot: &GameSnapshot) -> Side {
    if snapshot.log.len() % 2 == 0 {
        Side::Sente
    } else {
        Side::Gote
    }
}

async fn render(handle: &GameHandle) -> Result<()> {
    let snapshot = handle.snapshot().wait().await?;
    println!("{}", draw(&snapshot)?);
    let to_move = side_to_move(&snapshot);
    let name = match to_move {
        Side::Sente => &snapshot.sente_name,
        Side::Gote => &snapshot.gote_name,
    };
    println!("Move {}: {name} ({to_move}) to play.", snapshot.log.len() + 1);
    Ok(())
}

fn draw(snapshot: &GameSnapshot) -> Result<String> {
    let rows = snapshot.board.rows()?;
    let cols = snapshot.board.cols()?;
    let mut out = String::new();
    out.push_str("    ");
    for col in 0..cols {
        out.push_str(&format!("{col:>3}"));
    }
    out.push('\n');
    for row in 0..rows {
        out.push_str(&format!("{row:>3} "));
        for col in 0..cols {
            let glyph = match *snapshot.board.get(row, col)? {
                Square::Empty => '.',
                Square::Occupied(Side::Sente) => '@',
                Square::Occupied(Side::Gote) => 'O',
            };
            out.push_str(&format!("  {glyph}"));
        }
        out.push('\n');
    }
    Ok(out)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}
