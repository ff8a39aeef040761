//! Line-oriented save-file codec.
//!
//! The format round-trips a [`GameSnapshot`] exactly:
//!
//! ```text
//! Sente: <name>
//! Gote: <name>
//! Time: <unix-seconds>
//! Engine Status: <Sente|Gote|Disabled>
//! Board Parameters: <rows>*<cols>
//! <rows lines, each exactly cols characters from {' ', '@', 'O'}>
//! <movesMade lines of "<row> <col> <Sente|Gote>">
//! ```
//!
//! `@` is a Sente stone, `O` a Gote stone, space an empty cell. The loader
//! reads fields with explicit structured line reads, then cross-validates
//! the board against the move log; any mismatch is a hard failure, never a
//! silent correction.

use crate::game::rules::Board;
use crate::game::types::{EngineStatus, Move, Side, Square};
use crate::game::GameSnapshot;
use crate::grid::GridError;
use derive_more::{Display, Error, From};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, instrument};

/// Failures while reading or writing a save file.
///
/// These abort the operation cleanly; a failed load leaves the previous game
/// state untouched.
#[derive(Debug, Display, Error, From)]
pub enum CodecError {
    /// Underlying file or stream failure.
    #[display("i/o failure: {_0}")]
    Io(io::Error),
    /// The board in the file reported impossible dimensions.
    #[display("board access failed: {_0}")]
    Grid(GridError),
    /// The file ended before the named field.
    #[display("save file ends before the {field} field")]
    #[from(ignore)]
    MissingField {
        /// The field that was expected next.
        field: &'static str,
    },
    /// A line did not match the expected shape.
    #[display("malformed {what}: {line:?}")]
    #[from(ignore)]
    Malformed {
        /// What the line was supposed to hold.
        what: &'static str,
        /// The offending line.
        line: String,
    },
    /// A board row held a character outside {' ', '@', 'O'}.
    #[display("invalid board character {ch:?} at ({row}, {col})")]
    #[from(ignore)]
    BadCell {
        /// Board row.
        row: usize,
        /// Board column.
        col: usize,
        /// The offending character.
        ch: char,
    },
    /// Occupied-cell count and move-log length disagree.
    #[display("board holds {cells} stones but the log records {moves} moves")]
    #[from(ignore)]
    CellCountMismatch {
        /// Stones on the board.
        cells: usize,
        /// Entries in the move log.
        moves: usize,
    },
    /// A logged move does not match the cell it names.
    #[display("logged move at ({row}, {col}) does not match the board")]
    #[from(ignore)]
    MoveMismatch {
        /// Row of the logged move.
        row: usize,
        /// Column of the logged move.
        col: usize,
    },
}

const SENTE_FIELD: &str = "Sente: ";
const GOTE_FIELD: &str = "Gote: ";
const TIME_FIELD: &str = "Time: ";
const ENGINE_FIELD: &str = "Engine Status: ";
const BOARD_FIELD: &str = "Board Parameters: ";

fn cell_char(square: Square) -> char {
    match square {
        Square::Empty => ' ',
        Square::Occupied(Side::Sente) => '@',
        Square::Occupied(Side::Gote) => 'O',
    }
}

fn cell_value(row: usize, col: usize, ch: char) -> Result<Square, CodecError> {
    match ch {
        ' ' => Ok(Square::Empty),
        '@' => Ok(Square::Occupied(Side::Sente)),
        'O' => Ok(Square::Occupied(Side::Gote)),
        _ => Err(CodecError::BadCell { row, col, ch }),
    }
}

/// Serializes a snapshot to a writer.
///
/// # Errors
///
/// Fails on i/o errors or a corrupt board in the snapshot.
pub fn write_snapshot<W: Write>(snapshot: &GameSnapshot, out: &mut W) -> Result<(), CodecError> {
    let rows = snapshot.board.rows()?;
    let cols = snapshot.board.cols()?;

    writeln!(out, "{SENTE_FIELD}{}", snapshot.sente_name)?;
    writeln!(out, "{GOTE_FIELD}{}", snapshot.gote_name)?;
    writeln!(out, "{TIME_FIELD}{}", chrono::Utc::now().timestamp())?;
    writeln!(out, "{ENGINE_FIELD}{}", snapshot.engine_status)?;
    writeln!(out, "{BOARD_FIELD}{rows}*{cols}")?;

    for row in 0..rows {
        let mut line = String::with_capacity(cols);
        for col in 0..cols {
            line.push(cell_char(*snapshot.board.get(row, col)?));
        }
        writeln!(out, "{line}")?;
    }

    for entry in &snapshot.log {
        writeln!(out, "{} {} {}", entry.row, entry.col, entry.side)?;
    }
    Ok(())
}

/// Reads one line and strips the trailing newline, keeping interior and
/// trailing spaces intact (board rows are space-significant).
fn read_raw_line<R: BufRead>(input: &mut R, field: &'static str) -> Result<String, CodecError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(CodecError::MissingField { field });
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

fn read_field<R: BufRead>(input: &mut R, prefix: &'static str) -> Result<String, CodecError> {
    let line = read_raw_line(input, prefix)?;
    line.strip_prefix(prefix)
        .map(str::to_string)
        .ok_or(CodecError::Malformed {
            what: "field line",
            line,
        })
}

/// Parses a snapshot from a reader and cross-validates it.
///
/// # Errors
///
/// Fails on any structural or consistency problem; see [`CodecError`].
pub fn read_snapshot<R: BufRead>(input: &mut R) -> Result<GameSnapshot, CodecError> {
    let sente_name = read_field(input, SENTE_FIELD)?;
    let gote_name = read_field(input, GOTE_FIELD)?;

    let time = read_field(input, TIME_FIELD)?;
    i64::from_str(&time).map_err(|_| CodecError::Malformed {
        what: "timestamp",
        line: time,
    })?;

    let status = read_field(input, ENGINE_FIELD)?;
    let engine_status = EngineStatus::from_str(&status).map_err(|_| CodecError::Malformed {
        what: "engine status",
        line: status,
    })?;

    let params = read_field(input, BOARD_FIELD)?;
    let (rows, cols) = params
        .split_once('*')
        .and_then(|(r, c)| Some((usize::from_str(r).ok()?, usize::from_str(c).ok()?)))
        .ok_or(CodecError::Malformed {
            what: "board parameters",
            line: params.clone(),
        })?;

    let mut board = Board::new(rows, cols, Square::Empty);
    for row in 0..rows {
        let line = read_raw_line(input, "board row")?;
        if line.chars().count() != cols {
            return Err(CodecError::Malformed {
                what: "board row",
                line,
            });
        }
        for (col, ch) in line.chars().enumerate() {
            board.set(row, col, cell_value(row, col, ch)?)?;
        }
    }

    let mut log = Vec::new();
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [row, col, side] = tokens[..] else {
            return Err(CodecError::Malformed {
                what: "move line",
                line: line.trim_end().to_string(),
            });
        };
        let parsed = usize::from_str(row)
            .ok()
            .zip(usize::from_str(col).ok())
            .zip(Side::from_str(side).ok());
        let Some(((row, col), side)) = parsed else {
            return Err(CodecError::Malformed {
                what: "move line",
                line: line.trim_end().to_string(),
            });
        };
        log.push(Move { row, col, side });
    }

    validate(&board, &log)?;

    Ok(GameSnapshot {
        board,
        log,
        sente_name,
        gote_name,
        engine_status,
    })
}

/// Cross-validates the parsed board against the parsed move log: stone count
/// must equal log length, and every logged move must match its cell.
fn validate(board: &Board, log: &[Move]) -> Result<(), CodecError> {
    let cells = board.count(&Square::Occupied(Side::Sente))
        + board.count(&Square::Occupied(Side::Gote));
    if cells != log.len() {
        return Err(CodecError::CellCountMismatch {
            cells,
            moves: log.len(),
        });
    }
    for entry in log {
        let matches = board
            .get(entry.row, entry.col)
            .map(|square| *square == Square::Occupied(entry.side))
            .unwrap_or(false);
        if !matches {
            return Err(CodecError::MoveMismatch {
                row: entry.row,
                col: entry.col,
            });
        }
    }
    Ok(())
}

/// Writes a snapshot to the given path.
///
/// # Errors
///
/// Fails on i/o errors or a corrupt board in the snapshot.
#[instrument(skip(snapshot), fields(path = %path.as_ref().display()))]
pub fn save_to_path<P: AsRef<Path>>(snapshot: &GameSnapshot, path: P) -> Result<(), CodecError> {
    let mut out = BufWriter::new(File::create(path.as_ref())?);
    write_snapshot(snapshot, &mut out)?;
    out.flush()?;
    info!(moves = snapshot.log.len(), "game saved");
    Ok(())
}

/// Reads and validates a snapshot from the given path.
///
/// # Errors
///
/// Fails on i/o errors or any structural or consistency problem in the file.
#[instrument(fields(path = %path.as_ref().display()))]
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<GameSnapshot, CodecError> {
    let mut input = BufReader::new(File::open(path.as_ref())?);
    let snapshot = read_snapshot(&mut input)?;
    info!(moves = snapshot.log.len(), "game loaded");
    Ok(snapshot)
}

/// Replaces filesystem-hostile characters in a user-supplied save name.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_control()
                || c.is_whitespace()
                || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
            {
                '_'
            } else {
                c
            }
        })
        .collect()
}
