//! Console player: prompts for a row and a column until a free cell is given

use std::io::{self, BufRead, Write};

use triline_core::{Board, Mark, Pos, Strategy};

pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
}

impl HumanPlayer<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for a number; `Ok(None)` on end of input
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_move(&mut self, board: &Board, mark: Mark) -> io::Result<Option<Pos>> {
        let n = board.size();
        loop {
            writeln!(self.output, "Actual board:\n{board}")?;
            writeln!(self.output, "{mark} to move.")?;

            let Some(answer) = self.prompt(&format!("Type row number from 0 to {}: ", n - 1))?
            else {
                return Ok(None);
            };
            let row = match answer.parse::<usize>() {
                Ok(row) if row < n => row,
                Ok(_) => {
                    writeln!(self.output, "Incorrect row number. Try again.")?;
                    continue;
                }
                Err(_) => {
                    writeln!(self.output, "Invalid field, try again.")?;
                    continue;
                }
            };

            let last_col = board.row_len(row) - 1;
            let Some(answer) = self.prompt(&format!("Type column number from 0 to {last_col}: "))?
            else {
                return Ok(None);
            };
            let col = match answer.parse::<usize>() {
                Ok(col) if col <= last_col => col,
                Ok(_) => {
                    writeln!(self.output, "Incorrect column number. Try again.")?;
                    continue;
                }
                Err(_) => {
                    writeln!(self.output, "Invalid field, try again.")?;
                    continue;
                }
            };

            let pos = Pos::new(row, col);
            if board.get(pos).is_some() {
                writeln!(self.output, "Chosen field is already taken. Try again.")?;
                continue;
            }
            return Ok(Some(pos));
        }
    }
}

impl<R: BufRead, W: Write> Strategy for HumanPlayer<R, W> {
    fn choose_move(&mut self, board: &Board, _k: usize, mark: Mark) -> Option<Pos> {
        match self.read_move(board, mark) {
            Ok(pos) => pos,
            Err(e) => {
                tracing::error!("Console I/O failed: {}", e);
                None
            }
        }
    }

    fn name(&self) -> &str {
        "human"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str, board: &Board) -> (Option<Pos>, String) {
        let mut out = Vec::new();
        let pos = {
            let mut human = HumanPlayer::new(Cursor::new(input.as_bytes()), &mut out);
            human.choose_move(board, 3, Mark::X)
        };
        (pos, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_reads_valid_move() {
        let board = Board::new(3).unwrap();
        let (pos, out) = ask("1\n1\n", &board);
        assert_eq!(pos, Some(Pos::new(1, 1)));
        assert!(out.contains("x to move."));
    }

    #[test]
    fn test_retries_on_bad_input() {
        let board: Board = "o . . / . . / .".parse().unwrap();
        let (pos, out) = ask("abc\n7\n1\n2\n0\n0\n2\n0\n", &board);
        assert_eq!(pos, Some(Pos::new(2, 0)));
        assert!(out.contains("Invalid field, try again."));
        assert!(out.contains("Incorrect row number. Try again."));
        assert!(out.contains("Incorrect column number. Try again."));
        assert!(out.contains("Chosen field is already taken. Try again."));
    }

    #[test]
    fn test_end_of_input_gives_no_move() {
        let board = Board::new(3).unwrap();
        let (pos, _) = ask("1\n", &board);
        assert_eq!(pos, None);
    }
}
