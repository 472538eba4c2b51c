use crate::errors::{ChessError, ChessResult};
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    fn clear_for(&mut self, color: Color) {
        match color {
            Color::White => {
                self.wk = false;
                self.wq = false;
            }
            Color::Black => {
                self.bk = false;
                self.bq = false;
            }
        }
    }

    /// Drops the one right tied to a rook home corner. Any other square is
    /// left alone, so this is safe to call for every rook move or capture.
    fn clear_for_corner(&mut self, sq: u8) {
        match sq {
            0 => self.wq = false,
            7 => self.wk = false,
            56 => self.bq = false,
            63 => self.bk = false,
            _ => {}
        }
    }
}

/// Everything needed to reverse one push. Rook relocation and the
/// en-passant capture square are rederived from the move itself.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Undo {
    mv: Move,
    captured: Option<Piece>,
    castling: CastlingRights,
    en_passant: Option<u8>,
    halfmove_clock: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub grid: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    history: Vec<Undo>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the rook stands before and after castling, given the king's
/// destination square (file 6 kingside, file 2 queenside).
fn rook_castling_squares(king_to: u8) -> (u8, u8) {
    if file_of(king_to) == 6 {
        (king_to + 1, king_to - 1)
    } else {
        (king_to - 2, king_to + 1)
    }
}

impl Board {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        let mut b = Board {
            grid: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights {
                wk: true,
                wq: true,
                bk: true,
                bq: true,
            },
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        };

        for f in 0..8 {
            b.grid[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            b.grid[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            b.grid[f] = Some(Piece::new(Color::White, kind));
            b.grid[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        b
    }

    /// Forsyth-Edwards Notation parser used by tests and external drivers.
    /// Panics on malformed input; FEN is setup tooling, not a runtime surface.
    pub fn from_fen(fen: &str) -> Self {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        assert!(parts.len() >= 4, "Invalid FEN: expected at least 4 fields");

        let board_part = parts[0];
        let stm_part = parts[1];
        let castle_part = parts[2];
        let ep_part = parts[3];
        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");

        let mut grid = [None; 64];
        let ranks: Vec<&str> = board_part.split('/').collect();
        assert!(ranks.len() == 8, "Invalid FEN board section");

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => panic!("Invalid piece char in FEN: {}", ch),
                    };
                    let sq = sq(file, rank).expect("Square out of bounds while parsing FEN");
                    grid[sq as usize] = Some(Piece::new(color, kind));
                    file += 1;
                }
                assert!(file <= 8, "Too many files in FEN rank");
            }
            assert!(file == 8, "Not enough files in FEN rank");
        }

        let side_to_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            _ => panic!("Invalid side to move in FEN: {}", stm_part),
        };

        let mut castling = CastlingRights {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        };
        if castle_part != "-" {
            for c in castle_part.chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => panic!("Invalid castling char in FEN: {}", c),
                }
            }
        }

        let en_passant = if ep_part == "-" {
            None
        } else {
            coord_to_sq(ep_part)
        };

        let halfmove_clock: u32 = halfmove_part
            .parse()
            .expect("Invalid halfmove clock in FEN");
        let fullmove_number: u32 = fullmove_part
            .parse()
            .expect("Invalid fullmove number in FEN");

        Board {
            grid,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            history: Vec::new(),
        }
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.grid[sq as usize]
    }

    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.grid[sq as usize] = pc;
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        for i in 0..64 {
            if self.grid[i] == Some(Piece::new(c, PieceKind::King)) {
                return Some(i as u8);
            }
        }
        None
    }

    /// Number of applied-but-not-undone moves.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn in_check(&self, c: Color) -> bool {
        let ksq = match self.king_sq(c) {
            Some(s) => s,
            None => return false,
        };
        self.is_square_attacked(ksq, c.other())
    }

    /// True iff a piece of `by` attacks `target`. Pure read-only scan over
    /// capture patterns; pawn pushes do not count as attacks.
    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);

        // A pawn attacking `target` sits one rank back from it (relative to
        // its own direction of travel) on an adjacent file.
        let back = -by.forward();
        for df in [-1, 1] {
            if let Some(s) = sq(tf + df, tr + back) {
                if self.piece_at(s) == Some(Piece::new(by, PieceKind::Pawn)) {
                    return true;
                }
            }
        }

        for (df, dr) in KNIGHT_DELTAS {
            if let Some(s) = sq(tf + df, tr + dr) {
                if self.piece_at(s) == Some(Piece::new(by, PieceKind::Knight)) {
                    return true;
                }
            }
        }

        for (df, dr) in ALL_DIRS {
            if let Some(s) = sq(tf + df, tr + dr) {
                if self.piece_at(s) == Some(Piece::new(by, PieceKind::King)) {
                    return true;
                }
            }
        }

        self.ray_attacked(tf, tr, by, &DIAGONAL_DIRS, PieceKind::Bishop)
            || self.ray_attacked(tf, tr, by, &ORTHOGONAL_DIRS, PieceKind::Rook)
    }

    fn ray_attacked(
        &self,
        tf: i8,
        tr: i8,
        by: Color,
        dirs: &[(i8, i8)],
        slider: PieceKind,
    ) -> bool {
        for &(df, dr) in dirs {
            let mut f = tf + df;
            let mut r = tr + dr;
            while let Some(s) = sq(f, r) {
                if let Some(pc) = self.piece_at(s) {
                    if pc.color == by && (pc.kind == slider || pc.kind == PieceKind::Queen) {
                        return true;
                    }
                    break;
                }
                f += df;
                r += dr;
            }
        }
        false
    }

    /// Validated entry point for externally supplied moves: anything not in
    /// `legal_moves` is rejected before the board is touched.
    pub fn push(&mut self, mv: Move) -> ChessResult<()> {
        if !crate::movegen::legal_moves(self).contains(&mv) {
            return Err(ChessError::IllegalMove(mv));
        }
        self.push_unchecked(mv);
        Ok(())
    }

    /// Applies a generator-produced move without legality validation and
    /// records how to reverse it. Legality filtering and search call this on
    /// candidates they will pop again.
    pub fn push_unchecked(&mut self, mv: Move) {
        let moved = mv.piece;
        let undo_castling = self.castling.clone();
        let undo_en_passant = self.en_passant;
        let undo_halfmove = self.halfmove_clock;

        // Capture removal. En passant takes the pawn one rank behind the
        // destination, never the destination square itself.
        let captured = if mv.is_en_passant {
            match sq(file_of(mv.to), rank_of(mv.to) - moved.color.forward()) {
                Some(s) => {
                    let pc = self.piece_at(s);
                    self.set_piece(s, None);
                    pc
                }
                None => None,
            }
        } else {
            self.piece_at(mv.to)
        };

        // Relocate, substituting the promotion piece if any.
        self.set_piece(mv.from, None);
        let placed = match mv.promotion {
            Some(kind) => Piece::new(moved.color, kind),
            None => moved,
        };
        self.set_piece(mv.to, Some(placed));

        // Castling also relocates the rook past the king.
        if mv.is_castling {
            let (rook_from, rook_to) = rook_castling_squares(mv.to);
            let rook = self.piece_at(rook_from);
            self.set_piece(rook_from, None);
            self.set_piece(rook_to, rook);
        }

        // Castling rights fall monotonically: a king move clears both of its
        // color's rights, a rook leaving or dying on a home corner clears one.
        if moved.kind == PieceKind::King {
            self.castling.clear_for(moved.color);
        }
        if moved.kind == PieceKind::Rook {
            self.castling.clear_for_corner(mv.from);
        }
        if let Some(cap) = captured {
            if cap.kind == PieceKind::Rook {
                self.castling.clear_for_corner(mv.to);
            }
        }

        // A double pawn push leaves its transit square as the en-passant
        // target for exactly one ply.
        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && (rank_of(mv.to) - rank_of(mv.from)).abs() == 2 {
            self.en_passant = Some((mv.from + mv.to) / 2);
        }

        if moved.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        self.history.push(Undo {
            mv,
            captured,
            castling: undo_castling,
            en_passant: undo_en_passant,
            halfmove_clock: undo_halfmove,
        });
    }

    /// Reverses the most recent push exactly, returning the undone move.
    /// Fails with `EmptyHistory` when there is nothing to undo.
    pub fn pop(&mut self) -> ChessResult<Move> {
        let undo = self.history.pop().ok_or(ChessError::EmptyHistory)?;
        let mv = undo.mv;

        self.side_to_move = self.side_to_move.other();
        if self.side_to_move == Color::Black {
            self.fullmove_number -= 1;
        }

        if mv.is_castling {
            let (rook_from, rook_to) = rook_castling_squares(mv.to);
            let rook = self.piece_at(rook_to);
            self.set_piece(rook_to, None);
            self.set_piece(rook_from, rook);
        }

        // The mover returns home; `mv.piece` is the original pawn even when
        // the move promoted.
        self.set_piece(mv.from, Some(mv.piece));
        self.set_piece(mv.to, None);

        if mv.is_en_passant {
            if let Some(s) = sq(file_of(mv.to), rank_of(mv.to) - mv.piece.color.forward()) {
                self.set_piece(s, undo.captured);
            }
        } else {
            self.set_piece(mv.to, undo.captured);
        }

        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        Ok(mv)
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move) && crate::movegen::legal_moves(self).is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move) && crate::movegen::legal_moves(self).is_empty()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Dead-draw material: K vs K, K+minor vs K, or same-colored single
    /// bishops. Everything else can still force mate.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors: Vec<(Piece, u8)> = Vec::new();
        for s in 0..64u8 {
            match self.piece_at(s) {
                None => {}
                Some(pc) if pc.kind == PieceKind::King => {}
                Some(pc) if pc.kind == PieceKind::Bishop || pc.kind == PieceKind::Knight => {
                    minors.push((pc, s));
                }
                Some(_) => return false, // pawn, rook, or queen
            }
        }
        match minors.as_slice() {
            [] | [_] => true,
            [(a, sa), (b, sb)] => {
                a.kind == PieceKind::Bishop
                    && b.kind == PieceKind::Bishop
                    && a.color != b.color
                    && (file_of(*sa) + rank_of(*sa)) % 2 == (file_of(*sb) + rank_of(*sb)) % 2
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
