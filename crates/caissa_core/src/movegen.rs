use crate::{board::Board, types::*};

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the board only once.
pub fn legal_moves(pos: &Board) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across
/// calls. Each pseudo-legal candidate is pushed, tested for leaving the
/// mover's own king attacked, and popped again.
pub fn legal_moves_into(pos: &mut Board, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    out.retain(|&mv| {
        pos.push_unchecked(mv);
        let exposes_king = pos.in_check(mover);
        pos.pop().expect("a move was just pushed");
        !exposes_king
    });
}

/// Pseudo-legal moves of the side to move: piece-rule-correct, but they may
/// leave the mover's own king in check.
pub fn pseudo_moves(pos: &Board, out: &mut Vec<Move>) {
    for sq in 0..64u8 {
        let pc = match pos.piece_at(sq) {
            Some(p) => p,
            None => continue,
        };
        if pc.color != pos.side_to_move {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, sq, pc, out),
            PieceKind::Knight => gen_knight(pos, sq, pc, out),
            PieceKind::Bishop => gen_slider(pos, sq, pc, out, &DIAGONAL_DIRS),
            PieceKind::Rook => gen_slider(pos, sq, pc, out, &ORTHOGONAL_DIRS),
            PieceKind::Queen => gen_slider(pos, sq, pc, out, &ALL_DIRS),
            PieceKind::King => {
                gen_king(pos, sq, pc, out);
                gen_castle(pos, sq, pc, out);
            }
        }
    }
}

/// Pushes the move, fanning out into the four promotion choices when the
/// destination is the last rank.
fn push_pawn_move(mv: Move, out: &mut Vec<Move>) {
    let last_rank = match mv.piece.color {
        Color::White => 7,
        Color::Black => 0,
    };
    if rank_of(mv.to) == last_rank {
        for kind in PROMOTION_KINDS {
            let mut promo = mv;
            promo.promotion = Some(kind);
            out.push(promo);
        }
    } else {
        out.push(mv);
    }
}

fn gen_pawn(pos: &Board, from: u8, pc: Piece, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let dir = pc.color.forward();
    let start_rank = match pc.color {
        Color::White => 1,
        Color::Black => 6,
    };

    // Single push, and the double push while both squares are empty.
    if let Some(to) = sq(f, r + dir) {
        if pos.piece_at(to).is_none() {
            push_pawn_move(Move::new(from, to, pc), out);

            if r == start_rank {
                if let Some(to2) = sq(f, r + 2 * dir) {
                    if pos.piece_at(to2).is_none() {
                        out.push(Move::new(from, to2, pc));
                    }
                }
            }
        }
    }

    // Diagonal captures, plus en passant when the target square matches.
    for df in [-1, 1] {
        if let Some(to) = sq(f + df, r + dir) {
            if let Some(target) = pos.piece_at(to) {
                if target.color != pc.color {
                    let mut mv = Move::new(from, to, pc);
                    mv.captured = Some(target);
                    push_pawn_move(mv, out);
                }
            } else if pos.en_passant == Some(to) {
                let mut mv = Move::new(from, to, pc);
                mv.captured = pos.piece_at(sq(f + df, r).expect("en-passant victim square"));
                mv.is_en_passant = true;
                out.push(mv);
            }
        }
    }
}

fn gen_knight(pos: &Board, from: u8, pc: Piece, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in KNIGHT_DELTAS {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to, pc)),
                Some(target) if target.color != pc.color => {
                    let mut mv = Move::new(from, to, pc);
                    mv.captured = Some(target);
                    out.push(mv);
                }
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &Board, from: u8, pc: Piece, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for &(df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to, pc)),
                Some(target) if target.color != pc.color => {
                    let mut mv = Move::new(from, to, pc);
                    mv.captured = Some(target);
                    out.push(mv);
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

fn gen_king(pos: &Board, from: u8, pc: Piece, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in ALL_DIRS {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to, pc)),
                Some(target) if target.color != pc.color => {
                    let mut mv = Move::new(from, to, pc);
                    mv.captured = Some(target);
                    out.push(mv);
                }
                _ => {}
            }
        }
    }
}

/// Castling, generated only when every eligibility condition holds: the
/// right survives, the rook is home, the intervening squares are empty, and
/// neither the king's current, transit, nor destination square is attacked.
fn gen_castle(pos: &Board, from: u8, pc: Piece, out: &mut Vec<Move>) {
    let c = pc.color;
    let king_home = (c.back_rank() as u8) * 8 + 4;
    if from != king_home || pos.in_check(c) {
        return;
    }

    let (kingside, queenside) = match c {
        Color::White => (pos.castling.wk, pos.castling.wq),
        Color::Black => (pos.castling.bk, pos.castling.bq),
    };
    let enemy = c.other();
    let rook = Piece::new(c, PieceKind::Rook);

    if kingside
        && pos.piece_at(king_home + 1).is_none()
        && pos.piece_at(king_home + 2).is_none()
        && pos.piece_at(king_home + 3) == Some(rook)
        && !pos.is_square_attacked(king_home + 1, enemy)
        && !pos.is_square_attacked(king_home + 2, enemy)
    {
        let mut mv = Move::new(from, king_home + 2, pc);
        mv.is_castling = true;
        out.push(mv);
    }

    if queenside
        && pos.piece_at(king_home - 1).is_none()
        && pos.piece_at(king_home - 2).is_none()
        && pos.piece_at(king_home - 3).is_none()
        && pos.piece_at(king_home - 4) == Some(rook)
        && !pos.is_square_attacked(king_home - 1, enemy)
        && !pos.is_square_attacked(king_home - 2, enemy)
    {
        let mut mv = Move::new(from, king_home - 2, pc);
        mv.is_castling = true;
        out.push(mv);
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
