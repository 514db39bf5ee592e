//! Flattens a PGN move tree into the token stream shown in a move list.
//!
//! Every move is replayed through a rules engine so that illegal source
//! data is caught and each move carries the FEN it leads to and the squares
//! for its arrow. Variations are walked recursively, each from a fresh
//! engine positioned before the move they replace.

use std::fmt;

use chess::{
    append_nags, san_to_fan, Game, GameError, MoveArrow, MoveNode, PgnData, PieceColor,
    RulesEngine,
};
use serde::{Deserialize, Serialize};

/// One display element of a linearized game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PgnToken {
    /// `12.` before a White move, `12...` before a Black one.
    MoveNumberLabel { text: String },
    MoveEntry {
        index: usize,
        /// Figurine notation with NAG symbols appended.
        text: String,
        /// Position after the move.
        fen: String,
        #[serde(rename = "lastMoveArrow")]
        last_move_arrow: MoveArrow,
    },
    VariationOpen { index: usize },
    VariationClose { index: usize },
}

impl PgnToken {
    /// Sequence position, for tokens that can be navigated to.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::MoveNumberLabel { .. } => None,
            Self::MoveEntry { index, .. }
            | Self::VariationOpen { index }
            | Self::VariationClose { index } => Some(*index),
        }
    }
}

impl fmt::Display for PgnToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveNumberLabel { text } | Self::MoveEntry { text, .. } => f.write_str(text),
            Self::VariationOpen { .. } => f.write_str("("),
            Self::VariationClose { .. } => f.write_str(")"),
        }
    }
}

/// A linearized game: its starting position and the ordered tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PgnHistory {
    pub start_position: String,
    pub elements: Vec<PgnToken>,
}

impl PgnHistory {
    /// Tokens joined by spaces, e.g. `1. ♘f3 ( 1. e4 ) 1... ♞f6`.
    pub fn render_line(&self) -> String {
        self.elements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Move entries only, in order.
    pub fn moves(&self) -> impl Iterator<Item = &PgnToken> {
        self.elements
            .iter()
            .filter(|t| matches!(t, PgnToken::MoveEntry { .. }))
    }
}

pub struct PgnTreeLinearizer;

impl PgnTreeLinearizer {
    /// Linearize `pgn` by replaying it through [`Game`].
    pub fn convert(pgn: &PgnData) -> Result<PgnHistory, LinearizeError> {
        Self::convert_with::<Game>(pgn)
    }

    /// Linearize `pgn` by replaying it through `E`.
    pub fn convert_with<E: RulesEngine>(pgn: &PgnData) -> Result<PgnHistory, LinearizeError> {
        let start_position = pgn.start_fen().to_string();
        let mut sink = TokenSink::default();

        if let Err(err) = linearize_line::<E>(&mut sink, &pgn.moves, &start_position) {
            tracing::warn!(%err, "Aborting PGN conversion");
            return Err(err);
        }

        tracing::debug!(tokens = sink.elements.len(), "PGN linearized");
        Ok(PgnHistory {
            start_position,
            elements: sink.elements,
        })
    }
}

/// Token list under construction. The index counter is shared by every
/// nesting level and advanced by every token.
#[derive(Default)]
struct TokenSink {
    next_index: usize,
    elements: Vec<PgnToken>,
}

impl TokenSink {
    fn take_index(&mut self) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    fn label(&mut self, text: String) {
        self.take_index();
        self.elements.push(PgnToken::MoveNumberLabel { text });
    }

    fn entry(&mut self, text: String, fen: String, last_move_arrow: MoveArrow) {
        let index = self.take_index();
        self.elements.push(PgnToken::MoveEntry {
            index,
            text,
            fen,
            last_move_arrow,
        });
    }

    fn open(&mut self) {
        let index = self.take_index();
        self.elements.push(PgnToken::VariationOpen { index });
    }

    fn close(&mut self) {
        let index = self.take_index();
        self.elements.push(PgnToken::VariationClose { index });
    }
}

fn linearize_line<E: RulesEngine>(
    sink: &mut TokenSink,
    moves: &[MoveNode],
    start_fen: &str,
) -> Result<(), LinearizeError> {
    let mut engine = E::from_fen(start_fen).map_err(|source| LinearizeError::InvalidStartPosition {
        fen: start_fen.to_string(),
        source,
    })?;
    let mut white = engine.turn() == PieceColor::White;
    let mut relabel = false;

    for (i, node) in moves.iter().enumerate() {
        if i == 0 || white || relabel {
            let text = if white {
                format!("{}.", node.move_number)
            } else {
                format!("{}...", node.move_number)
            };
            sink.label(text);
            relabel = false;
        }

        let before = engine.fen();
        let mover = engine.turn();
        let played = engine
            .play_san(&node.san)
            .ok_or_else(|| LinearizeError::IllegalMove {
                san: node.san.clone(),
                move_number: node.move_number,
                side: mover,
            })?;

        let text = append_nags(san_to_fan(&node.san, mover), &node.nags);
        sink.entry(text, engine.fen(), played.arrow());
        white = !white;

        if !node.ravs.is_empty() {
            relabel = true;
            for variation in &node.ravs {
                sink.open();
                linearize_line::<E>(sink, &variation.moves, &before)?;
                sink.close();
            }
        }
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum LinearizeError {
    #[error("Invalid start position {fen}: {source}")]
    InvalidStartPosition {
        fen: String,
        #[source]
        source: GameError,
    },
    #[error("Cannot replay {san} at move {move_number} ({side} to move)")]
    IllegalMove {
        san: String,
        move_number: u32,
        side: PieceColor,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::{parse_pgn, MoveNode, PgnHeader, Variation, STARTING_FEN};

    fn convert(text: &str) -> PgnHistory {
        PgnTreeLinearizer::convert(&parse_pgn(text).unwrap()).unwrap()
    }

    fn labels(history: &PgnHistory) -> Vec<&str> {
        history
            .elements
            .iter()
            .filter_map(|t| match t {
                PgnToken::MoveNumberLabel { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_mainline_labels_only_before_white() {
        let history = convert("1. e4 e5 2. Nf3 Nc6 *");
        assert_eq!(history.start_position, STARTING_FEN);
        assert_eq!(history.render_line(), "1. e4 e5 2. ♘f3 ♞c6");
        assert_eq!(labels(&history), ["1.", "2."]);
    }

    #[test]
    fn test_variation_relabels_next_black_move() {
        let history = convert("1. Nf3 (1. e4) 1... Nf6 2. Ng1 Ng8 *");
        assert_eq!(
            history.render_line(),
            "1. ♘f3 ( 1. e4 ) 1... ♞f6 2. ♘g1 ♞g8"
        );
        assert!(matches!(
            history.elements[2],
            PgnToken::VariationOpen { index: 2 }
        ));
        assert!(matches!(
            history.elements[5],
            PgnToken::VariationClose { index: 5 }
        ));
    }

    #[test]
    fn test_indices_follow_emission_order() {
        let history = convert("1. e4 e5 2. Nf3 (2. f4 exf4 (2... d5) 3. Nf3) 2... Nc6 *");
        for (position, token) in history.elements.iter().enumerate() {
            if let Some(index) = token.index() {
                assert_eq!(index, position);
            }
        }
    }

    #[test]
    fn test_variation_replays_from_branch_point() {
        let history = convert("1. e4 e5 (1... c5 2. Nf3) 2. Nf3 *");
        let fens: Vec<&str> = history
            .moves()
            .filter_map(|t| match t {
                PgnToken::MoveEntry { fen, .. } => Some(fen.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(fens.len(), 5);
        assert!(fens[2].starts_with("rnbqkbnr/pp1ppppp/8/2p5/4P3/8"));
        assert_eq!(
            history.render_line(),
            "1. e4 e5 ( 1... c5 2. ♘f3 ) 2. ♘f3"
        );
    }

    #[test]
    fn test_black_start_uses_fen_header() {
        let history = convert("[FEN \"4k3/8/8/8/8/8/8/R3K3 b Q - 0 10\"]\n\n10... Kd7 11. Ra7+ *");
        assert_eq!(history.start_position, "4k3/8/8/8/8/8/8/R3K3 b Q - 0 10");
        assert_eq!(history.render_line(), "10... ♚d7 11. ♖a7+");
    }

    #[test]
    fn test_nags_and_arrows() {
        let history = convert("1. e4 $1 e5 2. Bc4 Nc6 3. Nf3 Nf6 4. O-O!? *");
        let last = history.moves().last().unwrap();
        let PgnToken::MoveEntry {
            text,
            last_move_arrow,
            ..
        } = last
        else {
            panic!("expected a move entry");
        };
        assert_eq!(text, "O-O⁉");
        assert_eq!(
            *last_move_arrow,
            MoveArrow {
                from_file: 4,
                from_rank: 0,
                to_file: 6,
                to_rank: 0
            }
        );
        assert!(history.render_line().starts_with("1. e4! e5"));
    }

    #[test]
    fn test_illegal_move_aborts() {
        let data = parse_pgn("1. e4 e5 2. Ke3 *").unwrap();
        match PgnTreeLinearizer::convert(&data) {
            Err(LinearizeError::IllegalMove {
                san,
                move_number,
                side,
            }) => {
                assert_eq!(san, "Ke3");
                assert_eq!(move_number, 2);
                assert_eq!(side, PieceColor::White);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_illegal_move_inside_variation_aborts() {
        let data = parse_pgn("1. e4 (1. e5) 1... e5 *").unwrap();
        assert!(matches!(
            PgnTreeLinearizer::convert(&data),
            Err(LinearizeError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_invalid_fen_header() {
        let data = PgnData {
            headers: vec![PgnHeader {
                name: "FEN".to_string(),
                value: "nonsense".to_string(),
            }],
            moves: vec![MoveNode::new(1, "e4")],
            result: None,
        };
        assert!(matches!(
            PgnTreeLinearizer::convert(&data),
            Err(LinearizeError::InvalidStartPosition { .. })
        ));
    }

    #[test]
    fn test_sibling_variations_are_independent() {
        let mut e4 = MoveNode::new(1, "e4");
        e4.ravs = vec![
            Variation {
                moves: vec![MoveNode::new(1, "d4")],
            },
            Variation {
                moves: vec![MoveNode::new(1, "c4")],
            },
        ];
        let data = PgnData {
            headers: Vec::new(),
            moves: vec![e4, MoveNode::new(1, "e5")],
            result: None,
        };
        let history = PgnTreeLinearizer::convert(&data).unwrap();
        assert_eq!(
            history.render_line(),
            "1. e4 ( 1. d4 ) ( 1. c4 ) 1... e5"
        );
    }

    #[test]
    fn test_empty_game() {
        let history = PgnTreeLinearizer::convert(&PgnData::default()).unwrap();
        assert_eq!(history.start_position, STARTING_FEN);
        assert!(history.elements.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let history = convert("1. e4 *");
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["startPosition"], STARTING_FEN);
        assert_eq!(json["elements"][0]["type"], "move_number_label");
        assert_eq!(json["elements"][1]["type"], "move_entry");
        assert_eq!(json["elements"][1]["index"], 1);
        assert_eq!(json["elements"][1]["lastMoveArrow"]["toRank"], 3);
    }
}
