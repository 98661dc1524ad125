//! Pieces tests - shape catalog, rotation and kick placement

use blockfall::core::{intersects, landing_origin, try_rotate, Board, Config, Piece};
use blockfall::types::{Coord, RotateDirection, Shape};

// ============== Shape Tests ==============

#[test]
fn test_catalog_has_four_cells_per_shape() {
    let config = Config::default();
    for shape in Shape::ALL {
        let body = config.body(shape);
        let mut sorted = body.to_vec();
        sorted.sort_by_key(|c| (c.row, c.col));
        sorted.dedup();
        assert_eq!(sorted.len(), 4, "{:?} has duplicate cells", shape);
        assert!(body.contains(&Coord::new(0, 0)), "{:?} excludes its origin", shape);
    }
}

#[test]
fn test_spawn_uses_spawn_point() {
    let config = Config::default();
    let piece = Piece::spawn(&config, Shape::I);
    assert_eq!(piece.origin, config.spawn_point);
    assert_eq!(
        piece.cells(),
        [
            Coord::new(0, 3),
            Coord::new(0, 4),
            Coord::new(0, 5),
            Coord::new(0, 6)
        ]
    );
}

// ============== Rotation Tests ==============

#[test]
fn test_t_rotates_clockwise() {
    let config = Config::default();
    let t = Piece::spawn(&config, Shape::T).at(Coord::new(5, 5));
    let turned = t.rotated(RotateDirection::Cw);

    // Nub points up at spawn, right after one clockwise turn.
    assert_eq!(
        turned.sorted_cells(),
        [
            Coord::new(4, 5),
            Coord::new(5, 5),
            Coord::new(5, 6),
            Coord::new(6, 5)
        ]
    );
}

#[test]
fn test_four_turns_are_identity() {
    let config = Config::default();
    for shape in Shape::ALL {
        let piece = Piece::spawn(&config, shape).at(Coord::new(10, 5));
        for direction in [RotateDirection::Cw, RotateDirection::Ccw] {
            let mut turned = piece;
            for _ in 0..4 {
                turned = turned.rotated(direction);
            }
            assert_eq!(turned, piece, "{:?} {:?}", shape, direction);
        }
    }
}

#[test]
fn test_opposite_turns_cancel() {
    let config = Config::default();
    for shape in Shape::ALL {
        let piece = Piece::spawn(&config, shape).at(Coord::new(10, 5));
        let cw_then_ccw = piece.rotated(RotateDirection::Cw).rotated(RotateDirection::Ccw);
        let ccw_then_cw = piece.rotated(RotateDirection::Ccw).rotated(RotateDirection::Cw);
        assert_eq!(cw_then_ccw, piece, "{:?}", shape);
        assert_eq!(ccw_then_cw, piece, "{:?}", shape);
    }
}

#[test]
fn test_o_never_rotates() {
    let config = Config::default();
    let o = Piece::spawn(&config, Shape::O).at(Coord::new(10, 5));
    assert_eq!(o.rotated(RotateDirection::Cw), o);
    assert_eq!(o.rotated(RotateDirection::Ccw), o);
}

// ============== Kick Tests ==============

#[test]
fn test_rotation_without_obstruction_does_not_kick() {
    let config = Config::default();
    let board = Board::new(&config);
    let t = Piece::spawn(&config, Shape::T).at(Coord::new(10, 5));

    let rotated = try_rotate(&board, &t, RotateDirection::Cw, &config.kick_offsets).unwrap();
    assert_eq!(rotated.origin, t.origin);
}

#[test]
fn test_rotation_kicks_off_right_edge() {
    let config = Config::default();
    let board = Board::new(&config);
    let vertical = Piece::spawn(&config, Shape::I)
        .rotated(RotateDirection::Cw)
        .at(Coord::new(5, 9));
    assert!(!intersects(&board, &vertical));

    // Right kicks stay off the board, so the first left kick wins.
    let flat = try_rotate(&board, &vertical, RotateDirection::Ccw, &config.kick_offsets).unwrap();
    assert_eq!(flat.origin, Coord::new(5, 8));
}

#[test]
fn test_rotation_without_kicks_fails_at_edge() {
    let config = Config::default();
    let board = Board::new(&config);
    let vertical = Piece::spawn(&config, Shape::I)
        .rotated(RotateDirection::Cw)
        .at(Coord::new(5, 9));
    assert_eq!(try_rotate(&board, &vertical, RotateDirection::Ccw, &[]), None);
}

#[test]
fn test_kicked_rotation_never_intersects() {
    let config = Config::default();
    let board = Board::from_ascii(&config, &["X.X.X.X.X.", ".X.X.X.X.X"]);
    for shape in Shape::ALL {
        for col in 0..10 {
            let piece = Piece::spawn(&config, shape).at(Coord::new(16, col));
            if intersects(&board, &piece) {
                continue;
            }
            for direction in [RotateDirection::Cw, RotateDirection::Ccw] {
                if let Some(rotated) = try_rotate(&board, &piece, direction, &config.kick_offsets) {
                    assert!(!intersects(&board, &rotated));
                }
            }
        }
    }
}

// ============== Landing Tests ==============

#[test]
fn test_landing_stops_on_stack() {
    let config = Config::default();
    let board = Board::from_ascii(&config, &["XXXXXXXXX.", "XXXXXXXXX."]);
    let o = Piece::spawn(&config, Shape::O);
    assert_eq!(landing_origin(&board, &o), Coord::new(17, 5));

    let landed = o.at(landing_origin(&board, &o));
    assert!(!intersects(&board, &landed));
    assert!(intersects(&board, &landed.shifted(Coord::new(1, 0))));
}
