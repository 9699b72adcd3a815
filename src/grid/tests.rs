// src/grid/tests.rs

use super::*;
use test_log::test;

fn assert_dense(grid: &Grid) {
    assert_eq!(grid.rows().len(), ROWS);
    for row in grid.rows() {
        assert_eq!(row.len(), COLS);
    }
    assert!(grid.is_dense(), "grid has unset cells:\n{}", grid);
}

#[test]
fn test_compose_empty_lines_is_all_background() {
    let grid = compose::<&str>(&[], |_, _| 'X');
    assert_dense(&grid);
    assert!(grid.rows().iter().flatten().all(|&c| c == 'X'));
}

#[test]
fn test_compose_unset_cells_show_background() {
    let line = format!("{}{}HI", UNSET, UNSET);
    let bg = Background::Checkerboard([Tile::Red, Tile::Blue]);
    let grid = compose(&[line], |r, c| bg.glyph_at(r, c));
    assert_dense(&grid);
    assert_eq!(grid.get(0, 0), Tile::Red.glyph());
    assert_eq!(grid.get(0, 1), Tile::Blue.glyph());
    assert_eq!(grid.get(0, 2), 'H');
    assert_eq!(grid.get(0, 3), 'I');
    // Past the end of the line the background continues.
    assert_eq!(grid.get(0, 4), Tile::Red.glyph());
    assert_eq!(grid.get(1, 0), Tile::Blue.glyph());
}

#[test]
fn test_compose_spaces_in_content_override_background() {
    let grid = compose(&["A B"], |_, _| Tile::Green.glyph());
    assert_eq!(grid.get(0, 1), ' ');
}

#[test]
#[should_panic(expected = "board has 6 rows")]
fn test_compose_rejects_too_many_lines() {
    let lines = vec!["A"; ROWS + 1];
    compose(&lines, |_, _| ' ');
}

#[test]
#[should_panic(expected = "board has 22 columns")]
fn test_compose_rejects_wide_line() {
    let line = "X".repeat(COLS + 1);
    compose(&[line], |_, _| ' ');
}

#[test]
fn test_side_border_background() {
    let bg = Background::SideBorder([Tile::Orange, Tile::Violet]);
    for r in 0..ROWS {
        assert_eq!(bg.glyph_at(r, 0), Tile::Orange.glyph());
        assert_eq!(bg.glyph_at(r, COLS - 1), Tile::Violet.glyph());
        for c in 1..COLS - 1 {
            assert_eq!(bg.glyph_at(r, c), ' ');
        }
    }
}

#[test]
fn test_encode_decode_grid() {
    let grid = compose(&["HELLO"], |r, c| Background::Blank.glyph_at(r, c));
    let codes = grid.encode();
    assert_eq!(codes[0][..5], [8, 5, 12, 12, 15]);
    assert_eq!(codes[1], [0; COLS]);
    assert_eq!(Grid::decode(&codes), grid);
}

#[test]
fn test_unencodable_cells_reported() {
    let grid = compose(&["A~B"], |_, _| ' ');
    assert_eq!(grid.unencodable_cells(), vec![(0, 1)]);
}

#[test]
fn test_display_prints_six_lines() {
    let grid = Grid::filled(|_, _| ' ');
    let text = grid.to_string();
    assert_eq!(text.lines().count(), ROWS);
    assert!(text.lines().all(|l| l.chars().count() == COLS));
}
