//! Text dumps for inspecting generated levels.
//!
//! A grid dump holds one line per X column, each with one token per Y row
//! (`..` for void, two uppercase hex digits otherwise), followed by an anchor
//! line `XX YY` naming the tile the view is centered on.

use crate::error::GridDumpError;
use crate::grid::{GRID_SIZE, TileGrid};
use crate::mapgen::model::Zone;
use crate::types::{GridPos, TileCode, VOID_TILE};

const LINES: usize = GRID_SIZE as usize;

pub fn write_grid_dump(grid: &TileGrid, anchor: GridPos) -> String {
    let mut out = String::with_capacity(LINES * LINES * 3 + 8);
    for x in 0..GRID_SIZE {
        for y in 0..GRID_SIZE {
            if y > 0 {
                out.push(' ');
            }
            match grid.code(GridPos::new(x, y)) {
                VOID_TILE => out.push_str(".."),
                code => out.push_str(&format!("{code:02X}")),
            }
        }
        out.push('\n');
    }
    out.push_str(&format!("{:02X} {:02X}\n", anchor.x, anchor.y));
    out
}

pub fn parse_grid_dump(text: &str) -> Result<(TileGrid, GridPos), GridDumpError> {
    let lines: Vec<&str> = text.lines().collect();
    let line_count =
        lines.iter().rposition(|line| !line.trim().is_empty()).map_or(0, |last| last + 1);
    if line_count != LINES + 1 {
        return Err(GridDumpError::LineCount { found: line_count, expected: LINES });
    }

    let mut grid = TileGrid::new();
    for (x, line) in lines[..LINES].iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != LINES {
            return Err(GridDumpError::TokenCount {
                line: x + 1,
                found: tokens.len(),
                expected: LINES,
            });
        }
        for (y, token) in tokens.into_iter().enumerate() {
            if token == ".." {
                continue;
            }
            let code = parse_hex(token).ok_or_else(|| GridDumpError::BadToken {
                line: x + 1,
                column: y + 1,
                token: token.to_owned(),
            })?;
            grid.set(GridPos::new(x as i32, y as i32), code);
        }
    }

    let anchor_tokens: Vec<&str> = lines[LINES].split_whitespace().collect();
    let anchor_coord = |column: usize| {
        anchor_tokens.get(column).and_then(|token| parse_hex(token)).ok_or_else(|| {
            GridDumpError::BadToken {
                line: LINES + 1,
                column: column + 1,
                token: anchor_tokens.get(column).copied().unwrap_or_default().to_owned(),
            }
        })
    };
    let anchor = GridPos::new(i32::from(anchor_coord(0)?), i32::from(anchor_coord(1)?));
    Ok((grid, anchor))
}

fn parse_hex(token: &str) -> Option<TileCode> {
    if token.len() != 2 || !token.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(token, 16).ok().map(TileCode::from)
}

/// ASCII picture of zone borders: one line per Y, `xx` on borders, `..` inside.
pub fn zone_outline(zones: &[Zone], width: i32, height: i32) -> String {
    let (width, height) = (width.max(0) as usize, height.max(0) as usize);
    let mut border = vec![false; width * height];
    let mut mark = |x: i32, y: i32| {
        if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
            border[y as usize * width + x as usize] = true;
        }
    };
    for zone in zones {
        let rect = zone.rect;
        for y in rect.y..rect.top() {
            mark(rect.x, y);
            mark(rect.right() - 1, y);
        }
        for x in rect.x..rect.right() {
            mark(x, rect.y);
            mark(x, rect.top() - 1);
        }
    }

    let mut out = String::with_capacity(width * height * 3 + height);
    for row in border.chunks(width.max(1)).take(height) {
        let cells: Vec<&str> = row.iter().map(|&edge| if edge { "xx" } else { ".." }).collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::mapgen::model::{ZoneId, ZoneRect};

    #[test]
    fn dump_writes_one_line_per_column_and_an_anchor() {
        let mut grid = TileGrid::new();
        grid.set(GridPos::new(0, 1), 0xE0);
        grid.set(GridPos::new(3, 0), 0x0A);
        let dump = write_grid_dump(&grid, GridPos::new(0x80, 0x7F));
        let lines: Vec<_> = dump.lines().collect();

        assert_eq!(lines.len(), 257);
        assert!(lines[0].starts_with(".. E0 .."));
        assert!(lines[3].starts_with("0A .."));
        assert_eq!(lines[1].split(' ').count(), 256);
        assert_eq!(lines[256], "80 7F");
        assert!(dump.ends_with("80 7F\n"));
    }

    #[test]
    fn dump_survives_a_trip_through_a_file() {
        let mut grid = TileGrid::new();
        grid.fill_rect(GridPos::new(10, 10), GridPos::new(20, 14), 3);
        grid.set(GridPos::new(255, 255), 0xF0);
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("level.dump");
        fs::write(&path, write_grid_dump(&grid, GridPos::new(15, 12))).expect("write");

        let text = fs::read_to_string(&path).expect("read");
        let (parsed, anchor) = parse_grid_dump(&text).expect("parse");
        assert_eq!(parsed, grid);
        assert_eq!(anchor, GridPos::new(15, 12));
    }

    #[test]
    fn truncated_or_corrupt_dumps_are_rejected() {
        let dump = write_grid_dump(&TileGrid::new(), GridPos::new(1, 1));

        let truncated: String = dump.lines().take(100).map(|line| format!("{line}\n")).collect();
        assert!(matches!(
            parse_grid_dump(&truncated),
            Err(GridDumpError::LineCount { found: 100, .. })
        ));

        let corrupt = dump.replacen("..", "QQ", 1);
        assert!(matches!(
            parse_grid_dump(&corrupt),
            Err(GridDumpError::BadToken { line: 1, column: 1, .. })
        ));

        let short = dump.replacen(".. ", "", 1);
        assert!(matches!(
            parse_grid_dump(&short),
            Err(GridDumpError::TokenCount { line: 1, found: 255, .. })
        ));
    }

    #[test]
    fn outline_marks_zone_borders() {
        let zones = vec![
            Zone::new(ZoneId(0), ZoneRect { x: 0, y: 0, width: 3, height: 3 }),
            Zone::new(ZoneId(1), ZoneRect { x: 3, y: 0, width: 2, height: 3 }),
        ];
        let outline = zone_outline(&zones, 6, 3);
        let expected = "xx xx xx xx xx ..\nxx .. xx xx xx ..\nxx xx xx xx xx ..\n";
        assert_eq!(outline, expected);
    }
}
