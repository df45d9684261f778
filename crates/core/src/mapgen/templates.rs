//! Room templates: hex-token text patterns stamped into the center of each zone.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::MapGenError;
use crate::types::TileCode;

use super::model::Zone;
use super::seed::StageRng;

const BUILTIN: [(&str, &str); 4] = [
    ("cross", include_str!("../../templates/cross.txt")),
    ("gallery", include_str!("../../templates/gallery.txt")),
    ("hall", include_str!("../../templates/hall.txt")),
    ("pillars", include_str!("../../templates/pillars.txt")),
];

/// A parsed room pattern. Line index runs along X, token index along Y.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomTemplate {
    name: String,
    lines: Vec<Vec<Option<TileCode>>>,
}

impl RoomTemplate {
    pub fn parse(name: &str, text: &str) -> Result<Self, MapGenError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(line, row)| {
                row.split_whitespace()
                    .enumerate()
                    .map(|(column, token)| parse_token(name, line, column, token))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        while lines.last().is_some_and(Vec::is_empty) {
            lines.pop();
        }
        Ok(Self { name: name.to_owned(), lines })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Writes every non-`..` token into `zone`, centered; overhang is clipped.
    pub fn stamp(&self, zone: &mut Zone) {
        let x_offset = (zone.rect.width - self.lines.len() as i32) / 2;
        for (i, tokens) in self.lines.iter().enumerate() {
            let y_offset = (zone.rect.height - tokens.len() as i32) / 2;
            for (j, token) in tokens.iter().enumerate() {
                if let Some(code) = *token {
                    zone.set_cell(i as i32 + x_offset, j as i32 + y_offset, code);
                }
            }
        }
    }
}

fn parse_token(
    template: &str,
    line: usize,
    column: usize,
    token: &str,
) -> Result<Option<TileCode>, MapGenError> {
    if token == ".." {
        return Ok(None);
    }
    let invalid = || MapGenError::InvalidTemplateToken {
        template: template.to_owned(),
        line: line + 1,
        column: column + 1,
        token: token.to_owned(),
    };
    if token.len() != 2 || !token.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    u8::from_str_radix(token, 16).map(|code| Some(TileCode::from(code))).map_err(|_| invalid())
}

/// A non-empty, fully validated collection of templates.
#[derive(Clone, Debug)]
pub struct TemplateSet {
    templates: Vec<RoomTemplate>,
}

impl TemplateSet {
    pub fn builtin() -> Result<Self, MapGenError> {
        let templates = BUILTIN
            .iter()
            .map(|(name, text)| RoomTemplate::parse(name, text))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_templates(templates)
    }

    /// Loads every `*.txt` file in `dir`, ordered by file name.
    pub fn load_dir(dir: &Path) -> Result<Self, MapGenError> {
        let io_error = |source| MapGenError::TemplateIo { path: dir.to_path_buf(), source };
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(io_error)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<_, _>>()
            .map_err(io_error)?;
        paths.retain(|path| path.extension().is_some_and(|ext| ext == "txt"));
        paths.sort();

        let mut templates = Vec::with_capacity(paths.len());
        for path in paths {
            let text = fs::read_to_string(&path)
                .map_err(|source| MapGenError::TemplateIo { path: path.clone(), source })?;
            let name = path.file_stem().map_or_else(
                || path.display().to_string(),
                |stem| stem.to_string_lossy().into_owned(),
            );
            templates.push(RoomTemplate::parse(&name, &text)?);
        }
        Self::from_templates(templates)
    }

    pub fn from_templates(templates: Vec<RoomTemplate>) -> Result<Self, MapGenError> {
        if templates.is_empty() {
            return Err(MapGenError::NoTemplates);
        }
        Ok(Self { templates })
    }

    pub fn templates(&self) -> &[RoomTemplate] {
        &self.templates
    }

    fn pick(&self, rng: &mut StageRng) -> &RoomTemplate {
        &self.templates[rng.index(self.templates.len())]
    }
}

/// Stamps one uniformly chosen template into each zone, in arena order.
pub(crate) fn stamp_zones(zones: &mut [Zone], templates: &TemplateSet, rng: &mut StageRng) {
    for zone in zones {
        templates.pick(rng).stamp(zone);
    }
}
