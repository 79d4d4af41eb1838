#![warn(clippy::all, clippy::pedantic)]

//! The fixed catalog of piece shapes.
//!
//! Each kind is drawn as one or more 5x5 glyph frames, one per rotation
//! state, where `'0'` marks a filled cell. A piece maps glyph cell
//! `(col, row)` to board cell `(x + col - 2, y + row - 4)`.

use std::fmt;

use once_cell::sync::Lazy;

use crate::components::{BACKGROUND, Rgb, TetrominoType};
use crate::game::GLYPH_SIZE;

pub type Glyph = [&'static str; GLYPH_SIZE];

const FILLED: char = '0';

const S_FRAMES: &[Glyph] = &[
    [".....", ".....", "..00.", ".00..", "....."],
    [".....", "..0..", "..00.", "...0.", "....."],
];

const Z_FRAMES: &[Glyph] = &[
    [".....", ".....", ".00..", "..00.", "....."],
    [".....", "..0..", ".00..", ".0...", "....."],
];

const I_FRAMES: &[Glyph] = &[
    ["..0..", "..0..", "..0..", "..0..", "....."],
    [".....", "0000.", ".....", ".....", "....."],
];

const O_FRAMES: &[Glyph] = &[[".....", ".....", ".00..", ".00..", "....."]];

const J_FRAMES: &[Glyph] = &[
    [".....", ".0...", ".000.", ".....", "....."],
    [".....", "..00.", "..0..", "..0..", "....."],
    [".....", ".....", ".000.", "...0.", "....."],
    [".....", "..0..", "..0..", ".00..", "....."],
];

const L_FRAMES: &[Glyph] = &[
    [".....", "...0.", ".000.", ".....", "....."],
    [".....", "..0..", "..0..", "..00.", "....."],
    [".....", ".....", ".000.", ".0...", "....."],
    [".....", ".00..", "..0..", "..0..", "....."],
];

const T_FRAMES: &[Glyph] = &[
    [".....", "..0..", ".000.", ".....", "....."],
    [".....", "..0..", "..00.", "..0..", "....."],
    [".....", ".....", ".000.", "..0..", "....."],
    [".....", "..0..", ".00..", "..0..", "....."],
];

/// Raw definition of one kind before parsing.
#[derive(Debug, Clone, Copy)]
pub struct ShapeDef {
    pub kind: TetrominoType,
    pub glyphs: &'static [Glyph],
    pub color: Rgb,
}

pub const STANDARD_SHAPES: [ShapeDef; 7] = [
    ShapeDef {
        kind: TetrominoType::S,
        glyphs: S_FRAMES,
        color: Rgb(0, 255, 0),
    },
    ShapeDef {
        kind: TetrominoType::Z,
        glyphs: Z_FRAMES,
        color: Rgb(255, 0, 0),
    },
    ShapeDef {
        kind: TetrominoType::I,
        glyphs: I_FRAMES,
        color: Rgb(0, 255, 255),
    },
    ShapeDef {
        kind: TetrominoType::O,
        glyphs: O_FRAMES,
        color: Rgb(255, 255, 0),
    },
    ShapeDef {
        kind: TetrominoType::J,
        glyphs: J_FRAMES,
        color: Rgb(255, 165, 0),
    },
    ShapeDef {
        kind: TetrominoType::L,
        glyphs: L_FRAMES,
        color: Rgb(0, 0, 255),
    },
    ShapeDef {
        kind: TetrominoType::T,
        glyphs: T_FRAMES,
        color: Rgb(128, 0, 128),
    },
];

/// One rotation state: the filled glyph cells as `(col, row)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    cells: Vec<(usize, usize)>,
}

impl Frame {
    #[must_use]
    pub fn parse(glyph: &Glyph) -> Self {
        let cells = glyph
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .filter(|&(_, ch)| ch == FILLED)
                    .map(move |(col, _)| (col, row))
            })
            .collect();
        Self { cells }
    }

    #[must_use]
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    #[must_use]
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        self.cells.contains(&(col, row))
    }
}

#[derive(Debug, Clone)]
pub struct ShapeEntry {
    pub kind: TetrominoType,
    pub color: Rgb,
    pub frames: Vec<Frame>,
}

#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    entries: Vec<ShapeEntry>,
}

impl ShapeCatalog {
    /// Parses and validates a set of definitions, failing on the first broken invariant.
    pub fn from_defs(defs: &[ShapeDef]) -> Result<Self, CatalogError> {
        validate_defs(defs)?;
        Ok(Self::parse(defs))
    }

    fn parse(defs: &[ShapeDef]) -> Self {
        let entries = defs
            .iter()
            .map(|def| ShapeEntry {
                kind: def.kind,
                color: def.color,
                frames: def.glyphs.iter().map(Frame::parse).collect(),
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn entry(&self, kind: TetrominoType) -> &ShapeEntry {
        &self.entries[kind.index()]
    }

    /// The glyph frame for `rotation`, reduced modulo the kind's frame count.
    #[must_use]
    pub fn frame(&self, kind: TetrominoType, rotation: usize) -> &Frame {
        let frames = &self.entry(kind).frames;
        &frames[rotation % frames.len()]
    }

    pub fn entries(&self) -> impl Iterator<Item = &ShapeEntry> {
        self.entries.iter()
    }
}

static CATALOG: Lazy<ShapeCatalog> = Lazy::new(|| ShapeCatalog::parse(&STANDARD_SHAPES));

/// The built-in catalog. Run [`validate_standard`] once at startup before relying on it.
#[must_use]
pub fn catalog() -> &'static ShapeCatalog {
    &CATALOG
}

pub fn validate_standard() -> Result<(), CatalogError> {
    validate_defs(&STANDARD_SHAPES)
}

fn validate_defs(defs: &[ShapeDef]) -> Result<(), CatalogError> {
    if defs.len() != TetrominoType::ALL.len() {
        return Err(CatalogError::WrongKindCount(defs.len()));
    }

    for (index, def) in defs.iter().enumerate() {
        if def.kind.index() != index {
            return Err(CatalogError::OutOfOrder {
                kind: def.kind,
                index,
            });
        }
        if def.glyphs.is_empty() {
            return Err(CatalogError::NoFrames(def.kind));
        }
        if def.color == BACKGROUND {
            return Err(CatalogError::BackgroundColor(def.kind));
        }
        for (frame, glyph) in def.glyphs.iter().enumerate() {
            if glyph.iter().any(|line| line.chars().count() != GLYPH_SIZE) {
                return Err(CatalogError::BadFrameSize {
                    kind: def.kind,
                    frame,
                });
            }
            if Frame::parse(glyph).cells().is_empty() {
                return Err(CatalogError::EmptyFrame {
                    kind: def.kind,
                    frame,
                });
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    WrongKindCount(usize),
    OutOfOrder { kind: TetrominoType, index: usize },
    NoFrames(TetrominoType),
    BackgroundColor(TetrominoType),
    BadFrameSize { kind: TetrominoType, frame: usize },
    EmptyFrame { kind: TetrominoType, frame: usize },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::WrongKindCount(count) => {
                write!(f, "expected {} piece kinds, found {count}", TetrominoType::ALL.len())
            }
            CatalogError::OutOfOrder { kind, index } => {
                write!(f, "piece {} defined at position {index}", kind.name())
            }
            CatalogError::NoFrames(kind) => write!(f, "piece {} has no frames", kind.name()),
            CatalogError::BackgroundColor(kind) => {
                write!(f, "piece {} uses the background color", kind.name())
            }
            CatalogError::BadFrameSize { kind, frame } => write!(
                f,
                "piece {} frame {frame} is not {GLYPH_SIZE}x{GLYPH_SIZE}",
                kind.name()
            ),
            CatalogError::EmptyFrame { kind, frame } => {
                write!(f, "piece {} frame {frame} has no filled cells", kind.name())
            }
        }
    }
}

impl std::error::Error for CatalogError {}
