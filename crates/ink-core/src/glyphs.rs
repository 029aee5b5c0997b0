//! Vector glyph source used by [`crate::Surface::text`].
//!
//! Source text holds one glyph per line:
//!
//! ```text
//! # comment
//! L 100,0 100,800 500,800
//! T 0,0 600,0;300,0 300,800
//! space
//! ```
//!
//! The first token names the character (`space` for `' '`), the rest of the
//! line is a `;`-separated list of subpaths, each a run of `x,y` points on the
//! 0..800 design grid with y pointing down.

use crate::error::{InkError, Result};
use fnv::FnvHashMap;
use glam::IVec2;
use smallvec::SmallVec;

pub const PLACEHOLDER: char = '?';

pub type SubPath = SmallVec<[IVec2; 8]>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Glyph {
    paths: SmallVec<[SubPath; 4]>,
}

impl Glyph {
    pub fn paths(&self) -> &[SubPath] {
        &self.paths
    }
}

#[derive(Clone, Debug)]
pub struct GlyphSet {
    glyphs: FnvHashMap<char, Glyph>,
}

static BUNDLED: &str = include_str!("../assets/glyphs.txt");

impl GlyphSet {
    /// The glyph set shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED)
    }

    pub fn parse(src: &str) -> Result<Self> {
        let mut glyphs = FnvHashMap::default();
        for (i, raw) in src.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (name, body) = match line.split_once(char::is_whitespace) {
                Some((n, b)) => (n, b.trim()),
                None => (line, ""),
            };
            let ch = parse_name(name).ok_or_else(|| InkError::GlyphParse {
                line: line_no,
                reason: format!("bad glyph name {:?}", name),
            })?;
            let glyph = parse_body(body, line_no)?;
            if glyphs.insert(ch, glyph).is_some() {
                log::warn!("[glyphs] line {}: {:?} redefined", line_no, ch);
            }
        }
        if !glyphs.contains_key(&PLACEHOLDER) {
            return Err(InkError::MissingPlaceholder(PLACEHOLDER));
        }
        Ok(Self { glyphs })
    }

    pub fn get(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    /// Lowercase falls back to uppercase, anything else to the placeholder.
    pub fn get_or_placeholder(&self, ch: char) -> &Glyph {
        self.glyphs
            .get(&ch)
            .or_else(|| self.glyphs.get(&ch.to_ascii_uppercase()))
            .or_else(|| self.glyphs.get(&PLACEHOLDER))
            .unwrap_or(&EMPTY)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

static EMPTY: Glyph = Glyph {
    paths: SmallVec::new_const(),
};

fn parse_name(name: &str) -> Option<char> {
    if name == "space" {
        return Some(' ');
    }
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_body(body: &str, line: usize) -> Result<Glyph> {
    let mut paths = SmallVec::new();
    for chunk in body.split(';') {
        let mut path = SubPath::new();
        for token in chunk.split_whitespace() {
            path.push(parse_point(token).ok_or_else(|| InkError::GlyphParse {
                line,
                reason: format!("bad point {:?}", token),
            })?);
        }
        if !path.is_empty() {
            paths.push(path);
        }
    }
    Ok(Glyph { paths })
}

fn parse_point(token: &str) -> Option<IVec2> {
    let (x, y) = token.split_once(',')?;
    Some(IVec2::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}
