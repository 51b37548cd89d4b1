//! Static text pools (rumors.c, engrave.c, makedefs padding)
//!
//! Each pool is one blob of newline-separated lines. Every line is padded
//! with `_` to a fixed width and then run through [`xcrypt`], the way the
//! compiled data files are laid out. Picking a line draws a byte offset and
//! takes the line *after* the one containing it, so the draw count and the
//! chosen line match a reader seeking into the file.

mod data;

use std::path::Path;
use std::sync::{Arc, OnceLock};

use nh_rng::GameRng;
use tracing::{debug, warn};

use crate::consts::TEXT_PAD_WIDTH;
use crate::error::TextPoolError;
use crate::options::GenOptions;

const PAD: u8 = b'_';

/// Toggle the low bits of every letter-range byte, cycling the mask
/// through 1, 2, 4, 8, 16. Applying it twice gives back the input.
pub fn xcrypt(input: &[u8]) -> Vec<u8> {
    let mut bitmask = 1u8;
    input
        .iter()
        .map(|&b| {
            let out = if b & (32 | 64) != 0 { b ^ bitmask } else { b };
            bitmask <<= 1;
            if bitmask >= 32 {
                bitmask = 1;
            }
            out
        })
        .collect()
}

/// Pad with `_` to `width` bytes (longer lines are left alone).
fn padline(line: &str, width: usize) -> Vec<u8> {
    let mut bytes = line.as_bytes().to_vec();
    if bytes.len() < width {
        bytes.resize(width, PAD);
    }
    bytes
}

/// One encrypted, padded pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPool {
    name: String,
    blob: Vec<u8>,
}

impl TextPool {
    /// Build a pool from clear text lines.
    pub fn from_plain(name: &str, lines: &[&str], width: usize) -> Self {
        let mut blob = Vec::new();
        for line in lines {
            blob.extend(xcrypt(&padline(line, width)));
            blob.push(b'\n');
        }
        Self {
            name: name.to_string(),
            blob,
        }
    }

    /// Wrap an already encrypted blob.
    pub fn from_encrypted(name: &str, blob: Vec<u8>) -> Result<Self, TextPoolError> {
        if blob.iter().all(|&b| b == b'\n') {
            return Err(TextPoolError::Empty(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            blob,
        })
    }

    pub fn load(path: &Path) -> Result<Self, TextPoolError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_encrypted(&name, std::fs::read(path)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes, newlines included.
    pub fn len(&self) -> usize {
        self.blob.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blob.is_empty()
    }

    /// Decrypted lines in order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.blob
            .split(|&b| b == b'\n')
            .filter(|l| !l.is_empty())
            .map(decode)
    }

    /// Byte range of the line following the one that holds `offset`,
    /// wrapping to the first line past the end.
    fn line_after(&self, offset: usize) -> (usize, usize) {
        let start = match self.blob[offset..].iter().position(|&b| b == b'\n') {
            Some(nl) if offset + nl + 1 < self.blob.len() => offset + nl + 1,
            _ => 0,
        };
        let end = self.blob[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.blob.len(), |nl| start + nl);
        (start, end)
    }

    /// Pick a line. A line whose padded length exceeds `max_len` is
    /// redrawn, up to `retries` times; the last pick stands after that.
    pub fn random_line(&self, rng: &mut GameRng, max_len: usize, retries: u32) -> String {
        let mut range = (0, 0);
        for _ in 0..retries.max(1) {
            let offset = rng.rn2(self.blob.len() as i32) as usize;
            range = self.line_after(offset);
            if range.1 - range.0 <= max_len {
                break;
            }
            debug!(pool = %self.name, len = range.1 - range.0, "overlong line redrawn");
        }
        decode(&self.blob[range.0..range.1])
    }
}

fn decode(line: &[u8]) -> String {
    let clear = xcrypt(line);
    let trimmed = match clear.iter().rposition(|&b| b != PAD) {
        Some(last) => &clear[..=last],
        None => &[][..],
    };
    String::from_utf8_lossy(trimmed).into_owned()
}

/// Rumors, epitaphs and engravings used while furnishing a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPools {
    pub rumors_true: TextPool,
    pub rumors_false: TextPool,
    pub epitaphs: TextPool,
    pub engravings: TextPool,
}

static BUILTIN: OnceLock<Arc<TextPools>> = OnceLock::new();

/// Join pre-encrypted lines into one pool blob.
fn builtin_pool(name: &str, lines: &[&[u8]]) -> TextPool {
    let blob: Vec<u8> = lines
        .iter()
        .flat_map(|line| line.iter().copied().chain([b'\n']))
        .collect();
    TextPool::from_encrypted(name, blob).unwrap_or_else(|e| {
        warn!(%e, "built-in text pool unusable");
        TextPool::from_plain(name, &[""], TEXT_PAD_WIDTH)
    })
}

impl TextPools {
    /// Pools compiled into the crate, shared by every generation call.
    pub fn builtin() -> Arc<TextPools> {
        BUILTIN
            .get_or_init(|| {
                Arc::new(TextPools {
                    rumors_true: builtin_pool("rumors.tru", data::RUMORS_TRUE),
                    rumors_false: builtin_pool("rumors.fal", data::RUMORS_FALSE),
                    epitaphs: builtin_pool("epitaph", data::EPITAPHS),
                    engravings: builtin_pool("engrave", data::ENGRAVINGS),
                })
            })
            .clone()
    }

    /// Load encrypted pools from `dir` (`rumors.tru`, `rumors.fal`,
    /// `epitaph`, `engrave`).
    pub fn load(dir: &Path) -> Result<TextPools, TextPoolError> {
        Ok(TextPools {
            rumors_true: TextPool::load(&dir.join("rumors.tru"))?,
            rumors_false: TextPool::load(&dir.join("rumors.fal"))?,
            epitaphs: TextPool::load(&dir.join("epitaph"))?,
            engravings: TextPool::load(&dir.join("engrave"))?,
        })
    }

    /// Pools selected by the options: the directory if one is set,
    /// otherwise the built-in ones.
    pub fn for_options(options: &GenOptions) -> Result<Arc<TextPools>, TextPoolError> {
        match &options.text_dir {
            Some(dir) => Ok(Arc::new(Self::load(dir)?)),
            None => Ok(Self::builtin()),
        }
    }

    /// A rumor; `None` lets a coin flip choose between true and false.
    pub fn rumor(&self, rng: &mut GameRng, truth: Option<bool>, options: &GenOptions) -> String {
        let truth = match truth {
            Some(t) => t,
            None => rng.rn2(2) != 0,
        };
        let pool = if truth {
            &self.rumors_true
        } else {
            &self.rumors_false
        };
        pool.random_line(rng, options.text_max_line, options.text_retries)
    }

    pub fn epitaph(&self, rng: &mut GameRng, options: &GenOptions) -> String {
        self.epitaphs
            .random_line(rng, options.text_max_line, options.text_retries)
    }

    /// Graffiti: usually a rumor, one time in four from the engravings.
    pub fn engraving(&self, rng: &mut GameRng, options: &GenOptions) -> String {
        if rng.rn2(4) != 0 {
            let rumor = self.rumor(rng, None, options);
            if !rumor.is_empty() {
                return rumor;
            }
        }
        self.engravings
            .random_line(rng, options.text_max_line, options.text_retries)
    }
}
