//! Configuration loading and parsing.
//!
//! Parses `hexide.toml` (or an override path provided by the driver)
//! extracting `[layout] width/height`: bytes per hex-grid row and the
//! preferred viewport height. Raw values are retained so a terminal resize
//! can re-clamp them; the effective values come out of `Config::apply_context`
//! once the terminal geometry is known.
//!
//! A missing or unparsable file degrades to defaults rather than aborting:
//! the editor must come up even when the config is broken. Unknown fields are
//! ignored so the format can grow without breaking older files.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::info;

/// Default bytes per row; the conventional hex-dump width.
pub const DEFAULT_WIDTH: u64 = 16;
/// Default preferred viewport rows.
pub const DEFAULT_HEIGHT: u64 = 32;

/// Columns used by the address gutter (8 hex digits, colon, space) and the
/// separator in front of the ascii column.
const ROW_FIXED_COLS: u16 = 12;
/// Columns each byte costs in a row: two hex digits, a space, an ascii cell.
const ROW_COLS_PER_BYTE: u16 = 4;

/// Terminal geometry the effective layout is clamped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub terminal_columns: u16,
    pub terminal_rows: u16,
    /// Rows reserved for status or message lines.
    pub status_rows: u16,
}

impl ConfigContext {
    pub fn new(terminal_columns: u16, terminal_rows: u16, status_rows: u16) -> Self {
        Self {
            terminal_columns,
            terminal_rows,
            status_rows,
        }
    }

    /// Rows left for the hex grid itself.
    pub fn text_rows(&self) -> u16 {
        self.terminal_rows.saturating_sub(self.status_rows)
    }

    /// Widest row (in bytes) that fits the terminal columns.
    pub fn max_row_bytes(&self) -> u64 {
        (self
            .terminal_columns
            .saturating_sub(ROW_FIXED_COLS)
            / ROW_COLS_PER_BYTE)
            .max(1) as u64
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LayoutConfig {
    #[serde(default = "LayoutConfig::default_width")]
    pub width: u64,
    #[serde(default = "LayoutConfig::default_height")]
    pub height: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
        }
    }
}

impl LayoutConfig {
    const fn default_width() -> u64 {
        DEFAULT_WIDTH
    }
    const fn default_height() -> u64 {
        DEFAULT_HEIGHT
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Original file contents, kept for diagnostics.
    pub raw: Option<String>,
    /// Parsed (or default) data; pre-clamp values.
    pub file: ConfigFile,
    /// Bytes per row after terminal clamping.
    pub effective_width: u64,
    /// Viewport rows after terminal clamping.
    pub effective_height: u64,
}

/// Best-effort config path: prefer a `hexide.toml` in the working directory,
/// fall back to the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("hexide.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("hexide").join("hexide.toml");
    }
    PathBuf::from("hexide.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => Ok(Config {
                raw: Some(content),
                file,
                effective_width: 0,  // computed by apply_context
                effective_height: 0, // computed by apply_context
            }),
            Err(_e) => {
                // parse errors fall back to defaults; the editor must start
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}

impl Config {
    /// Clamp the configured layout against terminal geometry. Returns the
    /// effective `(width, height)` pair.
    pub fn apply_context(&mut self, ctx: ConfigContext) -> (u64, u64) {
        let raw_width = self.file.layout.width;
        let raw_height = self.file.layout.height;
        let max_width = ctx.max_row_bytes();
        let text_rows = ctx.text_rows().max(1) as u64;
        let width = raw_width.clamp(1, max_width);
        let height = raw_height.clamp(1, text_rows);
        if width != raw_width || height != raw_height {
            info!(
                target: "config",
                raw_width,
                raw_height,
                width,
                height,
                max_width,
                text_rows,
                terminal_columns = ctx.terminal_columns,
                terminal_rows = ctx.terminal_rows,
                "layout_clamped"
            );
        }
        self.effective_width = width;
        self.effective_height = height;
        (width, height)
    }

    /// Recompute the effective layout on a terminal change. Returns
    /// `Some((width, height))` when either effective value changed.
    pub fn recompute_with_context(&mut self, ctx: ConfigContext) -> Option<(u64, u64)> {
        let prev = (self.effective_width, self.effective_height);
        let current = self.apply_context(ctx);
        if current != prev { Some(current) } else { None }
    }
}
