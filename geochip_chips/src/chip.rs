/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! slicing a raster into fixed size square chips.
//!
//! Windows are laid out on a lattice: columns run `0, O, 2O, ..` while `< width`, rows run from
//! `height - S` down in steps of `O` while `> 0` (row 0 itself is never a window origin).
//! Each window is written as a GeoTIFF with the CRS of the source and a geotransform shifted to
//! the window origin.

use std::{path::{Path,PathBuf}, str::FromStr};
use serde::{Serialize,Deserialize};
use tracing::{debug,info};

use geochip_common::fs::{ensure_writable_dir, filename_of_path, filestem_of_path};
use geochip_gdal::{open_raster, translate_window, SrcWindow};
use crate::errors::{Result, invalid_arg};

pub const DEFAULT_CHIP_SIZE: usize = 128;
pub const DEFAULT_CHIP_OFFSET: usize = 64;
pub const DEFAULT_SIMPLE_CHIP_SIZE: usize = 28;
pub const DEFAULT_SIMPLE_PREFIX: &'static str = "chip";
pub const CHIP_EXTENSION: &'static str = "tif";

/// what to do with windows that run past the right raster edge
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
pub enum EdgePolicy {
    /// write a full `S x S` chip, GDAL fills the part outside the source
    #[default]
    Pad,
    /// drop the window
    Skip
}

impl FromStr for EdgePolicy {
    type Err = String;

    fn from_str (s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pad" => Ok(EdgePolicy::Pad),
            "skip" => Ok(EdgePolicy::Skip),
            _ => Err( format!("unknown edge policy '{s}' (pad|skip)"))
        }
    }
}

/// pixel position of a square chip within its source raster
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct ChipWindow {
    pub col_off: usize,
    pub row_off: usize,
    pub size: usize,
}

impl ChipWindow {
    pub fn src_window (&self) -> SrcWindow {
        SrcWindow::square( self.col_off, self.row_off, self.size)
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ChipOptions {
    pub size: usize,
    pub offset: usize,
    pub edge_policy: EdgePolicy,
    /// optional prefix for chip filenames (`<prefix>_<stem>_<col>_<row>.tif`)
    pub prefix: Option<String>,
    /// GeoTIFF creation options such as "COMPRESS=DEFLATE"
    pub creation_options: Vec<String>,
}

impl Default for ChipOptions {
    fn default() -> Self {
        ChipOptions {
            size: DEFAULT_CHIP_SIZE,
            offset: DEFAULT_CHIP_OFFSET,
            edge_policy: EdgePolicy::default(),
            prefix: None,
            creation_options: Vec::new()
        }
    }
}

/// the window lattice for a `width x height` raster. Columns are the outer loop
pub fn chip_offsets (width: usize, height: usize, size: usize, offset: usize, edge_policy: EdgePolicy) -> Result<Vec<ChipWindow>> {
    if size == 0 { return Err( invalid_arg("chip size has to be > 0")) }
    if offset == 0 { return Err( invalid_arg("chip offset has to be > 0")) }

    let rows = row_offsets( height, size, offset);
    let mut windows = Vec::with_capacity( width.div_ceil(offset) * rows.len());

    for col_off in (0..width).step_by(offset) {
        for &row_off in &rows {
            let win = ChipWindow { col_off, row_off, size };
            if edge_policy == EdgePolicy::Skip && win.src_window().exceeds( width, height) { continue }
            windows.push( win)
        }
    }

    Ok(windows)
}

// H-S, H-S-O, .. while > 0
fn row_offsets (height: usize, size: usize, offset: usize) -> Vec<usize> {
    let mut rows = Vec::new();
    if height > size {
        let mut v = height - size;
        loop {
            rows.push(v);
            if v <= offset { break }
            v -= offset;
        }
    }
    rows
}

/// `<stem>_<col_off>_<row_off>.tif`
pub fn chip_filename (src_path: impl AsRef<Path>, win: &ChipWindow) -> Result<String> {
    let stem = filestem_of_path( src_path)?;
    Ok( format!("{stem}_{}_{}.{CHIP_EXTENSION}", win.col_off, win.row_off) )
}

/// write one chip per lattice window of `src` into `out_dir`, returning the chip paths in lattice order.
/// Existing chips with the same name are overwritten
pub fn chip_image (src: impl AsRef<Path>, out_dir: impl AsRef<Path>, opts: &ChipOptions) -> Result<Vec<PathBuf>> {
    let src = src.as_ref();
    let out_dir = out_dir.as_ref();
    info!("chipping {src:?} to {out_dir:?}");

    ensure_writable_dir( out_dir)?;
    let ds = open_raster( src)?;
    let (width, height) = ds.raster_size();
    let windows = chip_offsets( width, height, opts.size, opts.offset, opts.edge_policy)?;
    debug!("{width}x{height} raster -> {} windows", windows.len());

    let mut chips: Vec<PathBuf> = Vec::with_capacity( windows.len());
    for win in &windows {
        let name = chip_filename( src, win)?;
        let path = match &opts.prefix {
            Some(prefix) => out_dir.join( format!("{prefix}_{name}")),
            None => out_dir.join( name)
        };
        translate_window( &ds, &win.src_window(), &path, &opts.creation_options)?;
        chips.push( path);
    }

    info!("wrote {} chips of {src:?}", chips.len());
    Ok(chips)
}

/* #region simple variant *****************************************************************************************/

/// how much of the lattice the simple variant writes
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
pub enum SimpleChipMode {
    /// only the first window of the lattice
    FirstOnly,
    #[default]
    FullLattice
}

/// `<prefix>_<col_off / size>_<height - row_off - size>_<src_filename>`, i.e. the column in chip
/// units and the distance of the chip from the bottom of the raster in pixels
pub fn simple_chip_filename (prefix: &str, win: &ChipWindow, height: usize, src_filename: &str) -> String {
    let col = win.col_off / win.size;
    let row = height.saturating_sub( win.row_off + win.size);
    format!("{prefix}_{col}_{row}_{src_filename}")
}

/// the simple variant, which steps by the chip size and names chips after their lattice position.
/// Edge windows are padded
pub fn chip_image_simple (src_dir: impl AsRef<Path>, src_file: &str, out_dir: impl AsRef<Path>,
                          size: usize, prefix: &str, mode: SimpleChipMode) -> Result<Vec<PathBuf>> {
    let src = src_dir.as_ref().join( src_file);
    let out_dir = out_dir.as_ref();
    info!("chipping {src:?} to {out_dir:?} ({mode:?})");

    ensure_writable_dir( out_dir)?;
    let ds = open_raster( &src)?;
    let (width, height) = ds.raster_size();
    let mut windows = chip_offsets( width, height, size, size, EdgePolicy::Pad)?;
    if mode == SimpleChipMode::FirstOnly {
        windows.truncate(1);
    }

    let src_filename = filename_of_path( &src)?;
    let mut chips: Vec<PathBuf> = Vec::with_capacity( windows.len());
    for win in &windows {
        let path = out_dir.join( simple_chip_filename( prefix, win, height, &src_filename));
        translate_window( &ds, &win.src_window(), &path, &[])?;
        chips.push( path);
    }

    info!("wrote {} chips of {src:?}", chips.len());
    Ok(chips)
}

/* #endregion simple variant */
