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

//! regular lattice of square cells over the bounds of a raster

use std::{path::{Path,PathBuf}, str::FromStr};
use serde::{Serialize,Deserialize};
use geo::Area;
use geo_types::{coord, Polygon, Rect};
use tracing::{debug,info};

use geochip_common::{BoundingBox, fs::filestem_of_path};
use geochip_gdal::{
    create_polygon_layer, create_vector_dataset, crs_string, get_raster_info, get_srs, open_raster, write_polygon_feature,
    FieldValue, gdal::vector::OGRFieldType
};
use crate::{index::LOCATION_FIELD, errors::{Result, invalid_arg}};

pub const AREA_FIELD: &'static str = "area";

/// how the `location` of a cell is derived
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
pub enum CellIdMode {
    /// position in the list of surviving origins times the cell size. Ids shift if origins were dropped
    FilteredIndex,
    /// position in the unfiltered candidate list times the cell size
    #[default]
    OriginalIndex,
    /// lower left coordinates of the cell
    Coordinate
}

impl FromStr for CellIdMode {
    type Err = String;

    fn from_str (s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "filtered" | "filtered_index" => Ok(CellIdMode::FilteredIndex),
            "original" | "original_index" => Ok(CellIdMode::OriginalIndex),
            "coordinate" | "coord" => Ok(CellIdMode::Coordinate),
            _ => Err( format!("unknown cell id mode '{s}' (filtered|original|coordinate)"))
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub struct GridSpec {
    /// side length of cells in CRS units
    pub cell_size: u32,
    /// distance between cell origins in CRS units
    pub interval: u32,
    pub id_mode: CellIdMode,
}

impl GridSpec {
    pub fn new (cell_size: u32, interval: u32) -> Self {
        GridSpec { cell_size, interval, id_mode: CellIdMode::default() }
    }

    pub fn with_id_mode (mut self, id_mode: CellIdMode) -> Self {
        self.id_mode = id_mode;
        self
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct GridCell {
    /// lattice column (index of surviving x origin)
    pub col: usize,
    /// lattice row (index of surviving y origin)
    pub row: usize,
    pub x: i64,
    pub y: i64,
    pub size: u32,
    pub location: String,
}

impl GridCell {
    pub fn polygon (&self) -> Polygon<f64> {
        let (x, y, s) = (self.x as f64, self.y as f64, self.size as f64);
        Rect::new( coord!{ x: x, y: y }, coord!{ x: x + s, y: y + s }).to_polygon()
    }

    pub fn area (&self) -> f64 {
        self.polygon().unsigned_area()
    }
}

#[derive(Debug,Clone)]
pub struct GridReport {
    pub path: PathBuf,
    pub n_cells: usize,
    pub crs: String,
}

/// cell origins along one axis as (index in candidate list, coordinate).
/// Candidates are `floor(min), floor(min)+I, ..` below `ceil(max)`. Origins below `min` or
/// with `origin + C >= max` are dropped so that every cell lies inside `[min,max]`
pub fn grid_origins (min: f64, max: f64, cell_size: u32, interval: u32) -> Vec<(usize,i64)> {
    if interval == 0 { return Vec::new() }

    let start = min.floor() as i64;
    let end = max.ceil() as i64;
    let c = cell_size as i64;

    (start..end).step_by( interval as usize)
        .enumerate()
        .filter( |&(_,x)| x as f64 >= min && ((x + c) as f64) < max)
        .collect()
}

/// the lattice of cells over `bounds`, x-major (all cells of the first column come first)
pub fn grid_cells (bounds: &BoundingBox<f64>, spec: &GridSpec) -> Result<Vec<GridCell>> {
    if spec.cell_size == 0 { return Err( invalid_arg("cell size has to be > 0")) }
    if spec.interval == 0 { return Err( invalid_arg("grid interval has to be > 0")) }
    if !bounds.is_proper() { return Err( invalid_arg( format!("degenerated bounds {bounds:?}"))) }

    let xs = grid_origins( bounds.west, bounds.east, spec.cell_size, spec.interval);
    let ys = grid_origins( bounds.south, bounds.north, spec.cell_size, spec.interval);
    let c = spec.cell_size as usize;

    let mut cells = Vec::with_capacity( xs.len() * ys.len());
    for (col, &(x_idx, x)) in xs.iter().enumerate() {
        for (row, &(y_idx, y)) in ys.iter().enumerate() {
            let location = match spec.id_mode {
                CellIdMode::FilteredIndex => format!("{}_{}", col * c, row * c),
                CellIdMode::OriginalIndex => format!("{}_{}", x_idx * c, y_idx * c),
                CellIdMode::Coordinate => format!("{x}_{y}"),
            };
            cells.push( GridCell { col, row, x, y, size: spec.cell_size, location })
        }
    }

    Ok(cells)
}

/// write the grid over the bounds of `raster` as a polygon layer to `out_path`, in the CRS of the raster.
/// Each cell has a `location` and an `area` attribute
pub fn generate_grid (raster: impl AsRef<Path>, spec: &GridSpec, out_path: impl AsRef<Path>) -> Result<GridReport> {
    let raster = raster.as_ref();
    let out_path = out_path.as_ref();

    let ds = open_raster( raster)?;
    let bounds = get_raster_info( &ds)?.bounds();
    let srs = get_srs( &ds)?;
    let crs = crs_string( &srs)?;
    debug!("grid bounds {bounds:?} in {crs}");

    let cells = grid_cells( &bounds, spec)?;

    let mut out_ds = create_vector_dataset( out_path)?;
    let layer_name = filestem_of_path( out_path)?;
    let layer = create_polygon_layer( &mut out_ds, &layer_name, Some(&srs), &[
        (LOCATION_FIELD, OGRFieldType::OFTString),
        (AREA_FIELD, OGRFieldType::OFTReal)
    ])?;

    for cell in &cells {
        let polygon = cell.polygon();
        let area = polygon.unsigned_area();
        write_polygon_feature( &layer, &polygon, &[
            (LOCATION_FIELD, FieldValue::StringValue( cell.location.clone())),
            (AREA_FIELD, FieldValue::RealValue( area))
        ])?;
    }

    info!("exported grids shp to {out_path:?}");
    Ok( GridReport { path: out_path.to_path_buf(), n_cells: cells.len(), crs } )
}
