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

use anyhow::Result;
use geochip_common::{define_cli, check_cli, init_tracing};
use geochip_chips::{load_config, ChipsConfig, CONFIG_FILE, grid::{generate_grid, CellIdMode, GridSpec}};

define_cli! { ARGS [about="make_grid - write a shapefile with a regular grid of square cells over the bounds of a raster"] =
    id_mode: Option<CellIdMode> [help="cell location ids: filtered|original|coordinate", long],

    raster: String [help="reference raster (for bounds and CRS)"],
    cell_size: u32 [help="cell side length in CRS units"],
    interval: u32 [help="distance between cell origins in CRS units"],
    out_path: String [help="output shapefile"]
}

fn main ()->Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let config: ChipsConfig = load_config( CONFIG_FILE)?;
    let spec = GridSpec::new( ARGS.cell_size, ARGS.interval).with_id_mode( ARGS.id_mode.unwrap_or( config.grid_id_mode));

    let report = generate_grid( &ARGS.raster, &spec, &ARGS.out_path)?;
    println!("{} cells in {} written to {:?}", report.n_cells, report.crs, report.path);
    Ok(())
}
