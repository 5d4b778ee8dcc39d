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
use geochip_common::{define_cli, check_cli};
use geochip_gdal::{open_raster, get_raster_info, get_srs, crs_string, Metadata};

define_cli! { ARGS [about="show_raster - show size, bounds, CRS and bands of a GDAL raster"] =
    meta: bool [help="also print metadata domains", short, long],
    path: String [help="path to GDAL raster to analyze"]
}

fn main ()->Result<()> {
    check_cli!(ARGS);
    let ds = open_raster( &ARGS.path)?;

    let info = get_raster_info( &ds)?;
    let bounds = info.bounds();
    let (cols, rows) = info.size();
    println!("raster size: {cols} x {rows}");
    println!("pixel size:  {} , {}", info.dx, info.dy);
    println!("bounds:      west={} south={} east={} north={}", bounds.west, bounds.south, bounds.east, bounds.north);

    match get_srs( &ds) {
        Ok(srs) => println!("crs:         {}", crs_string( &srs)?),
        Err(e) => println!("crs:         {e}")
    }

    if ARGS.meta { show_meta( &ds, 0) }

    for i in 0..ds.raster_count() {
        let band_id = i+1;
        let band = ds.rasterband( band_id)?;
        print!("--- band {}: {:?}", band_id, band.band_type());
        if let Some(nd) = band.no_data_value() { print!(" nodata={nd}") }
        println!();
        if ARGS.meta { show_meta( &band, 4) }
    }

    Ok(())
}

fn show_meta<M> (meta: &M, level: usize) where M: Metadata {
    let indent = " ".repeat(level);

    for domain in meta.metadata_domains() {
        if let Some(items) = meta.metadata_domain( &domain) {
            if !items.is_empty() {
                println!("{}domain: {}", indent, domain);
                for item in &items {
                    println!("{}    {}", indent, item);
                }
            }
        }
    }
}
