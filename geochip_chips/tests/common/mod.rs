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

use std::path::Path;
use geochip_gdal::{Dataset, DriverManager, SpatialRef, gdal::raster::Buffer};

pub const EPSG: u32 = 32633;

/// create a single band byte GeoTIFF of the given size with 1 CRS unit pixels and its
/// upper left corner at (x0,y0)
pub fn create_raster (path: &Path, width: usize, height: usize, x0: f64, y0: f64) -> Dataset {
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut ds = driver.create_with_band_type::<u8,_>( path, width, height, 1).unwrap();
    ds.set_geo_transform( &[x0, 1.0, 0.0, y0, 0.0, -1.0]).unwrap();
    ds.set_spatial_ref( &SpatialRef::from_epsg(EPSG).unwrap()).unwrap();

    let data: Vec<u8> = (0..width*height).map( |i| (i % 251) as u8).collect();
    let mut buf = Buffer::new( (width,height), data);
    ds.rasterband(1).unwrap().write( (0,0), (width,height), &mut buf).unwrap();
    ds.flush_cache().unwrap();
    ds
}
