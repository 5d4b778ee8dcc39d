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
use geo::Area;
use gdal::raster::Buffer;
use gdal::vector::OGRFieldType;
use geochip_gdal::*;

// run with "cargo test --test test_gdal -- --nocapture"

const EPSG: u32 = 32633;

/// a 100 x 80 single band byte raster with 10m pixels, upper left at (500000,4000000)
fn create_raster (path: &Path) -> Dataset {
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut ds = driver.create_with_band_type::<u8,_>( path, 100, 80, 1).unwrap();
    ds.set_geo_transform( &[500000.0, 10.0, 0.0, 4000000.0, 0.0, -10.0]).unwrap();
    ds.set_spatial_ref( &SpatialRef::from_epsg(EPSG).unwrap()).unwrap();

    let data: Vec<u8> = (0..100*80).map( |i| (i % 251) as u8).collect();
    let mut buf = Buffer::new( (100,80), data);
    ds.rasterband(1).unwrap().write( (0,0), (100,80), &mut buf).unwrap();
    ds.flush_cache().unwrap();
    ds
}

#[test]
fn test_driver_lookup() {
    assert_eq!( get_driver_name_from_path("a/b/chip.tif"), Some("GTiff"));
    assert_eq!( get_driver_name_from_path("grid.shp"), Some(SHAPEFILE_DRIVER));
    assert_eq!( get_driver_name_from_path("grid.xyz"), None);
    assert!( get_driver_from_path("grid.xyz").is_err());
}

#[test]
fn test_raster_info() {
    let tmp = tempfile::tempdir().unwrap();
    let ds = create_raster( &tmp.path().join("src.tif"));

    let info = get_raster_info( &ds).unwrap();
    assert_eq!( info.size(), (100,80));
    let bbox = info.bounds();
    assert_eq!( bbox.west, 500000.0);
    assert_eq!( bbox.east, 501000.0);
    assert_eq!( bbox.north, 4000000.0);
    assert_eq!( bbox.south, 3999200.0);

    let srs = get_srs( &ds).unwrap();
    assert_eq!( crs_string( &srs).unwrap(), "EPSG:32633");

    let fp = footprint( &ds).unwrap();
    assert_eq!( fp.unsigned_area(), 1000.0 * 800.0);
}

#[test]
fn test_translate_window() {
    let tmp = tempfile::tempdir().unwrap();
    let ds = create_raster( &tmp.path().join("src.tif"));

    let win = SrcWindow::square( 20, 30, 16);
    assert!( !win.exceeds( 100, 80));
    let chip = translate_window( &ds, &win, &tmp.path().join("chip.tif"), &[]).unwrap();

    assert_eq!( chip.raster_size(), (16,16));
    let gt = chip.geo_transform().unwrap();
    assert_eq!( gt[0], 500000.0 + 20.0 * 10.0);
    assert_eq!( gt[3], 4000000.0 - 30.0 * 10.0);
    assert_eq!( crs_string( &get_srs(&chip).unwrap()).unwrap(), "EPSG:32633");

    // pixel values are copied from the window
    let buf = chip.rasterband(1).unwrap().read_as::<u8>( (0,0), (1,1), (1,1), None).unwrap();
    assert_eq!( buf.data()[0], ((30*100 + 20) % 251) as u8);
}

#[test]
fn test_translate_window_past_edge() {
    let tmp = tempfile::tempdir().unwrap();
    let ds = create_raster( &tmp.path().join("src.tif"));

    let win = SrcWindow::square( 90, 0, 16);
    assert!( win.exceeds( 100, 80));
    let chip = translate_window( &ds, &win, &tmp.path().join("edge.tif"), &[]).unwrap();
    assert_eq!( chip.raster_size(), (16,16));
}

#[test]
fn test_polygon_layer() {
    let tmp = tempfile::tempdir().unwrap();
    let shp = tmp.path().join("cells.shp");
    let src = create_raster( &tmp.path().join("src.tif"));
    let srs = get_srs( &src).unwrap();
    let fp = footprint( &src).unwrap();

    {
        let mut ds = create_vector_dataset( &shp).unwrap();
        let layer = create_polygon_layer( &mut ds, "cells", Some(&srs), &[("location", OGRFieldType::OFTString), ("area", OGRFieldType::OFTReal)]).unwrap();
        write_polygon_feature( &layer, &fp, &[
            ("location", FieldValue::StringValue("a_rather_long_location_name_that_exceeds_the_default_shapefile_width_of_eighty_characters.tif".into())),
            ("area", FieldValue::RealValue( fp.unsigned_area()))
        ]).unwrap();
    }

    let ds = Dataset::open( &shp).unwrap();
    let mut layer = ds.layer(0).unwrap();
    assert_eq!( layer.feature_count(), 1);

    let layer_srs = layer.spatial_ref().unwrap();
    assert_eq!( layer_srs.to_proj4().unwrap().trim(), srs.to_proj4().unwrap().trim());

    for f in layer.features() {
        let loc = f.field_as_string( f.field_index("location").unwrap()).unwrap().unwrap();
        assert!( loc.ends_with("eighty_characters.tif"));
        let area = f.field_as_double( f.field_index("area").unwrap()).unwrap().unwrap();
        assert_eq!( area, 800000.0);
    }

    // re-creating replaces the old dataset
    let ds = create_vector_dataset( &shp).unwrap();
    assert_eq!( ds.layer_count(), 0);
}
