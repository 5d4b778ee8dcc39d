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

mod common;

use std::fs;
use geochip_common::fs::filename;
use geochip_chips::{chip::*, errors::GeochipChipsError};
use geochip_gdal::{Dataset, open_raster, get_raster_info};

// run with "cargo test --test test_chip -- --nocapture"

#[test]
fn test_lattice_count() {
    // cols 0,16,..,96 (7) x rows 48,32,16 (3)
    let windows = chip_offsets( 100, 80, 32, 16, EdgePolicy::Pad).unwrap();
    assert_eq!( windows.len(), 7 * 3);
    assert_eq!( windows.len(), 100usize.div_ceil(16) * ((80 - 32) / 16));
    assert!( windows.iter().all( |w| w.size == 32));

    // columns are the outer loop, rows go upwards from the bottom of the usable range
    assert_eq!( windows[0], ChipWindow { col_off: 0, row_off: 48, size: 32 });
    assert_eq!( windows[1], ChipWindow { col_off: 0, row_off: 32, size: 32 });
    assert_eq!( windows[2], ChipWindow { col_off: 0, row_off: 16, size: 32 });
    assert_eq!( windows[3], ChipWindow { col_off: 16, row_off: 48, size: 32 });

    // row 0 is not a window origin
    assert!( windows.iter().all( |w| w.row_off > 0));
}

#[test]
fn test_lattice_uneven_rows() {
    // rows 50, 30, 10 - the last step does not land on 0
    let windows = chip_offsets( 20, 100, 50, 20, EdgePolicy::Pad).unwrap();
    let rows: Vec<usize> = windows.iter().filter( |w| w.col_off == 0).map( |w| w.row_off).collect();
    assert_eq!( rows, vec![50, 30, 10]);
}

#[test]
fn test_lattice_skip_edges() {
    // cols 0,16,32,48,64 fit, 80 and 96 would run past 100
    let windows = chip_offsets( 100, 80, 32, 16, EdgePolicy::Skip).unwrap();
    assert_eq!( windows.len(), 5 * 3);
    assert!( windows.iter().all( |w| w.col_off + w.size <= 100));
}

#[test]
fn test_lattice_degenerate() {
    assert!( chip_offsets( 100, 32, 32, 16, EdgePolicy::Pad).unwrap().is_empty());
    assert!( chip_offsets( 100, 10, 32, 16, EdgePolicy::Pad).unwrap().is_empty());
    assert!( chip_offsets( 0, 80, 32, 16, EdgePolicy::Pad).unwrap().is_empty());

    assert!( matches!( chip_offsets( 100, 80, 0, 16, EdgePolicy::Pad), Err(GeochipChipsError::InvalidArgument(_))));
    assert!( matches!( chip_offsets( 100, 80, 32, 0, EdgePolicy::Pad), Err(GeochipChipsError::InvalidArgument(_))));
}

#[test]
fn test_chip_names() {
    let win = ChipWindow { col_off: 64, row_off: 192, size: 128 };
    assert_eq!( chip_filename( "/data/scenes/scene_01.tif", &win).unwrap(), "scene_01_64_192.tif");

    // column in chip units, distance from raster bottom in pixels
    let win = ChipWindow { col_off: 56, row_off: 24, size: 28 };
    assert_eq!( simple_chip_filename( "chip", &win, 80, "scene.tif"), "chip_2_28_scene.tif");

    assert_eq!( "skip".parse::<EdgePolicy>().unwrap(), EdgePolicy::Skip);
    assert!( "clip".parse::<EdgePolicy>().is_err());
}

#[test]
fn test_chip_image() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("scene.tif");
    common::create_raster( &src, 100, 80, 1000.0, 2000.0);
    let out_dir = tmp.path().join("chips");

    let opts = ChipOptions { size: 32, offset: 16, ..ChipOptions::default() };
    let chips = chip_image( &src, &out_dir, &opts).unwrap();
    assert_eq!( chips.len(), 21);
    assert_eq!( fs::read_dir( &out_dir).unwrap().filter( |e| e.as_ref().unwrap().path().extension().map( |x| x == "tif").unwrap_or(false)).count(), 21);
    assert_eq!( filename( &chips[0]), Some("scene_0_48.tif"));

    for chip in &chips {
        let ds = open_raster( chip).unwrap();
        assert_eq!( ds.raster_size(), (32,32));
    }

    // geotransform is shifted to the window origin
    let ds = Dataset::open( out_dir.join("scene_16_32.tif")).unwrap();
    let info = get_raster_info( &ds).unwrap();
    assert_eq!( info.left, 1016.0);
    assert_eq!( info.top, 2000.0 - 32.0);

    // identical inputs produce identical chips
    let first = fs::read( &chips[5]).unwrap();
    let again = chip_image( &src, &out_dir, &opts).unwrap();
    assert_eq!( again, chips);
    assert_eq!( fs::read( &again[5]).unwrap(), first);
}

#[test]
fn test_chip_image_prefix_and_skip() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("scene.tif");
    common::create_raster( &src, 100, 80, 0.0, 80.0);
    let out_dir = tmp.path().join("chips");

    let opts = ChipOptions { size: 32, offset: 16, edge_policy: EdgePolicy::Skip, prefix: Some("s1".into()), creation_options: vec!["COMPRESS=DEFLATE".into()] };
    let chips = chip_image( &src, &out_dir, &opts).unwrap();
    assert_eq!( chips.len(), 15);
    assert_eq!( filename( &chips[0]), Some("s1_scene_0_48.tif"));
}

#[test]
fn test_chip_image_simple() {
    let tmp = tempfile::tempdir().unwrap();
    common::create_raster( &tmp.path().join("scene.tif"), 100, 80, 0.0, 80.0);

    // cols 0,28,56,84 x rows 52,24
    let out_dir = tmp.path().join("all");
    let chips = chip_image_simple( tmp.path(), "scene.tif", &out_dir, 28, "chip", SimpleChipMode::FullLattice).unwrap();
    assert_eq!( chips.len(), 8);
    assert_eq!( filename( &chips[0]), Some("chip_0_0_scene.tif"));
    assert_eq!( filename( &chips[1]), Some("chip_0_28_scene.tif"));
    assert_eq!( filename( &chips[7]), Some("chip_3_28_scene.tif"));

    // the truncated traversal writes exactly one chip
    let out_dir = tmp.path().join("first");
    let chips = chip_image_simple( tmp.path(), "scene.tif", &out_dir, 28, "chip", SimpleChipMode::FirstOnly).unwrap();
    assert_eq!( chips.len(), 1);
    assert_eq!( filename( &chips[0]), Some("chip_0_0_scene.tif"));
    assert_eq!( fs::read_dir( &out_dir).unwrap().count(), 1);
}

#[test]
fn test_missing_source() {
    let tmp = tempfile::tempdir().unwrap();
    let res = chip_image( tmp.path().join("nope.tif"), tmp.path(), &ChipOptions::default());
    assert!( res.is_err());
}
