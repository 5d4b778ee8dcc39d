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
use geochip_chips::{load_config, ChipsConfig, CONFIG_FILE, index::{chip_extent_index, IndexBackend}};

define_cli! { ARGS [about="chip_index - write the chip manifest and build a footprint index of all chips in a directory"] =
    out_file: Option<String> [help="name of index file within out_dir (default: chip_extents.shp)", short, long],
    in_process: bool [help="compute footprints in-process instead of running gdaltindex", long],
    skip_different_crs: bool [help="in-process index leaves out chips with a CRS that differs from the first chip", long],
    cmd: Option<String> [help="external index command (default: gdaltindex)", long],

    in_dir: String [help="directory with .tif chips"],
    out_dir: String [help="output directory for manifest and index"]
}

fn main ()->Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let config: ChipsConfig = load_config( CONFIG_FILE)?;
    let out_file = ARGS.out_file.clone().unwrap_or( config.index_file.clone());

    let backend = if ARGS.in_process {
        IndexBackend::InProcess { skip_different_crs: ARGS.skip_different_crs }
    } else if let Some(cmd) = &ARGS.cmd {
        IndexBackend::External { cmd: cmd.clone() }
    } else {
        config.index_backend.clone()
    };

    let report = chip_extent_index( &ARGS.in_dir, &ARGS.out_dir, &out_file, &backend)?;

    println!("manifest: {:?} ({} chips)", report.manifest, report.n_chips);
    match report.n_indexed {
        Some(n) => println!("index:    {:?} ({} features)", report.index, n),
        None => println!("index:    {:?}", report.index)
    }
    for path in &report.other_crs {
        println!("other CRS: {:?}", path);
    }
    for path in &report.skipped {
        println!("skipped:  {:?}", path);
    }
    Ok(())
}
