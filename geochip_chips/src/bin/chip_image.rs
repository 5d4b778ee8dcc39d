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
use anyhow::Result;
use geochip_common::{define_cli, check_cli, init_tracing};
use geochip_chips::{load_config, ChipsConfig, CONFIG_FILE, chip::{chip_image, chip_image_simple, EdgePolicy, SimpleChipMode}};

define_cli! { ARGS [about="chip_image - slice a raster into fixed size GeoTIFF chips"] =
    size: Option<usize> [help="chip size in pixels", short, long],
    offset: Option<usize> [help="step between chip origins in pixels", short, long],
    edge_policy: Option<EdgePolicy> [help="windows past the right raster edge: pad|skip", long],
    prefix: Option<String> [help="chip filename prefix", long],
    co: Vec<String> [help="GeoTIFF creation option (NAME=VALUE), can be repeated", long, number_of_values=1],

    simple: bool [help="use the simple variant (offset = size, chips named by lattice position)", long],
    first_only: bool [help="simple variant only writes the first chip", long],

    src: String [help="source raster"],
    out_dir: String [help="output directory for chips"]
}

fn main ()->Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let config: ChipsConfig = load_config( CONFIG_FILE)?;

    let chips = if ARGS.simple {
        let src = Path::new( &ARGS.src);
        let src_dir = src.parent().unwrap_or( Path::new("."));
        let src_file = src.file_name().and_then( |f| f.to_str()).ok_or( anyhow::anyhow!("invalid source path {}", ARGS.src))?;
        let size = ARGS.size.unwrap_or( config.simple_chip_size);
        let prefix = ARGS.prefix.clone().unwrap_or( config.simple_prefix.clone());
        let mode = if ARGS.first_only { SimpleChipMode::FirstOnly } else { config.simple_mode };

        chip_image_simple( src_dir, src_file, &ARGS.out_dir, size, &prefix, mode)?

    } else {
        let mut opts = config.chip_options();
        if let Some(size) = ARGS.size { opts.size = size }
        if let Some(offset) = ARGS.offset { opts.offset = offset }
        if let Some(edge_policy) = ARGS.edge_policy { opts.edge_policy = edge_policy }
        if ARGS.prefix.is_some() { opts.prefix = ARGS.prefix.clone() }
        if !ARGS.co.is_empty() { opts.creation_options = ARGS.co.clone() }

        chip_image( &ARGS.src, &ARGS.out_dir, &opts)?
    };

    println!("{} chips written to {}", chips.len(), ARGS.out_dir);
    Ok(())
}
