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
use geochip_common::{define_cli, check_cli, init_tracing, BoundingBox};
use geochip_gee::{load_config, export_s1, export_request_with, EeConfig, EeSession, S1CompositeRequest, CONFIG_FILE};

define_cli! { ARGS [about="export_s1 - submit a Sentinel-1 VV/VH composite export (ascending and descending passes) to Drive"] =
    crs: String [help="CRS of exported image", long, default_value="EPSG:27700"],
    project: Option<String> [help="Earth Engine cloud project (overrides config)", long],
    dry_run: bool [help="only print the export request JSON", long],

    date_from: String [help="start date (yyyy-MM-dd)"],
    date_to: String [help="end date, exclusive (yyyy-MM-dd)"],
    west: f64 [help="west boundary (lon degrees)", allow_hyphen_values=true],
    south: f64 [help="south boundary (lat degrees)", allow_hyphen_values=true],
    east: f64 [help="east boundary (lon degrees)", allow_hyphen_values=true],
    north: f64 [help="north boundary (lat degrees)", allow_hyphen_values=true],
    out_file_name: String [help="name of exported GeoTIFF"]
}

#[tokio::main]
async fn main ()->Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let mut config: EeConfig = load_config( CONFIG_FILE)?;
    if let Some(project) = &ARGS.project { config.project = project.clone() }

    let region = BoundingBox::new( ARGS.west, ARGS.south, ARGS.east, ARGS.north);
    let req = S1CompositeRequest::new( &ARGS.date_from, &ARGS.date_to, region, &ARGS.out_file_name).with_crs( &ARGS.crs);

    if ARGS.dry_run {
        let request = export_request_with( &req, &config.export)?;
        println!("{}", serde_json::to_string_pretty( &request)?);
        return Ok(())
    }

    let session = EeSession::initialize( &config)?;
    let task = export_s1( &session, &req).await?;
    println!("submitted {} as {}", task.description, task.name);
    Ok(())
}
