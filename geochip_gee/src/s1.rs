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

//! Sentinel-1 GRD median composite split by orbit pass

use serde::{Serialize,Deserialize};
use geochip_common::{BoundingBox, datetime::parse_ymd};

use crate::{
    errors::{Result, invalid_arg},
    expr::Expression,
    image::{Filter, Geometry, Image, ImageCollection}
};

pub const S1_COLLECTION: &'static str = "COPERNICUS/S1_GRD";
pub const COMPOSITE_BANDS: [&'static str;6] = ["VVdesc", "VHdesc", "Ratiodesc", "VVasc", "VHasc", "Ratioasc"];

pub const DEFAULT_OUT_CRS: &'static str = "EPSG:27700";
pub const DEFAULT_EXPORT_FOLDER: &'static str = "colab_data";
pub const DEFAULT_EXPORT_SCALE: f64 = 10.0;
pub const DEFAULT_MAX_PIXELS: u64 = 10_000_000_000;

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct S1CompositeRequest {
    /// first day of the composite ("yyyy-MM-dd")
    pub date_from: String,
    /// end of the composite (exclusive, "yyyy-MM-dd")
    pub date_to: String,
    /// lon/lat degrees
    pub region: BoundingBox<f64>,
    pub out_file_name: String,
    pub out_crs: String,
}

impl S1CompositeRequest {
    pub fn new (date_from: &str, date_to: &str, region: BoundingBox<f64>, out_file_name: &str) -> Self {
        S1CompositeRequest {
            date_from: date_from.to_string(),
            date_to: date_to.to_string(),
            region,
            out_file_name: out_file_name.to_string(),
            out_crs: DEFAULT_OUT_CRS.to_string()
        }
    }

    pub fn with_crs (mut self, crs: &str) -> Self {
        self.out_crs = crs.to_string();
        self
    }

    pub fn validate (&self) -> Result<()> {
        let from = parse_ymd( &self.date_from).map_err(|e| invalid_arg( e))?;
        let to = parse_ymd( &self.date_to).map_err(|e| invalid_arg( e))?;
        if from >= to {
            return Err( invalid_arg( format!("empty date range {} - {}", self.date_from, self.date_to)))
        }

        let r = &self.region;
        if !r.is_proper() {
            return Err( invalid_arg( format!("region is not a proper bounding box: {r:?}")))
        }
        if r.west < -180.0 || r.east > 180.0 || r.south < -90.0 || r.north > 90.0 {
            return Err( invalid_arg( format!("region outside of lon/lat range: {r:?}")))
        }

        if self.out_file_name.trim().is_empty() {
            return Err( invalid_arg("no output file name"))
        }
        if self.out_crs.trim().is_empty() {
            return Err( invalid_arg("no output CRS"))
        }
        Ok(())
    }
}

/// export destination settings
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ExportSettings {
    /// Drive folder
    pub folder: String,
    /// meters per pixel
    pub scale: f64,
    pub max_pixels: u64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            folder: DEFAULT_EXPORT_FOLDER.to_string(),
            scale: DEFAULT_EXPORT_SCALE,
            max_pixels: DEFAULT_MAX_PIXELS
        }
    }
}

fn orbit_composite (collection: &ImageCollection, pass: &str, suffix: &str) -> Image {
    let vv = format!("VV{suffix}");
    let vh = format!("VH{suffix}");
    let ratio = format!("Ratio{suffix}");

    let img = collection
        .filter( &Filter::eq( "orbitProperties_pass", pass))
        .median()
        .select( &["VV".to_string(), "VH".to_string()], Some( &[vv.clone(), vh.clone()][..]));

    let ratio_img = img.select( &[vv], None).subtract( &img.select( &[vh], None)).rename( &[ratio]);
    img.add_bands( &ratio_img)
}

/// the six band float composite, bands ordered as [`COMPOSITE_BANDS`]
pub fn s1_composite (req: &S1CompositeRequest) -> Result<Image> {
    req.validate()?;

    let region = Geometry::bbox( &req.region);
    let s1c = ImageCollection::load( S1_COLLECTION)
        .filter_bounds( &region)
        .filter_date( &req.date_from, &req.date_to)
        .filter( &Filter::eq( "transmitterReceiverPolarisation", vec!["VV", "VH"]));

    let asc = orbit_composite( &s1c, "ASCENDING", "asc");
    let desc = orbit_composite( &s1c, "DESCENDING", "desc");

    Ok( asc.add_bands( &desc).select( &COMPOSITE_BANDS, None).to_float() )
}

/* #region export request *****************************************************************************************/

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveDestination {
    pub folder: String,
    pub filename_prefix: String,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileExportOptions {
    pub file_format: String,
    pub drive_destination: DriveDestination,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelGrid {
    pub crs_code: String,
}

/// body of an `image:export` call
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportImageRequest {
    pub expression: Expression,
    pub description: String,
    pub file_export_options: FileExportOptions,
    pub grid: PixelGrid,
    /// int64 values are strings in the REST API
    pub max_pixels: String,
}

/// GeoTIFF export of the composite to Drive, using the default export settings
pub fn export_request (req: &S1CompositeRequest) -> Result<ExportImageRequest> {
    export_request_with( req, &ExportSettings::default())
}

pub fn export_request_with (req: &S1CompositeRequest, settings: &ExportSettings) -> Result<ExportImageRequest> {
    if settings.scale <= 0.0 { return Err( invalid_arg( format!("invalid export scale {}", settings.scale))) }

    let region = Geometry::bbox( &req.region);
    let image = s1_composite( req)?.clip_to_bounds_and_scale( &region, settings.scale);

    Ok( ExportImageRequest {
        expression: Expression::encode( image.expr()),
        description: req.out_file_name.clone(),
        file_export_options: FileExportOptions {
            file_format: "GEO_TIFF".to_string(),
            drive_destination: DriveDestination {
                folder: settings.folder.clone(),
                filename_prefix: req.out_file_name.clone()
            }
        },
        grid: PixelGrid { crs_code: req.out_crs.clone() },
        max_pixels: settings.max_pixels.to_string()
    })
}

/* #endregion export request */
