/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
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

pub mod errors;

use lazy_static::lazy_static;
use std::{collections::HashMap, ffi::CString, os::raw::c_int, path::Path, ptr::null_mut};
use geo_types::{LineString, Polygon};
use tracing::debug;

// we re-export these so that other crates don't need a direct gdal dependency to import
pub use gdal::{self, Driver, DriverManager, Dataset, Metadata, GeoTransform, GeoTransformEx, errors::GdalError};
pub use gdal::spatial_ref::SpatialRef;
pub use gdal::vector::{Layer, LayerAccess, FieldValue};

use gdal::cpl::CslStringList;
use gdal::vector::{Feature, FieldDefn, LayerOptions, ToGdal};
use gdal_sys::{OGRFieldType, OGRwkbGeometryType};

use geochip_common::{BoundingBox, fs::extension};
use crate::errors::{Result, GeochipGdalError, op_failed, last_gdal_error};

pub const SHAPEFILE_DRIVER: &'static str = "ESRI Shapefile";
pub const GTIFF_DRIVER: &'static str = "GTiff";

const MAX_STRING_FIELD_WIDTH: i32 = 254;

lazy_static! {
    // we can't populate this by iterating over DriverManager since some drivers share extensions
    static ref EXT_MAP: HashMap<&'static str, &'static str> = HashMap::from( [ // file extension -> driver short name
        //--- raster drivers
        ("tif", GTIFF_DRIVER),
        ("tiff", GTIFF_DRIVER),
        ("vrt", "VRT"),
        ("png", "PNG"),

        //--- vector drivers
        ("shp", SHAPEFILE_DRIVER),
        ("json", "GeoJSON"),
        ("geojson", "GeoJSON"),
        ("gpkg", "GPKG"),
        ("kml", "KML"),
    ]);
}

/// Note that filename extension has to be lower case
pub fn get_driver_name_for_extension (ext: &str) -> Option<&'static str> {
    EXT_MAP.get( ext).map(|v| &**v)
}

pub fn get_driver_name_from_path (path: impl AsRef<Path>) -> Option<&'static str> {
    extension(&path.as_ref()).and_then( get_driver_name_for_extension)
}

pub fn get_driver_from_path (path: impl AsRef<Path>) -> Result<Driver> {
    let path = path.as_ref();
    let name = get_driver_name_from_path(path).ok_or( GeochipGdalError::UnsupportedFormat( format!("{path:?}")))?;
    Ok( DriverManager::get_driver_by_name(name)? )
}

pub fn ok_mut_non_null <R,F> (ptr: *mut R, err: F) -> Result<*mut R> where F: FnOnce()->String {
    if !ptr.is_null() { Ok(ptr) } else { Err( op_failed(err())) }
}

pub fn to_csl_string_list (strings: &[String]) -> Result<CslStringList> {
    let mut list = CslStringList::new();
    for s in strings {
        list.add_string(s.as_str())?;
    }
    Ok(list)
}

pub fn open_raster (path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let ds = Dataset::open(path)?;
    if ds.raster_count() == 0 {
        return Err( op_failed( format!("no raster bands in {path:?}")))
    }
    Ok(ds)
}

/* #region raster info ********************************************************************************************/

#[derive(Debug,Clone,PartialEq)]
pub struct RasterInfo {
    pub cols: usize,
    pub left: f64,
    pub right: f64,
    pub dx: f64,

    pub rows: usize,
    pub top: f64,
    pub bottom: f64,
    pub dy: f64
}

impl RasterInfo {
    /// axis aligned bounds in the CRS of the raster (ignores rotation terms)
    pub fn bounds (&self) -> BoundingBox<f64> {
        BoundingBox::new( self.left.min(self.right), self.bottom.min(self.top), self.left.max(self.right), self.bottom.max(self.top))
    }

    pub fn size (&self) -> (usize,usize) { (self.cols, self.rows) }
}

pub fn get_raster_info (ds: &Dataset)->Result<RasterInfo> {
    let (cols,rows) = ds.raster_size();
    let a = ds.geo_transform()?;

    let left = a[0];
    let dx = a[1];
    let right = left + (dx * cols as f64);

    let top = a[3];
    let dy = a[5];
    let bottom = top + (dy * rows as f64);

    Ok( RasterInfo { cols, left, right, dx, rows, top, bottom, dy } )
}

/// the spatial reference of a dataset, which has to be set
pub fn get_srs (ds: &Dataset) -> Result<SpatialRef> {
    if ds.projection().is_empty() {
        return Err( GeochipGdalError::NoSpatialRef( ds.description().unwrap_or_default()))
    }
    Ok( ds.spatial_ref()? )
}

/// short CRS designation ("EPSG:27700") if the SRS has an authority, WKT otherwise
pub fn crs_string (srs: &SpatialRef) -> Result<String> {
    match (srs.auth_name(), srs.auth_code()) {
        (Ok(name), Ok(code)) => Ok( format!("{name}:{code}")),
        _ => Ok( srs.to_wkt()? )
    }
}

/// the pixel footprint of a dataset as a closed polygon in its CRS.
/// Corners are computed through the full geotransform so rotated rasters are handled
pub fn footprint (ds: &Dataset) -> Result<Polygon<f64>> {
    let (cols,rows) = ds.raster_size();
    let gt = ds.geo_transform()?;
    let (w, h) = (cols as f64, rows as f64);

    let ring: Vec<(f64,f64)> = [(0.0,0.0), (w,0.0), (w,h), (0.0,h), (0.0,0.0)].iter()
        .map( |&(px,py)| gt.apply( px, py))
        .collect();

    Ok( Polygon::new( LineString::from(ring), vec![]) )
}

/* #endregion raster info */

/* #region translate **********************************************************************************************/

struct TranslateOptions {
    options: *mut gdal_sys::GDALTranslateOptions,
}

impl TranslateOptions {
    fn new (opts: &[String]) -> Result<Self> {
        let list = to_csl_string_list(opts)?;
        let options = unsafe { gdal_sys::GDALTranslateOptionsNew( list.as_ptr(), null_mut()) };
        let options = ok_mut_non_null( options, || format!("invalid translate options {opts:?}"))?;
        Ok( TranslateOptions { options } )
    }
}

impl Drop for TranslateOptions {
    fn drop (&mut self) {
        unsafe { gdal_sys::GDALTranslateOptionsFree( self.options); }
    }
}

/// in-process equivalent of running `gdal_translate <options> <src> <out_path>`
pub fn translate (ds: &Dataset, out_path: &Path, options: &[String]) -> Result<Dataset> {
    let opts = TranslateOptions::new(options)?;
    let c_path = CString::new( out_path.to_string_lossy().as_ref())?;
    let mut usage_error: c_int = 0;

    let h_ds = unsafe { gdal_sys::GDALTranslate( c_path.as_ptr(), ds.c_dataset(), opts.options, &mut usage_error) };
    if usage_error != 0 {
        return Err( op_failed( format!("invalid translate arguments {options:?}")))
    }
    let h_ds = ok_mut_non_null( h_ds, || format!("translate to {out_path:?} failed: {}", last_gdal_error()))?;

    Ok( unsafe { Dataset::from_c_dataset(h_ds) } )
}

/// pixel window of a raster
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct SrcWindow {
    pub col_off: usize,
    pub row_off: usize,
    pub width: usize,
    pub height: usize,
}

impl SrcWindow {
    pub fn square (col_off: usize, row_off: usize, size: usize) -> Self {
        SrcWindow { col_off, row_off, width: size, height: size }
    }

    /// does the window extend past a raster of the given size
    pub fn exceeds (&self, cols: usize, rows: usize) -> bool {
        self.col_off + self.width > cols || self.row_off + self.height > rows
    }
}

/// `-srcwin` translate options for a GeoTIFF output, plus optional `-co` creation options.
/// Windows that extend past the source are filled by GDAL (with nodata if the source has one)
pub fn srcwin_options (win: &SrcWindow, creation_options: &[String]) -> Vec<String> {
    let mut opts: Vec<String> = vec![
        "-of".into(), GTIFF_DRIVER.into(),
        "-srcwin".into(), win.col_off.to_string(), win.row_off.to_string(), win.width.to_string(), win.height.to_string(),
    ];
    for co in creation_options {
        opts.push( "-co".into());
        opts.push( co.clone());
    }
    opts
}

/// write a GeoTIFF of the given source window. The output keeps the CRS of the source, its geotransform
/// is shifted to the window origin
pub fn translate_window (ds: &Dataset, win: &SrcWindow, out_path: &Path, creation_options: &[String]) -> Result<Dataset> {
    debug!("translate window {win:?} -> {out_path:?}");
    translate( ds, out_path, &srcwin_options( win, creation_options))
}

/* #endregion translate */

/* #region vector output ******************************************************************************************/

/// create a new (vector only) dataset for the given path, using the driver that matches its extension.
/// Existing datasets at this path are deleted first
pub fn create_vector_dataset (path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let driver = get_driver_from_path(path)?;

    if path.exists() {
        debug!("replacing existing dataset {path:?}");
        driver.delete(path)?;
    }
    Ok( driver.create_vector_only(path)? )
}

/// create a polygon layer with the given attribute fields in `ds`.
/// String fields get the max shapefile width so that long paths are not truncated
pub fn create_polygon_layer<'a> (ds: &'a mut Dataset, name: &str, srs: Option<&SpatialRef>, fields: &[(&str, OGRFieldType::Type)]) -> Result<Layer<'a>> {
    let layer = ds.create_layer( LayerOptions {
        name,
        srs,
        ty: OGRwkbGeometryType::wkbPolygon,
        ..Default::default()
    })?;
    for (field_name, field_type) in fields {
        let fd = FieldDefn::new( field_name, *field_type)?;
        if *field_type == OGRFieldType::OFTString { fd.set_width( MAX_STRING_FIELD_WIDTH) }
        fd.add_to_layer( &layer)?;
    }
    Ok(layer)
}

/// add a polygon feature with the given attribute values to the layer.
/// Field names have to be defined in the layer
pub fn write_polygon_feature (layer: &Layer, polygon: &Polygon<f64>, attrs: &[(&str, FieldValue)]) -> Result<()> {
    let mut feature = Feature::new( layer.defn())?;
    feature.set_geometry( polygon.to_gdal()?)?;

    for (name, value) in attrs {
        let idx = feature.field_index(name)?;
        match value {
            FieldValue::StringValue(s) => feature.set_field_string( idx, s)?,
            FieldValue::RealValue(v) => feature.set_field_double( idx, *v)?,
            FieldValue::IntegerValue(v) => feature.set_field_integer( idx, *v)?,
            FieldValue::Integer64Value(v) => feature.set_field_integer64( idx, *v)?,
            other => return Err( op_failed( format!("unsupported field value for {name}: {other:?}")))
        }
    }

    feature.create( layer)?;
    Ok(())
}

/* #endregion vector output */
