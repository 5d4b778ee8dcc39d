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

//! vector index of chip footprints

use std::{path::{Path,PathBuf}, process::Command};
use serde::{Serialize,Deserialize};
use tracing::{debug,info,warn};

use geochip_common::{fs::{ensure_writable_dir, files_with_extension, filestem_of_path, path_to_lossy_string, write_lines}, process::exec_checked};
use geochip_gdal::{
    create_polygon_layer, create_vector_dataset, footprint, get_driver_from_path, get_srs, open_raster, write_polygon_feature,
    FieldValue, SpatialRef, gdal::vector::OGRFieldType
};
use crate::{chip::CHIP_EXTENSION, errors::Result};

pub const MANIFEST_FILE: &'static str = "list_chips.txt";
pub const DEFAULT_INDEX_FILE: &'static str = "chip_extents.shp";
pub const DEFAULT_INDEX_CMD: &'static str = "gdaltindex";
pub const LOCATION_FIELD: &'static str = "location";

#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub enum IndexBackend {
    /// run an external `gdaltindex` compatible tool on the manifest
    External { cmd: String },
    /// compute footprints with GDAL in this process. Chips with a CRS that differs from the first chip
    /// are indexed with their native footprint unless `skip_different_crs` is set (`gdaltindex -skip_different_projection`)
    InProcess {
        #[serde(default)]
        skip_different_crs: bool
    }
}

impl IndexBackend {
    pub fn in_process () -> Self {
        IndexBackend::InProcess { skip_different_crs: false }
    }
}

impl Default for IndexBackend {
    fn default() -> Self {
        IndexBackend::External { cmd: DEFAULT_INDEX_CMD.to_string() }
    }
}

#[derive(Debug,Clone)]
pub struct IndexReport {
    pub manifest: PathBuf,
    pub index: PathBuf,
    /// number of chips listed in the manifest
    pub n_chips: usize,
    /// number of features written (only known for the in-process backend)
    pub n_indexed: Option<usize>,
    /// chips whose CRS differs from the first chip (in-process backend only)
    pub other_crs: Vec<PathBuf>,
    /// chips left out of the index, which only happens with `skip_different_crs`
    pub skipped: Vec<PathBuf>,
}

/// all regular files in `dir` with the (case sensitive) extension `ext`, sorted by name
pub fn list_chip_files (dir: impl AsRef<Path>, ext: &str) -> Result<Vec<PathBuf>> {
    Ok( files_with_extension( &dir.as_ref(), ext)? )
}

/// write the manifest (one chip path per line) into `out_dir`
pub fn write_manifest (paths: &[PathBuf], out_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let manifest = out_dir.as_ref().join( MANIFEST_FILE);
    write_lines( &manifest, paths.iter().map( |p| path_to_lossy_string(p)))?;
    debug!("wrote manifest {manifest:?} with {} entries", paths.len());
    Ok(manifest)
}

/// list the chips in `in_dir`, write the manifest and build the footprint index `<out_dir>/<out_file>`.
/// An existing index at this location is replaced
pub fn chip_extent_index (in_dir: impl AsRef<Path>, out_dir: impl AsRef<Path>, out_file: &str, backend: &IndexBackend) -> Result<IndexReport> {
    let in_dir = in_dir.as_ref();
    let out_dir = out_dir.as_ref();
    ensure_writable_dir( out_dir)?;

    let chips = list_chip_files( in_dir, CHIP_EXTENSION)?;
    if chips.is_empty() {
        warn!("no .{CHIP_EXTENSION} files in {in_dir:?}");
    }
    let manifest = write_manifest( &chips, out_dir)?;

    let index = out_dir.join( out_file);
    if index.exists() {
        get_driver_from_path( &index)?.delete( &index)?;
    }

    let (n_indexed, other_crs, skipped) = match backend {
        IndexBackend::External { cmd } => {
            run_index_tool( cmd, &index, &manifest)?;
            (None, Vec::new(), Vec::new())
        }
        IndexBackend::InProcess { skip_different_crs } => {
            let (n, other_crs, skipped) = build_index( &chips, &index, *skip_different_crs)?;
            (Some(n), other_crs, skipped)
        }
    };

    info!("exported chip extents of {} chips to {index:?}", chips.len());
    Ok( IndexReport { manifest, index, n_chips: chips.len(), n_indexed, other_crs, skipped } )
}

fn run_index_tool (cmd: &str, index: &Path, manifest: &Path) -> Result<()> {
    let mut command = Command::new( cmd);
    command.arg( index).arg("--optfile").arg( manifest);
    exec_checked( &mut command)?;
    Ok(())
}

fn build_index (chips: &[PathBuf], index: &Path, skip_different_crs: bool) -> Result<(usize,Vec<PathBuf>,Vec<PathBuf>)> {
    // the index uses the CRS of the first chip, like gdaltindex without -t_srs
    let ref_srs: Option<SpatialRef> = match chips.first() {
        Some(path) => Some( get_srs( &open_raster( path)?)?),
        None => None
    };

    let mut ds = create_vector_dataset( index)?;
    let layer_name = filestem_of_path( index)?;
    let layer = create_polygon_layer( &mut ds, &layer_name, ref_srs.as_ref(), &[(LOCATION_FIELD, OGRFieldType::OFTString)])?;

    let mut n_indexed = 0;
    let mut other_crs: Vec<PathBuf> = Vec::new();
    let mut skipped: Vec<PathBuf> = Vec::new();

    for path in chips {
        let chip = open_raster( path)?;
        if let Some(ref_srs) = &ref_srs {
            if get_srs( &chip)? != *ref_srs {
                other_crs.push( path.clone());
                if skip_different_crs {
                    warn!("skipping {path:?}: CRS differs from index CRS");
                    skipped.push( path.clone());
                    continue;
                }
                warn!("{path:?} has a different CRS than the index, footprint is not reprojected");
            }
        }

        let fp = footprint( &chip)?;
        write_polygon_feature( &layer, &fp, &[(LOCATION_FIELD, FieldValue::StringValue( path_to_lossy_string(path)))])?;
        n_indexed += 1;
    }

    Ok( (n_indexed, other_crs, skipped) )
}
