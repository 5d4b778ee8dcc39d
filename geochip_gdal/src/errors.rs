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

use std::ffi::CStr;
use thiserror::Error;
use gdal::errors::GdalError;

pub type Result<T> = std::result::Result<T, GeochipGdalError>;

#[derive(Error,Debug)]
pub enum GeochipGdalError {
    #[error("GDAL error {0}")]
    GdalError( #[from] GdalError),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("invalid C string {0}")]
    NulError( #[from] std::ffi::NulError),

    #[error("no driver for {0}")]
    UnsupportedFormat(String),

    #[error("no spatial reference in {0}")]
    NoSpatialRef(String),

    #[error("GDAL operation failed {0}")]
    OpFailed(String),
}

pub fn op_failed (msg: impl ToString)->GeochipGdalError {
    GeochipGdalError::OpFailed(msg.to_string())
}

/// turn the last error GDAL recorded for this thread into an OpFailed
pub fn last_gdal_error ()->GeochipGdalError {
    let msg = unsafe {
        let p = gdal_sys::CPLGetLastErrorMsg();
        if p.is_null() { String::new() } else { CStr::from_ptr(p).to_string_lossy().to_string() }
    };
    unsafe { gdal_sys::CPLErrorReset(); }

    if msg.is_empty() { op_failed("unknown GDAL error") } else { op_failed(msg) }
}
