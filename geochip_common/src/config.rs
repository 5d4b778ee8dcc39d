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

//! RON config file lookup. Configs are searched for in this order:
//!   - `$GEOCHIP_HOME/configs/<crate>/<filename>`
//!   - `$HOME/.geochip/configs/<crate>/<filename>`
//!   - `<crate-manifest-dir>/configs/<filename>` (the defaults that come with the sources)

use std::{env, fs, path::{Path,PathBuf}};
use serde::Deserialize;
use tracing::debug;

use crate::errors::{GeochipCommonError,Result};

pub const CONFIGS: &'static str = "configs";

pub fn find_config_file (resource_crate: &str, crate_dir: &str, filename: &str) -> Option<PathBuf> {
    if let Ok(home) = env::var("GEOCHIP_HOME") {
        let path = Path::new(&home).join(CONFIGS).join(resource_crate).join(filename);
        if path.is_file() { return Some(path) }
    }

    if let Ok(usr_home) = env::var("HOME") {
        let path = Path::new(&usr_home).join(".geochip").join(CONFIGS).join(resource_crate).join(filename);
        if path.is_file() { return Some(path) }
    }

    let path = Path::new(crate_dir).join(CONFIGS).join(filename);
    if path.is_file() { Some(path) } else { None }
}

pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> Deserialize<'a>, P: AsRef<Path> {
    let data = fs::read( path.as_ref())?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

pub fn load_crate_config<C> (resource_crate: &str, crate_dir: &str, filename: &str) -> Result<C> where C: for <'a> Deserialize<'a> {
    if let Some(path) = find_config_file( resource_crate, crate_dir, filename) {
        debug!("loading config {:?}", path);
        load_config_path( &path)
    } else {
        Err( GeochipCommonError::ConfigNotFound( filename.to_string()) )
    }
}

/// this is the macro that needs to be expanded at the top of crates (lib.rs) that define configs.
/// Config users call the defined `load_config(..)` function to instantiate config structs
#[macro_export]
macro_rules! define_load_config {
    () => {
        /// load config using the geochip_common lookup mechanism
        pub fn load_config<C> (filename: &str) -> geochip_common::Result<C> where C: for <'a> serde::Deserialize<'a> {
            geochip_common::config::load_crate_config( env!("CARGO_PKG_NAME"), env!("CARGO_MANIFEST_DIR"), filename)
        }
    }
}
