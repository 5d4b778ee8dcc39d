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

pub mod errors;
pub mod chip;
pub mod index;
pub mod grid;

use serde::{Serialize,Deserialize};
use geochip_common::define_load_config;

use chip::{ChipOptions, EdgePolicy, SimpleChipMode, DEFAULT_CHIP_OFFSET, DEFAULT_CHIP_SIZE, DEFAULT_SIMPLE_CHIP_SIZE, DEFAULT_SIMPLE_PREFIX};
use index::{IndexBackend, DEFAULT_INDEX_FILE};
use grid::CellIdMode;

define_load_config!{}

pub const CONFIG_FILE: &'static str = "chips.ron";

/// defaults for the chip tools. Command line arguments override these
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ChipsConfig {
    pub chip_size: usize,
    pub chip_offset: usize,
    pub edge_policy: EdgePolicy,
    pub creation_options: Vec<String>,

    pub simple_chip_size: usize,
    pub simple_prefix: String,
    pub simple_mode: SimpleChipMode,

    pub index_file: String,
    pub index_backend: IndexBackend,

    pub grid_id_mode: CellIdMode,
}

impl ChipsConfig {
    pub fn chip_options (&self) -> ChipOptions {
        ChipOptions {
            size: self.chip_size,
            offset: self.chip_offset,
            edge_policy: self.edge_policy,
            prefix: None,
            creation_options: self.creation_options.clone()
        }
    }
}

impl Default for ChipsConfig {
    fn default() -> Self {
        ChipsConfig {
            chip_size: DEFAULT_CHIP_SIZE,
            chip_offset: DEFAULT_CHIP_OFFSET,
            edge_policy: EdgePolicy::default(),
            creation_options: Vec::new(),
            simple_chip_size: DEFAULT_SIMPLE_CHIP_SIZE,
            simple_prefix: DEFAULT_SIMPLE_PREFIX.to_string(),
            simple_mode: SimpleChipMode::default(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
            index_backend: IndexBackend::default(),
            grid_id_mode: CellIdMode::default(),
        }
    }
}
