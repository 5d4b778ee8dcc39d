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

use geochip_chips::{load_config, ChipsConfig, CONFIG_FILE, chip::{EdgePolicy, SimpleChipMode}, index::IndexBackend, grid::CellIdMode};

#[test]
fn test_default_config() {
    let config: ChipsConfig = load_config( CONFIG_FILE).unwrap();

    assert_eq!( config.chip_size, 128);
    assert_eq!( config.chip_offset, 64);
    assert_eq!( config.edge_policy, EdgePolicy::Pad);
    assert_eq!( config.simple_chip_size, 28);
    assert_eq!( config.simple_mode, SimpleChipMode::FullLattice);
    assert_eq!( config.index_backend, IndexBackend::External { cmd: "gdaltindex".into() });
    assert_eq!( config.grid_id_mode, CellIdMode::OriginalIndex);

    // the shipped config mirrors the built-in defaults
    assert_eq!( config, ChipsConfig::default());

    let opts = config.chip_options();
    assert_eq!( (opts.size, opts.offset), (128, 64));
}
