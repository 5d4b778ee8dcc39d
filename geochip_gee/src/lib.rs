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
pub mod expr;
pub mod image;
pub mod s1;
pub mod session;

use geochip_common::define_load_config;

pub use expr::{Expr, Expression};
pub use image::{Filter, Geometry, Image, ImageCollection};
pub use s1::{s1_composite, export_request, export_request_with, ExportImageRequest, ExportSettings, S1CompositeRequest, COMPOSITE_BANDS};
pub use session::{export_s1, Credentials, EeConfig, EeSession, ExportTask};

define_load_config!{}

pub const CONFIG_FILE: &'static str = "gee.ron";
