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

use chrono::NaiveDate;

use crate::errors::{parse_error, Result};

pub const YMD_FORMAT: &'static str = "%Y-%m-%d";

/// parse a "yyyy-MM-dd" date
pub fn parse_ymd (s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str( s.trim(), YMD_FORMAT).map_err(|e| parse_error( format!("invalid date '{s}': {e}")))
}
