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

use thiserror::Error;
use geochip_common::GeochipCommonError;

pub type Result<T> = std::result::Result<T, GeochipGeeError>;

#[derive(Error,Debug)]
pub enum GeochipGeeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("http error {0}")]
    HttpError( #[from] reqwest::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("export request rejected with status {0}: {1}")]
    ExportRejected(u16,String),

    #[error("no credentials: {0}")]
    NoCredentials(String),

    #[error("{0}")]
    CommonError( #[from] GeochipCommonError),
}

pub fn invalid_arg (msg: impl ToString)->GeochipGeeError {
    GeochipGeeError::InvalidArgument(msg.to_string())
}
