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

//! explicit Earth Engine REST session. There is no process wide state - callers create a session
//! from an [`EeConfig`] and pass it to the operations that need it

use std::{env, process::Command, time::Duration};
use reqwest::Client;
use serde::{Serialize,Deserialize};
use serde_json::Value;
use tracing::{debug,info};

use geochip_common::process::exec_stdout;
use crate::{
    errors::{Result, GeochipGeeError},
    s1::{export_request_with, ExportImageRequest, ExportSettings, S1CompositeRequest}
};

pub const DEFAULT_BASE_URL: &'static str = "https://earthengine.googleapis.com/v1";

/// where the OAuth2 access token comes from
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum Credentials {
    AccessToken(String),
    /// name of environment variable that holds the token
    Env(String),
    /// gcloud executable, the token is obtained with `<cmd> auth print-access-token`
    GcloudCli(String),
}

impl Credentials {
    pub fn access_token (&self) -> Result<String> {
        let token = match self {
            Credentials::AccessToken(token) => token.clone(),
            Credentials::Env(var) => env::var(var).map_err(|_| GeochipGeeError::NoCredentials( format!("{var} not set")))?,
            Credentials::GcloudCli(cmd) => exec_stdout( Command::new(cmd).args(["auth", "print-access-token"]))?,
        };

        let token = token.trim().to_string();
        if token.is_empty() { return Err( GeochipGeeError::NoCredentials( format!("empty access token from {self:?}"))) }
        Ok(token)
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct EeConfig {
    /// cloud project that owns the export jobs
    pub project: String,
    pub base_url: String,
    pub credentials: Credentials,
    pub export: ExportSettings,
    pub timeout_secs: u64,
}

/// handle of a submitted export. We don't poll it
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ExportTask {
    /// operation name ("projects/<project>/operations/<id>")
    pub name: String,
    pub description: String,
}

#[derive(Deserialize)]
struct Operation {
    name: String,
    #[serde(default)]
    metadata: Value,
}

pub struct EeSession {
    project: String,
    base_url: String,
    token: String,
    export: ExportSettings,
    client: Client,
}

impl EeSession {
    /// obtain the access token and set up the http client
    pub fn initialize (config: &EeConfig) -> Result<Self> {
        let token = config.credentials.access_token()?;
        let client = Client::builder().timeout( Duration::from_secs( config.timeout_secs)).build()?;
        debug!("initialized Earth Engine session for project {}", config.project);

        Ok( EeSession {
            project: config.project.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
            export: config.export.clone(),
            client
        })
    }

    pub fn project (&self) -> &str { &self.project }

    pub fn export_settings (&self) -> &ExportSettings { &self.export }

    pub fn export_url (&self) -> String {
        format!("{}/projects/{}/image:export", self.base_url, self.project)
    }

    /// single POST of the export request. Non-success responses are returned as errors that include
    /// the response body
    pub async fn submit_image_export (&self, request: &ExportImageRequest) -> Result<ExportTask> {
        let url = self.export_url();
        debug!("POST {url}");

        let response = self.client.post( &url)
            .bearer_auth( &self.token)
            .json( request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err( GeochipGeeError::ExportRejected( status.as_u16(), body))
        }

        let op: Operation = serde_json::from_str( &body)?;
        let description = op.metadata.get("description")
            .and_then( |v| v.as_str())
            .unwrap_or( request.description.as_str())
            .to_string();

        Ok( ExportTask { name: op.name, description } )
    }
}

/// build and submit the Sentinel-1 composite export. Returns as soon as the job is accepted
pub async fn export_s1 (session: &EeSession, req: &S1CompositeRequest) -> Result<ExportTask> {
    let request = export_request_with( req, session.export_settings())?;
    let task = session.submit_image_export( &request).await?;
    info!("exported {} to {} ({})", req.out_file_name, session.export_settings().folder, task.name);
    Ok(task)
}
