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

//! running external command line tools with checked exit status

use std::process::{Command,ExitStatus};
use tracing::{debug,info};

use crate::errors::{GeochipCommonError,Result};

/// captured result of a successful command execution
#[derive(Debug)]
pub struct CmdOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

pub fn program_name (cmd: &Command)->String {
    cmd.get_program().to_string_lossy().to_string()
}

/// run the command to completion, capturing stdout and stderr.
/// Failure to spawn and a non-zero exit status are both reported as errors, the latter
/// including the (trimmed) stderr output of the command
pub fn exec_checked (cmd: &mut Command) -> Result<CmdOutput> {
    debug!("executing {cmd:?}");
    let program = program_name(cmd);

    let output = cmd.output().map_err(|e| GeochipCommonError::SpawnError( program.clone(), e.to_string()))?;
    let stdout = String::from_utf8_lossy( &output.stdout).to_string();
    let stderr = String::from_utf8_lossy( &output.stderr).to_string();

    if output.status.success() {
        info!("{program} completed with status {}", output.status);
        Ok( CmdOutput { status: output.status, stdout, stderr } )
    } else {
        Err( GeochipCommonError::ExitStatusError( program, output.status.to_string(), stderr.trim().to_string()) )
    }
}

/// run the command and return its trimmed stdout
pub fn exec_stdout (cmd: &mut Command) -> Result<String> {
    let output = exec_checked(cmd)?;
    Ok( output.stdout.trim().to_string() )
}
