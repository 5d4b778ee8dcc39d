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
#![cfg(unix)]

use std::process::Command;
use geochip_common::{GeochipCommonError, process::{exec_checked, exec_stdout}};

#[test]
fn test_successful_command() {
    let out = exec_checked( Command::new("sh").arg("-c").arg("echo hello; echo warn 1>&2")).unwrap();
    assert!( out.status.success());
    assert_eq!( out.stdout.trim(), "hello");
    assert_eq!( out.stderr.trim(), "warn");

    let s = exec_stdout( Command::new("sh").arg("-c").arg("echo '  trimmed  '")).unwrap();
    assert_eq!( s, "trimmed");
}

#[test]
fn test_nonzero_exit_is_error() {
    let res = exec_checked( Command::new("sh").arg("-c").arg("echo 'no such file' 1>&2; exit 3"));
    match res {
        Err(GeochipCommonError::ExitStatusError(program, status, stderr)) => {
            assert_eq!( program, "sh");
            assert!( status.contains("3"), "unexpected status {status}");
            assert_eq!( stderr, "no such file");
        }
        other => panic!("expected exit status error, got {other:?}")
    }
}

#[test]
fn test_missing_program_is_error() {
    let res = exec_checked( &mut Command::new("geochip-no-such-program-xyz"));
    assert!( matches!( res, Err(GeochipCommonError::SpawnError(..))));
}
