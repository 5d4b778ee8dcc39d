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

use tokio::{io::{AsyncReadExt, AsyncWriteExt}, net::TcpListener, task::JoinHandle};
use geochip_common::BoundingBox;
use geochip_gee::{export_s1, Credentials, EeConfig, EeSession, ExportSettings, S1CompositeRequest, errors::GeochipGeeError};

// run with "cargo test --test test_session -- --nocapture"

/// accept a single connection, answer with the given status and JSON body and return the raw request
async fn serve_once (status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn( async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let request = read_request( &mut sock).await;

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        sock.write_all( response.as_bytes()).await.unwrap();
        sock.shutdown().await.ok();
        request
    });

    (format!("http://{addr}/v1"), handle)
}

async fn read_request (sock: &mut tokio::net::TcpStream) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = sock.read( &mut chunk).await.unwrap();
        if n == 0 { break }
        buf.extend_from_slice( &chunk[..n]);

        if let Some(pos) = buf.windows(4).position( |w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy( &buf[..pos]).to_lowercase();
            let content_len = head.lines()
                .filter_map( |l| l.split_once(':'))
                .find( |(k,_)| k.trim() == "content-length")
                .and_then( |(_,v)| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= pos + 4 + content_len { break }
        }
    }

    String::from_utf8_lossy( &buf).to_string()
}

fn test_config (base_url: String) -> EeConfig {
    EeConfig {
        project: "test-project".into(),
        base_url,
        credentials: Credentials::AccessToken("test-token".into()),
        export: ExportSettings::default(),
        timeout_secs: 10,
    }
}

fn scotland_request() -> S1CompositeRequest {
    S1CompositeRequest::new( "2019-07-01", "2019-08-01", BoundingBox::new( -5.5, 57.9, -3.0, 58.6), "s1_july_2019")
}

#[tokio::test]
async fn test_export_accepted() {
    let (base_url, server) = serve_once( "200 OK",
        r#"{"name":"projects/test-project/operations/ABCDEF","metadata":{"state":"PENDING","description":"s1_july_2019"}}"#).await;

    let session = EeSession::initialize( &test_config( base_url)).unwrap();
    assert_eq!( session.project(), "test-project");

    let task = export_s1( &session, &scotland_request()).await.unwrap();
    assert_eq!( task.name, "projects/test-project/operations/ABCDEF");
    assert_eq!( task.description, "s1_july_2019");

    let request = server.await.unwrap();
    println!("{request}");
    assert!( request.starts_with("POST /v1/projects/test-project/image:export HTTP/1.1"));

    let lc = request.to_lowercase();
    assert!( lc.contains("authorization: bearer test-token"));
    assert!( lc.contains("content-type: application/json"));
    assert!( request.contains(r#""maxPixels":"10000000000""#));
    assert!( request.contains(r#""fileFormat":"GEO_TIFF""#));
}

#[tokio::test]
async fn test_export_rejected() {
    let (base_url, server) = serve_once( "400 Bad Request",
        r#"{"error":{"code":400,"message":"Invalid project","status":"INVALID_ARGUMENT"}}"#).await;

    let session = EeSession::initialize( &test_config( base_url)).unwrap();
    let res = export_s1( &session, &scotland_request()).await;
    match res {
        Err(GeochipGeeError::ExportRejected(status, body)) => {
            assert_eq!( status, 400);
            assert!( body.contains("Invalid project"));
        }
        other => panic!("unexpected result {other:?}")
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_invalid_request_is_not_sent() {
    let session = EeSession::initialize( &test_config( "http://127.0.0.1:9/v1".into())).unwrap();
    let mut req = scotland_request();
    req.date_to = "2019-06-01".into();

    let res = export_s1( &session, &req).await;
    assert!( matches!( res, Err(GeochipGeeError::InvalidArgument(_))));
}

#[test]
fn test_export_url() {
    let session = EeSession::initialize( &test_config( "https://example.com/v1/".into())).unwrap();
    assert_eq!( session.export_url(), "https://example.com/v1/projects/test-project/image:export");
}

#[test]
fn test_credentials() {
    assert_eq!( Credentials::AccessToken(" tok\n".into()).access_token().unwrap(), "tok");
    assert!( matches!( Credentials::AccessToken("".into()).access_token(), Err(GeochipGeeError::NoCredentials(_))));
    assert!( matches!( Credentials::Env("GEOCHIP_TEST_NO_SUCH_TOKEN".into()).access_token(), Err(GeochipGeeError::NoCredentials(_))));
    assert!( matches!( Credentials::GcloudCli("geochip-no-such-gcloud".into()).access_token(), Err(GeochipGeeError::CommonError(_))));
}

#[cfg(unix)]
#[test]
fn test_cli_credentials() {
    // echo stands in for gcloud and prints its arguments
    let token = Credentials::GcloudCli("echo".into()).access_token().unwrap();
    assert_eq!( token, "auth print-access-token");
}
