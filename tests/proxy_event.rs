use std::collections::HashMap;

use common::test_tools::http::constants::{
    RECEIVED_TIMESTAMP_FOR_MOCK_REQUESTS, REQUEST_TIME_FOR_MOCK_REQUESTS,
};
use common::test_tools::http::helpers::{
    build_raw_request, build_stage_context, with_headers, with_json_body, with_text_body,
};
use common::test_tools::jwt::build_unsigned_token;
use model::raw_request::AuthCredentials;
use model::stage::StageContext;
use offline_proxy_event::config::Config;
use offline_proxy_event::event_builder::{
    EventBuilder, AUTHORIZER_OVERRIDE_HEADER, DEFAULT_PRINCIPAL_ID,
};
use rstest::*;
use serde_json::{json, Value};

use crate::helpers::ids::SequentialIds;
use crate::helpers::logger::RecordingLogger;

mod helpers;

#[fixture]
fn ids() -> SequentialIds {
    SequentialIds::default()
}

fn build(config: &Config, ids: &SequentialIds, request: &model::raw_request::RawRequest) -> Value {
    let event = EventBuilder::new(config, ids).build(request, &build_stage_context("/foo/bar"));
    serde_json::to_value(event).unwrap()
}

#[rstest]
fn get_request_matches_gateway_shape(ids: SequentialIds) {
    let request = with_headers(
        build_raw_request("get", "/dev/foo/bar", "/dev/foo/bar"),
        &[("Host", "localhost:3000"), ("User-Agent", "curl/8.0")],
    );

    let event = build(&Config::default(), &ids, &request);

    assert_eq!(
        event,
        json!({
            "body": null,
            "headers": { "Host": "localhost:3000", "User-Agent": "curl/8.0" },
            "httpMethod": "GET",
            "isBase64Encoded": false,
            "multiValueHeaders": { "Host": ["localhost:3000"], "User-Agent": ["curl/8.0"] },
            "multiValueQueryStringParameters": {},
            "path": "/foo/bar",
            "pathParameters": null,
            "queryStringParameters": null,
            "requestContext": {
                "accountId": "offlineContext_accountId",
                "apiId": "offlineContext_apiId",
                "authorizer": { "principalId": DEFAULT_PRINCIPAL_ID },
                "domainName": "offlineContext_domainName",
                "domainPrefix": "offlineContext_domainPrefix",
                "extendedRequestId": "id-1",
                "httpMethod": "GET",
                "identity": {
                    "accessKey": null,
                    "accountId": "offlineContext_accountId",
                    "apiKey": "offlineContext_apiKey",
                    "apiKeyId": "offlineContext_apiKeyId",
                    "caller": "offlineContext_caller",
                    "cognitoAuthenticationProvider": "offlineContext_cognitoAuthenticationProvider",
                    "cognitoAuthenticationType": "offlineContext_cognitoAuthenticationType",
                    "cognitoIdentityId": "offlineContext_cognitoIdentityId",
                    "cognitoIdentityPoolId": "offlineContext_cognitoIdentityPoolId",
                    "principalOrgId": null,
                    "sourceIp": "127.0.0.1",
                    "user": "offlineContext_user",
                    "userAgent": "curl/8.0",
                    "userArn": "offlineContext_userArn"
                },
                "path": "/foo/bar",
                "protocol": "HTTP/1.1",
                "requestId": "id-2",
                "requestTime": REQUEST_TIME_FOR_MOCK_REQUESTS,
                "requestTimeEpoch": RECEIVED_TIMESTAMP_FOR_MOCK_REQUESTS,
                "resourceId": "offlineContext_resourceId",
                "resourcePath": "/dev/foo/bar",
                "stage": "dev"
            },
            "resource": "/foo/bar",
            "stageVariables": null
        })
    );
}

#[rstest]
fn empty_body_injects_nothing(ids: SequentialIds) {
    let request = with_text_body(build_raw_request("POST", "/dev/foo/bar", "/dev/foo/bar"), "");

    let event = build(&Config::default(), &ids, &request);

    assert_eq!(event["body"], Value::Null);
    assert_eq!(event["headers"], json!({}));
}

#[rstest]
fn text_body_gets_content_headers(ids: SequentialIds) {
    let request = with_text_body(
        build_raw_request("POST", "/dev/foo/bar", "/dev/foo/bar"),
        "{\"name\":\"ünïcode\"}",
    );

    let event = build(&Config::default(), &ids, &request);

    assert_eq!(event["body"], "{\"name\":\"ünïcode\"}");
    assert_eq!(event["headers"]["Content-Length"], "20");
    assert_eq!(event["headers"]["Content-Type"], "application/json");
    assert_eq!(event["multiValueHeaders"], Value::Null);
}

#[rstest]
fn json_body_is_passed_as_received(ids: SequentialIds) {
    let request = with_headers(
        with_json_body(
            build_raw_request("PUT", "/dev/foo/bar", "/dev/foo/bar"),
            "{\n  \"a\": 1\n}",
        ),
        &[("content-type", "application/json; charset=utf-8")],
    );

    let event = build(&Config::default(), &ids, &request);

    assert_eq!(event["body"], "{\n  \"a\": 1\n}");
    assert_eq!(event["headers"]["Content-Length"], "12");
    assert_eq!(event["headers"].get("Content-Type"), None);
}

#[rstest]
fn bearer_token_exposes_claims_and_scopes(ids: SequentialIds) {
    let claims = json!({ "sub": "user-1", "scope": "a b c" });
    let bearer = format!("Bearer {}", build_unsigned_token(&claims));
    let request = with_headers(
        build_raw_request("GET", "/dev/foo/bar", "/dev/foo/bar"),
        &[("Authorization", bearer.as_str())],
    );

    let event = build(&Config::default(), &ids, &request);

    assert_eq!(event["requestContext"]["authorizer"]["scopes"], json!(["a", "b", "c"]));
    assert_eq!(event["requestContext"]["authorizer"]["claims"], claims);
}

#[rstest]
fn override_header_replaces_authorizer(ids: SequentialIds) {
    let bearer = format!("Bearer {}", build_unsigned_token(&json!({ "scope": "a" })));
    let mut request = with_headers(
        build_raw_request("GET", "/dev/foo/bar", "/dev/foo/bar"),
        &[
            ("Authorization", bearer.as_str()),
            (AUTHORIZER_OVERRIDE_HEADER, r#"{"x":1}"#),
        ],
    );
    request.auth = Some(AuthCredentials {
        principal_id: Some("someone".to_owned()),
        context: None,
    });

    let event = build(&Config::default(), &ids, &request);

    assert_eq!(event["requestContext"]["authorizer"], json!({ "x": 1 }));
}

#[rstest]
fn override_header_matches_any_casing(ids: SequentialIds) {
    let request = with_headers(
        build_raw_request("GET", "/dev/foo/bar", "/dev/foo/bar"),
        &[("Sls-Offline-Authorizer-Override", r#"{"x":1}"#)],
    );

    let event = build(&Config::default(), &ids, &request);

    assert_eq!(event["requestContext"]["authorizer"], json!({ "x": 1 }));
}

#[rstest]
#[case::request_credentials(Some("from-request"), Some("from-env"), "from-request")]
#[case::environment(None, Some("from-env"), "from-env")]
#[case::fallback(None, None, DEFAULT_PRINCIPAL_ID)]
fn invalid_environment_override_falls_back(
    ids: SequentialIds,
    #[case] request_principal: Option<&str>,
    #[case] env_principal: Option<&str>,
    #[case] expected: &str,
) {
    let mut vars = vec![("AUTHORIZER", "{invalid")];
    vars.extend(env_principal.map(|principal| ("PRINCIPAL_ID", principal)));
    let config = Config::from_pairs(vars).unwrap();
    let mut request = build_raw_request("GET", "/dev/foo/bar", "/dev/foo/bar");
    request.auth = Some(AuthCredentials {
        principal_id: request_principal.map(str::to_owned),
        context: None,
    });
    let logger = RecordingLogger::default();

    let event = EventBuilder::new(&config, &ids)
        .with_logger(&logger)
        .build(&request, &build_stage_context("/foo/bar"));

    assert_eq!(
        serde_json::to_value(&event.request_context.authorizer).unwrap(),
        json!({ "principalId": expected })
    );
    assert_eq!(logger.messages().len(), 1);
    assert!(logger.messages()[0].contains("AUTHORIZER"));
}

#[rstest]
fn failed_header_override_keeps_environment_override(ids: SequentialIds) {
    let config = Config::from_pairs([("AUTHORIZER", r#"{"source":"env"}"#)]).unwrap();
    let request = with_headers(
        build_raw_request("GET", "/dev/foo/bar", "/dev/foo/bar"),
        &[(AUTHORIZER_OVERRIDE_HEADER, "not json")],
    );
    let logger = RecordingLogger::default();

    let event = EventBuilder::new(&config, &ids)
        .with_logger(&logger)
        .build(&request, &build_stage_context("/foo/bar"));

    assert_eq!(
        serde_json::to_value(&event.request_context.authorizer).unwrap(),
        json!({ "source": "env" })
    );
    assert_eq!(logger.messages().len(), 1);
}

#[rstest]
#[case::stage_prefix(None, "/foo/bar")]
#[case::route_key(Some("GET /foo/bar"), "GET /foo/bar")]
fn resource_from_route(ids: SequentialIds, #[case] route_key: Option<&str>, #[case] expected: &str) {
    let request = build_raw_request("GET", "/dev/foo/bar", "/dev/foo/bar");
    let stage = StageContext {
        route_key: route_key.map(str::to_owned),
        ..build_stage_context("/foo/bar")
    };

    let event = EventBuilder::new(&Config::default(), &ids).build(&request, &stage);

    assert_eq!(event.resource, expected);
    assert_eq!(event.request_context.resource_path, "/dev/foo/bar");
}

#[rstest]
fn repeated_query_keys(ids: SequentialIds) {
    let request = build_raw_request("GET", "/dev/foo/bar?a=1&a=2&b=x", "/dev/foo/bar");

    let event = build(&Config::default(), &ids, &request);

    assert_eq!(event["queryStringParameters"], json!({ "a": "2", "b": "x" }));
    assert_eq!(
        event["multiValueQueryStringParameters"],
        json!({ "a": ["1", "2"], "b": ["x"] })
    );
}

#[rstest]
fn path_parameters_and_stage_variables_pass_through(ids: SequentialIds) {
    let mut request = build_raw_request("DELETE", "/dev/users/42", "/dev/users/{id}");
    request.params = HashMap::from([("id".to_owned(), "42".to_owned())]);
    let stage = StageContext {
        stage_variables: Some(HashMap::from([("TABLE".to_owned(), "users-dev".to_owned())])),
        ..build_stage_context("/users/42")
    };

    let event = EventBuilder::new(&Config::default(), &ids).build(&request, &stage);

    assert_eq!(event.path_parameters, Some(request.params.clone()));
    assert_eq!(event.stage_variables, stage.stage_variables);
    assert_eq!(event.resource, "/users/{id}");
    assert_eq!(event.http_method, "DELETE");
}

#[rstest]
fn identity_overrides_from_environment_and_headers(ids: SequentialIds) {
    let config = Config::from_pairs([
        ("SLS_ACCOUNT_ID", "123456789012"),
        ("SLS_COGNITO_AUTHENTICATION_PROVIDER", "env-provider"),
        ("SLS_COGNITO_IDENTITY_ID", "env-identity"),
    ])
    .unwrap();
    let request = with_headers(
        build_raw_request("GET", "/dev/foo/bar", "/dev/foo/bar"),
        &[("cognito-authentication-provider", "header-provider")],
    );

    let event = build(&config, &ids, &request);
    let identity = &event["requestContext"]["identity"];

    assert_eq!(identity["accountId"], "123456789012");
    assert_eq!(identity["cognitoAuthenticationProvider"], "header-provider");
    assert_eq!(identity["cognitoIdentityId"], "env-identity");
    // Top level placeholders are never overridden.
    assert_eq!(event["requestContext"]["accountId"], "offlineContext_accountId");
}
