mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn login_without_credentials_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = common::client()
        .post(format!("{}/auth/login", server.base_url))
        .form(&[("email", ""), ("password", "")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Email address is required., Password is required.");
    Ok(())
}

#[tokio::test]
async fn login_with_malformed_email_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = common::client()
        .post(format!("{}/auth/login", server.base_url))
        .form(&[("email", "not-an-email"), ("password", "x")])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Invalid email address.");
    Ok(())
}

#[tokio::test]
async fn registration_requires_matching_passwords() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = common::client()
        .post(format!("{}/auth/register", server.base_url))
        .form(&[
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("password", "abcdefgh"),
            ("confirm_password", "hgfedcba"),
        ])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await?;
    assert!(body["error"].as_str().unwrap_or_default().contains("match"), "{}", body);
    Ok(())
}

#[tokio::test]
async fn admin_redirects_anonymous_visitors() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = common::client()
        .get(format!("{}/admin", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "/auth/login");
    Ok(())
}

#[tokio::test]
async fn sample_method_is_callable() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = common::client()
        .post(format!("{}/api/SampleController/getSample", server.base_url))
        .json(&json!({ "args": [] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!("Hello, world!"));
    Ok(())
}
