use openai_rest::{Config, LegacyClient, OpenAIError, RetryReason};
use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

async fn answering(response: ResponseTemplate) -> (MockServer, LegacyClient) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .and(header("authorization", "Bearer sk-legacy"))
        .and(body_partial_json(json!({
            "prompt": "What is Rust?",
            "model": "text-davinci-003",
            "max_tokens": 2048
        })))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;
    let client =
        LegacyClient::with_config(Config::api_key("sk-legacy").api_host(server.uri()).build())
            .unwrap();
    (server, client)
}

#[tokio::test]
async fn choices_are_joined_line_by_line() {
    let (_server, client) = answering(ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"text": "A systems language."}, {"text": "A fungus."}]
    })))
    .await;

    let answer = client.ask_question("What is Rust?").await.unwrap();

    assert_eq!(answer, "A systems language.\nA fungus.\n");
}

#[tokio::test]
async fn error_body_becomes_the_answer() {
    let (_server, client) = answering(ResponseTemplate::new(200).set_body_json(json!({
        "error": {"message": "That model is currently overloaded", "type": "server_error"}
    })))
    .await;

    let answer = client.ask_question("What is Rust?").await.unwrap();

    assert_eq!(answer, "That model is currently overloaded");
}

#[tokio::test]
async fn error_body_without_a_message_is_an_empty_answer() {
    let (_server, client) = answering(ResponseTemplate::new(200).set_body_json(json!({
        "error": {"message": null, "type": "server_error", "param": null, "code": null}
    })))
    .await;

    let answer = client.ask_question("What is Rust?").await.unwrap();

    assert_eq!(answer, "");
}

#[tokio::test]
async fn unauthorized_is_not_retryable() {
    let (_server, client) = answering(
        ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "Invalid API key"}})),
    )
    .await;

    let err = client.ask_question("What is Rust?").await.unwrap_err();

    assert!(matches!(err, OpenAIError::Authentication(ref m) if m == "Invalid API key"));
}

#[tokio::test]
async fn server_errors_are_retryable() {
    let (_server, client) = answering(
        ResponseTemplate::new(500).set_body_json(json!({"error": {"message": "internal error"}})),
    )
    .await;

    let err = client.ask_question("What is Rust?").await.unwrap_err();

    assert!(matches!(
        err,
        OpenAIError::Retryable(RetryReason::UnrecognizedResponse { status: 500, .. })
    ));
}

#[tokio::test]
async fn no_choices_is_retryable() {
    let (_server, client) =
        answering(ResponseTemplate::new(200).set_body_json(json!({"choices": []}))).await;

    let err = client.ask_question("What is Rust?").await.unwrap_err();

    assert!(matches!(err, OpenAIError::Retryable(RetryReason::NoChoices)));
}

#[tokio::test]
async fn blank_question_is_rejected_locally() {
    let client = LegacyClient::new("sk-legacy").unwrap();

    let err = client.ask_question("  ").await.unwrap_err();

    assert!(matches!(err, OpenAIError::Parameter(_)));
}
