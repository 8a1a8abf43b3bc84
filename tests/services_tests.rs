//! Integration tests for the endpoint services.

use deepl_client::{
    CallContext, DeepLClient, DeepLError, Formality, RephraseOptions, SplitSentences,
    TagHandling, TranslateTextOptions, WritingStyle, WritingTone,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, DeepLClient) {
    let server = MockServer::start().await;
    let client = DeepLClient::builder()
        .api_key("test-key:fx")
        .base_url(server.uri())
        .build()
        .unwrap();
    (server, client)
}

#[tokio::test]
async fn test_translate_text() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .and(header("Authorization", "DeepL-Auth-Key test-key:fx"))
        .and(body_json(json!({"text": ["Hello, world!"], "target_lang": "DE"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "translations": [{"detected_source_language": "EN", "text": "Hallo, Welt!"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let translation = client.translate().text("Hello, world!", "DE").await.unwrap();

    assert_eq!(translation.text, "Hallo, Welt!");
    assert_eq!(translation.detected_source_language, "EN");
}

#[tokio::test]
async fn test_translate_with_options() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .and(body_json(json!({
            "text": ["<p>Hello</p>", "<p>Bye</p>"],
            "source_lang": "EN",
            "target_lang": "DE",
            "show_billed_characters": true,
            "split_sentences": "nonewlines",
            "formality": "prefer_more",
            "tag_handling": "html"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "translations": [
                {"detected_source_language": "EN", "text": "<p>Hallo</p>", "billed_characters": 12},
                {"detected_source_language": "EN", "text": "<p>Tschüss</p>", "billed_characters": 10}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = TranslateTextOptions::new(["<p>Hello</p>", "<p>Bye</p>"], "DE")
        .source_lang("EN")
        .show_billed_characters(true)
        .split_sentences(SplitSentences::NoNewlines)
        .formality(Formality::PreferMore)
        .tag_handling(TagHandling::Html);

    let translations = client
        .translate()
        .with_options(options, &CallContext::new())
        .await
        .unwrap();

    assert_eq!(translations.len(), 2);
    assert_eq!(translations[1].text, "<p>Tschüss</p>");
    assert_eq!(translations[0].billed_characters, Some(12));
}

#[tokio::test]
async fn test_translate_no_result() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"translations": []})))
        .mount(&server)
        .await;

    let err = client.translate().text("Hello", "DE").await.unwrap_err();

    assert!(matches!(
        err,
        DeepLError::EmptyResponse {
            operation: "translate"
        }
    ));
}

#[tokio::test]
async fn test_rephrase_text() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/v2/write/rephrase"))
        .and(body_json(json!({"text": ["I has a apple."]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "improvements": [{
                "detected_source_language": "en",
                "text": "I have an apple.",
                "target_language": "en-US"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let improvement = client.rephrase().text("I has a apple.").await.unwrap();

    assert_eq!(improvement.text, "I have an apple.");
}

#[tokio::test]
async fn test_rephrase_with_style() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/v2/write/rephrase"))
        .and(body_json(json!({
            "text": ["hey, send me the report"],
            "target_lang": "en-GB",
            "writing_style": "business"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "improvements": [{
                "detected_source_language": "en",
                "text": "Could you please send me the report?"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = RephraseOptions::new(["hey, send me the report"])
        .target_lang("en-GB")
        .writing_style(WritingStyle::Business);

    let improvements = client
        .rephrase()
        .with_options(options, &CallContext::new())
        .await
        .unwrap();

    assert_eq!(improvements.len(), 1);
}

#[tokio::test]
async fn test_rephrase_style_and_tone_conflict() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let options = RephraseOptions::new(["text"])
        .writing_style(WritingStyle::Academic)
        .tone(WritingTone::PreferFriendly);

    let err = client
        .rephrase()
        .with_options(options, &CallContext::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DeepLError::Validation { .. }));
}

#[tokio::test]
async fn test_source_and_target_languages() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/v2/languages"))
        .and(query_param("type", "source"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"language": "EN", "name": "English"},
            {"language": "DE", "name": "German"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/languages"))
        .and(query_param("type", "target"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"language": "DE", "name": "German", "supports_formality": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let source = client.languages().source().await.unwrap();
    let target = client.languages().target().await.unwrap();

    assert_eq!(source.len(), 2);
    assert!(!source[0].supports_formality);
    assert_eq!(target.len(), 1);
    assert!(target[0].supports_formality);
}

#[tokio::test]
async fn test_usage() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/v2/usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "character_count": 499000,
            "character_limit": 500000,
            "products": [
                {"product_type": "translate", "api_key_character_count": 499000, "character_count": 499000}
            ],
            "start_time": "2025-05-13T09:18:42Z",
            "end_time": "2025-06-13T09:18:42Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let usage = client.usage().get().await.unwrap();

    assert_eq!(usage.remaining(), 1000);
    assert!(!usage.limit_reached());
    assert_eq!(usage.products[0].product_type, "translate");
    assert!(usage.start_time < usage.end_time);
}
