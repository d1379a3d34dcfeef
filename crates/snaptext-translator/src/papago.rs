use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use snaptext_config::translator::TranslatorConfig;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";
const RESULT_PATH: &str = "message.result.translatedText";

/// Client for Papago-style form translation endpoints
#[derive(Clone)]
pub struct PapagoTranslator {
    client: reqwest::Client,
    api_url: String,
    id_header: String,
    secret_header: String,
    client_id: String,
    client_secret: String,
}

impl PapagoTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            id_header: config.id_header.clone(),
            secret_header: config.secret_header.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }

    fn credential_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), TranslateError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TranslateError::ApiError(format!("Invalid header name {name:?}: {e}")))?;
        let value =
            HeaderValue::from_str(value).map_err(|_| TranslateError::AuthenticationError)?;
        Ok((name, value))
    }
}

/// Pull `message.result.translatedText` out of a response body
pub(crate) fn translated_text(json: &serde_json::Value) -> Result<&str, TranslateError> {
    json.pointer("/message/result/translatedText")
        .and_then(|v| v.as_str())
        .ok_or(TranslateError::MissingField(RESULT_PATH))
}

#[async_trait]
impl Translator for PapagoTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let (id_name, id_value) = Self::credential_header(&self.id_header, &self.client_id)?;
        let (secret_name, secret_value) =
            Self::credential_header(&self.secret_header, &self.client_secret)?;

        let params = [("source", from.as_str()), ("target", to.as_str()), ("text", text)];

        let mut request = self
            .client
            .post(&self.api_url)
            .header(id_name, id_value)
            .header(secret_name, secret_value)
            .form(&params)
            .build()?;
        // `form` sets the content type without a charset
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        tracing::debug!("Translating {} chars {} -> {}", text.chars().count(), from, to);
        let response = self.client.execute(request).await?;

        let status = response.status();
        if status == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if status == 401 || status == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !status.is_success() {
            return Err(TranslateError::ApiError(format!("HTTP {}", status)));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        Ok(Translation {
            text: translated_text(&json)?.to_string(),
            from,
            to,
            provider: "papago".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Papago".to_string(),
            requires_api_key: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    const REPLY: &str = r#"{"message":{"result":{"srcLangType":"ja","tarLangType":"ko","translatedText":"안녕"}}}"#;

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some((head, body)) = text.split_once("\r\n\r\n") else {
            return false;
        };
        let length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        body.len() >= length
    }

    /// Answer one request with `status` and `body`, returning the raw request
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/translate", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request_complete(&request) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8(request).unwrap()
        });

        (url, handle)
    }

    fn config_for(url: String) -> TranslatorConfig {
        TranslatorConfig {
            api_url: url,
            client_id: "cid".to_string(),
            client_secret: "sec".to_string(),
            ..TranslatorConfig::default()
        }
    }

    #[tokio::test]
    async fn test_request_shape() {
        let (url, server) = serve_once("200 OK", REPLY).await;
        let translator = PapagoTranslator::new(&config_for(url)).unwrap();

        let translation = translator
            .translate("あ い", "ja".to_string(), "ko".to_string())
            .await
            .unwrap();
        assert_eq!(translation.text, "안녕");
        assert_eq!(translation.provider, "papago");

        let request = server.await.unwrap();
        let lower = request.to_lowercase();
        assert!(request.starts_with("POST /translate "), "{request}");
        assert!(lower.contains("\r\nx-client-id: cid\r\n"), "{request}");
        assert!(lower.contains("\r\nx-client-secret: sec\r\n"), "{request}");
        assert!(
            lower.contains("\r\ncontent-type: application/x-www-form-urlencoded; charset=utf-8\r\n"),
            "{request}"
        );
        assert_eq!(lower.matches("content-type:").count(), 1, "{request}");
        assert!(
            request.ends_with("\r\n\r\nsource=ja&target=ko&text=%E3%81%82+%E3%81%84"),
            "{request}"
        );
    }

    #[tokio::test]
    async fn test_custom_header_names() {
        let (url, server) = serve_once("200 OK", REPLY).await;
        let config = TranslatorConfig {
            id_header: "X-Naver-Client-Id".to_string(),
            secret_header: "X-Naver-Client-Secret".to_string(),
            ..config_for(url)
        };
        let translator = PapagoTranslator::new(&config).unwrap();

        translator
            .translate("テスト", "ja".to_string(), "en".to_string())
            .await
            .unwrap();

        let lower = server.await.unwrap().to_lowercase();
        assert!(lower.contains("\r\nx-naver-client-id: cid\r\n"));
        assert!(lower.contains("\r\nx-naver-client-secret: sec\r\n"));
        assert!(!lower.contains("\r\nx-client-id:"));
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases: [(&'static str, fn(&TranslateError) -> bool); 4] = [
            ("429 Too Many Requests", |e| matches!(e, TranslateError::RateLimitExceeded)),
            ("401 Unauthorized", |e| matches!(e, TranslateError::AuthenticationError)),
            ("403 Forbidden", |e| matches!(e, TranslateError::AuthenticationError)),
            ("500 Internal Server Error", |e| {
                matches!(e, TranslateError::ApiError(message) if message.starts_with("HTTP 500"))
            }),
        ];

        for (status, expected) in cases {
            let (url, server) = serve_once(status, "{}").await;
            let translator = PapagoTranslator::new(&config_for(url)).unwrap();

            let err = translator
                .translate("text", "ja".to_string(), "ko".to_string())
                .await
                .unwrap_err();
            assert!(expected(&err), "{status}: {err:?}");
            server.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_reply_without_translation() {
        let (url, server) = serve_once("200 OK", r#"{"message":{}}"#).await;
        let translator = PapagoTranslator::new(&config_for(url)).unwrap();

        let err = translator
            .translate("text", "ja".to_string(), "ko".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::MissingField(RESULT_PATH)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_stalled_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/translate", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            // accept and never answer
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            drop(socket);
        });

        let config = TranslatorConfig {
            timeout_ms: 100,
            ..config_for(url)
        };
        let translator = PapagoTranslator::new(&config).unwrap();

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(3),
            translator.translate("text", "ja".to_string(), "ko".to_string()),
        )
        .await
        .expect("request should give up on its own");
        assert!(matches!(result, Err(TranslateError::NetworkError(e)) if e.is_timeout()));
        server.abort();
    }

    #[test]
    fn test_translated_text_path() {
        let body = json!({
            "message": {
                "@type": "response",
                "result": {
                    "srcLangType": "ja",
                    "tarLangType": "ko",
                    "translatedText": "안녕하세요"
                }
            }
        });
        assert_eq!(translated_text(&body).unwrap(), "안녕하세요");
    }

    #[test]
    fn test_missing_translated_text() {
        let body = json!({ "errorMessage": "Authentication failed", "errorCode": "024" });
        assert!(matches!(
            translated_text(&body),
            Err(TranslateError::MissingField(RESULT_PATH))
        ));

        let body = json!({ "message": { "result": { "translatedText": 5 } } });
        assert!(translated_text(&body).is_err());
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_request() {
        let config = TranslatorConfig {
            // nothing listens here; an attempted request would be a network error
            api_url: "http://127.0.0.1:9/translate".to_string(),
            ..TranslatorConfig::default()
        };
        let translator = PapagoTranslator::new(&config).unwrap();

        let result = translator
            .translate("テスト", "ja".to_string(), "ko".to_string())
            .await;
        assert!(matches!(result, Err(TranslateError::AuthenticationError)));
    }

    #[test]
    fn test_invalid_header_name() {
        let result = PapagoTranslator::credential_header("bad header", "value");
        assert!(matches!(result, Err(TranslateError::ApiError(_))));
    }
}
