use anyhow::Result;
use bytes::Bytes;
use reqwest::Client;

pub async fn fetch_rss(client: &Client, url: &str) -> Result<Bytes> {
    let bytes = client.get(url).send().await?.error_for_status()?.bytes().await?;
    Ok(bytes)
}

pub async fn fetch_article(client: &Client, url: &str) -> Result<String> {
    let text = client.get(url).send().await?.error_for_status()?.text().await?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_rss_returns_body_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<rss/>"))
            .mount(&server)
            .await;

        let client = Client::new();
        let bytes = fetch_rss(&client, &format!("{}/feed.xml", server.uri())).await.unwrap();
        assert_eq!(&bytes[..], b"<rss/>");
    }

    #[tokio::test]
    async fn fetch_rss_fails_on_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = Client::new();
        let err = fetch_rss(&client, &format!("{}/feed.xml", server.uri())).await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn fetch_article_fails_on_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = Client::new();
        assert!(fetch_article(&client, &format!("{}/gone", server.uri())).await.is_err());
    }
}
