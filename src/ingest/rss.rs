//! RSS 2.0 news source. Feeds are configured per domain and read either over
//! HTTP or from an in-memory fixture; a broken feed is logged and skipped.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::counter;
use quick_xml::de::from_str;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use time::{format_description::well_known::Rfc2822, OffsetDateTime};

use crate::article::Article;
use crate::ingest::{normalize_text, NewsSource};
use crate::insight::Domain;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    title: Option<String>,
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Feed {
    Url(String),
    /// Raw XML plus the name used as fallback source label.
    Fixture { name: String, xml: String },
}

impl Feed {
    fn label(&self) -> &str {
        match self {
            Feed::Url(u) => u,
            Feed::Fixture { name, .. } => name,
        }
    }
}

pub struct RssSource {
    economy: Vec<Feed>,
    it: Vec<Feed>,
    client: Client,
    timeout: Duration,
}

impl RssSource {
    pub fn new(economy: Vec<Feed>, it: Vec<Feed>) -> Self {
        Self {
            economy,
            it,
            client: Client::new(),
            timeout: Duration::from_secs(10),
        }
    }

    /// HTTP feeds from URL lists.
    pub fn from_urls(economy: &[String], it: &[String]) -> Self {
        let urls = |v: &[String]| -> Vec<Feed> { v.iter().cloned().map(Feed::Url).collect() };
        Self::new(urls(economy), urls(it))
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    fn feeds(&self, domain: Domain) -> &[Feed] {
        match domain {
            Domain::Economy => &self.economy,
            Domain::It => &self.it,
        }
    }

    async fn load(&self, feed: &Feed) -> Result<Vec<Article>> {
        match feed {
            Feed::Fixture { name, xml } => parse_feed(xml, name),
            Feed::Url(url) => {
                let body = self
                    .client
                    .get(url)
                    .header(reqwest::header::USER_AGENT, "DailyBrief/1.0")
                    .timeout(self.timeout)
                    .send()
                    .await
                    .with_context(|| format!("rss get {url}"))?
                    .error_for_status()
                    .with_context(|| format!("rss non-2xx {url}"))?
                    .text()
                    .await
                    .context("rss .text()")?;
                parse_feed(&body, url)
            }
        }
    }
}

#[async_trait]
impl NewsSource for RssSource {
    async fn fetch_news(&self, domain: Domain) -> Result<Vec<Article>> {
        let mut out = Vec::new();
        for feed in self.feeds(domain) {
            match self.load(feed).await {
                Ok(mut v) => out.append(&mut v),
                Err(e) => {
                    tracing::warn!(target: "ingest", error = ?e, feed = feed.label(), "rss feed error");
                    counter!("ingest_source_errors_total").increment(1);
                }
            }
        }
        Ok(out)
    }

    fn name(&self) -> &str {
        "rss"
    }
}

fn parse_pub_date(ts: &str) -> Option<DateTime<Utc>> {
    let dt = OffsetDateTime::parse(ts.trim(), &Rfc2822).ok()?;
    DateTime::from_timestamp(dt.unix_timestamp(), dt.nanosecond())
}

/// Items without title or link are skipped; a missing or invalid date becomes now.
pub fn parse_feed(xml: &str, feed_label: &str) -> Result<Vec<Article>> {
    let rss: Rss = from_str(xml).with_context(|| format!("parsing rss xml from {feed_label}"))?;
    let source = rss
        .channel
        .title
        .as_deref()
        .map(normalize_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| feed_label.to_string());

    let mut out = Vec::with_capacity(rss.channel.item.len());
    for it in rss.channel.item {
        let title = it.title.as_deref().map(normalize_text).unwrap_or_default();
        let link = it.link.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() || link.is_empty() {
            continue;
        }
        let published = it
            .pub_date
            .as_deref()
            .and_then(parse_pub_date)
            .unwrap_or_else(Utc::now);

        out.push(
            Article::new(title, link)
                .with_content(it.description.as_deref().map(normalize_text).unwrap_or_default())
                .with_source(source.clone())
                .published(published),
        );
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>한경 경제</title>
    <item>
      <title>환율 1,400원 돌파</title>
      <link>https://news.example/1</link>
      <pubDate>Thu, 02 Jan 2025 09:00:00 +0900</pubDate>
      <description>&lt;p&gt;달러 &amp;amp; 원화&lt;/p&gt;</description>
    </item>
    <item>
      <title>링크 없는 기사</title>
    </item>
    <item>
      <title>날짜 없는 기사</title>
      <link>https://news.example/3</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_items_and_skips_incomplete() {
        let v = parse_feed(XML, "https://feed").unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].title, "환율 1,400원 돌파");
        assert_eq!(v[0].source, "한경 경제");
        assert_eq!(v[0].content, "달러 & 원화");
        assert_eq!(
            v[0].published_at,
            Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap()
        );
        assert_eq!(v[1].link, "https://news.example/3");
    }

    #[test]
    fn channel_without_title_uses_feed_label() {
        let xml = r#"<rss><channel><item><title>t</title><link>l</link></item></channel></rss>"#;
        let v = parse_feed(xml, "https://feed/it").unwrap();
        assert_eq!(v[0].source, "https://feed/it");
    }

    #[tokio::test]
    async fn broken_feed_is_skipped() {
        let src = RssSource::new(
            vec![
                Feed::Fixture {
                    name: "bad".into(),
                    xml: "<rss><channel>".into(),
                },
                Feed::Fixture {
                    name: "good".into(),
                    xml: XML.into(),
                },
            ],
            vec![],
        );
        assert_eq!(src.fetch_news(Domain::Economy).await.unwrap().len(), 2);
        assert!(src.fetch_news(Domain::It).await.unwrap().is_empty());
    }
}
