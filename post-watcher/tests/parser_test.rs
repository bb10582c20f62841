mod common;

use common::init_tracing;
use post_watcher::FeedParser;

const ATOM_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:media="http://search.yahoo.com/mrss/">
  <category term="deals" label="r/deals"/>
  <updated>2025-11-02T10:00:00+00:00</updated>
  <id>/r/deals/new/.rss</id>
  <link rel="self" href="https://www.reddit.com/r/deals/new/.rss" type="application/atom+xml" />
  <title>newest submissions : deals</title>
  <entry>
    <author><name>/u/ParentalAdvice</name><uri>https://www.reddit.com/user/ParentalAdvice</uri></author>
    <category term="deals" label="r/deals"/>
    <content type="html">&lt;table&gt;&lt;tr&gt;&lt;td&gt;&lt;a href=&quot;https://www.reddit.com/r/deals/comments/abc123/new_drop/&quot;&gt;&lt;img src=&quot;https://b.thumbs.redditmedia.com/abc.jpg&quot; alt=&quot;New drop&quot; /&gt;&lt;/a&gt;&lt;/td&gt;&lt;/tr&gt;&lt;/table&gt;</content>
    <id>t3_abc123</id>
    <link href="https://www.reddit.com/r/deals/comments/abc123/new_drop/" />
    <updated>2025-11-02T09:58:00+00:00</updated>
    <title>New drop</title>
  </entry>
  <entry>
    <author><name>/u/AudaciousCo</name><uri>https://www.reddit.com/user/AudaciousCo</uri></author>
    <content type="html">&lt;p&gt;Plain text post&lt;/p&gt;</content>
    <id>t3_def456</id>
    <link href="https://www.reddit.com/r/deals/comments/def456/question/" />
    <updated>2025-11-02T09:50:00+00:00</updated>
    <title>Question</title>
  </entry>
</feed>"#;

const RSS_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Forum</title>
    <link>https://forum.example.com</link>
    <description>Latest posts</description>
    <item>
      <title>First &amp; foremost</title>
      <link>https://forum.example.com/comments/zz1/first/</link>
      <author>someone@example.com (Someone)</author>
      <description>&lt;p&gt;&lt;img src="//cdn.example.com/a.png"/&gt;&lt;/p&gt;</description>
      <guid>zz1</guid>
    </item>
    <item>
      <title>Second</title>
      <link>https://forum.example.com/comments/zz2/second/</link>
      <description>text</description>
      <guid>zz2</guid>
    </item>
  </channel>
</rss>"#;

#[test]
fn test_parse_atom_feed_in_source_order() {
    init_tracing();
    let entries = FeedParser::parse_entries(ATOM_FEED);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "New drop");
    assert_eq!(entries[0].author, "/u/ParentalAdvice");
    assert_eq!(entries[0].link, "https://www.reddit.com/r/deals/comments/abc123/new_drop/");
    assert!(entries[0].summary.contains(r#"<img src="https://b.thumbs.redditmedia.com/abc.jpg""#));
    assert_eq!(entries[1].title, "Question");
    assert_eq!(entries[1].author, "/u/AudaciousCo");
}

#[test]
fn test_parse_rss_feed() {
    init_tracing();
    let entries = FeedParser::parse_entries(RSS_FEED);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "First & foremost");
    assert_eq!(entries[0].link, "https://forum.example.com/comments/zz1/first/");
    assert!(entries[0].summary.contains("<img"));
    assert_eq!(entries[1].author, "");
}

#[test]
fn test_unexpected_root_recovers_entries() {
    init_tracing();
    let body = ATOM_FEED
        .replace(
            r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:media="http://search.yahoo.com/mrss/">"#,
            "<html><body>",
        )
        .replace("</feed>", "</body></html>");

    let entries = FeedParser::parse_entries(&body);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].link, "https://www.reddit.com/r/deals/comments/abc123/new_drop/");
    assert_eq!(entries[1].link, "https://www.reddit.com/r/deals/comments/def456/question/");
}

#[test]
fn test_garbage_yields_no_entries() {
    init_tracing();
    assert!(FeedParser::parse_entries("").is_empty());
    assert!(FeedParser::parse_entries("<html><body>Too Many Requests</body></html>").is_empty());
}

#[test]
fn test_feed_content_detection() {
    assert!(FeedParser::is_valid_feed_content(ATOM_FEED));
    assert!(FeedParser::is_valid_feed_content(RSS_FEED));
    assert!(!FeedParser::is_valid_feed_content("<html></html>"));
}
