//! robots.txt fetching and evaluation.
//!
//! Rules are evaluated the RFC 9309 way: the most specific matching
//! user-agent group applies (falling back to `*`), the longest matching path
//! pattern wins, and `Allow` wins a tie. `*` and a trailing `$` are supported
//! in patterns.

use std::time::Duration;

use log::debug;
use url::Url;

use crate::fetch::RequestHeaders;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    allow: bool,
    pattern: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Group {
    agents: Vec<String>,
    rules: Vec<Rule>,
}

/// Parsed robots.txt content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsRules {
    groups: Vec<Group>,
}

impl RobotsRules {
    /// Parses robots.txt text. Unknown lines and rules outside any group are
    /// ignored.
    pub fn parse(text: &str) -> Self {
        let mut groups: Vec<Group> = Vec::new();
        let mut current: Option<Group> = None;

        for raw_line in text.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    // A user-agent line after rules starts a new group
                    if current.as_ref().is_some_and(|g| !g.rules.is_empty()) {
                        groups.extend(current.take());
                    }
                    current
                        .get_or_insert_with(Group::default)
                        .agents
                        .push(value.to_ascii_lowercase());
                }
                "allow" | "disallow" => {
                    let Some(group) = current.as_mut() else {
                        continue;
                    };
                    if value.is_empty() {
                        continue;
                    }
                    group.rules.push(Rule {
                        allow: key == "allow",
                        pattern: encode_non_ascii(value),
                    });
                }
                _ => {}
            }
        }
        groups.extend(current);

        Self { groups }
    }

    /// Whether `user_agent` may fetch `path` (path plus optional query).
    pub fn is_allowed(&self, user_agent: &str, path: &str) -> bool {
        let token = user_agent
            .split('/')
            .next()
            .unwrap_or(user_agent)
            .trim()
            .to_ascii_lowercase();

        let specific: Vec<&Group> = self
            .groups
            .iter()
            .filter(|g| {
                g.agents
                    .iter()
                    .any(|agent| agent != "*" && !agent.is_empty() && token.contains(agent))
            })
            .collect();
        let applicable: Vec<&Group> = if specific.is_empty() {
            self.groups
                .iter()
                .filter(|g| g.agents.iter().any(|agent| agent == "*"))
                .collect()
        } else {
            specific
        };

        let best = applicable
            .iter()
            .flat_map(|g| g.rules.iter())
            .filter(|rule| pattern_matches(&rule.pattern, path))
            .max_by(|a, b| {
                a.pattern
                    .len()
                    .cmp(&b.pattern.len())
                    .then(a.allow.cmp(&b.allow))
            });

        best.map_or(true, |rule| rule.allow)
    }
}

// Page paths come percent-encoded from `Url::path`; patterns are brought to
// the same form. `*`, `$` and existing escapes are left alone.
fn encode_non_ascii(pattern: &str) -> String {
    let mut encoded = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c.is_ascii() {
            encoded.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let (pattern, anchored) = match pattern.strip_suffix('$') {
        Some(stripped) => (stripped, true),
        None => (pattern, false),
    };

    let mut parts = pattern.split('*');
    let first = parts.next().unwrap_or("");
    if !path.starts_with(first) {
        return false;
    }
    let rest: Vec<&str> = parts.collect();
    let mut position = first.len();
    if rest.is_empty() {
        return !anchored || position == path.len();
    }

    for (index, part) in rest.iter().enumerate() {
        if anchored && index == rest.len() - 1 {
            return path.len() >= position + part.len() && path.ends_with(part);
        }
        match path[position..].find(part) {
            Some(offset) => position += offset + part.len(),
            None => return false,
        }
    }
    true
}

/// Checks whether `user_agent` may crawl `page_url` according to the site's
/// robots.txt at `{scheme}://{host}/robots.txt`.
///
/// Fails open: an unparseable page URL, a transport error or a non-2xx
/// response all count as allowed.
pub async fn check_robots_txt(
    client: &reqwest::Client,
    page_url: &str,
    user_agent: &str,
    timeout: Duration,
) -> bool {
    let Ok(page) = Url::parse(page_url) else {
        debug!("robots.txt check skipped for unparseable URL {:?}", page_url);
        return true;
    };
    let Ok(robots_url) = page.join("/robots.txt") else {
        return true;
    };

    let response = match RequestHeaders::apply_to_request_builder(client.get(robots_url.as_str()))
        .timeout(timeout)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            debug!("robots.txt fetch failed for {}: {}", robots_url, e);
            return true;
        }
    };
    if !response.status().is_success() {
        debug!(
            "robots.txt at {} returned {}; treating as allowed",
            robots_url,
            response.status()
        );
        return true;
    }
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            debug!("robots.txt body unreadable at {}: {}", robots_url, e);
            return true;
        }
    };

    let mut path = page.path().to_string();
    if let Some(query) = page.query() {
        path.push('?');
        path.push_str(query);
    }
    RobotsRules::parse(&text).is_allowed(user_agent, &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_empty_disallow_allows_everything() {
        let rules = RobotsRules::parse("User-agent: *\nDisallow:");
        assert!(rules.is_allowed("*", "/page"));
    }

    #[test]
    fn test_disallow_root() {
        let rules = RobotsRules::parse("User-agent: *\nDisallow: /");
        assert!(!rules.is_allowed("*", "/page"));
        assert!(!rules.is_allowed("Googlebot", "/page"));
    }

    #[test]
    fn test_specific_group_wins_over_star() {
        let rules = RobotsRules::parse(
            "User-agent: *\nDisallow: /\n\nUser-agent: Googlebot\nDisallow: /private/\n",
        );
        assert!(!rules.is_allowed("*", "/page"));
        assert!(rules.is_allowed("Googlebot", "/page"));
        assert!(!rules.is_allowed("Googlebot", "/private/x"));
        assert!(!rules.is_allowed("Googlebot/2.1", "/private/x"));
    }

    #[test]
    fn test_googlebot_only_group_does_not_bind_star() {
        let rules = RobotsRules::parse("User-agent: Googlebot\nDisallow: /");
        assert!(!rules.is_allowed("Googlebot", "/page"));
        assert!(rules.is_allowed("*", "/page"));
    }

    #[test]
    fn test_longest_match_and_allow_tie() {
        let rules = RobotsRules::parse(
            "User-agent: *\nDisallow: /shop\nAllow: /shop/public\nAllow: /same\nDisallow: /same\n",
        );
        assert!(!rules.is_allowed("*", "/shop/cart"));
        assert!(rules.is_allowed("*", "/shop/public/item"));
        assert!(rules.is_allowed("*", "/same"));
    }

    #[test]
    fn test_wildcards() {
        let rules = RobotsRules::parse("User-agent: *\nDisallow: /*.pdf$\nDisallow: /*?sort=");
        assert!(!rules.is_allowed("*", "/files/report.pdf"));
        assert!(rules.is_allowed("*", "/files/report.pdf.html"));
        assert!(!rules.is_allowed("*", "/catalog?sort=price"));
        assert!(rules.is_allowed("*", "/catalog?page=2"));
    }

    #[test]
    fn test_grouped_agents_and_comments() {
        let rules = RobotsRules::parse(
            "# comment\nUser-agent: Bingbot\nUser-agent: Googlebot # both\nDisallow: /tmp\n",
        );
        assert!(!rules.is_allowed("Googlebot", "/tmp/file"));
        assert!(!rules.is_allowed("bingbot", "/tmp/file"));
        assert!(rules.is_allowed("*", "/tmp/file"));
    }

    #[test]
    fn test_non_ascii_patterns_match_encoded_paths() {
        let rules = RobotsRules::parse("User-agent: *\nDisallow: /каталог/\nAllow: /каталог/диван$");
        let blocked = Url::parse("https://shop.example.ua/каталог/стіл").expect("url");
        let allowed = Url::parse("https://shop.example.ua/каталог/диван").expect("url");
        assert!(!rules.is_allowed("*", blocked.path()));
        assert!(rules.is_allowed("*", allowed.path()));
        assert!(rules.is_allowed("*", "/blog/"));
    }

    #[tokio::test]
    async fn test_check_robots_txt_status_codes() {
        for status in [200, 404, 500] {
            let server = Server::run();
            server.expect(
                Expectation::matching(request::method_path("GET", "/robots.txt"))
                    .respond_with(status_code(status).body("User-agent: *\nDisallow:")),
            );
            let page = server.url_str("/page");
            let client = reqwest::Client::new();
            assert!(
                check_robots_txt(&client, &page, "*", TIMEOUT).await,
                "status {}",
                status
            );
        }
    }

    #[tokio::test]
    async fn test_check_robots_txt_disallow() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/robots.txt"))
                .times(2)
                .respond_with(status_code(200).body("User-agent: Googlebot\nDisallow: /")),
        );
        let page = server.url_str("/page");
        let client = reqwest::Client::new();
        assert!(!check_robots_txt(&client, &page, "Googlebot", TIMEOUT).await);
        assert!(check_robots_txt(&client, &page, "*", TIMEOUT).await);
    }

    #[tokio::test]
    async fn test_check_robots_txt_error_status_with_disallow_is_allowed() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/robots.txt"))
                .respond_with(status_code(503).body("User-agent: *\nDisallow: /")),
        );
        let client = reqwest::Client::new();
        assert!(check_robots_txt(&client, &server.url_str("/page"), "*", TIMEOUT).await);
    }

    #[tokio::test]
    async fn test_check_robots_txt_fails_open() {
        let client = reqwest::Client::new();
        assert!(check_robots_txt(&client, "not-a-valid-url", "*", TIMEOUT).await);
        assert!(check_robots_txt(&client, "", "*", TIMEOUT).await);

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let page = format!("http://{}/page", addr);
        assert!(check_robots_txt(&client, &page, "*", TIMEOUT).await);
    }
}
