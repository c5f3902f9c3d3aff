//! Share links: `<base>?game=<token>`.

use tracing::{debug, instrument};
use url::Url;

use crate::session::SessionToken;

/// Query parameter that carries the session token.
pub const GAME_PARAM: &str = "game";

/// Builds the share link for `token`.
///
/// Any query or fragment on `base` is dropped, so the result depends only
/// on the base's origin and path.
#[instrument(skip(base), fields(base = %base))]
pub fn build_share_link(base: &Url, token: &SessionToken) -> Url {
    let mut link = base.clone();
    link.set_fragment(None);
    link.set_query(None);
    link.query_pairs_mut().append_pair(GAME_PARAM, token.as_str());
    debug!(link = %link, "Built share link");
    link
}

/// Extracts a token from a bare token, a `?game=` query string, or a full
/// share link. Returns `None` when no valid token is present.
#[instrument]
pub fn token_from_link(input: &str) -> Option<SessionToken> {
    let input = input.trim();

    if let Some(query) = input.strip_prefix('?') {
        return token_from_query(url::form_urlencoded::parse(query.as_bytes()));
    }

    match Url::parse(input) {
        Ok(link) => token_from_query(link.query_pairs()),
        Err(_) => SessionToken::parse(input).ok(),
    }
}

fn token_from_query(pairs: url::form_urlencoded::Parse<'_>) -> Option<SessionToken> {
    pairs
        .into_iter()
        .find(|(key, _)| key == GAME_PARAM)
        .and_then(|(_, value)| SessionToken::parse(&value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> SessionToken {
        SessionToken::parse(s).unwrap()
    }

    #[test]
    fn test_build_appends_game_param() {
        let base = Url::parse("https://play.example.com/ttt/").unwrap();
        let link = build_share_link(&base, &token("abc123"));
        assert_eq!(link.as_str(), "https://play.example.com/ttt/?game=abc123");
    }

    #[test]
    fn test_build_replaces_existing_query_and_fragment() {
        let base = Url::parse("http://localhost:3000/?game=old&x=1#board").unwrap();
        let link = build_share_link(&base, &token("new1"));
        assert_eq!(link.as_str(), "http://localhost:3000/?game=new1");
    }

    #[test]
    fn test_token_from_link_variants() {
        let expected = Some(token("k3x9z1q"));
        assert_eq!(token_from_link("k3x9z1q"), expected);
        assert_eq!(token_from_link("?game=k3x9z1q"), expected);
        assert_eq!(token_from_link("http://localhost:3000/?game=k3x9z1q"), expected);
        assert_eq!(token_from_link("https://h/p?a=1&game=k3x9z1q#f"), expected);
    }

    #[test]
    fn test_token_from_link_missing_or_invalid() {
        assert_eq!(token_from_link("http://localhost:3000/"), None);
        assert_eq!(token_from_link("http://localhost:3000/?game=BAD!"), None);
        assert_eq!(token_from_link(""), None);
    }

    #[test]
    fn test_round_trip() {
        let base = Url::parse("http://localhost:3000/").unwrap();
        let t = SessionToken::generate();
        let link = build_share_link(&base, &t);
        assert_eq!(token_from_link(link.as_str()), Some(t));
    }
}
