use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const HASH_PARAM: &str = "hash=";
const SIGNATURE_SEPARATOR: char = '.';

/// Signs links so that their text and creation time can be checked later
/// without any server side record.
///
/// A signed link is the original URL followed by a `hash` query parameter
/// whose value is `<unix seconds>.<base64url HMAC-SHA256>`. The MAC covers
/// every byte before the final `.`, so any edit to the URL or to the
/// timestamp invalidates it.
#[derive(Clone)]
pub struct UrlSigner {
    secret: Vec<u8>,
}

impl UrlSigner {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn sign(&self, url: &str) -> String {
        self.sign_at(url, Utc::now())
    }

    pub fn sign_at(&self, url: &str, signed_at: DateTime<Utc>) -> String {
        let separator = if url.contains('?') { '&' } else { '?' };
        let payload = format!(
            "{}{}{}{}",
            url,
            separator,
            HASH_PARAM,
            signed_at.timestamp()
        );
        let signature = match self.mac() {
            Some(mut mac) => {
                mac.update(payload.as_bytes());
                URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
            }
            None => String::new(),
        };
        format!("{}{}{}", payload, SIGNATURE_SEPARATOR, signature)
    }

    /// `false` for a modified or malformed link. Expiry is not checked here.
    pub fn verify(&self, signed_url: &str) -> bool {
        let Some((payload, signature)) = signed_url.rsplit_once(SIGNATURE_SEPARATOR) else {
            return false;
        };
        if Self::timestamp_of(payload).is_none() {
            return false;
        }
        let Ok(signature) = URL_SAFE_NO_PAD.decode(signature) else {
            return false;
        };
        match self.mac() {
            Some(mut mac) => {
                mac.update(payload.as_bytes());
                mac.verify_slice(&signature).is_ok()
            }
            None => false,
        }
    }

    pub fn is_expired(&self, signed_url: &str, minutes_until_expire: i64) -> bool {
        self.is_expired_at(signed_url, minutes_until_expire, Utc::now())
    }

    /// A link whose timestamp cannot be read counts as expired. A window too
    /// large for `TimeDelta` never expires.
    pub fn is_expired_at(
        &self,
        signed_url: &str,
        minutes_until_expire: i64,
        now: DateTime<Utc>,
    ) -> bool {
        let signed_at = signed_url
            .rsplit_once(SIGNATURE_SEPARATOR)
            .and_then(|(payload, _)| Self::timestamp_of(payload));
        match signed_at {
            Some(signed_at) => TimeDelta::try_minutes(minutes_until_expire)
                .is_some_and(|window| now - signed_at > window),
            None => true,
        }
    }

    fn timestamp_of(payload: &str) -> Option<DateTime<Utc>> {
        let (_, timestamp) = payload.rsplit_once(HASH_PARAM)?;
        let seconds = timestamp.parse::<i64>().ok()?;
        DateTime::<Utc>::from_timestamp(seconds, 0)
    }

    fn mac(&self) -> Option<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret).ok()
    }
}
